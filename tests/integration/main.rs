//! Integration tests for the Bundler buildpack

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    fn bundler_cnb() -> Command {
        let mut cmd = cargo_bin_cmd!("bundler-cnb");
        cmd.env_remove("BUNDLER_CNB_CONFIG")
            .env_remove("CNB_BUILDPACK_DIR")
            .env_remove("CNB_STACK_ID");
        cmd
    }

    #[test]
    fn help_displays() {
        bundler_cnb()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("detect"))
            .stdout(predicate::str::contains("build"));
    }

    #[test]
    fn version_displays() {
        bundler_cnb()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("bundler-cnb"));
    }

    #[test]
    fn build_requires_arguments() {
        bundler_cnb().arg("build").assert().failure();
    }
}

#[cfg(unix)]
mod phase_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const BUILDPACK_TOML: &str = r#"
[buildpack]
id = "org.example.bundler"
name = "Bundler Buildpack"
version = "0.0.1"

[metadata.default-versions]
bundler = "2.x"

[[metadata.dependencies]]
id = "bundler"
name = "Bundler"
version = "1.17.3"
sha256 = "sha-one"
uri = "https://example.com/bundler-1.17.3.tgz"
stacks = ["test-stack"]

[[metadata.dependencies]]
id = "bundler"
name = "Bundler"
version = "2.1.4"
sha256 = "sha-two"
uri = "https://example.com/bundler-2.1.4.tgz"
stacks = ["test-stack"]
"#;

    // $1 is the buildpack directory and $2 the layer
    const INSTALLER_TOML: &str = r#"
[installer]
command = "sh"
args = ["-c", "echo run >> \"$1/runs\"; printf %s \"$DEPENDENCY_VERSION\" > \"$2/installed\"", "installer"]
"#;

    const PINNED_PLAN: &str = r#"
[[entries]]
name = "bundler"
version = "1.17.3"

[entries.metadata]
version-source = "buildpack.yml"
"#;

    struct Workspace {
        root: TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let root = TempDir::new().unwrap();
            for dir in ["cnb", "app", "layers", "platform"] {
                fs::create_dir_all(root.path().join(dir)).unwrap();
            }
            fs::write(root.path().join("cnb/buildpack.toml"), BUILDPACK_TOML).unwrap();
            fs::write(root.path().join("cnb/installer.toml"), INSTALLER_TOML).unwrap();
            Self { root }
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.root.path().join(rel)
        }

        fn plan(&self) -> PathBuf {
            self.path("plan.toml")
        }

        fn write_plan(&self, content: &str) {
            fs::write(self.plan(), content).unwrap();
        }

        fn install_runs(&self) -> usize {
            fs::read_to_string(self.path("cnb/runs"))
                .map(|s| s.lines().count())
                .unwrap_or(0)
        }

        fn command(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("bundler-cnb");
            cmd.env_remove("BUNDLER_CNB_CONFIG")
                .env("CNB_BUILDPACK_DIR", self.path("cnb"))
                .env("CNB_STACK_ID", "test-stack")
                .current_dir(self.path("app"));
            cmd
        }

        fn detect(&self) -> Command {
            let mut cmd = self.command();
            cmd.arg("detect").arg(self.path("platform")).arg(self.plan());
            cmd
        }

        fn build(&self) -> Command {
            let mut cmd = self.command();
            cmd.arg("build")
                .arg(self.path("layers"))
                .arg(self.path("platform"))
                .arg(self.plan());
            cmd
        }
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn detect_requires_pinned_version() {
        let ws = Workspace::new();
        fs::write(ws.path("app/buildpack.yml"), "bundler:\n  version: 2.1.4\n").unwrap();

        ws.detect().assert().success();

        let plan = read(&ws.plan());
        assert!(plan.contains("[[provides]]"));
        assert!(plan.contains("[[requires]]"));
        assert!(plan.contains("version = \"2.1.4\""));
        assert!(plan.contains("version-source = \"buildpack.yml\""));
    }

    #[test]
    fn detect_without_buildpack_yml_only_provides() {
        let ws = Workspace::new();

        ws.detect().assert().success();

        let plan = read(&ws.plan());
        assert!(plan.contains("name = \"bundler\""));
        assert!(!plan.contains("requires"));
    }

    #[test]
    fn detect_fails_on_malformed_buildpack_yml() {
        let ws = Workspace::new();
        fs::write(ws.path("app/buildpack.yml"), "bundler: [unclosed\n").unwrap();

        ws.detect()
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Error:"))
            .stderr(predicate::str::contains("Failed to parse version"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn build_installs_and_writes_bill_of_materials() {
        let ws = Workspace::new();
        ws.write_plan(PINNED_PLAN);

        ws.build()
            .assert()
            .success()
            .stdout(predicate::str::contains("Bundler Buildpack 0.0.1"))
            .stdout(predicate::str::contains("Resolving Bundler version"))
            .stdout(predicate::str::contains(
                "Selected Bundler version (using buildpack.yml): 1.17.3",
            ))
            .stdout(predicate::str::contains("Executing build process"))
            .stdout(predicate::str::contains("Installing Bundler 1.17.3"));

        assert_eq!(ws.install_runs(), 1);
        assert_eq!(read(&ws.path("layers/bundler/installed")), "1.17.3");

        let manifest = read(&ws.path("layers/bundler.toml"));
        assert!(manifest.contains("launch = true"));
        assert!(manifest.contains("dependency-sha = \"sha-one\""));
        assert!(manifest.contains("built_at"));

        let bom = read(&ws.plan());
        assert!(bom.contains("[[entries]]"));
        assert!(bom.contains("version = \"1.17.3\""));
        assert!(bom.contains("https://example.com/bundler-1.17.3.tgz"));
    }

    #[test]
    fn second_build_reuses_layer() {
        let ws = Workspace::new();
        ws.write_plan(PINNED_PLAN);
        ws.build().assert().success();

        ws.write_plan(PINNED_PLAN);
        ws.build()
            .assert()
            .success()
            .stdout(predicate::str::contains("Reusing cached layer"))
            .stdout(predicate::str::contains("Executing build process").not());

        assert_eq!(ws.install_runs(), 1);
    }

    #[test]
    fn changed_version_reinstalls() {
        let ws = Workspace::new();
        ws.write_plan(PINNED_PLAN);
        ws.build().assert().success();

        ws.write_plan("[[entries]]\nname = \"bundler\"\nversion = \"2.x\"\n");
        ws.build()
            .assert()
            .success()
            .stdout(predicate::str::contains("Installing Bundler 2.1.4"));

        assert_eq!(ws.install_runs(), 2);
        assert_eq!(read(&ws.path("layers/bundler/installed")), "2.1.4");
        assert!(read(&ws.path("layers/bundler.toml")).contains("dependency-sha = \"sha-two\""));
    }

    #[test]
    fn build_fails_for_unknown_version() {
        let ws = Workspace::new();
        ws.write_plan("[[entries]]\nname = \"bundler\"\nversion = \"9.9.9\"\n");

        ws.build()
            .assert()
            .code(1)
            .stderr(predicate::str::contains("no compatible versions"))
            .stderr(predicate::str::contains("1.17.3, 2.1.4"))
            .stderr(predicate::str::contains("Hint:"));

        assert_eq!(ws.install_runs(), 0);
        assert!(!ws.path("layers/bundler.toml").exists());
    }

    #[test]
    fn failed_install_leaves_no_layer_metadata() {
        let ws = Workspace::new();
        ws.write_plan(PINNED_PLAN);
        ws.build().assert().success();

        let failing = ws.path("failing.toml");
        fs::write(
            &failing,
            "[installer]\ncommand = \"sh\"\nargs = [\"-c\", \"echo boom >&2; exit 3\", \"installer\"]\n",
        )
        .unwrap();

        ws.write_plan("[[entries]]\nname = \"bundler\"\nversion = \"2.1.4\"\n");
        ws.build()
            .arg("--config")
            .arg(&failing)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("exit code 3"))
            .stderr(predicate::str::contains("boom"));

        assert!(!ws.path("layers/bundler.toml").exists());
    }

    #[test]
    fn build_fails_on_empty_plan() {
        let ws = Workspace::new();
        ws.write_plan("");

        ws.build()
            .assert()
            .code(1)
            .stderr(predicate::str::contains("no entries"));
    }
}
