//! Names shared by detection, resolution and the layer metadata

/// Component this buildpack provides and the name of its layer
pub const BUNDLER: &str = "bundler";

/// Display name used in progress output
pub const BUNDLER_DISPLAY_NAME: &str = "Bundler";

/// Application file that may pin a Bundler version
pub const BUILDPACK_YML_SOURCE: &str = "buildpack.yml";

/// Dependency catalog shipped inside the buildpack directory
pub const BUILDPACK_TOML: &str = "buildpack.toml";

/// Plan entry metadata keys
pub const VERSION_SOURCE_KEY: &str = "version-source";
pub const BUILD_KEY: &str = "build";

/// Layer metadata keys
pub const DEPENDENCY_SHA_KEY: &str = "dependency-sha";
pub const BUILT_AT_KEY: &str = "built_at";

/// Shown in place of a missing version source
pub const UNKNOWN_SOURCE: &str = "<unknown>";

/// Shown in place of an empty version
pub const ANY_VERSION: &str = "*";

/// Days before the deprecation date at which warnings start
pub const DEPRECATION_WINDOW_DAYS: i64 = 30;
