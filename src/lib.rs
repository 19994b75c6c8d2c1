//! Bundler buildpack
//!
//! Detects a Bundler version pinned by the application and installs the
//! matching Bundler into a cacheable layer, reusing the layer when the
//! resolved dependency has not changed.

pub mod build;
pub mod buildpack_yml;
pub mod cli;
pub mod clock;
pub mod config;
pub mod constants;
pub mod dependency;
pub mod detect;
pub mod error;
pub mod layer;
pub mod plan;
pub mod ui;

pub use error::{BuildpackError, BuildpackResult};
