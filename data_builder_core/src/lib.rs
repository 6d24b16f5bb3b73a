//! Shader and asset build steps for the data directory.
//!
//! The binary resolves the SDK location once and hands a [`PipelineConfig`]
//! to [`Pipeline`], which prepares the output directory, runs the shader
//! tool over each shader in order and copies the static assets.

pub mod assets;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod runner;
pub mod tasks;
pub mod tool;

#[cfg(all(test, unix))]
pub(crate) mod test_support;

pub use config::{ExitStatusPolicy, Layout, PipelineConfig, SdkConfig, ToolKind, SDK_ROOT_VAR};
pub use error::{BuildError, Result};
pub use pipeline::{BuildReport, Pipeline};
pub use runner::{SequentialRunner, TaskRunner};
pub use tasks::{AssetTask, ShaderTask, TaskManifest};
pub use tool::{create_tool, GlslCompiler, GlslValidator, ShaderTool, ToolOutput};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
