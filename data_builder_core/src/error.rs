use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors raised while building shaders and copying assets
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Please set the environment variable {var}")]
    MissingSdkRoot { var: &'static str },

    #[error("Output path {0:?} exists but is not a directory")]
    OutputNotDirectory(PathBuf),

    #[error("Failed to create output directory {path:?}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch {program:?}")]
    ToolLaunch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Shader tool failed on {shader} ({status})")]
    ToolFailed {
        shader: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to copy {from:?} to {to:?}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read task manifest {path:?}")]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid task manifest {path:?}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, BuildError>;
