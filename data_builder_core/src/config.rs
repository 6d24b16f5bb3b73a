use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};
use crate::tasks::TaskManifest;

/// Environment variable naming the SDK installation root
pub const SDK_ROOT_VAR: &str = "VULKAN_SDK";

/// Location of the external SDK
#[derive(Debug, Clone, PartialEq)]
pub struct SdkConfig {
    root: PathBuf,
}

impl SdkConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Reads the SDK root from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Resolves the SDK root through `lookup`, so callers can inject an environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Option<OsString>,
    {
        match lookup(SDK_ROOT_VAR) {
            Some(root) if !root.is_empty() => Ok(Self::new(root)),
            _ => Err(BuildError::MissingSdkRoot { var: SDK_ROOT_VAR }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of an executable shipped in the SDK's `bin` directory
    pub fn tool_path(&self, name: &str) -> PathBuf {
        self.root
            .join("bin")
            .join(format!("{}{}", name, std::env::consts::EXE_SUFFIX))
    }
}

/// Source and output directories of a build
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Layout {
    /// Derives `../data` and `../build` from the directory the tool lives in.
    pub fn from_anchor(anchor: &Path) -> Self {
        let parent = anchor.join("..");
        Self {
            source_dir: parent.join("data"),
            output_dir: parent.join("build"),
        }
    }
}

/// Which external tool runs over the shader list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    /// `glslc <source> -o <output>`
    #[default]
    Compiler,
    /// `glslangValidator -V <source>`
    Validator,
}

impl ToolKind {
    pub fn executable_name(self) -> &'static str {
        match self {
            ToolKind::Compiler => "glslc",
            ToolKind::Validator => "glslangValidator",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "compiler" => Some(ToolKind::Compiler),
            "validator" => Some(ToolKind::Validator),
            _ => None,
        }
    }
}

/// How a non-zero exit from the shader tool is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitStatusPolicy {
    /// Stop the build on the first failing invocation.
    #[default]
    Strict,
    /// Only surface the captured text and keep going.
    Ignore,
}

/// Everything the pipeline needs for one run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub sdk: SdkConfig,
    pub layout: Layout,
    pub tool: ToolKind,
    pub exit_policy: ExitStatusPolicy,
    pub manifest: TaskManifest,
}

impl PipelineConfig {
    pub fn new(sdk: SdkConfig, layout: Layout) -> Self {
        Self {
            sdk,
            layout,
            tool: ToolKind::default(),
            exit_policy: ExitStatusPolicy::default(),
            manifest: TaskManifest::default(),
        }
    }

    pub fn tool_path(&self) -> PathBuf {
        self.sdk.tool_path(self.tool.executable_name())
    }
}
