use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use log::debug;

use crate::config::ToolKind;
use crate::error::{BuildError, Result};
use crate::tasks::ShaderTask;

/// Captured result of one tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    pub fn stdout_text(&self) -> Option<String> {
        non_empty_text(&self.stdout)
    }

    pub fn stderr_text(&self) -> Option<String> {
        non_empty_text(&self.stderr)
    }
}

fn non_empty_text(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    if text.trim().is_empty() {
        None
    } else {
        Some(text.into_owned())
    }
}

/// An external program run once per shader
pub trait ShaderTool {
    /// Short name used in log output
    fn name(&self) -> &'static str;
    /// Executable that gets launched
    fn program(&self) -> &Path;
    /// Arguments for one task
    fn args(&self, task: &ShaderTask, output_dir: &Path) -> Vec<PathBuf>;
    /// Whether captured text is shown to the user
    fn prints_output(&self) -> bool;

    /// Runs the tool for `task` from `working_dir` and waits for it to exit.
    fn invoke(&self, task: &ShaderTask, working_dir: &Path, output_dir: &Path) -> Result<ToolOutput> {
        let args = self.args(task, output_dir);
        debug!("Running {:?} {:?} in {:?}", self.program(), args, working_dir);

        let output = Command::new(self.program())
            .args(&args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| BuildError::ToolLaunch {
                program: self.program().to_path_buf(),
                source,
            })?;

        Ok(ToolOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// `glslc <source> -o <output>`
pub struct GlslCompiler {
    program: PathBuf,
}

impl GlslCompiler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }
}

impl ShaderTool for GlslCompiler {
    fn name(&self) -> &'static str {
        "glslc"
    }

    fn program(&self) -> &Path {
        &self.program
    }

    fn args(&self, task: &ShaderTask, output_dir: &Path) -> Vec<PathBuf> {
        vec![
            PathBuf::from(&task.source),
            PathBuf::from("-o"),
            output_dir.join(&task.output),
        ]
    }

    fn prints_output(&self) -> bool {
        true
    }
}

/// `glslangValidator -V <source>`, which writes `<stage>.spv` next to the source
pub struct GlslValidator {
    program: PathBuf,
}

impl GlslValidator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }
}

impl ShaderTool for GlslValidator {
    fn name(&self) -> &'static str {
        "glslangValidator"
    }

    fn program(&self) -> &Path {
        &self.program
    }

    fn args(&self, task: &ShaderTask, _output_dir: &Path) -> Vec<PathBuf> {
        vec![PathBuf::from("-V"), PathBuf::from(&task.source)]
    }

    fn prints_output(&self) -> bool {
        false
    }
}

/// Builds the tool matching `kind`
pub fn create_tool(kind: ToolKind, program: PathBuf) -> Box<dyn ShaderTool> {
    match kind {
        ToolKind::Compiler => Box::new(GlslCompiler::new(program)),
        ToolKind::Validator => Box::new(GlslValidator::new(program)),
    }
}
