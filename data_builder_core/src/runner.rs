use std::ops::ControlFlow;
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::tasks::ShaderTask;
use crate::tool::{ShaderTool, ToolOutput};

/// Schedules shader tasks on a tool.
///
/// `on_output` is called once per finished task, in declared order, and
/// decides whether the remaining tasks still run.
pub trait TaskRunner {
    fn run(
        &self,
        tool: &dyn ShaderTool,
        tasks: &[ShaderTask],
        working_dir: &Path,
        output_dir: &Path,
        on_output: &mut dyn FnMut(&ShaderTask, ToolOutput) -> Result<ControlFlow<()>>,
    ) -> Result<()>;
}

/// Runs one task at a time; task N+1 starts after task N's process exited
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialRunner;

impl TaskRunner for SequentialRunner {
    fn run(
        &self,
        tool: &dyn ShaderTool,
        tasks: &[ShaderTask],
        working_dir: &Path,
        output_dir: &Path,
        on_output: &mut dyn FnMut(&ShaderTask, ToolOutput) -> Result<ControlFlow<()>>,
    ) -> Result<()> {
        for (index, task) in tasks.iter().enumerate() {
            debug!("[{}/{}] {} {}", index + 1, tasks.len(), tool.name(), task.source);
            let output = tool.invoke(task, working_dir, output_dir)?;
            if on_output(task, output)?.is_break() {
                debug!("Stopping after {}", task.source);
                break;
            }
        }
        Ok(())
    }
}
