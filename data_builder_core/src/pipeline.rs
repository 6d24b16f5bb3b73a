use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use crate::assets::{copy_asset, prepare_output_dir};
use crate::config::{ExitStatusPolicy, PipelineConfig};
use crate::error::{BuildError, Result};
use crate::runner::{SequentialRunner, TaskRunner};
use crate::tasks::ShaderTask;
use crate::tool::{create_tool, ShaderTool, ToolOutput};

/// Summary of a finished run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BuildReport {
    pub shaders_processed: usize,
    pub assets_copied: usize,
    /// Non-zero exits let through by [`ExitStatusPolicy::Ignore`]
    pub tool_failures: usize,
    pub elapsed: Duration,
}

/// Prepares the output directory, runs the shader tool and copies assets
pub struct Pipeline {
    config: PipelineConfig,
    tool: Box<dyn ShaderTool>,
    runner: Box<dyn TaskRunner>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let tool = create_tool(config.tool, config.tool_path());
        Self::with_tool(config, tool)
    }

    pub fn with_tool(config: PipelineConfig, tool: Box<dyn ShaderTool>) -> Self {
        Self {
            config,
            tool,
            runner: Box::new(SequentialRunner),
        }
    }

    pub fn with_runner(mut self, runner: Box<dyn TaskRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self) -> Result<BuildReport> {
        let start = Instant::now();
        let mut report = BuildReport::default();
        let layout = &self.config.layout;

        info!("Source directory: {:?}", layout.source_dir);
        info!("Output directory: {:?}", layout.output_dir);
        prepare_output_dir(&layout.output_dir)?;

        self.build_shaders(&mut report)?;
        self.copy_assets(&mut report)?;

        report.elapsed = start.elapsed();
        info!(
            "Build finished in {:.2?}: {} shader(s), {} asset(s)",
            report.elapsed, report.shaders_processed, report.assets_copied
        );
        if report.tool_failures > 0 {
            warn!("{} shader tool invocation(s) exited with an error", report.tool_failures);
        }
        Ok(report)
    }

    fn build_shaders(&self, report: &mut BuildReport) -> Result<()> {
        let layout = &self.config.layout;
        info!(
            "Running {} over {} shader(s) using {:?}",
            self.tool.name(),
            self.config.manifest.shaders.len(),
            self.tool.program()
        );

        self.runner.run(
            self.tool.as_ref(),
            &self.config.manifest.shaders,
            &layout.source_dir,
            &layout.output_dir,
            &mut |task, output| {
                report.shaders_processed += 1;
                self.surface_output(task, &output);
                self.check_status(task, output, report)
            },
        )
    }

    fn surface_output(&self, task: &ShaderTask, output: &ToolOutput) {
        let stdout = output.stdout_text();
        let stderr = output.stderr_text();
        if self.tool.prints_output() {
            for text in [stdout, stderr].into_iter().flatten() {
                print!("{}", text);
                if !text.ends_with('\n') {
                    println!();
                }
            }
        } else if stdout.is_some() || stderr.is_some() {
            debug!("{} output for {}: {:?} {:?}", self.tool.name(), task.source, stdout, stderr);
        }
    }

    fn check_status(
        &self,
        task: &ShaderTask,
        output: ToolOutput,
        report: &mut BuildReport,
    ) -> Result<ControlFlow<()>> {
        if output.status.success() {
            debug!("{} done ({})", task.source, output.status);
            return Ok(ControlFlow::Continue(()));
        }

        match self.config.exit_policy {
            ExitStatusPolicy::Strict => {
                error!("{} failed on {} ({})", self.tool.name(), task.source, output.status);
                Err(BuildError::ToolFailed {
                    shader: task.source.clone(),
                    status: output.status,
                    stderr: output.stderr_text().unwrap_or_default(),
                })
            }
            ExitStatusPolicy::Ignore => {
                warn!("{} exited with {} on {}, continuing", self.tool.name(), output.status, task.source);
                report.tool_failures += 1;
                Ok(ControlFlow::Continue(()))
            }
        }
    }

    fn copy_assets(&self, report: &mut BuildReport) -> Result<()> {
        let layout = &self.config.layout;
        info!("Copying {} asset(s)", self.config.manifest.assets.len());

        for asset in &self.config.manifest.assets {
            let from = layout.source_dir.join(&asset.source);
            let to = layout.output_dir.join(&asset.destination);
            copy_asset(&from, &to)?;
            report.assets_copied += 1;
        }
        Ok(())
    }
}
