use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches, Command};
use data_builder_core::{
    ExitStatusPolicy, Layout, Pipeline, PipelineConfig, SdkConfig, TaskManifest, ToolKind,
};
use log::{debug, error, info};
use std::path::{Path, PathBuf};

mod logger;

fn cli() -> Command<'static> {
    Command::new("data_builder")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compiles shaders and copies assets from ../data into ../build")
        .arg(
            Arg::new("anchor")
                .long("anchor")
                .takes_value(true)
                .value_name("DIR")
                .help("Directory treated as the tool's own location. Default is the executable's directory."),
        )
        .arg(
            Arg::new("manifest")
                .long("manifest")
                .takes_value(true)
                .value_name("FILE")
                .help("JSON file listing shaders and assets to process"),
        )
        .arg(
            Arg::new("tool")
                .long("tool")
                .takes_value(true)
                .possible_values(["compiler", "validator"])
                .default_value("compiler")
                .help("Run glslc (compiler) or glslangValidator -V (validator) over the shaders"),
        )
        .arg(
            Arg::new("ignore-exit-status")
                .long("ignore-exit-status")
                .takes_value(false)
                .help("Keep going when the shader tool exits with an error"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .takes_value(false)
                .help("Sets the level of verbosity"),
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .takes_value(true)
                .value_name("DIR")
                .help("Directory to store log files. Default is stderr only."),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    // Resolved before anything touches the filesystem
    let sdk = match SdkConfig::from_env() {
        Ok(sdk) => sdk,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let log_dir = matches.value_of("log-dir").map(Path::new);
    let verbose = matches.is_present("verbose");
    if let Err(e) = logger::init_logger(log_dir, verbose) {
        eprintln!("Warning: Failed to initialize logger: {:#}", e);
    }

    let config = build_config(&matches, sdk)?;
    debug!("  SDK root: {:?}", config.sdk.root());
    debug!("  Tool: {:?} ({:?})", config.tool, config.tool_path());
    debug!("  Exit status policy: {:?}", config.exit_policy);

    let result = Pipeline::new(config).run();
    match result {
        Ok(report) => {
            info!("Done in {:.2?}", report.elapsed);
            Ok(())
        }
        Err(e) => {
            error!("Build failed: {}", e);
            Err(e).context("Shader/asset build failed")
        }
    }
}

fn build_config(matches: &ArgMatches, sdk: SdkConfig) -> Result<PipelineConfig> {
    let anchor = match matches.value_of("anchor") {
        Some(dir) => absolute(Path::new(dir))?,
        None => executable_dir()?,
    };

    // The shader tool runs from the source directory, so relative paths would resolve there
    let sdk = SdkConfig::new(absolute(sdk.root())?);
    let mut config = PipelineConfig::new(sdk, Layout::from_anchor(&anchor));

    let tool = matches.value_of("tool").unwrap_or("compiler");
    config.tool = ToolKind::from_name(tool).ok_or_else(|| anyhow!("Unknown tool: {}", tool))?;

    if matches.is_present("ignore-exit-status") {
        config.exit_policy = ExitStatusPolicy::Ignore;
    }

    if let Some(path) = matches.value_of("manifest") {
        config.manifest = TaskManifest::load(Path::new(path))?;
        info!(
            "Loaded {} shader(s) and {} asset(s) from {:?}",
            config.manifest.shaders.len(),
            config.manifest.assets.len(),
            path
        );
    }

    Ok(config)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Ok(cwd.join(path))
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("Executable path {:?} has no parent directory", exe))
}
