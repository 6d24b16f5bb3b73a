use anyhow::{Context, Result};
use log::{info, LevelFilter};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Once;
use std::time::{SystemTime, UNIX_EPOCH};

// Ensure the logger is only initialized once
static INIT: Once = Once::new();

/// Initialize the logger on stderr, or in a timestamped file under `log_dir`
pub fn init_logger(log_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let target = match log_dir {
        Some(dir) => Some(open_log_file(dir)?),
        None => None,
    };

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log_level);
        builder.format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        });

        match target {
            Some(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            None => {
                builder.target(env_logger::Target::Stderr);
            }
        }

        let _ = builder.try_init();
        info!("data_builder v{} logging at level {:?}", env!("CARGO_PKG_VERSION"), log_level);
    });

    Ok(())
}

fn open_log_file(dir: &Path) -> Result<File> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {:?}", dir))?;
    }

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let log_path = dir.join(format!("data_builder_{}.log", timestamp));
    File::create(&log_path).with_context(|| format!("Failed to create log file at {:?}", log_path))
}
