use crate::config::Config;
use anyhow::Context;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;

/// Builds and installs the process-wide logger.
///
/// Must run once, before anything logs; the filter comes from `RUST_LOG` and
/// defaults to `info`. When `Config::log_file` is set, output goes to that
/// file in append mode rather than stderr.
pub fn init(config: &Config) -> anyhow::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("could not open log file {}", path.display()))?;

        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.init();

    Ok(())
}
