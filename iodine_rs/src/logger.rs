//! Logging setup of the storage demo.

use std::error::Error;
use std::path::Path;

use chrono::Local;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;

/// Target of all messages emitted by the storage crate.
const STORAGE_TARGET: &str = "iodine_ecs";

/// Installs global logger of the demo.
///
/// Messages of the demo of `level` and above go both to stderr
/// and into `<directory>/<app>-<timestamp>.log`.
/// Everything the storage crate emits, down to `trace`, goes into the file only.
///
/// # Errors
/// An error is returned if the log file cannot be created
/// or logger has already been initialized.
///
pub fn init(
    app: &str,
    directory: impl AsRef<Path>,
    level: LevelFilter,
) -> Result<Handle, Box<dyn Error + Send + Sync + 'static>> {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    let path = directory.as_ref().join(format!("{}-{}.log", app, stamp));

    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l:>5})} {t}: {m}{n}")))
        .build();
    let file = FileAppender::builder()
        .append(false)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%H:%M:%S%.6f)} {l:<5} [{T}] {M}:{L} {m}{n}",
        )))
        .build(&path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console)))
        .appender(Appender::builder().build("file", Box::new(file)))
        .logger(
            Logger::builder()
                .appender("file")
                .additive(false)
                .build(STORAGE_TARGET, LevelFilter::Trace),
        )
        .build(Root::builder().appenders(["console", "file"]).build(level))?;
    let handle = log4rs::init_config(config)?;
    log::debug!("writing log into {}", path.display());
    Ok(handle)
}
