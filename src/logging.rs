use anyhow::{Context, Result};
use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

const RETAINED_LOG_FILES: usize = 7;

pub struct Logger {
    file: Mutex<BufWriter<File>>,
}

impl Logger {
    pub fn new() -> Result<Self> {
        let log_dir = Self::log_directory()?;
        std::fs::create_dir_all(&log_dir)?;

        // One file per day
        let timestamp = Local::now().format("%Y-%m-%d");
        let log_file = log_dir.join(format!("client-{}.log", timestamp));

        let file = OpenOptions::new().create(true).append(true).open(log_file)?;

        Ok(Logger {
            file: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn log_directory() -> Result<PathBuf> {
        let mut log_dir = dirs::data_dir().context("no data directory found")?;
        log_dir.push("AlbumRanking");
        log_dir.push("logs");
        Ok(log_dir)
    }

    // Keep the newest files, drop the rest.
    pub fn prune_old_logs(&self) -> Result<()> {
        let log_dir = Self::log_directory()?;
        if !log_dir.exists() {
            return Ok(());
        }

        let mut log_files: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(&log_dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("log") {
                log_files.push(path);
            }
        }

        log_files.sort_by(|a, b| b.cmp(a));
        for old in log_files.iter().skip(RETAINED_LOG_FILES) {
            let _ = std::fs::remove_file(old);
        }

        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let line = format!(
                "[{}] {} {}: {}\n",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );

            if let Ok(mut file) = self.file.lock() {
                let _ = file.write_all(line.as_bytes());
                let _ = file.flush();
            }

            #[cfg(debug_assertions)]
            println!("{}", line.trim());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install the file logger, falling back to stderr when the platform has
/// no data directory to write into.
pub fn init() -> Result<()> {
    match Logger::new() {
        Ok(logger) => {
            logger.prune_old_logs()?;
            log::set_boxed_logger(Box::new(logger))?;
            log::set_max_level(LevelFilter::Info);
            log::info!("logging initialized");
            log::info!("log directory: {:?}", Logger::log_directory()?);
        }
        Err(err) => {
            env_logger::Builder::from_default_env()
                .filter_level(LevelFilter::Info)
                .try_init()?;
            log::warn!("file logging unavailable ({}); logging to stderr", err);
        }
    }

    Ok(())
}
