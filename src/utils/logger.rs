//! Logger utility for application-wide logging
//!
//! A small file-backed logger that plugs into the log crate: records go
//! to the log file and, for warnings and errors, to the console as well.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// File-backed logger implementation
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level this logger records
    max_level: Level,
}

impl Logger {
    /// Creates a new logger writing to the given file
    ///
    /// # Arguments
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            max_level: Level::Info,
        })
    }

    /// Logs a message line to the log file
    pub fn log(&self, message: &str) -> io::Result<()> {
        if let Some(file) = &mut *self.file.lock().unwrap() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Initialize the global logger used by the log crate macros
    ///
    /// # Arguments
    /// * `log_file` - Path to the log file
    /// * `verbose` - Record debug-level messages as well
    pub fn init_global_logger(log_file: &str, verbose: bool) -> io::Result<()> {
        let max_level = if verbose { Level::Debug } else { Level::Info };
        let global_logger = Logger {
            file: Mutex::new(Some(File::create(Path::new(log_file))?)),
            max_level,
        };

        // Ignore the SetLoggerError: this is only called once at startup
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }
        log::set_max_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.log(&message);

            if record.level() <= Level::Warn {
                eprintln!("{}", message);
            }
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}
