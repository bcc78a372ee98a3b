/// Append-only file logger behind the `log` facade.
///
/// Lines are written as `[YYYY-MM-DD HH:MM:SS] <message>`; call sites that
/// carry structured parameters append ` - <json>` to the message themselves.
/// The file handle is opened once at startup and flushed on every exit path
/// via `log::logger().flush()`. No rotation, no locking beyond the in-process
/// mutex: single-process execution is assumed.
use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

pub const LOG_FILE: &str = "/var/log/cloudflareddns.log";

pub struct FileLogger {
    file: Mutex<File>,
}

impl FileLogger {
    pub fn open(path: &Path) -> std::io::Result<FileLogger> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(FileLogger {
            file: Mutex::new(file),
        })
    }
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = match record.level() {
            Level::Error => format!("[{}] ERROR: {}", stamp, record.args()),
            _ => format!("[{}] {}", stamp, record.args()),
        };

        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", line);
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install the file logger, falling back to stderr when the log file is not
/// writable (typical when run by hand without root).
pub fn init() {
    match FileLogger::open(Path::new(LOG_FILE)) {
        Ok(logger) => {
            if log::set_boxed_logger(Box::new(logger)).is_ok() {
                log::set_max_level(LevelFilter::Info);
            }
        }
        Err(_) => {
            env_logger::builder()
                .filter(None, LevelFilter::Info)
                .init();
        }
    }
}
