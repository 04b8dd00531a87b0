use std::{
    fmt::Write as _,
    fs::{self, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    thread,
};

use chrono::{format::DelayedFormat, DateTime, Local};
use concat_string::concat_string;
use crossbeam_channel::{unbounded, Sender};
use once_cell::sync::Lazy;

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("default"));

/// 每個等級各自一個檔案，寫檔交給背景線程處理，呼叫端不會被 IO 卡住
pub struct Logger {
    info_writer: Sender<LogMessage>,
    warn_writer: Sender<LogMessage>,
    error_writer: Sender<LogMessage>,
    debug_writer: Sender<LogMessage>,
}

impl Logger {
    fn new(log_name: &str) -> Self {
        Logger {
            info_writer: Self::create_writer(log_name, log::Level::Info),
            warn_writer: Self::create_writer(log_name, log::Level::Warn),
            error_writer: Self::create_writer(log_name, log::Level::Error),
            debug_writer: Self::create_writer(log_name, log::Level::Debug),
        }
    }

    fn info(&self, log: String) {
        self.send(log, &self.info_writer);
    }

    fn warn(&self, log: String) {
        self.send(log, &self.warn_writer);
    }

    fn error(&self, log: String) {
        self.send(log, &self.error_writer);
    }

    fn debug(&self, log: String) {
        self.send(log, &self.debug_writer);
    }

    fn send(&self, msg: String, writer: &Sender<LogMessage>) {
        if let Err(why) = writer.send(LogMessage::new(msg)) {
            error_console(why.to_string());
        }
    }

    fn create_writer(log_name: &str, level: log::Level) -> Sender<LogMessage> {
        let (tx, rx) = unbounded::<LogMessage>();
        let file_name = concat_string!(log_name, "_", level.as_str().to_lowercase());
        let log_path = match Self::get_log_path(&file_name) {
            Some(path) => path,
            None => {
                error_console(format!("Failed to create log directory for {}", file_name));
                return tx;
            }
        };

        // 寫入檔案的操作使用另一個線程處理
        thread::spawn(move || {
            let file = match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
            {
                Ok(file) => file,
                Err(why) => {
                    error_console(format!(
                        "Failed to open log file {:?} because {:?}",
                        log_path, why
                    ));
                    // 開檔失敗就改印在 console，避免訊息遺失
                    for received in &rx {
                        info_console(received.msg);
                    }
                    return;
                }
            };

            let mut writer = BufWriter::new(file);
            let mut line = String::with_capacity(2048);

            for received in &rx {
                if writeln!(
                    &mut line,
                    "{} {} {}",
                    received.created_at.format("%F %X%.6f"),
                    level,
                    received.msg
                )
                .is_err()
                {
                    continue;
                }

                if rx.is_empty() || line.len() >= 2048 {
                    if let Err(why) = writer.write_all(line.as_bytes()) {
                        error_console(format!(
                            "Failed to write to log file. because:{:#?}\r\nmsg:{}",
                            why, line
                        ));
                    }

                    if let Err(why) = writer.flush() {
                        error_console(format!("Failed to flush log file. because:{:#?}", why));
                    }

                    line.clear();
                }
            }
        });

        tx
    }

    fn get_log_path(name: &str) -> Option<PathBuf> {
        let path = Path::new("log");

        if !path.exists() {
            fs::create_dir_all(path).ok()?;
        }

        let mut log_path = PathBuf::from(path);
        log_path.push(format!("{}_{}.log", Local::now().format("%Y-%m-%d"), name));

        Some(log_path)
    }
}

/// 送進佇列的訊息，時間在呼叫端產生
pub struct LogMessage {
    pub msg: String,
    pub created_at: DateTime<Local>,
}

impl LogMessage {
    pub fn new(msg: String) -> Self {
        LogMessage {
            msg,
            created_at: Local::now(),
        }
    }
}

pub fn info_file_async(log: String) {
    LOGGER.info(log);
}

pub fn warn_file_async(log: String) {
    LOGGER.warn(log);
}

pub fn error_file_async(log: String) {
    LOGGER.error(log);
}

pub fn debug_file_async(log: String) {
    LOGGER.debug(log);
}

pub fn info_console(log: String) {
    println!(
        "{} Info {}",
        Local::now().format("%Y-%m-%d %H:%M:%S.%3f"),
        log
    );
}

pub fn error_console(log: String) {
    println!(
        "{} Error {}",
        DelayedFormat::to_string(&Local::now().format("%Y-%m-%d %H:%M:%S.%3f")),
        log
    );
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_get_log_path() {
        let path = Logger::get_log_path("unit").expect("log path");
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

        assert!(path.starts_with("log"));
        assert!(file_name.ends_with("_unit.log"));
        assert!(file_name.starts_with(&Local::now().format("%Y-%m-%d").to_string()));
    }

    #[tokio::test]
    async fn test_file_async() {
        info_file_async("info from test_file_async".to_string());
        warn_file_async("warn from test_file_async".to_string());
        error_file_async("error from test_file_async".to_string());
        debug_file_async("debug from test_file_async".to_string());
        tokio::time::sleep(Duration::from_millis(200)).await;

        let path = Logger::get_log_path("default_debug").expect("log path");
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_line_carries_send_time() {
        let created_at = Local::now() - chrono::Duration::minutes(5);
        let writer = Logger::create_writer("send_time", log::Level::Warn);
        writer
            .send(LogMessage {
                msg: "queued five minutes ago".to_string(),
                created_at,
            })
            .expect("send log message");
        tokio::time::sleep(Duration::from_millis(200)).await;

        let path = Logger::get_log_path("send_time_warn").expect("log path");
        let content = fs::read_to_string(path).expect("read log file");
        let expected = format!(
            "{} WARN queued five minutes ago",
            created_at.format("%F %X%.6f")
        );
        assert!(content.contains(&expected));
    }
}
