use crossterm::{ExecutableCommand, cursor, terminal};
use owo_colors::OwoColorize;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;

pub struct Logger {
    start_time: Instant,
    quiet: bool,
    current_line: Arc<Mutex<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Debug,
}

impl Logger {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            start_time: Instant::now(),
            quiet,
            current_line: Arc::new(Mutex::new(String::new())),
        }
    }

    fn clear_current_line(&self) {
        if self.quiet {
            return;
        }

        let has_pending = self
            .current_line
            .lock()
            .map(|line| !line.is_empty())
            .unwrap_or(false);
        if !has_pending {
            return;
        }

        let mut stdout = io::stdout();
        let _ = stdout.execute(cursor::MoveToColumn(0));
        let _ = stdout.execute(terminal::Clear(terminal::ClearType::CurrentLine));
        let _ = stdout.flush();
    }

    fn update_line(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.clear_current_line();
        print!("{message}");
        let _ = io::stdout().flush();

        if let Ok(mut line) = self.current_line.lock() {
            *line = message.to_string();
        }
    }

    fn finish_line(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.clear_current_line();
        println!("{message}");

        if let Ok(mut line) = self.current_line.lock() {
            line.clear();
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if self.quiet && !matches!(level, LogLevel::Error) {
            return;
        }

        self.clear_current_line();

        let (prefix, colored_message) = match level {
            LogLevel::Info => (
                "linken".bright_cyan().bold().to_string(),
                message.white().to_string(),
            ),
            LogLevel::Warning => (
                "⚠".bright_yellow().bold().to_string(),
                message.bright_yellow().to_string(),
            ),
            LogLevel::Error => (
                "✗".bright_red().bold().to_string(),
                message.bright_red().to_string(),
            ),
            LogLevel::Debug => (
                "•".bright_black().bold().to_string(),
                message.bright_black().to_string(),
            ),
        };

        if matches!(level, LogLevel::Error) {
            eprintln!("{prefix} {colored_message}");
        } else {
            println!("{prefix} {colored_message}");
        }

        if let Ok(mut line) = self.current_line.lock() {
            line.clear();
        }
    }

    pub fn finish(&self, message: &str) {
        let elapsed = self.start_time.elapsed();
        let time_str = if elapsed.as_millis() < 1000 {
            format!("{}ms", elapsed.as_millis())
        } else {
            format!("{:.2}s", elapsed.as_secs_f64())
        };

        let final_message = format!(
            "{} {} {}",
            "✓".bright_green().bold(),
            message.bright_green(),
            format!("[{time_str}]").bright_black()
        );

        self.finish_line(&final_message);
    }

    pub fn status(&self, message: &str) {
        if self.quiet {
            return;
        }

        let status_msg = format!("{} {}", "◦".bright_cyan(), message.bright_white());
        self.update_line(&status_msg);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn init_logger(quiet: bool) {
    let _ = LOGGER.set(Logger::new(quiet));
}

fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(false))
}

pub fn status(message: &str) {
    get_logger().status(message);
}

pub fn info(message: &str) {
    get_logger().info(message);
}

pub fn error(message: &str) {
    get_logger().error(message);
}

pub fn log(level: LogLevel, message: &str) {
    get_logger().log(level, message);
}

pub fn finish(message: &str) {
    get_logger().finish(message);
}

type LogFn = dyn Fn(LogLevel, &str) + Send + Sync;

/// Where library code sends its messages.
///
/// `Console` forwards to the process-wide logger above, `Silent` drops
/// everything, and `Custom` hands each message to a caller-supplied callback.
#[derive(Clone, Default)]
pub enum LogSink {
    #[default]
    Console,
    Silent,
    Custom(Arc<LogFn>),
}

impl LogSink {
    pub fn custom<F>(callback: F) -> Self
    where
        F: Fn(LogLevel, &str) + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(callback))
    }

    pub fn emit(&self, level: LogLevel, message: &str) {
        match self {
            Self::Console => log(level, message),
            Self::Silent => {}
            Self::Custom(callback) => callback(level, message),
        }
    }

    /// Transient progress text; only the console shows it.
    pub fn status(&self, message: &str) {
        if matches!(self, Self::Console) {
            status(message);
        }
    }

    pub fn info(&self, message: &str) {
        self.emit(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.emit(LogLevel::Warning, message);
    }

    pub fn debug(&self, message: &str) {
        self.emit(LogLevel::Debug, message);
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => f.write_str("Console"),
            Self::Silent => f.write_str("Silent"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_sink_receives_messages() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            LogSink::custom(move |level, msg| {
                if let Ok(mut seen) = seen.lock() {
                    seen.push((level, msg.to_string()));
                }
            })
        };

        sink.info("one");
        sink.warn("two");
        sink.status("not forwarded");

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (LogLevel::Info, "one".to_string()),
                (LogLevel::Warning, "two".to_string()),
            ]
        );
    }

    #[test]
    fn test_silent_sink_is_default_debuggable() {
        assert_eq!(format!("{:?}", LogSink::Silent), "Silent");
        assert!(matches!(LogSink::default(), LogSink::Console));
    }
}
