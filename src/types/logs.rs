use chrono::{DateTime, Local};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct Log {
    pub text: String,
    pub level: LogLevel,
    pub timestamp: DateTime<Local>,
}

impl Log {
    pub fn new(text: &str, level: LogLevel) -> Self {
        Self {
            text: text.to_string(),
            level,
            timestamp: Local::now(),
        }
    }
}
