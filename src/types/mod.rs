pub mod logs;
pub mod message;
