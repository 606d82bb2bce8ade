pub mod chat;
pub mod logs;
pub mod name_capture;
