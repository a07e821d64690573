pub mod binder;
pub mod commands;
pub mod format;
pub mod http;
pub mod labels;
pub mod platform;
pub mod release;
pub mod source;
pub mod view;
