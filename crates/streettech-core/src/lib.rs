pub mod config;
pub mod logging;

pub mod clipboard;
pub mod control;
pub mod error;
pub mod history;
pub mod notify;
pub mod quality;
pub mod resolver;
pub mod session;
pub mod simulator;
pub mod url_model;
pub mod video;
