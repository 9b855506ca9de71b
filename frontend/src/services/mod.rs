pub mod config;
pub mod currency;
pub mod dom;
pub mod download;
pub mod logging;
pub mod timers;
