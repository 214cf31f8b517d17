pub mod config;
pub mod logging;

pub mod client;
pub mod digest;
pub mod error;
pub mod probe;
pub mod raw;
pub mod window;
