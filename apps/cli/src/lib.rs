pub mod cli;
pub mod config;
pub mod dashboard;
pub mod main_lib;
pub mod session;
pub mod watch;

pub use main_lib::{init_tracing, run};
