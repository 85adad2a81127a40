pub mod check;
pub mod dump;
pub mod run_common;
pub mod script_loader;
