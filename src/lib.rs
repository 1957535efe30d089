// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod celebration;
pub mod config;
pub mod engine;
pub mod error;
pub mod formula;
pub mod logging;
pub mod results_log;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod util;
