//! CLI command implementations.

mod config;
mod doctor;
mod generate;
mod init;
mod lint;
mod research;

pub use config::run_config;
pub use doctor::run_doctor;
pub use generate::run_generate;
pub use init::run_init;
pub use lint::run_lint;
pub use research::run_research;
