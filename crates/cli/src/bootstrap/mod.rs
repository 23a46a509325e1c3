mod config;
mod database;
mod logging;
mod shutdown;

pub use config::load_config;
pub use database::init_database;
pub use logging::init_logging;
pub use shutdown::create_shutdown_token;
