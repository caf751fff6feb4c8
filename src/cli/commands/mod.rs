mod check_config;

pub use check_config::{cmd_check_config, config_summary};
