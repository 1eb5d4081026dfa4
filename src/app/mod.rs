pub mod game;

pub use game::{log_config_report, ConfigReport, GamePlugin};
