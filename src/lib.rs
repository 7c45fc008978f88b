pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{http::HttpWardrobeClient, navigation::MemoryNavigator};
pub use app::session::FormSession;
pub use config::Settings;
pub use core::controller::{SubmissionController, SubmissionOutcome, SubmissionState};
pub use domain::model::{Capsule, Wardrobe};
pub use utils::error::{CapsuleError, Result};
