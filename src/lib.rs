pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod profile;
pub mod prompt;
pub mod repl;
pub mod server;
pub mod session;
pub mod transcript;
pub mod transport;
pub mod visual;

pub use crate::config::Config;
pub use crate::error::{NutritionAdvisorError, Result};
pub use crate::profile::UserProfile;
pub use crate::session::{ChatSession, SessionState, Submission};
