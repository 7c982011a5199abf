pub mod config;
pub mod domain;
pub mod error;
pub mod types;

pub use config::{BlacklistGuard, Config};
pub use domain::{normalize_domain, Domain};
pub use error::ModwatchError;
pub use types::*;
