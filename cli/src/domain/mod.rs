//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod check;
pub mod config;
pub mod error;
pub mod platform;

pub use check::{
    Attribute, CheckOutcome, CheckResult, FileFacts, FileProbe, ServiceFacts, ServiceProbe,
    Summary, VerificationReport, evaluate_file, evaluate_service, skip_file,
};
pub use config::{VerifyConfig, validate_config_key};
pub use error::{ChecksFailed, ConfigError, PlatformError};
pub use platform::{AttributePolicy, Platform};
