//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod artifact;
pub mod config;
pub mod error;
pub mod world;

pub use artifact::{ExportFormat, ProgramArtifact, derive_file_name, sanitize_file_name};
pub use config::{DeployConfig, validate_config_key, validate_config_value};
pub use error::{ApiError, ConfigError, ValidationError, WorkflowError};
pub use world::{EndpointId, WorldSession, validate_world_name};
