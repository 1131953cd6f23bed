//! Edit plans: batches of [`Edit`](crate::edit::Edit)s stored as TOML or JSON.

pub mod loader;
pub mod schema;

pub use loader::{load_from_path, load_from_str, load_json_from_str, ConfigError};
pub use schema::{EditPlan, Metadata, ValidationError, ValidationIssue};
