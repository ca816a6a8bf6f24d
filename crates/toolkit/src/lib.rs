pub mod error;
pub mod snapshot;
pub mod validator;

pub use error::{Result, ToolkitError};
pub use snapshot::Snapshot;
pub use validator::{SnapshotValidator, ValidationReport};
