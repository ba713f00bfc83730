pub mod error;
pub mod inventory;
pub mod types;

#[cfg(feature = "cost")]
pub mod scenario;

#[cfg(feature = "cost")]
pub mod cost;

#[cfg(feature = "land")]
pub mod land;

#[cfg(feature = "conclusion")]
pub mod conclusion;

pub use error::AppraisalError;
pub use types::*;

/// Standard result type for fallible appraisal operations
pub type AppraisalResult<T> = Result<T, AppraisalError>;
