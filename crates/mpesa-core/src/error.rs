//! # Error Types
//!
//! Errors raised while parsing foundational values.

use thiserror::Error;

/// An environment string that is neither `live` nor `sandbox`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid environment {0:?} (expected \"live\" or \"sandbox\")")]
pub struct EnvironmentError(pub String);
