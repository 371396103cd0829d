//! # mpesa-core -- Foundational Types for the M-Pesa Client
//!
//! Every other crate in the workspace depends on `mpesa-core`; it depends on
//! nothing internal.
//!
//! - [`Environment`] selects between the production and sandbox deployments
//!   of the Daraja API. It is always supplied by the caller and never
//!   inferred.
//! - [`is_blank`] is the single definition of "missing" used when a request
//!   is validated before any network I/O.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mpesa-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod blank;
pub mod environment;
pub mod error;

pub use blank::is_blank;
pub use environment::Environment;
pub use error::EnvironmentError;
