//! Core types shared by every door-lock crate.
//!
//! This crate holds the pieces that have no dependency on hardware or on the
//! wire format: the provisioned [`Credential`], the millisecond
//! [`MonotonicClock`] with its [`Timestamp`] readings, the credential
//! [`validate`] function and the workspace-wide [`Error`] type.

pub mod clock;
pub mod constants;
pub mod error;
pub mod types;
pub mod validator;

pub use clock::{MonotonicClock, Timestamp};
pub use error::{Error, Result};
pub use types::*;
pub use validator::validate;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
