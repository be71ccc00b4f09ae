//! Common utilities module
//!
//! Shared error type and result alias for the whole inspection engine.

pub mod error;

pub use error::{InspectionError, Result};
