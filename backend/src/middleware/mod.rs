//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and authentication.

pub mod bearer;
pub mod trace;

pub use bearer::BearerAuth;
pub use trace::Trace;
