//! Request handler module
//!
//! Responsible for request routing dispatch and business logic processing.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
