//! Request handler module
//!
//! Responsible for request routing dispatch and the mission business logic.

pub mod form;
pub mod missions;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
