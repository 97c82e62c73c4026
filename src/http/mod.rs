//! HTTP protocol layer module
//!
//! Response builders shared by the mission routes, decoupled from the
//! business logic that picks which one to send.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_404_response, build_405_response, build_500_response,
    build_json_response, build_text_response,
};
