//! Backend test support utilities
//!
//! One-time logging setup and assertions on the API's error body, shared
//! by the backend's unit and integration tests.

pub mod error_body;
pub mod logging;

pub use error_body::{assert_error_body, ErrorBodyLike, IssueLike};
