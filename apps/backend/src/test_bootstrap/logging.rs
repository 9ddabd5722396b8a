#![cfg(test)]

//! Logging for unit tests, installed from `lib.rs` via `ctor`.
//!
//! Set `TEST_LOG=debug` (or `RUST_LOG`) to see store selection and request
//! logs while a test runs.

pub fn init() {
    backend_test_support::logging::init();
}
