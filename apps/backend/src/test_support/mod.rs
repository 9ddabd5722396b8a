//! Helpers for exercising the HTTP surface in tests.
//!
//! Public (not `cfg(test)`) so integration tests under `tests/` and the
//! client crate's end-to-end tests can use them.

pub mod app_builder;
pub mod switchable_store;

pub use app_builder::create_test_app_builder;
pub use switchable_store::SwitchableStore;
