//! Infrastructure layer - store bootstrap and state construction.

pub mod mongo;
pub mod state;
