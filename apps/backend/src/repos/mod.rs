pub mod scores;

pub use scores::{DbMode, ScoreStore};
