//! Store adapters implementing the repository traits.

pub mod scores_memory;
pub mod scores_mongo;

pub use scores_memory::MemoryScoreStore;
pub use scores_mongo::MongoScoreStore;
