#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use leaderboard_backend::adapters::MemoryScoreStore;
use leaderboard_backend::repos::ScoreStore;
use leaderboard_backend::test_support::SwitchableStore;
use leaderboard_backend::{AppConfig, AppState, ScoreService};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// State served entirely from a fresh in-memory store.
pub fn memory_state() -> AppState {
    AppState::for_tests()
}

/// State whose primary store is a switchable double, initially `up`.
pub fn switchable_state(up: bool) -> (AppState, Arc<SwitchableStore>) {
    with_primary(SwitchableStore::new(up))
}

/// State whose reachable primary rejects ids that are not hex, like the
/// document store does for non-ObjectIds.
pub fn hex_id_state() -> (AppState, Arc<SwitchableStore>) {
    with_primary(SwitchableStore::new(true).with_hex_ids())
}

fn with_primary(store: SwitchableStore) -> (AppState, Arc<SwitchableStore>) {
    let primary = Arc::new(store);
    let service = ScoreService::new(Some(primary.clone() as Arc<dyn ScoreStore>), Arc::new(MemoryScoreStore::new()));
    (AppState::new(service, AppConfig::memory_only()), primary)
}
