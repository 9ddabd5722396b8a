#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use leaderboard_backend::adapters::MemoryScoreStore;
use leaderboard_backend::repos::ScoreStore;
use leaderboard_backend::routes;
use leaderboard_backend::test_support::SwitchableStore;
use leaderboard_backend::{AppConfig, AppState, RequestTrace, ScoreService, SecurityHeaders};
use leaderboard_client::LeaderboardClient;

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// A live API server on an ephemeral port.
pub struct TestServer {
    pub base_url: String,
    pub primary: Option<Arc<SwitchableStore>>,
    handle: actix_web::dev::ServerHandle,
}

impl TestServer {
    pub fn client(&self) -> LeaderboardClient {
        LeaderboardClient::new(self.base_url.clone())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let handle = self.handle.clone();
        actix_web::rt::spawn(async move { handle.stop(false).await });
    }
}

pub async fn start_memory_server() -> TestServer {
    start(AppState::for_tests(), None)
}

/// Server whose primary store is a switchable double, initially `up`.
pub async fn start_switchable_server(up: bool) -> TestServer {
    let primary = Arc::new(SwitchableStore::new(up));
    let service = ScoreService::new(
        Some(primary.clone() as Arc<dyn ScoreStore>),
        Arc::new(MemoryScoreStore::new()),
    );
    start(AppState::new(service, AppConfig::memory_only()), Some(primary))
}

fn start(state: AppState, primary: Option<Arc<SwitchableStore>>) -> TestServer {
    let data = web::Data::new(state);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(SecurityHeaders)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("bind ephemeral port");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    TestServer {
        base_url: format!("http://{addr}"),
        primary,
        handle,
    }
}
