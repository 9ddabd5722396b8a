mod common;

use std::time::Duration;

use leaderboard_client::{
    parse_submission, DbMode, DeleteOutcome, HealthPoller, LeaderboardSession, RetryPolicy,
    SaveOutcome,
};

fn session_for(server: &common::TestServer) -> LeaderboardSession {
    LeaderboardSession::new(server.client()).with_retry(RetryPolicy::none())
}

#[actix_web::test]
async fn first_and_leading_submissions_celebrate() {
    let server = common::start_memory_server().await;
    let mut session = session_for(&server);
    session.load().await;

    let first = session
        .submit(parse_submission("Ann", "10").unwrap())
        .await
        .unwrap();
    assert!(first.new_top);
    assert_eq!(session.take_celebration().unwrap().name, "Ann");
    assert_eq!(session.take_celebration(), None);

    let lower = session
        .submit(parse_submission("Bo", "5").unwrap())
        .await
        .unwrap();
    assert!(!lower.new_top);

    let tie = session
        .submit(parse_submission("Cy", "10").unwrap())
        .await
        .unwrap();
    assert!(!tie.new_top);

    let lead = session
        .submit(parse_submission("Dee", "11").unwrap())
        .await
        .unwrap();
    assert!(lead.new_top);
    assert_eq!(session.top_snapshot().unwrap().name, "Dee");
    assert_eq!(session.notice(), Some("Score submitted"));
}

#[actix_web::test]
async fn filter_an_shows_matching_rows_reranked() {
    let server = common::start_memory_server().await;
    let mut session = session_for(&server);

    for (name, score) in [("Ann", 10), ("Bo", 30), ("Dana", 20)] {
        session
            .submit(parse_submission(name, &score.to_string()).unwrap())
            .await
            .unwrap();
    }

    session.set_filter("an");
    let view: Vec<(usize, String)> = session
        .displayed()
        .iter()
        .map(|r| (r.rank, r.record.name.clone()))
        .collect();
    assert_eq!(view, [(1, "Dana".to_string()), (2, "Ann".to_string())]);

    let csv = session.export_csv().unwrap();
    assert_eq!(csv, "rank,name,score\n1,Dana,20\n2,Ann,10");
}

#[actix_web::test]
async fn edit_and_delete_go_through_confirmation() {
    let server = common::start_memory_server().await;
    let mut session = session_for(&server);
    session
        .submit(parse_submission("Ann", "10").unwrap())
        .await
        .unwrap();
    let id = session.scores()[0].id.clone();

    assert!(session.start_edit(&id));
    session.editing_mut().unwrap().name = "Annie".to_string();

    let declined = session.save_edit(&mut |_: &str| false).await.unwrap();
    assert_eq!(declined, SaveOutcome::Declined);
    assert_eq!(session.scores()[0].name, "Ann");

    let saved = session.save_edit(&mut |_: &str| true).await.unwrap();
    assert!(matches!(saved, SaveOutcome::Saved(ref r) if r.name == "Annie"));
    assert_eq!(session.scores()[0].name, "Annie");
    assert!(session.editing().is_none());

    let deleted = session.delete(&id, &mut |_: &str| true).await.unwrap();
    assert_eq!(deleted, DeleteOutcome::Deleted);
    assert!(session.scores().is_empty());
    assert_eq!(session.notice(), Some("Deleted"));
}

#[actix_web::test]
async fn oversized_edit_score_is_rejected_by_the_server() {
    let server = common::start_memory_server().await;
    let mut session = session_for(&server);
    session
        .submit(parse_submission("Ann", "10").unwrap())
        .await
        .unwrap();
    let id = session.scores()[0].id.clone();

    assert!(session.start_edit(&id));
    session.editing_mut().unwrap().score = "99999999999".to_string();

    let err = session.save_edit(&mut |_: &str| true).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.server_message(), Some("Invalid payload"));
    assert_eq!(session.error(), Some("Failed to update: 400"));
    assert_eq!(session.scores()[0].score, 10);
    assert!(session.editing().is_some());
}

#[actix_web::test]
async fn health_poller_publishes_mode_changes() {
    let server = common::start_switchable_server(false).await;
    let poller = HealthPoller::spawn(server.client(), Duration::from_millis(50));
    let mut rx = poller.subscribe();

    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|m| *m == Some(DbMode::Memory)))
        .await
        .expect("first probe in time")
        .unwrap();

    server.primary.as_ref().unwrap().set_up(true);

    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|m| *m == Some(DbMode::Mongo)))
        .await
        .expect("switch observed in time")
        .unwrap();
    assert_eq!(poller.latest(), Some(DbMode::Mongo));
}
