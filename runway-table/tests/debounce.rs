use std::time::Duration;

use runway_table::TableConfig;
use runway_table::debounce::Debouncer;

#[tokio::test(start_paused = true)]
async fn test_search_commits_after_quiet_period() {
    let config = TableConfig::default();
    let (mut search, mut commits) = Debouncer::new(config.search_debounce());

    for typed in ["f", "fa", "fal", "fall"] {
        search.push(typed.to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(commits.try_recv().is_err());

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(commits.recv().await.as_deref(), Some("fall"));
}

#[tokio::test(start_paused = true)]
async fn test_input_debounce_uses_longer_delay() {
    let config = TableConfig::default();
    let (mut input, mut commits) = Debouncer::new(config.input_debounce());

    input.push(42);
    tokio::time::sleep(Duration::from_millis(450)).await;
    assert!(commits.try_recv().is_err());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(commits.try_recv().ok(), Some(42));
}

#[tokio::test(start_paused = true)]
async fn test_separate_bursts_commit_separately() {
    let (mut debouncer, mut commits) = Debouncer::new(Duration::from_millis(300));

    debouncer.push("first");
    tokio::time::sleep(Duration::from_millis(400)).await;
    debouncer.push("second");
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(commits.recv().await, Some("first"));
    assert_eq!(commits.recv().await, Some("second"));
}
