use feedstore::{DataFilter, StoreError};
use feedstore_client::RemoteBackend;
use feedstore_integration_tests::TestServer;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const FEED: &str = "beta-test-123456";

#[test]
fn test_data_lifecycle_over_rpc() -> Result<(), StoreError> {
    let server = TestServer::start()?;
    let store = server.store()?;

    let feed = store.ensure_feed(FEED)?;
    assert_eq!(feed.key, FEED);

    let point = store.append(FEED, "42.0")?;
    assert_eq!(store.get(FEED, point.id)?, point);

    let updated = store.update(FEED, point.id, "43.5")?;
    assert_eq!(updated.value, "43.5");
    assert_eq!(updated.created_at, point.created_at);

    for value in ["1.0", "2.0", "3.0", "4.0"] {
        store.create(FEED, value)?;
    }
    let all = store.list(FEED, None)?;
    assert_eq!(all.len(), 5);
    assert!(all.windows(2).all(|w| w[0].stream_key() > w[1].stream_key()));

    let last = store.last(FEED)?;
    assert_eq!(last.id, all[0].id);
    let prev = store.prev(FEED)?;
    assert_eq!(prev.id, all[1].id);
    let next = store.next(FEED)?;
    assert_eq!(next.id, last.id);

    store.delete(FEED, next.id)?;
    let remaining = store.list(FEED, None)?;
    assert_eq!(remaining.len(), 4);
    assert!(remaining.iter().all(|p| p.id != next.id));
    // The cursor pointed at the deleted point
    assert!(store.prev(FEED).unwrap_err().is_invalid_state());

    let since = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() + 1;
    std::thread::sleep(Duration::from_millis(1100));
    let fresh = store.append(FEED, "9.9")?;
    let filtered = store.list(FEED, Some(&DataFilter::since_unix(since)))?;
    assert_eq!(filtered, vec![fresh]);

    Ok(())
}

#[test]
fn test_sessions_share_data_but_not_cursors() -> Result<(), StoreError> {
    let server = TestServer::start()?;
    let alice = server.store()?;
    let bob = server.store()?;

    let values: Vec<String> = ["1", "2", "3"].iter().map(|v| v.to_string()).collect();
    alice.append_batch(FEED, &values)?;

    assert_eq!(bob.len(FEED)?, 3);

    alice.last(FEED)?;
    assert!(bob.prev(FEED).unwrap_err().is_invalid_state());
    assert_eq!(alice.prev(FEED)?.value, "2");
    assert_eq!(bob.cursor(FEED)?, None);

    Ok(())
}

#[test]
fn test_remote_delete_invalidates_stale_cursor() -> Result<(), StoreError> {
    let server = TestServer::start()?;
    let reader = server.store()?;
    let writer = server.store()?;

    writer.append(FEED, "a")?;
    let newest = writer.append(FEED, "b")?;

    assert_eq!(reader.last(FEED)?, newest);
    writer.delete(FEED, newest.id)?;

    // The anchor is gone: the step fails and the cursor is unset
    assert!(reader.prev(FEED).unwrap_err().is_invalid_state());
    assert_eq!(reader.cursor(FEED)?, None);
    assert_eq!(reader.last(FEED)?.value, "a");

    Ok(())
}

#[test]
fn test_error_kinds_over_rpc() -> Result<(), StoreError> {
    let server = TestServer::start()?;
    let store = server.store()?;

    assert!(store.get_feed("nope").unwrap_err().is_not_found());

    store.create_feed("dup", Some("Duplicate"))?;
    assert!(
        store
            .create_feed("dup", None)
            .unwrap_err()
            .is_already_exists()
    );

    assert!(store.get("dup", 1).unwrap_err().is_not_found());
    assert!(store.update("dup", 1, "x").unwrap_err().is_not_found());
    assert!(store.delete("dup", 1).unwrap_err().is_not_found());
    assert!(store.last("dup").unwrap_err().is_not_found());
    assert!(store.next("dup").unwrap_err().is_invalid_state());

    Ok(())
}

#[test]
fn test_unreachable_server_is_unavailable() -> Result<(), StoreError> {
    let mut server = TestServer::start()?;
    let config = server.client_config();
    let store = server.store()?;
    store.append(FEED, "1")?;

    server.stop();

    let err = store.append(FEED, "2").unwrap_err();
    assert!(err.is_unavailable(), "unexpected error: {}", err);

    let err = RemoteBackend::connect(&config).unwrap_err();
    assert!(err.is_unavailable(), "unexpected error: {}", err);

    Ok(())
}

#[test]
fn test_stats_reflect_remote_contents() -> Result<(), StoreError> {
    let server = TestServer::start()?;
    let store = server.store()?;

    store.append("a", "1")?;
    store.append("a", "2")?;
    store.append("b", "3")?;

    let stats = store.stats()?;
    assert_eq!(stats.feed_count, 2);
    assert_eq!(stats.point_count, 3);
    assert!(stats.operations_count >= 3);

    let json = serde_json::to_value(&stats).map_err(StoreError::from)?;
    assert_eq!(json["point_count"], 3);

    Ok(())
}
