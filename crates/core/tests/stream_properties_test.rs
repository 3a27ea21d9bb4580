use feedstore::{AppendOptions, DataFilter, DataPoint, FeedStore};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const FEED: &str = "beta-test-123456";

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

fn ids(points: &[DataPoint]) -> Vec<u64> {
    points.iter().map(|p| p.id).collect()
}

/// Store with points at assorted timestamps, including ties and a back-dated append.
fn populated() -> FeedStore {
    let store = FeedStore::memory().expect("Failed to create store");
    for (value, secs) in [
        ("10.0", 100),
        ("11.0", 105),
        ("12.0", 105),
        ("13.0", 90),
        ("14.0", 120),
        ("15.0", 120),
        ("16.0", 130),
    ] {
        store
            .append_with(FEED, value, AppendOptions::with_timestamp(at(secs)))
            .expect("append failed");
    }
    store
}

#[test]
fn test_append_then_get_returns_same_point() {
    let store = FeedStore::memory().unwrap();
    for value in ["42.0", "0", "-1.5e3", "on", ""] {
        let appended = store.append(FEED, value).unwrap();
        let fetched = store.get(FEED, appended.id).unwrap();
        assert_eq!(fetched.id, appended.id);
        assert_eq!(fetched.value, value);
    }
}

#[test]
fn test_update_then_get() {
    let store = populated();
    for p in store.list(FEED, None).unwrap() {
        let new_value = format!("{}-updated", p.value);
        store.update(FEED, p.id, &new_value).unwrap();
        let reloaded = store.get(FEED, p.id).unwrap();
        assert_eq!(reloaded.value, new_value);
        assert_eq!(reloaded.created_at, p.created_at);
        assert_eq!(reloaded.id, p.id);
    }
}

#[test]
fn test_delete_removes_from_get_and_list() {
    let store = populated();
    for p in store.list(FEED, None).unwrap() {
        store.delete(FEED, p.id).unwrap();
        assert!(store.get(FEED, p.id).unwrap_err().is_not_found());
        assert!(!ids(&store.list(FEED, None).unwrap()).contains(&p.id));
    }
    assert!(store.is_empty(FEED).unwrap());
}

#[test]
fn test_list_order_is_newest_first_with_id_tiebreak() {
    let store = populated();
    let points = store.list(FEED, None).unwrap();
    assert_eq!(points.len(), 7);
    for pair in points.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
        if pair[0].created_at == pair[1].created_at {
            assert!(pair[0].id > pair[1].id);
        }
    }
    assert_eq!(ids(&points), vec![7, 6, 5, 3, 2, 1, 4]);
}

#[test]
fn test_filtered_list_is_subset_and_idempotent() {
    let store = populated();
    let all = store.list(FEED, None).unwrap();

    for secs in [0, 90, 100, 105, 106, 120, 130, 131] {
        let filter = DataFilter::since(at(secs));
        let filtered = store.list(FEED, Some(&filter)).unwrap();
        let expected: Vec<_> = all
            .iter()
            .filter(|p| p.created_at >= at(secs))
            .cloned()
            .collect();
        assert_eq!(filtered, expected, "start_time = {}", secs);
        assert_eq!(store.list(FEED, Some(&filter)).unwrap(), filtered);
    }
}

#[test]
fn test_since_unix_filter() {
    let store = populated();
    let filtered = store
        .list(FEED, Some(&DataFilter::since_unix(120)))
        .unwrap();
    assert_eq!(ids(&filtered), vec![7, 6, 5]);
}

#[test]
fn test_cursor_roundtrip_from_last() {
    let store = populated();
    let newest = store.last(FEED).unwrap();
    assert!(store.next(FEED).unwrap_err().is_not_found());
    store.prev(FEED).unwrap();
    assert_eq!(store.next(FEED).unwrap(), newest);
}

#[test]
fn test_empty_then_single_point() {
    let store = FeedStore::memory().unwrap();
    store.ensure_feed(FEED).unwrap();
    assert!(store.last(FEED).unwrap_err().is_not_found());

    let p = store.append(FEED, "1").unwrap();
    assert_eq!(store.last(FEED).unwrap(), p);
    assert!(store.prev(FEED).unwrap_err().is_not_found());
}

#[test]
fn test_walk_visits_all_in_reverse_creation_order() {
    let store = FeedStore::memory().unwrap();
    let created: Vec<_> = (0..5)
        .map(|i| {
            store
                .append_with(FEED, &i.to_string(), AppendOptions::with_timestamp(at(i)))
                .unwrap()
                .id
        })
        .collect();

    let mut visited = vec![store.last(FEED).unwrap().id];
    for _ in 0..4 {
        visited.push(store.prev(FEED).unwrap().id);
    }
    let mut expected = created.clone();
    expected.reverse();
    assert_eq!(visited, expected);
    assert!(store.prev(FEED).unwrap_err().is_not_found());
}

#[test]
fn test_full_walk_matches_list() {
    let store = populated();
    let listed = ids(&store.list(FEED, None).unwrap());

    let mut walked = vec![store.last(FEED).unwrap().id];
    while let Ok(p) = store.prev(FEED) {
        walked.push(p.id);
    }
    assert_eq!(walked, listed);

    let mut forward = vec![store.first(FEED).unwrap().id];
    while let Ok(p) = store.next(FEED) {
        forward.push(p.id);
    }
    forward.reverse();
    assert_eq!(forward, listed);
}
