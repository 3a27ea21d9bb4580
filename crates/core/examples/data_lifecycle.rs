//! Walks a feed through its whole data lifecycle: create, check, update,
//! list, stream navigation, delete and a time-filtered listing.
//!
//! Run with: RUST_LOG=debug cargo run --example data_lifecycle

use feedstore::{DataFilter, DataPoint, FeedStore};
use std::thread::sleep;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const FEED: &str = "beta-test-123456";

fn render(label: &str, point: &DataPoint) -> Result<(), Box<dyn std::error::Error>> {
    println!("--- {}", label);
    println!("{}", serde_json::to_string_pretty(point)?);
    Ok(())
}

fn title(label: &str) {
    println!("\n\n{}\n", label);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see detailed logs)
    env_logger::init();

    let store = FeedStore::memory()?;

    let feed = store.ensure_feed(FEED)?;
    println!("using feed '{}'", feed.display_name());

    title("Create and Check");

    let point = store.append(FEED, "42.0")?;
    render("new point", &point)?;

    let found = store.get(FEED, point.id)?;
    render("found point", &found)?;

    let updated = store.update(FEED, point.id, "43.5")?;
    render("updated point", &updated)?;

    // Fill out the stream
    for value in ["1.0", "2.0", "3.0", "4.0"] {
        store.create(FEED, value)?;
    }

    title("All Data");
    for p in store.list(FEED, None)? {
        render(&format!("ID <{}>", p.id), &p)?;
    }

    title("Queue related commands");

    render("last point", &store.last(FEED)?)?;
    render("prev point", &store.prev(FEED)?)?;
    let next = store.next(FEED)?;
    render("next point", &next)?;

    title("Delete");
    match store.delete(FEED, next.id) {
        Ok(()) => println!("ok"),
        Err(e) => println!("failed to delete! {}", e),
    }

    title("All Data (updated)");
    for p in store.list(FEED, None)? {
        render(&format!("ID <{}>", p.id), &p)?;
    }

    // Generate a single point a moment later and filter for it
    sleep(Duration::from_secs(1));
    let since = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    sleep(Duration::from_secs(1));
    store.append(FEED, "9.9")?;

    title(&format!("Filtered Data, since {}", since));
    for p in store.list(FEED, Some(&DataFilter::since_unix(since)))? {
        render(&format!("ID <{}>", p.id), &p)?;
    }

    let stats = store.stats()?;
    println!(
        "\n{} feed(s), {} point(s), {} operations",
        stats.feed_count, stats.point_count, stats.operations_count
    );

    Ok(())
}
