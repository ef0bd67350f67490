use chrono::Utc;

/// Creation-timestamp id (epoch milliseconds), bumped past `existing` so two
/// records created in the same millisecond still differ.
pub fn next_id(existing: impl IntoIterator<Item = i64>) -> i64 {
    let now = Utc::now().timestamp_millis();
    match existing.into_iter().max() {
        Some(max) if max >= now => max.saturating_add(1),
        _ => now,
    }
}
