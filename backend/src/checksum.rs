//! Dataset fingerprint for matching reports to the export they came from.

use sha2::{Digest, Sha256};

use crate::models::ChannelSeries;

/// Calculate the SHA-256 fingerprint of a channel series.
///
/// Hashes one `id|published_at|views` line per video in series order, so
/// the same export always yields the same value regardless of input order.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_fingerprint(series: &ChannelSeries) -> String {
    let mut hasher = Sha256::new();
    for record in series {
        hasher.update(record.id.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(record.published_at.to_rfc3339().as_bytes());
        hasher.update(b"|");
        hasher.update(record.view_count.to_string().as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoRecord;
    use chrono::{TimeZone, Utc};

    fn video(id: &str, day: u32, views: u64) -> VideoRecord {
        VideoRecord::new(id, Utc.with_ymd_and_hms(2021, 1, day, 0, 0, 0).unwrap(), views)
    }

    #[test]
    fn test_fingerprint_ignores_input_order() {
        let a = ChannelSeries::new("a", vec![video("x", 1, 10), video("y", 2, 20)]).unwrap();
        let b = ChannelSeries::new("b", vec![video("y", 2, 20), video("x", 1, 10)]).unwrap();
        assert_eq!(calculate_fingerprint(&a), calculate_fingerprint(&b));
        assert_eq!(calculate_fingerprint(&a).len(), 64);
    }

    #[test]
    fn test_fingerprint_changes_with_views() {
        let a = ChannelSeries::new("a", vec![video("x", 1, 10)]).unwrap();
        let b = ChannelSeries::new("a", vec![video("x", 1, 11)]).unwrap();
        assert_ne!(calculate_fingerprint(&a), calculate_fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_ignores_engagement_and_title() {
        let a = ChannelSeries::new("a", vec![video("x", 1, 10)]).unwrap();
        let b = ChannelSeries::new(
            "a",
            vec![video("x", 1, 10).with_engagement(5, 5).with_title("renamed")],
        )
        .unwrap();
        assert_eq!(calculate_fingerprint(&a), calculate_fingerprint(&b));
    }
}
