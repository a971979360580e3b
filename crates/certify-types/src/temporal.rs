use chrono::{DateTime, Timelike, Utc};

use crate::error::TypeError;

/// Truncate a timestamp to whole seconds.
///
/// The ledger carries epoch seconds, so everything the engine stores or
/// hashes is truncated first. This keeps the persisted value and the
/// anchored value identical.
pub fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

/// Epoch seconds for a timestamp. Pre-epoch instants clamp to 0.
pub fn to_epoch_secs(dt: &DateTime<Utc>) -> u64 {
    dt.timestamp().max(0) as u64
}

/// Epoch seconds for an optional expiry, with 0 as the "no expiry" sentinel.
///
/// The sentinel is part of the canonical content encoding: a certificate
/// without an expiry date always hashes and anchors with expiry epoch 0.
pub fn expiry_epoch(expiry: Option<&DateTime<Utc>>) -> u64 {
    expiry.map(to_epoch_secs).unwrap_or(0)
}

/// Reconstruct a timestamp from epoch seconds.
pub fn from_epoch_secs(secs: u64) -> Result<DateTime<Utc>, TypeError> {
    DateTime::from_timestamp(secs as i64, 0)
        .ok_or_else(|| TypeError::InvalidTimestamp(format!("epoch out of range: {secs}")))
}

/// Reconstruct an optional expiry from its sentinel encoding.
pub fn expiry_from_epoch(secs: u64) -> Result<Option<DateTime<Utc>>, TypeError> {
    if secs == 0 {
        Ok(None)
    } else {
        from_epoch_secs(secs).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn truncation_drops_subseconds() {
        let dt = Utc
            .with_ymd_and_hms(2026, 3, 1, 12, 30, 45)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap();
        assert_eq!(truncate_to_seconds(dt).nanosecond(), 0);
    }

    #[test]
    fn epoch_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let secs = to_epoch_secs(&dt);
        assert_eq!(from_epoch_secs(secs).unwrap(), dt);
    }

    #[test]
    fn missing_expiry_is_zero_sentinel() {
        assert_eq!(expiry_epoch(None), 0);
        assert_eq!(expiry_from_epoch(0).unwrap(), None);
    }

    #[test]
    fn present_expiry_roundtrips() {
        let dt = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let secs = expiry_epoch(Some(&dt));
        assert_eq!(expiry_from_epoch(secs).unwrap(), Some(dt));
    }

    #[test]
    fn pre_epoch_clamps_to_zero() {
        let dt = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(to_epoch_secs(&dt), 0);
    }
}
