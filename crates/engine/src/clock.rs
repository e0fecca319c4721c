use std::fmt::Debug;

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

/// Source of "now" for `createdAt`/`updatedAt` stamps.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock, UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Format a stamp the way records store it (RFC 3339).
///
/// Fails for offsets with a seconds component and for years outside
/// 0..=9999, which RFC 3339 cannot express.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.format(&Rfc3339)
}

pub(crate) fn timestamp(clock: &dyn Clock) -> Result<String, time::error::Format> {
    format_timestamp(clock.now())
}

/// A stamp strictly later than `previous`.
///
/// Commits are checked against the `updatedAt` a draft was opened at, so a
/// commit must never reuse that stamp even when the clock is coarse or
/// standing still. A `previous` that is not RFC 3339 cannot collide with a
/// formatted stamp and is ignored.
pub(crate) fn timestamp_after(
    clock: &dyn Clock,
    previous: &str,
) -> Result<String, time::error::Format> {
    let now = clock.now();
    match OffsetDateTime::parse(previous, &Rfc3339) {
        Ok(prev) if now <= prev => format_timestamp(prev + Duration::nanoseconds(1)),
        _ => format_timestamp(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    #[derive(Debug)]
    struct Frozen(OffsetDateTime);

    impl Clock for Frozen {
        fn now(&self) -> OffsetDateTime {
            self.0
        }
    }

    #[test]
    fn formats_rfc3339_utc() {
        assert_eq!(
            format_timestamp(datetime!(2025-03-04 05:06:07 UTC)).unwrap(),
            "2025-03-04T05:06:07Z"
        );
    }

    #[test]
    fn unrepresentable_offset_is_an_error() {
        let at = datetime!(2025-03-04 05:06:07 UTC).to_offset(offset!(+01:00:30));
        assert!(format_timestamp(at).is_err());
    }

    #[test]
    fn system_clock_output_parses_back() {
        let stamp = timestamp(&SystemClock).unwrap();
        assert!(OffsetDateTime::parse(&stamp, &Rfc3339).is_ok());
    }

    #[test]
    fn stamp_after_moves_past_a_frozen_clock() {
        let clock = Frozen(datetime!(2025-03-04 05:06:07 UTC));
        let base = timestamp(&clock).unwrap();
        let next = timestamp_after(&clock, &base).unwrap();
        assert_ne!(next, base);
        assert_eq!(next, "2025-03-04T05:06:07.000000001Z");
        let later = timestamp_after(&clock, &next).unwrap();
        assert_eq!(later, "2025-03-04T05:06:07.000000002Z");
    }

    #[test]
    fn stamp_after_uses_now_when_clock_is_ahead() {
        let clock = Frozen(datetime!(2025-03-04 05:06:07 UTC));
        assert_eq!(
            timestamp_after(&clock, "2025-03-04T05:00:00Z").unwrap(),
            "2025-03-04T05:06:07Z"
        );
        assert_eq!(timestamp_after(&clock, "t0").unwrap(), "2025-03-04T05:06:07Z");
    }
}
