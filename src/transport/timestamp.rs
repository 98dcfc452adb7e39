//! Decomposition of compact decimal timestamps.

use crate::error::{MapperError, Result};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Slice length used for embedded message timestamps.
pub const SECONDS_DIGITS: usize = 10;

const MAX_SLICE_DIGITS: usize = 10;
const MAX_TIMESTAMP_DIGITS: usize = 19;

fn decimal_digits(mut value: u64) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

/// Split a decimal timestamp into seconds and nanoseconds.
///
/// The first `sec_digits` decimal digits are the seconds. Only when
/// `sec_digits` is 10 and the value has more than 10 digits are the
/// remaining digits taken as nanoseconds; otherwise nanoseconds are zero.
pub fn split_timestamp(value: u64, sec_digits: usize) -> Result<(i64, i64)> {
    let digits = decimal_digits(value);

    if sec_digits > digits || sec_digits > MAX_SLICE_DIGITS {
        return Err(MapperError::SliceTooLong {
            slice: sec_digits,
            digits,
        });
    }
    if digits > MAX_TIMESTAMP_DIGITS {
        return Err(MapperError::TimestampTooLong { digits });
    }
    if sec_digits == 0 {
        return Err(MapperError::EmptySlice);
    }

    // digits <= 19, so the divisor fits in a u64 and both halves in an i64.
    let divisor = 10u64.pow((digits - sec_digits) as u32);
    let seconds = (value / divisor) as i64;
    let nanoseconds = if digits > MAX_SLICE_DIGITS && sec_digits == MAX_SLICE_DIGITS {
        (value % divisor) as i64
    } else {
        0
    };
    Ok((seconds, nanoseconds))
}

/// The instant `seconds` and `nanoseconds` after the Unix epoch.
///
/// Either component may be negative or out of range; the sum is what counts.
pub fn unix_time(seconds: i64, nanoseconds: i64) -> SystemTime {
    let total = seconds as i128 * 1_000_000_000 + nanoseconds as i128;
    let magnitude = Duration::new(
        (total.unsigned_abs() / 1_000_000_000) as u64,
        (total.unsigned_abs() % 1_000_000_000) as u32,
    );
    let instant = if total >= 0 {
        UNIX_EPOCH.checked_add(magnitude)
    } else {
        UNIX_EPOCH.checked_sub(magnitude)
    };
    instant.unwrap_or(UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_nanosecond_timestamp() {
        assert_eq!(
            split_timestamp(1625097600123456789, 10).unwrap(),
            (1625097600, 123456789)
        );
    }

    #[test]
    fn test_split_seconds_only() {
        assert_eq!(split_timestamp(1625097600, 10).unwrap(), (1625097600, 0));
    }

    #[test]
    fn test_split_keeps_leading_zero_remainder() {
        assert_eq!(split_timestamp(1625097600000000001, 10).unwrap(), (1625097600, 1));
    }

    #[test]
    fn test_short_slice_drops_remainder() {
        // Only a 10-digit slice yields nanoseconds.
        assert_eq!(split_timestamp(1625097600123, 4).unwrap(), (1625, 0));
    }

    #[test]
    fn test_slice_longer_than_value() {
        assert!(matches!(
            split_timestamp(42, 10),
            Err(MapperError::SliceTooLong { slice: 10, digits: 2 })
        ));
    }

    #[test]
    fn test_slice_longer_than_ten() {
        assert!(matches!(
            split_timestamp(1625097600123456789, 11),
            Err(MapperError::SliceTooLong { slice: 11, .. })
        ));
    }

    #[test]
    fn test_timestamp_too_long() {
        assert!(matches!(
            split_timestamp(u64::MAX, 10),
            Err(MapperError::TimestampTooLong { digits: 20 })
        ));
    }

    #[test]
    fn test_empty_slice() {
        assert!(matches!(split_timestamp(12, 0), Err(MapperError::EmptySlice)));
    }

    #[test]
    fn test_zero_has_one_digit() {
        assert_eq!(split_timestamp(0, 1).unwrap(), (0, 0));
    }

    #[test]
    fn test_unix_time() {
        assert_eq!(
            unix_time(1, 500),
            UNIX_EPOCH + Duration::from_secs(1) + Duration::from_nanos(500)
        );
        assert_eq!(unix_time(0, -1_000_000_000), UNIX_EPOCH - Duration::from_secs(1));
    }
}
