//! RFC 3339 date/time grammar checks and ISO 8601 durations.
//!
//! All parsing is done over ASCII bytes so that non-ASCII digits (e.g.
//! Bengali numerals) never pass.

pub(crate) fn is_valid_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(idx, byte)| matches!(idx, 4 | 7) || byte.is_ascii_digit())
    {
        return false;
    }
    let year = parse_u32(&bytes[..4]);
    let month = parse_u32(&bytes[5..7]);
    let day = parse_u32(&bytes[8..10]);
    if !(1..=12).contains(&month) || day == 0 {
        return false;
    }
    day <= days_in_month(year, month)
}

fn parse_u32(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0, |acc, byte| acc * 10 + u32::from(byte - b'0'))
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

#[inline]
const fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// `HH:MM:SS[.fraction](Z|±HH:MM)`. A leap second (`:60`) is accepted only
/// when the time converts to 23:59:60 UTC.
pub(crate) fn is_valid_time(value: &str) -> bool {
    let bytes = value.as_bytes();
    let len = bytes.len();
    // Shortest valid form is "HH:MM:SSZ".
    if len < 9 {
        return false;
    }
    if bytes[2] != b':' || bytes[5] != b':' {
        return false;
    }
    if !bytes[..8]
        .iter()
        .enumerate()
        .all(|(idx, byte)| matches!(idx, 2 | 5) || byte.is_ascii_digit())
    {
        return false;
    }
    let hh = parse_u32(&bytes[0..2]);
    let mm = parse_u32(&bytes[3..5]);
    let ss = parse_u32(&bytes[6..8]);
    if hh > 23 || mm > 59 || ss > 60 {
        return false;
    }

    let mut i = 8;
    if i < len && bytes[i] == b'.' {
        i += 1;
        let start = i;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == start {
            return false;
        }
    }
    if i == len {
        // Missing offset.
        return false;
    }
    match bytes[i] {
        b'Z' | b'z' => i == len - 1 && (ss != 60 || (hh == 23 && mm == 59)),
        b'+' | b'-' => {
            if len - i != 6 {
                return false;
            }
            let sign = bytes[i];
            i += 1;
            if !bytes[i].is_ascii_digit()
                || !bytes[i + 1].is_ascii_digit()
                || bytes[i + 2] != b':'
                || !bytes[i + 3].is_ascii_digit()
                || !bytes[i + 4].is_ascii_digit()
            {
                return false;
            }
            let offset_hh = parse_u32(&bytes[i..i + 2]);
            let offset_mm = parse_u32(&bytes[i + 3..i + 5]);
            if offset_hh > 23 || offset_mm > 59 {
                return false;
            }
            if ss == 60 {
                let mut utc_hh = hh as i32;
                let mut utc_mm = mm as i32;
                if sign == b'+' {
                    utc_hh -= offset_hh as i32;
                    utc_mm -= offset_mm as i32;
                } else {
                    utc_hh += offset_hh as i32;
                    utc_mm += offset_mm as i32;
                }
                utc_hh += utc_mm.div_euclid(60);
                utc_mm = utc_mm.rem_euclid(60);
                utc_hh = (utc_hh + 24) % 24;
                utc_hh == 23 && utc_mm == 59
            } else {
                true
            }
        }
        _ => false,
    }
}

/// RFC 3339 `date-time`: full date, `T` (or `t`), full time with offset.
pub(crate) fn is_valid_datetime(value: &str) -> bool {
    if value.len() < 11 || !value.is_char_boundary(10) {
        return false;
    }
    let (date, rest) = value.split_at(10);
    let Some(time) = rest
        .strip_prefix('T')
        .or_else(|| rest.strip_prefix('t'))
    else {
        return false;
    };
    is_valid_date(date) && is_valid_time(time)
}

/// ISO 8601 duration per the RFC 3339 appendix ABNF: `P` followed by either
/// a week count, or Y/M/D components optionally followed by `T` and H/M/S
/// components. A decimal fraction is allowed in the seconds component only.
pub(crate) fn is_valid_duration(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.first() != Some(&b'P') {
        return false;
    }
    let mut i = 1;
    let mut components = 0usize;

    let eat_digits = |i: &mut usize| -> bool {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i > start
    };

    // Date part: Y, M, D in order, or a standalone week count.
    let date_designators = [b'Y', b'M', b'D'];
    let mut next_allowed = 0usize;
    while i < bytes.len() && bytes[i] != b'T' {
        if !eat_digits(&mut i) {
            return false;
        }
        if i >= bytes.len() {
            return false;
        }
        let designator = bytes[i];
        i += 1;
        if designator == b'W' {
            // Weeks do not combine with any other component.
            return components == 0 && i == bytes.len();
        }
        let Some(position) = date_designators[next_allowed..]
            .iter()
            .position(|&d| d == designator)
        else {
            return false;
        };
        next_allowed += position + 1;
        components += 1;
    }

    if i < bytes.len() && bytes[i] == b'T' {
        i += 1;
        let time_designators = [b'H', b'M', b'S'];
        let mut next_allowed = 0usize;
        let mut time_components = 0usize;
        while i < bytes.len() {
            if !eat_digits(&mut i) {
                return false;
            }
            let mut fractional = false;
            if i < bytes.len() && bytes[i] == b'.' {
                i += 1;
                if !eat_digits(&mut i) {
                    return false;
                }
                fractional = true;
            }
            if i >= bytes.len() {
                return false;
            }
            let designator = bytes[i];
            i += 1;
            if fractional && designator != b'S' {
                return false;
            }
            let Some(position) = time_designators[next_allowed..]
                .iter()
                .position(|&d| d == designator)
            else {
                return false;
            };
            next_allowed += position + 1;
            time_components += 1;
        }
        // A trailing `T` with no components is malformed.
        if time_components == 0 {
            return false;
        }
        components += time_components;
    }

    i == bytes.len() && components > 0
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    #[test_case("1963-06-19", true)]
    #[test_case("2000-02-29", true; "leap year divisible by 400")]
    #[test_case("2020-02-29", true; "ordinary leap year")]
    #[test_case("1900-02-29", false; "century non-leap year")]
    #[test_case("2021-02-29", false; "non-leap year")]
    #[test_case("2020-13-01", false; "month thirteen")]
    #[test_case("2020-00-01", false; "month zero")]
    #[test_case("2020-01-32", false; "day thirty-two")]
    #[test_case("2020-01-00", false; "day zero")]
    #[test_case("2020-1-01", false; "missing month padding")]
    #[test_case("2020-01-1", false; "missing day padding")]
    #[test_case("2020-163", false; "ordinal date")]
    #[test_case("2020-W24", false; "week date")]
    #[test_case("2020/01/01", false; "wrong separator")]
    fn date(value: &str, expected: bool) {
        assert_eq!(super::is_valid_date(value), expected);
    }

    #[test_case("23:59:59Z", true)]
    #[test_case("00:00:00Z", true)]
    #[test_case("12:30:45.123456Z", true; "fractional seconds")]
    #[test_case("12:30:45+05:30", true; "positive offset")]
    #[test_case("12:30:45-08:00", true; "negative offset")]
    #[test_case("23:59:60Z", true; "utc leap second")]
    #[test_case("15:59:60-08:00", true; "leap second converting to utc midnight")]
    #[test_case("00:29:60+00:30", true; "leap second with positive offset")]
    #[test_case("23:59:60+01:00", false; "leap second at the wrong utc time")]
    #[test_case("12:00:60Z", false; "leap second at noon")]
    #[test_case("24:00:00Z", false; "hour twenty-four")]
    #[test_case("12:60:00Z", false; "minute sixty")]
    #[test_case("12:00:61Z", false; "second sixty-one")]
    #[test_case("12:00:00", false; "missing offset")]
    #[test_case("12:00:00.Z", false; "empty fraction")]
    #[test_case("12:00:00+24:00", false; "offset hour out of range")]
    #[test_case("12:00:00+05:60", false; "offset minute out of range")]
    #[test_case("1২:00:00Z", false; "non-ascii digit")]
    fn time(value: &str, expected: bool) {
        assert_eq!(super::is_valid_time(value), expected);
    }

    #[test_case("1963-06-19T08:30:06.283185Z", true)]
    #[test_case("1963-06-19t08:30:06z", true; "lowercase separators")]
    #[test_case("1990-12-31T15:59:60-08:00", true; "leap second with offset")]
    #[test_case("1990-02-31T15:59:59-08:00", false; "invalid day")]
    #[test_case("1963-06-19 08:30:06Z", false; "space separator")]
    #[test_case("1963-06-19", false; "date only")]
    #[test_case("08:30:06Z", false; "time only")]
    fn datetime(value: &str, expected: bool) {
        assert_eq!(super::is_valid_datetime(value), expected);
    }

    #[test_case("P4DT12H30M5S", true)]
    #[test_case("P4Y", true)]
    #[test_case("PT0S", true)]
    #[test_case("P0D", true)]
    #[test_case("P1M", true; "one month")]
    #[test_case("PT1M", true; "one minute")]
    #[test_case("P2W", true; "weeks")]
    #[test_case("PT0.5S", true; "fractional seconds")]
    #[test_case("P1Y2M3DT4H5M6.7S", true; "all components")]
    #[test_case("P", false; "bare designator")]
    #[test_case("PT", false; "non-terminal t")]
    #[test_case("P1D2H", false; "time component without t")]
    #[test_case("P2D1Y", false; "out of order")]
    #[test_case("PT5.5M", false; "fraction outside seconds")]
    #[test_case("P1W1D", false; "weeks combined with days")]
    #[test_case("P1", false; "missing designator")]
    #[test_case("4DT12H", false; "missing p")]
    fn duration(value: &str, expected: bool) {
        assert_eq!(super::is_valid_duration(value), expected);
    }
}
