// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Write};

use jiff::civil::DateTime;
use jiff::tz::Offset;

use crate::error::{ErrorKind, Expected};

pub(crate) const LAYOUT: &str = "YYYY-MM-DDThh:mm:ss±hh:mm";

// '0' is any ASCII digit, '+' is either sign, anything else is a literal.
const TEMPLATE: &[u8; 25] = b"0000-00-00T00:00:00+00:00";

pub(crate) const FORMATTED_LEN: usize = TEMPLATE.len();

/// The numeric fields of a string that matches [`LAYOUT`], not yet validated against the calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Fields {
    pub year: i16,
    pub month: i8,
    pub day: i8,
    pub hour: i8,
    pub minute: i8,
    pub second: i8,
    pub offset_negative: bool,
    pub offset_hour: i8,
    pub offset_minute: i8,
}

/// Checks the shape of `text` against [`LAYOUT`] and extracts its fields.
pub(crate) fn scan(text: &str) -> Result<Fields, ErrorKind> {
    let bytes = text.as_bytes();

    if bytes.len() != FORMATTED_LEN {
        return Err(ErrorKind::Length { found: bytes.len() });
    }

    for (position, (&found, &expected)) in bytes.iter().zip(TEMPLATE).enumerate() {
        let matches = match expected {
            b'0' => found.is_ascii_digit(),
            b'+' => found == b'+' || found == b'-',
            literal => found == literal,
        };

        if !matches {
            // All bytes before `position` are ASCII, so it is a char boundary.
            let found = text
                .get(position..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or(char::REPLACEMENT_CHARACTER);

            return Err(ErrorKind::Unexpected {
                position,
                found,
                expected: expected_at(expected),
            });
        }
    }

    Ok(Fields {
        year: (u16::from(two_digits(bytes, 0)) * 100 + u16::from(two_digits(bytes, 2))).cast_signed(),
        month: two_digits(bytes, 5).cast_signed(),
        day: two_digits(bytes, 8).cast_signed(),
        hour: two_digits(bytes, 11).cast_signed(),
        minute: two_digits(bytes, 14).cast_signed(),
        second: two_digits(bytes, 17).cast_signed(),
        offset_negative: bytes[19] == b'-',
        offset_hour: two_digits(bytes, 20).cast_signed(),
        offset_minute: two_digits(bytes, 23).cast_signed(),
    })
}

/// Writes `datetime` and `offset` in [`LAYOUT`]. Sub-second parts and offset seconds are not written.
pub(crate) fn write(out: &mut impl Write, datetime: DateTime, offset: Offset) -> fmt::Result {
    let year = datetime.year();
    if year < 0 {
        out.write_char('-')?;
    }

    let offset_seconds = offset.seconds();
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let offset_seconds = offset_seconds.unsigned_abs();

    write!(
        out,
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{sign}{:02}:{:02}",
        year.unsigned_abs(),
        datetime.month(),
        datetime.day(),
        datetime.hour(),
        datetime.minute(),
        datetime.second(),
        offset_seconds / 3600,
        offset_seconds % 3600 / 60,
    )
}

fn two_digits(bytes: &[u8], at: usize) -> u8 {
    (bytes[at] - b'0') * 10 + (bytes[at + 1] - b'0')
}

fn expected_at(template: u8) -> Expected {
    match template {
        b'0' => Expected::Digit,
        b'+' => Expected::Sign,
        literal => Expected::Literal(char::from(literal)),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn template_matches_layout() {
        assert_eq!(LAYOUT.chars().count(), FORMATTED_LEN);
        assert_eq!(FORMATTED_LEN, 25);
    }

    #[test]
    fn scan_fields() {
        let fields = scan("2023-07-15T14:30:45+09:00").unwrap();

        assert_eq!(
            fields,
            Fields {
                year: 2023,
                month: 7,
                day: 15,
                hour: 14,
                minute: 30,
                second: 45,
                offset_negative: false,
                offset_hour: 9,
                offset_minute: 0,
            }
        );
    }

    #[test]
    fn scan_negative_offset() {
        let fields = scan("2006-01-02T15:04:05-07:30").unwrap();

        assert!(fields.offset_negative);
        assert_eq!(fields.offset_hour, 7);
        assert_eq!(fields.offset_minute, 30);
    }

    #[test]
    fn scan_does_not_validate_calendar() {
        let fields = scan("9999-99-99T99:99:99+99:99").unwrap();

        assert_eq!(fields.year, 9999);
        assert_eq!(fields.month, 99);
        assert_eq!(fields.offset_minute, 99);
    }

    #[test]
    fn scan_wrong_length() {
        assert!(matches!(scan(""), Err(ErrorKind::Length { found: 0 })));
        assert!(matches!(scan("2006-01-02"), Err(ErrorKind::Length { found: 10 })));
        assert!(matches!(
            scan("2006-01-02T15:04:05.123-07:00"),
            Err(ErrorKind::Length { found: 29 })
        ));
        assert!(matches!(scan("2006-01-02T15:04:05Z"), Err(ErrorKind::Length { found: 20 })));
    }

    #[test]
    fn scan_unexpected_literal() {
        let Err(ErrorKind::Unexpected {
            position,
            found,
            expected,
        }) = scan("2006-01-02 15:04:05-07:00")
        else {
            panic!("expected a structural mismatch");
        };

        assert_eq!(position, 10);
        assert_eq!(found, ' ');
        assert_eq!(expected, Expected::Literal('T'));
    }

    #[test]
    fn scan_unexpected_sign() {
        let Err(ErrorKind::Unexpected { position, expected, .. }) = scan("2006-01-02T15:04:05 07:00") else {
            panic!("expected a structural mismatch");
        };

        assert_eq!(position, 19);
        assert_eq!(expected, Expected::Sign);
    }

    #[test]
    fn scan_unexpected_digit() {
        let Err(ErrorKind::Unexpected {
            position,
            found,
            expected,
        }) = scan("2006-0a-02T15:04:05-07:00")
        else {
            panic!("expected a structural mismatch");
        };

        assert_eq!(position, 6);
        assert_eq!(found, 'a');
        assert_eq!(expected, Expected::Digit);
    }

    #[test]
    fn scan_offset_without_colon() {
        // Same length as the layout, with the missing colon made up by a trailing digit.
        let Err(ErrorKind::Unexpected { position, expected, .. }) = scan("2006-01-02T15:04:05-07000") else {
            panic!("expected a structural mismatch");
        };

        assert_eq!(position, 22);
        assert_eq!(expected, Expected::Literal(':'));
    }

    #[test]
    fn scan_non_ascii() {
        let Err(ErrorKind::Unexpected { position, found, .. }) = scan("2006-01-02T15:04:05−07:") else {
            panic!("expected a structural mismatch");
        };

        assert_eq!(position, 19);
        assert_eq!(found, '−');
    }

    #[test]
    fn write_layout() {
        let datetime = date(2023, 7, 15).at(14, 30, 45, 999_999_999);
        let offset = Offset::from_seconds(9 * 3600).unwrap();

        let mut out = String::new();
        write(&mut out, datetime, offset).unwrap();

        assert_eq!(out, "2023-07-15T14:30:45+09:00");
    }

    #[test]
    fn write_pads_fields() {
        let datetime = date(7, 1, 2).at(3, 4, 5, 0);
        let offset = Offset::from_seconds(-(5 * 3600 + 30 * 60)).unwrap();

        let mut out = String::new();
        write(&mut out, datetime, offset).unwrap();

        assert_eq!(out, "0007-01-02T03:04:05-05:30");
    }

    #[test]
    fn write_negative_year() {
        let datetime = date(-1, 12, 31).at(23, 59, 59, 0);

        let mut out = String::new();
        write(&mut out, datetime, Offset::UTC).unwrap();

        assert_eq!(out, "-0001-12-31T23:59:59+00:00");
    }
}
