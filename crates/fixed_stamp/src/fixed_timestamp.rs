// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::time::SystemTime;

use jiff::civil::DateTime;
use jiff::tz::{Offset, TimeZone};
use jiff::{Timestamp, Zoned};

use crate::error::{ErrorKind, FormatError, Result, Stage};
use crate::layout;

/// A point in time with a numeric UTC offset that is always written as
/// `YYYY-MM-DDThh:mm:ss±hh:mm`.
///
/// The value in memory keeps the full nanosecond precision of the wrapped [`Timestamp`].
/// Formatting drops the sub-second part without rounding, so a value at `14:30:45.999`
/// is written as `14:30:45`. UTC is written as `+00:00`, never as `Z`.
///
/// # Serialization and deserialization
///
/// `FixedTimestamp` implements the `Serialize` and `Deserialize` traits from the `serde_core`
/// crate. The value is serialized as a string in [`FixedTimestamp::LAYOUT`], and only a string
/// in that layout is accepted when deserializing.
///
/// The serialization support is available when the `serde` feature is enabled, which it is by default.
///
/// # Examples
///
/// ## Parsing and formatting
///
/// ```
/// use fixed_stamp::FixedTimestamp;
///
/// let stamp = FixedTimestamp::parse("2016-10-20T12:32:02+09:00")?;
/// assert_eq!(stamp.to_string(), "2016-10-20T12:32:02+09:00");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// ## Wrapping a `jiff` value
///
/// ```
/// use fixed_stamp::FixedTimestamp;
/// use jiff::civil::date;
/// use jiff::tz::{self, TimeZone};
///
/// let zoned = date(2023, 7, 15)
///     .at(14, 30, 45, 123_456_789)
///     .to_zoned(TimeZone::fixed(tz::offset(9)))?;
///
/// let stamp = FixedTimestamp::from(&zoned);
/// assert_eq!(stamp.to_string(), "2023-07-15T14:30:45+09:00");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// ## Embedding in a serializable type
///
/// ```
/// # #[cfg(feature = "serde")]
/// # {
/// use fixed_stamp::FixedTimestamp;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Response {
///     created_at: FixedTimestamp,
/// }
///
/// let response: Response = serde_json::from_str(r#"{"created_at":"2017-07-01T09:00:00+00:00"}"#)?;
/// assert_eq!(response.created_at.to_string(), "2017-07-01T09:00:00+00:00");
///
/// let json = serde_json::to_string(&response)?;
/// assert_eq!(json, r#"{"created_at":"2017-07-01T09:00:00+00:00"}"#);
/// # }
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedTimestamp {
    timestamp: Timestamp,
    offset: Offset,
}

impl FixedTimestamp {
    /// The layout every `FixedTimestamp` is written in and parsed from.
    pub const LAYOUT: &'static str = layout::LAYOUT;

    /// The Unix epoch, `1970-01-01T00:00:00+00:00`.
    pub const UNIX_EPOCH: Self = Self::new(Timestamp::UNIX_EPOCH, Offset::UTC);

    /// Wraps an instant together with the offset it is displayed in.
    ///
    /// Any instant and offset are accepted; nothing is validated or truncated.
    #[must_use]
    pub const fn new(timestamp: Timestamp, offset: Offset) -> Self {
        Self { timestamp, offset }
    }

    /// Parses `text` in [`FixedTimestamp::LAYOUT`].
    ///
    /// The text must be exactly 25 characters long with the separators at their fixed
    /// positions. Fractional seconds, a `Z` suffix, and offsets without a colon are rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if `text` does not match the layout or if it describes an
    /// impossible date, time, or offset such as month `13`, offset hour `25`, or offset minute `60`.
    ///
    /// Instants after `9999-12-30T22:00:00Z`, the largest [`Timestamp`], are rejected even when
    /// the text is a real calendar date, so `9999-12-31T23:59:59+00:00` fails to parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_stamp::FixedTimestamp;
    ///
    /// let stamp = FixedTimestamp::parse("2006-01-02T15:04:05-07:00")?;
    /// assert_eq!(stamp.offset().seconds(), -7 * 3600);
    ///
    /// FixedTimestamp::parse("2006-01-02").unwrap_err();
    /// FixedTimestamp::parse("2006-01-02T15:04:05.000-07:00").unwrap_err();
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_fields(text).map_err(|kind| FormatError::new(Stage::Parse, text, kind))
    }

    fn parse_fields(text: &str) -> std::result::Result<Self, ErrorKind> {
        let fields = layout::scan(text)?;

        let datetime = DateTime::new(
            fields.year,
            fields.month,
            fields.day,
            fields.hour,
            fields.minute,
            fields.second,
            0,
        )
        .map_err(ErrorKind::Calendar)?;

        if fields.offset_hour > 24 {
            return Err(ErrorKind::OffsetHour(fields.offset_hour));
        }

        if fields.offset_minute > 59 {
            return Err(ErrorKind::OffsetMinute(fields.offset_minute));
        }

        let offset_seconds = i32::from(fields.offset_hour) * 3600 + i32::from(fields.offset_minute) * 60;
        let offset_seconds = if fields.offset_negative {
            -offset_seconds
        } else {
            offset_seconds
        };

        let offset = Offset::from_seconds(offset_seconds).map_err(ErrorKind::Calendar)?;
        let timestamp = offset.to_timestamp(datetime).map_err(ErrorKind::Calendar)?;

        Ok(Self::new(timestamp, offset))
    }

    /// The wrapped instant, with its full precision.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The UTC offset the instant is displayed in.
    #[must_use]
    pub const fn offset(&self) -> Offset {
        self.offset
    }

    /// Returns this value with the sub-second part dropped.
    ///
    /// The result formats identically to `self`. Instants before the Unix epoch are moved to
    /// the start of their second, the same second that formatting shows.
    ///
    /// ```
    /// use fixed_stamp::FixedTimestamp;
    /// use jiff::Timestamp;
    /// use jiff::tz::Offset;
    ///
    /// let stamp = FixedTimestamp::new(Timestamp::new(10, 999_999_999)?, Offset::UTC);
    ///
    /// assert_eq!(stamp.truncated().timestamp(), Timestamp::from_second(10)?);
    /// assert_eq!(stamp.truncated().to_string(), stamp.to_string());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn truncated(&self) -> Self {
        let mut second = self.timestamp.as_second();
        if self.timestamp.subsec_nanosecond() < 0 {
            second -= 1;
        }

        // The floor of a valid instant is never below `Timestamp::MIN`.
        let timestamp = Timestamp::from_second(second).unwrap_or(self.timestamp);
        Self::new(timestamp, self.offset)
    }

    /// Converts to a [`Zoned`] in a fixed-offset time zone.
    #[must_use]
    pub fn to_zoned(&self) -> Zoned {
        self.timestamp.to_zoned(TimeZone::fixed(self.offset))
    }

    /// The offset that is written, which drops any seconds of the wrapped offset.
    fn written_offset(&self) -> Offset {
        let seconds = self.offset.seconds();
        Offset::from_seconds(seconds - seconds % 60).unwrap_or(self.offset)
    }
}

impl FromStr for FixedTimestamp {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for FixedTimestamp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let offset = self.written_offset();
        let datetime = offset.to_datetime(self.timestamp);

        if f.width().is_none() && f.precision().is_none() {
            return layout::write(f, datetime, offset);
        }

        let mut text = String::with_capacity(layout::FORMATTED_LEN + 1);
        layout::write(&mut text, datetime, offset)?;
        f.pad(&text)
    }
}

impl From<Zoned> for FixedTimestamp {
    fn from(value: Zoned) -> Self {
        Self::from(&value)
    }
}

impl From<&Zoned> for FixedTimestamp {
    fn from(value: &Zoned) -> Self {
        Self::new(value.timestamp(), value.offset())
    }
}

impl From<FixedTimestamp> for Zoned {
    fn from(value: FixedTimestamp) -> Self {
        value.to_zoned()
    }
}

impl From<Timestamp> for FixedTimestamp {
    fn from(value: Timestamp) -> Self {
        Self::new(value, Offset::UTC)
    }
}

impl From<FixedTimestamp> for Timestamp {
    fn from(value: FixedTimestamp) -> Self {
        value.timestamp
    }
}

impl From<FixedTimestamp> for SystemTime {
    fn from(value: FixedTimestamp) -> Self {
        value.timestamp.into()
    }
}

#[cfg(feature = "serde")]
impl FixedTimestamp {
    /// Encodes this value as a JSON string token.
    ///
    /// The result is always the formatted value surrounded by double quotes; the layout has
    /// no characters that need escaping.
    ///
    /// ```
    /// use fixed_stamp::FixedTimestamp;
    ///
    /// let stamp = FixedTimestamp::parse("2016-10-20T12:32:02+09:00")?;
    /// assert_eq!(stamp.to_json(), r#""2016-10-20T12:32:02+09:00""#);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn to_json(&self) -> String {
        format!("\"{self}\"")
    }

    /// Decodes a single JSON string token and parses its content.
    ///
    /// The input is tokenized by `serde_json`, so escape sequences are resolved and anything
    /// that is not exactly one JSON string (such as `null`, an unquoted value, or an
    /// unterminated string) is rejected. Whitespace around the token is allowed.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] at [`Stage::Unquote`] if `json` is not a JSON string and at
    /// [`Stage::Parse`] if the string content does not parse.
    ///
    /// ```
    /// use fixed_stamp::{FixedTimestamp, Stage};
    ///
    /// let stamp = FixedTimestamp::from_json(br#""2006-01-02T15:04:05-07:00""#)?;
    /// assert_eq!(stamp.to_string(), "2006-01-02T15:04:05-07:00");
    ///
    /// let error = FixedTimestamp::from_json(b"null").unwrap_err();
    /// assert_eq!(error.stage(), Stage::Unquote);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_json(json: &[u8]) -> Result<Self> {
        let text: String = serde_json::from_slice(json)
            .map_err(|err| FormatError::new(Stage::Unquote, String::from_utf8_lossy(json), ErrorKind::Json(err)))?;

        Self::parse(&text)
    }

    /// Decodes `json` like [`FixedTimestamp::from_json`] and stores the result in `self`.
    ///
    /// On failure `self` is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`FixedTimestamp::from_json`].
    ///
    /// ```
    /// use fixed_stamp::FixedTimestamp;
    ///
    /// let mut stamp = FixedTimestamp::UNIX_EPOCH;
    ///
    /// stamp.assign_from_json(br#""2017-07-18T21:20:15+09:00""#)?;
    /// assert_eq!(stamp.to_string(), "2017-07-18T21:20:15+09:00");
    ///
    /// stamp.assign_from_json(br#""2017-07-18""#).unwrap_err();
    /// assert_eq!(stamp.to_string(), "2017-07-18T21:20:15+09:00");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn assign_from_json(&mut self, json: &[u8]) -> Result<()> {
        *self = Self::from_json(json)?;
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde_core::Serialize for FixedTimestamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde_core::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde_core::Deserialize<'de> for FixedTimestamp {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde_core::Deserializer<'de>,
    {
        deserializer.deserialize_str(FixedTimestampVisitor)
    }
}

#[cfg(feature = "serde")]
struct FixedTimestampVisitor;

#[cfg(feature = "serde")]
impl serde_core::de::Visitor<'_> for FixedTimestampVisitor {
    type Value = FixedTimestamp;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "a string in the {} layout", layout::LAYOUT)
    }

    fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
    where
        E: serde_core::de::Error,
    {
        FixedTimestamp::parse(value).map_err(E::custom)
    }
}
