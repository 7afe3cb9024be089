// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use tracing::{Level, event};

use crate::layout::LAYOUT;

/// The result type for fallible operations that use the [`FormatError`] type.
pub type Result<T> = std::result::Result<T, FormatError>;

/// An error that occurs when text or JSON cannot be turned into a [`FixedTimestamp`][crate::FixedTimestamp].
///
/// Every error carries the layout that was expected, the offending input, and the
/// [`Stage`] at which decoding stopped. The [`Category`] tells apart input that does not
/// have the shape of the layout from input that has the shape but encodes an impossible value.
///
/// # Examples
///
/// ```
/// use fixed_stamp::{Category, FixedTimestamp, Stage};
///
/// let error = FixedTimestamp::parse("2006-01-02").unwrap_err();
///
/// assert_eq!(error.stage(), Stage::Parse);
/// assert_eq!(error.category(), Category::Structure);
/// assert_eq!(error.input(), "2006-01-02");
/// assert_eq!(error.layout(), FixedTimestamp::LAYOUT);
/// ```
#[derive(Debug)]
pub struct FormatError {
    stage: Stage,
    input: Box<str>,
    kind: ErrorKind,
}

/// The decoding stage at which a [`FormatError`] was raised.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Stage {
    /// The input was not a single, well-formed JSON string token.
    Unquote,

    /// The text did not match the layout or encodes an invalid date, time, or offset.
    Parse,
}

/// The origin of a [`FormatError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Category {
    /// The length, separators, or digit grouping of the input do not match the layout.
    Structure,

    /// The input is shaped correctly but does not describe a real instant, or is not a valid
    /// JSON string token.
    Semantic,
}

#[derive(Debug)]
pub(crate) enum ErrorKind {
    Length {
        found: usize,
    },
    Unexpected {
        position: usize,
        found: char,
        expected: Expected,
    },
    Calendar(jiff::Error),
    OffsetHour(i8),
    OffsetMinute(i8),
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Expected {
    Digit,
    Sign,
    Literal(char),
}

impl FormatError {
    pub(crate) fn new(stage: Stage, input: impl Into<Box<str>>, kind: ErrorKind) -> Self {
        let error = Self {
            stage,
            input: input.into(),
            kind,
        };

        event!(
            Level::DEBUG,
            message = "timestamp rejected",
            stage = ?error.stage,
            category = ?error.category(),
            input = &*error.input,
        );

        error
    }

    /// The layout the input was expected to follow.
    #[must_use]
    #[expect(clippy::unused_self, reason = "the layout is fixed today but belongs to the error as reported")]
    pub fn layout(&self) -> &'static str {
        LAYOUT
    }

    /// The input that was rejected.
    ///
    /// For [`Stage::Unquote`] this is the raw JSON (invalid UTF-8 is replaced), for
    /// [`Stage::Parse`] it is the unquoted text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The decoding stage that failed.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether the input was structurally wrong or semantically invalid.
    #[must_use]
    pub fn category(&self) -> Category {
        match self.kind {
            ErrorKind::Length { .. } | ErrorKind::Unexpected { .. } => Category::Structure,
            ErrorKind::Calendar(_) | ErrorKind::OffsetHour(_) | ErrorKind::OffsetMinute(_) => Category::Semantic,
            #[cfg(feature = "serde")]
            ErrorKind::Json(_) => Category::Semantic,
        }
    }

    #[cfg(test)]
    pub(crate) const fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            Stage::Unquote => write!(f, "decoding {:?} as a JSON string in layout {LAYOUT:?}: ", &*self.input)?,
            Stage::Parse => write!(f, "parsing time {:?} as {LAYOUT:?}: ", &*self.input)?,
        }

        match &self.kind {
            ErrorKind::Length { found } => write!(f, "expected {} bytes, found {found}", crate::layout::FORMATTED_LEN),
            ErrorKind::Unexpected {
                position,
                found,
                expected,
            } => write!(f, "unexpected {found:?} at byte {position}, expected {expected}"),
            ErrorKind::Calendar(err) => fmt::Display::fmt(err, f),
            ErrorKind::OffsetHour(hour) => {
                write!(f, "offset hour {hour} is not in the required range of 0..=24")
            }
            ErrorKind::OffsetMinute(minute) => {
                write!(f, "offset minute {minute} is not in the required range of 0..=59")
            }
            #[cfg(feature = "serde")]
            ErrorKind::Json(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit => f.write_str("a digit"),
            Self::Sign => f.write_str("'+' or '-'"),
            Self::Literal(c) => write!(f, "{c:?}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Calendar(err) => Some(err),
            #[cfg(feature = "serde")]
            ErrorKind::Json(err) => Some(err),
            ErrorKind::Length { .. }
            | ErrorKind::Unexpected { .. }
            | ErrorKind::OffsetHour(_)
            | ErrorKind::OffsetMinute(_) => None,
        }
    }
}
