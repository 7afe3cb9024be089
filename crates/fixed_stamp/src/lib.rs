// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(
    test,
    allow(
        clippy::arithmetic_side_effects,
        clippy::unwrap_used,
        reason = "allow these lints in tests to improve the readability of the tests"
    )
)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A timestamp that always serializes as `YYYY-MM-DDThh:mm:ss±hh:mm`.
//!
//! [`FixedTimestamp`] wraps a [`jiff::Timestamp`] together with a numeric UTC offset. However
//! precise the value in memory is, its text and JSON forms carry whole seconds and an explicit
//! offset, so types that embed it produce stable, second-precision output:
//!
//! ```
//! # #[cfg(feature = "serde")]
//! # {
//! use fixed_stamp::FixedTimestamp;
//! use jiff::civil::date;
//! use jiff::tz::{self, TimeZone};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Response {
//!     created_at: FixedTimestamp,
//! }
//!
//! let created_at = date(2023, 7, 15)
//!     .at(14, 30, 45, 250_000_000)
//!     .to_zoned(TimeZone::fixed(tz::offset(9)))?;
//!
//! let response = Response {
//!     created_at: created_at.into(),
//! };
//!
//! assert_eq!(
//!     serde_json::to_string(&response)?,
//!     r#"{"created_at":"2023-07-15T14:30:45+09:00"}"#
//! );
//! # }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Overview
//!
//! - [`FixedTimestamp`] - The timestamp wrapper. Parses with [`FixedTimestamp::parse`] or
//!   [`str::parse`], formats with [`Display`][std::fmt::Display], and converts to and from
//!   [`jiff::Timestamp`], [`jiff::Zoned`], and [`SystemTime`][std::time::SystemTime].
//! - [`FormatError`] - Returned when text or JSON is rejected. Reports the expected layout, the
//!   offending input, the failing [`Stage`], and the [`Category`] of the problem.
//!
//! # The layout
//!
//! The only accepted and produced layout is [`FixedTimestamp::LAYOUT`]:
//!
//! - a four-digit year and two-digit month, day, hour, minute, and second,
//! - a literal `T` between the date and the time,
//! - a mandatory `+` or `-` followed by the offset hours and minutes, separated by `:`.
//!
//! UTC is written as `+00:00`. There is no fractional second and no `Z`.
//!
//! # Features
//!
//! - `serde` (default) - Implements `Serialize` and `Deserialize` from `serde_core` and adds
//!   [`FixedTimestamp::to_json`], [`FixedTimestamp::from_json`], and
//!   [`FixedTimestamp::assign_from_json`].
//!
//! # Logging
//!
//! Every rejected input is reported as a `DEBUG` event through [`tracing`], with the failing
//! stage, the category, and the input as fields.

mod error;
mod fixed_timestamp;
mod layout;

pub use error::{Category, FormatError, Result, Stage};
pub use fixed_timestamp::FixedTimestamp;
