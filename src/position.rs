//! Stream revisions and positions.
//!
//! A [`StreamRevision`] is a concrete, zero-based offset of an event within a
//! stream. Valid revisions occupy `[0, 2^63 - 1]`: the upper half of the `u64`
//! range is reserved for sentinels and is rejected as an explicit value.
//!
//! [`StreamPosition`] layers the `None` and `End` sentinels on top of concrete
//! revisions. Sentinels never take part in arithmetic and have no numeric value.
//!
//! All arithmetic is checked. Results that would leave the valid range fail with
//! [`PositionError::Overflow`] or [`PositionError::Underflow`] instead of wrapping
//! or saturating.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Largest value a concrete revision can hold (`2^63 - 1`).
pub const MAX_REVISION: u64 = i64::MAX as u64;

/// Errors from constructing, converting, or doing arithmetic on revisions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("argument `{param}` is out of range: {detail}")]
    OutOfRange { param: &'static str, detail: String },

    #[error("revision overflow: {value} + {delta} leaves the valid range")]
    Overflow { value: u64, delta: u64 },

    #[error("revision underflow: {value} - {delta} is negative")]
    Underflow { value: u64, delta: u64 },

    #[error("invalid revision: {0}")]
    Parse(#[from] ParseIntError),
}

impl PositionError {
    fn value_out_of_range(value: u64) -> Self {
        PositionError::OutOfRange {
            param: "value",
            detail: format!("{value} exceeds the maximum revision {MAX_REVISION}"),
        }
    }

    fn sentinel(position: StreamPosition) -> Self {
        PositionError::OutOfRange {
            param: "position",
            detail: format!("{position} has no fixed revision"),
        }
    }

    /// Name of the offending argument for `OutOfRange` errors.
    pub fn param(&self) -> Option<&'static str> {
        match self {
            PositionError::OutOfRange { param, .. } => Some(*param),
            _ => None,
        }
    }
}

/// Concrete, zero-based revision of an event within a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct StreamRevision(u64);

impl StreamRevision {
    /// Revision of the first event in a stream.
    pub const START: StreamRevision = StreamRevision(0);

    /// Largest addressable revision.
    pub const MAX: StreamRevision = StreamRevision(MAX_REVISION);

    /// Create a revision from a raw value.
    ///
    /// Fails with `OutOfRange` (param `"value"`) when `value > 2^63 - 1`.
    pub fn new(value: u64) -> Result<Self, PositionError> {
        if value > MAX_REVISION {
            return Err(PositionError::value_out_of_range(value));
        }
        Ok(StreamRevision(value))
    }

    /// Numeric value of this revision.
    pub const fn to_u64(self) -> u64 {
        self.0
    }

    /// The revision immediately after this one.
    pub fn next(self) -> Result<Self, PositionError> {
        self.add(1)
    }

    /// `self + delta`; fails with `Overflow` past the maximum revision.
    pub fn add(self, delta: u64) -> Result<Self, PositionError> {
        self.0
            .checked_add(delta)
            .filter(|sum| *sum <= MAX_REVISION)
            .map(StreamRevision)
            .ok_or(PositionError::Overflow {
                value: self.0,
                delta,
            })
    }

    /// `self - delta`; fails with `Underflow` when `delta` exceeds the value.
    pub fn subtract(self, delta: u64) -> Result<Self, PositionError> {
        self.0
            .checked_sub(delta)
            .map(StreamRevision)
            .ok_or(PositionError::Underflow {
                value: self.0,
                delta,
            })
    }

    /// Resolve a stream position into a concrete revision.
    ///
    /// `Start` and concrete positions convert; `End` and `None` have no fixed
    /// numeric identity and fail with `OutOfRange`.
    pub fn from_stream_position(position: StreamPosition) -> Result<Self, PositionError> {
        match position {
            StreamPosition::At(revision) => Ok(revision),
            StreamPosition::None | StreamPosition::End => Err(PositionError::sentinel(position)),
        }
    }
}

/// `delta + revision`, the reversed-operand form of [`StreamRevision::add`].
pub fn add_to(delta: u64, revision: StreamRevision) -> Result<StreamRevision, PositionError> {
    revision.add(delta)
}

/// `value - revision`, the reversed-operand form of [`StreamRevision::subtract`].
///
/// Fails with `Underflow` when `revision > value` and with `Overflow` when the
/// difference still lies in the reserved upper half.
pub fn subtract_from(value: u64, revision: StreamRevision) -> Result<StreamRevision, PositionError> {
    let difference = value
        .checked_sub(revision.0)
        .ok_or(PositionError::Underflow {
            value,
            delta: revision.0,
        })?;
    if difference > MAX_REVISION {
        return Err(PositionError::Overflow {
            value: difference,
            delta: 0,
        });
    }
    Ok(StreamRevision(difference))
}

impl TryFrom<u64> for StreamRevision {
    type Error = PositionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        StreamRevision::new(value)
    }
}

impl From<StreamRevision> for u64 {
    fn from(revision: StreamRevision) -> Self {
        revision.0
    }
}

impl TryFrom<StreamPosition> for StreamRevision {
    type Error = PositionError;

    fn try_from(position: StreamPosition) -> Result<Self, Self::Error> {
        StreamRevision::from_stream_position(position)
    }
}

impl fmt::Display for StreamRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StreamRevision {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StreamRevision::new(s.trim().parse::<u64>()?)
    }
}

/// A position within a stream, including sentinels.
///
/// Ordering is total: `None` < every concrete revision (numerically) < `End`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StreamPosition {
    /// No stream, or nothing written yet.
    None,
    /// A concrete revision.
    At(StreamRevision),
    /// The position after the last event, not yet assigned.
    End,
}

impl StreamPosition {
    pub const NONE: StreamPosition = StreamPosition::None;
    pub const START: StreamPosition = StreamPosition::At(StreamRevision::START);
    pub const END: StreamPosition = StreamPosition::End;

    /// True for `None` and `End`.
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, StreamPosition::At(_))
    }

    /// The concrete revision, if this is not a sentinel.
    pub fn revision(&self) -> Option<StreamRevision> {
        match self {
            StreamPosition::At(revision) => Some(*revision),
            StreamPosition::None | StreamPosition::End => None,
        }
    }
}

impl From<StreamRevision> for StreamPosition {
    fn from(revision: StreamRevision) -> Self {
        StreamPosition::At(revision)
    }
}

impl TryFrom<StreamPosition> for u64 {
    type Error = PositionError;

    fn try_from(position: StreamPosition) -> Result<Self, Self::Error> {
        StreamRevision::from_stream_position(position).map(StreamRevision::to_u64)
    }
}

impl fmt::Display for StreamPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamPosition::None => f.write_str("None"),
            StreamPosition::At(revision) => write!(f, "{revision}"),
            StreamPosition::End => f.write_str("End"),
        }
    }
}
