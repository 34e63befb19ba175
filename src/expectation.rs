//! Optimistic concurrency expectations.
//!
//! [`StreamState`] is what the caller assumes about a stream before appending.
//! [`ExpectedRevision`] is the same assumption in the form executors put on the
//! wire, and [`CurrentRevision`] is what the store reports back.

use std::fmt;

use crate::position::{StreamPosition, StreamRevision};

/// Caller's assumption about a stream prior to an append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamState {
    /// No check.
    Any,
    /// The stream must not exist.
    NoStream,
    /// The stream must exist, at any revision.
    StreamExists,
    /// The stream must be exactly at this revision.
    Revision(StreamRevision),
}

impl StreamState {
    /// Expect the stream to be at the given raw revision.
    pub fn revision(value: u64) -> Result<Self, crate::position::PositionError> {
        StreamRevision::new(value).map(StreamState::Revision)
    }
}

impl From<StreamRevision> for StreamState {
    fn from(revision: StreamRevision) -> Self {
        StreamState::Revision(revision)
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamState::Any => f.write_str("any"),
            StreamState::NoStream => f.write_str("no stream"),
            StreamState::StreamExists => f.write_str("stream exists"),
            StreamState::Revision(revision) => write!(f, "revision {revision}"),
        }
    }
}

/// Expectation in the form understood by a stream executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedRevision {
    Any,
    NoStream,
    StreamExists,
    Exact(u64),
}

impl From<StreamState> for ExpectedRevision {
    fn from(state: StreamState) -> Self {
        match state {
            StreamState::Any => ExpectedRevision::Any,
            StreamState::NoStream => ExpectedRevision::NoStream,
            StreamState::StreamExists => ExpectedRevision::StreamExists,
            StreamState::Revision(revision) => ExpectedRevision::Exact(revision.to_u64()),
        }
    }
}

impl fmt::Display for ExpectedRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedRevision::Any => f.write_str("any"),
            ExpectedRevision::NoStream => f.write_str("no stream"),
            ExpectedRevision::StreamExists => f.write_str("stream exists"),
            ExpectedRevision::Exact(revision) => write!(f, "revision {revision}"),
        }
    }
}

/// Actual state of a stream as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CurrentRevision {
    NoStream,
    Current(StreamRevision),
}

impl CurrentRevision {
    pub fn revision(&self) -> Option<StreamRevision> {
        match self {
            CurrentRevision::NoStream => None,
            CurrentRevision::Current(revision) => Some(*revision),
        }
    }
}

impl From<CurrentRevision> for StreamPosition {
    fn from(current: CurrentRevision) -> Self {
        match current {
            CurrentRevision::NoStream => StreamPosition::None,
            CurrentRevision::Current(revision) => StreamPosition::At(revision),
        }
    }
}

impl fmt::Display for CurrentRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrentRevision::NoStream => f.write_str("no stream"),
            CurrentRevision::Current(revision) => write!(f, "revision {revision}"),
        }
    }
}

/// Result of checking an expectation against the actual stream state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectationCheck {
    /// The expectation holds.
    Valid,
    /// The expectation does not hold.
    Mismatch {
        expected: ExpectedRevision,
        actual: CurrentRevision,
    },
}

/// Checks an expectation against the actual stream state.
///
/// Stores use this as the optimistic concurrency gate before accepting an append.
pub fn check_expectation(expected: ExpectedRevision, actual: CurrentRevision) -> ExpectationCheck {
    let holds = match (expected, actual) {
        (ExpectedRevision::Any, _) => true,
        (ExpectedRevision::NoStream, CurrentRevision::NoStream) => true,
        (ExpectedRevision::NoStream, CurrentRevision::Current(_)) => false,
        (ExpectedRevision::StreamExists, CurrentRevision::NoStream) => false,
        (ExpectedRevision::StreamExists, CurrentRevision::Current(_)) => true,
        (ExpectedRevision::Exact(_), CurrentRevision::NoStream) => false,
        (ExpectedRevision::Exact(expected), CurrentRevision::Current(revision)) => {
            expected == revision.to_u64()
        }
    };

    if holds {
        ExpectationCheck::Valid
    } else {
        ExpectationCheck::Mismatch { expected, actual }
    }
}
