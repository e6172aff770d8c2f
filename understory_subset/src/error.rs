// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use crate::PatternError;

/// A set array configuration that cannot describe a valid array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The explicit name list does not have one entry per set.
    NameCountMismatch {
        /// Number of explicit names supplied.
        names: usize,
        /// Declared number of sets.
        count: usize,
    },
    /// The explicit name list names two sets the same.
    DuplicateName(String),
    /// The role code is not a known [`Role`](crate::Role).
    UnknownRole(i32),
    /// The `printf`-style prefix could not be parsed.
    InvalidPattern(PatternError),
    /// The global id range or the display number range overflows.
    CountOverflow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameCountMismatch { names, count } => write!(
                f,
                "set array declares {count} sets but lists {names} explicit names"
            ),
            Self::DuplicateName(name) => {
                write!(f, "set name `{name}` is listed more than once")
            }
            Self::UnknownRole(code) => write!(f, "unknown collection role code {code}"),
            Self::InvalidPattern(err) => write!(f, "invalid set name template: {err}"),
            Self::CountOverflow => f.write_str("set array index range overflows"),
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidPattern(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PatternError> for ConfigError {
    fn from(err: PatternError) -> Self {
        Self::InvalidPattern(err)
    }
}
