//! Colon-delimited text form of a crop state.
//!
//! ```text
//! <left>:<top>:<right>:<bottom>:<rotate_by>:<degrees_around_center>[:<flags>]
//! ```
//!
//! Floats are written in their shortest form that parses back to the same
//! value (`0.0`, `0.25`, `1e-7`). The flags field is only written when it is
//! nonzero, and a missing flags field parses as 0.
//!
//! Two entry points read the format:
//!
//! - `str::parse::<CropState>()` reports why the input was rejected
//! - [`CropState::parse`] returns `None` for anything unusable and logs the
//!   reason, which is what restore-on-startup code wants

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::crop::CropState;

const FIELD_SEPARATOR: char = ':';
const MIN_FIELDS: usize = 6;
const MAX_FIELDS: usize = 7;

/// Error types for reading a serialized crop state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCropStateError {
    /// The input was empty or whitespace only.
    #[error("Empty crop state")]
    Empty,

    /// The input did not have 6 or 7 fields.
    #[error("Expected 6 or 7 fields, got {count} ({input})")]
    FieldCount { count: usize, input: String },

    /// A real-valued field is not a number.
    #[error("Invalid number for {field}: {value:?}")]
    InvalidFloat { field: &'static str, value: String },

    /// An integer field is not an integer.
    #[error("Invalid integer for {field}: {value:?}")]
    InvalidInt { field: &'static str, value: String },
}

impl fmt::Display for CropState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug formatting of floats is the shortest round-trip representation
        write!(
            f,
            "{:?}:{:?}:{:?}:{:?}:{}:{:?}",
            self.left(),
            self.top(),
            self.right(),
            self.bottom(),
            self.rotation(),
            self.degrees_around_center(),
        )?;
        if self.flags() != 0 {
            write!(f, "{}{}", FIELD_SEPARATOR, self.flags())?;
        }
        Ok(())
    }
}

impl FromStr for CropState {
    type Err = ParseCropStateError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.trim().is_empty() {
            return Err(ParseCropStateError::Empty);
        }

        let mut fields: Vec<&str> = input.split(FIELD_SEPARATOR).collect();
        // Trailing empty fields do not count
        while fields.last().is_some_and(|field| field.is_empty()) {
            fields.pop();
        }
        if !(MIN_FIELDS..=MAX_FIELDS).contains(&fields.len()) {
            return Err(ParseCropStateError::FieldCount {
                count: fields.len(),
                input: input.to_string(),
            });
        }

        let left = parse_real(fields[0], "left")?;
        let top = parse_real(fields[1], "top")?;
        let right = parse_real(fields[2], "right")?;
        let bottom = parse_real(fields[3], "bottom")?;
        let rotate_by = parse_int(fields[4], "rotate_by")?;
        let degrees_around_center = parse_real(fields[5], "degrees_around_center")?;
        let flags = match fields.get(6) {
            Some(value) => parse_int(value, "flags")?,
            None => 0,
        };

        Ok(CropState::with_values(
            left,
            top,
            right,
            bottom,
            rotate_by,
            degrees_around_center,
            flags,
        ))
    }
}

/// Real fields tolerate surrounding whitespace, integer fields do not.
fn parse_real<T: FromStr>(value: &str, field: &'static str) -> Result<T, ParseCropStateError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseCropStateError::InvalidFloat {
            field,
            value: value.to_string(),
        })
}

fn parse_int(value: &str, field: &'static str) -> Result<i32, ParseCropStateError> {
    value.parse().map_err(|_| ParseCropStateError::InvalidInt {
        field,
        value: value.to_string(),
    })
}

impl CropState {
    /// Read a serialized crop state.
    ///
    /// Returns `None` for empty input, which is the normal "nothing saved"
    /// case. Malformed input also returns `None` and is logged as a warning.
    pub fn parse(input: &str) -> Option<CropState> {
        match input.parse::<CropState>() {
            Ok(state) => Some(state),
            Err(ParseCropStateError::Empty) => None,
            Err(err) => {
                tracing::warn!(error = %err, "discarding malformed crop state");
                None
            }
        }
    }

    /// Like [`parse`](Self::parse), treating a missing string as empty.
    pub fn parse_opt(input: Option<&str>) -> Option<CropState> {
        input.and_then(Self::parse)
    }
}



// ============================================================================
// Property-Based Tests
// ============================================================================
