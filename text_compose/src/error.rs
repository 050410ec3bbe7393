// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Errors reported for input the engine cannot compose faithfully.
///
/// Layout degradation (such as content that cannot be measured) is never an error.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum ComposeError {
    /// A spacer tab with a negative or non-finite width.
    InvalidSpacerWidth(f32),
    /// A head indent tab with a negative or non-finite position.
    InvalidHeadIndent(f32),
    /// A negative or non-finite fallback width for unmeasurable content.
    InvalidFallbackWidth(f32),
    /// The underlying attributed text rejected an operation.
    Text(attributed_text::Error),
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpacerWidth(width) => {
                write!(f, "spacer width {width} must be finite and non-negative")
            }
            Self::InvalidHeadIndent(indent) => {
                write!(f, "head indent {indent} must be finite and non-negative")
            }
            Self::InvalidFallbackWidth(width) => {
                write!(f, "fallback width {width} must be finite and non-negative")
            }
            Self::Text(err) => write!(f, "attributed text: {err}"),
        }
    }
}

impl core::error::Error for ComposeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Text(err) => Some(err),
            _ => None,
        }
    }
}

impl From<attributed_text::Error> for ComposeError {
    fn from(err: attributed_text::Error) -> Self {
        Self::Text(err)
    }
}

/// Returns `value` if it is a usable non-negative length.
pub(crate) fn check_length(value: f32, err: fn(f32) -> ComposeError) -> Result<f32, ComposeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(err(value))
    }
}

#[cfg(test)]
mod tests {
    use super::{check_length, ComposeError};
    use alloc::string::ToString;

    #[test]
    fn lengths_must_be_finite_and_non_negative() {
        assert_eq!(check_length(0.0, ComposeError::InvalidSpacerWidth), Ok(0.0));
        assert_eq!(
            check_length(-1.0, ComposeError::InvalidSpacerWidth),
            Err(ComposeError::InvalidSpacerWidth(-1.0))
        );
        assert!(check_length(f32::INFINITY, ComposeError::InvalidHeadIndent).is_err());
        assert!(check_length(f32::NAN, ComposeError::InvalidHeadIndent).is_err());
    }

    #[test]
    fn display_names_the_offending_value() {
        assert_eq!(
            ComposeError::InvalidSpacerWidth(-2.5).to_string(),
            "spacer width -2.5 must be finite and non-negative"
        );
    }
}
