// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;

/// A text or background color.
pub use peniko::Color;

/// A font, as stored and forwarded by the engine.
///
/// Only the point size is ever interpreted (to resolve [`Tracking::Adobe`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// The font's family or face name.
    pub name: Arc<str>,
    /// The font size in points.
    pub size: f32,
}

impl Font {
    /// Creates a font description.
    pub fn new(name: impl Into<Arc<str>>, size: f32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// A link target.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Link(pub Arc<str>);

impl Link {
    /// Creates a link to `target`.
    pub fn new(target: impl Into<Arc<str>>) -> Self {
        Self(target.into())
    }

    /// Returns the link target.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Extra spacing between characters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tracking {
    /// An absolute kern in points.
    Point(f32),
    /// Thousandths of an em, as used by design tools.
    ///
    /// Resolving this requires the font size of the effective font.
    Adobe(f32),
}

impl Tracking {
    /// Resolves this tracking to a kern in points.
    ///
    /// Returns `None` for [`Tracking::Adobe`] when no font size is known.
    pub fn kern(self, font_size: Option<f32>) -> Option<f32> {
        match self {
            Self::Point(value) => Some(value),
            Self::Adobe(value) => font_size.map(|size| size * value / 1000.0),
        }
    }
}

/// Ligature usage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ligatures {
    /// Only the ligatures required for correct rendering.
    Disabled = 0,
    /// The font's standard ligatures.
    #[default]
    Default = 1,
    /// All available ligatures.
    All = 2,
}

/// Horizontal alignment of the lines of a paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    /// Follows the writing direction of the paragraph.
    #[default]
    Natural,
    /// Align content to the left edge.
    Left,
    /// Align content to the right edge.
    Right,
    /// Center each line.
    Center,
    /// Justify each line, except for the last one.
    Justified,
}

/// How lines too long for their container are broken or truncated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineBreakMode {
    /// Wrap at word boundaries.
    #[default]
    WordWrapping,
    /// Wrap at character boundaries.
    CharWrapping,
    /// Clip at the container edge.
    Clipping,
    /// Truncate with an ellipsis at the start of the line.
    TruncatingHead,
    /// Truncate with an ellipsis at the end of the line.
    TruncatingTail,
    /// Truncate with an ellipsis in the middle of the line.
    TruncatingMiddle,
}

/// The base writing direction of a paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WritingDirection {
    /// Determined from the paragraph's content.
    #[default]
    Natural,
    /// Left to right.
    LeftToRight,
    /// Right to left.
    RightToLeft,
}

#[cfg(test)]
mod tests {
    use super::{Font, Tracking};

    #[test]
    fn adobe_tracking_scales_with_font_size() {
        let font = Font::new("Avenir-Book", 28.0);
        assert_eq!(Tracking::Adobe(500.0).kern(Some(font.size)), Some(14.0));
        assert_eq!(Tracking::Adobe(500.0).kern(None), None);
        assert_eq!(Tracking::Point(3.0).kern(None), Some(3.0));
    }
}
