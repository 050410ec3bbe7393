// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use super::extra::ExtraAttributes;
use super::values::{
    Color, Font, Ligatures, LineBreakMode, Link, TextAlignment, Tracking, WritingDirection,
};

/// A single explicitly set style attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum StylePart {
    /// Text color.
    Color(Color),
    /// Background color.
    BackgroundColor(Color),
    /// Font.
    Font(Font),
    /// Baseline offset in points.
    BaselineOffset(f32),
    /// Extra spacing between characters.
    Tracking(Tracking),
    /// Link target.
    Link(Link),
    /// Ligature usage.
    Ligatures(Ligatures),
    /// Space before the paragraph, in points.
    ParagraphSpacingBefore(f32),
    /// Space after the paragraph, in points.
    ParagraphSpacingAfter(f32),
    /// Paragraph alignment.
    Alignment(TextAlignment),
    /// Indent of the first line of the paragraph, in points.
    FirstLineHeadIndent(f32),
    /// Indent of the lines after the first, in points.
    HeadIndent(f32),
    /// Trailing indent, in points.
    TailIndent(f32),
    /// Line breaking and truncation.
    LineBreakMode(LineBreakMode),
    /// Minimum line height, in points.
    MinimumLineHeight(f32),
    /// Maximum line height, in points.
    MaximumLineHeight(f32),
    /// Line height as a multiple of the natural line height.
    LineHeightMultiple(f32),
    /// Space between lines, in points.
    LineSpacing(f32),
    /// Base writing direction of the paragraph.
    BaseWritingDirection(WritingDirection),
    /// Hyphenation threshold, from 0 to 1.
    HyphenationFactor(f32),
    /// Additional attributes, merged key by key.
    ExtraAttributes(ExtraAttributes),
}

/// The kind of a [`StylePart`], without its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs, reason = "Each variant names the StylePart variant of the same name.")]
pub enum StylePartKind {
    Color,
    BackgroundColor,
    Font,
    BaselineOffset,
    Tracking,
    Link,
    Ligatures,
    ParagraphSpacingBefore,
    ParagraphSpacingAfter,
    Alignment,
    FirstLineHeadIndent,
    HeadIndent,
    TailIndent,
    LineBreakMode,
    MinimumLineHeight,
    MaximumLineHeight,
    LineHeightMultiple,
    LineSpacing,
    BaseWritingDirection,
    HyphenationFactor,
    ExtraAttributes,
}

pub(crate) const PART_KIND_COUNT: usize = 21;

impl StylePartKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; PART_KIND_COUNT] = [
        Self::Color,
        Self::BackgroundColor,
        Self::Font,
        Self::BaselineOffset,
        Self::Tracking,
        Self::Link,
        Self::Ligatures,
        Self::ParagraphSpacingBefore,
        Self::ParagraphSpacingAfter,
        Self::Alignment,
        Self::FirstLineHeadIndent,
        Self::HeadIndent,
        Self::TailIndent,
        Self::LineBreakMode,
        Self::MinimumLineHeight,
        Self::MaximumLineHeight,
        Self::LineHeightMultiple,
        Self::LineSpacing,
        Self::BaseWritingDirection,
        Self::HyphenationFactor,
        Self::ExtraAttributes,
    ];

    /// Returns `true` for kinds that apply to whole paragraphs.
    pub fn is_paragraph(self) -> bool {
        matches!(
            self,
            Self::ParagraphSpacingBefore
                | Self::ParagraphSpacingAfter
                | Self::Alignment
                | Self::FirstLineHeadIndent
                | Self::HeadIndent
                | Self::TailIndent
                | Self::LineBreakMode
                | Self::MinimumLineHeight
                | Self::MaximumLineHeight
                | Self::LineHeightMultiple
                | Self::LineSpacing
                | Self::BaseWritingDirection
                | Self::HyphenationFactor
        )
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl StylePart {
    /// Returns the kind of this part.
    pub fn kind(&self) -> StylePartKind {
        match self {
            Self::Color(_) => StylePartKind::Color,
            Self::BackgroundColor(_) => StylePartKind::BackgroundColor,
            Self::Font(_) => StylePartKind::Font,
            Self::BaselineOffset(_) => StylePartKind::BaselineOffset,
            Self::Tracking(_) => StylePartKind::Tracking,
            Self::Link(_) => StylePartKind::Link,
            Self::Ligatures(_) => StylePartKind::Ligatures,
            Self::ParagraphSpacingBefore(_) => StylePartKind::ParagraphSpacingBefore,
            Self::ParagraphSpacingAfter(_) => StylePartKind::ParagraphSpacingAfter,
            Self::Alignment(_) => StylePartKind::Alignment,
            Self::FirstLineHeadIndent(_) => StylePartKind::FirstLineHeadIndent,
            Self::HeadIndent(_) => StylePartKind::HeadIndent,
            Self::TailIndent(_) => StylePartKind::TailIndent,
            Self::LineBreakMode(_) => StylePartKind::LineBreakMode,
            Self::MinimumLineHeight(_) => StylePartKind::MinimumLineHeight,
            Self::MaximumLineHeight(_) => StylePartKind::MaximumLineHeight,
            Self::LineHeightMultiple(_) => StylePartKind::LineHeightMultiple,
            Self::LineSpacing(_) => StylePartKind::LineSpacing,
            Self::BaseWritingDirection(_) => StylePartKind::BaseWritingDirection,
            Self::HyphenationFactor(_) => StylePartKind::HyphenationFactor,
            Self::ExtraAttributes(_) => StylePartKind::ExtraAttributes,
        }
    }
}

/// A partial style specification: an ordered list of explicitly set parts.
///
/// Kinds that are absent inherit from whatever style this one is merged onto. When the same kind
/// appears more than once, the last part wins; extra-attribute parts instead merge key by key,
/// in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    parts: Vec<StylePart>,
}

impl Style {
    /// Creates an empty style (no parts).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a style from an iterator of parts.
    ///
    /// ## Example
    ///
    /// ```
    /// use text_compose::{Style, StylePart, StylePartKind};
    ///
    /// let style = Style::from_parts([StylePart::HeadIndent(4.0), StylePart::HeadIndent(8.0)]);
    /// assert_eq!(style.parts().len(), 2);
    /// assert_eq!(style.get(StylePartKind::HeadIndent), Some(&StylePart::HeadIndent(8.0)));
    /// ```
    #[inline]
    pub fn from_parts<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = StylePart>,
    {
        Self {
            parts: parts.into_iter().collect(),
        }
    }

    /// Returns the parts in this style, in authoring order.
    #[inline]
    pub fn parts(&self) -> &[StylePart] {
        &self.parts
    }

    /// Returns `true` if no part is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Appends a part to this style.
    #[inline]
    pub fn push_part(&mut self, part: StylePart) {
        self.parts.push(part);
    }

    /// Appends an arbitrary part.
    #[inline]
    pub fn push(mut self, part: StylePart) -> Self {
        self.parts.push(part);
        self
    }

    /// Returns the effective part of `kind`: the last one set.
    ///
    /// For [`StylePartKind::ExtraAttributes`] this is the last bag only; use
    /// [`Style::extras`] for the merged bag.
    pub fn get(&self, kind: StylePartKind) -> Option<&StylePart> {
        self.parts.iter().rev().find(|part| part.kind() == kind)
    }

    /// Returns every extra-attribute bag of this style merged in order.
    pub fn extras(&self) -> ExtraAttributes {
        let mut merged = ExtraAttributes::new();
        for part in &self.parts {
            if let StylePart::ExtraAttributes(extra) = part {
                merged.merge_from(extra);
            }
        }
        merged
    }

    /// Returns `true` if this style touches paragraph-scoped attributes.
    ///
    /// This includes a paragraph object carried in extra attributes.
    pub fn has_paragraph_parts(&self) -> bool {
        self.parts.iter().any(|part| match part {
            StylePart::ExtraAttributes(extra) => extra.has_paragraph(),
            part => part.kind().is_paragraph(),
        })
    }

    /// Folds this style into one part per kind, in kind order.
    ///
    /// Folding is idempotent: folding a folded style yields an equal style.
    pub fn folded(&self) -> Self {
        let picked = self.pick();
        let mut parts = Vec::with_capacity(PART_KIND_COUNT);
        for kind in StylePartKind::ALL {
            if kind == StylePartKind::ExtraAttributes {
                let extra = self.extras();
                if picked[kind.index()].is_some() {
                    parts.push(StylePart::ExtraAttributes(extra));
                }
            } else if let Some(part) = picked[kind.index()] {
                parts.push(part.clone());
            }
        }
        Self { parts }
    }

    /// Returns a style that is `self` overridden by `other`.
    ///
    /// Every kind set in `other` takes `other`'s value; every other kind keeps `self`'s (which
    /// may itself be unset). Extra attributes merge key by key with `other` winning.
    ///
    /// ## Example
    ///
    /// ```
    /// use text_compose::{Style, StylePart, StylePartKind};
    ///
    /// let base = Style::new().head_indent(4.0).line_spacing(2.0);
    /// let merged = base.merged_with(&Style::new().head_indent(8.0));
    /// assert_eq!(merged.get(StylePartKind::HeadIndent), Some(&StylePart::HeadIndent(8.0)));
    /// assert_eq!(merged.get(StylePartKind::LineSpacing), Some(&StylePart::LineSpacing(2.0)));
    /// ```
    pub fn merged_with(&self, other: &Self) -> Self {
        let mut parts = Vec::with_capacity(self.parts.len() + other.parts.len());
        parts.extend(self.parts.iter().cloned());
        parts.extend(other.parts.iter().cloned());
        Self { parts }.folded()
    }

    /// Picks the last part of each kind, indexed by kind.
    pub(crate) fn pick(&self) -> [Option<&StylePart>; PART_KIND_COUNT] {
        let mut picked: [Option<&StylePart>; PART_KIND_COUNT] = [None; PART_KIND_COUNT];
        let mut remaining = PART_KIND_COUNT;
        for part in self.parts.iter().rev() {
            let idx = part.kind().index();
            if picked[idx].is_some() {
                continue;
            }
            picked[idx] = Some(part);
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        }
        picked
    }

    /// Sets the text color.
    #[inline]
    pub fn color(self, value: Color) -> Self {
        self.push(StylePart::Color(value))
    }

    /// Sets the background color.
    #[inline]
    pub fn background_color(self, value: Color) -> Self {
        self.push(StylePart::BackgroundColor(value))
    }

    /// Sets the font.
    #[inline]
    pub fn font(self, value: Font) -> Self {
        self.push(StylePart::Font(value))
    }

    /// Sets the baseline offset.
    #[inline]
    pub fn baseline_offset(self, value: f32) -> Self {
        self.push(StylePart::BaselineOffset(value))
    }

    /// Sets the tracking.
    #[inline]
    pub fn tracking(self, value: Tracking) -> Self {
        self.push(StylePart::Tracking(value))
    }

    /// Sets the link target.
    #[inline]
    pub fn link(self, value: Link) -> Self {
        self.push(StylePart::Link(value))
    }

    /// Sets ligature usage.
    #[inline]
    pub fn ligatures(self, value: Ligatures) -> Self {
        self.push(StylePart::Ligatures(value))
    }

    /// Sets the space before the paragraph.
    #[inline]
    pub fn paragraph_spacing_before(self, value: f32) -> Self {
        self.push(StylePart::ParagraphSpacingBefore(value))
    }

    /// Sets the space after the paragraph.
    #[inline]
    pub fn paragraph_spacing_after(self, value: f32) -> Self {
        self.push(StylePart::ParagraphSpacingAfter(value))
    }

    /// Sets the paragraph alignment.
    #[inline]
    pub fn alignment(self, value: TextAlignment) -> Self {
        self.push(StylePart::Alignment(value))
    }

    /// Sets the first line head indent.
    #[inline]
    pub fn first_line_head_indent(self, value: f32) -> Self {
        self.push(StylePart::FirstLineHeadIndent(value))
    }

    /// Sets the head indent.
    #[inline]
    pub fn head_indent(self, value: f32) -> Self {
        self.push(StylePart::HeadIndent(value))
    }

    /// Sets the tail indent.
    #[inline]
    pub fn tail_indent(self, value: f32) -> Self {
        self.push(StylePart::TailIndent(value))
    }

    /// Sets the line break mode.
    #[inline]
    pub fn line_break_mode(self, value: LineBreakMode) -> Self {
        self.push(StylePart::LineBreakMode(value))
    }

    /// Sets the minimum line height.
    #[inline]
    pub fn minimum_line_height(self, value: f32) -> Self {
        self.push(StylePart::MinimumLineHeight(value))
    }

    /// Sets the maximum line height.
    #[inline]
    pub fn maximum_line_height(self, value: f32) -> Self {
        self.push(StylePart::MaximumLineHeight(value))
    }

    /// Sets the line height multiple.
    #[inline]
    pub fn line_height_multiple(self, value: f32) -> Self {
        self.push(StylePart::LineHeightMultiple(value))
    }

    /// Sets the line spacing.
    #[inline]
    pub fn line_spacing(self, value: f32) -> Self {
        self.push(StylePart::LineSpacing(value))
    }

    /// Sets the base writing direction.
    #[inline]
    pub fn base_writing_direction(self, value: WritingDirection) -> Self {
        self.push(StylePart::BaseWritingDirection(value))
    }

    /// Sets the hyphenation factor.
    #[inline]
    pub fn hyphenation_factor(self, value: f32) -> Self {
        self.push(StylePart::HyphenationFactor(value))
    }

    /// Adds extra attributes.
    #[inline]
    pub fn extra_attributes(self, value: ExtraAttributes) -> Self {
        self.push(StylePart::ExtraAttributes(value))
    }
}

impl FromIterator<StylePart> for Style {
    fn from_iter<I: IntoIterator<Item = StylePart>>(iter: I) -> Self {
        Self::from_parts(iter)
    }
}

impl From<StylePart> for Style {
    fn from(part: StylePart) -> Self {
        Self { parts: alloc::vec![part] }
    }
}
