// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph-scoped attributes.
//!
//! Paragraph attributes are shared through [`Arc`]. Resolution never writes through a shared
//! object: applying a style with paragraph parts produces a fresh object, while a style without
//! them hands back the very same `Arc`, so runs that were never edited keep pointing at the
//! base object.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Range;

use log::debug;
use smallvec::SmallVec;

use crate::special::{CARRIAGE_RETURN, LINE_FEED, PARAGRAPH_SEPARATOR};
use crate::style::{
    LineBreakMode, Style, StylePart, StylePartKind, TextAlignment, WritingDirection,
};

/// A resolved tab stop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TabStop {
    /// Distance from the leading edge of the paragraph, in points.
    pub location: f32,
    /// How text following the tab aligns to the stop.
    pub alignment: TextAlignment,
}

impl TabStop {
    /// Creates a natural-aligned tab stop at `location`.
    pub fn new(location: f32) -> Self {
        Self {
            location,
            alignment: TextAlignment::Natural,
        }
    }
}

/// The attributes that apply to a whole paragraph.
///
/// Lengths are in points. A zero line height bound, multiple, or hyphenation factor means
/// "unconstrained", matching the defaults of platform text systems.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphAttributes {
    /// Horizontal alignment of lines.
    pub alignment: TextAlignment,
    /// Indent of the first line.
    pub first_line_head_indent: f32,
    /// Indent of the lines after the first.
    pub head_indent: f32,
    /// Trailing indent.
    pub tail_indent: f32,
    /// Line breaking and truncation.
    pub line_break_mode: LineBreakMode,
    /// Minimum line height.
    pub minimum_line_height: f32,
    /// Maximum line height.
    pub maximum_line_height: f32,
    /// Line height as a multiple of the natural line height.
    pub line_height_multiple: f32,
    /// Space between lines.
    pub line_spacing: f32,
    /// Space before the paragraph.
    pub paragraph_spacing_before: f32,
    /// Space after the paragraph.
    pub paragraph_spacing_after: f32,
    /// Base writing direction.
    pub base_writing_direction: WritingDirection,
    /// Hyphenation threshold.
    pub hyphenation_factor: f32,
    /// Tab stops, in increasing location order.
    pub tab_stops: SmallVec<[TabStop; 4]>,
}

impl ParagraphAttributes {
    /// Applies a style part, returning `false` if the part is not paragraph-scoped.
    pub fn apply(&mut self, part: &StylePart) -> bool {
        match *part {
            StylePart::ParagraphSpacingBefore(v) => self.paragraph_spacing_before = v,
            StylePart::ParagraphSpacingAfter(v) => self.paragraph_spacing_after = v,
            StylePart::Alignment(v) => self.alignment = v,
            StylePart::FirstLineHeadIndent(v) => self.first_line_head_indent = v,
            StylePart::HeadIndent(v) => self.head_indent = v,
            StylePart::TailIndent(v) => self.tail_indent = v,
            StylePart::LineBreakMode(v) => self.line_break_mode = v,
            StylePart::MinimumLineHeight(v) => self.minimum_line_height = v,
            StylePart::MaximumLineHeight(v) => self.maximum_line_height = v,
            StylePart::LineHeightMultiple(v) => self.line_height_multiple = v,
            StylePart::LineSpacing(v) => self.line_spacing = v,
            StylePart::BaseWritingDirection(v) => self.base_writing_direction = v,
            StylePart::HyphenationFactor(v) => self.hyphenation_factor = v,
            _ => return false,
        }
        true
    }

    /// Copies the fields named by `fields` from `source`.
    fn overlay_fields(&mut self, source: &Self, fields: ParagraphFields) {
        macro_rules! overlay {
            ($($kind:ident => $field:ident),* $(,)?) => {
                $(
                    if fields.contains(StylePartKind::$kind) {
                        self.$field = source.$field;
                    }
                )*
            };
        }
        overlay!(
            Alignment => alignment,
            FirstLineHeadIndent => first_line_head_indent,
            HeadIndent => head_indent,
            TailIndent => tail_indent,
            LineBreakMode => line_break_mode,
            MinimumLineHeight => minimum_line_height,
            MaximumLineHeight => maximum_line_height,
            LineHeightMultiple => line_height_multiple,
            LineSpacing => line_spacing,
            ParagraphSpacingBefore => paragraph_spacing_before,
            ParagraphSpacingAfter => paragraph_spacing_after,
            BaseWritingDirection => base_writing_direction,
            HyphenationFactor => hyphenation_factor,
        );
        if fields.has_tab_stops() {
            self.tab_stops = source.tab_stops.clone();
        }
    }

    /// Copies every field in which `edited` differs from `reference`.
    fn overlay_changes(&mut self, reference: &Self, edited: &Self) {
        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(
                    if edited.$field != reference.$field {
                        self.$field = edited.$field.clone();
                    }
                )*
            };
        }
        overlay!(
            alignment,
            first_line_head_indent,
            head_indent,
            tail_indent,
            line_break_mode,
            minimum_line_height,
            maximum_line_height,
            line_height_multiple,
            line_spacing,
            paragraph_spacing_before,
            paragraph_spacing_after,
            base_writing_direction,
            hyphenation_factor,
            tab_stops,
        );
    }
}

/// The set of paragraph fields a style explicitly set on a run.
///
/// Bits are indexed by [`StylePartKind`]; tab stops, which no typed part sets, use the top bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ParagraphFields(u32);

impl ParagraphFields {
    pub(crate) const NONE: Self = Self(0);
    /// Every field, for runs whose paragraph object was replaced wholesale.
    pub(crate) const ALL: Self = Self(u32::MAX);

    const TAB_STOPS: u32 = 1 << 31;

    fn insert(&mut self, kind: StylePartKind) {
        self.0 |= 1 << kind as u32;
    }

    fn contains(self, kind: StylePartKind) -> bool {
        self.0 & (1 << kind as u32) != 0
    }

    fn has_tab_stops(self) -> bool {
        self.0 & Self::TAB_STOPS != 0
    }

    pub(crate) fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Resolves the paragraph attributes for a range styled with `style`, inheriting `current`.
///
/// If `style` sets no paragraph part, `current` is returned as is (the same `Arc`, or `None`).
/// Otherwise the result is a new object: `current` (or the paragraph object carried in the
/// style's extra attributes, which takes its place) with each paragraph part applied. `current`
/// itself is never modified.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use text_compose::{resolve_paragraph, ParagraphAttributes, Style};
///
/// let base = Arc::new(ParagraphAttributes {
///     first_line_head_indent: 5.0,
///     ..ParagraphAttributes::default()
/// });
///
/// let untouched = resolve_paragraph(Some(&base), &Style::new().baseline_offset(2.0)).unwrap();
/// assert!(Arc::ptr_eq(&untouched, &base));
///
/// let indented = resolve_paragraph(Some(&base), &Style::new().head_indent(10.0)).unwrap();
/// assert_eq!(indented.head_indent, 10.0);
/// assert_eq!(indented.first_line_head_indent, 5.0);
/// assert_eq!(base.head_indent, 0.0);
/// ```
pub fn resolve_paragraph(
    current: Option<&Arc<ParagraphAttributes>>,
    style: &Style,
) -> Option<Arc<ParagraphAttributes>> {
    resolve_paragraph_fields(current, style).0
}

/// Like [`resolve_paragraph`], also reporting which fields `style` set.
pub(crate) fn resolve_paragraph_fields(
    current: Option<&Arc<ParagraphAttributes>>,
    style: &Style,
) -> (Option<Arc<ParagraphAttributes>>, ParagraphFields) {
    if !style.has_paragraph_parts() {
        return (current.cloned(), ParagraphFields::NONE);
    }
    let extras = style.extras();
    let mut fields = ParagraphFields::NONE;
    let seed = match extras.paragraph() {
        Some(paragraph) => {
            fields = ParagraphFields::ALL;
            Some(paragraph)
        }
        None => {
            if extras.has_paragraph() {
                debug!("ignoring paragraph extra attribute that holds no paragraph object");
            }
            current
        }
    };
    let mut paragraph = seed.cloned().unwrap_or_default();
    let folded = style.folded();
    let mut edits = folded
        .parts()
        .iter()
        .filter(|part| part.kind().is_paragraph())
        .peekable();
    if edits.peek().is_some() {
        let target = Arc::make_mut(&mut paragraph);
        for part in edits {
            if target.apply(part) {
                fields.insert(part.kind());
            }
        }
    }
    (Some(paragraph), fields)
}

/// Merges the paragraph objects used across one physical paragraph into a single object.
///
/// Each member pairs a run's paragraph object with the fields that run set. If every member
/// shares the first object it is accepted as is. Otherwise the result starts from `base` and
/// takes each member's set fields in order, so later members win on conflict. A member that set
/// nothing yet carries an object of its own contributes the fields in which it differs from
/// `base`. Members without a paragraph object inherit the result. Returns `None` when no member
/// has a paragraph object.
pub(crate) fn unify<'a>(
    base: Option<&Arc<ParagraphAttributes>>,
    members: impl IntoIterator<Item = (Option<&'a Arc<ParagraphAttributes>>, ParagraphFields)>,
) -> Option<Arc<ParagraphAttributes>> {
    let members: Vec<_> = members
        .into_iter()
        .filter_map(|(paragraph, fields)| Some((paragraph?, fields)))
        .collect();
    let &(first, _) = members.first()?;
    if members
        .iter()
        .all(|&(member, _)| Arc::ptr_eq(member, first) || member == first)
    {
        return Some(first.clone());
    }
    let default = ParagraphAttributes::default();
    let reference = base.map_or(&default, |b| &**b);
    let mut merged = reference.clone();
    for &(member, fields) in &members {
        if fields.is_empty() {
            merged.overlay_changes(reference, member);
        } else {
            merged.overlay_fields(member, fields);
        }
    }
    debug!("merged differing paragraph attributes within one paragraph");
    Some(Arc::new(merged))
}

/// Splits `text` into paragraph ranges.
///
/// Each range includes its terminator (`\n`, `\r`, `\r\n`, or U+2029). A trailing
/// unterminated paragraph is included; empty text has no paragraphs.
pub(crate) fn paragraph_ranges(text: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    core::iter::from_fn(move || {
        if start >= text.len() {
            return None;
        }
        while let Some((ix, c)) = chars.next() {
            let end = match c {
                CARRIAGE_RETURN => match chars.peek() {
                    Some(&(next, LINE_FEED)) => {
                        chars.next();
                        next + 1
                    }
                    _ => ix + 1,
                },
                LINE_FEED => ix + 1,
                PARAGRAPH_SEPARATOR => ix + c.len_utf8(),
                _ => continue,
            };
            let range = start..end;
            start = end;
            return Some(range);
        }
        let range = start..text.len();
        start = text.len();
        Some(range)
    })
}

#[cfg(test)]
mod tests {
    use super::{
        paragraph_ranges, resolve_paragraph, resolve_paragraph_fields, unify, ParagraphAttributes,
        ParagraphFields, TabStop,
    };
    use crate::{AttributeKey, ExtraAttributes, Style, TextAlignment};
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn no_paragraph_parts_keeps_identity() {
        let base = Arc::new(ParagraphAttributes::default());
        let resolved = resolve_paragraph(Some(&base), &Style::new().baseline_offset(1.0));
        assert!(Arc::ptr_eq(&resolved.unwrap(), &base));
        assert!(resolve_paragraph(None, &Style::new()).is_none());
    }

    #[test]
    fn paragraph_parts_clone_instead_of_mutating() {
        let base = Arc::new(ParagraphAttributes {
            line_spacing: 3.0,
            ..ParagraphAttributes::default()
        });
        let resolved = resolve_paragraph(Some(&base), &Style::new().tail_indent(-4.0)).unwrap();
        assert!(!Arc::ptr_eq(&resolved, &base));
        assert_eq!(resolved.tail_indent, -4.0);
        assert_eq!(resolved.line_spacing, 3.0);
        assert_eq!(*base, ParagraphAttributes {
            line_spacing: 3.0,
            ..ParagraphAttributes::default()
        });
    }

    #[test]
    fn paragraph_parts_without_current_start_from_defaults() {
        let resolved = resolve_paragraph(None, &Style::new().alignment(TextAlignment::Center));
        let resolved = resolved.unwrap();
        assert_eq!(resolved.alignment, TextAlignment::Center);
        assert_eq!(resolved.head_indent, 0.0);
    }

    #[test]
    fn extra_paragraph_object_seeds_resolution() {
        let seed = ParagraphAttributes {
            paragraph_spacing_after: 7.0,
            ..ParagraphAttributes::default()
        };
        let style = Style::new()
            .extra_attributes(ExtraAttributes::new().with(AttributeKey::Paragraph, seed))
            .head_indent(2.0);
        let current = Arc::new(ParagraphAttributes {
            line_spacing: 9.0,
            ..ParagraphAttributes::default()
        });
        let resolved = resolve_paragraph(Some(&current), &style).unwrap();
        assert_eq!(resolved.paragraph_spacing_after, 7.0);
        assert_eq!(resolved.head_indent, 2.0);
        assert_eq!(resolved.line_spacing, 0.0);
        assert_eq!(current.head_indent, 0.0);
    }

    #[test]
    fn unify_keeps_a_single_shared_object() {
        let shared = Arc::new(ParagraphAttributes::default());
        let none = ParagraphFields::NONE;
        let unified = unify(None, [(Some(&shared), none), (None, none), (Some(&shared), none)]);
        assert!(Arc::ptr_eq(&unified.unwrap(), &shared));
        assert!(unify(None, [(None, none), (None, none)]).is_none());
    }

    #[test]
    fn unify_merges_non_conflicting_edits() {
        let base = Arc::new(ParagraphAttributes {
            first_line_head_indent: 5.0,
            ..ParagraphAttributes::default()
        });
        let (spaced, spaced_fields) =
            resolve_paragraph_fields(Some(&base), &Style::new().line_spacing(1.8));
        let (indented, indented_fields) =
            resolve_paragraph_fields(Some(&base), &Style::new().head_indent(10.0));
        let unified = unify(
            Some(&base),
            [
                (spaced.as_ref(), spaced_fields),
                (Some(&base), ParagraphFields::NONE),
                (indented.as_ref(), indented_fields),
            ],
        )
        .unwrap();
        assert_eq!(unified.first_line_head_indent, 5.0);
        assert_eq!(unified.line_spacing, 1.8);
        assert_eq!(unified.head_indent, 10.0);
        assert_eq!(base.line_spacing, 0.0);
    }

    #[test]
    fn unify_lets_later_members_win_conflicts() {
        let a = Arc::new(ParagraphAttributes {
            head_indent: 1.0,
            tab_stops: [TabStop::new(4.0)].into_iter().collect(),
            ..ParagraphAttributes::default()
        });
        let b = Arc::new(ParagraphAttributes {
            head_indent: 2.0,
            ..ParagraphAttributes::default()
        });
        let none = ParagraphFields::NONE;
        let unified = unify(None, [(Some(&a), none), (Some(&b), none)]).unwrap();
        assert_eq!(unified.head_indent, 2.0);
        assert_eq!(unified.tab_stops.as_slice(), &[TabStop::new(4.0)]);
    }

    #[test]
    fn unify_honors_edits_that_restore_the_base_value() {
        let base = Arc::new(ParagraphAttributes {
            head_indent: 5.0,
            ..ParagraphAttributes::default()
        });
        let (widened, widened_fields) =
            resolve_paragraph_fields(Some(&base), &Style::new().head_indent(10.0));
        let (restored, restored_fields) =
            resolve_paragraph_fields(Some(&base), &Style::new().head_indent(5.0));
        assert!(!restored_fields.is_empty());
        let unified = unify(
            Some(&base),
            [
                (widened.as_ref(), widened_fields),
                (restored.as_ref(), restored_fields),
            ],
        )
        .unwrap();
        assert_eq!(unified.head_indent, 5.0);
    }

    #[test]
    fn extra_paragraph_object_counts_as_setting_every_field() {
        let style = Style::new().extra_attributes(
            ExtraAttributes::new().with(AttributeKey::Paragraph, ParagraphAttributes::default()),
        );
        let (_, fields) = resolve_paragraph_fields(None, &style);
        assert_eq!(fields, ParagraphFields::ALL);
        let (_, fields) = resolve_paragraph_fields(None, &Style::new().baseline_offset(1.0));
        assert!(fields.is_empty());
    }

    #[test]
    fn paragraphs_include_their_terminator() {
        let text = "ab\ncd\r\nef\rg\u{2029}h";
        let ranges: Vec<_> = paragraph_ranges(text).map(|r| &text[r]).collect();
        assert_eq!(ranges, vec!["ab\n", "cd\r\n", "ef\r", "g\u{2029}", "h"]);
        assert_eq!(paragraph_ranges("").count(), 0);
        assert_eq!(paragraph_ranges("\n\n").count(), 2);
    }
}
