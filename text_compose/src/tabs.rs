// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of tab fragments into paragraph tab stops and indents.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Range;

use log::{trace, warn};

use crate::attributes::Attributes;
use crate::compose::{coalesce_runs, ComposedText};
use crate::error::{check_length, ComposeError};
use crate::fragment::{Attachment, Tab};
use crate::paragraph::{ParagraphAttributes, ParagraphFields, TabStop};
use crate::special::is_paragraph_terminator;

/// A span of composed content handed to a [`MeasureWidth`] implementation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Content<'a> {
    /// A run of text sharing one set of attributes, without paragraph terminators.
    Text(&'a str),
    /// A single embedded object.
    Object(&'a Attachment),
}

/// Measures the rendered width of composed content.
///
/// Implementations should be deterministic for a given span and attributes. Returning `None`
/// means the width is unknown; the resolver then substitutes its fallback width.
///
/// Any `FnMut(Content<'_>, &Attributes) -> Option<f32>` closure is a `MeasureWidth`.
pub trait MeasureWidth {
    /// Returns the width of `content` when rendered with `attributes`, in points.
    fn measure(&mut self, content: Content<'_>, attributes: &Attributes) -> Option<f32>;
}

impl<F> MeasureWidth for F
where
    F: FnMut(Content<'_>, &Attributes) -> Option<f32>,
{
    fn measure(&mut self, content: Content<'_>, attributes: &Attributes) -> Option<f32> {
        self(content, attributes)
    }
}

/// Turns the tab characters of [`ComposedText`] into paragraph attributes.
///
/// Each paragraph is processed in two passes. The first measures the content between
/// consecutive tabs. The second walks the tabs left to right with a pen position:
///
/// - [`Tab::Spacer`] advances the pen by the preceding content plus its width, and adds a tab
///   stop at the pen, keeping the paragraph's stops in increasing order.
/// - [`Tab::HeadIndent`] sets the paragraph's head indent and moves the pen to the indent if it
///   is further along, so later stops start from there.
///
/// All runs of a paragraph end up sharing one paragraph attributes object. Tab characters stay
/// in the text but lose their tab marker.
///
/// ## Example
///
/// ```
/// use text_compose::{compose, Attributes, Content, Fragment, Style, Tab, TabResolver};
///
/// let mut text = compose(
///     &Style::new(),
///     [Fragment::text("Name"), Tab::spacer(10.0).into(), Fragment::text("Value")],
/// )
/// .unwrap();
///
/// let mut advance = |content: Content<'_>, _: &Attributes| match content {
///     Content::Text(s) => Some(6.0 * s.chars().count() as f32),
///     Content::Object(object) => object.width,
/// };
/// TabResolver::new().resolve(&mut text, &mut advance).unwrap();
///
/// let paragraph = text.paragraph_at(0).unwrap();
/// assert_eq!(paragraph.tab_stops[0].location, 34.0);
/// assert_eq!(text.as_str(), "Name\tValue");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TabResolver {
    fallback_width: f32,
}

impl TabResolver {
    /// Creates a resolver that treats unmeasurable content as zero width.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the width used for content that cannot be measured.
    pub fn with_fallback_width(mut self, width: f32) -> Result<Self, ComposeError> {
        self.fallback_width = check_length(width, ComposeError::InvalidFallbackWidth)?;
        Ok(self)
    }

    /// Returns the width used for content that cannot be measured.
    pub fn fallback_width(self) -> f32 {
        self.fallback_width
    }

    /// Resolves every tab in `text`, measuring content with `measure`.
    ///
    /// Unmeasurable content never fails resolution. Text without tabs only has its paragraph
    /// attributes unified.
    pub fn resolve<M>(self, text: &mut ComposedText, measure: &mut M) -> Result<(), ComposeError>
    where
        M: MeasureWidth + ?Sized,
    {
        let ranges: Vec<_> = text.paragraph_ranges().collect();
        for range in ranges {
            let unified = text.unified_paragraph(range.clone());
            let tabs = self.measure_tabs(text, range.clone(), measure);
            let paragraph = if tabs.is_empty() {
                unified
            } else {
                Some(place_tabs(unified, &tabs))
            };
            text.text.update_range(range, |attrs| {
                if let Some(paragraph) = &paragraph {
                    attrs.paragraph = Some(paragraph.clone());
                }
                attrs.paragraph_fields = ParagraphFields::NONE;
                attrs.tab = None;
            })?;
        }
        coalesce_runs(&mut text.text);
        Ok(())
    }

    /// Collects each tab of the paragraph at `range` with the width of the content since the
    /// previous tab or the paragraph start.
    fn measure_tabs<M>(
        self,
        text: &ComposedText,
        range: Range<usize>,
        measure: &mut M,
    ) -> Vec<(Tab, f32)>
    where
        M: MeasureWidth + ?Sized,
    {
        let runs: Vec<_> = text.text.runs_in(range).collect();
        // Content after the last tab has no effect on any stop.
        let Some(last_tab) = runs.iter().rposition(|(_, attrs)| attrs.tab.is_some()) else {
            return Vec::new();
        };
        let mut tabs = Vec::new();
        let mut pending = 0.0;
        for (run, attrs) in &runs[..=last_tab] {
            if let Some(tab) = attrs.tab {
                tabs.push((tab, pending));
                pending = 0.0;
                continue;
            }
            if let Some(attachment) = &attrs.attachment {
                for _ in text.as_str()[run.clone()].chars() {
                    pending += self.width_of(Content::Object(attachment), attrs, measure);
                }
                continue;
            }
            let content = text.as_str()[run.clone()].trim_end_matches(is_paragraph_terminator);
            if !content.is_empty() {
                pending += self.width_of(Content::Text(content), attrs, measure);
            }
        }
        tabs
    }

    fn width_of<M>(self, content: Content<'_>, attributes: &Attributes, measure: &mut M) -> f32
    where
        M: MeasureWidth + ?Sized,
    {
        match measure.measure(content, attributes) {
            Some(width) if width.is_finite() && width >= 0.0 => {
                trace!("measured {content:?} as {width}");
                width
            }
            width => {
                warn!(
                    "cannot measure {content:?} (got {width:?}); using fallback width {}",
                    self.fallback_width
                );
                self.fallback_width
            }
        }
    }
}

/// Applies measured tabs to the paragraph attributes, in order.
fn place_tabs(
    paragraph: Option<Arc<ParagraphAttributes>>,
    tabs: &[(Tab, f32)],
) -> Arc<ParagraphAttributes> {
    let mut paragraph = paragraph.unwrap_or_default();
    let target = Arc::make_mut(&mut paragraph);
    let mut pen = 0.0_f32;
    for &(tab, preceding) in tabs {
        pen += preceding;
        match tab {
            Tab::Spacer(width) => {
                pen += width;
                let at = target.tab_stops.partition_point(|stop| stop.location <= pen);
                target.tab_stops.insert(at, TabStop::new(pen));
            }
            Tab::HeadIndent(indent) => {
                target.head_indent = indent;
                pen = pen.max(indent);
            }
        }
    }
    paragraph
}

impl ComposedText {
    /// Resolves tabs with a default [`TabResolver`].
    pub fn resolve_tabs<M>(&mut self, measure: &mut M) -> Result<(), ComposeError>
    where
        M: MeasureWidth + ?Sized,
    {
        TabResolver::new().resolve(self, measure)
    }
}

#[cfg(test)]
mod tests {
    use super::{place_tabs, TabResolver};
    use crate::{ComposeError, ParagraphAttributes, Tab, TabStop};
    use alloc::sync::Arc;

    #[test]
    fn fallback_width_is_validated() {
        assert_eq!(TabResolver::new().fallback_width(), 0.0);
        assert_eq!(
            TabResolver::new().with_fallback_width(12.0).map(|r| r.fallback_width()),
            Ok(12.0)
        );
        assert_eq!(
            TabResolver::new().with_fallback_width(-1.0),
            Err(ComposeError::InvalidFallbackWidth(-1.0))
        );
    }

    #[test]
    fn spacers_after_head_indent_start_at_the_indent() {
        let placed = place_tabs(
            None,
            &[
                (Tab::HeadIndent(30.0), 12.0),
                (Tab::Spacer(5.0), 4.0),
                (Tab::Spacer(5.0), 0.0),
            ],
        );
        assert_eq!(placed.head_indent, 30.0);
        assert_eq!(
            placed.tab_stops.as_slice(),
            &[TabStop::new(39.0), TabStop::new(44.0)]
        );
    }

    #[test]
    fn spacer_stops_are_inserted_among_existing_stops() {
        let seeded = Arc::new(ParagraphAttributes {
            tab_stops: [TabStop::new(2.0), TabStop::new(100.0)].into_iter().collect(),
            ..ParagraphAttributes::default()
        });
        let placed = place_tabs(
            Some(seeded),
            &[(Tab::Spacer(4.0), 1.0), (Tab::Spacer(200.0), 0.0)],
        );
        assert_eq!(
            placed.tab_stops.as_slice(),
            &[
                TabStop::new(2.0),
                TabStop::new(5.0),
                TabStop::new(100.0),
                TabStop::new(205.0)
            ]
        );
    }

    #[test]
    fn placing_tabs_never_writes_through_a_shared_object() {
        let shared = Arc::new(ParagraphAttributes::default());
        let placed = place_tabs(Some(shared.clone()), &[(Tab::Spacer(1.0), 0.0)]);
        assert!(!Arc::ptr_eq(&placed, &shared));
        assert!(shared.tab_stops.is_empty());
        assert_eq!(placed.tab_stops.len(), 1);
    }
}
