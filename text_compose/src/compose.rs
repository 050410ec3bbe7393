// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Range;

use attributed_text::AttributedText;
use log::trace;

use crate::attributes::Attributes;
use crate::error::{check_length, ComposeError};
use crate::fragment::{Fragment, Tab};
use crate::paragraph::{self, resolve_paragraph_fields, ParagraphAttributes, ParagraphFields};
use crate::special::{OBJECT_REPLACEMENT_CHARACTER, TAB};
use crate::style::Style;

/// Composes fragments into attributed text under a base style.
///
/// Each fragment is styled with the base style overridden by the fragment's own style.
/// Paragraph attributes start from the base style's paragraph object and are only cloned for
/// fragments that edit them.
///
/// ## Example
///
/// ```
/// use text_compose::{Composer, Fragment, Style, Styled};
///
/// let base = Style::new().first_line_head_indent(5.0);
/// let fragments = [
///     Fragment::text("red"),
///     "green".styled(Style::new().baseline_offset(2.0)),
///     Fragment::text("blue"),
/// ];
/// let text = Composer::new(base).separator(", ").compose(fragments).unwrap();
///
/// assert_eq!(text.as_str(), "red, green, blue");
/// assert_eq!(text.attributes_at(5).unwrap().baseline_offset(), Some(2.0));
/// assert_eq!(text.attributes_at(10).unwrap().baseline_offset(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Composer {
    base: Style,
    separator: Option<Arc<str>>,
}

impl Composer {
    /// Creates a composer for `base`.
    pub fn new(base: Style) -> Self {
        Self {
            base,
            separator: None,
        }
    }

    /// Inserts `separator` between consecutive fragments.
    ///
    /// Separators are styled with the base style only.
    pub fn separator(mut self, separator: impl Into<Arc<str>>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Returns the base style.
    pub fn base(&self) -> &Style {
        &self.base
    }

    /// Composes `fragments` in order.
    ///
    /// Fails if a tab fragment has a negative or non-finite width. An empty list composes to
    /// empty text that still reports the base attributes.
    pub fn compose<I>(&self, fragments: I) -> Result<ComposedText, ComposeError>
    where
        I: IntoIterator,
        I::Item: Into<Fragment>,
    {
        let base = Attributes::bake(&self.base);
        let mut text = AttributedText::new();
        for (ix, fragment) in fragments.into_iter().enumerate() {
            if ix > 0 {
                if let Some(separator) = &self.separator {
                    text.push(separator, base.clone());
                }
            }
            let fragment = fragment.into();
            let start = text.len();
            let mut attributes = self.bake_fragment(&base, fragment.style());
            match &fragment {
                Fragment::Text(content, _) => text.push(content, attributes),
                Fragment::Object(attachment, _) => {
                    attributes.attachment = Some(attachment.clone());
                    text.push(OBJECT_REPLACEMENT_CHARACTER.encode_utf8(&mut [0; 4]), attributes);
                }
                Fragment::Tab(tab, _) => {
                    match *tab {
                        Tab::Spacer(width) => {
                            check_length(width, ComposeError::InvalidSpacerWidth)?;
                        }
                        Tab::HeadIndent(indent) => {
                            check_length(indent, ComposeError::InvalidHeadIndent)?;
                        }
                    }
                    attributes.tab = Some(*tab);
                    text.push(TAB.encode_utf8(&mut [0; 4]), attributes);
                }
            }
            trace!("composed fragment {ix} into {start}..{}", text.len());
        }
        coalesce_runs(&mut text);
        Ok(ComposedText { text, base })
    }

    fn bake_fragment(&self, base: &Attributes, style: Option<&Style>) -> Attributes {
        let Some(style) = style else {
            return base.clone();
        };
        let effective = self.base.merged_with(style);
        let mut attributes = Attributes::bake_characters(&effective);
        let (paragraph, fields) = if style.extras().paragraph().is_some() {
            // The fragment's own paragraph object replaces the base's, under both styles' parts.
            let (paragraph, _) = resolve_paragraph_fields(None, &effective);
            (paragraph, ParagraphFields::ALL)
        } else {
            resolve_paragraph_fields(base.paragraph.as_ref(), style)
        };
        attributes.paragraph = paragraph;
        attributes.paragraph_fields = fields;
        attributes
    }
}

/// Composes `fragments` under `base` without a separator.
///
/// Shorthand for `Composer::new(base.clone()).compose(fragments)`.
pub fn compose<I>(base: &Style, fragments: I) -> Result<ComposedText, ComposeError>
where
    I: IntoIterator,
    I::Item: Into<Fragment>,
{
    Composer::new(base.clone()).compose(fragments)
}

/// Merges equal neighbouring runs, keeping object and tab characters in runs of their own.
pub(crate) fn coalesce_runs(text: &mut AttributedText<Attributes>) {
    text.coalesce_by(|a, b| a.attachment.is_none() && a.tab.is_none() && a == b);
}

/// The output of composition: text whose runs carry baked [`Attributes`].
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedText {
    pub(crate) text: AttributedText<Attributes>,
    pub(crate) base: Attributes,
}

impl ComposedText {
    /// Borrows the composed text.
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Returns the length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if nothing was composed.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Iterates over the attribute runs in text order.
    pub fn runs(&self) -> impl ExactSizeIterator<Item = (&Range<usize>, &Attributes)> + Clone {
        self.text.runs()
    }

    /// Returns the attributes at byte `index`.
    pub fn attributes_at(&self, index: usize) -> Option<&Attributes> {
        self.text.attributes_at(index)
    }

    /// Returns the paragraph attributes at byte `index`.
    pub fn paragraph_at(&self, index: usize) -> Option<&Arc<ParagraphAttributes>> {
        self.attributes_at(index)?.paragraph()
    }

    /// Returns the attributes baked from the base style.
    ///
    /// These apply to separators, and describe the text even when it is empty.
    pub fn base_attributes(&self) -> &Attributes {
        &self.base
    }

    /// Iterates over the byte ranges of the paragraphs, terminators included.
    pub fn paragraph_ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        paragraph::paragraph_ranges(self.text.as_str())
    }

    /// Gives every run of each paragraph the same paragraph attributes object.
    ///
    /// Within a paragraph, every field that some fragment's style set is merged into one object;
    /// where runs disagree, the later run wins.
    pub fn unify_paragraphs(&mut self) -> Result<(), ComposeError> {
        let ranges: Vec<_> = self.paragraph_ranges().collect();
        for range in ranges {
            if let Some(unified) = self.unified_paragraph(range.clone()) {
                self.set_paragraph(range, &unified)?;
            }
        }
        coalesce_runs(&mut self.text);
        Ok(())
    }

    /// Consumes this value, returning the underlying attributed text.
    pub fn into_attributed_text(self) -> AttributedText<Attributes> {
        self.text
    }

    pub(crate) fn unified_paragraph(
        &self,
        range: Range<usize>,
    ) -> Option<Arc<ParagraphAttributes>> {
        paragraph::unify(
            self.base.paragraph.as_ref(),
            self.text
                .runs_in(range)
                .map(|(_, attrs)| (attrs.paragraph.as_ref(), attrs.paragraph_fields)),
        )
    }

    /// Applies `paragraph` to every run in `range`.
    pub(crate) fn set_paragraph(
        &mut self,
        range: Range<usize>,
        paragraph: &Arc<ParagraphAttributes>,
    ) -> Result<(), ComposeError> {
        self.text.update_range(range, |attrs| {
            attrs.paragraph = Some(paragraph.clone());
            attrs.paragraph_fields = ParagraphFields::NONE;
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{compose, Composer};
    use crate::tests::{BLUE, RED};
    use crate::{Attachment, Fragment, Style, Styled, Tab};
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    #[test]
    fn fragments_without_style_share_base_attributes() {
        let base = Style::new().color(RED).head_indent(3.0);
        let text = compose(&base, ["ab", "cd"]).unwrap();
        assert_eq!(text.runs().len(), 1);
        let paragraph = text.paragraph_at(0).unwrap();
        assert!(Arc::ptr_eq(
            paragraph,
            text.base_attributes().paragraph().unwrap()
        ));
    }

    #[test]
    fn character_overrides_keep_the_base_paragraph_object() {
        let base = Style::new().color(RED).head_indent(3.0);
        let text = compose(&base, [Fragment::text("ab"), "cd".styled(Style::new().color(BLUE))])
            .unwrap();
        assert_eq!(text.attributes_at(0).unwrap().foreground(), Some(RED));
        assert_eq!(text.attributes_at(2).unwrap().foreground(), Some(BLUE));
        assert!(Arc::ptr_eq(
            text.paragraph_at(0).unwrap(),
            text.paragraph_at(2).unwrap()
        ));
    }

    #[test]
    fn objects_and_tabs_get_runs_of_their_own() {
        let text = compose(
            &Style::new(),
            [
                Fragment::object(Attachment::new(1)),
                Fragment::object(Attachment::new(1)),
                Tab::spacer(1.0).into(),
                Tab::spacer(1.0).into(),
            ],
        )
        .unwrap();
        assert_eq!(text.as_str(), "\u{FFFC}\u{FFFC}\t\t");
        assert_eq!(text.runs().len(), 4);
        let tabs: Vec<_> = text
            .runs()
            .filter_map(|(_, attrs)| attrs.tab())
            .collect();
        assert_eq!(tabs, [Tab::Spacer(1.0), Tab::Spacer(1.0)]);
    }

    #[test]
    fn empty_text_fragments_add_nothing() {
        let text = Composer::new(Style::new()).compose(["", "a", ""]).unwrap();
        assert_eq!(text.as_str(), "a");
        assert_eq!(text.runs().len(), 1);
    }

    #[test]
    fn separator_is_not_added_after_the_last_fragment() {
        let text = Composer::new(Style::new())
            .separator("\n")
            .compose(["a", "b"])
            .unwrap();
        assert_eq!(text.as_str(), "a\nb");
        let paragraphs: Vec<_> = text.paragraph_ranges().collect();
        assert_eq!(paragraphs, [0..2, 2..3]);
    }
}
