// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partial style specifications.
//!
//! This module defines:
//! - A closed set of style parts ([`StylePart`]), each of which is either explicitly set or absent
//! - [`Style`], an ordered list of parts with override-wins merge semantics
//! - [`ExtraAttributes`], a key-wise merged bag for attributes outside the closed set
//!
//! Styles are baked into concrete [`Attributes`](crate::Attributes).

mod extra;
mod part;
mod values;

pub use extra::{AttributeKey, AttributeValue, ExtraAttributes};
pub use part::{Style, StylePart, StylePartKind};
pub use values::{
    Color, Font, Ligatures, LineBreakMode, Link, TextAlignment, Tracking, WritingDirection,
};

#[cfg(test)]
mod tests {
    use super::{ExtraAttributes, Style, StylePart, StylePartKind, TextAlignment};
    use crate::tests::full_style;
    use crate::{AttributeKey, AttributeValue};

    #[test]
    fn later_parts_of_the_same_kind_win() {
        let style = Style::new().line_spacing(1.0).color(crate::tests::RED).line_spacing(2.0);
        assert_eq!(
            style.get(StylePartKind::LineSpacing),
            Some(&StylePart::LineSpacing(2.0))
        );
        let folded = style.folded();
        assert_eq!(folded.parts().len(), 2);
        assert_eq!(folded.folded(), folded);
    }

    #[test]
    fn merge_takes_override_only_where_set() {
        let base = full_style();
        let over = Style::new()
            .alignment(TextAlignment::Center)
            .head_indent(42.0);
        let merged = base.merged_with(&over);
        for kind in StylePartKind::ALL {
            if kind == StylePartKind::ExtraAttributes {
                continue;
            }
            let expected = over.get(kind).or_else(|| base.get(kind));
            assert_eq!(merged.get(kind), expected, "mismatch for {kind:?}");
        }
    }

    #[test]
    fn merge_onto_empty_and_with_empty_is_identity() {
        let style = full_style().folded();
        assert_eq!(Style::new().merged_with(&style), style);
        assert_eq!(style.merged_with(&Style::new()), style);
    }

    #[test]
    fn extra_attributes_merge_key_wise() {
        let base = Style::new().extra_attributes(
            ExtraAttributes::new()
                .with(AttributeKey::custom("keep"), "base")
                .with(AttributeKey::custom("shared"), "base"),
        );
        let over = Style::new()
            .extra_attributes(ExtraAttributes::new().with(AttributeKey::custom("shared"), "over"));
        let extras = base.merged_with(&over).extras();
        assert_eq!(extras.len(), 2);
        assert_eq!(
            extras.get(&AttributeKey::custom("keep")),
            Some(&AttributeValue::from("base"))
        );
        assert_eq!(
            extras.get(&AttributeKey::custom("shared")),
            Some(&AttributeValue::from("over"))
        );
    }

    #[test]
    fn paragraph_parts_are_detected() {
        assert!(!Style::new().color(crate::tests::RED).has_paragraph_parts());
        assert!(Style::new().hyphenation_factor(0.5).has_paragraph_parts());
        let via_extras = Style::new().extra_attributes(
            ExtraAttributes::new().with(AttributeKey::Paragraph, crate::ParagraphAttributes::default()),
        );
        assert!(via_extras.has_paragraph_parts());
    }
}
