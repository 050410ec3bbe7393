// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concrete attributes baked from a [`Style`].

use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;
use log::debug;

use crate::fragment::{Attachment, Tab};
use crate::paragraph::{resolve_paragraph, ParagraphAttributes, ParagraphFields};
use crate::style::{AttributeKey, AttributeValue, Color, Font, Ligatures, Link, Style, StylePart};

/// The attributes applying to one run of composed text.
///
/// Every character attribute occupies its own slot. Paragraph attributes are folded into one
/// shared [`ParagraphAttributes`] object, which is absent when nothing paragraph-scoped was ever
/// specified.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    pub(crate) foreground: Option<Color>,
    pub(crate) background: Option<Color>,
    pub(crate) font: Option<Font>,
    pub(crate) baseline_offset: Option<f32>,
    pub(crate) kern: Option<f32>,
    pub(crate) link: Option<Link>,
    pub(crate) ligatures: Option<Ligatures>,
    pub(crate) paragraph: Option<Arc<ParagraphAttributes>>,
    /// Paragraph fields this run set on top of the base, until the paragraph is unified.
    pub(crate) paragraph_fields: ParagraphFields,
    pub(crate) attachment: Option<Attachment>,
    pub(crate) tab: Option<Tab>,
    pub(crate) extra: HashMap<AttributeKey, AttributeValue>,
}

impl Attributes {
    /// Bakes `style` into concrete attributes.
    ///
    /// Extra attributes are applied first, then typed parts override them. A style with no parts
    /// bakes to empty attributes.
    ///
    /// ## Example
    ///
    /// ```
    /// use text_compose::{Attributes, Style};
    ///
    /// assert!(Attributes::bake(&Style::new()).is_empty());
    ///
    /// let baked = Attributes::bake(&Style::new().baseline_offset(3.0).head_indent(4.0));
    /// assert_eq!(baked.baseline_offset(), Some(3.0));
    /// assert_eq!(baked.paragraph().map(|p| p.head_indent), Some(4.0));
    /// ```
    pub fn bake(style: &Style) -> Self {
        let mut attributes = Self::bake_characters(style);
        attributes.paragraph = resolve_paragraph(None, style);
        attributes
    }

    /// Bakes only the character attributes of `style`, leaving the paragraph slot empty.
    pub(crate) fn bake_characters(style: &Style) -> Self {
        let mut attributes = Self::default();
        let folded = style.folded();
        for (key, value) in style.extras().iter() {
            attributes.set_extra(key, value);
        }
        let mut tracking = None;
        for part in folded.parts() {
            match part {
                StylePart::Color(color) => attributes.foreground = Some(*color),
                StylePart::BackgroundColor(color) => attributes.background = Some(*color),
                StylePart::Font(font) => attributes.font = Some(font.clone()),
                StylePart::BaselineOffset(offset) => attributes.baseline_offset = Some(*offset),
                StylePart::Tracking(t) => tracking = Some(*t),
                StylePart::Link(link) => attributes.link = Some(link.clone()),
                StylePart::Ligatures(ligatures) => attributes.ligatures = Some(*ligatures),
                _ => {}
            }
        }
        // Adobe tracking scales with whichever font won, typed or extra.
        if let Some(tracking) = tracking {
            match tracking.kern(attributes.font.as_ref().map(|font| font.size)) {
                Some(kern) => attributes.kern = Some(kern),
                None => debug!("tracking {tracking:?} needs a font size; no kern applied"),
            }
        }
        attributes
    }

    /// Routes one extra attribute into its typed slot, or keeps it in the bag.
    fn set_extra(&mut self, key: &AttributeKey, value: &AttributeValue) {
        match (key, value) {
            (AttributeKey::Foreground, AttributeValue::Color(c)) => self.foreground = Some(*c),
            (AttributeKey::Background, AttributeValue::Color(c)) => self.background = Some(*c),
            (AttributeKey::Font, AttributeValue::Font(f)) => self.font = Some(f.clone()),
            (AttributeKey::BaselineOffset, AttributeValue::Number(n)) => {
                self.baseline_offset = Some(*n);
            }
            (AttributeKey::Kern, AttributeValue::Number(n)) => self.kern = Some(*n),
            (AttributeKey::Link, AttributeValue::Link(l)) => self.link = Some(l.clone()),
            (AttributeKey::Ligature, AttributeValue::Ligatures(l)) => self.ligatures = Some(*l),
            (AttributeKey::Attachment, AttributeValue::Attachment(a)) => {
                self.attachment = Some(a.clone());
            }
            // Paragraph objects are resolved separately.
            (AttributeKey::Paragraph, AttributeValue::Paragraph(_)) => {}
            (AttributeKey::Custom(_), _) => {
                self.extra.insert(key.clone(), value.clone());
            }
            _ => {
                debug!("keeping {key:?} with unexpected value {value:?} as an extra attribute");
                self.extra.insert(key.clone(), value.clone());
            }
        }
    }

    /// Returns `true` if no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns the text color.
    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    /// Returns the background color.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Returns the font.
    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    /// Returns the baseline offset.
    pub fn baseline_offset(&self) -> Option<f32> {
        self.baseline_offset
    }

    /// Returns the kern resolved from tracking.
    pub fn kern(&self) -> Option<f32> {
        self.kern
    }

    /// Returns the link target.
    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    /// Returns the ligature usage.
    pub fn ligatures(&self) -> Option<Ligatures> {
        self.ligatures
    }

    /// Returns the paragraph attributes object.
    pub fn paragraph(&self) -> Option<&Arc<ParagraphAttributes>> {
        self.paragraph.as_ref()
    }

    /// Returns the embedded object, for object replacement characters.
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Returns the unresolved tab marker, for tab characters that have not been laid out yet.
    pub fn tab(&self) -> Option<Tab> {
        self.tab
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &AttributeKey) -> Option<AttributeValue> {
        let typed = match key {
            AttributeKey::Foreground => self.foreground.map(AttributeValue::Color),
            AttributeKey::Background => self.background.map(AttributeValue::Color),
            AttributeKey::Font => self.font.clone().map(AttributeValue::Font),
            AttributeKey::BaselineOffset => self.baseline_offset.map(AttributeValue::Number),
            AttributeKey::Kern => self.kern.map(AttributeValue::Number),
            AttributeKey::Link => self.link.clone().map(AttributeValue::Link),
            AttributeKey::Ligature => self.ligatures.map(AttributeValue::Ligatures),
            AttributeKey::Paragraph => self.paragraph.clone().map(AttributeValue::Paragraph),
            AttributeKey::Attachment => self.attachment.clone().map(AttributeValue::Attachment),
            AttributeKey::Custom(_) => None,
        };
        typed.or_else(|| self.extra.get(key).cloned())
    }

    /// Returns every attribute as a key/value pair, typed slots first.
    pub fn to_pairs(&self) -> Vec<(AttributeKey, AttributeValue)> {
        const TYPED: [AttributeKey; 9] = [
            AttributeKey::Foreground,
            AttributeKey::Background,
            AttributeKey::Font,
            AttributeKey::BaselineOffset,
            AttributeKey::Kern,
            AttributeKey::Link,
            AttributeKey::Ligature,
            AttributeKey::Paragraph,
            AttributeKey::Attachment,
        ];
        let mut pairs: Vec<_> = TYPED
            .iter()
            .filter_map(|key| self.get(key).map(|value| (key.clone(), value)))
            .collect();
        pairs.extend(
            self.extra
                .iter()
                .filter(|(key, _)| !TYPED.contains(key))
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::Attributes;
    use crate::tests::{full_style, BLUE, RED};
    use crate::{
        AttributeKey, AttributeValue, ExtraAttributes, Font, Ligatures, Link, Style, Tracking,
    };

    #[test]
    fn empty_style_bakes_to_nothing() {
        let baked = Attributes::bake(&Style::new());
        assert!(baked.is_empty());
        assert!(baked.paragraph().is_none());
        assert!(baked.to_pairs().is_empty());
    }

    #[test]
    fn character_parts_map_one_to_one() {
        let style = Style::new()
            .color(RED)
            .background_color(BLUE)
            .font(Font::new("Avenir-Book", 28.0))
            .baseline_offset(10.0)
            .tracking(Tracking::Point(10.0))
            .link(Link::new("http://thebestwords.com/"))
            .ligatures(Ligatures::Disabled);
        let baked = Attributes::bake(&style);
        assert_eq!(baked.foreground(), Some(RED));
        assert_eq!(baked.background(), Some(BLUE));
        assert_eq!(baked.font(), Some(&Font::new("Avenir-Book", 28.0)));
        assert_eq!(baked.baseline_offset(), Some(10.0));
        assert_eq!(baked.kern(), Some(10.0));
        assert_eq!(baked.link().map(Link::as_str), Some("http://thebestwords.com/"));
        assert_eq!(baked.ligatures(), Some(Ligatures::Disabled));
        assert!(baked.paragraph().is_none());
        assert_eq!(baked.to_pairs().len(), 7);
    }

    #[test]
    fn adobe_tracking_uses_effective_font() {
        let with_font = Style::new()
            .tracking(Tracking::Adobe(250.0))
            .font(Font::new("Avenir-Book", 20.0));
        assert_eq!(Attributes::bake(&with_font).kern(), Some(5.0));
        let without_font = Style::new().tracking(Tracking::Adobe(250.0));
        assert_eq!(Attributes::bake(&without_font).kern(), None);
    }

    #[test]
    fn adobe_tracking_uses_a_font_from_extra_attributes() {
        let style = Style::new()
            .extra_attributes(
                ExtraAttributes::new().with(AttributeKey::Font, Font::new("Avenir-Book", 20.0)),
            )
            .tracking(Tracking::Adobe(250.0));
        assert_eq!(Attributes::bake(&style).kern(), Some(5.0));
    }

    #[test]
    fn typed_parts_override_extra_attributes() {
        let style = Style::new().color(BLUE).extra_attributes(
            ExtraAttributes::new()
                .with(AttributeKey::Foreground, RED)
                .with(AttributeKey::BaselineOffset, 4.0_f32)
                .with(AttributeKey::custom("test"), "test"),
        );
        let baked = Attributes::bake(&style);
        assert_eq!(baked.foreground(), Some(BLUE));
        assert_eq!(baked.baseline_offset(), Some(4.0));
        assert_eq!(
            baked.get(&AttributeKey::custom("test")),
            Some(AttributeValue::from("test"))
        );
    }

    #[test]
    fn ill_typed_recognized_keys_are_kept() {
        let style = Style::new()
            .extra_attributes(ExtraAttributes::new().with(AttributeKey::Foreground, "red"));
        let baked = Attributes::bake(&style);
        assert_eq!(baked.foreground(), None);
        assert_eq!(
            baked.get(&AttributeKey::Foreground),
            Some(AttributeValue::from("red"))
        );
    }

    #[test]
    fn baking_is_idempotent() {
        let style = full_style();
        assert_eq!(Attributes::bake(&style), Attributes::bake(&style));
        assert_eq!(
            Attributes::bake(&style),
            Attributes::bake(&style.folded())
        );
    }
}
