// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;

use hashbrown::HashMap;

use super::values::{Color, Font, Ligatures, Link};
use crate::fragment::Attachment;
use crate::paragraph::ParagraphAttributes;

/// The key of a baked attribute.
///
/// Keys the engine understands have their own variant; anything else is carried through
/// untouched as [`AttributeKey::Custom`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    /// Text color.
    Foreground,
    /// Background color.
    Background,
    /// Font.
    Font,
    /// Baseline offset in points.
    BaselineOffset,
    /// Kern (resolved tracking) in points.
    Kern,
    /// Link target.
    Link,
    /// Ligature usage.
    Ligature,
    /// The paragraph attributes object.
    Paragraph,
    /// An embedded object.
    Attachment,
    /// Any other attribute, by name.
    Custom(Arc<str>),
}

impl AttributeKey {
    /// Creates a key for an attribute the engine does not interpret.
    pub fn custom(name: impl Into<Arc<str>>) -> Self {
        Self::Custom(name.into())
    }

    /// Returns `true` if the attribute applies to whole paragraphs.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Self::Paragraph)
    }
}

/// The value of a baked attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// A color.
    Color(Color),
    /// A font.
    Font(Font),
    /// A length or factor.
    Number(f32),
    /// A link target.
    Link(Link),
    /// Ligature usage.
    Ligatures(Ligatures),
    /// A paragraph attributes object.
    Paragraph(Arc<ParagraphAttributes>),
    /// An embedded object.
    Attachment(Attachment),
    /// A flag.
    Bool(bool),
    /// An integer.
    Integer(i64),
    /// A string.
    String(Arc<str>),
}

impl From<ParagraphAttributes> for AttributeValue {
    fn from(value: ParagraphAttributes) -> Self {
        Self::Paragraph(Arc::new(value))
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<Color> for AttributeValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<Font> for AttributeValue {
    fn from(value: Font) -> Self {
        Self::Font(value)
    }
}

/// A bag of additional attributes carried by a style.
///
/// Bags merge key by key: when two bags are merged, each key of the overriding bag replaces
/// the same key of the base bag, and all other keys of the base bag are kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtraAttributes {
    map: HashMap<AttributeKey, AttributeValue>,
}

impl ExtraAttributes {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this bag with `key` set to `value`.
    pub fn with(mut self, key: AttributeKey, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn insert(
        &mut self,
        key: AttributeKey,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.map.insert(key, value.into())
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &AttributeKey) -> Option<&AttributeValue> {
        self.map.get(key)
    }

    /// Iterates over the entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeKey, &AttributeValue)> {
        self.map.iter()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the bag has no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Merges `other` into this bag, letting `other` win on each shared key.
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.map {
            self.map.insert(key.clone(), value.clone());
        }
    }

    /// Returns `true` if the bag carries a paragraph-scoped entry.
    pub fn has_paragraph(&self) -> bool {
        self.map.keys().any(AttributeKey::is_paragraph)
    }

    /// Returns the paragraph attributes object stored in the bag, if it has the right type.
    pub fn paragraph(&self) -> Option<&Arc<ParagraphAttributes>> {
        match self.map.get(&AttributeKey::Paragraph) {
            Some(AttributeValue::Paragraph(paragraph)) => Some(paragraph),
            _ => None,
        }
    }
}

impl FromIterator<(AttributeKey, AttributeValue)> for ExtraAttributes {
    fn from_iter<I: IntoIterator<Item = (AttributeKey, AttributeValue)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}
