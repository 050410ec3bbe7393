// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::sync::Arc;

use crate::style::Style;

/// An embedded object, such as an image or a custom view.
///
/// The engine does not interpret attachments. It places one object replacement character per
/// attachment and forwards the attachment to the measurement collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct Attachment {
    /// User-specified identifier, used to match the placeholder back to the object.
    pub id: u64,
    /// The intrinsic width of the object in points, if known.
    pub width: Option<f32>,
    /// The intrinsic height of the object in points, if known.
    pub height: Option<f32>,
}

impl Attachment {
    /// Creates an attachment with no intrinsic size.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            width: None,
            height: None,
        }
    }

    /// Sets the intrinsic size.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// The layout effect of a tab fragment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tab {
    /// Places a tab stop `width` points after the content preceding the tab.
    Spacer(f32),
    /// Indents the rest of the paragraph to the given absolute position, in points.
    HeadIndent(f32),
}

impl Tab {
    /// A tab stop `width` points after the preceding content.
    pub fn spacer(width: f32) -> Self {
        Self::Spacer(width)
    }

    /// An indent of the remaining paragraph to `indent` points.
    pub fn head_indent(indent: f32) -> Self {
        Self::HeadIndent(indent)
    }
}

/// One piece of content to compose, with an optional style override.
#[derive(Clone, Debug, PartialEq)]
pub enum Fragment {
    /// A run of text.
    Text(Arc<str>, Option<Style>),
    /// An embedded object, rendered as one object replacement character.
    Object(Attachment, Option<Style>),
    /// A tab, rendered as one tab character and resolved into paragraph attributes.
    Tab(Tab, Option<Style>),
}

impl Fragment {
    /// Creates a text fragment.
    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Self::Text(text.into(), None)
    }

    /// Creates an object fragment.
    pub fn object(attachment: Attachment) -> Self {
        Self::Object(attachment, None)
    }

    /// Creates a tab fragment.
    pub fn tab(tab: Tab) -> Self {
        Self::Tab(tab, None)
    }

    /// Returns the style override of this fragment.
    pub fn style(&self) -> Option<&Style> {
        match self {
            Self::Text(_, style) | Self::Object(_, style) | Self::Tab(_, style) => style.as_ref(),
        }
    }

    /// Returns this fragment with its style override replaced by `style`.
    pub fn styled(mut self, style: Style) -> Self {
        match &mut self {
            Self::Text(_, slot) | Self::Object(_, slot) | Self::Tab(_, slot) => {
                *slot = Some(style);
            }
        }
        self
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl From<Attachment> for Fragment {
    fn from(attachment: Attachment) -> Self {
        Self::object(attachment)
    }
}

impl From<Tab> for Fragment {
    fn from(tab: Tab) -> Self {
        Self::tab(tab)
    }
}

/// Attaches a style to anything that converts into a [`Fragment`].
///
/// ## Example
///
/// ```
/// use text_compose::{Fragment, Style, Styled, Tab};
///
/// let fragments = [
///     "Name".styled(Style::new().baseline_offset(1.0)),
///     Tab::spacer(10.0).into(),
///     Fragment::text("Value"),
/// ];
/// assert!(fragments[0].style().is_some());
/// assert!(fragments[1].style().is_none());
/// ```
pub trait Styled: Into<Fragment> {
    /// Converts `self` into a fragment styled with `style`.
    fn styled(self, style: Style) -> Fragment {
        let fragment: Fragment = self.into();
        fragment.styled(style)
    }
}

impl<T: Into<Fragment>> Styled for T {}

#[cfg(test)]
mod tests {
    use super::{Attachment, Fragment, Styled, Tab};
    use crate::Style;
    use alloc::string::String;

    #[test]
    fn conversions_carry_no_style() {
        assert_eq!(Fragment::from("a"), Fragment::Text("a".into(), None));
        assert_eq!(Fragment::from(String::from("a")), Fragment::text("a"));
        assert_eq!(
            Fragment::from(Attachment::new(7)),
            Fragment::Object(Attachment::new(7), None)
        );
        assert_eq!(Fragment::from(Tab::head_indent(3.0)), Fragment::Tab(Tab::HeadIndent(3.0), None));
    }

    #[test]
    fn styled_replaces_the_override() {
        let first = Style::new().head_indent(1.0);
        let second = Style::new().head_indent(2.0);
        let fragment = Tab::spacer(4.0).styled(first).styled(second.clone());
        assert_eq!(fragment.style(), Some(&second));
    }
}
