// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition of styled fragments into attributed text.
//!
//! - [`style`] defines partial styles: ordered lists of explicitly set parts that merge with
//!   override-wins semantics.
//! - [`Attributes`] are the concrete attributes a style bakes to. Paragraph-scoped parts fold
//!   into one shared [`ParagraphAttributes`] object.
//! - [`Composer`] turns a sequence of [`Fragment`]s (text, embedded objects, tabs) into
//!   [`ComposedText`] under a base style.
//! - [`TabResolver`] is a separate pass that measures content through a [`MeasureWidth`]
//!   implementation and turns tab fragments into tab stops and head indents.
//!
//! Composition never measures anything, so it can be used and tested without a text layout
//! engine. Only tab resolution needs one.
//!
//! ## Indices
//!
//! All ranges are byte indices into UTF-8 text, on character boundaries (as required by
//! [`attributed_text`]).
//!
//! ## Paragraph attributes
//!
//! A fragment whose style sets no paragraph part keeps the base paragraph object itself, not a
//! copy. A fragment that sets one gets a fresh object; the base is never modified. Consumers
//! usually need a single paragraph object per paragraph: [`ComposedText::unify_paragraphs`]
//! (also run by tab resolution) merges the objects used within each paragraph.
//!
//! ## Example
//!
//! ```
//! use text_compose::{Composer, Fragment, Style, Styled, Tab, TextAlignment};
//!
//! let base = Style::new().alignment(TextAlignment::Left).first_line_head_indent(5.0);
//! let mut text = Composer::new(base)
//!     .compose([
//!         "Total".styled(Style::new().line_spacing(2.0)),
//!         Fragment::tab(Tab::spacer(8.0)),
//!         Fragment::text("42"),
//!     ])
//!     .unwrap();
//!
//! // The tab character is still marked for resolution.
//! assert!(text.attributes_at(5).unwrap().tab().is_some());
//!
//! text.resolve_tabs(&mut |content: text_compose::Content<'_>, _: &text_compose::Attributes| {
//!     match content {
//!         text_compose::Content::Text(s) => Some(10.0 * s.len() as f32),
//!         text_compose::Content::Object(_) => None,
//!     }
//! })
//! .unwrap();
//!
//! let paragraph = text.paragraph_at(0).unwrap();
//! assert_eq!(paragraph.tab_stops[0].location, 58.0);
//! assert_eq!(paragraph.line_spacing, 2.0);
//! assert_eq!(paragraph.first_line_head_indent, 5.0);
//! assert!(text.attributes_at(5).unwrap().tab().is_none());
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the standard library for [`peniko`] math.
//! - `libm`: Use `libm` for [`peniko`] math in `no_std` builds.
//!
//! At least one of `std` and `libm` is required.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("text_compose requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

pub mod special;
pub mod style;

mod attributes;
mod compose;
mod error;
mod fragment;
mod paragraph;
mod tabs;


pub use attributed_text;

pub use attributes::Attributes;
pub use compose::{compose, ComposedText, Composer};
pub use error::ComposeError;
pub use fragment::{Attachment, Fragment, Styled, Tab};
pub use paragraph::{resolve_paragraph, ParagraphAttributes, TabStop};
pub use tabs::{Content, MeasureWidth, TabResolver};

pub use style::{
    AttributeKey, AttributeValue, Color, ExtraAttributes, Font, Ligatures, LineBreakMode, Link,
    Style, StylePart, StylePartKind, TextAlignment, Tracking, WritingDirection,
};
