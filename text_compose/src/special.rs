// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Characters with a structural meaning in composed text.

/// Stands in for an embedded object; carries the attachment attribute.
pub const OBJECT_REPLACEMENT_CHARACTER: char = '\u{FFFC}';

/// Character tabulation. Tab fragments render as this character.
pub const TAB: char = '\t';

/// Line feed. Ends a paragraph.
pub const LINE_FEED: char = '\n';

/// Carriage return. Ends a paragraph; `"\r\n"` counts as a single terminator.
pub const CARRIAGE_RETURN: char = '\r';

/// Paragraph separator. Ends a paragraph.
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';

/// Line separator. Breaks a line without ending the paragraph.
pub const LINE_SEPARATOR: char = '\u{2028}';

/// No-break space.
pub const NO_BREAK_SPACE: char = '\u{00A0}';

/// Returns `true` if `c` ends a paragraph.
#[inline]
pub fn is_paragraph_terminator(c: char) -> bool {
    matches!(c, LINE_FEED | CARRIAGE_RETURN | PARAGRAPH_SEPARATOR)
}
