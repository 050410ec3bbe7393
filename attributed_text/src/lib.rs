// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributed Text stores UTF-8 text together with a sequence of attribute runs.
//!
//! Runs are contiguous and non-overlapping: together they tile the whole text, so every byte
//! position has exactly one attribute value. Text is appended run by run; afterwards the
//! attributes of any validated byte range can be edited in place, splitting runs as needed.
//!
//! ## Example
//!
//! ```
//! use attributed_text::AttributedText;
//!
//! let mut text = AttributedText::new();
//! text.push("Hello ", 1_u8);
//! text.push("world", 2_u8);
//!
//! text.update_range(3..8, |attr| *attr += 10).unwrap();
//! let runs: Vec<_> = text.runs().map(|(range, attr)| (range.clone(), *attr)).collect();
//! assert_eq!(runs, vec![(0..3, 1), (3..6, 11), (6..8, 12), (8..11, 2)]);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
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

extern crate alloc;

mod attributed_text;
mod error;

pub use crate::attributed_text::AttributedText;
pub use crate::error::{BoundaryInfo, Endpoint, Error, ErrorKind};
