//! Text substrate: positions, fragments, the line-aware extractor (mirror/gcc)
//! and the splice-aware iterator + parser combinators (clangd).
//!
//! Grounded on `examples/original_source/src/ach/text/types.hpp`,
//! `ach/common/text_extractor.cpp`, and `ach/clangd/{splice_utils,
//! spliced_text_iterator,spliced_text_parser}.*`.

pub mod extractor;
pub mod parser;
pub mod position;
pub mod spliced;

pub use extractor::LineExtractor;
pub use parser::SplicedTextParser;
pub use position::{Fragment, LocatedSpan, Position, Range};
pub use spliced::{compare_spliced_with_raw, ends_with_backslash_whitespace, SplicedTextIterator};
