//! Message micro-language: tag tokenizer, segmenter and block extractors.

pub mod block;
pub mod file_url;
pub mod latex;
pub mod lyrics;
pub mod music;
pub mod search;
pub mod segment;
pub mod table;
pub mod tokenizer;
pub mod web_analysis;

pub use segment::{Segment, segment};
