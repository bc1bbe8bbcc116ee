//! Transcription decomposition.
//!
//! Turns a raw bracketed phonetic transcription such as `[ba.χi.'gui.ɲə]`
//! into the ordered consonant symbols it contains. Segmentation is purely
//! lexical: vowels act as separators and adjacent consonants that do not
//! form a known cluster are split back into single characters.

mod parser;
pub mod symbols;

pub use parser::{Segmentation, TranscriptionParser};
