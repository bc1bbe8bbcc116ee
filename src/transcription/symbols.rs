//! Closed symbol tables used while cleaning and segmenting transcriptions.

/// Vowel symbols masked out during segmentation.
///
/// Multi-character entries (nasal vowels written with a combining tilde) are
/// listed first and must be matched before the single characters they
/// contain.
pub const VOWELS: &[&str] = &[
    "ɐ̃", "ã", "ẽ", "ĩ", "õ", "ũ", "a", "e", "i", "o", "u", "ɛ", "ɔ", "ə", "ɐ", "ɪ", "ʊ", "w",
    "j", "\u{303}",
];

/// Vowel plus `n` spellings of a nasal vowel.
///
/// Only recognized at the very start of a word and only when no syllable
/// mark separates the two letters: `[anɛw'ziɲu]` opens with a nasal vowel,
/// while in `[a'nɛw]` the `n` is the onset of the second syllable.
pub const NASAL_DIGRAPHS: &[&str] = &["an", "en", "in", "on", "un"];

/// Punctuation and marker characters removed before segmentation:
/// brackets, slashes, stress marks, apostrophe variants, the labialization
/// marker and syllable periods.
pub const REMOVED_MARKS: &[char] = &[
    '[', ']', '/', 'ˈ', 'ˌ', '\'', '’', '‘', '´', '`', 'ʷ', '.',
];

/// Returns `VOWELS` ordered longest first, so alternations prefer digraphs.
#[must_use]
pub fn vowels_longest_first() -> Vec<&'static str> {
    let mut vowels = VOWELS.to_vec();
    vowels.sort_by_key(|v| std::cmp::Reverse(v.chars().count()));
    vowels
}

/// Returns true if `symbol` is exactly one of the vowel symbols.
#[must_use]
pub fn is_vowel(symbol: &str) -> bool {
    VOWELS.contains(&symbol)
}
