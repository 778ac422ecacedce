//! Keyword-based intent classification
//!
//! Decides whether a chat message asks for an image. Matching is a plain
//! case-insensitive substring test against a fixed keyword list: there is no
//! tokenization, stemming or negation handling, so "don't draw anything" is
//! classified as an image request.

use regex::Regex;

/// Keywords that route a message to image generation.
///
/// Korean and English words for picture/image/draw/create/show, plus the
/// Russian imperative "draw".
pub const IMAGE_KEYWORDS: &[&str] = &[
    "그림",
    "이미지",
    "그려",
    "생성",
    "보여",
    "picture",
    "image",
    "draw",
    "create",
    "show",
    "нарисуй",
];

lazy_static::lazy_static! {
    /// Case-insensitive alternation of every keyword
    static ref IMAGE_KEYWORD_REGEX: Regex = {
        let alternation = IMAGE_KEYWORDS
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!("(?i){}", alternation)).unwrap()
    };
}

/// Capability: decide text-vs-image intent from raw message text
pub trait IntentClassifier: Send + Sync {
    /// True when the message should be answered with a generated image
    fn classify(&self, text: &str) -> bool;
}

/// Substring classifier over `IMAGE_KEYWORDS`
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> bool {
        IMAGE_KEYWORD_REGEX.is_match(text)
    }
}
