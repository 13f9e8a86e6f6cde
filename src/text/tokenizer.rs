// WHY: Unicode-aware tokenization shared by segmentation, readability and validation
// One multi-pattern regex classifies every span; whitespace is consumed but never emitted

use anyhow::Result;
use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};

/// Token class, assigned by which tokenizer pattern matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Word,
    Number,
    Punctuation,
    /// Symbols and anything else that is neither whitespace nor covered above
    Special,
}

/// A single token with its byte offset into the normalized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub position: usize,
    pub kind: TokenKind,
}

impl Token {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    pub fn is_number(&self) -> bool {
        self.kind == TokenKind::Number
    }

    pub fn is_punctuation(&self) -> bool {
        self.kind == TokenKind::Punctuation
    }

    pub fn is_special_char(&self) -> bool {
        self.kind == TokenKind::Special
    }

    /// Byte offset one past the token's last byte
    pub fn end(&self) -> usize {
        self.position + self.text.len()
    }

    pub fn lowercase(&self) -> String {
        self.text.to_lowercase()
    }
}

// Pattern order is match priority
const WORD_PATTERN: &str = r"[\p{L}\p{M}]+(?:['’][\p{L}\p{M}]+)*";
const NUMBER_PATTERN: &str = r"\p{N}+(?:[.,:]\p{N}+)*";
const PUNCTUATION_PATTERN: &str = r"\p{P}";
const WHITESPACE_PATTERN: &str = r"\s+";
const SPECIAL_PATTERN: &str = r"\S";

const WHITESPACE_PATTERN_ID: usize = 3;

/// Compiled tokenizer
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new_many(&[
            WORD_PATTERN,
            NUMBER_PATTERN,
            PUNCTUATION_PATTERN,
            WHITESPACE_PATTERN,
            SPECIAL_PATTERN,
        ])?;
        Ok(Self { pattern })
    }

    /// Split `text` into tokens whose positions are offset by `base_index`
    pub fn tokenize(&self, text: &str, base_index: usize) -> Vec<Token> {
        let mut tokens = Vec::new();

        for mat in self.pattern.find_iter(text) {
            let kind = match mat.pattern().as_usize() {
                0 => TokenKind::Word,
                1 => TokenKind::Number,
                2 => TokenKind::Punctuation,
                WHITESPACE_PATTERN_ID => continue,
                _ => TokenKind::Special,
            };
            tokens.push(Token {
                text: text[mat.range()].to_string(),
                position: base_index + mat.start(),
                kind,
            });
        }

        tokens
    }
}
