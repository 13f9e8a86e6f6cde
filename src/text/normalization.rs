// WHY: standalone normalization so segmentation always runs on one canonical form
// Offsets produced downstream refer to this normalized text, never to the caller's original

use unicode_normalization::UnicodeNormalization;

/// Normalize raw text for segmentation
///
/// Input is composed to NFC first, so decomposed accents ("e\u{301}") become single letters.
/// CRLF and CR become LF, tabs and other non-newline whitespace become a space, runs of
/// spaces collapse to one, spaces next to a newline are dropped, any whitespace run holding
/// two or more newlines collapses to exactly two (the paragraph separator) and
/// leading/trailing whitespace is trimmed. The result is a fixed point: normalizing it again
/// returns the same string.
pub fn normalize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_text_into(text, &mut result);
    result
}

/// Normalize into supplied buffer to avoid allocation
pub fn normalize_text_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut chars = text.nfc().peekable();
    let mut prev_was_space = false;
    let mut newline_run = 0usize;

    while let Some(ch) = chars.next() {
        match ch {
            '\r' | '\n' => {
                // \r\n counts as a single break
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if prev_was_space {
                    buffer.pop();
                }
                if newline_run < 2 {
                    buffer.push('\n');
                }
                newline_run += 1;
                prev_was_space = false;
            }
            // Blank lines holding spaces or tabs still count as a paragraph break
            _ if ch.is_whitespace() && newline_run > 0 => {}
            _ if ch.is_whitespace() => {
                if !prev_was_space {
                    buffer.push(' ');
                    prev_was_space = true;
                }
                newline_run = 0;
            }
            _ => {
                buffer.push(ch);
                prev_was_space = false;
                newline_run = 0;
            }
        }
    }

    let trimmed = buffer.trim();
    if trimmed.len() != buffer.len() {
        let trimmed_content = trimmed.to_string();
        buffer.clear();
        buffer.push_str(&trimmed_content);
    }
}
