//! Text helpers for the built-in Type1 fonts (WinAnsi encoding)

/// Average glyph width of Helvetica as a fraction of the font size
const AVERAGE_GLYPH_WIDTH: f64 = 0.5;

/// Encode text as single-byte WinAnsi
///
/// Latin-1 passes through. Common typographic punctuation is folded to ASCII,
/// anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201a}' => b'\'',
            '\u{201c}' | '\u{201d}' | '\u{201e}' => b'"',
            '\u{2013}' | '\u{2014}' | '\u{2212}' => b'-',
            '\u{2026}' => b'.',
            '\n' | '\r' | '\t' => b' ',
            c if (c as u32) < 0x20 => b' ',
            c if (c as u32) <= 0xff => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Approximate rendered width of `text` in points
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * AVERAGE_GLYPH_WIDTH
}

/// Greedy word wrap to lines no wider than `max_width` points
pub fn wrap(text: &str, font_size: f64, max_width: f64) -> Vec<String> {
    let max_chars = ((max_width / (font_size * AVERAGE_GLYPH_WIDTH)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        // Break words longer than a full line
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(max_chars).collect();
            word = word.chars().skip(max_chars).collect();
            lines.push(head);
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
