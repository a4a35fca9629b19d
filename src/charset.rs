// Copyright (c) 2026 rezky_nightky

use std::char;

/// Glyphs of the portfolio rain: capitals, digits and the symbol row.
pub const PORTFOLIO_GLYPHS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%^&*()_+-=[]{}|;:,.<>?`~";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Charset(u32);

impl Charset {
    #[cfg(test)]
    pub const NONE: Charset = Charset(0);
    pub const PORTFOLIO: Charset = Charset(0x1);
    pub const ENGLISH_LETTERS: Charset = Charset(0x2);
    pub const ENGLISH_DIGITS: Charset = Charset(0x4);
    pub const ENGLISH_PUNCTUATION: Charset = Charset(0x8);
    pub const KATAKANA: Charset = Charset(0x10);
    pub const BINARY: Charset = Charset(0x20);
    pub const HEX: Charset = Charset(0x40);
    pub const BLOCKS: Charset = Charset(0x80);

    pub const MATRIX: Charset = Charset(0x2 | 0x4 | 0x10);
    pub const ASCII: Charset = Charset(0x2 | 0x4 | 0x8);

    pub fn contains(self, other: Charset) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn union(self, other: Charset) -> Charset {
        Charset(self.0 | other.0)
    }
}

pub const PRESETS: &[(&str, &str)] = &[
    ("portfolio", "Capitals + digits + symbols (default)"),
    ("matrix", "Letters + digits + katakana"),
    ("ascii", "Letters + digits + punctuation"),
    ("english", "Letters only"),
    ("digits", "Digits only (aliases: dec, decimal)"),
    ("binary", "0 and 1 (aliases: bin, 01)"),
    ("hex", "0-9 and A-F (alias: hexadecimal)"),
    ("katakana", "Half-width katakana"),
    ("blocks", "Block elements"),
    ("hacker", "Portfolio + katakana (combo)"),
];

pub fn charset_from_str(spec: &str) -> Result<Charset, String> {
    let spec = spec.trim().to_ascii_lowercase();
    match spec.as_str() {
        "portfolio" | "default" => Ok(Charset::PORTFOLIO),
        "matrix" => Ok(Charset::MATRIX),
        "ascii" => Ok(Charset::ASCII),
        "english" => Ok(Charset::ENGLISH_LETTERS),
        "digits" | "dec" | "decimal" => Ok(Charset::ENGLISH_DIGITS),
        "bin" | "binary" | "01" => Ok(Charset::BINARY),
        "hex" | "hexadecimal" => Ok(Charset::HEX),
        "katakana" => Ok(Charset::KATAKANA),
        "blocks" => Ok(Charset::BLOCKS),
        "hacker" => Ok(Charset::PORTFOLIO.union(Charset::KATAKANA)),
        _ => Err(format!("unsupported charset: {} (see --list-charsets)", spec)),
    }
}

fn push_range(out: &mut Vec<char>, start: u32, end: u32) {
    out.extend((start..=end).filter_map(char::from_u32));
}

pub fn build_chars(charset: Charset) -> Vec<char> {
    let mut out: Vec<char> = Vec::new();

    if charset.contains(Charset::PORTFOLIO) {
        out.extend(PORTFOLIO_GLYPHS.chars());
    }
    if charset.contains(Charset::BINARY) {
        push_range(&mut out, 0x30, 0x31);
    }
    if charset.contains(Charset::HEX) {
        push_range(&mut out, 0x30, 0x39);
        push_range(&mut out, 0x41, 0x46);
    }
    if charset.contains(Charset::ENGLISH_LETTERS) {
        push_range(&mut out, 0x41, 0x5A);
        push_range(&mut out, 0x61, 0x7A);
    }
    if charset.contains(Charset::ENGLISH_DIGITS) {
        push_range(&mut out, 0x30, 0x39);
    }
    if charset.contains(Charset::ENGLISH_PUNCTUATION) {
        push_range(&mut out, 0x21, 0x2F);
        push_range(&mut out, 0x3A, 0x40);
        push_range(&mut out, 0x5B, 0x60);
        push_range(&mut out, 0x7B, 0x7E);
    }
    if charset.contains(Charset::KATAKANA) {
        push_range(&mut out, 0xFF66, 0xFF9D);
    }
    if charset.contains(Charset::BLOCKS) {
        push_range(&mut out, 0x2580, 0x259F);
    }

    if out.is_empty() {
        out.push('0');
        out.push('1');
    }

    out
}
