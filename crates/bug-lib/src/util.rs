//! Title/directory-name mapping and identifier hashing.

use sha2::{Digest, Sha256};

/// Length of identifiers produced by [`generate_identifier`].
pub const GENERATED_ID_LENGTH: usize = 7;

// ============================================================================
// Directory Names
// ============================================================================

/// Map a free-form title onto a filesystem-safe directory name.
///
/// Single whitespace becomes `-`, runs of two or more whitespace characters
/// become one `_` each, a run of `n` dashes becomes `n + 1` dashes, and path
/// separators become `_`. [`dir_to_title`] inverts this for titles that do
/// not put spaces directly next to dashes.
#[must_use]
pub fn title_to_dir(title: &str) -> String {
    let chars: Vec<char> = title.trim().chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            let start = i;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            let run = i - start;
            if run == 1 {
                out.push('-');
            } else {
                out.extend(std::iter::repeat_n('_', run));
            }
            continue;
        }
        if c == '-' {
            let start = i;
            while i < chars.len() && chars[i] == '-' {
                i += 1;
            }
            out.extend(std::iter::repeat_n('-', i - start + 1));
            continue;
        }
        if c == '/' || c == '\\' || c == '\0' {
            out.push('_');
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}

/// Reconstruct a human-readable title from a directory name.
#[must_use]
pub fn dir_to_title(dir: &str) -> String {
    let chars: Vec<char> = dir.chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '-' => {
                let start = i;
                while i < chars.len() && chars[i] == '-' {
                    i += 1;
                }
                let run = i - start;
                if run == 1 {
                    out.push(' ');
                } else {
                    out.extend(std::iter::repeat_n('-', run - 1));
                }
            }
            '_' => {
                let start = i;
                while i < chars.len() && chars[i] == '_' {
                    i += 1;
                }
                let run = i - start;
                let fill = if run == 1 { '_' } else { ' ' };
                out.extend(std::iter::repeat_n(fill, run));
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

// ============================================================================
// Identifier Generation
// ============================================================================

/// Derive a short, stable identifier from an issue title.
///
/// SHA256 of the trimmed title, first 8 bytes base36-encoded, truncated to
/// [`GENERATED_ID_LENGTH`] characters.
#[must_use]
pub fn generate_identifier(title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.trim().as_bytes());
    let result = hasher.finalize();

    let mut num = 0u64;
    for &byte in result.iter().take(8) {
        num = (num << 8) | u64::from(byte);
    }

    let mut encoded = base36_encode(num);
    if encoded.len() < GENERATED_ID_LENGTH {
        encoded = format!("{encoded:0>GENERATED_ID_LENGTH$}");
    }
    encoded.chars().take(GENERATED_ID_LENGTH).collect()
}

fn base36_encode(mut num: u64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if num == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while num > 0 {
        chars.push(ALPHABET[(num % 36) as usize] as char);
        num /= 36;
    }
    chars.into_iter().rev().collect()
}
