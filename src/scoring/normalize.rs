//! Display-name normalization used to match stat rows against the trait table.
//!
//! `"  Dimítris   KARRAS-Jr. "` and `"dimitris karras jr"` must land on the same
//! key: lower-case, drop diacritics, turn every run of non-alphanumerics into
//! a single space, trim.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Normalize a display name into a trait-table key.
///
/// Canonical decomposition splits accented letters into base letter plus
/// combining marks, which are then dropped. Letters with no decomposition
/// (`ø`, `ł`, `đ`, `ß`) are kept as they are.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;

    for ch in name.nfd().flat_map(char::to_lowercase) {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }

    out
}
