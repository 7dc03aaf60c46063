//! Case and diacritic folding for match comparisons.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Remove combining marks after NFD decomposition, so "résumé" becomes
/// "resume". Case is left untouched.
pub fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Lowercase `text`, stripping diacritics as well when requested.
pub fn fold(text: &str, ignore_diacritics: bool) -> String {
    let lowered = text.to_lowercase();
    if ignore_diacritics {
        strip_diacritics(&lowered)
    } else {
        lowered
    }
}

/// Fold a single character the same way [`fold`] treats whole strings.
///
/// Returns a `String` because both lowercasing and decomposition can expand
/// one character into several.
pub fn fold_char(c: char, ignore_diacritics: bool) -> String {
    let lowered = c.to_lowercase();
    if ignore_diacritics {
        lowered.nfd().filter(|ch| !is_combining_mark(*ch)).collect()
    } else {
        lowered.collect()
    }
}

/// Compare two characters for equality, keeping case significant but
/// optionally treating diacritic variants of the same base letter as equal.
pub fn chars_match_exact(a: char, b: char, ignore_diacritics: bool) -> bool {
    if a == b {
        return true;
    }
    ignore_diacritics && base_chars(a).eq(base_chars(b))
}

/// Compare two characters ignoring case, and optionally diacritics too.
pub fn chars_match_ignore_case(a: char, b: char, ignore_diacritics: bool) -> bool {
    fold_char(a, ignore_diacritics) == fold_char(b, ignore_diacritics)
}

fn base_chars(c: char) -> impl Iterator<Item = char> {
    std::iter::once(c).nfd().filter(|ch| !is_combining_mark(*ch))
}
