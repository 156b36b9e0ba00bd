//! Virtual path rules and glob matching.
//!
//! A virtual path is a slash-rooted UTF-8 string such as `/usr/data.exe`.
//! It is not a filesystem path and there are no relative forms.
//!
//! Patterns use the same syntax plus two wildcards:
//!
//! - `*` matches one or more characters inside a single segment.
//! - `**`, only as a whole segment (`/**/`), matches zero or more segments.

use std::str::Chars;

/// Paths must be strictly shorter than this many bytes.
pub const MAX_PATH_LEN: usize = 0xFFFF;

/// Check whether `path` is a valid virtual path (or pattern).
///
/// A valid path is non-empty, starts with `/`, does not end with `/`, is
/// shorter than [`MAX_PATH_LEN`] bytes, never has two consecutive `/` and
/// never has more than two consecutive `*`.
///
/// ```
/// use pensieve_core::path::valid_path;
///
/// assert!(valid_path("/usr/data"));
/// assert!(valid_path("/usr/**/*.exe"));
/// assert!(!valid_path("/usr//data"));
/// assert!(!valid_path("/usr/***"));
/// ```
pub fn valid_path(path: &str) -> bool {
    let bytes = path.as_bytes();

    if bytes.first() != Some(&b'/') || bytes.last() == Some(&b'/') {
        return false;
    }
    if bytes.len() >= MAX_PATH_LEN {
        return false;
    }

    let mut slashes = 0usize;
    let mut stars = 0usize;
    for &b in bytes {
        slashes = if b == b'/' { slashes + 1 } else { 0 };
        stars = if b == b'*' { stars + 1 } else { 0 };
        if slashes > 1 || stars > 2 {
            return false;
        }
    }

    true
}

/// Match a candidate path against a glob pattern.
///
/// Literal characters must match exactly and both sides must be consumed
/// completely. The empty pattern matches nothing.
///
/// ```
/// use pensieve_core::path::pattern_match;
///
/// assert!(pattern_match("/*/data", "/user/data"));
/// assert!(pattern_match("/**/*.*", "/user/bin/data.asd"));
/// assert!(!pattern_match("/usr/*", "/usr/asd/dsf"));
/// ```
pub fn pattern_match(pattern: &str, path: &str) -> bool {
    match_from(pattern.chars(), path.chars())
}

fn match_from(mut p: Chars<'_>, mut s: Chars<'_>) -> bool {
    if p.as_str().is_empty() {
        return false;
    }

    while let Some(c) = p.next() {
        if c != '*' {
            if s.next() != Some(c) {
                return false;
            }
            continue;
        }

        if peek(&p) == Some('*') {
            p.next();
            if p.next() != Some('/') {
                return false;
            }

            // zero segments first, then skip one segment at a time
            if match_from(p.clone(), s.clone()) {
                return true;
            }
            while let Some(ch) = s.next() {
                if ch == '/' && match_from(p.clone(), s.clone()) {
                    return true;
                }
            }
            return false;
        }

        // single `*`: at least one character, stop before the next literal
        // of the pattern or at a segment boundary
        if s.next().is_none() {
            return false;
        }
        loop {
            let next = peek(&s);
            if next == peek(&p) || next == Some('/') {
                break;
            }
            if s.next().is_none() {
                return false;
            }
        }
    }

    s.as_str().is_empty()
}

#[inline]
fn peek(chars: &Chars<'_>) -> Option<char> {
    chars.clone().next()
}
