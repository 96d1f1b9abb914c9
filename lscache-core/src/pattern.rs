//! Glob matching for exclusion lists.
//!
//! Patterns use shell-glob semantics restricted to a single metacharacter:
//! `*` matches any run of characters (including none, and including `/`).
//! Every other character, `?` and `[` included, matches itself.
//!
//! Matching is a plain byte comparison, so it is case-sensitive and does not
//! depend on the process locale.
//!
//! ```
//! use lscache_core::pattern::{matches, matches_path};
//!
//! assert!(matches("*foo=*", "?test=1&foo=bar"));
//! assert!(matches_path("/admin*", "admin/users"));
//! assert!(!matches("Admin", "admin"));
//! ```

/// Wildcard accepted in patterns.
pub const WILDCARD: u8 = b'*';

/// Tests `subject` against a glob `pattern`.
///
/// Never fails: a pattern made only of literals matches exactly that string,
/// and stray wildcards are simply wildcards.
pub fn matches(pattern: &str, subject: &str) -> bool {
    let pattern = pattern.as_bytes();
    let subject = subject.as_bytes();

    let (mut p, mut s) = (0, 0);
    // Position of the last `*` seen in the pattern and the subject offset it
    // is currently assumed to extend to.
    let mut backtrack: Option<(usize, usize)> = None;

    while s < subject.len() {
        match pattern.get(p) {
            Some(&WILDCARD) => {
                backtrack = Some((p, s));
                p += 1;
            }
            Some(&byte) if byte == subject[s] => {
                p += 1;
                s += 1;
            }
            _ => match backtrack {
                Some((star, consumed)) => {
                    p = star + 1;
                    s = consumed + 1;
                    backtrack = Some((star, consumed + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&byte| byte == WILDCARD)
}

/// Tests a URL path against a pattern after stripping one leading `/` from
/// both, so `/admin*` and `admin*` are equivalent.
pub fn matches_path(pattern: &str, path: &str) -> bool {
    matches(strip_leading_slash(pattern), strip_leading_slash(path))
}

fn strip_leading_slash(value: &str) -> &str {
    value.strip_prefix('/').unwrap_or(value)
}
