//! Module for path normalization.

use alloc::string::String;

/// Removes dot segments from a path.
///
/// This applies the `remove_dot_segments` algorithm defined in
/// [Section 5.2.4 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.4).
///
/// The output never contains a segment that is exactly `"."` or `".."`,
/// so the function is idempotent. A segment that merely contains dots,
/// such as `".g"` or `"g.."`, is left untouched. A `".."` that would climb
/// above the root is dropped.
///
/// # Examples
///
/// ```
/// use lax_uri::normalize::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
/// assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
/// assert_eq!(remove_dot_segments("/../.g/g.."), "/.g/g..");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut input = path;

    while !input.is_empty() {
        if let Some(rem) = input
            .strip_prefix("../")
            .or_else(|| input.strip_prefix("./"))
        {
            input = rem;
        } else if input.starts_with("/./") || input == "/." {
            input = if input.len() == 2 { "/" } else { &input[2..] };
        } else if input.starts_with("/../") || input == "/.." {
            input = if input.len() == 3 { "/" } else { &input[3..] };
            pop_last_segment(&mut out);
        } else if input == "." || input == ".." {
            break;
        } else {
            let seg_start = usize::from(input.starts_with('/'));
            let seg_end = input[seg_start..]
                .find('/')
                .map_or(input.len(), |i| seg_start + i);
            out.push_str(&input[..seg_end]);
            input = &input[seg_end..];
        }
    }
    out
}

/// Removes the last segment and its preceding slash (if any) from the output.
fn pop_last_segment(out: &mut String) {
    let i = out.rfind('/').unwrap_or(0);
    out.truncate(i);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc_examples() {
        assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
        assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
    }

    #[test]
    fn edge_cases() {
        assert_eq!(remove_dot_segments(""), "");
        assert_eq!(remove_dot_segments("."), "");
        assert_eq!(remove_dot_segments(".."), "");
        assert_eq!(remove_dot_segments("./"), "");
        assert_eq!(remove_dot_segments("../"), "");
        assert_eq!(remove_dot_segments("/."), "/");
        assert_eq!(remove_dot_segments("/.."), "/");
        assert_eq!(remove_dot_segments("/"), "/");
        assert_eq!(remove_dot_segments("//"), "//");
        assert_eq!(remove_dot_segments("a/.."), "/");
        assert_eq!(remove_dot_segments("a/../b"), "/b");
        assert_eq!(remove_dot_segments("../../a"), "a");
        assert_eq!(remove_dot_segments("/a/b/.."), "/a/");
        assert_eq!(remove_dot_segments("/a/./b/./"), "/a/b/");
        assert_eq!(remove_dot_segments("/a//../b"), "/a/b");
        assert_eq!(remove_dot_segments("/.../x"), "/.../x");
    }

    #[test]
    fn dotted_names_are_kept() {
        for path in [".g", "g.", "..g", "g..", "/.g", "/..g/g../.x."] {
            assert_eq!(remove_dot_segments(path), path);
        }
    }
}
