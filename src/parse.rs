use crate::imp::{AuthMeta, Meta};
use core::num::NonZeroUsize;

/// Splits a URI reference into components, recording their bounds.
///
/// # Guarantees
///
/// Any input is accepted. All output indexes are within bounds, correctly ordered
/// and on the boundary of an ASCII delimiter, hence on a UTF-8 code point boundary.
///
/// - A present query starts with `'?'` and a present fragment starts with `'#'`.
/// - The path is present whenever the authority is.
pub(crate) fn parse(s: &str) -> Meta {
    let len = s.len();
    let mut out = Meta::default();

    out.fragment_start = s.find('#');
    let before_fragment = out.fragment_start.unwrap_or(len);
    out.query_start = s[..before_fragment].find('?');
    let hier_end = out.query_start.unwrap_or(before_fragment);

    out.scheme_end = scan_scheme(&s.as_bytes()[..hier_end]);
    let hier_start = out.scheme_end.map_or(0, |i| i.get() + 1);

    if s[hier_start..hier_end].starts_with("//") {
        let auth_start = hier_start + 2;
        let auth_end = s[auth_start..hier_end]
            .find('/')
            .map_or(hier_end, |i| auth_start + i);

        out.auth_meta = Some(parse_authority(s, auth_start, auth_end));
        out.path_bounds = Some((auth_end, hier_end));
    } else if hier_start < hier_end {
        out.path_bounds = Some((hier_start, hier_end));
    }
    out
}

/// Returns the index of the colon ending the scheme, if any.
fn scan_scheme(bytes: &[u8]) -> Option<NonZeroUsize> {
    match bytes.first() {
        Some(x) if x.is_ascii_alphabetic() => {}
        _ => return None,
    }
    let i = bytes.iter().position(|&x| !is_scheme_char(x))?;
    if bytes[i] == b':' {
        NonZeroUsize::new(i)
    } else {
        None
    }
}

const fn is_scheme_char(x: u8) -> bool {
    x.is_ascii_alphanumeric() || matches!(x, b'+' | b'-' | b'.')
}

fn parse_authority(s: &str, start: usize, end: usize) -> AuthMeta {
    // The userinfo may itself contain '@', so split at the last one.
    let host_start = s[start..end].rfind('@').map_or(start, |i| start + i + 1);
    let host_port = &s[host_start..end];

    let (host_end, colon) = match ip_literal_end(host_port) {
        Some(i) => {
            // Colons inside the brackets are not port delimiters.
            let host_end = host_start + i + 1;
            let colon = s[host_end..end].rfind(':').map(|i| host_end + i);
            (host_end, colon)
        }
        None => match host_port.rfind(':') {
            Some(i) => (host_start + i, Some(host_start + i)),
            None => (end, None),
        },
    };

    AuthMeta {
        bounds: (start, end),
        host_bounds: (host_start, host_end),
        port_start: colon.map(|i| i + 1).filter(|&i| i < end),
    }
}

/// Returns the index of the right bracket closing an IP literal, if any.
fn ip_literal_end(host_port: &str) -> Option<usize> {
    let open = host_port.find('[')?;
    host_port[open..].find(']').map(|i| open + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme_of(s: &str) -> Option<&str> {
        scan_scheme(s.as_bytes()).map(|i| &s[..i.get()])
    }

    #[test]
    fn scheme() {
        assert_eq!(scheme_of("http://a"), Some("http"));
        assert_eq!(scheme_of("svn+ssh:x"), Some("svn+ssh"));
        assert_eq!(scheme_of("a.b-c:"), Some("a.b-c"));
        assert_eq!(scheme_of("g:h"), Some("g"));
        assert_eq!(scheme_of(":x"), None);
        assert_eq!(scheme_of("1a:x"), None);
        assert_eq!(scheme_of("a_b:x"), None);
        assert_eq!(scheme_of("./a:b"), None);
        assert_eq!(scheme_of("http"), None);
        assert_eq!(scheme_of(""), None);
    }

    #[test]
    fn bounds() {
        let s = "foo://u@h:1/p?q#f";
        let meta = parse(s);
        assert_eq!(meta.scheme_end.map(|i| i.get()), Some(3));
        let auth = meta.auth_meta.unwrap();
        assert_eq!(auth.bounds, (6, 11));
        assert_eq!(auth.host_bounds, (8, 9));
        assert_eq!(auth.port_start, Some(10));
        assert_eq!(meta.path_bounds, Some((11, 13)));
        assert_eq!(meta.query_start, Some(13));
        assert_eq!(meta.fragment_start, Some(15));

        let meta = parse("");
        assert!(meta.scheme_end.is_none());
        assert!(meta.auth_meta.is_none());
        assert!(meta.path_bounds.is_none());
        assert!(meta.query_start.is_none());
        assert!(meta.fragment_start.is_none());
    }

    #[test]
    fn question_mark_in_fragment() {
        let meta = parse("a#b?c");
        assert_eq!(meta.path_bounds, Some((0, 1)));
        assert_eq!(meta.query_start, None);
        assert_eq!(meta.fragment_start, Some(1));
    }

    #[test]
    fn unclosed_bracket() {
        let s = "//[::1:80";
        let auth = parse(s).auth_meta.unwrap();
        assert_eq!(&s[auth.host_bounds.0..auth.host_bounds.1], "[::1");
        assert_eq!(auth.port_start, Some(7));
    }
}
