#![no_main]
use lax_uri::Uri;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let r = Uri::parse(data);
    assert_eq!(r.as_str(), data);
    assert_eq!(Uri::parse(data.to_owned()), r);

    if let Some(a) = r.authority() {
        assert!(r.path().is_some_and(|p| p.is_empty() || p.starts_with('/')));
        assert!(a.as_str().contains(a.host()));
        if let Some(p) = a.port() {
            assert!(!p.is_empty() && !p.contains(':'));
            assert!(a.as_str().ends_with(p));
        }
    }
    if let Some(q) = r.query() {
        assert!(q.starts_with('?') && !q.contains('#'));
    }
    if let Some(f) = r.fragment() {
        assert!(f.starts_with('#'));
    }

    let canonical = r.to_string();
    assert!(canonical.len() <= data.len());
});
