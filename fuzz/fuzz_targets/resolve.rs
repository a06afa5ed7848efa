#![no_main]
use lax_uri::{resolve::Resolver, Uri};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    let (base, r) = (Uri::parse(data.0), Uri::parse(data.1));

    let t = base.resolve_reference(&r).unwrap();
    assert_eq!(t.fragment(), r.fragment());
    if let Some(scheme) = r.scheme().or(base.scheme()) {
        assert_eq!(t.scheme(), Some(scheme));
    }

    // Resolving text gives the same result as resolving the parsed reference.
    let t2 = Resolver::with_base(base).resolve(data.1).unwrap();
    assert_eq!(t, t2);

    if let Ok(abs) = base.to_absolute() {
        assert!(abs.fragment().is_none());
        assert_eq!(abs.to_absolute().unwrap(), abs);
    }
});
