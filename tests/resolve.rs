use lax_uri::{
    resolve::{Reference, ResolveError, Resolver},
    Uri,
};
use std::any::Any;

trait Test {
    fn pass(&self, r: &str, res: &str);
}

impl Test for Uri<&str> {
    #[track_caller]
    fn pass(&self, r: &str, expected: &str) {
        let resolver = Resolver::with_base(*self);
        assert_eq!(resolver.resolve(r).unwrap(), expected);

        // Resolving a parsed reference gives the same result.
        let r = Uri::parse(r);
        assert_eq!(self.resolve_reference(&r).unwrap(), expected);
    }
}

#[test]
fn resolve() {
    // Examples from Section 5.4 of RFC 3986.
    let base = Uri::parse("http://a/b/c/d;p?q");

    base.pass("g:h", "g:h");
    base.pass("g", "http://a/b/c/g");
    base.pass("./g", "http://a/b/c/g");
    base.pass("g/", "http://a/b/c/g/");
    base.pass("/g", "http://a/g");
    base.pass("//g", "http://g");
    base.pass("?y", "http://a/b/c/d;p?y");
    base.pass("g?y", "http://a/b/c/g?y");
    base.pass("#s", "http://a/b/c/d;p?q#s");
    base.pass("g#s", "http://a/b/c/g#s");
    base.pass("g?y#s", "http://a/b/c/g?y#s");
    base.pass(";x", "http://a/b/c/;x");
    base.pass("g;x", "http://a/b/c/g;x");
    base.pass("g;x?y#s", "http://a/b/c/g;x?y#s");
    base.pass("", "http://a/b/c/d;p?q");
    base.pass(".", "http://a/b/c/");
    base.pass("./", "http://a/b/c/");
    base.pass("..", "http://a/b/");
    base.pass("../", "http://a/b/");
    base.pass("../g", "http://a/b/g");
    base.pass("../..", "http://a/");
    base.pass("../../", "http://a/");
    base.pass("../../g", "http://a/g");

    // Abnormal examples.
    base.pass("../../../g", "http://a/g");
    base.pass("../../../../g", "http://a/g");

    base.pass("/./g", "http://a/g");
    base.pass("/../g", "http://a/g");
    base.pass("g.", "http://a/b/c/g.");
    base.pass(".g", "http://a/b/c/.g");
    base.pass("g..", "http://a/b/c/g..");
    base.pass("..g", "http://a/b/c/..g");

    base.pass("./../g", "http://a/b/g");
    base.pass("./g/.", "http://a/b/c/g/");
    base.pass("g/./h", "http://a/b/c/g/h");
    base.pass("g/../h", "http://a/b/c/h");
    base.pass("g;x=1/./y", "http://a/b/c/g;x=1/y");
    base.pass("g;x=1/../y", "http://a/b/c/y");

    base.pass("g?y/./x", "http://a/b/c/g?y/./x");
    base.pass("g?y/../x", "http://a/b/c/g?y/../x");
    base.pass("g#s/./x", "http://a/b/c/g#s/./x");
    base.pass("g#s/../x", "http://a/b/c/g#s/../x");

    // Strict parsers take a scheme as is.
    base.pass("http:g", "http:g");
}

#[test]
fn resolve_other() {
    let base = Uri::parse("http://a/b/c");
    base.pass("//h/../x", "http://h/x");
    base.pass("g:./x/../y", "g:/y");
    base.pass("g/../../../x/./y", "http://a/x/y");

    // A base with an authority and an empty path merges with "/".
    let base = Uri::parse("http://a");
    base.pass("g", "http://a/g");
    base.pass("?q", "http://a?q");
    base.pass("", "http://a");

    // The fragment of the base is never carried over.
    let base = Uri::parse("http://a/b#f");
    base.pass("", "http://a/b");
    base.pass("#g", "http://a/b#g");

    let base = Uri::parse("http://u:p@h:80/p/q?x");
    base.pass("../r#s", "http://u:p@h:80/r#s");
    base.pass("r", "http://u:p@h:80/p/r");

    let base = Uri::parse("file:///etc/hosts");
    base.pass("../passwd", "file:///passwd");
    base.pass("group", "file:///etc/group");

    // Bases without an authority.
    let base = Uri::parse("mailto:x@y");
    base.pass("?subject=hi", "mailto:x@y?subject=hi");

    let base = Uri::parse("foo:a/b");
    base.pass("../c", "foo:/c");
    base.pass(".", "foo:a/");

    let base = Uri::parse("foo:");
    base.pass("g", "foo:g");
    base.pass("..", "foo:");
    base.pass("?q", "foo:?q");
}

#[test]
fn resolve_relative_base() {
    // No scheme on the base gives no scheme on the target.
    let base = Uri::parse("/a/b");
    base.pass("c", "/a/c");

    let base = Uri::parse("a/b");
    base.pass("c", "a/c");
}

#[test]
fn resolve_output_is_reparsed() {
    // The target's components agree with its text.
    let base = Uri::parse("foo:/");
    let t = base.resolve_reference(".//@@").unwrap();
    assert_eq!(t.as_str(), "foo://@@");
    assert_eq!(t.userinfo(), Some("@"));
    assert_eq!(t.host(), Some(""));
    assert_eq!(t.path().unwrap(), "");

    let t = Uri::parse("http://a/b/c/d;p?q")
        .resolve_reference("g?y#s")
        .unwrap();
    assert_eq!(t.scheme(), Some("http"));
    assert_eq!(t.host(), Some("a"));
    assert_eq!(t.path().unwrap(), "/b/c/g");
    assert_eq!(t.query(), Some("?y"));
    assert_eq!(t.fragment(), Some("#s"));
}

#[test]
fn reference_kinds() {
    let base = Uri::parse("http://a/b/c/d;p?q");

    let s = String::from("../g");
    assert_eq!(base.resolve_reference(&s).unwrap(), "http://a/b/g");
    assert_eq!(base.resolve_reference(Uri::parse("../g")).unwrap(), "http://a/b/g");
    assert_eq!(
        base.resolve_reference(Reference::Str("../g")).unwrap(),
        "http://a/b/g"
    );

    let owned: Uri<String> = Uri::parse(String::from("../g"));
    assert_eq!(base.resolve_reference(&owned).unwrap(), "http://a/b/g");

    let dynamic: [Box<dyn Any>; 4] = [
        Box::new("../g"),
        Box::new(String::from("../g")),
        Box::new(Uri::parse("../g")),
        Box::new(Uri::parse(String::from("../g"))),
    ];
    for r in &dynamic {
        assert_eq!(base.resolve_reference(&**r).unwrap(), "http://a/b/g");
    }

    let invalid: [Box<dyn Any>; 3] = [Box::new(42u32), Box::new(()), Box::new(vec!["../g"])];
    for r in &invalid {
        assert_eq!(
            base.resolve_reference(&**r).unwrap_err(),
            ResolveError::InvalidReferenceKind
        );
    }

    let resolver = Resolver::with_base(base);
    let r: Box<dyn Any> = Box::new(1.5f64);
    assert_eq!(
        resolver.resolve(&*r).unwrap_err(),
        ResolveError::InvalidReferenceKind
    );
}

#[test]
fn resolver() {
    let resolver = Resolver::with_base(Uri::parse(String::from("http://example.com/foo/bar")));
    assert_eq!(resolver.base(), "http://example.com/foo/bar");
    assert_eq!(resolver.resolve("baz").unwrap(), "http://example.com/foo/baz");
    assert_eq!(resolver.resolve("../baz").unwrap(), "http://example.com/baz");
    assert_eq!(
        format!("{resolver:?}"),
        r#"Resolver { base: Uri { scheme: Some("http"), authority: Some(Authority { userinfo: None, host: "example.com", port: None }), path: Some("/foo/bar"), query: None, fragment: None } }"#
    );
}

#[test]
fn error_display() {
    assert_eq!(
        ResolveError::InvalidReferenceKind.to_string(),
        "reference is neither a string nor a URI"
    );
    assert_eq!(
        ResolveError::MissingSchemeOrAuthority.to_string(),
        "URI must have a scheme and an authority"
    );
}
