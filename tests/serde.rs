#![cfg(feature = "serde")]

use lax_uri::Uri;

#[test]
fn serialize() {
    let uri = Uri::parse("http://example.com:/a?b#c");
    assert_eq!(
        serde_json::to_string(&uri).unwrap(),
        r#""http://example.com/a?b#c""#
    );
}

#[test]
fn deserialize() {
    let uri: Uri<&str> = serde_json::from_str(r#""foo://u@h:1/p?q#f""#).unwrap();
    assert_eq!(uri.scheme(), Some("foo"));
    assert_eq!(uri.port(), Some("1"));
    assert_eq!(uri.fragment(), Some("#f"));

    let uri: Uri<String> = serde_json::from_str(r#""../a b""#).unwrap();
    assert_eq!(uri.path().unwrap(), "../a b");

    // Any string is accepted.
    let uri: Uri<String> = serde_json::from_str(r#""::[]@@""#).unwrap();
    assert_eq!(uri.as_str(), "::[]@@");

    assert!(serde_json::from_str::<Uri<String>>("42").is_err());
}
