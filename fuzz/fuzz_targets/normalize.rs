#![no_main]
use lax_uri::normalize::remove_dot_segments;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let out = remove_dot_segments(data);

    assert!(out.split('/').all(|seg| seg != "." && seg != ".."));
    assert!(out.len() <= data.len());
    if data.starts_with('/') {
        assert!(out.starts_with('/'));
    }

    // `remove_dot_segments` is idempotent.
    assert_eq!(remove_dot_segments(&out), out);
});
