#![allow(missing_debug_implementations)]

use crate::{
    component::{Authority, Components, Path},
    parse,
    resolve::{self, IntoReference, ResolveError},
};
use alloc::{borrow::ToOwned, string::String};
use borrow_or_share::{BorrowOrShare, Bos};
use core::{convert::Infallible, hash, num::NonZeroUsize, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub trait Parse {
    type Val;

    fn parse(self) -> Uri<Self::Val>;
}

impl<'a> Parse for &'a str {
    type Val = &'a str;

    fn parse(self) -> Uri<&'a str> {
        Uri {
            meta: parse::parse(self),
            val: self,
        }
    }
}

impl Parse for String {
    type Val = Self;

    fn parse(self) -> Uri<String> {
        Uri {
            meta: parse::parse(&self),
            val: self,
        }
    }
}

#[derive(Clone, Copy, Default)]
pub struct Meta {
    // The index of the trailing colon.
    pub scheme_end: Option<NonZeroUsize>,
    pub auth_meta: Option<AuthMeta>,
    pub path_bounds: Option<(usize, usize)>,
    // The index of the leading question mark.
    pub query_start: Option<usize>,
    // The index of the leading number sign.
    pub fragment_start: Option<usize>,
}

#[derive(Clone, Copy, Default)]
pub struct AuthMeta {
    // Excludes the leading "//".
    pub bounds: (usize, usize),
    pub host_bounds: (usize, usize),
    // One byte past the colon. `None` if the port is absent or empty.
    pub port_start: Option<usize>,
}

/// A borrowed URI reference with its metadata, used for internal plumbing.
#[derive(Clone, Copy)]
pub struct RawUri<'a> {
    val: &'a str,
    meta: Meta,
}

impl<'a> RawUri<'a> {
    pub fn scheme(self) -> Option<&'a str> {
        self.meta.scheme_end.map(|i| &self.val[..i.get()])
    }

    pub fn authority(self) -> Option<Authority<'a>> {
        self.meta
            .auth_meta
            .map(|meta| Authority::new(self.val, meta))
    }

    pub fn path(self) -> Option<&'a Path> {
        self.meta
            .path_bounds
            .map(|(start, end)| Path::new(&self.val[start..end]))
    }

    pub fn query(self) -> Option<&'a str> {
        let end = self.meta.fragment_start.unwrap_or(self.val.len());
        self.meta.query_start.map(|start| &self.val[start..end])
    }

    pub fn fragment(self) -> Option<&'a str> {
        self.meta.fragment_start.map(|start| &self.val[start..])
    }

    pub fn components(self) -> Components<'a> {
        Components {
            scheme: self.scheme(),
            authority: self.authority(),
            path: self.path().map(Path::as_str),
            query: self.query(),
            fragment: self.fragment(),
        }
    }
}

/// A [URI reference] defined in RFC 3986, parsed permissively.
///
/// [URI reference]: https://datatracker.ietf.org/doc/html/rfc3986/#section-4.1
///
/// Parsing never fails: ill-formed input yields absent or empty components
/// instead of an error.
///
/// # Variants
///
/// Two variants of `Uri` are available: `Uri<&str>` (borrowed) and `Uri<String>` (owned).
///
/// `Uri<&'a str>` outputs references with lifetime `'a` where possible
/// (thanks to [`borrow-or-share`](borrow_or_share)):
///
/// ```
/// use lax_uri::Uri;
///
/// // Keep a reference to the host after dropping the `Uri`.
/// let host = Uri::parse("http://example.com/").host();
/// assert_eq!(host, Some("example.com"));
/// ```
///
/// # Comparison
///
/// `Uri`s are compared by their [canonical form](#canonical-form) byte by byte.
/// No normalization is performed prior to comparison, so `"HTTP://a"` and
/// `"http://a"` are not equal.
///
/// # Canonical form
///
/// The [`Display`](core::fmt::Display) implementation recomposes the components
/// into `scheme ":" "//" [userinfo "@"] host [":" port] path query fragment`,
/// leaving out what is absent. For almost every input the canonical form
/// equals the parsed text returned by [`as_str`](Self::as_str);
/// they differ only where the parser discards text, such as an empty port.
///
/// ```
/// use lax_uri::Uri;
///
/// let uri = Uri::parse("http://example.com:/");
/// assert_eq!(uri.as_str(), "http://example.com:/");
/// assert_eq!(uri.to_string(), "http://example.com/");
/// assert_eq!(uri, "http://example.com/");
/// ```
///
/// # Examples
///
/// Parse and extract components from a URI:
///
/// ```
/// use lax_uri::Uri;
///
/// let s = "foo://user@example.com:8042/over/there?name=ferret#nose";
/// let uri = Uri::parse(s);
///
/// assert_eq!(uri.scheme(), Some("foo"));
/// assert_eq!(uri.userinfo(), Some("user"));
/// assert_eq!(uri.host(), Some("example.com"));
/// assert_eq!(uri.port(), Some("8042"));
/// assert_eq!(uri.path().unwrap(), "/over/there");
/// assert_eq!(uri.query(), Some("?name=ferret"));
/// assert_eq!(uri.fragment(), Some("#nose"));
/// ```
#[derive(Clone, Copy)]
pub struct Uri<T> {
    /// Value of the URI reference.
    val: T,
    /// Metadata of the URI reference.
    /// Should be identical to parser output with `val` as input.
    meta: Meta,
}

impl<T> Uri<T> {
    /// Parses a URI reference from a string into a `Uri`.
    ///
    /// The return type is `Uri<&str>` for `I = &str` and `Uri<String>` for `I = String`.
    ///
    /// This never fails. Text that does not fit the generic syntax is decomposed
    /// on a best-effort basis, and a string without any delimiter becomes a
    /// relative reference consisting of a path only.
    ///
    /// # Examples
    ///
    /// ```
    /// use lax_uri::Uri;
    ///
    /// let uri = Uri::parse("?q=1");
    /// assert!(uri.path().is_none());
    /// assert_eq!(uri.query(), Some("?q=1"));
    ///
    /// let uri: Uri<String> = Uri::parse(String::from("http://[::1]:8080"));
    /// assert_eq!(uri.host(), Some("[::1]"));
    /// assert_eq!(uri.port(), Some("8080"));
    /// ```
    #[must_use]
    pub fn parse<I>(input: I) -> Self
    where
        I: Parse<Val = T>,
    {
        input.parse()
    }
}

impl Uri<String> {
    /// Consumes this `Uri<String>` and yields the underlying [`String`].
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.val
    }
}

impl Uri<&str> {
    /// Creates a new `Uri<String>` by cloning the contents of this `Uri<&str>`.
    #[inline]
    #[must_use]
    pub fn to_owned(&self) -> Uri<String> {
        Uri {
            val: self.val.to_owned(),
            meta: self.meta,
        }
    }
}

impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> Uri<T> {
    pub(crate) fn make_ref(&'i self) -> RawUri<'o> {
        RawUri {
            val: self.val.borrow_or_share(),
            meta: self.meta,
        }
    }

    /// Borrows this `Uri` as `Uri<&str>`.
    #[inline]
    #[must_use]
    pub fn borrow(&'i self) -> Uri<&'o str> {
        Uri {
            val: self.val.borrow_or_share(),
            meta: self.meta,
        }
    }

    /// Returns the text this `Uri` was parsed from, verbatim.
    ///
    /// Use [`to_string`](alloc::string::ToString::to_string) for the canonical form.
    #[must_use]
    pub fn as_str(&'i self) -> &'o str {
        self.val.borrow_or_share()
    }

    /// Returns the optional [scheme] component, without the trailing colon.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.1
    ///
    /// # Examples
    ///
    /// ```
    /// use lax_uri::Uri;
    ///
    /// assert_eq!(Uri::parse("http://example.com/").scheme(), Some("http"));
    /// assert_eq!(Uri::parse("/path/to/file").scheme(), None);
    /// // A scheme must start with a letter.
    /// assert_eq!(Uri::parse("1http://example.com/").scheme(), None);
    /// ```
    #[must_use]
    pub fn scheme(&'i self) -> Option<&'o str> {
        self.make_ref().scheme()
    }

    /// Returns the optional [authority] component.
    ///
    /// The authority is present if and only if the hierarchical part starts with `"//"`.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.2
    ///
    /// # Examples
    ///
    /// ```
    /// use lax_uri::Uri;
    ///
    /// let uri = Uri::parse("http://user@example.com:8080/");
    /// let auth = uri.authority().unwrap();
    /// assert_eq!(auth.as_str(), "user@example.com:8080");
    ///
    /// // An empty authority is still an authority.
    /// assert!(Uri::parse("file:///etc/hosts").authority().is_some());
    /// assert!(Uri::parse("mailto:user@example.com").authority().is_none());
    /// ```
    #[must_use]
    pub fn authority(&'i self) -> Option<Authority<'o>> {
        self.make_ref().authority()
    }

    /// Returns the optional [userinfo] subcomponent.
    ///
    /// [userinfo]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.2.1
    #[must_use]
    pub fn userinfo(&'i self) -> Option<&'o str> {
        self.authority().and_then(|auth| auth.userinfo())
    }

    /// Returns the optional [host] subcomponent.
    ///
    /// The host is present if and only if the authority is present.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.2.2
    #[must_use]
    pub fn host(&'i self) -> Option<&'o str> {
        self.authority().map(|auth| auth.host())
    }

    /// Returns the optional [port] subcomponent.
    ///
    /// An empty port is treated as absent.
    ///
    /// [port]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.2.3
    #[must_use]
    pub fn port(&'i self) -> Option<&'o str> {
        self.authority().and_then(|auth| auth.port())
    }

    /// Returns the optional [path] component.
    ///
    /// The path is absent when the URI reference has neither an authority nor
    /// any text before its query or fragment. Otherwise it is present,
    /// although it may be empty.
    ///
    /// [path]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.3
    ///
    /// # Examples
    ///
    /// ```
    /// use lax_uri::Uri;
    ///
    /// assert_eq!(Uri::parse("http://example.com/").path().unwrap(), "/");
    /// assert_eq!(Uri::parse("http://example.com").path().unwrap(), "");
    /// assert_eq!(Uri::parse("mailto:user@example.com").path().unwrap(), "user@example.com");
    /// assert!(Uri::parse("#top").path().is_none());
    /// ```
    #[must_use]
    pub fn path(&'i self) -> Option<&'o Path> {
        self.make_ref().path()
    }

    /// Returns the optional [query] component, including the leading `'?'`.
    ///
    /// [query]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.4
    ///
    /// # Examples
    ///
    /// ```
    /// use lax_uri::Uri;
    ///
    /// assert_eq!(Uri::parse("http://example.com/?lang=en").query(), Some("?lang=en"));
    /// assert_eq!(Uri::parse("http://example.com/?").query(), Some("?"));
    /// assert_eq!(Uri::parse("ftp://192.0.2.1/").query(), None);
    /// ```
    #[must_use]
    pub fn query(&'i self) -> Option<&'o str> {
        self.make_ref().query()
    }

    /// Returns the optional [fragment] component, including the leading `'#'`.
    ///
    /// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.5
    ///
    /// # Examples
    ///
    /// ```
    /// use lax_uri::Uri;
    ///
    /// assert_eq!(Uri::parse("http://example.com/#usage").fragment(), Some("#usage"));
    /// assert_eq!(Uri::parse("ftp://192.0.2.1/").fragment(), None);
    /// ```
    #[must_use]
    pub fn fragment(&'i self) -> Option<&'o str> {
        self.make_ref().fragment()
    }
}

impl<T: Bos<str>> Uri<T> {
    pub(crate) fn components(&self) -> Components<'_> {
        self.make_ref().components()
    }

    /// Returns `true` if the scheme, host and path are all present
    /// and the fragment is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use lax_uri::Uri;
    ///
    /// assert!(Uri::parse("http://example.com/").is_absolute());
    /// assert!(!Uri::parse("http://example.com/#top").is_absolute());
    /// assert!(!Uri::parse("mailto:user@example.com").is_absolute());
    /// assert!(!Uri::parse("//example.com/").is_absolute());
    /// ```
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        let r = self.make_ref();
        r.scheme().is_some()
            && r.authority().is_some()
            && r.path().is_some()
            && r.fragment().is_none()
    }

    /// Returns a new `Uri` with the fragment removed.
    ///
    /// The result is parsed from the canonical form with the fragment cut off.
    ///
    /// # Examples
    ///
    /// ```
    /// use lax_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/a?b#c");
    /// assert_eq!(uri.defrag(), "http://example.com/a?b");
    /// assert_eq!(uri.defrag().fragment(), None);
    /// ```
    #[must_use]
    pub fn defrag(&self) -> Uri<String> {
        let mut buf = self.components().serialize();
        if let Some(i) = buf.find('#') {
            buf.truncate(i);
        }
        Uri::parse(buf)
    }

    /// Resolves this URI against itself and removes the fragment.
    ///
    /// This removes dot segments from the path, giving
    /// the [absolute URI] form of a URI with an authority.
    ///
    /// [absolute URI]: https://datatracker.ietf.org/doc/html/rfc3986/#section-4.3
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MissingSchemeOrAuthority`] if either
    /// the scheme or the authority is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use lax_uri::{resolve::ResolveError, Uri};
    ///
    /// let uri = Uri::parse("http://example.com/a/b/../c/./d?e#f");
    /// assert_eq!(uri.to_absolute().unwrap(), "http://example.com/a/c/d?e");
    ///
    /// let uri = Uri::parse("/a/b");
    /// assert_eq!(uri.to_absolute().unwrap_err(), ResolveError::MissingSchemeOrAuthority);
    /// ```
    pub fn to_absolute(&self) -> Result<Uri<String>, ResolveError> {
        let r = self.make_ref();
        if r.scheme().is_none() || r.authority().is_none() {
            return Err(ResolveError::MissingSchemeOrAuthority);
        }
        Ok(self.resolve_reference(self)?.defrag())
    }

    /// Resolves the given reference against this URI and returns the target URI.
    ///
    /// The reference may be a string, a parsed [`Uri`], or a dynamically typed
    /// value behind `&dyn Any`. See [`IntoReference`] for the accepted types.
    ///
    /// This method applies the reference resolution algorithm defined in
    /// [Section 5 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5).
    /// The target is recomposed into its canonical form and parsed again,
    /// so its components are consistent with its text.
    ///
    /// No normalization except the removal of dot segments is performed.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidReferenceKind`] if the reference is
    /// neither text nor a `Uri`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lax_uri::Uri;
    ///
    /// let base = Uri::parse("http://example.com/foo/bar");
    ///
    /// assert_eq!(base.resolve_reference("baz").unwrap(), "http://example.com/foo/baz");
    /// assert_eq!(base.resolve_reference("../baz").unwrap(), "http://example.com/baz");
    /// assert_eq!(base.resolve_reference("?baz").unwrap(), "http://example.com/foo/bar?baz");
    ///
    /// let reference = Uri::parse("//example.org");
    /// assert_eq!(base.resolve_reference(&reference).unwrap(), "http://example.org");
    /// ```
    pub fn resolve_reference<'r, R>(&self, reference: R) -> Result<Uri<String>, ResolveError>
    where
        R: IntoReference<'r>,
    {
        let reference = reference.into_reference()?.into_uri();
        Ok(resolve::resolve(self.make_ref(), reference.make_ref()))
    }

    /// Checks whether the canonical forms of two `Uri`s are identical.
    ///
    /// This is what `==` does. The comparison is purely syntactic.
    ///
    /// # Examples
    ///
    /// ```
    /// use lax_uri::Uri;
    ///
    /// let a = Uri::parse("http://example.com/");
    /// assert!(a.equals(&Uri::parse(String::from("http://example.com/"))));
    /// assert!(!a.equals(&Uri::parse("HTTP://example.com/")));
    /// ```
    #[must_use]
    pub fn equals<U: Bos<str>>(&self, other: &Uri<U>) -> bool {
        self.components().bytes().eq(other.components().bytes())
    }
}

impl<T: Bos<str>, U: Bos<str>> PartialEq<Uri<U>> for Uri<T> {
    fn eq(&self, other: &Uri<U>) -> bool {
        self.equals(other)
    }
}

impl<T: Bos<str>> PartialEq<str> for Uri<T> {
    fn eq(&self, other: &str) -> bool {
        self.components().bytes().eq(other.bytes())
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for str {
    fn eq(&self, other: &Uri<T>) -> bool {
        other == self
    }
}

impl<T: Bos<str>> PartialEq<&str> for Uri<T> {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for &str {
    fn eq(&self, other: &Uri<T>) -> bool {
        other == *self
    }
}

impl<T: Bos<str>> Eq for Uri<T> {}

impl<T: Bos<str>> hash::Hash for Uri<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        hash::Hash::hash(&self.components().serialize(), state);
    }
}

impl FromStr for Uri<String> {
    type Err = Infallible;

    /// Equivalent to `Ok(Uri::parse(s).to_owned())`.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Uri::parse(s).to_owned())
    }
}

impl<'a> From<Uri<&'a str>> for &'a str {
    #[inline]
    fn from(value: Uri<&'a str>) -> &'a str {
        value.val
    }
}

impl From<Uri<String>> for String {
    #[inline]
    fn from(value: Uri<String>) -> String {
        value.val
    }
}

impl From<Uri<&str>> for Uri<String> {
    #[inline]
    fn from(value: Uri<&str>) -> Self {
        value.to_owned()
    }
}

#[cfg(feature = "serde")]
impl<T: Bos<str>> Serialize for Uri<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.components().serialize())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri<&'de str> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <&str>::deserialize(deserializer).map(Uri::parse)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri<String> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Uri::parse)
    }
}
