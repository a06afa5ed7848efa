//! Module for reference resolution.

use crate::{
    component::{Components, Path},
    imp::RawUri,
    normalize, Uri,
};
use alloc::{borrow::Cow, string::String};
use borrow_or_share::Bos;
use core::{any::Any, fmt};

/// An error occurred when resolving a URI reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolveError {
    /// The reference is neither text nor a [`Uri`].
    ///
    /// Only a dynamically typed reference (`&dyn Any`) can cause this.
    InvalidReferenceKind,
    /// The URI to make absolute has no scheme or no authority.
    MissingSchemeOrAuthority,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidReferenceKind => "reference is neither a string nor a URI",
            Self::MissingSchemeOrAuthority => "URI must have a scheme and an authority",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for ResolveError {}

/// A URI reference to resolve, either as text or already parsed.
///
/// The text variant is parsed when resolution happens.
#[derive(Clone, Copy, Debug)]
pub enum Reference<'a> {
    /// A URI reference as text.
    Str(&'a str),
    /// A parsed URI reference.
    Uri(Uri<&'a str>),
}

impl<'a> Reference<'a> {
    /// Returns the reference as a parsed `Uri`.
    #[must_use]
    pub fn into_uri(self) -> Uri<&'a str> {
        match self {
            Self::Str(s) => Uri::parse(s),
            Self::Uri(uri) => uri,
        }
    }
}

/// Conversion into a [`Reference`] at the call boundary of reference resolution.
///
/// Implemented for string slices, `&String`, parsed [`Uri`]s, [`Reference`] itself
/// and `&dyn Any`. The last one checks at runtime whether the value is a
/// `&'static str`, a `String`, a `Uri<String>` or a `Uri<&'static str>`.
///
/// # Examples
///
/// ```
/// use lax_uri::{resolve::ResolveError, Uri};
/// use std::any::Any;
///
/// let base = Uri::parse("http://a/b/c/d;p?q");
///
/// let reference: Box<dyn Any> = Box::new(String::from("../g"));
/// assert_eq!(base.resolve_reference(&*reference).unwrap(), "http://a/b/g");
///
/// let reference: Box<dyn Any> = Box::new(42u32);
/// assert_eq!(
///     base.resolve_reference(&*reference).unwrap_err(),
///     ResolveError::InvalidReferenceKind
/// );
/// ```
pub trait IntoReference<'a> {
    /// Performs the conversion.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidReferenceKind`] if the value is
    /// neither text nor a `Uri`.
    fn into_reference(self) -> Result<Reference<'a>, ResolveError>;
}

impl<'a> IntoReference<'a> for Reference<'a> {
    #[inline]
    fn into_reference(self) -> Result<Reference<'a>, ResolveError> {
        Ok(self)
    }
}

impl<'a> IntoReference<'a> for &'a str {
    #[inline]
    fn into_reference(self) -> Result<Reference<'a>, ResolveError> {
        Ok(Reference::Str(self))
    }
}

impl<'a> IntoReference<'a> for &'a String {
    #[inline]
    fn into_reference(self) -> Result<Reference<'a>, ResolveError> {
        Ok(Reference::Str(self))
    }
}

impl<'a> IntoReference<'a> for Uri<&'a str> {
    #[inline]
    fn into_reference(self) -> Result<Reference<'a>, ResolveError> {
        Ok(Reference::Uri(self))
    }
}

impl<'a, T: Bos<str>> IntoReference<'a> for &'a Uri<T> {
    #[inline]
    fn into_reference(self) -> Result<Reference<'a>, ResolveError> {
        Ok(Reference::Uri(self.borrow()))
    }
}

impl<'a> IntoReference<'a> for &'a (dyn Any + 'static) {
    fn into_reference(self) -> Result<Reference<'a>, ResolveError> {
        if let Some(s) = self.downcast_ref::<&'static str>() {
            Ok(Reference::Str(*s))
        } else if let Some(s) = self.downcast_ref::<String>() {
            Ok(Reference::Str(s))
        } else if let Some(uri) = self.downcast_ref::<Uri<String>>() {
            Ok(Reference::Uri(uri.borrow()))
        } else if let Some(uri) = self.downcast_ref::<Uri<&'static str>>() {
            Ok(Reference::Uri(*uri))
        } else {
            Err(ResolveError::InvalidReferenceKind)
        }
    }
}

/// A URI reference resolver against a fixed base.
///
/// # Examples
///
/// ```
/// use lax_uri::{resolve::Resolver, Uri};
///
/// let base = Uri::parse("http://example.com/foo/bar");
/// let resolver = Resolver::with_base(base);
///
/// assert_eq!(resolver.resolve("baz").unwrap(), "http://example.com/foo/baz");
/// assert_eq!(resolver.resolve("../baz").unwrap(), "http://example.com/baz");
/// assert_eq!(resolver.resolve("?baz").unwrap(), "http://example.com/foo/bar?baz");
/// ```
#[derive(Clone, Copy)]
#[must_use]
pub struct Resolver<T> {
    base: Uri<T>,
}

impl<T: Bos<str>> Resolver<T> {
    /// Creates a new `Resolver` with the given base.
    ///
    /// The base is expected to have a scheme. A fragment on the base
    /// is ignored by resolution.
    pub fn with_base(base: Uri<T>) -> Self {
        Self { base }
    }

    /// Returns the base URI.
    #[must_use]
    pub fn base(&self) -> &Uri<T> {
        &self.base
    }

    /// Resolves the given reference against the configured base.
    ///
    /// See [`Uri::resolve_reference`] for the exact behavior of this method.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the same conditions as [`Uri::resolve_reference`].
    pub fn resolve<'r, R>(&self, reference: R) -> Result<Uri<String>, ResolveError>
    where
        R: IntoReference<'r>,
    {
        self.base.resolve_reference(reference)
    }
}

impl<T: Bos<str>> fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("base", &self.base)
            .finish()
    }
}

pub(crate) fn resolve(base: RawUri<'_>, /* reference */ r: RawUri<'_>) -> Uri<String> {
    let (t_scheme, t_authority, t_query);
    let t_path: Option<Cow<'_, str>>;

    let r_authority = r.authority();
    let r_path = r.path();
    let r_query = r.query();

    if let Some(r_scheme) = r.scheme() {
        t_scheme = Some(r_scheme);
        t_authority = r_authority;
        t_path = r_path.map(|p| Cow::Owned(p.remove_dot_segments()));
        t_query = r_query;
    } else {
        if r_authority.is_some() {
            t_authority = r_authority;
            t_path = r_path.map(|p| Cow::Owned(p.remove_dot_segments()));
            t_query = r_query;
        } else {
            match r_path.filter(|p| !p.is_empty()) {
                None => {
                    t_path = base.path().map(|p| Cow::Borrowed(p.as_str()));
                    t_query = r_query.or(base.query());
                }
                Some(r_path) => {
                    t_path = Some(Cow::Owned(if r_path.is_absolute() {
                        r_path.remove_dot_segments()
                    } else {
                        normalize::remove_dot_segments(&merge(base, r_path))
                    }));
                    t_query = r_query;
                }
            }
            t_authority = base.authority();
        }
        t_scheme = base.scheme();
    }

    Components {
        scheme: t_scheme,
        authority: t_authority,
        path: t_path.as_deref(),
        query: t_query,
        fragment: r.fragment(),
    }
    .to_uri()
}

/// Merges a relative-path reference with the path of the base.
///
/// See [Section 5.2.3 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.3).
/// A base with an authority and an empty path merges as `"/"`, so that
/// `http://a` with `g` gives `http://a/g` rather than `http://ag`.
fn merge(base: RawUri<'_>, r_path: &Path) -> String {
    let base_path = base.path().map_or("", |p| p.directory());
    let prefix = if base.authority().is_some() && base_path.is_empty() {
        "/"
    } else {
        base_path
    };

    let mut buf = String::with_capacity(prefix.len() + r_path.len());
    buf.push_str(prefix);
    buf.push_str(r_path);
    buf
}
