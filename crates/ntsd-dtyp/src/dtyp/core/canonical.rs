//! Canonical-string comparison for identifiers.
//!
//! Identifiers and GUIDs compare against each other and against text supplied
//! from outside (directory attributes, configuration) through their canonical
//! string form, ignoring ASCII case.

use std::borrow::Cow;

/// A value with a canonical text form.
pub trait Canonical {
    /// Returns the canonical string form.
    fn canonical(&self) -> Cow<'_, str>;
}

impl Canonical for str {
    fn canonical(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Canonical for String {
    fn canonical(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: Canonical + ?Sized> Canonical for &T {
    fn canonical(&self) -> Cow<'_, str> {
        (**self).canonical()
    }
}

/// Compares two values by canonical string, ignoring ASCII case.
///
/// ```rust
/// use ntsd_dtyp::dtyp::{Sid, canonical_eq};
///
/// let sid = Sid::new(1, 5, vec![18]).unwrap();
/// assert!(canonical_eq(&sid, "s-1-5-18"));
/// ```
#[must_use]
pub fn canonical_eq<A, B>(a: &A, b: &B) -> bool
where
    A: Canonical + ?Sized,
    B: Canonical + ?Sized,
{
    a.canonical().eq_ignore_ascii_case(&b.canonical())
}
