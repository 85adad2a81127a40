//! Type annotations as borrowed source spans, and the match policy between them.

use std::fmt;

use serde::Serialize;

/// A type name as written in the source, e.g. the `Num` in `var x: Num = 1`.
///
/// Borrows directly from the source buffer and is never normalized. Two
/// annotations are equal when their bytes are equal. An absent annotation is
/// `None`, which is not the same thing as an empty span.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeAnnotation<'src>(&'src str);

impl<'src> TypeAnnotation<'src> {
    #[inline]
    pub fn new(text: &'src str) -> Self {
        Self(text)
    }

    #[inline]
    pub fn as_str(self) -> &'src str {
        self.0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }
}

impl<'src> From<&'src str> for TypeAnnotation<'src> {
    fn from(text: &'src str) -> Self {
        Self(text)
    }
}

impl fmt::Debug for TypeAnnotation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeAnnotation({:?})", self.0)
    }
}

impl fmt::Display for TypeAnnotation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Whether a declared type and an inferred type agree.
///
/// Unknown matches everything: if either side is `None` the answer is `true`.
/// Otherwise the comparison is purely lexical, so `Int` and `Num` never match
/// and no whitespace or case folding is applied.
pub fn types_match(a: Option<TypeAnnotation<'_>>, b: Option<TypeAnnotation<'_>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.0.as_bytes() == b.0.as_bytes(),
        _ => true,
    }
}
