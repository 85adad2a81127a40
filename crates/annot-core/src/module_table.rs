//! Module-level variable annotations.

use crate::MAX_MODULE_TYPES;
use crate::annotation::TypeAnnotation;

/// Declared types of module variables, keyed by module symbol index.
///
/// Append-only and bounded at [`MAX_MODULE_TYPES`] entries. Once full, further
/// declarations are dropped: no error, no eviction, no overwrite. Lookups scan
/// in insertion order and return the first entry with a matching index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTypeTable<'src> {
    entries: Vec<(usize, TypeAnnotation<'src>)>,
}

impl Default for ModuleTypeTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'src> ModuleTypeTable<'src> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Record the declared type of the module variable `symbol`.
    ///
    /// Does not look for an existing entry with the same index; callers are
    /// expected to declare each symbol once.
    pub fn set_type(&mut self, symbol: usize, annotation: TypeAnnotation<'src>) {
        if self.is_full() {
            tracing::debug!(symbol, %annotation, "module type table full, annotation dropped");
            return;
        }
        self.entries.push((symbol, annotation));
    }

    pub fn type_of(&self, symbol: usize) -> Option<TypeAnnotation<'src>> {
        self.entries
            .iter()
            .find(|(index, _)| *index == symbol)
            .map(|(_, ty)| *ty)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_MODULE_TYPES
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, TypeAnnotation<'src>)> + '_ {
        self.entries.iter().copied()
    }
}
