//! Per-function annotation scope.

use crate::MAX_LOCALS;
use crate::annotation::TypeAnnotation;

/// Annotations known while compiling one function or method body.
///
/// Local annotations are indexed by the slot the enclosing compiler assigned
/// to each local, so this table must be sized by the same [`MAX_LOCALS`] bound
/// the compiler uses for its locals array. Slots outside that range read as
/// "no annotation" and writes to them are ignored.
#[derive(Clone, PartialEq, Eq)]
pub struct FunctionTypeScope<'src> {
    locals: [Option<TypeAnnotation<'src>>; MAX_LOCALS],
    return_type: Option<TypeAnnotation<'src>>,
    /// Statically known type of the expression compiled last. Volatile.
    expression_type: Option<TypeAnnotation<'src>>,
}

impl Default for FunctionTypeScope<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'src> FunctionTypeScope<'src> {
    pub fn new() -> Self {
        Self {
            locals: [None; MAX_LOCALS],
            return_type: None,
            expression_type: None,
        }
    }

    /// Forget every annotation. Idempotent.
    pub fn reset(&mut self) {
        self.locals.fill(None);
        self.return_type = None;
        self.expression_type = None;
    }

    /// Record the declared type of the local in `slot`, replacing any previous one.
    pub fn set_local_type(&mut self, slot: usize, annotation: TypeAnnotation<'src>) {
        if let Some(entry) = self.locals.get_mut(slot) {
            *entry = Some(annotation);
        }
    }

    /// Forget the annotation in `slot`, e.g. when the slot is reused by an
    /// unannotated local.
    pub fn clear_local_type(&mut self, slot: usize) {
        if let Some(entry) = self.locals.get_mut(slot) {
            *entry = None;
        }
    }

    #[inline]
    pub fn local_type(&self, slot: usize) -> Option<TypeAnnotation<'src>> {
        self.locals.get(slot).copied().flatten()
    }

    /// Record the declared return type. A later call replaces an earlier one.
    pub fn set_return_type(&mut self, annotation: TypeAnnotation<'src>) {
        self.return_type = Some(annotation);
    }

    #[inline]
    pub fn return_type(&self) -> Option<TypeAnnotation<'src>> {
        self.return_type
    }

    pub fn set_expression_type(&mut self, annotation: TypeAnnotation<'src>) {
        self.expression_type = Some(annotation);
    }

    /// Mark the type of the next expression as unknown.
    pub fn clear_expression_type(&mut self) {
        self.expression_type = None;
    }

    #[inline]
    pub fn expression_type(&self) -> Option<TypeAnnotation<'src>> {
        self.expression_type
    }

    /// Slots holding an annotation, in slot order.
    pub fn annotated_locals(&self) -> impl Iterator<Item = (usize, TypeAnnotation<'src>)> + '_ {
        self.locals
            .iter()
            .enumerate()
            .filter_map(|(slot, ty)| ty.map(|ty| (slot, ty)))
    }
}

impl std::fmt::Debug for FunctionTypeScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTypeScope")
            .field("locals", &self.annotated_locals().collect::<Vec<_>>())
            .field("return_type", &self.return_type)
            .field("expression_type", &self.expression_type)
            .finish()
    }
}
