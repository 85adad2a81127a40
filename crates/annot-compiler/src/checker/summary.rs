//! Declared types collected while compiling, for reporting.

use annot_core::TypeAnnotation;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleSummary<'src> {
    /// Module variables in symbol order.
    pub variables: Vec<VariableSummary<'src>>,
    /// Functions in the order they finished compiling; the module body is last.
    pub functions: Vec<FunctionSummary<'src>>,
}

impl<'src> ModuleSummary<'src> {
    pub fn variable(&self, name: &str) -> Option<&VariableSummary<'src>> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSummary<'src>> {
        self.functions.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableSummary<'src> {
    pub name: &'src str,
    pub symbol: usize,
    /// `None` when unannotated or when the module type table was already full.
    pub declared_type: Option<TypeAnnotation<'src>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSummary<'src> {
    /// Nested functions are qualified by their enclosing function: `outer.inner`.
    pub name: String,
    pub return_type: Option<TypeAnnotation<'src>>,
    pub parameters: Vec<LocalSummary<'src>>,
    pub locals: Vec<LocalSummary<'src>>,
}

impl FunctionSummary<'_> {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            return_type: None,
            parameters: Vec::new(),
            locals: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalSummary<'src> {
    pub name: &'src str,
    pub slot: usize,
    pub declared_type: Option<TypeAnnotation<'src>>,
}
