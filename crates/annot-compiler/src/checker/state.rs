//! Compiler-side bookkeeping the annotation tables are keyed against.

use annot_core::{FunctionTypeScope, MAX_LOCALS, ModuleTypeTable};
use indexmap::IndexMap;
use rowan::TextRange;

use super::summary::{FunctionSummary, LocalSummary};

pub(crate) const MODULE_BODY_NAME: &str = "<module>";

#[derive(Debug, Clone, Copy)]
pub(crate) struct Local<'src> {
    pub(crate) name: &'src str,
    pub(crate) depth: u32,
    /// Where the declared type was written, if any.
    pub(crate) annotation: Option<TextRange>,
}

/// One function body being compiled. The first entry on the stack is the
/// implicit body of the module itself.
#[derive(Debug)]
pub(crate) struct FunctionState<'src> {
    pub(crate) name: String,
    pub(crate) types: FunctionTypeScope<'src>,
    /// Indexed by slot; never longer than `MAX_LOCALS`.
    pub(crate) locals: Vec<Local<'src>>,
    pub(crate) scope_depth: u32,
    pub(crate) return_annotation: Option<TextRange>,
    pub(crate) summary: FunctionSummary<'src>,
}

impl<'src> FunctionState<'src> {
    pub(crate) fn module_body() -> Self {
        Self::new(MODULE_BODY_NAME.to_string(), 0)
    }

    pub(crate) fn function(name: String) -> Self {
        Self::new(name, 1)
    }

    fn new(name: String, scope_depth: u32) -> Self {
        Self {
            summary: FunctionSummary::new(name.clone()),
            name,
            types: FunctionTypeScope::new(),
            locals: Vec::with_capacity(MAX_LOCALS),
            scope_depth,
            return_annotation: None,
        }
    }

    pub(crate) fn is_module_body(&self) -> bool {
        self.name == MODULE_BODY_NAME
    }

    /// Innermost local with this name, as a slot.
    pub(crate) fn resolve_local(&self, name: &str) -> Option<usize> {
        self.locals.iter().rposition(|local| local.name == name)
    }

    pub(crate) fn declared_in_current_scope(&self, name: &str) -> bool {
        self.locals
            .iter()
            .rev()
            .take_while(|local| local.depth == self.scope_depth)
            .any(|local| local.name == name)
    }

    pub(crate) fn record_local(&mut self, slot: usize, is_parameter: bool) {
        let local = LocalSummary {
            name: self.locals[slot].name,
            slot,
            declared_type: self.types.local_type(slot),
        };
        if is_parameter {
            self.summary.parameters.push(local);
        } else {
            self.summary.locals.push(local);
        }
    }

    /// Drop locals declared deeper than the current scope depth.
    pub(crate) fn pop_scope_locals(&mut self) {
        let depth = self.scope_depth;
        while self.locals.last().is_some_and(|local| local.depth > depth) {
            self.locals.pop();
        }
    }

    pub(crate) fn into_summary(mut self) -> FunctionSummary<'src> {
        self.summary.return_type = self.types.return_type();
        self.summary
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ModuleVariable {
    /// Name span of the defining declaration; `None` while only referenced.
    pub(crate) definition: Option<TextRange>,
    pub(crate) first_use: TextRange,
    pub(crate) annotation: Option<TextRange>,
    /// Predefined by the prelude rather than declared in source.
    pub(crate) builtin: bool,
}

/// Module symbol table plus the shared annotation table keyed by its indices.
#[derive(Debug, Default)]
pub(crate) struct ModuleState<'src> {
    /// Symbol index = insertion index.
    pub(crate) variables: IndexMap<&'src str, ModuleVariable>,
    pub(crate) types: ModuleTypeTable<'src>,
}

impl<'src> ModuleState<'src> {
    /// Symbol index for `name`, implicitly declaring it on first mention.
    pub(crate) fn symbol(&mut self, name: &'src str, range: TextRange) -> usize {
        let entry = self.variables.entry(name);
        let index = entry.index();
        entry.or_insert(ModuleVariable {
            definition: None,
            first_use: range,
            annotation: None,
            builtin: false,
        });
        index
    }
}

/// Where a name refers to, from the point of view of the current function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolved {
    Local(usize),
    /// A local of an enclosing function. Its type is not tracked here.
    Upvalue,
    Module(usize),
}
