//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::checker::Checker;
use crate::checker::FunctionState;

impl<'src> Checker<'src, '_> {
    pub(crate) fn current(&self) -> &FunctionState<'src> {
        self.functions
            .last()
            .unwrap_or_else(|| panic!("Checker: function stack is empty (module body must stay open)"))
    }

    pub(crate) fn current_mut(&mut self) -> &mut FunctionState<'src> {
        self.functions
            .last_mut()
            .unwrap_or_else(|| panic!("Checker: function stack is empty (module body must stay open)"))
    }

    pub(crate) fn pop_function(&mut self) -> FunctionState<'src> {
        self.functions
            .pop()
            .unwrap_or_else(|| panic!("Checker: pop_function without a matching push"))
    }
}
