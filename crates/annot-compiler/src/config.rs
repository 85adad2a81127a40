//! Configuration for a compilation run.

/// Which annotation checks run, and how deep the compiler may recurse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Check initializers of and assignments to locals
    pub(crate) check_locals: bool,
    /// Check initializers of and assignments to module variables
    pub(crate) check_module_variables: bool,
    /// Check `return` values against the function's return annotation
    pub(crate) check_returns: bool,
    /// Maximum nesting of blocks, functions and expressions
    pub(crate) recursion_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            check_locals: true,
            check_module_variables: true,
            check_returns: true,
            recursion_limit: 256,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_locals(mut self, value: bool) -> Self {
        self.check_locals = value;
        self
    }

    pub fn check_module_variables(mut self, value: bool) -> Self {
        self.check_module_variables = value;
        self
    }

    pub fn check_returns(mut self, value: bool) -> Self {
        self.check_returns = value;
        self
    }

    pub fn recursion_limit(mut self, value: u32) -> Self {
        self.recursion_limit = value;
        self
    }
}
