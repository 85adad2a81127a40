//! Single-pass compiler front end that feeds the annotation tables.
//!
//! Walks the token stream once, allocating local slots and module symbols the
//! way a bytecode compiler would, and mirrors every written annotation into
//! the current [`FunctionTypeScope`](annot_core::FunctionTypeScope) or the
//! module's [`ModuleTypeTable`](annot_core::ModuleTypeTable). After each
//! expression the scope's expression type holds whatever trivial inference
//! could tell; declarations, assignments and returns compare it against the
//! declared type and report a warning on mismatch.

mod decl;
mod expr;
mod state;
mod summary;

#[cfg(test)]
mod checker_tests;

use annot_core::{MAX_LOCALS, TypeAnnotation, types_match};
use rowan::{TextRange, TextSize};

use crate::Config;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lexer::{Token, TokenKind, lex, token_text};
use crate::{Error, Result};

use state::{Local, ModuleState, Resolved};

pub(crate) use state::FunctionState;

pub use summary::{FunctionSummary, LocalSummary, ModuleSummary, VariableSummary};

/// Module variables every script can use without declaring them.
pub const PRELUDE: &[&str] = &["print"];

/// Output of a successful compilation: warnings plus the declared types seen.
#[derive(Debug, Clone)]
pub struct Compiled<'src> {
    diagnostics: Diagnostics,
    summary: ModuleSummary<'src>,
}

impl<'src> Compiled<'src> {
    /// Type mismatch warnings. Never contains errors.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn summary(&self) -> &ModuleSummary<'src> {
        &self.summary
    }

    pub fn into_summary(self) -> ModuleSummary<'src> {
        self.summary
    }
}

/// Compile one module.
///
/// Syntax errors fail the compilation with [`Error::CompileFailed`]; type
/// mismatches only ever show up as warnings on the returned [`Compiled`].
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn compile<'src>(source: &'src str, config: &Config) -> Result<Compiled<'src>> {
    Checker::new(source, config).run()
}

#[derive(Debug, Clone, Copy)]
struct Lexeme {
    token: Token,
    /// A line break separates this token from the previous one.
    newline_before: bool,
}

pub(crate) struct Checker<'src, 'cfg> {
    source: &'src str,
    lexemes: Vec<Lexeme>,
    pos: usize,
    config: &'cfg Config,
    depth: u32,
    diagnostics: Diagnostics,
    module: ModuleState<'src>,
    /// Innermost function last. Never empty while compiling.
    pub(crate) functions: Vec<FunctionState<'src>>,
    finished: Vec<FunctionSummary<'src>>,
}

impl<'src, 'cfg> Checker<'src, 'cfg> {
    fn new(source: &'src str, config: &'cfg Config) -> Self {
        let mut module = ModuleState::default();
        for name in PRELUDE {
            let symbol = module.symbol(*name, TextRange::empty(0.into()));
            let variable = &mut module.variables[symbol];
            variable.definition = Some(TextRange::empty(0.into()));
            variable.builtin = true;
        }

        Self {
            source,
            lexemes: lexemes(source),
            pos: 0,
            config,
            depth: 0,
            diagnostics: Diagnostics::new(),
            module,
            functions: Vec::new(),
            finished: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Compiled<'src>> {
        self.functions.push(FunctionState::module_body());
        while !self.at(TokenKind::Eof) {
            self.declaration()?;
        }
        self.end_function();
        self.report_undefined();

        let summary = self.module_summary();
        let diagnostics = self.diagnostics.filtered();
        tracing::debug!(
            errors = diagnostics.error_count(),
            warnings = diagnostics.warning_count(),
            annotated_module_variables = self.module.types.len(),
            "module compiled"
        );

        if diagnostics.has_errors() {
            return Err(Error::CompileFailed(diagnostics));
        }
        Ok(Compiled {
            diagnostics,
            summary,
        })
    }

    fn report_undefined(&mut self) {
        for (name, variable) in &self.module.variables {
            if variable.definition.is_none() {
                self.diagnostics
                    .report(DiagnosticKind::UndefinedVariable, variable.first_use)
                    .message(*name)
                    .emit();
            }
        }
    }

    fn module_summary(&mut self) -> ModuleSummary<'src> {
        let variables = self
            .module
            .variables
            .iter()
            .enumerate()
            .filter(|(_, (_, variable))| !variable.builtin)
            .map(|(symbol, (name, _))| VariableSummary {
                name: *name,
                symbol,
                declared_type: self.module.types.type_of(symbol),
            })
            .collect();

        ModuleSummary {
            variables,
            functions: std::mem::take(&mut self.finished),
        }
    }

    // --- Cursor ---

    fn lexeme(&self) -> Lexeme {
        self.lexemes[self.pos]
    }

    fn peek(&self) -> TokenKind {
        self.lexeme().token.kind
    }

    fn peek_nth(&self, n: usize) -> TokenKind {
        let index = (self.pos + n).min(self.lexemes.len() - 1);
        self.lexemes[index].token.kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn newline_before(&self) -> bool {
        self.lexeme().newline_before
    }

    /// Consume the current token. The trailing `Eof` is never consumed.
    fn bump(&mut self) -> Token {
        let token = self.lexeme().token;
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        let token = self.eat(kind);
        if token.is_none() {
            self.report_unexpected(kind.describe());
        }
        token
    }

    fn expect_identifier(&mut self) -> Option<Token> {
        let token = self.eat(TokenKind::Ident);
        if token.is_none() {
            let found = self.lexeme().token;
            self.diagnostics
                .report(DiagnosticKind::ExpectedIdentifier, found.span)
                .message(format!("found {}", found.kind.describe()))
                .emit();
        }
        token
    }

    fn report_unexpected(&mut self, expected: &str) {
        let found = self.lexeme().token;
        self.diagnostics
            .report(DiagnosticKind::UnexpectedToken, found.span)
            .message(format!("expected {expected}, found {}", found.kind.describe()))
            .emit();
    }

    /// Skip to the next token that can start a declaration, or the next line.
    fn synchronize(&mut self) {
        while !self.at(TokenKind::Eof) && !self.peek().starts_declaration() {
            self.bump();
            if self.newline_before() {
                break;
            }
        }
    }

    fn text(&self, token: Token) -> &'src str {
        token_text(self.source, &token)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.config.recursion_limit {
            return Err(Error::RecursionLimitExceeded);
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }

    // --- Names ---

    fn resolve(&mut self, name: &'src str, range: TextRange) -> Resolved {
        if let Some(slot) = self.current().resolve_local(name) {
            return Resolved::Local(slot);
        }

        let enclosing = &self.functions[..self.functions.len() - 1];
        if enclosing
            .iter()
            .rev()
            .any(|function| function.resolve_local(name).is_some())
        {
            return Resolved::Upvalue;
        }

        Resolved::Module(self.module.symbol(name, range))
    }

    /// Declared type of a resolved name and where it was written.
    fn declared_type(&self, resolved: Resolved) -> (Option<TypeAnnotation<'src>>, Option<TextRange>) {
        match resolved {
            Resolved::Local(slot) => {
                let function = self.current();
                (function.types.local_type(slot), function.locals[slot].annotation)
            }
            Resolved::Upvalue => (None, None),
            Resolved::Module(symbol) => (
                self.module.types.type_of(symbol),
                self.module.variables[symbol].annotation,
            ),
        }
    }

    fn check_enabled(&self, resolved: Resolved) -> bool {
        match resolved {
            Resolved::Local(_) => self.config.check_locals,
            Resolved::Module(_) => self.config.check_module_variables,
            Resolved::Upvalue => false,
        }
    }

    /// Declare a variable: a module variable at the top level of the module,
    /// a local everywhere else.
    fn declare_variable(
        &mut self,
        name: &'src str,
        range: TextRange,
        annotation: Option<(TypeAnnotation<'src>, TextRange)>,
    ) -> Option<Resolved> {
        let function = self.current();
        if function.is_module_body() && function.scope_depth == 0 {
            return self.declare_module_variable(name, range, annotation);
        }
        self.declare_local(name, range, annotation, false)
    }

    fn declare_local(
        &mut self,
        name: &'src str,
        range: TextRange,
        annotation: Option<(TypeAnnotation<'src>, TextRange)>,
        is_parameter: bool,
    ) -> Option<Resolved> {
        if self.current().declared_in_current_scope(name) {
            self.diagnostics
                .report(DiagnosticKind::DuplicateLocal, range)
                .message(name)
                .emit();
            return None;
        }

        let slot = self.current().locals.len();
        if slot >= MAX_LOCALS {
            self.diagnostics
                .report(DiagnosticKind::TooManyLocals, range)
                .message(format!("at most {MAX_LOCALS} are allowed"))
                .emit();
            return None;
        }

        let function = self.current_mut();
        function.locals.push(Local {
            name,
            depth: function.scope_depth,
            annotation: annotation.map(|(_, range)| range),
        });
        match annotation {
            Some((ty, _)) => function.types.set_local_type(slot, ty),
            // The slot may still hold the annotation of a local from a closed block.
            None => function.types.clear_local_type(slot),
        }
        function.record_local(slot, is_parameter);
        Some(Resolved::Local(slot))
    }

    fn declare_module_variable(
        &mut self,
        name: &'src str,
        range: TextRange,
        annotation: Option<(TypeAnnotation<'src>, TextRange)>,
    ) -> Option<Resolved> {
        let symbol = self.module.symbol(name, range);
        let variable = &mut self.module.variables[symbol];
        if let Some(previous) = variable.definition {
            let mut report = self
                .diagnostics
                .report(DiagnosticKind::DuplicateLocal, range)
                .message(name);
            if !variable.builtin {
                report = report.related_to("first declared here", previous);
            }
            report.emit();
            return None;
        }

        variable.definition = Some(range);
        variable.annotation = annotation.map(|(_, range)| range);
        if let Some((ty, _)) = annotation {
            if self.module.types.is_full() {
                tracing::warn!(name, %ty, "module type table is full; annotation not tracked");
            }
            self.module.types.set_type(symbol, ty);
        }
        Some(Resolved::Module(symbol))
    }

    // --- Checks ---

    /// Warn when `declared` and the type of the expression just compiled are
    /// both known and differ.
    fn check_mismatch(
        &mut self,
        kind: DiagnosticKind,
        subject: &str,
        declared: Option<TypeAnnotation<'src>>,
        declared_at: Option<TextRange>,
        value: TextRange,
    ) {
        let inferred = self.current().types.expression_type();
        if types_match(declared, inferred) {
            return;
        }
        let (Some(declared), Some(inferred)) = (declared, inferred) else {
            return;
        };

        let detail = match kind {
            DiagnosticKind::VariableTypeMismatch => {
                format!("`{subject}` is declared as `{declared}` but initialized with `{inferred}`")
            }
            DiagnosticKind::AssignmentTypeMismatch => {
                format!("`{subject}` is declared as `{declared}` but assigned `{inferred}`")
            }
            _ => format!("`{subject}` is declared to return `{declared}` but returns `{inferred}`"),
        };

        let mut report = self.diagnostics.report(kind, value).message(detail);
        if let Some(range) = declared_at {
            report = report.related_to(format!("declared as `{declared}` here"), range);
        }
        report.emit();
    }

    fn end_function(&mut self) {
        let function = self.pop_function();
        tracing::debug!(
            function = %function.name,
            locals = function.summary.parameters.len() + function.summary.locals.len(),
            "function compiled"
        );
        self.finished.push(function.into_summary());
    }
}

/// Non-trivia tokens with line-break information, terminated by `Eof`.
fn lexemes(source: &str) -> Vec<Lexeme> {
    let mut lexemes = Vec::new();
    let mut newline_before = false;

    for token in lex(source) {
        if token.kind.is_trivia() {
            newline_before |= token.kind == TokenKind::Newline;
            continue;
        }
        lexemes.push(Lexeme {
            token,
            newline_before,
        });
        newline_before = false;
    }

    lexemes.push(Lexeme {
        token: Token::new(TokenKind::Eof, TextRange::empty(TextSize::of(source))),
        newline_before: true,
    });
    lexemes
}
