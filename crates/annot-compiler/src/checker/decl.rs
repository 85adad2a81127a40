//! Declarations and statements.

use annot_core::TypeAnnotation;
use rowan::TextRange;

use super::Checker;
use super::state::FunctionState;
use crate::Result;
use crate::diagnostics::DiagnosticKind;
use crate::lexer::{Token, TokenKind};

impl<'src> Checker<'src, '_> {
    /// Compile one declaration or statement. Always consumes at least one
    /// token unless at end of input.
    pub(super) fn declaration(&mut self) -> Result<()> {
        let start = self.pos;
        match self.peek() {
            TokenKind::KwVar => self.var_declaration()?,
            TokenKind::KwFn => self.fn_declaration()?,
            _ => self.statement()?,
        }
        if self.pos == start {
            self.bump();
        }
        Ok(())
    }

    fn var_declaration(&mut self) -> Result<()> {
        self.bump();
        let Some(name_token) = self.expect_identifier() else {
            self.synchronize();
            return Ok(());
        };
        let name = self.text(name_token);
        let annotation = self.type_annotation();

        let value = match self.eat(TokenKind::Equals) {
            Some(_) => Some(self.expression()?),
            None => None,
        };

        let Some(resolved) = self.declare_variable(name, name_token.span, annotation) else {
            return Ok(());
        };
        if let (Some(value), Some((declared, declared_at))) = (value, annotation)
            && self.check_enabled(resolved)
        {
            self.check_mismatch(
                DiagnosticKind::VariableTypeMismatch,
                name,
                Some(declared),
                Some(declared_at),
                value,
            );
        }
        Ok(())
    }

    /// `: Type`, if present.
    fn type_annotation(&mut self) -> Option<(TypeAnnotation<'src>, TextRange)> {
        self.eat(TokenKind::Colon)?;
        match self.eat(TokenKind::Ident) {
            Some(token) => Some((TypeAnnotation::new(self.text(token)), token.span)),
            None => {
                let found = self.lexeme().token;
                self.diagnostics
                    .report(DiagnosticKind::ExpectedTypeName, found.span)
                    .message(format!("found {}", found.kind.describe()))
                    .emit();
                None
            }
        }
    }

    fn fn_declaration(&mut self) -> Result<()> {
        self.bump();
        let Some(name_token) = self.expect_identifier() else {
            self.synchronize();
            return Ok(());
        };
        let name = self.text(name_token);
        self.declare_variable(name, name_token.span, None);

        let enclosing = self.current();
        let qualified = if enclosing.is_module_body() {
            name.to_string()
        } else {
            format!("{}.{name}", enclosing.name)
        };

        self.enter()?;
        tracing::debug!(function = %qualified, "compiling function");
        self.functions.push(FunctionState::function(qualified));
        self.parameters();
        if let Some((ty, range)) = self.type_annotation() {
            let function = self.current_mut();
            function.types.set_return_type(ty);
            function.return_annotation = Some(range);
        }
        match self.expect(TokenKind::BraceOpen) {
            Some(open) => self.block_body(open)?,
            None => self.synchronize(),
        }
        self.end_function();
        self.exit();
        Ok(())
    }

    fn parameters(&mut self) {
        if self.expect(TokenKind::ParenOpen).is_none() {
            return;
        }
        if self.eat(TokenKind::ParenClose).is_some() {
            return;
        }
        loop {
            let Some(name_token) = self.expect_identifier() else {
                break;
            };
            let name = self.text(name_token);
            let annotation = self.type_annotation();
            self.declare_local(name, name_token.span, annotation, true);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::ParenClose);
    }

    fn statement(&mut self) -> Result<()> {
        match self.peek() {
            TokenKind::KwReturn => self.return_statement(),
            TokenKind::BraceOpen => self.block(),
            TokenKind::BraceClose => {
                let token = self.bump();
                self.diagnostics
                    .report(DiagnosticKind::UnexpectedToken, token.span)
                    .message("unmatched `}`")
                    .emit();
                Ok(())
            }
            TokenKind::Ident if self.peek_nth(1) == TokenKind::Equals => self.assignment(),
            _ => self.expression().map(|_| ()),
        }
    }

    fn block(&mut self) -> Result<()> {
        let open = self.bump();
        self.enter()?;
        self.current_mut().scope_depth += 1;
        self.block_body(open)?;
        let function = self.current_mut();
        function.scope_depth -= 1;
        function.pop_scope_locals();
        self.exit();
        Ok(())
    }

    /// Declarations up to the `}` matching `open`.
    fn block_body(&mut self, open: Token) -> Result<()> {
        while !self.at(TokenKind::BraceClose) && !self.at(TokenKind::Eof) {
            self.declaration()?;
        }
        if self.eat(TokenKind::BraceClose).is_none() {
            self.diagnostics
                .report(DiagnosticKind::UnclosedBlock, open.span)
                .message("block starts here")
                .emit();
        }
        Ok(())
    }

    fn assignment(&mut self) -> Result<()> {
        let name_token = self.bump();
        self.bump();
        let name = self.text(name_token);
        let resolved = self.resolve(name, name_token.span);
        let value = self.expression()?;

        if self.check_enabled(resolved) {
            let (declared, declared_at) = self.declared_type(resolved);
            self.check_mismatch(
                DiagnosticKind::AssignmentTypeMismatch,
                name,
                declared,
                declared_at,
                value,
            );
        }
        Ok(())
    }

    fn return_statement(&mut self) -> Result<()> {
        self.bump();
        if self.at(TokenKind::BraceClose) || self.newline_before() {
            // Bare `return` yields null, which is never checked.
            self.current_mut().types.clear_expression_type();
            return Ok(());
        }

        let value = self.expression()?;
        if self.config.check_returns {
            let function = self.current();
            let declared = function.types.return_type();
            let declared_at = function.return_annotation;
            let name = function.name.clone();
            self.check_mismatch(
                DiagnosticKind::ReturnTypeMismatch,
                &name,
                declared,
                declared_at,
                value,
            );
        }
        Ok(())
    }
}
