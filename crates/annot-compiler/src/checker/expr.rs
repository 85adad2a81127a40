//! Expressions, with trivial type inference.
//!
//! Every expression leaves the current scope's expression type set to what is
//! statically obvious about its value: literals have their built-in type, a
//! name has its declared type, and parentheses pass the inner type through.
//! Anything computed is unknown.

use annot_core::TypeAnnotation;
use rowan::TextRange;

use super::Checker;
use crate::Result;
use crate::diagnostics::DiagnosticKind;
use crate::lexer::TokenKind;

const NUM: &str = "Num";
const STRING: &str = "String";
const BOOL: &str = "Bool";
const NULL: &str = "Null";

fn binary_precedence(kind: TokenKind) -> Option<u8> {
    let precedence = match kind {
        TokenKind::PipePipe => 1,
        TokenKind::AmpAmp => 2,
        TokenKind::EqualsEquals | TokenKind::BangEquals => 3,
        TokenKind::Less | TokenKind::LessEquals | TokenKind::Greater | TokenKind::GreaterEquals => 4,
        TokenKind::Plus | TokenKind::Minus => 5,
        TokenKind::Star | TokenKind::Slash => 6,
        _ => return None,
    };
    Some(precedence)
}

fn literal_type(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Number => Some(NUM),
        TokenKind::String => Some(STRING),
        TokenKind::KwTrue | TokenKind::KwFalse => Some(BOOL),
        TokenKind::KwNull => Some(NULL),
        _ => None,
    }
}

impl<'src> Checker<'src, '_> {
    /// Compile an expression and return its source range.
    pub(super) fn expression(&mut self) -> Result<TextRange> {
        self.enter()?;
        let range = self.binary(1)?;
        self.exit();
        Ok(range)
    }

    fn binary(&mut self, min_precedence: u8) -> Result<TextRange> {
        let mut range = self.unary()?;
        while let Some(precedence) = binary_precedence(self.peek()) {
            // An operator on the next line starts a new statement.
            if precedence < min_precedence || self.newline_before() {
                break;
            }
            self.bump();
            let rhs = self.binary(precedence + 1)?;
            range = range.cover(rhs);
            self.current_mut().types.clear_expression_type();
        }
        Ok(range)
    }

    fn unary(&mut self) -> Result<TextRange> {
        if !matches!(self.peek(), TokenKind::Minus | TokenKind::Bang) {
            return self.primary();
        }
        let operator = self.bump();
        self.enter()?;
        let operand = self.unary()?;
        self.exit();
        self.current_mut().types.clear_expression_type();
        Ok(operator.span.cover(operand))
    }

    fn primary(&mut self) -> Result<TextRange> {
        let token = self.lexeme().token;
        if let Some(name) = literal_type(token.kind) {
            self.bump();
            self.current_mut()
                .types
                .set_expression_type(TypeAnnotation::new(name));
            return Ok(token.span);
        }

        match token.kind {
            TokenKind::Ident => self.identifier(),
            TokenKind::ParenOpen => self.grouping(),
            TokenKind::Garbage => {
                self.bump();
                self.diagnostics
                    .report(DiagnosticKind::UnexpectedToken, token.span)
                    .message(format!("found {}", token.kind.describe()))
                    .emit();
                self.current_mut().types.clear_expression_type();
                Ok(token.span)
            }
            _ => {
                self.diagnostics
                    .report(DiagnosticKind::ExpectedExpression, token.span)
                    .message(format!("found {}", token.kind.describe()))
                    .emit();
                // Leave tokens that close or start something to the caller.
                let keep = token.kind.starts_declaration()
                    || matches!(token.kind, TokenKind::ParenClose | TokenKind::Eof);
                if !keep && !self.newline_before() {
                    self.bump();
                }
                self.current_mut().types.clear_expression_type();
                Ok(token.span)
            }
        }
    }

    fn identifier(&mut self) -> Result<TextRange> {
        let token = self.bump();
        let name = self.text(token);
        let resolved = self.resolve(name, token.span);

        if self.at(TokenKind::ParenOpen) && !self.newline_before() {
            return self.call(token.span);
        }

        let (declared, _) = self.declared_type(resolved);
        let types = &mut self.current_mut().types;
        match declared {
            Some(ty) => types.set_expression_type(ty),
            None => types.clear_expression_type(),
        }
        Ok(token.span)
    }

    fn call(&mut self, callee: TextRange) -> Result<TextRange> {
        let open = self.bump();
        if !self.at(TokenKind::ParenClose) {
            loop {
                self.expression()?;
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        let end = match self.eat(TokenKind::ParenClose) {
            Some(close) => close.span,
            None => {
                self.report_unclosed_paren(open.span);
                open.span
            }
        };
        self.current_mut().types.clear_expression_type();
        Ok(callee.cover(end))
    }

    fn grouping(&mut self) -> Result<TextRange> {
        let open = self.bump();
        let inner = self.expression()?;
        match self.eat(TokenKind::ParenClose) {
            Some(close) => Ok(open.span.cover(close.span)),
            None => {
                self.report_unclosed_paren(open.span);
                Ok(open.span.cover(inner))
            }
        }
    }

    fn report_unclosed_paren(&mut self, open: TextRange) {
        self.diagnostics
            .report(DiagnosticKind::UnclosedParen, open)
            .message("opened here")
            .emit();
    }
}
