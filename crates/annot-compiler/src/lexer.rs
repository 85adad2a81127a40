//! Lexer for the script language.
//!
//! Produces span-based tokens without storing text; text is sliced from the
//! source only when needed. Consecutive unrecognized characters are coalesced
//! into a single `Garbage` token.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token("=")]
    Equals,

    #[token("==")]
    EqualsEquals,

    #[token("!=")]
    BangEquals,

    #[token("!")]
    Bang,

    #[token("<")]
    Less,

    #[token("<=")]
    LessEquals,

    #[token(">")]
    Greater,

    #[token(">=")]
    GreaterEquals,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("var")]
    KwVar,

    #[token("fn")]
    KwFn,

    #[token("return")]
    KwReturn,

    #[token("true")]
    KwTrue,

    #[token("false")]
    KwFalse,

    #[token("null")]
    KwNull,

    /// Defined after keywords so they take precedence.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    String,

    #[regex(r"[ \t\r]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    /// Coalesced unrecognized characters
    Garbage,

    /// End of input, produced by the parser's cursor rather than the lexer.
    Eof,
}

impl TokenKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline | Self::LineComment)
    }

    /// Tokens a declaration or statement can start with; used for error recovery.
    pub fn starts_declaration(self) -> bool {
        matches!(
            self,
            Self::KwVar | Self::KwFn | Self::KwReturn | Self::BraceOpen | Self::BraceClose
        )
    }

    /// Human-readable name for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Self::ParenOpen => "`(`",
            Self::ParenClose => "`)`",
            Self::BraceOpen => "`{`",
            Self::BraceClose => "`}`",
            Self::Comma => "`,`",
            Self::Colon => "`:`",
            Self::Equals => "`=`",
            Self::EqualsEquals => "`==`",
            Self::BangEquals => "`!=`",
            Self::Bang => "`!`",
            Self::Less => "`<`",
            Self::LessEquals => "`<=`",
            Self::Greater => "`>`",
            Self::GreaterEquals => "`>=`",
            Self::Plus => "`+`",
            Self::Minus => "`-`",
            Self::Star => "`*`",
            Self::Slash => "`/`",
            Self::AmpAmp => "`&&`",
            Self::PipePipe => "`||`",
            Self::KwVar => "`var`",
            Self::KwFn => "`fn`",
            Self::KwReturn => "`return`",
            Self::KwTrue => "`true`",
            Self::KwFalse => "`false`",
            Self::KwNull => "`null`",
            Self::Ident => "identifier",
            Self::Number => "number",
            Self::String => "string",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::LineComment => "comment",
            Self::Garbage => "unrecognized input",
            Self::Eof => "end of input",
        }
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens, trivia included.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..end),
                    ));
                }
                tokens.push(Token::new(kind, range_to_text_range(lexer.span())));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
