use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics start at the same position, the higher-priority one
/// suppresses the lower-priority one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Cascade into everything after them
    UnclosedBlock,
    UnclosedParen,

    // User omitted something required
    ExpectedExpression,
    ExpectedIdentifier,
    ExpectedTypeName,

    // User wrote something that doesn't belong
    UnexpectedToken,

    // Valid syntax, invalid program
    DuplicateLocal,
    TooManyLocals,

    // Advisory type annotation checks
    VariableTypeMismatch,
    AssignmentTypeMismatch,
    ReturnTypeMismatch,

    // Often consequences of earlier errors
    UndefinedVariable,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::VariableTypeMismatch | Self::AssignmentTypeMismatch | Self::ReturnTypeMismatch => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// Lower discriminant = higher priority.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    pub fn is_structural_error(&self) -> bool {
        matches!(self, Self::UnclosedBlock | Self::UnclosedParen)
    }

    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedExpression | Self::ExpectedIdentifier | Self::ExpectedTypeName
        )
    }

    /// Suppressed whenever any syntax error exists: a broken declaration
    /// easily leaves a name undefined.
    pub fn is_consequence_error(&self) -> bool {
        matches!(self, Self::UndefinedVariable)
    }

    pub fn is_type_mismatch(&self) -> bool {
        self.default_severity() == Severity::Warning
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::ExpectedTypeName => Some("e.g., `var count: Num = 0`"),
            Self::DuplicateLocal => Some("assign without `var` to reuse the existing variable"),
            Self::UndefinedVariable => Some("declare it with `var` at the top level"),
            _ => None,
        }
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedBlock => "missing closing `}`",
            Self::UnclosedParen => "missing closing `)`",

            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedIdentifier => "expected an identifier",
            Self::ExpectedTypeName => "expected type name",

            Self::UnexpectedToken => "unexpected token",

            Self::DuplicateLocal => "variable is already declared in this scope",
            Self::TooManyLocals => "too many local variables in one function",

            Self::VariableTypeMismatch => "initializer does not match declared type",
            Self::AssignmentTypeMismatch => "assigned value does not match declared type",
            Self::ReturnTypeMismatch => "returned value does not match declared return type",

            Self::UndefinedVariable => "variable is used but not defined",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateLocal => "`{}` is already declared in this scope".to_string(),
            Self::UndefinedVariable => "`{}` is used but not defined".to_string(),
            Self::VariableTypeMismatch | Self::AssignmentTypeMismatch => {
                "type mismatch: {}".to_string()
            }
            Self::ReturnTypeMismatch => "return type mismatch: {}".to_string(),
            Self::UnclosedBlock | Self::UnclosedParen => {
                format!("{}; {{}}", self.fallback_message())
            }
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// `None` renders the fallback message, `Some(detail)` fills the custom template.
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
