use thiserror::Error;

use crate::RuleId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("unknown rule {0}")]
    UnknownRule(RuleId),

    #[error("a terminal and a rule share the same identifier {0}")]
    DuplicatedSymbol(String),

    #[error("unknown symbol {0}")]
    UnknownSymbol(String),

    #[error("the grammar does not define any rule")]
    EmptyGrammar,
}

impl ErrorKind {
    pub fn unknown_symbol(got: &str) -> Self {
        Self::UnknownSymbol(got.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct GlrError {
    /// Kind of error
    kind: ErrorKind,
}

impl GlrError {
    pub fn new(kind: impl Into<ErrorKind>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl From<ErrorKind> for GlrError {
    fn from(kind: ErrorKind) -> Self {
        Self { kind }
    }
}
