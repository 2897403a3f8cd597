//! Error types for pattern compilation
//!
//! Every failure mode of the engine is detected while compiling a pattern
//! string. Matching a successfully compiled [`Pattern`](crate::Pattern) is
//! total and never produces an error.

use thiserror::Error;

/// Errors produced while compiling a signature pattern
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The token stream is malformed (unexpected token, unmatched
    /// parenthesis or bracket, empty required element)
    #[error("syntax error at offset {position}: expected {expected}, found {found}")]
    Syntax {
        /// Byte offset into the pattern string where the error occurred
        position: usize,
        /// Description of what the parser expected at this point
        expected: String,
        /// Description of what was actually found
        found: String,
    },

    /// The pattern is structurally valid but meaningless (second `..` in a
    /// parameter list, varargs marker not in final position, empty pattern)
    #[error("invalid pattern at offset {position}: {reason}")]
    Semantic {
        /// Byte offset into the pattern string where the error occurred
        position: usize,
        /// Why the pattern is rejected
        reason: String,
    },

    /// The pattern uses syntax outside this engine's subset, such as
    /// generics or AspectJ pointcut keywords
    #[error("unsupported pattern construct at offset {position}: {construct}")]
    Unsupported {
        /// Byte offset into the pattern string where the construct starts
        position: usize,
        /// The offending construct
        construct: String,
    },
}

impl PatternError {
    /// Create a syntax error
    pub fn syntax(
        position: usize,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::Syntax {
            position,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a semantic error
    pub fn semantic(position: usize, reason: impl Into<String>) -> Self {
        Self::Semantic {
            position,
            reason: reason.into(),
        }
    }

    /// Create an unsupported-construct error
    pub fn unsupported(position: usize, construct: impl Into<String>) -> Self {
        Self::Unsupported {
            position,
            construct: construct.into(),
        }
    }

    /// Byte offset into the pattern string where the error occurred
    pub fn position(&self) -> usize {
        match self {
            Self::Syntax { position, .. }
            | Self::Semantic { position, .. }
            | Self::Unsupported { position, .. } => *position,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PatternError>;
