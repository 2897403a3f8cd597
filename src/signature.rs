//! Candidate method signatures
//!
//! A [`CandidateSignature`] describes one concrete Java method as extracted
//! from a real AST by the surrounding tool. The engine consumes it
//! read-only; type names are matched textually exactly as the extractor
//! wrote them (no import resolution, no qualified-name shortening).

use serde::{Deserialize, Serialize};

/// One concrete Java method signature to test patterns against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSignature {
    /// Fully qualified name of the declaring type
    pub owner: String,
    /// Method name
    pub name: String,
    /// Declared parameter type names, in order. For a varargs method the
    /// last entry may be either the component type or its array form;
    /// matching normalizes one trailing `[]`
    #[serde(default)]
    pub parameter_types: Vec<String>,
    /// Whether the method is declared with a variable-arity parameter
    #[serde(default)]
    pub is_varargs: bool,
    /// Declared return type, when the extractor supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

impl CandidateSignature {
    /// Start building a signature for the given owner and method name
    pub fn builder(owner: impl Into<String>, name: impl Into<String>) -> SignatureBuilder {
        SignatureBuilder::new(owner, name)
    }
}

/// Builder for creating candidate signatures
pub struct SignatureBuilder {
    owner: String,
    name: String,
    parameter_types: Vec<String>,
    is_varargs: bool,
    return_type: Option<String>,
}

impl SignatureBuilder {
    /// Create a new builder for the given owner and method name
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            parameter_types: Vec::new(),
            is_varargs: false,
            return_type: None,
        }
    }

    /// Append a parameter type
    pub fn parameter(mut self, ty: impl Into<String>) -> Self {
        self.parameter_types.push(ty.into());
        self
    }

    /// Mark the method as varargs
    pub fn varargs(mut self) -> Self {
        self.is_varargs = true;
        self
    }

    /// Set the declared return type
    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Build the signature
    pub fn build(self) -> CandidateSignature {
        CandidateSignature {
            owner: self.owner,
            name: self.name,
            parameter_types: self.parameter_types,
            is_varargs: self.is_varargs,
            return_type: self.return_type,
        }
    }
}
