//! Signature matching engine
//!
//! Applies a compiled [`Pattern`] to a [`CandidateSignature`]. Matching is
//! pure and total: a well-formed pattern can only answer `true` or `false`,
//! never fail. [`matches`] short-circuits dimension by dimension;
//! [`explain`] evaluates every dimension and reports each verdict for
//! tooling diagnostics.

use std::fmt;

use serde::Serialize;

use crate::ast::{FormalPattern, ParamsPattern, Pattern};
use crate::signature::CandidateSignature;

/// Test a candidate signature against a compiled pattern
pub fn matches(pattern: &Pattern, candidate: &CandidateSignature) -> bool {
    pattern.name.matches(&candidate.name)
        && owner_matches(pattern, candidate)
        && return_matches(pattern, candidate)
        && params_match(&pattern.params, candidate)
}

/// Evaluate every dimension of a match and report the verdicts
pub fn explain(pattern: &Pattern, candidate: &CandidateSignature) -> MatchTrace {
    let name = pattern.name.matches(&candidate.name);
    let owner = pattern
        .owner
        .as_ref()
        .map(|expr| expr.matches_type(&candidate.owner));
    let return_type = pattern
        .ret_explicit
        .then(|| return_matches(pattern, candidate));
    let params = params_match(&pattern.params, candidate);
    let matched = name && owner != Some(false) && return_type != Some(false) && params;
    MatchTrace {
        matched,
        name,
        owner,
        return_type,
        params,
    }
}

fn owner_matches(pattern: &Pattern, candidate: &CandidateSignature) -> bool {
    match &pattern.owner {
        None => true,
        Some(expr) => expr.matches_type(&candidate.owner),
    }
}

fn return_matches(pattern: &Pattern, candidate: &CandidateSignature) -> bool {
    if !pattern.ret_explicit {
        return true;
    }
    // An explicit return constraint needs a return type to inspect
    match &candidate.return_type {
        Some(ret) => pattern.ret.matches_type(ret),
        None => false,
    }
}

fn params_match(params: &ParamsPattern, candidate: &CandidateSignature) -> bool {
    match params {
        ParamsPattern::Exact(formals) => {
            candidate.parameter_types.len() == formals.len()
                && formals_match(formals, &candidate.parameter_types, candidate.is_varargs)
        }
        ParamsPattern::DotDotPrefixed(trailing) => {
            let k = trailing.len();
            if candidate.parameter_types.len() < k {
                return false;
            }
            // Leading parameters are absorbed by the `..`; the trailing
            // formals align right-to-left
            let tail = &candidate.parameter_types[candidate.parameter_types.len() - k..];
            formals_match(trailing, tail, candidate.is_varargs)
        }
        ParamsPattern::SoloVarargs(formal) => {
            candidate.is_varargs
                && candidate
                    .parameter_types
                    .last()
                    .is_some_and(|ty| formal.expr.matches_type(component_type(ty)))
        }
    }
}

fn formals_match(formals: &[FormalPattern], types: &[String], is_varargs: bool) -> bool {
    formals.iter().zip(types).all(|(formal, ty)| {
        if formal.varargs {
            is_varargs && formal.expr.matches_type(component_type(ty))
        } else {
            formal.expr.matches_type(ty)
        }
    })
}

/// The declared component type of a varargs parameter
///
/// Extractors report the final parameter of a varargs method either as its
/// component type or as the equivalent array form; one `[]` is stripped.
fn component_type(ty: &str) -> &str {
    ty.strip_suffix("[]").unwrap_or(ty)
}

/// Per-dimension verdicts of one match, for tooling diagnostics
///
/// Dimensions the pattern does not constrain are reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchTrace {
    /// Overall verdict (conjunction of all constrained dimensions)
    pub matched: bool,
    /// Method-name glob verdict
    pub name: bool,
    /// Owner-type verdict, when the pattern constrains the owner
    pub owner: Option<bool>,
    /// Return-type verdict, when the pattern constrains the return type
    pub return_type: Option<bool>,
    /// Parameter-list verdict
    pub params: bool,
}

impl MatchTrace {
    /// The first constrained dimension that rejected the candidate
    pub fn failing_dimension(&self) -> Option<&'static str> {
        if !self.name {
            Some("name")
        } else if self.owner == Some(false) {
            Some("owner")
        } else if self.return_type == Some(false) {
            Some("return type")
        } else if !self.params {
            Some("parameters")
        } else {
            None
        }
    }
}

impl fmt::Display for MatchTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failing_dimension() {
            None => write!(f, "match"),
            Some(dim) => write!(f, "no match: {dim} pattern rejected the candidate"),
        }
    }
}
