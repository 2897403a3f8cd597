//! AspectJ-flavored method-signature pattern engine
//!
//! This library compiles a declarative method-signature pattern such as
//! `* com.foo..*Repository.findBy*(..)` into a reusable matcher and
//! evaluates it against concrete Java method signatures supplied by an
//! external AST extractor. Compilation happens once per pattern string;
//! the compiled [`Pattern`] is immutable and may be shared across threads
//! and matched against any number of candidates.
//!
//! # Example
//!
//! ```
//! use sigpat::{compile, SignatureBuilder};
//!
//! # fn example() -> sigpat::Result<()> {
//! let pattern = compile("* com.foo..*Repository.findBy*(..)")?;
//!
//! let candidate = SignatureBuilder::new("com.foo.user.UserRepository", "findByEmail")
//!     .parameter("java.lang.String")
//!     .returns("com.foo.user.User")
//!     .build();
//!
//! assert!(pattern.matches(&candidate));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Pattern grammar
//!
//! A pattern reads `returnTypePattern [ownerTypePattern.]namePattern(params)`:
//!
//! - `*` in a type name matches within one `.`-delimited segment; `..`
//!   matches any number of whole segments (including zero).
//! - `*` in a method name may cross any character boundary.
//! - Type positions compose with `!`, `&&` and `||` (in that precedence).
//! - The parameter list is `()`, an explicit list, `(..)`, `(.., T, U)`,
//!   or ends in a varargs marker `T...`.
//!
//! All errors are reported at compile time with byte positions; matching a
//! compiled pattern never fails.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

// Re-export commonly used items
pub use ast::{ParamsPattern, Pattern};
pub use error::{PatternError, Result};
pub use matcher::MatchTrace;
pub use patternset::{PatternSet, SetMatch};
pub use signature::{CandidateSignature, SignatureBuilder};

/// Compiled pattern representation
pub mod ast;

/// Error types
pub mod error;

/// Lexical analysis
pub mod lexer;

/// Signature matching engine
pub mod matcher;

/// Parser implementation
pub mod parser;

/// Wildcard matching implementations
pub mod pattern;

/// PatternSet for managing multiple patterns
pub mod patternset;

/// Candidate method signatures
pub mod signature;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile a pattern string into its reusable matcher
///
/// This is the engine's single entry point for pattern text. Compilation
/// is pure: it has no side effects and all failure modes surface here as
/// [`PatternError`] values carrying byte positions.
pub fn compile(source: &str) -> Result<Pattern> {
    if source.trim().is_empty() {
        return Err(PatternError::semantic(0, "empty pattern"));
    }
    let pattern = parser::parse(source)?;
    tracing::debug!(pattern = %pattern, "compiled signature pattern");
    Ok(pattern)
}

/// Initialize the tracing subscriber with default settings
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
