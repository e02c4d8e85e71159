// src/ec_types.rs
use std::str::FromStr;
use thiserror::Error;

/// Represents the compiler front-end whose diagnostics are being parsed.
///
/// This differentiates between the colon-delimited clang output, the
/// MSVC-style clang-cl output, and structured libclang diagnostics.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Copy)]
pub enum VariantKind {
    Clang,
    ClangCl,
    LibClang,
}

impl VariantKind {
    /// The settings string that selects this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantKind::Clang => "clang",
            VariantKind::ClangCl => "clang-cl",
            VariantKind::LibClang => "libclang",
        }
    }
}

impl FromStr for VariantKind {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clang" => Ok(VariantKind::Clang),
            "clang-cl" => Ok(VariantKind::ClangCl),
            "libclang" => Ok(VariantKind::LibClang),
            other => Err(VariantError::UnknownVariant(other.to_string())),
        }
    }
}

/// Errors surfaced while wiring up a parser variant.
///
/// Parsing itself never fails: unmatched lines and records are dropped from
/// the result, and a well-formed call always gets a (possibly empty) list.
#[derive(Debug, Error)]
pub enum VariantError {
    /// The selected variant consumes structured diagnostics, not text.
    #[error("no text parser for {0:?} diagnostics")]
    NoTextParser(VariantKind),
    /// The settings string does not name a known variant.
    #[error("unknown compiler variant: {0}")]
    UnknownVariant(String),
}

/// Represents a single normalized compiler error.
///
/// Fields hold the captured text exactly as the compiler emitted it: `row`
/// and `col` stay strings so the editor layer decides when to convert, and
/// `file` is whatever path spelling the compiler used, unvalidated.
///
/// # Example
/// ```
/// use clang_ec::ErrorRecord;
///
/// let record = ErrorRecord {
///     file: "foo.cpp".to_string(),
///     row: "12".to_string(),
///     col: "5".to_string(),
///     error: "expected ';'".to_string(),
/// };
///
/// assert_eq!(record.row, "12");
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "uses_serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorRecord {
    pub file: String,
    pub row: String,
    pub col: String,
    pub error: String,
}
