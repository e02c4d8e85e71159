// src/ec_variant.rs
//! Parser variants for the diagnostic output of the clang family of
//! front-ends. Each variant turns raw output into [`ErrorRecord`]s; picking
//! the variant that matches the tool in use is the caller's job.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::ec_types::{ErrorRecord, VariantError, VariantKind};

static CLANG_ERROR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<file>.*):(?P<row>\d+):(?P<col>\d+):\s*.*error: (?P<error>.*)").unwrap()
});

static CLANG_CL_ERROR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<file>.*)\((?P<row>\d+),(?P<col>\d+)\)\s*:\s*.*error: (?P<error>.*)").unwrap()
});

static LIBCLANG_POS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'(?P<file>.+)'.*line\s(?P<row>\d+), column\s(?P<col>\d+)").unwrap());

static LIBCLANG_MSG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""*(?P<error>.+)"*"#).unwrap());

/// The one capability every parser variant provides: parse errors received
/// from the compiler into a list of normalized records.
///
/// There is no default implementation on purpose. Code that has not picked
/// a concrete variant cannot call this, so reaching for "the abstract
/// parser" is a compile error rather than a runtime fault.
pub trait CompilerVariant<Output: ?Sized> {
    /// Parse errors received from the compiler.
    ///
    /// Output order follows input order. Lines or records that do not look
    /// like an error are dropped, never reported as a failure.
    fn errors_from_output(&self, output: &Output) -> Vec<ErrorRecord>;
}

/// Text-mode diagnostics parser for the clang family.
///
/// One shared line-matching loop, configured per front-end with the flags a
/// syntax-only compile needs and the regex that recognizes its error lines.
///
/// # Fields
/// - `kind`: which front-end this configuration targets.
/// - `init_flags`: flags that every syntax-only compile command needs; the
///   invocation layer passes these to the compiler binary.
/// - `error_regex`: regex to find the contents of an error line.
#[derive(Debug, Clone)]
pub struct TextVariant {
    pub kind: VariantKind,
    pub init_flags: &'static [&'static str],
    pub error_regex: Regex,
}

impl TextVariant {
    /// Configuration for clang/clang++ colon-delimited diagnostics
    /// (`file:row:col: ... error: message`).
    ///
    /// # Example
    /// ```
    /// use clang_ec::{CompilerVariant, TextVariant};
    ///
    /// let clang = TextVariant::clang();
    /// let errors = clang.errors_from_output("foo.cpp:12:5: error: expected ';'\n");
    /// assert_eq!(errors[0].file, "foo.cpp");
    /// assert_eq!(errors[0].error, "expected ';'");
    /// ```
    pub fn clang() -> Self {
        TextVariant {
            kind: VariantKind::Clang,
            init_flags: &["-c", "-fsyntax-only", "-x c++"],
            error_regex: CLANG_ERROR_REGEX.clone(),
        }
    }

    /// Configuration for clang-cl MSVC-style diagnostics
    /// (`file(row,col): ... error: message`). No forced language flag.
    pub fn clang_cl() -> Self {
        TextVariant {
            kind: VariantKind::ClangCl,
            init_flags: &["-c", "-fsyntax-only"],
            error_regex: CLANG_CL_ERROR_REGEX.clone(),
        }
    }

    /// Look up the text-mode configuration for `kind`.
    ///
    /// libclang diagnostics arrive as structured records, not text, so
    /// `VariantKind::LibClang` has no entry here; asking for one is a
    /// wiring defect and gets [`VariantError::NoTextParser`].
    pub fn from_kind(kind: VariantKind) -> Result<Self, VariantError> {
        match kind {
            VariantKind::Clang => Ok(TextVariant::clang()),
            VariantKind::ClangCl => Ok(TextVariant::clang_cl()),
            VariantKind::LibClang => Err(VariantError::NoTextParser(kind)),
        }
    }
}

impl CompilerVariant<str> for TextVariant {
    fn errors_from_output(&self, output: &str) -> Vec<ErrorRecord> {
        let mut errors = Vec::new();
        for line in output.lines() {
            let caps = match self.error_regex.captures(line) {
                Some(caps) => caps,
                None => continue,
            };
            errors.push(record_from_captures(&caps, &caps));
        }
        errors
    }
}

/// One diagnostic from a translation unit, as exposed by an in-process
/// compiler front-end binding.
///
/// Both methods render to text the way the binding's own objects print:
/// `location` like `'foo.cpp', line 7, column 3` (surrounding text is
/// tolerated) and `spelling` as the plain message.
pub trait TuDiagnostic {
    fn location(&self) -> String;
    fn spelling(&self) -> String;
}

/// Structured-record parser over libclang translation-unit diagnostics.
///
/// The only variant with a side effect: records whose location or spelling
/// does not match the expected shape are reported to a mismatch log and
/// dropped, so the result may hold fewer records than the input.
///
/// # Fields
/// - `pos_regex`: regex to find the position of an error.
/// - `msg_regex`: regex to find the error message.
#[derive(Clone)]
pub struct LibClangVariant {
    pub pos_regex: Regex,
    pub msg_regex: Regex,
    on_mismatch: Arc<dyn Fn(&str) + Send + Sync>,
}

impl fmt::Debug for LibClangVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibClangVariant")
            .field("pos_regex", &self.pos_regex.as_str())
            .field("msg_regex", &self.msg_regex.as_str())
            .field("on_mismatch", &"Closure")
            .finish()
    }
}

impl LibClangVariant {
    /// Parser that reports match failures through `log::error!`.
    pub fn new() -> Self {
        LibClangVariant::with_mismatch_log(Arc::new(|message: &str| log::error!("{}", message)))
    }

    /// Parser with a custom sink for match-failure reports.
    ///
    /// The sink receives one formatted message per dropped record, naming
    /// the pattern and the text it failed to match.
    pub fn with_mismatch_log(sink: Arc<dyn Fn(&str) + Send + Sync>) -> Self {
        LibClangVariant {
            pos_regex: LIBCLANG_POS_REGEX.clone(),
            msg_regex: LIBCLANG_MSG_REGEX.clone(),
            on_mismatch: sink,
        }
    }
}

impl Default for LibClangVariant {
    fn default() -> Self {
        LibClangVariant::new()
    }
}

impl<D: TuDiagnostic> CompilerVariant<[D]> for LibClangVariant {
    fn errors_from_output(&self, output: &[D]) -> Vec<ErrorRecord> {
        let mut errors = Vec::new();
        for diag in output {
            let location = diag.location();
            let spelling = diag.spelling();
            let pos = match self.pos_regex.captures(&location) {
                Some(caps) => caps,
                None => {
                    (self.on_mismatch)(&format!(
                        "regex {} failed to match location: {}",
                        self.pos_regex.as_str(),
                        location
                    ));
                    continue;
                }
            };
            let msg = match self.msg_regex.captures(&spelling) {
                Some(caps) => caps,
                None => {
                    (self.on_mismatch)(&format!(
                        "regex {} failed to match error: {}",
                        self.msg_regex.as_str(),
                        spelling
                    ));
                    continue;
                }
            };
            errors.push(record_from_captures(&pos, &msg));
        }
        errors
    }
}

fn record_from_captures(pos: &Captures<'_>, msg: &Captures<'_>) -> ErrorRecord {
    ErrorRecord {
        file: named_group(pos, "file"),
        row: named_group(pos, "row"),
        col: named_group(pos, "col"),
        error: named_group(msg, "error"),
    }
}

fn named_group(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
