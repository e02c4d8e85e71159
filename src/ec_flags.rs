// src/ec_flags.rs
//! Compile-flag handling for `.clang_complete` files and cmake compilation
//! databases. File reading and cmake runs live with the caller; this module
//! only transforms content that has already been collected.

use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

/// Flag prefixes worth keeping when scavenging a compile command.
pub const POSSIBLE_PREFIXES: [&str; 4] = ["std", "isystem", "D", "I"];

/// The subset of [`POSSIBLE_PREFIXES`] whose value is a path to resolve.
pub const INCLUDE_PREFIXES: [&str; 2] = ["isystem", "I"];

/// Extract the known compile flags from `lines`.
///
/// Lines missing their leading dash get one, values lose surrounding quotes,
/// and relative include paths are resolved against `folder`. With
/// `separate_includes` set, values are re-quoted and space-separated from
/// their prefix (`-I "<path>"`), the form a compiler binary invocation
/// wants; otherwise prefix and value stay fused (`-I<path>`).
///
/// # Example
/// ```
/// use std::path::Path;
/// use clang_ec::ec_flags::parse_flags;
///
/// let flags = parse_flags(Path::new("/proj"), ["-std=c++17", "-Iinc"], false);
/// assert!(flags.contains("-std=c++17"));
/// assert!(flags.contains("-I/proj/inc"));
/// ```
pub fn parse_flags<I, S>(folder: &Path, lines: I, separate_includes: bool) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut flags = BTreeSet::new();
    for line in lines {
        let mut line = line.as_ref().to_string();
        if !line.starts_with('-') {
            line.insert(0, '-');
        }
        for prefix in POSSIBLE_PREFIXES {
            let full_prefix = format!("-{}", prefix);
            let rest = match line.strip_prefix(&full_prefix) {
                Some(rest) => rest,
                None => continue,
            };
            let mut content = rest.trim().trim_matches('"').to_string();
            if INCLUDE_PREFIXES.contains(&prefix) && !Path::new(&content).is_absolute() {
                content = folder.join(&content).to_string_lossy().into_owned();
            }
            if separate_includes {
                flags.insert(format!("{} \"{}\"", full_prefix, content));
            } else {
                flags.insert(format!("{}{}", full_prefix, content));
            }
        }
    }
    debug!("parsed flags: {:?}", flags);
    flags
}

/// Parse the content of a `.clang_complete` file, one flag per line.
pub fn flags_from_clang_complete(
    folder: &Path,
    content: &str,
    separate_includes: bool,
) -> BTreeSet<String> {
    parse_flags(folder, content.lines(), separate_includes)
}

/// Collect flags from the content of a cmake `compile_commands.json`.
///
/// Every entry's `command` is split into its flag parts and fed through
/// [`parse_flags`]; the result is the union over all translation units.
/// Content that is not a valid compilation database is an error.
#[cfg(feature = "uses_serde")]
pub fn flags_from_database(
    folder: &Path,
    database: &str,
    separate_includes: bool,
) -> anyhow::Result<BTreeSet<String>> {
    use anyhow::Context;

    #[derive(serde::Deserialize)]
    struct DbEntry {
        command: String,
    }

    let entries: Vec<DbEntry> =
        serde_json::from_str(database).context("compilation database is not valid JSON")?;
    let mut flags = BTreeSet::new();
    for entry in entries {
        flags.extend(parse_flags(
            folder,
            entry.command.split(" -"),
            separate_includes,
        ));
    }
    debug!("flags from database: {:?}", flags);
    Ok(flags)
}

/// The settings string named a strategy this module does not know.
#[derive(Debug, Error)]
#[error("unknown flags update strategy: {0}")]
pub struct UnknownStrategy(String);

/// How to reconcile freshly generated flags with the ones already in use.
///
/// The interactive "ask" setting is the UI layer's concern; it resolves the
/// user's answer to one of these before calling [`resolve`].
///
/// [`resolve`]: FlagsUpdateStrategy::resolve
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum FlagsUpdateStrategy {
    KeepOld,
    Merge,
    Overwrite,
}

impl FlagsUpdateStrategy {
    /// Pick the flag set the caller should continue with.
    pub fn resolve(
        self,
        new_flags: BTreeSet<String>,
        current_flags: BTreeSet<String>,
    ) -> BTreeSet<String> {
        match self {
            FlagsUpdateStrategy::KeepOld => current_flags,
            FlagsUpdateStrategy::Merge => new_flags.union(&current_flags).cloned().collect(),
            FlagsUpdateStrategy::Overwrite => new_flags,
        }
    }
}

impl FromStr for FlagsUpdateStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep_old" => Ok(FlagsUpdateStrategy::KeepOld),
            "merge" => Ok(FlagsUpdateStrategy::Merge),
            "overwrite" => Ok(FlagsUpdateStrategy::Overwrite),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}
