#![doc = include_str!("../README.md")]

// Re-export std common modules
pub mod prelude {
    pub use std::collections::BTreeSet;
    pub use std::path::{Path, PathBuf};
    pub use std::str::FromStr;
    pub use std::sync::Arc;
    pub use log::{debug, error, info, log_enabled, Level};
}

pub mod ec_flags;
pub use ec_flags::{parse_flags, FlagsUpdateStrategy};
pub mod ec_types;
pub use ec_types::{ErrorRecord, VariantError, VariantKind};
pub mod ec_variant;
pub use ec_variant::{CompilerVariant, LibClangVariant, TextVariant, TuDiagnostic};
