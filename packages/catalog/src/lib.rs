#![deny(clippy::all)]

/**
 * Translation Catalog Engine
 *
 * Parses, merges, and validates hierarchical translation catalogs:
 * ordered contexts holding ordered messages, each with a single translation
 * or per-locale plural forms. A pure, synchronous pipeline — parse → merge →
 * validate → serialize — with no shared state between invocations; file I/O
 * is the caller's responsibility.
 */

// Core modules
pub mod chars;
pub mod parse_util;

// Parser modules
pub mod ml_parser;

// Catalog modules
pub mod catalog;
pub mod merge;
pub mod plural;
pub mod validate;

// Re-exports: the engine's boundary operations and their types
pub use catalog::{
    parse, serialize, Catalog, CatalogStats, Context, Location, Message, MessageKey,
    MessageStatus, ParseOutcome, PluralForms, StructuralWarning, Translation,
};
pub use merge::{merge, MergeOptions, MergeOutcome, MergeWarning};
pub use parse_util::{ParseError, ParseErrorLevel};
pub use plural::{rules_for, PluralRules, UnknownLocale, FALLBACK_RULES};
pub use validate::{
    report_json, validate, Diagnostic, DiagnosticKind, Severity, ValidateOptions,
};
