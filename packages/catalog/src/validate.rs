//! Validator
//!
//! Advisory checks over a catalog: plural-form completeness against the
//! pluralization table, placeholder consistency between source and finished
//! translations, and release-gating of unfinished messages. Never mutates
//! the catalog, never fails — the result is always a diagnostic list.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::catalog::ast::{Catalog, Message, MessageStatus, Translation};
use crate::plural::{rules_for, PluralRules, FALLBACK_RULES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    PluralCountMismatch,
    PlaceholderMismatch,
    IncompleteTranslation,
    UnknownLocale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub context: String,
    pub source: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOptions {
    /// Release build: unfinished messages become errors.
    pub strict: bool,
}

/// Numbered and `%n` placeholders, with the optional locale-aware `L`
/// modifier.
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%L?(?:n|[1-9][0-9]?)").unwrap());

pub(crate) fn placeholders(text: &str) -> BTreeSet<String> {
    PLACEHOLDER_RE
        .find_iter(text)
        .map(|found| found.as_str().to_string())
        .collect()
}

/// Validate a catalog. Obsolete and vanished messages are history and are
/// exempt from every check.
pub fn validate(catalog: &Catalog, options: ValidateOptions) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let rules = resolve_rules(catalog, &mut diagnostics);

    for context in &catalog.contexts {
        for message in &context.messages {
            if message.status.is_retired() {
                continue;
            }
            check_plural_count(&context.name, message, rules, &mut diagnostics);
            if message.status == MessageStatus::Finished && !message.translation.is_empty() {
                check_placeholders(&context.name, message, &mut diagnostics);
            }
            if options.strict && message.status == MessageStatus::Unfinished {
                diagnostics.push(Diagnostic {
                    severity: Severity::Error,
                    kind: DiagnosticKind::IncompleteTranslation,
                    context: context.name.clone(),
                    source: message.source.clone(),
                    message: "unfinished translation in a release build".to_string(),
                });
            }
        }
    }

    diagnostics
}

/// Render the diagnostic list for an external release gate.
pub fn report_json(diagnostics: &[Diagnostic]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(diagnostics)
}

fn resolve_rules(catalog: &Catalog, diagnostics: &mut Vec<Diagnostic>) -> &'static PluralRules {
    match &catalog.language {
        Some(locale) => match rules_for(locale) {
            Ok(rules) => rules,
            Err(error) => {
                diagnostics.push(Diagnostic {
                    severity: Severity::Warning,
                    kind: DiagnosticKind::UnknownLocale,
                    context: String::new(),
                    source: String::new(),
                    message: format!(
                        "{}; falling back to two English-like plural categories",
                        error
                    ),
                });
                &FALLBACK_RULES
            }
        },
        None => {
            diagnostics.push(Diagnostic {
                severity: Severity::Warning,
                kind: DiagnosticKind::UnknownLocale,
                context: String::new(),
                source: String::new(),
                message: "target language is unspecified; falling back to two English-like \
                          plural categories"
                    .to_string(),
            });
            &FALLBACK_RULES
        }
    }
}

fn check_plural_count(
    context: &str,
    message: &Message,
    rules: &PluralRules,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if let Translation::Plural(forms) = &message.translation {
        if forms.len() != rules.category_count {
            diagnostics.push(Diagnostic {
                severity: Severity::Error,
                kind: DiagnosticKind::PluralCountMismatch,
                context: context.to_string(),
                source: message.source.clone(),
                message: format!(
                    "message has {} plural form(s), the target locale expects {}",
                    forms.len(),
                    rules.category_count
                ),
            });
        }
    }
}

fn check_placeholders(context: &str, message: &Message, diagnostics: &mut Vec<Diagnostic>) {
    let source_placeholders = placeholders(&message.source);

    let (missing, extra) = match &message.translation {
        Translation::Single(text) => {
            let translated = placeholders(text);
            (
                source_placeholders
                    .difference(&translated)
                    .cloned()
                    .collect::<Vec<_>>(),
                translated
                    .difference(&source_placeholders)
                    .cloned()
                    .collect::<Vec<_>>(),
            )
        }
        Translation::Plural(forms) => {
            // A form may legitimately drop a placeholder (the singular often
            // spells the count out), so "missing" is judged against the
            // union of all forms; anything not in the source is extra.
            let mut union = BTreeSet::new();
            let mut extra = BTreeSet::new();
            for form in forms {
                let form_placeholders = placeholders(form);
                extra.extend(
                    form_placeholders
                        .difference(&source_placeholders)
                        .cloned(),
                );
                union.extend(form_placeholders);
            }
            (
                source_placeholders.difference(&union).cloned().collect(),
                extra.into_iter().collect(),
            )
        }
    };

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing from translation: {}", missing.join(", ")));
    }
    if !extra.is_empty() {
        parts.push(format!("not in source text: {}", extra.join(", ")));
    }
    if !parts.is_empty() {
        diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            kind: DiagnosticKind::PlaceholderMismatch,
            context: context.to_string(),
            source: message.source.clone(),
            message: format!("placeholder {}", parts.join("; ")),
        });
    }
}
