//! Catalog Model
//!
//! In-memory representation of a translation catalog: ordered contexts
//! holding ordered messages. Document order is part of the observable
//! contract, so contexts and messages are sequences, never maps.

use serde::Serialize;
use smallvec::SmallVec;

/// Ordered plural-form texts, one per grammatical category of the target
/// locale. Few locales go past four categories.
pub type PluralForms = SmallVec<[String; 4]>;

/// Full translation document for one source→target language pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub version: Option<String>,
    /// `None` means the document did not declare the attribute — an explicit
    /// "unspecified", never a fabricated locale.
    pub source_language: Option<String>,
    pub language: Option<String>,
    pub contexts: Vec<Context>,
}

/// Named grouping of messages, typically one source-code module. The empty
/// name is the global context; names need not be unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    pub name: String,
    pub messages: Vec<Message>,
}

/// One translatable unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Option<String>,
    pub locations: Vec<Location>,
    /// Original string to translate; identity key component.
    pub source: String,
    /// Disambiguation comment; identity key component when present.
    /// `None` is distinct from `Some("")`.
    pub comment: Option<String>,
    /// Developer note, carried verbatim.
    pub extracomment: Option<String>,
    /// Translator note, carried verbatim.
    pub translatorcomment: Option<String>,
    pub translation: Translation,
    pub status: MessageStatus,
    /// Set when a plural message is known to be missing forms. Not part of
    /// the wire format; whoever sets it also downgrades the status so the
    /// state survives serialization.
    pub incomplete: bool,
}

impl Message {
    pub fn new(source: impl Into<String>) -> Self {
        Message {
            id: None,
            locations: Vec::new(),
            source: source.into(),
            comment: None,
            extracomment: None,
            translatorcomment: None,
            translation: Translation::single(""),
            status: MessageStatus::Finished,
            incomplete: false,
        }
    }

    pub fn is_plural(&self) -> bool {
        self.translation.is_plural()
    }
}

/// Source location of a message occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub filename: Option<String>,
    pub line: Option<u32>,
}

/// Either one literal translation or the ordered plural forms. The `Plural`
/// variant is the `numerus` flag: a plural message with no forms yet is
/// `Plural` with an empty sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    Single(String),
    Plural(PluralForms),
}

impl Translation {
    pub fn single(text: impl Into<String>) -> Self {
        Translation::Single(text.into())
    }

    pub fn plural<I>(forms: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Translation::Plural(forms.into_iter().map(Into::into).collect())
    }

    pub fn is_plural(&self) -> bool {
        matches!(self, Translation::Plural(_))
    }

    /// True when no translated text has been provided yet.
    pub fn is_empty(&self) -> bool {
        match self {
            Translation::Single(text) => text.is_empty(),
            Translation::Plural(forms) => forms.iter().all(|form| form.is_empty()),
        }
    }

    /// Plural forms as a slice; `None` for a non-plural translation.
    pub fn forms(&self) -> Option<&[String]> {
        match self {
            Translation::Single(_) => None,
            Translation::Plural(forms) => Some(forms),
        }
    }
}

/// If no type is set on the wire, a message is "finished".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Finished,
    Unfinished,
    /// Present only in the old catalog after a merge; retained for reference.
    Obsolete,
    /// Explicitly pruned.
    Vanished,
}

impl MessageStatus {
    pub fn from_type_attr(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(MessageStatus::Unfinished),
            "obsolete" => Some(MessageStatus::Obsolete),
            "vanished" => Some(MessageStatus::Vanished),
            _ => None,
        }
    }

    /// Wire value of the `type` attribute; `Finished` is the absent default.
    pub fn type_attr(self) -> Option<&'static str> {
        match self {
            MessageStatus::Finished => None,
            MessageStatus::Unfinished => Some("unfinished"),
            MessageStatus::Obsolete => Some("obsolete"),
            MessageStatus::Vanished => Some("vanished"),
        }
    }

    /// Obsolete and vanished messages are history, not live content.
    pub fn is_retired(self) -> bool {
        matches!(self, MessageStatus::Obsolete | MessageStatus::Vanished)
    }
}

/// Value key matching messages across catalog versions:
/// (context name, source text, comment-or-absence).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub context: String,
    pub source: String,
    pub comment: Option<String>,
}

impl MessageKey {
    pub fn new(context: &str, message: &Message) -> Self {
        MessageKey {
            context: context.to_string(),
            source: message.source.clone(),
            comment: message.comment.clone(),
        }
    }
}

/// Recoverable content issue: collected, never aborting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum StructuralWarning {
    /// A plural message with no plural forms at all.
    EmptyPluralTranslation { context: String, source: String },
    /// An element the format does not know at this position; skipped.
    UnexpectedElement { element: String, line: usize, col: usize },
    /// A message with no source text; skipped (it has no identity).
    MissingSource { context: String, line: usize, col: usize },
    /// A `type` attribute value outside the known status set.
    UnknownTranslationType {
        context: String,
        source: String,
        value: String,
    },
}

/// Per-status counts, the raw material of a release gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub finished: usize,
    pub unfinished: usize,
    pub obsolete: usize,
    pub vanished: usize,
    pub plural: usize,
    pub incomplete: usize,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Check the structural invariants: every plural message carries at
    /// least one form. (A non-plural message has exactly one translation by
    /// construction.)
    pub fn validate_structure(&self) -> Vec<StructuralWarning> {
        let mut warnings = Vec::new();
        for context in &self.contexts {
            for message in &context.messages {
                if let Translation::Plural(forms) = &message.translation {
                    if forms.is_empty() {
                        warnings.push(StructuralWarning::EmptyPluralTranslation {
                            context: context.name.clone(),
                            source: message.source.clone(),
                        });
                    }
                }
            }
        }
        warnings
    }

    /// Stable-reorder contexts so those named in `reference` come first, in
    /// reference order; the rest follow in their current order. Duplicate
    /// names consume one context per reference occurrence.
    pub fn reorder_like(&mut self, reference: &[String]) {
        let mut remaining = std::mem::take(&mut self.contexts);
        let mut ordered = Vec::with_capacity(remaining.len());
        for name in reference {
            if let Some(pos) = remaining.iter().position(|context| &context.name == name) {
                ordered.push(remaining.remove(pos));
            }
        }
        ordered.extend(remaining);
        self.contexts = ordered;
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats::default();
        for context in &self.contexts {
            for message in &context.messages {
                stats.total += 1;
                match message.status {
                    MessageStatus::Finished => stats.finished += 1,
                    MessageStatus::Unfinished => stats.unfinished += 1,
                    MessageStatus::Obsolete => stats.obsolete += 1,
                    MessageStatus::Vanished => stats.vanished += 1,
                }
                if message.is_plural() {
                    stats.plural += 1;
                }
                if message.incomplete {
                    stats.incomplete += 1;
                }
            }
        }
        stats
    }
}
