//! Merge Engine
//!
//! Reconciles an old catalog with a freshly extracted one. The new catalog
//! dictates structure and order; the old catalog only donates translation
//! text and status history. Inputs are never mutated — the output is a
//! fresh catalog owned by the caller.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

use crate::catalog::ast::{Catalog, Context, Message, MessageKey, MessageStatus, Translation};
use crate::plural::{rules_for, FALLBACK_RULES};

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Drop unmatched old messages entirely instead of keeping them as
    /// obsolete reference material.
    pub prune_obsolete: bool,
}

/// Non-fatal merge finding; merge always completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum MergeWarning {
    /// Two old messages share an identity key; only the first is a merge
    /// source.
    DuplicateEntry {
        context: String,
        source: String,
        comment: Option<String>,
    },
    /// The target locale is missing from the pluralization table (or the
    /// catalog never declared one); plural completeness was judged against
    /// the English-like fallback.
    UnknownLocale { locale: Option<String> },
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub catalog: Catalog,
    pub warnings: Vec<MergeWarning>,
}

/// Merge `old` into the structure of `new`.
pub fn merge(old: &Catalog, new: &Catalog, options: MergeOptions) -> MergeOutcome {
    let mut warnings = Vec::new();

    let language = new.language.clone().or_else(|| old.language.clone());
    let category_count = resolve_category_count(language.as_deref(), &mut warnings);

    // Index every old message by identity key, first occurrence wins.
    let mut old_index: IndexMap<MessageKey, &Message> = IndexMap::new();
    for context in &old.contexts {
        for message in &context.messages {
            let key = MessageKey::new(&context.name, message);
            if old_index.contains_key(&key) {
                warnings.push(MergeWarning::DuplicateEntry {
                    context: key.context,
                    source: key.source,
                    comment: key.comment,
                });
            } else {
                old_index.insert(key, message);
            }
        }
    }

    let mut matched: HashSet<MessageKey> = HashSet::new();
    let mut catalog = Catalog {
        version: new.version.clone().or_else(|| old.version.clone()),
        source_language: new
            .source_language
            .clone()
            .or_else(|| old.source_language.clone()),
        language,
        contexts: Vec::new(),
    };

    // Walk the new catalog in its own order; that order is the output order.
    for context in &new.contexts {
        let mut merged_context = Context {
            name: context.name.clone(),
            messages: Vec::new(),
        };
        for message in &context.messages {
            let key = MessageKey::new(&context.name, message);
            let merged = match old_index.get(&key).copied() {
                Some(old_message) => {
                    matched.insert(key);
                    carry_forward(message, old_message, category_count)
                }
                None => fresh_message(message),
            };
            merged_context.messages.push(merged);
        }
        catalog.contexts.push(merged_context);
    }

    // Old messages never matched survive as obsolete reference material
    // under their original context, unless pruning was requested.
    if !options.prune_obsolete {
        for (key, old_message) in &old_index {
            if matched.contains(key) {
                continue;
            }
            let mut message = (*old_message).clone();
            if message.status != MessageStatus::Vanished {
                message.status = MessageStatus::Obsolete;
            }
            match catalog
                .contexts
                .iter_mut()
                .find(|context| context.name == key.context)
            {
                Some(context) => context.messages.push(message),
                None => catalog.contexts.push(Context {
                    name: key.context.clone(),
                    messages: vec![message],
                }),
            }
        }
    }

    // New's context order stays authoritative; obsolete-only contexts trail.
    let reference: Vec<String> = new
        .contexts
        .iter()
        .map(|context| context.name.clone())
        .collect();
    catalog.reorder_like(&reference);

    MergeOutcome { catalog, warnings }
}

fn resolve_category_count(language: Option<&str>, warnings: &mut Vec<MergeWarning>) -> usize {
    match language {
        Some(locale) => match rules_for(locale) {
            Ok(rules) => rules.category_count,
            Err(_) => {
                warnings.push(MergeWarning::UnknownLocale {
                    locale: Some(locale.to_string()),
                });
                FALLBACK_RULES.category_count
            }
        },
        None => {
            warnings.push(MergeWarning::UnknownLocale { locale: None });
            FALLBACK_RULES.category_count
        }
    }
}

/// Key matched: copy the old translation and status forward onto the new
/// message's structure.
fn carry_forward(new_message: &Message, old_message: &Message, category_count: usize) -> Message {
    let mut merged = Message {
        id: new_message.id.clone(),
        locations: new_message.locations.clone(),
        source: new_message.source.clone(),
        comment: new_message.comment.clone(),
        extracomment: new_message.extracomment.clone(),
        translatorcomment: old_message.translatorcomment.clone(),
        translation: Translation::single(""),
        status: match old_message.status {
            MessageStatus::Finished => MessageStatus::Finished,
            MessageStatus::Unfinished => MessageStatus::Unfinished,
            // A retired message whose key reappeared: the translation is
            // probably still right, but a translator must re-confirm.
            MessageStatus::Obsolete | MessageStatus::Vanished => MessageStatus::Unfinished,
        },
        incomplete: false,
    };

    // The new message decides whether the unit is plural; the old one only
    // donates text.
    let mut shape_changed = false;
    merged.translation = match (&new_message.translation, &old_message.translation) {
        (Translation::Single(_), Translation::Single(text)) => Translation::single(text.clone()),
        (Translation::Plural(_), Translation::Plural(forms)) => {
            Translation::Plural(forms.clone())
        }
        (Translation::Single(_), Translation::Plural(forms)) => {
            shape_changed = true;
            Translation::single(forms.first().cloned().unwrap_or_default())
        }
        (Translation::Plural(_), Translation::Single(text)) => {
            shape_changed = true;
            if text.is_empty() {
                Translation::Plural(Default::default())
            } else {
                Translation::plural([text.clone()])
            }
        }
    };
    if shape_changed && merged.status == MessageStatus::Finished {
        merged.status = MessageStatus::Unfinished;
    }

    // Plural completeness is judged against the current target locale, no
    // matter what the old status said.
    if let Translation::Plural(forms) = &merged.translation {
        if forms.len() != category_count {
            merged.incomplete = true;
            merged.status = MessageStatus::Unfinished;
        }
    }

    merged
}

/// Key not found in the old catalog: a brand-new unit with an empty
/// translation.
fn fresh_message(new_message: &Message) -> Message {
    let mut message = Message {
        id: new_message.id.clone(),
        locations: new_message.locations.clone(),
        source: new_message.source.clone(),
        comment: new_message.comment.clone(),
        extracomment: new_message.extracomment.clone(),
        translatorcomment: None,
        translation: if new_message.is_plural() {
            Translation::Plural(Default::default())
        } else {
            Translation::single("")
        },
        status: MessageStatus::Unfinished,
        incomplete: false,
    };
    if new_message.is_plural() {
        message.incomplete = true;
    }
    message
}
