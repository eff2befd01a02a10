//! Pluralization Table
//!
//! Per-locale grammatical-number rules as pure data plus a pure selector
//! function — a lookup table, not a class hierarchy. Built once as static
//! data; nothing here mutates at runtime.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

/// Rules for one locale: how many plural categories exist and which one a
/// cardinal count selects. `select` always returns an index below
/// `category_count`.
#[derive(Debug, Clone, Copy)]
pub struct PluralRules {
    pub category_count: usize,
    pub select: fn(u64) -> usize,
}

impl PluralRules {
    pub fn category_index(&self, n: u64) -> usize {
        (self.select)(n)
    }
}

/// Lookup failure. Callers fall back to [`FALLBACK_RULES`] but must surface
/// the fallback as a warning, never as silent success.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown locale \"{locale}\"")]
pub struct UnknownLocale {
    pub locale: String,
}

/// English-like fallback: two categories, index 0 iff n == 1.
pub static FALLBACK_RULES: PluralRules = PluralRules {
    category_count: 2,
    select: select_two_form,
};

/// Look up the plural rules for a locale tag: exact tag first (`sv_SE`),
/// then the primary subtag (`sv`).
pub fn rules_for(locale: &str) -> Result<&'static PluralRules, UnknownLocale> {
    let normalized = locale.replace('-', "_");
    if let Some(rules) = RULES.get(normalized.as_str()) {
        return Ok(rules);
    }
    if let Some((primary, _)) = normalized.split_once('_') {
        if let Some(rules) = RULES.get(primary) {
            return Ok(rules);
        }
    }
    Err(UnknownLocale {
        locale: locale.to_string(),
    })
}

fn select_single_form(_n: u64) -> usize {
    0
}

fn select_two_form(n: u64) -> usize {
    if n == 1 {
        0
    } else {
        1
    }
}

fn select_two_form_zero_one(n: u64) -> usize {
    if n <= 1 {
        0
    } else {
        1
    }
}

fn select_slavic(n: u64) -> usize {
    if n % 10 == 1 && n % 100 != 11 {
        0
    } else if (2..=4).contains(&(n % 10)) && !(12..=14).contains(&(n % 100)) {
        1
    } else {
        2
    }
}

fn select_polish(n: u64) -> usize {
    if n == 1 {
        0
    } else if (2..=4).contains(&(n % 10)) && !(12..=14).contains(&(n % 100)) {
        1
    } else {
        2
    }
}

fn select_czech(n: u64) -> usize {
    if n == 1 {
        0
    } else if (2..=4).contains(&n) {
        1
    } else {
        2
    }
}

fn select_lithuanian(n: u64) -> usize {
    if n % 10 == 1 && !(11..=19).contains(&(n % 100)) {
        0
    } else if (2..=9).contains(&(n % 10)) && !(11..=19).contains(&(n % 100)) {
        1
    } else {
        2
    }
}

fn select_latvian(n: u64) -> usize {
    if n % 10 == 1 && n % 100 != 11 {
        0
    } else if n != 0 {
        1
    } else {
        2
    }
}

fn select_romanian(n: u64) -> usize {
    if n == 1 {
        0
    } else if n == 0 || (1..=19).contains(&(n % 100)) {
        1
    } else {
        2
    }
}

fn select_slovenian(n: u64) -> usize {
    match n % 100 {
        1 => 0,
        2 => 1,
        3 | 4 => 2,
        _ => 3,
    }
}

fn select_irish(n: u64) -> usize {
    match n {
        1 => 0,
        2 => 1,
        _ => 2,
    }
}

fn select_arabic(n: u64) -> usize {
    match n {
        0 => 0,
        1 => 1,
        2 => 2,
        _ => {
            if (3..=10).contains(&(n % 100)) {
                3
            } else if n % 100 >= 11 {
                4
            } else {
                5
            }
        }
    }
}

fn select_welsh(n: u64) -> usize {
    match n {
        0 => 0,
        1 => 1,
        2 => 2,
        3 => 3,
        6 => 4,
        _ => 5,
    }
}

static RULES: Lazy<HashMap<&'static str, PluralRules>> = Lazy::new(|| {
    let single = PluralRules {
        category_count: 1,
        select: select_single_form,
    };
    let two_form = PluralRules {
        category_count: 2,
        select: select_two_form,
    };
    let two_form_zero_one = PluralRules {
        category_count: 2,
        select: select_two_form_zero_one,
    };
    let slavic = PluralRules {
        category_count: 3,
        select: select_slavic,
    };

    let mut rules = HashMap::new();
    for locale in ["ja", "ko", "zh", "th", "vi", "id"] {
        rules.insert(locale, single);
    }
    for locale in [
        "en", "de", "sv", "nl", "da", "nb", "nn", "no", "es", "it", "fi", "et", "el", "hu",
        "tr", "he", "bg", "ca",
    ] {
        rules.insert(locale, two_form);
    }
    for locale in ["fr", "pt"] {
        rules.insert(locale, two_form_zero_one);
    }
    for locale in ["ru", "uk", "be", "sr", "hr", "bs"] {
        rules.insert(locale, slavic);
    }
    rules.insert(
        "pl",
        PluralRules {
            category_count: 3,
            select: select_polish,
        },
    );
    for locale in ["cs", "sk"] {
        rules.insert(
            locale,
            PluralRules {
                category_count: 3,
                select: select_czech,
            },
        );
    }
    rules.insert(
        "lt",
        PluralRules {
            category_count: 3,
            select: select_lithuanian,
        },
    );
    rules.insert(
        "lv",
        PluralRules {
            category_count: 3,
            select: select_latvian,
        },
    );
    rules.insert(
        "ro",
        PluralRules {
            category_count: 3,
            select: select_romanian,
        },
    );
    rules.insert(
        "sl",
        PluralRules {
            category_count: 4,
            select: select_slovenian,
        },
    );
    rules.insert(
        "ga",
        PluralRules {
            category_count: 3,
            select: select_irish,
        },
    );
    rules.insert(
        "ar",
        PluralRules {
            category_count: 6,
            select: select_arabic,
        },
    );
    rules.insert(
        "cy",
        PluralRules {
            category_count: 6,
            select: select_welsh,
        },
    );
    rules
});
