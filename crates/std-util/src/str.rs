//! Identifier naming conventions.
//!
//! These conversions bridge application field names (camelCase), model names
//! (PascalCase) and database identifiers (snake_case). `snake_case` and
//! `camel_case` invert each other for every valid camelCase / snake_case
//! input. The pluralization helpers apply a small set of English suffix rules
//! rather than a full inflection dictionary.

use heck::ToUpperCamelCase;

/// Irregular `(singular, plural)` pairs consulted by [`singularize`].
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("person", "people"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("mouse", "mice"),
    ("man", "men"),
    ("woman", "women"),
];

/// Converts an identifier to snake_case.
///
/// An underscore is inserted before every uppercase character that does not
/// start the string or directly follow an underscore, and the character is
/// lowercased. Acronyms are not detected: `userID` becomes `user_i_d`.
pub fn snake_case(src: &str) -> String {
    let mut dst = String::with_capacity(src.len() + 4);
    let mut prev = None;

    for ch in src.chars() {
        if ch.is_uppercase() {
            if prev.is_some_and(|prev| prev != '_') {
                dst.push('_');
            }
            dst.extend(ch.to_lowercase());
        } else {
            dst.push(ch);
        }

        prev = Some(ch);
    }

    dst
}

/// Converts an identifier to camelCase.
///
/// The input is split on underscores. Segments written entirely in uppercase
/// (`USER_ID`) are lowercased first, the first segment starts lowercase and
/// every following segment is capitalized. A segment whose first character has
/// no uppercase form (`user_1`) keeps its underscore so the conversion can be
/// reversed by [`snake_case`].
pub fn camel_case(src: &str) -> String {
    let mut dst = String::with_capacity(src.len());

    for segment in src.split('_') {
        if segment.is_empty() {
            continue;
        }

        let segment = if is_uppercase_segment(segment) {
            segment.to_lowercase()
        } else {
            segment.to_string()
        };

        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            continue;
        };

        if dst.is_empty() {
            dst.extend(first.to_lowercase());
            dst.push_str(chars.as_str());
        } else if let Some(upper) = capitalize_char(first) {
            dst.push(upper);
            dst.push_str(chars.as_str());
        } else {
            dst.push('_');
            dst.push_str(&segment);
        }
    }

    dst
}

/// Converts an identifier to PascalCase.
pub fn pascal_case(src: &str) -> String {
    src.to_upper_camel_case()
}

pub fn is_snake_case(src: &str) -> bool {
    if src.is_empty() {
        return true;
    }

    !src.chars().any(char::is_uppercase)
        && !src.starts_with('_')
        && !src.ends_with('_')
        && !src.contains("__")
}

pub fn is_camel_case(src: &str) -> bool {
    let Some(first) = src.chars().next() else {
        return true;
    };

    if first.is_uppercase() || src.contains('_') {
        return false;
    }

    let chars: Vec<_> = src.chars().collect();
    !chars
        .windows(2)
        .any(|pair| pair[0].is_uppercase() && pair[1].is_uppercase())
}

pub fn is_pascal_case(src: &str) -> bool {
    let Some(first) = src.chars().next() else {
        return true;
    };

    first.is_uppercase() && !src.contains('_')
}

/// Returns the plural form of `word`, lowercased.
///
/// Only suffix rules are applied, in order: `s`/`x`/`z`/`ch`/`sh` take `es`,
/// consonant + `y` becomes `ies`, `f` and `fe` become `ves`, everything else
/// takes `s`. Irregular nouns are not special-cased (`person` → `persons`).
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let word = word.to_lowercase();

    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return format!("{word}es");
    }

    if let Some(stem) = word.strip_suffix('y') {
        if stem.chars().last().is_some_and(|prev| !is_vowel(prev)) {
            return format!("{stem}ies");
        }
    }

    if let Some(stem) = word.strip_suffix('f') {
        return format!("{stem}ves");
    }

    if let Some(stem) = word.strip_suffix("fe") {
        return format!("{stem}ves");
    }

    format!("{word}s")
}

/// Returns the singular form of `word`, preserving the case of its stem.
///
/// The irregular table is consulted first, then the suffix rules of
/// [`pluralize`] are reversed heuristically. The result is lossy for
/// ambiguous inputs: `knives` becomes `knif` and `status` becomes `statu`.
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_ascii_lowercase();

    for (singular, plural) in IRREGULAR {
        if lower == *plural {
            return match_leading_case(word, singular);
        }

        if lower == *singular {
            return word.to_string();
        }
    }

    let stem = |suffix_len: usize| &word[..word.len() - suffix_len];

    if lower.ends_with("ies") && lower.len() > 3 {
        format!("{}y", stem(3))
    } else if lower.ends_with("ves") && lower.len() > 3 {
        format!("{}f", stem(3))
    } else if ["ses", "xes", "zes", "ches", "shes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        stem(2).to_string()
    } else if lower.ends_with("ss") {
        word.to_string()
    } else if lower.ends_with('s') && lower.len() > 1 {
        stem(1).to_string()
    } else {
        word.to_string()
    }
}

/// Default table name for a model: `pluralize(snake_case(name))`.
pub fn model_name_to_table_name(name: &str) -> String {
    pluralize(&snake_case(name))
}

fn is_vowel(ch: char) -> bool {
    matches!(ch.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_uppercase_segment(segment: &str) -> bool {
    segment.chars().any(char::is_uppercase) && !segment.chars().any(char::is_lowercase)
}

/// Returns the single-character uppercase form of `ch` if lowercasing it again
/// gives back `ch`.
fn capitalize_char(ch: char) -> Option<char> {
    let mut upper = ch.to_uppercase();
    let (Some(up), None) = (upper.next(), upper.next()) else {
        return None;
    };

    let mut lower = up.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(back), None) if up != ch && back == ch => Some(up),
        _ => None,
    }
}

fn match_leading_case(original: &str, replacement: &str) -> String {
    let capitalized = original.chars().next().is_some_and(char::is_uppercase);

    if !capitalized {
        return replacement.to_string();
    }

    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
