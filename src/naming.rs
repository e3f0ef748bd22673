//! The `NNN-Name` convention for content directories and files.
//!
//! Hero slides, gallery categories and gallery images are all ordered by an
//! optional numeric prefix. The remainder of the name feeds two different
//! outputs:
//!
//! - **Labels** (image alt text, slide captions): dashes become spaces,
//!   case is kept. `001-First-Dance` → "First Dance".
//! - **Category keys** (filter identifiers): lower-cased, dashes kept.
//!   `020-Engagement-Sessions` → "engagement-sessions".

/// A content entry name split into its sort number and name part.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (`10` for `010-Wedding`)
    pub number: Option<u32>,
    /// Everything after `NNN-`; the whole input when unnumbered. Empty for `001`.
    pub name: String,
}

impl ParsedName {
    /// Dashes converted to spaces.
    pub fn label(&self) -> String {
        self.name.replace('-', " ")
    }

    /// Lower-cased name part, usable as a filter key.
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Sort key: numbered entries first by number, unnumbered last.
    pub fn sort_key(&self) -> u32 {
        self.number.unwrap_or(u32::MAX)
    }
}

/// Split `NNN-name` into number and name.
///
/// - `"010-Wedding"` → (Some(10), "Wedding")
/// - `"001"` / `"001-"` → (Some(1), "")
/// - `"Candid"` → (None, "Candid")
/// - `"wip-shots"` → (None, "wip-shots")
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some((prefix, rest)) = name.split_once('-')
        && let Ok(number) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(number),
            name: rest.to_string(),
        };
    }
    match name.parse::<u32>() {
        Ok(number) => ParsedName {
            number: Some(number),
            name: String::new(),
        },
        Err(_) => ParsedName {
            number: None,
            name: name.to_string(),
        },
    }
}

/// Label for an image or slide file stem, falling back to the raw stem when
/// the name part is empty (`003.jpg` is labelled "003").
pub fn label_for_stem(stem: &str) -> String {
    let parsed = parse_entry_name(stem);
    if parsed.name.is_empty() {
        stem.to_string()
    } else {
        parsed.label()
    }
}

/// Filter key for a category directory name.
pub fn category_key(dir_name: &str) -> String {
    let parsed = parse_entry_name(dir_name);
    if parsed.name.is_empty() {
        dir_name.to_lowercase()
    } else {
        parsed.key()
    }
}
