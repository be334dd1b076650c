//! Filename parsing for the `NNN-name` ordering convention.
//!
//! Slides, gallery photos and gallery category directories all share one
//! pattern: an optional numeric prefix (`NNN-`) that fixes display order,
//! followed by a name whose dashes become spaces for display:
//!
//! - `010-Lobby-at-Dusk.jpg` → order 10, alt text "Lobby at Dusk"
//! - `020-dining/` → order 20, category `dining`
//! - `pool.jpg` → unordered (sorted after numbered entries), alt "pool"

/// Result of parsing an entry name like `020-Deluxe-King`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-Deluxe-King`).
    pub number: Option<u32>,
    /// Raw name after `NNN-`, dashes preserved. Empty if number-only.
    /// For unnumbered entries, this is the full input.
    pub name: String,
    /// Display title: name with dashes converted to spaces.
    pub display_title: String,
}

impl ParsedName {
    /// Sort key placing numbered entries first, in number order.
    pub fn sort_key(&self) -> u32 {
        self.number.unwrap_or(u32::MAX)
    }

    /// Lowercase identifier for the name, as used for gallery categories.
    ///
    /// `"Spa-and-Pool"` → `"spa-and-pool"`.
    pub fn slug(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Parse an entry name following the `NNN-name` convention.
///
/// - `"020-Deluxe-King"` → number=Some(20), name="Deluxe-King", display_title="Deluxe King"
/// - `"001"` / `"001-"` → number=Some(1), name="", display_title=""
/// - `"terrace-view"` → number=None, name="terrace-view", display_title="terrace view"
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some((prefix, rest)) = name.split_once('-')
        && let Ok(num) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(num),
            name: rest.to_string(),
            display_title: rest.replace('-', " "),
        };
    }
    if let Ok(num) = name.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            name: String::new(),
            display_title: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: name.to_string(),
        display_title: name.replace('-', " "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_with_multi_word_name() {
        let p = parse_entry_name("020-Deluxe-King-Room");
        assert_eq!(p.number, Some(20));
        assert_eq!(p.name, "Deluxe-King-Room");
        assert_eq!(p.display_title, "Deluxe King Room");
    }

    #[test]
    fn numbered_category_dir() {
        let p = parse_entry_name("010-rooms");
        assert_eq!(p.number, Some(10));
        assert_eq!(p.slug(), "rooms");
    }

    #[test]
    fn number_only() {
        let p = parse_entry_name("001");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.name, "");
        assert_eq!(p.display_title, "");
    }

    #[test]
    fn number_with_trailing_dash() {
        let p = parse_entry_name("001-");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.display_title, "");
    }

    #[test]
    fn unnumbered_with_dashes() {
        let p = parse_entry_name("terrace-view");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "terrace-view");
        assert_eq!(p.display_title, "terrace view");
    }

    #[test]
    fn non_numeric_prefix_is_part_of_name() {
        let p = parse_entry_name("v2-lobby");
        assert_eq!(p.number, None);
        assert_eq!(p.display_title, "v2 lobby");
    }

    #[test]
    fn unnumbered_sorts_last() {
        let numbered = parse_entry_name("999-Last");
        let unnumbered = parse_entry_name("Anywhere");
        assert!(numbered.sort_key() < unnumbered.sort_key());
    }

    #[test]
    fn zero_prefix() {
        let p = parse_entry_name("000-Entrance");
        assert_eq!(p.number, Some(0));
        assert_eq!(p.sort_key(), 0);
    }

    #[test]
    fn slug_is_lowercase() {
        assert_eq!(parse_entry_name("030-Spa-and-Pool").slug(), "spa-and-pool");
    }
}
