//! Locale-sensitive lower-casing for deck name matching.
//!
//! Rust's [`str::to_lowercase`] applies the locale-invariant Unicode mapping. That
//! is wrong for Turkic languages, where `I` lower-cases to dotless `ı` and `İ` to a
//! plain `i`. The filter lower-cases with both the user's locale and the invariant
//! rules and accepts a match under either, so a Turkish user typing `ı` or `i`
//! finds their decks either way.

/// The casing rules that differ from the invariant mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Invariant,
    /// Turkish and Azerbaijani dotted/dotless i rules.
    Turkic,
}

impl Locale {
    /// Parses a POSIX or BCP 47 style tag such as `tr_TR.UTF-8` or `az-Latn`.
    /// Anything without special casing rules maps to [`Locale::Invariant`].
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "tr" | "az" => Locale::Turkic,
            _ => Locale::Invariant,
        }
    }

    /// Reads the first non-empty of `LC_ALL`, `LC_CTYPE` and `LANG`.
    pub fn from_env() -> Self {
        ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.is_empty())
            .map(|value| Locale::from_tag(&value))
            .unwrap_or_default()
    }

    pub fn to_lowercase(&self, s: &str) -> String {
        match self {
            Locale::Invariant => s.to_lowercase(),
            Locale::Turkic => {
                let mut out = String::with_capacity(s.len());
                for c in s.chars() {
                    match c {
                        'I' => out.push('ı'),
                        'İ' => out.push('i'),
                        _ => out.extend(c.to_lowercase()),
                    }
                }
                out
            }
        }
    }
}
