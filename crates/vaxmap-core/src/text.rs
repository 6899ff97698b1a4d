// crates/vaxmap-core/src/text.rs

/// Convert a string into a folded key suitable for name comparison.
///
/// This performs:
/// 1) Transliterate Unicode -> ASCII (e.g. `Vallée` -> `Vallee`)
/// 2) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use vaxmap_core::text::fold_key;
///
/// assert_eq!(fold_key("Valle d'Aosta/Vallée d'Aoste"), "valle d'aosta/vallee d'aoste");
/// assert_eq!(fold_key("ABRUZZO"), "abruzzo");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings for equality after Unicode folding.
///
/// ```rust
/// use vaxmap_core::text::equals_folded;
///
/// assert!(equals_folded("Vallée", "vallee"));
/// assert!(!equals_folded("Lazio", "Lombardia"));
/// ```
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}
