// crates/vaxmap-core/src/traits.rs
use crate::text::{equals_folded, fold_key};

/// Name-based matching helpers for types that expose a display name.
///
/// Implementors provide a `&str` view of their canonical name via
/// [`NameMatch::name_str`], and get accent-insensitive and case-insensitive
/// helpers on top of [`fold_key`]:
/// - [`NameMatch::is_named`]: equality on folded form
/// - [`NameMatch::name_contains`]: substring match on folded form
///
/// # Examples
/// ```rust
/// use vaxmap_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Valle d'Aosta/Vallée d'Aoste").name_contains("vallee"));
/// assert!(Place("Friuli-Venezia Giulia").is_named("FRIULI-VENEZIA GIULIA"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    #[inline]
    fn is_named(&self, q: &str) -> bool {
        equals_folded(self.name_str(), q)
    }

    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}
