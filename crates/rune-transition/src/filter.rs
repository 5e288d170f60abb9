//! Item filters selecting which items a transition definition applies to.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::Result;
use crate::item::TransitionItem;

type IdPredicate = dyn Fn(&str) -> bool + Send + Sync;

/// Which item ids a definition targets.
///
/// Patterns use search semantics: `image-.+` matches `"image-1"` and also
/// `"hero-image-1"`. Anchor with `^`/`$` for a full match.
#[derive(Clone)]
pub enum ItemFilter {
    /// Every item.
    All,
    /// Exactly one id.
    Exact(String),
    /// Ids containing a match of the pattern.
    Pattern(Regex),
    /// Arbitrary predicate over the id.
    Predicate(Arc<IdPredicate>),
}

impl ItemFilter {
    pub fn exact(id: impl Into<String>) -> Self {
        Self::Exact(id.into())
    }

    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    pub fn predicate(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    /// Scene items of every route.
    pub fn scenes() -> Self {
        Self::predicate(|id| id.starts_with(crate::item::SCENE_ID_PREFIX))
    }

    /// The scene item of one route.
    pub fn scene(route_name: &str) -> Self {
        Self::Exact(crate::item::scene_id(route_name))
    }

    pub fn matches(&self, id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(value) => value == id,
            Self::Pattern(regex) => regex.is_match(id),
            Self::Predicate(f) => f(id),
        }
    }

    /// Items accepted by this filter, order preserved.
    pub fn select(&self, items: &[TransitionItem]) -> Vec<TransitionItem> {
        items
            .iter()
            .filter(|item| self.matches(&item.id))
            .cloned()
            .collect()
    }
}

impl fmt::Debug for ItemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Exact(value) => f.debug_tuple("Exact").field(value).finish(),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        let filter = ItemFilter::exact("image-1");
        assert!(filter.matches("image-1"));
        assert!(!filter.matches("image-10"));
    }

    #[test]
    fn test_pattern_search_semantics() {
        let filter = ItemFilter::pattern("image-.+").unwrap();
        assert!(filter.matches("image-1"));
        assert!(filter.matches("hero-image-1"));
        assert!(!filter.matches("image-"));

        let anchored = ItemFilter::pattern(r"^\$scene-.+").unwrap();
        assert!(anchored.matches("$scene-PhotoGrid"));
        assert!(!anchored.matches("image-1"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(ItemFilter::pattern("image-(").is_err());
    }

    #[test]
    fn test_predicate_and_scenes() {
        let filter = ItemFilter::predicate(|id| id.len() == 3);
        assert!(filter.matches("abc"));
        assert!(!filter.matches("abcd"));

        assert!(ItemFilter::scenes().matches("$scene-Grid"));
        assert!(ItemFilter::scene("Grid").matches("$scene-Grid"));
        assert!(!ItemFilter::scene("Grid").matches("$scene-Detail"));
    }

    #[test]
    fn test_select_empty_is_legal() {
        let items = vec![TransitionItem::new("image-1", "Grid")];
        assert!(ItemFilter::exact("nothing").select(&items).is_empty());
        assert_eq!(ItemFilter::All.select(&items).len(), 1);
    }
}
