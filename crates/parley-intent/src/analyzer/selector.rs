use std::sync::{Mutex, PoisonError};

use parley_core::Catalog;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom as _;
use rand::{Rng, SeedableRng as _};

/// Picks one of `tag`'s responses uniformly at random.
///
/// Unknown tags and empty buckets use the fallback intent's responses.
pub fn select_response<R: Rng + ?Sized>(tag: &str, catalog: &Catalog, rng: &mut R) -> String {
    catalog
        .responses_for(tag)
        .choose(rng)
        .cloned()
        .unwrap_or_default()
}

/// Shared response selector with an injectable random source.
///
/// Each call is an independent draw.
#[derive(Debug)]
pub struct ResponseSelector {
    rng: Mutex<StdRng>,
}

impl ResponseSelector {
    /// Creates a selector seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Creates a deterministic selector.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Wraps an existing generator.
    pub fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Selects a response for `tag` from `catalog`.
    pub fn select(&self, tag: &str, catalog: &Catalog) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        select_response(tag, catalog, &mut *rng)
    }
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::{Intent, UNKNOWN_TAG};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Intent::new("greeting").with_responses(vec![
                "Hi!".to_owned(),
                "Hello!".to_owned(),
                "Hey!".to_owned(),
            ]),
            Intent::new(UNKNOWN_TAG).with_responses(vec!["Pardon?".to_owned()]),
        ])
        .expect("catalog should build")
    }

    #[test]
    fn test_selects_member_of_bucket() {
        let catalog = catalog();
        let selector = ResponseSelector::with_seed(7);
        let bucket = catalog.responses_for("greeting");
        for _ in 0..50 {
            let response = selector.select("greeting", &catalog);
            assert!(bucket.contains(&response), "unexpected response {response}");
        }
    }

    #[test]
    fn test_missing_tag_uses_fallback() {
        let catalog = catalog();
        let selector = ResponseSelector::with_seed(1);
        assert_eq!(selector.select("weather", &catalog), "Pardon?");
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let catalog = catalog();
        let first = ResponseSelector::with_seed(42);
        let second = ResponseSelector::with_seed(42);
        let left: Vec<String> = (0..10).map(|_| first.select("greeting", &catalog)).collect();
        let right: Vec<String> = (0..10).map(|_| second.select("greeting", &catalog)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_draws_cover_bucket() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen: Vec<String> = (0..200)
            .map(|_| select_response("greeting", &catalog, &mut rng))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 3);
    }
}
