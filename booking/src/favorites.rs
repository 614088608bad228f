//! Favorites and recently-viewed persistence.
//!
//! Two small collections keyed by fixed names in key-value storage:
//! an unbounded favorites set and an ordered, deduplicated list of the
//! five most recently viewed venues. Every mutation writes the whole
//! collection back before returning, so writes land in user-action
//! order and a stale write can never clobber a newer one.

use std::collections::BTreeSet;

use crate::catalog::VenueId;
use crate::storage::KeyValueStorage;

/// Storage key for the favorites set.
pub const FAVORITES_KEY: &str = "favoriteVenues";

/// Storage key for the recently-viewed list.
pub const RECENTLY_VIEWED_KEY: &str = "recentlyViewedVenues";

/// Maximum number of recently-viewed entries retained.
pub const MAX_RECENTLY_VIEWED: usize = 5;

/// Favorites and recently-viewed venues, backed by key-value storage.
///
/// Both collections persist as JSON arrays of venue-id integers.
/// Corrupt or absent entries load as empty collections — a bad store
/// must never block rendering.
#[derive(Debug, Clone)]
pub struct FavoritesStore<S: KeyValueStorage> {
    storage: S,
    favorites: BTreeSet<VenueId>,
    recently_viewed: Vec<VenueId>,
}

impl<S: KeyValueStorage> FavoritesStore<S> {
    /// Load both collections from storage.
    ///
    /// Never fails: unreadable entries are logged at `warn` and default
    /// to empty.
    #[must_use]
    pub fn load(storage: S) -> Self {
        let favorites = read_ids(&storage, FAVORITES_KEY).into_iter().collect();

        let mut recently_viewed = Vec::new();
        for id in read_ids(&storage, RECENTLY_VIEWED_KEY) {
            if !recently_viewed.contains(&id) {
                recently_viewed.push(id);
            }
        }
        recently_viewed.truncate(MAX_RECENTLY_VIEWED);

        Self {
            storage,
            favorites,
            recently_viewed,
        }
    }

    /// The favorites set.
    #[must_use]
    pub const fn favorites(&self) -> &BTreeSet<VenueId> {
        &self.favorites
    }

    /// Whether a venue is currently a favorite.
    #[must_use]
    pub fn is_favorite(&self, id: VenueId) -> bool {
        self.favorites.contains(&id)
    }

    /// Most-recent-first list of viewed venues, at most five entries.
    #[must_use]
    pub fn recently_viewed(&self) -> &[VenueId] {
        &self.recently_viewed
    }

    /// Flip a venue's favorite membership and persist the set.
    ///
    /// Returns `true` if the venue is a favorite after the call.
    pub fn toggle_favorite(&mut self, id: VenueId) -> bool {
        let now_favorite = if self.favorites.remove(&id) {
            false
        } else {
            self.favorites.insert(id);
            true
        };
        self.persist(FAVORITES_KEY, self.favorites.iter());
        now_favorite
    }

    /// Record a venue view: float it to the front of the
    /// recently-viewed list, drop any earlier occurrence, truncate to
    /// the five most recent, and persist.
    pub fn record_view(&mut self, id: VenueId) {
        self.recently_viewed.retain(|&seen| seen != id);
        self.recently_viewed.insert(0, id);
        self.recently_viewed.truncate(MAX_RECENTLY_VIEWED);
        self.persist(RECENTLY_VIEWED_KEY, self.recently_viewed.iter());
    }

    fn persist<'a>(&self, key: &str, ids: impl Iterator<Item = &'a VenueId>) {
        let raw: Vec<u32> = ids.map(|id| id.0).collect();
        match serde_json::to_string(&raw) {
            Ok(json) => self.storage.set(key, &json),
            Err(error) => {
                tracing::warn!(key, %error, "failed to serialize venue ids");
            },
        }
    }
}

fn read_ids<S: KeyValueStorage>(storage: &S, key: &str) -> Vec<VenueId> {
    let Some(raw) = storage.get(key) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<u32>>(&raw) {
        Ok(ids) => ids.into_iter().map(VenueId).collect(),
        Err(error) => {
            tracing::warn!(key, %error, "corrupt storage entry, defaulting to empty");
            Vec::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;
    use proptest::prelude::*;

    fn store() -> FavoritesStore<InMemoryStorage> {
        FavoritesStore::load(InMemoryStorage::new())
    }

    #[test]
    fn load_defaults_to_empty_collections() {
        let store = store();
        assert!(store.favorites().is_empty());
        assert!(store.recently_viewed().is_empty());
    }

    #[test]
    fn load_recovers_from_corrupt_entries() {
        let storage = InMemoryStorage::with_entries([
            (FAVORITES_KEY.to_string(), "not json".to_string()),
            (RECENTLY_VIEWED_KEY.to_string(), "{\"nope\":1}".to_string()),
        ]);
        let store = FavoritesStore::load(storage);
        assert!(store.favorites().is_empty());
        assert!(store.recently_viewed().is_empty());
    }

    #[test]
    fn toggle_favorite_persists_and_reloads() {
        let storage = InMemoryStorage::new();
        let mut store = FavoritesStore::load(storage.clone());

        assert!(store.toggle_favorite(VenueId(7)));
        assert_eq!(storage.get(FAVORITES_KEY), Some("[7]".to_string()));

        let reloaded = FavoritesStore::load(storage);
        assert!(reloaded.is_favorite(VenueId(7)));
    }

    #[test]
    fn double_toggle_is_an_involution() {
        let mut store = store();
        store.toggle_favorite(VenueId(3));

        let before: Vec<_> = store.favorites().iter().copied().collect();
        store.toggle_favorite(VenueId(7));
        store.toggle_favorite(VenueId(7));
        let after: Vec<_> = store.favorites().iter().copied().collect();

        assert_eq!(before, after);
    }

    #[test]
    fn record_view_floats_repeat_views_to_front() {
        let mut store = store();
        store.record_view(VenueId(1));
        store.record_view(VenueId(2));
        store.record_view(VenueId(1));

        assert_eq!(store.recently_viewed(), &[VenueId(1), VenueId(2)]);
    }

    #[test]
    fn record_view_truncates_to_five() {
        let mut store = store();
        for id in 1..=8 {
            store.record_view(VenueId(id));
        }

        assert_eq!(
            store.recently_viewed(),
            &[
                VenueId(8),
                VenueId(7),
                VenueId(6),
                VenueId(5),
                VenueId(4)
            ]
        );
    }

    #[test]
    fn record_view_persists_most_recent_first() {
        let storage = InMemoryStorage::new();
        let mut store = FavoritesStore::load(storage.clone());
        store.record_view(VenueId(4));
        store.record_view(VenueId(9));

        assert_eq!(
            storage.get(RECENTLY_VIEWED_KEY),
            Some("[9,4]".to_string())
        );
    }

    #[test]
    fn load_truncates_oversized_persisted_list() {
        let storage = InMemoryStorage::with_entries([(
            RECENTLY_VIEWED_KEY.to_string(),
            "[1,2,3,4,5,6,7]".to_string(),
        )]);
        let store = FavoritesStore::load(storage);
        assert_eq!(store.recently_viewed().len(), MAX_RECENTLY_VIEWED);
    }

    proptest! {
        #[test]
        fn recently_viewed_is_bounded_and_unique(views in prop::collection::vec(0u32..20, 0..64)) {
            let mut store = store();
            for id in views {
                store.record_view(VenueId(id));
            }

            let seen = store.recently_viewed();
            prop_assert!(seen.len() <= MAX_RECENTLY_VIEWED);

            let unique: std::collections::HashSet<_> = seen.iter().collect();
            prop_assert_eq!(unique.len(), seen.len());
        }

        #[test]
        fn toggle_twice_restores_favorites(seed in prop::collection::btree_set(0u32..20, 0..10), id in 0u32..20) {
            let mut store = store();
            for &venue in &seed {
                store.toggle_favorite(VenueId(venue));
            }

            let before = store.favorites().clone();
            store.toggle_favorite(VenueId(id));
            store.toggle_favorite(VenueId(id));

            prop_assert_eq!(store.favorites(), &before);
        }
    }
}
