//! In-memory results of the update cycle, keyed by restaurant id.
//!
//! Entries are only ever replaced as a whole, so readers see either the old or
//! the new menus of a restaurant, never a mix.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard};

use crate::model::MenuSet;
use crate::profile;

#[derive(Debug, Clone)]
pub struct CachedMenu {
    pub pdf_url: String,
    pub fingerprint: String,
    pub menus: MenuSet,
    pub updated_at: DateTime<Utc>,
}

pub struct MenuStore {
    menus: RwLock<HashMap<String, Arc<CachedMenu>>>,
    links: RwLock<BTreeMap<String, String>>,
    updates: HashMap<String, Mutex<()>>,
}

impl Default for MenuStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuStore {
    pub fn new() -> Self {
        let updates = profile::all()
            .iter()
            .map(|profile| (profile.id.to_string(), Mutex::new(())))
            .collect();
        Self {
            menus: RwLock::new(HashMap::new()),
            links: RwLock::new(BTreeMap::new()),
            updates,
        }
    }

    pub fn get(&self, restaurant: &str) -> Option<Arc<CachedMenu>> {
        let menus = self.menus.read().unwrap_or_else(PoisonError::into_inner);
        menus.get(restaurant).cloned()
    }

    pub fn fingerprint(&self, restaurant: &str) -> Option<String> {
        self.get(restaurant).map(|entry| entry.fingerprint.clone())
    }

    /// Swaps in the result of a successful run.
    pub fn replace(&self, restaurant: &str, entry: CachedMenu) {
        let mut menus = self.menus.write().unwrap_or_else(PoisonError::into_inner);
        menus.insert(restaurant.to_string(), Arc::new(entry));
    }

    pub fn links(&self) -> BTreeMap<String, String> {
        self.links.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_links(&self, links: BTreeMap<String, String>) {
        *self.links.write().unwrap_or_else(PoisonError::into_inner) = links;
    }

    /// Claims the update slot of `restaurant`. Returns `None` while another
    /// update of the same restaurant is in flight, or for unknown ids.
    pub fn try_begin_update(&self, restaurant: &str) -> Option<MutexGuard<'_, ()>> {
        self.updates.get(restaurant)?.try_lock().ok()
    }
}
