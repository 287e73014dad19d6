//! Consumable flagging and the caller-owned registry cache.
//!
//! Consumables are an annotation on top of the six categories: an item keeps
//! its primary bucket and may additionally be listed here for the zero-out
//! adjustment export.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::classify::match_key;
use crate::model::OnHandItem;

/// Upper-cased item codes flagged as consumable by the parts registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumableCodes {
    codes: HashSet<String>,
}

impl ConsumableCodes {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect();
        Self { codes }
    }

    pub fn contains(&self, item_code: &str) -> bool {
        self.codes.contains(&match_key(item_code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// On-hand rows whose code is a known consumable, ordered by item code.
pub fn classify_consumables(on_hand_items: &[OnHandItem], codes: &ConsumableCodes) -> Vec<OnHandItem> {
    if codes.is_empty() {
        return Vec::new();
    }

    let mut consumable: Vec<OnHandItem> = on_hand_items
        .iter()
        .filter(|item| codes.contains(&item.item_code))
        .cloned()
        .collect();
    consumable.sort_by(|a, b| a.item_code.cmp(&b.item_code));
    consumable
}

// ---------------------------------------------------------------------------
// Registry cache
// ---------------------------------------------------------------------------

/// An external lookup (parts registry, truck list) that may be unavailable.
pub trait Registry<T> {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    fn fetch(&self) -> Result<T, String>;
}

/// Process-lifetime cache for one registry value.
///
/// The first successful fetch is kept until `invalidate`. Failures are logged,
/// yield `T::default()` and are not cached, so the next call retries.
/// Concurrent callers wait on the in-flight fetch instead of starting another.
pub struct RegistryCache<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> Default for RegistryCache<T> {
    fn default() -> Self {
        Self { slot: Mutex::new(None) }
    }
}

impl<T: Default> RegistryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value, fetching it first if needed. `None` means no registry is
    /// configured, which degrades to an empty value.
    pub fn get_or_fetch(&self, registry: Option<&dyn Registry<T>>) -> Arc<T> {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(value) = slot.as_ref() {
            return Arc::clone(value);
        }

        let Some(registry) = registry else {
            log::warn!("no registry configured; continuing without it");
            return Arc::new(T::default());
        };

        match registry.fetch() {
            Ok(value) => {
                log::info!("{}: loaded", registry.name());
                let value = Arc::new(value);
                *slot = Some(Arc::clone(&value));
                value
            }
            Err(e) => {
                log::warn!("{} unavailable: {e}", registry.name());
                Arc::new(T::default())
            }
        }
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }

    pub fn is_cached(&self) -> bool {
        self.slot
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }
}
