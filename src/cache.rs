// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Identity cache for textures.

Maps an opaque string identity to a weak reference.  The cache never keeps a texture alive; an
entry whose texture was dropped behaves as if it were absent.
*/

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};

pub struct TextureCache<T> {
    entries: HashMap<String, Weak<T>>,
}

impl<T> TextureCache<T> {
    pub fn new() -> Self {
        TextureCache { entries: HashMap::new() }
    }

    /// The live value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<Rc<T>> {
        self.entries.get(key).and_then(Weak::upgrade)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, value: &Rc<T>) {
        self.entries.insert(key.into(), Rc::downgrade(value));
    }

    /// Removes the entry for `key`.  Returns whether an entry (live or dead) was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /**
    Removes the entry for `key` only if it refers to `value`.

    Used on teardown, where the key may already have been reassigned to a newer value.
    */
    pub fn remove_if(&mut self, key: &str, value: *const T) -> bool {
        match self.entries.get(key) {
            Some(weak) if std::ptr::eq(weak.as_ptr(), value) => {
                self.entries.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Drops entries whose value no longer exists.  Returns how many were dropped.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, weak| weak.strong_count() > 0);
        before - self.entries.len()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.values().filter(|w| w.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for TextureCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for TextureCache<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureCache")
            .field("entries", &self.entries.len())
            .field("live", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_same_instance() {
        let mut cache = TextureCache::new();
        let value = Rc::new(5);
        cache.insert("video_a", &value);
        let found = cache.get("video_a").unwrap();
        assert!(Rc::ptr_eq(&found, &value));
        assert!(cache.get("video_b").is_none());
    }

    #[test]
    fn dropped_values_are_misses() {
        let mut cache = TextureCache::new();
        let value = Rc::new(5);
        cache.insert("video_a", &value);
        drop(value);
        assert!(cache.get("video_a").is_none());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.prune(), 1);
        assert_eq!(cache.prune(), 0);
    }

    #[test]
    fn remove_if_respects_reassignment() {
        let mut cache = TextureCache::new();
        let old = Rc::new(1);
        let new = Rc::new(2);
        cache.insert("video_a", &new);
        assert!(!cache.remove_if("video_a", Rc::as_ptr(&old)));
        assert!(cache.contains("video_a"));
        assert!(cache.remove_if("video_a", Rc::as_ptr(&new)));
        assert!(!cache.remove("video_a"));
    }
}
