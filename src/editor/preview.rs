use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use tracing::debug;
use uuid::Uuid;

const PREVIEW_SCHEME: &str = "preview:";

/// Owned reference to a live preview. Not `Clone`: releasing consumes it, so a
/// preview can be released at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    key: Uuid,
    url: String,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Registry of transient preview resources, analogous to object URLs.
#[derive(Debug, Default)]
pub struct PreviewStore {
    live: HashMap<Uuid, Arc<[u8]>>,
    released: Arc<AtomicUsize>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, bytes: Arc<[u8]>) -> PreviewHandle {
        let key = Uuid::new_v4();
        self.live.insert(key, bytes);
        let url = format!("{PREVIEW_SCHEME}{key}");
        debug!(%url, "allocated preview");
        PreviewHandle { key, url }
    }

    pub fn release(&mut self, handle: PreviewHandle) -> bool {
        let removed = self.live.remove(&handle.key).is_some();
        if removed {
            self.released.fetch_add(1, Ordering::Relaxed);
            debug!(url = %handle.url, "released preview");
        }
        removed
    }

    pub fn resolve(&self, url: &str) -> Option<Arc<[u8]>> {
        let key = url.strip_prefix(PREVIEW_SCHEME)?.parse::<Uuid>().ok()?;
        self.live.get(&key).cloned()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.resolve(url).is_some()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total number of previews released over the store's lifetime.
    pub fn released_count(&self) -> usize {
        self.released.load(Ordering::Relaxed)
    }

    /// Release counter shared with the store; it stays readable after the store is dropped.
    pub fn release_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_and_release_round_trip() {
        let mut store = PreviewStore::new();
        let handle = store.allocate(Arc::from(&b"png"[..]));
        let url = handle.url().to_string();
        assert!(url.starts_with("preview:"));
        assert_eq!(store.resolve(&url).as_deref(), Some(&b"png"[..]));
        assert!(store.release(handle));
        assert!(!store.is_live(&url));
        assert_eq!(store.live_count(), 0);
        assert_eq!(store.released_count(), 1);
    }

    #[test]
    fn foreign_urls_do_not_resolve() {
        let store = PreviewStore::new();
        assert!(store.resolve("blob:abc").is_none());
        assert!(store.resolve("preview:not-a-uuid").is_none());
    }
}
