//! Published snapshots.
//!
//! Capture publishes its PNG payload here and hands the caller an
//! opaque `snapgrab://<id>` locator. The allocation lives until the
//! locator is released; a forgotten locator stays allocated for the
//! life of the process, which is the caller's side of the contract.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

static PUBLISHED: LazyLock<Mutex<HashMap<String, Arc<Vec<u8>>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Publish PNG bytes and return their locator.
pub fn publish(png_bytes: Vec<u8>) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let url = format!("snapgrab://{id}");
    PUBLISHED
        .lock()
        .unwrap()
        .insert(url.clone(), Arc::new(png_bytes));
    url
}

/// Look up a locator's bytes. `None` once released, or never published.
pub fn resolve(url: &str) -> Option<Arc<Vec<u8>>> {
    PUBLISHED.lock().unwrap().get(url).cloned()
}

/// Release a locator's allocation. `None` performs no store access.
pub fn release(url: Option<&str>) {
    let Some(url) = url else { return };
    if PUBLISHED.lock().unwrap().remove(url).is_none() {
        log::debug!("Released unknown locator {url}");
    }
}

/// Number of snapshots currently published.
pub fn live_count() -> usize {
    PUBLISHED.lock().unwrap().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_then_resolve() {
        let url = publish(vec![1, 2, 3]);
        let bytes = resolve(&url).expect("locator should be live");
        assert_eq!(bytes.as_slice(), &[1, 2, 3]);
        release(Some(&url));
    }

    #[test]
    fn release_drops_the_allocation() {
        let url = publish(vec![9, 9]);
        release(Some(&url));
        assert!(resolve(&url).is_none());
    }

    #[test]
    fn release_none_leaves_live_locators_alone() {
        let url = publish(vec![4, 2]);
        release(None);
        assert!(resolve(&url).is_some());
        release(Some(&url));
    }

    #[test]
    fn release_unknown_locator_is_harmless() {
        release(Some("snapgrab://0"));
    }

    #[test]
    fn locators_are_unique() {
        let a = publish(vec![1]);
        let b = publish(vec![1]);
        assert_ne!(a, b);
        release(Some(&a));
        release(Some(&b));
    }
}
