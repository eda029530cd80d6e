//! Key/value persistence
//!
//! LocalStorage on the web build. Native builds keep values in a per-thread map
//! so profiles and leaderboards behave the same way in tests and the demo.

/// Read a stored value
#[cfg(target_arch = "wasm32")]
pub fn get_item(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(key).ok()?
}

/// Store a value; returns false if storage is unavailable
#[cfg(target_arch = "wasm32")]
pub fn set_item(key: &str, value: &str) -> bool {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    match storage {
        Some(storage) => match storage.set_item(key, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("LocalStorage write failed for {}: {:?}", key, e);
                false
            }
        },
        None => {
            log::warn!("LocalStorage unavailable, {} not saved", key);
            false
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod memory {
    use std::cell::RefCell;
    use std::collections::HashMap;

    thread_local! {
        pub static STORE: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get_item(key: &str) -> Option<String> {
    memory::STORE.with(|store| store.borrow().get(key).cloned())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_item(key: &str, value: &str) -> bool {
    memory::STORE.with(|store| {
        store.borrow_mut().insert(key.to_string(), value.to_string());
    });
    true
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_overwrite() {
        assert_eq!(get_item("storage_test_key"), None);
        assert!(set_item("storage_test_key", "hello"));
        assert_eq!(get_item("storage_test_key").as_deref(), Some("hello"));
        assert!(set_item("storage_test_key", "again"));
        assert_eq!(get_item("storage_test_key").as_deref(), Some("again"));
    }
}
