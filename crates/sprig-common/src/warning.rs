//! Parser warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the HTML parser to report markup it recovered from leniently.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Records `key` in the dedup set, returning `true` the first time it is seen.
fn remember(key: String) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about a recovered parse problem (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML Parser", "unterminated <div> absorbs the rest of its input");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if remember(format!("[{component}] {message}")) {
        eprintln!("{}", format!("[Sprig {component}] ⚠ {message}").yellow());
    }
}

/// Clear all recorded warnings (call before parsing an unrelated document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the dedup set is process-global and tests run in parallel.
    #[test]
    fn test_remember_deduplicates_until_cleared() {
        let key = "[Test] remember-dedup".to_string();
        assert!(remember(key.clone()));
        assert!(!remember(key.clone()));

        clear_warnings();
        assert!(remember(key));
    }
}
