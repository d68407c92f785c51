//! Deduplicated warning output.
//!
//! Parse problems and unsupported markup are reported as warnings rather
//! than errors; each distinct message is printed at most once per process
//! so a document full of the same mistake does not flood the terminal.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

fn seen() -> &'static Mutex<HashSet<String>> {
    static SEEN: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();
    SEEN.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Report a warning for `component`, printing it only the first time this
/// exact message is seen.
///
/// # Panics
/// Panics if the warning-set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("{component}: {message}");
    let first_time = seen().lock().unwrap().insert(key);

    if first_time {
        eprintln!("{YELLOW}[minnow {component}] warning: {message}{RESET}");
    }
}

/// Forget all previously printed warnings. Call between documents so a
/// fresh load reports its own problems.
///
/// # Panics
/// Panics if the warning-set mutex is poisoned.
pub fn clear_warnings() {
    seen().lock().unwrap().clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    // The seen-set is process-global, so tests touching it must not
    // interleave.
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn warn_once_deduplicates() {
        let _guard = TEST_LOCK.lock().unwrap();
        clear_warnings();
        warn_once("test", "same message");
        warn_once("test", "same message");
        assert_eq!(seen().lock().unwrap().len(), 1);
    }

    #[test]
    fn distinct_components_are_distinct_keys() {
        let _guard = TEST_LOCK.lock().unwrap();
        clear_warnings();
        warn_once("html", "thing");
        warn_once("layout", "thing");
        assert_eq!(seen().lock().unwrap().len(), 2);
    }
}
