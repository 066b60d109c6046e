use std::sync::Mutex;
use std::sync::MutexGuard;

use tracing::warn;

/// Locks `lock`, taking the inner value back if a previous holder panicked.
///
/// Terminal state must stay reachable after a panicking test or caller so the
/// screen can still be torn down.
pub fn mutex_lock_or_recover<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(|poisoned| {
        warn!("recovering from poisoned mutex");
        poisoned.into_inner()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lock_returns_guard() {
        let lock = Mutex::new(5);
        *mutex_lock_or_recover(&lock) += 1;
        assert_eq!(*mutex_lock_or_recover(&lock), 6);
    }

    #[test]
    fn test_lock_recovers_from_poison() {
        let lock = Arc::new(Mutex::new(vec![1, 2]));
        let poisoner = Arc::clone(&lock);

        let _ = thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(lock.is_poisoned());
        assert_eq!(*mutex_lock_or_recover(&lock), vec![1, 2]);
    }
}
