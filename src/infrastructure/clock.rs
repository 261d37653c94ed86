use crate::domain::ports::SaltSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Salt derived from the wall clock, in nanoseconds since the Unix epoch.
///
/// Values are strictly increasing per instance even if the clock stalls or steps back.
#[derive(Debug, Default)]
pub struct ClockSalt {
    last: AtomicU64,
}

impl ClockSalt {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_nanos() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    }
}

impl SaltSource for ClockSalt {
    fn next_salt(&self) -> String {
        let now = Self::now_nanos();
        let mut previous = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(previous + 1);
            match self.last.compare_exchange_weak(
                previous,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next.to_string(),
                Err(actual) => previous = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_salts_strictly_increase() {
        let salt = ClockSalt::new();
        let values: Vec<u64> = (0..1000)
            .map(|_| salt.next_salt().parse().unwrap())
            .collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_salts_unique_across_threads() {
        let salt = Arc::new(ClockSalt::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let salt = Arc::clone(&salt);
                std::thread::spawn(move || (0..500).map(|_| salt.next_salt()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for value in handle.join().unwrap() {
                assert!(seen.insert(value));
            }
        }
        assert_eq!(seen.len(), 2000);
    }
}
