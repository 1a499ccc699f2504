use chrono::Utc;

/// Hands out time-shaped ids that strictly increase, even within one millisecond.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn seeded(existing: impl IntoIterator<Item = u64>) -> Self {
        Self {
            last: existing.into_iter().max().unwrap_or(0),
        }
    }

    pub fn next(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = now.max(self.last.saturating_add(1));
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_never_repeat() {
        let mut ids = IdGenerator::default();
        let mut previous = 0;
        for _ in 0..1000 {
            let id = ids.next();
            assert!(id > previous);
            previous = id;
        }
    }

    #[test]
    fn ids_continue_past_existing() {
        let far_future = u64::try_from(Utc::now().timestamp_millis()).unwrap() + 1_000_000;
        let mut ids = IdGenerator::seeded([3, far_future, 7]);
        assert_eq!(ids.next(), far_future + 1);
    }
}
