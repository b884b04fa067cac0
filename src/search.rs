// Address search gating
//
// The geocoding request itself lives outside the core; this module decides
// WHEN a request may be issued (fixed delay after the last keystroke,
// minimum query length) and WHICH response still matters (generation
// counter, last request wins). Time is passed in so tests never sleep.

use std::time::{Duration, Instant};

/// Delay after the last keystroke before a lookup fires
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Queries shorter than this never fire
pub const MIN_QUERY_LEN: usize = 3;

/// A lookup the caller should now issue. Keep the generation and check it
/// with [`SearchDebouncer::is_current`] when the response arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct SearchDebouncer {
    pending: Option<(String, Instant)>,
    generation: u64,
}

impl SearchDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keystroke. Any earlier pending lookup is discarded; a
    /// query below the minimum length just clears the pending state.
    pub fn input(&mut self, query: &str, now: Instant) {
        if query.len() < MIN_QUERY_LEN {
            self.pending = None;
            return;
        }
        self.pending = Some((query.to_string(), now + DEBOUNCE_DELAY));
    }

    /// Fire the pending lookup once its delay has elapsed. Each issued
    /// request gets a fresh generation, making every earlier one stale.
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => {
                let (query, _) = self.pending.take().unwrap();
                self.generation += 1;
                log::debug!("Issuing geocode lookup {:?} (gen {})", query, self.generation);
                Some(SearchRequest {
                    query,
                    generation: self.generation,
                })
            }
            _ => None,
        }
    }

    /// Whether a response for `generation` is still the newest request.
    /// Responses for superseded generations are dropped by the caller.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_queries_never_fire() {
        let mut deb = SearchDebouncer::new();
        let t0 = Instant::now();
        deb.input("ab", t0);
        assert!(deb.poll(t0 + Duration::from_secs(2)).is_none());
    }

    #[test]
    fn test_fires_only_after_delay() {
        let mut deb = SearchDebouncer::new();
        let t0 = Instant::now();
        deb.input("wellington", t0);
        assert!(deb.poll(t0 + Duration::from_millis(499)).is_none());
        let req = deb.poll(t0 + Duration::from_millis(500)).unwrap();
        assert_eq!(req.query, "wellington");
        // Fired once; nothing left pending
        assert!(deb.poll(t0 + Duration::from_secs(2)).is_none());
    }

    #[test]
    fn test_keystroke_restarts_the_delay() {
        let mut deb = SearchDebouncer::new();
        let t0 = Instant::now();
        deb.input("well", t0);
        deb.input("welli", t0 + Duration::from_millis(400));
        // 500ms after the FIRST keystroke, nothing fires
        assert!(deb.poll(t0 + Duration::from_millis(500)).is_none());
        let req = deb.poll(t0 + Duration::from_millis(900)).unwrap();
        assert_eq!(req.query, "welli");
    }

    #[test]
    fn test_shortened_query_cancels_pending() {
        let mut deb = SearchDebouncer::new();
        let t0 = Instant::now();
        deb.input("wellington", t0);
        deb.input("we", t0 + Duration::from_millis(100));
        assert!(deb.poll(t0 + Duration::from_secs(2)).is_none());
    }

    #[test]
    fn test_last_request_wins() {
        let mut deb = SearchDebouncer::new();
        let t0 = Instant::now();
        deb.input("dunedin", t0);
        let first = deb.poll(t0 + DEBOUNCE_DELAY).unwrap();

        deb.input("auckland", t0 + Duration::from_secs(1));
        let second = deb.poll(t0 + Duration::from_secs(1) + DEBOUNCE_DELAY).unwrap();

        // The first response arrives late; its generation is stale
        assert!(!deb.is_current(first.generation));
        assert!(deb.is_current(second.generation));
    }
}
