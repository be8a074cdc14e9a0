// tests/ratelimiter/eviction_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::limiter_with;
    use crate::fixtures::test_clock::TestClock;

    #[test]
    fn single_slot_store_resets_history_on_eviction() {
        let clock = TestClock::new(0);
        let limiter = limiter_with(60_000, 1, &clock);

        assert!(limiter.check("a", 5).is_admitted());
        assert!(limiter.check("b", 5).is_admitted());
        assert!(!limiter.is_tracked("a"));
        assert!(limiter.is_tracked("b"));

        // "a" starts over with a full budget
        let decision = limiter.check_detailed("a", 5);
        assert!(decision.allowed());
        assert_eq!(decision.remaining, 4);
    }

    #[test]
    fn store_never_exceeds_capacity() {
        let clock = TestClock::new(0);
        let limiter = limiter_with(60_000, 4, &clock);

        for i in 0..50 {
            assert!(limiter.check(&format!("10.0.0.{i}"), 1).is_admitted());
            assert!(limiter.tracked_identifiers() <= 4);
        }
        assert_eq!(limiter.tracked_identifiers(), 4);
        for i in 46..50 {
            assert!(limiter.is_tracked(&format!("10.0.0.{i}")));
        }
    }

    #[test]
    fn inserting_past_capacity_evicts_exactly_the_least_recent() {
        let clock = TestClock::new(0);
        let limiter = limiter_with(60_000, 3, &clock);

        for id in ["a", "b", "c"] {
            assert!(limiter.check(id, 10).is_admitted());
        }
        // touch "a" so that "b" becomes least recently used
        assert!(limiter.check("a", 10).is_admitted());

        assert!(limiter.check("d", 10).is_admitted());
        assert_eq!(limiter.tracked_identifiers(), 3);
        assert!(limiter.is_tracked("a"));
        assert!(!limiter.is_tracked("b"));
        assert!(limiter.is_tracked("c"));
        assert!(limiter.is_tracked("d"));
    }

    #[test]
    fn rejected_checks_still_refresh_recency() {
        let clock = TestClock::new(0);
        let limiter = limiter_with(60_000, 2, &clock);

        assert!(limiter.check("a", 1).is_admitted());
        assert!(limiter.check("b", 1).is_admitted());
        assert!(limiter.check("a", 1).is_rejected());

        assert!(limiter.check("c", 1).is_admitted());
        assert!(limiter.is_tracked("a"));
        assert!(!limiter.is_tracked("b"));

        // "a" kept its history, so it is still limited
        assert!(limiter.check("a", 1).is_rejected());
    }

    #[test]
    fn existing_identifier_does_not_trigger_eviction() {
        let clock = TestClock::new(0);
        let limiter = limiter_with(60_000, 2, &clock);

        assert!(limiter.check("a", 10).is_admitted());
        assert!(limiter.check("b", 10).is_admitted());
        for _ in 0..5 {
            assert!(limiter.check("b", 10).is_admitted());
        }
        assert!(limiter.is_tracked("a"));
        assert_eq!(limiter.tracked_identifiers(), 2);
    }
}
