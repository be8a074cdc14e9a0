// tests/ratelimiter/cleanup_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::limiter_with;
    use crate::fixtures::test_clock::TestClock;

    #[test]
    fn purge_removes_fully_expired_clients() {
        let clock = TestClock::new(0);
        let limiter = limiter_with(1_000, 10, &clock);

        assert!(limiter.check("client1", 5).is_admitted());
        clock.set_time(500);
        assert!(limiter.check("client2", 5).is_admitted());
        clock.set_time(900);
        assert!(limiter.check("client3", 5).is_admitted());

        assert_eq!(limiter.tracked_identifiers(), 3);

        // at t=1600 client1 and client2 are stale, client3 is live
        clock.set_time(1_600);
        assert_eq!(limiter.purge_expired().unwrap(), 2);

        assert_eq!(limiter.tracked_identifiers(), 1);
        assert!(!limiter.is_tracked("client1"));
        assert!(!limiter.is_tracked("client2"));
        assert!(limiter.is_tracked("client3"));

        clock.set_time(1_900);
        assert_eq!(limiter.purge_expired().unwrap(), 1);
        assert_eq!(limiter.tracked_identifiers(), 0);
    }

    #[test]
    fn purge_handles_empty_state() {
        let clock = TestClock::new(0);
        let limiter = limiter_with(1_000, 10, &clock);

        assert_eq!(limiter.purge_expired().unwrap(), 0);
        assert_eq!(limiter.tracked_identifiers(), 0);
    }

    #[test]
    fn purge_preserves_recent_clients() {
        let clock = TestClock::new(100_000);
        let limiter = limiter_with(1_000, 10, &clock);

        for i in 0..5 {
            assert!(limiter.check(&format!("client{i}"), 1).is_admitted());
            clock.advance(10);
        }

        assert_eq!(limiter.purge_expired().unwrap(), 0);
        assert_eq!(limiter.tracked_identifiers(), 5);
    }

    #[test]
    fn expired_window_behaves_like_a_new_client_without_purge() {
        let clock = TestClock::new(0);
        let limiter = limiter_with(1_000, 10, &clock);

        for _ in 0..3 {
            assert!(limiter.check("client1", 3).is_admitted());
        }
        assert!(limiter.check("client1", 3).is_rejected());

        clock.advance(5_000);
        let decision = limiter.check_detailed("client1", 3);
        assert!(decision.allowed());
        assert_eq!(decision.remaining, 2);
        assert_eq!(clock.millis(), 5_000);
    }
}
