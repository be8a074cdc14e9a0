// tests/ratelimiter/main.rs

mod cleanup_tests;
mod eviction_tests;
