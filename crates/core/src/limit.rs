//! Per-identity token-bucket rate limiting.
//!
//! One bucket per client identity. Refill is whole-second granular:
//! each check credits `floor(elapsed_secs) * rate` tokens and resets
//! the refill timestamp unconditionally, so a caller arriving at
//! sub-second intervals never accrues fractional credit. This
//! under-refills compared to a continuous model and is intentional.

use compact_str::CompactString;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Instant;

/// Default bucket capacity (burst size).
pub const DEFAULT_CAPACITY: u32 = 10;
/// Default refill rate in tokens per second.
pub const DEFAULT_REFILL_PER_SEC: u32 = 1;
/// Default ceiling on distinct tracked identities.
pub const DEFAULT_MAX_IDENTITIES: usize = 4096;

/// A single identity's rate-limit state.
#[derive(Debug, Clone)]
pub struct TokenBucket {
    /// Remaining tokens, always within `0..=capacity`.
    tokens: u32,
    /// When the bucket was last checked for refill.
    last_refill: Instant,
}

impl TokenBucket {
    fn full(capacity: u32, now: Instant) -> Self {
        Self {
            tokens: capacity,
            last_refill: now,
        }
    }

    fn refill(&mut self, capacity: u32, rate: u32, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs();
        let credit = u32::try_from(elapsed)
            .unwrap_or(u32::MAX)
            .saturating_mul(rate);
        self.tokens = self.tokens.saturating_add(credit).min(capacity);
        self.last_refill = now;
    }

    /// Remaining tokens.
    pub fn tokens(&self) -> u32 {
        self.tokens
    }
}

/// Maps client identities to token buckets with thread-safe interior
/// mutability.
///
/// The registry is bounded: once `max_identities` distinct identities
/// are tracked, the least-recently-seen bucket is evicted. An evicted
/// caller that returns starts over with a full bucket.
pub struct RateLimiter {
    buckets: Mutex<LruCache<CompactString, TokenBucket>>,
    capacity: u32,
    refill_per_sec: u32,
}

impl RateLimiter {
    /// Create a limiter with explicit capacity, refill rate, and
    /// identity ceiling.
    pub fn new(capacity: u32, refill_per_sec: u32, max_identities: usize) -> Self {
        let ceiling = NonZeroUsize::new(max_identities).unwrap_or(NonZeroUsize::MIN);
        Self {
            buckets: Mutex::new(LruCache::new(ceiling)),
            capacity,
            refill_per_sec,
        }
    }

    /// Check whether a request from `identity` at `now` is admitted.
    ///
    /// Refills the identity's bucket, then debits one token if any
    /// remain. The whole read-modify-write runs under one lock, so
    /// concurrent requests for the same identity cannot lose a
    /// decrement.
    pub fn allow(&self, identity: &str, now: Instant) -> bool {
        let mut buckets = self.buckets.lock().unwrap();
        if !buckets.contains(identity) {
            if buckets.len() == buckets.cap().get() {
                tracing::debug!("identity ceiling reached, evicting least-recently-seen bucket");
            }
            buckets.put(
                CompactString::new(identity),
                TokenBucket::full(self.capacity, now),
            );
        }
        let Some(bucket) = buckets.get_mut(identity) else {
            return false;
        };
        bucket.refill(self.capacity, self.refill_per_sec, now);
        if bucket.tokens > 0 {
            bucket.tokens -= 1;
            true
        } else {
            false
        }
    }

    /// Number of identities currently tracked.
    pub fn tracked(&self) -> usize {
        self.buckets.lock().unwrap().len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(
            DEFAULT_CAPACITY,
            DEFAULT_REFILL_PER_SEC,
            DEFAULT_MAX_IDENTITIES,
        )
    }
}
