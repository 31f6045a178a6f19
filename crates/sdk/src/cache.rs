//! Time-windowed order cache.
//!
//! One entry per asset-pair direction, keyed on the structured
//! `(maker_asset_data, taker_asset_data)` tuple. An entry is fresh while
//! `now - refreshed_at < refresh_interval`; a stale or missing entry makes
//! the next read fetch before being served.
//!
//! Race policy: there is deliberately no lock around the caller's
//! check-then-fetch-then-store sequence. Concurrent requests for the same key
//! may both miss and both fetch; the entry is replaced wholesale and the last
//! write wins, which is harmless since any fetched value is valid. Entries
//! are never evicted; they live for the lifetime of the owning cache.

use std::time::{Duration, Instant};

use alloy::primitives::Bytes;
use dashmap::DashMap;
use tracing::debug;

use crate::types::OrdersAndFillableAmounts;

/// Time source for freshness checks, injected so staleness is testable.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant { Instant::now() }
}

type PairKey = (Bytes, Bytes);

#[derive(Clone)]
struct CacheEntry {
    orders: OrdersAndFillableAmounts,
    refreshed_at: Instant,
}

/// Keyed order cache with time-based staleness.
pub struct OrderCache<C: Clock = SystemClock> {
    entries: DashMap<PairKey, CacheEntry>,
    refresh_interval: Duration,
    clock: C,
}

impl OrderCache<SystemClock> {
    pub fn new(refresh_interval: Duration) -> Self {
        Self::with_clock(refresh_interval, SystemClock)
    }
}

impl<C: Clock> OrderCache<C> {
    pub fn with_clock(refresh_interval: Duration, clock: C) -> Self {
        Self { entries: DashMap::new(), refresh_interval, clock }
    }

    pub fn refresh_interval(&self) -> Duration { self.refresh_interval }

    /// Returns the stored value if present and still fresh.
    pub fn fresh(
        &self,
        maker_asset_data: &Bytes,
        taker_asset_data: &Bytes,
    ) -> Option<OrdersAndFillableAmounts> {
        let key = (maker_asset_data.clone(), taker_asset_data.clone());
        match self.entries.get(&key) {
            Some(entry) if self.clock.now().duration_since(entry.refreshed_at)
                < self.refresh_interval =>
            {
                debug!(maker = %maker_asset_data, taker = %taker_asset_data, "order cache hit");
                Some(entry.orders.clone())
            },
            Some(_) => {
                debug!(maker = %maker_asset_data, taker = %taker_asset_data, "order cache stale");
                None
            },
            None => {
                debug!(maker = %maker_asset_data, taker = %taker_asset_data, "order cache miss");
                None
            },
        }
    }

    /// Replaces the entry wholesale, stamped with the current time.
    pub fn store(
        &self,
        maker_asset_data: Bytes,
        taker_asset_data: Bytes,
        orders: OrdersAndFillableAmounts,
    ) {
        self.entries.insert(
            (maker_asset_data, taker_asset_data),
            CacheEntry { orders, refreshed_at: self.clock.now() },
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use alloy::primitives::{Address, U256};

    use super::*;
    use crate::asset;

    /// Clock advanced by hand.
    struct ManualClock {
        start: Instant,
        offset: Mutex<Duration>,
    }

    impl ManualClock {
        fn new() -> Self { Self { start: Instant::now(), offset: Mutex::new(Duration::ZERO) } }

        fn advance(&self, by: Duration) { *self.offset.lock().unwrap() += by; }
    }

    impl Clock for &ManualClock {
        fn now(&self) -> Instant { self.start + *self.offset.lock().unwrap() }
    }

    fn pair() -> (Bytes, Bytes) {
        (
            asset::encode_erc20(Address::repeat_byte(0x01)),
            asset::encode_erc20(Address::repeat_byte(0x02)),
        )
    }

    fn orders(n: usize) -> OrdersAndFillableAmounts {
        let order = crate::types::SignedOrder::new(
            Address::repeat_byte(0xaa),
            Address::ZERO,
            Address::ZERO,
            Address::ZERO,
            U256::from(100u64),
            U256::from(50u64),
            U256::ZERO,
            U256::ZERO,
            4_102_444_800,
            U256::ZERO,
            pair().0,
            pair().1,
            Bytes::new(),
        );
        OrdersAndFillableAmounts::new(vec![order; n], vec![U256::from(100u64); n])
    }

    #[test]
    fn test_fresh_within_window() {
        let clock = ManualClock::new();
        let cache = OrderCache::with_clock(Duration::from_secs(10), &clock);
        let (maker, taker) = pair();

        assert!(cache.fresh(&maker, &taker).is_none());
        cache.store(maker.clone(), taker.clone(), orders(1));

        clock.advance(Duration::from_secs(9));
        assert_eq!(cache.fresh(&maker, &taker).unwrap().len(), 1);
    }

    #[test]
    fn test_stale_at_window_boundary() {
        let clock = ManualClock::new();
        let cache = OrderCache::with_clock(Duration::from_secs(10), &clock);
        let (maker, taker) = pair();
        cache.store(maker.clone(), taker.clone(), orders(1));

        // Freshness is strict: elapsed == interval is stale
        clock.advance(Duration::from_secs(10));
        assert!(cache.fresh(&maker, &taker).is_none());
    }

    #[test]
    fn test_store_replaces_wholesale() {
        let clock = ManualClock::new();
        let cache = OrderCache::with_clock(Duration::from_secs(10), &clock);
        let (maker, taker) = pair();

        cache.store(maker.clone(), taker.clone(), orders(1));
        clock.advance(Duration::from_secs(9));
        cache.store(maker.clone(), taker.clone(), orders(3));

        // Replacement also re-stamps freshness
        clock.advance(Duration::from_secs(9));
        assert_eq!(cache.fresh(&maker, &taker).unwrap().len(), 3);
    }

    #[test]
    fn test_keys_are_direction_sensitive() {
        let clock = ManualClock::new();
        let cache = OrderCache::with_clock(Duration::from_secs(10), &clock);
        let (maker, taker) = pair();

        cache.store(maker.clone(), taker.clone(), orders(1));
        assert!(cache.fresh(&taker, &maker).is_none());
    }
}
