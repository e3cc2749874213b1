// ============================================================================
// Exchange Core Library
// Concurrent continuous double-auction matching with per-instrument books
// ============================================================================

//! # Exchange Core
//!
//! A concurrent continuous double-auction matching core. Buy and sell
//! orders for a bounded universe of instruments are paired under
//! price-time priority; unmatched residual quantity rests in the book.
//!
//! ## Design
//!
//! - **Per-instrument atomicity**: insert-and-match runs under one mutex
//!   per instrument; submissions to different instruments share no lock.
//! - **Global admission sequencing**: one wait-free atomic allocator issues
//!   strictly increasing sequence numbers system-wide, making the time
//!   tie-break total and deterministic.
//! - **Immutable orders**: partial fills replace a resting order with a new
//!   value carrying the residual quantity, never mutating in place.
//! - **Errors, not logs**: every failure propagates as a `Result` to the
//!   submitter; a submission either completes fully or rejects before any
//!   book state changes.
//!
//! ## Example
//!
//! ```rust
//! use exchange_core::prelude::*;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! let registry = BookRegistry::new(
//!     RegistryConfig::default(),
//!     Arc::new(NoOpEventHandler),
//! )
//! .unwrap();
//!
//! // A sell rests, a smaller aggressive buy trades at the resting price
//! registry
//!     .submit("AAPL", Side::Sell, 10, Decimal::from(100))
//!     .unwrap();
//! let trades = registry
//!     .submit("AAPL", Side::Buy, 4, Decimal::from(101))
//!     .unwrap();
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].quantity, 4);
//! assert_eq!(trades[0].price, Decimal::from(100));
//! assert_eq!(registry.active_order_count(), 1);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        BookSnapshot, ExchangeError, ExchangeResult, Order, PriceTimeQueue, RegistryConfig,
        Side, TradeEvent,
    };
    pub use crate::engine::{BookRegistry, InstrumentBook, SequenceAllocator};
    pub use crate::interfaces::{EventHandler, LoggingEventHandler, NoOpEventHandler};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn registry() -> BookRegistry {
        BookRegistry::new(RegistryConfig::default(), Arc::new(NoOpEventHandler)).unwrap()
    }

    fn price(value: u64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_end_to_end_matching() {
        let registry = registry();

        let trades = registry.submit("X", Side::Sell, 10, price(100)).unwrap();
        assert!(trades.is_empty());

        let trades = registry.submit("X", Side::Buy, 4, price(101)).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].instrument, "X");
        assert_eq!(trades[0].quantity, 4);
        assert_eq!(trades[0].price, price(100));

        let trades = registry.submit("X", Side::Buy, 6, price(100)).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity, 6);
        assert_eq!(trades[0].price, price(100));

        let snapshot = registry.snapshot("X", 10).unwrap();
        assert!(snapshot.bids.is_empty());
        assert!(snapshot.asks.is_empty());
        assert_eq!(registry.active_order_count(), 0);
    }

    #[test]
    fn test_trades_carry_admission_sequences() {
        let registry = registry();

        registry.submit("X", Side::Sell, 10, price(100)).unwrap();
        let trades = registry.submit("X", Side::Buy, 10, price(100)).unwrap();

        assert_eq!(trades.len(), 1);
        assert!(trades[0].buyer_sequence > trades[0].seller_sequence);
        assert_eq!(trades[0].notional(), Some(price(1000)));
    }

    #[test]
    fn test_concurrent_submissions_stay_consistent() {
        use rand::Rng;
        use std::thread;

        let registry = Arc::new(registry());
        let instruments = ["AAPL", "GOOG", "AMZN", "MSFT", "TSLA"];

        let mut handles = Vec::new();
        for _ in 0..4 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                let mut rng = rand::thread_rng();
                for _ in 0..200 {
                    let instrument = instruments[rng.gen_range(0..instruments.len())];
                    let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
                    let quantity = rng.gen_range(1..=100u64);
                    let limit = Decimal::from(rng.gen_range(100..=150u32));
                    registry.submit(instrument, side, quantity, limit).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        // Quiescent: the counter equals the resting orders, and no book is crossed
        let mut resting_orders = 0usize;
        for instrument in instruments {
            let book = registry.book(instrument).unwrap();
            resting_orders += book.resting_order_count();
            if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
                assert!(bid < ask, "{}: crossed book {} >= {}", instrument, bid, ask);
            }
        }
        assert_eq!(registry.active_order_count(), resting_orders as u64);
    }
}
