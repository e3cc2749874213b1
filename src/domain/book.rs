// ============================================================================
// Order Book Domain Model
// Per-side price-time queues and book snapshots
// ============================================================================

use crate::domain::errors::{ExchangeError, ExchangeResult};
use crate::domain::order::{Order, Side};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Priority Key
// ============================================================================

/// Side-aware priority key.
///
/// Buy side: higher price first. Sell side: lower price first. Ties on
/// price are broken by lower (earlier) sequence. All keys in one queue
/// share the same side, so the side-dependent comparison is coherent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PriorityKey {
    side: Side,
    price: Decimal,
    sequence: u64,
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_price = match self.side {
            Side::Buy => other.price.cmp(&self.price),
            Side::Sell => self.price.cmp(&other.price),
        };
        by_price.then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// Price-Time Queue
// ============================================================================

/// Ordered set of resting orders for one side of one instrument.
///
/// A pure data structure with no awareness of the opposite side: the
/// highest-priority order is always the first map entry, so peek, pop and
/// insert are all O(log n). The queue is owned exclusively by its
/// instrument's book and only ever touched inside that book's critical
/// section.
#[derive(Debug)]
pub struct PriceTimeQueue {
    side: Side,
    orders: BTreeMap<PriorityKey, Order>,
    /// Sequences currently resting, for duplicate-admission detection.
    sequences: HashSet<u64>,
}

impl PriceTimeQueue {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            orders: BTreeMap::new(),
            sequences: HashSet::new(),
        }
    }

    /// Insert a resting order.
    ///
    /// Fails with [`ExchangeError::DuplicateSequence`] if an order with the
    /// same sequence number is already resting. Sequence numbers are
    /// globally unique, so hitting this indicates a sequencing bug rather
    /// than a recoverable condition.
    pub fn insert(&mut self, order: Order) -> ExchangeResult<()> {
        let sequence = order.sequence();
        if !self.sequences.insert(sequence) {
            return Err(ExchangeError::DuplicateSequence { sequence });
        }

        let key = PriorityKey {
            side: self.side,
            price: order.price(),
            sequence,
        };
        self.orders.insert(key, order);
        Ok(())
    }

    /// The highest-priority resting order, if any.
    pub fn peek_best(&self) -> Option<&Order> {
        self.orders.first_key_value().map(|(_, order)| order)
    }

    /// Remove and return the highest-priority resting order.
    pub fn pop_best(&mut self) -> Option<Order> {
        let (_, order) = self.orders.pop_first()?;
        self.sequences.remove(&order.sequence());
        Some(order)
    }

    /// Best (top-of-book) price on this side.
    pub fn best_price(&self) -> Option<Decimal> {
        self.peek_best().map(Order::price)
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of resting orders on this side.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Total resting quantity on this side.
    pub fn total_quantity(&self) -> u64 {
        self.orders.values().map(Order::quantity).sum()
    }

    /// Aggregate (price, quantity) depth for the top `num_levels` price
    /// levels, in priority order.
    pub fn depth(&self, num_levels: usize) -> Vec<(Decimal, u64)> {
        let mut levels: Vec<(Decimal, u64)> = Vec::new();

        for order in self.orders.values() {
            match levels.last_mut() {
                Some((price, quantity)) if *price == order.price() => {
                    *quantity += order.quantity();
                },
                _ => {
                    if levels.len() == num_levels {
                        break;
                    }
                    levels.push((order.price(), order.quantity()));
                },
            }
        }

        levels
    }
}

// ============================================================================
// Book Snapshot
// ============================================================================

/// Immutable point-in-time view of one instrument's book depth.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BookSnapshot {
    pub instrument: String,
    /// Bid levels (price, quantity), best first
    pub bids: Vec<(Decimal, u64)>,
    /// Ask levels (price, quantity), best first
    pub asks: Vec<(Decimal, u64)>,
    /// Current spread (ask - bid)
    pub spread: Option<Decimal>,
    /// Mid price
    pub mid_price: Option<Decimal>,
}

impl BookSnapshot {
    pub fn with_depth(
        instrument: String,
        bids: Vec<(Decimal, u64)>,
        asks: Vec<(Decimal, u64)>,
    ) -> Self {
        let spread = match (bids.first(), asks.first()) {
            (Some((bid, _)), Some((ask, _))) => Some(ask - bid),
            _ => None,
        };

        let mid_price = match (bids.first(), asks.first()) {
            (Some((bid, _)), Some((ask, _))) => Some((bid + ask) / Decimal::from(2)),
            _ => None,
        };

        Self {
            instrument,
            bids,
            asks,
            spread,
            mid_price,
        }
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|(price, _)| *price)
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|(price, _)| *price)
    }

    pub fn total_bid_quantity(&self) -> u64 {
        self.bids.iter().map(|(_, qty)| qty).sum()
    }

    pub fn total_ask_quantity(&self) -> u64 {
        self.asks.iter().map(|(_, qty)| qty).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn order(side: Side, quantity: u64, price: u64, sequence: u64) -> Order {
        Order::new(
            side,
            Arc::from("AAPL"),
            quantity,
            Decimal::from(price),
            sequence,
        )
        .unwrap()
    }

    #[test]
    fn test_buy_side_priority() {
        let mut bids = PriceTimeQueue::new(Side::Buy);
        bids.insert(order(Side::Buy, 1, 100, 1)).unwrap();
        bids.insert(order(Side::Buy, 1, 102, 2)).unwrap();
        bids.insert(order(Side::Buy, 1, 101, 3)).unwrap();

        // Highest price first
        assert_eq!(bids.pop_best().unwrap().price(), Decimal::from(102));
        assert_eq!(bids.pop_best().unwrap().price(), Decimal::from(101));
        assert_eq!(bids.pop_best().unwrap().price(), Decimal::from(100));
        assert!(bids.pop_best().is_none());
    }

    #[test]
    fn test_sell_side_priority() {
        let mut asks = PriceTimeQueue::new(Side::Sell);
        asks.insert(order(Side::Sell, 1, 100, 1)).unwrap();
        asks.insert(order(Side::Sell, 1, 98, 2)).unwrap();
        asks.insert(order(Side::Sell, 1, 99, 3)).unwrap();

        // Lowest price first
        assert_eq!(asks.pop_best().unwrap().price(), Decimal::from(98));
        assert_eq!(asks.pop_best().unwrap().price(), Decimal::from(99));
        assert_eq!(asks.pop_best().unwrap().price(), Decimal::from(100));
    }

    #[test]
    fn test_time_priority_within_price() {
        let mut bids = PriceTimeQueue::new(Side::Buy);
        // Inserted out of sequence order on purpose
        bids.insert(order(Side::Buy, 1, 100, 5)).unwrap();
        bids.insert(order(Side::Buy, 1, 100, 2)).unwrap();
        bids.insert(order(Side::Buy, 1, 100, 9)).unwrap();

        assert_eq!(bids.pop_best().unwrap().sequence(), 2);
        assert_eq!(bids.pop_best().unwrap().sequence(), 5);
        assert_eq!(bids.pop_best().unwrap().sequence(), 9);
    }

    #[test]
    fn test_duplicate_sequence_rejected() {
        let mut asks = PriceTimeQueue::new(Side::Sell);
        asks.insert(order(Side::Sell, 1, 100, 7)).unwrap();

        // Same sequence at a different price must still be rejected
        let err = asks.insert(order(Side::Sell, 1, 101, 7)).unwrap_err();
        assert_eq!(err, ExchangeError::DuplicateSequence { sequence: 7 });
        assert_eq!(asks.len(), 1);
    }

    #[test]
    fn test_sequence_reusable_after_pop() {
        let mut asks = PriceTimeQueue::new(Side::Sell);
        asks.insert(order(Side::Sell, 10, 100, 7)).unwrap();
        let popped = asks.pop_best().unwrap();

        // Residual re-insertion keeps the original sequence
        asks.insert(popped.with_quantity(4)).unwrap();
        assert_eq!(asks.peek_best().unwrap().quantity(), 4);
        assert_eq!(asks.peek_best().unwrap().sequence(), 7);
    }

    #[test]
    fn test_depth_aggregates_price_levels() {
        let mut asks = PriceTimeQueue::new(Side::Sell);
        asks.insert(order(Side::Sell, 3, 100, 1)).unwrap();
        asks.insert(order(Side::Sell, 2, 100, 2)).unwrap();
        asks.insert(order(Side::Sell, 5, 101, 3)).unwrap();
        asks.insert(order(Side::Sell, 1, 102, 4)).unwrap();

        assert_eq!(
            asks.depth(2),
            vec![(Decimal::from(100), 5), (Decimal::from(101), 5)]
        );
        assert_eq!(asks.total_quantity(), 11);
    }

    #[test]
    fn test_snapshot_spread_and_mid() {
        let snapshot = BookSnapshot::with_depth(
            "AAPL".to_string(),
            vec![(Decimal::from(100), 1)],
            vec![(Decimal::from(102), 2)],
        );

        assert_eq!(snapshot.best_bid(), Some(Decimal::from(100)));
        assert_eq!(snapshot.best_ask(), Some(Decimal::from(102)));
        assert_eq!(snapshot.spread, Some(Decimal::from(2)));
        assert_eq!(snapshot.mid_price, Some(Decimal::from(101)));
        assert_eq!(snapshot.total_bid_quantity(), 1);
        assert_eq!(snapshot.total_ask_quantity(), 2);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = BookSnapshot::with_depth("AAPL".to_string(), vec![], vec![]);
        assert!(snapshot.best_bid().is_none());
        assert!(snapshot.spread.is_none());
        assert!(snapshot.mid_price.is_none());
    }
}
