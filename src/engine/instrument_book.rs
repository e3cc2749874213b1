// ============================================================================
// Instrument Book
// Atomic insert-and-match for a single instrument
// ============================================================================

use crate::domain::{BookSnapshot, ExchangeResult, Order, PriceTimeQueue, Side, TradeEvent};
use crate::engine::sequencer::SequenceAllocator;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Trade buffer returned per submission. Most submissions produce at most
/// a handful of fills, so the buffer stays on the stack.
pub type Trades = SmallVec<[TradeEvent; 4]>;

/// Both sides of one instrument's book. Owned exclusively by the book's
/// mutex; never observable mid-operation.
struct Ladder {
    bids: PriceTimeQueue,
    asks: PriceTimeQueue,
}

/// The order book for a single instrument.
///
/// `submit` runs as one atomic unit relative to any concurrent `submit` on
/// the same instrument: sequence assignment, insertion, the match loop and
/// counter updates are all observed together or not at all. The unit of
/// mutual exclusion is this book alone — submissions to different
/// instruments share no lock and proceed fully in parallel.
///
/// Post-match invariant: best bid < best ask, or one side is empty.
pub struct InstrumentBook {
    instrument: Arc<str>,
    ladder: Mutex<Ladder>,
    sequencer: Arc<SequenceAllocator>,
    /// System-wide count of resting orders, shared with every other book.
    /// Updated only inside a book's critical section, but with atomic ops
    /// because many books update it concurrently.
    active_orders: Arc<AtomicU64>,
}

impl InstrumentBook {
    pub fn new(
        instrument: Arc<str>,
        sequencer: Arc<SequenceAllocator>,
        active_orders: Arc<AtomicU64>,
    ) -> Self {
        Self {
            instrument,
            ladder: Mutex::new(Ladder {
                bids: PriceTimeQueue::new(Side::Buy),
                asks: PriceTimeQueue::new(Side::Sell),
            }),
            sequencer,
            active_orders,
        }
    }

    /// Admit an order and match it against the opposite side until no cross
    /// remains. Returns the trades produced, possibly none (the order then
    /// simply rests).
    ///
    /// Validation failures reject the order before any book state changes:
    /// no counter increment, no insertion. The allocated sequence number is
    /// discarded in that case; gaps are harmless since only uniqueness and
    /// monotonicity matter.
    pub fn submit(&self, side: Side, quantity: u64, price: Decimal) -> ExchangeResult<Trades> {
        // Sequence allocation is wait-free and deliberately outside the
        // book lock: orders for other instruments must never queue behind
        // this book to get admitted.
        let sequence = self.sequencer.next();
        let order = Order::new(
            side,
            Arc::clone(&self.instrument),
            quantity,
            price,
            sequence,
        )?;

        let mut ladder = self.ladder.lock();

        match side {
            Side::Buy => ladder.bids.insert(order)?,
            Side::Sell => ladder.asks.insert(order)?,
        }
        // Counted only once the order actually rests; a failed insert
        // leaves the counter untouched.
        self.active_orders.fetch_add(1, Ordering::AcqRel);

        let mut trades = Trades::new();
        loop {
            let (fill, price, buyer_sequence, seller_sequence) =
                match (ladder.bids.peek_best(), ladder.asks.peek_best()) {
                    (Some(buy), Some(sell)) if buy.price() >= sell.price() => {
                        let fill = buy.quantity().min(sell.quantity());
                        // The resting side is the earlier-admitted one and
                        // sets the execution price; price improvement goes
                        // to the newly arrived order.
                        let price = if buy.sequence() < sell.sequence() {
                            buy.price()
                        } else {
                            sell.price()
                        };
                        (fill, price, buy.sequence(), sell.sequence())
                    },
                    _ => break,
                };

            trades.push(TradeEvent::new(
                &self.instrument,
                fill,
                price,
                buyer_sequence,
                seller_sequence,
            ));

            self.settle_top(&mut ladder.bids, fill)?;
            self.settle_top(&mut ladder.asks, fill)?;
        }

        if !trades.is_empty() {
            tracing::debug!(
                instrument = %self.instrument,
                trades = trades.len(),
                "submission crossed the book"
            );
        }

        Ok(trades)
    }

    /// Remove the matched top-of-book order; re-insert the residual under
    /// its original sequence, or retire the order if fully filled. Keeps
    /// the loop invariant that no resting order ever has zero quantity.
    fn settle_top(&self, queue: &mut PriceTimeQueue, fill: u64) -> ExchangeResult<()> {
        if let Some(order) = queue.pop_best() {
            let residual = order.quantity().saturating_sub(fill);
            if residual > 0 {
                queue.insert(order.with_quantity(residual))?;
            } else {
                self.active_orders.fetch_sub(1, Ordering::AcqRel);
            }
        }
        Ok(())
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.ladder.lock().bids.best_price()
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.ladder.lock().asks.best_price()
    }

    /// Number of orders currently resting in this book.
    pub fn resting_order_count(&self) -> usize {
        let ladder = self.ladder.lock();
        ladder.bids.len() + ladder.asks.len()
    }

    /// Point-in-time depth snapshot of both sides.
    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        let ladder = self.ladder.lock();
        BookSnapshot::with_depth(
            self.instrument.to_string(),
            ladder.bids.depth(depth),
            ladder.asks.depth(depth),
        )
    }
}
