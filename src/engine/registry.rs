// ============================================================================
// Book Registry
// Routes submissions to per-instrument books
// ============================================================================

use crate::domain::{BookSnapshot, ExchangeError, ExchangeResult, RegistryConfig, Side, TradeEvent};
use crate::engine::instrument_book::InstrumentBook;
use crate::engine::sequencer::SequenceAllocator;
use crate::interfaces::EventHandler;
use crossbeam_skiplist::SkipMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// The system-wide entry point: maps instruments to their books and owns
/// the global admission sequencer and the active-order counter.
///
/// Routing is a lock-free skip-map lookup; only the first sighting of an
/// instrument takes the creation mutex, so the bounded universe check never
/// contends with the submit hot path. Books for different instruments share
/// no lock.
pub struct BookRegistry {
    books: SkipMap<String, Arc<InstrumentBook>>,

    /// Serializes first-use book creation so the instrument bound holds
    /// exactly under concurrent first submissions.
    admission: Mutex<()>,

    max_instruments: usize,

    sequencer: Arc<SequenceAllocator>,

    /// Count of currently resting (unfilled) orders across all instruments.
    active_orders: Arc<AtomicU64>,

    event_handler: Arc<dyn EventHandler>,
}

impl BookRegistry {
    /// Create a registry from a validated configuration.
    pub fn new(
        config: RegistryConfig,
        event_handler: Arc<dyn EventHandler>,
    ) -> ExchangeResult<Self> {
        config
            .validate()
            .map_err(|reason| ExchangeError::InvalidConfig { reason })?;

        Ok(Self {
            books: SkipMap::new(),
            admission: Mutex::new(()),
            max_instruments: config.max_instruments,
            sequencer: Arc::new(SequenceAllocator::new()),
            active_orders: Arc::new(AtomicU64::new(0)),
            event_handler,
        })
    }

    /// Submit an order for `instrument`, creating its book on first use.
    ///
    /// Blocks only on the target instrument's critical section; trades are
    /// forwarded to the event handler and returned to the caller.
    pub fn submit(
        &self,
        instrument: &str,
        side: Side,
        quantity: u64,
        price: Decimal,
    ) -> ExchangeResult<Vec<TradeEvent>> {
        let book = self.book_for(instrument)?;
        let trades = book.submit(side, quantity, price)?;

        self.event_handler.on_trades(&trades);
        Ok(trades.into_vec())
    }

    /// Point-in-time read of the resting-order count. May be stale the
    /// instant it is read under concurrent activity; a monitoring signal,
    /// not a transactional guarantee.
    pub fn active_order_count(&self) -> u64 {
        self.active_orders.load(Ordering::Acquire)
    }

    /// Number of distinct instruments seen so far.
    pub fn instrument_count(&self) -> usize {
        self.books.len()
    }

    /// The book for `instrument`, if it has been seen.
    pub fn book(&self, instrument: &str) -> Option<Arc<InstrumentBook>> {
        self.books
            .get(instrument)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Depth snapshot for `instrument`, if it has been seen.
    pub fn snapshot(&self, instrument: &str, depth: usize) -> Option<BookSnapshot> {
        self.book(instrument).map(|book| book.snapshot(depth))
    }

    fn book_for(&self, instrument: &str) -> ExchangeResult<Arc<InstrumentBook>> {
        if let Some(entry) = self.books.get(instrument) {
            return Ok(Arc::clone(entry.value()));
        }

        let _guard = self.admission.lock();

        // Another submitter may have created the book while we waited.
        if let Some(entry) = self.books.get(instrument) {
            return Ok(Arc::clone(entry.value()));
        }

        if self.books.len() >= self.max_instruments {
            return Err(ExchangeError::TooManyInstruments {
                limit: self.max_instruments,
            });
        }

        tracing::debug!(instrument, "opening book for new instrument");

        let book = Arc::new(InstrumentBook::new(
            Arc::from(instrument),
            Arc::clone(&self.sequencer),
            Arc::clone(&self.active_orders),
        ));
        self.books
            .insert(instrument.to_string(), Arc::clone(&book));
        Ok(book)
    }
}
