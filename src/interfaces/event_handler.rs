// ============================================================================
// Event Handler Interface
// Outbound seam for trade reporting
// ============================================================================

use crate::domain::TradeEvent;

/// Sink for trade executions.
///
/// Trades are always returned synchronously from `submit`; the handler is
/// the fan-out seam for reporting collaborators (console output, metrics,
/// downstream feeds). Implementations must be cheap or hand off quickly:
/// they run on the submitting thread.
pub trait EventHandler: Send + Sync {
    /// Handle a single trade
    fn on_trade(&self, trade: &TradeEvent);

    /// Batch handler (optional optimization)
    fn on_trades(&self, trades: &[TradeEvent]) {
        for trade in trades {
            self.on_trade(trade);
        }
    }
}

/// No-op handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_trade(&self, _trade: &TradeEvent) {
        // Do nothing
    }
}

/// Logging handler backed by `tracing`
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_trade(&self, trade: &TradeEvent) {
        tracing::info!(
            instrument = %trade.instrument,
            quantity = trade.quantity,
            price = %trade.price,
            buyer_sequence = trade.buyer_sequence,
            seller_sequence = trade.seller_sequence,
            "matched"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_noop_handler() {
        let handler = NoOpEventHandler;
        handler.on_trade(&TradeEvent::new("AAPL", 1, Decimal::from(100), 2, 1));
        // Should not panic
    }

    #[test]
    fn test_batch_default_delegates() {
        let trades = vec![
            TradeEvent::new("AAPL", 1, Decimal::from(100), 2, 1),
            TradeEvent::new("AAPL", 2, Decimal::from(101), 4, 3),
        ];
        NoOpEventHandler.on_trades(&trades);
    }
}
