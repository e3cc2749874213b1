// ============================================================================
// Trade Domain Model
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single execution between a resting order and an incoming order.
///
/// Emitted synchronously as part of the return value of `submit`; the
/// reporting collaborator consumes these to render human-readable output.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TradeEvent {
    /// Unique trade identifier
    pub id: Uuid,

    /// Trading instrument
    pub instrument: String,

    /// Executed quantity
    pub quantity: u64,

    /// Execution price — always the resting order's limit price
    pub price: Decimal,

    /// Sequence number of the buy-side order
    pub buyer_sequence: u64,

    /// Sequence number of the sell-side order
    pub seller_sequence: u64,

    /// Trade timestamp
    pub timestamp: DateTime<Utc>,
}

impl TradeEvent {
    pub fn new(
        instrument: &str,
        quantity: u64,
        price: Decimal,
        buyer_sequence: u64,
        seller_sequence: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            instrument: instrument.to_string(),
            quantity,
            price,
            buyer_sequence,
            seller_sequence,
            timestamp: Utc::now(),
        }
    }

    /// Notional value of the trade (price * quantity).
    ///
    /// Returns `None` on decimal overflow.
    pub fn notional(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_creation() {
        let trade = TradeEvent::new("AAPL", 4, Decimal::from(100), 2, 1);

        assert_eq!(trade.instrument, "AAPL");
        assert_eq!(trade.quantity, 4);
        assert_eq!(trade.price, Decimal::from(100));
        assert_eq!(trade.buyer_sequence, 2);
        assert_eq!(trade.seller_sequence, 1);
        assert_eq!(trade.notional(), Some(Decimal::from(400)));
    }

    #[test]
    fn test_notional_with_fractional_price() {
        let trade = TradeEvent::new("AAPL", 2, Decimal::new(1005, 1), 2, 1); // 100.5

        // 100.5 * 2 = 201.0
        assert_eq!(trade.notional(), Some(Decimal::from(201)));
    }
}
