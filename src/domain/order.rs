// ============================================================================
// Order Domain Model
// ============================================================================

use crate::domain::errors::{ExchangeError, ExchangeResult};
use rust_decimal::Decimal;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Buy,
    Sell,
}

/// An immutable limit order.
///
/// `side`, `instrument`, `price` and `sequence` are fixed at admission.
/// Partial fills never mutate an order in place; the matching loop replaces
/// the resting order with a new value carrying the residual quantity (see
/// [`Order::with_quantity`]), so any previously observed `Order` remains a
/// valid snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    side: Side,
    instrument: Arc<str>,
    quantity: u64,
    price: Decimal,
    sequence: u64,
}

impl Order {
    /// Create a validated order.
    ///
    /// `sequence` is assigned by the admitting engine (see
    /// `engine::SequenceAllocator`), never by API callers. Rejects
    /// zero quantity and non-positive prices with
    /// [`ExchangeError::InvalidOrder`] before any book state is touched.
    pub fn new(
        side: Side,
        instrument: Arc<str>,
        quantity: u64,
        price: Decimal,
        sequence: u64,
    ) -> ExchangeResult<Self> {
        if quantity == 0 {
            return Err(ExchangeError::InvalidOrder {
                reason: "quantity must be positive",
            });
        }
        if price <= Decimal::ZERO {
            return Err(ExchangeError::InvalidOrder {
                reason: "price must be positive",
            });
        }

        Ok(Self {
            side,
            instrument,
            quantity,
            price,
            sequence,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Replacement value for a partially filled order: identical identity
    /// fields (side, instrument, price, sequence) with the residual quantity.
    pub fn with_quantity(&self, quantity: u64) -> Self {
        Self {
            side: self.side,
            instrument: Arc::clone(&self.instrument),
            quantity,
            price: self.price,
            sequence: self.sequence,
        }
    }
}
