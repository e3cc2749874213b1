// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod book;
pub mod config;
pub mod errors;
pub mod order;
pub mod trade;

pub use book::{BookSnapshot, PriceTimeQueue};
pub use config::{RegistryConfig, DEFAULT_MAX_INSTRUMENTS};
pub use errors::{ExchangeError, ExchangeResult};
pub use order::{Order, Side};
pub use trade::TradeEvent;
