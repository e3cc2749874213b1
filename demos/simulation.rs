// ============================================================================
// Load-Generation Demo
// Concurrent random order flow over a small ticker universe
// ============================================================================

use exchange_core::prelude::*;
use rand::Rng;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::thread;

const TICKERS: [&str; 5] = ["AAPL", "GOOG", "AMZN", "MSFT", "TSLA"];
const GENERATORS: usize = 3;
const ORDERS_PER_GENERATOR: usize = 100;

fn main() {
    tracing_subscriber::fmt::init();

    let registry = Arc::new(
        BookRegistry::new(RegistryConfig::default(), Arc::new(LoggingEventHandler))
            .expect("default config is valid"),
    );

    let mut handles = Vec::new();
    for _ in 0..GENERATORS {
        let registry = Arc::clone(&registry);
        handles.push(thread::spawn(move || {
            let mut rng = rand::thread_rng();
            for _ in 0..ORDERS_PER_GENERATOR {
                let ticker = TICKERS[rng.gen_range(0..TICKERS.len())];
                let side = if rng.gen_bool(0.5) {
                    Side::Buy
                } else {
                    Side::Sell
                };
                let quantity = rng.gen_range(1..=100u64);
                let price = Decimal::from(rng.gen_range(100..=150u32));

                if let Err(err) = registry.submit(ticker, side, quantity, price) {
                    eprintln!("order rejected: {}", err);
                }
            }
        }));
    }

    for handle in handles {
        handle.join().expect("order generator panicked");
    }

    for ticker in TICKERS {
        if let Some(snapshot) = registry.snapshot(ticker, 3) {
            println!(
                "{}: best bid {:?}, best ask {:?}, spread {:?}",
                ticker,
                snapshot.best_bid(),
                snapshot.best_ask(),
                snapshot.spread
            );
        }
    }

    println!("Total active orders: {}", registry.active_order_count());
}
