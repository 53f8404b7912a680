//! Shared setup for integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use open_table::{Card, EngineConfig, Engine, MemoryStore, OpponentStrategy};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, then defaults to `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Seeded engine over a fresh in-memory store.
pub fn engine(seed: u64) -> Engine<MemoryStore> {
    init_logging();
    Engine::new(MemoryStore::new(), EngineConfig::default().with_seed(seed)).unwrap()
}

/// Opponent that always draws from the stock and discards what it drew.
#[derive(Clone, Copy, Debug)]
pub struct Passive;

impl OpponentStrategy for Passive {
    fn take_discard(&self, _hand: &[Card], _top: &Card) -> bool {
        false
    }

    fn swap_index(&self, _hand: &[Card], _drawn: &Card) -> Option<usize> {
        None
    }
}
