//! Crate root: public surface and crate-wide configuration.
//!
//! This is the single canonical entry-point for downstream users. It
//! centralizes the channel/size configuration shared by both migration
//! algorithms and re-exports the submodules that implement the engine.
//!
//! ## Invariants
//!
//! - **Single monotonic clock.** Every migration run owns one simulated
//!   clock (seconds, non-decreasing) and one cursor into the access trace
//!   (monotonically advancing). Neither is shared across runs or across
//!   the two algorithms — see [`engine`] for why that single-clock
//!   coupling is kept inside one method body rather than threaded through
//!   shared mutable state.
//! - **Determinism.** Given identical inputs and configuration, repeated
//!   runs produce byte-identical `Criterias`, modulo the usual IEEE-754
//!   double-arithmetic caveats for summation order.
//! - **No hidden errors in the core.** Parsing and CLI configuration can
//!   fail (see [`error::SimError`]); the engine itself cannot — an empty
//!   argmax or an exhausted cursor simply yields nothing.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

/// Linear bandwidth + latency channel cost model.
pub mod channel;
/// Migration engine: pre-copy and post-copy, with optional optimization.
pub mod engine;
/// Error categories surfaced by parsing and driver configuration.
pub mod error;
/// Input trace parsing (hex address normalization, page compaction).
pub mod parser;
/// Results formatter (five-line, field-order-significant plain text).
pub mod report;
/// Lazy range-add / range-argmax segment tree used by the post-copy
/// optimizer.
pub mod segment_tree;
/// The guest access trace and the cursor that replays it against the
/// simulated clock.
pub mod trace;

pub use channel::Channel;
pub use engine::{Criterias, Engine, MigrationScheme};
pub use error::SimError;
pub use trace::{AccessHistory, Operation, PageAccess};

/// Page size and channel parameters shared by both migration algorithms.
///
/// Generalizes the single hardcoded `Channel(10, 10)` of the as-built
/// driver: the numeric defaults are unchanged, but a caller (the CLI
/// driver, or any embedder) can override any of them without touching
/// the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorConfig {
    /// The migration channel's bandwidth/latency model.
    pub channel: Channel,
    /// Size of one guest memory page, in KB.
    pub page_size_kb: f64,
    /// Size of a page-fault control message (the page number itself),
    /// in KB, billed in addition to the faulted page's own bytes.
    pub page_num_size_kb: f64,
}

impl Default for SimulatorConfig {
    /// `speed = 10`, `delay = 10`, `page_size_kb = 4`, `page_num_size_kb =
    /// 0.004` — the as-built driver's defaults.
    fn default() -> Self {
        Self {
            channel: Channel::default_channel(),
            page_size_kb: 4.0,
            page_num_size_kb: 0.004,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_as_built_driver_defaults() {
        let cfg = SimulatorConfig::default();
        assert_eq!(cfg.page_size_kb, 4.0);
        assert_eq!(cfg.page_num_size_kb, 0.004);
        assert!((cfg.channel.transfer_time(4.0) - 10.0004).abs() < 1e-12);
    }
}
