//! The migration engine: pre-copy and post-copy, sharing a cost model and
//! an access-trace cursor but never sharing mutable state across runs.
//!
//! Each call to [`Engine::run_migration`] starts a fresh [`EngineState`]-
//! shaped local scope — there is deliberately no long-lived mutable engine
//! struct threaded between algorithms (see the crate-level design notes on
//! "shared mutable engine state").

use std::collections::{HashSet, VecDeque};

use tracing::info;

use crate::segment_tree::SegmentTree;
use crate::trace::{AccessHistory, Cursor, Operation};
use crate::SimulatorConfig;

/// Which of the two canonical live-migration strategies to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationScheme {
    PreCopy,
    PostCopy,
}

/// Aggregate metrics produced by one migration run. All fields are ≥ 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Criterias {
    /// Stop-the-world time at the end of pre-copy; always 0 for post-copy.
    pub downtime: f64,
    /// Cumulative guest-observable latency from post-copy page faults;
    /// always 0 for pre-copy.
    pub delays: f64,
    /// Wall-clock simulated time from start to completion.
    pub total_migration_time: f64,
    /// Total kilobytes placed on the wire, including re-sends and fault
    /// traffic.
    pub transmitted_data: f64,
    /// Time at which the source host may release the VM's memory. Equal
    /// to `total_migration_time` in this model.
    pub eviction_time: f64,
}

const PRE_COPY_MAX_ITERATIONS: usize = 1000;
const PRE_COPY_STOP_RATIO: f64 = 0.01;
const POST_COPY_SEQ_K: f64 = 0.001;
const POST_COPY_LOCAL_K: f64 = 0.01;

/// The migration engine for one guest: a fixed page count, a fixed access
/// trace, and the cost model/size constants under which both algorithms
/// run.
pub struct Engine {
    total_page_count: usize,
    access_history: AccessHistory,
    config: SimulatorConfig,
}

impl Engine {
    pub fn new(total_page_count: usize, access_history: AccessHistory, config: SimulatorConfig) -> Self {
        Self { total_page_count, access_history, config }
    }

    /// Run one migration scheme to completion and return its aggregate
    /// metrics. Each call resets all mutable state; the two schemes never
    /// share a run.
    pub fn run_migration(&self, scheme: MigrationScheme, optimization: bool) -> Criterias {
        if self.total_page_count == 0 {
            info!(n = self.total_page_count, "zero-page guest, returning zeroed criterias");
            return Criterias::default();
        }
        match scheme {
            MigrationScheme::PreCopy => self.run_pre_copy(optimization),
            MigrationScheme::PostCopy => self.run_post_copy(optimization),
        }
    }

    fn run_pre_copy(&self, optimization: bool) -> Criterias {
        let n = self.total_page_count;
        let page_size = self.config.page_size_kb;

        let mut pages_to_transfer: VecDeque<usize> = (0..n).collect();
        // Declared to mirror the as-built optimization hook but never
        // mutated (see crate-level design notes, open question 1): the
        // sort below is therefore a stable no-op. A corrected variant
        // would increment `change_count[q]` each time `q` re-enters
        // `next_round`.
        let change_count = vec![0i64; n];

        let mut clock = 0.0f64;
        let mut transmitted = 0.0f64;
        let mut cursor = Cursor::new(&self.access_history);
        let mut iteration = 0usize;

        while iteration < PRE_COPY_MAX_ITERATIONS
            && (pages_to_transfer.len() as f64 / n as f64) > PRE_COPY_STOP_RATIO
        {
            if optimization {
                let mut ordered: Vec<usize> = pages_to_transfer.into_iter().collect();
                ordered.sort_by_key(|&p| change_count[p]);
                pages_to_transfer = ordered.into();
            }

            let mut sent_this_iter: HashSet<usize> = HashSet::with_capacity(pages_to_transfer.len());
            let mut next_round: HashSet<usize> = HashSet::new();

            while let Some(p) = pages_to_transfer.pop_front() {
                transmitted += page_size;
                clock += self.config.channel.transfer_time(page_size);
                sent_this_iter.insert(p);

                cursor.drain_due(Operation::Write, clock, |q| {
                    if sent_this_iter.contains(&q) && !next_round.contains(&q) {
                        next_round.insert(q);
                    }
                });
            }

            pages_to_transfer = next_round.into_iter().collect();
            iteration += 1;
        }

        let remaining = pages_to_transfer.len();
        let (downtime, volume) = if remaining == 0 {
            // Nothing left to stop the world for; no channel time is
            // spent on a transfer that never happens.
            (0.0, 0.0)
        } else {
            let volume = remaining as f64 * page_size;
            (self.config.channel.transfer_time(volume), volume)
        };
        transmitted += volume;
        clock += downtime;

        info!(iterations = iteration, downtime, "pre-copy migration complete");

        Criterias {
            downtime,
            delays: 0.0,
            total_migration_time: clock,
            transmitted_data: transmitted,
            eviction_time: clock,
        }
    }

    fn run_post_copy(&self, optimization: bool) -> Criterias {
        let n = self.total_page_count;
        let page_size = self.config.page_size_kb;
        let page_num_size = self.config.page_num_size_kb;

        let mut pages_to_transfer: VecDeque<usize> = (0..n).collect();
        let mut tree = if optimization { Some(SegmentTree::new(n)) } else { None };

        let mut already_sent: HashSet<usize> = HashSet::with_capacity(n);
        let mut clock = 0.0f64;
        let mut transmitted = 0.0f64;
        let mut delays = 0.0f64;
        let mut miss_count = 0i64;
        let mut cursor = Cursor::new(&self.access_history);

        while already_sent.len() < n {
            let p = match tree.as_mut() {
                Some(t) => {
                    let best = t.argmax_over(0, n - 1);
                    t.reset(best.index);
                    best.index
                }
                None => pages_to_transfer
                    .pop_front()
                    .expect("queue holds a page while already_sent has not covered N"),
            };

            transmitted += page_size;
            clock += self.config.channel.transfer_time(page_size);
            already_sent.insert(p);

            let mut faulted: Vec<usize> = Vec::new();
            cursor.drain_due(Operation::Read, clock, |q| {
                if !already_sent.contains(&q) {
                    miss_count += 1;
                    delays += self.config.channel.transfer_time(page_num_size)
                        + self.config.channel.transfer_time(page_size);
                    transmitted += page_num_size + page_size;
                    clock += self.config.channel.transfer_time(page_size);
                    already_sent.insert(q);
                    faulted.push(q);
                }
            });

            if let Some(t) = tree.as_mut() {
                for q in faulted {
                    let (l1, r1) = locality_window(q, POST_COPY_SEQ_K);
                    let (l2, r2) = locality_window(q, POST_COPY_LOCAL_K);
                    t.bulk_add(l1, r1, miss_count);
                    t.bulk_add(l2, r2, miss_count);
                }
            }
        }

        info!(miss_count, "post-copy migration complete");

        Criterias {
            downtime: 0.0,
            delays,
            total_migration_time: clock,
            transmitted_data: transmitted,
            eviction_time: clock,
        }
    }
}

/// The `[⌊(1-k)·q⌋, ⌊(1+k)·q⌋)` locality window around a faulted page.
/// For `q = 0` both bounds floor to `0`, yielding an empty window; the
/// right bound may exceed `N` and is clamped by [`SegmentTree::bulk_add`].
fn locality_window(q: usize, k: f64) -> (usize, usize) {
    let q = q as f64;
    let left = ((1.0 - k) * q).floor() as usize;
    let right = ((1.0 + k) * q).floor() as usize;
    (left, right)
}
