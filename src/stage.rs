//! Producer/consumer staging
//!
//! A [`Stage`] is a named [`RingBuffer`] with an overflow policy, running
//! counters, and tracing. Producers `offer` batches; consumers `take` them.
//! What happens to a batch that does not fit is decided by
//! [`OverflowPolicy`]:
//! - `Reject`: the batch is refused whole
//! - `Overwrite`: the oldest elements are evicted to make room
//! - `Truncate`: the prefix that fits is kept, the tail is refused

use serde::Serialize;
use tracing::{debug, trace, warn, Span};

use crate::config::{OverflowPolicy, StageConfig};
use crate::errors::Result;
use crate::fifo::RingBuffer;
use crate::telemetry;

/// Running counters for a stage, in elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageStats {
    /// Written into the buffer
    pub accepted: u64,
    /// Offered but refused by the overflow policy
    pub rejected: u64,
    /// Live elements displaced by an overwriting offer
    pub evicted: u64,
    /// Handed to a consumer by `take`
    pub delivered: u64,
    /// Discarded by `skip` or `clear`
    pub skipped: u64,
}

pub struct Stage<T, const N: usize> {
    name: String,
    config: StageConfig,
    buffer: RingBuffer<T, N>,
    stats: StageStats,
    above_watermark: bool,
    span: Span,
}

impl<T: Clone + Default, const N: usize> Stage<T, N> {
    pub fn new(name: impl Into<String>, config: StageConfig) -> Result<Self> {
        config.validate()?;
        let name = name.into();
        let span = telemetry::stage_span(&name, N);
        // an empty stage already sits at a 0.0 watermark
        let above_watermark = config.high_watermark <= 0.0;

        Ok(Self {
            name,
            config,
            buffer: RingBuffer::new(),
            stats: StageStats::default(),
            above_watermark,
            span,
        })
    }
}

impl<T: Clone, const N: usize> Stage<T, N> {
    /// Offer a batch to the stage. Returns how many elements were written.
    pub fn offer(&mut self, batch: &[T]) -> usize {
        let span = self.span.clone();
        let _enter = span.enter();

        let free = self.buffer.free_space();
        let written = match self.config.overflow {
            OverflowPolicy::Reject => {
                let written = self.buffer.push_slice(batch, false);
                if written < batch.len() {
                    self.record_rejected(batch.len(), free);
                }
                written
            }
            OverflowPolicy::Overwrite => {
                let written = self.buffer.push_slice(batch, true);
                self.record_evicted(batch.len().saturating_sub(free));
                written
            }
            OverflowPolicy::Truncate => {
                let fit = batch.len().min(free);
                let written = self.buffer.push_slice(&batch[..fit], false);
                if fit < batch.len() {
                    self.record_rejected(batch.len() - fit, free);
                }
                written
            }
        };

        self.stats.accepted += written as u64;
        self.update_watermark();
        written
    }

    /// Offer a single element. Returns `false` if it was refused.
    pub fn offer_one(&mut self, value: T) -> bool {
        let span = self.span.clone();
        let _enter = span.enter();

        let was_full = self.buffer.is_full();
        let overwrite = self.config.overflow == OverflowPolicy::Overwrite;
        let written = self.buffer.push(value, overwrite);

        if written {
            self.stats.accepted += 1;
            if was_full {
                self.record_evicted(1);
            }
        } else {
            self.record_rejected(1, 0);
        }
        self.update_watermark();
        written
    }

    /// Move the oldest elements into `out`. Returns how many were moved.
    pub fn take(&mut self, out: &mut [T]) -> usize {
        let span = self.span.clone();
        let _enter = span.enter();

        let delivered = self.buffer.pull(out);
        self.stats.delivered += delivered as u64;
        trace!(
            delivered = delivered,
            remaining = self.buffer.len(),
            "Pulled from stage"
        );
        self.update_watermark();
        delivered
    }

    /// Copy the oldest elements into `out` without consuming them.
    pub fn peek_into(&self, out: &mut [T]) -> usize {
        self.buffer.read(out)
    }

    /// Discard up to `n` of the oldest elements.
    pub fn skip(&mut self, n: usize) -> usize {
        let span = self.span.clone();
        let _enter = span.enter();

        let skipped = self.buffer.drop_oldest(n);
        self.stats.skipped += skipped as u64;
        if skipped > 0 {
            debug!(skipped = skipped, "Skipped oldest elements");
        }
        self.update_watermark();
        skipped
    }

    /// Discard everything currently staged.
    pub fn clear(&mut self) {
        let span = self.span.clone();
        let _enter = span.enter();

        let discarded = self.buffer.len();
        self.buffer.reset();
        self.stats.skipped += discarded as u64;
        debug!(discarded = discarded, "Stage cleared");
        self.update_watermark();
    }
}

impl<T, const N: usize> Stage<T, N> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn stats(&self) -> &StageStats {
        &self.stats
    }

    /// Read-only view of the underlying buffer.
    pub fn buffer(&self) -> &RingBuffer<T, N> {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Live elements over capacity, in `0.0..=1.0`.
    pub fn fill_ratio(&self) -> f64 {
        self.buffer.len() as f64 / N as f64
    }

    /// True while the fill ratio sits at or above the configured high watermark.
    pub fn above_watermark(&self) -> bool {
        self.above_watermark
    }

    fn record_rejected(&mut self, refused: usize, free: usize) {
        self.stats.rejected += refused as u64;
        if self.config.trace_events {
            debug!(
                refused = refused,
                free = free,
                policy = %self.config.overflow,
                "Batch refused: not enough free space"
            );
        }
    }

    fn record_evicted(&mut self, evicted: usize) {
        if evicted == 0 {
            return;
        }
        self.stats.evicted += evicted as u64;
        if self.config.trace_events {
            debug!(evicted = evicted, "Oldest elements overwritten");
        }
    }

    fn update_watermark(&mut self) {
        let ratio = self.fill_ratio();
        let above = ratio >= self.config.high_watermark;

        if above && !self.above_watermark {
            warn!(
                fill_ratio = ratio,
                high_watermark = self.config.high_watermark,
                "Stage crossed high watermark"
            );
        } else if !above && self.above_watermark {
            debug!(fill_ratio = ratio, "Stage drained below high watermark");
        }
        self.above_watermark = above;
    }
}
