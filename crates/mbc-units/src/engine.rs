// SPDX-License-Identifier: LGPL-3.0-or-later

//! Per-block processing orchestration.
//!
//! [`MultibandProcessor`] owns the crossover network, the low-band
//! compressor, and the per-band scratch buffers, and drives the
//! split → compress → recombine sequence over one shared in-place buffer
//! per block. Parameters are pulled from the [`ParamStore`] once per
//! field per block.
//!
//! Lifecycle: `Unprepared` → [`prepare`](MultibandProcessor::prepare) →
//! `Ready` → [`process_block`](MultibandProcessor::process_block)
//! (self-loop, `prepare` re-entrant on spec changes) →
//! [`release`](MultibandProcessor::release) → `Released`. The host
//! contract guarantees `prepare` precedes `process_block`; calling out of
//! order is a precondition violation, debug-asserted rather than checked
//! on the real-time path.

use std::sync::Arc;

use mbc_dsp::copy::fill_zero;

use crate::buffer::AudioBuffer;
use crate::crossover::Crossover;
use crate::dynamics::compressor::Compressor;
use crate::mixer;
use crate::params::{ParamSnapshot, ParamStore};
use crate::ProcessSpec;

/// Lifecycle state of the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unprepared,
    Ready,
    Released,
}

/// Per-band scratch storage, allocated by `prepare`.
struct BandBuffers {
    low: AudioBuffer,
    high: AudioBuffer,
    allpass: AudioBuffer,
}

impl BandBuffers {
    fn new(spec: &ProcessSpec) -> Self {
        Self {
            low: AudioBuffer::new(spec.num_channels, spec.max_block_size),
            high: AudioBuffer::new(spec.num_channels, spec.max_block_size),
            allpass: AudioBuffer::new(spec.num_channels, spec.max_block_size),
        }
    }
}

/// The multiband dynamics processing core.
pub struct MultibandProcessor {
    state: State,
    spec: ProcessSpec,
    params: Arc<ParamStore>,
    crossover: Crossover,
    compressor: Compressor,
    bands: Option<BandBuffers>,
}

/// Create an owned processing core bound to a parameter store.
///
/// The host-adaptation layer calls this once and owns the result.
pub fn create_processor(params: Arc<ParamStore>) -> MultibandProcessor {
    MultibandProcessor::new(params)
}

impl MultibandProcessor {
    /// Create an unprepared processor bound to a parameter store.
    pub fn new(params: Arc<ParamStore>) -> Self {
        Self {
            state: State::Unprepared,
            spec: ProcessSpec {
                sample_rate: 48000.0,
                max_block_size: 0,
                num_channels: 0,
            },
            params,
            crossover: Crossover::new(),
            compressor: Compressor::new(),
            bands: None,
        }
    }

    /// Configure all stateful units for a stream and allocate scratch
    /// buffers.
    ///
    /// Must complete before streaming starts; call again whenever the
    /// spec changes. Re-preparation resets filter histories and the
    /// compressor envelope, so nothing from the previous configuration
    /// leaks into subsequent blocks. Not real-time-safe.
    pub fn prepare(&mut self, spec: ProcessSpec) {
        self.spec = spec;
        self.crossover.prepare(&spec);
        self.compressor.prepare(&spec);
        self.bands = Some(BandBuffers::new(&spec));
        self.state = State::Ready;
    }

    /// Process one block in place.
    ///
    /// Only valid in the Ready state. Allocation-free and lock-free.
    pub fn process_block(&mut self, buffer: &mut AudioBuffer) {
        debug_assert_eq!(self.state, State::Ready, "process_block before prepare");
        debug_assert!(
            buffer.frames() <= self.spec.max_block_size,
            "block exceeds the prepared maximum"
        );

        let Some(bands) = self.bands.as_mut() else {
            return;
        };

        // Output channels beyond the prepared layout may hold garbage
        // from the host; write silence before anything else.
        for ch in self.spec.num_channels..buffer.channels() {
            fill_zero(buffer.channel_mut(ch));
        }

        bands.low.copy_from(buffer);
        bands.high.copy_from(buffer);
        bands.allpass.copy_from(buffer);

        let snap = ParamSnapshot::read(&self.params);

        self.crossover.set_cutoff(snap.crossover_hz);
        self.crossover.process_low(&mut bands.low);
        self.crossover.process_high(&mut bands.high);
        self.crossover.process_allpass(&mut bands.allpass);

        self.compressor
            .set_attack(snap.attack_ms)
            .set_release(snap.release_ms)
            .set_threshold(snap.threshold_db)
            .set_ratio(snap.ratio)
            .set_bypassed(snap.bypassed);
        self.compressor.update_settings();
        self.compressor.process(&mut bands.low);

        mixer::mix_output(buffer, &bands.low, &bands.allpass, snap.bypassed);
    }

    /// Release the per-band scratch storage.
    ///
    /// After this, only a new `prepare` can make the processor usable
    /// again.
    pub fn release(&mut self) {
        self.bands = None;
        self.state = State::Released;
    }

    /// Whether the processor is prepared for streaming.
    pub fn ready(&self) -> bool {
        self.state == State::Ready
    }

    /// The spec the processor was last prepared with.
    pub fn spec(&self) -> &ProcessSpec {
        &self.spec
    }
}
