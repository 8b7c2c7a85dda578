// SPDX-License-Identifier: LGPL-3.0-or-later

//! Linkwitz-Riley crossover network with an all-pass bypass reference.
//!
//! Splits a signal into matched low/high bands at a shared cutoff so that
//! the band sum reconstructs the input flat in amplitude. A third filter
//! path produces a phase-matched all-pass copy of the full-band signal
//! for use when processing is bypassed.
//!
//! # Topology
//!
//! - **LR2**: one biquad per path with Q = 0.5 (12 dB/oct slopes).
//! - **LR4**: two cascaded Butterworth biquads per path with Q = 1/√2
//!   (24 dB/oct slopes, flat magnitude sum). For LR4 the low+high sum
//!   equals a single second-order all-pass at the same cutoff and Q, so
//!   the reference path uses exactly that filter and the bypass output is
//!   sample-identical to the band sum.

use std::f32::consts::FRAC_1_SQRT_2;

use crate::buffer::AudioBuffer;
use crate::consts::CROSSOVER_FREQ_DFL;
use crate::filters::coeffs::FilterType;
use crate::filters::filter::Filter;
use crate::ProcessSpec;

/// Crossover filter topology (Linkwitz-Riley order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverTopology {
    /// Linkwitz-Riley 2nd order (12 dB/oct slopes).
    Lr2,
    /// Linkwitz-Riley 4th order (24 dB/oct slopes).
    Lr4,
}

/// Number of biquad stages per band path for each topology.
fn stages_per_path(topology: CrossoverTopology) -> usize {
    match topology {
        CrossoverTopology::Lr2 => 1,
        CrossoverTopology::Lr4 => 2,
    }
}

/// Per-stage Q for each topology.
fn topology_q(topology: CrossoverTopology) -> f32 {
    match topology {
        // LR2: a 2nd-order biquad with Q = 0.5 (two 1st-order Butterworths).
        CrossoverTopology::Lr2 => 0.5,
        // LR4: two cascaded Butterworth sections with Q = 1/sqrt(2).
        CrossoverTopology::Lr4 => FRAC_1_SQRT_2,
    }
}

/// Matched low-pass/high-pass/all-pass filter network at one shared cutoff.
///
/// Holds one filter cascade per channel per path. `prepare` allocates;
/// `set_cutoff` and the process calls are real-time-safe.
pub struct Crossover {
    sample_rate: f32,
    topology: CrossoverTopology,
    cutoff: f32,
    channels: usize,
    /// Low-pass cascade, `channels * stages`, indexed `ch * stages + stage`.
    lp: Vec<Filter>,
    /// High-pass cascade, same layout as `lp`.
    hp: Vec<Filter>,
    /// All-pass reference, one filter per channel.
    ap: Vec<Filter>,
}

impl Default for Crossover {
    fn default() -> Self {
        Self::new()
    }
}

impl Crossover {
    /// Create a new crossover with default settings.
    ///
    /// Defaults: LR4, 500 Hz cutoff, 48 kHz sample rate, no channels
    /// until [`prepare`](Crossover::prepare) is called.
    pub fn new() -> Self {
        Self {
            sample_rate: 48000.0,
            topology: CrossoverTopology::Lr4,
            cutoff: CROSSOVER_FREQ_DFL,
            channels: 0,
            lp: Vec::new(),
            hp: Vec::new(),
            ap: Vec::new(),
        }
    }

    /// Set the crossover topology (LR2 or LR4).
    ///
    /// Configuration path only: takes effect on the next
    /// [`prepare`](Crossover::prepare), which rebuilds the cascades.
    pub fn set_topology(&mut self, topology: CrossoverTopology) {
        self.topology = topology;
    }

    /// Allocate and configure the filter network for a stream.
    ///
    /// Must be called before the first process call and again whenever
    /// the spec changes. Resets all filter state. Not real-time-safe.
    pub fn prepare(&mut self, spec: &ProcessSpec) {
        self.sample_rate = spec.sample_rate;
        self.channels = spec.num_channels;

        let stages = stages_per_path(self.topology);
        let q = topology_q(self.topology);

        self.lp.clear();
        self.hp.clear();
        self.ap.clear();

        for _ in 0..spec.num_channels {
            for _ in 0..stages {
                let mut lp = Filter::new();
                lp.set_sample_rate(spec.sample_rate)
                    .set_filter_type(FilterType::Lowpass)
                    .set_frequency(self.cutoff)
                    .set_q(q)
                    .update_settings();
                self.lp.push(lp);

                let mut hp = Filter::new();
                hp.set_sample_rate(spec.sample_rate)
                    .set_filter_type(FilterType::Highpass)
                    .set_frequency(self.cutoff)
                    .set_q(q)
                    .update_settings();
                self.hp.push(hp);
            }

            let mut ap = Filter::new();
            ap.set_sample_rate(spec.sample_rate)
                .set_filter_type(FilterType::Allpass)
                .set_frequency(self.cutoff)
                .set_q(q)
                .update_settings();
            self.ap.push(ap);
        }
    }

    /// Update the shared cutoff for all three paths.
    ///
    /// Real-time-safe: only marks coefficients for lazy recalculation on
    /// the next process call. No validation; the caller clamps to the
    /// declared parameter range.
    pub fn set_cutoff(&mut self, hz: f32) {
        if hz == self.cutoff {
            return;
        }
        self.cutoff = hz;
        for f in self.lp.iter_mut().chain(&mut self.hp).chain(&mut self.ap) {
            f.set_frequency(hz);
        }
    }

    /// The current shared cutoff in Hz.
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// The configured topology.
    pub fn topology(&self) -> CrossoverTopology {
        self.topology
    }

    /// Reset all filter states (clear delay memory).
    pub fn clear(&mut self) {
        for f in self.lp.iter_mut().chain(&mut self.hp).chain(&mut self.ap) {
            f.clear();
        }
    }

    /// Apply the low-pass cascade in place.
    ///
    /// One call per block on the "low" band copy. Real-time-safe.
    pub fn process_low(&mut self, buf: &mut AudioBuffer) {
        let stages = stages_per_path(self.topology);
        for ch in 0..self.channels.min(buf.channels()) {
            let samples = buf.channel_mut(ch);
            for stage in 0..stages {
                self.lp[ch * stages + stage].process_inplace(samples);
            }
        }
    }

    /// Apply the high-pass cascade in place.
    ///
    /// One call per block on the "high" band copy. Real-time-safe.
    pub fn process_high(&mut self, buf: &mut AudioBuffer) {
        let stages = stages_per_path(self.topology);
        for ch in 0..self.channels.min(buf.channels()) {
            let samples = buf.channel_mut(ch);
            for stage in 0..stages {
                self.hp[ch * stages + stage].process_inplace(samples);
            }
        }
    }

    /// Apply the all-pass reference filter in place.
    ///
    /// One call per block on the bypass reference copy. Real-time-safe.
    pub fn process_allpass(&mut self, buf: &mut AudioBuffer) {
        for ch in 0..self.channels.min(buf.channels()) {
            self.ap[ch].process_inplace(buf.channel_mut(ch));
        }
    }
}
