// SPDX-License-Identifier: LGPL-3.0-or-later

//! Band compressor with attack/release envelope smoothing.
//!
//! Per sample, the compressor rectifies the input, advances a per-channel
//! level envelope (attack constant while the level rises, release while
//! it falls), evaluates the hard-knee gain curve from `mbc-dsp`, and
//! multiplies the resulting linear gain into the sample.
//!
//! When bypassed, `process` performs no analysis and no gain change, and
//! the envelope does not advance, so un-bypassing resumes from a neutral
//! state rather than a stale one.

use std::f32::consts::FRAC_1_SQRT_2;

use mbc_dsp::dynamics::compressor_gain_single;
use mbc_dsp::float::sanitize;
use mbc_dsp::types::CompressorCurve;

use crate::buffer::AudioBuffer;
use crate::consts::ENVELOPE_FLOOR;
use crate::units::{db_to_gain, millis_to_samples};
use crate::ProcessSpec;

/// Single-band dynamic-range compressor.
///
/// Builder setters record new parameter values;
/// [`update_settings`](Compressor::update_settings) folds them into the
/// time constants and the gain curve. Both are real-time-safe. Envelope
/// state persists across blocks and is reset only by
/// [`prepare`](Compressor::prepare) or [`clear`](Compressor::clear).
#[derive(Debug, Clone)]
pub struct Compressor {
    // Parameters
    attack: f32,
    release: f32,
    threshold_db: f32,
    ratio: f32,
    bypassed: bool,

    // Derived state
    tau_attack: f32,
    tau_release: f32,
    curve: CompressorCurve,

    // Envelope follower state, one level per channel
    envelope: Vec<f32>,

    sample_rate: f32,
    dirty: bool,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor {
    /// Create a new compressor with neutral settings.
    ///
    /// Defaults: 20 ms attack, 100 ms release, 0 dB threshold, ratio 1:1,
    /// not bypassed, 48 kHz sample rate.
    pub fn new() -> Self {
        Self {
            attack: 20.0,
            release: 100.0,
            threshold_db: 0.0,
            ratio: 1.0,
            bypassed: false,
            tau_attack: 0.0,
            tau_release: 0.0,
            curve: CompressorCurve::default(),
            envelope: Vec::new(),
            sample_rate: 48000.0,
            dirty: true,
        }
    }

    /// Set the attack time in milliseconds.
    pub fn set_attack(&mut self, attack_ms: f32) -> &mut Self {
        self.attack = attack_ms;
        self.dirty = true;
        self
    }

    /// Set the release time in milliseconds.
    pub fn set_release(&mut self, release_ms: f32) -> &mut Self {
        self.release = release_ms;
        self.dirty = true;
        self
    }

    /// Set the threshold in dB relative to full scale.
    pub fn set_threshold(&mut self, threshold_db: f32) -> &mut Self {
        self.threshold_db = threshold_db;
        self.dirty = true;
        self
    }

    /// Set the compression ratio (>= 1; e.g. 4.0 for 4:1).
    pub fn set_ratio(&mut self, ratio: f32) -> &mut Self {
        self.ratio = ratio;
        self.dirty = true;
        self
    }

    /// Enable or disable the bypass.
    pub fn set_bypassed(&mut self, bypassed: bool) -> &mut Self {
        self.bypassed = bypassed;
        self
    }

    /// Whether the compressor is bypassed.
    pub fn bypassed(&self) -> bool {
        self.bypassed
    }

    /// Allocate envelope state for a stream and reset it to no reduction.
    ///
    /// Must be called before the first `process` call and again on spec
    /// changes. Not real-time-safe.
    pub fn prepare(&mut self, spec: &ProcessSpec) {
        self.sample_rate = spec.sample_rate;
        self.envelope = vec![0.0; spec.num_channels];
        self.dirty = true;
        self.update_settings();
    }

    /// Reset the envelope follower state on every channel.
    pub fn clear(&mut self) {
        self.envelope.fill(0.0);
    }

    /// Fold parameter changes into the time constants and gain curve.
    ///
    /// Real-time-safe; takes effect at the start of the next `process`.
    pub fn update_settings(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        self.tau_attack = calculate_tau(self.sample_rate, self.attack);
        self.tau_release = calculate_tau(self.sample_rate, self.release);

        let thresh = db_to_gain(self.threshold_db);
        let slope = 1.0 / self.ratio - 1.0;
        self.curve = CompressorCurve {
            thresh,
            tilt: [slope, -slope * thresh.ln()],
        };
    }

    /// Compress the buffer in place.
    ///
    /// When bypassed, the buffer passes through unchanged and the
    /// envelope state does not advance.
    pub fn process(&mut self, buf: &mut AudioBuffer) {
        if self.dirty {
            self.update_settings();
        }
        if self.bypassed {
            return;
        }

        let tau_attack = self.tau_attack;
        let tau_release = self.tau_release;
        let curve = self.curve;

        for ch in 0..buf.channels().min(self.envelope.len()) {
            let mut env = self.envelope[ch];

            for sample in buf.channel_mut(ch).iter_mut() {
                let s = sample.abs();
                let d = s - env;
                let tau = if d > 0.0 { tau_attack } else { tau_release };
                env = sanitize(env + tau * d);

                let level = env.max(ENVELOPE_FLOOR);
                *sample *= compressor_gain_single(level, &curve);
            }

            self.envelope[ch] = env;
        }
    }

    /// Current envelope level for one channel.
    pub fn envelope(&self, ch: usize) -> f32 {
        self.envelope[ch]
    }
}

/// Calculate the smoothing coefficient for a time constant.
///
/// `tau = 1 - exp(ln(1 - 1/sqrt(2)) / samples)`: the envelope covers
/// 1 - 1/√2 of a level step within the given time.
fn calculate_tau(sr: f32, time_ms: f32) -> f32 {
    let samples = millis_to_samples(sr, time_ms);
    if samples <= 0.0 {
        return 1.0;
    }
    1.0 - ((1.0 - FRAC_1_SQRT_2).ln() / samples).exp()
}
