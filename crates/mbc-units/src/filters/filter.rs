// SPDX-License-Identifier: LGPL-3.0-or-later

//! High-level biquad filter with parameter management.
//!
//! Wraps a [`Biquad`] from `mbc-dsp` with coefficient calculation and
//! dirty-flag recalculation. Setters only record the new value; the
//! trigonometric coefficient update runs once per change in
//! [`update_settings`](Filter::update_settings), which is allocation-free
//! and therefore safe on the audio path.

use std::f32::consts::PI;

use mbc_dsp::filters::{biquad_process, biquad_process_inplace};
use mbc_dsp::types::Biquad;

use super::coeffs::{calc_biquad_coeffs, FilterType};

/// Biquad filter with automatic coefficient management.
///
/// Uses the builder pattern for parameter configuration. Coefficients are
/// recalculated lazily on the next process call after a change.
pub struct Filter {
    filter_type: FilterType,
    sample_rate: f32,
    frequency: f32,
    q: f32,
    dirty: bool,
    biquad: Biquad,
}

impl Default for Filter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter {
    /// Create a new filter with default settings.
    ///
    /// Defaults: Off, 48 kHz, 1000 Hz, Q=1/√2.
    pub fn new() -> Self {
        Self {
            filter_type: FilterType::Off,
            sample_rate: 48000.0,
            frequency: 1000.0,
            q: std::f32::consts::FRAC_1_SQRT_2,
            dirty: true,
            biquad: Biquad::default(),
        }
    }

    /// Set the sample rate in Hz.
    pub fn set_sample_rate(&mut self, sr: f32) -> &mut Self {
        self.sample_rate = sr;
        self.dirty = true;
        self
    }

    /// Set the filter type.
    pub fn set_filter_type(&mut self, ft: FilterType) -> &mut Self {
        self.filter_type = ft;
        self.dirty = true;
        self
    }

    /// Set the cutoff frequency in Hz.
    pub fn set_frequency(&mut self, freq: f32) -> &mut Self {
        self.frequency = freq;
        self.dirty = true;
        self
    }

    /// Set the quality factor.
    pub fn set_q(&mut self, q: f32) -> &mut Self {
        self.q = q;
        self.dirty = true;
        self
    }

    /// Recalculate biquad coefficients if any parameter has changed.
    pub fn update_settings(&mut self) {
        if !self.dirty {
            return;
        }
        self.biquad.coeffs =
            calc_biquad_coeffs(self.filter_type, self.sample_rate, self.frequency, self.q);
        self.dirty = false;
    }

    /// Reset the filter state (clear delay memory).
    ///
    /// Does not change the filter parameters or coefficients.
    pub fn clear(&mut self) {
        self.biquad.reset();
    }

    /// Process audio from `src` into `dst`.
    ///
    /// Output length is `min(dst.len(), src.len())`. Recalculates
    /// coefficients automatically if parameters are dirty.
    pub fn process(&mut self, dst: &mut [f32], src: &[f32]) {
        if self.dirty {
            self.update_settings();
        }
        biquad_process(dst, src, &mut self.biquad);
    }

    /// Process audio in place.
    ///
    /// Recalculates coefficients automatically if parameters are dirty.
    pub fn process_inplace(&mut self, buf: &mut [f32]) {
        if self.dirty {
            self.update_settings();
        }
        biquad_process_inplace(buf, &mut self.biquad);
    }

    /// Compute the frequency response at a given frequency.
    ///
    /// Returns `(magnitude, phase)` where magnitude is linear (not dB)
    /// and phase is in radians. Uses the current coefficients; the caller
    /// should ensure they are up to date.
    pub fn freq_response(&self, freq: f32) -> (f32, f32) {
        let c = &self.biquad.coeffs;

        let w = 2.0 * PI * freq / self.sample_rate;
        let cos_w = w.cos();
        let sin_w = w.sin();
        let cos_2w = (2.0 * w).cos();
        let sin_2w = (2.0 * w).sin();

        // Numerator: H_num = b0 + b1*e^(-jw) + b2*e^(-j2w)
        let num_re = c.b0 + c.b1 * cos_w + c.b2 * cos_2w;
        let num_im = -c.b1 * sin_w - c.b2 * sin_2w;

        // Denominator with the pre-negated convention:
        // den = 1 - a1*z^-1 - a2*z^-2
        let den_re = 1.0 - c.a1 * cos_w - c.a2 * cos_2w;
        let den_im = c.a1 * sin_w + c.a2 * sin_2w;

        let den_mag_sq = den_re * den_re + den_im * den_im;
        let h_re = (num_re * den_re + num_im * den_im) / den_mag_sq;
        let h_im = (num_im * den_re - num_re * den_im) / den_mag_sq;

        let magnitude = (h_re * h_re + h_im * h_im).sqrt();
        let phase = h_im.atan2(h_re);

        (magnitude, phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48000.0;

    #[test]
    fn construction_defaults() {
        let f = Filter::new();
        assert_eq!(f.filter_type, FilterType::Off);
        assert_eq!(f.sample_rate, 48000.0);
        assert_eq!(f.frequency, 1000.0);
        assert!(f.dirty);
    }

    #[test]
    fn off_passes_signal_unchanged() {
        let mut f = Filter::new();
        f.set_filter_type(FilterType::Off).update_settings();

        let src = [1.0, 0.5, -0.3, 0.8, 0.0];
        let mut dst = [0.0; 5];
        f.process(&mut dst, &src);

        for i in 0..5 {
            assert!(
                (dst[i] - src[i]).abs() < 1e-7,
                "Off filter should pass through at sample {i}"
            );
        }
    }

    #[test]
    fn lowpass_passes_dc() {
        let mut f = Filter::new();
        f.set_sample_rate(SR)
            .set_filter_type(FilterType::Lowpass)
            .set_frequency(1000.0)
            .update_settings();

        let dc = vec![1.0f32; 4096];
        let mut out = vec![0.0f32; 4096];
        f.process(&mut out, &dc);

        assert!(
            (out[4095] - 1.0).abs() < 0.001,
            "LPF should pass DC, got {}",
            out[4095]
        );
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut f = Filter::new();
        f.set_sample_rate(SR)
            .set_filter_type(FilterType::Highpass)
            .set_frequency(1000.0)
            .update_settings();

        let dc = vec![1.0f32; 8192];
        let mut out = vec![0.0f32; 8192];
        f.process(&mut out, &dc);

        assert!(
            out[8191].abs() < 0.001,
            "HPF should block DC, got {}",
            out[8191]
        );
    }

    #[test]
    fn process_inplace_matches_process() {
        let mut f1 = Filter::new();
        f1.set_sample_rate(SR)
            .set_filter_type(FilterType::Highpass)
            .set_frequency(2000.0)
            .set_q(1.0)
            .update_settings();

        let mut f2 = Filter::new();
        f2.set_sample_rate(SR)
            .set_filter_type(FilterType::Highpass)
            .set_frequency(2000.0)
            .set_q(1.0)
            .update_settings();

        let src = [1.0, 0.0, -0.5, 0.3, 0.7, -0.2, 0.0, 0.1];
        let mut dst = [0.0; 8];
        let mut buf = src;

        f1.process(&mut dst, &src);
        f2.process_inplace(&mut buf);

        for i in 0..8 {
            assert!(
                (dst[i] - buf[i]).abs() < 1e-7,
                "Inplace and separate processing should match at sample {i}"
            );
        }
    }

    #[test]
    fn clear_resets_state() {
        let mut f = Filter::new();
        f.set_sample_rate(SR)
            .set_filter_type(FilterType::Lowpass)
            .set_frequency(1000.0)
            .update_settings();

        let mut buf = [1.0, 0.5, 0.3, 0.1];
        f.process_inplace(&mut buf);

        f.clear();
        let mut impulse1 = [1.0, 0.0, 0.0, 0.0];
        f.process_inplace(&mut impulse1);

        f.clear();
        let mut impulse2 = [1.0, 0.0, 0.0, 0.0];
        f.process_inplace(&mut impulse2);

        for i in 0..4 {
            assert!(
                (impulse1[i] - impulse2[i]).abs() < 1e-7,
                "Clear should reset state: sample {i} differs"
            );
        }
    }

    #[test]
    fn dirty_flag_set_by_each_setter() {
        let mut f = Filter::new();
        f.update_settings();
        assert!(!f.dirty);

        f.set_sample_rate(44100.0);
        assert!(f.dirty, "set_sample_rate should mark dirty");
        f.update_settings();

        f.set_filter_type(FilterType::Highpass);
        assert!(f.dirty, "set_filter_type should mark dirty");
        f.update_settings();

        f.set_frequency(500.0);
        assert!(f.dirty, "set_frequency should mark dirty");
        f.update_settings();

        f.set_q(2.0);
        assert!(f.dirty, "set_q should mark dirty");
        f.update_settings();
        assert!(!f.dirty);
    }

    #[test]
    fn auto_update_on_process() {
        let mut f = Filter::new();
        f.set_sample_rate(SR)
            .set_filter_type(FilterType::Lowpass)
            .set_frequency(1000.0);
        // Deliberately do NOT call update_settings

        assert!(f.dirty);
        let mut buf = [1.0, 0.0, 0.0, 0.0];
        f.process_inplace(&mut buf);
        assert!(!f.dirty, "process_inplace should auto-update when dirty");
    }

    #[test]
    fn freq_response_at_cutoff() {
        let mut f = Filter::new();
        f.set_sample_rate(SR)
            .set_filter_type(FilterType::Lowpass)
            .set_frequency(1000.0)
            .set_q(std::f32::consts::FRAC_1_SQRT_2)
            .update_settings();

        // Butterworth LPF at cutoff: magnitude should be -3dB = 1/sqrt(2)
        let (mag, _phase) = f.freq_response(1000.0);
        let expected = std::f32::consts::FRAC_1_SQRT_2;
        assert!(
            (mag - expected).abs() < 0.01,
            "Butterworth LPF at cutoff should be ~{expected}, got {mag}"
        );
    }

    #[test]
    fn freq_response_allpass_unity_everywhere() {
        let mut f = Filter::new();
        f.set_sample_rate(SR)
            .set_filter_type(FilterType::Allpass)
            .set_frequency(3000.0)
            .set_q(1.0)
            .update_settings();

        for &freq in &[100.0, 1000.0, 3000.0, 10000.0, 20000.0] {
            let (mag, _) = f.freq_response(freq);
            assert!(
                (mag - 1.0).abs() < 0.001,
                "Allpass freq_response at {freq}Hz should be ~1.0, got {mag}"
            );
        }
    }

    #[test]
    fn lowpass_sine_above_cutoff_attenuated() {
        let mut f = Filter::new();
        f.set_sample_rate(SR)
            .set_filter_type(FilterType::Lowpass)
            .set_frequency(1000.0)
            .set_q(std::f32::consts::FRAC_1_SQRT_2)
            .update_settings();

        let n = 8192;
        let freq = 10000.0;
        let src: Vec<f32> = (0..n)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / SR).sin())
            .collect();
        let mut dst = vec![0.0f32; n];
        f.process(&mut dst, &src);

        let start = n / 2;
        let rms_in: f32 =
            (src[start..].iter().map(|x| x * x).sum::<f32>() / (n - start) as f32).sqrt();
        let rms_out: f32 =
            (dst[start..].iter().map(|x| x * x).sum::<f32>() / (n - start) as f32).sqrt();
        let gain = rms_out / rms_in;

        assert!(
            gain < 0.05,
            "10kHz sine through 1kHz LPF should be heavily attenuated, got gain {gain}"
        );
    }

    #[test]
    fn changing_frequency_after_processing() {
        let mut f = Filter::new();
        f.set_sample_rate(SR)
            .set_filter_type(FilterType::Lowpass)
            .set_frequency(100.0)
            .update_settings();

        // Run a block, then retune and run again without clearing.
        let mut buf = vec![1.0f32; 256];
        f.process_inplace(&mut buf);

        f.set_frequency(10000.0);
        let mut buf2 = vec![1.0f32; 4096];
        f.process_inplace(&mut buf2);

        assert!(
            (buf2[4095] - 1.0).abs() < 0.01,
            "After retuning well above DC, DC should still pass, got {}",
            buf2[4095]
        );
    }

    #[test]
    fn process_empty_buffer_is_safe() {
        let mut f = Filter::new();
        f.set_filter_type(FilterType::Lowpass)
            .set_frequency(1000.0)
            .update_settings();

        let src: [f32; 0] = [];
        let mut dst: [f32; 0] = [];
        f.process(&mut dst, &src);

        let mut buf: [f32; 0] = [];
        f.process_inplace(&mut buf);
    }
}
