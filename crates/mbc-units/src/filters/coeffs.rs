// SPDX-License-Identifier: LGPL-3.0-or-later

//! Biquad coefficient calculation using the RBJ Audio EQ Cookbook.
//!
//! All coefficients are returned in the `mbc-dsp` convention where `a1`
//! and `a2` are **pre-negated** relative to the standard cookbook
//! formulas. The processing loop uses addition (`d0 = b1*x + a1*y + d1`),
//! so the sign flip is baked into the coefficients:
//!
//! - `a1 = -a1_std / a0`
//! - `a2 = -a2_std / a0`

use std::f32::consts::PI;

use mbc_dsp::types::BiquadCoeffs;

/// Supported biquad filter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    /// Bypass (identity): passes signal unchanged.
    Off,
    /// Second-order low-pass filter.
    Lowpass,
    /// Second-order high-pass filter.
    Highpass,
    /// All-pass filter (phase shift only).
    Allpass,
}

/// Calculate biquad coefficients for the given filter type.
///
/// # Parameters
///
/// - `filter_type` -- type of filter to compute
/// - `sample_rate` -- sample rate in Hz (must be > 0)
/// - `freq` -- cutoff frequency in Hz
/// - `q` -- quality factor (must be > 0)
pub fn calc_biquad_coeffs(filter_type: FilterType, sample_rate: f32, freq: f32, q: f32) -> BiquadCoeffs {
    if filter_type == FilterType::Off {
        return BiquadCoeffs::identity();
    }

    let w0 = 2.0 * PI * freq / sample_rate;
    let cos_w0 = w0.cos();
    let sin_w0 = w0.sin();
    let alpha = sin_w0 / (2.0 * q);

    let (b0, b1, b2, a0, a1_std, a2_std) = match filter_type {
        FilterType::Off => unreachable!(),

        FilterType::Lowpass => {
            let b1 = 1.0 - cos_w0;
            let b0 = b1 / 2.0;
            let b2 = b0;
            let a0 = 1.0 + alpha;
            let a1_std = -2.0 * cos_w0;
            let a2_std = 1.0 - alpha;
            (b0, b1, b2, a0, a1_std, a2_std)
        }

        FilterType::Highpass => {
            let b1 = -(1.0 + cos_w0);
            let b0 = (1.0 + cos_w0) / 2.0;
            let b2 = b0;
            let a0 = 1.0 + alpha;
            let a1_std = -2.0 * cos_w0;
            let a2_std = 1.0 - alpha;
            (b0, b1, b2, a0, a1_std, a2_std)
        }

        FilterType::Allpass => {
            let b0 = 1.0 - alpha;
            let b1 = -2.0 * cos_w0;
            let b2 = 1.0 + alpha;
            let a0 = 1.0 + alpha;
            let a1_std = -2.0 * cos_w0;
            let a2_std = 1.0 - alpha;
            (b0, b1, b2, a0, a1_std, a2_std)
        }
    };

    let inv_a0 = 1.0 / a0;

    BiquadCoeffs {
        b0: b0 * inv_a0,
        b1: b1 * inv_a0,
        b2: b2 * inv_a0,
        // Pre-negate for the addition-based recurrence
        a1: -a1_std * inv_a0,
        a2: -a2_std * inv_a0,
    }
}
