// SPDX-License-Identifier: LGPL-3.0-or-later

//! Dynamics processing primitives: compressor gain-curve evaluation.
//!
//! These kernels compute gain multipliers from signal envelope levels.
//! Envelope detection and attack/release timing are handled in
//! `mbc-units`; the curve itself is stateless.

use crate::types::CompressorCurve;
use multiversion::multiversion;

/// Compute the compressor gain for a single envelope level (scalar).
///
/// `x` must be a non-negative level estimate. Returns the gain
/// multiplier: unity at or below the threshold, the log-domain tilt line
/// above it.
#[inline]
pub fn compressor_gain_single(x: f32, c: &CompressorCurve) -> f32 {
    if x <= c.thresh {
        return 1.0;
    }
    (x.ln() * c.tilt[0] + c.tilt[1]).exp()
}

/// Compute the compressor gain for each envelope level in `src`.
///
/// Output is a gain multiplier per sample (not the processed signal).
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn compressor_gain(dst: &mut [f32], src: &[f32], c: &CompressorCurve) {
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d = if s <= c.thresh {
            1.0
        } else {
            (s.ln() * c.tilt[0] + c.tilt[1]).exp()
        };
    }
}

/// Compute the compressor transfer curve: `dst[i] = gain(src[i]) * src[i]`.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn compressor_curve(dst: &mut [f32], src: &[f32], c: &CompressorCurve) {
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d = if s <= c.thresh {
            s
        } else {
            (s.ln() * c.tilt[0] + c.tilt[1]).exp() * s
        };
    }
}
