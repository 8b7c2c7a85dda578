// SPDX-License-Identifier: LGPL-3.0-or-later

//! Biquad filter processing kernels.
//!
//! The coefficient convention is described in [`crate::types::BiquadCoeffs`]:
//! `a1` and `a2` are **pre-negated**, so the recurrence uses addition:
//! ```text
//!   y    = b0 * x + d[0]
//!   p1   = b1 * x + a1 * y
//!   p2   = b2 * x + a2 * y
//!   d[0] = d[1] + p1
//!   d[1] = p2
//! ```
//!
//! The recurrence is inherently serial (each output feeds the delay line
//! for the next sample), so these kernels are scalar.

use crate::types::Biquad;

/// Process audio from `src` into `dst` through one biquad section.
///
/// Output length is `min(dst.len(), src.len())`.
pub fn biquad_process(dst: &mut [f32], src: &[f32], f: &mut Biquad) {
    let c = f.coeffs;
    let d = &mut f.d;

    for (out, &inp) in dst.iter_mut().zip(src.iter()) {
        let s = inp;
        let y = c.b0 * s + d[0];
        let p1 = c.b1 * s + c.a1 * y;
        let p2 = c.b2 * s + c.a2 * y;
        d[0] = d[1] + p1;
        d[1] = p2;
        *out = y;
    }
}

/// Process audio in place through one biquad section.
pub fn biquad_process_inplace(buf: &mut [f32], f: &mut Biquad) {
    let c = f.coeffs;
    let d = &mut f.d;

    for sample in buf.iter_mut() {
        let s = *sample;
        let y = c.b0 * s + d[0];
        let p1 = c.b1 * s + c.a1 * y;
        let p2 = c.b2 * s + c.a2 * y;
        d[0] = d[1] + p1;
        d[1] = p2;
        *sample = y;
    }
}
