// SPDX-License-Identifier: LGPL-3.0-or-later

//! Signal mixing operations.
//!
//! Weighted two-source mix, copy-mix, and add-mix variants operating on
//! `f32` sample buffers with per-source gain coefficients.

use multiversion::multiversion;

/// Mix `dst` with `src` using gains: `dst[i] = dst[i]*k1 + src[i]*k2`.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn mix2(dst: &mut [f32], src: &[f32], k1: f32, k2: f32) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = *d * k1 + *s * k2;
    }
}

/// Copy-mix two sources into `dst`: `dst[i] = src1[i]*k1 + src2[i]*k2`.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn mix_copy2(dst: &mut [f32], src1: &[f32], src2: &[f32], k1: f32, k2: f32) {
    for ((d, s1), s2) in dst.iter_mut().zip(src1.iter()).zip(src2.iter()) {
        *d = *s1 * k1 + *s2 * k2;
    }
}

/// Add-mix two sources into `dst`: `dst[i] += src1[i]*k1 + src2[i]*k2`.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn mix_add2(dst: &mut [f32], src1: &[f32], src2: &[f32], k1: f32, k2: f32) {
    for ((d, s1), s2) in dst.iter_mut().zip(src1.iter()).zip(src2.iter()) {
        *d += *s1 * k1 + *s2 * k2;
    }
}
