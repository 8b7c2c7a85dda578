// SPDX-License-Identifier: LGPL-3.0-or-later

//! # mbc-dsp
//!
//! Low-level DSP kernels for the `mbc` multiband dynamics processor.
//!
//! This crate provides the foundational operations used by `mbc-units`
//! to build the stateful processing chain. It includes:
//!
//! - **Buffer operations**: copy, fill
//! - **Filters**: biquad IIR processing (out-of-place and in-place)
//! - **Dynamics**: compressor gain-curve evaluation
//! - **Mixing**: weighted two-source mixing and accumulation
//! - **Float utilities**: denormal flushing, sanitization, range limiting
//!
//! ## Design
//!
//! Buffer-processing kernels that benefit from vectorization use runtime
//! SIMD dispatch via the `multiversion` crate. Each annotated function is
//! compiled for AVX2+FMA, AVX, SSE4.1, and NEON targets; the best variant
//! is selected automatically at startup. Per-sample recurrences (the
//! biquad, the envelope follower in `mbc-units`) stay scalar because each
//! output depends on the previous one.

pub mod copy;
pub mod dynamics;
pub mod filters;
pub mod float;
pub mod mix;
pub mod types;
