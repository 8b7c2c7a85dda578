// SPDX-License-Identifier: LGPL-3.0-or-later

//! # mbc-units
//!
//! The multiband dynamics processing core, built on the kernels in
//! [`mbc_dsp`]. It provides:
//!
//! - **Crossover**: phase-matched Linkwitz-Riley band splitting with an
//!   all-pass bypass reference
//! - **Dynamics**: a band compressor with attack/release envelope tracking
//! - **Engine**: the per-block orchestrator driving split → compress →
//!   recombine on a shared in-place buffer
//! - **Params**: the parameter registry and a lock-free parameter store
//!
//! The engine path (`process_block` and everything below it) performs no
//! allocation, takes no locks, and never panics in release builds; all
//! allocation happens in `prepare` on the configuration path.

pub mod buffer;
pub mod consts;
pub mod crossover;
pub mod dynamics;
pub mod engine;
pub mod filters;
pub mod mixer;
pub mod params;
pub mod units;

/// Stream configuration supplied before processing starts.
///
/// Immutable once handed to `prepare`; a change (e.g. a sample-rate
/// switch) requires calling `prepare` again, which re-allocates and
/// resets all stateful units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Largest block length `process_block` will ever receive.
    pub max_block_size: usize,
    /// Number of channels negotiated with the host.
    pub num_channels: usize,
}
