// SPDX-License-Identifier: LGPL-3.0-or-later

//! Biquad filters with parameter management.
//!
//! `coeffs` computes RBJ cookbook coefficients for the filter types the
//! crossover network needs; `filter` wraps a [`mbc_dsp::types::Biquad`]
//! with builder-style configuration and dirty-flag recalculation.

pub mod coeffs;
pub mod filter;
