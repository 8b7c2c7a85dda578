// SPDX-License-Identifier: LGPL-3.0-or-later

//! Dynamics processors.
//!
//! Currently a single-band compressor with envelope following and
//! attack/release timing; one instance runs per frequency band.

pub mod compressor;
