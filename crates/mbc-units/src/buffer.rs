// SPDX-License-Identifier: LGPL-3.0-or-later

//! Planar audio buffer: `[channel][sample]` storage with a fixed capacity
//! and a per-block frame count.
//!
//! Storage is allocated once at construction (the configuration path);
//! [`AudioBuffer::set_frames`] only moves the active-region marker, so
//! resizing a block never allocates.

use mbc_dsp::copy;

/// A planar multi-channel sample buffer.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Planar sample storage, `channels * capacity` long.
    data: Vec<f32>,
    channels: usize,
    /// Allocated frames per channel (the maximum block size).
    capacity: usize,
    /// Active frames per channel for the current block.
    frames: usize,
}

impl AudioBuffer {
    /// Allocate a buffer of `channels × capacity` zeroed samples.
    ///
    /// The active frame count starts at `capacity`.
    pub fn new(channels: usize, capacity: usize) -> Self {
        Self {
            data: vec![0.0; channels * capacity],
            channels,
            capacity,
            frames: capacity,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Active frames per channel for the current block.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Allocated frames per channel.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Set the active frame count for the current block.
    ///
    /// Never allocates.
    ///
    /// # Panics
    /// Panics if `frames > capacity`.
    pub fn set_frames(&mut self, frames: usize) {
        assert!(frames <= self.capacity, "frames exceed buffer capacity");
        self.frames = frames;
    }

    /// The active samples of one channel.
    pub fn channel(&self, ch: usize) -> &[f32] {
        let start = ch * self.capacity;
        &self.data[start..start + self.frames]
    }

    /// The active samples of one channel, mutable.
    pub fn channel_mut(&mut self, ch: usize) -> &mut [f32] {
        let start = ch * self.capacity;
        &mut self.data[start..start + self.frames]
    }

    /// Zero the active region of every channel.
    pub fn clear(&mut self) {
        for ch in 0..self.channels {
            let start = ch * self.capacity;
            let frames = self.frames;
            copy::fill_zero(&mut self.data[start..start + frames]);
        }
    }

    /// Zero the active region of one channel.
    pub fn clear_channel(&mut self, ch: usize) {
        copy::fill_zero(self.channel_mut(ch));
    }

    /// Copy the active region of `src`, adopting its frame count.
    ///
    /// Copies `min(self.channels, src.channels)` channels; channels this
    /// buffer has beyond `src` are left untouched.
    ///
    /// # Panics
    /// Panics if `src.frames() > self.capacity()`.
    pub fn copy_from(&mut self, src: &AudioBuffer) {
        self.set_frames(src.frames());
        for ch in 0..self.channels.min(src.channels) {
            copy::copy(self.channel_mut(ch), src.channel(ch));
        }
    }
}
