// SPDX-License-Identifier: LGPL-3.0-or-later

//! Parameter registry, lock-free store, and per-block snapshot.
//!
//! The registry declares every parameter with its range, step, and
//! default; the store clamps writes to the declared range, so the
//! processing core never observes an out-of-range value.
//!
//! Each value lives in a single `AtomicU32` (floats bit-cast, the choice
//! index and flag as plain integers), so an unsynchronized control
//! surface can write while the audio thread reads: every access is one
//! word, tear-free by construction. The audio thread reads each field at
//! most once per block through [`ParamSnapshot::read`].

use std::sync::atomic::{AtomicU32, Ordering};

use once_cell::sync::Lazy;

use crate::consts::{CROSSOVER_FREQ_DFL, CROSSOVER_FREQ_MAX, CROSSOVER_FREQ_MIN};

/// Ratio choices offered by the ratio parameter.
pub const RATIO_CHOICES: [f32; 14] = [
    1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0, 15.0, 20.0, 50.0, 100.0,
];

/// Default index into [`RATIO_CHOICES`] (ratio 3.0).
pub const RATIO_DFL_INDEX: usize = 3;

/// Number of declared parameters.
pub const PARAM_COUNT: usize = 6;

/// Parameter identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    /// Compressor threshold in dB relative to full scale.
    Threshold,
    /// Compressor attack time in milliseconds.
    Attack,
    /// Compressor release time in milliseconds.
    Release,
    /// Compression ratio, as an index into [`RATIO_CHOICES`].
    Ratio,
    /// Chain bypass flag.
    Bypassed,
    /// Crossover cutoff frequency in Hz.
    CrossoverFreq,
}

impl ParamId {
    /// Every parameter, in registry order.
    pub const ALL: [ParamId; PARAM_COUNT] = [
        ParamId::Threshold,
        ParamId::Attack,
        ParamId::Release,
        ParamId::Ratio,
        ParamId::Bypassed,
        ParamId::CrossoverFreq,
    ];

    fn index(self) -> usize {
        match self {
            ParamId::Threshold => 0,
            ParamId::Attack => 1,
            ParamId::Release => 2,
            ParamId::Ratio => 3,
            ParamId::Bypassed => 4,
            ParamId::CrossoverFreq => 5,
        }
    }
}

/// Value kind of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Float,
    Choice,
    Bool,
}

/// Declaration of one parameter: name, kind, range, step, and default.
///
/// For `Choice` parameters the range and default are expressed in index
/// units; for `Bool`, 0.0/1.0.
#[derive(Debug, Clone)]
pub struct ParamDesc {
    pub id: ParamId,
    pub name: &'static str,
    pub kind: ParamKind,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
}

impl ParamDesc {
    /// Clamp a raw value to this parameter's declared range.
    pub fn clamp(&self, value: f32) -> f32 {
        mbc_dsp::float::limit(value, self.min, self.max)
    }
}

static PARAMS: Lazy<Vec<ParamDesc>> = Lazy::new(|| {
    vec![
        ParamDesc {
            id: ParamId::Threshold,
            name: "threshold",
            kind: ParamKind::Float,
            min: -60.0,
            max: 12.0,
            step: 1.0,
            default: 0.0,
        },
        ParamDesc {
            id: ParamId::Attack,
            name: "attack",
            kind: ParamKind::Float,
            min: 5.0,
            max: 500.0,
            step: 1.0,
            default: 50.0,
        },
        ParamDesc {
            id: ParamId::Release,
            name: "release",
            kind: ParamKind::Float,
            min: 5.0,
            max: 500.0,
            step: 1.0,
            default: 250.0,
        },
        ParamDesc {
            id: ParamId::Ratio,
            name: "ratio",
            kind: ParamKind::Choice,
            min: 0.0,
            max: (RATIO_CHOICES.len() - 1) as f32,
            step: 1.0,
            default: RATIO_DFL_INDEX as f32,
        },
        ParamDesc {
            id: ParamId::Bypassed,
            name: "bypassed",
            kind: ParamKind::Bool,
            min: 0.0,
            max: 1.0,
            step: 1.0,
            default: 0.0,
        },
        ParamDesc {
            id: ParamId::CrossoverFreq,
            name: "crossover-freq",
            kind: ParamKind::Float,
            min: CROSSOVER_FREQ_MIN,
            max: CROSSOVER_FREQ_MAX,
            step: 1.0,
            default: CROSSOVER_FREQ_DFL,
        },
    ]
});

/// The declaration for one parameter.
pub fn descriptor(id: ParamId) -> &'static ParamDesc {
    &PARAMS[id.index()]
}

/// Resolve a parameter by its registered name.
pub fn lookup(name: &str) -> Option<ParamId> {
    PARAMS.iter().find(|d| d.name == name).map(|d| d.id)
}

/// Typed parameter access, bound by identifier.
///
/// One generic implementation per value type replaces per-type accessor
/// duplication: `f32` for floats, `usize` for choice indices, `bool` for
/// flags.
pub trait ParamValue: Sized {
    fn read(store: &ParamStore, id: ParamId) -> Self;
    fn write(store: &ParamStore, id: ParamId, value: Self);
}

impl ParamValue for f32 {
    fn read(store: &ParamStore, id: ParamId) -> f32 {
        f32::from_bits(store.load(id))
    }

    fn write(store: &ParamStore, id: ParamId, value: f32) {
        let clamped = descriptor(id).clamp(value);
        store.store(id, clamped.to_bits());
    }
}

impl ParamValue for usize {
    fn read(store: &ParamStore, id: ParamId) -> usize {
        store.load(id) as usize
    }

    fn write(store: &ParamStore, id: ParamId, value: usize) {
        let max = descriptor(id).max as usize;
        store.store(id, value.min(max) as u32);
    }
}

impl ParamValue for bool {
    fn read(store: &ParamStore, id: ParamId) -> bool {
        store.load(id) != 0
    }

    fn write(store: &ParamStore, id: ParamId, value: bool) {
        store.store(id, value as u32);
    }
}

/// Lock-free parameter store: one atomic word per parameter.
///
/// Single-writer/single-reader per parameter is sufficient; scalar values
/// never tear. Safe to share between a control thread and the audio
/// thread behind an `Arc`.
pub struct ParamStore {
    values: [AtomicU32; PARAM_COUNT],
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamStore {
    /// Create a store holding every parameter's declared default.
    pub fn new() -> Self {
        let values = ParamId::ALL.map(|id| {
            let desc = descriptor(id);
            let raw = match desc.kind {
                ParamKind::Float => desc.default.to_bits(),
                ParamKind::Choice | ParamKind::Bool => desc.default as u32,
            };
            AtomicU32::new(raw)
        });
        Self { values }
    }

    fn load(&self, id: ParamId) -> u32 {
        self.values[id.index()].load(Ordering::Relaxed)
    }

    fn store(&self, id: ParamId, raw: u32) {
        self.values[id.index()].store(raw, Ordering::Relaxed);
    }

    /// Read a typed value.
    pub fn get<T: ParamValue>(&self, id: ParamId) -> T {
        T::read(self, id)
    }

    /// Write a typed value, clamped to the declared range.
    pub fn set<T: ParamValue>(&self, id: ParamId, value: T) {
        T::write(self, id, value);
    }

    /// Read a float parameter.
    pub fn float(&self, id: ParamId) -> f32 {
        self.get(id)
    }

    /// Write a float parameter, clamped to the declared range.
    pub fn set_float(&self, id: ParamId, value: f32) {
        self.set(id, value);
    }

    /// Read a choice parameter's index.
    pub fn choice_index(&self, id: ParamId) -> usize {
        self.get(id)
    }

    /// Write a choice parameter's index, clamped to the choice count.
    pub fn set_choice_index(&self, id: ParamId, index: usize) {
        self.set(id, index);
    }

    /// Read a boolean parameter.
    pub fn bool(&self, id: ParamId) -> bool {
        self.get(id)
    }

    /// Write a boolean parameter.
    pub fn set_bool(&self, id: ParamId, value: bool) {
        self.set(id, value);
    }
}

/// The parameter values for one block.
///
/// Read once at the start of each block; logically immutable for the
/// block's duration even while the backing store keeps changing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    pub threshold_db: f32,
    pub attack_ms: f32,
    pub release_ms: f32,
    /// Resolved ratio value (not the choice index).
    pub ratio: f32,
    pub bypassed: bool,
    pub crossover_hz: f32,
}

impl ParamSnapshot {
    /// Read the current value of every parameter, one load per field.
    pub fn read(store: &ParamStore) -> Self {
        let ratio_index: usize = store.get(ParamId::Ratio);
        Self {
            threshold_db: store.get(ParamId::Threshold),
            attack_ms: store.get(ParamId::Attack),
            release_ms: store.get(ParamId::Release),
            ratio: RATIO_CHOICES[ratio_index.min(RATIO_CHOICES.len() - 1)],
            bypassed: store.get(ParamId::Bypassed),
            crossover_hz: store.get(ParamId::CrossoverFreq),
        }
    }
}
