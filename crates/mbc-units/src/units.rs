// SPDX-License-Identifier: LGPL-3.0-or-later

//! Unit conversion functions: time, gain, and decibels.

/// Convert sample count to seconds.
#[inline]
pub fn samples_to_seconds(sr: f32, samples: f32) -> f32 {
    samples / sr
}

/// Convert seconds to sample count.
#[inline]
pub fn seconds_to_samples(sr: f32, time: f32) -> f32 {
    time * sr
}

/// Convert sample count to milliseconds.
#[inline]
pub fn samples_to_millis(sr: f32, samples: f32) -> f32 {
    samples * 1000.0 / sr
}

/// Convert milliseconds to sample count.
#[inline]
pub fn millis_to_samples(sr: f32, time: f32) -> f32 {
    time * sr / 1000.0
}

/// Convert decibels to linear gain (amplitude ratio).
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    (db * (std::f32::consts::LN_10 / 20.0)).exp()
}

/// Convert linear gain (amplitude ratio) to decibels.
#[inline]
pub fn gain_to_db(gain: f32) -> f32 {
    20.0 * gain.log10()
}

/// Convert decibels to power ratio.
#[inline]
pub fn db_to_power(db: f32) -> f32 {
    (db * (std::f32::consts::LN_10 / 10.0)).exp()
}

/// Convert power ratio to decibels.
#[inline]
pub fn power_to_db(pwr: f32) -> f32 {
    10.0 * pwr.log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_samples_time_conversion() {
        let sr = 48000.0;

        // 48000 samples at 48kHz = 1 second
        assert!((samples_to_seconds(sr, 48000.0) - 1.0).abs() < EPSILON);
        assert!((seconds_to_samples(sr, 1.0) - 48000.0).abs() < EPSILON);

        // Roundtrip
        let time = 2.5;
        let samples = seconds_to_samples(sr, time);
        assert!((samples_to_seconds(sr, samples) - time).abs() < EPSILON);
    }

    #[test]
    fn test_samples_millis_conversion() {
        let sr = 48000.0;

        assert!((samples_to_millis(sr, 48000.0) - 1000.0).abs() < EPSILON);
        assert!((millis_to_samples(sr, 1000.0) - 48000.0).abs() < EPSILON);

        let millis = 250.0;
        let samples = millis_to_samples(sr, millis);
        assert!((samples_to_millis(sr, samples) - millis).abs() < EPSILON);
    }

    #[test]
    fn test_db_gain_conversion() {
        // 0 dB = gain of 1.0
        assert!((db_to_gain(0.0) - 1.0).abs() < EPSILON);
        assert!((gain_to_db(1.0) - 0.0).abs() < EPSILON);

        // +6.02 dB ≈ gain of 2.0
        assert!((db_to_gain(6.0) - 2.0).abs() < 0.01);
        assert!((gain_to_db(2.0) - 6.0206).abs() < 0.001);

        // -6.02 dB ≈ gain of 0.5
        assert!((db_to_gain(-6.0) - 0.5).abs() < 0.01);

        // Roundtrip
        let db = 12.5;
        assert!((gain_to_db(db_to_gain(db)) - db).abs() < EPSILON);
    }

    #[test]
    fn test_db_power_conversion() {
        assert!((db_to_power(0.0) - 1.0).abs() < EPSILON);
        assert!((power_to_db(1.0) - 0.0).abs() < EPSILON);

        // +3.01 dB ≈ power ratio of 2.0
        assert!((db_to_power(3.0) - 2.0).abs() < 0.01);

        let db = 10.0;
        assert!((power_to_db(db_to_power(db)) - db).abs() < EPSILON);
    }

    #[test]
    fn test_gain_to_db_edge_cases() {
        // Zero gain produces -inf dB; callers floor levels first.
        let db = gain_to_db(0.0);
        assert!(db.is_infinite() && db.is_sign_negative());

        let db = gain_to_db(-1.0);
        assert!(db.is_nan(), "Negative gain should produce NaN");
    }

    #[test]
    fn test_different_sample_rates() {
        for sr in [44100.0, 48000.0, 88200.0, 96000.0, 192000.0] {
            let samples = millis_to_samples(sr, 1000.0);
            assert!((samples - sr).abs() < 0.1);
        }
    }
}
