/*
Decibels and Linear Gain
========================

Channel volumes are set in decibels (what a fader shows) and applied as a
linear multiplier (what the samples need):

    gain = 10^(dB / 20)

     dB     gain
      0     1.000
     -6     0.501
    -12     0.251
    -30     0.032

The usable fader range is -30..0 dB. Nothing above 0 dB is allowed: five
voices summed at unity already approach full scale on the master bus.
*/

pub const MIN_VOLUME_DB: f32 = -30.0;
pub const MAX_VOLUME_DB: f32 = 0.0;

/// Clamp a fader value into the supported volume range.
#[inline]
pub fn clamp_volume_db(db: f32) -> f32 {
    if db.is_nan() {
        return MAX_VOLUME_DB;
    }
    db.clamp(MIN_VOLUME_DB, MAX_VOLUME_DB)
}

#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

#[inline]
pub fn gain_to_db(gain: f32) -> f32 {
    20.0 * gain.max(1e-9).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unity_and_attenuation() {
        assert!((db_to_gain(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_gain(-6.0) - 0.501).abs() < 1e-3);
        assert!((gain_to_db(0.5) + 6.02).abs() < 1e-2);
    }

    #[test]
    fn volume_is_clamped() {
        assert_eq!(clamp_volume_db(6.0), 0.0);
        assert_eq!(clamp_volume_db(-90.0), -30.0);
        assert_eq!(clamp_volume_db(-12.0), -12.0);
        assert_eq!(clamp_volume_db(f32::NAN), 0.0);
    }
}
