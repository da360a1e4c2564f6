/// `x / (1 + |x|)` after `drive` gain: smooth, never exceeds ±1.
#[inline]
pub fn soft_clip(sample: f32, drive: f32) -> f32 {
    let x = sample * drive;
    x / (1.0 + x.abs())
}

/// Tape-style saturation: soft clip with the small-signal gain normalised
/// back to unity, so quiet passages pass almost untouched.
pub fn saturate(buffer: &mut [f32], drive: f32) {
    let drive = drive.max(1e-3);
    for sample in buffer.iter_mut() {
        *sample = soft_clip(*sample, drive) / drive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_clip_is_bounded_and_odd() {
        for &x in &[-100.0f32, -1.0, -0.1, 0.0, 0.1, 1.0, 100.0] {
            let y = soft_clip(x, 2.0);
            assert!(y.abs() < 1.0);
            assert!((soft_clip(-x, 2.0) + y).abs() < 1e-6);
        }
    }

    #[test]
    fn saturate_leaves_quiet_signal_nearly_unchanged() {
        let mut quiet = [0.01f32, -0.01];
        saturate(&mut quiet, 1.5);
        assert!((quiet[0] - 0.01).abs() < 0.001);

        let mut loud = [4.0f32];
        saturate(&mut loud, 1.5);
        assert!(loud[0] < 1.0 / 1.5);
    }
}
