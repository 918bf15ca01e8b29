//! The animated "plasma" image pushed into the host texture.

/// Multiplier applied to the shared time before it drives the waves.
pub const DEFAULT_SPEED: f32 = 4.0;

/// Bytes per pixel written by [`fill`].
pub const BYTES_PER_PIXEL: usize = 4;

/// Render a `width × height` plasma frame at `time` (host seconds) into a
/// new buffer of `row_stride × height` bytes.
///
/// # Panics
///
/// Panics if `row_stride < width * 4`.
#[must_use]
pub fn synthesize(width: usize, height: usize, row_stride: usize, time: f32) -> Vec<u8> {
    synthesize_with_speed(width, height, row_stride, time, DEFAULT_SPEED)
}

/// [`synthesize`] with an explicit animation speed.
///
/// # Panics
///
/// Panics if `row_stride < width * 4`.
#[must_use]
pub fn synthesize_with_speed(
    width: usize,
    height: usize,
    row_stride: usize,
    time: f32,
    speed: f32,
) -> Vec<u8> {
    let mut pixels = vec![0; row_stride * height];
    fill(&mut pixels, width, height, row_stride, time * speed);
    pixels
}

/// Fill `dst` with grayscale RGBA plasma at animation phase `t`.
///
/// Each pixel is the average of four sine waves (horizontal, vertical,
/// diagonal, radial), each mapped from `[-1, 1]` to `[0, 254]`. Bytes between
/// `width * 4` and `row_stride` in each row are left untouched.
///
/// # Panics
///
/// Panics if `row_stride < width * 4` or `dst` is shorter than
/// `row_stride * height`.
pub fn fill(dst: &mut [u8], width: usize, height: usize, row_stride: usize, t: f32) {
    assert!(
        row_stride >= width * BYTES_PER_PIXEL,
        "row stride {row_stride} too small for width {width}",
    );
    if width == 0 {
        return;
    }

    for (y, row) in dst.chunks_mut(row_stride).take(height).enumerate() {
        for (x, pixel) in row[..width * BYTES_PER_PIXEL]
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .enumerate()
        {
            pixel.fill(intensity(x, y, t));
        }
    }
}

/// Plasma intensity at pixel `(x, y)`.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn intensity(x: usize, y: usize, t: f32) -> u8 {
    let wave = |phase: f32| 127.0 + 127.0 * phase.sin();

    let xf = x as f32;
    let yf = y as f32;
    let radius = ((x * x + y * y) as f32).sqrt();

    let sum = wave(xf / 7.0 + t)
        + wave(yf / 5.0 - t)
        + wave((x + y) as f32 / 6.0 - t)
        + wave(radius / 4.0 - t);

    // Truncate first, then integer-divide; the sum is never negative.
    ((sum as u32) / 4) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pixel_at_time_zero_is_mid_gray() {
        assert_eq!(synthesize(1, 1, 4, 0.0), vec![127, 127, 127, 127]);
    }

    #[test]
    fn two_by_two_snapshot_at_time_zero() {
        let pixels = synthesize(2, 2, 8, 0.0);
        #[rustfmt::skip]
        let expected = [
            127, 127, 127, 127,   144, 144, 144, 144,
            146, 146, 146, 146,   159, 159, 159, 159,
        ];
        assert_eq!(pixels, expected);
    }

    #[test]
    fn time_is_scaled_by_speed() {
        // Phase 2.0 is reached at host time 0.5 with the default speed.
        assert_eq!(synthesize(1, 1, 4, 0.5), vec![69; 4]);
        assert_eq!(synthesize_with_speed(1, 1, 4, 2.0, 1.0), vec![69; 4]);
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let a = synthesize(37, 23, 37 * 4, 1.25);
        let b = synthesize(37, 23, 37 * 4, 1.25);
        assert_eq!(a, b);
    }

    #[test]
    fn all_channels_are_equal() {
        let pixels = synthesize(16, 9, 16 * 4, 3.7);
        for pixel in pixels.chunks_exact(4) {
            assert!(pixel.iter().all(|&c| c == pixel[0]), "{pixel:?}");
        }
    }

    #[test]
    fn padding_bytes_are_left_alone() {
        let pixels = synthesize(2, 3, 12, 0.3);
        assert_eq!(pixels.len(), 36);
        for row in pixels.chunks(12) {
            assert_eq!(&row[8..], &[0, 0, 0, 0]);
        }
    }

    #[test]
    fn empty_image_is_empty() {
        assert!(synthesize(0, 0, 0, 1.0).is_empty());
        assert_eq!(synthesize(0, 2, 4, 1.0), vec![0; 8]);
    }

    #[test]
    #[should_panic(expected = "row stride")]
    fn short_stride_panics() {
        let _ = synthesize(4, 1, 8, 0.0);
    }
}
