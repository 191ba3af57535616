//! Cross-module behavior of the planar kernels.

use planar_kernels::{
    add, bilinear_resize, box_filter, colorize_sobel, convolve, gaussian_filter, hsv_to_rgb,
    l1_normalize, nearest_resize, rgb_to_gray, rgb_to_hsv, sobel, sub, Error, FilterKind, Image,
    ResizeMethod,
};

/// Deterministic pseudo-random image in [0, 1).
fn noise(width: usize, height: usize, channels: usize, seed: u32) -> Image {
    Image::from_fn(width, height, channels, |x, y, c| {
        let mut h = seed
            .wrapping_add((x as u32).wrapping_mul(374_761_393))
            .wrapping_add((y as u32).wrapping_mul(668_265_263))
            .wrapping_add((c as u32).wrapping_mul(2_246_822_519));
        h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
        h ^= h >> 16;
        (h % 1000) as f32 / 1000.0
    })
    .unwrap()
}

// ============================================================================
// Buffer Properties
// ============================================================================

#[test]
fn test_clamped_reads_on_every_row_and_channel() {
    let img = noise(5, 4, 3, 1);
    for c in 0..3 {
        for y in 0..4 {
            assert_eq!(img.get_pixel(-1, y, c), img.get_pixel(0, y, c));
            assert_eq!(img.get_pixel(5, y, c), img.get_pixel(4, y, c));
        }
    }
}

#[test]
fn test_out_of_bounds_writes_leave_buffer_unchanged() {
    let mut img = noise(4, 4, 2, 2);
    let before = img.clone();
    for y in -1..5 {
        for c in 0..2 {
            img.set_pixel(-1, y, c, 9.0).unwrap();
            img.set_pixel(4, y, c, 9.0).unwrap();
        }
    }
    assert_eq!(img, before);
}

#[test]
fn test_bad_channel_is_an_index_error() {
    let img = noise(2, 2, 1, 3);
    assert_eq!(
        img.get_pixel(0, 0, 1),
        Err(Error::ChannelOutOfRange {
            channel: 1,
            channels: 1
        })
    );
}

// ============================================================================
// Color Properties
// ============================================================================

#[test]
fn test_hsv_roundtrip_on_noise() {
    let original = noise(16, 16, 3, 4);
    let mut img = original.clone();
    rgb_to_hsv(&mut img).unwrap();
    assert!(img.values().all(|v| (0.0..=1.0).contains(&v)));
    hsv_to_rgb(&mut img).unwrap();
    for (a, b) in original.values().zip(img.values()) {
        assert!((a - b).abs() < 1e-5, "{a} vs {b}");
    }
}

#[test]
fn test_gray_of_gray_rgb_is_identity() {
    let plane = noise(6, 6, 1, 5);
    let rgb = Image::from_fn(6, 6, 3, |x, y, _| {
        plane.get_pixel(x as isize, y as isize, 0).unwrap()
    })
    .unwrap();
    let gray = rgb_to_gray(&rgb).unwrap();
    for (a, b) in plane.values().zip(gray.values()) {
        assert!((a - b).abs() < 1e-6);
    }
}

// ============================================================================
// Convolution Properties
// ============================================================================

#[test]
fn test_l1_normalize_sums_to_one() {
    for seed in 0..5 {
        let mut img = noise(7, 3, 2, seed);
        l1_normalize(&mut img);
        let sum: f32 = img.values().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_constant_box_scenario() {
    let img = Image::filled(4, 4, 1, 2.0).unwrap();
    let filter = box_filter(3).unwrap();
    for preserve in [false, true] {
        let out = convolve(&img, &filter, preserve).unwrap();
        assert!(out.values().all(|v| (v - 2.0).abs() < 1e-5));
    }
}

#[test]
fn test_preserve_vs_sum() {
    let img = noise(6, 5, 3, 6);
    let filter = box_filter(3).unwrap();
    let preserved = convolve(&img, &filter, true).unwrap();
    let summed = convolve(&img, &filter, false).unwrap();

    for c in 0..3 {
        let plane = Image::from_fn(6, 5, 1, |x, y, _| {
            img.get_pixel(x as isize, y as isize, c).unwrap()
        })
        .unwrap();
        let single = convolve(&plane, &filter, true).unwrap();
        assert_eq!(preserved.channel(c).unwrap(), single.channel(0).unwrap());
    }

    let channel_sum = &preserved.channel(0).unwrap()
        + &preserved.channel(1).unwrap()
        + &preserved.channel(2).unwrap();
    for (a, b) in channel_sum.iter().zip(summed.values()) {
        assert!((a - b).abs() < 1e-5);
    }
}

#[test]
fn test_gaussian_blur_preserves_mean_of_constant() {
    let img = Image::filled(9, 9, 3, 0.25).unwrap();
    let filter = gaussian_filter(1.0).unwrap();
    assert_eq!(filter.shape(), (7, 7, 1));
    let out = convolve(&img, &filter, true).unwrap();
    assert!(out.values().all(|v| (v - 0.25).abs() < 1e-5));
}

#[test]
fn test_unsharp_detail() {
    let gaussian = FilterKind::Gaussian { sigma: 1.0 }.build().unwrap();
    let detail = |img: &Image| sub(img, &convolve(img, &gaussian, true).unwrap()).unwrap();

    // No detail on a constant image.
    let flat = Image::filled(8, 8, 2, 0.6).unwrap();
    assert!(detail(&flat).values().all(|v| v.abs() < 1e-5));

    // Detail is the response to (identity - gaussian).
    let mut residual_filter = Image::new(7, 7, 1).unwrap();
    residual_filter.set_pixel(3, 3, 0, 1.0).unwrap();
    let residual_filter = sub(&residual_filter, &gaussian).unwrap();

    let img = noise(8, 8, 1, 7);
    let expected = convolve(&img, &residual_filter, true).unwrap();
    let got = detail(&img);
    assert!(got.values().any(|v| v.abs() > 1e-3));
    for (a, b) in got.values().zip(expected.values()) {
        assert!((a - b).abs() < 1e-5);
    }

    // Adding the detail back sharpens: (2 * identity - gaussian).
    let sharpened = add(&img, &got).unwrap();
    let mut sharpen_filter = residual_filter.clone();
    sharpen_filter.set_pixel(3, 3, 0, 2.0 - gaussian.get_pixel(3, 3, 0).unwrap()).unwrap();
    let expected = convolve(&img, &sharpen_filter, true).unwrap();
    for (a, b) in sharpened.values().zip(expected.values()) {
        assert!((a - b).abs() < 1e-5);
    }
}

// ============================================================================
// Edge Properties
// ============================================================================

#[test]
fn test_sobel_flat_scenario() {
    let img = Image::filled(5, 7, 3, 0.8).unwrap();
    let grad = sobel(&img).unwrap();
    assert!(grad.magnitude.values().all(|v| v == 0.0));
}

#[test]
fn test_colorize_is_clamped_rgb() {
    let out = colorize_sobel(&noise(10, 10, 3, 8)).unwrap();
    assert_eq!(out.shape(), (10, 10, 3));
    assert!(out.values().all(|v| (0.0..=1.0).contains(&v)));
}

// ============================================================================
// Resampling Properties
// ============================================================================

#[test]
fn test_resize_identity() {
    let img = noise(9, 7, 3, 9);
    assert_eq!(nearest_resize(&img, 9, 7).unwrap(), img);
    assert_eq!(bilinear_resize(&img, 9, 7).unwrap(), img);
}

#[test]
fn test_resize_shapes() {
    let img = noise(9, 7, 2, 10);
    for method in [ResizeMethod::Nearest, ResizeMethod::Bilinear] {
        let out = planar_kernels::resize(&img, 20, 3, method).unwrap();
        assert_eq!(out.shape(), (20, 3, 2));
    }
}

#[test]
fn test_bilinear_stays_within_source_range() {
    let img = noise(6, 6, 1, 11);
    let (lo, hi) = img
        .values()
        .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let out = bilinear_resize(&img, 17, 13).unwrap();
    assert!(out.values().all(|v| v >= lo - 1e-6 && v <= hi + 1e-6));
}
