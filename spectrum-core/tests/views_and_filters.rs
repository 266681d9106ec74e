//! Spectrum views, quadrant swapping and frequency-domain filtering.

use approx::assert_abs_diff_eq;
use std::sync::Arc;

use spectrum_core::filter;
use spectrum_core::fourier2d;
use spectrum_core::views;
use spectrum_core::{
    EngineConfig, FourierEngine, GrayImage, GrayRaster, Palette, PixelFormat, SpectrumError,
    TransformKind,
};

fn gradient(width: usize, height: usize) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| ((x * 37 + y * 11) % 251) as u8)
}

#[test]
fn power_view_is_deterministic() {
    let spectrum = fourier2d::forward(&gradient(16, 16), TransformKind::Fast);
    let first = views::power_spectrum(&spectrum);
    let scale = *spectrum.power_scale();
    let second = views::power_spectrum(&spectrum);
    assert_eq!(first, second);
    assert_eq!(*spectrum.power_scale(), scale);
}

#[test]
fn concurrent_power_views_agree() {
    let spectrum = fourier2d::forward(&gradient(32, 16), TransformKind::Fast);
    let images: Vec<GrayImage> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| views::power_spectrum(&spectrum)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(images.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn constant_image_shows_one_bright_centre_pixel() {
    let image = GrayImage::from_fn(4, 4, |_, _| 100);
    for kind in [TransformKind::Exact, TransformKind::Fast] {
        let spectrum = fourier2d::forward(&image, kind);
        let mut view = views::power_spectrum(&spectrum);
        views::swap_quadrants(&mut view);

        assert_eq!(view.intensity(2, 2), 254, "{kind:?}");
        let bright = view.pixels().iter().filter(|&&p| p == 254).count();
        assert_eq!(bright, 1, "{kind:?}");
        assert!(view.pixels().iter().all(|&p| p >= 1), "{kind:?}");
    }
}

#[test]
fn views_have_spectrum_geometry_and_source_format() {
    let format = PixelFormat {
        depth: 8,
        palette: Arc::new(Palette {
            colors: vec![[1, 2, 3]; 256],
        }),
    };
    let image = GrayImage::from_raw(5, 3, format.clone(), vec![9; 15]).unwrap();
    let spectrum = fourier2d::forward(&image, TransformKind::Fast);

    for view in [views::power_spectrum(&spectrum), views::phase_spectrum(&spectrum)] {
        assert_eq!((view.width(), view.height()), (8, 4));
        assert_eq!(view.format(), &format);
    }
    assert_eq!(fourier2d::inverse(spectrum).format(), &format);
}

#[test]
fn spectrum_swap_is_involution_on_even_shapes() {
    let mut spectrum = fourier2d::forward(&gradient(8, 4), TransformKind::Fast);
    let original = spectrum.coefficients().to_vec();
    let dc = spectrum.get(0, 0);

    spectrum.swap_quadrants();
    assert_eq!(spectrum.get(4, 2), dc);
    spectrum.swap_quadrants();
    assert_eq!(spectrum.coefficients(), original.as_slice());
}

#[test]
fn multiply_then_divide_restores_spectrum() {
    // Impulse on a pedestal: no spectral coefficient is zero.
    let kernel = GrayImage::from_fn(8, 8, |x, y| if (x, y) == (0, 0) { 200 } else { 10 });
    for kind in [TransformKind::Exact, TransformKind::Fast] {
        let filter_spectrum = fourier2d::forward(&kernel, kind);
        let original = fourier2d::forward(&gradient(8, 8), kind);

        let mut filtered = original.clone();
        filter::multiply(&mut filtered, &filter_spectrum).unwrap();
        filter::divide(&mut filtered, &filter_spectrum).unwrap();

        let peak = original.get(0, 0).norm();
        for (a, b) in filtered.coefficients().iter().zip(original.coefficients()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-9 * peak);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-9 * peak);
        }
    }
}

#[test]
fn filtering_spectra_of_different_shape_fails() {
    let mut a = fourier2d::forward(&gradient(8, 8), TransformKind::Fast);
    let b = fourier2d::forward(&gradient(4, 8), TransformKind::Fast);
    assert_eq!(
        filter::divide(&mut a, &b),
        Err(SpectrumError::DimensionMismatch {
            left: (8, 8),
            right: (4, 8)
        })
    );
}

#[test]
fn blur_keeps_constant_images_constant() {
    let image = GrayImage::from_fn(16, 16, |_, _| 123);
    for kind in [TransformKind::Exact, TransformKind::Fast] {
        let blurred = filter::blur(&image, kind, filter::DEFAULT_BOX_RATIO).unwrap();
        assert_eq!(blurred, image, "{kind:?}");
    }
}

/// Direct box convolution over a `period` that repeats `image` with zero
/// padding, using the same box placement as [`filter::box_filter`].
fn box_convolution(image: &GrayImage, size: usize, period: (usize, usize)) -> GrayImage {
    let (period_x, period_y) = period;
    let half = size as isize / 2;
    let offsets = -half..size as isize - half;
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let mut sum = 0.0;
        for dy in offsets.clone() {
            for dx in offsets.clone() {
                let sx = (x as isize - dx).rem_euclid(period_x as isize) as usize;
                let sy = (y as isize - dy).rem_euclid(period_y as isize) as usize;
                if sx < image.width() && sy < image.height() {
                    sum += image.intensity(sx, sy) as f64;
                }
            }
        }
        (sum / (size * size) as f64).round() as u8
    })
}

fn assert_close(actual: &GrayImage, expected: &GrayImage, context: &str) {
    assert_eq!(actual.width(), expected.width(), "{context}");
    assert_eq!(actual.height(), expected.height(), "{context}");
    for (i, (a, e)) in actual.pixels().iter().zip(expected.pixels()).enumerate() {
        assert!(a.abs_diff(*e) <= 1, "{context}: pixel {i} is {a}, expected {e}");
    }
}

#[test]
fn padded_blur_matches_direct_convolution() {
    let constant = GrayImage::from_fn(12, 12, |_, _| 123);
    let blurred = filter::blur(&constant, TransformKind::Fast, filter::DEFAULT_BOX_RATIO).unwrap();
    assert_close(&blurred, &box_convolution(&constant, 3, (16, 16)), "12x12 constant");

    // Away from the padded border a constant stays constant.
    for y in 1..11 {
        for x in 1..11 {
            assert_eq!(blurred.intensity(x, y), 123, "({x}, {y})");
        }
    }
    assert!(blurred.pixels().iter().all(|&p| p > 0));

    let ramp = gradient(10, 6);
    let blurred = filter::blur(&ramp, TransformKind::Fast, 2.0).unwrap();
    assert_close(&blurred, &box_convolution(&ramp, 3, (16, 8)), "10x6 gradient");
}

#[test]
fn exact_blur_is_circular_on_any_size() {
    for (width, height) in [(12, 12), (10, 6), (9, 7)] {
        let image = gradient(width, height);
        let blurred = filter::blur(&image, TransformKind::Exact, 2.0).unwrap();
        let size = filter::box_size(width, height, 2.0);
        let expected = box_convolution(&image, size, (width, height));
        assert_close(&blurred, &expected, &format!("{width}x{height}"));
    }

    let constant = GrayImage::from_fn(12, 12, |_, _| 123);
    let blurred = filter::blur(&constant, TransformKind::Exact, filter::DEFAULT_BOX_RATIO).unwrap();
    assert_eq!(blurred, constant);
}

#[test]
fn engine_runs_the_inverse_filtering_pipeline() {
    let engine = FourierEngine::new(EngineConfig {
        transform: TransformKind::Exact,
        threads: Some(2),
        box_filter_ratio: 5.0,
    })
    .unwrap();
    let image = gradient(16, 16);

    let blurred = engine.blur(&image).unwrap();
    assert_ne!(blurred, image);

    let restored = engine.inverse_filter(&image).unwrap();
    for (a, e) in restored.pixels().iter().zip(image.pixels()) {
        assert!(a.abs_diff(*e) <= 1);
    }
}

#[test]
fn engine_views_match_free_functions() {
    let engine = FourierEngine::default();
    let image = gradient(8, 8);
    let spectrum = engine.forward(&image);

    assert_eq!(engine.power_spectrum(&spectrum), views::power_spectrum(&spectrum));
    assert_eq!(engine.phase_spectrum(&spectrum), views::phase_spectrum(&spectrum));

    let mut centred = views::phase_spectrum(&spectrum);
    views::swap_quadrants(&mut centred);
    assert_eq!(engine.centered_phase_spectrum(&spectrum), centred);
}
