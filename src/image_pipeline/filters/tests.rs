use std::rc::Rc;

use approx::assert_abs_diff_eq;

use crate::image_pipeline::common::error::{FilterError, ImageError};
use crate::image_pipeline::filters::*;
use crate::image_pipeline::model::{Image, Pixel};

const EPS: f64 = 1e-9;

/// Deterministic pseudo-random image.
fn noise(height: usize, width: usize, seed: u32) -> Image {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 24) as u8
    };
    let rows = (0..height)
        .map(|_| (0..width).map(|_| Pixel::from_u8(next(), next(), next())).collect())
        .collect();
    Image::from_rows(rows).unwrap()
}

fn assert_images_close(actual: &Image, expected: &Image) {
    assert_eq!(actual.height(), expected.height());
    assert_eq!(actual.width(), expected.width());
    for (a_row, e_row) in actual.rows().zip(expected.rows()) {
        for (a, e) in a_row.iter().zip(e_row) {
            assert_abs_diff_eq!(a.red, e.red, epsilon = EPS);
            assert_abs_diff_eq!(a.green, e.green, epsilon = EPS);
            assert_abs_diff_eq!(a.blue, e.blue, epsilon = EPS);
        }
    }
}

fn is_prohibited(err: &ImageError, expected_argument: &str) -> bool {
    matches!(
        err,
        ImageError::Filter(FilterError::ProhibitedValue { argument, .. }) if *argument == expected_argument
    )
}

/// Convolution computed from a read-only copy of the input.
fn convolve_reference(image: &Image, matrix: Matrix<i8>) -> Image {
    let source = image.clone();
    let mut out = image.clone();
    let (h, w) = (image.height() as isize, image.width() as isize);
    for x in 0..h {
        for y in 0..w {
            let mut pixel = Pixel::default();
            for i in 0..3isize {
                for j in 0..3isize {
                    let nx = (x + i - 1).clamp(0, h - 1) as usize;
                    let ny = (y + j - 1).clamp(0, w - 1) as usize;
                    pixel += *source.at(nx, ny).unwrap() * matrix[i as usize][j as usize];
                }
            }
            *out.at_mut(x as usize, y as usize).unwrap() = pixel.clamped();
        }
    }
    out
}

/// Separable blur computed from read-only copies of each pass input.
fn blur_reference(image: &Image, sigma: f64) -> Image {
    let filter = GaussianFilter::new(sigma);
    let (h, w) = (image.height(), image.width());

    let pass = |source: &Image, len: usize, pos: &dyn Fn(usize, usize) -> (usize, usize), lines: usize| {
        let radius = filter.radius(len) as isize;
        let kernel = filter.kernel(radius as usize);
        let mut out = source.clone();
        for line in 0..lines {
            for y in 0..len as isize {
                let mut pixel = Pixel::default();
                let mut sum = 0.0;
                for k in -radius..=radius {
                    let j = y + k;
                    if j < 0 || j >= len as isize {
                        continue;
                    }
                    let (r, c) = pos(line, j as usize);
                    let weight = kernel[(k + radius) as usize];
                    pixel += *source.at(r, c).unwrap() * weight;
                    sum += weight;
                }
                let (r, c) = pos(line, y as usize);
                *out.at_mut(r, c).unwrap() = pixel / sum;
            }
        }
        out
    };

    let rows_done = pass(image, w, &|line, y| (line, y), h);
    pass(&rows_done, h, &|line, x| (x, line), w)
}

#[test]
fn test_grayscale_weights() {
    let mut image = Image::filled(1, 2, Pixel::new(1.0, 0.0, 0.0));
    *image.at_mut(0, 1).unwrap() = Pixel::new(0.2, 0.4, 0.6);
    GrayscaleFilter.apply(&mut image).unwrap();

    let red = image.at(0, 0).unwrap();
    assert_abs_diff_eq!(red.red, 0.299, epsilon = EPS);
    assert_eq!(red.red, red.green);
    assert_eq!(red.red, red.blue);

    let mixed = image.at(0, 1).unwrap();
    assert_abs_diff_eq!(mixed.green, 0.299 * 0.2 + 0.587 * 0.4 + 0.114 * 0.6, epsilon = EPS);
}

#[test]
fn test_grayscale_is_idempotent() {
    let mut once = noise(4, 5, 1);
    GrayscaleFilter.apply(&mut once).unwrap();
    let mut twice = once.clone();
    GrayscaleFilter.apply(&mut twice).unwrap();
    assert_images_close(&twice, &once);
}

#[test]
fn test_negative_inverts_and_restores() {
    let mut image = Image::filled(1, 1, Pixel::new(0.2, 0.4, 1.0));
    NegativeFilter.apply(&mut image).unwrap();
    let pixel = image.at(0, 0).unwrap();
    assert_abs_diff_eq!(pixel.red, 0.8, epsilon = EPS);
    assert_abs_diff_eq!(pixel.green, 0.6, epsilon = EPS);
    assert_abs_diff_eq!(pixel.blue, 0.0, epsilon = EPS);

    let original = noise(3, 3, 2);
    let mut image = original.clone();
    NegativeFilter.apply(&mut image).unwrap();
    NegativeFilter.apply(&mut image).unwrap();
    assert_images_close(&image, &original);
}

#[test]
fn test_threshold() {
    let mut white = Image::filled(2, 2, Pixel::WHITE);
    ThresholdFilter::new(0.5).apply(&mut white).unwrap();
    assert!(white.rows().flatten().all(|p| *p == Pixel::WHITE));

    let mut black = Image::filled(2, 2, Pixel::BLACK);
    ThresholdFilter::new(0.5).apply(&mut black).unwrap();
    assert!(black.rows().flatten().all(|p| *p == Pixel::BLACK));

    // every channel has to exceed the threshold
    let mut mixed = Image::filled(1, 2, Pixel::new(0.9, 0.9, 0.4));
    *mixed.at_mut(0, 1).unwrap() = Pixel::new(0.6, 0.7, 0.51);
    ThresholdFilter::new(0.5).apply(&mut mixed).unwrap();
    assert_eq!(*mixed.at(0, 0).unwrap(), Pixel::BLACK);
    assert_eq!(*mixed.at(0, 1).unwrap(), Pixel::WHITE);
}

#[test]
fn test_crop_rejects_zero_dimensions() {
    for (width, height, argument) in [(0, 5, "<width>"), (5, 0, "<height>"), (0, 0, "<width>")] {
        let mut image = noise(3, 3, 3);
        let err = CropFilter::new(width, height).apply(&mut image).unwrap_err();
        assert!(is_prohibited(&err, argument), "{:?}", err);
        assert_eq!((image.height(), image.width()), (3, 3));
    }

    let mut empty = Image::default();
    assert!(CropFilter::new(0, 1).apply(&mut empty).is_err());
}

#[test]
fn test_crop_keeps_top_left_and_never_enlarges() {
    let original = noise(4, 6, 4);

    let mut image = original.clone();
    CropFilter::new(2, 3).apply(&mut image).unwrap();
    assert_eq!((image.height(), image.width()), (3, 2));
    assert_eq!(image.at(2, 1).unwrap(), original.at(2, 1).unwrap());

    let mut image = original.clone();
    CropFilter::new(100, 2).apply(&mut image).unwrap();
    assert_eq!((image.height(), image.width()), (2, 6));
}

#[test]
fn test_convolution_matches_snapshot_reference() {
    for (h, w, seed) in [(1, 1, 5), (1, 4, 6), (5, 1, 7), (4, 7, 8), (6, 6, 9)] {
        let original = noise(h, w, seed);
        for matrix in [SHARP_MATRIX, EDGE_MATRIX] {
            let mut image = original.clone();
            ConvolutionFilter::new(matrix).apply(&mut image).unwrap();
            assert_images_close(&image, &convolve_reference(&original, matrix));
        }
    }
}

#[test]
fn test_convolution_accepts_real_coefficients() {
    let box_blur = [[1.0 / 9.0; 3]; 3];
    let mut image = Image::filled(3, 3, Pixel::new(0.3, 0.6, 0.9));
    ConvolutionFilter::new(box_blur).apply(&mut image).unwrap();
    assert_images_close(&image, &Image::filled(3, 3, Pixel::new(0.3, 0.6, 0.9)));
}

#[test]
fn test_sharpening_keeps_uniform_image_and_clamps() {
    let mut uniform = Image::filled(3, 4, Pixel::new(0.25, 0.5, 0.75));
    SharpeningFilter::new().apply(&mut uniform).unwrap();
    assert_images_close(&uniform, &Image::filled(3, 4, Pixel::new(0.25, 0.5, 0.75)));

    let mut spot = Image::new(3, 3);
    *spot.at_mut(1, 1).unwrap() = Pixel::WHITE;
    SharpeningFilter::new().apply(&mut spot).unwrap();
    assert_eq!(*spot.at(1, 1).unwrap(), Pixel::WHITE);
    assert_eq!(*spot.at(0, 1).unwrap(), Pixel::BLACK);
}

#[test]
fn test_edge_detection_marks_isolated_spot() {
    let mut image = Image::new(3, 3);
    *image.at_mut(1, 1).unwrap() = Pixel::WHITE;
    EdgeDetectionFilter::new(0.5).apply(&mut image).unwrap();
    for row in 0..3 {
        for col in 0..3 {
            let expected = if (row, col) == (1, 1) { Pixel::WHITE } else { Pixel::BLACK };
            assert_eq!(*image.at(row, col).unwrap(), expected, "({}, {})", row, col);
        }
    }

    let mut uniform = Image::filled(2, 2, Pixel::WHITE);
    EdgeDetectionFilter::new(0.1).apply(&mut uniform).unwrap();
    assert!(uniform.rows().flatten().all(|p| *p == Pixel::BLACK));
}

#[test]
fn test_gaussian_rejects_zero_and_nan_sigma() {
    let mut image = noise(2, 2, 10);
    let err = GaussianFilter::new(0.0).apply(&mut image).unwrap_err();
    assert!(is_prohibited(&err, "<sigma>"));

    let mut empty = Image::default();
    assert!(GaussianFilter::new(-0.0).apply(&mut empty).is_err());
    assert!(GaussianFilter::new(f64::NAN).apply(&mut empty).is_err());
}

#[test]
fn test_gaussian_radius_and_kernel() {
    let filter = GaussianFilter::new(-1.0);
    assert_eq!(filter.sigma(), 1.0);
    assert_eq!(filter.radius(10), 3);
    assert_eq!(GaussianFilter::new(2.75).radius(10), 10);
    assert_eq!(GaussianFilter::new(0.1).radius(10), 1);

    let kernel = filter.kernel(2);
    assert_eq!(kernel.len(), 5);
    assert_abs_diff_eq!(kernel[2], 1.0, epsilon = EPS);
    assert_abs_diff_eq!(kernel[1], (-0.5f64).exp(), epsilon = EPS);
    assert_abs_diff_eq!(kernel[4], (-2.0f64).exp(), epsilon = EPS);
    assert_eq!(kernel[0], kernel[4]);
}

#[test]
fn test_gaussian_keeps_uniform_image() {
    for sigma in [0.3, 1.0, 2.0, 50.0] {
        let color = Pixel::new(0.1, 0.5, 0.9);
        let mut image = Image::filled(5, 7, color);
        GaussianFilter::new(sigma).apply(&mut image).unwrap();
        assert_images_close(&image, &Image::filled(5, 7, color));
    }
}

#[test]
fn test_gaussian_matches_snapshot_reference() {
    for (h, w, sigma) in [(1, 6, 1.0), (6, 1, 0.7), (5, 8, 1.5), (7, 4, 3.0), (3, 3, -0.5)] {
        let original = noise(h, w, 11);
        let mut image = original.clone();
        GaussianFilter::new(sigma).apply(&mut image).unwrap();
        assert_images_close(&image, &blur_reference(&original, sigma));
    }
}

#[test]
fn test_gaussian_smooths_a_spike() {
    let mut image = Image::new(1, 9);
    *image.at_mut(0, 4).unwrap() = Pixel::WHITE;
    GaussianFilter::new(1.0).apply(&mut image).unwrap();

    let centre = image.at(0, 4).unwrap().red;
    let near = image.at(0, 3).unwrap().red;
    let far = image.at(0, 0).unwrap().red;
    assert!(centre < 1.0 && centre > near && near > far);
    assert_eq!(image.at(0, 3).unwrap(), image.at(0, 5).unwrap());
    // outside the radius of 3
    assert_eq!(far, 0.0);
}

#[test]
fn test_dodge_and_burn_formulas() {
    for bg in [0.0, 0.3, 1.0] {
        assert_eq!(dodge(bg, 1.0), 1.0);
        assert_eq!(burn(bg, 0.0), 0.0);
    }
    assert_abs_diff_eq!(dodge(0.5, 0.0), 0.5, epsilon = EPS);
    assert_abs_diff_eq!(dodge(0.3, 0.5), 0.6, epsilon = EPS);
    assert_eq!(dodge(0.6, 0.5), 1.0);
    assert_abs_diff_eq!(burn(0.5, 1.0), 0.5, epsilon = EPS);
    assert_abs_diff_eq!(burn(0.8, 0.5), 0.6, epsilon = EPS);
    assert_eq!(burn(0.2, 0.5), 0.0);
}

#[test]
fn test_blend_ignores_pixels_outside_second_image() {
    let second = Rc::new(Image::filled(1, 2, Pixel::WHITE));
    let mut image = Image::filled(2, 3, Pixel::new(0.4, 0.4, 0.4));
    ColorDodgeFilter::new(Rc::clone(&second)).apply(&mut image).unwrap();

    assert_eq!(*image.at(0, 0).unwrap(), Pixel::WHITE);
    assert_eq!(*image.at(0, 1).unwrap(), Pixel::WHITE);
    assert_eq!(*image.at(0, 2).unwrap(), Pixel::new(0.4, 0.4, 0.4));
    assert_eq!(*image.at(1, 0).unwrap(), Pixel::new(0.4, 0.4, 0.4));

    let black = Rc::new(Image::filled(2, 3, Pixel::BLACK));
    ColorBurnFilter::new(black).apply(&mut image).unwrap();
    assert!(image.rows().flatten().all(|p| *p == Pixel::BLACK));
}

#[test]
fn test_sketch_and_chalk_on_uniform_image() {
    let color = Pixel::new(0.2, 0.5, 0.7);

    let mut sketch = Image::filled(4, 4, color);
    SketchFilter::new(1.0).apply(&mut sketch).unwrap();
    assert_images_close(&sketch, &Image::filled(4, 4, Pixel::WHITE));

    let mut chalk = Image::filled(4, 4, color);
    ChalkFilter::new(1.0).apply(&mut chalk).unwrap();
    assert_images_close(&chalk, &Image::filled(4, 4, Pixel::BLACK));
}

#[test]
fn test_sketch_output_is_grayscale() {
    let mut image = noise(5, 5, 12);
    SketchFilter::new(1.5).apply(&mut image).unwrap();
    for pixel in image.rows().flatten() {
        assert_eq!(pixel.red, pixel.green);
        assert_eq!(pixel.green, pixel.blue);
        assert!((0.0..=1.0).contains(&pixel.red));
    }
}

#[test]
fn test_composite_rejects_zero_sigma_before_touching_image() {
    let original = noise(3, 3, 13);
    let mut image = original.clone();
    let err = ChalkFilter::new(0.0).apply(&mut image).unwrap_err();
    assert!(is_prohibited(&err, "<sigma>"));
    assert_eq!(image, original);
}

#[test]
fn test_empty_queue_is_noop() {
    let original = noise(2, 3, 14);
    let mut image = original.clone();
    let queue = QueueFilter::new();
    assert!(queue.is_empty());
    queue.apply(&mut image).unwrap();
    assert_eq!(image, original);
}

#[test]
fn test_queue_applies_in_order_and_nests() {
    let inner = QueueFilter::new().with(CropFilter::new(1, 1)).with(NegativeFilter);
    let queue = QueueFilter::new().with(inner).with(ThresholdFilter::new(0.5));
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.names().collect::<Vec<_>>(), vec!["QueueFilter", "ThresholdFilter"]);

    let mut image = Image::filled(3, 3, Pixel::new(0.1, 0.2, 0.3));
    queue.apply(&mut image).unwrap();
    assert_eq!((image.height(), image.width()), (1, 1));
    assert_eq!(*image.at(0, 0).unwrap(), Pixel::WHITE);
}

#[test]
fn test_queue_stops_at_first_failure() {
    let filters: Vec<Box<dyn Filter>> = vec![
        Box::new(CropFilter::new(0, 1)),
        Box::new(NegativeFilter),
    ];
    let queue: QueueFilter = filters.into_iter().collect();

    let original = noise(2, 2, 15);
    let mut image = original.clone();
    assert!(queue.apply(&mut image).is_err());
    assert_eq!(image, original);
}

#[test]
fn test_filter_names() {
    let filters: Vec<Box<dyn Filter>> = vec![
        Box::new(GrayscaleFilter),
        Box::new(NegativeFilter),
        Box::new(ThresholdFilter::new(0.1)),
        Box::new(CropFilter::new(1, 1)),
        Box::new(SharpeningFilter::new()),
        Box::new(EdgeDetectionFilter::new(0.1)),
        Box::new(GaussianFilter::new(1.0)),
        Box::new(SketchFilter::new(1.0)),
        Box::new(ChalkFilter::new(1.0)),
    ];
    let names: Vec<&str> = filters.iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        vec![
            "GrayscaleFilter",
            "NegativeFilter",
            "ThresholdFilter",
            "CropFilter",
            "SharpeningFilter",
            "EdgeDetectionFilter",
            "GaussianFilter",
            "SketchFilter",
            "ChalkFilter",
        ]
    );
}
