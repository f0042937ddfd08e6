use approx::assert_relative_eq;
use spiralscope::audio::SpectrumAnalyzer;
use spiralscope::params::{AnalyzerConfig, SpiralParams};
use spiralscope::spiral::{build_frame, to_polar, CartesianPoint, SpiralState};

fn spiral_at(sample_rate_hz: u32, width: u32, height: u32) -> SpiralState {
    SpiralState::new(
        SpiralParams::default(),
        &AnalyzerConfig::default(),
        sample_rate_hz,
        width,
        height,
    )
    .unwrap()
}

#[test]
fn max_freq_for_five_octaves_above_110() {
    let params = SpiralParams {
        min_freq_hz: 110.0,
        num_octaves: 5,
        ..Default::default()
    };
    assert_eq!(params.max_freq_hz(), 3520.0);
}

#[test]
fn angle_strictly_increases_across_bin_range() {
    for rate in [44100, 48000, 192000] {
        let spiral = spiral_at(rate, 1280, 720);
        let thetas: Vec<f32> = spiral
            .bins()
            .iter()
            .map(|bin| spiral.theta(spiral.bin_frequency(bin).log2()))
            .collect();

        assert!(thetas.windows(2).all(|w| w[1] > w[0]));
    }
}

#[test]
fn angle_is_linear_in_pitch() {
    let spiral = spiral_at(48000, 1280, 720);
    let slope = |a: f32, b: f32| (spiral.theta(b) - spiral.theta(a)) / (b - a);

    assert_relative_eq!(slope(7.0, 8.0), std::f32::consts::TAU, epsilon = 1e-4);
    assert_relative_eq!(slope(8.0, 11.5), std::f32::consts::TAU, epsilon = 1e-4);
}

#[test]
fn position_spans_zero_to_one_over_bin_range() {
    let spiral = spiral_at(44100, 1280, 720);
    let bins = spiral.bins();

    let first = spiral.position(spiral.bin_frequency(bins.min_bin).log2());
    let last = spiral.position(spiral.bin_frequency(bins.max_bin).log2());

    // Bins are rounded to the nearest frequency, so the ends are only close to 0 and 1
    assert!(first.abs() < 0.01, "first position {}", first);
    assert!((last - 1.0).abs() < 0.01, "last position {}", last);
}

#[test]
fn hue_within_range_for_every_bin() {
    let spiral = spiral_at(44100, 1280, 720);

    // Bin 20 sits just below the lowest frequency, so the first position is negative
    let first = spiral.position(spiral.bin_frequency(spiral.bins().min_bin).log2());
    assert!(first < 0.0);

    for bin in spiral.bins().iter() {
        let position = spiral.position(spiral.bin_frequency(bin).log2());
        let hue = spiral.hue(position);
        assert!((0.0..255.0).contains(&hue), "bin {} hue {}", bin, hue);
    }
}

#[test]
fn silent_analysis_draws_unperturbed_spiral() {
    let config = AnalyzerConfig::default();
    let spiral = spiral_at(44100, 1280, 720);

    let mut analyzer = SpectrumAnalyzer::new(&config);
    let spectrum = analyzer.process(&vec![0.0; config.window_size()]).to_vec();
    assert!(spectrum.iter().all(|&b| b == 0));

    let origin = spiral.viewport().origin;
    let segments = build_frame(&spiral, &spectrum);
    for (segment, bin) in segments.iter().zip(spiral.bins().iter()) {
        let relative = CartesianPoint::new(segment.to.x - origin.x, segment.to.y - origin.y);
        let expected = spiral.base_radius(spiral.bin_frequency(bin).log2());
        assert_relative_eq!(to_polar(relative).r, expected, epsilon = 1e-2);
    }
}

#[test]
fn resize_scales_radii_with_height_and_keeps_angles() {
    let mut spiral = spiral_at(44100, 1280, 720);
    let before = *spiral.viewport();
    let angles_before: Vec<f32> = spiral
        .bins()
        .iter()
        .map(|bin| spiral.theta(spiral.bin_frequency(bin).log2()))
        .collect();

    spiral.resize(1920, 1080);
    let after = *spiral.viewport();

    assert_relative_eq!(after.min_r / before.min_r, 1.5, epsilon = 1e-5);
    assert_relative_eq!(after.max_r / before.max_r, 1.5, epsilon = 1e-5);

    let angles_after: Vec<f32> = spiral
        .bins()
        .iter()
        .map(|bin| spiral.theta(spiral.bin_frequency(bin).log2()))
        .collect();
    assert_eq!(angles_before, angles_after);
}
