//! Tests for mean color and unnormalized error score computation

#[cfg(test)]
mod tests {
    use greedyquads::analysis::statistics::{analyze, error_score, mean_color};
    use ndarray::{Array1, Array3};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const TOLERANCE: f64 = 1e-9;

    fn gray_block(rows: usize, cols: usize, values: &[u8]) -> Array3<u8> {
        Array3::from_shape_fn((rows, cols, 3), |(r, c, _)| {
            values.get(r * cols + c).copied().unwrap_or(0)
        })
    }

    // Tests mean equals exact arithmetic mean per channel
    // Verified by dividing by channel count instead of pixel count
    #[test]
    fn test_mean_color_exact() {
        let mut samples = Array3::<u8>::zeros((2, 2, 3));
        let pixels = [[10, 20, 30], [20, 40, 60], [30, 60, 90], [41, 80, 121]];
        for (i, pixel) in pixels.iter().enumerate() {
            for (c, &value) in pixel.iter().enumerate() {
                samples[(i / 2, i % 2, c)] = value;
            }
        }

        let mean = mean_color(samples.view()).unwrap();
        assert_eq!(mean.len(), 3);
        assert!((mean[0] - 25.25).abs() < TOLERANCE);
        assert!((mean[1] - 50.0).abs() < TOLERANCE);
        assert!((mean[2] - 75.25).abs() < TOLERANCE);
    }

    // Tests mean over random samples matches a naive per-channel average
    // Verified by skipping the last row during accumulation
    #[test]
    fn test_mean_color_matches_naive_average() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = Array3::from_shape_fn((16, 16, 4), |_| rng.random::<u8>());

        let mean = mean_color(samples.view()).unwrap();
        for c in 0..4 {
            let mut sum = 0.0;
            for r in 0..16 {
                for col in 0..16 {
                    sum += f64::from(samples[(r, col, c)]);
                }
            }
            assert!((mean[c] - sum / 256.0).abs() < TOLERANCE);
        }
    }

    // Tests empty blocks have no mean
    // Verified by returning a zero vector for empty input
    #[test]
    fn test_mean_color_empty() {
        let samples = Array3::<u8>::zeros((0, 4, 3));
        assert!(mean_color(samples.view()).is_none());
        assert!(analyze(samples.view()).is_none());
    }

    // Tests the score is a plain sum of squared deviations
    // Verified by dividing the total by pixel count
    #[test]
    fn test_error_score_not_normalized() {
        // Mean 5, each pixel deviates by 5 in three channels
        let pair = gray_block(1, 2, &[0, 10]);
        let (_, pair_score) = analyze(pair.view()).unwrap();
        assert!((pair_score - 150.0).abs() < TOLERANCE);

        // Same noise over twice the area doubles the score
        let quad = gray_block(2, 2, &[0, 10, 0, 10]);
        let (_, quad_score) = analyze(quad.view()).unwrap();
        assert!((quad_score - 300.0).abs() < TOLERANCE);
    }

    // Tests alpha never contributes to the score
    // Verified by scoring all four channels
    #[test]
    fn test_error_score_ignores_alpha() {
        let samples = Array3::from_shape_fn((2, 2, 4), |(r, c, ch)| {
            if ch == 3 { (r * 100 + c * 50) as u8 } else { 42 }
        });

        let (mean, score) = analyze(samples.view()).unwrap();
        assert!((mean[3] - 75.0).abs() < TOLERANCE);
        assert!(score.abs() < TOLERANCE);
    }

    // Tests a uniform block scores zero
    // Verified by adding a constant bias to the score
    #[test]
    fn test_error_score_uniform_is_zero() {
        let samples = Array3::from_elem((4, 4, 3), 200u8);
        let mean = mean_color(samples.view()).unwrap();
        assert!(error_score(samples.view(), &mean).abs() < TOLERANCE);
    }

    // Tests scoring against an arbitrary mean
    // Verified by ignoring the provided mean
    #[test]
    fn test_error_score_against_given_mean() {
        let samples = gray_block(1, 1, &[10]);
        let mean = Array1::from(vec![0.0, 10.0, 20.0]);
        assert!((error_score(samples.view(), &mean) - 200.0).abs() < TOLERANCE);
    }

    // Tests identical samples always give identical statistics
    // Verified by introducing iteration-order dependent accumulation
    #[test]
    fn test_analyze_idempotent() {
        let mut rng = StdRng::seed_from_u64(99);
        let samples = Array3::from_shape_fn((8, 8, 3), |_| rng.random::<u8>());

        let (mean_a, score_a) = analyze(samples.view()).unwrap();
        let (mean_b, score_b) = analyze(samples.clone().view()).unwrap();
        assert_eq!(mean_a, mean_b);
        assert_eq!(score_a.to_bits(), score_b.to_bits());
    }
}
