/// Root mean square error between a true signal and its prediction.
/// Only the overlapping prefix of both sequences is compared.
/// Returns 0 for empty input.
pub fn rmse(signal: &[f64], prediction: &[f64]) -> f64 {
    let n = signal.len().min(prediction.len());
    if n == 0 {
        return 0.0;
    }
    let sse: f64 = signal
        .iter()
        .zip(prediction)
        .map(|(s, p)| (s - p).powi(2))
        .sum();

    (sse / n as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rmse_of_identical_series_is_zero() {
        assert_eq!(rmse(&[0.1, 0.2, 0.3], &[0.1, 0.2, 0.3]), 0.0);
    }

    #[test]
    fn rmse_constant_offset() {
        let err = rmse(&[1.0, 2.0, 3.0, 4.0], &[1.5, 2.5, 3.5, 4.5]);
        assert!((err - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rmse_empty() {
        assert_eq!(rmse(&[], &[]), 0.0);
    }
}
