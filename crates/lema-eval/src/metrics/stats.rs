//! Sample statistics used to aggregate per-example scores
//!
//! Matches lm-evaluation-harness: standard errors use the n-1 sample
//! variance, and groups of tasks pool their variances weighted by size.

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation; undefined below two values
pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mu = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - mu).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Standard error of the mean
pub fn mean_stderr(values: &[f64]) -> Option<f64> {
    sample_stddev(values).map(|sd| sd / (values.len() as f64).sqrt())
}

/// Mean of `values` weighted by `sizes`
pub fn weighted_mean(values: &[f64], sizes: &[usize]) -> f64 {
    debug_assert_eq!(values.len(), sizes.len());
    let total: usize = sizes.iter().sum();
    if total == 0 {
        return 0.0;
    }
    values
        .iter()
        .zip(sizes)
        .map(|(value, &size)| value * size as f64)
        .sum::<f64>()
        / total as f64
}

/// Standard error of a group mean from per-task standard errors and sizes
///
/// Pooled sample variance `sum((n_i - 1) * se_i^2 * n_i) / (N - k)`, then
/// `sqrt(pooled / N)`, over `N` total instances in `k` tasks. Undefined when
/// `N <= k`.
pub fn pooled_sample_stderr(stderrs: &[f64], sizes: &[usize]) -> Option<f64> {
    debug_assert_eq!(stderrs.len(), sizes.len());
    let total: usize = sizes.iter().sum();
    if total <= sizes.len() {
        return None;
    }
    let pooled_variance = stderrs
        .iter()
        .zip(sizes)
        .map(|(se, &size)| (size as f64 - 1.0) * se.powi(2) * size as f64)
        .sum::<f64>()
        / (total - sizes.len()) as f64;
    Some((pooled_variance / total as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 0.0, 0.0, 1.0]), 0.5);
    }

    #[test]
    fn test_sample_stddev() {
        assert_eq!(sample_stddev(&[1.0]), None);
        // var = (4 * 0.25) / 3
        let sd = sample_stddev(&[1.0, 0.0, 0.0, 1.0]).unwrap();
        assert!(close(sd, (1.0f64 / 3.0).sqrt()));
    }

    #[test]
    fn test_mean_stderr() {
        let se = mean_stderr(&[1.0, 0.0, 0.0, 1.0]).unwrap();
        assert!(close(se, (1.0f64 / 12.0).sqrt()));
        assert_eq!(mean_stderr(&[]), None);
    }

    #[test]
    fn test_weighted_mean() {
        assert!(close(weighted_mean(&[0.5, 1.0], &[4, 2]), 4.0 / 6.0));
        assert_eq!(weighted_mean(&[], &[]), 0.0);
    }

    #[test]
    fn test_pooled_single_task_is_identity() {
        let se = mean_stderr(&[1.0, 0.0, 1.0, 1.0, 0.0]).unwrap();
        let pooled = pooled_sample_stderr(&[se], &[5]).unwrap();
        assert!(close(pooled, se));
    }

    #[test]
    fn test_pooled_two_tasks() {
        let a = [1.0, 0.0, 1.0, 0.0];
        let b = [0.0, 1.0, 0.0, 1.0];
        let pooled = pooled_sample_stderr(
            &[mean_stderr(&a).unwrap(), mean_stderr(&b).unwrap()],
            &[4, 4],
        )
        .unwrap();
        // pooled variance = (3 * 1/3 + 3 * 1/3) / 6, over N = 8
        assert!(close(pooled, (1.0f64 / 3.0 / 8.0).sqrt()));
    }

    #[test]
    fn test_pooled_undefined_for_singletons() {
        assert_eq!(pooled_sample_stderr(&[0.0, 0.0], &[1, 1]), None);
    }
}
