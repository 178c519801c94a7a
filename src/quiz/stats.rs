//! Closed-form statistics used by the generators.
//!
//! Convention: sample standard deviation divides by `n - 1`; correlation is
//! computed from population-style moments (all three divide by `n`, which
//! cancels, so `r` is the same value a calculator's LinReg reports).

pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    sum(data) / data.len() as f64
}

fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

pub fn median(data: &[f64]) -> f64 {
    let sorted = sorted(data);
    let mid = sorted.len() / 2;
    match sorted.len() {
        0 => 0.0,
        n if n % 2 == 1 => sorted[mid],
        _ => (sorted[mid - 1] + sorted[mid]) / 2.0,
    }
}

/// Sample standard deviation (Bessel's correction).
pub fn sample_std(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let squares: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    (squares / (data.len() - 1) as f64).sqrt()
}

pub fn range(data: &[f64]) -> f64 {
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    if data.is_empty() {
        0.0
    } else {
        max - min
    }
}

/// Q1 and Q3 as the medians of the lower and upper halves, median excluded
/// for odd counts (the TI-84 1-Var Stats method).
pub fn quartiles(data: &[f64]) -> (f64, f64) {
    let sorted = sorted(data);
    let half = sorted.len() / 2;
    let lower = &sorted[..half];
    let upper = &sorted[sorted.len() - half..];
    (median(lower), median(upper))
}

pub fn iqr(data: &[f64]) -> f64 {
    let (q1, q3) = quartiles(data);
    q3 - q1
}

pub fn factorial(n: u64) -> u64 {
    (2..=n).product()
}

/// nPr as a falling factorial.
pub fn perm(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    (0..k).map(|i| n - i).product()
}

/// nCr via the multiplicative formula, rounded against floating-point drift.
pub fn comb(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result = 1.0_f64;
    for i in 1..=k {
        result = result * (n - i + 1) as f64 / i as f64;
    }
    result.round() as u64
}

pub fn z_score(value: f64, mean: f64, std: f64) -> f64 {
    (value - mean) / std
}

/// Pearson correlation coefficient.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len()) as f64;
    let mean_x = mean(x);
    let mean_y = mean(y);
    let std_x = (x.iter().map(|v| (v - mean_x).powi(2)).sum::<f64>() / n).sqrt();
    let std_y = (y.iter().map(|v| (v - mean_y).powi(2)).sum::<f64>() / n).sqrt();
    let covariance = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum::<f64>()
        / n;
    covariance / (std_x * std_y)
}

/// Least-squares line, returned as `(slope, intercept)`.
pub fn linear_regression(x: &[f64], y: &[f64]) -> (f64, f64) {
    let mean_x = mean(x);
    let mean_y = mean(y);
    let numerator: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();
    let denominator: f64 = x.iter().map(|a| (a - mean_x).powi(2)).sum();
    let slope = numerator / denominator;
    (slope, mean_y - slope * mean_x)
}

pub fn binomial_pmf(n: u64, p: f64, k: u64) -> f64 {
    comb(n, k) as f64 * p.powi(k as i32) * (1.0 - p).powi((n - k.min(n)) as i32)
}

/// Standard normal CDF.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + statrs::function::erf::erf(z / std::f64::consts::SQRT_2))
}

/// Standard error of the sample mean (central limit theorem).
pub fn standard_error(population_std: f64, n: u64) -> f64 {
    population_std / (n as f64).sqrt()
}

/// Percent of a normal population below `mean + k * std` for whole `k`
/// in [-3, 3], using the 68-95-99.7 rule.
pub fn empirical_percentile(k: i32) -> Option<f64> {
    match k {
        -3 => Some(0.15),
        -2 => Some(2.5),
        -1 => Some(16.0),
        0 => Some(50.0),
        1 => Some(84.0),
        2 => Some(97.5),
        3 => Some(99.85),
        _ => None,
    }
}

/// Percent of a normal population within `k` standard deviations of the mean.
pub fn empirical_within(k: u32) -> Option<f64> {
    match k {
        1 => Some(68.0),
        2 => Some(95.0),
        3 => Some(99.7),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sample_std_divides_by_n_minus_one() {
        let data = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(format!("{:.2}", sample_std(&data)), "15.81");
        assert_eq!(sample_std(&[7.0]), 0.0);
    }

    #[test]
    fn mean_median_and_range() {
        let data = [3.0, 9.0, 1.0, 7.0];
        assert!(close(mean(&data), 5.0));
        assert!(close(median(&data), 5.0));
        assert!(close(median(&[4.0, 1.0, 8.0]), 4.0));
        assert!(close(range(&data), 8.0));
    }

    #[test]
    fn quartiles_use_median_of_halves() {
        let odd = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        assert_eq!(quartiles(&odd), (2.0, 6.0));
        let even = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert_eq!(quartiles(&even), (2.5, 6.5));
        assert!(close(iqr(&even), 4.0));
    }

    #[test]
    fn counting_formulas() {
        assert_eq!(comb(10, 3), 120);
        assert_eq!(perm(10, 3), 720);
        assert_eq!(comb(10, 7), 120);
        assert_eq!(comb(30, 15), 155_117_520);
        assert_eq!(comb(4, 5), 0);
        assert_eq!(perm(3, 4), 0);
        assert_eq!(factorial(5), 120);
        assert_eq!(factorial(0), 1);
    }

    #[test]
    fn z_score_of_two() {
        assert_eq!(format!("{:.2}", z_score(120.0, 100.0, 10.0)), "2.00");
    }

    #[test]
    fn regression_recovers_an_exact_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [5.0, 7.0, 9.0, 11.0];
        let (slope, intercept) = linear_regression(&x, &y);
        assert!(close(slope, 2.0));
        assert!(close(intercept, 3.0));
        assert!(close(correlation(&x, &y), 1.0));
        let down = [8.0, 6.0, 4.0, 2.0];
        assert!(close(correlation(&x, &down), -1.0));
    }

    #[test]
    fn binomial_and_normal() {
        assert!(close(binomial_pmf(4, 0.5, 2), 0.375));
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-12);
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-3);
        assert!(close(standard_error(10.0, 25), 2.0));
    }

    #[test]
    fn empirical_rule_tables() {
        assert_eq!(empirical_percentile(1), Some(84.0));
        assert_eq!(empirical_percentile(-2), Some(2.5));
        assert_eq!(empirical_percentile(4), None);
        assert_eq!(empirical_within(2), Some(95.0));
        assert_eq!(empirical_within(0), None);
    }
}
