//! Statistical helpers shared by the estimators and the DSP provider
//!
//! Every function returns a finite value for empty input instead of NaN.

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(data: &[f32]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().map(|&x| x as f64).sum::<f64>() / data.len() as f64
}

/// Arithmetic mean of `f64` values, 0.0 for an empty slice
pub fn mean_f64(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation, 0.0 for an empty slice
pub fn std_dev(data: &[f32]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    let variance = data
        .iter()
        .map(|&x| {
            let d = x as f64 - m;
            d * d
        })
        .sum::<f64>()
        / data.len() as f64;
    variance.sqrt()
}

/// Population standard deviation of `f64` values
pub fn std_dev_f64(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean_f64(data);
    let variance = data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64;
    variance.sqrt()
}

/// First differences `data[i + 1] - data[i]`
pub fn diff(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Root mean square of one frame
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Fraction of adjacent sample pairs whose sign differs, relative to the frame length
pub fn zero_crossing_rate(samples: &[f32]) -> f32 {
    if samples.len() < 2 {
        return 0.0;
    }
    let crossings = samples
        .windows(2)
        .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
        .count();
    crossings as f32 / samples.len() as f32
}

/// Centred moving average; the window shrinks at the edges
pub fn moving_average(data: &[f32], window_size: usize) -> Vec<f32> {
    if data.len() < window_size || window_size <= 1 {
        return data.to_vec();
    }
    let half = window_size / 2;
    (0..data.len())
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(data.len());
            data[start..end].iter().sum::<f32>() / (end - start) as f32
        })
        .collect()
}

/// Indices of strict local maxima above `threshold`, at least `min_distance` apart.
/// When two peaks are too close the earlier one is kept.
pub fn find_peaks(signal: &[f32], threshold: f32, min_distance: usize) -> Vec<usize> {
    let mut peaks: Vec<usize> = Vec::new();
    for i in 1..signal.len().saturating_sub(1) {
        let v = signal[i];
        if v > threshold && v > signal[i - 1] && v >= signal[i + 1] {
            if let Some(&last) = peaks.last() {
                if i - last < min_distance {
                    continue;
                }
            }
            peaks.push(i);
        }
    }
    peaks
}

/// Index of the first maximum; `None` for an empty slice
pub fn argmax(data: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in data.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let data = [2.0f32, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&data) - 5.0).abs() < 1e-12);
        assert!((std_dev(&data) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_inputs_are_finite() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(mean_f64(&[]), 0.0);
        assert_eq!(std_dev_f64(&[]), 0.0);
        assert_eq!(rms(&[]), 0.0);
        assert!(diff(&[]).is_empty());
        assert!(diff(&[1.0]).is_empty());
    }

    #[test]
    fn test_diff_and_std() {
        let d = diff(&[1.0, 2.0, 4.0]);
        assert_eq!(d, vec![1.0, 2.0]);
        assert!((std_dev_f64(&d) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rms() {
        let samples = vec![1.0, -1.0, 1.0, -1.0];
        assert!((rms(&samples) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_crossing_rate() {
        let alternating = [1.0f32, -1.0, 1.0, -1.0];
        assert!((zero_crossing_rate(&alternating) - 0.75).abs() < 1e-6);
        assert_eq!(zero_crossing_rate(&[0.5, 0.5, 0.5]), 0.0);
    }

    #[test]
    fn test_find_peaks_respects_distance() {
        let signal = [0.0f32, 1.0, 0.0, 0.9, 0.0, 0.0, 0.0, 0.8, 0.0];
        assert_eq!(find_peaks(&signal, 0.5, 3), vec![1, 7]);
        assert_eq!(find_peaks(&signal, 0.5, 1), vec![1, 3, 7]);
    }

    #[test]
    fn test_argmax_first_wins() {
        assert_eq!(argmax(&[0.1, 0.5, 0.5, 0.2]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_moving_average_keeps_length() {
        let smoothed = moving_average(&[0.0, 3.0, 0.0, 3.0, 0.0], 3);
        assert_eq!(smoothed.len(), 5);
        assert!((smoothed[0] - 1.5).abs() < 1e-6);
        assert!((smoothed[2] - 2.0).abs() < 1e-6);
    }
}
