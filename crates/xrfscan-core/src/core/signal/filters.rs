/// Centered moving-minimum filter.
///
/// Each output sample is the minimum over a window of `size` samples centered on
/// the input sample; windows are truncated at the array boundaries. A `size` of
/// 0 or 1 returns the input unchanged.
pub fn moving_minimum(data: &[f64], size: usize) -> Vec<f64> {
    apply_centered(data, size, |window| {
        window.iter().copied().fold(f64::INFINITY, f64::min)
    })
}

/// Centered moving-average filter with boundary truncation.
///
/// A `size` of 0 or 1 returns the input unchanged.
pub fn moving_average(data: &[f64], size: usize) -> Vec<f64> {
    apply_centered(data, size, |window| {
        window.iter().sum::<f64>() / window.len() as f64
    })
}

fn apply_centered(data: &[f64], size: usize, reduce: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    if size <= 1 || data.is_empty() {
        return data.to_vec();
    }
    let half = (size / 2) as isize;
    (0..data.len())
        .map(|i| {
            let start = i as isize - half;
            let lo = start.max(0) as usize;
            let hi = ((start + size as isize).max(0) as usize).min(data.len());
            reduce(&data[lo..hi])
        })
        .collect()
}
