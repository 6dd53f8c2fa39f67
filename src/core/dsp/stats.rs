//! Statistical helpers shared by the analyzers

/// Arithmetic mean
pub fn mean(data: &[f32]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f32>() / data.len() as f32
}

/// Population variance
pub fn variance(data: &[f32]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|&v| (v - m) * (v - m)).sum::<f32>() / data.len() as f32
}

/// Population standard deviation
pub fn stddev(data: &[f32]) -> f32 {
    variance(data).sqrt()
}

/// Compute median of a slice
pub fn median(data: &mut [f32]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }

    data.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = data.len() / 2;
    if data.len() % 2 == 0 {
        (data[mid - 1] + data[mid]) / 2.0
    } else {
        data[mid]
    }
}

/// Median absolute deviation, a robust noise estimator
pub fn median_abs_deviation(data: &[f32]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }

    let mut values = data.to_vec();
    let med = median(&mut values);

    let mut deviations: Vec<f32> = data.iter().map(|&v| (v - med).abs()).collect();
    median(&mut deviations)
}

/// Clamp a score to the [0, 1] range every pipeline value must obey
#[inline]
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Shannon entropy of an 8-bit histogram, in bits
pub fn histogram_entropy(histogram: &[u32; 256]) -> f32 {
    let total: u32 = histogram.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let total = total as f32;
    histogram
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f32 / total;
            -p * p.log2()
        })
        .sum()
}
