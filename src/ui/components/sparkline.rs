/// Map closing prices onto `0..=height` so they fit a `Sparkline`, keeping only the last `width` points.
pub fn scale_closes(closes: &[f64], width: usize, height: u64) -> Vec<u64> {
    if closes.is_empty() || width == 0 {
        return Vec::new();
    }

    let start = closes.len().saturating_sub(width);
    let window = &closes[start..];

    let (min, max) = window
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        });

    if !min.is_finite() || !max.is_finite() {
        return vec![0; window.len()];
    }

    let span = max - min;
    window
        .iter()
        .map(|value| {
            if !value.is_finite() {
                0
            } else if span <= f64::EPSILON {
                height / 2
            } else {
                // Keep the lowest close visible as a one-unit bar.
                (((value - min) / span) * (height.saturating_sub(1)) as f64).round() as u64 + 1
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_into_height() {
        let scaled = scale_closes(&[10.0, 15.0, 20.0], 10, 9);
        assert_eq!(scaled, vec![1, 5, 9]);
    }

    #[test]
    fn keeps_trailing_window() {
        let scaled = scale_closes(&[1.0, 2.0, 3.0, 4.0], 2, 3);
        assert_eq!(scaled.len(), 2);
        assert_eq!(scaled, vec![1, 3]);
    }

    #[test]
    fn flat_series_sits_mid_height() {
        assert_eq!(scale_closes(&[5.0, 5.0], 10, 8), vec![4, 4]);
        assert!(scale_closes(&[], 10, 8).is_empty());
    }
}
