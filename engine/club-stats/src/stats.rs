//! Small numeric helpers shared by the player rates and the report

/// Sum of the present cells
pub fn sum_present(cells: &[Option<u32>]) -> u32 {
    cells.iter().flatten().sum()
}

/// Mean of the present cells, or `None` when every cell is absent
pub fn mean_present(cells: &[Option<u32>]) -> Option<f64> {
    let present: Vec<u32> = cells.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    let total: f64 = present.iter().map(|v| f64::from(*v)).sum();
    Some(total / present.len() as f64)
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// `numerator / denominator` with the denominator floored at 1
///
/// A zero (or negative) denominator yields `numerator / 1`; with no games
/// played both sides are zero and the ratio is 0.
pub fn guarded_ratio(numerator: i64, denominator: i64) -> f64 {
    numerator as f64 / denominator.max(1) as f64
}
