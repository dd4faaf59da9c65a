use crate::normalize::clamp01;

pub const DEFAULT_Z: f64 = 1.96;

/// Lower bound of the two-sided Wilson score interval.
///
/// Small samples get pulled toward 0.5 and then down, so 2/2 ranks well below 20/20.
pub fn wilson_lower_bound(wins: u32, trials: u32, z: f64) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    let n = trials as f64;
    let p_hat = (wins.min(trials) as f64) / n;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = p_hat + z2 / (2.0 * n);
    let margin = z * ((p_hat * (1.0 - p_hat) + z2 / (4.0 * n)) / n).sqrt();
    clamp01((center - margin) / denom)
}

/// Wins are reconstructed from the rounded share of appearances.
pub fn conservative_win_rate(appearances: u32, win_rate01: f64, z: f64) -> f64 {
    let wins = (appearances as f64 * clamp01(win_rate01)).round() as u32;
    wilson_lower_bound(wins, appearances, z)
}
