pub mod distribution;
pub mod hot_cold;
pub mod streak;
pub mod streets;

/// Pourcentage arrondi à une décimale ; 0.0 quand `total` est nul.
pub fn percentage(count: u32, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}
