use super::normalize::to_score;

/// Rounded arithmetic mean of already-rounded component scores.
///
/// An empty set scores 0.
pub fn overall_health_score(components: &[u8]) -> u8 {
    if components.is_empty() {
        return 0;
    }
    let total: u32 = components.iter().map(|score| u32::from(*score)).sum();
    to_score(f64::from(total) / components.len() as f64)
}
