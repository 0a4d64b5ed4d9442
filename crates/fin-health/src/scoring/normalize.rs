//! Map raw metrics onto bounded 0-100 scores. Every normalizer clamps before it
//! rounds, so the aggregate only ever sees integers in range.

use super::benchmarks::{DtiPolicy, GrowthOpportunityPolicy, ImprovementWeights};

pub const MAX_SCORE: u8 = 100;

/// Clamp into [0, 100] and round half away from zero.
pub fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}

/// Linear ramp from 100 at 0% DTI down to the policy floor, flat afterwards.
pub fn dti_score(dti: Option<f64>, policy: &DtiPolicy) -> u8 {
    let floor = policy.floor_score.clamp(0.0, 100.0);
    let Some(dti) = dti else {
        return to_score(floor);
    };
    let max_penalty = 100.0 - floor;
    if policy.floor_ratio_pct <= 0.0 {
        return if dti > 0.0 { to_score(floor) } else { MAX_SCORE };
    }
    let slope = max_penalty / policy.floor_ratio_pct;
    to_score(100.0 - (dti * slope).min(max_penalty))
}

/// Linear ramp from 0% savings to the target rate.
pub fn savings_score(savings_rate: f64, target_pct: f64) -> u8 {
    if target_pct <= 0.0 {
        return MAX_SCORE;
    }
    to_score(savings_rate / target_pct * 100.0)
}

pub fn emergency_fund_score(coverage_months: f64, target_months: f64) -> u8 {
    if target_months <= 0.0 {
        return MAX_SCORE;
    }
    to_score(coverage_months / target_months * 100.0)
}

/// Caps readiness at 100; the uncapped percentage stays on the raw metrics.
pub fn retirement_score(readiness_pct: f64) -> u8 {
    to_score(readiness_pct)
}

/// Unused investing capacity. Zero means the age benchmark is already met, so a
/// high score is a prompt for action rather than a sign of health.
pub fn growth_opportunity_score(
    invested_assets: f64,
    investment_target: f64,
    annual_income: f64,
    policy: &GrowthOpportunityPolicy,
) -> u8 {
    if investment_target <= 0.0 || invested_assets >= investment_target {
        return 0;
    }

    let shortfall = 1.0 - invested_assets / investment_target;
    let step = policy
        .shortfall_steps
        .iter()
        .find(|(min_shortfall, _)| shortfall >= *min_shortfall)
        .map(|(_, score)| *score)
        .unwrap_or(0);

    let capped = if annual_income < policy.low_income_threshold {
        step.min(policy.low_income_cap)
    } else {
        step
    };
    capped.min(MAX_SCORE)
}

/// Weighted headroom across the three most actionable scores.
pub fn weighted_improvement_score(
    emergency_fund: u8,
    savings: u8,
    dti: u8,
    weights: &ImprovementWeights,
) -> u8 {
    let gap = |score: u8| f64::from(MAX_SCORE - score.min(MAX_SCORE));
    to_score(
        weights.emergency_fund * gap(emergency_fund)
            + weights.savings * gap(savings)
            + weights.dti * gap(dti),
    )
}

/// Legacy improvement potential: whatever the overall score leaves on the table.
pub fn complement_improvement_score(overall: u8) -> u8 {
    MAX_SCORE - overall.min(MAX_SCORE)
}
