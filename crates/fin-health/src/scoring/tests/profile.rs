use super::common::*;
use crate::scoring::domain::{BudgetAllocation, ImprovementBasis, ScoringVariant};
use crate::scoring::{
    calculate_complete_financial_profile, calculate_financial_scores, Benchmarks,
    FinancialScoringEngine,
};

#[test]
fn young_saver_scores_match_reference_scenario() {
    let scores = calculate_financial_scores(&young_saver());

    assert_eq!(scores.dti_score, 33);
    assert_eq!(scores.savings_score, 100);
    assert_eq!(scores.emergency_fund_score, 100);
    assert_eq!(scores.retirement_score, 100);
    assert_eq!(scores.growth_opportunity_score, 0);
    assert_eq!(scores.overall_financial_health_score, 67);
    assert_eq!(scores.potential_for_improvement_score, 27);
    assert_eq!(scores.improvement_basis, ImprovementBasis::WeightedShortfall);
    assert!(scores.credit_health_score.is_none());
}

#[test]
fn debt_free_submission_scores_full_dti() {
    let mut input = young_saver();
    input.expenses_assets.total_debt = 0.0;

    let scores = calculate_financial_scores(&input);

    assert_eq!(scores.dti_score, 100);
}

#[test]
fn partial_emergency_fund_scores_proportionally() {
    let mut input = young_saver();
    input.expenses_assets.emergency_funds = 10_000.0;
    input.expenses_assets.monthly_expenses = 2_500.0;

    let scores = calculate_financial_scores(&input);

    assert_eq!(scores.emergency_fund_score, 67);
}

#[test]
fn empty_emergency_fund_scores_zero() {
    let mut input = young_saver();
    input.expenses_assets.emergency_funds = 0.0;

    let profile = calculate_complete_financial_profile(&input);

    assert_eq!(profile.metrics.emergency_fund_months, 0.0);
    assert_eq!(profile.scores.emergency_fund_score, 0);
}

#[test]
fn stretched_household_flags_growth_and_improvement() {
    let scores = calculate_financial_scores(&stretched_household());

    assert_eq!(scores.dti_score, 20);
    assert_eq!(scores.savings_score, 33);
    assert_eq!(scores.emergency_fund_score, 8);
    assert_eq!(scores.retirement_score, 16);
    assert_eq!(scores.growth_opportunity_score, 100);
    assert_eq!(scores.overall_financial_health_score, 35);
    assert_eq!(scores.potential_for_improvement_score, 80);
}

#[test]
fn readiness_stays_uncapped_on_metrics() {
    let profile = calculate_complete_financial_profile(&young_saver());

    assert!(profile.metrics.retirement_readiness > 100.0);
    assert_eq!(profile.scores.retirement_score, 100);
    assert_eq!(profile.metrics.years_to_retirement, 32);
}

#[test]
fn inflation_adjustment_lowers_readiness() {
    let mut input = stretched_household();
    let baseline = calculate_complete_financial_profile(&input);
    input.retirement_planning.adjust_for_inflation = true;

    let adjusted = calculate_complete_financial_profile(&input);

    assert!(adjusted.metrics.retirement_readiness < baseline.metrics.retirement_readiness);
    assert!(adjusted.scores.retirement_score <= baseline.scores.retirement_score);
    assert!(
        adjusted.recommendations.monthly_retirement_contribution
            > baseline.recommendations.monthly_retirement_contribution
    );
}

#[test]
fn zero_income_with_debt_lands_on_dti_floor() {
    let mut input = young_saver();
    input.personal_details.annual_income = 0.0;

    let profile = calculate_complete_financial_profile(&input);

    assert_eq!(profile.metrics.debt_to_income_ratio, None);
    assert_eq!(profile.scores.dti_score, 20);
    assert_eq!(profile.metrics.savings_rate, 0.0);
    assert_eq!(profile.scores.growth_opportunity_score, 0);
}

#[test]
fn raw_metrics_carry_assets_and_passive_income() {
    let mut input = young_saver();
    input.personal_details.income_from_interest = 1_200.0;
    input.personal_details.income_from_property = 9_600.0;
    input.budget_allocation = Some(BudgetAllocation {
        essentials: 55.0,
        discretionary: 35.0,
        savings: 10.0,
    });

    let profile = calculate_complete_financial_profile(&input);

    assert_eq!(profile.metrics.total_assets, 72_000.0);
    assert_eq!(profile.metrics.net_worth, 52_000.0);
    assert_eq!(profile.metrics.gross_annual_income, 70_800.0);
    assert!((profile.metrics.financial_independence_ratio - 50.0).abs() < 1e-9);
    let diffs = profile
        .metrics
        .budget_allocation_diffs
        .expect("declared allocation produces diffs");
    assert_eq!(diffs.essentials, 5.0);
    assert_eq!(diffs.discretionary, 5.0);
    assert_eq!(diffs.savings, -10.0);
}

#[test]
fn profile_is_idempotent() {
    let input = stretched_household();
    let engine = FinancialScoringEngine::default();

    let first = engine.profile(&input);
    let second = engine.profile(&input);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn simple_variant_uses_static_ratio_and_complement() {
    let profile = simple_engine().profile(&young_saver());
    let scores = &profile.scores;

    assert_eq!(profile.variant, ScoringVariant::Simple);
    assert_eq!(scores.savings_score, 100);
    assert_eq!(scores.retirement_score, 0);
    assert_eq!(scores.overall_financial_health_score, 58);
    assert_eq!(scores.potential_for_improvement_score, 42);
    assert_eq!(scores.improvement_basis, ImprovementBasis::ComplementOfOverall);
}

#[test]
fn simple_variant_folds_credit_health_into_overall() {
    let mut input = young_saver();
    input.personal_details.credit_score = Some(650);

    let scores = simple_engine().scores(&input);

    assert_eq!(scores.credit_health_score, Some(93));
    assert_eq!(scores.overall_financial_health_score, 65);
    assert_eq!(scores.potential_for_improvement_score, 35);
}

#[test]
fn alternate_benchmarks_change_targets() {
    let mut benchmarks = Benchmarks::default();
    for bracket in &mut benchmarks.age_brackets {
        bracket.investment_multiple = 1.0;
    }
    let engine = FinancialScoringEngine::new(benchmarks, ScoringVariant::FullProfile);

    let scores = engine.scores(&young_saver());

    // 20k invested against a 60k target leaves a two-thirds shortfall.
    assert_eq!(scores.growth_opportunity_score, 75);
}

#[test]
fn score_set_serializes_with_stable_names() {
    let scores = calculate_financial_scores(&young_saver());
    let json = serde_json::to_value(&scores).expect("serializes");

    for (name, value) in scores.named() {
        assert_eq!(json.get(name).and_then(|v| v.as_u64()), Some(u64::from(value)));
    }
    assert!(json.get("creditHealthScore").is_none());
}

#[test]
fn simple_profile_reports_the_flat_savings_target_it_scores_against() {
    let profile = simple_engine().profile(&young_saver());

    assert_eq!(
        profile.recommendations.savings_rate_target,
        Benchmarks::default().flat_savings_target_pct
    );
}
