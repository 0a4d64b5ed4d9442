use serde::{Deserialize, Serialize};

use super::benchmarks::Benchmarks;
use super::domain::{BudgetAllocation, ImprovementBasis, ScoringVariant, UserFinancialInput};
use super::recommendations::Recommendations;
use super::{aggregate, metrics, normalize};

/// Normalized 0-100 scores for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSet {
    pub dti_score: u8,
    pub savings_score: u8,
    pub emergency_fund_score: u8,
    pub retirement_score: u8,
    pub growth_opportunity_score: u8,
    pub overall_financial_health_score: u8,
    pub potential_for_improvement_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_health_score: Option<u8>,
    pub improvement_basis: ImprovementBasis,
}

impl ScoreSet {
    /// Every score paired with its wire name, in a stable order.
    pub fn named(&self) -> Vec<(&'static str, u8)> {
        let mut named = vec![
            ("dtiScore", self.dti_score),
            ("savingsScore", self.savings_score),
            ("emergencyFundScore", self.emergency_fund_score),
            ("retirementScore", self.retirement_score),
            ("growthOpportunityScore", self.growth_opportunity_score),
            (
                "overallFinancialHealthScore",
                self.overall_financial_health_score,
            ),
            (
                "potentialForImprovementScore",
                self.potential_for_improvement_score,
            ),
        ];
        if let Some(credit) = self.credit_health_score {
            named.push(("creditHealthScore", credit));
        }
        named
    }
}

/// Raw, unclamped metrics. Percentages are 0-100 scale, balances are currency,
/// coverage is months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetrics {
    pub net_worth: f64,
    pub total_assets: f64,
    pub gross_annual_income: f64,
    /// `None` when debt exists without income.
    pub debt_to_income_ratio: Option<f64>,
    pub savings_rate: f64,
    pub emergency_fund_months: f64,
    /// May exceed 100 when projected growth overshoots the target.
    pub retirement_readiness: f64,
    pub projected_retirement_savings: f64,
    pub years_to_retirement: u8,
    pub financial_independence_ratio: f64,
    pub investment_target: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_allocation_diffs: Option<BudgetAllocation>,
}

/// Everything derived from one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProfile {
    pub variant: ScoringVariant,
    pub metrics: RawMetrics,
    pub scores: ScoreSet,
    pub recommendations: Recommendations,
}

pub(crate) fn compute_metrics(
    input: &UserFinancialInput,
    benchmarks: &Benchmarks,
    variant: ScoringVariant,
) -> RawMetrics {
    let personal = &input.personal_details;
    let assets = &input.expenses_assets;
    let plan = &input.retirement_planning;

    let total_assets = assets.emergency_funds
        + assets.savings
        + assets.total_investments
        + plan.current_retirement_savings;
    let gross_annual_income = input.gross_annual_income();
    let years_to_retirement = input.years_to_retirement();
    let bracket = benchmarks.bracket_for(personal.age);

    let (savings_rate, projected_retirement_savings, retirement_readiness) = match variant {
        ScoringVariant::FullProfile => {
            let assumptions = &benchmarks.retirement;
            let contribution = metrics::annual_surplus(gross_annual_income, assets.monthly_expenses)
                .max(0.0)
                * assumptions.projected_contribution_share;
            let projected = metrics::projected_retirement_savings(
                plan.current_retirement_savings,
                contribution,
                assumptions.growth_rate,
                years_to_retirement,
            );
            let target = if plan.adjust_for_inflation {
                metrics::inflation_adjusted_target(
                    plan.target_retirement_savings,
                    assumptions.inflation_rate,
                    years_to_retirement,
                )
            } else {
                plan.target_retirement_savings
            };
            (
                metrics::savings_rate(gross_annual_income, assets.monthly_expenses),
                projected,
                metrics::retirement_readiness(projected, target),
            )
        }
        ScoringVariant::Simple => (
            metrics::savings_rate_simple(
                assets.savings,
                assets.emergency_funds,
                personal.annual_income,
            ),
            plan.current_retirement_savings,
            metrics::retirement_readiness(
                plan.current_retirement_savings,
                plan.target_retirement_savings,
            ),
        ),
    };

    RawMetrics {
        net_worth: metrics::net_worth(total_assets, assets.total_debt),
        total_assets,
        gross_annual_income,
        debt_to_income_ratio: metrics::debt_to_income(assets.total_debt, personal.annual_income),
        savings_rate,
        emergency_fund_months: metrics::emergency_fund_coverage(
            assets.emergency_funds,
            assets.monthly_expenses,
        ),
        retirement_readiness,
        projected_retirement_savings,
        years_to_retirement,
        financial_independence_ratio: metrics::financial_independence_ratio(
            input.passive_annual_income(),
            assets.monthly_expenses,
        ),
        investment_target: bracket.investment_multiple * personal.annual_income,
        budget_allocation_diffs: input.budget_allocation.as_ref().map(|declared| {
            metrics::budget_allocation_diffs(declared, &benchmarks.reference_allocation)
        }),
    }
}

pub(crate) fn score_metrics(
    input: &UserFinancialInput,
    raw: &RawMetrics,
    benchmarks: &Benchmarks,
    variant: ScoringVariant,
) -> ScoreSet {
    let bracket = benchmarks.bracket_for(input.personal_details.age);

    let dti_score = normalize::dti_score(raw.debt_to_income_ratio, &benchmarks.dti);
    let savings_target = match variant {
        ScoringVariant::FullProfile => bracket.savings_rate_target_pct,
        ScoringVariant::Simple => benchmarks.flat_savings_target_pct,
    };
    let savings_score = normalize::savings_score(raw.savings_rate, savings_target);
    let emergency_fund_score = normalize::emergency_fund_score(
        raw.emergency_fund_months,
        benchmarks.emergency_fund_target_months,
    );
    let retirement_score = normalize::retirement_score(raw.retirement_readiness);
    let growth_opportunity_score = normalize::growth_opportunity_score(
        input.invested_assets(),
        raw.investment_target,
        input.personal_details.annual_income,
        &benchmarks.growth_opportunity,
    );

    match variant {
        ScoringVariant::FullProfile => {
            let overall = aggregate::overall_health_score(&[
                dti_score,
                savings_score,
                emergency_fund_score,
                retirement_score,
                growth_opportunity_score,
            ]);
            let improvement = normalize::weighted_improvement_score(
                emergency_fund_score,
                savings_score,
                dti_score,
                &benchmarks.improvement_weights,
            );
            ScoreSet {
                dti_score,
                savings_score,
                emergency_fund_score,
                retirement_score,
                growth_opportunity_score,
                overall_financial_health_score: overall,
                potential_for_improvement_score: improvement,
                credit_health_score: None,
                improvement_basis: variant.into(),
            }
        }
        ScoringVariant::Simple => {
            let credit_health_score = input.personal_details.credit_score.map(|score| {
                metrics::credit_health_score(score, benchmarks.credit_score_full_marks)
            });
            let mut components = vec![
                dti_score,
                savings_score,
                emergency_fund_score,
                retirement_score,
            ];
            components.extend(credit_health_score);
            let overall = aggregate::overall_health_score(&components);
            ScoreSet {
                dti_score,
                savings_score,
                emergency_fund_score,
                retirement_score,
                growth_opportunity_score,
                overall_financial_health_score: overall,
                potential_for_improvement_score: normalize::complement_improvement_score(overall),
                credit_health_score,
                improvement_basis: variant.into(),
            }
        }
    }
}
