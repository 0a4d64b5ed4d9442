use serde::{Deserialize, Serialize};

use super::benchmarks::Benchmarks;
use super::domain::{BudgetAllocation, ScoringVariant, UserFinancialInput};
use super::metrics::{annual_surplus, inflation_adjusted_target};

/// Action figures handed to narrative generation and the review gate.
///
/// Currency amounts are whole units per month unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub monthly_investment: f64,
    pub monthly_retirement_contribution: f64,
    /// Total balance, not monthly.
    pub emergency_fund_target: f64,
    pub emergency_fund_shortfall: f64,
    /// Percentage of gross income.
    pub savings_rate_target: f64,
    pub monthly_budget: BudgetAllocation,
}

/// `savings_rate_target` matches the target the variant scores savings against.
pub(crate) fn recommend(
    input: &UserFinancialInput,
    benchmarks: &Benchmarks,
    variant: ScoringVariant,
) -> Recommendations {
    let bracket = benchmarks.bracket_for(input.personal_details.age);
    let gross_annual = input.gross_annual_income();
    let monthly_gross = (gross_annual / 12.0).max(0.0);
    let monthly_surplus =
        (annual_surplus(gross_annual, input.expenses_assets.monthly_expenses) / 12.0).max(0.0);

    let investment_target = bracket.investment_multiple * input.personal_details.annual_income;
    let investment_gap = (investment_target - input.invested_assets()).max(0.0);
    let horizon = f64::from(benchmarks.investment_horizon_months.max(1));
    let baseline = monthly_gross * benchmarks.baseline_investment_pct / 100.0;
    let monthly_investment = (investment_gap / horizon).max(baseline).min(monthly_surplus);

    let monthly_retirement_contribution = retirement_contribution(input, benchmarks);

    let emergency_fund_target =
        input.expenses_assets.monthly_expenses.max(0.0) * benchmarks.emergency_fund_target_months;
    let emergency_fund_shortfall =
        (emergency_fund_target - input.expenses_assets.emergency_funds).max(0.0);

    let split = &benchmarks.reference_allocation;
    let monthly_budget = BudgetAllocation {
        essentials: whole_units(monthly_gross * split.essentials / 100.0),
        discretionary: whole_units(monthly_gross * split.discretionary / 100.0),
        savings: whole_units(monthly_gross * split.savings / 100.0),
    };

    let savings_rate_target = match variant {
        ScoringVariant::FullProfile => bracket.savings_rate_target_pct,
        ScoringVariant::Simple => benchmarks.flat_savings_target_pct,
    };

    Recommendations {
        monthly_investment: whole_units(monthly_investment),
        monthly_retirement_contribution,
        emergency_fund_target: whole_units(emergency_fund_target),
        emergency_fund_shortfall: whole_units(emergency_fund_shortfall),
        savings_rate_target,
        monthly_budget,
    }
}

/// Monthly amount that closes the gap between where current savings grow to
/// and the (optionally inflation-adjusted) target. Zero once no months remain.
fn retirement_contribution(input: &UserFinancialInput, benchmarks: &Benchmarks) -> f64 {
    let plan = &input.retirement_planning;
    let years = input.years_to_retirement();
    if years == 0 {
        return 0.0;
    }

    let assumptions = &benchmarks.retirement;
    let target = if plan.adjust_for_inflation {
        inflation_adjusted_target(plan.target_retirement_savings, assumptions.inflation_rate, years)
    } else {
        plan.target_retirement_savings
    };
    let grown = plan.current_retirement_savings * (1.0 + assumptions.growth_rate).powi(i32::from(years));
    let gap = (target - grown).max(0.0);

    whole_units(gap / (f64::from(years) * 12.0))
}

fn whole_units(amount: f64) -> f64 {
    if amount.is_finite() {
        amount.round()
    } else {
        0.0
    }
}
