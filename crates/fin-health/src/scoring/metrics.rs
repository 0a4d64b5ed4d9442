//! Raw metric calculators. Each one is total: degenerate denominators resolve to
//! a fixed fallback instead of `NaN` or infinity.

use super::domain::BudgetAllocation;

pub fn net_worth(total_assets: f64, total_liabilities: f64) -> f64 {
    total_assets - total_liabilities
}

/// Debt as a percentage of annual income.
///
/// Returns `None` when there is debt but no income to service it; normalizers
/// treat that as the least healthy position. No income and no debt is 0%.
pub fn debt_to_income(total_debt: f64, annual_income: f64) -> Option<f64> {
    if annual_income > 0.0 {
        Some(total_debt / annual_income * 100.0)
    } else if total_debt > 0.0 {
        None
    } else {
        Some(0.0)
    }
}

/// Legacy savings rate: liquid balances relative to one year of income.
pub fn savings_rate_simple(savings: f64, emergency_funds: f64, annual_income: f64) -> f64 {
    if annual_income <= 0.0 {
        return 0.0;
    }
    (savings + emergency_funds) / annual_income * 100.0
}

/// Share of gross income left after a year of expenses. Negative when spending
/// exceeds income.
pub fn savings_rate(gross_annual_income: f64, monthly_expenses: f64) -> f64 {
    if gross_annual_income <= 0.0 {
        return 0.0;
    }
    annual_surplus(gross_annual_income, monthly_expenses) / gross_annual_income * 100.0
}

pub fn annual_surplus(gross_annual_income: f64, monthly_expenses: f64) -> f64 {
    gross_annual_income - monthly_expenses * 12.0
}

/// Months of expenses covered by the emergency fund.
pub fn emergency_fund_coverage(emergency_funds: f64, monthly_expenses: f64) -> f64 {
    if monthly_expenses <= 0.0 {
        return 0.0;
    }
    emergency_funds / monthly_expenses
}

/// Static readiness: current balance as a percentage of the target.
pub fn retirement_readiness(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    current / target * 100.0
}

/// Future value of `current` plus level annual contributions (end of year).
pub fn projected_retirement_savings(
    current: f64,
    annual_contribution: f64,
    growth_rate: f64,
    years: u8,
) -> f64 {
    let years = i32::from(years);
    let compound = (1.0 + growth_rate).powi(years);
    let contributions = if growth_rate.abs() < f64::EPSILON {
        annual_contribution * f64::from(years)
    } else {
        annual_contribution * (compound - 1.0) / growth_rate
    };
    current * compound + contributions
}

/// Grows a target by `inflation_rate` for each remaining year.
pub fn inflation_adjusted_target(target: f64, inflation_rate: f64, years: u8) -> f64 {
    target * (1.0 + inflation_rate).powi(i32::from(years))
}

/// Monthly passive income as a percentage of monthly spending.
pub fn financial_independence_ratio(passive_annual_income: f64, monthly_expenses: f64) -> f64 {
    if monthly_expenses <= 0.0 {
        return 0.0;
    }
    (passive_annual_income / 12.0) / monthly_expenses * 100.0
}

/// Signed `declared - reference` percentage points for each category.
pub fn budget_allocation_diffs(
    declared: &BudgetAllocation,
    reference: &BudgetAllocation,
) -> BudgetAllocation {
    BudgetAllocation {
        essentials: declared.essentials - reference.essentials,
        discretionary: declared.discretionary - reference.discretionary,
        savings: declared.savings - reference.savings,
    }
}

/// Legacy credit health score. Anything at or above `full_marks` scores 100.
pub fn credit_health_score(credit_score: u16, full_marks: u16) -> u8 {
    if full_marks == 0 || credit_score >= full_marks {
        return 100;
    }
    let pct = f64::from(credit_score) / f64::from(full_marks) * 100.0;
    pct.round().clamp(0.0, 100.0) as u8
}
