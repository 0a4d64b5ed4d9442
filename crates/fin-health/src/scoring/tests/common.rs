use crate::scoring::domain::{
    ContactInfo, ExpensesAssets, PersonalDetails, RetirementPlanning, ScoringVariant,
    UserFinancialInput,
};
use crate::scoring::{Benchmarks, FinancialScoringEngine};

/// Age 28, 60k income, 20k debt, fully funded emergency reserve.
pub(crate) fn young_saver() -> UserFinancialInput {
    UserFinancialInput {
        personal_details: PersonalDetails {
            age: 28,
            annual_income: 60_000.0,
            income_from_interest: 0.0,
            income_from_property: 0.0,
            credit_score: None,
        },
        expenses_assets: ExpensesAssets {
            monthly_expenses: 1_800.0,
            emergency_funds: 12_000.0,
            savings: 40_000.0,
            total_debt: 20_000.0,
            total_investments: 20_000.0,
        },
        retirement_planning: RetirementPlanning {
            retirement_age: 60,
            target_retirement_savings: 100_000.0,
            current_retirement_savings: 0.0,
            adjust_for_inflation: false,
        },
        contact_info: ContactInfo {
            email: "jordan@example.com".to_string(),
            name: "Jordan Reyes".to_string(),
            phone: "555-0100".to_string(),
        },
        budget_allocation: None,
    }
}

/// Mid-career household with thin reserves and no investments.
pub(crate) fn stretched_household() -> UserFinancialInput {
    let mut input = young_saver();
    input.personal_details.age = 45;
    input.personal_details.annual_income = 48_000.0;
    input.expenses_assets.monthly_expenses = 3_600.0;
    input.expenses_assets.emergency_funds = 1_800.0;
    input.expenses_assets.savings = 2_000.0;
    input.expenses_assets.total_debt = 30_000.0;
    input.expenses_assets.total_investments = 0.0;
    input.retirement_planning.retirement_age = 65;
    input.retirement_planning.target_retirement_savings = 750_000.0;
    input.retirement_planning.current_retirement_savings = 15_000.0;
    input
}

pub(crate) fn simple_engine() -> FinancialScoringEngine {
    FinancialScoringEngine::new(Benchmarks::default(), ScoringVariant::Simple)
}
