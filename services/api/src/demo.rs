use crate::infra::{
    parse_variant, scoring_engine, InMemoryDeliveryPublisher, InMemoryLeadRepository,
};
use clap::Args;
use fin_health::config::AppConfig;
use fin_health::error::AppError;
use fin_health::leads::{
    LeadCsvImporter, LeadRecord, LeadService, LeadStatus, LeadSubmission, ReviewGate,
};
use fin_health::scoring::{
    ContactInfo, ExpensesAssets, FinancialScoringEngine, PersonalDetails, RetirementPlanning,
    ScoringVariant, UserFinancialInput,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding one camelCase submission
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Scoring rules to apply (full or simple). Defaults to APP_SCORING_VARIANT.
    #[arg(long, value_parser = parse_variant)]
    pub(crate) variant: Option<ScoringVariant>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Lead CSV export with snake_case headers
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Scoring rules to apply (full or simple). Defaults to APP_SCORING_VARIANT.
    #[arg(long, value_parser = parse_variant)]
    pub(crate) variant: Option<ScoringVariant>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = scoring_engine(&config.scoring, args.variant)?;

    let raw = std::fs::read_to_string(&args.input)?;
    let input: UserFinancialInput = serde_json::from_str(&raw)?;
    let profile = engine.profile(&input);

    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = scoring_engine(&config.scoring, args.variant)?;
    let submissions = LeadCsvImporter::from_path(&args.csv)?;

    println!(
        "Scored {} leads from {} ({} rules)",
        submissions.len(),
        args.csv.display(),
        engine.variant().label()
    );
    for (index, submission) in submissions.iter().enumerate() {
        let scores = engine.scores(&submission.input);
        let named = scores
            .named()
            .into_iter()
            .map(|(name, score)| format!("{name}={score}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "- row {} [{}] {}",
            index + 1,
            submission.source.as_deref().unwrap_or("unknown source"),
            named
        );
    }

    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Financial health lead intake demo (contact details redacted)");

    let repository = Arc::new(InMemoryLeadRepository::default());
    let delivery = Arc::new(InMemoryDeliveryPublisher::default());
    let service = LeadService::new(
        FinancialScoringEngine::default(),
        ReviewGate::default(),
        repository,
        delivery.clone(),
    );

    let mut held = Vec::new();
    for (label, submission) in demo_submissions() {
        let record = match service.submit(submission) {
            Ok(record) => record,
            Err(err) => {
                println!("  {label}: submission failed: {err}");
                continue;
            }
        };
        render_lead(label, &record);
        if record.status == LeadStatus::PendingReview {
            held.push(record.id);
        }
    }

    if !held.is_empty() {
        println!("\nReviewer sign-off");
    }
    for id in held {
        match service.approve(&id, Some("figures confirmed on call".to_string())) {
            Ok(record) => println!("- {} -> {}", record.id.0, record.status.label()),
            Err(err) => println!("- {} could not be approved: {}", id.0, err),
        }
    }

    let notices = delivery.notices();
    println!("\nDelivery queue ({} notices)", notices.len());
    for notice in notices {
        println!(
            "- {} via {} (overall {})",
            notice.lead_id.0,
            notice.template,
            notice
                .details
                .get("overall_financial_health_score")
                .map(String::as_str)
                .unwrap_or("-")
        );
    }

    Ok(())
}

fn render_lead(label: &str, record: &LeadRecord) {
    let scores = &record.profile.scores;
    let recommendations = &record.profile.recommendations;
    println!(
        "\n{} ({}) -> {}",
        label,
        record.id.0,
        record.status.label()
    );
    println!(
        "  Overall {} | improvement potential {}",
        scores.overall_financial_health_score, scores.potential_for_improvement_score
    );
    for (name, score) in scores.named() {
        println!("    - {name}: {score}");
    }
    println!(
        "  Suggested: invest {:.0}/month, retirement {:.0}/month, emergency fund target {:.0}",
        recommendations.monthly_investment,
        recommendations.monthly_retirement_contribution,
        recommendations.emergency_fund_target
    );
    for reason in record.review_reasons() {
        println!("  Held for review: {reason}");
    }
}

fn demo_submissions() -> Vec<(&'static str, LeadSubmission)> {
    let early_career = UserFinancialInput {
        personal_details: PersonalDetails {
            age: 28,
            annual_income: 60_000.0,
            income_from_interest: 0.0,
            income_from_property: 0.0,
            credit_score: Some(712),
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
            email: "lead@example.com".to_string(),
            name: "Early career".to_string(),
            phone: String::new(),
        },
        budget_allocation: None,
    };

    let mut late_starter = early_career.clone();
    late_starter.personal_details.age = 45;
    late_starter.personal_details.annual_income = 48_000.0;
    late_starter.expenses_assets.monthly_expenses = 3_600.0;
    late_starter.expenses_assets.emergency_funds = 1_800.0;
    late_starter.expenses_assets.savings = 2_000.0;
    late_starter.expenses_assets.total_debt = 30_000.0;
    late_starter.expenses_assets.total_investments = 0.0;
    late_starter.retirement_planning.retirement_age = 65;
    late_starter.retirement_planning.target_retirement_savings = 750_000.0;
    late_starter.retirement_planning.current_retirement_savings = 15_000.0;
    late_starter.retirement_planning.adjust_for_inflation = true;

    let mut high_earner = early_career.clone();
    high_earner.personal_details.annual_income = 240_000.0;
    high_earner.expenses_assets.total_investments = 0.0;

    vec![
        (
            "Early career saver",
            LeadSubmission {
                input: early_career,
                source: Some("demo".to_string()),
            },
        ),
        ("Late starter", LeadSubmission::from(late_starter)),
        ("High earner", LeadSubmission::from(high_earner)),
    ]
}
