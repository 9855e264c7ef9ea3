use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_guidance_core::analysis::LoanAdvisor;
use loan_guidance_core::request::LoanApplication;

use crate::input;

/// Borrower and loan details
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ApplicationArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual gross income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Loan amount
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub loan_term: Option<i32>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Credit score (300-850)
    #[arg(long)]
    pub credit_score: Option<i32>,

    /// Existing monthly debt payments
    #[arg(long)]
    pub monthly_debt: Option<Decimal>,

    /// Property value
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Extra principal paid every month
    #[arg(long)]
    pub extra_payment: Option<Decimal>,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub application: ApplicationArgs,
}

#[derive(Args)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub application: ApplicationArgs,

    /// Print the narrative as HTML instead of plain text
    #[arg(long)]
    pub html: bool,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let app = application(args.application)?;
    let result = LoanAdvisor::default().analyze(&app)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_recommend(args: RecommendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let app = application(args.application)?;
    let recs = LoanAdvisor::default().recommendations(&app)?;
    let narrative = if args.html {
        recs.recommendations
    } else {
        recs.plain_text
    };
    Ok(serde_json::json!({ "result": { "recommendations": narrative } }))
}

fn application(args: ApplicationArgs) -> Result<LoanApplication, Box<dyn std::error::Error>> {
    if let Some(app) = input::load::<LoanApplication>(args.input.as_deref())? {
        return Ok(app);
    }

    Ok(LoanApplication {
        income: args.income.ok_or("--income is required (or provide --input)")?,
        loan_amount: args
            .loan_amount
            .ok_or("--loan-amount is required (or provide --input)")?,
        loan_term: args
            .loan_term
            .ok_or("--loan-term is required (or provide --input)")?,
        interest_rate: args
            .interest_rate
            .ok_or("--interest-rate is required (or provide --input)")?,
        credit_score: args
            .credit_score
            .ok_or("--credit-score is required (or provide --input)")?,
        monthly_debt: args
            .monthly_debt
            .ok_or("--monthly-debt is required (or provide --input)")?,
        property_value: args.property_value,
        extra_payment: args.extra_payment,
    })
}
