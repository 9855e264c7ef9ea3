use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use loan_guidance_core::amortization::{
    compute_monthly_payment, generate_schedule, schedule_summary, LoanParameters, LoanTerm,
};
use loan_guidance_core::round_cents;

use crate::input;

/// Loan terms shared by the payment and schedule commands
#[derive(Args)]
pub struct LoanTermArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (6.5 = 6.5%)
    #[arg(long, alias = "annual-rate")]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long, conflicts_with = "term_months")]
    pub term_years: Option<u32>,

    /// Term in months
    #[arg(long)]
    pub term_months: Option<u32>,
}

/// Arguments for the monthly payment calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanTermArgs,
}

/// Arguments for the amortization schedule
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanTermArgs,

    /// Extra principal paid every month
    #[arg(long, alias = "extra-payment")]
    pub extra: Option<Decimal>,

    /// Due date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Only print the first three periods and the final one
    #[arg(long)]
    pub summary: bool,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = match input::load::<LoanParameters>(args.input.as_deref())? {
        Some(params) => params,
        None => parameters_from_flags(&args.loan)?,
    };

    let exact = compute_monthly_payment(params.principal, params.annual_rate_percent, params.term)?;
    Ok(json!({
        "result": {
            "monthly_payment": round_cents(exact),
            "monthly_payment_unrounded": exact,
            "periods": params.term.months()?,
        }
    }))
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = match input::load::<LoanParameters>(args.input.as_deref())? {
        Some(params) => params,
        None => {
            let mut params = parameters_from_flags(&args.loan)?
                .with_extra_payment(args.extra.unwrap_or(Decimal::ZERO));
            params.start_date = args.start_date;
            params
        }
    };

    let mut result = generate_schedule(&params)?;
    if args.summary {
        result.result.entries = schedule_summary(&result.result);
    }
    Ok(serde_json::to_value(result)?)
}

fn parameters_from_flags(args: &LoanTermArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    let principal = args
        .principal
        .ok_or("--principal is required (or provide --input)")?;
    let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
    let term = match (args.term_years, args.term_months) {
        (Some(years), _) => LoanTerm::Years(years),
        (None, Some(months)) => LoanTerm::Months(months),
        (None, None) => return Err("--term-years or --term-months is required (or provide --input)".into()),
    };
    Ok(LoanParameters::new(principal, rate, term))
}
