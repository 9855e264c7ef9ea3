use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::payment::{compute_monthly_payment, monthly_rate, LoanParameters};
use crate::error::LoanError;
use crate::types::*;
use crate::LoanResult;

const MONTHS_PER_YEAR: u32 = 12;
const SUMMARY_HEAD: usize = 3;

/// One period of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based period index
    pub period: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub remaining_balance: Money,
    pub cumulative_interest: Money,
}

/// Full schedule plus totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Contractual payment, rounded to cents
    pub monthly_payment: Money,
    pub extra_payment: Money,
    pub monthly_rate: Rate,
    pub nominal_periods: u32,
    pub periods: u32,
    pub periods_saved: u32,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_payments: Money,
    /// Interest avoided relative to paying only the contractual amount
    pub interest_saved: Money,
    pub entries: Vec<ScheduleEntry>,
}

/// Per-year roll-up of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub closing_balance: Money,
}

/// Build the month-by-month schedule for a fixed-rate loan.
///
/// Every figure is carried in whole cents. The contractual payment is the
/// rounded output of [`compute_monthly_payment`]; each period's interest is
/// rounded before the principal portion is derived. The principal portion is
/// capped at the outstanding balance, and the last nominal period clears
/// whatever rounding has left behind. The schedule stops as soon as the
/// balance drops below one cent, which happens early when an extra payment
/// is supplied.
pub fn generate_schedule(
    input: &LoanParameters,
) -> LoanResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.extra_payment < Decimal::ZERO {
        return Err(LoanError::invalid(
            "extra_payment",
            "Extra payment cannot be negative",
        ));
    }

    let exact_payment =
        compute_monthly_payment(input.principal, input.annual_rate_percent, input.term)?;
    let nominal_periods = input.term.months()?;
    let rate = monthly_rate(input.annual_rate_percent);
    let payment = round_cents(exact_payment);
    let extra = round_cents(input.extra_payment);

    if round_cents(input.principal) < MINOR_UNIT {
        return Err(LoanError::invalid(
            "principal",
            "Principal must be at least one minor currency unit",
        ));
    }
    // Interest only falls as the balance does, so a payment that retires
    // principal in period 1 retires principal in every later period.
    let first_interest = round_cents(round_cents(input.principal) * rate);
    if payment + extra <= first_interest {
        return Err(LoanError::invalid(
            "principal",
            format!(
                "Payment of {} does not exceed first-period interest of {first_interest}; \
                 the balance would never decline",
                payment + extra
            ),
        ));
    }
    if extra != input.extra_payment {
        warnings.push(format!(
            "Extra payment {} rounded to {extra}",
            input.extra_payment
        ));
    }

    let entries = amortize(
        input.principal,
        rate,
        nominal_periods,
        payment,
        extra,
        input.start_date,
    )?;

    let total_interest: Money = entries.iter().map(|e| e.interest).sum();
    let total_principal: Money = entries.iter().map(|e| e.principal).sum();

    let interest_saved = if extra.is_zero() {
        Decimal::ZERO
    } else {
        let baseline = amortize(input.principal, rate, nominal_periods, payment, Decimal::ZERO, None)?;
        let baseline_interest: Money = baseline.iter().map(|e| e.interest).sum();
        baseline_interest - total_interest
    };

    let periods = entries.len() as u32;
    let output = AmortizationSchedule {
        monthly_payment: payment,
        extra_payment: extra,
        monthly_rate: rate,
        nominal_periods,
        periods,
        periods_saved: nominal_periods - periods,
        total_interest,
        total_principal,
        total_payments: total_interest + total_principal,
        interest_saved,
        entries,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate amortization (level payment, cents rounding)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "periods": nominal_periods,
            "extra_payment": extra.to_string(),
            "settlement_epsilon": MINOR_UNIT.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn amortize(
    principal: Money,
    rate: Rate,
    nominal_periods: u32,
    payment: Money,
    extra: Money,
    start_date: Option<NaiveDate>,
) -> LoanResult<Vec<ScheduleEntry>> {
    let mut balance = round_cents(principal);
    let mut cumulative_interest = Decimal::ZERO;
    let mut entries = Vec::new();

    for period in 1..=nominal_periods {
        if balance < MINOR_UNIT {
            break;
        }

        let interest = round_cents(balance * rate);
        let principal_paid = if period == nominal_periods {
            balance
        } else {
            (payment + extra - interest).clamp(Decimal::ZERO, balance)
        };

        balance -= principal_paid;
        cumulative_interest += interest;

        let due_date = match start_date {
            Some(first) => Some(due_date(first, period)?),
            None => None,
        };

        entries.push(ScheduleEntry {
            period,
            due_date,
            payment: interest + principal_paid,
            interest,
            principal: principal_paid,
            remaining_balance: balance,
            cumulative_interest,
        });
    }

    Ok(entries)
}

fn due_date(first: NaiveDate, period: u32) -> LoanResult<NaiveDate> {
    first
        .checked_add_months(Months::new(period - 1))
        .ok_or_else(|| LoanError::invalid("start_date", format!("Period {period} falls outside the calendar")))
}

/// First three entries plus the final one for long schedules; the whole
/// schedule when it has four entries or fewer.
pub fn schedule_summary(schedule: &AmortizationSchedule) -> Vec<ScheduleEntry> {
    let entries = &schedule.entries;
    if entries.len() <= SUMMARY_HEAD + 1 {
        return entries.clone();
    }
    let mut summary: Vec<ScheduleEntry> = entries[..SUMMARY_HEAD].to_vec();
    if let Some(last) = entries.last() {
        summary.push(last.clone());
    }
    summary
}

/// Roll the schedule up into loan years (periods 1-12 are year 1).
pub fn yearly_breakdown(schedule: &AmortizationSchedule) -> Vec<YearSummary> {
    let mut years: Vec<YearSummary> = Vec::new();
    for entry in &schedule.entries {
        let year = (entry.period - 1) / MONTHS_PER_YEAR + 1;
        match years.last_mut() {
            Some(current) if current.year == year => {
                current.principal_paid += entry.principal;
                current.interest_paid += entry.interest;
                current.closing_balance = entry.remaining_balance;
            }
            _ => years.push(YearSummary {
                year,
                principal_paid: entry.principal,
                interest_paid: entry.interest,
                closing_balance: entry.remaining_balance,
            }),
        }
    }
    years
}
