//! Fixed-rate, fully-amortizing loan calculations.
//!
//! [`payment`] derives the level monthly payment; [`schedule`] walks the
//! balance period by period, optionally accelerated by a recurring extra
//! payment.

pub mod payment;
pub mod schedule;

pub use payment::{
    compute_monthly_payment, monthly_rate, LoanParameters, LoanTerm, MAX_TERM_MONTHS,
};
pub use schedule::{
    generate_schedule, schedule_summary, yearly_breakdown, AmortizationSchedule, ScheduleEntry,
    YearSummary,
};
