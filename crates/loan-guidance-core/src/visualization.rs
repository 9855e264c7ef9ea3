//! Chart-ready series derived from an amortization schedule.
//!
//! Rendering is left to the client. `image_data` carries a transparent 1x1
//! PNG so callers expecting an image field always receive a valid one.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{yearly_breakdown, AmortizationSchedule, YearSummary};
use crate::types::*;

const PLACEHOLDER_PNG: [u8; 70] = [
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4,
    0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0xfc, 0xcf, 0xf0, 0xbf,
    0x1e, 0x00, 0x06, 0x83, 0x02, 0x7f, 0x94, 0xad, 0xd0, 0xeb, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45,
    0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub period: u32,
    pub balance: Money,
    pub cumulative_interest: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceChart {
    pub title: String,
    pub points: Vec<BalancePoint>,
}

/// Share of total outlay going to principal versus interest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentComposition {
    pub total_principal: Money,
    pub total_interest: Money,
    pub interest_share: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visualization {
    /// Base64-encoded PNG
    pub image_data: String,
    pub chart: BalanceChart,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedVisualization {
    pub image_data: String,
    pub chart: BalanceChart,
    pub yearly: Vec<YearSummary>,
    pub composition: PaymentComposition,
}

pub fn placeholder_png_base64() -> String {
    STANDARD.encode(PLACEHOLDER_PNG)
}

/// Remaining balance and cumulative interest after every period, starting
/// from the opening balance at period 0.
pub fn balance_chart(schedule: &AmortizationSchedule) -> BalanceChart {
    let opening = schedule.total_principal;
    let mut points = Vec::with_capacity(schedule.entries.len() + 1);
    points.push(BalancePoint {
        period: 0,
        balance: opening,
        cumulative_interest: Decimal::ZERO,
    });
    points.extend(schedule.entries.iter().map(|e| BalancePoint {
        period: e.period,
        balance: e.remaining_balance,
        cumulative_interest: e.cumulative_interest,
    }));

    BalanceChart {
        title: format!("Loan balance over {} months", schedule.periods),
        points,
    }
}

pub fn payment_composition(schedule: &AmortizationSchedule) -> PaymentComposition {
    let interest_share = if schedule.total_payments.is_zero() {
        Decimal::ZERO
    } else {
        round_cents(schedule.total_interest / schedule.total_payments * dec!(100))
    };
    PaymentComposition {
        total_principal: schedule.total_principal,
        total_interest: schedule.total_interest,
        interest_share,
    }
}

pub fn visualize(schedule: &AmortizationSchedule) -> Visualization {
    Visualization {
        image_data: placeholder_png_base64(),
        chart: balance_chart(schedule),
    }
}

pub fn visualize_enhanced(schedule: &AmortizationSchedule) -> EnhancedVisualization {
    EnhancedVisualization {
        image_data: placeholder_png_base64(),
        chart: balance_chart(schedule),
        yearly: yearly_breakdown(schedule),
        composition: payment_composition(schedule),
    }
}
