use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{
    compute_monthly_payment, generate_schedule, schedule_summary, AmortizationSchedule,
    ScheduleEntry,
};
use crate::analysis::ratios::{affordability_ratios, AffordabilityInput};
use crate::narrative::{self, NarrativeContext};
use crate::request::LoanApplication;
use crate::risk::{CreditCategory, DtiCategory, RiskAssessment, RiskInputs, RiskModel};
use crate::types::*;
use crate::visualization::{self, EnhancedVisualization, Visualization};
use crate::LoanResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtToIncome {
    pub before_loan: Percent,
    pub after_loan: Percent,
    pub category: DtiCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditScoreBlock {
    pub value: u16,
    pub category: CreditCategory,
}

/// Headline payment and affordability figures, rounded for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub monthly_payment: Money,
    /// Interest over the full nominal term without extra payments
    pub total_interest: Money,
    pub total_payments: Money,
    pub debt_to_income: DebtToIncome,
    pub loan_to_income: Percent,
    pub payment_to_income: Percent,
    pub loan_to_value: Option<Percent>,
    pub credit_score: CreditScoreBlock,
    pub debt_service_coverage_ratio: Decimal,
}

/// How the extra payment (if any) changes the payoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffSummary {
    pub months_to_payoff: u32,
    pub years_to_payoff: Decimal,
    pub months_saved: u32,
    pub interest_saved: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub analysis: AnalysisResult,
    pub risk: RiskAssessment,
    pub schedule_summary: Vec<ScheduleEntry>,
    pub payoff: PayoffSummary,
    pub visualization_available: bool,
    /// Narrative assessment as HTML
    pub recommendations: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub recommendations: String,
    pub plain_text: String,
}

/// Entry point for every loan-guidance operation.
///
/// Holds the risk model, which is built once (typically at process start)
/// and never mutated afterwards; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct LoanAdvisor {
    model: RiskModel,
}

impl LoanAdvisor {
    pub fn new(model: RiskModel) -> Self {
        Self { model }
    }

    pub fn risk_model(&self) -> &RiskModel {
        &self.model
    }

    /// Full analysis: payment, ratios, risk, schedule summary and narrative.
    pub fn analyze(&self, app: &LoanApplication) -> LoanResult<ComputationOutput<LoanAnalysis>> {
        let start = Instant::now();
        let mut warnings: Vec<String> = Vec::new();

        let params = app.to_parameters()?;
        let exact_payment =
            compute_monthly_payment(params.principal, params.annual_rate_percent, params.term)?;
        let schedule = generate_schedule(&params)?;
        warnings.extend(schedule.warnings);
        let schedule = schedule.result;

        let ratios = affordability_ratios(&AffordabilityInput {
            income: app.income,
            monthly_debt: app.monthly_debt,
            monthly_payment: exact_payment,
            loan_amount: app.loan_amount,
            property_value: app.property_value,
        })?;

        let thresholds = self.model.thresholds();
        if ratios.dti_after_loan >= thresholds.dti_poor_below {
            warnings.push(format!(
                "Post-loan DTI of {} exceeds {}%; most lenders will decline",
                round_cents(ratios.dti_after_loan),
                thresholds.dti_poor_below
            ));
        }
        if ratios.loan_to_value.is_some_and(|ltv| ltv > dec!(100)) {
            warnings.push("Loan amount exceeds the property value".into());
        }

        let credit_score = app.credit_score();
        let dti_category = self.model.dti_category(ratios.dti_after_loan);
        let risk = self.model.assess(&RiskInputs {
            dti_after_loan: ratios.dti_after_loan,
            credit_score,
            loan_to_value: ratios.loan_to_value,
            extra_payment: params.extra_payment,
        });

        // Totals for the contractual payment alone, so they stay comparable
        // whether or not an extra payment was supplied.
        let baseline_interest = schedule.total_interest + schedule.interest_saved;
        let analysis = AnalysisResult {
            monthly_payment: schedule.monthly_payment,
            total_interest: baseline_interest,
            total_payments: baseline_interest + schedule.total_principal,
            debt_to_income: DebtToIncome {
                before_loan: round_cents(ratios.dti_before_loan),
                after_loan: round_cents(ratios.dti_after_loan),
                category: dti_category,
            },
            loan_to_income: round_cents(ratios.loan_to_income),
            payment_to_income: round_cents(ratios.payment_to_income),
            loan_to_value: ratios.loan_to_value.map(round_cents),
            credit_score: CreditScoreBlock {
                value: credit_score,
                category: self.model.credit_category(credit_score),
            },
            debt_service_coverage_ratio: round_cents(ratios.debt_service_coverage),
        };

        let payoff = payoff_summary(&schedule);
        let html = narrative::render_html(&NarrativeContext {
            overall_risk: risk.overall_risk,
            dti_after_loan: analysis.debt_to_income.after_loan,
            dti_category,
            recommendations: &risk.recommendations,
            monthly_payment: analysis.monthly_payment,
            total_interest: analysis.total_interest,
            term_years: app.loan_term as u32,
            extra_payment: schedule.extra_payment,
            interest_saved: payoff.interest_saved,
            months_saved: payoff.months_saved,
        });

        let output = LoanAnalysis {
            analysis,
            risk,
            schedule_summary: schedule_summary(&schedule),
            payoff,
            visualization_available: true,
            recommendations: html,
        };

        let elapsed = start.elapsed().as_micros() as u64;
        Ok(with_metadata(
            "Loan affordability and rule-based risk assessment",
            &serde_json::json!({
                "loan_amount": app.loan_amount.to_string(),
                "interest_rate": app.interest_rate.to_string(),
                "loan_term_years": app.loan_term,
                "dti_bands": [
                    thresholds.dti_excellent_below.to_string(),
                    thresholds.dti_good_below.to_string(),
                    thresholds.dti_fair_below.to_string(),
                    thresholds.dti_poor_below.to_string(),
                ],
            }),
            warnings,
            elapsed,
            output,
        ))
    }

    /// Complete month-by-month schedule for the application.
    pub fn payment_schedule(
        &self,
        app: &LoanApplication,
    ) -> LoanResult<ComputationOutput<AmortizationSchedule>> {
        generate_schedule(&app.to_parameters()?)
    }

    /// Narrative guidance, as HTML and as plain text.
    pub fn recommendations(&self, app: &LoanApplication) -> LoanResult<Recommendations> {
        let html = self.analyze(app)?.result.recommendations;
        let plain_text = narrative::sanitize_html(&html);
        Ok(Recommendations {
            recommendations: html,
            plain_text,
        })
    }

    pub fn visualization(&self, app: &LoanApplication) -> LoanResult<Visualization> {
        let schedule = self.payment_schedule(app)?.result;
        Ok(visualization::visualize(&schedule))
    }

    pub fn enhanced_visualization(&self, app: &LoanApplication) -> LoanResult<EnhancedVisualization> {
        let schedule = self.payment_schedule(app)?.result;
        Ok(visualization::visualize_enhanced(&schedule))
    }
}

fn payoff_summary(schedule: &AmortizationSchedule) -> PayoffSummary {
    PayoffSummary {
        months_to_payoff: schedule.periods,
        years_to_payoff: round_cents(Decimal::from(schedule.periods) / dec!(12)),
        months_saved: schedule.periods_saved,
        interest_saved: schedule.interest_saved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoanError;
    use crate::risk::{RiskLevel, RiskThresholds};

    fn application() -> LoanApplication {
        LoanApplication {
            income: dec!(85000),
            loan_amount: dec!(325000),
            loan_term: 30,
            interest_rate: dec!(6.5),
            credit_score: 720,
            monthly_debt: dec!(1200),
            property_value: Some(dec!(400000)),
            extra_payment: None,
        }
    }

    #[test]
    fn test_analyze_headline_figures() {
        let out = LoanAdvisor::default().analyze(&application()).unwrap();
        let a = &out.result.analysis;
        assert_eq!(a.monthly_payment, dec!(2054.22));
        assert_eq!(a.loan_to_value, Some(dec!(81.25)));
        assert_eq!(a.credit_score.category, CreditCategory::Good);
        // (1200 + 2054.22) / 7083.33 ≈ 45.94%
        assert_eq!(a.debt_to_income.category, DtiCategory::Poor);
        assert_eq!(out.result.risk.overall_risk, RiskLevel::High);
        assert_eq!(a.total_payments, a.total_interest + dec!(325000));
    }

    #[test]
    fn test_analyze_summary_and_payoff() {
        let out = LoanAdvisor::default().analyze(&application()).unwrap();
        let r = &out.result;
        assert_eq!(r.schedule_summary.len(), 4);
        assert_eq!(r.schedule_summary[3].period, 360);
        assert_eq!(r.payoff.months_to_payoff, 360);
        assert_eq!(r.payoff.years_to_payoff, dec!(30));
        assert_eq!(r.payoff.months_saved, 0);
        assert!(r.recommendations.contains("<h3>Loan Assessment</h3>"));
    }

    #[test]
    fn test_extra_payment_reported_in_payoff() {
        let mut app = application();
        app.extra_payment = Some(dec!(500));
        let out = LoanAdvisor::default().analyze(&app).unwrap();
        let r = &out.result;
        assert!(r.payoff.months_saved > 0);
        assert!(r.payoff.interest_saved > Decimal::ZERO);
        assert!(r
            .risk
            .recommendations
            .iter()
            .all(|rec| !rec.starts_with("Making extra payments")));
    }

    #[test]
    fn test_custom_risk_model_drives_categories() {
        let thresholds = RiskThresholds {
            dti_excellent_below: dec!(40),
            dti_good_below: dec!(46),
            dti_fair_below: dec!(50),
            dti_poor_below: dec!(60),
            ..RiskThresholds::default()
        };
        let advisor = LoanAdvisor::new(RiskModel::new(thresholds.clone()).unwrap());
        assert_eq!(advisor.risk_model().thresholds(), &thresholds);

        let out = advisor.analyze(&application()).unwrap();
        assert_eq!(out.result.analysis.debt_to_income.category, DtiCategory::Good);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_invalid_application_rejected() {
        let mut app = application();
        app.credit_score = 200;
        assert!(matches!(
            LoanAdvisor::default().analyze(&app),
            Err(LoanError::Validation(_))
        ));
    }

    #[test]
    fn test_recommendations_plain_text() {
        let recs = LoanAdvisor::default().recommendations(&application()).unwrap();
        assert!(recs.plain_text.starts_with("** Loan Assessment **"));
        assert!(!recs.plain_text.contains('<'));
    }
}
