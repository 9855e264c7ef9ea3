use loan_guidance_core::analysis::LoanAdvisor;
use loan_guidance_core::request::LoanApplication;
use loan_guidance_core::risk::{
    CreditCategory, DtiCategory, FactorImpact, RiskLevel, RiskModel, RiskThresholds,
};
use loan_guidance_core::LoanError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn comfortable_borrower() -> LoanApplication {
    // 150k income, 300k loan at 6%: payment 1798.65 on 12.5k monthly income
    LoanApplication {
        income: dec!(150000),
        loan_amount: dec!(300000),
        loan_term: 30,
        interest_rate: dec!(6.0),
        credit_score: 780,
        monthly_debt: dec!(400),
        property_value: Some(dec!(400000)),
        extra_payment: Some(dec!(200)),
    }
}

// ===========================================================================
// Analysis
// ===========================================================================

#[test]
fn test_low_risk_borrower() {
    let out = LoanAdvisor::default().analyze(&comfortable_borrower()).unwrap();
    let r = &out.result;

    assert_eq!(r.analysis.monthly_payment, dec!(1798.65));
    // 400 / 12500 = 3.2%; (400 + 1798.65) / 12500 = 17.59%
    assert_eq!(r.analysis.debt_to_income.before_loan, dec!(3.2));
    assert_eq!(r.analysis.debt_to_income.after_loan, dec!(17.59));
    assert_eq!(r.analysis.debt_to_income.category, DtiCategory::Excellent);
    assert_eq!(r.analysis.loan_to_income, dec!(200));
    assert_eq!(r.analysis.loan_to_value, Some(dec!(75)));
    assert_eq!(r.analysis.credit_score.category, CreditCategory::Excellent);
    assert_eq!(r.analysis.debt_service_coverage_ratio, dec!(5.69));

    assert_eq!(r.risk.overall_risk, RiskLevel::Low);
    assert_eq!(r.risk.recommendations.len(), 1);
    assert_eq!(
        r.risk.risk_factors["debt_to_income"].impact,
        FactorImpact::Positive
    );
    assert!(out.warnings.is_empty());
}

#[test]
fn test_nominal_totals_ignore_extra_payment() {
    let advisor = LoanAdvisor::default();
    let with_extra = advisor.analyze(&comfortable_borrower()).unwrap().result;
    let mut app = comfortable_borrower();
    app.extra_payment = None;
    let without = advisor.analyze(&app).unwrap().result;

    assert_eq!(with_extra.analysis.total_interest, without.analysis.total_interest);
    assert_eq!(without.analysis.total_interest, dec!(347515.44));
    assert!(with_extra.payoff.months_to_payoff < without.payoff.months_to_payoff);
}

#[test]
fn test_stretched_borrower_warnings() {
    let app = LoanApplication {
        income: dec!(40000),
        loan_amount: dec!(420000),
        loan_term: 30,
        interest_rate: dec!(7.5),
        credit_score: 560,
        monthly_debt: dec!(900),
        property_value: Some(dec!(400000)),
        extra_payment: None,
    };
    let out = LoanAdvisor::default().analyze(&app).unwrap();

    assert_eq!(out.result.analysis.debt_to_income.category, DtiCategory::Critical);
    assert_eq!(out.result.risk.overall_risk, RiskLevel::High);
    assert_eq!(out.warnings.len(), 2);
    assert!(out.warnings.iter().any(|w| w.contains("exceeds the property value")));
}

#[test]
fn test_configured_thresholds_change_classification() {
    let strict = RiskModel::new(RiskThresholds {
        dti_excellent_below: dec!(15),
        ..RiskThresholds::default()
    })
    .unwrap();
    let out = LoanAdvisor::new(strict).analyze(&comfortable_borrower()).unwrap();
    assert_eq!(out.result.analysis.debt_to_income.category, DtiCategory::Good);
    assert_eq!(out.result.risk.overall_risk, RiskLevel::LowModerate);
}

#[test]
fn test_validation_errors_reported_per_field() {
    let mut app = comfortable_borrower();
    app.loan_term = 60;
    app.monthly_debt = dec!(-1);
    match LoanAdvisor::default().payment_schedule(&app) {
        Err(LoanError::Validation(errors)) => {
            let fields: Vec<&str> = errors.fields().map(|(f, _)| f).collect();
            assert_eq!(fields, vec!["loan_term", "monthly_debt"]);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

// ===========================================================================
// Visualization and narrative
// ===========================================================================

#[test]
fn test_visualization_series() {
    let advisor = LoanAdvisor::default();
    let app = comfortable_borrower();
    let schedule = advisor.payment_schedule(&app).unwrap().result;
    let viz = advisor.visualization(&app).unwrap();

    assert_eq!(viz.chart.points.len(), schedule.entries.len() + 1);
    assert_eq!(viz.chart.points[0].balance, dec!(300000));
    assert_eq!(viz.chart.points.last().unwrap().balance, Decimal::ZERO);

    let enhanced = advisor.enhanced_visualization(&app).unwrap();
    let years = (schedule.periods + 11) / 12;
    assert_eq!(enhanced.yearly.len() as u32, years);
    assert_eq!(enhanced.image_data, viz.image_data);
}

#[test]
fn test_recommendations_mention_extra_payment_savings() {
    let recs = LoanAdvisor::default()
        .recommendations(&comfortable_borrower())
        .unwrap();
    assert!(recs.recommendations.contains("extra payment of $200.00 per month"));
    assert!(recs.plain_text.contains("- Your financial profile appears strong for this loan."));
}
