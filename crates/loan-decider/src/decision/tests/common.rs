use axum::response::Response;
use serde_json::Value;

use crate::decision::domain::{IncomeSource, LoanApplication, LoanObjective, Sex};
use crate::decision::LoanDecider;

/// Simplest approvable applicant: car loan (no objective modifier), top rating,
/// own business (+0.25), one unit over one year.
pub(super) fn application() -> LoanApplication {
    LoanApplication {
        age: 20,
        sex: Sex::Male,
        income_source: IncomeSource::OwnBusiness,
        annual_income: 100.0,
        credit_rating: 2,
        requested_amount: 1.0,
        term_years: 1.0,
        objective: LoanObjective::CarLoan,
    }
}

pub(super) fn decider() -> LoanDecider {
    LoanDecider::standard()
}

/// Yearly payment for a given amount and term where `rate` excludes the amount modifier.
pub(super) fn expected_payment(amount: f64, years: f64, rate: f64) -> f64 {
    amount * (1.0 + years * (rate - amount.log10()) / 100.0) / years
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn approved_payment(application: &LoanApplication) -> f64 {
    let decision = decider()
        .decide(application)
        .expect("application evaluates");
    assert!(decision.is_approved(), "expected approval for {application:?}");
    decision.annual_payment().expect("approved decisions carry a payment")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
