use loan_decider::decision::{
    DecisionError, IncomeSource, LendingPolicy, LoanApplication, LoanDecider, LoanObjective,
    RejectionReason, Sex,
};

fn ordinary_applicant() -> LoanApplication {
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

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn ordinary_applicant_gets_base_rate_plus_business_modifier() {
    let decider = LoanDecider::standard();

    let outcome = decider
        .evaluate(&ordinary_applicant())
        .expect("application evaluates");

    assert!(outcome.decision.is_approved());
    let quote = outcome.quote.expect("quote present");
    assert_close(quote.rate, 10.25);
    assert_close(quote.breakdown.base_rate, 10.0);
    assert_close(quote.breakdown.income_source_modifier, 0.25);
    assert_close(quote.breakdown.objective_modifier, 0.0);
    assert_close(
        outcome.decision.annual_payment().expect("payment"),
        1.1025,
    );
}

#[test]
fn unemployed_applicant_is_rejected_without_payment() {
    let decider = LoanDecider::standard();
    let mut application = ordinary_applicant();
    application.income_source = IncomeSource::Unemployed;

    let decision = decider.decide(&application).expect("application evaluates");

    assert!(!decision.is_approved());
    assert_eq!(decision.annual_payment(), None);
}

#[test]
fn capped_requests_price_like_requests_at_the_cap() {
    let decider = LoanDecider::standard();
    let mut application = ordinary_applicant();

    application.requested_amount = 10.0;
    let at_cap = decider.decide(&application).expect("evaluates");
    application.requested_amount = 10.01;
    let above_cap = decider.decide(&application).expect("evaluates");
    application.requested_amount = 30.0;
    let far_above_cap = decider.decide(&application).expect("evaluates");

    assert!(at_cap.is_approved());
    assert_eq!(at_cap, above_cap);
    assert_eq!(at_cap, far_above_cap);
}

#[test]
fn every_gate_failure_yields_rejection_without_payment() {
    let decider = LoanDecider::standard();

    let mut retired = ordinary_applicant();
    retired.sex = Sex::Female;
    retired.age = 60;

    let mut overextended = ordinary_applicant();
    overextended.annual_income = 3.0;
    overextended.requested_amount = 1.0001;

    let mut low_rating = ordinary_applicant();
    low_rating.credit_rating = -2;

    let mut unemployed = ordinary_applicant();
    unemployed.income_source = IncomeSource::Unemployed;

    for application in [retired, overextended, low_rating, unemployed] {
        let outcome = decider.evaluate(&application).expect("evaluates");
        assert!(!outcome.decision.is_approved(), "{application:?}");
        assert_eq!(outcome.decision.annual_payment(), None);
        assert!(outcome
            .rejection
            .as_ref()
            .is_some_and(RejectionReason::is_gate));
    }
}

#[test]
fn custom_policy_changes_pricing() {
    let mut policy = LendingPolicy::standard();
    policy.base_rate = 12.0;
    let decider = LoanDecider::new(policy).expect("policy validates");

    let outcome = decider
        .evaluate(&ordinary_applicant())
        .expect("application evaluates");

    assert_close(outcome.quote.expect("quote").rate, 12.25);
}

#[test]
fn zero_request_is_an_input_error() {
    let decider = LoanDecider::standard();
    let mut application = ordinary_applicant();
    application.requested_amount = 0.0;

    let err = decider.decide(&application).expect_err("zero amount");
    assert!(matches!(err, DecisionError::InvalidAmount { .. }));
}
