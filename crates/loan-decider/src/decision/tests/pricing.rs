use super::common::*;
use crate::decision::domain::{IncomeSource, LoanObjective};
use crate::decision::pricing::{amount_modifier, annual_payment};
use crate::decision::{DecisionError, LendingPolicy, LoanDecider};

#[test]
fn baseline_quote_matches_published_rate() {
    let outcome = decider().evaluate(&application()).expect("evaluates");
    let quote = outcome.quote.expect("quote present");

    assert_close(quote.max_amount, 10.0);
    assert_close(quote.approved_amount, 1.0);
    assert_close(quote.rate, 10.25);
    assert_close(quote.breakdown.amount_modifier, 0.0);
    assert_close(quote.annual_payment, 1.1025);
    assert_eq!(outcome.decision.annual_payment(), Some(quote.annual_payment));
}

#[test]
fn income_source_caps_are_idempotent_above_the_cap() {
    let cases = [
        (IncomeSource::Passive, 1.0, 10.5),
        (IncomeSource::Hired, 5.0, 9.75),
        (IncomeSource::OwnBusiness, 10.0, 10.25),
    ];

    for (source, cap, rate) in cases {
        let expected = expected_payment(cap, 1.0, rate);

        let mut application = application();
        application.income_source = source;
        application.requested_amount = cap;
        assert_close(approved_payment(&application), expected);

        application.requested_amount = cap + 0.01;
        assert_close(approved_payment(&application), expected);
    }
}

#[test]
fn rating_caps_are_idempotent_above_the_cap() {
    let cases = [(-1, 1.0), (0, 5.0), (1, 10.0), (2, 10.0)];

    for (rating, cap) in cases {
        let expected = expected_payment(cap, 1.0, 10.25);

        let mut application = application();
        application.credit_rating = rating;
        application.requested_amount = cap;
        assert_close(approved_payment(&application), expected);

        application.requested_amount = cap + 0.01;
        assert_close(approved_payment(&application), expected);
    }
}

#[test]
fn objective_modifiers_shift_the_rate() {
    let cases = [
        (LoanObjective::CarLoan, 10.25),
        (LoanObjective::Mortgage, 8.25),
        (LoanObjective::BusinessImprovement, 9.75),
        (LoanObjective::ConsumerLoan, 11.75),
    ];

    for (objective, rate) in cases {
        let mut application = application();
        application.objective = objective;
        assert_close(
            approved_payment(&application),
            expected_payment(1.0, 1.0, rate),
        );
    }
}

#[test]
fn changing_objective_moves_rate_by_modifier_difference() {
    let policy = LendingPolicy::standard();
    let mut application = application();
    application.requested_amount = 5.0;
    application.term_years = 3.0;

    application.objective = LoanObjective::Mortgage;
    let mortgage = decider().evaluate(&application).expect("evaluates");
    application.objective = LoanObjective::ConsumerLoan;
    let consumer = decider().evaluate(&application).expect("evaluates");

    let mortgage = mortgage.quote.expect("quote");
    let consumer = consumer.quote.expect("quote");
    let modifier_gap = policy.rate_modifier_by_objective[&LoanObjective::ConsumerLoan]
        - policy.rate_modifier_by_objective[&LoanObjective::Mortgage];

    assert_close(consumer.rate - mortgage.rate, modifier_gap);
    assert_close(
        consumer.annual_payment - mortgage.annual_payment,
        consumer.approved_amount * modifier_gap / 100.0,
    );
}

#[test]
fn amount_modifier_rewards_larger_loans() {
    let mut application = application();

    application.requested_amount = 0.1;
    assert_close(
        approved_payment(&application),
        expected_payment(0.1, 1.0, 10.25),
    );

    application.requested_amount = 10.0;
    assert_close(
        approved_payment(&application),
        expected_payment(10.0, 1.0, 10.25),
    );

    assert_close(amount_modifier(0.1), 1.0);
    assert_close(amount_modifier(10.0), -1.0);
}

#[test]
fn term_spreads_payment_over_years() {
    let mut application = application();
    application.term_years = 20.0;

    let payment = approved_payment(&application);
    assert_close(payment, expected_payment(1.0, 20.0, 10.25));
    assert_close(payment, 0.1525);
}

#[test]
fn payment_formula_treats_rate_as_percentage() {
    assert_close(annual_payment(1.0, 1.0, 10.25), 1.1025);
    assert_close(annual_payment(10.0, 2.0, 5.0), 5.5);
}

#[test]
fn undefined_rating_above_scale_fails_lookup() {
    let mut application = application();
    application.credit_rating = 3;

    let err = decider().decide(&application).expect_err("rating 3 is undefined");
    assert_eq!(err, DecisionError::UndefinedRating(3));
}

#[test]
fn zero_cap_fails_before_logarithm() {
    let mut policy = LendingPolicy::standard();
    policy
        .max_amount_by_income_source
        .insert(IncomeSource::Passive, 0.0);
    let decider = LoanDecider::new(policy).expect("zero caps are structurally valid");

    let mut application = application();
    application.income_source = IncomeSource::Passive;

    match decider.decide(&application) {
        Err(DecisionError::InvalidAmount { field, value }) => {
            assert_eq!(field, "approved_amount");
            assert_eq!(value, 0.0);
        }
        other => panic!("expected invalid amount, got {other:?}"),
    }
}
