use serde::{Deserialize, Serialize};

use super::error::DecisionError;
use super::policy::LendingPolicy;
use super::rules::EligibleApplication;

/// Additive parts of the loan rate, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBreakdown {
    pub base_rate: f64,
    pub objective_modifier: f64,
    pub income_source_modifier: f64,
    pub amount_modifier: f64,
}

impl RateBreakdown {
    pub fn modifiers(&self) -> f64 {
        self.objective_modifier + self.income_source_modifier + self.amount_modifier
    }

    pub fn total(&self) -> f64 {
        self.base_rate + self.modifiers()
    }
}

/// Priced terms for an eligible application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub max_amount: f64,
    pub approved_amount: f64,
    /// Percent per year, e.g. `10.25`.
    pub rate: f64,
    pub breakdown: RateBreakdown,
    pub annual_payment: f64,
}

pub(crate) fn quote(
    eligible: &EligibleApplication<'_>,
    policy: &LendingPolicy,
) -> Result<LoanQuote, DecisionError> {
    let application = eligible.application();

    let max_amount = max_amount(eligible, policy)?;
    let approved_amount = application.requested_amount.min(max_amount);
    if approved_amount <= 0.0 {
        return Err(DecisionError::invalid_amount(
            "approved_amount",
            approved_amount,
        ));
    }

    let breakdown = RateBreakdown {
        base_rate: policy.base_rate,
        objective_modifier: policy.objective_modifier(application.objective)?,
        income_source_modifier: policy.source_modifier(application.income_source)?,
        amount_modifier: amount_modifier(approved_amount),
    };
    let rate = breakdown.total();
    let annual_payment = annual_payment(approved_amount, application.term_years, rate);

    Ok(LoanQuote {
        max_amount,
        approved_amount,
        rate,
        breakdown,
        annual_payment,
    })
}

fn max_amount(
    eligible: &EligibleApplication<'_>,
    policy: &LendingPolicy,
) -> Result<f64, DecisionError> {
    let application = eligible.application();
    let by_source = policy.max_amount_for_source(application.income_source)?;
    let by_rating = policy.max_amount_for_rating(application.credit_rating)?;
    Ok(by_source.min(by_rating))
}

/// Larger loans are cheaper: one point off per order of magnitude.
pub fn amount_modifier(approved_amount: f64) -> f64 {
    -approved_amount.log10()
}

/// Yearly payment with simple interest over the whole term; `rate` is a percentage.
pub fn annual_payment(approved_amount: f64, term_years: f64, rate: f64) -> f64 {
    approved_amount * (1.0 + term_years * rate / 100.0) / term_years
}
