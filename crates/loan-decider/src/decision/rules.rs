use serde::{Deserialize, Serialize};

use super::domain::{IncomeSource, LoanApplication};
use super::policy::LendingPolicy;

/// Why an application was turned down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    Retired {
        age: u32,
        retirement_age: u32,
    },
    PrincipalExceedsIncomeShare {
        annual_principal: f64,
        limit: f64,
    },
    CatastrophicRating {
        rating: i32,
        floor: i32,
    },
    Unemployed,
    PaymentExceedsIncomeShare {
        annual_payment: f64,
        limit: f64,
    },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::Retired {
                age,
                retirement_age,
            } => format!("rejected: applicant aged {age} has reached retirement age {retirement_age}"),
            RejectionReason::PrincipalExceedsIncomeShare {
                annual_principal,
                limit,
            } => format!(
                "rejected: yearly principal {annual_principal:.4} exceeds income share {limit:.4}"
            ),
            RejectionReason::CatastrophicRating { rating, floor } => {
                format!("rejected: credit rating {rating} is at or below {floor}")
            }
            RejectionReason::Unemployed => "rejected: applicant has no income source".to_string(),
            RejectionReason::PaymentExceedsIncomeShare {
                annual_payment,
                limit,
            } => format!(
                "rejected: yearly payment {annual_payment:.4} exceeds income share {limit:.4}"
            ),
        }
    }

    /// True when the rejection came from the eligibility gate rather than the payment check.
    pub fn is_gate(&self) -> bool {
        !matches!(self, RejectionReason::PaymentExceedsIncomeShare { .. })
    }
}

/// An application that passed the eligibility gate.
///
/// Only [`check_eligibility`] builds one, so pricing never sees an unemployed
/// applicant or a rating at or below the floor.
#[derive(Debug, Clone, Copy)]
pub struct EligibleApplication<'a> {
    application: &'a LoanApplication,
}

impl<'a> EligibleApplication<'a> {
    pub fn application(&self) -> &'a LoanApplication {
        self.application
    }
}

/// Runs the four gate predicates in order and stops at the first failure.
///
/// Amounts must already be validated: the affordability predicate divides by the term.
pub fn check_eligibility<'a>(
    application: &'a LoanApplication,
    policy: &LendingPolicy,
) -> Result<EligibleApplication<'a>, RejectionReason> {
    let gate = &policy.eligibility;

    let retirement_age = gate.retirement_age(application.sex);
    if application.age >= retirement_age {
        return Err(RejectionReason::Retired {
            age: application.age,
            retirement_age,
        });
    }

    let annual_principal = application.requested_amount / application.term_years;
    let limit = application.annual_income / gate.principal_income_divisor;
    if annual_principal > limit {
        return Err(RejectionReason::PrincipalExceedsIncomeShare {
            annual_principal,
            limit,
        });
    }

    if application.credit_rating <= gate.rating_floor {
        return Err(RejectionReason::CatastrophicRating {
            rating: application.credit_rating,
            floor: gate.rating_floor,
        });
    }

    if application.income_source == IncomeSource::Unemployed {
        return Err(RejectionReason::Unemployed);
    }

    Ok(EligibleApplication { application })
}

/// Final affordability check on the computed yearly payment; the limit is inclusive.
pub(crate) fn check_payment(
    annual_payment: f64,
    annual_income: f64,
    policy: &LendingPolicy,
) -> Result<(), RejectionReason> {
    let limit = annual_income / policy.eligibility.payment_income_divisor;
    if annual_payment > limit {
        return Err(RejectionReason::PaymentExceedsIncomeShare {
            annual_payment,
            limit,
        });
    }
    Ok(())
}
