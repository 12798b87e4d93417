//! Loan eligibility decisions.
//!
//! An application is validated, passed through the eligibility gate, priced
//! against the lending policy, and finally checked for payment affordability.
//! Policy tables are only consulted for applications the gate let through.

pub mod domain;
mod error;
pub mod policy;
pub mod pricing;
pub mod router;
pub mod rules;

#[cfg(test)]
mod tests;

pub use domain::{IncomeSource, LoanApplication, LoanObjective, Sex};
pub use error::{DecisionError, PolicyError};
pub use policy::{EligibilityThresholds, LendingPolicy};
pub use pricing::{LoanQuote, RateBreakdown};
pub use router::decision_router;
pub use rules::{check_eligibility, EligibleApplication, RejectionReason};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Approval flag plus the yearly payment, which is present exactly when approved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "DecisionRecord", into = "DecisionRecord")]
pub struct LoanDecision {
    annual_payment: Option<f64>,
}

impl LoanDecision {
    pub fn approved(annual_payment: f64) -> Self {
        Self {
            annual_payment: Some(annual_payment),
        }
    }

    pub fn rejected() -> Self {
        Self {
            annual_payment: None,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.annual_payment.is_some()
    }

    pub fn annual_payment(&self) -> Option<f64> {
        self.annual_payment
    }
}

#[derive(Serialize, Deserialize)]
struct DecisionRecord {
    approved: bool,
    annual_payment: Option<f64>,
}

impl From<LoanDecision> for DecisionRecord {
    fn from(decision: LoanDecision) -> Self {
        Self {
            approved: decision.is_approved(),
            annual_payment: decision.annual_payment,
        }
    }
}

impl From<DecisionRecord> for LoanDecision {
    fn from(record: DecisionRecord) -> Self {
        match (record.approved, record.annual_payment) {
            (true, Some(payment)) => Self::approved(payment),
            _ => Self::rejected(),
        }
    }
}

/// Decision together with the trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub decision: LoanDecision,
    /// Present whenever the gate passed, including payment rejections.
    pub quote: Option<LoanQuote>,
    pub rejection: Option<RejectionReason>,
}

impl DecisionOutcome {
    pub fn summary(&self) -> String {
        match (&self.rejection, &self.quote) {
            (Some(reason), _) => reason.summary(),
            (None, Some(quote)) => format!(
                "approved {:.4} at {:.4}% for a yearly payment of {:.4}",
                quote.approved_amount, quote.rate, quote.annual_payment
            ),
            (None, None) => "approved".to_string(),
        }
    }
}

/// Stateless evaluator holding a validated lending policy.
#[derive(Debug, Clone)]
pub struct LoanDecider {
    policy: LendingPolicy,
}

impl LoanDecider {
    /// Validates the policy once so that individual decisions never have to.
    pub fn new(policy: LendingPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn standard() -> Self {
        Self {
            policy: LendingPolicy::standard(),
        }
    }

    pub fn policy(&self) -> &LendingPolicy {
        &self.policy
    }

    pub fn decide(&self, application: &LoanApplication) -> Result<LoanDecision, DecisionError> {
        self.evaluate(application).map(|outcome| outcome.decision)
    }

    pub fn evaluate(
        &self,
        application: &LoanApplication,
    ) -> Result<DecisionOutcome, DecisionError> {
        application.validate()?;

        let eligible = match check_eligibility(application, &self.policy) {
            Ok(eligible) => eligible,
            Err(reason) => return Ok(Self::reject(reason, None)),
        };

        let quote = pricing::quote(&eligible, &self.policy)?;
        if let Err(reason) =
            rules::check_payment(quote.annual_payment, application.annual_income, &self.policy)
        {
            return Ok(Self::reject(reason, Some(quote)));
        }

        debug!(
            approved_amount = quote.approved_amount,
            rate = quote.rate,
            annual_payment = quote.annual_payment,
            "loan approved"
        );

        Ok(DecisionOutcome {
            decision: LoanDecision::approved(quote.annual_payment),
            quote: Some(quote),
            rejection: None,
        })
    }

    fn reject(reason: RejectionReason, quote: Option<LoanQuote>) -> DecisionOutcome {
        debug!(reason = %reason.summary(), "loan rejected");
        DecisionOutcome {
            decision: LoanDecision::rejected(),
            quote,
            rejection: Some(reason),
        }
    }
}

impl Default for LoanDecider {
    fn default() -> Self {
        Self::standard()
    }
}
