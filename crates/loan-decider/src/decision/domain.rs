use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DecisionError;

/// Sex as recorded for the statutory retirement-age rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub const fn label(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

/// Where the applicant's income comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSource {
    Unemployed,
    Hired,
    OwnBusiness,
    Passive,
}

impl IncomeSource {
    pub const ALL: [IncomeSource; 4] = [
        IncomeSource::Unemployed,
        IncomeSource::Hired,
        IncomeSource::OwnBusiness,
        IncomeSource::Passive,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            IncomeSource::Unemployed => "unemployed",
            IncomeSource::Hired => "hired",
            IncomeSource::OwnBusiness => "own_business",
            IncomeSource::Passive => "passive",
        }
    }

    /// Sources that survive the eligibility gate and therefore need policy entries.
    pub fn lendable() -> impl Iterator<Item = IncomeSource> {
        Self::ALL
            .into_iter()
            .filter(|source| *source != IncomeSource::Unemployed)
    }
}

/// Declared purpose of the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanObjective {
    Mortgage,
    BusinessImprovement,
    CarLoan,
    ConsumerLoan,
}

impl LoanObjective {
    pub const ALL: [LoanObjective; 4] = [
        LoanObjective::Mortgage,
        LoanObjective::BusinessImprovement,
        LoanObjective::CarLoan,
        LoanObjective::ConsumerLoan,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LoanObjective::Mortgage => "mortgage",
            LoanObjective::BusinessImprovement => "business_improvement",
            LoanObjective::CarLoan => "car_loan",
            LoanObjective::ConsumerLoan => "consumer_loan",
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })+
    };
}

display_label!(Sex, IncomeSource, LoanObjective);

fn normalize(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace(['-', ' '], "_")
}

impl FromStr for Sex {
    type Err = DecisionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(DecisionError::invalid_enumeration("sex", raw)),
        }
    }
}

impl FromStr for IncomeSource {
    type Err = DecisionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(raw);
        Self::ALL
            .into_iter()
            .find(|source| source.label() == normalized)
            .ok_or_else(|| DecisionError::invalid_enumeration("income_source", raw))
    }
}

impl FromStr for LoanObjective {
    type Err = DecisionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(raw);
        Self::ALL
            .into_iter()
            .find(|objective| objective.label() == normalized)
            .ok_or_else(|| DecisionError::invalid_enumeration("objective", raw))
    }
}

/// Applicant attributes for a single decision.
///
/// Amounts share one unit (the policy caps are expressed in it); the term is in years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub age: u32,
    pub sex: Sex,
    pub income_source: IncomeSource,
    pub annual_income: f64,
    pub credit_rating: i32,
    pub requested_amount: f64,
    pub term_years: f64,
    pub objective: LoanObjective,
}

impl LoanApplication {
    /// Rejects amounts the decision arithmetic cannot work with.
    ///
    /// Runs before the eligibility gate, which divides by the term.
    pub fn validate(&self) -> Result<(), DecisionError> {
        if !self.requested_amount.is_finite() || self.requested_amount <= 0.0 {
            return Err(DecisionError::invalid_amount(
                "requested_amount",
                self.requested_amount,
            ));
        }
        if !self.term_years.is_finite() || self.term_years <= 0.0 {
            return Err(DecisionError::invalid_amount("term_years", self.term_years));
        }
        if !self.annual_income.is_finite() || self.annual_income < 0.0 {
            return Err(DecisionError::invalid_amount(
                "annual_income",
                self.annual_income,
            ));
        }
        Ok(())
    }
}
