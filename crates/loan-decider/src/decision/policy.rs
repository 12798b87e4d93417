use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{IncomeSource, LoanObjective, Sex};
use super::error::{DecisionError, PolicyError};

const STANDARD_BASE_RATE: f64 = 10.0;

/// Thresholds used by the eligibility gate and the final affordability check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityThresholds {
    pub retirement_age_female: u32,
    pub retirement_age_male: u32,
    /// Yearly principal may not exceed `annual_income / principal_income_divisor`.
    pub principal_income_divisor: f64,
    /// Yearly payment may not exceed `annual_income / payment_income_divisor`.
    pub payment_income_divisor: f64,
    /// Ratings at or below the floor are rejected outright.
    pub rating_floor: i32,
    /// Highest rating the scale defines.
    pub rating_ceiling: i32,
}

impl EligibilityThresholds {
    pub fn retirement_age(&self, sex: Sex) -> u32 {
        match sex {
            Sex::Female => self.retirement_age_female,
            Sex::Male => self.retirement_age_male,
        }
    }
}

impl Default for EligibilityThresholds {
    fn default() -> Self {
        Self {
            retirement_age_female: 60,
            retirement_age_male: 65,
            principal_income_divisor: 3.0,
            payment_income_divisor: 2.0,
            rating_floor: -2,
            rating_ceiling: 2,
        }
    }
}

/// Enumeration-keyed lending tables: caps, base rate and rate modifiers.
///
/// Rates and modifiers are in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingPolicy {
    pub base_rate: f64,
    pub max_amount_by_income_source: BTreeMap<IncomeSource, f64>,
    pub max_amount_by_rating: BTreeMap<i32, f64>,
    pub rate_modifier_by_income_source: BTreeMap<IncomeSource, f64>,
    pub rate_modifier_by_objective: BTreeMap<LoanObjective, f64>,
    #[serde(default)]
    pub eligibility: EligibilityThresholds,
}

impl LendingPolicy {
    /// The house policy every deployment starts from.
    pub fn standard() -> Self {
        Self {
            base_rate: STANDARD_BASE_RATE,
            max_amount_by_income_source: BTreeMap::from([
                (IncomeSource::Passive, 1.0),
                (IncomeSource::Hired, 5.0),
                (IncomeSource::OwnBusiness, 10.0),
            ]),
            max_amount_by_rating: BTreeMap::from([(-1, 1.0), (0, 5.0), (1, 10.0), (2, 10.0)]),
            rate_modifier_by_income_source: BTreeMap::from([
                (IncomeSource::Passive, 0.5),
                (IncomeSource::Hired, -0.25),
                (IncomeSource::OwnBusiness, 0.25),
            ]),
            rate_modifier_by_objective: BTreeMap::from([
                (LoanObjective::Mortgage, -2.0),
                (LoanObjective::CarLoan, 0.0),
                (LoanObjective::BusinessImprovement, -0.5),
                (LoanObjective::ConsumerLoan, 1.5),
            ]),
            eligibility: EligibilityThresholds::default(),
        }
    }

    /// Reads a JSON policy file and validates it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(raw)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Checks that every value the gate lets through has a table entry.
    ///
    /// Unemployed applicants and ratings at or below the floor never reach the
    /// tables, so they need no entries.
    pub fn validate(&self) -> Result<(), PolicyError> {
        finite("base_rate", "base", self.base_rate)?;

        let gate = &self.eligibility;
        positive(
            "eligibility",
            "principal_income_divisor",
            gate.principal_income_divisor,
        )?;
        positive(
            "eligibility",
            "payment_income_divisor",
            gate.payment_income_divisor,
        )?;
        if gate.rating_ceiling <= gate.rating_floor {
            return Err(PolicyError::InvalidValue {
                table: "eligibility",
                key: "rating_ceiling".to_string(),
                value: f64::from(gate.rating_ceiling),
            });
        }

        for source in IncomeSource::lendable() {
            let cap = required(
                "max_amount_by_income_source",
                &self.max_amount_by_income_source,
                &source,
            )?;
            non_negative("max_amount_by_income_source", source, cap)?;

            let modifier = required(
                "rate_modifier_by_income_source",
                &self.rate_modifier_by_income_source,
                &source,
            )?;
            finite("rate_modifier_by_income_source", source, modifier)?;
        }

        for rating in (gate.rating_floor + 1)..=gate.rating_ceiling {
            let cap = required("max_amount_by_rating", &self.max_amount_by_rating, &rating)?;
            non_negative("max_amount_by_rating", rating, cap)?;
        }

        for objective in LoanObjective::ALL {
            let modifier = required(
                "rate_modifier_by_objective",
                &self.rate_modifier_by_objective,
                &objective,
            )?;
            finite("rate_modifier_by_objective", objective, modifier)?;
        }

        Ok(())
    }

    pub(crate) fn max_amount_for_source(&self, source: IncomeSource) -> Result<f64, DecisionError> {
        lookup(
            "max_amount_by_income_source",
            &self.max_amount_by_income_source,
            source,
        )
    }

    pub(crate) fn max_amount_for_rating(&self, rating: i32) -> Result<f64, DecisionError> {
        self.max_amount_by_rating
            .get(&rating)
            .copied()
            .ok_or(DecisionError::UndefinedRating(rating))
    }

    pub(crate) fn source_modifier(&self, source: IncomeSource) -> Result<f64, DecisionError> {
        lookup(
            "rate_modifier_by_income_source",
            &self.rate_modifier_by_income_source,
            source,
        )
    }

    pub(crate) fn objective_modifier(&self, objective: LoanObjective) -> Result<f64, DecisionError> {
        lookup(
            "rate_modifier_by_objective",
            &self.rate_modifier_by_objective,
            objective,
        )
    }
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

fn lookup<K>(table: &'static str, map: &BTreeMap<K, f64>, key: K) -> Result<f64, DecisionError>
where
    K: Ord + Display,
{
    map.get(&key)
        .copied()
        .ok_or_else(|| DecisionError::MissingPolicyEntry {
            table,
            key: key.to_string(),
        })
}

fn required<K>(table: &'static str, map: &BTreeMap<K, f64>, key: &K) -> Result<f64, PolicyError>
where
    K: Ord + Display,
{
    map.get(key).copied().ok_or_else(|| PolicyError::MissingEntry {
        table,
        key: key.to_string(),
    })
}

fn finite(table: &'static str, key: impl Display, value: f64) -> Result<(), PolicyError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(table, key, value))
    }
}

fn non_negative(table: &'static str, key: impl Display, value: f64) -> Result<(), PolicyError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(table, key, value))
    }
}

fn positive(table: &'static str, key: impl Display, value: f64) -> Result<(), PolicyError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(table, key, value))
    }
}

fn invalid(table: &'static str, key: impl Display, value: f64) -> PolicyError {
    PolicyError::InvalidValue {
        table,
        key: key.to_string(),
        value,
    }
}
