use crate::infra::load_decider;
use clap::Args;
use loan_decider::decision::{
    DecisionOutcome, IncomeSource, LoanApplication, LoanObjective, RateBreakdown, Sex,
};
use loan_decider::error::AppError;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// Applicant age in whole years
    #[arg(long)]
    pub(crate) age: u32,
    /// male | female (m/f accepted)
    #[arg(long)]
    pub(crate) sex: Sex,
    /// unemployed | hired | own_business | passive
    #[arg(long)]
    pub(crate) income_source: IncomeSource,
    /// Yearly income, in the same unit as the requested amount
    #[arg(long)]
    pub(crate) annual_income: f64,
    /// Credit rating on the -2..=2 scale
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) credit_rating: i32,
    /// Amount asked for
    #[arg(long)]
    pub(crate) requested_amount: f64,
    /// Loan term in years
    #[arg(long)]
    pub(crate) term_years: f64,
    /// mortgage | business_improvement | car_loan | consumer_loan
    #[arg(long)]
    pub(crate) objective: LoanObjective,
    /// JSON lending policy to use instead of LOAN_POLICY_PATH / the standard tables
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
    /// Print the full outcome as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl DecideArgs {
    fn application(&self) -> LoanApplication {
        LoanApplication {
            age: self.age,
            sex: self.sex,
            income_source: self.income_source,
            annual_income: self.annual_income,
            credit_rating: self.credit_rating,
            requested_amount: self.requested_amount,
            term_years: self.term_years,
            objective: self.objective,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct PolicyArgs {
    /// JSON lending policy to validate and print
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
}

pub(crate) fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let decider = load_decider(args.policy.clone())?;
    let application = args.application();
    let outcome = decider.evaluate(&application)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &outcome).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        render_outcome(&mut out, &application, &outcome)?;
    }
    Ok(())
}

pub(crate) fn run_policy(args: PolicyArgs) -> Result<(), AppError> {
    let decider = load_decider(args.policy)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, decider.policy()).map_err(io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

fn render_outcome<W: Write>(
    out: &mut W,
    application: &LoanApplication,
    outcome: &DecisionOutcome,
) -> io::Result<()> {
    writeln!(
        out,
        "Loan decision for {} applicant aged {} ({}, rating {})",
        application.sex, application.age, application.income_source, application.credit_rating
    )?;
    writeln!(
        out,
        "  requested {} over {} year(s) for {}",
        application.requested_amount, application.term_years, application.objective
    )?;

    if let Some(quote) = &outcome.quote {
        writeln!(
            out,
            "  approved amount {:.4} (cap {:.4})",
            quote.approved_amount, quote.max_amount
        )?;
        render_rate(out, quote.rate, &quote.breakdown)?;
        writeln!(out, "  yearly payment {:.4}", quote.annual_payment)?;
    }

    writeln!(out, "{}", outcome.summary())
}

fn render_rate<W: Write>(out: &mut W, rate: f64, breakdown: &RateBreakdown) -> io::Result<()> {
    writeln!(
        out,
        "  rate {:.4}% = base {:.2} + objective {:+.2} + income {:+.2} + amount {:+.4}",
        rate,
        breakdown.base_rate,
        breakdown.objective_modifier,
        breakdown.income_source_modifier,
        breakdown.amount_modifier
    )
}
