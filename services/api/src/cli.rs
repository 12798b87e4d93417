use crate::decide::{run_decide, run_policy, DecideArgs, PolicyArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_decider::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Decider",
    about = "Evaluate loan applications from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Decide a single loan application
    Decide(DecideArgs),
    /// Print the active lending policy as JSON
    Policy(PolicyArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Decide(args) => run_decide(args),
        Command::Policy(args) => run_policy(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use loan_decider::decision::{IncomeSource, LoanObjective, Sex};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn decide_accepts_negative_ratings_and_labels() {
        let cli = Cli::try_parse_from([
            "loan-decider",
            "decide",
            "--age",
            "30",
            "--sex",
            "F",
            "--income-source",
            "hired",
            "--annual-income",
            "60",
            "--credit-rating",
            "-1",
            "--requested-amount",
            "3",
            "--term-years",
            "2",
            "--objective",
            "consumer-loan",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Decide(args)) => {
                assert_eq!(args.sex, Sex::Female);
                assert_eq!(args.income_source, IncomeSource::Hired);
                assert_eq!(args.credit_rating, -1);
                assert_eq!(args.objective, LoanObjective::ConsumerLoan);
                assert!(!args.json);
            }
            other => panic!("expected decide command, got {other:?}"),
        }
    }

    #[test]
    fn decide_rejects_unknown_income_source() {
        let result = Cli::try_parse_from([
            "loan-decider",
            "decide",
            "--age",
            "30",
            "--sex",
            "m",
            "--income-source",
            "lottery",
            "--annual-income",
            "60",
            "--credit-rating",
            "1",
            "--requested-amount",
            "3",
            "--term-years",
            "2",
            "--objective",
            "mortgage",
        ]);

        assert!(result.is_err());
    }
}
