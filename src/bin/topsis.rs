// TOPSIS command-line entry point
//
// Purpose: Score and rank the alternatives in a table file
// Usage: topsis <InputDataFile> <Weights> <Impacts> <ResultFileName>

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use topsis_scorer::{
    read_decision_table, write_results, Impact, ImpactVector, TableOptions, TopsisScorer,
    WeightVector,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXAMPLE: &str = "Example: topsis data.csv \"1,1,1,1,1\" \"+,+,-,+,-\" result.csv";

/// Rank alternatives with TOPSIS
#[derive(Debug, Parser)]
#[command(name = "topsis", version, about, after_help = EXAMPLE)]
struct Args {
    /// Input table (CSV or Parquet): label column followed by criteria columns
    input: PathBuf,

    /// Comma-separated weights, one per criterion
    #[arg(allow_hyphen_values = true)]
    weights: String,

    /// Comma-separated impacts: '+' or 'max' (higher is better), '-' or 'min' (lower is better)
    #[arg(allow_hyphen_values = true)]
    impacts: String,

    /// Output file (.csv for the full table, .json for result rows)
    output: PathBuf,

    /// Field delimiter for delimited input and output
    #[arg(long, env = "TOPSIS_DELIMITER", default_value_t = ',')]
    delimiter: char,

    /// Name of the appended score column
    #[arg(long, env = "TOPSIS_SCORE_COLUMN", default_value = "Score")]
    score_column: String,

    /// Name of the appended rank column
    #[arg(long, env = "TOPSIS_RANK_COLUMN", default_value = "Rank")]
    rank_column: String,
}

impl Args {
    fn table_options(&self) -> Result<TableOptions> {
        if !self.delimiter.is_ascii() {
            anyhow::bail!("Delimiter must be a single ASCII character, got '{}'", self.delimiter);
        }
        Ok(TableOptions {
            delimiter: self.delimiter as u8,
            score_column: self.score_column.clone(),
            rank_column: self.rank_column.clone(),
        })
    }
}

fn main() -> ExitCode {
    // Initialize tracing (structured logging on stderr)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "topsis_scorer=info,topsis=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            eprintln!("{}", EXAMPLE);
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let options = args.table_options()?;

    // Parse arguments before touching any file
    let weights = WeightVector::parse(&args.weights).context("Invalid weights argument")?;
    let impacts = ImpactVector::parse(&args.impacts).context("Invalid impacts argument")?;

    let table = read_decision_table(&args.input, &options)?;

    let scorer = TopsisScorer::new(weights, impacts);
    tracing::debug!(
        "Weights {:?}, impacts [{}]",
        scorer.weights().as_slice(),
        impact_symbols(scorer.impacts())
    );
    let report = scorer.score_detailed(&table.matrix)?;
    tracing::debug!("Distance to ideal best: {:?}", report.distance_best);
    tracing::debug!("Distance to ideal worst: {:?}", report.distance_worst);

    write_results(&table, &report.rows, &args.output, &options)?;
    tracing::info!("Results saved to {}", args.output.display());

    Ok(())
}

/// Impacts in their canonical `+`/`-` form, comma-separated
fn impact_symbols(impacts: &ImpactVector) -> String {
    impacts
        .as_slice()
        .iter()
        .map(Impact::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_four_positionals_with_leading_minus() {
        let args = Args::try_parse_from(["topsis", "data.csv", "1,1,1", "-,+,-", "out.csv"]).unwrap();
        assert_eq!(args.impacts, "-,+,-");
        assert_eq!(args.delimiter, ',');
        assert_eq!(args.score_column, "Score");
    }

    #[test]
    fn test_wrong_argument_count_is_error() {
        let err = Args::try_parse_from(["topsis", "data.csv", "1,1,1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = Args::try_parse_from(["topsis", "a", "b", "c", "d", "e"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_impact_symbols_are_canonical() {
        let impacts = ImpactVector::parse(" MAX,min,-,+ ").unwrap();
        assert_eq!(impact_symbols(&impacts), "+,-,-,+");

        let scorer = TopsisScorer::new(WeightVector::parse("1,2,0,1").unwrap(), impacts);
        assert_eq!(scorer.weights().as_slice(), &[1.0, 2.0, 0.0, 1.0]);
        assert_eq!(impact_symbols(scorer.impacts()), "+,-,-,+");
    }

    #[test]
    fn test_table_options_reject_non_ascii_delimiter() {
        let args = Args::try_parse_from([
            "topsis", "--delimiter", "§", "data.csv", "1,1", "+,+", "out.csv",
        ])
        .unwrap();
        assert!(args.table_options().is_err());
    }
}
