//! HeartScope - submits patient metrics to the prediction service and reports the risk.

use std::env;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use heartscope_client::{assess, Config, OutcomeError, PredictionService, RequestGateway};
use heartscope_common::{PredictionInput, RiskReport};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "Usage: heartscope [--version] [--health] [--json] [--input <file.json>]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    health_only: bool,
    json: bool,
    input: Option<String>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(Args),
    Version,
    Help,
}

fn parse_args<I>(argv: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = Args::default();
    let mut iter = argv.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--health" => args.health_only = true,
            "--json" => args.json = true,
            "--input" => {
                let path = iter
                    .next()
                    .ok_or_else(|| format!("--input requires a path\n{}", USAGE))?;
                args.input = Some(path);
            }
            other => return Err(format!("Unknown argument: {}\n{}", other, USAGE)),
        }
    }

    Ok(Command::Run(args))
}

fn load_input(path: Option<&str>) -> Result<PredictionInput, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read input file {}: {}", path, e))?;
            let input = serde_json::from_str(&raw)
                .map_err(|e| format!("Invalid input file {}: {}", path, e))?;
            Ok(input)
        }
        None => Ok(PredictionInput::default()),
    }
}

/// Message shown to the user for a failed assessment.
fn describe_failure(err: &OutcomeError) -> String {
    match err {
        OutcomeError::Timeout => {
            "The server is still warming up. Please wait 30-60 seconds and try again.".to_string()
        }
        OutcomeError::ConnectionError => {
            "Cannot connect to the prediction server. Check your connection and try again shortly."
                .to_string()
        }
        OutcomeError::ServerError { message, .. } => {
            format!("The server rejected the request: {}", message)
        }
        OutcomeError::UnknownError { message } => message.clone(),
    }
}

fn print_report(report: &RiskReport) {
    println!("Assessment Result ({})", report.assessed_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Risk index: {:.1}%", report.risk_percentage);
    println!("  Risk level: {} ({})", report.level, report.level.color());
    println!();
    println!("{}", report.summary());
    if report.clinical_action_advised {
        println!();
        println!(
            "Clinical Action Advised: the calculated probability exceeds the standard \
             observational threshold. A formal consultation with a healthcare provider is recommended."
        );
    }
}

async fn run(args: Args, config: Config) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let gateway = RequestGateway::from_config(&config.api);
    tracing::info!(
        "Using prediction service at {} (timeout {}s)",
        gateway.base_url(),
        config.api.timeout_secs
    );

    if args.health_only {
        let status = gateway.health().await;
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(if status.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let input = load_input(args.input.as_deref())?;

    if let Err(violations) = input.validate() {
        eprintln!("Input is outside the accepted ranges:");
        for violation in &violations {
            eprintln!("  {}", violation);
        }
        return Ok(ExitCode::from(2));
    }

    match assess(&gateway, input).await {
        Ok(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", describe_failure(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = match parse_args(env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Version) => {
            println!("heartscope {}", VERSION);
            return Ok(ExitCode::SUCCESS);
        }
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return Ok(ExitCode::SUCCESS);
        }
        Err(usage) => {
            eprintln!("{}", usage);
            return Ok(ExitCode::from(2));
        }
    };

    // Load configuration
    let config = Config::load().map_err(|e| format!("Failed to load configuration: {}", e))?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(args, config).await
}
