use clap::Parser;
use console::{style, Term};
use std::process::ExitCode as StdExitCode;
use std::time::Duration;
use telnyx_preflight::{
    cli::{Cli, Commands, InitArgs, RunArgs, ValidateArgs},
    config::{validate_config, Config},
    error::{AppError, ExitCode},
    output::{get_formatter, write_results, OutputFormatter},
    probes::{all_probes, ProbeContext},
    suite::SuiteRunner,
};

#[tokio::main]
async fn main() -> StdExitCode {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            e.exit_code()
        }
    };

    StdExitCode::from(exit_code as u8)
}

async fn run(cli: Cli) -> telnyx_preflight::Result<ExitCode> {
    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::default_config()
    };

    // Apply environment variable overrides
    config.apply_env_overrides();

    match cli.command {
        Commands::Run(args) => run_suite(args, &config, cli.verbose, cli.quiet).await,
        Commands::Init(args) => run_init(args),
        Commands::Validate(args) => run_validate(args),
        Commands::ListProbes => run_list_probes(),
    }
}

/// Resolve the API key: flag/env, then config, then a hidden prompt.
/// An empty key is fatal before any network activity.
fn resolve_api_key(args: &RunArgs, config: &Config, term: &Term) -> telnyx_preflight::Result<String> {
    let key = args
        .api_key
        .clone()
        .or_else(|| config.auth.api_key.clone());

    let key = match key {
        Some(k) => k,
        None if !args.non_interactive && term.is_term() => {
            term.write_str("Enter your Telnyx API key: ")?;
            term.read_secure_line()?
        }
        None => String::new(),
    };

    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(AppError::Auth("an API key is required".to_string()));
    }
    Ok(key)
}

/// Resolve the optional destination phone: flag, then config, then prompt.
fn resolve_phone(args: &RunArgs, config: &Config, term: &Term) -> telnyx_preflight::Result<Option<String>> {
    let phone = match args
        .phone
        .clone()
        .or_else(|| config.numbers.test_phone.clone())
    {
        Some(p) => p,
        None if !args.non_interactive && term.is_term() => {
            term.write_str("Enter test phone number (optional, e.g. +15551234567): ")?;
            term.read_line()?
        }
        None => String::new(),
    };

    let phone = phone.trim().to_string();
    if phone.is_empty() {
        return Ok(None);
    }
    if !phone.starts_with('+') {
        eprintln!(
            "{} Phone number should include a country code (e.g. +15551234567)",
            style("Warning:").yellow().bold()
        );
    }
    Ok(Some(phone))
}

async fn run_suite(
    args: RunArgs,
    config: &Config,
    verbose: bool,
    quiet: bool,
) -> telnyx_preflight::Result<ExitCode> {
    let term = Term::stdout();

    let api_key = resolve_api_key(&args, config, &term)?;
    let phone = resolve_phone(&args, config, &term)?;
    let from_number = args
        .from_number
        .clone()
        .or_else(|| config.numbers.from_number.clone());

    if phone.is_none() && !quiet {
        println!(
            "{} No test phone provided; SMS and voice probes will be recorded as failed",
            style("Warning:").yellow().bold()
        );
    }

    let base_url = args.base_url.as_deref().unwrap_or(&config.global.base_url);
    let timeout = Duration::from_secs(args.timeout.unwrap_or(config.global.timeout_seconds));

    let ctx = ProbeContext::new(&api_key, base_url, timeout)?
        .with_phone(phone)
        .with_from_number(from_number)
        .with_verbose(verbose);

    let runner = SuiteRunner::new(ctx).with_quiet(quiet);

    if !quiet {
        println!("{} Running Telnyx preflight probes...", style("[*]").cyan());
    }

    let report = tokio::select! {
        report = runner.run() => report,
        _ = tokio::signal::ctrl_c() => {
            println!("\n{} Run interrupted by user", style("[!]").yellow());
            return Ok(ExitCode::Success);
        }
    };

    // Print the summary
    let use_colors = term.is_term() && !quiet;
    let formatter = get_formatter(args.output.into(), use_colors);
    print!("{}", formatter.format(&report));

    // Dump the results mapping; a write failure downgrades to a warning so
    // the verdict still prints and the process still exits cleanly.
    let results_path = args.results_file.clone().unwrap_or_else(|| config.results_file());
    match write_results(&report.probes, &results_path) {
        Ok(()) => {
            if !quiet {
                println!("\nResults saved to: {}", results_path.display());
            }
        }
        Err(e) => eprintln!(
            "{} Could not write results file: {}",
            style("Warning:").yellow().bold(),
            e
        ),
    }

    // Readiness verdict
    if report.ready {
        println!(
            "\n{} Ready for platform integration",
            style("[+]").green().bold()
        );
        println!("Next steps:");
        println!("  1. Purchase phone numbers for SMS/voice");
        println!("  2. Configure messaging profiles and call control connections");
        println!("  3. Test with real verification workflows");
    } else {
        println!(
            "\n{} Setup incomplete - resolve API connectivity or balance issues before integrating",
            style("[!]").yellow().bold()
        );
    }

    Ok(ExitCode::Success)
}

fn run_init(args: InitArgs) -> telnyx_preflight::Result<ExitCode> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(AppError::Config(format!(
            "File already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    let config = Config::default_config();
    let toml = config.to_toml()?;
    std::fs::write(output_path, toml)?;

    println!(
        "{} Configuration file created: {}",
        style("[+]").green(),
        output_path.display()
    );
    println!("Edit the file to add your API key and numbers.");

    Ok(ExitCode::Success)
}

fn run_validate(args: ValidateArgs) -> telnyx_preflight::Result<ExitCode> {
    let config_path = &args.config;

    if !config_path.exists() {
        return Err(AppError::FileNotFound(config_path.display().to_string()));
    }

    let config = Config::from_file(config_path)?;
    let warnings = validate_config(&config)?;

    println!(
        "{} Configuration file is valid: {}",
        style("[+]").green(),
        config_path.display()
    );

    if !warnings.is_empty() {
        println!("\n{}", style("Warnings:").yellow());
        for warning in &warnings {
            println!("  {} {}", style("!").yellow(), warning);
        }
    }

    println!("\n{}", style("Configuration Summary:").bold());
    println!("  Base URL: {}", config.global.base_url);
    println!("  Timeout: {}s", config.global.timeout_seconds);
    println!("  Results file: {}", config.results_file().display());
    let key_status = if config.auth.api_key.is_some() {
        style("set").green()
    } else {
        style("not set").dim()
    };
    println!("  API key: {}", key_status);

    if warnings.is_empty() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::ConfigError)
    }
}

fn run_list_probes() -> telnyx_preflight::Result<ExitCode> {
    println!("\nProbes (run in this order)");
    println!("==========================");
    for probe in all_probes() {
        println!(
            "  {} - {}",
            style(probe.key()).cyan(),
            probe.name()
        );
    }
    println!();
    Ok(ExitCode::Success)
}
