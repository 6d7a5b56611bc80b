//! sepsischeck - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use sepsischeck::{
    cli::{Args, Commands, PredictArgs, Verbosity},
    client::{ClientConfig, PredictionClient},
    config::Config,
    display,
    form::FormPrompter,
    telemetry::{TelemetryCollector, TelemetryDisplay},
    types::{ModelKind, PredictionRequest, PredictionResult},
    PredictError,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
        config.validate()?;
    }
    if !config.telemetry.color_output {
        colored::control::set_override(false);
    }

    let default_verbosity =
        Verbosity::from_config(&config.telemetry.default_verbosity).unwrap_or(Verbosity::Normal);
    let verbosity = args.verbosity_or(default_verbosity);

    let code = match &args.command {
        Some(Commands::About) => {
            display::show_about();
            0
        }
        Some(Commands::Predict(predict)) => run_predict(&config, predict, verbosity).await?,
        Some(Commands::Health) => run_health(&config, verbosity).await?,
        Some(Commands::Config) => {
            show_config(&config, &args)?;
            0
        }
        None => {
            display::show_about();
            println!("Usage:");
            println!("  sepsischeck predict --interactive   Fill the form field by field");
            println!("  sepsischeck predict --prg .. --age .. --insurance yes|no ...");
            println!("  sepsischeck health                  Check the prediction service");
            println!("  sepsischeck config                  Show configuration");
            println!();
            0
        }
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Handle `predict`; returns the process exit code
async fn run_predict(config: &Config, predict: &PredictArgs, verbosity: Verbosity) -> Result<i32> {
    let telemetry = TelemetryCollector::new();
    let client = PredictionClient::new(ClientConfig::from(&config.api))?
        .with_telemetry(telemetry.clone());
    let trace = TelemetryDisplay::new(telemetry, verbosity);
    let model = predict.model.unwrap_or(config.form.default_model);

    if predict.interactive {
        let mut prompter = FormPrompter::new()?;
        loop {
            if verbosity.show_progress() {
                println!("\n{}", "Predict Sepsis".bold().cyan());
            }
            // Ctrl-D or Ctrl-C on any field ends the session
            let Some((model, request)) = prompter.fill(model)? else {
                break;
            };
            if let Err(e) = submit(&client, &trace, model, &request, verbosity, predict.json).await {
                display::show_error(&e);
            }
        }
        trace.print_summary();
        return Ok(0);
    }

    let request = match predict.form_input().and_then(|input| input.validate()) {
        Ok(request) => request,
        Err(e) => {
            display::show_error(&e);
            return Ok(e.exit_code());
        }
    };

    let code = match submit(&client, &trace, model, &request, verbosity, predict.json).await {
        Ok(_) => 0,
        Err(e) => {
            display::show_error(&e);
            e.exit_code()
        }
    };
    trace.print_summary();
    Ok(code)
}

/// One form submission: spinner, exchange, verdict
async fn submit(
    client: &PredictionClient,
    trace: &TelemetryDisplay,
    model: ModelKind,
    request: &PredictionRequest,
    verbosity: Verbosity,
    json: bool,
) -> std::result::Result<PredictionResult, PredictError> {
    let mark = trace.event_count();
    let spinner = display::processing_spinner(verbosity.show_progress() && !json);
    let outcome = client.predict(model, request).await;
    spinner.finish_and_clear();
    trace.print_trace(mark);

    let result = outcome?;
    if json {
        println!("{}", display::result_json(model, &result)?);
    } else {
        display::show_result(&result);
    }
    Ok(result)
}

/// Handle `health`; returns the process exit code
async fn run_health(config: &Config, verbosity: Verbosity) -> Result<i32> {
    let telemetry = TelemetryCollector::new();
    let client = PredictionClient::new(ClientConfig::from(&config.api))?
        .with_telemetry(telemetry.clone());
    let trace = TelemetryDisplay::new(telemetry, verbosity);

    let alive = client.check_liveness().await?;
    trace.print_trace(0);

    if alive {
        println!("{} Prediction service reachable at {}", "✓".green(), client.root_url());
        Ok(0)
    } else {
        println!("{} {}", "✗".red(), PredictError::ServiceUnreachable.to_string().red());
        Ok(PredictError::ServiceUnreachable.exit_code())
    }
}

fn show_config(config: &Config, args: &Args) -> Result<()> {
    let source = match &args.config {
        Some(path) => path.display().to_string(),
        None => match Config::default_path() {
            Some(path) if path.exists() => path.display().to_string(),
            _ => "built-in defaults".to_string(),
        },
    };
    println!("{} {}", "Configuration source:".bold(), source);
    println!();
    println!("{}", config.to_toml()?);
    Ok(())
}
