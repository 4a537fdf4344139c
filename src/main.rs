// Main entry point
use clap::Parser;
use colored::Colorize;
use nl2sparql::application::{dataset, prompt};
use nl2sparql::domain::model::TranslationRequest;
use nl2sparql::infrastructure::config::{self, load_config};
use nl2sparql::infrastructure::logging::init_logging;
use nl2sparql::interfaces::cli::{Cli, Command, DatasetCommand};
use nl2sparql::presentation::output::{format_error, format_translation};
use nl2sparql::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            eprintln!("\nInterrupted, shutting down...");
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let config = load_config()?;

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if let Some(Command::Dataset(command)) = &cli.command {
        return run_dataset(command);
    }
    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }

    let state = match AppState::new(config, &cli) {
        Ok(state) => state,
        Err(e) => fail(&e),
    };

    if cli.status {
        print_status(&state, &cli);
        return Ok(());
    }

    let question = cli.question.join(" ");
    if question.trim().is_empty() {
        eprintln!("{}", "Please provide a question".red());
        std::process::exit(1);
    }

    if cli.show_prompt {
        let request = TranslationRequest {
            schema: &state.schema,
            question: question.trim(),
        };
        for message in prompt::build_messages(&request) {
            println!("{} {}", format!("[{}]", message.role).cyan(), message.content);
        }
        return Ok(());
    }

    // Credential check happens here, before any request
    let translator = match state.translator() {
        Ok(translator) => translator,
        Err(e) => fail(&e),
    };

    tokio::select! {
        result = translator.translate(&question) => match result {
            Ok(translation) => println!("{}", format_translation(&translation, cli.json)?),
            Err(e) => fail(&e),
        },
        _ = shutdown_rx => {
            eprintln!("Translation interrupted");
            std::process::exit(130);
        }
    }

    Ok(())
}

fn fail(err: &nl2sparql::TranslateError) -> ! {
    eprint!("{}", format_error(err));
    std::process::exit(1);
}

fn run_dataset(command: &DatasetCommand) -> anyhow::Result<()> {
    match command {
        DatasetCommand::FilterCsv {
            input,
            output,
            column,
            value,
        } => {
            let kept = dataset::filter_csv(input, output, column, value)?;
            println!("Rows where {} = {}: {}", column, value, kept);
            println!("{} {}", "✔ Wrote".green(), output.display());
        }
        DatasetCommand::FilterJson {
            input,
            output,
            field,
            value,
        } => {
            let kept = dataset::filter_json(input, output, field, value)?;
            println!("Records where {} = {}: {}", field, value, kept);
            println!("{} {}", "✔ Wrote".green(), output.display());
        }
        DatasetCommand::SampleJson {
            input,
            output,
            count,
        } => {
            let kept = dataset::sample_json(input, output, *count)?;
            println!("Kept {} of the first {} records", kept, count);
            println!("{} {}", "✔ Wrote".green(), output.display());
        }
    }
    Ok(())
}

fn print_status(state: &AppState, cli: &Cli) {
    println!("{}", "nl2sparql Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!("Endpoint: {}", state.config.backend.endpoint);
    println!("Model: {}", state.options.model);
    println!("Timeout: {}s", state.options.timeout.as_secs());
    println!("Guardrail mode: {}", state.options.mode);

    let key_env = &state.config.backend.api_key_env;
    let key_set = std::env::var(key_env)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false);
    if key_set {
        println!("API key ({}): Configured", key_env);
    } else {
        println!("API key ({}): {}", key_env, "Not set".yellow());
    }

    let schema_source = cli
        .schema
        .as_ref()
        .map(|p| p.display().to_string())
        .or_else(|| state.config.schema.path.clone().filter(|p| !p.is_empty()))
        .unwrap_or_else(|| "built-in mapping".to_string());
    println!(
        "Schema: {} ({:?}, {} bytes)",
        schema_source,
        state.schema.kind(),
        state.schema.text().len()
    );
}
