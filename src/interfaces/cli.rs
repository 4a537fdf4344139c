use crate::domain::model::GuardrailMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nl2sparql")]
#[command(about = "Turn a question into a SPARQL SELECT query over the fuel-station RDF mapping.")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Model identifier sent to the chat-completion endpoint
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Guardrail mode: lenient, strict or reject
    #[arg(long)]
    pub mode: Option<GuardrailMode>,

    /// Use this file as schema description instead of the built-in mapping
    #[arg(short = 's', long)]
    pub schema: Option<PathBuf>,

    /// Treat the schema file as a vocabulary list rather than a mapping
    #[arg(long, requires = "schema")]
    pub vocabulary: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the prompt without calling the model
    #[arg(long)]
    pub show_prompt: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Question text
    #[arg(num_args = 1..)]
    pub question: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Slice the source datasets
    #[command(subcommand)]
    Dataset(DatasetCommand),
}

#[derive(Subcommand, Debug)]
pub enum DatasetCommand {
    /// Keep CSV rows whose column equals a value
    FilterCsv {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value = "dep_code")]
        column: String,
        #[arg(long, default_value = "06")]
        value: String,
    },
    /// Keep JSON array records whose field equals a value
    FilterJson {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value = "dep_code")]
        field: String,
        #[arg(long, default_value = "06")]
        value: String,
    },
    /// Keep the first N records of a JSON array
    SampleJson {
        input: PathBuf,
        output: PathBuf,
        #[arg(short = 'n', long, default_value_t = 200)]
        count: usize,
    },
}
