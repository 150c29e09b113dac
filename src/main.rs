// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{Context, Error};
use clap::{Args, Parser, Subcommand};

use tplfields::{
    document::{emit_document_to_string, parse_document_str},
    get_required_fields, get_sample_document, logging,
    template_source::read_templates,
    validate, RandomProvider, Synthesizer,
};

#[derive(Parser, Debug)]
#[command(name = "tplfields", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Args, Debug, Clone)]
struct GlobalArgs {
    /// Only print errors.
    #[arg(global = true, long, short, conflicts_with = "verbose")]
    quiet: bool,

    /// Use verbose output. Repeat for more detail.
    #[arg(global = true, action = clap::ArgAction::Count, long, short, conflicts_with = "quiet")]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the data fields the templates reference.
    Fields {
        /// Template files.
        #[arg(required = true)]
        templates: Vec<PathBuf>,
    },

    /// Print a sample document satisfying the templates, as YAML.
    Sample {
        /// Template files.
        #[arg(required = true)]
        templates: Vec<PathBuf>,

        /// Seed for reproducible sample values.
        #[arg(long)]
        seed: Option<u64>,

        /// Use only the fixed fallback values.
        #[arg(long, conflicts_with = "seed")]
        no_provider: bool,

        /// Write the document to this file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Check a YAML or JSON document for fields the templates need.
    Validate {
        /// Template files.
        #[arg(required = true)]
        templates: Vec<PathBuf>,

        /// The document to check.
        #[arg(long, short)]
        document: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.global.quiet, cli.global.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:?}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode, Error> {
    match command {
        Command::Fields { templates } => {
            let texts = read_templates(&templates)?;
            let fields = get_required_fields(&texts);
            for field in fields.sorted() {
                println!("{}", field);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Sample {
            templates,
            seed,
            no_provider,
            output,
        } => {
            let texts = read_templates(&templates)?;
            let synthesizer = match (no_provider, seed) {
                (true, _) => Synthesizer::new(),
                (false, Some(seed)) => Synthesizer::new().with_provider(RandomProvider::seeded(seed)),
                (false, None) => Synthesizer::new().with_provider(RandomProvider::new()),
            };

            let doc = get_sample_document(&texts, &synthesizer);
            let out_str = emit_document_to_string(&doc)?;
            match output {
                Some(output) => {
                    fs::write(&output, out_str).with_context(|| format!("failed to write {}", output.display()))?;
                }
                None => print!("{}", out_str),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { templates, document } => {
            let texts = read_templates(&templates)?;
            let doc_str = fs::read_to_string(&document)
                .with_context(|| format!("failed to read document {}", document.display()))?;
            let doc = parse_document_str(&doc_str).with_context(|| format!("invalid document {}", document.display()))?;

            let fields = get_required_fields(&texts);
            let result = validate(&fields, &doc);
            if result.valid {
                println!("valid: all {} fields present", fields.len());
                return Ok(ExitCode::SUCCESS);
            }

            println!("missing fields:");
            for field in &result.missing_fields {
                println!("  {}", field);
            }
            Ok(ExitCode::from(1))
        }
    }
}
