//! `solidref` command-line entry point.
//!
//! # Responsibility
//! - Map CLI arguments onto `CorpusConfig` and `CorpusService` queries.
//! - Render results as text or JSON; report failures on stderr.

mod cli;

use clap::Parser;
use cli::{Cli, Command, GlobalArgs};
use log::info;
use serde::Serialize;
use solidref_core::{
    default_log_level, init_logging, CorpusConfig, CorpusService, Example, NotFoundError,
    Principle, PrincipleId, SearchQuery,
};
use std::error::Error;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    setup_logging(&cli.global)?;

    if let Command::Ping = cli.command {
        println!("solidref_core ping={}", solidref_core::ping());
        println!("solidref_core version={}", solidref_core::core_version());
        return Ok(());
    }

    let search_limit = match &cli.command {
        Command::Search { limit, .. } => *limit,
        _ => None,
    };
    let config = CorpusConfig::from_parts(
        cli.global.corpus_dir.as_deref(),
        cli.global.variant.as_deref(),
        search_limit,
    )?;
    let service = CorpusService::from_config(&config)?;
    let json = cli.global.json;
    let variant = service.default_variant().as_str();

    match cli.command {
        Command::Ping => {}
        Command::List => {
            let principles = service.all();
            if json {
                return print_json(&principles);
            }
            for principle in principles {
                println!("{}  {}", principle.id, principle.name);
            }
        }
        Command::Show { id } => {
            let principle = service.lookup(&id)?;
            if json {
                return print_json(principle);
            }
            print_principle(principle);
        }
        Command::Examples { id, kind } => {
            let examples: Vec<&Example> = match kind {
                Some(kind) => service.examples_of_kind(&id, kind.into())?,
                None => service.examples_for(&id)?.iter().collect(),
            };
            if json {
                return print_json(&examples);
            }
            for example in examples {
                print_example(example);
            }
        }
        Command::Cite { marker } => {
            let url = service.resolve(marker, variant)?;
            if json {
                return print_json(&serde_json::json!({
                    "marker": marker,
                    "variant": variant,
                    "url": url,
                }));
            }
            println!("{url}");
        }
        Command::Citations { id } => {
            let citations = service.citations_for(&id, variant)?;
            if json {
                return print_json(&citations);
            }
            for citation in citations {
                println!("[{}] {}", citation.marker, citation.url);
            }
        }
        Command::Variants => {
            let corpus = service.corpus();
            let rows: Vec<_> = service
                .variants()
                .into_iter()
                .map(|variant| {
                    serde_json::json!({
                        "variant": variant.as_str(),
                        "title": corpus.title(variant.as_str()),
                    })
                })
                .collect();
            if json {
                return print_json(&rows);
            }
            for variant in service.variants() {
                let title = corpus.title(variant.as_str()).unwrap_or("-");
                println!("{variant}  {title}");
            }
        }
        Command::Search {
            terms,
            principle,
            limit: _,
            raw,
        } => {
            let mut query = SearchQuery::new(terms.join(" "));
            query.limit = config.search_limit;
            query.raw_fts_syntax = raw;
            if let Some(principle) = principle {
                query.principle = Some(
                    PrincipleId::parse(&principle)
                        .ok_or_else(|| NotFoundError::principle(principle.trim()))?,
                );
            }
            let hits = service.search(&query)?;
            info!(
                "event=cli_search module=cli status=ok hits={} raw={}",
                hits.len(),
                raw
            );
            if json {
                return print_json(&hits);
            }
            for hit in hits {
                println!("{} [{}] {}", hit.principle, hit.title, hit.snippet);
            }
        }
    }

    Ok(())
}

fn setup_logging(global: &GlobalArgs) -> CliResult<()> {
    let Some(log_dir) = global.log_dir.as_deref() else {
        return Ok(());
    };
    let level = global.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, log_dir)?;
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_principle(principle: &Principle) {
    println!("{} - {}", principle.id, principle.name);
    println!();
    println!("Definition: {}", principle.definition);
    if !principle.goal.is_empty() {
        println!("Goal: {}", principle.goal);
    }
    if !principle.benefits.is_empty() {
        println!("Benefits:");
        for benefit in &principle.benefits {
            println!("  - {benefit}");
        }
    }
}

fn print_example(example: &Example) {
    println!("== {} {}", example.principle, example.kind.as_str());
    if !example.explanation.is_empty() {
        println!("{}", example.explanation);
        println!();
    }
    println!("```{}", example.language.as_deref().unwrap_or_default());
    println!("{}", example.snippet);
    println!("```");
    println!();
}
