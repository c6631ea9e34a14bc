//! collection-sim - terminal front end for collection call practice

use anyhow::Context;
use clap::{Parser, Subcommand};
use collection_sim_agent::{CallSession, ResponseComposer, TurnAnalysis};
use collection_sim_config::{load_settings, ScenarioCatalog, Settings, QUICK_REPLIES};
use collection_sim_core::{Message, TurnRole};
use collection_sim_text_processing::{IntentClassifier, IntentScores};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "collection-sim")]
#[command(about = "Practice debt collection calls against scripted borrowers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available borrower scenarios
    Scenarios,
    /// Run an interactive call, typing the borrower's side
    Call {
        /// Scenario key (defaults to simulation.default_scenario)
        #[arg(short, long)]
        scenario: Option<String>,

        /// Seed for reply composition (defaults to simulation.rng_seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Print each turn as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Analyze a single borrower utterance
    Analyze {
        /// Borrower text
        #[arg(value_name = "TEXT", required = true, num_args = 1..)]
        text: Vec<String>,

        /// Seed for reply composition
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// One borrower turn as printed in JSON mode
#[derive(Serialize)]
struct TurnReport<'a> {
    input: &'a str,
    reply: String,
    scores: IntentScores,
    analysis: Option<TurnAnalysis>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("COLLECTION_SIM_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        },
    };

    init_tracing(&settings);
    tracing::debug!(
        environment = env.as_deref().unwrap_or("default"),
        "Configuration loaded"
    );

    let catalog = load_catalog(&settings)?;

    match cli.command {
        Commands::Scenarios => list_scenarios(&catalog),
        Commands::Call {
            scenario,
            seed,
            json,
        } => {
            let key = scenario.unwrap_or_else(|| settings.simulation.default_scenario.clone());
            let seed = seed.or(settings.simulation.rng_seed);
            run_call(&settings, &catalog, &key, seed, json)
        },
        Commands::Analyze { text, seed, json } => {
            let seed = seed.or(settings.simulation.rng_seed);
            analyze_once(&settings, &text.join(" "), seed, json)
        },
    }
}

fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("collection_sim={}", level).into()
    });

    // stdout belongs to the call transcript
    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(io::stderr).boxed()
    };
    subscriber.with(fmt_layer).init();
}

fn load_catalog(settings: &Settings) -> anyhow::Result<ScenarioCatalog> {
    match &settings.simulation.scenario_file {
        Some(path) => ScenarioCatalog::load(path)
            .with_context(|| format!("Failed to load scenarios from {}", path)),
        None => Ok(ScenarioCatalog::builtin().clone()),
    }
}

fn new_session(settings: &Settings, seed: Option<u64>) -> CallSession {
    CallSession::new(ResponseComposer::from_seed_option(seed))
        .with_classifier(IntentClassifier::with_window(settings.simulation.history_window))
}

fn list_scenarios(catalog: &ScenarioCatalog) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    for scenario in catalog.iter() {
        writeln!(out, "{:<20} {}", scenario.key, scenario.label())?;
        writeln!(out, "{:<20} {}", "", scenario.description)?;
        writeln!(out, "{:<20} Persona: {}", "", scenario.persona)?;
    }
    Ok(())
}

fn analyze_once(
    settings: &Settings,
    text: &str,
    seed: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = new_session(settings, seed);
    let classifier = IntentClassifier::with_window(settings.simulation.history_window);
    let mut out = io::stdout().lock();

    let Some(outcome) = session.handle_borrower_input(text) else {
        anyhow::bail!("Nothing to analyze: input is blank");
    };

    let report = TurnReport {
        input: text.trim(),
        reply: outcome.reply,
        scores: classifier.scores(session.transcript()),
        analysis: session.analyze(),
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "Agent: {}", report.reply)?;
        print_scores(&mut out, &report.scores)?;
        if let Some(analysis) = &report.analysis {
            print_analysis(&mut out, analysis)?;
        }
    }
    Ok(())
}

fn run_call(
    settings: &Settings,
    catalog: &ScenarioCatalog,
    key: &str,
    seed: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let scenario = catalog.get(key).with_context(|| {
        format!("Unknown scenario '{}' (try: {})", key, catalog.keys().join(", "))
    })?;

    let classifier = IntentClassifier::with_window(settings.simulation.history_window);
    let mut session = new_session(settings, seed);
    session.start(scenario);

    let mut out = io::stdout().lock();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    if !json {
        writeln!(out, "== {} ==", scenario.name)?;
        writeln!(out, "{}", scenario.description)?;
        writeln!(out, "Persona: {}", scenario.persona)?;
        writeln!(out)?;
        for message in session.transcript() {
            print_message(&mut out, message)?;
        }
        if let Some(analysis) = session.analyze() {
            print_analysis(&mut out, &analysis)?;
        }
        print_help(&mut out)?;
    }

    let mut line = String::new();
    loop {
        if !json {
            write!(out, "borrower> ")?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let text = match parse_command(line.trim()) {
            Command::Quit => break,
            Command::Clear => {
                session.clear();
                if !json {
                    writeln!(out, "Transcript cleared.")?;
                }
                continue;
            },
            Command::Restart => {
                session.start(scenario);
                if !json {
                    for message in session.transcript() {
                        print_message(&mut out, message)?;
                    }
                }
                continue;
            },
            Command::Help => {
                print_help(&mut out)?;
                continue;
            },
            Command::Invalid(reason) => {
                writeln!(out, "{}", reason)?;
                continue;
            },
            Command::Quick(index) => QUICK_REPLIES[index].text,
            Command::Say(text) => text,
        };

        let Some(outcome) = session.handle_borrower_input(text) else {
            continue;
        };

        if json {
            let report = TurnReport {
                input: text,
                reply: outcome.reply,
                scores: classifier.scores(session.transcript()),
                analysis: session.analyze(),
            };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        } else {
            if text != line.trim() {
                writeln!(out, "Borrower: {}", text)?;
            }
            writeln!(out, "Agent: {}", outcome.reply)?;
            if let Some(analysis) = session.analyze() {
                print_analysis(&mut out, &analysis)?;
            }
        }
    }

    tracing::info!(
        session_id = session.id(),
        turns = session.transcript().len(),
        "Call ended"
    );
    Ok(())
}

/// A line typed at the borrower prompt
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Say(&'a str),
    Quick(usize),
    Clear,
    Restart,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(line: &str) -> Command<'_> {
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Say(line);
    };

    let mut parts = rest.split_whitespace();
    match parts.next() {
        Some("quit") | Some("exit") => Command::Quit,
        Some("clear") => Command::Clear,
        Some("restart") => Command::Restart,
        Some("help") => Command::Help,
        Some("quick") => match parts.next().map(str::parse::<usize>) {
            Some(Ok(n)) if (1..=QUICK_REPLIES.len()).contains(&n) => Command::Quick(n - 1),
            _ => Command::Invalid(format!(
                "Usage: /quick N where N is 1-{}",
                QUICK_REPLIES.len()
            )),
        },
        _ => Command::Invalid(format!("Unknown command: {}", line)),
    }
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Type the borrower's reply, or one of:")?;
    for (i, quick) in QUICK_REPLIES.iter().enumerate() {
        writeln!(out, "  /quick {}   {} - \"{}\"", i + 1, quick.label, quick.text)?;
    }
    writeln!(out, "  /clear     empty the transcript")?;
    writeln!(out, "  /restart   replay the scenario opening")?;
    writeln!(out, "  /quit      end the call")?;
    writeln!(out)
}

fn print_message(out: &mut impl Write, message: &Message) -> io::Result<()> {
    match message.role {
        TurnRole::System => writeln!(out, "[{}]", message.content),
        TurnRole::Agent => writeln!(out, "Agent: {}", message.content),
        TurnRole::Borrower => writeln!(out, "Borrower: {}", message.content),
    }
}

fn print_scores(out: &mut impl Write, scores: &IntentScores) -> io::Result<()> {
    writeln!(
        out,
        "Scores:    ability {} {:?} / willingness {} {:?}",
        scores.ability, scores.matched_ability, scores.willingness, scores.matched_willingness
    )
}

fn print_analysis(out: &mut impl Write, analysis: &TurnAnalysis) -> io::Result<()> {
    let TurnAnalysis {
        sentiment,
        intent,
        strategy,
    } = analysis;

    writeln!(out, "--- Analysis ---")?;
    writeln!(
        out,
        "Sentiment: {} ({:.2}, polarity {:.2})",
        sentiment.label, sentiment.score, sentiment.polarity
    )?;
    writeln!(
        out,
        "Intent:    {} ({:.0}%) {}",
        intent.label,
        intent.confidence * 100.0,
        intent.explanation
    )?;
    writeln!(out, "Strategy:  {} | Tone: {}", strategy.action, strategy.tone)?;
    writeln!(out, "Script:    {}", strategy.script)?;
    writeln!(out, "Principle: {}", strategy.economic_principle)?;
    writeln!(out, "----------------")
}
