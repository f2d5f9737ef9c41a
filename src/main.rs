use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use textgate::{
    load_from_path, Edit, EditDecision, FieldState, RuleKind, TextHost, ValidationEngine,
};

#[derive(Parser)]
#[command(name = "textgate")]
#[command(about = "Incremental text validation engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate typing text through a rule chain, one keystroke at a time
    Type {
        /// Path to the chain config (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Text to type
        text: String,

        /// Initial field contents
        #[arg(long, default_value = "")]
        initial: String,

        /// Also run the commit pass when the session ends
        #[arg(long)]
        commit: bool,
    },

    /// Run the commit-time rules against a final text
    Commit {
        /// Path to the chain config (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Final text to commit
        text: String,
    },

    /// Passively validate lines from a file or stdin
    Check {
        /// Path to the chain config (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// File to read lines from (stdin if omitted)
        file: Option<PathBuf>,

        /// Emit a JSON report
        #[arg(long)]
        json: bool,
    },

    /// List the built-in rule types and their behavior flags
    Rules,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Type {
            config,
            text,
            initial,
            commit,
        } => cmd_type(config, &text, &initial, commit),

        Commands::Commit { config, text } => cmd_commit(config, &text),

        Commands::Check { config, file, json } => cmd_check(config, file, json),

        Commands::Rules => cmd_rules(),
    }
}

fn load_engine(config: &PathBuf) -> Result<ValidationEngine> {
    let config = load_from_path(config)
        .with_context(|| format!("loading chain config {}", config.display()))?;
    Ok(ValidationEngine::new(config.build()))
}

fn cmd_type(config: PathBuf, text: &str, initial: &str, commit: bool) -> Result<()> {
    let mut engine = load_engine(&config)?;
    let host = FieldState::shared(initial);
    engine.attach(host.clone());
    engine.did_begin_editing();

    println!("{}", format!("initial: {initial:?}").dimmed());

    for (index, key) in text.chars().enumerate() {
        let (current, caret) = {
            let host = host.borrow();
            (host.text(), host.caret())
        };
        let fragment = key.to_string();
        let label = format!("#{:02} '{}'", index + 1, key);

        let decision = engine.should_change_text(&current, caret..caret, &fragment)?;
        match decision {
            EditDecision::ApplyDefault => {
                let proposed = Edit::new(caret..caret, fragment).resolve(&current)?;
                {
                    let mut host = host.borrow_mut();
                    host.set_text(&proposed);
                    host.set_caret(caret + 1);
                }
                engine.text_changed(&proposed);
                let status = if engine.is_valid() {
                    "ok".green()
                } else {
                    "invalid".yellow()
                };
                println!("{} {} {:?}", label, status, proposed);
            }
            EditDecision::Handled => {
                let proposed = Edit::new(caret..caret, fragment).resolve(&current)?;
                let applied = host.borrow().text();
                println!(
                    "{} {} {}",
                    label,
                    "rewritten".cyan(),
                    render_rewrite(&proposed, &applied)
                );
            }
            EditDecision::Blocked => {
                println!("{} {}", label, "blocked".red());
            }
        }
    }

    if commit {
        let final_text = host.borrow().text();
        engine.editing_ended(&final_text);
    }

    let final_text = host.borrow().text();
    println!();
    println!("final:   {final_text:?}");
    print_verdict(&engine);
    Ok(())
}

fn cmd_commit(config: PathBuf, text: &str) -> Result<()> {
    let mut engine = load_engine(&config)?;
    let host = FieldState::shared(text);
    engine.attach(host.clone());

    engine.editing_ended(text);

    let final_text = host.borrow().text();
    if final_text != text {
        println!("reformatted: {}", render_rewrite(text, &final_text));
    }
    print_verdict(&engine);
    Ok(())
}

fn cmd_check(config: PathBuf, file: Option<PathBuf>, json: bool) -> Result<()> {
    let mut engine = load_engine(&config)?;

    let lines: Vec<String> = match file {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?
            .lines()
            .map(str::to_owned)
            .collect(),
        None => io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<_>>()
            .context("reading stdin")?,
    };

    let mut invalid = 0usize;
    let mut results = Vec::with_capacity(lines.len());
    for line in &lines {
        engine.text_changed(line);
        let is_valid = engine.is_valid();
        if !is_valid {
            invalid += 1;
        }
        results.push((line, is_valid, engine.last_error()));
    }

    if json {
        let report = serde_json::json!({
            "total": lines.len(),
            "invalid": invalid,
            "results": results
                .iter()
                .map(|(line, is_valid, error)| {
                    serde_json::json!({
                        "text": line,
                        "valid": is_valid,
                        "error": error.map(|e| e.to_string()),
                    })
                })
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (line, is_valid, error) in &results {
            if *is_valid {
                println!("{} {:?}", "valid  ".green(), line);
            } else {
                let reason = error.map(|e| e.to_string()).unwrap_or_default();
                println!("{} {:?} ({})", "invalid".red(), line, reason);
            }
        }
        println!();
        println!("{} of {} lines invalid", invalid, lines.len());
    }
    Ok(())
}

fn cmd_rules() -> Result<()> {
    let kinds = [
        RuleKind::PositiveNumber,
        RuleKind::RelativeNumber,
        RuleKind::Decimal { places: 2 },
        RuleKind::MaxLength { limit: 5 },
        RuleKind::MinLength { limit: 1 },
        RuleKind::NotEmpty,
        RuleKind::Letters,
        RuleKind::Digits,
        RuleKind::Email,
        RuleKind::Password,
    ];

    println!(
        "{:<16} {:>8} {:>11} {:>8} {:>7}",
        "type".bold(),
        "blocks".bold(),
        "input-only".bold(),
        "formats".bold(),
        "commit".bold()
    );
    for kind in kinds {
        let rule = kind.build();
        println!(
            "{:<16} {:>8} {:>11} {:>8} {:>7}",
            kind.name(),
            mark(rule.blocks_input()),
            mark(rule.input_only()),
            mark(rule.formats()),
            mark(rule.runs_on_commit())
        );
    }
    Ok(())
}

fn mark(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "-"
    }
}

fn print_verdict(engine: &ValidationEngine) {
    if engine.is_valid() {
        println!("{}", "valid".green().bold());
    } else {
        match engine.last_error() {
            Some(error) => println!("{} ({})", "invalid".red().bold(), error),
            None => println!("{}", "invalid".red().bold()),
        }
    }
}

/// Inline character diff of a rewrite, old text to new.
fn render_rewrite(proposed: &str, applied: &str) -> String {
    let diff = TextDiff::from_chars(proposed, applied);
    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let value = change.value();
        match change.tag() {
            ChangeTag::Delete => out.push_str(&value.red().strikethrough().to_string()),
            ChangeTag::Insert => out.push_str(&value.green().to_string()),
            ChangeTag::Equal => out.push_str(value),
        }
    }
    out
}
