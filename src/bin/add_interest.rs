//! Add a term to the interest list, keeping the file sorted.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use news_curator::interest;

#[derive(Parser, Debug)]
#[command(
    name = "add-interest",
    version,
    about = "Append a term to the interest list"
)]
struct Args {
    /// Newline-delimited interest term list
    #[arg(long, default_value = "interests.list")]
    interests: PathBuf,

    /// Term to add; prompted for when omitted
    term: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let term = match args.term {
        Some(term) => term.trim().to_string(),
        None => prompt("New interest term: ")?,
    };
    if term.is_empty() {
        bail!("term must not be empty");
    }

    let mut terms = interest::load_terms(&args.interests)?;
    if terms.iter().any(|t| t.eq_ignore_ascii_case(&term)) {
        println!("'{term}' is already in the list");
        return Ok(());
    }

    terms.push(term.clone());
    terms.sort_by_key(|t| t.to_lowercase());

    fs::write(&args.interests, terms.join("\n") + "\n")
        .with_context(|| format!("cannot write {}", args.interests.display()))?;

    println!("Added '{}' ({} terms)", term, terms.len());
    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
