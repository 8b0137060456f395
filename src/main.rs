// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::Level;

use omnimatch::cli::{show_suggestions, InteractiveInput, SimpleInput, TerminalHost};
use omnimatch::config::{self, KeywordFile};
use omnimatch::{Disposition, ErrorBuilder, Omnibox, SubmitOutcome};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes following sysexits.h conventions
mod exit_codes {
    /// General error - unspecified error
    pub const ERROR: i32 = 1;
    /// Configuration error - invalid or missing keyword file
    pub const CONFIG: i32 = 78;
}

use exit_codes::*;

/// omnimatch - Type a few words, get suggestions, press enter to act.
#[derive(Parser)]
#[command(name = "omnimatch")]
#[command(version = VERSION)]
#[command(about = "Incremental keyword matcher with live suggestions.")]
#[command(long_about = "omnimatch - Incremental keyword matcher\n\n\
    See suggestions:     omnimatch suggest cat syn\n\
    Run an action:       omnimatch submit cat synonym\n\
    Interactive shell:   omnimatch shell\n\
    Edit keywords:       omnimatch config init, then edit the file\n\n\
    Without a keyword file the built-in dictionary keywords are used.")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Keyword file to use instead of ~/.omnimatch/keywords.json
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Quiet mode: minimal output, only essential information
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Verbose mode: log every matching step to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the suggestions for some text
    ///
    /// Examples:
    ///   omnimatch suggest cat
    ///   omnimatch suggest cat syn --json
    #[command(alias = "s")]
    Suggest {
        /// Text as typed into the input box
        text: Vec<String>,

        /// Print suggestions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Commit some text and run the matching action
    Submit {
        /// Text as typed into the input box
        text: Vec<String>,

        /// Where the result should be shown: current, foreground or background
        #[arg(short, long, default_value = "current")]
        disposition: Disposition,
    },

    /// Interactive shell with live hints and Tab completion
    Shell,

    /// Inspect or create the keyword file
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the active keywords as JSON
    Show,
    /// Print the keyword file location
    Path,
    /// Write the built-in keywords to the keyword file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate the keyword file and report warnings
    Check,
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Load the matcher or exit with a formatted configuration error.
fn load_omnibox_or_exit(path: Option<&Path>) -> Omnibox {
    match config::load_omnibox(path) {
        Ok(omnibox) => omnibox,
        Err(e) => {
            eprintln!(
                "{}",
                ErrorBuilder::new("Failed to load keywords")
                    .chain(&e)
                    .fix("Inspect the file: omnimatch config show")
                    .fix("Restore the built-in keywords: omnimatch config init --force")
                    .build()
            );
            std::process::exit(CONFIG);
        }
    }
}

fn keyword_file_path(cli_path: Option<&Path>) -> Result<PathBuf> {
    match cli_path {
        Some(p) => Ok(p.to_path_buf()),
        None => config::keywords_path(),
    }
}

fn handle_suggest(omnibox: &mut Omnibox, text: &str, json: bool, quiet: bool) -> Result<()> {
    let suggestions = omnibox.input(text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if quiet {
        for s in &suggestions {
            println!("{}", omnimatch::strip_marker(&s.content));
        }
        return Ok(());
    }

    show_suggestions(text, &suggestions);
    Ok(())
}

fn handle_submit(omnibox: &mut Omnibox, text: &str, disposition: Disposition, quiet: bool) -> Result<()> {
    let host = TerminalHost::new(quiet);
    omnibox.on_input_started(&host);

    match omnibox.submit(text, disposition, &host)? {
        SubmitOutcome::Committed(_) => {}
        SubmitOutcome::NoCommitHandler(action) if !quiet => {
            eprintln!("{} '{}' has nothing to run on enter", "[!]".yellow(), action);
        }
        SubmitOutcome::NoMatch if !quiet => {
            eprintln!("{} Nothing matched '{}'", "[!]".yellow(), text);
        }
        _ => {}
    }
    Ok(())
}

fn run_shell(omnibox: Omnibox, quiet: bool) -> Result<()> {
    let host = TerminalHost::new(quiet);

    if !io::stdin().is_terminal() {
        // Piped input: commit every line as-is
        let mut omnibox = omnibox;
        let mut input = SimpleInput::new();
        while let Some(line) = input.read_line("")? {
            omnibox.on_input_started(&host);
            omnibox.submit(&line, Disposition::CurrentTab, &host)?;
        }
        return Ok(());
    }

    let mut input = InteractiveInput::new().context("Failed to initialize interactive input")?;
    input.attach(omnibox);

    if !quiet {
        println!();
        println!(
            "{} Interactive mode | Tab to complete, 'text?' to list suggestions, 'exit' to quit",
            "omnimatch".bright_cyan().bold()
        );
        println!();
    }

    loop {
        match input.read_line("omni> ", &host)? {
            Some(line) if line.trim().is_empty() => continue,
            Some(line) if matches!(line.trim(), "exit" | "quit") => break,
            Some(line) if line.trim() == ":clear" => {
                input.clear_history();
                println!("{} History cleared", "[OK]".green());
            }
            Some(line) if line.trim_end().ends_with('?') => {
                let text = line.trim_end().trim_end_matches('?');
                show_suggestions(text, &input.suggestions(text));
            }
            Some(line) => match input.submit(&line, Disposition::CurrentTab, &host) {
                Ok(SubmitOutcome::NoMatch) if !quiet => {
                    println!("{} Nothing matched '{}'", "[!]".yellow(), line.trim());
                }
                Ok(_) => {}
                Err(e) => eprintln!("{} {:#}", "[X]".red(), e),
            },
            None => break, // EOF
        }
    }

    if let Some(omnibox) = input.detach() {
        tracing::debug!(last = ?omnibox.last_parse(), "shell closed");
    }
    Ok(())
}

fn handle_config(command: ConfigCommands, cli_path: Option<&Path>) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let file = config::load_keywords(cli_path)?;
            println!("{}", file.to_json_pretty()?);
            for warning in file.lint() {
                eprintln!("{} {}", "[!]".yellow(), warning);
            }
        }
        ConfigCommands::Path => {
            let path = keyword_file_path(cli_path)?;
            let state = if path.exists() { "" } else { " (not created, using built-in keywords)" };
            println!("{}{}", path.display(), state.dimmed());
        }
        ConfigCommands::Init { force } => {
            let path = keyword_file_path(cli_path)?;
            if path.exists() && !force {
                eprintln!(
                    "{}",
                    omnimatch::error_msg!(
                        &format!("{} already exists", path.display()),
                        fixes: ["Overwrite it: omnimatch config init --force"]
                    )
                );
                std::process::exit(CONFIG);
            }
            config::save_keywords(&path, &KeywordFile::builtin())?;
            println!("{} Wrote built-in keywords to {}", "[OK]".green(), path.display());
        }
        ConfigCommands::Check => {
            let file = config::load_keywords(cli_path)?;
            let warnings = file.lint();
            match file.build() {
                Ok(built) => {
                    let omnibox = Omnibox::new(built);
                    println!(
                        "{} {} root keyword(s) loaded",
                        "[OK]".green(),
                        omnibox.actions().len()
                    );
                    for warning in warnings {
                        println!("{} {}", "[!]".yellow(), warning);
                    }
                }
                Err(e) => {
                    eprintln!("{}", ErrorBuilder::new("Keyword file is invalid").chain(&e).build());
                    std::process::exit(CONFIG);
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Suggest { text, json } => {
            let mut omnibox = load_omnibox_or_exit(config_path);
            handle_suggest(&mut omnibox, &text.join(" "), json, cli.quiet)
        }
        Commands::Submit { text, disposition } => {
            let mut omnibox = load_omnibox_or_exit(config_path);
            handle_submit(&mut omnibox, &text.join(" "), disposition, cli.quiet)
        }
        Commands::Shell => run_shell(load_omnibox_or_exit(config_path), cli.quiet),
        Commands::Config { command } => handle_config(command.unwrap_or(ConfigCommands::Path), config_path),
    };

    if let Err(e) = result {
        eprintln!("{}", ErrorBuilder::new("Command failed").chain(&e).build());
        std::process::exit(ERROR);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit_disposition() {
        let cli = Cli::try_parse_from(["omnimatch", "submit", "-d", "background", "cat", "syn"]).unwrap();
        match cli.command {
            Commands::Submit { text, disposition } => {
                assert_eq!(text, vec!["cat", "syn"]);
                assert_eq!(disposition, Disposition::NewBackgroundTab);
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn test_format_suggestions_used_for_menu() {
        let mut omnibox = Omnibox::new(KeywordFile::builtin().build().unwrap());
        let lines = omnimatch::cli::format_suggestions(&omnibox.input("cat").unwrap());
        assert_eq!(lines.len(), 1);
    }
}
