use colored::Colorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::settings::ColorMode;
use crate::core::orchestrator::ConfirmationGate;

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

pub fn init_colors(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout) {
                colored::control::set_override(false);
            }
        }
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn mark_interrupted() {
    INTERRUPTED.store(true, Ordering::Relaxed);
}

pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::Relaxed)
}

fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn header(title: &str) {
    if quiet() {
        return;
    }
    println!("\n{}", title.bold().underline());
}

pub fn success(msg: &str) {
    if quiet() {
        return;
    }
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn info(msg: &str) {
    if quiet() {
        return;
    }
    println!("{} {}", "ℹ".blue().bold(), msg);
}

pub fn verbose(msg: &str) {
    if quiet() || !VERBOSE.load(Ordering::Relaxed) {
        return;
    }
    println!("  {}", msg.dimmed());
}

// Warnings and errors bypass quiet mode and go to stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

pub fn indent(msg: &str, level: usize) {
    if quiet() {
        return;
    }
    let spaces = " ".repeat(level * 2);
    println!("{}{}", spaces, msg);
}

pub fn prompt_yes_no(question: &str) -> bool {
    print!("{} {} [Y/n] ", "?".yellow().bold(), question);

    // Default to yes if the terminal is broken (fail-open for non-interactive)
    if let Err(e) = io::stdout().flush() {
        eprintln!("\nWarning: Failed to flush terminal: {}", e);
        return true;
    }

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(_) => {
            let input = input.trim().to_lowercase();

            if input.is_empty() {
                return true;
            }

            input == "y" || input == "yes"
        }
        Err(e) => {
            eprintln!("\nWarning: Failed to read input: {}", e);
            true
        }
    }
}

/// Asks on the terminal after showing the preview of what would be installed.
pub struct InteractiveGate;

impl ConfirmationGate for InteractiveGate {
    fn ask(&self, prompt: &str, preview: &str) -> bool {
        for line in preview.lines() {
            indent(line, 1);
        }
        prompt_yes_no(prompt)
    }
}

/// Accepts every prompt (`--yes` / `assume_yes`), still showing the preview.
pub struct AssumeYesGate;

impl ConfirmationGate for AssumeYesGate {
    fn ask(&self, prompt: &str, preview: &str) -> bool {
        for line in preview.lines() {
            indent(line, 1);
        }
        info(prompt);
        true
    }
}
