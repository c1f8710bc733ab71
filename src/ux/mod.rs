use anyhow::{bail, Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::export::{artifact_body, Written};
use crate::wire::{GenerationResult, LogEntry, Mode};

pub fn show_modes() {
    println!("\n{}", "=== COMMAND CENTER ===".bold());
    println!("{}", "Select a synthesis module to begin construction.".dimmed());
    for (i, mode) in Mode::ALL.iter().enumerate() {
        println!(
            "{}. {} {}  {}  {}",
            i + 1,
            mode.icon(),
            mode.title().bold(),
            format!("[{}]", mode.slug()).cyan(),
            mode.tagline().dimmed()
        );
    }
    println!();
}

/// Parse a menu answer: 1-based index or mode slug.
pub fn parse_mode_choice(answer: &str) -> Option<Mode> {
    let answer = answer.trim();
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| Mode::ALL.get(i).copied());
    }
    Mode::ALL.iter().copied().find(|m| m.slug().eq_ignore_ascii_case(answer))
}

pub fn pick_mode(input: &mut impl BufRead) -> Result<Mode> {
    show_modes();
    print!("Module [1-{}]: ", Mode::ALL.len());
    let _ = io::stdout().flush();
    let mut s = String::new();
    input.read_line(&mut s)?;
    match parse_mode_choice(&s) {
        Some(m) => Ok(m),
        None => bail!("unknown synthesis module: {}", s.trim()),
    }
}

pub fn show_console_header(mode: Mode) {
    println!("{} {}", "●".green(), format!("{} Synthesis Active", mode.tag()).bold());
}

/// Read the synthesis target; an empty line yields an empty string.
pub fn read_prompt(mode: Mode, input: &mut impl BufRead) -> Result<String> {
    println!("{}", mode.placeholder().dimmed());
    print!("> ");
    let _ = io::stdout().flush();
    let mut s = String::new();
    input.read_line(&mut s)?;
    Ok(s.trim_end_matches(['\r', '\n']).to_string())
}

pub fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} {elapsed}") {
        pb.set_style(style);
    }
    pb.set_message("Decoding Future Blueprint...");
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

pub fn print_logs(logs: &[LogEntry]) {
    println!("\n{}", "NEURAL LOGS".dimmed());
    for entry in logs {
        let stamp = format!("[{}]", entry.at.format("%H:%M:%S")).dimmed();
        let line = if entry.message.starts_with("ERROR") {
            entry.message.red().bold()
        } else {
            entry.message.normal()
        };
        println!("{} {}", stamp, line);
    }
}

pub fn print_result(result: &GenerationResult, code_only: bool) {
    println!("\n{}", "=== ARCHITECTURAL OUTPUT ===".bold());
    match (code_only, result.extracted_code.as_deref()) {
        (true, Some(code)) => println!("{}", code),
        (true, None) => println!("{}", "(no executable artifact in response)".yellow()),
        (false, _) => println!("{}", result.raw_markdown),
    }
}

/// Put the artifact on the system clipboard: the extracted code, or the
/// whole response when there is none.
pub fn copy_to_clipboard(result: &GenerationResult) -> Result<usize> {
    let text = artifact_body(result);
    let mut clipboard = arboard::Clipboard::new().context("opening system clipboard")?;
    clipboard
        .set_text(text.to_owned())
        .context("writing to system clipboard")?;
    Ok(text.len())
}

pub fn print_copied(bytes: usize) {
    println!(
        "{} {}",
        "Copied to clipboard".green().bold(),
        format!("({})", humansize::format_size(bytes, humansize::DECIMAL)).dimmed()
    );
}

pub fn print_copy_failed(err: &anyhow::Error) {
    eprintln!("{} {err:#}", "Clipboard unavailable:".yellow().bold());
}

pub fn print_export_dashboard(written: &[Written]) {
    if written.is_empty() {
        return;
    }
    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━━━━━ Exported ━━━━━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    for w in written {
        println!(
            "  {:<10} {}  ({})",
            w.label.green().bold(),
            w.path.display(),
            humansize::format_size(w.bytes, humansize::DECIMAL)
        );
    }
    println!("{}", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold());
}
