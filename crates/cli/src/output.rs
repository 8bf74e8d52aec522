//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use impactmatch_matching::{MatchLevel, MatchResult, Suggestion};
use owo_colors::{OwoColorize, Stream, Style};

/// Width of the score bar in cells.
pub const BAR_WIDTH: usize = 20;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".if_supports_color(Stream::Stdout, |t| t.green()), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".if_supports_color(Stream::Stderr, |t| t.red()), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".if_supports_color(Stream::Stderr, |t| t.yellow()), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".if_supports_color(Stream::Stdout, |t| t.blue()), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.if_supports_color(Stream::Stdout, |t| t.bold()));
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// A fixed-width bar for a 0-100 score, e.g. `█████░░░░░`.
pub fn score_bar(score: u8, width: usize) -> String {
    let filled = (usize::from(score.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// The level label, colored by band.
pub fn colored_level(level: MatchLevel) -> String {
    paint_level(level, level.as_str())
}

/// Level label padded to `width` columns, then colored, so escapes do
/// not count toward the padding
pub fn level_cell(level: MatchLevel, width: usize) -> String {
    paint_level(level, &format!("{:<width$}", level.as_str()))
}

fn paint_level(level: MatchLevel, text: &str) -> String {
    match level {
        MatchLevel::Excellent | MatchLevel::VeryHigh => text
            .if_supports_color(Stream::Stdout, |t| t.style(Style::new().green().bold()))
            .to_string(),
        MatchLevel::High | MatchLevel::Good => text
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string(),
        MatchLevel::Moderate | MatchLevel::Fair => text
            .if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string(),
        MatchLevel::Low => text
            .if_supports_color(Stream::Stdout, |t| t.red())
            .to_string(),
    }
}

/// Print a single match with its breakdown and reasons
pub fn print_match(title: &str, result: &MatchResult) {
    Status::header(title);
    println!(
        "  {} {:>3}/100  {}",
        score_bar(result.match_score, BAR_WIDTH),
        result.match_score,
        colored_level(result.match_level)
    );
    println!();

    let breakdown = &result.breakdown;
    for (label, value) in [
        ("Cause alignment", breakdown.cause_alignment),
        ("Skill match", breakdown.skill_match),
        ("Location", breakdown.location_match),
        ("Availability", breakdown.availability_match),
    ] {
        println!("  {:<16} {} {:>3}%", label, score_bar(value, 10), value);
    }

    if !result.reasons.is_empty() {
        println!();
        for reason in &result.reasons {
            println!("  {} {}", "•".if_supports_color(Stream::Stdout, |t| t.cyan()), reason);
        }
    }
}

/// Print one row of a ranking
pub fn print_ranked_row(rank: usize, name: &str, result: &MatchResult) {
    println!(
        "{:>3}. {} {:>3}  {} {}",
        rank,
        score_bar(result.match_score, 10),
        result.match_score,
        level_cell(result.match_level, 10),
        name.if_supports_color(Stream::Stdout, |t| t.bold())
    );
    if let Some(reason) = result.reasons.first() {
        println!("       {}", reason.if_supports_color(Stream::Stdout, |t| t.dimmed()));
    }
}

/// Print one text-search result
pub fn print_suggestion(rank: usize, suggestion: &Suggestion) {
    let cause = &suggestion.cause;
    println!(
        "{:>3}. {:>6.2}%  {} ({}, {})",
        rank,
        suggestion.similarity,
        cause.name.if_supports_color(Stream::Stdout, |t| t.bold()),
        cause.category,
        cause.city
    );
}

/// Display name for a profile or cause, falling back to its index
pub fn display_name(name: Option<&str>, id: Option<&str>, index: usize) -> String {
    name.filter(|n| !n.trim().is_empty())
        .or(id)
        .map_or_else(|| format!("#{}", index + 1), str::to_string)
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
