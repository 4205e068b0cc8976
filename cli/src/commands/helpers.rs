use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::process;

use macrolog_core::aggregate::{Progress, round2};

const BAR_WIDTH: usize = 20;

pub(crate) fn parse_date(date_str: Option<String>) -> Result<NaiveDate> {
    match date_str {
        None => Ok(Local::now().date_naive()),
        Some(s) => match s.as_str() {
            "today" => Ok(Local::now().date_naive()),
            "yesterday" => Ok(Local::now().date_naive() - chrono::Duration::days(1)),
            "tomorrow" => Ok(Local::now().date_naive() + chrono::Duration::days(1)),
            _ => NaiveDate::parse_from_str(&s, "%Y-%m-%d").with_context(|| {
                format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday/tomorrow")
            }),
        },
    }
}

/// Ask a yes/no question on stderr. Anything but "y"/"yes" is a no.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    eprint!("{question} [y/N] ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read answer")?;
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Report a "nothing to do" outcome and exit with status 2.
pub(crate) fn exit_with_notice(message: &str, json: bool) -> ! {
    if json {
        println!("{}", json_error(message));
    } else {
        eprintln!("{message}");
    }
    process::exit(2);
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn no_neg_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

/// Display form of an amount: at most 2 decimals, no trailing zeros.
pub(crate) fn fmt_amount(v: f64) -> String {
    no_neg_zero(round2(v)).to_string()
}

#[allow(clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub(crate) fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    )
}

/// One goal line of the day view, e.g. `Protein   85 / 170 g  [████░░]  50%`.
pub(crate) fn progress_line(label: &str, unit: &str, p: &Progress) -> String {
    let value = fmt_amount(p.value);
    let goal = fmt_amount(p.goal);
    let bar = progress_bar(p.percent);
    let pct = p.percent;
    format!("{label:<9}{value:>8} / {goal} {unit}  [{bar}] {pct:>3.0}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_none() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date(None).unwrap(), today);
    }

    #[test]
    fn test_parse_date_keywords() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date(Some("today".to_string())).unwrap(), today);
        assert_eq!(
            parse_date(Some("yesterday".to_string())).unwrap(),
            today - chrono::Duration::days(1)
        );
        assert_eq!(
            parse_date(Some("tomorrow".to_string())).unwrap(),
            today + chrono::Duration::days(1)
        );
    }

    #[test]
    fn test_parse_date_iso() {
        let date = parse_date(Some("2024-01-15".to_string())).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(date.to_string(), "2024-01-15");
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date(Some("nope".to_string())).is_err());
        assert!(parse_date(Some("2024-02-30".to_string())).is_err());
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_json_error() {
        assert_eq!(json_error("No entries"), r#"{"error":"No entries"}"#);
        assert_eq!(json_error("a \"b\""), r#"{"error":"a \"b\""}"#);
    }

    #[test]
    fn test_fmt_amount() {
        assert_eq!(fmt_amount(150.0), "150");
        assert_eq!(fmt_amount(4.3), "4.3");
        assert_eq!(fmt_amount(0.1 + 0.2), "0.3");
        assert_eq!(fmt_amount(-0.0), "0");
        assert_eq!(fmt_amount(2.345_67), "2.35");
    }

    #[test]
    fn test_no_neg_zero() {
        assert_eq!(no_neg_zero(-0.0).to_bits(), 0.0_f64.to_bits());
        assert_eq!(no_neg_zero(5.0), 5.0);
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0), "░".repeat(20));
        assert_eq!(progress_bar(100.0), "█".repeat(20));
        let half = progress_bar(50.0);
        assert_eq!(half.chars().filter(|&c| c == '█').count(), 10);
        assert_eq!(half.chars().count(), 20);
    }

    #[test]
    fn test_progress_line() {
        let line = progress_line("Protein", "g", &Progress::new(85.0, 170.0));
        assert!(line.starts_with("Protein"));
        assert!(line.contains("85 / 170 g"));
        assert!(line.ends_with(" 50%"));
    }
}
