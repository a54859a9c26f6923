//! Search command - search session transcripts

use crate::cli::output::{colors, format_offset, print_json, truncate_chars};
use crate::cli::OutputFormat;
use crate::core::export::ExportFormat;
use crate::core::services::Services;
use crate::core::types::{Classification, SearchFilters, SearchMode, SearchRequest};
use chrono::NaiveDate;
use clap::Args;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use std::sync::Arc;

static CLOCK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(\d+):)?(\d{1,2}):(\d{1,2}(?:\.\d+)?)$").unwrap());

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text, pattern or phrase to look for
    pub query: String,

    /// How the query is matched
    #[arg(long, short = 'm', value_enum, default_value = "full-text")]
    pub mode: ModeArg,

    /// Only lines by this speaker (repeatable)
    #[arg(long, short = 's')]
    pub speaker: Vec<String>,

    /// Only in-character or out-of-character lines
    #[arg(long, short = 'c', value_enum)]
    pub classification: Option<ClassificationArg>,

    /// Only these session ids (repeatable)
    #[arg(long)]
    pub session: Vec<String>,

    /// Earliest offset into a session (seconds, M:SS or H:MM:SS)
    #[arg(long, value_parser = parse_offset)]
    pub min_time: Option<f64>,

    /// Latest offset into a session (seconds, M:SS or H:MM:SS)
    #[arg(long, value_parser = parse_offset)]
    pub max_time: Option<f64>,

    /// Earliest session date (YYYY-MM-DD or YYYYMMDD)
    #[arg(long, value_parser = parse_date)]
    pub date_from: Option<String>,

    /// Latest session date (YYYY-MM-DD or YYYYMMDD)
    #[arg(long, value_parser = parse_date)]
    pub date_to: Option<String>,

    /// Maximum number of results (defaults to the configured value)
    #[arg(long, short = 'k')]
    pub limit: Option<usize>,

    /// Include neighbouring lines from the same session
    #[arg(long, short = 'C')]
    pub context: bool,

    /// Also write the results to a file in this format
    #[arg(long, value_enum, requires = "output")]
    pub export: Option<ExportArg>,

    /// Destination for --export
    #[arg(long, short = 'o', requires = "export")]
    pub output: Option<PathBuf>,
}

/// Match mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Case-insensitive substring
    FullText,
    /// Case-insensitive regular expression
    Regex,
    /// Literal phrase, no pattern syntax
    Exact,
}

impl From<ModeArg> for SearchMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::FullText => SearchMode::FullText,
            ModeArg::Regex => SearchMode::Regex,
            ModeArg::Exact => SearchMode::Exact,
        }
    }
}

/// IC/OOC filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ClassificationArg {
    /// In-character
    Ic,
    /// Out-of-character
    Ooc,
}

impl From<ClassificationArg> for Classification {
    fn from(arg: ClassificationArg) -> Self {
        match arg {
            ClassificationArg::Ic => Classification::InCharacter,
            ClassificationArg::Ooc => Classification::OutOfCharacter,
        }
    }
}

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportArg {
    Json,
    Csv,
    Text,
    /// Markdown report
    Document,
}

impl From<ExportArg> for ExportFormat {
    fn from(arg: ExportArg) -> Self {
        match arg {
            ExportArg::Json => ExportFormat::Json,
            ExportArg::Csv => ExportFormat::Csv,
            ExportArg::Text => ExportFormat::Text,
            ExportArg::Document => ExportFormat::Document,
        }
    }
}

/// Parse `90`, `1:30` or `0:01:30` into seconds
pub fn parse_offset(value: &str) -> Result<f64, String> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<f64>() {
        return if secs.is_finite() && secs >= 0.0 {
            Ok(secs)
        } else {
            Err(format!("'{value}' is not a valid offset"))
        };
    }

    let caps = CLOCK_PATTERN
        .captures(value)
        .ok_or_else(|| format!("'{value}' is not seconds, M:SS or H:MM:SS"))?;
    let hours: f64 = caps.get(1).map_or(Ok(0.0), |m| m.as_str().parse()).map_err(|_| {
        format!("'{value}' has an invalid hour field")
    })?;
    let minutes: f64 = caps[2]
        .parse()
        .map_err(|_| format!("'{value}' has an invalid minute field"))?;
    let seconds: f64 = caps[3]
        .parse()
        .map_err(|_| format!("'{value}' has an invalid second field"))?;

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Normalize a date argument to `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Result<String, String> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| format!("'{value}' is not a date (expected YYYY-MM-DD)"))
}

impl SearchArgs {
    /// Search request described by these arguments
    pub fn to_request(&self) -> SearchRequest {
        let filters = SearchFilters {
            speakers: self.speaker.iter().cloned().collect(),
            classification: self.classification.map(Classification::from),
            session_ids: self.session.iter().cloned().collect(),
            min_seconds: self.min_time,
            max_seconds: self.max_time,
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
        };

        let request = SearchRequest::new(self.query.clone(), self.mode.into())
            .with_filters(filters)
            .with_context(self.context);
        match self.limit {
            Some(limit) => request.with_max_results(limit),
            None => request,
        }
    }
}

/// Execute the search command
pub fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if let (Some(min), Some(max)) = (args.min_time, args.max_time) {
        if min > max {
            return Err(format!(
                "--min-time ({}) is after --max-time ({}).",
                format_offset(min),
                format_offset(max)
            )
            .into());
        }
    }

    let request = args.to_request();
    let response = services.search(&request);

    if format == OutputFormat::Json {
        print_json(&response)?;
    }

    if let Some(error) = &response.error {
        return Err(format!("Query rejected: {error}").into());
    }

    if let (Some(export), Some(output)) = (args.export, &args.output) {
        let export_format = ExportFormat::from(export);
        if !services
            .exporter
            .export(&response.results, export_format, output)
        {
            return Err(format!(
                "Could not export results to '{}'. Check the path and permissions.",
                output.display()
            )
            .into());
        }
        if format == OutputFormat::Human {
            eprintln!(
                "{} {} results to {}",
                colors::success("Exported"),
                colors::number(&response.count.to_string()),
                colors::file_path(&output.display().to_string())
            );
        }
    }

    if format == OutputFormat::Json {
        return Ok(());
    }

    if response.results.is_empty() {
        println!(
            "No results found for '{}' ({})",
            colors::label(&args.query),
            request.mode
        );
        return Ok(());
    }

    println!(
        "Found {} result(s) for '{}' ({}):\n",
        colors::number(&response.count.to_string()),
        colors::label(&args.query),
        request.mode
    );

    for (i, result) in response.results.iter().enumerate() {
        let seg = &result.segment;
        println!(
            "[{}] {} {} {} {} [{}] {}",
            colors::rank(&(i + 1).to_string()),
            colors::session_id(&seg.session_id),
            colors::dim(&seg.session_date),
            colors::dim(&seg.timestamp_str),
            colors::speaker(&seg.speaker),
            colors::classification(seg.classification.as_str()),
            colors::score(&format!("(score: {:.2})", result.relevance_score))
        );
        for line in &result.context_before {
            println!("      {}", colors::dim(&truncate_chars(line, 100)));
        }
        println!("    > {}", result.matched_excerpt);
        for line in &result.context_after {
            println!("      {}", colors::dim(&truncate_chars(line, 100)));
        }
        println!();
    }

    Ok(())
}
