//! Output formatters for scored candidates

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{Result, ResumeScorerError};
use crate::output::report::{BatchSummary, ScoredCandidate};
use crate::scoring::Recommendation;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a batch of scored candidates
pub trait OutputFormatter {
    fn format_candidates(&self, candidates: &[ScoredCandidate]) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors and per-category detail
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter emitting the augmented records
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter producing a summary table
pub struct MarkdownFormatter;

/// Report generator that coordinates the different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

/// Human readable name of a breakdown category key.
pub fn category_label(category: &str) -> &'static str {
    match category {
        "basic_information" => "Basic Information",
        "skills" => "Skills",
        "education" => "Education",
        "work_experience" => "Work Experience",
        "projects_certifications" => "Projects & Certifications",
        _ => "Other",
    }
}

fn tier_color(recommendation: Recommendation) -> Color {
    match recommendation {
        Recommendation::StrongMatch => Color::Green,
        Recommendation::GoodMatch => Color::BrightGreen,
        Recommendation::PotentialMatch => Color::Yellow,
        Recommendation::WeakMatch => Color::Red,
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Cyan,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_badge(&self, recommendation: Recommendation) -> String {
        let badge = recommendation.badge();
        if self.use_colors {
            format!("[{}]", badge.color(tier_color(recommendation)).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_candidate(&self, candidate: &ScoredCandidate) -> String {
        let mut output = String::new();
        let report = &candidate.report;

        output.push_str(&self.format_header(candidate.display_name(), 2));
        if candidate.display_name() != candidate.source {
            output.push_str(&format!("Source: {}\n", candidate.source));
        }
        output.push_str(&format!(
            "Score: {} {}\n",
            report.display_score(),
            self.format_badge(report.recommendation)
        ));
        output.push_str(&format!(
            "Recommendation: {}\n",
            self.colorize(report.recommendation.label(), tier_color(report.recommendation))
        ));

        if self.detailed {
            output.push_str("\nBreakdown:\n");
            for (category, points, max) in report.breakdown.categories() {
                output.push_str(&format!(
                    "  • {:<28}{:>3}/{}\n",
                    category_label(category),
                    points,
                    max
                ));
            }
            output.push_str(&self.format_details(candidate));
        }

        output
    }

    fn format_details(&self, candidate: &ScoredCandidate) -> String {
        let record = &candidate.record;
        let mut output = String::from("\nDetails:\n");

        output.push_str(&format!("  Email: {}\n", record.email().unwrap_or("-")));
        output.push_str(&format!("  Phone: {}\n", record.phone().unwrap_or("-")));

        if let Some(skills) = record.skills() {
            let names: Vec<&str> = skills.iter().filter_map(|s| s.as_str()).collect();
            output.push_str(&format!("  Skills: {}\n", names.join(", ")));
        }

        for entry in record.education_entries() {
            let completed = match entry.graduation().or(entry.year()) {
                Some(serde_json::Value::String(s)) => format!(" ({})", s),
                Some(serde_json::Value::Number(n)) => format!(" ({})", n),
                _ => String::new(),
            };
            output.push_str(&format!(
                "  Education: {} @ {}{}\n",
                entry.degree().unwrap_or("-"),
                entry.institution().unwrap_or("-"),
                completed
            ));
        }

        for entry in record.experience_entries() {
            output.push_str(&format!(
                "  Experience: {} @ {} ({})\n",
                entry.role().unwrap_or("-"),
                entry.company().unwrap_or("-"),
                entry.duration().unwrap_or("n/a")
            ));
        }

        for project in record.project_entries() {
            let technologies = project.technologies();
            if technologies.is_empty() {
                output.push_str(&format!("  Project: {}\n", project.name().unwrap_or("-")));
            } else {
                output.push_str(&format!(
                    "  Project: {} [{}]\n",
                    project.name().unwrap_or("-"),
                    technologies.join(", ")
                ));
            }
        }

        output
    }

    fn format_summary(&self, summary: &BatchSummary) -> String {
        let mut output = self.format_header("Batch Summary", 3);
        output.push_str(&format!("Candidates: {}\n", summary.candidates));
        output.push_str(&format!(
            "Average: {:.1} | Highest: {} | Lowest: {}\n",
            summary.average_score, summary.highest_score, summary.lowest_score
        ));
        output.push_str(&format!(
            "Strong: {} | Good: {} | Potential: {} | Weak: {}\n",
            summary.strong, summary.good, summary.potential, summary.weak
        ));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_candidates(&self, candidates: &[ScoredCandidate]) -> Result<String> {
        let mut output = self.format_header("📊 RESUME SCORE REPORT", 1);

        for candidate in candidates {
            output.push_str(&self.format_candidate(candidate));
        }

        if candidates.len() > 1 {
            output.push_str(&self.format_summary(&BatchSummary::from_candidates(candidates)));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_candidates(&self, candidates: &[ScoredCandidate]) -> Result<String> {
        let value = match candidates {
            [single] => serde_json::to_value(&single.record)?,
            many => serde_json::Value::Array(
                many.iter()
                    .map(|c| serde_json::to_value(&c.record))
                    .collect::<std::result::Result<_, _>>()?,
            ),
        };

        if self.pretty {
            Ok(serde_json::to_string_pretty(&value)?)
        } else {
            Ok(serde_json::to_string(&value)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    fn escape(cell: &str) -> String {
        cell.replace('|', "\\|").replace('\n', " ")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_candidates(&self, candidates: &[ScoredCandidate]) -> Result<String> {
        let mut output = String::from("# Resume Score Report\n\n");
        output.push_str(
            "| Candidate | Score | Recommendation | Basic | Skills | Education | Experience | Projects & Certs |\n",
        );
        output.push_str("|---|---|---|---|---|---|---|---|\n");

        for candidate in candidates {
            let breakdown = &candidate.report.breakdown;
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                Self::escape(candidate.display_name()),
                candidate.report.display_score(),
                candidate.report.recommendation,
                breakdown.basic_information,
                breakdown.skills,
                breakdown.education,
                breakdown.work_experience,
                breakdown.projects_certifications
            ));
        }

        if candidates.len() > 1 {
            let summary = BatchSummary::from_candidates(candidates);
            output.push_str(&format!(
                "\n**{} candidates**, average score {:.1}\n",
                summary.candidates, summary.average_score
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::with_options(config.color_output, config.detailed, config.pretty_json)
    }

    pub fn generate_report(&self, candidates: &[ScoredCandidate], format: OutputFormat) -> Result<String> {
        if candidates.is_empty() {
            return Err(ResumeScorerError::OutputFormatting(
                "No scored candidates to format".to_string(),
            ));
        }

        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        };
        debug_assert_eq!(formatter.supports_format(), format);
        formatter.format_candidates(candidates)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
