//! Output formatters for ranking and match reports

use crate::config::OutputFormat;
use crate::error::{RankerError, Result};
use crate::output::report::*;
use crate::processing::matcher::CandidateScore;
use crate::processing::scoring::Recommendation;
use colored::{Color, Colorize};
use std::path::Path;

const MATCHED_PREVIEW: usize = 8;
const MISSING_PREVIEW: usize = 5;

/// Trait for rendering reports in one output format
pub trait OutputFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String>;
    fn format_match(&self, report: &MatchReport) -> Result<String>;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured export
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for shareable reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// CSV formatter, one row per candidate
pub struct CsvFormatter;

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    csv_formatter: CsvFormatter,
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
        let rule = if level == 1 { "=" } else { "-" }.repeat(80);
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{}\n{}\n{}\n", rule, title.color(color).bold(), rule)
        } else {
            format!("\n{}\n{}\n{}\n", rule, title, rule)
        }
    }

    fn recommendation_color(recommendation: Recommendation) -> Color {
        match recommendation {
            Recommendation::Strong => Color::Green,
            Recommendation::Good => Color::Yellow,
            Recommendation::Possible => Color::BrightYellow,
            Recommendation::Weak => Color::Red,
        }
    }

    fn format_recommendation(&self, recommendation: Recommendation) -> String {
        let text = recommendation.to_string();
        if self.use_colors {
            text.color(Self::recommendation_color(recommendation)).bold().to_string()
        } else {
            text
        }
    }

    fn format_candidate(&self, score: &CandidateScore) -> String {
        let mut output = String::new();
        let profile = &score.profile;

        output.push_str(&format!(
            "Email: {} | Phone: {}\n",
            profile.email.as_deref().unwrap_or("N/A"),
            profile.phone.as_deref().unwrap_or("N/A")
        ));
        output.push_str(&format!(
            "Education: {} | {} years experience\n\n",
            profile.education, profile.experience_years
        ));

        output.push_str("Score Breakdown:\n");
        output.push_str(&format!("  • Skills Match:     {:.2}%\n", score.skill_match_percentage));
        output.push_str(&format!("  • Text Similarity:  {:.2}%\n", score.text_similarity));
        output.push_str(&format!("  • Experience Match: {:.2}%\n", score.experience_match));

        let matched_limit = if self.detailed { usize::MAX } else { MATCHED_PREVIEW };
        output.push_str(&format!("\nHas Required Skills ({}):\n", score.matched_skills.len()));
        output.push_str(&preview_list(&score.matched_skills, matched_limit, |s| {
            self.colorize(s, Color::Green)
        }));

        if !score.missing_skills.is_empty() {
            let missing_limit = if self.detailed { usize::MAX } else { MISSING_PREVIEW };
            output.push_str(&format!("\nMissing Skills ({}):\n", score.missing_skills.len()));
            output.push_str(&preview_list(&score.missing_skills, missing_limit, |s| {
                self.colorize(s, Color::Red)
            }));
        }

        output.push_str(&format!("\n{}\n", self.format_recommendation(score.recommendation)));
        output
    }
}

/// Comma-joined preview of at most `limit` items, with an overflow note
fn preview_list(items: &[String], limit: usize, paint: impl Fn(&str) -> String) -> String {
    if items.is_empty() {
        return "   None\n".to_string();
    }

    let shown: Vec<String> = items.iter().take(limit).map(|s| paint(s)).collect();
    let mut output = format!("   {}\n", shown.join(", "));
    if items.len() > limit {
        output.push_str(&format!("   ... and {} more\n", items.len() - limit));
    }
    output
}

impl OutputFormatter for ConsoleFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("CANDIDATE RANKINGS - SORTED BY SCORE", 1));
        output.push_str(&format!(
            "Job: {} | Similarity: {:?} | Generated: {}\n",
            report.metadata.job_file,
            report.metadata.similarity_mode,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        if report.candidates.is_empty() {
            output.push_str(&self.colorize("\nNo candidates found!\n", Color::Red));
        }

        for candidate in &report.candidates {
            output.push_str(&self.format_header(
                &format!(
                    "RANK #{} | Overall Score: {:.2}% | {}",
                    candidate.rank, candidate.score.overall_score, candidate.score.candidate_id
                ),
                2,
            ));
            output.push_str(&self.format_candidate(&candidate.score));
        }

        output.push_str(&self.format_header("SUMMARY STATISTICS", 1));
        output.push_str(&format!("Total Candidates Analyzed: {}\n\n", report.summary.total));
        for bucket in &report.summary.buckets {
            let line = format!(
                "{:<16} {:2} ({:5.1}%) - {}",
                format!("{}:", title_case(bucket.recommendation.label())),
                bucket.count,
                bucket.percentage,
                bucket.recommendation.action()
            );
            output.push_str(&self.colorize(&line, Self::recommendation_color(bucket.recommendation)));
            output.push('\n');
        }

        if !report.skipped.is_empty() {
            output.push_str(&self.format_header(&format!("SKIPPED ({})", report.skipped.len()), 3));
            for skipped in &report.skipped {
                output.push_str(&format!("  • {}: {}\n", skipped.candidate_id, skipped.reason));
            }
        }

        output.push_str(&self.format_header(
            &format!("TOP {} CANDIDATES TO INTERVIEW", report.top_candidates),
            1,
        ));
        for candidate in report.shortlist() {
            output.push_str(&format!(
                "{}. {} - {:.2}% - {}\n",
                candidate.rank,
                candidate.score.candidate_id,
                candidate.score.overall_score,
                candidate.score.profile.email.as_deref().unwrap_or("N/A")
            ));
        }

        output.push_str(&self.format_header("SKILL GAP ANALYSIS", 1));
        if report.skill_gaps.is_empty() {
            output.push_str(&self.colorize("All candidates have all required skills!\n", Color::Green));
        } else {
            output.push_str("Most Commonly Missing Skills:\n");
            for gap in &report.skill_gaps {
                output.push_str(&format!(
                    "  • {}: {}/{} candidates ({:.0}%)\n",
                    gap.skill, gap.count, report.summary.total, gap.percentage
                ));
            }
        }

        Ok(output)
    }

    fn format_match(&self, report: &MatchReport) -> Result<String> {
        let score = &report.score;
        let mut output = String::new();

        output.push_str(&self.format_header("CANDIDATE ANALYSIS", 1));
        output.push_str(&format!("Candidate: {}\n", score.candidate_id));
        output.push_str(&format!("Job: {}\n", report.metadata.job_file));

        output.push_str(&self.format_header(&format!("OVERALL SCORE: {:.2}%", score.overall_score), 1));
        output.push_str(&self.format_candidate(score));

        if self.detailed {
            output.push_str(&self.format_header("Top Resume Keywords", 3));
            for keyword in &report.resume_keywords {
                output.push_str(&format!("  {}: {:.4}\n", keyword.term, keyword.weight));
            }
            output.push_str(&self.format_header("Top Job Keywords", 3));
            for keyword in &report.job_keywords {
                output.push_str(&format!("  {}: {:.4}\n", keyword.term, keyword.weight));
            }
        }

        Ok(output)
    }
}

fn title_case(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        self.render(report)
    }

    fn format_match(&self, report: &MatchReport) -> Result<String> {
        self.render(report)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn metadata_line(&self, metadata: &ReportMetadata) -> String {
        if !self.include_metadata {
            return String::new();
        }

        let job_name = Path::new(&metadata.job_file)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| metadata.job_file.clone());

        format!(
            "**Generated:** {} | **Job:** `{}` | **Similarity:** {:?}\n\n",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            job_name,
            metadata.similarity_mode
        )
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Candidate Rankings\n\n");
        output.push_str(&self.metadata_line(&report.metadata));

        output.push_str("| Rank | Candidate | Overall | Skills | Similarity | Experience | Recommendation |\n");
        output.push_str("|------|-----------|---------|--------|------------|------------|----------------|\n");
        for candidate in &report.candidates {
            let s = &candidate.score;
            output.push_str(&format!(
                "| {} | {} | {:.2}% | {:.2}% | {:.2}% | {:.2}% | {} |\n",
                candidate.rank,
                s.candidate_id,
                s.overall_score,
                s.skill_match_percentage,
                s.text_similarity,
                s.experience_match,
                s.recommendation
            ));
        }
        output.push('\n');

        output.push_str("## Summary\n\n");
        output.push_str(&format!("Total candidates analyzed: **{}**\n\n", report.summary.total));
        for bucket in &report.summary.buckets {
            output.push_str(&format!(
                "- {}: {} ({:.1}%) - {}\n",
                title_case(bucket.recommendation.label()),
                bucket.count,
                bucket.percentage,
                bucket.recommendation.action()
            ));
        }
        output.push('\n');

        if !report.candidates.is_empty() {
            output.push_str(&format!("## Top {} Candidates to Interview\n\n", report.top_candidates));
            for candidate in report.shortlist() {
                output.push_str(&format!(
                    "{}. **{}** - {:.2}%\n",
                    candidate.rank, candidate.score.candidate_id, candidate.score.overall_score
                ));
            }
            output.push('\n');
        }

        output.push_str("## Skill Gap Analysis\n\n");
        if report.skill_gaps.is_empty() {
            output.push_str("All candidates have all required skills.\n");
        } else {
            for gap in &report.skill_gaps {
                output.push_str(&format!(
                    "- `{}`: {}/{} candidates ({:.0}%)\n",
                    gap.skill, gap.count, report.summary.total, gap.percentage
                ));
            }
        }

        if !report.skipped.is_empty() {
            output.push_str("\n## Skipped\n\n");
            for skipped in &report.skipped {
                output.push_str(&format!("- `{}`: {}\n", skipped.candidate_id, skipped.reason));
            }
        }

        Ok(output)
    }

    fn format_match(&self, report: &MatchReport) -> Result<String> {
        let s = &report.score;
        let mut output = String::new();

        output.push_str(&format!("# Candidate Analysis: {}\n\n", s.candidate_id));
        output.push_str(&self.metadata_line(&report.metadata));
        output.push_str(&format!("**Overall Score:** {:.2}% | **{}**\n\n", s.overall_score, s.recommendation));

        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        output.push_str(&format!("| Skills Match | {:.2}% | 50% |\n", s.skill_match_percentage));
        output.push_str(&format!("| Text Similarity | {:.2}% | 30% |\n", s.text_similarity));
        output.push_str(&format!("| Experience Match | {:.2}% | 20% |\n\n", s.experience_match));

        output.push_str(&format!("**Matched skills:** {}\n\n", join_or_none(&s.matched_skills)));
        output.push_str(&format!("**Missing skills:** {}\n\n", join_or_none(&s.missing_skills)));

        for (title, keywords) in [
            ("Top Resume Keywords", &report.resume_keywords),
            ("Top Job Keywords", &report.job_keywords),
        ] {
            if keywords.is_empty() {
                continue;
            }
            output.push_str(&format!("## {}\n\n", title));
            for keyword in keywords {
                output.push_str(&format!("- {} ({:.4})\n", keyword.term, keyword.weight));
            }
            output.push('\n');
        }

        Ok(output)
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

const CSV_HEADER: [&str; 13] = [
    "rank",
    "candidate_name",
    "overall_score",
    "skill_match_percentage",
    "text_similarity",
    "experience_match",
    "email",
    "phone",
    "education",
    "experience_years",
    "matched_skills",
    "missing_skills",
    "recommendation",
];

impl CsvFormatter {
    fn write_rows<'a, I>(rows: I) -> Result<String>
    where
        I: IntoIterator<Item = (usize, &'a CandidateScore)>,
    {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;

        for (rank, s) in rows {
            writer.write_record([
                rank.to_string(),
                s.candidate_id.clone(),
                format!("{:.2}", s.overall_score),
                format!("{:.2}", s.skill_match_percentage),
                format!("{:.2}", s.text_similarity),
                format!("{:.2}", s.experience_match),
                s.profile.email.clone().unwrap_or_default(),
                s.profile.phone.clone().unwrap_or_default(),
                s.profile.education.to_string(),
                s.profile.experience_years.to_string(),
                s.matched_skills.join(", "),
                s.missing_skills.join(", "),
                s.recommendation.to_string(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| RankerError::OutputFormatting(format!("Failed to flush CSV: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| RankerError::OutputFormatting(e.to_string()))
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        Self::write_rows(report.candidates.iter().map(|c| (c.rank, &c.score)))
    }

    fn format_match(&self, report: &MatchReport) -> Result<String> {
        Self::write_rows(std::iter::once((1, &report.score)))
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            csv_formatter: CsvFormatter,
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Csv => &self.csv_formatter,
        }
    }

    pub fn generate_ranking(&self, report: &RankingReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_ranking(report)
    }

    pub fn generate_match(&self, report: &MatchReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_match(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, base_name: &str, timestamp: bool) -> String {
    let stem = Path::new(base_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Csv => "csv",
    };

    format!("{}_ranking{}.{}", stem, timestamp_suffix, extension)
}
