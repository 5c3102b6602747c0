//! Session report rendering and export.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{PrepError, PrepResult};
use crate::log_system_event;
use crate::models::{AtsReport, InterviewFeedback, JdSummary, Level, Mcq, McqAttempt, PracticeResult};

/// A spoken (or typed) mock-interview answer with its evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceAnswer {
    pub question: String,
    pub transcript: String,
    pub feedback: InterviewFeedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
}

impl ReportFormat {
    /// `.json` selects JSON; anything else is Markdown.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
            _ => ReportFormat::Markdown,
        }
    }
}

/// Everything produced during one run of the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewReport {
    pub role: String,
    pub level: Level,
    pub generated_at: DateTime<Utc>,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub mcqs: Vec<Mcq>,
    pub ats: Option<AtsReport>,
    pub suggestions: Vec<String>,
    pub jd_summary: Option<JdSummary>,
    pub quiz_rows: Vec<McqAttempt>,
    pub practice_results: Vec<PracticeResult>,
    pub per_question_seconds: Option<u64>,
    pub voice: Option<VoiceAnswer>,
}

impl InterviewReport {
    pub fn new(role: &str, level: Level, generated_at: DateTime<Utc>) -> Self {
        Self {
            role: role.to_string(),
            level,
            generated_at,
            questions: Vec::new(),
            answers: Vec::new(),
            mcqs: Vec::new(),
            ats: None,
            suggestions: Vec::new(),
            jd_summary: None,
            quiz_rows: Vec::new(),
            practice_results: Vec::new(),
            per_question_seconds: None,
            voice: None,
        }
    }

    pub fn to_json(&self) -> PrepResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Markdown rendering. Empty sections are left out.
    pub fn to_markdown(&self) -> String {
        self.to_string()
    }

    /// Writes the report to `path`, choosing the format from its extension.
    pub async fn export(&self, path: &Path) -> PrepResult<ReportFormat> {
        let format = ReportFormat::for_path(path);
        let body = match format {
            ReportFormat::Json => self.to_json()?,
            ReportFormat::Markdown => self.to_markdown(),
        };

        tokio::fs::write(path, body).await.map_err(|source| PrepError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        log_system_event!(export, path = path.display(), "report written");
        Ok(format)
    }
}

impl fmt::Display for InterviewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Interview Prep Report\n")?;
        writeln!(
            f,
            "Role: {} | Level: {} | Generated: {}\n",
            self.role,
            self.level,
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        )?;

        if !self.questions.is_empty() {
            writeln!(f, "## Interview Questions & Answers\n")?;
            for (i, question) in self.questions.iter().enumerate() {
                let answer = self.answers.get(i).map(String::as_str).unwrap_or("");
                writeln!(f, "**Q:** {question}\n")?;
                writeln!(f, "**A:** {answer}\n")?;
            }
        }

        if !self.mcqs.is_empty() {
            writeln!(f, "## MCQs (with answers)\n")?;
            for (i, mcq) in self.mcqs.iter().enumerate() {
                writeln!(f, "{}. {}", i + 1, mcq.question)?;
                for (j, option) in mcq.options.iter().enumerate() {
                    writeln!(f, "   {}. {}", Mcq::option_letter(j), option)?;
                }
                writeln!(
                    f,
                    "   Correct: {}. {}",
                    Mcq::option_letter(mcq.answer_index),
                    mcq.explanation
                )?;
                if !mcq.difficulty.as_str().is_empty() {
                    writeln!(f, "   Difficulty: {}", mcq.difficulty.badge())?;
                }
                writeln!(f)?;
            }
        }

        if let Some(ats) = &self.ats {
            writeln!(f, "## ATS Score\n")?;
            writeln!(f, "Score: {}%\n", ats.score)?;
            writeln!(f, "Matched Skills: {}\n", joined_or_dash(&ats.matched))?;
            writeln!(f, "Missing Skills: {}\n", joined_or_dash(&ats.missing))?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f, "## Resume Suggestions\n")?;
            for suggestion in &self.suggestions {
                writeln!(f, "- {suggestion}")?;
            }
            writeln!(f)?;
        }

        if let Some(summary) = &self.jd_summary {
            writeln!(f, "## Job Description Summary\n")?;
            if !summary.overview.is_empty() {
                writeln!(f, "{}\n", summary.overview)?;
            }
            writeln!(f, "Must-have: {}\n", joined_or_dash(&summary.must_have))?;
            writeln!(f, "Nice-to-have: {}\n", joined_or_dash(&summary.nice_to_have))?;
        }

        if !self.quiz_rows.is_empty() {
            writeln!(f, "## MCQ Analytics (ad-hoc)\n")?;
            for row in &self.quiz_rows {
                writeln!(
                    f,
                    "- Q{}: Selected={}, Correct={}, Correct?={}, Score={}",
                    row.number,
                    row.selected,
                    row.correct,
                    if row.is_correct { "Yes" } else { "No" },
                    row.score
                )?;
            }
            writeln!(f)?;
        }

        if !self.practice_results.is_empty() {
            writeln!(f, "## Practice Session Results\n")?;
            match self.per_question_seconds {
                Some(seconds) => {
                    writeln!(f, "Per-question time: {seconds}s\n")?;
                }
                None => {
                    writeln!(f, "Per-question time: -\n")?;
                }
            }
            for (i, result) in self.practice_results.iter().enumerate() {
                let selected = result
                    .selected_index
                    .map(|index| Mcq::option_letter(index).to_string())
                    .unwrap_or_else(|| "-".to_string());
                writeln!(
                    f,
                    "- Q{}: Selected={}, Correct={}, Score={}, Time Left={}s",
                    i + 1,
                    selected,
                    Mcq::option_letter(result.correct_index),
                    result.score_delta,
                    result.time_left_seconds
                )?;
            }
            let total: i64 = self.practice_results.iter().map(|r| r.score_delta).sum();
            writeln!(f, "\nTotal: {total}\n")?;
        }

        if let Some(voice) = &self.voice {
            writeln!(f, "## Mock Interview\n")?;
            writeln!(f, "**Q:** {}\n", voice.question)?;
            writeln!(f, "**Transcript:** {}\n", voice.transcript)?;
            let fb = &voice.feedback;
            writeln!(
                f,
                "Clarity: {} | Relevance: {} | Completeness: {} | Overall: {}\n",
                or_na(&fb.clarity),
                or_na(&fb.relevance),
                or_na(&fb.completeness),
                or_na(&fb.overall)
            )?;
            if let Some(feedback) = &fb.feedback {
                writeln!(f, "{feedback}\n")?;
            }
            if let Some(improvement) = &fb.improvement {
                writeln!(f, "How to improve: {improvement}\n")?;
            }
        }

        Ok(())
    }
}

fn joined_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;

    fn sample() -> InterviewReport {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let mut report = InterviewReport::new("Data Scientist", Level::Intermediate, now);
        report.questions = vec!["Why data?".to_string(), "Hardest bug?".to_string()];
        report.answers = vec!["Curiosity.".to_string()];
        report.mcqs = vec![
            Mcq::new("Mean of 1,2,3?", ["1", "2", "3", "6"].map(str::to_string), 1, "Sum over count.", Tier::Easy)
                .unwrap(),
        ];
        report.ats = Some(AtsReport {
            score: 50,
            matched: vec!["python".to_string()],
            missing: Vec::new(),
        });
        report.practice_results = vec![PracticeResult {
            selected_index: None,
            correct_index: 2,
            score_delta: -1,
            time_left_seconds: 0,
        }];
        report.per_question_seconds = Some(90);
        report
    }

    #[test]
    fn test_markdown_sections() {
        let markdown = sample().to_markdown();
        assert!(markdown.contains("Role: Data Scientist | Level: Intermediate | Generated: 2023-11-14 22:13 UTC"));
        assert!(markdown.contains("**Q:** Hardest bug?\n\n**A:** \n"));
        assert!(markdown.contains("   B. 2\n   C. 3"));
        assert!(markdown.contains("   Correct: B. Sum over count.\n   Difficulty: Easy"));
        assert!(markdown.contains("Missing Skills: -"));
        assert!(markdown.contains("- Q1: Selected=-, Correct=C, Score=-1, Time Left=0s"));
        assert!(markdown.contains("Per-question time: 90s"));
        assert!(!markdown.contains("## Resume Suggestions"));
        assert!(!markdown.contains("## Mock Interview"));
    }

    #[test]
    fn test_markdown_renders_through_display() {
        let report = sample();
        let markdown = format!("{report}");
        assert_eq!(markdown, report.to_markdown());
        assert!(markdown.starts_with("# Interview Prep Report\n\n"));
        assert!(markdown.ends_with("\nTotal: -1\n\n"));

        let empty = InterviewReport::new("Web Developer", Level::Beginner, report.generated_at);
        assert_eq!(
            empty.to_string(),
            "# Interview Prep Report\n\nRole: Web Developer | Level: Beginner | Generated: 2023-11-14 22:13 UTC\n\n"
        );
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ReportFormat::for_path(Path::new("out/report.JSON")), ReportFormat::Json);
        assert_eq!(ReportFormat::for_path(Path::new("report.md")), ReportFormat::Markdown);
        assert_eq!(ReportFormat::for_path(Path::new("report")), ReportFormat::Markdown);
    }

    #[test]
    fn test_json_round_trips() {
        let report = sample();
        let parsed: InterviewReport = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(parsed, report);
    }
}
