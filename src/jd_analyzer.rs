use crate::ats::extract_skills;
use crate::llm_service::TextGenerator;
use crate::log_llm_operation;
use crate::models::JdSummary;
use crate::prompts::{JD_SUMMARY_PARAMS, jd_summary_prompt};

const OVERVIEW_MARKER: &str = "OVERVIEW:";
const MUST_MARKER: &str = "MUST:";
const NICE_MARKER: &str = "NICE:";
const MAX_ITEMS: usize = 5;

/// Skill keywords mentioned by a job description.
pub fn extract_jd_skills(jd_text: &str) -> Vec<String> {
    extract_skills(jd_text)
}

/// Splits the JD's skills into those the résumé covers and those it lacks, both sorted.
pub fn compare_resume_vs_jd(resume_skills: &[String], jd_skills: &[String]) -> (Vec<String>, Vec<String>) {
    let (mut matched, mut missing): (Vec<String>, Vec<String>) = jd_skills
        .iter()
        .cloned()
        .partition(|skill| resume_skills.contains(skill));
    matched.sort();
    missing.sort();
    (matched, missing)
}

/// Model summary of a job description. An empty JD yields an empty
/// summary without a model call.
pub async fn jd_summary(generator: &dyn TextGenerator, jd_text: &str) -> JdSummary {
    if jd_text.trim().is_empty() {
        return JdSummary::default();
    }

    let response = generator
        .generate_text(
            &jd_summary_prompt(jd_text),
            JD_SUMMARY_PARAMS.max_tokens,
            JD_SUMMARY_PARAMS.temperature,
        )
        .await;
    if response.trim().is_empty() {
        log_llm_operation!(empty, "jd_summary");
    }
    parse_summary(&response)
}

/// Reads the `OVERVIEW:` / `MUST:` / `NICE:` layout. A response with none
/// of the markers is taken whole as the overview.
pub fn parse_summary(response: &str) -> JdSummary {
    let has_marker = [OVERVIEW_MARKER, MUST_MARKER, NICE_MARKER]
        .iter()
        .any(|marker| response.contains(marker));
    if !has_marker {
        return JdSummary {
            overview: response.trim().to_string(),
            ..JdSummary::default()
        };
    }

    let overview = section(response, OVERVIEW_MARKER, Some(MUST_MARKER))
        .map(|text| text.trim().to_string())
        .unwrap_or_default();
    let must_have = section(response, MUST_MARKER, Some(NICE_MARKER))
        .map(list_items)
        .unwrap_or_default();
    let nice_to_have = section(response, NICE_MARKER, None)
        .map(list_items)
        .unwrap_or_default();

    JdSummary { overview, must_have, nice_to_have }
}

fn section<'a>(text: &'a str, start: &str, end: Option<&str>) -> Option<&'a str> {
    let after = &text[text.find(start)? + start.len()..];
    let body = match end.and_then(|end| after.find(end)) {
        Some(stop) => &after[..stop],
        None => after,
    };
    Some(body)
}

fn list_items(block: &str) -> Vec<String> {
    block
        .lines()
        .map(|line| line.trim().trim_start_matches(['-', '•', ' ']).trim())
        .filter(|line| !line.is_empty())
        .take(MAX_ITEMS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_service::LLMService;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compare_resume_vs_jd() {
        let (matched, missing) = compare_resume_vs_jd(
            &strings(&["python", "sql", "git"]),
            &strings(&["sql", "docker", "python", "aws"]),
        );
        assert_eq!(matched, vec!["python", "sql"]);
        assert_eq!(missing, vec!["aws", "docker"]);
    }

    #[test]
    fn test_parse_summary_sections() {
        let response = "OVERVIEW:\nBuild data pipelines.\nOwn reliability.\nMUST:\n- Python\n- SQL\n• Airflow\n- Spark\n- dbt\n- Kafka\nNICE:\n- AWS\n\n- Go";
        let summary = parse_summary(response);
        assert_eq!(summary.overview, "Build data pipelines.\nOwn reliability.");
        assert_eq!(summary.must_have, vec!["Python", "SQL", "Airflow", "Spark", "dbt"]);
        assert_eq!(summary.nice_to_have, vec!["AWS", "Go"]);
    }

    #[test]
    fn test_parse_summary_without_markers() {
        let summary = parse_summary("  Just a paragraph about the role.  ");
        assert_eq!(summary.overview, "Just a paragraph about the role.");
        assert!(summary.must_have.is_empty());
    }

    #[tokio::test]
    async fn test_empty_jd_skips_model() {
        assert_eq!(jd_summary(&LLMService::disabled(), "   ").await, JdSummary::default());
    }
}
