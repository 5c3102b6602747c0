//! Prompt templates and sampling parameters for every model call.

use crate::llm_providers::GenerationParams;
use crate::models::Level;

pub const MCQ_PARAMS: GenerationParams = GenerationParams::new(2400, 0.92);
pub const HR_PARAMS: GenerationParams = GenerationParams::new(800, 0.8);
pub const TECH_PARAMS: GenerationParams = GenerationParams::new(900, 0.85);
pub const ANSWER_PARAMS: GenerationParams = GenerationParams::new(600, 0.7);
pub const SUGGESTION_PARAMS: GenerationParams = GenerationParams::new(400, 0.8);
pub const JD_SUMMARY_PARAMS: GenerationParams = GenerationParams::new(700, 0.5);
pub const FEEDBACK_PARAMS: GenerationParams = GenerationParams::new(300, 0.9);

pub fn mcq_prompt(n: usize, skill: &str) -> String {
    format!(
        r#"Generate {n} MCQs for the topic: {skill}.
Difficulty mix: 30% Easy, 50% Intermediate, 20% Advanced.
Format:

Q: <question>
A) <option>
B) <option>
C) <option>
D) <option>
Correct: <A|B|C|D>
Explanation: <why>

Separate questions using lines of ---."#
    )
}

pub fn hr_prompt(n: usize, role: &str, level: Level) -> String {
    format!(
        "Generate {n} {level} HR interview questions for a {role}.\n\
         Focus on behavioral and situational questions.\n\
         Return as a bullet list with one question per line."
    )
}

pub fn tech_prompt(n: usize, role: &str, level: Level, skills: &[String]) -> String {
    let skills = if skills.is_empty() {
        "general fundamentals".to_string()
    } else {
        skills.join(", ")
    };
    format!(
        "Generate {n} {level} technical interview questions for a {role}.\n\
         Consider the candidate's skills: {skills}.\n\
         Include system design or practical troubleshooting when appropriate.\n\
         Return as a bullet list with one question per line."
    )
}

pub fn answer_prompt(question: &str, role: &str, level: Level) -> String {
    format!(
        "Provide a high-quality {level} interview answer for a {role}.\n\
         Question: {question}\n\
         Answer holistically with context, approach, metrics, tradeoffs, and conclusion."
    )
}

pub fn suggestions_prompt(extracted: &[String], missing: &[String], role: &str) -> String {
    format!(
        "You are an ATS expert. Based on extracted skills: {} and missing skills: {} \
         create concise bullet-point resume improvements for role {role}. \
         Keep bullets short; focus on measurable achievements, relevant tools, and keywords.",
        extracted.join(", "),
        missing.join(", ")
    )
}

pub fn jd_summary_prompt(jd_text: &str) -> String {
    format!(
        r#"Summarize this job description. Provide:
1) A 3-sentence overview
2) 5 must-have skills/requirements
3) 5 nice-to-have skills

JD:
{jd_text}

Format:
OVERVIEW:
<text>
MUST:
- <item> x5
NICE:
- <item> x5"#
    )
}

pub fn feedback_prompt(question: &str, answer: &str) -> String {
    format!(
        r#"You are an expert technical interviewer. Evaluate the candidate's answer.

Question: {question}
Answer: {answer}

Provide feedback in the following format:
Clarity: <Score 1-10>
Relevance: <Score 1-10>
Completeness: <Score 1-10>
Overall: <Score 1-10>
Feedback: <One paragraph summary>
Improvement: <Bullet points on how to improve>

Output strictly in this format."#
    )
}

/// Suffix appended to HR questions for each level.
pub fn hr_suffix(level: Level) -> &'static str {
    match level {
        Level::Beginner => " (focus on basic structure and clarity)",
        Level::Intermediate => " (include metrics and trade-offs)",
        Level::Advanced => " (quantify impact, discuss strategy and risks)",
    }
}

/// Tag appended to technical questions for each level.
pub fn tech_tag(level: Level) -> &'static str {
    match level {
        Level::Beginner => "(Basics)",
        Level::Intermediate => "(Depth)",
        Level::Advanced => "(Systems/Scale)",
    }
}

pub const TECH_TEMPLATES: [&str; 5] = [
    "Explain {skill} and a real-world use case.",
    "What are common pitfalls in {skill} and how to avoid them?",
    "Design a mini system that uses {skill}; outline components and data flow.",
    "Compare {skill} with an alternative and discuss trade-offs.",
    "How do you test and monitor features built with {skill}?",
];
