use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use interview_prep::ats::{ats_score, extract_skills, resume_suggestions};
use interview_prep::config::{Config, LoggingConfig};
use interview_prep::jd_analyzer::{compare_resume_vs_jd, extract_jd_skills, jd_summary};
use interview_prep::question_generator::{
    ai_hr_questions, ai_tech_questions, generate_answer, simple_hr_questions, simple_tech_questions,
};
use interview_prep::report::VoiceAnswer;
use interview_prep::voice_interview::{Transcriber, TypedTranscriber, evaluate_answer, pick_interview_question};
use interview_prep::{
    AdhocQuiz, ErrorContext, InterviewReport, LLMService, Mcq, PracticeEvent, PracticeRequest, PracticeSession,
    PracticeState, PrepError, generate_ai_mcqs, generate_mcqs, log_system_event,
};

const QUESTIONS_PER_KIND: usize = 5;

type InputLines = Lines<BufReader<Stdin>>;

/// Interview preparation assistant. Profile settings (ROLE, LEVEL, SKILLS,
/// USE_AI, LLM_PROVIDER, ...) come from the environment or a .env file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// ATS score, suggestions and JD comparison
    Analyze {
        /// Plain-text resume
        resume: PathBuf,
        /// Plain-text job description
        jd: Option<PathBuf>,
    },
    /// HR and technical questions with model answers
    Questions,
    /// Untimed MCQ quiz, checked one question at a time
    Quiz,
    /// Timed MCQ practice session
    Practice,
    /// Mock interview question with graded answer
    Voice,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Analyze { .. } => "analyze",
            Command::Questions => "questions",
            Command::Quiz => "quiz",
            Command::Practice => "practice",
            Command::Voice => "voice",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = Config::from_env()?;
    let _guard = setup_logging(&config.logging)?;
    config.validate()?;

    let command = args.command.name();
    log_system_event!(startup, component = "cli", format!("running '{}'", command));

    let mut report = InterviewReport::new(&config.profile.role, config.profile.level, Utc::now());
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let outcome = match args.command {
        Command::Analyze { resume, jd } => analyze(&config, &mut report, &resume, jd).await,
        Command::Questions => {
            questions(&config, &mut report).await;
            Ok(())
        }
        Command::Quiz => quiz(&config, &mut report, &mut input).await,
        Command::Practice => practice(&config, &mut report, &mut input).await,
        Command::Voice => voice(&config, &mut report, &mut input).await,
    };

    if let Err(e) = outcome {
        let e = e.log_with_context(ErrorContext::new(command));
        eprintln!("{}", e.user_message());
        return Err(e.into());
    }

    match report.export(&config.report_path).await {
        Ok(_) => println!("\nReport written to {}", config.report_path.display()),
        Err(e) => {
            let e = e.log_with_context(
                ErrorContext::new("export_report").with_resource(&config.report_path.display().to_string()),
            );
            eprintln!("{}", e.user_message());
        }
    }

    log_system_event!(shutdown, component = "cli", "done");
    Ok(())
}

/// Completion backend for this run; AI features are off unless USE_AI is set.
fn generator_for(config: &Config) -> LLMService {
    if config.profile.use_ai {
        config.llm_service()
    } else {
        LLMService::disabled()
    }
}

fn rng() -> StdRng {
    StdRng::from_entropy()
}

async fn read_file(path: &Path) -> Result<String, PrepError> {
    tokio::fs::read_to_string(path).await.map_err(|source| PrepError::Read {
        path: path.to_path_buf(),
        source,
    })
}

async fn analyze(
    config: &Config,
    report: &mut InterviewReport,
    resume_path: &Path,
    jd_path: Option<PathBuf>,
) -> Result<(), PrepError> {
    let generator = generator_for(config);
    let role = &config.profile.role;

    let resume = read_file(resume_path).await?;
    let extracted = extract_skills(&resume);
    let ats = ats_score(&extracted, role);

    println!("Extracted skills: {}", dash_if_empty(&extracted));
    println!("ATS score for {}: {}%", role, ats.score);
    println!("Matched: {}", dash_if_empty(&ats.matched));
    println!("Missing: {}", dash_if_empty(&ats.missing));

    let suggestions = resume_suggestions(&generator, &extracted, &ats.missing, role).await;
    println!("\nResume suggestions:");
    for suggestion in &suggestions {
        println!("  - {}", suggestion);
    }

    if let Some(jd_path) = jd_path {
        let jd_text = read_file(&jd_path).await?;
        if jd_text.trim().is_empty() {
            println!("\nNo JD content found.");
        } else {
            let jd_skills = extract_jd_skills(&jd_text);
            let (matched, missing) = compare_resume_vs_jd(&extracted, &jd_skills);
            let summary = jd_summary(&generator, &jd_text).await;

            println!("\nJob description");
            if !summary.overview.is_empty() {
                println!("{}", summary.overview);
            }
            println!("Must-have: {}", dash_if_empty(&summary.must_have));
            println!("Nice-to-have: {}", dash_if_empty(&summary.nice_to_have));
            println!("Matched skills ({}): {}", matched.len(), dash_if_empty(&matched));
            println!("Missing skills ({}): {}", missing.len(), dash_if_empty(&missing));
            report.jd_summary = Some(summary);
        }
    }

    report.ats = Some(ats);
    report.suggestions = suggestions;
    Ok(())
}

async fn questions(config: &Config, report: &mut InterviewReport) {
    let generator = generator_for(config);
    let profile = &config.profile;
    let mut rng = rng();

    let (hr, tech) = if profile.use_ai {
        (
            ai_hr_questions(&generator, &profile.role, profile.level, QUESTIONS_PER_KIND, &mut rng).await,
            ai_tech_questions(
                &generator,
                &profile.role,
                profile.level,
                QUESTIONS_PER_KIND,
                &profile.skills,
                &mut rng,
            )
            .await,
        )
    } else {
        (
            simple_hr_questions(&profile.role, profile.level, QUESTIONS_PER_KIND, &mut rng),
            simple_tech_questions(&profile.role, profile.level, &profile.skills, QUESTIONS_PER_KIND, &mut rng),
        )
    };

    let all: Vec<String> = hr.into_iter().chain(tech).collect();
    let mut answers = Vec::with_capacity(all.len());
    for (i, question) in all.iter().enumerate() {
        let answer = generate_answer(&generator, question, &profile.role, profile.level).await;
        println!("Q{}: {}", i + 1, question);
        println!("    {}\n", answer);
        answers.push(answer);
    }

    report.questions = all;
    report.answers = answers;
}

async fn generate_set(config: &Config, count: usize) -> Vec<Mcq> {
    let generator = generator_for(config);
    let profile = &config.profile;
    let level = profile.level.as_str();
    let mut rng = rng();

    if profile.use_ai {
        generate_ai_mcqs(&generator, &profile.role, &profile.skills, count, level, &mut rng).await
    } else {
        generate_mcqs(&profile.role, &profile.skills, count, level, &mut rng)
    }
}

async fn quiz(config: &Config, report: &mut InterviewReport, input: &mut InputLines) -> Result<(), PrepError> {
    let mcqs = generate_set(config, config.practice.quiz_mcqs).await;
    let mut quiz = AdhocQuiz::new(mcqs, config.profile.level);
    println!("{} questions. Answer with A-D, or q to finish early.\n", quiz.questions().len());

    let mut index = 0;
    while index < quiz.questions().len() {
        print_mcq(index, quiz.questions().len(), &quiz.questions()[index]);

        let Some(line) = next_line(input).await? else { break };
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            break;
        }
        let Some(choice) = parse_choice(line) else {
            println!("Pick A, B, C or D.");
            continue;
        };

        let explanation = quiz.questions()[index].explanation.clone();
        if let Some(row) = quiz.check(index, choice) {
            if row.is_correct {
                println!("Correct! {}\n", explanation);
            } else {
                println!("Wrong. Correct: {}\n", row.correct);
            }
        }
        index += 1;
    }

    println!("Score: {} / {}", quiz.score(), quiz.max_score());
    report.mcqs = quiz.questions().to_vec();
    report.quiz_rows = quiz.rows().to_vec();
    Ok(())
}

async fn practice(config: &Config, report: &mut InterviewReport, input: &mut InputLines) -> Result<(), PrepError> {
    let generator = generator_for(config);
    let profile = &config.profile;
    let seconds = config.practice.seconds_for(profile.level);
    let request = PracticeRequest {
        role: profile.role.clone(),
        skills: profile.skills.clone(),
        level: profile.level,
        question_count: config.practice.total_mcqs,
        use_ai: profile.use_ai,
    };

    let mut session = PracticeSession::new(profile.level, seconds);
    let mut rng = rng();
    session.start_generated(&request, &generator, &mut rng, Utc::now()).await;
    info!(session_id = %session.id(), questions = session.question_count(), "Practice started");
    println!(
        "{} questions, {}s each. Answer with A-D, s to skip, q to stop.\n",
        session.question_count(),
        seconds
    );

    while session.is_running() {
        let index = session.current_index();
        if let Some(mcq) = session.current_question() {
            print_mcq(index, session.question_count(), mcq);
        }

        let now = Utc::now();
        println!("Time left: {}s", session.remaining_seconds(now));
        // one extra second guarantees the deadline has passed when the wait ends
        let wait = Duration::from_secs(session.remaining_seconds(now) + 1);

        let event = match tokio::time::timeout(wait, next_line(input)).await {
            Err(_) => session.tick(None, Utc::now()),
            Ok(line) => {
                let Some(line) = line? else {
                    session.stop();
                    break;
                };
                let line = line.trim().to_lowercase();
                if line == "q" {
                    session.stop();
                    break;
                }
                // the question may have expired while the line was being typed
                if let Some(expired) = session.tick(None, Utc::now()) {
                    Some(expired)
                } else if line == "s" {
                    session.submit(None, Utc::now())
                } else {
                    match parse_choice(&line) {
                        Some(choice) => session.submit(Some(choice), Utc::now()),
                        None => {
                            println!("Pick A, B, C or D.");
                            continue;
                        }
                    }
                }
            }
        };

        if let Some(event) = event {
            print_practice_event(&event);
        }
    }

    match session.state() {
        PracticeState::Finished { total } => println!("\nSession complete. Total score: {}", total),
        _ => println!("\nSession stopped after {} answers.", session.results().len()),
    }

    report.mcqs = session.questions().to_vec();
    report.practice_results = session.results().to_vec();
    report.per_question_seconds = Some(session.per_question_seconds());
    Ok(())
}

fn print_practice_event(event: &PracticeEvent) {
    let result = event.result();
    let verdict = match result.selected_index {
        None => "No answer".to_string(),
        Some(selected) if selected == result.correct_index => "Correct".to_string(),
        Some(_) => format!("Wrong, correct was {}", Mcq::option_letter(result.correct_index)),
    };
    println!("{} ({:+} points, {}s left)\n", verdict, result.score_delta, result.time_left_seconds);
}

async fn voice(config: &Config, report: &mut InterviewReport, input: &mut InputLines) -> Result<(), PrepError> {
    let generator = generator_for(config);
    let question = pick_interview_question(&config.profile.role, config.profile.level, &mut rng());
    println!("Question: {}\n", question);
    println!("Type your answer on one line:");

    let line = next_line(input).await?.unwrap_or_default();
    let Some(transcript) = TypedTranscriber.transcribe(line.as_bytes()) else {
        return Err(PrepError::InvalidInput("Could not understand the answer.".to_string()));
    };

    let feedback = evaluate_answer(&generator, &question, &transcript).await;
    if feedback.is_empty() {
        println!("\nNo feedback available (AI disabled or unreachable).");
    } else {
        println!("\nClarity: {}", feedback.clarity.as_deref().unwrap_or("N/A"));
        println!("Relevance: {}", feedback.relevance.as_deref().unwrap_or("N/A"));
        println!("Completeness: {}", feedback.completeness.as_deref().unwrap_or("N/A"));
        println!("Overall: {}", feedback.overall.as_deref().unwrap_or("N/A"));
        println!("\n{}", feedback.feedback.as_deref().unwrap_or("No detailed feedback generated."));
        if let Some(improvement) = &feedback.improvement {
            println!("\nHow to improve: {}", improvement);
        }
    }

    report.voice = Some(VoiceAnswer {
        question,
        transcript,
        feedback,
    });
    Ok(())
}

async fn next_line(input: &mut InputLines) -> Result<Option<String>, PrepError> {
    input.next_line().await.map_err(|source| PrepError::Read {
        path: PathBuf::from("<stdin>"),
        source,
    })
}

fn print_mcq(index: usize, total: usize, mcq: &Mcq) {
    println!("Q{}/{} [{}] {}", index + 1, total, mcq.difficulty.badge(), mcq.question);
    for (i, option) in mcq.options.iter().enumerate() {
        println!("  {}) {}", Mcq::option_letter(i), option);
    }
}

/// A-D (either case) or 1-4.
fn parse_choice(input: &str) -> Option<usize> {
    match input.trim().to_ascii_uppercase().as_str() {
        "A" | "1" => Some(0),
        "B" | "2" => Some(1),
        "C" | "3" => Some(2),
        "D" | "4" => Some(3),
        _ => None,
    }
}

fn dash_if_empty(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn setup_logging(logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    use std::fs;
    use tracing_subscriber::fmt;

    let env_filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    // Console goes to stderr so it never interleaves with the question stream
    let console_layer = logging.console_enabled.then(|| {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(true)
            .with_writer(std::io::stderr)
    });

    let (file_layer, guard) = if logging.file_enabled {
        fs::create_dir_all(&logging.log_directory).unwrap_or_else(|e| {
            eprintln!("Warning: Could not create logs directory: {}", e);
        });

        // Set up file appender with daily rotation
        let file_appender = tracing_appender::rolling::daily(&logging.log_directory, "interview-prep.log");
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
        let layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(non_blocking_file);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    info!(
        directory = %logging.log_directory,
        file_enabled = logging.file_enabled,
        console_enabled = logging.console_enabled,
        "Logging initialized"
    );

    Ok(guard)
}
