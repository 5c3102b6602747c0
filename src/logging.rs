/// Standardized logging macros for consistent field names and message patterns across the crate
///
/// These macros ensure:
/// - Consistent field naming conventions
/// - Appropriate logging levels for different scenarios
/// - Structured logging with context

// ============================================================================
// Question Generation Logging Macros
// ============================================================================

/// Log the outcome of a question or MCQ generation pass
#[macro_export]
macro_rules! log_generation {
    (fallback, $operation:expr, ai_count = $ai:expr, shortfall = $shortfall:expr) => {
        tracing::warn!(
            component = "generation",
            operation = $operation,
            ai_count = $ai,
            shortfall = $shortfall,
            "AI output short, topping up from question bank"
        );
    };
    (fallback, $operation:expr, $msg:expr) => {
        tracing::warn!(
            component = "generation",
            operation = $operation,
            "Generation fallback: {}", $msg
        );
    };
    ($operation:expr, skill = $skill:expr, requested = $requested:expr, produced = $produced:expr) => {
        tracing::info!(
            component = "generation",
            operation = $operation,
            skill = %$skill,
            requested = $requested,
            produced = $produced,
            "Generation completed"
        );
    };
    ($operation:expr, role = $role:expr, requested = $requested:expr, produced = $produced:expr) => {
        tracing::info!(
            component = "generation",
            operation = $operation,
            role = %$role,
            requested = $requested,
            produced = $produced,
            "Generation completed"
        );
    };
}

// ============================================================================
// Practice Session Logging Macros
// ============================================================================

/// Log practice session transitions
#[macro_export]
macro_rules! log_practice_event {
    (start, session_id = $session_id:expr, question_count = $count:expr) => {
        tracing::info!(
            component = "practice",
            event = "start",
            session_id = %$session_id,
            question_count = $count,
            "Practice session started"
        );
    };
    (answer, session_id = $session_id:expr, index = $index:expr, score_delta = $delta:expr, expired = $expired:expr) => {
        tracing::debug!(
            component = "practice",
            event = "answer",
            session_id = %$session_id,
            index = $index,
            score_delta = $delta,
            expired = $expired,
            "Practice question resolved"
        );
    };
    (finish, session_id = $session_id:expr, total = $total:expr) => {
        tracing::info!(
            component = "practice",
            event = "finish",
            session_id = %$session_id,
            total_score = $total,
            "Practice session finished"
        );
    };
    (stop, session_id = $session_id:expr, answered = $answered:expr) => {
        tracing::info!(
            component = "practice",
            event = "stop",
            session_id = %$session_id,
            answered = $answered,
            "Practice session stopped"
        );
    };
}

// ============================================================================
// LLM Service Logging Macros
// ============================================================================

/// Log LLM service operations with provider context
#[macro_export]
macro_rules! log_llm_operation {
    (success, $operation:expr, provider = $provider:expr, duration_ms = $duration:expr, response_length = $len:expr) => {
        tracing::info!(
            component = "llm_service",
            operation = $operation,
            provider = %$provider,
            duration_ms = $duration,
            response_length = $len,
            "LLM operation completed successfully"
        );
    };
    (error, $operation:expr, provider = $provider:expr, error = $error:expr) => {
        tracing::warn!(
            component = "llm_service",
            operation = $operation,
            provider = %$provider,
            error = %$error,
            "LLM operation failed, continuing without AI content"
        );
    };
    (empty, $operation:expr) => {
        tracing::debug!(
            component = "llm_service",
            operation = $operation,
            "LLM returned no content"
        );
    };
}

// ============================================================================
// System Event Logging Macros
// ============================================================================

/// Log system startup and shutdown events
#[macro_export]
macro_rules! log_system_event {
    (startup, component = $component:expr, $msg:expr) => {
        tracing::info!(
            event_type = "startup",
            component = $component,
            "System event: {}",
            $msg
        );
    };
    (shutdown, component = $component:expr, $msg:expr) => {
        tracing::info!(
            event_type = "shutdown",
            component = $component,
            "System event: {}",
            $msg
        );
    };
    (config, $msg:expr) => {
        tracing::info!(event_type = "configuration", "System event: {}", $msg);
    };
    (export, path = $path:expr, $msg:expr) => {
        tracing::info!(
            event_type = "export",
            path = %$path,
            "System event: {}",
            $msg
        );
    };
}

// ============================================================================
// Validation Logging Macros
// ============================================================================

/// Log validation results consistently
#[macro_export]
macro_rules! log_validation {
    (success, $component:expr, $msg:expr) => {
        tracing::debug!(
            event_type = "validation",
            component = $component,
            result = "success",
            "Validation completed: {}", $msg
        );
    };
    (failure, $component:expr, error = $error:expr) => {
        tracing::warn!(
            event_type = "validation",
            component = $component,
            result = "failure",
            error = %$error,
            "Validation failed"
        );
    };
}
