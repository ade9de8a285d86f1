use axum::http::StatusCode;

use crate::api::problem::{Problem, ProblemResponse};
use crate::contract::error::{ErrorKind, UsersError};

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.example.com/{}", code))
        .with_code(code)
        .with_instance(instance);

    // Add trace id from current tracing span if available
    let problem = if let Some(id) = tracing::Span::current().id() {
        problem.with_trace_id(id.into_u64().to_string())
    } else {
        problem
    };

    ProblemResponse(problem)
}

/// Map a contract error to an RFC 9457 ProblemResponse
pub fn map_users_error(e: &UsersError, instance: &str) -> ProblemResponse {
    let (status, code) = match e.kind() {
        ErrorKind::BadRequest => (StatusCode::BAD_REQUEST, "USERS_BAD_REQUEST"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "USERS_NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "USERS_CONFLICT"),
        ErrorKind::Internal => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Internal error occurred");
            return from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "Internal error",
                "An internal error occurred",
                instance,
            );
        }
    };

    let detail = e
        .details
        .first()
        .cloned()
        .unwrap_or_else(|| e.message.clone());
    let mut resp = from_parts(status, code, &e.message, detail, instance);
    resp.0 = resp.0.with_errors(e.details.clone());
    resp
}

/// 400 for a request body the adapter could not decode.
pub fn bad_body(detail: impl Into<String>, instance: &str) -> ProblemResponse {
    let detail = detail.into();
    let mut resp = from_parts(
        StatusCode::BAD_REQUEST,
        "USERS_BAD_REQUEST",
        "invalid request body",
        detail.clone(),
        instance,
    );
    resp.0 = resp.0.with_errors(vec![detail]);
    resp
}
