use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            104 => (StatusCode::SERVICE_UNAVAILABLE, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn reqwest_error(_: reqwest::Error) -> Error {
    Error {
        code: 2,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 3,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

// codes 1..=99 are internal faults; a replace_order rejection is a logic
// bug in the reconciler, not a user-recoverable condition
pub fn invariant_violation_error() -> Error {
    Error {
        code: 10,
        message: "stop order invariant violated".into(),
    }
}

pub fn insufficient_stops_error() -> Error {
    Error {
        code: 100,
        message: "add at least 2 stops to optimize".into(),
    }
}

pub fn reconciliation_mismatch_error() -> Error {
    Error {
        code: 101,
        message: "optimizer response does not match the current stops".into(),
    }
}

pub fn location_not_found_error() -> Error {
    Error {
        code: 102,
        message: "location not found".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 103,
        message: "invalid input".into(),
    }
}

pub fn optimization_unavailable_error() -> Error {
    Error {
        code: 104,
        message: "optimization service unavailable".into(),
    }
}

pub fn optimize_in_flight_error() -> Error {
    Error {
        code: 105,
        message: "an optimization request is already in progress".into(),
    }
}
