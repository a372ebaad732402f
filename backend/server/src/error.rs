use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use record::payloads::ErrorBody;
use thiserror::Error;
use tracing::error;

use crate::sheets::SheetError;

/// Request-level failures. The `#[error]` strings are the exact bodies
/// clients see; upstream detail stays in the wrapped source and is only
/// logged.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed json.")]
    MalformedPayload,

    #[error("Missing infos.")]
    MissingFields,

    #[error("Invalid Google Spreadsheet ID.")]
    MissingSpreadsheetId,

    #[error("Invalid Sheet Title.")]
    MissingSheetTitle,

    #[error("Invalid Google Credentials.")]
    MissingCredentials,

    #[error("Error while posting to Google Spreadsheet")]
    SheetWrite(#[source] SheetError),

    #[error("Error while getting data from Google Spreadsheet")]
    SheetRead(#[source] SheetError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload => StatusCode::BAD_REQUEST,
            AppError::MissingFields => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MissingSpreadsheetId
            | AppError::MissingSheetTitle
            | AppError::MissingCredentials
            | AppError::SheetWrite(..)
            | AppError::SheetRead(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::SheetWrite(source) | AppError::SheetRead(source) = &self {
            error!("{self}: {source}");
        }

        let status = self.status();
        let body = ErrorBody {
            status: status.as_u16(),
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use reqwest::StatusCode as UpstreamStatus;

    use super::AppError;
    use crate::sheets::SheetError;

    fn upstream() -> SheetError {
        SheetError::Upstream {
            status: UpstreamStatus::BAD_GATEWAY,
            body: "quota exceeded".to_string(),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::MalformedPayload.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::MissingFields.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::MissingSpreadsheetId.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::MissingSheetTitle.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::MissingCredentials.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::SheetWrite(upstream()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::SheetRead(upstream()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_messages_are_fixed() {
        assert_eq!(AppError::MalformedPayload.to_string(), "Malformed json.");
        assert_eq!(AppError::MissingFields.to_string(), "Missing infos.");
        assert_eq!(
            AppError::MissingSpreadsheetId.to_string(),
            "Invalid Google Spreadsheet ID."
        );
        assert_eq!(
            AppError::MissingSheetTitle.to_string(),
            "Invalid Sheet Title."
        );
        assert_eq!(
            AppError::MissingCredentials.to_string(),
            "Invalid Google Credentials."
        );
        assert_eq!(
            AppError::SheetWrite(upstream()).to_string(),
            "Error while posting to Google Spreadsheet"
        );
        assert_eq!(
            AppError::SheetRead(upstream()).to_string(),
            "Error while getting data from Google Spreadsheet"
        );
    }

    #[test]
    fn test_upstream_detail_never_reaches_the_message() {
        let message = AppError::SheetRead(upstream()).to_string();

        assert!(!message.contains("quota"));
        assert!(!message.contains("502"));
    }
}
