//! Error types for API calls.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transport::HttpError;

/// Error type for API calls.
///
/// Each failure class stays distinguishable: transport failures, encoding
/// problems, structured service errors, bare status codes and post-call
/// validation never collapse into one another.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured host does not form a valid base URL.
    #[error("Invalid host '{host}': {reason}")]
    InvalidHost {
        /// The rejected host
        host: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The app token cannot be sent as a header value.
    #[error("Invalid app token: {0}")]
    InvalidToken(String),

    /// The request could not be built from the given arguments.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The transport failed; passed through unmodified.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The service answered with a structured error body.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The service answered with a non-success status and an unparseable body.
    #[error("status code: {}", .0.as_u16())]
    Status(http::StatusCode),

    /// A success response body is not well-formed JSON.
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// A success response body does not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The decoded response failed a call-specific check.
    #[error("Response validation failed: {0}")]
    Validation(String),
}

impl Error {
    /// Returns the structured service error, if this is one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the catalogued error code of a structured service error.
    #[must_use]
    pub const fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api(e) => Some(e.error_code),
            _ => None,
        }
    }
}

/// Finds an [`ApiError`] anywhere in an error's source chain.
///
/// Lets callers branch on [`ErrorCode`] after the error has been wrapped by
/// their own error types.
#[must_use]
pub fn as_api_error<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a ApiError> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(api) = e.downcast_ref::<ApiError>() {
            return Some(api);
        }
        if let Some(api) = e.downcast_ref::<Error>().and_then(Error::api_error) {
            return Some(api);
        }
        current = e.source();
    }
    None
}

/// Structured error returned by the service for non-success responses.
///
/// Branch on [`ApiError::error_code`]; `description` is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase", default)]
#[error("{description} (code: {code}, errorCode: {error_code}, correlationId: {correlation_id})")]
pub struct ApiError {
    /// Human-readable description.
    pub description: String,
    /// HTTP status code as reported in the body.
    pub code: i64,
    /// Token correlating the request with the service's trace.
    pub correlation_id: String,
    /// Catalogued error code.
    pub error_code: ErrorCode,
    /// Short slug such as `corrupted-file`.
    pub error_name: String,
}

/// Catalogued error codes.
///
/// Codes the catalog does not name are kept as [`ErrorCode::Other`], so a
/// value always survives a decode/encode round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ErrorCode {
    /// Duplicate document (image, video) was uploaded.
    DuplicateDocument,
    /// Applicant contains too many documents.
    TooManyDocuments,
    /// Uploaded file is too big (more than 64MB).
    FileTooBig,
    /// Uploaded file is empty.
    EmptyFile,
    /// File is corrupted or of incorrect format.
    CorruptedFile,
    /// Unsupported file format.
    UnsupportedFileFormat,
    /// Applicant is being checked; adding data is not allowed.
    NoUploadVerificationInProgress,
    /// File size violates the upload requirements.
    IncorrectFileSize,
    /// Applicant is marked as deleted or inactive.
    ApplicantMarkedAsDeleted,
    /// Applicant is rejected with the FINAL rejection type.
    ApplicantWithFinalReject,
    /// Document type is outside the applicant level's required documents.
    DocTypeNotInReqDocs,
    /// Attempt to open an encrypted file.
    EncryptedFile,
    /// Applicant is already in the requested state.
    ApplicantAlreadyInTheState,
    /// Invalid format of the `X-App-Token` value.
    AppTokenInvalidFormat,
    /// App token does not exist (e.g. sandbox token used in production).
    AppTokenNotFound,
    /// Private part of the token does not match the public part.
    AppTokenPrivatePartMismatch,
    /// Signature does not match the request content.
    AppTokenSignatureMismatch,
    /// `X-App-Access-Ts` is too far from the service's clock.
    AppTokenRequestExpired,
    /// Invalid authentication header values.
    AppTokenInvalidValue,
    /// Not all authentication headers were provided.
    AppTokenNotAllAuthParamsProvided,
    /// Invalid authentication parameters.
    AppTokenInvalidParams,
    /// Applicant is already blocklisted.
    ApplicantAlreadyBlacklisted,
    /// Applicant is already allowlisted.
    ApplicantAlreadyWhitelisted,
    /// A code outside the catalog.
    Other(i64),
}

const CATALOG: [(ErrorCode, i64); 23] = [
    (ErrorCode::DuplicateDocument, 1000),
    (ErrorCode::TooManyDocuments, 1001),
    (ErrorCode::FileTooBig, 1002),
    (ErrorCode::EmptyFile, 1003),
    (ErrorCode::CorruptedFile, 1004),
    (ErrorCode::UnsupportedFileFormat, 1005),
    (ErrorCode::NoUploadVerificationInProgress, 1006),
    (ErrorCode::IncorrectFileSize, 1007),
    (ErrorCode::ApplicantMarkedAsDeleted, 1008),
    (ErrorCode::ApplicantWithFinalReject, 1009),
    (ErrorCode::DocTypeNotInReqDocs, 1010),
    (ErrorCode::EncryptedFile, 1011),
    (ErrorCode::ApplicantAlreadyInTheState, 3000),
    (ErrorCode::AppTokenInvalidFormat, 4000),
    (ErrorCode::AppTokenNotFound, 4001),
    (ErrorCode::AppTokenPrivatePartMismatch, 4002),
    (ErrorCode::AppTokenSignatureMismatch, 4003),
    (ErrorCode::AppTokenRequestExpired, 4004),
    (ErrorCode::AppTokenInvalidValue, 4005),
    (ErrorCode::AppTokenNotAllAuthParamsProvided, 4006),
    (ErrorCode::AppTokenInvalidParams, 4007),
    (ErrorCode::ApplicantAlreadyBlacklisted, 5000),
    (ErrorCode::ApplicantAlreadyWhitelisted, 5001),
];

impl ErrorCode {
    /// The numeric code as sent by the service.
    #[must_use]
    pub fn code(self) -> i64 {
        if let Self::Other(code) = self {
            return code;
        }
        CATALOG
            .iter()
            .find(|(known, _)| *known == self)
            .map_or(0, |(_, code)| *code)
    }

    /// Returns true for the authentication family (4000-4007).
    #[must_use]
    pub fn is_auth_error(self) -> bool {
        (4000..=4007).contains(&self.code())
    }
}

impl Default for ErrorCode {
    fn default() -> Self {
        Self::Other(0)
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        CATALOG
            .iter()
            .find(|(_, known)| *known == code)
            .map_or(Self::Other(code), |(variant, _)| *variant)
    }
}

impl From<ErrorCode> for i64 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
