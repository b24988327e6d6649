//! Request and response shapes for the typed endpoints.
//!
//! Response types deserialize straight from the service's camelCase JSON.
//! Fields the service omits fall back to their defaults.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Parameters for an SDK access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenRequest {
    /// External user identifier the token is bound to.
    pub user_id: String,
    /// Verification level name.
    pub level_name: String,
    /// Token lifetime; sent with second precision.
    pub ttl: Duration,
}

/// Wire body of an access token request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccessTokenBody<'a> {
    pub ttl_in_secs: u64,
    pub user_id: &'a str,
    pub level_name: &'a str,
}

/// An issued SDK access token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessToken {
    /// The token to hand to the SDK.
    pub token: String,
    /// User the token was issued for.
    pub user_id: String,
}

/// Parameters for an external WebSDK link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSdkLinkRequest {
    /// Verification level name.
    pub level_name: String,
    /// External user identifier.
    pub user_id: String,
    /// Link lifetime; sent with second precision.
    pub ttl: Duration,
    /// Interface language, e.g. `en`.
    pub lang: String,
}

/// An external WebSDK link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSdkLink {
    /// Link to send to the applicant.
    pub url: String,
}

/// Review status of an applicant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewStatus {
    /// Review identifier.
    pub review_id: String,
    /// Attempt identifier.
    pub attempt_id: String,
    /// Number of attempts.
    pub attempt_cnt: i64,
    /// Milliseconds since the review became pending.
    pub elapsed_since_pending_ms: u64,
    /// Milliseconds since the review was queued.
    pub elapsed_since_queued_ms: u64,
    /// Whether the applicant is being reprocessed.
    pub reprocessing: bool,
    /// When the review was created.
    #[serde(with = "service_time")]
    pub create_date: Option<DateTime<Utc>>,
    /// When the review was completed.
    #[serde(with = "service_time")]
    pub review_date: Option<DateTime<Utc>>,
    /// Review outcome.
    pub review_result: ReviewResult,
    /// Status such as `init`, `pending` or `completed`.
    pub review_status: String,
    /// Queue priority.
    pub priority: i64,
}

impl ReviewStatus {
    /// Time since the review became pending.
    #[must_use]
    pub const fn elapsed_since_pending(&self) -> Duration {
        Duration::from_millis(self.elapsed_since_pending_ms)
    }

    /// Time since the review was queued.
    #[must_use]
    pub const fn elapsed_since_queued(&self) -> Duration {
        Duration::from_millis(self.elapsed_since_queued_ms)
    }
}

/// Outcome of a review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewResult {
    /// Comment shown to the applicant.
    pub moderation_comment: String,
    /// Comment for the client only.
    pub client_comment: String,
    /// `GREEN` or `RED`.
    pub review_answer: String,
    /// Rejection labels.
    pub reject_labels: Vec<String>,
    /// `FINAL` or `RETRY`.
    pub review_reject_type: String,
}

/// How to find an applicant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicantLookup {
    /// By the service's applicant id.
    Id(String),
    /// By the caller's own user id.
    ExternalUserId(String),
}

/// Full applicant record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Applicant {
    /// Applicant id assigned by the service.
    pub id: String,
    /// When the applicant was created.
    #[serde(with = "service_time")]
    pub created_at: Option<DateTime<Utc>>,
    /// Account or integration that created it.
    pub created_by: String,
    /// Client key.
    pub key: String,
    /// Client the applicant belongs to.
    pub client_id: String,
    /// Inspection holding the uploaded documents.
    pub inspection_id: String,
    /// The caller's own user id.
    pub external_user_id: String,
    /// Data entered by the client.
    pub fixed_info: FixedInfo,
    /// Data extracted from documents.
    pub info: Info,
    /// Contact email.
    pub email: String,
    /// Platform the applicant used, e.g. `Web`.
    pub applicant_platform: String,
    /// Consent record.
    pub agreement: Agreement,
    /// Current review.
    pub review: Review,
    /// Documents the level requires.
    pub required_id_docs: RequiredIdDocs,
    /// Interface language.
    pub lang: String,
    /// Applicant type, e.g. `individual`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Applicant data entered by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixedInfo {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}

/// Applicant data extracted from documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Info {
    /// First name as printed.
    pub first_name: String,
    /// First name transliterated to Latin.
    pub first_name_en: String,
    /// Last name as printed.
    pub last_name: String,
    /// Last name transliterated to Latin.
    pub last_name_en: String,
    /// Date of birth.
    #[serde(with = "service_time")]
    pub dob: Option<DateTime<Utc>>,
    /// ISO 3166-1 alpha-3 country code.
    pub country: String,
    /// Documents the data came from.
    pub id_docs: Vec<IdDoc>,
}

/// An identity document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdDoc {
    /// Document type, e.g. `PASSPORT`.
    pub id_doc_type: String,
    /// Issuing country.
    pub country: String,
    /// First name as printed.
    pub first_name: String,
    /// First name transliterated to Latin.
    pub first_name_en: String,
    /// Last name as printed.
    pub last_name: String,
    /// Last name transliterated to Latin.
    pub last_name_en: String,
    /// Expiry date.
    #[serde(with = "service_time")]
    pub valid_until: Option<DateTime<Utc>>,
    /// Document number.
    pub number: String,
    /// Date of birth.
    #[serde(with = "service_time")]
    pub dob: Option<DateTime<Utc>>,
    /// First machine-readable zone line.
    pub mrz_line1: String,
    /// Second machine-readable zone line.
    pub mrz_line2: String,
    /// Third machine-readable zone line, if any.
    pub mrz_line3: String,
}

/// Consent given by the applicant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Agreement {
    /// When consent was requested.
    #[serde(with = "service_time")]
    pub created_at: Option<DateTime<Utc>>,
    /// When consent was given.
    #[serde(with = "service_time")]
    pub accepted_at: Option<DateTime<Utc>>,
    /// Where consent was collected, e.g. `WebSDK`.
    pub source: String,
    /// What the applicant consented to.
    pub targets: Vec<String>,
    /// Ids of the stored consent records.
    pub record_ids: Vec<String>,
}

/// Current review embedded in an applicant record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Review {
    /// Review identifier.
    pub review_id: String,
    /// Attempt identifier.
    pub attempt_id: String,
    /// Number of attempts.
    pub attempt_cnt: i64,
    /// Level the review runs against.
    pub level_name: String,
    /// Automatic check mode of the level, if any.
    pub level_auto_check_mode: Option<String>,
    /// Milliseconds since the review became pending.
    pub elapsed_since_pending_ms: u64,
    /// Milliseconds since the review was queued.
    pub elapsed_since_queued_ms: u64,
    /// Whether the applicant is being reprocessed.
    pub reprocessing: bool,
    /// When the review was created.
    #[serde(with = "service_time")]
    pub create_date: Option<DateTime<Utc>>,
    /// When the review was completed.
    #[serde(with = "service_time")]
    pub review_date: Option<DateTime<Utc>>,
    /// Review outcome.
    pub review_result: ReviewResult,
    /// Status such as `init`, `pending` or `completed`.
    pub review_status: String,
    /// Queue priority.
    pub priority: i64,
}

/// Document sets required by the applicant's level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequiredIdDocs {
    /// Required document sets.
    pub doc_sets: Vec<DocSet>,
}

/// A required document set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocSet {
    /// Set type, e.g. `IDENTITY`.
    pub id_doc_set_type: String,
    /// Accepted document types, e.g. `PASSPORT`.
    pub types: Vec<String>,
}

/// A new applicant to create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplicant {
    /// Personal data.
    pub fixed_info: NewFixedInfo,
    /// The caller's own user id.
    pub external_user_id: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
}

/// Client-provided personal data of a new applicant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFixedInfo {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Date of birth, sent as `YYYY-MM-DD`.
    pub dob: Option<NaiveDate>,
}

/// Identifier of a created applicant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatedApplicant {
    /// Applicant id assigned by the service.
    pub id: String,
}

/// Service timestamps in their several layouts.
///
/// The service sends dates as `2006-01-02`, `2006-01-02 15:04:05` or
/// `2006-01-02 15:04:05+0000`. Values without an offset are taken as UTC.
/// Serialization writes RFC 3339, which is accepted back as well.
pub mod service_time {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const DATE: &str = "%Y-%m-%d";
    const DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";
    const DATE_TIME_OFFSET: &str = "%Y-%m-%d %H:%M:%S%z";

    /// Parses one service timestamp.
    ///
    /// # Errors
    ///
    /// Returns a description of the unsupported layout.
    pub fn parse(s: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(date) = NaiveDate::parse_from_str(s, DATE) {
            return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, DATE_TIME) {
            return Ok(naive.and_utc());
        }
        if let Ok(with_offset) = DateTime::parse_from_str(s, DATE_TIME_OFFSET) {
            return Ok(with_offset.with_timezone(&Utc));
        }
        if let Ok(rfc3339) = DateTime::parse_from_rfc3339(s) {
            return Ok(rfc3339.with_timezone(&Utc));
        }
        Err(format!("parse time: undefined layout: {s}"))
    }

    #[allow(clippy::ref_option)] // signature required by serde's `with`
    pub(crate) fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(at) => serializer.serialize_str(&at.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.filter(|s| !s.is_empty())
            .map(|s| parse(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
