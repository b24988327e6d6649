//! Typed wrappers over [`Client::call`] for the supported endpoints.

use http::Method;
use url::Url;

use crate::signer::Signer;
use crate::time::Clock;
use crate::transport::HttpClient;

use super::models::{
    AccessToken, AccessTokenBody, AccessTokenRequest, Applicant, ApplicantLookup,
    CreatedApplicant, NewApplicant, ReviewStatus, WebSdkLink, WebSdkLinkRequest,
};
use super::{Client, Error};

impl<S: Signer, H: HttpClient, C: Clock> Client<S, H, C> {
    /// Checks that the API is operational.
    ///
    /// # Errors
    ///
    /// Any [`Error`] from [`Client::call`].
    pub async fn health(&self) -> Result<(), Error> {
        self.call::<(), serde_json::Value>(Method::GET, "/resources/status/api", None)
            .await?;
        Ok(())
    }

    /// Issues an access token for the mobile/web SDK.
    ///
    /// # Errors
    ///
    /// Any [`Error`] from [`Client::call`], or [`Error::Validation`] if the
    /// service echoes a different user id.
    pub async fn generate_access_token(
        &self,
        req: &AccessTokenRequest,
    ) -> Result<AccessToken, Error> {
        let body = AccessTokenBody {
            ttl_in_secs: req.ttl.as_secs(),
            user_id: &req.user_id,
            level_name: &req.level_name,
        };

        let token: AccessToken = self
            .call(Method::POST, "/resources/accessTokens/sdk", Some(&body))
            .await?;

        if token.user_id != req.user_id {
            return Err(Error::Validation(format!(
                "user id mismatch: `{}` not equal `{}`",
                token.user_id, req.user_id
            )));
        }

        Ok(token)
    }

    /// Creates an external link to the WebSDK for a user.
    ///
    /// # Errors
    ///
    /// Any [`Error`] from [`Client::call`], or [`Error::Validation`] if the
    /// returned link is not a URL.
    pub async fn generate_websdk_link(&self, req: &WebSdkLinkRequest) -> Result<WebSdkLink, Error> {
        let ttl = req.ttl.as_secs().to_string();
        let uri = self.resource_uri(
            &[
                "resources",
                "sdkIntegrations",
                "levels",
                req.level_name.as_str(),
                "websdkLink",
            ],
            &[
                ("externalUserId", req.user_id.as_str()),
                ("lang", req.lang.as_str()),
                ("ttlInSecs", ttl.as_str()),
            ],
        )?;

        let link: WebSdkLink = self
            .call(Method::POST, &uri, Some(&serde_json::Map::new()))
            .await?;

        Url::parse(&link.url)
            .map_err(|e| Error::Validation(format!("invalid link '{}': {e}", link.url)))?;

        Ok(link)
    }

    /// Fetches the review status of an applicant.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRequest`] for an empty id, otherwise any [`Error`] from
    /// [`Client::call`].
    pub async fn applicant_review_status(&self, applicant_id: &str) -> Result<ReviewStatus, Error> {
        if applicant_id.is_empty() {
            return Err(Error::InvalidRequest("applicant id required".to_string()));
        }

        let uri = self.resource_uri(&["resources", "applicants", applicant_id, "status"], &[])?;
        self.call::<(), _>(Method::GET, &uri, None).await
    }

    /// Fetches a full applicant record by applicant id or external user id.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRequest`] for an empty identifier, otherwise any
    /// [`Error`] from [`Client::call`].
    pub async fn applicant_data(&self, lookup: &ApplicantLookup) -> Result<Applicant, Error> {
        let uri = match lookup {
            ApplicantLookup::Id(id) if !id.is_empty() => {
                self.resource_uri(&["resources", "applicants", id.as_str(), "one"], &[])?
            }
            ApplicantLookup::ExternalUserId(external) if !external.is_empty() => self
                .resource_uri(
                    &[
                        "resources",
                        "applicants",
                        format!("-;externalUserId={external}").as_str(),
                        "one",
                    ],
                    &[],
                )?,
            _ => {
                return Err(Error::InvalidRequest(
                    "applicant id or external user id required".to_string(),
                ));
            }
        };

        self.call::<(), _>(Method::GET, &uri, None).await
    }

    /// Creates an applicant.
    ///
    /// Only the new applicant's id is returned; use
    /// [`applicant_data`](Self::applicant_data) for the full record.
    ///
    /// # Errors
    ///
    /// Any [`Error`] from [`Client::call`].
    pub async fn create_applicant(&self, applicant: &NewApplicant) -> Result<CreatedApplicant, Error> {
        self.call(Method::POST, "/resources/applicants", Some(applicant))
            .await
    }
}
