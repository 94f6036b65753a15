use bizgloss_core::{BusinessDomain, BusinessTerm};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

/// Read-only collections exposed by the glossary API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    BusinessDomains,
    BusinessGlossary,
}

impl Resource {
    /// Path of the collection relative to the API root.
    pub fn path(self) -> &'static str {
        match self {
            Self::BusinessDomains => "api/business-domain",
            Self::BusinessGlossary => "api/business-glossary",
        }
    }
}

/// Client for the business glossary API.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// A missing trailing slash is added so resource paths are appended to
    /// the configured prefix instead of replacing its last segment.
    pub fn new(mut base_url: Url, http: Client) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of the given collection.
    pub fn resource_url(&self, resource: Resource) -> Result<Url, CatalogError> {
        Ok(self.base_url.join(resource.path())?)
    }

    /// Fetches every business domain, in server order.
    pub async fn fetch_business_domains(&self) -> Result<Vec<BusinessDomain>, CatalogError> {
        self.fetch_collection(Resource::BusinessDomains).await
    }

    /// Fetches every glossary term, in server order.
    pub async fn fetch_business_glossary(&self) -> Result<Vec<BusinessTerm>, CatalogError> {
        self.fetch_collection(Resource::BusinessGlossary).await
    }

    async fn fetch_collection<T>(&self, resource: Resource) -> Result<Vec<T>, CatalogError>
    where
        T: DeserializeOwned,
    {
        let url = self.resource_url(resource)?;
        let response = self.http.get(url).send().await?;
        parse_json(response).await
    }
}

/// Errors produced by the catalog client.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to build url: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API Error {}: {}", .status.as_u16(), .body)]
    Status { status: StatusCode, body: String },
}

async fn parse_json<T>(response: Response) -> Result<T, CatalogError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<unavailable>"));
        return Err(CatalogError::Status { status, body });
    }

    Ok(response.json().await?)
}
