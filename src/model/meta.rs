//! Resource kind descriptors

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::pagination::PaginationConfig;
use serde::{Deserialize, Serialize};
use url::Url;

/// Static description of one REST resource kind.
///
/// Built once (usually from an API definition file) and shared by every
/// queryset and model instance of that kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ModelMeta {
    /// Model name, used in errors and listings
    pub name: String,
    /// Collection URL, stored without a trailing slash
    pub url: String,
    /// Whether generated URLs end with `/`
    #[serde(default = "default_append_slash")]
    pub append_slash: bool,
    /// Field identifying an instance in its detail URL
    #[serde(default = "default_slug_field")]
    pub slug_field: String,
    /// Token sent in the Authorization header
    #[serde(default)]
    pub token: Option<String>,
    /// Scheme written before the token (defaults to `Token`)
    #[serde(default)]
    pub token_prefix: Option<String>,
    /// Other credentials (bearer, basic, custom headers), used when no token is set
    #[serde(default)]
    pub credentials: Option<AuthConfig>,
    /// How the collection endpoint paginates
    #[serde(default)]
    pub pagination: PaginationConfig,
}

fn default_append_slash() -> bool {
    true
}

fn default_slug_field() -> String {
    "id".to_string()
}

impl ModelMeta {
    /// Describe a resource kind at `url`
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            append_slash: default_append_slash(),
            slug_field: default_slug_field(),
            token: None,
            token_prefix: None,
            credentials: None,
            pagination: PaginationConfig::None,
        }
        .normalized()
    }

    /// Set the pagination style
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Set the auth token and optional prefix
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, prefix: Option<&str>) -> Self {
        self.token = Some(token.into());
        self.token_prefix = prefix.map(String::from);
        self
    }

    /// Set the slug field
    #[must_use]
    pub fn with_slug_field(mut self, field: impl Into<String>) -> Self {
        self.slug_field = field.into();
        self
    }

    /// Set whether URLs end with a slash
    #[must_use]
    pub fn with_append_slash(mut self, append_slash: bool) -> Self {
        self.append_slash = append_slash;
        self
    }

    /// Strip the trailing slash so URLs assemble cleanly
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let trimmed = self.url.trim_end_matches('/').len();
        self.url.truncate(trimmed);
        self
    }

    /// Collection URL
    pub fn base_url(&self) -> String {
        if self.append_slash {
            format!("{}/", self.url)
        } else {
            self.url.clone()
        }
    }

    /// URL of `bits` below the collection, e.g. `["42"]` for a detail URL.
    ///
    /// Each bit is a single path segment: characters such as `/`, `?` or a
    /// space inside it are percent-encoded.
    pub fn url_for(&self, bits: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.url)?;
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                Error::config(format!("Model '{}' url cannot take a path", self.name))
            })?;
            segments
                .pop_if_empty()
                .extend(bits.iter().map(|bit| bit.trim_matches('/')));
            if self.append_slash {
                segments.push("");
            }
        }
        Ok(url.into())
    }

    /// Set non-token credentials
    #[must_use]
    pub fn with_credentials(mut self, credentials: AuthConfig) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Credentials for requests on this kind
    pub fn auth(&self) -> AuthConfig {
        match &self.token {
            Some(token) => AuthConfig::token(token.clone(), self.token_prefix.as_deref()),
            None => self.credentials.clone().unwrap_or_default(),
        }
    }

    /// Check the descriptor is usable
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::config("Model name cannot be empty"));
        }
        if self.url.is_empty() {
            return Err(Error::config(format!(
                "Model '{}' url cannot be empty",
                self.name
            )));
        }
        Url::parse(&self.base_url())?;
        if self.slug_field.is_empty() {
            return Err(Error::config(format!(
                "Model '{}' slug_field cannot be empty",
                self.name
            )));
        }
        self.pagination.validate()
    }
}
