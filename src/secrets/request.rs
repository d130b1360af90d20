//! Typed parameters for the read operations.
//!
//! Each request validates itself before anything is sent and knows the exact
//! query pairs it maps to, so the URL that reaches the service is a pure
//! function of the parameters.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::error::{Result, SecretsError};

/// Infisical only serves `shared` secrets to machine identities through this
/// adapter; personal overrides are out of reach.
const SECRET_TYPE: &str = "shared";

/// Parameters of the single-secret fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GetSecretRequest {
    #[validate(length(min = 1, message = "secret name cannot be empty"))]
    pub secret_name: String,

    #[validate(length(min = 1, message = "project id cannot be empty"))]
    pub project_id: String,

    #[validate(length(min = 1, message = "environment slug cannot be empty"))]
    pub environment_slug: String,

    #[validate(custom(function = "validate_secret_path"))]
    pub secret_path: String,

    pub expand_secret_references: bool,

    pub include_imports: bool,
}

impl GetSecretRequest {
    /// New request with reference expansion and imports enabled.
    pub fn new(
        secret_name: impl Into<String>,
        project_id: impl Into<String>,
        environment_slug: impl Into<String>,
        secret_path: impl Into<String>,
    ) -> Self {
        Self {
            secret_name: secret_name.into(),
            project_id: project_id.into(),
            environment_slug: environment_slug.into(),
            secret_path: secret_path.into(),
            expand_secret_references: true,
            include_imports: true,
        }
    }

    pub fn with_expand_secret_references(mut self, expand: bool) -> Self {
        self.expand_secret_references = expand;
        self
    }

    pub fn with_include_imports(mut self, include: bool) -> Self {
        self.include_imports = include;
        self
    }

    /// Runs parameter validation, mapping failures to [`SecretsError::InvalidParameter`].
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(SecretsError::from)
    }

    /// Query string pairs, in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("workspaceId", self.project_id.clone()),
            ("environment", self.environment_slug.clone()),
            ("secretPath", self.secret_path.clone()),
            ("expandSecretReferences", self.expand_secret_references.to_string()),
            ("include_imports", self.include_imports.to_string()),
            ("type", SECRET_TYPE.to_string()),
        ]
    }
}

/// Parameters of the bulk listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ListSecretsRequest {
    #[validate(length(min = 1, message = "project id cannot be empty"))]
    pub project_id: String,

    #[validate(length(min = 1, message = "environment slug cannot be empty"))]
    pub environment_slug: String,

    #[validate(custom(function = "validate_secret_path"))]
    pub secret_path: String,

    pub expand_secret_references: bool,

    /// Also fetch every folder below `secret_path`; the service stops at 20 levels.
    pub recursive: bool,

    pub include_imports: bool,

    /// Tag slugs; only secrets carrying one of them are returned.
    #[validate(custom(function = "validate_tag_filters"))]
    pub tag_filters: Vec<String>,
}

impl ListSecretsRequest {
    /// New request with reference expansion and imports enabled, not recursive,
    /// no tag filter.
    pub fn new(
        project_id: impl Into<String>,
        environment_slug: impl Into<String>,
        secret_path: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            environment_slug: environment_slug.into(),
            secret_path: secret_path.into(),
            expand_secret_references: true,
            recursive: false,
            include_imports: true,
            tag_filters: Vec::new(),
        }
    }

    pub fn with_expand_secret_references(mut self, expand: bool) -> Self {
        self.expand_secret_references = expand;
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_include_imports(mut self, include: bool) -> Self {
        self.include_imports = include;
        self
    }

    pub fn with_tag_filters<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_filters = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Runs parameter validation, mapping failures to [`SecretsError::InvalidParameter`].
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(SecretsError::from)
    }

    /// Query string pairs, in the order they are sent. `tagSlugs` is omitted
    /// when no filter is set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("workspaceId", self.project_id.clone()),
            ("environment", self.environment_slug.clone()),
            ("secretPath", self.secret_path.clone()),
            ("expandSecretReferences", self.expand_secret_references.to_string()),
            ("recursive", self.recursive.to_string()),
            ("include_imports", self.include_imports.to_string()),
        ];
        if !self.tag_filters.is_empty() {
            pairs.push(("tagSlugs", self.tag_filters.join(",")));
        }
        pairs
    }
}

fn validate_secret_path(path: &str) -> std::result::Result<(), ValidationError> {
    if !path.starts_with('/') {
        return Err(ValidationError::new("secret_path")
            .with_message("secret path must start with '/'".into()));
    }
    Ok(())
}

fn validate_tag_filters(tags: &[String]) -> std::result::Result<(), ValidationError> {
    if tags.iter().any(|t| t.trim().is_empty() || t.contains(',')) {
        return Err(ValidationError::new("tag_filters")
            .with_message("tag slugs must be non-empty and cannot contain ','".into()));
    }
    Ok(())
}
