//! Tests for YAML loader module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::pagination::PaginationConfig;
use crate::types::BackoffType;
use std::io::Write;
use std::time::Duration;

const BLOG: &str = r#"
name: blog
http:
  timeout_secs: 10
  max_retries: 2
  requests_per_second: 5
headers:
  Accept: application/json
models:
  - name: Post
    url: https://api.example.com/posts/
    token: secret
    pagination:
      type: page_number
      page_size: 40
  - name: Tag
    url: https://api.example.com/tags
    slug_field: slug
    append_slash: false
"#;

// ============================================================================
// Basic Loading Tests
// ============================================================================

#[test]
fn test_load_definition() {
    let def = load_definition_from_str(BLOG).unwrap();
    assert_eq!(def.name, "blog");
    assert_eq!(def.model_names(), vec!["Post", "Tag"]);
    assert_eq!(
        def.headers.get("Accept").map(String::as_str),
        Some("application/json")
    );

    let post = def.model("Post").unwrap();
    assert_eq!(post.url, "https://api.example.com/posts");
    assert_eq!(post.base_url(), "https://api.example.com/posts/");
    assert_eq!(post.pagination.page_size(), Some(40));
    assert_eq!(post.token.as_deref(), Some("secret"));

    let tag = def.model("Tag").unwrap();
    assert_eq!(tag.slug_field, "slug");
    assert_eq!(
        tag.url_for(&["rust"]).unwrap(),
        "https://api.example.com/tags/rust"
    );
    assert_eq!(tag.pagination, PaginationConfig::None);
}

#[test]
fn test_model_credentials() {
    let yaml = r#"
name: blog
models:
  - name: Post
    url: https://api.example.com/posts
    credentials:
      type: bearer
      token: abc
  - name: Tag
    url: https://api.example.com/tags
    credentials:
      type: custom_headers
      headers:
        X-Api-Key: k
"#;
    let def = load_definition_from_str(yaml).unwrap();
    assert_eq!(
        def.model("Post").unwrap().auth(),
        AuthConfig::Bearer {
            token: "abc".to_string()
        }
    );
    assert!(matches!(
        def.model("Tag").unwrap().auth(),
        AuthConfig::CustomHeaders { headers } if headers.get("X-Api-Key").map(String::as_str) == Some("k")
    ));
}

#[test]
fn test_http_defaults() {
    let yaml = r#"
name: blog
models:
  - name: Post
    url: https://api.example.com/posts
"#;
    let def = load_definition_from_str(yaml).unwrap();
    assert_eq!(def.http.timeout_secs, 30);
    assert_eq!(def.http.max_retries, 3);
    assert_eq!(def.http.requests_per_second, None);
    assert_eq!(def.http.backoff, BackoffType::Exponential);
}

#[test]
fn test_client_config_from_definition() {
    let def = load_definition_from_str(BLOG).unwrap();
    let config = def.http.client_config(&def.headers);

    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.max_retries, 2);
    assert_eq!(
        config.rate_limit.map(|r| r.requests_per_second),
        Some(5)
    );
    assert_eq!(
        config.default_headers.get("Accept").map(String::as_str),
        Some("application/json")
    );
}

#[test]
fn test_client_config_without_rate_limit() {
    let config = HttpDefinition::default().client_config(&Default::default());
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("restorm/"));
}

#[test]
fn test_manager_for_model() {
    let def = load_definition_from_str(BLOG).unwrap();
    let manager = def.manager("Post").unwrap();
    assert_eq!(manager.meta().name, "Post");
    assert_eq!(manager.all().source().url(), "https://api.example.com/posts/");
}

#[test]
fn test_unknown_model() {
    let def = load_definition_from_str(BLOG).unwrap();
    let err = def.model("Comment").unwrap_err();
    assert!(err.to_string().contains("Available models: Post, Tag"));
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_empty_name_rejected() {
    let yaml = r#"
name: ""
models:
  - name: Post
    url: https://api.example.com/posts
"#;
    assert!(matches!(
        load_definition_from_str(yaml),
        Err(Error::Config { .. })
    ));
}

#[test]
fn test_no_models_rejected() {
    let yaml = "name: blog\nmodels: []\n";
    assert!(load_definition_from_str(yaml).is_err());
}

#[test]
fn test_duplicate_models_rejected() {
    let yaml = r#"
name: blog
models:
  - name: Post
    url: https://api.example.com/posts
  - name: Post
    url: https://api.example.com/other
"#;
    let err = load_definition_from_str(yaml).unwrap_err();
    assert!(err.to_string().contains("Duplicate model names"));
}

#[test]
fn test_invalid_model_url_rejected() {
    let yaml = r#"
name: blog
models:
  - name: Post
    url: posts
"#;
    assert!(matches!(
        load_definition_from_str(yaml),
        Err(Error::InvalidUrl(_))
    ));
}

#[test]
fn test_zero_page_size_rejected() {
    let yaml = r#"
name: blog
models:
  - name: Post
    url: https://api.example.com/posts
    pagination:
      type: limit_offset
      page_size: 0
"#;
    assert!(load_definition_from_str(yaml).is_err());
}

#[test]
fn test_zero_rate_rejected() {
    let yaml = r#"
name: blog
http:
  requests_per_second: 0
models:
  - name: Post
    url: https://api.example.com/posts
"#;
    assert!(load_definition_from_str(yaml).is_err());
}

#[test]
fn test_malformed_yaml() {
    let err = load_definition_from_str("name: [unclosed").unwrap_err();
    assert!(matches!(err, Error::YamlParse(_)));
    assert!(err.to_string().starts_with("Failed to parse YAML"));
}

// ============================================================================
// File Loading Tests
// ============================================================================

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BLOG.as_bytes()).unwrap();

    let def = load_definition(file.path()).unwrap();
    assert_eq!(def.models.len(), 2);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_definition(dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read definition file"));
}
