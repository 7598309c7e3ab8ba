//! Per-procedure input schemas.
//!
//! Each gateway procedure validates its input here before anything reaches
//! the upstream client. Validation collects every issue found, not just the
//! first, so a form can surface all field messages at once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storekeep_core::{FilterCriteria, ProductId};

const MIN_TITLE_CHARS: usize = 3;
const MIN_DESCRIPTION_CHARS: usize = 10;
const MAX_LIST_LIMIT: u32 = 100;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Input field the issue belongs to.
    pub field: &'static str,
    /// Human-readable message, suitable for inline form display.
    pub message: String,
}

/// Input failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", format_issues(.issues))]
pub struct ValidationError {
    /// Every issue found, in field order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    fn from_issues(issues: Vec<ValidationIssue>) -> Result<(), Self> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Self { issues })
        }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.field, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn issue(field: &'static str, message: &str) -> ValidationIssue {
    ValidationIssue {
        field,
        message: message.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// auth.login
// ─────────────────────────────────────────────────────────────────────────────

/// Input for `auth.login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    /// # Errors
    ///
    /// Fails when either credential is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if self.username.is_empty() {
            issues.push(issue("username", "Username is required"));
        }
        if self.password.is_empty() {
            issues.push(issue("password", "Password is required"));
        }
        ValidationError::from_issues(issues)
    }
}

impl std::fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginInput")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// products.list
// ─────────────────────────────────────────────────────────────────────────────

/// Input for `products.list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListProductsInput {
    pub limit: Option<u32>,
    pub skip: Option<u64>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ListProductsInput {
    /// Page size used when the caller does not pass one.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Build a listing input from the active filters.
    #[must_use]
    pub fn from_criteria(criteria: &FilterCriteria, limit: u32, skip: u64) -> Self {
        Self {
            limit: Some(limit),
            skip: Some(skip),
            search: criteria.search.clone(),
            category: criteria.category.clone(),
            min_price: criteria.min_price,
            max_price: criteria.max_price,
        }
    }

    /// Effective page size.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }

    /// Effective offset.
    #[must_use]
    pub fn skip(&self) -> u64 {
        self.skip.unwrap_or(0)
    }

    /// # Errors
    ///
    /// Fails when an explicit `limit` falls outside `1..=100`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if let Some(limit) = self.limit
            && (limit == 0 || limit > MAX_LIST_LIMIT)
        {
            issues.push(issue(
                "limit",
                &format!("Limit must be between 1 and {MAX_LIST_LIMIT}"),
            ));
        }
        ValidationError::from_issues(issues)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// products.create / products.update
// ─────────────────────────────────────────────────────────────────────────────

/// Input for `products.create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductInput {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: Option<String>,
}

impl CreateProductInput {
    /// # Errors
    ///
    /// Fails when the title or description is too short, or the price is not
    /// strictly positive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        check_title(&self.title, &mut issues);
        check_description(&self.description, &mut issues);
        check_price(self.price, &mut issues);
        ValidationError::from_issues(issues)
    }
}

/// Input for `products.update`. Absent fields stay untouched upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductInput {
    pub id: ProductId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

impl UpdateProductInput {
    /// An update touching nothing but the id.
    #[must_use]
    pub fn for_id(id: ProductId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            price: None,
            category: None,
        }
    }

    /// # Errors
    ///
    /// Fails when a present field violates the same rules as on create. An
    /// update carrying no fields at all is accepted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if let Some(title) = &self.title {
            check_title(title, &mut issues);
        }
        if let Some(description) = &self.description {
            check_description(description, &mut issues);
        }
        if let Some(price) = self.price {
            check_price(price, &mut issues);
        }
        ValidationError::from_issues(issues)
    }
}

fn check_title(title: &str, issues: &mut Vec<ValidationIssue>) {
    if title.chars().count() < MIN_TITLE_CHARS {
        issues.push(issue("title", "Title is too short"));
    }
}

fn check_description(description: &str, issues: &mut Vec<ValidationIssue>) {
    if description.chars().count() < MIN_DESCRIPTION_CHARS {
        issues.push(issue("description", "Description is too short"));
    }
}

fn check_price(price: f64, issues: &mut Vec<ValidationIssue>) {
    // NaN fails the check as well.
    if price.is_nan() || price <= 0.0 {
        issues.push(issue("price", "Price must be positive"));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_credentials() {
        let input = LoginInput {
            username: String::new(),
            password: String::new(),
        };
        let err = input.validate().unwrap_err();

        assert_eq!(err.issues.len(), 2);
        assert_eq!(
            err.to_string(),
            "invalid input: username: Username is required; password: Password is required"
        );
    }

    #[test]
    fn test_login_input_debug_redacts_password() {
        let input = LoginInput {
            username: "emilys".to_string(),
            password: "emilyspass".to_string(),
        };
        let debug_output = format!("{input:?}");

        assert!(debug_output.contains("emilys"));
        assert!(!debug_output.contains("emilyspass"));
    }

    #[test]
    fn test_create_collects_every_issue() {
        let input = CreateProductInput {
            title: "ab".to_string(),
            description: "too short".to_string(),
            price: 0.0,
            category: None,
        };
        let err = input.validate().unwrap_err();

        let fields: Vec<_> = err.issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["title", "description", "price"]);
        let messages: Vec<_> = err.issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Title is too short",
                "Description is too short",
                "Price must be positive"
            ]
        );
    }

    #[test]
    fn test_create_accepts_valid_input() {
        let input = CreateProductInput {
            title: "Walnut Desk".to_string(),
            description: "A sturdy desk made of walnut.".to_string(),
            price: 249.5,
            category: Some("furniture".to_string()),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_update_validates_only_present_fields() {
        let mut input = UpdateProductInput::for_id(ProductId::new(1));
        assert!(input.validate().is_ok());

        input.title = Some("ab".to_string());
        let err = input.validate().unwrap_err();
        assert_eq!(err.issues.len(), 1);
    }

    #[test]
    fn test_update_rejects_negative_price() {
        let mut input = UpdateProductInput::for_id(ProductId::new(1));
        input.price = Some(-1.0);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_list_limit_bounds() {
        let mut input = ListProductsInput::default();
        assert!(input.validate().is_ok());
        assert_eq!(input.limit(), 10);

        input.limit = Some(0);
        assert!(input.validate().is_err());
        input.limit = Some(101);
        assert!(input.validate().is_err());
        input.limit = Some(100);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_from_criteria_carries_filters() {
        let mut criteria = FilterCriteria::default();
        criteria.set_search("desk");
        criteria.set_price_range(Some(10.0), None);

        let input = ListProductsInput::from_criteria(&criteria, 12, 24);
        assert_eq!(input.limit(), 12);
        assert_eq!(input.skip(), 24);
        assert_eq!(input.search.as_deref(), Some("desk"));
        assert_eq!(input.min_price, Some(10.0));
        assert_eq!(input.max_price, None);
    }
}
