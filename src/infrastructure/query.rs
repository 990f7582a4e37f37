//! Query filter builder
//!
//! Translates flat HTTP query parameters (`page`, `limit`, `sortBy`,
//! `sortOrder`, plus arbitrary field filters) into a structured descriptor
//! the storage layer can turn into SQL. Filter values are typed by shape:
//! numeric-looking values compare as integers, `true`/`false` as booleans,
//! anything else as a case-insensitive substring match.

use std::collections::HashMap;

use crate::application::error::ApiError;

pub const DEFAULT_PAGE_LIMIT: i64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl FilterValue {
    fn from_raw(raw: &str) -> FilterValue {
        if let Ok(n) = raw.parse::<i64>() {
            FilterValue::Int(n)
        } else if raw.eq_ignore_ascii_case("true") {
            FilterValue::Bool(true)
        } else if raw.eq_ignore_ascii_case("false") {
            FilterValue::Bool(false)
        } else {
            FilterValue::Text(raw.to_string())
        }
    }
}

/// Pagination, sorting, and filtering for a list operation
#[derive(Debug, Clone)]
pub struct ListParams {
    pub page: i64,
    pub limit: i64,
    pub sort: Option<(String, SortOrder)>,
    pub filters: Vec<(String, FilterValue)>,
}

impl ListParams {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let page = params
            .get("page")
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let limit = params
            .get("limit")
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|l| *l >= 1)
            .unwrap_or(DEFAULT_PAGE_LIMIT);

        let sort = params.get("sortBy").map(|field| {
            let order = match params.get("sortOrder") {
                Some(o) if o.eq_ignore_ascii_case("desc") => SortOrder::Desc,
                _ => SortOrder::Asc,
            };
            (field.clone(), order)
        });

        let mut filters: Vec<(String, FilterValue)> = params
            .iter()
            .filter(|(key, value)| {
                !matches!(key.as_str(), "page" | "limit" | "sortBy" | "sortOrder")
                    && !value.is_empty()
            })
            .map(|(key, value)| (key.clone(), FilterValue::from_raw(value)))
            .collect();
        filters.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            page,
            limit,
            sort,
            filters,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Reject filter or sort fields the entity does not expose
    pub fn check_fields(&self, allowed: &[&str]) -> Result<(), ApiError> {
        for (key, _) in &self.filters {
            if !allowed.contains(&key.as_str()) {
                return Err(ApiError::validation(format!("Cannot filter by '{key}'")));
            }
        }
        if let Some((field, _)) = &self.sort {
            if !allowed.contains(&field.as_str()) {
                return Err(ApiError::validation(format!("Cannot sort by '{field}'")));
            }
        }
        Ok(())
    }
}
