//! Paging and where-clause builders for collection reads.

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Largest page the document API serves.
pub const MAX_PAGE_SIZE: u8 = 20;

/// Paging options for collection reads.
///
/// ```rust
/// use stargate::PageRequest;
///
/// let first = PageRequest::new().page_size(20).fields(["name", "age"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    page_size: Option<u8>,
    page_state: Option<String>,
    fields: Vec<String>,
}

impl PageRequest {
    /// Creates a request for the first page with the server default size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of documents per page (1 to 20).
    #[must_use]
    pub fn page_size(mut self, size: u8) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Continues from the cursor returned with a previous page.
    #[must_use]
    pub fn page_state(mut self, state: impl Into<String>) -> Self {
        self.page_state = Some(state.into());
        self
    }

    /// Restricts returned documents to these top-level fields.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the page cursor, if any.
    pub fn current_page_state(&self) -> Option<&str> {
        self.page_state.as_deref()
    }

    pub(crate) fn query_pairs(&self) -> Result<Vec<(&'static str, String)>> {
        let mut pairs = Vec::new();
        if let Some(size) = self.page_size {
            if size == 0 || size > MAX_PAGE_SIZE {
                return Err(Error::validation(format!(
                    "page size must be between 1 and {}, got {}",
                    MAX_PAGE_SIZE, size
                )));
            }
            pairs.push(("page-size", size.to_string()));
        }
        if let Some(ref state) = self.page_state {
            pairs.push(("page-state", state.clone()));
        }
        if !self.fields.is_empty() {
            pairs.push(("fields", Value::from(self.fields.clone()).to_string()));
        }
        Ok(pairs)
    }
}

/// A where-clause plus paging, for [`CollectionClient::search`](super::CollectionClient::search).
///
/// Conditions on the same field are combined.
///
/// ```rust
/// use stargate::SearchQuery;
///
/// let query = SearchQuery::new()
///     .where_gte("age", 18)
///     .where_lt("age", 65)
///     .where_in("country", ["FR", "DE"]);
/// assert_eq!(
///     query.where_json().unwrap(),
///     r#"{"age":{"$gte":18,"$lt":65},"country":{"$in":["FR","DE"]}}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    conditions: Map<String, Value>,
    page: PageRequest,
}

impl SearchQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    fn condition(mut self, field: impl Into<String>, operator: &str, value: Value) -> Self {
        let entry = self
            .conditions
            .entry(field.into())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(ops) = entry {
            ops.insert(operator.to_string(), value);
        }
        self
    }

    /// `field == value`
    #[must_use]
    pub fn where_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.condition(field, "$eq", value.into())
    }

    /// `field != value`
    #[must_use]
    pub fn where_ne(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.condition(field, "$ne", value.into())
    }

    /// `field > value`
    #[must_use]
    pub fn where_gt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.condition(field, "$gt", value.into())
    }

    /// `field >= value`
    #[must_use]
    pub fn where_gte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.condition(field, "$gte", value.into())
    }

    /// `field < value`
    #[must_use]
    pub fn where_lt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.condition(field, "$lt", value.into())
    }

    /// `field <= value`
    #[must_use]
    pub fn where_lte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.condition(field, "$lte", value.into())
    }

    /// `field` is one of `values`.
    #[must_use]
    pub fn where_in<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.condition(field, "$in", Value::Array(values))
    }

    /// `field` is present (or absent, with `false`).
    #[must_use]
    pub fn where_exists(self, field: impl Into<String>, exists: bool) -> Self {
        self.condition(field, "$exists", Value::Bool(exists))
    }

    /// Sets paging options.
    #[must_use]
    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// Returns the where-clause as JSON, or `None` without conditions.
    pub fn where_json(&self) -> Option<String> {
        if self.conditions.is_empty() {
            None
        } else {
            Some(Value::Object(self.conditions.clone()).to_string())
        }
    }

    pub(crate) fn query_pairs(&self) -> Result<Vec<(&'static str, String)>> {
        let mut pairs = self.page.query_pairs()?;
        if let Some(clause) = self.where_json() {
            pairs.push(("where", clause));
        }
        Ok(pairs)
    }
}
