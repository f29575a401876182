//! Request descriptor

use crate::params::{QueryParams, QueryValue};
use crate::types::{Direction, JsonValue, Method};

/// Operation metadata attached to every request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Catalog tags (e.g. `["insight", "monitor"]`)
    pub tags: Vec<String>,
    /// Operation name (e.g. `getOrganizationInsightApplications`)
    pub operation: String,
}

impl Metadata {
    /// Create metadata for an operation
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            tags: Vec::new(),
            operation: operation.into(),
        }
    }

    /// Set tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A single resolved API call
///
/// Fields are private; derived descriptors (e.g. with a page cursor) are new
/// values, the original is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: QueryParams,
    body: Option<JsonValue>,
    metadata: Metadata,
}

impl RequestDescriptor {
    /// Create a descriptor with no parameters
    pub fn new(method: Method, path: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: None,
            metadata,
        }
    }

    /// Shorthand for a GET descriptor
    pub fn get(path: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::new(Method::GET, path, Metadata::new(operation))
    }

    /// Replace query parameters
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Add one query parameter
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.set(key, value);
        self
    }

    /// Set the JSON body
    #[must_use]
    pub fn with_body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Derive the descriptor for the page after (or before) `cursor`
    ///
    /// The cursor goes in the parameter belonging to `direction`; the
    /// opposite cursor parameter is removed so the two never conflict.
    #[must_use]
    pub fn with_cursor(&self, direction: Direction, cursor: &str) -> Self {
        let mut next = self.clone();
        next.query.remove(direction.opposite_cursor_param());
        next.query.set(direction.cursor_param(), cursor);
        next
    }

    /// HTTP method
    pub fn method(&self) -> Method {
        self.method
    }

    /// Resource path, already escaped
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// JSON body, if any
    pub fn body(&self) -> Option<&JsonValue> {
        self.body.as_ref()
    }

    /// Operation metadata
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Operation name
    pub fn operation(&self) -> &str {
        &self.metadata.operation
    }
}
