//! Request descriptors and parameter merging
//!
//! A [`RequestDescriptor`] is the caller-supplied description of a network
//! request: target URL, method, headers, query parameters, and body. Headers
//! and query parameters are kept in ordered maps so that two descriptors with
//! the same fields always serialize identically, which the fingerprint layer
//! relies on for cache hits.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::fingerprint::Fingerprint;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
        }
    }
}

/// Full parameter set of a request
///
/// The caching layer only reads descriptors; the one exception is lazy-merge
/// mode, which produces a new descriptor by shallow-merging an override onto
/// the base (see [`RequestDescriptor::merged_with`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestDescriptor {
    /// Target URL
    pub url: String,
    /// HTTP method
    pub method: Method,
    /// Request headers, ordered by name
    pub headers: BTreeMap<String, String>,
    /// Query parameters, ordered by name
    pub query: BTreeMap<String, String>,
    /// Optional request body
    pub body: Option<String>,
}

impl RequestDescriptor {
    /// Creates a GET descriptor for the given URL
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Creates a descriptor with the given method and URL
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            ..Self::default()
        }
    }

    /// Adds a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds a query parameter
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Sets the request body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the canonical cache key for this descriptor
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self)
    }

    /// Shallow-merges an override onto this descriptor
    ///
    /// Fields present in the override replace the base field wholesale;
    /// absent fields keep the base value. Maps are replaced, not unioned.
    pub fn merged_with(&self, overrides: &RequestOverride) -> RequestDescriptor {
        RequestDescriptor {
            url: overrides.url.clone().unwrap_or_else(|| self.url.clone()),
            method: overrides.method.unwrap_or(self.method),
            headers: overrides
                .headers
                .clone()
                .unwrap_or_else(|| self.headers.clone()),
            query: overrides.query.clone().unwrap_or_else(|| self.query.clone()),
            body: overrides.body.clone().or_else(|| self.body.clone()),
        }
    }
}

/// A partial request description used by lazy triggers
///
/// Mirrors [`RequestDescriptor`] with every field optional. In merge mode
/// present fields override the base; in replace mode the override stands
/// alone and absent fields take their defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOverride {
    /// Target URL, if overridden
    pub url: Option<String>,
    /// HTTP method, if overridden
    pub method: Option<Method>,
    /// Headers, if overridden (replaces the base map)
    pub headers: Option<BTreeMap<String, String>>,
    /// Query parameters, if overridden (replaces the base map)
    pub query: Option<BTreeMap<String, String>>,
    /// Request body, if overridden
    pub body: Option<String>,
}

impl RequestOverride {
    /// Creates an empty override
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Overrides the method
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Adds a query parameter to the override map
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Adds a header to the override map
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Overrides the body
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Converts the override into a standalone descriptor
    ///
    /// Used by replace-mode triggers: absent fields take their defaults
    /// (empty URL, GET, no headers, no query, no body).
    pub fn into_descriptor(self) -> RequestDescriptor {
        RequestDescriptor {
            url: self.url.unwrap_or_default(),
            method: self.method.unwrap_or_default(),
            headers: self.headers.unwrap_or_default(),
            query: self.query.unwrap_or_default(),
            body: self.body,
        }
    }
}
