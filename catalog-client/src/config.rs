//! Where the apiserver lives and what to tell it on every request
//!
//! Unlike a kubeconfig this carries no credentials, authentication is a
//! concern of the [`Service`](tower::Service) handed to the [`Client`](crate::Client).
use http::{header::HeaderName, HeaderValue};

/// Configuration for a [`Client`](crate::Client) stack
///
/// Consumed through [`ConfigExt`](crate::client::ConfigExt) to build the layers
/// of a custom service stack.
#[derive(Debug, Clone)]
pub struct Config {
    /// The configured cluster url
    pub cluster_url: http::Uri,
    /// The namespace used by [`Api::default_namespaced`](crate::Api::default_namespaced)
    pub default_namespace: String,
    /// Headers added to every request
    pub headers: Vec<(HeaderName, HeaderValue)>,
}

impl Config {
    /// Construct a new config where only the `cluster_url` is set by the user.
    /// and everything else receives a default value.
    pub fn new(cluster_url: http::Uri) -> Self {
        Self {
            cluster_url,
            default_namespace: String::from("default"),
            headers: Vec::new(),
        }
    }

    /// Set the default namespace
    #[must_use]
    pub fn default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    /// Add a header sent with every request
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }
}
