use bytes::Bytes;
use http::{Request, Response};
use tower::{BoxError, Layer, Service};

use super::body::Body;
use crate::Client;

/// Builder for [`Client`] instances with customized [tower](`Service`) middleware.
///
/// ```rust
/// # fn doc<S>(transport: S) -> catalog_client::Client
/// # where
/// #     S: tower::Service<http::Request<catalog_client::client::Body>, Response = http::Response<catalog_client::client::Body>> + Send + 'static,
/// #     S::Future: Send + 'static,
/// #     S::Error: Into<tower::BoxError>,
/// # {
/// use catalog_client::{client::{ClientBuilder, ConfigExt}, Config};
/// let config = Config::new("https://catalog.local:6443".parse().unwrap()).default_namespace("dev");
/// ClientBuilder::new(transport, config.default_namespace.clone())
///     .with_layer(&config.base_uri_layer())
///     .with_layer(&config.extra_headers_layer())
///     .build()
/// # }
/// ```
pub struct ClientBuilder<Svc> {
    service: Svc,
    default_ns: String,
}

impl<Svc> ClientBuilder<Svc> {
    /// Construct a [`ClientBuilder`] from the innermost [`Service`], usually the transport.
    pub fn new(service: Svc, default_namespace: impl Into<String>) -> Self
    where
        Svc: Service<Request<Body>>,
    {
        Self {
            service,
            default_ns: default_namespace.into(),
        }
    }

    /// Add a [`Layer`] to the current [`Service`] stack.
    pub fn with_layer<L: Layer<Svc>>(self, layer: &L) -> ClientBuilder<L::Service> {
        let Self {
            service: stack,
            default_ns,
        } = self;
        ClientBuilder {
            service: layer.layer(stack),
            default_ns,
        }
    }

    /// Build a [`Client`] instance with the current [`Service`] stack.
    pub fn build<B>(self) -> Client
    where
        Svc: Service<Request<Body>, Response = Response<B>> + Send + 'static,
        Svc::Future: Send + 'static,
        Svc::Error: Into<BoxError>,
        B: http_body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        Client::new(self.service, self.default_ns)
    }
}
