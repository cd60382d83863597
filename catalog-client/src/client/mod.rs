//! A basic client for the service catalog api
//!
//! The [`Client`] wraps a [`tower::Service`] and knows how to turn responses into
//! typed objects, api errors and watch event streams. It can be used on its own
//! through the verb builders ([`Client::get`], [`Client::post`], ...) or through the
//! typed [`Api`][crate::api::Api].
use bytes::Bytes;
use futures::{future::BoxFuture, Stream, StreamExt, TryStreamExt};
use http::{Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::{
    codec::{FramedRead, LinesCodec, LinesCodecError},
    io::StreamReader,
};
use tower::{buffer::Buffer, util::BoxService, BoxError, Layer, Service, ServiceExt};
use tower_http::map_response_body::MapResponseBodyLayer;

use crate::{core::WatchEvent, error::ErrorResponse, Error, Result};

mod body;
pub use body::Body;
mod builder;
pub use builder::ClientBuilder;
mod config_ext;
pub use config_ext::ConfigExt;
pub mod middleware;
mod rest;
pub use rest::{RestRequest, RestResult};

/// Client for connecting with a service catalog apiserver.
///
/// Cheap to clone, every clone shares the same underlying service.
#[derive(Clone)]
pub struct Client {
    // - `Buffer` for cheap clone
    // - `BoxService` for dynamic response future type
    inner: Buffer<Request<Body>, BoxFuture<'static, Result<Response<Body>, BoxError>>>,
    default_ns: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("default_ns", &self.default_ns).finish()
    }
}

impl Client {
    /// Create a [`Client`] using a custom `Service` stack.
    ///
    /// [`ConfigExt`](crate::client::ConfigExt) provides extensions for
    /// building a custom stack.
    ///
    /// # Example
    ///
    /// ```rust
    /// # fn doc<S>(transport: S)
    /// # where
    /// #     S: tower::Service<http::Request<catalog_client::client::Body>, Response = http::Response<catalog_client::client::Body>> + Send + 'static,
    /// #     S::Future: Send + 'static,
    /// #     S::Error: Into<tower::BoxError>,
    /// # {
    /// use catalog_client::{client::ConfigExt, Client, Config};
    /// use tower::ServiceBuilder;
    ///
    /// let config = Config::new("https://catalog.local:6443".parse().unwrap());
    /// let service = ServiceBuilder::new()
    ///     .layer(config.base_uri_layer())
    ///     .layer(config.extra_headers_layer())
    ///     .service(transport);
    /// let client = Client::new(service, config.default_namespace);
    /// # }
    /// ```
    pub fn new<S, B, T>(service: S, default_namespace: T) -> Self
    where
        S: Service<Request<Body>, Response = Response<B>> + Send + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>,
        B: http_body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
        T: Into<String>,
    {
        // Transform response body to `Body` and use type erased error to avoid type parameters.
        let service = MapResponseBodyLayer::new(Body::wrap_body)
            .layer(service)
            .map_err(|e| e.into());
        Self {
            inner: Buffer::new(BoxService::new(service), 1024),
            default_ns: default_namespace.into(),
        }
    }

    /// The namespace used by [`Api::default_namespaced`](crate::Api::default_namespaced)
    pub fn default_namespace(&self) -> &str {
        &self.default_ns
    }

    /// Perform a raw HTTP request against the API and return the raw response back.
    pub async fn send(&self, request: Request<Body>) -> Result<Response<Body>> {
        let mut svc = self.inner.clone();
        let res = svc
            .ready()
            .await
            .map_err(Error::Service)?
            .call(request)
            .await
            .map_err(|err| {
                // Error decorating request
                err.downcast::<Error>()
                    .map(|e| *e)
                    // Error from another middleware or the transport
                    .unwrap_or_else(Error::Service)
            })?;
        Ok(res)
    }

    /// Perform a raw HTTP request and buffer the whole response
    ///
    /// Unlike the other request methods this does not look at the status code.
    pub async fn execute(&self, request: Request<Vec<u8>>) -> Result<RestResult> {
        tracing::trace!(method = %request.method(), uri = %request.uri(), "sending request");
        let res = self.send(request.map(Body::from)).await?;
        let status = res.status();
        let body = res.into_body().collect_bytes().await?;
        Ok(RestResult::new(status, body))
    }

    /// Perform a raw HTTP request against the API and deserialize the response
    /// as JSON to some known type.
    pub async fn request<T>(&self, request: Request<Vec<u8>>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.execute(request).await?.into_object()
    }

    /// Perform a raw HTTP request against the API and get back the response
    /// as a string
    pub async fn request_text(&self, request: Request<Vec<u8>>) -> Result<String> {
        self.execute(request).await?.into_text()
    }

    /// Perform a raw request and get back a stream of [`WatchEvent`] objects
    ///
    /// The response status is checked before any event is read, a failed watch
    /// call surfaces as an error here rather than on the stream.
    pub async fn request_events<T>(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<impl Stream<Item = Result<WatchEvent<T>>> + Send + 'static>
    where
        T: Clone + DeserializeOwned + Send + 'static,
    {
        tracing::trace!(uri = %request.uri(), "opening watch");
        let res = self.send(request.map(Body::from)).await?;
        let status = res.status();
        tracing::trace!("headers: {:?}", res.headers());
        if status.is_client_error() || status.is_server_error() {
            let body = res.into_body().collect_bytes().await?;
            return Err(api_error(&body, status));
        }

        let frames = FramedRead::new(
            StreamReader::new(res.into_body().into_data_stream().map_err(std::io::Error::other)),
            LinesCodec::new(),
        );

        Ok(frames.filter_map(|res| async move {
            match res {
                Ok(line) => match serde_json::from_str::<WatchEvent<T>>(&line) {
                    Ok(event) => Some(Ok(event)),
                    Err(e) => {
                        // Ignore EOF error that can happen for incomplete line from `decode_eof`.
                        if e.is_eof() {
                            return None;
                        }

                        // Got general error response
                        if let Ok(e_resp) = serde_json::from_str::<ErrorResponse>(&line) {
                            return Some(Err(Error::Api(e_resp)));
                        }
                        tracing::warn!("failed to decode watch event {}: {:?}", line, e);
                        Some(Err(Error::SerdeError(e)))
                    }
                },

                Err(LinesCodecError::Io(e)) => Some(Err(Error::ReadEvents(e))),

                // Reached the maximum line length without finding a newline.
                // This should never happen because we're using the default `usize::MAX`.
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    Some(Err(Error::LinesCodecMaxLineLengthExceeded))
                }
            }
        }))
    }
}

/// Verb request builders, the entry points of the REST convention
///
/// Each returns a [`RestRequest`] to be narrowed to a namespace, resource and name.
impl Client {
    /// Begin a GET request
    pub fn get(&self) -> RestRequest {
        RestRequest::new(self.clone(), catalog_core::Request::get())
    }

    /// Begin a POST request
    pub fn post(&self) -> RestRequest {
        RestRequest::new(self.clone(), catalog_core::Request::post())
    }

    /// Begin a PUT request
    pub fn put(&self) -> RestRequest {
        RestRequest::new(self.clone(), catalog_core::Request::put())
    }

    /// Begin a DELETE request
    pub fn delete(&self) -> RestRequest {
        RestRequest::new(self.clone(), catalog_core::Request::delete())
    }

    /// Begin a PATCH request with the given patch content type
    pub fn patch(&self, content_type: &str) -> RestRequest {
        RestRequest::new(self.clone(), catalog_core::Request::patch(content_type))
    }
}

/// Apiserver returned error handling
///
/// Either the apiserver returned an explicit `Status` object,
/// or it somehow returned something we couldn't parse as one.
///
/// In either case, present an ApiError upstream.
/// The latter is probably a bug if encountered.
pub(crate) fn handle_api_errors(body: &[u8], s: StatusCode) -> Result<()> {
    if s.is_client_error() || s.is_server_error() {
        Err(api_error(body, s))
    } else {
        Ok(())
    }
}

fn api_error(body: &[u8], s: StatusCode) -> Error {
    if let Ok(errdata) = serde_json::from_slice::<ErrorResponse>(body) {
        tracing::debug!("Unsuccessful: {:?}", errdata);
        Error::Api(errdata)
    } else {
        tracing::warn!("Unsuccessful data error parse: {}", String::from_utf8_lossy(body));
        let ae = ErrorResponse {
            status: s.to_string(),
            code: s.as_u16(),
            message: format!("{:?}", String::from_utf8_lossy(body)),
            reason: "Failed to parse error data".into(),
        };
        tracing::debug!("Unsuccessful: {:?} (reconstruct)", ae);
        Error::Api(ae)
    }
}
