//! Verb request builder bound to a [`Client`]
use bytes::Bytes;
use futures::Stream;
use http::StatusCode;
use serde::{de::DeserializeOwned, Serialize};

use super::{handle_api_errors, Client};
use crate::{
    core::{
        params::{ListParams, Patch, VersionedParams},
        Request, WatchEvent,
    },
    Error, Result,
};

/// A request under construction, ready to be executed on the client that started it
///
/// Obtained from [`Client::get`], [`Client::post`], [`Client::put`], [`Client::delete`]
/// or [`Client::patch`].
///
/// ```no_run
/// # async fn doc(client: catalog_client::Client) -> Result<(), catalog_client::Error> {
/// use catalog_client::core::Instance;
/// let inst: Instance = client
///     .get()
///     .prefix("/apis/servicecatalog.k8s.io/v1alpha1")
///     .namespace("dev")
///     .resource("instances")
///     .name("db")
///     .execute()
///     .await?
///     .into_object()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RestRequest {
    client: Client,
    request: Request,
}

impl RestRequest {
    pub(crate) fn new(client: Client, request: Request) -> Self {
        Self { client, request }
    }

    fn map(self, f: impl FnOnce(Request) -> Request) -> Self {
        Self {
            client: self.client,
            request: f(self.request),
        }
    }

    /// Set the root path, e.g. `/apis/servicecatalog.k8s.io/v1alpha1`
    #[must_use]
    pub fn prefix(self, prefix: &str) -> Self {
        self.map(|r| r.prefix(prefix))
    }

    /// Scope the request to a namespace
    #[must_use]
    pub fn namespace(self, namespace: &str) -> Self {
        self.map(|r| r.namespace(namespace))
    }

    /// Set the plural resource name
    #[must_use]
    pub fn resource(self, resource: &str) -> Self {
        self.map(|r| r.resource(resource))
    }

    /// Address a single named object
    #[must_use]
    pub fn name(self, name: &str) -> Self {
        self.map(|r| r.name(name))
    }

    /// Address a subresource of the named object
    #[must_use]
    pub fn sub_resource(self, subresources: &[&str]) -> Self {
        self.map(|r| r.sub_resource(subresources))
    }

    /// Set a raw body
    #[must_use]
    pub fn body(self, body: Vec<u8>) -> Self {
        self.map(|r| r.body(body))
    }

    /// Serialize `data` as the json body
    #[must_use]
    pub fn json_body<T: Serialize>(self, data: &T) -> Self {
        self.map(|r| r.json_body(data))
    }

    /// Serialize a [`Patch`] as the body
    #[must_use]
    pub fn patch_body<P: Serialize>(self, patch: &Patch<P>) -> Self {
        self.map(|r| r.patch_body(patch))
    }

    /// Encode parameters into the query string
    #[must_use]
    pub fn versioned_params<P: VersionedParams + ?Sized>(self, params: &P) -> Self {
        self.map(|r| r.versioned_params(params))
    }

    /// Send the request and buffer the response
    ///
    /// Only transport failures and build errors surface here, look at the
    /// [`RestResult`] for what the apiserver said.
    pub async fn execute(self) -> Result<RestResult> {
        let req = self.request.build().map_err(Error::BuildRequest)?;
        self.client.execute(req).await
    }

    /// Open a watch on the addressed collection
    pub async fn watch<T>(self, lp: &ListParams) -> Result<impl Stream<Item = Result<WatchEvent<T>>> + Send + 'static>
    where
        T: Clone + DeserializeOwned + Send + 'static,
    {
        let req = self.request.watch(lp).build().map_err(Error::BuildRequest)?;
        self.client.request_events(req).await
    }
}

/// A buffered response to a [`RestRequest`]
#[derive(Debug, Clone)]
pub struct RestResult {
    status: StatusCode,
    body: Bytes,
}

impl RestResult {
    pub(crate) fn new(status: StatusCode, body: Bytes) -> Self {
        Self { status, body }
    }

    /// The status code the apiserver answered with
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The failure the apiserver reported, if any
    pub fn error(&self) -> Result<()> {
        handle_api_errors(&self.body, self.status)
    }

    /// Decode the body into `T`, or return the reported failure
    pub fn into_object<T: DeserializeOwned>(self) -> Result<T> {
        self.error()?;
        serde_json::from_slice(&self.body).map_err(|e| {
            tracing::warn!("{}, {:?}", String::from_utf8_lossy(&self.body), e);
            Error::SerdeError(e)
        })
    }

    /// The body as text, or the reported failure
    pub fn into_text(self) -> Result<String> {
        self.error()?;
        String::from_utf8(self.body.to_vec()).map_err(Error::FromUtf8)
    }
}
