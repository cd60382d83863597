//! Request builder type for arbitrary api types
use crate::params::{ListParams, Patch, VersionedParams};
use http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use thiserror::Error;

/// Possible errors when building a request.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to build a request.
    #[error("failed to build request: {0}")]
    BuildRequest(#[source] http::Error),
    /// Failed to serialize body.
    #[error("failed to serialize body: {0}")]
    SerializeBody(#[source] serde_json::Error),
    /// Failed to validate request.
    #[error("failed to validate request: {0}")]
    Validation(String),
}

/// A REST verb request builder
///
/// Start from one of the verb constructors, narrow the target with
/// [`namespace`](Self::namespace), [`resource`](Self::resource), [`name`](Self::name)
/// and [`sub_resource`](Self::sub_resource), then attach a body and query parameters.
/// The path follows `{prefix}/namespaces/{ns}/{resource}/{name}/{subresource...}`.
///
/// Mistakes made while chaining are remembered and surfaced by [`build`](Self::build),
/// so a chain never has to be broken up to check intermediate results.
///
/// ```
/// use catalog_core::{params::ListParams, Request};
/// let req = Request::get()
///     .prefix("/apis/servicecatalog.k8s.io/v1alpha1")
///     .namespace("dev")
///     .resource("instances")
///     .versioned_params(&ListParams::default().labels("app=blog"))
///     .build()
///     .unwrap();
/// assert_eq!(
///     req.uri(),
///     "/apis/servicecatalog.k8s.io/v1alpha1/namespaces/dev/instances?labelSelector=app%3Dblog"
/// );
/// ```
#[derive(Debug)]
pub struct Request {
    method: Method,
    prefix: String,
    namespace: Option<String>,
    resource: Option<String>,
    name: Option<String>,
    subresource: Vec<String>,
    query: String,
    headers: HeaderMap,
    body: Vec<u8>,
    err: Option<Error>,
}

impl Request {
    fn verb(method: Method) -> Self {
        Self {
            method,
            prefix: String::new(),
            namespace: None,
            resource: None,
            name: None,
            subresource: Vec::new(),
            query: String::new(),
            headers: HeaderMap::new(),
            body: Vec::new(),
            err: None,
        }
    }

    /// Begin a GET request
    pub fn get() -> Self {
        Self::verb(Method::GET)
    }

    /// Begin a POST request
    pub fn post() -> Self {
        Self::verb(Method::POST)
    }

    /// Begin a PUT request
    pub fn put() -> Self {
        Self::verb(Method::PUT)
    }

    /// Begin a DELETE request
    pub fn delete() -> Self {
        Self::verb(Method::DELETE)
    }

    /// Begin a PATCH request whose body is interpreted according to `content_type`
    pub fn patch(content_type: &str) -> Self {
        Self::verb(Method::PATCH).header_str(header::CONTENT_TYPE, content_type)
    }
}

// Names and namespaces are pasted into the path as one segment.
fn invalid_path_segment(segment: &str) -> Option<&'static str> {
    match segment {
        "." | ".." => Some("may not be '.' or '..'"),
        _ if segment.contains('/') => Some("may not contain '/'"),
        _ if segment.contains('%') => Some("may not contain '%'"),
        _ if segment.contains('?') => Some("may not contain '?'"),
        _ => None,
    }
}

impl Request {
    // Keeps the first failure, later ones are usually a consequence of it.
    fn fail(mut self, err: Error) -> Self {
        if self.err.is_none() {
            self.err = Some(err);
        }
        self
    }

    fn header_str(self, key: HeaderName, value: &str) -> Self {
        match HeaderValue::from_str(value) {
            Ok(value) => self.header(key, value),
            Err(e) => self.fail(Error::BuildRequest(e.into())),
        }
    }

    /// Set the root path, e.g. `/apis/servicecatalog.k8s.io/v1alpha1`
    #[must_use]
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    /// Scope the request to a namespace
    ///
    /// An empty namespace leaves the request cluster scoped.
    #[must_use]
    pub fn namespace(mut self, namespace: &str) -> Self {
        if namespace.is_empty() {
            return self;
        }
        if let Some(msg) = invalid_path_segment(namespace) {
            return self.fail(Error::Validation(format!("invalid namespace {namespace:?}: {msg}")));
        }
        self.namespace = Some(namespace.to_string());
        self
    }

    /// Set the plural resource name, e.g. `instances`
    #[must_use]
    pub fn resource(mut self, resource: &str) -> Self {
        self.resource = Some(resource.to_string());
        self
    }

    /// Address a single named object
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        if name.is_empty() {
            return self.fail(Error::Validation("resource name may not be empty".into()));
        }
        if let Some(msg) = invalid_path_segment(name) {
            return self.fail(Error::Validation(format!("invalid resource name {name:?}: {msg}")));
        }
        self.name = Some(name.to_string());
        self
    }

    /// Address a subresource of the named object, e.g. `["status"]`
    #[must_use]
    pub fn sub_resource(mut self, subresources: &[&str]) -> Self {
        self.subresource
            .extend(subresources.iter().filter(|s| !s.is_empty()).map(|s| s.to_string()));
        self
    }

    /// Set a header
    #[must_use]
    pub fn header(mut self, key: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Set a raw body
    #[must_use]
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Serialize `data` as the json body
    #[must_use]
    pub fn json_body<T: Serialize>(self, data: &T) -> Self {
        match serde_json::to_vec(data) {
            Ok(body) => self
                .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body),
            Err(e) => self.fail(Error::SerializeBody(e)),
        }
    }

    /// Serialize a [`Patch`] as the body
    ///
    /// The content type is expected to be set through [`Request::patch`].
    #[must_use]
    pub fn patch_body<P: Serialize>(self, patch: &Patch<P>) -> Self {
        match patch.serialize() {
            Ok(body) => self.body(body),
            Err(e) => self.fail(Error::SerializeBody(e)),
        }
    }

    /// Append a single query parameter
    #[must_use]
    pub fn param(mut self, key: &str, value: &str) -> Self {
        let mut qp = form_urlencoded::Serializer::for_suffix(std::mem::take(&mut self.query), 0);
        qp.append_pair(key, value);
        self.query = qp.finish();
        self
    }

    /// Encode parameters into the query string
    #[must_use]
    pub fn versioned_params<P: VersionedParams + ?Sized>(mut self, params: &P) -> Self {
        if let Err(e) = params.validate() {
            return self.fail(e);
        }
        let mut qp = form_urlencoded::Serializer::for_suffix(std::mem::take(&mut self.query), 0);
        params.populate_qp(&mut qp);
        self.query = qp.finish();
        self
    }

    /// Turn the request into a watch on the addressed collection
    #[must_use]
    pub fn watch(self, lp: &ListParams) -> Self {
        if let Err(e) = lp.validate_watch() {
            return self.fail(e);
        }
        self.param("watch", "true").versioned_params(lp)
    }

    /// The path this request addresses, without the query string
    pub fn url_path(&self) -> String {
        let mut path = self.prefix.clone();
        if let Some(ns) = &self.namespace {
            path.push_str("/namespaces/");
            path.push_str(ns);
        }
        let segments = self
            .resource
            .iter()
            .chain(self.name.iter())
            .chain(self.subresource.iter());
        for segment in segments {
            path.push('/');
            path.push_str(segment);
        }
        path
    }

    /// The method this request was started with
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Produce the http request, or the first error recorded while chaining
    pub fn build(self) -> Result<http::Request<Vec<u8>>, Error> {
        let mut uri = self.url_path();
        if let Some(err) = self.err {
            return Err(err);
        }
        if !self.query.is_empty() {
            uri.push('?');
            uri.push_str(&self.query);
        }
        let mut req = http::Request::builder()
            .method(self.method)
            .uri(uri)
            .body(self.body)
            .map_err(Error::BuildRequest)?;
        *req.headers_mut() = self.headers;
        Ok(req)
    }
}

#[cfg(test)]
mod test {
    use super::{Error, Request};
    use crate::{
        params::{DeleteParams, ListParams, Patch, PatchParams, PostParams},
        servicecatalog::{Binding, Instance, InstanceSpec},
        Resource,
    };

    fn instances(req: Request) -> Request {
        req.prefix(&Instance::api_prefix())
            .namespace("ns")
            .resource(Instance::PLURAL)
    }

    #[test]
    fn create_path() {
        let pp = PostParams::default();
        let inst = Instance::new("db", InstanceSpec::default());
        let req = instances(Request::post())
            .versioned_params(&pp)
            .json_body(&inst)
            .build()
            .unwrap();
        assert_eq!(req.uri(), "/apis/servicecatalog.k8s.io/v1alpha1/namespaces/ns/instances");
        assert_eq!(req.method(), "POST");
        assert_eq!(req.headers().get("Content-Type").unwrap(), "application/json");
    }

    #[test]
    fn replace_path() {
        let pp = PostParams {
            dry_run: true,
            ..Default::default()
        };
        let req = instances(Request::put())
            .name("db")
            .versioned_params(&pp)
            .build()
            .unwrap();
        assert_eq!(
            req.uri(),
            "/apis/servicecatalog.k8s.io/v1alpha1/namespaces/ns/instances/db?dryRun=All"
        );
        assert_eq!(req.method(), "PUT");
    }

    #[test]
    fn list_path() {
        let req = Request::get()
            .prefix(&Binding::api_prefix())
            .namespace("ns")
            .resource(Binding::PLURAL)
            .versioned_params(&ListParams::default())
            .build()
            .unwrap();
        assert_eq!(req.uri(), "/apis/servicecatalog.k8s.io/v1alpha1/namespaces/ns/bindings");
    }

    #[test]
    fn watch_path() {
        let lp = ListParams::default().labels("app=blog").at("10").timeout(290);
        let req = instances(Request::get()).watch(&lp).build().unwrap();
        assert_eq!(
            req.uri(),
            "/apis/servicecatalog.k8s.io/v1alpha1/namespaces/ns/instances?watch=true&labelSelector=app%3Dblog&resourceVersion=10&timeoutSeconds=290"
        );
    }

    #[test]
    fn watch_rejects_limit() {
        let lp = ListParams::default().limit(5);
        let err = instances(Request::get()).watch(&lp).build().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn delete_path() {
        let dp = DeleteParams::default();
        let req = instances(Request::delete())
            .name("db")
            .json_body(&dp)
            .build()
            .unwrap();
        assert_eq!(req.uri(), "/apis/servicecatalog.k8s.io/v1alpha1/namespaces/ns/instances/db");
        assert_eq!(req.method(), "DELETE");
        assert_eq!(req.body(), b"{}");
    }

    #[test]
    fn delete_collection_path() {
        let lp = ListParams::default().labels("app=myapp");
        let req = instances(Request::delete())
            .versioned_params(&lp)
            .json_body(&DeleteParams::background())
            .build()
            .unwrap();
        assert_eq!(
            req.uri(),
            "/apis/servicecatalog.k8s.io/v1alpha1/namespaces/ns/instances?labelSelector=app%3Dmyapp"
        );
        assert_eq!(req.method(), "DELETE");
    }

    #[test]
    fn patch_status_path() {
        let patch = Patch::Merge(serde_json::json!({"status": {"asyncOpInProgress": true}}));
        let req = instances(Request::patch(patch.content_type()))
            .name("db")
            .sub_resource(&["status"])
            .versioned_params(&PatchParams::default())
            .patch_body(&patch)
            .build()
            .unwrap();
        assert_eq!(
            req.uri(),
            "/apis/servicecatalog.k8s.io/v1alpha1/namespaces/ns/instances/db/status"
        );
        assert_eq!(
            req.headers().get("Content-Type").unwrap().to_str().unwrap(),
            "application/merge-patch+json"
        );
        assert_eq!(req.method(), "PATCH");
    }

    #[test]
    fn empty_namespace_is_cluster_scoped() {
        let req = Request::get()
            .prefix(&Instance::api_prefix())
            .namespace("")
            .resource(Instance::PLURAL)
            .build()
            .unwrap();
        assert_eq!(req.uri(), "/apis/servicecatalog.k8s.io/v1alpha1/instances");
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = instances(Request::get()).name("").build().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn names_must_be_a_single_path_segment() {
        for name in ["db/status", ".", "..", "db?watch=true", "db%2Fstatus"] {
            let res = instances(Request::delete()).name(name).build();
            assert!(matches!(res, Err(Error::Validation(_))), "{name} was accepted");
        }
        let req = instances(Request::delete()).name("db.v1-a").build().unwrap();
        assert_eq!(
            req.uri().to_string(),
            "/apis/servicecatalog.k8s.io/v1alpha1/namespaces/ns/instances/db.v1-a"
        );
    }

    #[test]
    fn namespaces_must_be_a_single_path_segment() {
        for ns in ["dev/instances", "..", "dev?x=1"] {
            let res = Request::get()
                .prefix("/apis/servicecatalog.k8s.io/v1alpha1")
                .namespace(ns)
                .resource("instances")
                .build();
            assert!(matches!(res, Err(Error::Validation(_))), "{ns} was accepted");
        }
    }

    #[test]
    fn first_error_wins() {
        let pp = PostParams {
            field_manager: Some("x".repeat(200)),
            ..Default::default()
        };
        let err = instances(Request::put())
            .name("")
            .versioned_params(&pp)
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to validate request: resource name may not be empty");
    }
}
