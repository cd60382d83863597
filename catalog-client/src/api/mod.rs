//! API helpers for structured interaction with the service catalog api

mod core_methods;
mod subresource;
mod watch;
pub use watch::WatchStream;

// Re-exports from catalog-core
pub use catalog_core::{
    metadata::{ListMeta, ObjectMeta, TypeMeta},
    object::ObjectList,
    params::{DeleteParams, ListParams, Patch, PatchParams, PostParams, Preconditions, PropagationPolicy},
    watch::WatchEvent,
    Resource, ResourceExt,
};

use crate::{client::RestRequest, Client};

/// The generic Api abstraction
///
/// Binds a [`Client`] to one resource kind `K` in one namespace so that
/// every call is addressed and (de)serialized for `K`.
/// It holds nothing else, clones are cheap and calls never share state.
#[derive(Clone)]
pub struct Api<K> {
    /// The client to use (from this library)
    pub(crate) client: Client,
    namespace: String,
    /// Note: Using `iter::Empty` over `PhantomData`, because we never actually keep any
    /// `K` objects, so `Empty` better models our constraints (in particular, `Empty<K>`
    /// is `Send`, even if `K` may not be).
    pub(crate) _phantom: std::iter::Empty<K>,
}

impl<K: Resource> Api<K> {
    /// Namespaced resource within a given namespace
    ///
    /// ```no_run
    /// # use catalog_client::{Api, Client};
    /// # let client: Client = todo!();
    /// use catalog_client::core::Instance;
    /// let api: Api<Instance> = Api::namespaced(client, "dev");
    /// ```
    pub fn namespaced(client: Client, ns: &str) -> Self {
        Self {
            client,
            namespace: ns.to_string(),
            _phantom: std::iter::empty(),
        }
    }

    /// Namespaced resource within the default namespace of the [`Client`]
    pub fn default_namespaced(client: Client) -> Self {
        let ns = client.default_namespace().to_string();
        Self::namespaced(client, &ns)
    }

    /// The namespace every call is scoped to
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Return the url path of the resource collection
    pub fn resource_url(&self) -> String {
        K::url_path(Some(&self.namespace))
    }

    /// Consume self and return the [`Client`]
    pub fn into_client(self) -> Client {
        self.into()
    }

    // Address the collection of `K` in our namespace.
    pub(crate) fn scoped(&self, req: RestRequest) -> RestRequest {
        req.prefix(&K::api_prefix())
            .namespace(&self.namespace)
            .resource(K::PLURAL)
    }
}

impl<K> From<Api<K>> for Client {
    fn from(api: Api<K>) -> Self {
        api.client
    }
}

impl<K> std::fmt::Debug for Api<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
