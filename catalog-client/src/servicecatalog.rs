use crate::{
    core::{Binding, Instance},
    Api, Client,
};

/// Entry point for the `servicecatalog.k8s.io` group
///
/// Hands out a typed [`Api`] per kind, sharing one [`Client`].
///
/// ```no_run
/// # async fn wrapper(client: catalog_client::Client) -> Result<(), catalog_client::Error> {
/// use catalog_client::ServicecatalogClient;
/// let catalog = ServicecatalogClient::new(client);
/// let db = catalog.instances("dev").get("db").await?;
/// let bindings = catalog.bindings("dev").list(&Default::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ServicecatalogClient {
    client: Client,
}

impl ServicecatalogClient {
    /// Wrap a [`Client`]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Instances in the given namespace
    pub fn instances(&self, ns: &str) -> Api<Instance> {
        Api::namespaced(self.client.clone(), ns)
    }

    /// Bindings in the given namespace
    pub fn bindings(&self, ns: &str) -> Api<Binding> {
        Api::namespaced(self.client.clone(), ns)
    }

    /// The underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl From<Client> for ServicecatalogClient {
    fn from(client: Client) -> Self {
        Self::new(client)
    }
}
