use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

use crate::{
    api::{Api, Patch, PatchParams, PostParams},
    core::Resource,
    Result,
};

/// Methods for the status subresource
///
/// Controllers report what they observed through `status`, leaving the user's `spec` alone.
impl<K> Api<K>
where
    K: Resource + Clone + DeserializeOwned + Serialize + Debug + Send + 'static,
{
    /// Get the named resource through its status subresource
    ///
    /// This actually returns the whole K, with metadata, and spec.
    pub async fn get_status(&self, name: &str) -> Result<K> {
        self.scoped(self.client.get())
            .name(name)
            .sub_resource(&["status"])
            .execute()
            .await?
            .into_object()
    }

    /// Patch fields on the status object
    ///
    /// ```no_run
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client: catalog_client::Client = todo!();
    /// use catalog_client::{api::{Patch, PatchParams}, core::Instance, Api};
    /// let instances: Api<Instance> = Api::namespaced(client, "dev");
    /// let data = serde_json::json!({
    ///     "status": {
    ///         "asyncOpInProgress": true
    ///     }
    /// });
    /// let o = instances.patch_status("db", &PatchParams::default(), &Patch::Merge(&data)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn patch_status<P: Serialize + Debug>(
        &self,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<K> {
        self.patch(name, pp, patch, &["status"]).await
    }

    /// Replace every field on the status object
    ///
    /// This works similarly to [`Api::update`], but `.spec` is ignored by the apiserver.
    ///
    /// ```no_run
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client: catalog_client::Client = todo!();
    /// use catalog_client::{api::PostParams, core::{servicecatalog::InstanceStatus, Instance}, Api};
    /// let instances: Api<Instance> = Api::namespaced(client, "dev");
    /// let mut o = instances.get_status("db").await?;
    /// o.status = Some(InstanceStatus::default());
    /// let o = instances.update_status(&PostParams::default(), &o).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update_status(&self, pp: &PostParams, data: &K) -> Result<K> {
        let name = data.meta().name.clone().unwrap_or_default();
        self.scoped(self.client.put())
            .name(&name)
            .sub_resource(&["status"])
            .versioned_params(pp)
            .json_body(data)
            .execute()
            .await?
            .into_object()
    }
}
