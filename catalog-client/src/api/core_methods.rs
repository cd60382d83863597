use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

use super::{Api, WatchStream};
use crate::{
    core::{
        object::ObjectList,
        params::{DeleteParams, ListParams, Patch, PatchParams, PostParams},
        Resource,
    },
    Result,
};

/// PUSH/PUT/POST/GET abstractions
impl<K> Api<K>
where
    K: Resource + Clone + DeserializeOwned + Serialize + Debug + Send + 'static,
{
    /// Get a named resource
    ///
    /// ```no_run
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client: catalog_client::Client = todo!();
    /// use catalog_client::{core::Instance, Api};
    /// let instances: Api<Instance> = Api::namespaced(client, "dev");
    /// let db: Instance = instances.get("db").await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// This function assumes that the object is expected to always exist, and returns [`Error`](crate::Error) if it does not.
    /// Consider using [`Api::get_opt`] if you need to handle missing objects.
    pub async fn get(&self, name: &str) -> Result<K> {
        self.scoped(self.client.get())
            .name(name)
            .execute()
            .await?
            .into_object()
    }

    /// [Get](`Api::get`) a named resource if it exists, returns [`None`] if it doesn't exist
    ///
    /// ```no_run
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client: catalog_client::Client = todo!();
    /// use catalog_client::{core::Instance, Api};
    /// let instances: Api<Instance> = Api::namespaced(client, "dev");
    /// if let Some(db) = instances.get_opt("db").await? {
    ///     println!("db is on plan {}", db.spec.plan_name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_opt(&self, name: &str) -> Result<Option<K>> {
        match self.get(name).await {
            Ok(obj) => Ok(Some(obj)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Get a list of resources
    ///
    /// You use this to get everything, or a subset matching fields/labels, say:
    ///
    /// ```no_run
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client: catalog_client::Client = todo!();
    /// use catalog_client::{api::ListParams, core::Instance, Api, ResourceExt};
    /// let instances: Api<Instance> = Api::namespaced(client, "dev");
    /// let lp = ListParams::default().labels("app=blog");
    /// for i in instances.list(&lp).await? {
    ///     println!("Found instance {}", i.name_any());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(&self, lp: &ListParams) -> Result<ObjectList<K>> {
        self.scoped(self.client.get())
            .versioned_params(lp)
            .execute()
            .await?
            .into_object()
    }

    /// Create a resource
    ///
    /// This function requires a type that Serializes to `K`, which can be:
    /// 1. Raw string YAML or JSON decoded into `K` beforehand
    /// 2. A `K` built by its constructor, e.g. [`Instance::new`](crate::core::Instance::new)
    ///
    /// Nothing is validated here, run the [`validation`](crate::core::validation)
    /// functions first if the object comes from user input.
    ///
    /// ```no_run
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client: catalog_client::Client = todo!();
    /// use catalog_client::{api::PostParams, core::{Instance, InstanceSpec}, Api};
    /// let instances: Api<Instance> = Api::namespaced(client, "dev");
    /// let db = Instance::new("db", InstanceSpec::new("mysql", "free"));
    /// let created = instances.create(&PostParams::default(), &db).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, pp: &PostParams, data: &K) -> Result<K> {
        self.scoped(self.client.post())
            .versioned_params(pp)
            .json_body(data)
            .execute()
            .await?
            .into_object()
    }

    /// Replace a resource entirely with a new one
    ///
    /// The object is addressed by its own `metadata.name`, and should carry the
    /// `resourceVersion` it was read at so the apiserver can detect conflicts.
    ///
    /// # Errors
    ///
    /// An object without a name is rejected with [`Error::BuildRequest`](crate::Error::BuildRequest)
    /// before anything is sent.
    pub async fn update(&self, pp: &PostParams, data: &K) -> Result<K> {
        let name = data.meta().name.clone().unwrap_or_default();
        self.scoped(self.client.put())
            .name(&name)
            .versioned_params(pp)
            .json_body(data)
            .execute()
            .await?
            .into_object()
    }

    /// Delete a named resource
    ///
    /// ```no_run
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client: catalog_client::Client = todo!();
    /// use catalog_client::{api::DeleteParams, core::Binding, Api};
    /// let bindings: Api<Binding> = Api::namespaced(client, "dev");
    /// bindings.delete("db-binding", &DeleteParams::default()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn delete(&self, name: &str, dp: &DeleteParams) -> Result<()> {
        self.scoped(self.client.delete())
            .name(name)
            .json_body(dp)
            .execute()
            .await?
            .error()
    }

    /// Delete a collection of resources
    ///
    /// When you get a collection of resources back, you get whatever matched the
    /// [`ListParams`] selectors, in our namespace only.
    pub async fn delete_collection(&self, dp: &DeleteParams, lp: &ListParams) -> Result<()> {
        self.scoped(self.client.delete())
            .versioned_params(lp)
            .json_body(dp)
            .execute()
            .await?
            .error()
    }

    /// Patch a subset of a resource's properties
    ///
    /// Takes a [`Patch`] along with [`PatchParams`] for the call, and an optional
    /// list of subresources to address instead of the object itself.
    ///
    /// ```no_run
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client: catalog_client::Client = todo!();
    /// use catalog_client::{api::{Patch, PatchParams}, core::Instance, Api};
    /// let instances: Api<Instance> = Api::namespaced(client, "dev");
    /// let patch = serde_json::json!({ "spec": { "planName": "gold" } });
    /// let patched = instances
    ///     .patch("db", &PatchParams::default(), &Patch::Merge(&patch), &[])
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn patch<P: Serialize + Debug>(
        &self,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
        subresources: &[&str],
    ) -> Result<K> {
        self.scoped(self.client.patch(patch.content_type()))
            .name(name)
            .sub_resource(subresources)
            .versioned_params(pp)
            .patch_body(patch)
            .execute()
            .await?
            .into_object()
    }

    /// Watch a list of resources
    ///
    /// This returns a [`WatchStream`] of [`WatchEvent`](crate::core::WatchEvent)s.
    /// Events are read lazily, one line at a time, and only as the stream is polled.
    /// The connection stays open until [`WatchStream::stop`] is called, the stream is
    /// dropped, or the apiserver closes it after `timeoutSeconds`.
    ///
    /// ```no_run
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client: catalog_client::Client = todo!();
    /// use catalog_client::{api::ListParams, core::{Instance, WatchEvent}, Api, ResourceExt};
    /// use futures::TryStreamExt;
    /// let instances: Api<Instance> = Api::namespaced(client, "dev");
    /// let lp = ListParams::default().timeout(10);
    /// let mut stream = instances.watch(&lp).await?;
    /// while let Some(event) = stream.try_next().await? {
    ///     match event {
    ///         WatchEvent::Added(i) => println!("Added {}", i.name_any()),
    ///         WatchEvent::Modified(i) => println!("Modified: {}", i.name_any()),
    ///         WatchEvent::Deleted(i) => println!("Deleted {}", i.name_any()),
    ///         WatchEvent::Error(e) => println!("Error {}", e),
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// A watch the apiserver refuses up front (bad selector, forbidden) fails here.
    /// Failures after the stream is open arrive as items on the stream.
    pub async fn watch(&self, lp: &ListParams) -> Result<WatchStream<K>> {
        let events = self.scoped(self.client.get()).watch::<K>(lp).await?;
        Ok(WatchStream::new(events))
    }
}
