pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use std::collections::BTreeMap;

/// An accessor trait for a service catalog resource.
///
/// Every implementor knows its api group, version and plural name at compile time,
/// which is all the typed [`Api`](https://docs.rs/catalog-client) needs to build its urls.
///
/// These types, using [`ObjectMeta`], SHOULD all have required properties:
/// - `.metadata`
/// - `.metadata.name`
///
/// And these optional properties:
/// - `.metadata.namespace`
/// - `.metadata.resource_version`
pub trait Resource {
    /// The kind of this object, e.g. `Instance`
    const KIND: &'static str;
    /// The api group, empty for the legacy core group
    const GROUP: &'static str;
    /// The api version within the group
    const VERSION: &'static str;
    /// The plural name of the kind
    ///
    /// This is known as the resource in apimachinery, and is the path segment on the wire.
    const PLURAL: &'static str;

    /// Returns apiVersion of this object
    fn api_version() -> String {
        if Self::GROUP.is_empty() {
            return Self::VERSION.into();
        }
        format!("{}/{}", Self::GROUP, Self::VERSION)
    }

    /// The root path every request for this kind hangs off
    fn api_prefix() -> String {
        if Self::GROUP.is_empty() {
            format!("/api/{}", Self::VERSION)
        } else {
            format!("/apis/{}/{}", Self::GROUP, Self::VERSION)
        }
    }

    /// Creates a url path for http requests for this resource
    fn url_path(namespace: Option<&str>) -> String {
        let n = if let Some(ns) = namespace {
            format!("namespaces/{ns}/")
        } else {
            "".into()
        };
        format!("{}/{n}{}", Self::api_prefix(), Self::PLURAL)
    }

    /// Metadata that all persisted resources must have
    fn meta(&self) -> &ObjectMeta;
    /// Metadata that all persisted resources must have
    fn meta_mut(&mut self) -> &mut ObjectMeta;
}

/// Helper methods for resources.
pub trait ResourceExt: Resource {
    /// Returns the most useful name identifier available
    ///
    /// This is tries `name`, then `generateName`, and falls back on an empty string when neither is set.
    fn name_any(&self) -> String;
    /// The namespace the resource is in
    fn namespace(&self) -> Option<String>;
    /// The resource version
    fn resource_version(&self) -> Option<String>;
    /// Unique ID assigned by the server
    fn uid(&self) -> Option<String>;
    /// Returns resource labels
    fn labels(&self) -> BTreeMap<String, String>;
    /// Provides mutable access to the labels
    fn labels_mut(&mut self) -> &mut BTreeMap<String, String>;
}

impl<K: Resource> ResourceExt for K {
    fn name_any(&self) -> String {
        self.meta()
            .name
            .clone()
            .or_else(|| self.meta().generate_name.clone())
            .unwrap_or_default()
    }

    fn namespace(&self) -> Option<String> {
        self.meta().namespace.clone()
    }

    fn resource_version(&self) -> Option<String> {
        self.meta().resource_version.clone()
    }

    fn uid(&self) -> Option<String> {
        self.meta().uid.clone()
    }

    fn labels(&self) -> BTreeMap<String, String> {
        self.meta().labels.clone().unwrap_or_default()
    }

    fn labels_mut(&mut self) -> &mut BTreeMap<String, String> {
        self.meta_mut().labels.get_or_insert_with(BTreeMap::new)
    }
}

#[cfg(test)]
mod test {
    use super::{Resource, ResourceExt};
    use crate::servicecatalog::{Binding, Instance, InstanceSpec};

    #[test]
    fn url_paths() {
        assert_eq!(
            Instance::url_path(Some("ns")),
            "/apis/servicecatalog.k8s.io/v1alpha1/namespaces/ns/instances"
        );
        assert_eq!(
            Binding::url_path(None),
            "/apis/servicecatalog.k8s.io/v1alpha1/bindings"
        );
        assert_eq!(Instance::api_version(), "servicecatalog.k8s.io/v1alpha1");
    }

    #[test]
    fn name_any_falls_back_to_generate_name() {
        let mut inst = Instance::new("", InstanceSpec::default());
        inst.metadata.name = None;
        inst.metadata.generate_name = Some("db-".into());
        assert_eq!(inst.name_any(), "db-");
        inst.labels_mut().insert("app".into(), "blog".into());
        assert_eq!(inst.labels().get("app").unwrap(), "blog");
    }
}
