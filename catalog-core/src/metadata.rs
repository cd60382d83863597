//! Metadata structs used in traits, lists, and resources.
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, ObjectMeta, Time};
use serde::{Deserialize, Serialize};

/// Type information that is flattened into every service catalog object
#[derive(Deserialize, Serialize, Clone, Default, Debug, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    /// The version of the API
    pub api_version: String,

    /// The name of the API
    pub kind: String,
}

impl TypeMeta {
    /// Type information for a [`Resource`](crate::Resource) known at compile time
    pub fn resource<K: crate::Resource>() -> Self {
        Self {
            api_version: K::api_version(),
            kind: K::KIND.into(),
        }
    }
}
