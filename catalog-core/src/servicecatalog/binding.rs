use super::{ConditionStatus, ConditionType, GROUP, VERSION};
use crate::{
    metadata::{ObjectMeta, Time, TypeMeta},
    object::{HasSpec, HasStatus},
    ObjectList, Resource,
};
use serde::{Deserialize, Serialize};

/// Credentials of an [`Instance`](super::Instance) made available to an application
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Binding {
    /// apiVersion + kind
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// Standard object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// What the user asked for
    pub spec: BindingSpec,

    /// What the broker reported back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BindingStatus>,
}

/// A page of [`Binding`] objects
pub type BindingList = ObjectList<Binding>;

/// A reference to an object in the same namespace
#[derive(Serialize, Deserialize, Clone, Debug, Default, Eq, PartialEq)]
pub struct LocalObjectReference {
    /// Name of the referent
    #[serde(default)]
    pub name: String,
}

/// Desired state of a [`Binding`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BindingSpec {
    /// The instance in the same namespace to bind to
    pub instance_ref: LocalObjectReference,

    /// Opaque parameters handed to the broker on bind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,

    /// Secret the credentials are written into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,

    /// Identifier the broker knows this binding by
    #[serde(rename = "externalID", default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Observed state of a [`Binding`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct BindingStatus {
    /// Latest observations
    #[serde(default)]
    pub conditions: Vec<BindingCondition>,
}

/// A single observation about a [`Binding`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BindingCondition {
    /// Which condition this is
    #[serde(rename = "type")]
    pub type_: ConditionType,

    /// Whether the condition holds
    pub status: ConditionStatus,

    /// When `status` last changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<Time>,

    /// Machine readable reason for the last transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human readable detail about the last transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Binding {
    /// A new binding with the given name and spec
    pub fn new(name: &str, spec: BindingSpec) -> Self {
        Self {
            types: Some(TypeMeta::resource::<Self>()),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..ObjectMeta::default()
            },
            spec,
            status: None,
        }
    }

    /// Place the binding in a namespace
    #[must_use]
    pub fn within(mut self, namespace: &str) -> Self {
        self.metadata.namespace = Some(namespace.to_string());
        self
    }
}

impl BindingSpec {
    /// Spec binding the named instance
    pub fn new(instance_name: &str) -> Self {
        Self {
            instance_ref: LocalObjectReference {
                name: instance_name.to_string(),
            },
            ..Self::default()
        }
    }

    /// Write the credentials into `secret_name`
    #[must_use]
    pub fn secret(mut self, secret_name: &str) -> Self {
        self.secret_name = Some(secret_name.to_string());
        self
    }
}

impl Resource for Binding {
    const GROUP: &'static str = GROUP;
    const KIND: &'static str = "Binding";
    const PLURAL: &'static str = "bindings";
    const VERSION: &'static str = VERSION;

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl HasSpec for Binding {
    type Spec = BindingSpec;

    fn spec(&self) -> &BindingSpec {
        &self.spec
    }

    fn spec_mut(&mut self) -> &mut BindingSpec {
        &mut self.spec
    }
}

impl HasStatus for Binding {
    type Status = BindingStatus;

    fn status(&self) -> Option<&BindingStatus> {
        self.status.as_ref()
    }

    fn status_mut(&mut self) -> &mut Option<BindingStatus> {
        &mut self.status
    }
}
