use super::{ConditionStatus, ConditionType, GROUP, VERSION};
use crate::{
    metadata::{ObjectMeta, Time, TypeMeta},
    object::{HasSpec, HasStatus},
    ObjectList, Resource,
};
use serde::{Deserialize, Serialize};

/// A provisioned service, one plan of one service class
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Instance {
    /// apiVersion + kind
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// Standard object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// What the user asked for
    pub spec: InstanceSpec,

    /// What the broker reported back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InstanceStatus>,
}

/// A page of [`Instance`] objects
pub type InstanceList = ObjectList<Instance>;

/// Desired state of an [`Instance`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSpec {
    /// Name of the service class to provision from
    pub service_class_name: String,

    /// Name of the plan within the service class
    pub plan_name: String,

    /// Opaque parameters handed to the broker on provision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,

    /// Identifier the broker knows this instance by
    #[serde(rename = "externalID", default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Observed state of an [`Instance`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceStatus {
    /// Latest observations
    #[serde(default)]
    pub conditions: Vec<InstanceCondition>,

    /// Whether an asynchronous broker operation is still running
    #[serde(default)]
    pub async_op_in_progress: bool,

    /// Opaque operation key returned by the broker, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_operation: Option<String>,

    /// Dashboard for the provisioned service
    #[serde(rename = "dashboardURL", default, skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<String>,
}

/// A single observation about an [`Instance`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceCondition {
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

impl Instance {
    /// A new instance with the given name and spec
    ///
    /// The namespace is left empty, see [`Instance::within`].
    pub fn new(name: &str, spec: InstanceSpec) -> Self {
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

    /// Place the instance in a namespace
    #[must_use]
    pub fn within(mut self, namespace: &str) -> Self {
        self.metadata.namespace = Some(namespace.to_string());
        self
    }
}

impl InstanceSpec {
    /// Spec for a plan of a service class
    pub fn new(service_class_name: &str, plan_name: &str) -> Self {
        Self {
            service_class_name: service_class_name.to_string(),
            plan_name: plan_name.to_string(),
            ..Self::default()
        }
    }
}

impl Resource for Instance {
    const GROUP: &'static str = GROUP;
    const KIND: &'static str = "Instance";
    const PLURAL: &'static str = "instances";
    const VERSION: &'static str = VERSION;

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl HasSpec for Instance {
    type Spec = InstanceSpec;

    fn spec(&self) -> &InstanceSpec {
        &self.spec
    }

    fn spec_mut(&mut self) -> &mut InstanceSpec {
        &mut self.spec
    }
}

impl HasStatus for Instance {
    type Status = InstanceStatus;

    fn status(&self) -> Option<&InstanceStatus> {
        self.status.as_ref()
    }

    fn status_mut(&mut self) -> &mut Option<InstanceStatus> {
        &mut self.status
    }
}
