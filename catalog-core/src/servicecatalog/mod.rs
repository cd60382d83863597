//! The `servicecatalog.k8s.io/v1alpha1` resources
//!
//! An [`Instance`] is a provisioned copy of a service class at a given plan,
//! a [`Binding`] hands the credentials of an instance to an application.
use serde::{Deserialize, Serialize};

mod binding;
pub use binding::{Binding, BindingCondition, BindingList, BindingSpec, BindingStatus, LocalObjectReference};

mod instance;
pub use instance::{Instance, InstanceCondition, InstanceList, InstanceSpec, InstanceStatus};

/// The api group all service catalog resources live in
pub const GROUP: &str = "servicecatalog.k8s.io";
/// The served version of the api group
pub const VERSION: &str = "v1alpha1";

/// The state of a condition
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ConditionStatus {
    /// The condition holds
    True,
    /// The condition does not hold
    False,
    /// The controller has not decided yet
    #[default]
    Unknown,
}

/// Condition types shared by instances and bindings
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ConditionType {
    /// The resource is provisioned and usable
    #[default]
    Ready,
}
