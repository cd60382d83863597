//! Validation of service catalog resources
//!
//! Validation never fails fast: every check runs and every violation is
//! returned in an [`ErrorList`], in the order the checks ran. An empty list
//! means the object is acceptable.
//!
//! ```
//! use catalog_core::{validation, Instance, InstanceSpec};
//! let inst = Instance::new("db", InstanceSpec::new("", "gold")).within("dev");
//! let errs = validation::validate_instance(&inst);
//! assert_eq!(errs.len(), 2);
//! assert!(errs.iter().all(|e| e.field == "Spec.serviceClassName"));
//! ```
pub mod field;
pub mod names;
pub mod object_meta;
pub mod sink;

mod binding;
mod instance;

use crate::servicecatalog::{Binding, Instance};
use field::ErrorList;
use object_meta::ObjectMetaValidator;
use sink::{ErrorSink, TracingSink};

/// Validates resources using a [`MetadataValidator`](object_meta::MetadataValidator)
/// for `metadata` and reports every appended error to an [`ErrorSink`]
#[derive(Clone, Debug, Default)]
pub struct Validator<M = ObjectMetaValidator, S = TracingSink> {
    metadata: M,
    sink: S,
}

impl<M> Validator<M> {
    /// A validator using `metadata` for the object metadata and logging through `tracing`
    pub fn new(metadata: M) -> Self {
        Self {
            metadata,
            sink: TracingSink,
        }
    }
}

impl<M, S> Validator<M, S> {
    /// Swap the sink errors are reported to
    pub fn with_sink<T: ErrorSink>(self, sink: T) -> Validator<M, T> {
        Validator {
            metadata: self.metadata,
            sink,
        }
    }
}

impl<M, S: ErrorSink> Validator<M, S> {
    fn append_and_log(&self, errs: &mut ErrorList, more: ErrorList) {
        for err in more {
            self.sink.record(&err);
            errs.push(err);
        }
    }
}

/// [`Validator::validate_instance`] with the default validator
pub fn validate_instance(instance: &Instance) -> ErrorList {
    <Validator>::default().validate_instance(instance)
}

/// [`Validator::validate_instance_update`] with the default validator
pub fn validate_instance_update(new: &Instance, old: &Instance) -> ErrorList {
    <Validator>::default().validate_instance_update(new, old)
}

/// [`Validator::validate_instance_status_update`] with the default validator
pub fn validate_instance_status_update(new: &Instance, old: &Instance) -> ErrorList {
    <Validator>::default().validate_instance_status_update(new, old)
}

/// [`Validator::validate_binding`] with the default validator
pub fn validate_binding(binding: &Binding) -> ErrorList {
    <Validator>::default().validate_binding(binding)
}

/// [`Validator::validate_binding_update`] with the default validator
pub fn validate_binding_update(new: &Binding, old: &Binding) -> ErrorList {
    <Validator>::default().validate_binding_update(new, old)
}

/// [`Validator::validate_binding_status_update`] with the default validator
pub fn validate_binding_status_update(new: &Binding, old: &Binding) -> ErrorList {
    <Validator>::default().validate_binding_status_update(new, old)
}
