use super::{
    field::{ErrorList, FieldError, Path},
    names::{name_is_dns_label, name_is_dns_subdomain},
    object_meta::MetadataValidator,
    sink::ErrorSink,
    Validator,
};
use crate::servicecatalog::{Instance, InstanceSpec};

impl<M: MetadataValidator, S: ErrorSink> Validator<M, S> {
    /// Validate an instance about to be created
    ///
    /// Metadata is checked as namespaced with DNS subdomain names, then the spec is checked
    /// under `Spec`. Each error is reported to the sink as it is appended.
    pub fn validate_instance(&self, instance: &Instance) -> ErrorList {
        let mut errs = ErrorList::new();
        self.append_and_log(
            &mut errs,
            self.metadata.validate_object_meta(
                &instance.metadata,
                true,
                name_is_dns_subdomain,
                &Path::new("metadata"),
            ),
        );
        self.append_and_log(&mut errs, self.validate_instance_spec(&instance.spec, &Path::new("Spec")));
        errs
    }

    /// Validate the spec of an instance found at `path`
    ///
    /// An empty class or plan name is reported as required and then also as invalid,
    /// since the empty string is not a valid name either. Nothing is sent to the sink.
    pub fn validate_instance_spec(&self, spec: &InstanceSpec, path: &Path) -> ErrorList {
        let mut errs = ErrorList::new();
        required_name(&mut errs, &spec.service_class_name, &path.child("serviceClassName"), "serviceClassName");
        required_name(&mut errs, &spec.plan_name, &path.child("planName"), "planName");
        errs
    }

    /// Validate a replacement of `old` by `new`
    ///
    /// Both objects are validated as if freshly created and the results concatenated,
    /// new first. An `old` object that became invalid under stricter rules therefore
    /// fails every update until it is fixed out of band.
    pub fn validate_instance_update(&self, new: &Instance, old: &Instance) -> ErrorList {
        let mut errs = self.validate_instance(new);
        errs.extend(self.validate_instance(old));
        errs
    }

    /// Validate a status write, there are no status specific rules yet
    pub fn validate_instance_status_update(&self, new: &Instance, old: &Instance) -> ErrorList {
        self.validate_instance_update(new, old)
    }
}

fn required_name(errs: &mut ErrorList, value: &str, path: &Path, name: &str) {
    if value.is_empty() {
        errs.push(FieldError::required(path, format!("{name} is required")));
    }
    errs.extend(
        name_is_dns_label(value, false)
            .into_iter()
            .map(|msg| FieldError::invalid(path, value, msg)),
    );
}

#[cfg(test)]
mod test {
    use crate::{
        servicecatalog::{Instance, InstanceSpec},
        validation::{
            self,
            field::{ErrorType, FieldError, Path},
            Validator,
        },
    };
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn kinds_on(errs: &[FieldError], field: &str) -> Vec<ErrorType> {
        errs.iter().filter(|e| e.field == field).map(|e| e.type_).collect()
    }

    fn instance(class: &str, plan: &str) -> Instance {
        Instance::new("db", InstanceSpec::new(class, plan)).within("dev")
    }

    #[test]
    fn valid_instance_has_no_errors() {
        assert!(validation::validate_instance(&instance("mysql", "free")).is_empty());
    }

    #[test]
    fn empty_class_is_required_and_invalid() {
        let errs = validation::validate_instance(&instance("", "gold"));
        assert_eq!(errs.len(), 2);
        assert_eq!(kinds_on(&errs, "Spec.serviceClassName"), vec![
            ErrorType::Required,
            ErrorType::Invalid
        ]);
        assert_eq!(errs[0].detail, "serviceClassName is required");
        assert_eq!(errs[1].bad_value.as_deref(), Some(""));
    }

    #[test]
    fn empty_plan_is_required_and_invalid() {
        let spec = InstanceSpec::new("mysql", "");
        let errs = <Validator>::default().validate_instance_spec(&spec, &Path::new("Spec"));
        assert_eq!(kinds_on(&errs, "Spec.planName"), vec![ErrorType::Required, ErrorType::Invalid]);
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn malformed_name_is_only_invalid() {
        let errs = validation::validate_instance(&instance("My Class", "free"));
        assert_eq!(kinds_on(&errs, "Spec.serviceClassName"), vec![ErrorType::Invalid]);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].bad_value.as_deref(), Some("My Class"));
    }

    #[test]
    fn metadata_errors_come_first() {
        let inst = Instance::new("", InstanceSpec::new("mysql", ""));
        let errs = validation::validate_instance(&inst);
        let fields: Vec<_> = errs.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec![
            "metadata.name",
            "metadata.namespace",
            "Spec.planName",
            "Spec.planName"
        ]);
    }

    #[test]
    fn update_is_new_then_old() {
        let new = instance("", "gold");
        let old = instance("mysql", "Free");
        let mut expected = validation::validate_instance(&new);
        expected.extend(validation::validate_instance(&old));
        let errs = validation::validate_instance_update(&new, &old);
        assert_eq!(errs, expected);
        assert_eq!(errs.len(), 3);
        assert_eq!(validation::validate_instance_status_update(&new, &old), expected);
    }

    #[test]
    fn sink_sees_each_error_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let v = <Validator>::default().with_sink(move |e: &FieldError| recorder.lock().push(e.clone()));
        let errs = v.validate_instance_update(&instance("", ""), &Instance::new("x", InstanceSpec::default()));
        assert!(!errs.is_empty());
        assert_eq!(*seen.lock(), errs.into_inner());
    }
}
