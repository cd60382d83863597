use super::{
    field::{ErrorList, FieldError, Path},
    names::name_is_dns_subdomain,
    object_meta::MetadataValidator,
    sink::ErrorSink,
    Validator,
};
use crate::servicecatalog::{Binding, BindingSpec};

impl<M: MetadataValidator, S: ErrorSink> Validator<M, S> {
    /// Validate a binding about to be created
    ///
    /// Same composition as [`Validator::validate_instance`].
    pub fn validate_binding(&self, binding: &Binding) -> ErrorList {
        let mut errs = ErrorList::new();
        self.append_and_log(
            &mut errs,
            self.metadata.validate_object_meta(
                &binding.metadata,
                true,
                name_is_dns_subdomain,
                &Path::new("metadata"),
            ),
        );
        self.append_and_log(&mut errs, self.validate_binding_spec(&binding.spec, &Path::new("Spec")));
        errs
    }

    /// Validate the spec of a binding found at `path`
    ///
    /// The referenced instance name follows the instance naming rules, a secret name
    /// is only checked when one is given.
    pub fn validate_binding_spec(&self, spec: &BindingSpec, path: &Path) -> ErrorList {
        let mut errs = ErrorList::new();

        let instance = &spec.instance_ref.name;
        let field = path.child("instanceRef").child("name");
        if instance.is_empty() {
            errs.push(FieldError::required(&field, "instanceRef.name is required"));
        }
        errs.extend(
            name_is_dns_subdomain(instance, false)
                .into_iter()
                .map(|msg| FieldError::invalid(&field, instance.as_str(), msg)),
        );

        if let Some(secret) = &spec.secret_name {
            let field = path.child("secretName");
            errs.extend(
                name_is_dns_subdomain(secret, false)
                    .into_iter()
                    .map(|msg| FieldError::invalid(&field, secret.as_str(), msg)),
            );
        }
        errs
    }

    /// Validate a replacement of `old` by `new`, see [`Validator::validate_instance_update`]
    pub fn validate_binding_update(&self, new: &Binding, old: &Binding) -> ErrorList {
        let mut errs = self.validate_binding(new);
        errs.extend(self.validate_binding(old));
        errs
    }

    /// Validate a status write, there are no status specific rules yet
    pub fn validate_binding_status_update(&self, new: &Binding, old: &Binding) -> ErrorList {
        self.validate_binding_update(new, old)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        servicecatalog::{Binding, BindingSpec},
        validation::{self, field::ErrorType, sink::NoopSink, Validator},
    };

    #[test]
    fn valid_binding() {
        let b = Binding::new("creds", BindingSpec::new("db").secret("db-creds")).within("dev");
        assert!(validation::validate_binding(&b).is_empty());
    }

    #[test]
    fn missing_instance_ref() {
        let b = Binding::new("creds", BindingSpec::default()).within("dev");
        let errs = validation::validate_binding(&b);
        let kinds: Vec<_> = errs.iter().map(|e| (e.type_, e.field.as_str())).collect();
        assert_eq!(kinds, vec![
            (ErrorType::Required, "Spec.instanceRef.name"),
            (ErrorType::Invalid, "Spec.instanceRef.name"),
        ]);
    }

    #[test]
    fn bad_secret_name() {
        let b = Binding::new("creds", BindingSpec::new("db").secret("Db_Creds")).within("dev");
        let errs = <Validator>::default().with_sink(NoopSink).validate_binding(&b);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field, "Spec.secretName");
    }

    #[test]
    fn update_validates_both() {
        let good = Binding::new("creds", BindingSpec::new("db")).within("dev");
        let bad = Binding::new("creds", BindingSpec::new("db"));
        assert_eq!(validation::validate_binding_update(&good, &bad).len(), 1);
        assert_eq!(validation::validate_binding_status_update(&bad, &bad).len(), 2);
    }
}
