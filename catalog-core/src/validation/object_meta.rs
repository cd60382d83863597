//! Validation of the standard object metadata
use super::{
    field::{ErrorList, FieldError, Path},
    names::{is_qualified_name, is_valid_label_value, name_is_dns_label, ValidateNameFn},
};
use crate::metadata::ObjectMeta;
use std::collections::BTreeMap;

/// Total size budget for all annotation keys and values
pub const TOTAL_ANNOTATION_SIZE_LIMIT: usize = 256 * 1024;

/// Validates the [`ObjectMeta`] of a resource
///
/// This is the seam resource validators go through for everything under
/// `metadata`; swap it out to relax or tighten naming rules.
pub trait MetadataValidator {
    /// Validate `meta` found at `path`
    ///
    /// `name_fn` checks both `name` and `generateName`, `requires_namespace`
    /// selects between namespaced and cluster scoped rules.
    fn validate_object_meta(
        &self,
        meta: &ObjectMeta,
        requires_namespace: bool,
        name_fn: ValidateNameFn,
        path: &Path,
    ) -> ErrorList;
}

/// The apimachinery rules for object metadata
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectMetaValidator;

impl MetadataValidator for ObjectMetaValidator {
    fn validate_object_meta(
        &self,
        meta: &ObjectMeta,
        requires_namespace: bool,
        name_fn: ValidateNameFn,
        path: &Path,
    ) -> ErrorList {
        let mut errs = ErrorList::new();

        let generate_name = meta.generate_name.as_deref().unwrap_or_default();
        if !generate_name.is_empty() {
            let field = path.child("generateName");
            errs.extend(
                name_fn(generate_name, true)
                    .into_iter()
                    .map(|msg| FieldError::invalid(&field, generate_name, msg)),
            );
        }

        let name = meta.name.as_deref().unwrap_or_default();
        let field = path.child("name");
        if name.is_empty() {
            errs.push(FieldError::required(&field, "name or generateName is required"));
        } else {
            errs.extend(
                name_fn(name, false)
                    .into_iter()
                    .map(|msg| FieldError::invalid(&field, name, msg)),
            );
        }

        let namespace = meta.namespace.as_deref().unwrap_or_default();
        let field = path.child("namespace");
        if requires_namespace {
            if namespace.is_empty() {
                errs.push(FieldError::required(&field, ""));
            } else {
                errs.extend(
                    name_is_dns_label(namespace, false)
                        .into_iter()
                        .map(|msg| FieldError::invalid(&field, namespace, msg)),
                );
            }
        } else if !namespace.is_empty() {
            errs.push(FieldError::forbidden(&field, "not allowed on this type"));
        }

        if let Some(generation) = meta.generation.filter(|g| *g < 0) {
            errs.push(FieldError::invalid(
                &path.child("generation"),
                generation.to_string(),
                "must be greater than or equal to 0",
            ));
        }

        if let Some(labels) = &meta.labels {
            errs.extend(validate_labels(labels, &path.child("labels")));
        }
        if let Some(annotations) = &meta.annotations {
            errs.extend(validate_annotations(annotations, &path.child("annotations")));
        }
        errs
    }
}

/// Label keys must be qualified names, values must be label values
pub fn validate_labels(labels: &BTreeMap<String, String>, path: &Path) -> ErrorList {
    let mut errs = ErrorList::new();
    for (key, value) in labels {
        errs.extend(
            is_qualified_name(key)
                .into_iter()
                .map(|msg| FieldError::invalid(path, key.as_str(), msg)),
        );
        errs.extend(
            is_valid_label_value(value)
                .into_iter()
                .map(|msg| FieldError::invalid(path, value.as_str(), msg)),
        );
    }
    errs
}

/// Annotation keys must be lowercase qualified names and all annotations must fit the size limit
pub fn validate_annotations(annotations: &BTreeMap<String, String>, path: &Path) -> ErrorList {
    let mut errs = ErrorList::new();
    let mut total = 0;
    for (key, value) in annotations {
        errs.extend(
            is_qualified_name(&key.to_lowercase())
                .into_iter()
                .map(|msg| FieldError::invalid(path, key.as_str(), msg)),
        );
        total += key.len() + value.len();
    }
    if total > TOTAL_ANNOTATION_SIZE_LIMIT {
        errs.push(FieldError::forbidden(
            path,
            format!("may not have more than {TOTAL_ANNOTATION_SIZE_LIMIT} bytes"),
        ));
    }
    errs
}

#[cfg(test)]
mod test {
    use super::{MetadataValidator, ObjectMetaValidator};
    use crate::{
        metadata::ObjectMeta,
        validation::{
            field::{ErrorType, Path},
            names::name_is_dns_subdomain,
        },
    };

    fn check(meta: &ObjectMeta, namespaced: bool) -> Vec<(ErrorType, String)> {
        ObjectMetaValidator
            .validate_object_meta(meta, namespaced, name_is_dns_subdomain, &Path::new("metadata"))
            .iter()
            .map(|e| (e.type_, e.field.clone()))
            .collect()
    }

    fn meta(name: &str, ns: &str) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.into()),
            namespace: Some(ns.into()),
            ..ObjectMeta::default()
        }
    }

    #[test]
    fn valid_meta() {
        assert!(check(&meta("db", "dev"), true).is_empty());
        assert!(check(&meta("db", ""), false).is_empty());
    }

    #[test]
    fn missing_name_and_namespace() {
        assert_eq!(check(&ObjectMeta::default(), true), vec![
            (ErrorType::Required, "metadata.name".into()),
            (ErrorType::Required, "metadata.namespace".into()),
        ]);
    }

    #[test]
    fn bad_name_and_namespace() {
        assert_eq!(check(&meta("Db", "dev.ops"), true), vec![
            (ErrorType::Invalid, "metadata.name".into()),
            (ErrorType::Invalid, "metadata.namespace".into()),
        ]);
    }

    #[test]
    fn namespace_forbidden_when_cluster_scoped() {
        assert_eq!(check(&meta("db", "dev"), false), vec![(
            ErrorType::Forbidden,
            "metadata.namespace".into()
        )]);
    }

    #[test]
    fn generate_name_is_checked_as_prefix() {
        let mut m = meta("db-x1", "dev");
        m.generate_name = Some("db-".into());
        assert!(check(&m, true).is_empty());
        m.generate_name = Some("DB-".into());
        assert_eq!(check(&m, true), vec![(ErrorType::Invalid, "metadata.generateName".into())]);
    }

    #[test]
    fn labels_and_annotations() {
        let mut m = meta("db", "dev");
        m.labels = Some([("app".to_string(), "blog".to_string())].into());
        assert!(check(&m, true).is_empty());
        m.labels = Some([("bad key".to_string(), "-v".to_string())].into());
        m.annotations = Some([("a/b/c".to_string(), String::new())].into());
        assert_eq!(check(&m, true), vec![
            (ErrorType::Invalid, "metadata.labels".into()),
            (ErrorType::Invalid, "metadata.labels".into()),
            (ErrorType::Invalid, "metadata.annotations".into()),
        ]);
    }

    #[test]
    fn negative_generation() {
        let mut m = meta("db", "dev");
        m.generation = Some(-1);
        assert_eq!(check(&m, true), vec![(ErrorType::Invalid, "metadata.generation".into())]);
    }
}
