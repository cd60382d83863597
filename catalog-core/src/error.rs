use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error response from the API.
///
/// This is the `Status` object the apiserver sends back on failed calls,
/// and the payload of [`WatchEvent::Error`](crate::WatchEvent::Error).
#[derive(Error, Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[error("{message}: {reason}")]
pub struct ErrorResponse {
    /// The status
    pub status: String,
    /// A message about the error
    #[serde(default)]
    pub message: String,
    /// The reason for the error
    #[serde(default)]
    pub reason: String,
    /// The error code
    pub code: u16,
}

impl ErrorResponse {
    /// Whether the apiserver reported the object as missing
    pub fn is_not_found(&self) -> bool {
        self.reason == "NotFound" || self.code == 404
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOT_FOUND: &str = r#"
    {
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "message": "instances.servicecatalog.k8s.io \"db\" not found",
      "reason": "NotFound",
      "details": {
        "name": "db",
        "group": "servicecatalog.k8s.io",
        "kind": "instances"
      },
      "code": 404
    }
    "#;

    const INVALID: &str = r#"
    {
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "message": "Instance.servicecatalog.k8s.io \"db\" is invalid: spec.planName: Required value: planName is required",
      "reason": "Invalid",
      "code": 422
    }
    "#;

    #[test]
    fn not_found_status() {
        let status: ErrorResponse = serde_json::from_str(NOT_FOUND).unwrap();
        assert_eq!(status.code, 404);
        assert!(status.is_not_found());
        assert_eq!(
            status.to_string(),
            "instances.servicecatalog.k8s.io \"db\" not found: NotFound"
        );
    }

    #[test]
    fn invalid_status() {
        let status: ErrorResponse = serde_json::from_str(INVALID).unwrap();
        assert_eq!(status.code, 422);
        assert_eq!(status.reason, "Invalid");
        assert!(!status.is_not_found());
    }
}
