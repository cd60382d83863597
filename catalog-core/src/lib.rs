//! Types and traits necessary for interacting with the service catalog API
//!
//! This crate carries everything that does not need a client: the
//! [`Instance`] and [`Binding`] resources, request parameters, a
//! [`Request`] builder that maps operations onto REST verbs and paths,
//! watch events, and the [`validation`] engine run before mutations.
//!
//! The same information is re-exported from `catalog-client` under `catalog_client::core`.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod metadata;

pub mod object;
pub use object::{HasSpec, HasStatus, ObjectList};

pub mod params;

pub mod request;
pub use request::Request;

mod resource;
pub use resource::{Resource, ResourceExt};

pub mod servicecatalog;
pub use servicecatalog::{Binding, BindingSpec, Instance, InstanceSpec};

pub mod validation;

pub mod watch;
pub use watch::WatchEvent;

mod error;
pub use error::ErrorResponse;

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = request::Error> = std::result::Result<T, E>;
