//! Crate for talking to the service catalog api
//!
//! This crate maps the create, update, delete, get, list, watch and patch
//! operations on [`Instance`](core::Instance) and [`Binding`](core::Binding)
//! resources onto REST calls, through any [`tower::Service`] that can carry
//! an [`http::Request`]. Connection handling, TLS and authentication belong
//! to that service.
//!
//! # Example
//!
//! Validate an instance, create it, then watch it become ready.
//!
//! ```rust,no_run
//! use catalog_client::{
//!     core::{validation, Instance, InstanceSpec, WatchEvent},
//!     api::{ListParams, PostParams},
//!     Client, ServicecatalogClient,
//! };
//! use futures::TryStreamExt;
//!
//! async fn provision(client: Client) -> Result<(), Box<dyn std::error::Error>> {
//!     let instances = ServicecatalogClient::new(client).instances("dev");
//!
//!     let inst = Instance::new("db", InstanceSpec::new("mysql", "free")).within("dev");
//!     validation::validate_instance(&inst).into_result()?;
//!
//!     let lp = ListParams::default().fields("metadata.name=db");
//!     let mut events = instances.watch(&lp).await?;
//!     instances.create(&PostParams::default(), &inst).await?;
//!
//!     while let Some(event) = events.try_next().await? {
//!         if let WatchEvent::Modified(i) = event {
//!             println!("instance status: {:?}", i.status);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! For more details, see:
//!
//! - [`Client`](crate::client) for the transport handle and the verb request builder
//! - [`Config`](crate::config) for the cluster url and static headers
//! - [`Api`](crate::Api) for the typed operations on a resource
//! - [`validation`](crate::core::validation) for checks to run before mutating
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
#[doc(inline)]
pub use api::Api;

pub mod client;
#[doc(inline)]
pub use client::Client;

pub mod config;
#[doc(inline)]
pub use config::Config;

pub mod error;
#[doc(inline)]
pub use error::Error;
/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;

mod servicecatalog;
pub use servicecatalog::ServicecatalogClient;

pub use crate::core::{Resource, ResourceExt};
/// Re-exports from catalog_core
pub use catalog_core as core;
