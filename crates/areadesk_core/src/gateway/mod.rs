//! Remote data gateway contracts.
//!
//! # Responsibility
//! - Define the list/create contract the controllers depend on.
//! - Classify failures so listing can degrade while creation propagates.
//!
//! # Invariants
//! - One attempt per call: no retry, no backoff.
//! - A call that observes a cancelled token returns `GatewayError::Cancelled`.
//! - Create drafts are already validated; gateways never see blank input.

pub mod http;
pub mod memory;

use crate::model::area::Area;
use crate::model::draft::{NewArea, NewFolder};
use crate::model::folder::Folder;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Result type used by gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors from gateway operations.
#[derive(Debug)]
pub enum GatewayError {
    /// The owning view was disposed before or during the call.
    Cancelled,
    /// Network-level failure (connect, TLS, I/O).
    Transport(String),
    /// Server answered with a non-2xx status.
    Status { status: u16, body: String },
    /// Response body is not the expected JSON.
    Decode(String),
    /// Request body could not be serialized.
    Encode(String),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cancelled => write!(f, "request cancelled"),
            Self::Transport(message) => write!(f, "transport failure: {message}"),
            Self::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "server returned status {status}")
                } else {
                    write!(f, "server returned status {status}: {body}")
                }
            }
            Self::Decode(message) => write!(f, "invalid response body: {message}"),
            Self::Encode(message) => write!(f, "invalid request body: {message}"),
        }
    }
}

impl Error for GatewayError {}

impl From<serde_json::Error> for GatewayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

/// Gateway interface over the Area/Folder REST endpoints.
pub trait HierarchyGateway {
    /// Lists every area visible to the caller.
    fn list_areas(&self, cancel: &CancellationToken) -> GatewayResult<Vec<Area>>;
    /// Lists every folder visible to the caller.
    fn list_folders(&self, cancel: &CancellationToken) -> GatewayResult<Vec<Folder>>;
    /// Creates one area. The created envelope is not returned.
    fn create_area(&self, area: &NewArea, cancel: &CancellationToken) -> GatewayResult<()>;
    /// Creates one folder. The created envelope is not returned.
    fn create_folder(&self, folder: &NewFolder, cancel: &CancellationToken)
        -> GatewayResult<()>;
}

impl<G: HierarchyGateway + ?Sized> HierarchyGateway for &G {
    fn list_areas(&self, cancel: &CancellationToken) -> GatewayResult<Vec<Area>> {
        (**self).list_areas(cancel)
    }

    fn list_folders(&self, cancel: &CancellationToken) -> GatewayResult<Vec<Folder>> {
        (**self).list_folders(cancel)
    }

    fn create_area(&self, area: &NewArea, cancel: &CancellationToken) -> GatewayResult<()> {
        (**self).create_area(area, cancel)
    }

    fn create_folder(
        &self,
        folder: &NewFolder,
        cancel: &CancellationToken,
    ) -> GatewayResult<()> {
        (**self).create_folder(folder, cancel)
    }
}

impl<G: HierarchyGateway + ?Sized> HierarchyGateway for Arc<G> {
    fn list_areas(&self, cancel: &CancellationToken) -> GatewayResult<Vec<Area>> {
        (**self).list_areas(cancel)
    }

    fn list_folders(&self, cancel: &CancellationToken) -> GatewayResult<Vec<Folder>> {
        (**self).list_folders(cancel)
    }

    fn create_area(&self, area: &NewArea, cancel: &CancellationToken) -> GatewayResult<()> {
        (**self).create_area(area, cancel)
    }

    fn create_folder(
        &self,
        folder: &NewFolder,
        cancel: &CancellationToken,
    ) -> GatewayResult<()> {
        (**self).create_folder(folder, cancel)
    }
}

/// Outcome of a listing call after failure degradation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    /// Loaded entities, empty when the call failed.
    pub items: Vec<T>,
    /// Human-readable warning when the call failed.
    pub warning: Option<String>,
}

/// Converts a list result into a non-fatal listing.
///
/// Failures become an empty list plus a warning; cancellation becomes an
/// empty list without a warning.
pub fn list_or_empty<T>(entity: &'static str, result: GatewayResult<Vec<T>>) -> Listing<T> {
    match result {
        Ok(items) => Listing {
            items,
            warning: None,
        },
        Err(GatewayError::Cancelled) => {
            debug!("event=list_cancelled module=gateway status=skipped entity={entity}");
            Listing {
                items: Vec::new(),
                warning: None,
            }
        }
        Err(err) => {
            warn!("event=list_failed module=gateway status=error entity={entity} error={err}");
            Listing {
                items: Vec::new(),
                warning: Some(format!("Failed to load {entity}")),
            }
        }
    }
}

pub(crate) fn ensure_active(cancel: &CancellationToken) -> GatewayResult<()> {
    if cancel.is_cancelled() {
        return Err(GatewayError::Cancelled);
    }
    Ok(())
}
