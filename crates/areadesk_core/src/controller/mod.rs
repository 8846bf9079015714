//! Client-side controllers for the Area/Folder hierarchy.
//!
//! # Responsibility
//! - Own per-view snapshots of areas and folders fetched through a gateway.
//! - Keep selection, expansion, and create-form state consistent.
//!
//! # Invariants
//! - Each controller owns its own snapshot; there is no shared store.
//! - Snapshots change only through a full re-fetch.
//! - A disposed controller never applies late fetch results.
//! - Gateway failures never escape a controller as a panic.

pub mod dialog;
pub mod explorer;
pub mod notice;
pub mod selector;

use crate::gateway::{list_or_empty, GatewayResult, Listing};
use log::debug;
use tokio_util::sync::CancellationToken;

/// Runs one list call and degrades failures to an empty listing.
///
/// Returns `None` when `lifecycle` was cancelled by the time the call
/// returned; the caller must then leave its snapshot untouched.
pub(crate) fn fetch_snapshot<T>(
    entity: &'static str,
    lifecycle: &CancellationToken,
    fetch: impl FnOnce(&CancellationToken) -> GatewayResult<Vec<T>>,
) -> Option<Listing<T>> {
    let result = fetch(lifecycle);
    if lifecycle.is_cancelled() {
        debug!("event=snapshot_discarded module=controller status=skipped entity={entity}");
        return None;
    }
    Some(list_or_empty(entity, result))
}
