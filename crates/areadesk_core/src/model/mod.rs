//! Area/Folder hierarchy domain model.
//!
//! # Responsibility
//! - Define the wire-compatible read models returned by the backend.
//! - Define typed create drafts that carry mandatory fields by construction.
//!
//! # Invariants
//! - `name` is the immutable resource identifier assigned by the server.
//! - Every `Folder` belongs to exactly one `Area`, referenced by area `name`.
//! - Drafts never hold a blank display name (or a blank area for folders).

pub mod area;
pub mod draft;
pub mod folder;

/// Resource identifier, e.g. `areas/homelab` or `folders/equipment`.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ResourceName = String;
