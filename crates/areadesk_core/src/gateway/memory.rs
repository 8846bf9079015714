//! Process-local gateway implementation.
//!
//! # Responsibility
//! - Mirror the server's create/list contract without a network.
//! - Back offline CLI sessions and controller tests.
//!
//! # Invariants
//! - Listing preserves insertion order.
//! - Resource names are `areas/<uid>` and `folders/<uid>`.
//! - A folder can only be created under an existing area.
//! - A uid is unique per entity kind.

use crate::gateway::{ensure_active, GatewayError, GatewayResult, HierarchyGateway};
use crate::model::area::Area;
use crate::model::draft::{NewArea, NewFolder};
use crate::model::folder::Folder;
use log::info;
use std::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Debug, Default)]
struct MemoryState {
    areas: Vec<Area>,
    folders: Vec<Folder>,
}

/// In-memory gateway.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    state: Mutex<MemoryState>,
}

impl InMemoryGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway preloaded with existing entities.
    ///
    /// Seed data is taken as-is; it is not checked against create rules.
    pub fn with_entities(areas: Vec<Area>, folders: Vec<Folder>) -> Self {
        Self {
            state: Mutex::new(MemoryState { areas, folders }),
        }
    }

    fn lock(&self) -> GatewayResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| GatewayError::Transport("in-memory gateway state poisoned".to_string()))
    }
}

impl HierarchyGateway for InMemoryGateway {
    fn list_areas(&self, cancel: &CancellationToken) -> GatewayResult<Vec<Area>> {
        ensure_active(cancel)?;
        Ok(self.lock()?.areas.clone())
    }

    fn list_folders(&self, cancel: &CancellationToken) -> GatewayResult<Vec<Folder>> {
        ensure_active(cancel)?;
        Ok(self.lock()?.folders.clone())
    }

    fn create_area(&self, area: &NewArea, cancel: &CancellationToken) -> GatewayResult<()> {
        ensure_active(cancel)?;
        let mut state = self.lock()?;
        let uid = resolve_uid(area.uid());
        if state.areas.iter().any(|existing| existing.uid == uid) {
            return Err(conflict("area", &uid));
        }
        if let Some(parent) = area.parent() {
            if !state.areas.iter().any(|existing| existing.name == parent) {
                return Err(not_found("parent area", parent));
            }
        }

        let name = format!("areas/{uid}");
        state.areas.push(Area {
            name: name.clone(),
            uid,
            display_name: area.display_name().to_string(),
            description: area.description().to_string(),
            create_time: None,
            update_time: None,
            parent: area.parent().map(str::to_string),
        });
        info!("event=area_created module=memory_gateway status=ok name={name}");
        Ok(())
    }

    fn create_folder(
        &self,
        folder: &NewFolder,
        cancel: &CancellationToken,
    ) -> GatewayResult<()> {
        ensure_active(cancel)?;
        let mut state = self.lock()?;
        if !state.areas.iter().any(|area| area.name == folder.area()) {
            return Err(not_found("area", folder.area()));
        }
        let uid = resolve_uid(folder.uid());
        if state.folders.iter().any(|existing| existing.uid == uid) {
            return Err(conflict("folder", &uid));
        }
        if let Some(parent) = folder.parent() {
            let parent_in_area = state
                .folders
                .iter()
                .any(|existing| existing.name == parent && existing.area == folder.area());
            if !parent_in_area {
                return Err(not_found("parent folder", parent));
            }
        }

        let name = format!("folders/{uid}");
        state.folders.push(Folder {
            name: name.clone(),
            uid,
            display_name: folder.display_name().to_string(),
            description: folder.description().to_string(),
            area: folder.area().to_string(),
            parent: folder.parent().map(str::to_string),
            create_time: None,
            update_time: None,
        });
        info!(
            "event=folder_created module=memory_gateway status=ok name={name} area={}",
            folder.area()
        );
        Ok(())
    }
}

fn resolve_uid(requested: Option<&str>) -> String {
    requested
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

fn conflict(kind: &str, uid: &str) -> GatewayError {
    GatewayError::Status {
        status: 409,
        body: format!("{kind} uid already exists: {uid}"),
    }
}

fn not_found(kind: &str, name: &str) -> GatewayError {
    GatewayError::Status {
        status: 404,
        body: format!("{kind} not found: {name}"),
    }
}
