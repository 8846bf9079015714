//! Area -> folder tree controller.
//!
//! # Responsibility
//! - Own the area/folder snapshot and the expanded-area set.
//! - Orchestrate create flows: dialog validation, gateway call, re-fetch.
//!
//! # Invariants
//! - Children of an area are `folders where folder.area == area.name`, in
//!   snapshot order; folders of unloaded areas are never shown.
//! - A successful create is followed by a full re-fetch of that list,
//!   never by a local insert.
//! - A failed create leaves its dialog open with the typed input intact.
//! - Once disposed, a create outcome queues no notice and triggers no re-fetch.

use crate::controller::dialog::{AreaDialog, DialogError, FolderDialog, SubmitOutcome};
use crate::controller::fetch_snapshot;
use crate::controller::notice::Notice;
use crate::gateway::HierarchyGateway;
use crate::model::area::Area;
use crate::model::folder::Folder;
use crate::model::ResourceName;
use log::{debug, info};
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;

/// Children rendering state of one area node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildView<'a> {
    /// Area is collapsed; children are not rendered.
    Collapsed,
    /// Area is expanded but owns no folders.
    NoFolders,
    /// Area is expanded and owns at least one folder.
    Folders(Vec<&'a Folder>),
}

/// One rendered area row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaNode<'a> {
    pub area: &'a Area,
    pub expanded: bool,
    pub children: ChildView<'a>,
}

/// Rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeView<'a> {
    /// No areas are loaded; show the "no areas yet" affordance.
    Empty,
    Areas(Vec<AreaNode<'a>>),
}

/// Project explorer controller.
pub struct ProjectExplorer<G: HierarchyGateway> {
    gateway: G,
    areas: Vec<Area>,
    folders: Vec<Folder>,
    expanded: HashSet<ResourceName>,
    area_dialog: AreaDialog,
    folder_dialog: FolderDialog,
    lifecycle: CancellationToken,
    notices: Vec<Notice>,
}

impl<G: HierarchyGateway> ProjectExplorer<G> {
    /// Creates an unmounted explorer.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            areas: Vec::new(),
            folders: Vec::new(),
            expanded: HashSet::new(),
            area_dialog: AreaDialog::new(),
            folder_dialog: FolderDialog::new(),
            lifecycle: CancellationToken::new(),
            notices: Vec::new(),
        }
    }

    /// Loads areas, then folders.
    pub fn mount(&mut self) {
        self.refresh_areas();
        self.refresh_folders();
        info!(
            "event=explorer_mount module=explorer status=ok areas={} folders={}",
            self.areas.len(),
            self.folders.len()
        );
    }

    /// Re-fetches the area snapshot. Returns `false` when nothing was applied.
    pub fn refresh_areas(&mut self) -> bool {
        let gateway = &self.gateway;
        let Some(listing) =
            fetch_snapshot("areas", &self.lifecycle, |cancel| gateway.list_areas(cancel))
        else {
            return false;
        };
        self.areas = listing.items;
        if let Some(warning) = listing.warning {
            self.notices.push(Notice::warning(warning));
        }
        true
    }

    /// Re-fetches the folder snapshot. Returns `false` when nothing was applied.
    pub fn refresh_folders(&mut self) -> bool {
        let gateway = &self.gateway;
        let Some(listing) =
            fetch_snapshot("folders", &self.lifecycle, |cancel| gateway.list_folders(cancel))
        else {
            return false;
        };
        self.folders = listing.items;
        if let Some(warning) = listing.warning {
            self.notices.push(Notice::warning(warning));
        }
        true
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Flips the expansion of one area.
    pub fn toggle_area(&mut self, area_name: &str) {
        if !self.expanded.remove(area_name) {
            self.expanded.insert(area_name.to_string());
        }
    }

    pub fn is_expanded(&self, area_name: &str) -> bool {
        self.expanded.contains(area_name)
    }

    /// Folders owned by `area_name`, in snapshot order.
    pub fn folders_for_area(&self, area_name: &str) -> Vec<&Folder> {
        self.folders
            .iter()
            .filter(|folder| folder.belongs_to(area_name))
            .collect()
    }

    /// Builds the render model of the tree.
    pub fn tree(&self) -> TreeView<'_> {
        if self.areas.is_empty() {
            return TreeView::Empty;
        }
        let nodes = self
            .areas
            .iter()
            .map(|area| {
                let expanded = self.is_expanded(&area.name);
                let children = if !expanded {
                    ChildView::Collapsed
                } else {
                    let folders = self.folders_for_area(&area.name);
                    if folders.is_empty() {
                        ChildView::NoFolders
                    } else {
                        ChildView::Folders(folders)
                    }
                };
                AreaNode {
                    area,
                    expanded,
                    children,
                }
            })
            .collect();
        TreeView::Areas(nodes)
    }

    pub fn area_dialog(&self) -> &AreaDialog {
        &self.area_dialog
    }

    pub fn area_dialog_mut(&mut self) -> &mut AreaDialog {
        &mut self.area_dialog
    }

    pub fn folder_dialog(&self) -> &FolderDialog {
        &self.folder_dialog
    }

    pub fn folder_dialog_mut(&mut self) -> &mut FolderDialog {
        &mut self.folder_dialog
    }

    pub fn open_create_area(&mut self) {
        self.area_dialog.open();
    }

    /// Closes the area dialog. Refused while a submit is in flight.
    pub fn close_create_area(&mut self) -> bool {
        self.area_dialog.close()
    }

    /// Opens the folder dialog, preselecting `area_name` when given.
    pub fn open_create_folder(&mut self, area_name: Option<&str>) {
        self.folder_dialog.open(area_name);
    }

    /// Closes the folder dialog and clears its preselected area.
    pub fn close_create_folder(&mut self) -> bool {
        self.folder_dialog.close()
    }

    /// Submits the area dialog and re-fetches areas on success.
    pub fn submit_create_area(&mut self) -> SubmitOutcome {
        let gateway = &self.gateway;
        let lifecycle = &self.lifecycle;
        let outcome = self
            .area_dialog
            .submit(|draft| gateway.create_area(draft, lifecycle));
        if self.discards("area") {
            return outcome;
        }

        match &outcome {
            SubmitOutcome::Created => {
                self.refresh_areas();
                self.notices.push(Notice::success("Area created successfully"));
            }
            SubmitOutcome::Rejected(err) => {
                self.notices.push(Notice::error(rejection_message("Area", err)));
            }
            SubmitOutcome::Failed(_) => {
                self.notices.push(Notice::error("Failed to create area"));
            }
        }
        outcome
    }

    /// Submits the folder dialog and re-fetches folders on success.
    pub fn submit_create_folder(&mut self) -> SubmitOutcome {
        let gateway = &self.gateway;
        let lifecycle = &self.lifecycle;
        let outcome = self
            .folder_dialog
            .submit(&self.areas, |draft| gateway.create_folder(draft, lifecycle));
        if self.discards("folder") {
            return outcome;
        }

        match &outcome {
            SubmitOutcome::Created => {
                self.refresh_folders();
                self.notices.push(Notice::success("Folder created successfully"));
            }
            SubmitOutcome::Rejected(err) => {
                self.notices.push(Notice::error(rejection_message("Folder", err)));
            }
            SubmitOutcome::Failed(_) => {
                self.notices.push(Notice::error("Failed to create folder"));
            }
        }
        outcome
    }

    /// Returns a handle that disposes this explorer when cancelled.
    pub fn lifecycle_token(&self) -> CancellationToken {
        self.lifecycle.clone()
    }

    /// Marks the explorer as disposed; in-flight results are discarded.
    pub fn dispose(&self) {
        debug!("event=explorer_dispose module=explorer status=ok");
        self.lifecycle.cancel();
    }

    /// Drains queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn discards(&self, entity: &str) -> bool {
        if !self.lifecycle.is_cancelled() {
            return false;
        }
        debug!("event=create_discarded module=explorer status=skipped entity={entity}");
        true
    }
}

fn rejection_message(entity: &str, err: &DialogError) -> String {
    match err {
        DialogError::MissingDisplayName => format!("{entity} name is required"),
        DialogError::MissingArea | DialogError::UnknownArea(_) => {
            "Please select an area".to_string()
        }
        DialogError::Busy => format!("{entity} creation already in progress"),
        DialogError::InvalidUid(uid) => format!("Invalid {} id: {uid}", entity.to_lowercase()),
    }
}
