//! Area/folder selection state machine.
//!
//! # Responsibility
//! - Keep one `(area, folder)` pair consistent against the loaded snapshot.
//! - Report every selection change to the owning context.
//!
//! # Invariants
//! - `folder.is_some()` implies the folder's area equals the selected area.
//! - Changing the area always clears the folder.
//! - Selecting a folder missing from the snapshot (or whose area is not
//!   loaded) is a no-op.
//! - Folders are only offered for an area present in the loaded area set.

use crate::controller::fetch_snapshot;
use crate::controller::notice::Notice;
use crate::gateway::HierarchyGateway;
use crate::model::area::Area;
use crate::model::folder::Folder;
use crate::model::ResourceName;
use log::debug;
use tokio_util::sync::CancellationToken;

/// Change reported to the owning context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    AreaChanged(Option<ResourceName>),
    FolderChanged(Option<ResourceName>),
}

/// One `(area, folder)` selection pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    area: Option<ResourceName>,
    folder: Option<ResourceName>,
}

impl Selection {
    /// Creates a selection from external state.
    ///
    /// The pair is not checked here. `FolderSelector::mount` reconciles it
    /// against the loaded snapshot.
    pub fn new(area: Option<ResourceName>, folder: Option<ResourceName>) -> Self {
        Self { area, folder }
    }

    pub fn area(&self) -> Option<&str> {
        self.area.as_deref()
    }

    pub fn folder(&self) -> Option<&str> {
        self.folder.as_deref()
    }

    /// Selects an area (or none) and clears the folder.
    pub fn select_area(&mut self, area: Option<&str>) -> Vec<SelectionEvent> {
        self.area = area.map(str::to_string);
        self.folder = None;
        vec![
            SelectionEvent::AreaChanged(self.area.clone()),
            SelectionEvent::FolderChanged(None),
        ]
    }

    /// Selects a folder (or none).
    ///
    /// A known folder drives the area selection. Returns no events when the
    /// selection was left unchanged because the folder is not selectable.
    pub fn select_folder(
        &mut self,
        folder: Option<&str>,
        folders: &[Folder],
        areas: &[Area],
    ) -> Vec<SelectionEvent> {
        let Some(folder_name) = folder else {
            self.folder = None;
            return vec![SelectionEvent::FolderChanged(None)];
        };

        let Some(found) = folders.iter().find(|candidate| candidate.name == folder_name) else {
            debug!("event=select_folder module=selector status=ignored reason=unknown_folder");
            return Vec::new();
        };
        if !areas.iter().any(|area| area.name == found.area) {
            debug!("event=select_folder module=selector status=ignored reason=unknown_area");
            return Vec::new();
        }

        self.folder = Some(found.name.clone());
        self.area = Some(found.area.clone());
        vec![
            SelectionEvent::FolderChanged(self.folder.clone()),
            SelectionEvent::AreaChanged(self.area.clone()),
        ]
    }

    /// Repairs a pair taken from external state against a loaded snapshot.
    ///
    /// A selectable folder with no area fills the area in. A folder that is
    /// unknown, belongs to an unloaded area, or disagrees with the selected
    /// area is cleared.
    pub fn reconcile(&mut self, folders: &[Folder], areas: &[Area]) -> Vec<SelectionEvent> {
        let Some(folder_name) = self.folder.as_deref() else {
            return Vec::new();
        };
        let selectable = folders
            .iter()
            .find(|candidate| candidate.name == folder_name)
            .filter(|found| areas.iter().any(|area| area.name == found.area));

        match (selectable, self.area.clone()) {
            (Some(found), Some(area)) if found.belongs_to(&area) => Vec::new(),
            (Some(found), None) => {
                self.area = Some(found.area.clone());
                vec![SelectionEvent::AreaChanged(self.area.clone())]
            }
            _ => {
                debug!("event=reconcile module=selector status=cleared reason=inconsistent_folder");
                self.folder = None;
                vec![SelectionEvent::FolderChanged(None)]
            }
        }
    }

    /// Returns whether the pair satisfies the folder/area invariant.
    pub fn is_consistent(&self, folders: &[Folder]) -> bool {
        match (&self.area, &self.folder) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(area), Some(folder)) => folders
                .iter()
                .any(|candidate| &candidate.name == folder && &candidate.area == area),
        }
    }
}

/// Returns folders belonging to `area`, in snapshot order.
///
/// No area, or an area missing from `areas`, means no folder options.
pub fn folders_in_area<'a>(
    folders: &'a [Folder],
    areas: &[Area],
    area: Option<&str>,
) -> Vec<&'a Folder> {
    match area {
        Some(area) if is_loaded(areas, area) => {
            folders.iter().filter(|folder| folder.belongs_to(area)).collect()
        }
        _ => Vec::new(),
    }
}

fn is_loaded(areas: &[Area], name: &str) -> bool {
    areas.iter().any(|area| area.name == name)
}

type SelectionListener = Box<dyn FnMut(&SelectionEvent)>;

/// Area + folder picker controller with its own snapshot.
pub struct FolderSelector<G: HierarchyGateway> {
    gateway: G,
    areas: Vec<Area>,
    folders: Vec<Folder>,
    selection: Selection,
    lifecycle: CancellationToken,
    listener: Option<SelectionListener>,
    notices: Vec<Notice>,
}

impl<G: HierarchyGateway> FolderSelector<G> {
    /// Creates an unmounted selector initialized from external state.
    pub fn new(gateway: G, initial: Selection) -> Self {
        Self {
            gateway,
            areas: Vec::new(),
            folders: Vec::new(),
            selection: initial,
            lifecycle: CancellationToken::new(),
            listener: None,
            notices: Vec::new(),
        }
    }

    /// Registers the callback receiving every selection change.
    pub fn with_listener(mut self, listener: impl FnMut(&SelectionEvent) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Loads both snapshots, then reconciles the initial selection.
    ///
    /// Reconciling is skipped when either listing failed, so a transient
    /// outage does not drop the caller's folder.
    pub fn mount(&mut self) {
        let areas = self.load_areas();
        let folders = self.load_folders();
        if areas == Some(true) && folders == Some(true) {
            let events = self.selection.reconcile(&self.folders, &self.areas);
            self.emit(&events);
        }
    }

    /// Re-fetches the area snapshot. Returns `false` when nothing was applied.
    pub fn refresh_areas(&mut self) -> bool {
        self.load_areas().is_some()
    }

    /// Re-fetches the folder snapshot. Returns `false` when nothing was applied.
    pub fn refresh_folders(&mut self) -> bool {
        self.load_folders().is_some()
    }

    /// `None` when discarded, otherwise whether the listing succeeded.
    fn load_areas(&mut self) -> Option<bool> {
        let gateway = &self.gateway;
        let listing =
            fetch_snapshot("areas", &self.lifecycle, |cancel| gateway.list_areas(cancel))?;
        self.areas = listing.items;
        Some(self.queue_warning(listing.warning))
    }

    fn load_folders(&mut self) -> Option<bool> {
        let gateway = &self.gateway;
        let listing =
            fetch_snapshot("folders", &self.lifecycle, |cancel| gateway.list_folders(cancel))?;
        self.folders = listing.items;
        Some(self.queue_warning(listing.warning))
    }

    fn queue_warning(&mut self, warning: Option<String>) -> bool {
        match warning {
            Some(warning) => {
                self.notices.push(Notice::warning(warning));
                false
            }
            None => true,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Areas offered by the area picker.
    pub fn area_options(&self) -> &[Area] {
        &self.areas
    }

    /// Folders offered by the folder picker for the current area.
    pub fn folder_options(&self) -> Vec<&Folder> {
        folders_in_area(&self.folders, &self.areas, self.selection.area())
    }

    /// The folder picker is only offered once a loaded area is selected.
    pub fn shows_folder_picker(&self) -> bool {
        self.selection
            .area()
            .is_some_and(|area| is_loaded(&self.areas, area))
    }

    /// Selects an area (or none), clearing the folder.
    ///
    /// Returns `false` and leaves the selection unchanged when `area` is not
    /// in the loaded area set.
    pub fn select_area(&mut self, area: Option<&str>) -> bool {
        if let Some(name) = area {
            if !is_loaded(&self.areas, name) {
                debug!("event=select_area module=selector status=ignored reason=unknown_area");
                return false;
            }
        }
        let events = self.selection.select_area(area);
        self.emit(&events);
        true
    }

    /// Selects a folder (or none). Returns `false` when the call was a no-op.
    pub fn select_folder(&mut self, folder: Option<&str>) -> bool {
        let events = self
            .selection
            .select_folder(folder, &self.folders, &self.areas);
        self.emit(&events);
        !events.is_empty()
    }

    /// Returns a handle that disposes this selector when cancelled.
    pub fn lifecycle_token(&self) -> CancellationToken {
        self.lifecycle.clone()
    }

    /// Marks the selector as disposed; in-flight results are discarded.
    pub fn dispose(&self) {
        self.lifecycle.cancel();
    }

    /// Drains queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn emit(&mut self, events: &[SelectionEvent]) {
        if let Some(listener) = self.listener.as_mut() {
            for event in events {
                listener(event);
            }
        }
    }
}
