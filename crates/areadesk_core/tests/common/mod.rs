#![allow(dead_code)]

use areadesk_core::{
    Area, CancellationToken, Folder, GatewayError, GatewayResult, HierarchyGateway,
    InMemoryGateway, NewArea, NewFolder,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn area(name: &str, display_name: &str) -> Area {
    Area {
        name: name.to_string(),
        uid: name.rsplit('/').next().unwrap_or(name).to_string(),
        display_name: display_name.to_string(),
        description: String::new(),
        create_time: None,
        update_time: None,
        parent: None,
    }
}

pub fn folder(name: &str, display_name: &str, area: &str) -> Folder {
    Folder {
        name: name.to_string(),
        uid: name.rsplit('/').next().unwrap_or(name).to_string(),
        display_name: display_name.to_string(),
        description: String::new(),
        area: area.to_string(),
        parent: None,
        create_time: None,
        update_time: None,
    }
}

/// In-memory gateway with call counters and failure injection.
#[derive(Default)]
pub struct RecordingGateway {
    inner: InMemoryGateway,
    pub list_area_calls: AtomicUsize,
    pub list_folder_calls: AtomicUsize,
    pub create_area_calls: AtomicUsize,
    pub create_folder_calls: AtomicUsize,
    fail_lists: AtomicBool,
    fail_creates: AtomicBool,
    dispose_on_list: Mutex<Option<CancellationToken>>,
    dispose_on_create: Mutex<Option<CancellationToken>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(areas: Vec<Area>, folders: Vec<Folder>) -> Self {
        Self {
            inner: InMemoryGateway::with_entities(areas, folders),
            ..Self::default()
        }
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Cancels `token` while the next list call is in flight, then answers
    /// that call successfully, as a response arriving after disposal would.
    pub fn dispose_during_next_list(&self, token: CancellationToken) {
        *self.dispose_on_list.lock().unwrap() = Some(token);
    }

    /// Cancels `token` while the next create call is in flight, then lets
    /// that call succeed.
    pub fn dispose_during_next_create(&self, token: CancellationToken) {
        *self.dispose_on_create.lock().unwrap() = Some(token);
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn list_with<T>(
        &self,
        counter: &AtomicUsize,
        cancel: &CancellationToken,
        list: impl FnOnce(&CancellationToken) -> GatewayResult<Vec<T>>,
    ) -> GatewayResult<Vec<T>> {
        counter.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(GatewayError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        let result = list(cancel);
        if let Some(token) = self.dispose_on_list.lock().unwrap().take() {
            token.cancel();
        }
        result
    }

    fn create_with(
        &self,
        counter: &AtomicUsize,
        create: impl FnOnce() -> GatewayResult<()>,
    ) -> GatewayResult<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("connection refused".to_string()));
        }
        let result = create();
        if let Some(token) = self.dispose_on_create.lock().unwrap().take() {
            token.cancel();
        }
        result
    }
}

impl HierarchyGateway for RecordingGateway {
    fn list_areas(&self, cancel: &CancellationToken) -> GatewayResult<Vec<Area>> {
        self.list_with(&self.list_area_calls, cancel, |cancel| {
            self.inner.list_areas(cancel)
        })
    }

    fn list_folders(&self, cancel: &CancellationToken) -> GatewayResult<Vec<Folder>> {
        self.list_with(&self.list_folder_calls, cancel, |cancel| {
            self.inner.list_folders(cancel)
        })
    }

    fn create_area(&self, area: &NewArea, cancel: &CancellationToken) -> GatewayResult<()> {
        self.create_with(&self.create_area_calls, || {
            self.inner.create_area(area, cancel)
        })
    }

    fn create_folder(
        &self,
        folder: &NewFolder,
        cancel: &CancellationToken,
    ) -> GatewayResult<()> {
        self.create_with(&self.create_folder_calls, || {
            self.inner.create_folder(folder, cancel)
        })
    }
}
