//! Application state a dashboard front end holds between interactions.

use crate::align::{AlignConfig, Aligner, Alignment};
use crate::boundary::BoundaryCollection;
use crate::common::Source;
use crate::demographic::DemographicTable;
use crate::error::Result;
use crate::kidsroom::{KidsroomEntry, KidsroomPatch, KidsroomStore};

/// Joined districts plus the kidsroom working copy and the fingerprint it was read at.
#[derive(Debug, Clone)]
pub struct AppState {
    pub alignment: Alignment,
    pub kidsrooms: Vec<KidsroomEntry>,
    store: KidsroomStore,
    fingerprint: Option<String>,
}

impl AppState {
    /// Run the pipeline over both sources and read the kidsroom store.
    pub fn load(config: AlignConfig, demographics: &Source, boundaries: &Source, store: KidsroomStore) -> Result<Self> {
        let table = DemographicTable::load(demographics)?;
        let collection = BoundaryCollection::load(boundaries)?;
        let alignment = Aligner::new(config).align(&collection, &table)?;
        Ok(Self::with_alignment(alignment, store))
    }

    pub fn with_alignment(alignment: Alignment, store: KidsroomStore) -> Self {
        let fingerprint = store.content_fingerprint();
        let kidsrooms = store.load();
        Self { alignment, kidsrooms, store, fingerprint }
    }

    pub fn store(&self) -> &KidsroomStore { &self.store }

    /// True when the file changed since the working copy was read or written.
    pub fn is_stale(&self) -> bool {
        self.store.content_fingerprint() != self.fingerprint
    }

    /// Reload the working copy if another writer touched the file. Returns whether it reloaded.
    pub fn refresh_if_stale(&mut self) -> bool {
        if !self.is_stale() {
            return false;
        }
        log::info!("[state] {} changed on disk, reloading", self.store.path().display());
        self.fingerprint = self.store.content_fingerprint();
        self.kidsrooms = self.store.load();
        true
    }

    /// Refresh, append and persist. On error the working copy and the fingerprint still
    /// match what is on disk.
    pub fn add_kidsroom(&mut self, entry: KidsroomEntry) -> Result<()> {
        self.refresh_if_stale();
        self.store.add(&mut self.kidsrooms, entry)?;
        self.fingerprint = self.store.content_fingerprint();
        Ok(())
    }

    pub fn remove_kidsroom(&mut self, index: usize) -> Result<KidsroomEntry> {
        self.refresh_if_stale();
        let removed = self.store.remove(&mut self.kidsrooms, index)?;
        self.fingerprint = self.store.content_fingerprint();
        Ok(removed)
    }

    pub fn update_kidsroom(&mut self, index: usize, patch: &KidsroomPatch) -> Result<()> {
        self.refresh_if_stale();
        self.store.update(&mut self.kidsrooms, index, patch)?;
        self.fingerprint = self.store.content_fingerprint();
        Ok(())
    }
}
