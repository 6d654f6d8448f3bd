//! Per-holder cache of row descriptors.
//!
//! Entries are keyed by holder identity and validated against the holder's
//! revision, which every row mutation bumps. A stale entry is rebuilt on the
//! next lookup.

use rustc_hash::FxHashMap;

use crate::base::ElementId;
use crate::model::CodeHolder;

use super::builders::describe_all;
use super::descriptor::RowDescriptor;

struct CacheEntry {
    revision: u64,
    descriptors: Vec<RowDescriptor>,
}

#[derive(Default)]
pub struct DescriptorCache {
    entries: FxHashMap<ElementId, CacheEntry>,
    rebuilds: usize,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptors of every row of `holder`, rebuilt when the holder changed
    pub fn descriptors(&mut self, holder: &CodeHolder) -> &[RowDescriptor] {
        let revision = holder.revision();
        let stale = self
            .entries
            .get(&holder.id())
            .is_none_or(|entry| entry.revision != revision);
        if stale {
            tracing::trace!(holder = holder.name(), revision, "rebuilding row descriptors");
            self.rebuilds += 1;
            self.entries.insert(
                holder.id(),
                CacheEntry {
                    revision,
                    descriptors: describe_all(holder.rows()),
                },
            );
        }
        self.entries
            .get(&holder.id())
            .map(|entry| entry.descriptors.as_slice())
            .unwrap_or_default()
    }

    pub fn descriptor(&mut self, holder: &CodeHolder, row: usize) -> Option<&RowDescriptor> {
        self.descriptors(holder).get(row)
    }

    pub fn invalidate(&mut self, holder: ElementId) {
        self.entries.remove(&holder);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of times descriptors were built
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}
