//! Shared clip-set cache

use crate::clip::AnimationSet;
use crate::loader::load_clips_from_file;
use skirmish_core::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Loads each clip file once; players of the same file share one set.
#[derive(Debug, Default)]
pub struct ClipLibrary {
    sets: HashMap<PathBuf, Arc<AnimationSet>>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached set for `path`, loading it on first request
    pub fn load(&mut self, path: &Path) -> Result<Arc<AnimationSet>> {
        if let Some(set) = self.sets.get(path) {
            return Ok(Arc::clone(set));
        }
        let set = Arc::new(load_clips_from_file(path)?);
        tracing::info!(path = %path.display(), clips = set.len(), "loaded animation clips");
        self.sets.insert(path.to_path_buf(), Arc::clone(&set));
        Ok(set)
    }

    /// Register an in-memory set under a key
    pub fn insert(&mut self, key: impl Into<PathBuf>, set: AnimationSet) -> Arc<AnimationSet> {
        let set = Arc::new(set);
        self.sets.insert(key.into(), Arc::clone(&set));
        set
    }

    pub fn get(&self, key: &Path) -> Option<Arc<AnimationSet>> {
        self.sets.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
