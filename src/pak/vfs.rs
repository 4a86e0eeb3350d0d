#![forbid(unsafe_code)]

//! Virtual filesystem overlay.
//!
//! Mounts any number of archives into one logical namespace. Overlapping
//! names are resolved by [`SearchOrder`]; by default the most recently
//! mounted archive wins, which is what makes mount-order patching work:
//! mount the base archive first, then patch archives on top.
//!
//! Successful opens can be cached as decompressed bytes per virtual path.
//! The cache is unbounded; callers manage memory with [`Vfs::enable_cache`]
//! and [`Vfs::clear_cache`].

use std::collections::HashMap;
use std::path::Path;

use crate::pak::archive::{Archive, BackingMode};
use crate::pak::error::VfsError;
use crate::pak::stream::PakStream;

/// Which mount serves an overlapping name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    /// First mounted archive wins.
    MountOrder,
    /// Most recently mounted archive wins.
    #[default]
    ReverseMountOrder,
}

pub struct Vfs {
    archives: Vec<Archive>,
    cache_enabled: bool,
    search_order: SearchOrder,
    cache: HashMap<String, Vec<u8>>,
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Vfs {
    pub fn new() -> Self {
        Vfs {
            archives: Vec::new(),
            cache_enabled: true,
            search_order: SearchOrder::default(),
            cache: HashMap::new(),
        }
    }

    /// Mount an archive. Mounts are ordered and never removed; the `i`-th
    /// mounted archive stays at position `i`.
    pub fn mount(&mut self, path: impl AsRef<Path>, mode: BackingMode) -> Result<(), VfsError> {
        let archive = Archive::new(path, mode)?;
        self.archives.push(archive);
        Ok(())
    }

    pub fn mount_count(&self) -> usize {
        self.archives.len()
    }

    /// Resolve a virtual path and return its decompressed bytes as a stream.
    ///
    /// The first archive (in search order) whose directory lists the name
    /// is authoritative: its failure propagates rather than falling through
    /// to lower-precedence mounts.
    pub fn open(&mut self, name: &str) -> Result<PakStream, VfsError> {
        if self.cache_enabled {
            if let Some(bytes) = self.cache.get(name) {
                return Ok(PakStream::new(bytes.clone()));
            }
        }

        let archive = match self.search_order {
            SearchOrder::ReverseMountOrder => {
                self.archives.iter_mut().rev().find(|a| a.contains(name))
            }
            SearchOrder::MountOrder => self.archives.iter_mut().find(|a| a.contains(name)),
        };

        let Some(archive) = archive else {
            return Err(VfsError::FileNotFound(name.to_owned()));
        };

        let stream = archive.open(name)?;

        if self.cache_enabled {
            self.cache.insert(name.to_owned(), stream.as_bytes().to_vec());
        }

        Ok(stream)
    }

    pub fn contains(&self, name: &str) -> bool {
        if self.cache_enabled && self.cache.contains_key(name) {
            return true;
        }
        self.archives.iter().any(|a| a.contains(name))
    }

    /// Union of all mounted archives' listings, sorted and deduplicated.
    pub fn list_files(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .archives
            .iter()
            .flat_map(|a| a.list_files())
            .collect();
        all.sort();
        all.dedup();
        all
    }

    pub fn enable_cache(&mut self, enable: bool) {
        self.cache_enabled = enable;
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn set_search_order(&mut self, order: SearchOrder) {
        self.search_order = order;
    }

    pub fn get_search_order(&self) -> SearchOrder {
        self.search_order
    }
}
