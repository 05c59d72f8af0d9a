//! Sequence number allocation
//!
//! New files of a role get the highest existing number of that role plus
//! one. Gaps are never reused: with `p01, p02, p05` on disk the next plan is
//! `p06`. Allocation is not safe under concurrent writers to the same
//! directory.

use crate::config::NumberingPolicy;
use crate::error::EditError;
use parking_lot::Mutex;
use ras_model::{FileRole, RasExtension};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Source of existing sequence numbers
///
/// Implement this to stub directory contents in tests or to allocate
/// against something other than the local filesystem.
pub trait SequenceAllocator {
    /// Existing numbers of `role`, ascending
    ///
    /// # Errors
    /// Returns error if the backing store cannot be listed
    fn existing(&self, role: FileRole) -> Result<Vec<u32>, EditError>;

    /// Record that `extension` is now taken
    ///
    /// Allocators that re-read their store on every call can ignore this.
    fn claim(&self, _extension: RasExtension) {}

    /// Directory this allocator lists, if it is backed by one
    ///
    /// Derived files must be written there for their numbers to hold.
    fn directory(&self) -> Option<&Path> {
        None
    }

    /// Highest existing number of `role`
    ///
    /// # Errors
    /// Propagates listing errors
    fn highest(&self, role: FileRole) -> Result<Option<u32>, EditError> {
        Ok(self.existing(role)?.into_iter().max())
    }

    /// Whether a file with `extension` exists
    ///
    /// # Errors
    /// Propagates listing errors
    fn contains(&self, extension: RasExtension) -> Result<bool, EditError> {
        Ok(self.existing(extension.role())?.contains(&extension.number()))
    }

    /// Next free extension of `role`
    ///
    /// # Errors
    /// - [`EditError::SequenceExhausted`] if the next number exceeds the policy
    /// - listing errors
    fn next(&self, role: FileRole, policy: &NumberingPolicy) -> Result<RasExtension, EditError> {
        let max = policy.max_number();
        let next = match self.highest(role)? {
            Some(highest) => highest.checked_add(1),
            None => Some(1),
        };
        match next {
            Some(number) if number <= max => Ok(RasExtension::new(role, number)),
            _ => Err(EditError::SequenceExhausted { role, max }),
        }
    }
}

impl<A: SequenceAllocator + ?Sized> SequenceAllocator for &A {
    fn existing(&self, role: FileRole) -> Result<Vec<u32>, EditError> {
        (**self).existing(role)
    }

    fn claim(&self, extension: RasExtension) {
        (**self).claim(extension);
    }

    fn directory(&self) -> Option<&Path> {
        (**self).directory()
    }
}

/// Directory holding `path` (`.` for bare file names)
///
/// # Errors
/// Returns [`EditError::NoParent`] for filesystem roots
pub fn project_dir(path: &Path) -> Result<PathBuf, EditError> {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(parent) => Ok(parent.to_path_buf()),
        None => Err(EditError::NoParent(path.to_path_buf())),
    }
}

/// Whether `a` and `b` name the same directory
///
/// Compares canonical paths when both resolve, the paths as given otherwise.
#[must_use]
pub fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Allocator backed by a real directory listing
///
/// Re-scans on every call, so files written between calls are seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryScanner {
    dir: PathBuf,
}

impl DirectoryScanner {
    /// Scan `dir`
    #[inline]
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Scan the directory holding `path`
    ///
    /// # Errors
    /// Returns [`EditError::NoParent`] for filesystem roots
    pub fn for_file(path: &Path) -> Result<Self, EditError> {
        project_dir(path).map(Self::new)
    }

    /// Scanned directory
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every regular file with a numbered role extension, sorted by path
    ///
    /// # Errors
    /// Returns [`EditError::Io`] if the directory cannot be read
    pub fn files(&self) -> Result<Vec<(PathBuf, RasExtension)>, EditError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| EditError::io(&self.dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| EditError::io(&self.dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Ok(extension) = RasExtension::from_path(&path) {
                files.push((path, extension));
            }
        }
        files.sort();
        Ok(files)
    }
}

impl SequenceAllocator for DirectoryScanner {
    fn directory(&self) -> Option<&Path> {
        Some(&self.dir)
    }

    fn existing(&self, role: FileRole) -> Result<Vec<u32>, EditError> {
        let mut numbers: Vec<u32> = self
            .files()?
            .into_iter()
            .filter(|(_, ext)| ext.role() == role)
            .map(|(_, ext)| ext.number())
            .collect();
        numbers.sort_unstable();
        numbers.dedup();

        tracing::debug!(
            "Scanned {}: {} existing {} file(s)",
            self.dir.display(),
            numbers.len(),
            role
        );
        Ok(numbers)
    }
}

/// In-memory allocator for tests and dry runs
///
/// Claimed extensions are recorded, so consecutive allocations advance.
#[derive(Debug, Default)]
pub struct StaticSequence {
    taken: Mutex<BTreeMap<FileRole, BTreeSet<u32>>>,
}

impl StaticSequence {
    /// Empty sequence
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an extension as existing
    pub fn insert(&self, extension: RasExtension) {
        self.taken
            .lock()
            .entry(extension.role())
            .or_default()
            .insert(extension.number());
    }
}

impl FromIterator<RasExtension> for StaticSequence {
    fn from_iter<I: IntoIterator<Item = RasExtension>>(iter: I) -> Self {
        let sequence = Self::new();
        for extension in iter {
            sequence.insert(extension);
        }
        sequence
    }
}

impl SequenceAllocator for StaticSequence {
    fn existing(&self, role: FileRole) -> Result<Vec<u32>, EditError> {
        Ok(self
            .taken
            .lock()
            .get(&role)
            .map(|numbers| numbers.iter().copied().collect())
            .unwrap_or_default())
    }

    fn claim(&self, extension: RasExtension) {
        self.insert(extension);
    }
}
