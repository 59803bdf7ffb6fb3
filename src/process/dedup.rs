// src/process/dedup.rs
//! Global duplicate suppression by normalized-content hash. The hash ignores
//! case, punctuation, and whitespace variations, so "Build it!" and
//! "build  it" collapse to the same identity regardless of source.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Fingerprint of a text after hash normalization: lowercase, punctuation
/// stripped, whitespace collapsed, then SHA-256 (first 8 bytes, hex).
pub fn content_hash(text: &str) -> String {
    let norm = normalize_for_hash(text);
    let mut hasher = Sha256::new();
    hasher.update(norm.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(16);
    for b in digest.iter().take(8) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// The canonical text the hash is computed over.
pub fn normalize_for_hash(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    out.trim_end().to_string()
}

/// Optional cross-run memory of seen hashes. The pipeline only talks to this
/// trait; whether anything persists is the caller's choice.
pub trait HashStore {
    fn contains(&self, hash: &str) -> bool;
    fn insert(&mut self, hash: &str);
    fn persist(&self) -> Result<()>;
}

/// Hash store backed by a JSON array on disk.
#[derive(Debug)]
pub struct FileHashStore {
    path: PathBuf,
    hashes: HashSet<String>,
}

impl FileHashStore {
    /// Open an existing store or start an empty one if the file is absent.
    pub fn open(path: &Path) -> Result<Self> {
        let hashes = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading hash store {}", path.display()))?;
            let list: Vec<String> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing hash store {}", path.display()))?;
            list.into_iter().collect()
        } else {
            HashSet::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            hashes,
        })
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

impl HashStore for FileHashStore {
    fn contains(&self, hash: &str) -> bool {
        self.hashes.contains(hash)
    }

    fn insert(&mut self, hash: &str) {
        self.hashes.insert(hash.to_string());
    }

    fn persist(&self) -> Result<()> {
        let mut list: Vec<&String> = self.hashes.iter().collect();
        list.sort();
        let raw = serde_json::to_string_pretty(&list)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("writing hash store {}", self.path.display()))?;
        Ok(())
    }
}

/// First occurrence of a hash wins; later occurrences are dropped. Candidates
/// must be offered in fetch order so "first" is reproducible.
#[derive(Default)]
pub struct Deduplicator<'a> {
    seen: HashSet<String>,
    store: Option<&'a mut dyn HashStore>,
}

impl<'a> Deduplicator<'a> {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            store: None,
        }
    }

    pub fn with_store(store: &'a mut dyn HashStore) -> Self {
        Self {
            seen: HashSet::new(),
            store: Some(store),
        }
    }

    /// True when the hash has not been seen in this run nor in the store.
    /// A first occurrence is recorded in both.
    pub fn is_first(&mut self, hash: &str) -> bool {
        if self.seen.contains(hash) {
            return false;
        }
        if let Some(store) = self.store.as_deref_mut() {
            if store.contains(hash) {
                // remember locally too so repeats stay cheap
                self.seen.insert(hash.to_string());
                return false;
            }
            store.insert(hash);
        }
        self.seen.insert(hash.to_string())
    }
}
