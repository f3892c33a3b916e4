// ── Memory Store ───────────────────────────────────────────────────────────
// A single shared `MemoryBlock` preamble, persisted as a JSON file and
// guarded by an `RwLock` so many concurrent requests can read it while an
// occasional `PUT /api/memory` call replaces it wholesale. This is
// deliberately much simpler than the teacher's semantic/embedding-backed
// `engine/memory.rs` (Ollama-driven vector recall) — the gateway's
// `MemoryBlock` is a flat preamble string, not a retrieval index, so only
// the "persist to disk, load on startup" idiom is carried over, grounded
// on `EngineState::new`'s disk-or-default loading pattern.

use std::path::PathBuf;

use parking_lot::RwLock;

use crate::atoms::error::EngineResult;
use crate::atoms::types::MemoryBlock;

pub struct MemoryStore {
    path: PathBuf,
    block: RwLock<MemoryBlock>,
}

impl MemoryStore {
    pub fn open(path: impl Into<PathBuf>) -> EngineResult<Self> {
        let path = path.into();
        let block = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw).unwrap_or_default()
        } else {
            MemoryBlock::default()
        };
        Ok(Self { path, block: RwLock::new(block) })
    }

    pub fn get(&self) -> MemoryBlock {
        self.block.read().clone()
    }

    pub fn set(&self, block: MemoryBlock) -> EngineResult<()> {
        let json = serde_json::to_string_pretty(&block)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)?;
        *self.block.write() = block;
        Ok(())
    }

    pub fn is_set(&self) -> bool {
        !self.block.read().content.is_empty()
    }
}
