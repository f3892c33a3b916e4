// ── Session Store ──────────────────────────────────────────────────────────
// File-backed JSON documents at `<sessions_dir>/<model>-<session_id>.json`,
// capped to the last `SESSION_MAX_TURNS` turns (a ring buffer, oldest
// turns dropped first). Grounded in *shape* only on
// `examples/elisplash-paw/src-tauri/src/engine/sessions.rs::SessionStore`
// (a store struct wrapping synchronized access, an `open()`-style
// constructor) — that teacher file is SQLite-backed via `rusqlite`; the
// on-disk representation here is written fresh as JSON via `serde_json` +
// `std::fs` since sessions here are plain files, not a database.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::atoms::constants::SESSION_MAX_TURNS;
use crate::atoms::error::EngineResult;
use crate::atoms::types::{SessionDocument, SessionTurn};

pub struct SessionStore {
    dir: PathBuf,
    /// Guards filesystem access so concurrent requests against the same
    /// session don't interleave reads and writes.
    lock: Mutex<()>,
}

impl SessionStore {
    pub fn open(dir: impl Into<PathBuf>) -> EngineResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, lock: Mutex::new(()) })
    }

    fn path_for(&self, model: &str, session_id: &str) -> PathBuf {
        let safe_model = sanitize(model);
        let safe_session = sanitize(session_id);
        self.dir.join(format!("{safe_model}-{safe_session}.json"))
    }

    pub fn load(&self, model: &str, session_id: &str) -> EngineResult<SessionDocument> {
        let _guard = self.lock.lock();
        let path = self.path_for(model, session_id);
        read_document(&path)
    }

    /// Append `turns` (typically the user message and the assistant's
    /// reply), truncating to the most recent `SESSION_MAX_TURNS` turns.
    pub fn append(&self, model: &str, session_id: &str, turns: &[SessionTurn]) -> EngineResult<()> {
        let _guard = self.lock.lock();
        let path = self.path_for(model, session_id);
        let mut doc = read_document(&path)?;
        doc.history.extend_from_slice(turns);
        if doc.history.len() > SESSION_MAX_TURNS {
            let excess = doc.history.len() - SESSION_MAX_TURNS;
            doc.history.drain(0..excess);
        }
        let json = serde_json::to_string_pretty(&doc)?;
        std::fs::write(&path, json)?;
        Ok(())
    }
}

fn read_document(path: &Path) -> EngineResult<SessionDocument> {
    if !path.exists() {
        return Ok(SessionDocument::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw).unwrap_or_default())
}

/// Keep session/model identifiers from escaping the sessions directory via
/// path separators.
fn sanitize(s: &str) -> String {
    s.chars().map(|c| if c.is_alphanumeric() || c == '_' || c == '.' { c } else { '_' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: &str, content: &str) -> SessionTurn {
        SessionTurn { role: role.to_string(), content: content.to_string() }
    }

    #[test]
    fn new_session_loads_empty() {
        let tmp = tempdir();
        let store = SessionStore::open(&tmp).unwrap();
        let doc = store.load("gpt-4o", "abc").unwrap();
        assert!(doc.history.is_empty());
    }

    #[test]
    fn append_persists_across_loads() {
        let tmp = tempdir();
        let store = SessionStore::open(&tmp).unwrap();
        store.append("gpt-4o", "abc", &[turn("user", "hi"), turn("assistant", "hello")]).unwrap();
        let doc = store.load("gpt-4o", "abc").unwrap();
        assert_eq!(doc.history.len(), 2);
        assert_eq!(doc.history[0].content, "hi");
    }

    #[test]
    fn history_is_capped_at_max_turns() {
        let tmp = tempdir();
        let store = SessionStore::open(&tmp).unwrap();
        for i in 0..(SESSION_MAX_TURNS + 10) {
            store.append("gpt-4o", "abc", &[turn("user", &format!("turn {i}"))]).unwrap();
        }
        let doc = store.load("gpt-4o", "abc").unwrap();
        assert_eq!(doc.history.len(), SESSION_MAX_TURNS);
        assert_eq!(doc.history.last().unwrap().content, format!("turn {}", SESSION_MAX_TURNS + 9));
    }

    #[test]
    fn distinct_models_keep_distinct_sessions() {
        let tmp = tempdir();
        let store = SessionStore::open(&tmp).unwrap();
        store.append("gpt-4o", "abc", &[turn("user", "for gpt")]).unwrap();
        store.append("sonnet", "abc", &[turn("user", "for sonnet")]).unwrap();
        let a = store.load("gpt-4o", "abc").unwrap();
        let b = store.load("sonnet", "abc").unwrap();
        assert_eq!(a.history[0].content, "for gpt");
        assert_eq!(b.history[0].content, "for sonnet");
    }

    #[test]
    fn session_id_is_sanitized_against_traversal() {
        let tmp = tempdir();
        let store = SessionStore::open(&tmp).unwrap();
        store.append("gpt-4o", "../../etc/passwd", &[turn("user", "x")]).unwrap();
        let path = store.path_for("gpt-4o", "../../etc/passwd");
        assert!(path.starts_with(&tmp));
    }

    fn tempdir() -> PathBuf {
        let mut p = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("gateway-session-test-{nanos}"));
        p
    }
}
