// Library root: exposes `atoms`, `engine`, and `handlers` so both
// `main.rs` and the integration tests under `tests/` can reach the engine
// directly, mirroring the bin+lib split in
// `examples/elisplash-paw/src-tauri` (a `lib.rs` alongside `main.rs`-style
// Tauri bootstrap).

pub mod atoms;
pub mod engine;
pub mod handlers;
