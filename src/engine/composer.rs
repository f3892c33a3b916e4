// ── Request Composer ───────────────────────────────────────────────────────
// Assembles the final message list sent upstream: memory preamble, then
// session history, then the client's own messages, in that fixed order.
// Grounded on the "system vs non-system" split in
// `examples/elisplash-paw/src-tauri/src/engine/providers/anthropic.rs::format_messages`,
// generalized here to a provider-agnostic `Vec<ChatMessage>` since each
// upstream caller re-shapes this list for its own wire format rather than
// the composer itself knowing about providers.

use crate::atoms::types::{ChatMessage, MemoryBlock, SessionTurn};

/// Build the ordered message list: memory preamble (if any content is
/// set), then session history turns, then the caller's own messages.
pub fn compose(memory: &MemoryBlock, history: &[SessionTurn], client_messages: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut out = Vec::with_capacity(1 + history.len() + client_messages.len());

    if !memory.content.is_empty() {
        out.push(ChatMessage {
            role: "system".to_string(),
            content: memory.content.clone(),
        });
    }

    out.extend(history.iter().map(|t| ChatMessage {
        role: t.role.clone(),
        content: t.content.clone(),
    }));

    out.extend_from_slice(client_messages);

    out
}
