//! Purpose: Internal JSON boundary for the resource config document.
//! Exports: `token` (top-level member spans) and `parse` (failure categories).
//! Role: Single seam for serde_json usage so lookups avoid ad hoc decode logic.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
pub(crate) mod token;
