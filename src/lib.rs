//! Purpose: Current-host lookups for training containers, shared by the CLI, C ABI, and tests.
//! Exports: `api` (lookups, paths, errors), `abi` (C-callable bridge), `paths`.
//! Role: Library crate behind `sm-hostname` and `libsm_hostname`.
//! Invariants: Lookups are stateless; every call re-reads its source.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod abi;
pub mod api;
pub mod core;
pub(crate) mod json;
pub mod paths;
