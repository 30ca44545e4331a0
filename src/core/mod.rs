// Core modules implementing the current-host lookups, bounded copies, and error modeling.
pub mod bounded;
pub mod config_host;
pub mod env_host;
pub mod error;
