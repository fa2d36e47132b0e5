//! Command implementations for deploy-cli

pub mod sync;

pub use sync::{DeployReport, SyncInvocation, run_sync};
