//! Boot-time registration of the custom search attributes this application
//! queries workflows by.
//!
//! The hook connects to the Temporal frontend, waits for the operator
//! (management-plane) service to answer, reads the custom search attributes
//! already registered in the target namespace and adds whichever of the
//! required ones are missing. It runs exactly once at process startup and
//! never fails the host process: when the cluster stays unreachable the hook
//! logs an error and gives up, leaving Temporal-backed features unavailable.

pub mod attributes;
pub mod bootstrap;
pub mod cluster;
pub mod settings;

pub use bootstrap::{Outcome, run};
pub use settings::Settings;
