pub mod cluster;
pub mod config;
pub mod controller;
pub mod error;
pub mod hosts;
pub mod ingress;
pub mod policy;
pub mod reporter;
pub mod router;
pub mod server;
pub mod source;
pub mod state;

pub use controller::{CycleReport, Outcome, Reconciler};
pub use error::{Error, Result};
