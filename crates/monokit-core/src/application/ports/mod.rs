//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `monokit-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: file and directory operations
//!   - `DependencyInstaller`: package-manager subprocess
//!
//! - **Driving (Input) Ports**: the services themselves, called by the CLI

pub mod output;

pub use output::{DependencyInstaller, Filesystem};
