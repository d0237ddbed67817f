//! roadmap-sync: reconcile Linear tickets and GitHub issues into a roadmap
//!
//! The library splits into the pure reconciliation core (`reconcile`) and
//! the collaborators around it: tracker services (`platform`), credentials
//! (`auth`), configuration (`config`), and rendering (`template`).

pub mod auth;
pub mod config;
pub mod error;
pub mod platform;
pub mod progress;
pub mod reconcile;
pub mod template;
pub mod types;
