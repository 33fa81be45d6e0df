//! famtree: family records manager
//!
//! Turns flat member lists with optional father/mother links into navigable
//! family forests and derives recurring birthday/anniversary/custom-event
//! alerts. The domain layer is pure; the application layer adds a
//! file-backed store; the CLI layer renders.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
