//! View-state engine for the helpdesk console.
//!
//! Everything here is browser-agnostic: the front end owns the DOM and feeds
//! events in, the engine owns the state and hands projections back out.

pub mod actions;
pub mod bootstrap;
pub mod config;
pub mod console;
pub mod dto;
pub mod error;
pub mod forms;
pub mod modal;
pub mod model;
pub mod render;
pub mod sample;
pub mod service;
pub mod session;
pub mod sidebar;
pub mod store;

pub use console::{Console, StateCell};
pub use error::{ConsoleError, Result};
