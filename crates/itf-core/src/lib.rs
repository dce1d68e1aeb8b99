//! In-page core of the translate-on-hover overlay.
//!
//! Everything here is synchronous and host-agnostic: a host (content
//! script, test harness) implements [`Dom`] and [`Surface`], forwards its
//! input as [`itf_types::PageEvent`]s to a [`TriggerController`], and
//! delivers translation results back through the same entry point.

pub mod connector;
pub mod controller;
pub mod error;
pub mod host;
pub mod layout;
pub mod markup;
pub mod resolver;
pub mod sentence;
pub mod session;
pub mod sink;

pub use connector::ConnectorManager;
pub use controller::TriggerController;
pub use error::TriggerError;
pub use host::{Dom, Host, Selection, Surface};
pub use layout::{Card, CardLayout, Placement};
pub use sink::RequestSink;

#[cfg(test)]
mod tests;
