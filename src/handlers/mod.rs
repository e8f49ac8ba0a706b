//! HTTP handlers for request dispatch and route introspection.

pub mod dispatch;
pub mod introspect;
pub use dispatch::*;
pub use introspect::*;
