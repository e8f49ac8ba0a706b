//! Route materialization and the bound route table.

pub mod materializer;
pub mod table;

pub use materializer::{fragment, materialize, ConcernBinding, Mount};
pub use table::{BoundRoute, RouteConfig, RouteMatch, RouteTable, RouteType, Verb};
