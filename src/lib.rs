//! Resource router: register domain models as resources, materialize nested routes from
//! their associations, and resolve records, types and associations to paths.

pub mod config;
pub mod error;
pub mod handlers;
pub mod inflect;
pub mod package;
pub mod register;
pub mod resolver;
pub mod response;
pub mod routes;
pub mod routing;
pub mod state;

pub use config::{load_from_dir, resolve, FullConfig, ModelCatalog};
pub use error::{AppError, ConfigError, ResolveError};
pub use package::{Application, Package};
pub use register::{ResourceDescriptor, ResourceRegister};
pub use resolver::{resolve_association, Action, Record, ResourceTarget, UrlOptions};
pub use routes::{common_routes, introspection_routes, resource_routes};
pub use routing::{RouteConfig, RouteTable, RouteType, Verb};
pub use state::AppState;
