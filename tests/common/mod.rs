#![allow(dead_code)]

use resource_router::config::from_json;
use resource_router::{Application, FullConfig};

pub const MODELS: &str = include_str!("../../sample/models.json");
pub const PACKAGES: &str = include_str!("../../sample/packages.json");

pub const ADMIN: &str = "admin_portal";
pub const CUSTOMER: &str = "customer_portal";
pub const ORG: &str = "org_portal";

pub fn config() -> FullConfig {
    from_json(MODELS, PACKAGES).unwrap()
}

pub fn app() -> Application {
    Application::from_config(&config()).unwrap()
}
