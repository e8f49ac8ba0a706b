//! Packages (independently mounted routing scopes) and the application that owns them.

use crate::config::{resolve, FullConfig, ModelCatalog, PackageConfig};
use crate::error::{ConfigError, ResolveError};
use crate::register::{ResourceDescriptor, ResourceRegister};
use crate::resolver::{resolve_url, ResourceTarget, UrlOptions};
use crate::routing::{materialize, Mount, RouteMatch, RouteTable, Verb};
use std::collections::BTreeMap;

/// One routing scope: its register and the table last drawn from it.
#[derive(Clone, Debug)]
pub struct Package {
    name: String,
    mount_path: String,
    scope_param: Option<String>,
    register: ResourceRegister,
    routes: RouteTable,
}

impl Package {
    pub fn new(name: &str, mount_path: &str, scope_param: Option<&str>) -> Self {
        Package {
            name: name.to_string(),
            mount_path: mount_path.to_string(),
            scope_param: scope_param.map(str::to_string),
            register: ResourceRegister::new(),
            routes: RouteTable::new(name, mount_path, scope_param),
        }
    }

    /// Register every configured resource and draw the routes.
    pub fn from_config(catalog: &ModelCatalog, config: &PackageConfig) -> Result<Self, ConfigError> {
        let mut package = Package::new(&config.name, &config.mount_path, config.scope_param.as_deref());
        for resource in &config.resources {
            package.register_resource(catalog, &resource.type_name, resource.singular)?;
        }
        package.draw(catalog)?;
        Ok(package)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }

    pub fn scope_param(&self) -> Option<&str> {
        self.scope_param.as_deref()
    }

    pub fn register_resource(
        &mut self,
        catalog: &ModelCatalog,
        type_name: &str,
        singular: bool,
    ) -> Result<&ResourceDescriptor, ConfigError> {
        self.register.register(catalog, type_name, singular)
    }

    pub fn resources(&self) -> &[ResourceDescriptor] {
        self.register.list()
    }

    /// Materialize the register. The previous table stays in place if drawing fails.
    pub fn draw(&mut self, catalog: &ModelCatalog) -> Result<&RouteTable, ConfigError> {
        let mount = Mount {
            package: &self.name,
            mount_path: &self.mount_path,
            scope_param: self.scope_param.as_deref(),
        };
        self.routes = materialize(catalog, &self.register, mount)?;
        Ok(&self.routes)
    }

    /// Clear the register and the drawn table, ahead of registering everything again.
    pub fn reset(&mut self) {
        self.register.clear();
        self.routes = RouteTable::new(&self.name, &self.mount_path, self.scope_param.as_deref());
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Whether `path` lies under this package's mount path.
    pub fn mounts(&self, path: &str) -> bool {
        let mount = self.mount_path.trim_end_matches('/');
        mount.is_empty()
            || path == mount
            || path.strip_prefix(mount).is_some_and(|rest| rest.starts_with('/'))
    }
}

/// The model catalog plus every package drawn from it. Immutable once built; reload by
/// building a new one (see `AppState::reload`).
#[derive(Clone, Debug, Default)]
pub struct Application {
    catalog: ModelCatalog,
    packages: BTreeMap<String, Package>,
}

impl Application {
    pub fn new(catalog: ModelCatalog) -> Self {
        Application {
            catalog,
            packages: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &FullConfig) -> Result<Self, ConfigError> {
        let mut app = Application::new(resolve(config)?);
        for package in &config.packages {
            let package = Package::from_config(&app.catalog, package)?;
            app.add_package(package)?;
        }
        Ok(app)
    }

    pub fn add_package(&mut self, package: Package) -> Result<(), ConfigError> {
        if self.packages.contains_key(package.name()) {
            return Err(ConfigError::DuplicatePackage(package.name().to_string()));
        }
        self.packages.insert(package.name().to_string(), package);
        Ok(())
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Path for `target` as seen from `current`. `options.package` routes through another
    /// package instead: its mount path and its routes, same nested shape.
    pub fn resource_url_for(
        &self,
        current: &str,
        target: ResourceTarget<'_>,
        options: &UrlOptions<'_>,
    ) -> Result<String, ResolveError> {
        let name = options.package.unwrap_or(current);
        let package = self
            .package(name)
            .ok_or_else(|| ResolveError::UnknownPackage(name.to_string()))?;
        resolve_url(&self.catalog, package.routes(), target, options)
    }

    /// Match a request path against the package with the longest mount path that contains it.
    pub fn recognize(&self, verb: Verb, path: &str) -> Option<(&Package, RouteMatch)> {
        let mut candidates: Vec<&Package> = self.packages.values().filter(|p| p.mounts(path)).collect();
        candidates.sort_by_key(|p| std::cmp::Reverse(p.mount_path.trim_end_matches('/').len()));
        candidates
            .into_iter()
            .find_map(|p| p.routes.recognize(verb, path).map(|m| (p, m)))
    }
}
