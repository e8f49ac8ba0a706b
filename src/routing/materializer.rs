//! Two-phase route materialization: declare one concern per resource and per nestable
//! association, then bind every concern into the route tree in ascending name order.
//!
//! Route names join words with `_`, which sorts before every lowercase letter, so a concern
//! whose name extends another's at a word boundary (`blogs_comments_routes`) is always bound
//! before the generic one (`blogs_routes`). Static paths of the specific concern are therefore
//! matched before the generic member route (`/blogs/:id`) can claim them.

use crate::config::{AssociationKind, ModelCatalog};
use crate::error::ConfigError;
use crate::inflect::{singularize, ModelName};
use crate::register::ResourceRegister;
use crate::routing::table::{BoundRoute, RouteConfig, RouteTable, RouteType, Verb};

/// Where a package's routes are mounted.
#[derive(Clone, Copy, Debug)]
pub struct Mount<'a> {
    pub package: &'a str,
    pub mount_path: &'a str,
    pub scope_param: Option<&'a str>,
}

/// A declared, not yet bound, unit of routes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConcernBinding {
    pub name: String,
    pub route_type: RouteType,
    /// Pattern prefix the fragment is mounted under (package base, plus the parent member scope when nested).
    pub scope: String,
    pub path: String,
    pub controller: String,
    pub collection_helper: Option<String>,
    pub member_helper: String,
}

/// Helper base for an index route; uncountable names get an `_index` suffix so index and show differ.
fn collection_key(plural: &str) -> String {
    if singularize(plural) == plural {
        format!("{}_index", plural)
    } else {
        plural.to_string()
    }
}

fn top_level(name: &ModelName, singular: bool, base: &str, helper_prefix: &str) -> (RouteConfig, ConcernBinding) {
    let (route_type, path, collection_helper) = if singular {
        (RouteType::Singular, name.singular_path(), None)
    } else {
        (
            RouteType::Collection,
            name.collection.clone(),
            Some(format!("{}{}", helper_prefix, name.route_key)),
        )
    };
    let config = RouteConfig {
        route_type,
        controller: name.collection.clone(),
        path,
        concern_name: format!("{}_routes", name.plural),
        collection_helper,
        member_helper: format!("{}{}", helper_prefix, name.singular_route_key),
        parent: None,
        association: None,
        target: None,
    };
    let concern = ConcernBinding {
        name: config.concern_name.clone(),
        route_type,
        scope: base.to_string(),
        path: config.path.clone(),
        controller: config.controller.clone(),
        collection_helper: config.collection_helper.clone(),
        member_helper: config.member_helper.clone(),
    };
    (config, concern)
}

/// Build the route table for `register`. Nothing is bound until every top-level config exists.
pub fn materialize(catalog: &ModelCatalog, register: &ResourceRegister, mount: Mount<'_>) -> Result<RouteTable, ConfigError> {
    let mut table = RouteTable::new(mount.package, mount.mount_path, mount.scope_param);
    let base = table.base_pattern();
    let helper_prefix = mount.scope_param.map(|p| format!("{}_", p)).unwrap_or_default();
    let mut concerns = Vec::new();

    for resource in register.list() {
        let info = catalog
            .get(&resource.type_name)
            .ok_or_else(|| ConfigError::UnknownModel(resource.type_name.clone()))?;
        let (config, concern) = top_level(&info.model_name, resource.singular, &base, &helper_prefix);
        table.insert_config(resource.route_name.clone(), config)?;
        concerns.push(concern);
    }

    for resource in register.list() {
        let Some(info) = catalog.get(&resource.type_name) else { continue };
        let Some(parent) = table.config(&resource.route_name).cloned() else { continue };
        let mut member_scope = format!("{}/{}", base, parent.path);
        if parent.route_type == RouteType::Collection {
            member_scope.push_str(&format!("/:{}_id", info.model_name.singular_route_key));
        }

        for association in info.nestable_associations() {
            let target_key = catalog.get(&association.target).map(|t| t.model_name.plural.as_str());
            let Some(target) = target_key.and_then(|key| table.config(key)).cloned() else {
                tracing::debug!(
                    package = mount.package,
                    parent = %resource.type_name,
                    association = %association.name,
                    "association target not routed, skipping"
                );
                continue;
            };

            let path = format!("nested_{}", association.name);
            let (route_type, collection_helper, member_helper) = match association.cardinality {
                AssociationKind::HasOne => (RouteType::Singular, None, format!("{}_{}", parent.member_helper, path)),
                _ => (
                    RouteType::Collection,
                    Some(format!("{}_{}", parent.member_helper, collection_key(&path))),
                    format!("{}_{}", parent.member_helper, singularize(&path)),
                ),
            };
            let config = RouteConfig {
                route_type,
                controller: target.controller.clone(),
                path: path.clone(),
                concern_name: format!("{}_{}_routes", info.model_name.singular_route_key, association.name),
                collection_helper,
                member_helper,
                parent: Some(resource.type_name.clone()),
                association: Some(association.name.clone()),
                target: Some(association.target.clone()),
            };
            concerns.push(ConcernBinding {
                name: config.concern_name.clone(),
                route_type,
                scope: member_scope.clone(),
                path,
                controller: config.controller.clone(),
                collection_helper: config.collection_helper.clone(),
                member_helper: config.member_helper.clone(),
            });
            table.insert_config(format!("{}/{}", resource.route_name, association.name), config)?;
        }
    }

    concerns.sort_by(|a, b| (&a.name, &a.scope).cmp(&(&b.name, &b.scope)));
    for concern in &concerns {
        table.bind(&concern.name, &concern.scope, fragment(concern))?;
    }

    tracing::info!(
        package = mount.package,
        resources = register.len(),
        concerns = concerns.len(),
        routes = table.routes().len(),
        "routes drawn"
    );
    Ok(table)
}

/// Expand a concern into routes. Only constructs valid for its route type are emitted:
/// singular fragments have no collection scope and no id segment.
pub fn fragment(concern: &ConcernBinding) -> Vec<BoundRoute> {
    let base = format!("{}/{}", concern.scope, concern.path);
    let m = &concern.member_helper;
    let route = |verb: Verb, pattern: String, helper: Option<String>, action: &str| BoundRoute {
        verb,
        pattern,
        helper,
        controller: concern.controller.clone(),
        action: action.to_string(),
        concern: concern.name.clone(),
    };

    match (concern.route_type, &concern.collection_helper) {
        (RouteType::Collection, Some(c)) => {
            let member = format!("{}/:id", base);
            vec![
                route(Verb::Get, format!("{}/new", base), Some(format!("new_{}", m)), "new"),
                route(
                    Verb::Get,
                    format!("{}/resource_actions/:interactive_action", base),
                    Some(format!("resource_action_{}", c)),
                    "interactive_resource_action",
                ),
                route(
                    Verb::Post,
                    format!("{}/resource_actions/:interactive_action", base),
                    None,
                    "commit_interactive_resource_action",
                ),
                route(
                    Verb::Get,
                    format!("{}/bulk_actions/:interactive_action", base),
                    Some(format!("bulk_action_{}", c)),
                    "interactive_bulk_action",
                ),
                route(
                    Verb::Post,
                    format!("{}/bulk_actions/:interactive_action", base),
                    None,
                    "commit_interactive_bulk_action",
                ),
                route(Verb::Get, base.clone(), Some(c.clone()), "index"),
                route(Verb::Post, base.clone(), None, "create"),
                route(Verb::Get, format!("{}/edit", member), Some(format!("edit_{}", m)), "edit"),
                route(
                    Verb::Get,
                    format!("{}/record_actions/:interactive_action", member),
                    Some(format!("record_action_{}", m)),
                    "interactive_record_action",
                ),
                route(
                    Verb::Post,
                    format!("{}/record_actions/:interactive_action", member),
                    None,
                    "commit_interactive_record_action",
                ),
                route(Verb::Get, member.clone(), Some(m.clone()), "show"),
                route(Verb::Patch, member.clone(), None, "update"),
                route(Verb::Put, member.clone(), None, "update"),
                route(Verb::Delete, member, None, "destroy"),
            ]
        }
        _ => vec![
            route(Verb::Get, format!("{}/new", base), Some(format!("new_{}", m)), "new"),
            route(Verb::Get, format!("{}/edit", base), Some(format!("edit_{}", m)), "edit"),
            route(
                Verb::Get,
                format!("{}/record_actions/:interactive_action", base),
                Some(format!("record_action_{}", m)),
                "interactive_record_action",
            ),
            route(
                Verb::Post,
                format!("{}/record_actions/:interactive_action", base),
                None,
                "commit_interactive_record_action",
            ),
            route(Verb::Get, base.clone(), Some(m.clone()), "show"),
            route(Verb::Post, base.clone(), None, "create"),
            route(Verb::Patch, base.clone(), None, "update"),
            route(Verb::Put, base.clone(), None, "update"),
            route(Verb::Delete, base, None, "destroy"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, AssociationConfig, FullConfig, ModelConfig};

    fn model(name: &str, associations: &[(&str, AssociationKind, &str)]) -> ModelConfig {
        ModelConfig {
            name: name.into(),
            supertypes: vec![],
            associations: associations
                .iter()
                .map(|(name, kind, target)| AssociationConfig {
                    name: (*name).into(),
                    kind: *kind,
                    target: (*target).into(),
                })
                .collect(),
        }
    }

    fn catalog() -> ModelCatalog {
        resolve(&FullConfig {
            models: vec![
                model(
                    "Blog",
                    &[
                        ("comments", AssociationKind::HasMany, "Blogging::Comment"),
                        ("owner", AssociationKind::BelongsTo, "User"),
                        ("drafts", AssociationKind::HasMany, "Draft"),
                    ],
                ),
                model("Blogging::Comment", &[]),
                model("Blogs::Comment", &[]),
                model("Draft", &[]),
                model("User", &[("profile", AssociationKind::HasOne, "Profile")]),
                model("Profile", &[]),
            ],
            packages: vec![],
        })
        .unwrap()
    }

    const ADMIN: Mount<'static> = Mount {
        package: "admin",
        mount_path: "/admin",
        scope_param: None,
    };

    fn draw(resources: &[(&str, bool)]) -> Result<RouteTable, ConfigError> {
        let catalog = catalog();
        let mut register = ResourceRegister::new();
        for (name, singular) in resources {
            register.register(&catalog, name, *singular).unwrap();
        }
        materialize(&catalog, &register, ADMIN)
    }

    #[test]
    fn builds_top_level_configs() {
        let table = draw(&[("Blogging::Comment", false), ("Profile", true)]).unwrap();
        let comments = table.config("blogging_comments").unwrap();
        assert_eq!(comments.route_type, RouteType::Collection);
        assert_eq!(comments.controller, "blogging/comments");
        assert_eq!(comments.path, "blogging/comments");
        assert_eq!(comments.concern_name, "blogging_comments_routes");
        assert_eq!(comments.collection_helper.as_deref(), Some("blogging_comments"));
        assert_eq!(comments.member_helper, "blogging_comment");

        let profile = table.config("profiles").unwrap();
        assert_eq!(profile.route_type, RouteType::Singular);
        assert_eq!(profile.path, "profile");
        assert!(profile.collection_helper.is_none());
    }

    #[test]
    fn nests_only_routed_has_many_and_has_one_associations() {
        let table = draw(&[("Blog", false), ("Blogging::Comment", false), ("User", false), ("Profile", true)]).unwrap();
        let nested = table.config("blogs/comments").unwrap();
        assert_eq!(nested.route_type, RouteType::Collection);
        assert_eq!(nested.path, "nested_comments");
        assert_eq!(nested.controller, "blogging/comments");
        assert_eq!(nested.concern_name, "blog_comments_routes");
        assert_eq!(nested.target.as_deref(), Some("Blogging::Comment"));
        assert!(table.config("blogs/drafts").is_none());
        assert!(table.config("blogs/owner").is_none());

        let profile = table.config("users/profile").unwrap();
        assert_eq!(profile.route_type, RouteType::Singular);
        assert_eq!(profile.member_helper, "user_nested_profile");

        assert_eq!(
            table.path_for("blog_nested_comments", &["3"]).unwrap(),
            "/admin/blogs/3/nested_comments"
        );
        assert_eq!(
            table.path_for("edit_blog_nested_comment", &["3", "9"]).unwrap(),
            "/admin/blogs/3/nested_comments/9/edit"
        );
        assert_eq!(table.path_for("user_nested_profile", &["5"]).unwrap(), "/admin/users/5/nested_profile");
    }

    #[test]
    fn binds_concerns_in_byte_order() {
        let table = draw(&[("User", false), ("Blog", false), ("Blogging::Comment", false), ("Profile", true)]).unwrap();
        assert_eq!(
            table.concerns(),
            [
                "blog_comments_routes",
                "blogging_comments_routes",
                "blogs_routes",
                "profiles_routes",
                "user_profile_routes",
                "users_routes",
            ]
        );
    }

    #[test]
    fn specific_prefix_is_not_shadowed_by_member_route() {
        let table = draw(&[("Blog", false), ("Blogs::Comment", false)]).unwrap();
        let m = table.recognize(Verb::Get, "/admin/blogs/comments").unwrap();
        assert_eq!(m.route.controller, "blogs/comments");
        assert_eq!(m.route.action, "index");
        let m = table.recognize(Verb::Get, "/admin/blogs/4").unwrap();
        assert_eq!(m.route.controller, "blogs");
        assert_eq!(m.route.action, "show");
    }

    #[test]
    fn singular_fragments_have_no_collection_scope() {
        let table = draw(&[("Profile", true)]).unwrap();
        assert!(table.routes().iter().all(|r| !r.pattern.contains(":id")));
        assert!(table.routes().iter().all(|r| !r.action.contains("resource_action") && !r.action.contains("bulk")));
        assert!(table.routes().iter().all(|r| r.action != "index"));
        assert_eq!(table.path_for("edit_profile", &[]).unwrap(), "/admin/profile/edit");
    }

    #[test]
    fn duplicate_route_names_fail_the_draw() {
        let err = draw(&[("Blog", false), ("Blog", false)]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRoute { ref name, .. } if name == "blogs"));
    }

    #[test]
    fn scoped_packages_prefix_patterns_and_helpers() {
        let catalog = catalog();
        let mut register = ResourceRegister::new();
        register.register(&catalog, "Blog", false).unwrap();
        register.register(&catalog, "Blogging::Comment", false).unwrap();
        let table = materialize(
            &catalog,
            &register,
            Mount {
                package: "tenant",
                mount_path: "/",
                scope_param: Some("organization"),
            },
        )
        .unwrap();
        assert_eq!(table.path_for("organization_blogs", &["acme"]).unwrap(), "/acme/blogs");
        assert_eq!(
            table.path_for("organization_blog_nested_comments", &["acme", "2"]).unwrap(),
            "/acme/blogs/2/nested_comments"
        );
        assert_eq!(table.path_for("new_organization_blog", &["acme"]).unwrap(), "/acme/blogs/new");
    }

    #[test]
    fn nested_concern_may_share_a_top_level_name() {
        let catalog = resolve(&FullConfig {
            models: vec![
                model("Post", &[("comments", AssociationKind::HasMany, "PostComment")]),
                model("PostComment", &[]),
            ],
            packages: vec![],
        })
        .unwrap();
        let mut register = ResourceRegister::new();
        register.register(&catalog, "Post", false).unwrap();
        register.register(&catalog, "PostComment", false).unwrap();
        let table = materialize(&catalog, &register, ADMIN).unwrap();

        assert_eq!(table.concerns(), ["post_comments_routes", "post_comments_routes", "posts_routes"]);
        assert_eq!(table.config("posts/comments").unwrap().concern_name, "post_comments_routes");
        assert_eq!(table.config("post_comments").unwrap().concern_name, "post_comments_routes");
        assert_eq!(table.path_for("post_comments", &[]).unwrap(), "/admin/post_comments");
        assert_eq!(
            table.path_for("post_nested_comment", &["1", "2"]).unwrap(),
            "/admin/posts/1/nested_comments/2"
        );
        let m = table.recognize(Verb::Get, "/admin/posts/1/nested_comments").unwrap();
        assert_eq!(m.route.controller, "post_comments");
    }

    #[test]
    fn uncountable_names_get_index_helpers() {
        assert_eq!(collection_key("nested_sheep"), "nested_sheep_index");
        assert_eq!(collection_key("nested_comments"), "nested_comments");
    }
}
