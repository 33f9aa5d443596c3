//! Menu rendering integration tests
//!
//! Covers the composed admin menu: permission filtering at every depth,
//! deterministic cross-package ordering, and translation fallback.

use edda_core::{MapTranslator, NullTranslator, Registry};
use edda_packages::{MenuNode, Package, PermissionSet, compose_menu};
use std::collections::HashMap;
use tempfile::TempDir;

fn register_package(registry: &Registry<Package>, name: &str, root: &std::path::Path, menu: MenuNode) {
    registry
        .register(|p| {
            p.name = name.to_string();
            p.title = format!("packages.{name}.title");
            p.author = "Edda Team".to_string();
            p.about = format!("packages.{name}.about");
            p.root = root.to_path_buf();
            p.menu = Some(menu);
        })
        .unwrap();
}

#[test]
fn test_gated_node_appears_only_with_permission() {
    let temp = TempDir::new().unwrap();
    let registry = Registry::<Package>::new();

    register_package(
        &registry,
        "users",
        temp.path(),
        MenuNode::new("menu.users", "/admin/users").with_permission("show_user"),
    );

    let without = compose_menu(&registry, &PermissionSet::new(), &NullTranslator);
    assert!(!without.contains("/admin/users"));

    let with = compose_menu(
        &registry,
        &PermissionSet::from_tokens(["show_user"]),
        &NullTranslator,
    );
    assert!(with.contains("/admin/users"));
}

#[test]
fn test_nested_children_filter_independently_of_parent() {
    let temp = TempDir::new().unwrap();
    let registry = Registry::<Package>::new();

    let menu = MenuNode::new("menu.content", "/admin/content").with_children(|m| {
        m.item(MenuNode::new("menu.posts", "/admin/posts"));
        m.item(MenuNode::new("menu.drafts", "/admin/drafts").with_permission("show_draft"));
    });
    register_package(&registry, "content", temp.path(), menu);

    let html = compose_menu(&registry, &PermissionSet::new(), &NullTranslator);
    assert!(html.contains("/admin/content"));
    assert!(html.contains("/admin/posts"));
    assert!(!html.contains("/admin/drafts"));
}

#[test]
fn test_cross_package_order_is_alphabetical_not_registration_order() {
    let temp = TempDir::new().unwrap();
    let registry = Registry::<Package>::new();

    // Registered out of alphabetical order on purpose
    for name in ["zoo", "blog", "media"] {
        register_package(
            &registry,
            name,
            temp.path(),
            MenuNode::new(format!("menu.{name}"), format!("/admin/{name}")),
        );
    }

    let html = compose_menu(&registry, &PermissionSet::new(), &NullTranslator);
    let blog = html.find("/admin/blog").unwrap();
    let media = html.find("/admin/media").unwrap();
    let zoo = html.find("/admin/zoo").unwrap();
    assert!(blog < media && media < zoo);
}

#[test]
fn test_menu_titles_translate_with_key_fallback() {
    let temp = TempDir::new().unwrap();
    let registry = Registry::<Package>::new();

    let menu = MenuNode::new("menu.blog", "/admin/blog").with_children(|m| {
        m.item(MenuNode::new("menu.blog.posts", "/admin/blog/posts"));
    });
    register_package(&registry, "blog", temp.path(), menu);

    // Only the parent key has a translation; the child falls back
    let translator = MapTranslator::new(HashMap::from([(
        "menu.blog".to_string(),
        "Blog".to_string(),
    )]));

    let html = compose_menu(&registry, &PermissionSet::new(), &translator);
    assert!(html.contains(">Blog</a>"));
    assert!(html.contains(">menu.blog.posts</a>"));
}

#[test]
fn test_package_without_menu_contributes_nothing() {
    let temp = TempDir::new().unwrap();
    let registry = Registry::<Package>::new();

    registry
        .register(|p| {
            p.name = "headless".to_string();
            p.title = "packages.headless.title".to_string();
            p.author = "Edda Team".to_string();
            p.about = "packages.headless.about".to_string();
            p.root = temp.path().to_path_buf();
        })
        .unwrap();

    let html = compose_menu(&registry, &PermissionSet::new(), &NullTranslator);
    assert_eq!(html, "<ul class=\"menu\"></ul>");
}
