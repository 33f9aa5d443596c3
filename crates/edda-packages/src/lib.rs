//! # edda-packages
//!
//! Package, plugin, and theme management for the Edda CMS engine:
//! - Validated registration of packages, plugins, and themes
//! - Plugin invocation by name
//! - The permission-filtered navigation menu tree
//! - Script/stylesheet asset collections

pub mod asset;
pub mod menu;
pub mod package;
pub mod plugin;
pub mod theme;

pub use asset::{AssetCollection, AssetKind, AssetScope};
pub use menu::{MenuBuilder, MenuNode, PermissionSet};
pub use package::{Package, compose_menu};
pub use plugin::{Plugin, PluginAction, PluginSet};
pub use theme::Theme;
