//! Site configuration root.
//!
//! [`SiteConfig`] is the validated, immutable form of a site declaration.
//! Every construction path (`TryFrom<RawSiteConfig>`, [`SiteConfigBuilder`],
//! serde deserialization and [`SiteConfig::from_value`]) runs the same
//! validation, and either produces a complete model or an error.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, SerializeTuple, Serializer};
use serde_json::Value;

use crate::error::ModelError;
use crate::nav::{HeadLink, NavLink};
use crate::raw::{RawHeadLink, RawNavLink, RawSidebarEntry, RawSiteConfig, RawThemeConfig};
use crate::sidebar::{LeafEntry, SidebarEntry};
use crate::walk::Walk;

/// Site identity and navigation structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    title: String,
    description: String,
    head_links: Vec<HeadLink>,
    theme: ThemeConfig,
}

/// Theme section: logo, top navigation and sidebar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeConfig {
    logo: Option<String>,
    nav_items: Vec<NavLink>,
    sidebar: Vec<SidebarEntry>,
}

impl SiteConfig {
    /// Start building a configuration in code.
    pub fn builder(title: impl Into<String>) -> SiteConfigBuilder {
        SiteConfigBuilder::new(title)
    }

    /// Site title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Site description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Head entries in declaration order.
    pub fn head_links(&self) -> &[HeadLink] {
        &self.head_links
    }

    /// Theme section.
    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    /// Depth-first walk over the sidebar.
    ///
    /// Each call starts a fresh walk from the first entry.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.theme.sidebar)
    }

    /// Every page path referenced by the sidebar, in walk order.
    ///
    /// Paths reachable from several places appear once per occurrence.
    pub fn page_paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.walk().map(|(_, node)| node.path())
    }

    /// Export to a plain structured value in the renderer's shape.
    pub fn to_value(&self) -> Result<Value, ModelError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Build from a plain structured value.
    ///
    /// Inverse of [`SiteConfig::to_value`].
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        let raw = RawSiteConfig::deserialize(value)?;
        Self::try_from(raw)
    }
}

impl ThemeConfig {
    /// Logo asset reference.
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }

    /// Top navigation links in display order.
    pub fn nav_items(&self) -> &[NavLink] {
        &self.nav_items
    }

    /// Sidebar entries in display order.
    pub fn sidebar(&self) -> &[SidebarEntry] {
        &self.sidebar
    }
}

impl TryFrom<RawSiteConfig> for SiteConfig {
    type Error = ModelError;

    fn try_from(raw: RawSiteConfig) -> Result<Self, Self::Error> {
        let RawSiteConfig {
            title,
            description,
            head,
            theme_config,
        } = raw;

        Ok(Self {
            title,
            description,
            head_links: head.into_iter().map(HeadLink::from).collect(),
            theme: ThemeConfig::try_from(theme_config)?,
        })
    }
}

impl TryFrom<RawThemeConfig> for ThemeConfig {
    type Error = ModelError;

    fn try_from(raw: RawThemeConfig) -> Result<Self, Self::Error> {
        if raw.logo.as_deref() == Some("") {
            return Err(ModelError::EmptyLogo);
        }

        let nav_items = raw
            .nav
            .into_iter()
            .enumerate()
            .map(|(index, link)| NavLink::from_raw(link, index))
            .collect::<Result<_, _>>()?;

        let sidebar = raw
            .sidebar
            .into_iter()
            .enumerate()
            .map(|(index, entry)| SidebarEntry::classify(entry, index))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            logo: raw.logo,
            nav_items,
            sidebar,
        })
    }
}

/// Builder for declaring a [`SiteConfig`] in code.
///
/// Collects the declaration in its raw form; [`SiteConfigBuilder::build`]
/// validates it exactly like a parsed configuration file.
#[derive(Debug, Default)]
pub struct SiteConfigBuilder {
    raw: RawSiteConfig,
}

impl SiteConfigBuilder {
    /// Create a builder for a site with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            raw: RawSiteConfig {
                title: title.into(),
                ..RawSiteConfig::default()
            },
        }
    }

    /// Set the site description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.raw.description = description.into();
        self
    }

    /// Append a head element.
    #[must_use]
    pub fn head_link<K, V>(
        mut self,
        tag: impl Into<String>,
        attrs: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let attrs = attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.raw.head.push(RawHeadLink::Attrs(tag.into(), attrs));
        self
    }

    /// Set the logo asset.
    #[must_use]
    pub fn logo(mut self, path: impl Into<String>) -> Self {
        self.raw.theme_config.logo = Some(path.into());
        self
    }

    /// Append a top navigation link.
    #[must_use]
    pub fn nav(mut self, label: impl Into<String>, target: impl Into<String>) -> Self {
        self.raw.theme_config.nav.push(RawNavLink {
            text: label.into(),
            link: Some(target.into()),
        });
        self
    }

    /// Append a single-page sidebar entry.
    #[must_use]
    pub fn leaf(mut self, path: impl Into<String>, label: impl Into<String>) -> Self {
        self.raw
            .theme_config
            .sidebar
            .push(RawSidebarEntry::pair(path, label));
        self
    }

    /// Append a sidebar group with `(path, label)` children.
    #[must_use]
    pub fn group<P, L>(
        mut self,
        title: impl Into<String>,
        path: impl Into<String>,
        children: impl IntoIterator<Item = (P, L)>,
    ) -> Self
    where
        P: Into<String>,
        L: Into<String>,
    {
        let children = children
            .into_iter()
            .map(|(path, label)| RawSidebarEntry::pair(path, label))
            .collect();
        self.raw
            .theme_config
            .sidebar
            .push(RawSidebarEntry::group(title, path, children));
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<SiteConfig, ModelError> {
        SiteConfig::try_from(self.raw)
    }
}

impl Serialize for SiteConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SiteConfig", 4)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("head", &self.head_links)?;
        state.serialize_field("themeConfig", &self.theme)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for SiteConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawSiteConfig::deserialize(deserializer)?;
        Self::try_from(raw).map_err(de::Error::custom)
    }
}

impl Serialize for ThemeConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.logo.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("ThemeConfig", len)?;
        match &self.logo {
            Some(logo) => state.serialize_field("logo", logo)?,
            None => state.skip_field("logo")?,
        }
        state.serialize_field("nav", &self.nav_items)?;
        state.serialize_field("sidebar", &self.sidebar)?;
        state.end()
    }
}

impl Serialize for HeadLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.content().is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_tuple(len)?;
        state.serialize_element(self.tag())?;
        state.serialize_element(self.attrs())?;
        if let Some(content) = self.content() {
            state.serialize_element(content)?;
        }
        state.end()
    }
}

impl Serialize for NavLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NavLink", 2)?;
        state.serialize_field("text", self.label())?;
        state.serialize_field("link", self.target().as_str())?;
        state.end()
    }
}

/// Top-level leaves use the `[path, label]` shorthand; groups are objects.
impl Serialize for SidebarEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(leaf) => {
                let mut state = serializer.serialize_tuple(2)?;
                state.serialize_element(leaf.path())?;
                state.serialize_element(leaf.label())?;
                state.end()
            }
            Self::Group(group) => {
                let mut state = serializer.serialize_struct("GroupEntry", 3)?;
                state.serialize_field("title", group.title())?;
                state.serialize_field("path", group.path())?;
                state.serialize_field("children", group.children())?;
                state.end()
            }
        }
    }
}

/// Group children use the `{title, path}` object form.
impl Serialize for LeafEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LeafEntry", 2)?;
        state.serialize_field("title", self.label())?;
        state.serialize_field("path", self.path())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::nav::LinkTarget;
    use crate::sidebar::{SidebarNode, leaf};

    static_assertions::assert_impl_all!(super::SiteConfig: Send, Sync);

    /// Navigation declared by the firmware analysis documentation site.
    fn grbl_site() -> Value {
        json!({
            "title": "Grbl 源码解析与移植",
            "description": "Grbl源码精度与解析，代码行级中文注释并提供丰富详尽的案例展示。",
            "head": [["link", {"rel": "icon", "href": "/logo.png"}]],
            "themeConfig": {
                "nav": [
                    {"text": "首页", "link": "/"},
                    {"text": "Github", "link": "https://github.com/MillerRen/grbl-learning"}
                ],
                "sidebar": [
                    ["/", "首页"],
                    ["/preface", "前言"],
                    ["/prepare", "准备工作"],
                    {
                        "title": "Grbl源码解析",
                        "path": "/analysis/",
                        "children": [
                            {"title": "架构", "path": "/analysis/architecture.md"},
                            {"title": "主入口", "path": "/analysis/main.md"},
                            {"title": "串口", "path": "/analysis/serial.md"},
                            {"title": "协议", "path": "/analysis/protocol.md"},
                            {"title": "G代码解析", "path": "/analysis/gcode.md"},
                            {"title": "运动规划", "path": "/analysis/planner.md"}
                        ]
                    },
                    ["/porting/", "Grbl移植"],
                    ["/extensions/", "Grbl扩展"]
                ]
            }
        })
    }

    fn walk_summary(site: &SiteConfig) -> Vec<(usize, bool, String, String)> {
        site.walk()
            .map(|(depth, node)| {
                (
                    depth,
                    node.is_group(),
                    node.path().to_owned(),
                    node.label().to_owned(),
                )
            })
            .collect()
    }

    #[test]
    fn test_walk_scenario() {
        let site = SiteConfig::from_value(json!({
            "themeConfig": {
                "sidebar": [
                    ["/", "首页"],
                    {
                        "title": "解析",
                        "path": "/analysis/",
                        "children": [
                            {"title": "架构", "path": "/analysis/architecture.md"},
                            {"title": "入口", "path": "/analysis/main.md"}
                        ]
                    }
                ]
            }
        }))
        .unwrap();

        let nodes: Vec<_> = site.walk().collect();
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0], (0, SidebarNode::Leaf(&leaf("/", "首页"))));
        let (depth, SidebarNode::Group(group)) = nodes[1] else {
            panic!("expected group at position 1, got {:?}", nodes[1]);
        };
        assert_eq!(depth, 0);
        assert_eq!((group.title(), group.path()), ("解析", "/analysis/"));
        assert_eq!(
            nodes[2],
            (1, SidebarNode::Leaf(&leaf("/analysis/architecture.md", "架构")))
        );
        assert_eq!(
            nodes[3],
            (1, SidebarNode::Leaf(&leaf("/analysis/main.md", "入口")))
        );
    }

    #[test]
    fn test_walk_is_restartable() {
        let site = SiteConfig::from_value(grbl_site()).unwrap();
        let first = walk_summary(&site);
        let second = walk_summary(&site);
        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
        assert_eq!(
            first[3],
            (0, true, "/analysis/".to_owned(), "Grbl源码解析".to_owned())
        );
        assert!(first[4..10].iter().all(|(depth, group, ..)| *depth == 1 && !group));
    }

    #[test]
    fn test_order_preserved() {
        let site = SiteConfig::from_value(grbl_site()).unwrap();
        let paths: Vec<_> = site.page_paths().collect();
        assert_eq!(
            paths,
            vec![
                "/",
                "/preface",
                "/prepare",
                "/analysis/",
                "/analysis/architecture.md",
                "/analysis/main.md",
                "/analysis/serial.md",
                "/analysis/protocol.md",
                "/analysis/gcode.md",
                "/analysis/planner.md",
                "/porting/",
                "/extensions/",
            ]
        );
        let labels: Vec<_> = site
            .theme()
            .nav_items()
            .iter()
            .map(NavLink::label)
            .collect();
        assert_eq!(labels, vec!["首页", "Github"]);
    }

    #[test]
    fn test_nav_targets_classified() {
        let site = SiteConfig::from_value(grbl_site()).unwrap();
        let nav = site.theme().nav_items();
        assert_eq!(nav[0].target(), &LinkTarget::Internal("/".to_owned()));
        assert!(nav[1].target().is_external());
    }

    #[test]
    fn test_round_trip_through_value() {
        let site = SiteConfig::from_value(grbl_site()).unwrap();
        let value = site.to_value().unwrap();
        assert_eq!(value, grbl_site());
        assert_eq!(SiteConfig::from_value(value).unwrap(), site);
    }

    #[test]
    fn test_round_trip_with_logo_and_head_content() {
        let site = SiteConfig::from_value(json!({
            "title": "Docs",
            "head": [
                ["meta", {"name": "theme-color", "content": "#fff"}],
                ["script", {"src": "/init.js"}, "init()"],
                ["meta", {"name": "theme-color", "content": "#fff"}]
            ],
            "themeConfig": {
                "logo": "/logo.png",
                "nav": [{"text": "Home", "link": "https://example.com"}],
                "sidebar": [{"title": "Guide", "path": "/guide/"}]
            }
        }))
        .unwrap();

        assert_eq!(site.theme().logo(), Some("/logo.png"));
        assert_eq!(site.head_links().len(), 3);
        assert_eq!(site.head_links()[1].content(), Some("init()"));

        let value = site.to_value().unwrap();
        assert_eq!(value["themeConfig"]["logo"], "/logo.png");
        assert_eq!(value["themeConfig"]["sidebar"][0], json!(["/guide/", "Guide"]));
        assert_eq!(
            value["themeConfig"]["nav"][0]["link"],
            "https://example.com/"
        );
        assert_eq!(SiteConfig::from_value(value).unwrap(), site);
    }

    #[test]
    fn test_missing_logo_not_serialized() {
        let site = SiteConfig::builder("Docs").build().unwrap();
        let value = site.to_value().unwrap();
        assert!(value["themeConfig"].get("logo").is_none());
    }

    #[test]
    fn test_variant_inference_ignores_key_order() {
        let a = SiteConfig::from_value(json!({"themeConfig": {"sidebar": [
            {"children": [{"path": "/a/1", "title": "One"}], "path": "/a/", "title": "A"}
        ]}}))
        .unwrap();
        let b = SiteConfig::from_value(json!({"themeConfig": {"sidebar": [
            {"title": "A", "path": "/a/", "children": [{"title": "One", "path": "/a/1"}]}
        ]}}))
        .unwrap();
        assert_eq!(a, b);
        assert!(matches!(a.theme().sidebar()[0], SidebarEntry::Group(_)));
    }

    #[test]
    fn test_missing_path_fails_atomically() {
        let result = SiteConfig::from_value(json!({"themeConfig": {"sidebar": [
            ["/", "Home"],
            {"title": "Preface"}
        ]}}));
        let err = result.unwrap_err();
        assert!(matches!(err, ModelError::MalformedEntry { .. }));
        assert!(err.to_string().contains("sidebar[1]"));
    }

    #[test]
    fn test_duplicate_paths_within_group_rejected() {
        let err = SiteConfig::builder("Docs")
            .group("A", "/a/", [("/a/x", "X"), ("/a/x", "Again")])
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateChildPath { .. }));
    }

    #[test]
    fn test_duplicate_paths_across_groups_accepted() {
        let site = SiteConfig::builder("Docs")
            .leaf("/shared", "Shared")
            .group("A", "/a/", [("/shared", "Shared")])
            .group("B", "/b/", [("/shared", "Shared")])
            .build()
            .unwrap();
        assert_eq!(site.page_paths().filter(|p| *p == "/shared").count(), 3);
    }

    #[test]
    fn test_empty_nav_target_rejected() {
        let err = SiteConfig::builder("Docs")
            .nav("Home", "")
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::EmptyTarget { index: 0, .. }));
    }

    #[test]
    fn test_empty_logo_rejected() {
        let err = SiteConfig::builder("Docs").logo("").build().unwrap_err();
        assert!(matches!(err, ModelError::EmptyLogo));
    }

    #[test]
    fn test_builder_matches_parsed_config() {
        let built = SiteConfig::builder("Docs")
            .description("Example")
            .head_link("link", [("rel", "icon"), ("href", "/logo.png")])
            .nav("Home", "/")
            .leaf("/", "Home")
            .group("Guide", "/guide/", [("/guide/setup.md", "Setup")])
            .build()
            .unwrap();

        let parsed = SiteConfig::from_value(json!({
            "title": "Docs",
            "description": "Example",
            "head": [["link", {"href": "/logo.png", "rel": "icon"}]],
            "themeConfig": {
                "nav": [{"text": "Home", "link": "/"}],
                "sidebar": [
                    ["/", "Home"],
                    {"title": "Guide", "path": "/guide/", "children": [["/guide/setup.md", "Setup"]]}
                ]
            }
        }))
        .unwrap();

        assert_eq!(built, parsed);
    }

    #[test]
    fn test_deserialize_validates() {
        let err = serde_json::from_value::<SiteConfig>(json!({
            "themeConfig": {"nav": [{"text": "Home", "link": ""}]}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Empty target"));

        let site: SiteConfig = serde_json::from_value(grbl_site()).unwrap();
        assert_eq!(site.title(), "Grbl 源码解析与移植");
    }

    #[test]
    fn test_wrong_typed_sidebar_entry_is_malformed() {
        let cases = [
            (json!({"title": "G", "path": 7}), "sidebar[2]"),
            (
                json!({"title": "G", "path": "/g/", "children": "oops"}),
                "sidebar[2]",
            ),
            (json!([1, 2]), "sidebar[2]"),
            (
                json!({"title": "G", "path": "/g/", "children": [["/g/a", 1]]}),
                "sidebar[2].children[0]",
            ),
        ];
        for (entry, position) in cases {
            let err = SiteConfig::from_value(json!({
                "themeConfig": {"sidebar": [["/", "H"], ["/a", "A"], entry]}
            }))
            .unwrap_err();
            assert!(
                matches!(err, ModelError::MalformedEntry { .. }),
                "Expected MalformedEntry, got {err:?}"
            );
            assert!(
                err.to_string().contains(position),
                "Expected error to name {position}, got: {err}"
            );
        }
    }

    #[test]
    fn test_from_value_wrong_shape() {
        let err = SiteConfig::from_value(json!({"themeConfig": {"sidebar": 3}})).unwrap_err();
        assert!(matches!(err, ModelError::Decode(_)));
    }
}
