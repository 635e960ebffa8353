//! Configuration shapes as they appear in source files.
//!
//! These types accept everything the renderer's configuration literal can
//! express and perform no validation. [`SiteConfig`](crate::SiteConfig) is
//! built from them through a single classification and validation pass.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Site configuration as declared by the maintainer.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSiteConfig {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Head entries, in declaration order.
    pub head: Vec<RawHeadLink>,
    /// Theme section.
    #[serde(rename = "themeConfig")]
    pub theme_config: RawThemeConfig,
}

/// `[tag, attrs]` or `[tag, attrs, content]` head entry.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawHeadLink {
    /// Element with inner content.
    WithContent(String, BTreeMap<String, String>, String),
    /// Element with attributes only.
    Attrs(String, BTreeMap<String, String>),
}

/// `themeConfig` section.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawThemeConfig {
    /// Logo asset reference.
    pub logo: Option<String>,
    /// Top navigation links.
    pub nav: Vec<RawNavLink>,
    /// Sidebar declaration.
    pub sidebar: Vec<RawSidebarEntry>,
}

/// `{text, link}` navigation link.
#[derive(Clone, Debug, Deserialize)]
pub struct RawNavLink {
    /// Display text.
    pub text: String,
    /// Link target. Missing targets are rejected during construction.
    #[serde(default)]
    pub link: Option<String>,
}

/// One sidebar declaration before its variant is known.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawSidebarEntry {
    /// Bare path string.
    Path(String),
    /// `[path, label]` shorthand.
    Pair(Vec<String>),
    /// `{title, path}` leaf or `{title, path, children}` group.
    Object(RawSidebarObject),
    /// Anything else; rejected with its position during classification.
    Other(Value),
}

/// Object-shaped sidebar declaration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSidebarObject {
    /// Group title or leaf label.
    pub title: Option<String>,
    /// Landing page (groups) or page (leaves).
    pub path: Option<String>,
    /// Present only on groups.
    pub children: Option<Vec<RawSidebarEntry>>,
}

impl RawSidebarEntry {
    /// `[path, label]` shorthand.
    pub fn pair(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Pair(vec![path.into(), label.into()])
    }

    /// `{title, path, children}` group.
    pub fn group(
        title: impl Into<String>,
        path: impl Into<String>,
        children: Vec<RawSidebarEntry>,
    ) -> Self {
        Self::Object(RawSidebarObject {
            title: Some(title.into()),
            path: Some(path.into()),
            children: Some(children),
        })
    }
}
