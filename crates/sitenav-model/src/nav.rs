//! Top navigation links and head entries.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

use crate::error::ModelError;
use crate::raw::{RawHeadLink, RawNavLink};

/// Where a navigation link points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// Site path starting with `/`.
    Internal(String),
    /// Fully qualified URL.
    External(Url),
}

impl LinkTarget {
    /// Classify a link target.
    ///
    /// Returns `None` for strings that are neither a site path nor an
    /// absolute URL with a host. Protocol-relative `//host/...` targets are
    /// not site paths and are rejected.
    pub fn parse(target: &str) -> Option<Self> {
        if target.starts_with('/') && !target.starts_with("//") {
            return Some(Self::Internal(target.to_owned()));
        }
        Url::parse(target)
            .ok()
            .filter(Url::has_host)
            .map(Self::External)
    }

    /// Target as it is handed to the renderer.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Internal(path) => path,
            Self::External(url) => url.as_str(),
        }
    }

    /// Returns true for links leaving the site.
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top navigation link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    label: String,
    target: LinkTarget,
}

impl NavLink {
    /// Display text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Link target.
    pub fn target(&self) -> &LinkTarget {
        &self.target
    }

    /// Validate the raw link declared at `nav[index]`.
    pub(crate) fn from_raw(raw: RawNavLink, index: usize) -> Result<Self, ModelError> {
        let link = raw.link.unwrap_or_default();
        if link.is_empty() {
            return Err(ModelError::EmptyTarget {
                index,
                label: raw.text,
            });
        }
        let target = LinkTarget::parse(&link)
            .ok_or(ModelError::InvalidTarget { index, target: link })?;

        Ok(Self {
            label: raw.text,
            target,
        })
    }
}

/// Element injected into every page's `<head>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadLink {
    tag: String,
    attrs: BTreeMap<String, String>,
    content: Option<String>,
}

impl HeadLink {
    /// Element name (e.g. `link`, `meta`).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Element attributes.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// Inner content, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

impl From<RawHeadLink> for HeadLink {
    fn from(raw: RawHeadLink) -> Self {
        match raw {
            RawHeadLink::Attrs(tag, attrs) => Self {
                tag,
                attrs,
                content: None,
            },
            RawHeadLink::WithContent(tag, attrs, content) => Self {
                tag,
                attrs,
                content: Some(content),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn raw_link(text: &str, link: Option<&str>) -> RawNavLink {
        RawNavLink {
            text: text.to_owned(),
            link: link.map(str::to_owned),
        }
    }

    #[test]
    fn test_parse_internal_target() {
        let target = LinkTarget::parse("/guide/").unwrap();
        assert_eq!(target, LinkTarget::Internal("/guide/".to_owned()));
        assert!(!target.is_external());
    }

    #[test]
    fn test_parse_external_target() {
        let target = LinkTarget::parse("https://github.com/MillerRen/grbl-learning").unwrap();
        assert!(target.is_external());
        assert_eq!(
            target.as_str(),
            "https://github.com/MillerRen/grbl-learning"
        );
    }

    #[test]
    fn test_parse_external_target_is_normalized() {
        let target = LinkTarget::parse("https://github.com").unwrap();
        assert_eq!(target.to_string(), "https://github.com/");
        assert_eq!(LinkTarget::parse(target.as_str()).unwrap(), target);
    }

    #[test]
    fn test_parse_relative_target_rejected() {
        assert!(LinkTarget::parse("guide/").is_none());
        assert!(LinkTarget::parse("mailto:someone@example.com").is_none());
    }

    #[test]
    fn test_parse_protocol_relative_target_rejected() {
        assert!(LinkTarget::parse("//cdn.example.com/x").is_none());

        let err = NavLink::from_raw(raw_link("CDN", Some("//cdn.example.com/x")), 0).unwrap_err();
        assert!(matches!(err, ModelError::InvalidTarget { index: 0, .. }));
    }

    #[test]
    fn test_nav_link_from_raw() {
        let link = NavLink::from_raw(raw_link("Home", Some("/")), 0).unwrap();
        assert_eq!(link.label(), "Home");
        assert_eq!(link.target().as_str(), "/");
    }

    #[test]
    fn test_nav_link_empty_target_rejected() {
        let err = NavLink::from_raw(raw_link("Home", Some("")), 2).unwrap_err();
        assert!(matches!(err, ModelError::EmptyTarget { index: 2, ref label } if label == "Home"));
    }

    #[test]
    fn test_nav_link_missing_target_rejected() {
        let err = NavLink::from_raw(raw_link("Home", None), 0).unwrap_err();
        assert!(matches!(err, ModelError::EmptyTarget { .. }));
    }

    #[test]
    fn test_nav_link_invalid_target_rejected() {
        let err = NavLink::from_raw(raw_link("Guide", Some("guide.md")), 1).unwrap_err();
        assert!(matches!(err, ModelError::InvalidTarget { index: 1, .. }));
        assert!(err.to_string().contains("guide.md"));
    }

    #[test]
    fn test_head_link_from_raw() {
        let attrs = BTreeMap::from([
            ("rel".to_owned(), "icon".to_owned()),
            ("href".to_owned(), "/logo.png".to_owned()),
        ]);
        let head = HeadLink::from(RawHeadLink::Attrs("link".to_owned(), attrs));
        assert_eq!(head.tag(), "link");
        assert_eq!(head.attrs()["rel"], "icon");
        assert_eq!(head.content(), None);

        let head = HeadLink::from(RawHeadLink::WithContent(
            "script".to_owned(),
            BTreeMap::new(),
            "init()".to_owned(),
        ));
        assert_eq!(head.content(), Some("init()"));
    }
}
