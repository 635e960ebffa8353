//! `sitenav tree` command implementation.

use std::path::PathBuf;

use clap::Args;
use sitenav_config::LoadedSite;
use sitenav_model::SiteConfig;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long, env = "SITENAV_CONFIG")]
    config: Option<PathBuf>,
}

impl TreeArgs {
    /// Execute the tree command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let loaded = LoadedSite::load(self.config.as_deref())?;

        for line in tree_lines(&loaded.site) {
            output.data(&line);
        }
        output.data_dim(&format!("{} pages", loaded.site.page_paths().count()));

        Ok(())
    }
}

/// One line per sidebar node, indented by depth.
///
/// Groups are marked with `+`, pages with `-`.
fn tree_lines(site: &SiteConfig) -> Vec<String> {
    site.walk()
        .map(|(depth, node)| {
            let marker = if node.is_group() { '+' } else { '-' };
            format!(
                "{}{marker} {}  {}",
                "  ".repeat(depth),
                node.label(),
                node.path()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_tree_lines() {
        let site = SiteConfig::builder("Docs")
            .leaf("/", "首页")
            .group(
                "解析",
                "/analysis/",
                [
                    ("/analysis/architecture.md", "架构"),
                    ("/analysis/main.md", "入口"),
                ],
            )
            .leaf("/porting/", "移植")
            .build()
            .unwrap();

        assert_eq!(
            tree_lines(&site),
            vec![
                "- 首页  /",
                "+ 解析  /analysis/",
                "  - 架构  /analysis/architecture.md",
                "  - 入口  /analysis/main.md",
                "- 移植  /porting/",
            ]
        );
    }

    #[test]
    fn test_tree_lines_empty_sidebar() {
        let site = SiteConfig::builder("Docs").build().unwrap();
        assert!(tree_lines(&site).is_empty());
    }
}
