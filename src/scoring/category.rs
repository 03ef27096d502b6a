//! Category inference from free text

use crate::config::CategoryConfig;

/// First category whose rule has a keyword in `name` or `description`.
///
/// Rules are checked in order, so a post about "an MCP tool" lands in
/// `mcp-servers` rather than `tooling`. Falls back to the default category.
pub fn infer_category<'a>(name: &str, description: &str, config: &'a CategoryConfig) -> &'a str {
    let combined = format!("{} {}", name, description).to_lowercase();
    config
        .rules
        .iter()
        .find(|rule| {
            rule.keywords
                .iter()
                .any(|k| !k.is_empty() && combined.contains(&k.to_lowercase()))
        })
        .map(|rule| rule.category.as_str())
        .unwrap_or(&config.default_category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategoryRule;

    fn infer(name: &str, description: &str) -> String {
        infer_category(name, description, &CategoryConfig::default()).to_string()
    }

    #[test]
    fn test_rules_in_order() {
        assert_eq!(infer("Postgres MCP", "a tool"), "mcp-servers");
        assert_eq!(infer("Model Context Protocol bridge", ""), "mcp-servers");
        assert_eq!(infer("Pre-commit hooks", "tooling for hooks"), "hooks");
        assert_eq!(infer("Slash helpers", ""), "slash-commands");
        assert_eq!(infer("", "a command pack"), "slash-commands");
        assert_eq!(infer("TDD workflow", ""), "workflows");
        assert_eq!(infer("VS Code extension", ""), "tooling");
        assert_eq!(infer("Review skill", ""), "skills");
        assert_eq!(infer("Powerline status bar", ""), "statusline");
        assert_eq!(infer("Example CLAUDE.md", ""), "claude-md-files");
        assert_eq!(infer("Desktop client", ""), "alternative-clients");
    }

    #[test]
    fn test_default_category() {
        assert_eq!(infer("Interview", "people talk about things"), "ecosystem");
        assert_eq!(infer("", ""), "ecosystem");
    }

    #[test]
    fn test_custom_rules() {
        let config = CategoryConfig {
            rules: vec![CategoryRule {
                category: "case-studies".to_string(),
                keywords: vec!["Case Study".to_string()],
            }],
            default_category: "misc".to_string(),
            ..Default::default()
        };
        assert_eq!(infer_category("A case study", "", &config), "case-studies");
        assert_eq!(infer_category("MCP", "", &config), "misc");
    }
}
