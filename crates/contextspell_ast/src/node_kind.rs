//! Grammar symbol tags for ConTeXt syntax trees.
//!
//! The string form of each kind is the grammar symbol name used in
//! S-expressions and configuration files (`text`, `command_name`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Node kinds of a ConTeXt concrete syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum NodeKind {
    // Areas
    /// Root of every tree.
    Document,
    /// Everything before `\starttext` or `\startcomponent`.
    Preamble,
    /// Body of the document.
    Main,
    /// Everything after `\stoptext` or `\stopcomponent`.
    Postamble,
    /// Identifier following `\startcomponent`.
    ComponentId,
    /// `\project` command.
    ProjectCommand,
    /// Identifier following `\project`.
    ProjectId,
    /// `\product` command.
    ProductCommand,
    /// Identifier following `\product`.
    ProductId,
    /// `\environment` command.
    EnvironmentCommand,
    /// Identifier following `\environment`.
    EnvironmentId,

    // Groups
    /// `{ ... }` or `\bgroup ... \egroup`.
    BraceGroup,
    /// `\start ... \stop`.
    CommandGroup,

    // Math
    /// `$ ... $`.
    InlineMath,
    /// Brace group inside inline math.
    MathGroup,
    /// Raw math content.
    MathText,

    // Commands
    /// A command with its blocks and scopes.
    Command,
    /// `\name` part of a command.
    CommandName,
    /// `[]`.
    EmptyBlock,
    /// `[keyword, keyword]`.
    OptionBlock,
    /// A bare keyword inside an option block.
    Keyword,
    /// `[key=value, ...]`.
    SettingsBlock,
    /// `key=value` inside a settings block.
    Setting,
    /// `title=value` inside a settings block.
    TitleSetting,
    /// `subtitle=value` inside a settings block.
    SubtitleSetting,
    /// Key of a setting.
    Key,
    /// Value of a setting.
    Value,
    /// Unbraced value text.
    ValueText,
    /// `{ ... }` inside a value.
    ValueBraceGroup,
    /// Text inside a value brace group.
    ValueBraceGroupText,
    /// `{ ... }` argument of a command.
    CommandScope,

    // Macros
    /// `#1` through `#9`.
    MacroArgument,

    // Text
    /// Run of prose separated by paragraph marks.
    TextBlock,
    /// Free-running prose. This is the kind that gets spellchecked.
    Text,
    /// Blank line between paragraphs.
    ParagraphMark,

    // Escapes and extras
    /// Escaped special character such as `\%`.
    Escaped,
    /// `%` comment to end of line.
    LineComment,

    // Inclusions
    /// MetaPost, TikZ or Lua code environment.
    CodeInclusion,
    /// Raw body of a code environment.
    CodeBody,
    /// Verbatim typing environment.
    TypingInclusion,
    /// Raw body of a typing environment.
    TypingBody,

    /// Input the parser could not make sense of.
    #[serde(rename = "ERROR")]
    Error,
}

impl NodeKind {
    /// Every node kind, in declaration order.
    pub const ALL: &'static [NodeKind] = &[
        NodeKind::Document,
        NodeKind::Preamble,
        NodeKind::Main,
        NodeKind::Postamble,
        NodeKind::ComponentId,
        NodeKind::ProjectCommand,
        NodeKind::ProjectId,
        NodeKind::ProductCommand,
        NodeKind::ProductId,
        NodeKind::EnvironmentCommand,
        NodeKind::EnvironmentId,
        NodeKind::BraceGroup,
        NodeKind::CommandGroup,
        NodeKind::InlineMath,
        NodeKind::MathGroup,
        NodeKind::MathText,
        NodeKind::Command,
        NodeKind::CommandName,
        NodeKind::EmptyBlock,
        NodeKind::OptionBlock,
        NodeKind::Keyword,
        NodeKind::SettingsBlock,
        NodeKind::Setting,
        NodeKind::TitleSetting,
        NodeKind::SubtitleSetting,
        NodeKind::Key,
        NodeKind::Value,
        NodeKind::ValueText,
        NodeKind::ValueBraceGroup,
        NodeKind::ValueBraceGroupText,
        NodeKind::CommandScope,
        NodeKind::MacroArgument,
        NodeKind::TextBlock,
        NodeKind::Text,
        NodeKind::ParagraphMark,
        NodeKind::Escaped,
        NodeKind::LineComment,
        NodeKind::CodeInclusion,
        NodeKind::CodeBody,
        NodeKind::TypingInclusion,
        NodeKind::TypingBody,
        NodeKind::Error,
    ];

    /// Returns the grammar symbol name of this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Preamble => "preamble",
            NodeKind::Main => "main",
            NodeKind::Postamble => "postamble",
            NodeKind::ComponentId => "component_id",
            NodeKind::ProjectCommand => "project_command",
            NodeKind::ProjectId => "project_id",
            NodeKind::ProductCommand => "product_command",
            NodeKind::ProductId => "product_id",
            NodeKind::EnvironmentCommand => "environment_command",
            NodeKind::EnvironmentId => "environment_id",
            NodeKind::BraceGroup => "brace_group",
            NodeKind::CommandGroup => "command_group",
            NodeKind::InlineMath => "inline_math",
            NodeKind::MathGroup => "math_group",
            NodeKind::MathText => "math_text",
            NodeKind::Command => "command",
            NodeKind::CommandName => "command_name",
            NodeKind::EmptyBlock => "empty_block",
            NodeKind::OptionBlock => "option_block",
            NodeKind::Keyword => "keyword",
            NodeKind::SettingsBlock => "settings_block",
            NodeKind::Setting => "setting",
            NodeKind::TitleSetting => "title_setting",
            NodeKind::SubtitleSetting => "subtitle_setting",
            NodeKind::Key => "key",
            NodeKind::Value => "value",
            NodeKind::ValueText => "value_text",
            NodeKind::ValueBraceGroup => "value_brace_group",
            NodeKind::ValueBraceGroupText => "value_brace_group_text",
            NodeKind::CommandScope => "command_scope",
            NodeKind::MacroArgument => "macro_argument",
            NodeKind::TextBlock => "text_block",
            NodeKind::Text => "text",
            NodeKind::ParagraphMark => "paragraph_mark",
            NodeKind::Escaped => "escaped",
            NodeKind::LineComment => "line_comment",
            NodeKind::CodeInclusion => "code_inclusion",
            NodeKind::CodeBody => "code_body",
            NodeKind::TypingInclusion => "typing_inclusion",
            NodeKind::TypingBody => "typing_body",
            NodeKind::Error => "ERROR",
        }
    }

    /// Returns true if nodes of this kind carry prose rather than markup.
    #[inline]
    pub const fn is_prose(&self) -> bool {
        matches!(
            self,
            NodeKind::Text | NodeKind::ValueText | NodeKind::ValueBraceGroupText
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known node kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node kind `{0}`")]
pub struct UnknownNodeKind(pub String);

impl FromStr for NodeKind {
    type Err = UnknownNodeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownNodeKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NodeKind::Text, "text")]
    #[case(NodeKind::CommandName, "command_name")]
    #[case(NodeKind::ValueBraceGroupText, "value_brace_group_text")]
    #[case(NodeKind::Error, "ERROR")]
    fn test_as_str(#[case] kind: NodeKind, #[case] expected: &str) {
        assert_eq!(kind.as_str(), expected);
        assert_eq!(kind.to_string(), expected);
    }

    #[test]
    fn test_from_str_matches_as_str_for_every_kind() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.as_str().parse::<NodeKind>(), Ok(*kind));
        }
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "paragraph".parse::<NodeKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown node kind `paragraph`");
    }

    #[test]
    fn test_serde_uses_grammar_names() {
        for kind in NodeKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.as_str().to_string()));
        }
    }

    #[test]
    fn test_prose_kinds() {
        assert!(NodeKind::Text.is_prose());
        assert!(NodeKind::ValueBraceGroupText.is_prose());
        assert!(!NodeKind::CommandName.is_prose());
        assert!(!NodeKind::MathText.is_prose());
    }
}
