//! Recursive-descent construction of the ConTeXt syntax tree.
//!
//! The builder works on bytes. Every character it stops at is ASCII, so node
//! boundaries always fall on UTF-8 character boundaries.

use contextspell_ast::{AstArena, NodeData, NodeKind, Span, SyntaxNode};

use super::syntax::{
    ESCAPABLE, Inclusion, inclusion, is_id_byte, is_inline_space, is_keyword_byte, is_name_byte,
    is_space,
};
use crate::LineIndex;

/// Deepest group nesting the builder descends into.
pub const MAX_NESTING: usize = 256;

/// Where a run of content ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Until {
    /// End of input.
    End,
    /// `}` or `\egroup`.
    Brace,
    /// `\stop` closing a `\start` group.
    Stop,
    /// `\starttext` or `\startcomponent`.
    TextStart,
    /// `\stoptext` or `\stopcomponent`.
    TextStop,
}

/// Builds the nodes of one document into an arena.
pub(super) struct Builder<'a> {
    arena: &'a AstArena,
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    lines: LineIndex,
    depth: usize,
    too_deep: Option<usize>,
}

impl<'a> Builder<'a> {
    pub(super) fn new(arena: &'a AstArena, source: &'a str) -> Self {
        Self {
            arena,
            source,
            bytes: source.as_bytes(),
            pos: 0,
            lines: LineIndex::new(source),
            depth: 0,
            too_deep: None,
        }
    }

    /// Byte offset the builder has consumed up to.
    pub(super) fn position(&self) -> usize {
        self.pos
    }

    /// Offset of the first group nested deeper than [`MAX_NESTING`], if any.
    pub(super) fn too_deep(&self) -> Option<usize> {
        self.too_deep
    }

    /// Parses the whole source into a `document` node.
    pub(super) fn document(&mut self) -> SyntaxNode<'a> {
        let len = self.bytes.len();
        let mut items = self.contents(Until::TextStart);

        let Some(marker) = self.control_word() else {
            let areas = match self.area(NodeKind::Main, &items) {
                Some(main) => vec![main],
                None => Vec::new(),
            };
            return self.node(NodeKind::Document, 0, len, &areas);
        };

        let preamble_start = items.first().map_or(self.pos, |n| n.span.start as usize);
        self.pos += 1 + marker.len();
        if marker == "startcomponent" {
            items.extend(self.id_argument(NodeKind::ComponentId, true));
        }
        let preamble_end = self.pos;
        let preamble = self.node(NodeKind::Preamble, preamble_start, preamble_end, &items);

        let body = self.contents(Until::TextStop);
        let main = self
            .area(NodeKind::Main, &body)
            .unwrap_or_else(|| self.leaf(NodeKind::Main, preamble_end, preamble_end));
        let mut areas = vec![preamble, main];

        if let Some(marker) = self.control_word() {
            let postamble_start = self.pos;
            self.pos += 1 + marker.len();
            let marker_end = self.pos;
            let trailer = self.contents(Until::End);
            let end = trailer.last().map_or(marker_end, |n| n.span.end as usize);
            areas.push(self.node(NodeKind::Postamble, postamble_start, end, &trailer));
        }

        self.node(NodeKind::Document, 0, len, &areas)
    }

    // ---------------------------------------------------------------------
    // Node construction
    // ---------------------------------------------------------------------

    fn node(
        &self,
        kind: NodeKind,
        start: usize,
        end: usize,
        children: &[SyntaxNode<'a>],
    ) -> SyntaxNode<'a> {
        let children: &'a [SyntaxNode<'a>] = if children.is_empty() {
            &[]
        } else {
            self.arena.alloc_slice_copy(children)
        };
        let (start, end) = (start as u32, end as u32);
        SyntaxNode::new_parent(
            kind,
            Span::new(start, end),
            self.lines.point(start),
            self.lines.point(end),
            children,
        )
    }

    fn leaf(&self, kind: NodeKind, start: usize, end: usize) -> SyntaxNode<'a> {
        self.node(kind, start, end, &[])
    }

    /// Wraps a non-empty item list in an area node spanning the items.
    fn area(&self, kind: NodeKind, items: &[SyntaxNode<'a>]) -> Option<SyntaxNode<'a>> {
        let (first, last) = (items.first()?, items.last()?);
        Some(self.node(kind, first.span.start as usize, last.span.end as usize, items))
    }

    /// Consumes `len` bytes as an `ERROR` node.
    fn error(&mut self, len: usize) -> SyntaxNode<'a> {
        let start = self.pos;
        self.pos += len;
        self.leaf(NodeKind::Error, start, self.pos)
    }

    /// A zero-width `ERROR` node marking a missing closer.
    fn missing(&self) -> SyntaxNode<'a> {
        self.leaf(NodeKind::Error, self.pos, self.pos)
    }

    /// Finishes a run started at `start`, dropping trailing whitespace.
    fn trimmed(&mut self, kind: NodeKind, start: usize) -> SyntaxNode<'a> {
        let run = self.source[start..self.pos].trim_end_matches(|c: char| c.is_ascii_whitespace());
        self.pos = start + run.len();
        self.leaf(kind, start, self.pos)
    }

    // ---------------------------------------------------------------------
    // Byte-level helpers
    // ---------------------------------------------------------------------

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline]
    fn at_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        while let Some(b) = self.peek()
            && pred(b)
        {
            self.pos += 1;
        }
    }

    /// Skips spaces and at most one line ending.
    fn skip_argument_gap(&mut self) {
        self.skip_while(is_inline_space);
        if self.peek() == Some(b'\r') {
            self.pos += 1;
        }
        if self.peek() == Some(b'\n') {
            self.pos += 1;
        }
        self.skip_while(is_inline_space);
    }

    /// Returns the control word (`\name`) at the current position, without
    /// the backslash.
    fn control_word(&self) -> Option<&'a str> {
        let rest = self.bytes.get(self.pos..)?;
        if rest.first() != Some(&b'\\') {
            return None;
        }
        let len = rest[1..].iter().take_while(|&&b| is_name_byte(b)).count();
        (len > 0).then(|| &self.source[self.pos + 1..self.pos + 1 + len])
    }

    fn escape_follows(&self) -> bool {
        self.peek() == Some(b'\\') && self.peek_at(1).is_some_and(|b| ESCAPABLE.contains(&b))
    }

    fn at_terminator(&self, until: Until) -> bool {
        match until {
            Until::End => false,
            Until::Brace => self.peek() == Some(b'}') || self.control_word() == Some("egroup"),
            Until::Stop => self.control_word() == Some("stop"),
            Until::TextStart => matches!(self.control_word(), Some("starttext" | "startcomponent")),
            Until::TextStop => matches!(self.control_word(), Some("stoptext" | "stopcomponent")),
        }
    }

    /// Enters a nested group. Past [`MAX_NESTING`] the offset is recorded and
    /// the rest of the input is skipped, so every open loop ends at EOF.
    fn descend(&mut self) -> bool {
        if self.depth >= MAX_NESTING {
            self.too_deep.get_or_insert(self.pos);
            self.pos = self.bytes.len();
            return false;
        }
        self.depth += 1;
        true
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    /// Consumes a `}` or `\egroup`, or records that it is missing.
    fn close_brace(&mut self, children: &mut Vec<SyntaxNode<'a>>) {
        if self.peek() == Some(b'}') {
            self.pos += 1;
        } else if self.control_word() == Some("egroup") {
            self.pos += "\\egroup".len();
        } else {
            children.push(self.missing());
        }
    }

    // ---------------------------------------------------------------------
    // Content
    // ---------------------------------------------------------------------

    fn contents(&mut self, until: Until) -> Vec<SyntaxNode<'a>> {
        let mut items = Vec::new();
        loop {
            self.skip_while(is_space);
            if self.at_eof() || self.at_terminator(until) {
                return items;
            }
            items.push(self.content());
        }
    }

    fn content(&mut self) -> SyntaxNode<'a> {
        match self.peek() {
            Some(b'%') => self.line_comment(),
            Some(b'\\') => self.backslash_item(),
            Some(b'{') => self.brace_group(1),
            Some(b'}') => self.error(1),
            Some(b'$') => self.inline_math(),
            Some(b'#') if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                let start = self.pos;
                self.pos += 2;
                self.leaf(NodeKind::MacroArgument, start, self.pos)
            }
            _ => self.text_block(),
        }
    }

    fn line_comment(&mut self) -> SyntaxNode<'a> {
        let start = self.pos;
        self.skip_while(|b| b != b'\n');
        self.trimmed(NodeKind::LineComment, start)
    }

    fn escaped(&mut self) -> SyntaxNode<'a> {
        let start = self.pos;
        self.pos += 2;
        self.leaf(NodeKind::Escaped, start, self.pos)
    }

    fn backslash_item(&mut self) -> SyntaxNode<'a> {
        if self.peek_at(1).is_none() {
            return self.error(1);
        }
        if self.escape_follows() {
            return self.escaped();
        }
        let Some(name) = self.control_word() else {
            return self.control_symbol();
        };
        match name {
            "start" => self.command_group(),
            "bgroup" => self.brace_group(1 + name.len()),
            "egroup" => self.error(1 + name.len()),
            "project" => self.id_command(NodeKind::ProjectCommand, NodeKind::ProjectId, name),
            "product" => self.id_command(NodeKind::ProductCommand, NodeKind::ProductId, name),
            "environment" => {
                self.id_command(NodeKind::EnvironmentCommand, NodeKind::EnvironmentId, name)
            }
            _ => match name.strip_prefix("start").and_then(|env| Some((env, inclusion(env)?))) {
                Some((environment, kind)) => self.inclusion(kind, environment),
                None => self.command(name),
            },
        }
    }

    /// A backslash followed by a single non-letter, such as `\,` or `\-`.
    fn control_symbol(&mut self) -> SyntaxNode<'a> {
        let start = self.pos;
        let len = self.source[start + 1..].chars().next().map_or(0, char::len_utf8);
        self.pos += 1 + len;
        let name = self.leaf(NodeKind::CommandName, start, self.pos);
        self.node(NodeKind::Command, start, self.pos, &[name])
    }

    fn brace_group(&mut self, open_len: usize) -> SyntaxNode<'a> {
        if !self.descend() {
            return self.missing();
        }
        let start = self.pos;
        self.pos += open_len;
        let mut children = self.contents(Until::Brace);
        self.close_brace(&mut children);
        self.ascend();
        self.node(NodeKind::BraceGroup, start, self.pos, &children)
    }

    fn command_group(&mut self) -> SyntaxNode<'a> {
        if !self.descend() {
            return self.missing();
        }
        let start = self.pos;
        self.pos += "\\start".len();
        let mut children = Vec::new();
        self.skip_while(is_inline_space);
        if self.peek() == Some(b'[') {
            children.push(self.bracket_block());
        }
        children.extend(self.contents(Until::Stop));
        if self.control_word() == Some("stop") {
            self.pos += "\\stop".len();
        } else {
            children.push(self.missing());
        }
        self.ascend();
        self.node(NodeKind::CommandGroup, start, self.pos, &children)
    }

    fn id_command(&mut self, kind: NodeKind, id_kind: NodeKind, name: &str) -> SyntaxNode<'a> {
        let start = self.pos;
        self.pos += 1 + name.len();
        let children = self.id_argument(id_kind, false);
        self.node(kind, start, self.pos, &children)
    }

    /// Parses ` id`, `[id]` or ` [id]` after a project-structure command.
    fn id_argument(&mut self, kind: NodeKind, allow_star: bool) -> Vec<SyntaxNode<'a>> {
        self.skip_while(is_inline_space);
        let bracketed = self.peek() == Some(b'[');
        if bracketed {
            self.pos += 1;
        }

        let mut children = Vec::new();
        let start = self.pos;
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() || (allow_star && b == b'*') => {
                self.pos += 1;
                self.skip_while(is_id_byte);
                children.push(self.leaf(kind, start, self.pos));
            }
            _ => children.push(self.missing()),
        }

        if bracketed {
            if self.peek() == Some(b']') {
                self.pos += 1;
            } else {
                children.push(self.missing());
            }
        }
        children
    }

    fn inclusion(&mut self, inclusion: Inclusion, environment: &'a str) -> SyntaxNode<'a> {
        let (kind, body_kind) = match inclusion {
            Inclusion::Code => (NodeKind::CodeInclusion, NodeKind::CodeBody),
            Inclusion::Typing => (NodeKind::TypingInclusion, NodeKind::TypingBody),
        };
        let start = self.pos;
        self.pos += "\\start".len() + environment.len();

        let body_start = self.pos;
        let stop = self.find_stop(environment);
        let body_end = stop.unwrap_or(self.bytes.len());
        let mut children = vec![self.leaf(body_kind, body_start, body_end)];
        match stop {
            Some(at) => self.pos = at + "\\stop".len() + environment.len(),
            None => {
                self.pos = body_end;
                children.push(self.missing());
            }
        }

        self.node(kind, start, self.pos, &children)
            .with_data(NodeData::Environment(environment))
    }

    /// Finds `\stop<environment>` not followed by another name character.
    fn find_stop(&self, environment: &str) -> Option<usize> {
        let marker = format!("\\stop{environment}");
        let mut from = self.pos;
        while let Some(found) = self.source[from..].find(&marker) {
            let at = from + found;
            let after = at + marker.len();
            if !self.bytes.get(after).is_some_and(|&b| is_name_byte(b)) {
                return Some(at);
            }
            from = after;
        }
        None
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    fn command(&mut self, name: &str) -> SyntaxNode<'a> {
        if !self.descend() {
            return self.missing();
        }
        let start = self.pos;
        self.pos += 1 + name.len();
        let mut children = vec![self.leaf(NodeKind::CommandName, start, self.pos)];

        loop {
            let before = self.pos;
            self.skip_argument_gap();
            if self.peek() != Some(b'[') {
                self.pos = before;
                break;
            }
            children.push(self.bracket_block());
        }

        loop {
            let before = self.pos;
            self.skip_argument_gap();
            if self.peek() != Some(b'{') {
                self.pos = before;
                break;
            }
            let scope_start = self.pos;
            self.pos += 1;
            let mut scope = self.contents(Until::Brace);
            self.close_brace(&mut scope);
            children.push(self.node(NodeKind::CommandScope, scope_start, self.pos, &scope));
        }

        self.ascend();
        self.node(NodeKind::Command, start, self.pos, &children)
    }

    fn bracket_block(&mut self) -> SyntaxNode<'a> {
        let start = self.pos;
        self.pos += 1;
        self.skip_while(is_space);
        if self.peek() == Some(b']') {
            self.pos += 1;
            return self.leaf(NodeKind::EmptyBlock, start, self.pos);
        }
        if self.setting_ahead() {
            self.settings_block(start)
        } else {
            self.option_block(start)
        }
    }

    /// Returns true if an `=` appears at the top level of the bracket block
    /// the builder is inside.
    fn setting_ahead(&self) -> bool {
        let (mut brackets, mut braces) = (0usize, 0usize);
        let mut i = self.pos;
        while let Some(&b) = self.bytes.get(i) {
            match b {
                b'\\' => i += 1,
                b'{' => braces += 1,
                b'}' => braces = braces.saturating_sub(1),
                b'[' => brackets += 1,
                b']' if brackets == 0 => return false,
                b']' => brackets -= 1,
                b'=' if brackets == 0 && braces == 0 => return true,
                _ => {}
            }
            i += 1;
        }
        false
    }

    fn option_block(&mut self, start: usize) -> SyntaxNode<'a> {
        let mut children = Vec::new();
        loop {
            self.skip_while(|b| is_space(b) || b == b',');
            match self.peek() {
                None => {
                    children.push(self.missing());
                    break;
                }
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(b'%') => children.push(self.line_comment()),
                Some(b) if is_keyword_byte(b) => {
                    let keyword_start = self.pos;
                    self.skip_while(is_keyword_byte);
                    children.push(self.leaf(NodeKind::Keyword, keyword_start, self.pos));
                }
                Some(_) => children.push(self.error(1)),
            }
        }
        self.node(NodeKind::OptionBlock, start, self.pos, &children)
    }

    fn settings_block(&mut self, start: usize) -> SyntaxNode<'a> {
        let mut children = Vec::new();
        loop {
            self.skip_while(|b| is_space(b) || b == b',');
            match self.peek() {
                None => {
                    children.push(self.missing());
                    break;
                }
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(b'%') => children.push(self.line_comment()),
                Some(b) if is_keyword_byte(b) => children.push(self.setting()),
                Some(_) => children.push(self.error(1)),
            }
        }
        self.node(NodeKind::SettingsBlock, start, self.pos, &children)
    }

    fn setting(&mut self) -> SyntaxNode<'a> {
        let start = self.pos;
        self.skip_while(is_keyword_byte);
        let key = self.leaf(NodeKind::Key, start, self.pos);
        let key_text = &self.source[start..self.pos];

        self.skip_while(is_space);
        if self.peek() != Some(b'=') {
            let missing = self.missing();
            return self.node(NodeKind::Setting, start, key.span.end as usize, &[key, missing]);
        }
        self.pos += 1;
        let mut end = self.pos;
        let value = self.value();
        if let Some(value) = &value {
            end = value.span.end as usize;
        }

        let (kind, children) = match key_text {
            "title" => (NodeKind::TitleSetting, value.into_iter().collect::<Vec<_>>()),
            "subtitle" => (NodeKind::SubtitleSetting, value.into_iter().collect()),
            _ => (NodeKind::Setting, [key].into_iter().chain(value).collect()),
        };
        self.node(kind, start, end, &children)
    }

    fn value(&mut self) -> Option<SyntaxNode<'a>> {
        let mut children = Vec::new();
        loop {
            self.skip_while(is_space);
            match self.peek() {
                None | Some(b',' | b']') => break,
                Some(b'%') => children.push(self.line_comment()),
                Some(b'\\') => children.push(self.value_backslash()),
                Some(b'{') => children.push(self.value_brace_group()),
                Some(b'}' | b'[') => children.push(self.error(1)),
                Some(_) => {
                    let start = self.pos;
                    self.skip_while(|b| !matches!(b, b'\\' | b'{' | b'}' | b'[' | b']' | b','));
                    children.push(self.trimmed(NodeKind::ValueText, start));
                }
            }
        }
        let start = children.first()?.span.start as usize;
        let end = children.last()?.span.end as usize;
        Some(self.node(NodeKind::Value, start, end, &children))
    }

    /// Escapes and commands inside setting values. Groups and inclusions are
    /// not recognized here.
    fn value_backslash(&mut self) -> SyntaxNode<'a> {
        if self.peek_at(1).is_none() {
            return self.error(1);
        }
        if self.escape_follows() {
            return self.escaped();
        }
        match self.control_word() {
            Some(name) => self.command(name),
            None => self.control_symbol(),
        }
    }

    fn value_brace_group(&mut self) -> SyntaxNode<'a> {
        if !self.descend() {
            return self.missing();
        }
        let start = self.pos;
        self.pos += 1;
        let mut children = Vec::new();
        loop {
            self.skip_while(is_space);
            match self.peek() {
                None => {
                    children.push(self.missing());
                    break;
                }
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b'{') => children.push(self.value_brace_group()),
                Some(b'\\') => children.push(self.value_backslash()),
                Some(b'%') => children.push(self.line_comment()),
                Some(_) => {
                    let text_start = self.pos;
                    self.skip_while(|b| !matches!(b, b'\\' | b'{' | b'}' | b'%'));
                    children.push(self.trimmed(NodeKind::ValueBraceGroupText, text_start));
                }
            }
        }
        self.ascend();
        self.node(NodeKind::ValueBraceGroup, start, self.pos, &children)
    }

    // ---------------------------------------------------------------------
    // Math
    // ---------------------------------------------------------------------

    fn inline_math(&mut self) -> SyntaxNode<'a> {
        let start = self.pos;
        self.pos += 1;
        let children = self.math_items(b'$');
        self.node(NodeKind::InlineMath, start, self.pos, &children)
    }

    fn math_group(&mut self) -> SyntaxNode<'a> {
        if !self.descend() {
            return self.missing();
        }
        let start = self.pos;
        self.pos += 1;
        let children = self.math_items(b'}');
        self.ascend();
        self.node(NodeKind::MathGroup, start, self.pos, &children)
    }

    /// Parses math content up to and including `close`.
    fn math_items(&mut self, close: u8) -> Vec<SyntaxNode<'a>> {
        let mut children = Vec::new();
        loop {
            self.skip_while(is_space);
            match self.peek() {
                None => {
                    children.push(self.missing());
                    break;
                }
                Some(b) if b == close => {
                    self.pos += 1;
                    break;
                }
                Some(b'{') => children.push(self.math_group()),
                Some(b'}' | b'$') => children.push(self.error(1)),
                Some(b'%') => children.push(self.line_comment()),
                Some(b'\\') if self.escape_follows() => children.push(self.escaped()),
                Some(_) => children.push(self.math_text()),
            }
        }
        children
    }

    fn math_text(&mut self) -> SyntaxNode<'a> {
        let start = self.pos;
        self.pos += 1;
        while let Some(b) = self.peek() {
            if matches!(b, b'$' | b'{' | b'}' | b'%') || self.escape_follows() {
                break;
            }
            self.pos += 1;
        }
        self.trimmed(NodeKind::MathText, start)
    }

    // ---------------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------------

    fn text_block(&mut self) -> SyntaxNode<'a> {
        let start = self.pos;
        let mut children = vec![self.text()];

        loop {
            let gap_start = self.pos;
            let mut newlines = 0;
            while let Some(b) = self.peek()
                && is_space(b)
            {
                newlines += usize::from(b == b'\n');
                self.pos += 1;
            }
            if newlines < 2 || self.at_eof() {
                self.pos = gap_start;
                break;
            }
            children.push(self.leaf(NodeKind::ParagraphMark, gap_start, self.pos));
            if !self.text_follows() {
                break;
            }
            children.push(self.text());
        }

        let end = children.last().map_or(start, |n| n.span.end as usize);
        self.node(NodeKind::TextBlock, start, end, &children)
    }

    fn text_follows(&self) -> bool {
        match self.peek() {
            None | Some(b'\\' | b'{' | b'}' | b'$' | b'%') => false,
            Some(b'#') => !self.peek_at(1).is_some_and(|b| b.is_ascii_digit()),
            Some(_) => true,
        }
    }

    /// A run of prose. Stops at markup or at a blank line.
    fn text(&mut self) -> SyntaxNode<'a> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            match b {
                b'\\' | b'{' | b'}' | b'$' | b'%' => break,
                b'#' if self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => break,
                b'\n' if self.blank_line_follows() => break,
                _ => self.pos += 1,
            }
        }
        self.trimmed(NodeKind::Text, start)
    }

    /// At a line feed, returns true if the next line holds only whitespace.
    fn blank_line_follows(&self) -> bool {
        self.bytes[self.pos + 1..]
            .iter()
            .find(|&&b| !matches!(b, b' ' | b'\t' | b'\r'))
            .is_some_and(|&b| b == b'\n')
    }
}
