//! Character classes and environment tables of the ConTeXt grammar.

/// Characters that form an `escaped` node when preceded by a backslash.
pub(super) const ESCAPABLE: &[u8] = b"#$%&^_{}|~\\";

/// Environments whose body is program code (MetaPost/MetaFun, TikZ, Lua).
pub(super) const CODE_ENVIRONMENTS: &[&str] = &[
    "MPinclusions",
    "useMPgraphic",
    "reusableMPgraphic",
    "MPcode",
    "MPpage",
    "staticMPfigure",
    "tikzpicture",
    "luacode",
];

/// Environments whose body is typeset verbatim.
pub(super) const TYPING_ENVIRONMENTS: &[&str] = &[
    "HTML", "CSS", "MP", "LUA", "XML", "PARSEDXML", "TEX", "typing",
];

/// Returns true for bytes allowed in a command name after the backslash.
#[inline]
pub(super) const fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'@' || b == b':'
}

/// Returns true for whitespace recognized between tokens.
#[inline]
pub(super) const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

/// Returns true for whitespace that does not end a line.
#[inline]
pub(super) const fn is_inline_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t')
}

/// Returns true for bytes allowed in option keywords and setting keys.
#[inline]
pub(super) const fn is_keyword_byte(b: u8) -> bool {
    !is_space(b) && !matches!(b, b'=' | b',' | b'[' | b']')
}

/// Returns true for bytes allowed after the first byte of an identifier.
#[inline]
pub(super) const fn is_id_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b':' | b'_' | b'-')
}

/// What kind of raw-body environment a `\start<name>` opens, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Inclusion {
    Code,
    Typing,
}

/// Classifies the environment name following `\start`.
pub(super) fn inclusion(environment: &str) -> Option<Inclusion> {
    if CODE_ENVIRONMENTS.contains(&environment) {
        Some(Inclusion::Code)
    } else if TYPING_ENVIRONMENTS.contains(&environment) {
        Some(Inclusion::Typing)
    } else {
        None
    }
}
