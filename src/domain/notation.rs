//! Bracketed list notation for printed nodes and levels.
//!
//! Nodes print as `['a', 'b']`, a level prints as a list of sibling groups
//! (`[[['2', '3'], ['7']]]`). Strings are single-quoted unless they contain
//! a `'` and no `"`, in which case double quotes are used.

use std::fmt::{self, Display, Write};

use itertools::Itertools;

use crate::domain::entities::Node;
use crate::domain::levels::Level;

/// Quote a single string.
pub fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c if !is_printable(c) => {
                // infallible for String
                let _ = match c as u32 {
                    cp @ 0..=0xff => write!(out, "\\x{:02x}", cp),
                    cp @ 0x100..=0xffff => write!(out, "\\u{:04x}", cp),
                    cp => write!(out, "\\U{:08x}", cp),
                };
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

/// Whether `c` prints as itself.
///
/// Control characters, format characters, and separators other than the
/// ASCII space are escaped.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() {
        return false;
    }
    !matches!(
        c,
        '\u{a0}'
            | '\u{ad}'
            | '\u{600}'..='\u{605}'
            | '\u{61c}'
            | '\u{6dd}'
            | '\u{70f}'
            | '\u{1680}'
            | '\u{180e}'
            | '\u{2000}'..='\u{200f}'
            | '\u{2028}'..='\u{202f}'
            | '\u{205f}'..='\u{2064}'
            | '\u{2066}'..='\u{206f}'
            | '\u{3000}'
            | '\u{e000}'..='\u{f8ff}'
            | '\u{feff}'
            | '\u{fff9}'..='\u{fffb}'
            | '\u{f0000}'..='\u{10ffff}'
    )
}

/// Display adapter for a node's lines.
pub struct NodeList<'a>(pub &'a Node);

impl Display for NodeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.lines.iter().map(|l| quote(l)).join(", "))
    }
}

/// Display adapter for one sibling group.
pub struct GroupList<'a>(pub &'a [Node]);

impl Display for GroupList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().map(NodeList).join(", "))
    }
}

/// Display adapter for a whole level.
pub struct LevelList<'a>(pub &'a Level);

impl Display for LevelList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.0.groups.iter().map(|g| GroupList(g)).join(", ")
        )
    }
}
