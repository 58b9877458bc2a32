use super::Printer;
use super::helpers::precedence;
use esdown_parser::parser::{NodeIndex, syntax_kind_ext};
use std::fmt::Write as _;

impl<'a> Printer<'a> {
    pub(super) fn emit_string_literal(&mut self, value: &str) {
        let quoted = quote_string(value);
        self.write(&quoted);
    }

    /// Key of a `key: value` object property.
    pub(super) fn emit_property_key(&mut self, key: NodeIndex) {
        let arena = self.arena;
        match arena.kind(key) {
            syntax_kind_ext::STRING_LITERAL => self.emit_string_literal(arena.text(key)),
            _ => self.write(arena.text(key)),
        }
    }

    /// Key of a computed member; string and numeric keys print without brackets.
    pub(super) fn emit_computed_key(&mut self, key: NodeIndex) {
        let arena = self.arena;
        match arena.kind(key) {
            syntax_kind_ext::STRING_LITERAL => self.emit_string_literal(arena.text(key)),
            syntax_kind_ext::NUMERIC_LITERAL => self.write(arena.text(key)),
            _ => {
                self.write("[");
                self.emit_expression(key, precedence::ASSIGNMENT);
                self.write("]");
            }
        }
    }
}

/// Single-quoted JavaScript string literal for a cooked value.
#[must_use]
pub(crate) fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
#[path = "tests/literals.rs"]
mod tests;
