//! Operator precedence.

/// Precedence of a binary operator, `0` when `op` is not one.
///
/// Higher binds tighter. `??` shares the level of `||`; the two may not be
/// mixed without parentheses.
#[must_use]
pub fn binary_operator_precedence(op: &str) -> u8 {
    match op {
        "??" | "||" => 1,
        "&&" => 2,
        "|" => 3,
        "^" => 4,
        "&" => 5,
        "==" | "!=" | "===" | "!==" => 6,
        "<" | ">" | "<=" | ">=" | "instanceof" | "in" => 7,
        "<<" | ">>" | ">>>" => 8,
        "+" | "-" => 9,
        "*" | "/" | "%" => 10,
        "**" => 11,
        _ => 0,
    }
}

/// Whether `op` is right-associative.
#[must_use]
pub fn is_right_associative(op: &str) -> bool {
    op == "**"
}
