//! Scanner state machine.
//!
//! The scanner is pull-based: the parser calls `scan()` to advance to the next
//! token and inspects it through `token()`, `token_value()` and positions.
//! `snapshot()`/`restore()` support speculative look-ahead.

use crate::syntax_kind::{SyntaxKind, keyword_kind};
use esdown_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use memchr::{memchr2, memmem};

/// Lexical error found while scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
    pub code: u32,
}

/// Saved scanner position for look-ahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    preceding_line_break: bool,
    diagnostics_len: usize,
}

pub struct ScannerState {
    text: String,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    preceding_line_break: bool,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    #[must_use]
    pub fn new(text: String) -> Self {
        Self {
            text,
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_value: String::new(),
            preceding_line_break: false,
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Cooked value of the current token: identifier text, string contents,
    /// or the raw numeric literal.
    #[must_use]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    #[must_use]
    pub const fn token_pos(&self) -> usize {
        self.token_start
    }

    #[must_use]
    pub const fn token_end(&self) -> usize {
        self.pos
    }

    /// Whether a line terminator appeared between the previous token and this one.
    #[must_use]
    pub const fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    #[must_use]
    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    pub fn restore(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.token_value = snapshot.token_value;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.text[self.pos..].chars().nth(offset)
    }

    fn error(&mut self, start: usize, message: &'static str, code: u32) {
        self.diagnostics.push(ScannerDiagnostic {
            pos: start,
            length: self.pos.saturating_sub(start).max(1),
            message,
            code,
        });
    }

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.preceding_line_break = false;
        self.token_value.clear();
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.peek_char() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '"' | '\'' => self.scan_string(ch),
            '`' => self.scan_template(),
            '0'..='9' => self.scan_number(),
            '.' if self.peek_char_at(1).is_some_and(|c| c.is_ascii_digit()) => self.scan_number(),
            '#' => {
                self.pos += 1;
                if self.peek_char().is_some_and(is_identifier_start) {
                    self.scan_identifier_text();
                    SyntaxKind::PrivateIdentifier
                } else {
                    self.error(
                        self.token_start,
                        diagnostic_messages::INVALID_CHARACTER,
                        diagnostic_codes::INVALID_CHARACTER,
                    );
                    SyntaxKind::Unknown
                }
            }
            c if is_identifier_start(c) => {
                self.scan_identifier_text();
                keyword_kind(&self.token_value).unwrap_or(SyntaxKind::Identifier)
            }
            _ => self.scan_punctuation(ch),
        };
        self.token
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                    self.preceding_line_break = true;
                    self.pos += ch.len_utf8();
                }
                c if c.is_whitespace() || c == '\u{feff}' => self.pos += c.len_utf8(),
                '/' if self.peek_char_at(1) == Some('/') => {
                    let rest = &self.text.as_bytes()[self.pos..];
                    self.pos += memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
                }
                '/' if self.peek_char_at(1) == Some('*') => {
                    let start = self.pos;
                    let body = &self.text.as_bytes()[start + 2..];
                    let (len, closed) = match memmem::find(body, b"*/") {
                        Some(len) => (len, true),
                        None => (body.len(), false),
                    };
                    if memchr2(b'\n', b'\r', &body[..len]).is_some() {
                        self.preceding_line_break = true;
                    }
                    self.pos = start + 2 + len;
                    if closed {
                        self.pos += 2;
                    } else {
                        self.error(
                            start,
                            diagnostic_messages::ASTERISK_SLASH_EXPECTED,
                            diagnostic_codes::ASTERISK_SLASH_EXPECTED,
                        );
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_identifier_text(&mut self) {
        while let Some(c) = self.peek_char() {
            if !is_identifier_part(c) {
                break;
            }
            self.token_value.push(c);
            self.pos += c.len_utf8();
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        if self.peek_char() == Some('0')
            && matches!(self.peek_char_at(1), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B'))
        {
            self.pos += 2;
            while self
                .peek_char()
                .is_some_and(|c| c.is_ascii_hexdigit() || c == '_')
            {
                self.pos += 1;
            }
        } else {
            self.consume_digits();
            if self.peek_char() == Some('.') {
                self.pos += 1;
                self.consume_digits();
            }
            if matches!(self.peek_char(), Some('e' | 'E')) {
                let save = self.pos;
                self.pos += 1;
                if matches!(self.peek_char(), Some('+' | '-')) {
                    self.pos += 1;
                }
                if self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.consume_digits();
                } else {
                    self.pos = save;
                }
            }
        }
        if self.peek_char() == Some('n') {
            self.pos += 1;
        }
        self.token_value.push_str(&self.text[start..self.pos]);
        SyntaxKind::NumericLiteral
    }

    fn consume_digits(&mut self) {
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_digit() || c == '_')
        {
            self.pos += 1;
        }
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        loop {
            let Some(c) = self.peek_char() else {
                self.error(
                    start,
                    diagnostic_messages::UNTERMINATED_STRING_LITERAL,
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                );
                break;
            };
            if c == quote {
                self.pos += 1;
                break;
            }
            if c == '\n' || c == '\r' {
                self.error(
                    start,
                    diagnostic_messages::UNTERMINATED_STRING_LITERAL,
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                );
                break;
            }
            if c == '\\' {
                self.pos += 1;
                self.scan_escape();
                continue;
            }
            self.token_value.push(c);
            self.pos += c.len_utf8();
        }
        SyntaxKind::StringLiteral
    }

    /// Template literals without substitutions scan as plain strings.
    fn scan_template(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        loop {
            let Some(c) = self.peek_char() else {
                self.error(
                    start,
                    diagnostic_messages::UNTERMINATED_STRING_LITERAL,
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                );
                break;
            };
            match c {
                '`' => {
                    self.pos += 1;
                    break;
                }
                '$' if self.peek_char_at(1) == Some('{') => {
                    self.pos += 2;
                    self.error(
                        start,
                        diagnostic_messages::INVALID_CHARACTER,
                        diagnostic_codes::INVALID_CHARACTER,
                    );
                }
                '\\' => {
                    self.pos += 1;
                    self.scan_escape();
                }
                _ => {
                    self.token_value.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
        SyntaxKind::NoSubstitutionTemplateLiteral
    }

    fn scan_escape(&mut self) {
        let Some(c) = self.peek_char() else {
            return;
        };
        self.pos += c.len_utf8();
        let cooked = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' => '\0',
            'u' => {
                let digits: String = self.text[self.pos..].chars().take(4).collect();
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if digits.len() == 4 => {
                        self.pos += 4;
                        decoded
                    }
                    _ => 'u',
                }
            }
            'x' => {
                let digits: String = self.text[self.pos..].chars().take(2).collect();
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if digits.len() == 2 => {
                        self.pos += 2;
                        decoded
                    }
                    _ => 'x',
                }
            }
            // Line continuation
            '\r' => {
                if self.peek_char() == Some('\n') {
                    self.pos += 1;
                }
                return;
            }
            '\n' => return,
            other => other,
        };
        self.token_value.push(cooked);
    }

    fn scan_punctuation(&mut self, ch: char) -> SyntaxKind {
        // Longest match first.
        const PUNCTUATION: &[(&str, SyntaxKind)] = &[
            (">>>=", SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
            ("...", SyntaxKind::DotDotDotToken),
            ("===", SyntaxKind::EqualsEqualsEqualsToken),
            ("!==", SyntaxKind::ExclamationEqualsEqualsToken),
            ("**=", SyntaxKind::AsteriskAsteriskEqualsToken),
            ("<<=", SyntaxKind::LessThanLessThanEqualsToken),
            (">>=", SyntaxKind::GreaterThanGreaterThanEqualsToken),
            (">>>", SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
            ("&&=", SyntaxKind::AmpersandAmpersandEqualsToken),
            ("||=", SyntaxKind::BarBarEqualsToken),
            ("??=", SyntaxKind::QuestionQuestionEqualsToken),
            ("=>", SyntaxKind::EqualsGreaterThanToken),
            ("==", SyntaxKind::EqualsEqualsToken),
            ("!=", SyntaxKind::ExclamationEqualsToken),
            ("<=", SyntaxKind::LessThanEqualsToken),
            (">=", SyntaxKind::GreaterThanEqualsToken),
            ("**", SyntaxKind::AsteriskAsteriskToken),
            ("++", SyntaxKind::PlusPlusToken),
            ("--", SyntaxKind::MinusMinusToken),
            ("<<", SyntaxKind::LessThanLessThanToken),
            (">>", SyntaxKind::GreaterThanGreaterThanToken),
            ("&&", SyntaxKind::AmpersandAmpersandToken),
            ("||", SyntaxKind::BarBarToken),
            ("??", SyntaxKind::QuestionQuestionToken),
            ("+=", SyntaxKind::PlusEqualsToken),
            ("-=", SyntaxKind::MinusEqualsToken),
            ("*=", SyntaxKind::AsteriskEqualsToken),
            ("/=", SyntaxKind::SlashEqualsToken),
            ("%=", SyntaxKind::PercentEqualsToken),
            ("&=", SyntaxKind::AmpersandEqualsToken),
            ("|=", SyntaxKind::BarEqualsToken),
            ("^=", SyntaxKind::CaretEqualsToken),
            ("{", SyntaxKind::OpenBraceToken),
            ("}", SyntaxKind::CloseBraceToken),
            ("(", SyntaxKind::OpenParenToken),
            (")", SyntaxKind::CloseParenToken),
            ("[", SyntaxKind::OpenBracketToken),
            ("]", SyntaxKind::CloseBracketToken),
            (".", SyntaxKind::DotToken),
            (";", SyntaxKind::SemicolonToken),
            (",", SyntaxKind::CommaToken),
            ("<", SyntaxKind::LessThanToken),
            (">", SyntaxKind::GreaterThanToken),
            ("+", SyntaxKind::PlusToken),
            ("-", SyntaxKind::MinusToken),
            ("*", SyntaxKind::AsteriskToken),
            ("/", SyntaxKind::SlashToken),
            ("%", SyntaxKind::PercentToken),
            ("&", SyntaxKind::AmpersandToken),
            ("|", SyntaxKind::BarToken),
            ("^", SyntaxKind::CaretToken),
            ("!", SyntaxKind::ExclamationToken),
            ("~", SyntaxKind::TildeToken),
            ("?", SyntaxKind::QuestionToken),
            (":", SyntaxKind::ColonToken),
            ("@", SyntaxKind::AtToken),
            ("=", SyntaxKind::EqualsToken),
        ];

        let rest = &self.text[self.pos..];
        // `?.` followed by a digit is a conditional, not optional chaining.
        if rest.starts_with("?.") && !rest[2..].starts_with(|c: char| c.is_ascii_digit()) {
            self.pos += 2;
            return SyntaxKind::QuestionDotToken;
        }
        for &(text, kind) in PUNCTUATION {
            if rest.starts_with(text) {
                self.pos += text.len();
                return kind;
            }
        }

        self.pos += ch.len_utf8();
        self.error(
            self.token_start,
            diagnostic_messages::INVALID_CHARACTER,
            diagnostic_codes::INVALID_CHARACTER,
        );
        SyntaxKind::Unknown
    }
}

#[must_use]
pub fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

#[must_use]
pub fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_alphanumeric() || c == '\u{200c}' || c == '\u{200d}'
}
