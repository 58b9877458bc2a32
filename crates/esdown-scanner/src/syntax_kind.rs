//! Token kinds produced by the scanner.
//!
//! Node kinds built by the parser live in `esdown_parser::parser::syntax_kind_ext`
//! and start above `SyntaxKind::LAST_TOKEN`, so a `u16` kind tag is never
//! ambiguous between a token and a node.

/// Token kind.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    StringLiteral,
    NoSubstitutionTemplateLiteral,

    // Names
    Identifier,
    PrivateIdentifier,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    QuestionQuestionToken,
    ColonToken,
    AtToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    AmpersandAmpersandEqualsToken,
    BarBarEqualsToken,
    QuestionQuestionEqualsToken,

    // Reserved words
    BreakKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    ExtendsKeyword,
    FalseKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
}

impl SyntaxKind {
    pub const FIRST_KEYWORD: Self = Self::BreakKeyword;
    pub const LAST_KEYWORD: Self = Self::WhileKeyword;
    pub const FIRST_ASSIGNMENT: Self = Self::EqualsToken;
    pub const LAST_ASSIGNMENT: Self = Self::QuestionQuestionEqualsToken;
    pub const LAST_TOKEN: Self = Self::WhileKeyword;

    #[must_use]
    pub const fn is_keyword(self) -> bool {
        self as u16 >= Self::FIRST_KEYWORD as u16 && self as u16 <= Self::LAST_KEYWORD as u16
    }

    #[must_use]
    pub const fn is_assignment_operator(self) -> bool {
        self as u16 >= Self::FIRST_ASSIGNMENT as u16 && self as u16 <= Self::LAST_ASSIGNMENT as u16
    }

    /// Identifiers and reserved words: anything usable as a property name.
    #[must_use]
    pub const fn is_identifier_or_keyword(self) -> bool {
        matches!(self, Self::Identifier) || self.is_keyword()
    }
}

/// Map a reserved word to its keyword kind.
///
/// Contextual words (`let`, `static`, `get`, `set`, `of`) scan as identifiers;
/// the parser recognizes them by text where they are meaningful.
#[must_use]
pub fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "break" => SyntaxKind::BreakKeyword,
        "class" => SyntaxKind::ClassKeyword,
        "const" => SyntaxKind::ConstKeyword,
        "continue" => SyntaxKind::ContinueKeyword,
        "delete" => SyntaxKind::DeleteKeyword,
        "do" => SyntaxKind::DoKeyword,
        "else" => SyntaxKind::ElseKeyword,
        "extends" => SyntaxKind::ExtendsKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "for" => SyntaxKind::ForKeyword,
        "function" => SyntaxKind::FunctionKeyword,
        "if" => SyntaxKind::IfKeyword,
        "in" => SyntaxKind::InKeyword,
        "instanceof" => SyntaxKind::InstanceOfKeyword,
        "new" => SyntaxKind::NewKeyword,
        "null" => SyntaxKind::NullKeyword,
        "return" => SyntaxKind::ReturnKeyword,
        "super" => SyntaxKind::SuperKeyword,
        "this" => SyntaxKind::ThisKeyword,
        "throw" => SyntaxKind::ThrowKeyword,
        "true" => SyntaxKind::TrueKeyword,
        "typeof" => SyntaxKind::TypeOfKeyword,
        "var" => SyntaxKind::VarKeyword,
        "void" => SyntaxKind::VoidKeyword,
        "while" => SyntaxKind::WhileKeyword,
        _ => return None,
    };
    Some(kind)
}

/// Source text of a punctuation, operator or keyword token.
#[must_use]
pub const fn token_text(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::OpenBraceToken => "{",
        SyntaxKind::CloseBraceToken => "}",
        SyntaxKind::OpenParenToken => "(",
        SyntaxKind::CloseParenToken => ")",
        SyntaxKind::OpenBracketToken => "[",
        SyntaxKind::CloseBracketToken => "]",
        SyntaxKind::DotToken => ".",
        SyntaxKind::DotDotDotToken => "...",
        SyntaxKind::SemicolonToken => ";",
        SyntaxKind::CommaToken => ",",
        SyntaxKind::QuestionDotToken => "?.",
        SyntaxKind::LessThanToken => "<",
        SyntaxKind::GreaterThanToken => ">",
        SyntaxKind::LessThanEqualsToken => "<=",
        SyntaxKind::GreaterThanEqualsToken => ">=",
        SyntaxKind::EqualsEqualsToken => "==",
        SyntaxKind::ExclamationEqualsToken => "!=",
        SyntaxKind::EqualsEqualsEqualsToken => "===",
        SyntaxKind::ExclamationEqualsEqualsToken => "!==",
        SyntaxKind::EqualsGreaterThanToken => "=>",
        SyntaxKind::PlusToken => "+",
        SyntaxKind::MinusToken => "-",
        SyntaxKind::AsteriskToken => "*",
        SyntaxKind::AsteriskAsteriskToken => "**",
        SyntaxKind::SlashToken => "/",
        SyntaxKind::PercentToken => "%",
        SyntaxKind::PlusPlusToken => "++",
        SyntaxKind::MinusMinusToken => "--",
        SyntaxKind::LessThanLessThanToken => "<<",
        SyntaxKind::GreaterThanGreaterThanToken => ">>",
        SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
        SyntaxKind::AmpersandToken => "&",
        SyntaxKind::BarToken => "|",
        SyntaxKind::CaretToken => "^",
        SyntaxKind::ExclamationToken => "!",
        SyntaxKind::TildeToken => "~",
        SyntaxKind::AmpersandAmpersandToken => "&&",
        SyntaxKind::BarBarToken => "||",
        SyntaxKind::QuestionToken => "?",
        SyntaxKind::QuestionQuestionToken => "??",
        SyntaxKind::ColonToken => ":",
        SyntaxKind::AtToken => "@",
        SyntaxKind::EqualsToken => "=",
        SyntaxKind::PlusEqualsToken => "+=",
        SyntaxKind::MinusEqualsToken => "-=",
        SyntaxKind::AsteriskEqualsToken => "*=",
        SyntaxKind::AsteriskAsteriskEqualsToken => "**=",
        SyntaxKind::SlashEqualsToken => "/=",
        SyntaxKind::PercentEqualsToken => "%=",
        SyntaxKind::LessThanLessThanEqualsToken => "<<=",
        SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
        SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
        SyntaxKind::AmpersandEqualsToken => "&=",
        SyntaxKind::BarEqualsToken => "|=",
        SyntaxKind::CaretEqualsToken => "^=",
        SyntaxKind::AmpersandAmpersandEqualsToken => "&&=",
        SyntaxKind::BarBarEqualsToken => "||=",
        SyntaxKind::QuestionQuestionEqualsToken => "??=",
        SyntaxKind::BreakKeyword => "break",
        SyntaxKind::ClassKeyword => "class",
        SyntaxKind::ConstKeyword => "const",
        SyntaxKind::ContinueKeyword => "continue",
        SyntaxKind::DeleteKeyword => "delete",
        SyntaxKind::DoKeyword => "do",
        SyntaxKind::ElseKeyword => "else",
        SyntaxKind::ExtendsKeyword => "extends",
        SyntaxKind::FalseKeyword => "false",
        SyntaxKind::ForKeyword => "for",
        SyntaxKind::FunctionKeyword => "function",
        SyntaxKind::IfKeyword => "if",
        SyntaxKind::InKeyword => "in",
        SyntaxKind::InstanceOfKeyword => "instanceof",
        SyntaxKind::NewKeyword => "new",
        SyntaxKind::NullKeyword => "null",
        SyntaxKind::ReturnKeyword => "return",
        SyntaxKind::SuperKeyword => "super",
        SyntaxKind::ThisKeyword => "this",
        SyntaxKind::ThrowKeyword => "throw",
        SyntaxKind::TrueKeyword => "true",
        SyntaxKind::TypeOfKeyword => "typeof",
        SyntaxKind::VarKeyword => "var",
        SyntaxKind::VoidKeyword => "void",
        SyntaxKind::WhileKeyword => "while",
        SyntaxKind::Unknown
        | SyntaxKind::EndOfFileToken
        | SyntaxKind::NumericLiteral
        | SyntaxKind::StringLiteral
        | SyntaxKind::NoSubstitutionTemplateLiteral
        | SyntaxKind::Identifier
        | SyntaxKind::PrivateIdentifier => "",
    }
}
