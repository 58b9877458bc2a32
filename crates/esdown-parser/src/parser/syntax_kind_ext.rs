//! Node kinds built by the parser.
//!
//! Leaf nodes reuse their token kind (`IDENTIFIER` is `SyntaxKind::Identifier`).
//! Composite kinds start right after `SyntaxKind::LAST_TOKEN`.

use esdown_scanner::SyntaxKind;

// Leaves
pub const IDENTIFIER: u16 = SyntaxKind::Identifier as u16;
pub const NUMERIC_LITERAL: u16 = SyntaxKind::NumericLiteral as u16;
pub const STRING_LITERAL: u16 = SyntaxKind::StringLiteral as u16;
pub const THIS_KEYWORD: u16 = SyntaxKind::ThisKeyword as u16;
pub const SUPER_KEYWORD: u16 = SyntaxKind::SuperKeyword as u16;
pub const TRUE_KEYWORD: u16 = SyntaxKind::TrueKeyword as u16;
pub const FALSE_KEYWORD: u16 = SyntaxKind::FalseKeyword as u16;
pub const NULL_KEYWORD: u16 = SyntaxKind::NullKeyword as u16;

const FIRST_NODE: u16 = SyntaxKind::LAST_TOKEN as u16 + 1;

/// Placeholder for an absent optional child (class name, heritage, function name).
pub const EMPTY: u16 = FIRST_NODE;

// Top level and statements
pub const SOURCE_FILE: u16 = FIRST_NODE + 1;
pub const BLOCK: u16 = FIRST_NODE + 2;
pub const VARIABLE_STATEMENT: u16 = FIRST_NODE + 3;
pub const VARIABLE_DECLARATION: u16 = FIRST_NODE + 4;
pub const EXPRESSION_STATEMENT: u16 = FIRST_NODE + 5;
pub const RETURN_STATEMENT: u16 = FIRST_NODE + 6;
pub const THROW_STATEMENT: u16 = FIRST_NODE + 7;
pub const IF_STATEMENT: u16 = FIRST_NODE + 8;
pub const WHILE_STATEMENT: u16 = FIRST_NODE + 9;
pub const DO_STATEMENT: u16 = FIRST_NODE + 10;
pub const FOR_STATEMENT: u16 = FIRST_NODE + 11;
pub const FOR_IN_STATEMENT: u16 = FIRST_NODE + 12;
pub const FOR_OF_STATEMENT: u16 = FIRST_NODE + 13;
pub const BREAK_STATEMENT: u16 = FIRST_NODE + 14;
pub const CONTINUE_STATEMENT: u16 = FIRST_NODE + 15;
pub const EMPTY_STATEMENT: u16 = FIRST_NODE + 16;

// Functions
pub const FUNCTION_DECLARATION: u16 = FIRST_NODE + 17;
pub const FUNCTION_EXPRESSION: u16 = FIRST_NODE + 18;
pub const ARROW_FUNCTION: u16 = FIRST_NODE + 19;
pub const PARAMETER_LIST: u16 = FIRST_NODE + 20;
pub const PARAMETER: u16 = FIRST_NODE + 21;

// Classes
pub const CLASS: u16 = FIRST_NODE + 22;
pub const CLASS_MEMBERS: u16 = FIRST_NODE + 23;
pub const METHOD_DECLARATION: u16 = FIRST_NODE + 24;
pub const COMPUTED_METHOD_DECLARATION: u16 = FIRST_NODE + 25;
pub const PROPERTY_DECLARATION: u16 = FIRST_NODE + 26;
pub const COMPUTED_PROPERTY_DECLARATION: u16 = FIRST_NODE + 27;

// Expressions
pub const PROPERTY_ACCESS_EXPRESSION: u16 = FIRST_NODE + 28;
pub const ELEMENT_ACCESS_EXPRESSION: u16 = FIRST_NODE + 29;
pub const CALL_EXPRESSION: u16 = FIRST_NODE + 30;
pub const NEW_EXPRESSION: u16 = FIRST_NODE + 31;
pub const BINARY_EXPRESSION: u16 = FIRST_NODE + 32;
pub const ASSIGNMENT_EXPRESSION: u16 = FIRST_NODE + 33;
pub const PREFIX_UNARY_EXPRESSION: u16 = FIRST_NODE + 34;
pub const POSTFIX_UNARY_EXPRESSION: u16 = FIRST_NODE + 35;
pub const CONDITIONAL_EXPRESSION: u16 = FIRST_NODE + 36;
pub const SPREAD_ELEMENT: u16 = FIRST_NODE + 37;
pub const ARRAY_LITERAL: u16 = FIRST_NODE + 38;
pub const OBJECT_LITERAL: u16 = FIRST_NODE + 39;
pub const PROPERTY_ASSIGNMENT: u16 = FIRST_NODE + 40;
pub const SHORTHAND_PROPERTY: u16 = FIRST_NODE + 41;
pub const COMPUTED_PROPERTY_ASSIGNMENT: u16 = FIRST_NODE + 42;

/// Debug name of a node kind.
#[must_use]
pub fn kind_name(kind: u16) -> &'static str {
    match kind {
        IDENTIFIER => "Identifier",
        NUMERIC_LITERAL => "NumericLiteral",
        STRING_LITERAL => "StringLiteral",
        THIS_KEYWORD => "ThisKeyword",
        SUPER_KEYWORD => "SuperKeyword",
        TRUE_KEYWORD => "TrueKeyword",
        FALSE_KEYWORD => "FalseKeyword",
        NULL_KEYWORD => "NullKeyword",
        EMPTY => "Empty",
        SOURCE_FILE => "SourceFile",
        BLOCK => "Block",
        VARIABLE_STATEMENT => "VariableStatement",
        VARIABLE_DECLARATION => "VariableDeclaration",
        EXPRESSION_STATEMENT => "ExpressionStatement",
        RETURN_STATEMENT => "ReturnStatement",
        THROW_STATEMENT => "ThrowStatement",
        IF_STATEMENT => "IfStatement",
        WHILE_STATEMENT => "WhileStatement",
        DO_STATEMENT => "DoStatement",
        FOR_STATEMENT => "ForStatement",
        FOR_IN_STATEMENT => "ForInStatement",
        FOR_OF_STATEMENT => "ForOfStatement",
        BREAK_STATEMENT => "BreakStatement",
        CONTINUE_STATEMENT => "ContinueStatement",
        EMPTY_STATEMENT => "EmptyStatement",
        FUNCTION_DECLARATION => "FunctionDeclaration",
        FUNCTION_EXPRESSION => "FunctionExpression",
        ARROW_FUNCTION => "ArrowFunction",
        PARAMETER_LIST => "ParameterList",
        PARAMETER => "Parameter",
        CLASS => "Class",
        CLASS_MEMBERS => "ClassMembers",
        METHOD_DECLARATION => "MethodDeclaration",
        COMPUTED_METHOD_DECLARATION => "ComputedMethodDeclaration",
        PROPERTY_DECLARATION => "PropertyDeclaration",
        COMPUTED_PROPERTY_DECLARATION => "ComputedPropertyDeclaration",
        PROPERTY_ACCESS_EXPRESSION => "PropertyAccessExpression",
        ELEMENT_ACCESS_EXPRESSION => "ElementAccessExpression",
        CALL_EXPRESSION => "CallExpression",
        NEW_EXPRESSION => "NewExpression",
        BINARY_EXPRESSION => "BinaryExpression",
        ASSIGNMENT_EXPRESSION => "AssignmentExpression",
        PREFIX_UNARY_EXPRESSION => "PrefixUnaryExpression",
        POSTFIX_UNARY_EXPRESSION => "PostfixUnaryExpression",
        CONDITIONAL_EXPRESSION => "ConditionalExpression",
        SPREAD_ELEMENT => "SpreadElement",
        ARRAY_LITERAL => "ArrayLiteral",
        OBJECT_LITERAL => "ObjectLiteral",
        PROPERTY_ASSIGNMENT => "PropertyAssignment",
        SHORTHAND_PROPERTY => "ShorthandProperty",
        COMPUTED_PROPERTY_ASSIGNMENT => "ComputedPropertyAssignment",
        _ => "Unknown",
    }
}
