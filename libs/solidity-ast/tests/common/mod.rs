//! Parse tree fixtures shared by the integration tests.
//!
//! Every helper takes the [`TreeBuilder`] so tokens are laid out in source
//! order; build children left to right.

#![allow(dead_code)]

use std::sync::OnceLock;

use solidity_ast::{Node, ParseNode, TreeBuilder};

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn node(rule: &str, children: Vec<ParseNode>) -> ParseNode {
    ParseNode::with_children(rule, children)
}

pub fn ident(b: &mut TreeBuilder, name: &str) -> ParseNode {
    node("identifier", vec![b.tok(name)])
}

pub fn primary(inner: ParseNode) -> ParseNode {
    node("expression", vec![node("primaryExpression", vec![inner])])
}

/// `name` as an expression.
pub fn id_expr(b: &mut TreeBuilder, name: &str) -> ParseNode {
    primary(ident(b, name))
}

/// A number, boolean or string token as an expression.
pub fn lit_expr(b: &mut TreeBuilder, text: &str) -> ParseNode {
    let token = b.tok(text);
    if text.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        primary(node("numberLiteral", vec![token]))
    } else {
        primary(token)
    }
}

/// `left op right`, with `right` built after the operator token.
pub fn binary(
    b: &mut TreeBuilder,
    left: ParseNode,
    op: &str,
    right: impl FnOnce(&mut TreeBuilder) -> ParseNode,
) -> ParseNode {
    let op = b.tok(op);
    let right = right(b);
    node("expression", vec![left, op, right])
}

pub fn elementary_type(b: &mut TreeBuilder, name: &str) -> ParseNode {
    node(
        "typeName",
        vec![node("elementaryTypeName", vec![b.tok(name)])],
    )
}

pub fn statement(inner: ParseNode) -> ParseNode {
    node("statement", vec![inner])
}

/// `return <value>;`
pub fn return_stmt(b: &mut TreeBuilder, value: &str) -> ParseNode {
    let kw = b.tok("return");
    let value = lit_expr(b, value);
    let semi = b.tok(";");
    statement(node("returnStatement", vec![kw, value, semi]))
}

/// `{ <statements> }`, statements built between the braces.
pub fn block(
    b: &mut TreeBuilder,
    statements: impl FnOnce(&mut TreeBuilder) -> Vec<ParseNode>,
) -> ParseNode {
    let open = b.tok("{");
    let mut children = vec![open];
    children.extend(statements(b));
    children.push(b.tok("}"));
    node("block", children)
}

/// `pragma solidity <constraints>;`
pub fn pragma_solidity(b: &mut TreeBuilder, constraints: &[(Option<&str>, &str)]) -> ParseNode {
    let kw = b.tok("pragma");
    let name = node("pragmaName", vec![ident(b, "solidity")]);
    let mut version = Vec::new();
    for (op, literal) in constraints {
        let mut parts = Vec::new();
        if let Some(op) = op {
            parts.push(node("versionOperator", vec![b.tok(op)]));
        }
        parts.push(b.token(solidity_ast::TokenKind::VersionLiteral, literal));
        version.push(node("versionConstraint", parts));
    }
    let value = node("pragmaValue", vec![node("version", version)]);
    let semi = b.tok(";");
    node("pragmaDirective", vec![kw, name, value, semi])
}

/// Parenthesised list of identifier expressions; `None` leaves a hole.
pub fn tuple(b: &mut TreeBuilder, open: &str, items: &[Option<&str>], close: &str) -> ParseNode {
    let mut children = vec![b.tok(open)];
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            children.push(b.tok(","));
        }
        if let Some(name) = item {
            children.push(id_expr(b, name));
        }
    }
    children.push(b.tok(close));
    primary(node("tupleExpression", children))
}

/// `name(<params>) <modifiers> { <body> }` with no return parameters.
pub fn function(
    b: &mut TreeBuilder,
    name: &str,
    modifiers: &[&str],
    body: impl FnOnce(&mut TreeBuilder) -> Vec<ParseNode>,
) -> ParseNode {
    let kw = b.tok("function");
    let name = ident(b, name);
    let params = node("parameterList", vec![b.tok("("), b.tok(")")]);
    let mut mods = Vec::new();
    for m in modifiers {
        let token = b.tok(m);
        mods.push(match *m {
            "view" | "pure" | "payable" | "constant" => node("stateMutability", vec![token]),
            _ => token,
        });
    }
    let mods = node("modifierList", mods);
    let body = block(b, body);
    node("functionDefinition", vec![kw, name, params, mods, body])
}

/// `<keyword> <name> { <parts> }`, each part wrapped in `contractPart`.
pub fn contract(
    b: &mut TreeBuilder,
    keyword: &str,
    name: &str,
    parts: impl FnOnce(&mut TreeBuilder) -> Vec<ParseNode>,
) -> ParseNode {
    let kw = b.tok(keyword);
    let name = ident(b, name);
    let open = b.tok("{");
    let mut children = vec![kw, name, open];
    children.extend(
        parts(b)
            .into_iter()
            .map(|part| node("contractPart", vec![part])),
    );
    children.push(b.tok("}"));
    node("contractDefinition", children)
}

/// Wraps top-level items and the end-of-input marker in a `sourceUnit`.
pub fn source_unit(b: &mut TreeBuilder, items: Vec<ParseNode>) -> ParseNode {
    let mut children = items;
    children.push(b.eof());
    node("sourceUnit", children)
}

/// Asserts every node's span encloses the spans of all its children.
pub fn assert_spans_nested(root: &Node) {
    root.walk(&mut |parent| {
        for child in parent.children() {
            assert!(
                parent.span.encloses(&child.span),
                "{} {:?} does not enclose {} {:?}",
                parent.type_name(),
                parent.span,
                child.type_name(),
                child.span
            );
        }
    });
}
