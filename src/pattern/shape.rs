//! Per-shape condition constructors for the Go grammar.
//!
//! Mechanical adapters over the generic condition algebra: one constructor
//! per node shape, destructuring the node's fields and applying a
//! sub-condition to each, left to right with short-circuit AND. If the kind
//! test fails the sub-conditions are never consulted, so a condition is
//! never invoked against a field that does not exist.

use regex::Regex;

use super::condition::{NodeCondition, NodesCondition};
use crate::syntax::{Node, Tree};

/// Ident whose name equals `name` exactly.
pub fn ident(name: impl Into<String>) -> NodeCondition {
    let name = name.into();
    Box::new(move |tree, node| {
        node.is_some_and(|id| tree.ident_name(id).is_some_and(|n| n == name))
    })
}

/// Any Ident at all.
pub fn any_ident() -> NodeCondition {
    Box::new(|tree, node| node.is_some_and(|id| tree.ident_name(id).is_some()))
}

/// Ident whose name matches the regex.
pub fn ident_matching(re: Regex) -> NodeCondition {
    Box::new(move |tree, node| {
        node.is_some_and(|id| tree.ident_name(id).is_some_and(|n| re.is_match(n)))
    })
}

/// BasicLit whose raw text (including quotes for strings) equals `value`.
pub fn basic_lit(value: impl Into<String>) -> NodeCondition {
    let value = value.into();
    Box::new(move |tree, node| {
        node.is_some_and(|id| tree.lit_value(id).is_some_and(|v| v == value))
    })
}

pub fn selector_expr(x: NodeCondition, sel: NodeCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::SelectorExpr { x: xf, sel: sf } => {
                x(tree, Some(*xf)) && sel(tree, Some(*sf))
            }
            _ => false,
        }
    })
}

pub fn call_expr(fun: NodeCondition, args: NodesCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::CallExpr { fun: ff, args: af } => fun(tree, Some(*ff)) && args(tree, af),
            _ => false,
        }
    })
}

pub fn index_expr(x: NodeCondition, index: NodeCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::IndexExpr { x: xf, index: inf } => {
                x(tree, Some(*xf)) && index(tree, Some(*inf))
            }
            _ => false,
        }
    })
}

pub fn paren_expr(x: NodeCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::ParenExpr { x: xf } => x(tree, Some(*xf)),
            _ => false,
        }
    })
}

pub fn unary_expr(x: NodeCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::UnaryExpr { x: xf, .. } => x(tree, Some(*xf)),
            _ => false,
        }
    })
}

pub fn binary_expr(x: NodeCondition, y: NodeCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::BinaryExpr { x: xf, y: yf, .. } => {
                x(tree, Some(*xf)) && y(tree, Some(*yf))
            }
            _ => false,
        }
    })
}

pub fn star_expr(x: NodeCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::StarExpr { x: xf } => x(tree, Some(*xf)),
            _ => false,
        }
    })
}

pub fn key_value_expr(key: NodeCondition, value: NodeCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::KeyValueExpr { key: kf, value: vf } => {
                key(tree, Some(*kf)) && value(tree, Some(*vf))
            }
            _ => false,
        }
    })
}

pub fn composite_lit(ty: NodeCondition, elts: NodesCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::CompositeLit { ty: tf, elts: ef } => ty(tree, *tf) && elts(tree, ef),
            _ => false,
        }
    })
}

pub fn array_type(len: NodeCondition, elt: NodeCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::ArrayType { len: lf, elt: ef } => {
                len(tree, *lf) && elt(tree, Some(*ef))
            }
            _ => false,
        }
    })
}

pub fn expr_stmt(x: NodeCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::ExprStmt { expr } => x(tree, Some(*expr)),
            _ => false,
        }
    })
}

pub fn assign_stmt(lhs: NodesCondition, rhs: NodesCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::AssignStmt {
                lhs: lf, rhs: rf, ..
            } => lhs(tree, lf) && rhs(tree, rf),
            _ => false,
        }
    })
}

pub fn return_stmt(results: NodesCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::ReturnStmt { results: rf } => results(tree, rf),
            _ => false,
        }
    })
}

pub fn block_stmt(stmts: NodesCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::Block { stmts: sf } => stmts(tree, sf),
            _ => false,
        }
    })
}

pub fn if_stmt(
    init: NodeCondition,
    cond: NodeCondition,
    body: NodeCondition,
    els: NodeCondition,
) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::IfStmt {
                init: inf,
                cond: cf,
                body: bf,
                els: ef,
            } => {
                init(tree, *inf)
                    && cond(tree, Some(*cf))
                    && body(tree, Some(*bf))
                    && els(tree, *ef)
            }
            _ => false,
        }
    })
}

pub fn for_stmt(
    init: NodeCondition,
    cond: NodeCondition,
    post: NodeCondition,
    body: NodeCondition,
) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::ForStmt {
                init: inf,
                cond: cf,
                post: pf,
                body: bf,
            } => {
                init(tree, *inf)
                    && cond(tree, *cf)
                    && post(tree, *pf)
                    && body(tree, Some(*bf))
            }
            _ => false,
        }
    })
}

pub fn func_decl(
    name: NodeCondition,
    params: NodesCondition,
    results: NodesCondition,
    body: NodeCondition,
) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::FuncDecl {
                name: nf,
                params: pf,
                results: rf,
                body: bf,
            } => {
                name(tree, Some(*nf))
                    && params(tree, pf)
                    && results(tree, rf)
                    && body(tree, Some(*bf))
            }
            _ => false,
        }
    })
}

pub fn field(names: NodesCondition, ty: NodeCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::Field { names: nf, ty: tf } => names(tree, nf) && ty(tree, Some(*tf)),
            _ => false,
        }
    })
}

pub fn import_spec(alias: NodeCondition, path: NodeCondition) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::ImportSpec {
                alias: af,
                path: pf,
            } => alias(tree, *af) && path(tree, Some(*pf)),
            _ => false,
        }
    })
}

pub fn file(
    name: NodeCondition,
    imports: NodesCondition,
    decls: NodesCondition,
) -> NodeCondition {
    Box::new(move |tree, node| {
        let Some(id) = node else { return false };
        match tree.node(id) {
            Node::File {
                name: nf,
                imports: imf,
                decls: df,
            } => name(tree, Some(*nf)) && imports(tree, imf) && decls(tree, df),
            _ => false,
        }
    })
}
