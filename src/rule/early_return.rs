//! early-return: flatten `if { … } else { …; return x }` at the top of a
//! function body by hoisting the else block's trailing return into the
//! enclosing block and deleting the else branch.

use super::{Rule, RuleConfig};
use crate::pattern::condition::{any_node, any_nodes, first, last};
use crate::pattern::shape::{block_stmt, func_decl, if_stmt, return_stmt};
use crate::pattern::{Matcher, Selections};
use crate::syntax::Node;

pub struct EarlyReturn;

impl Rule for EarlyReturn {
    fn name(&self) -> &'static str {
        "early-return"
    }

    fn description(&self) -> &'static str {
        "hoist a trailing return out of a function's leading if/else"
    }

    fn message(&self) -> &'static str {
        "hoisted trailing return out of else branch"
    }

    fn matchers(&self, _config: &RuleConfig) -> Vec<Matcher> {
        let sel = Selections::new();
        let chain = vec![func_decl(
            any_node(),
            any_nodes(),
            any_nodes(),
            sel.select(
                block_stmt(first(sel.select(
                    if_stmt(
                        any_node(),
                        any_node(),
                        any_node(),
                        sel.select(
                            block_stmt(last(return_stmt(any_nodes()))),
                            "else",
                        ),
                    ),
                    "if",
                ))),
                "block",
            ),
        )];

        let s = sel.clone();
        vec![Matcher::new(chain, move |tree| {
            let outer = s.block(tree, "block")?;
            let if_id = s.if_stmt(tree, "if")?;
            let else_block = s.block(tree, "else")?;

            let Some(&ret) = tree.block_stmts(else_block).and_then(|stmts| stmts.last())
            else {
                return Ok(());
            };
            if let Some(stmts) = tree.block_stmts_mut(outer) {
                stmts.push(ret);
            }
            if let Node::IfStmt { els, .. } = tree.node_mut(if_id) {
                *els = None;
            }
            Ok(())
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::walk;
    use crate::syntax::parse;
    use crate::testutil::apply_rule;

    fn apply(src: &str) -> String {
        apply_rule(&EarlyReturn, &RuleConfig::default(), src)
    }

    #[test]
    fn hoists_trailing_return_and_clears_else() {
        let src = "package main\n\nfunc f() int {\n\tif ok {\n\t\treturn 1\n\t} else {\n\t\treturn 2\n\t}\n}\n";
        assert_eq!(
            apply(src),
            "package main\n\nfunc f() int {\n\tif ok {\n\t\treturn 1\n\t}\n\treturn 2\n}\n"
        );
    }

    #[test]
    fn outer_block_gains_exactly_one_statement() {
        let src = "package main\n\nfunc f() int {\n\tif ok {\n\t\treturn 1\n\t} else {\n\t\treturn 2\n\t}\n}\n";
        let mut tree = parse(src).unwrap();
        let mut matchers = EarlyReturn.matchers(&RuleConfig::default());
        walk(&mut tree, &mut matchers).unwrap();

        let body = tree
            .node_ids()
            .find_map(|id| match tree.node(id) {
                Node::FuncDecl { body, .. } => Some(*body),
                _ => None,
            })
            .unwrap();
        let stmts = tree.block_stmts(body).unwrap();
        assert_eq!(stmts.len(), 2, "if plus the hoisted return");
        let Node::IfStmt { els, .. } = tree.node(stmts[0]) else {
            panic!("first statement is not the if");
        };
        assert!(els.is_none(), "else branch must be cleared");
    }

    #[test]
    fn ignores_if_without_else() {
        let src = "package main\n\nfunc f() int {\n\tif ok {\n\t\treturn 1\n\t}\n\treturn 2\n}\n";
        assert_eq!(apply(src), src);
    }

    #[test]
    fn ignores_else_not_ending_in_return() {
        let src = "package main\n\nfunc f() {\n\tif ok {\n\t\tg()\n\t} else {\n\t\th()\n\t}\n}\n";
        assert_eq!(apply(src), src);
    }

    #[test]
    fn ignores_if_that_is_not_first_statement() {
        let src = "package main\n\nfunc f() int {\n\tg()\n\tif ok {\n\t\treturn 1\n\t} else {\n\t\treturn 2\n\t}\n}\n";
        assert_eq!(apply(src), src);
    }

    #[test]
    fn applies_per_function() {
        let src = "package main\n\nfunc a() int {\n\tif ok {\n\t\treturn 1\n\t} else {\n\t\treturn 2\n\t}\n}\n\nfunc b() int {\n\tif ok {\n\t\treturn 3\n\t} else {\n\t\treturn 4\n\t}\n}\n";
        assert_eq!(
            apply(src),
            "package main\n\nfunc a() int {\n\tif ok {\n\t\treturn 1\n\t}\n\treturn 2\n}\n\nfunc b() int {\n\tif ok {\n\t\treturn 3\n\t}\n\treturn 4\n}\n"
        );
    }
}
