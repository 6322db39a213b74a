//! Canonical printer for the Go source subset.
//!
//! Emits gofmt-style output: tab indentation, one statement per line, a
//! blank line between top-level sections, single spaces around binary
//! operators. The tree is the single source of truth — whatever structural
//! edits a rewrite made are reflected here with no dirty tracking.

use super::{Node, NodeId, Tree};

/// Render the whole tree from its root `File` node.
pub fn print(tree: &Tree) -> String {
    let mut printer = Printer {
        tree,
        out: String::new(),
        indent: 0,
    };
    if let Some(root) = tree.root() {
        printer.file(root);
    }
    printer.out
}

/// Render a single expression or statement subtree (tests, debugging).
pub fn print_node(tree: &Tree, id: NodeId) -> String {
    let mut printer = Printer {
        tree,
        out: String::new(),
        indent: 0,
    };
    printer.node(id);
    printer.out
}

struct Printer<'t> {
    tree: &'t Tree,
    out: String,
    indent: usize,
}

impl Printer<'_> {
    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn newline(&mut self) {
        self.out.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    fn file(&mut self, id: NodeId) {
        let Node::File {
            name,
            imports,
            decls,
        } = self.tree.node(id)
        else {
            self.node(id);
            return;
        };
        let (imports, decls) = (imports.clone(), decls.clone());

        self.push("package ");
        self.node(*name);
        self.newline();

        match imports.len() {
            0 => {}
            1 => {
                self.newline();
                self.push("import ");
                self.import_spec(imports[0]);
                self.newline();
            }
            _ => {
                self.newline();
                self.push("import (");
                self.newline();
                for spec in &imports {
                    self.push("\t");
                    self.import_spec(*spec);
                    self.newline();
                }
                self.push(")");
                self.newline();
            }
        }

        for decl in &decls {
            self.newline();
            self.node(*decl);
            self.newline();
        }
    }

    fn import_spec(&mut self, id: NodeId) {
        let Node::ImportSpec { alias, path } = self.tree.node(id) else {
            self.node(id);
            return;
        };
        if let Some(alias) = alias {
            self.node(*alias);
            self.push(" ");
        }
        self.node(*path);
    }

    fn block_body(&mut self, id: NodeId) {
        self.push("{");
        self.newline();
        self.indent += 1;
        if let Some(stmts) = self.tree.block_stmts(id) {
            for stmt in stmts.to_vec() {
                self.write_indent();
                self.node(stmt);
                self.newline();
            }
        }
        self.indent -= 1;
        self.write_indent();
        self.push("}");
    }

    /// `if init; cond { … } else …` without leading indent, so else-if
    /// chains can be printed inline.
    fn if_stmt(&mut self, id: NodeId) {
        let Node::IfStmt {
            init,
            cond,
            body,
            els,
        } = self.tree.node(id)
        else {
            return;
        };
        let (init, cond, body, els) = (*init, *cond, *body, *els);

        self.push("if ");
        if let Some(init) = init {
            self.node(init);
            self.push("; ");
        }
        self.node(cond);
        self.push(" ");
        self.block_body(body);
        if let Some(els) = els {
            self.push(" else ");
            if matches!(self.tree.node(els), Node::IfStmt { .. }) {
                self.if_stmt(els);
            } else {
                self.block_body(els);
            }
        }
    }

    fn comma_separated(&mut self, ids: &[NodeId]) {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.node(*id);
        }
    }

    fn node(&mut self, id: NodeId) {
        match self.tree.node(id) {
            Node::File { .. } => self.file(id),
            Node::ImportSpec { .. } => self.import_spec(id),
            Node::FuncDecl {
                name,
                params,
                results,
                body,
            } => {
                let (name, params, results, body) =
                    (*name, params.clone(), results.clone(), *body);
                self.push("func ");
                self.node(name);
                self.push("(");
                self.comma_separated(&params);
                self.push(")");
                match results.len() {
                    0 => {}
                    1 => {
                        self.push(" ");
                        self.node(results[0]);
                    }
                    _ => {
                        self.push(" (");
                        self.comma_separated(&results);
                        self.push(")");
                    }
                }
                self.push(" ");
                self.block_body(body);
            }
            Node::Field { names, ty } => {
                let (names, ty) = (names.clone(), *ty);
                if !names.is_empty() {
                    self.comma_separated(&names);
                    self.push(" ");
                }
                self.node(ty);
            }
            Node::Block { .. } => self.block_body(id),
            Node::IfStmt { .. } => self.if_stmt(id),
            Node::ForStmt {
                init,
                cond,
                post,
                body,
            } => {
                let (init, cond, post, body) = (*init, *cond, *post, *body);
                self.push("for ");
                match (init, cond, post) {
                    (None, None, None) => {}
                    (None, Some(cond), None) => {
                        self.node(cond);
                        self.push(" ");
                    }
                    _ => {
                        if let Some(init) = init {
                            self.node(init);
                        }
                        self.push("; ");
                        if let Some(cond) = cond {
                            self.node(cond);
                        }
                        self.push("; ");
                        if let Some(post) = post {
                            self.node(post);
                        }
                        self.push(" ");
                    }
                }
                self.block_body(body);
            }
            Node::ReturnStmt { results } => {
                let results = results.clone();
                self.push("return");
                if !results.is_empty() {
                    self.push(" ");
                    self.comma_separated(&results);
                }
            }
            Node::ExprStmt { expr } => self.node(*expr),
            Node::AssignStmt { lhs, op, rhs } => {
                let (lhs, op, rhs) = (lhs.clone(), *op, rhs.clone());
                self.comma_separated(&lhs);
                self.push(" ");
                self.push(op.symbol());
                self.push(" ");
                self.comma_separated(&rhs);
            }
            Node::Ident { name } => {
                let name = name.clone();
                self.push(&name);
            }
            Node::BasicLit { value, .. } => {
                let value = value.clone();
                self.push(&value);
            }
            Node::SelectorExpr { x, sel } => {
                let (x, sel) = (*x, *sel);
                self.node(x);
                self.push(".");
                self.node(sel);
            }
            Node::CallExpr { fun, args } => {
                let (fun, args) = (*fun, args.clone());
                self.node(fun);
                self.push("(");
                self.comma_separated(&args);
                self.push(")");
            }
            Node::IndexExpr { x, index } => {
                let (x, index) = (*x, *index);
                self.node(x);
                self.push("[");
                self.node(index);
                self.push("]");
            }
            Node::ParenExpr { x } => {
                let x = *x;
                self.push("(");
                self.node(x);
                self.push(")");
            }
            Node::UnaryExpr { op, x } => {
                let (op, x) = (*op, *x);
                self.push(op.symbol());
                self.node(x);
            }
            Node::BinaryExpr { op, x, y } => {
                let (op, x, y) = (*op, *x, *y);
                self.node(x);
                self.push(" ");
                self.push(op.symbol());
                self.push(" ");
                self.node(y);
            }
            Node::StarExpr { x } => {
                let x = *x;
                self.push("*");
                self.node(x);
            }
            Node::KeyValueExpr { key, value } => {
                let (key, value) = (*key, *value);
                self.node(key);
                self.push(": ");
                self.node(value);
            }
            Node::CompositeLit { ty, elts } => {
                let (ty, elts) = (*ty, elts.clone());
                if let Some(ty) = ty {
                    self.node(ty);
                }
                self.push("{");
                self.comma_separated(&elts);
                self.push("}");
            }
            Node::ArrayType { len, elt } => {
                let (len, elt) = (*len, *elt);
                self.push("[");
                if let Some(len) = len {
                    self.node(len);
                }
                self.push("]");
                self.node(elt);
            }
        }
    }
}
