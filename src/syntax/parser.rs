//! Recursive-descent parser for the Go source subset.
//!
//! Produces an arena [`Tree`] whose root is the `File` node. The parser
//! either returns a fully-formed tree or fails with a [`ParseError`] — a
//! malformed file is never partially walkable.

use thiserror::Error;

use super::lexer::{Lexer, Token, TokenKind};
use super::{AssignOp, BinOp, LitKind, Node, NodeId, NodeKind, Span, Tree, UnOp};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at byte {offset}: {message}")]
pub struct ParseError {
    pub offset: usize,
    pub message: String,
}

/// Parse a complete Go source file into a [`Tree`].
pub fn parse(src: &str) -> Result<Tree, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        prev_end: 0,
        tree: Tree::new(),
        allow_composite: true,
        src_len: src.len(),
    };
    parser.parse_file()
}

/// A simple statement before it is committed to the arena as a statement:
/// a bare expression stays unwrapped so `if`/`for` headers can use it as a
/// condition without leaving an orphan `ExprStmt` behind.
enum Simple {
    Expr(NodeId),
    Stmt(NodeId),
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// End offset of the last consumed token, for span closing.
    prev_end: usize,
    tree: Tree,
    /// Composite literals are suppressed in `if`/`for` headers, where `{`
    /// opens the statement block instead.
    allow_composite: bool,
    src_len: usize,
}

impl Parser {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn peek_span(&self) -> Span {
        self.tokens.get(self.pos).map_or(
            Span {
                start: self.src_len,
                end: self.src_len,
            },
            |t| t.span,
        )
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        self.prev_end = tok.span.end;
        Some(tok)
    }

    /// Consume the next token if it equals `kind` (dataless kinds only).
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<Span, ParseError> {
        if self.peek() == Some(kind) {
            let span = self.peek_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.error_here(format!("expected {what}")))
        }
    }

    fn error_here(&self, message: String) -> ParseError {
        ParseError {
            offset: self.peek_span().start,
            message,
        }
    }

    /// A statement terminator: an explicit or inserted semicolon, or the
    /// closing brace / end of file that go's grammar also accepts.
    fn expect_semi(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Some(TokenKind::Semi) => {
                self.advance();
                Ok(())
            }
            Some(TokenKind::RBrace) | Some(TokenKind::RParen) | None => Ok(()),
            _ => Err(self.error_here("expected newline or ';'".to_string())),
        }
    }

    fn close_span(&self, start: usize) -> Span {
        Span {
            start,
            end: self.prev_end,
        }
    }

    fn parse_ident(&mut self) -> Result<NodeId, ParseError> {
        let span = self.peek_span();
        match self.peek() {
            Some(TokenKind::Ident(name)) => {
                let name = name.clone();
                self.advance();
                Ok(self.tree.push_spanned(Node::Ident { name }, span))
            }
            _ => Err(self.error_here("expected identifier".to_string())),
        }
    }

    // ---- file structure ----

    fn parse_file(mut self) -> Result<Tree, ParseError> {
        let start = self.peek_span().start;
        self.expect(&TokenKind::Package, "'package'")?;
        let name = self.parse_ident()?;
        self.expect_semi()?;

        let mut imports = Vec::new();
        while self.peek() == Some(&TokenKind::Import) {
            self.parse_import_decl(&mut imports)?;
            self.expect_semi()?;
        }

        let mut decls = Vec::new();
        while self.peek().is_some() {
            match self.peek() {
                Some(TokenKind::Func) => {
                    decls.push(self.parse_func_decl()?);
                    self.expect_semi()?;
                }
                Some(TokenKind::Semi) => {
                    self.advance();
                }
                _ => return Err(self.error_here("expected declaration".to_string())),
            }
        }

        let span = self.close_span(start);
        let file = self.tree.push_spanned(
            Node::File {
                name,
                imports,
                decls,
            },
            span,
        );
        self.tree.set_root(file);
        Ok(self.tree)
    }

    fn parse_import_decl(&mut self, imports: &mut Vec<NodeId>) -> Result<(), ParseError> {
        self.expect(&TokenKind::Import, "'import'")?;
        if self.eat(&TokenKind::LParen) {
            loop {
                match self.peek() {
                    Some(TokenKind::RParen) => {
                        self.advance();
                        break;
                    }
                    Some(TokenKind::Semi) => {
                        self.advance();
                    }
                    Some(_) => {
                        imports.push(self.parse_import_spec()?);
                        self.expect_semi()?;
                    }
                    None => return Err(self.error_here("unclosed import block".to_string())),
                }
            }
        } else {
            imports.push(self.parse_import_spec()?);
        }
        Ok(())
    }

    fn parse_import_spec(&mut self) -> Result<NodeId, ParseError> {
        let start = self.peek_span().start;
        let alias = match self.peek() {
            Some(TokenKind::Ident(_)) => Some(self.parse_ident()?),
            _ => None,
        };
        let path = match self.peek() {
            Some(TokenKind::Str(text)) => {
                let value = text.clone();
                let span = self.peek_span();
                self.advance();
                self.tree.push_spanned(
                    Node::BasicLit {
                        kind: LitKind::String,
                        value,
                    },
                    span,
                )
            }
            _ => return Err(self.error_here("expected import path string".to_string())),
        };
        let span = self.close_span(start);
        Ok(self.tree.push_spanned(Node::ImportSpec { alias, path }, span))
    }

    fn parse_func_decl(&mut self) -> Result<NodeId, ParseError> {
        let start = self.peek_span().start;
        self.expect(&TokenKind::Func, "'func'")?;
        let name = self.parse_ident()?;

        self.expect(&TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        while self.peek() != Some(&TokenKind::RParen) {
            params.push(self.parse_param()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;

        let results = self.parse_results()?;
        let body = self.parse_block()?;
        let span = self.close_span(start);
        Ok(self.tree.push_spanned(
            Node::FuncDecl {
                name,
                params,
                results,
                body,
            },
            span,
        ))
    }

    /// One parameter: `name Type`.
    fn parse_param(&mut self) -> Result<NodeId, ParseError> {
        let start = self.peek_span().start;
        let name = self.parse_ident()?;
        let ty = self.parse_type()?;
        let span = self.close_span(start);
        Ok(self.tree.push_spanned(
            Node::Field {
                names: vec![name],
                ty,
            },
            span,
        ))
    }

    /// Result list: nothing, a single bare type, or `(T1, T2)`.
    fn parse_results(&mut self) -> Result<Vec<NodeId>, ParseError> {
        match self.peek() {
            Some(TokenKind::LBrace) => Ok(Vec::new()),
            Some(TokenKind::LParen) => {
                self.advance();
                let mut results = Vec::new();
                while self.peek() != Some(&TokenKind::RParen) {
                    let start = self.peek_span().start;
                    let ty = self.parse_type()?;
                    let span = self.close_span(start);
                    results.push(
                        self.tree
                            .push_spanned(Node::Field { names: vec![], ty }, span),
                    );
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(results)
            }
            _ => {
                let start = self.peek_span().start;
                let ty = self.parse_type()?;
                let span = self.close_span(start);
                Ok(vec![
                    self.tree
                        .push_spanned(Node::Field { names: vec![], ty }, span),
                ])
            }
        }
    }

    fn parse_type(&mut self) -> Result<NodeId, ParseError> {
        let start = self.peek_span().start;
        match self.peek() {
            Some(TokenKind::Star) => {
                self.advance();
                let x = self.parse_type()?;
                let span = self.close_span(start);
                Ok(self.tree.push_spanned(Node::StarExpr { x }, span))
            }
            Some(TokenKind::LBracket) => {
                self.advance();
                let len = if self.peek() == Some(&TokenKind::RBracket) {
                    None
                } else {
                    Some(self.parse_expr(1)?)
                };
                self.expect(&TokenKind::RBracket, "']'")?;
                let elt = self.parse_type()?;
                let span = self.close_span(start);
                Ok(self.tree.push_spanned(Node::ArrayType { len, elt }, span))
            }
            Some(TokenKind::Ident(_)) => {
                let mut x = self.parse_ident()?;
                while self.eat(&TokenKind::Dot) {
                    let sel = self.parse_ident()?;
                    let span = self.close_span(start);
                    x = self.tree.push_spanned(Node::SelectorExpr { x, sel }, span);
                }
                Ok(x)
            }
            _ => Err(self.error_here("expected type".to_string())),
        }
    }

    // ---- statements ----

    fn parse_block(&mut self) -> Result<NodeId, ParseError> {
        let start = self.peek_span().start;
        self.expect(&TokenKind::LBrace, "'{'")?;
        let saved = self.allow_composite;
        self.allow_composite = true;
        let mut stmts = Vec::new();
        while self.peek().is_some() && self.peek() != Some(&TokenKind::RBrace) {
            if self.eat(&TokenKind::Semi) {
                continue;
            }
            stmts.push(self.parse_stmt()?);
            self.expect_semi()?;
        }
        self.expect(&TokenKind::RBrace, "'}'")?;
        self.allow_composite = saved;
        let span = self.close_span(start);
        Ok(self.tree.push_spanned(Node::Block { stmts }, span))
    }

    fn parse_stmt(&mut self) -> Result<NodeId, ParseError> {
        match self.peek() {
            Some(TokenKind::Return) => self.parse_return(),
            Some(TokenKind::If) => self.parse_if(),
            Some(TokenKind::For) => self.parse_for(),
            Some(TokenKind::LBrace) => self.parse_block(),
            _ => {
                let start = self.peek_span().start;
                match self.parse_simple_stmt()? {
                    Simple::Stmt(id) => Ok(id),
                    Simple::Expr(expr) => {
                        let span = self.close_span(start);
                        Ok(self.tree.push_spanned(Node::ExprStmt { expr }, span))
                    }
                }
            }
        }
    }

    fn parse_return(&mut self) -> Result<NodeId, ParseError> {
        let start = self.peek_span().start;
        self.expect(&TokenKind::Return, "'return'")?;
        let mut results = Vec::new();
        if !matches!(
            self.peek(),
            Some(TokenKind::Semi) | Some(TokenKind::RBrace) | None
        ) {
            results.push(self.parse_expr(1)?);
            while self.eat(&TokenKind::Comma) {
                results.push(self.parse_expr(1)?);
            }
        }
        let span = self.close_span(start);
        Ok(self.tree.push_spanned(Node::ReturnStmt { results }, span))
    }

    /// Expression statement or assignment (`=` / `:=`).
    fn parse_simple_stmt(&mut self) -> Result<Simple, ParseError> {
        let start = self.peek_span().start;
        let mut lhs = vec![self.parse_expr(1)?];
        while self.eat(&TokenKind::Comma) {
            lhs.push(self.parse_expr(1)?);
        }

        let op = match self.peek() {
            Some(TokenKind::Assign) => Some(AssignOp::Assign),
            Some(TokenKind::Define) => Some(AssignOp::Define),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let mut rhs = vec![self.parse_expr(1)?];
            while self.eat(&TokenKind::Comma) {
                rhs.push(self.parse_expr(1)?);
            }
            let span = self.close_span(start);
            return Ok(Simple::Stmt(self.tree.push_spanned(
                Node::AssignStmt { lhs, op, rhs },
                span,
            )));
        }

        if lhs.len() != 1 {
            return Err(self.error_here("expected assignment".to_string()));
        }
        Ok(Simple::Expr(lhs[0]))
    }

    fn parse_if(&mut self) -> Result<NodeId, ParseError> {
        let start = self.peek_span().start;
        self.expect(&TokenKind::If, "'if'")?;
        let saved = self.allow_composite;
        self.allow_composite = false;

        let first = self.parse_simple_stmt()?;
        let (init, cond) = if self.eat(&TokenKind::Semi) {
            let init = self.commit_simple(first);
            (Some(init), self.parse_expr(1)?)
        } else {
            match first {
                Simple::Expr(expr) => (None, expr),
                Simple::Stmt(_) => {
                    return Err(self.error_here("missing condition in if statement".to_string()));
                }
            }
        };
        self.allow_composite = saved;

        let body = self.parse_block()?;
        let els = if self.eat(&TokenKind::Else) {
            match self.peek() {
                Some(TokenKind::If) => Some(self.parse_if()?),
                Some(TokenKind::LBrace) => Some(self.parse_block()?),
                _ => return Err(self.error_here("expected 'if' or block after 'else'".to_string())),
            }
        } else {
            None
        };
        let span = self.close_span(start);
        Ok(self.tree.push_spanned(
            Node::IfStmt {
                init,
                cond,
                body,
                els,
            },
            span,
        ))
    }

    fn parse_for(&mut self) -> Result<NodeId, ParseError> {
        let start = self.peek_span().start;
        self.expect(&TokenKind::For, "'for'")?;
        let saved = self.allow_composite;
        self.allow_composite = false;

        let (init, cond, post) = if self.peek() == Some(&TokenKind::LBrace) {
            (None, None, None)
        } else {
            let first = if self.peek() == Some(&TokenKind::Semi) {
                None
            } else {
                Some(self.parse_simple_stmt()?)
            };
            if self.eat(&TokenKind::Semi) {
                let init = first.map(|s| self.commit_simple(s));
                let cond = if self.peek() == Some(&TokenKind::Semi) {
                    None
                } else {
                    Some(self.parse_expr(1)?)
                };
                self.expect(&TokenKind::Semi, "';'")?;
                let post = if self.peek() == Some(&TokenKind::LBrace) {
                    None
                } else {
                    let s = self.parse_simple_stmt()?;
                    Some(self.commit_simple(s))
                };
                (init, cond, post)
            } else {
                match first {
                    Some(Simple::Expr(expr)) => (None, Some(expr), None),
                    _ => return Err(self.error_here("expected for clause".to_string())),
                }
            }
        };
        self.allow_composite = saved;

        let body = self.parse_block()?;
        let span = self.close_span(start);
        Ok(self.tree.push_spanned(
            Node::ForStmt {
                init,
                cond,
                post,
                body,
            },
            span,
        ))
    }

    /// Turn a pending simple statement into an arena statement node.
    fn commit_simple(&mut self, simple: Simple) -> NodeId {
        match simple {
            Simple::Stmt(id) => id,
            Simple::Expr(expr) => {
                let span = self.tree.span(expr);
                self.tree.push_spanned(Node::ExprStmt { expr }, span)
            }
        }
    }

    // ---- expressions ----

    /// Pratt loop over Go's five binary precedence levels.
    fn parse_expr(&mut self, min_prec: u8) -> Result<NodeId, ParseError> {
        let start = self.peek_span().start;
        let mut x = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Op(op)) => *op,
                Some(TokenKind::Minus) => BinOp::Sub,
                Some(TokenKind::Star) => BinOp::Mul,
                Some(TokenKind::Amp) => BinOp::And,
                _ => break,
            };
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            let y = self.parse_expr(prec + 1)?;
            let span = self.close_span(start);
            x = self.tree.push_spanned(Node::BinaryExpr { op, x, y }, span);
        }
        Ok(x)
    }

    fn parse_unary(&mut self) -> Result<NodeId, ParseError> {
        let start = self.peek_span().start;
        let op = match self.peek() {
            Some(TokenKind::Not) => Some(UnOp::Not),
            Some(TokenKind::Minus) => Some(UnOp::Neg),
            Some(TokenKind::Amp) => Some(UnOp::Addr),
            Some(TokenKind::Star) => {
                self.advance();
                let x = self.parse_unary()?;
                let span = self.close_span(start);
                return Ok(self.tree.push_spanned(Node::StarExpr { x }, span));
            }
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let x = self.parse_unary()?;
            let span = self.close_span(start);
            return Ok(self.tree.push_spanned(Node::UnaryExpr { op, x }, span));
        }
        self.parse_primary()
    }

    /// Operand followed by selector / call / index / composite-literal
    /// suffixes.
    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        let start = self.peek_span().start;
        let mut x = self.parse_operand()?;
        loop {
            match self.peek() {
                Some(TokenKind::Dot) => {
                    self.advance();
                    let sel = self.parse_ident()?;
                    let span = self.close_span(start);
                    x = self.tree.push_spanned(Node::SelectorExpr { x, sel }, span);
                }
                Some(TokenKind::LParen) => {
                    self.advance();
                    let saved = self.allow_composite;
                    self.allow_composite = true;
                    let mut args = Vec::new();
                    while self.peek() != Some(&TokenKind::RParen) {
                        args.push(self.parse_expr(1)?);
                        if !self.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                    self.expect(&TokenKind::RParen, "')'")?;
                    self.allow_composite = saved;
                    let span = self.close_span(start);
                    x = self.tree.push_spanned(Node::CallExpr { fun: x, args }, span);
                }
                Some(TokenKind::LBracket) => {
                    self.advance();
                    let saved = self.allow_composite;
                    self.allow_composite = true;
                    let index = self.parse_expr(1)?;
                    self.expect(&TokenKind::RBracket, "']'")?;
                    self.allow_composite = saved;
                    let span = self.close_span(start);
                    x = self.tree.push_spanned(Node::IndexExpr { x, index }, span);
                }
                Some(TokenKind::LBrace)
                    if self.allow_composite
                        && matches!(
                            self.tree.kind(x),
                            NodeKind::Ident | NodeKind::SelectorExpr | NodeKind::ArrayType
                        ) =>
                {
                    let elts = self.parse_composite_body()?;
                    let span = self.close_span(start);
                    x = self
                        .tree
                        .push_spanned(Node::CompositeLit { ty: Some(x), elts }, span);
                }
                _ => break,
            }
        }
        Ok(x)
    }

    fn parse_composite_body(&mut self) -> Result<Vec<NodeId>, ParseError> {
        self.expect(&TokenKind::LBrace, "'{'")?;
        let saved = self.allow_composite;
        self.allow_composite = true;
        let mut elts = Vec::new();
        while self.peek() != Some(&TokenKind::RBrace) {
            let start = self.peek_span().start;
            let key_or_value = self.parse_expr(1)?;
            if self.eat(&TokenKind::Colon) {
                let value = self.parse_expr(1)?;
                let span = self.close_span(start);
                elts.push(self.tree.push_spanned(
                    Node::KeyValueExpr {
                        key: key_or_value,
                        value,
                    },
                    span,
                ));
            } else {
                elts.push(key_or_value);
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace, "'}'")?;
        self.allow_composite = saved;
        Ok(elts)
    }

    fn parse_operand(&mut self) -> Result<NodeId, ParseError> {
        let start = self.peek_span().start;
        let span = self.peek_span();
        match self.peek().cloned() {
            Some(TokenKind::Ident(name)) => {
                self.advance();
                Ok(self.tree.push_spanned(Node::Ident { name }, span))
            }
            Some(TokenKind::Int(value)) => {
                self.advance();
                Ok(self.tree.push_spanned(
                    Node::BasicLit {
                        kind: LitKind::Int,
                        value,
                    },
                    span,
                ))
            }
            Some(TokenKind::Float(value)) => {
                self.advance();
                Ok(self.tree.push_spanned(
                    Node::BasicLit {
                        kind: LitKind::Float,
                        value,
                    },
                    span,
                ))
            }
            Some(TokenKind::Str(value)) => {
                self.advance();
                Ok(self.tree.push_spanned(
                    Node::BasicLit {
                        kind: LitKind::String,
                        value,
                    },
                    span,
                ))
            }
            Some(TokenKind::Char(value)) => {
                self.advance();
                Ok(self.tree.push_spanned(
                    Node::BasicLit {
                        kind: LitKind::Char,
                        value,
                    },
                    span,
                ))
            }
            Some(TokenKind::LParen) => {
                self.advance();
                let saved = self.allow_composite;
                self.allow_composite = true;
                let x = self.parse_expr(1)?;
                self.expect(&TokenKind::RParen, "')'")?;
                self.allow_composite = saved;
                let full = self.close_span(start);
                Ok(self.tree.push_spanned(Node::ParenExpr { x }, full))
            }
            Some(TokenKind::LBracket) => self.parse_type(),
            _ => Err(self.error_here("expected expression".to_string())),
        }
    }
}
