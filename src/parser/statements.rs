//! Statement parsing: let, return, expression statements and blocks.

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::TokenKind;

use super::core::{ParseResult, Parser};

impl Parser {
    pub(crate) fn statement(&mut self) -> ParseResult<Stmt> {
        if self.check(&TokenKind::Let) {
            self.let_statement()
        } else if self.check(&TokenKind::Return) {
            self.return_statement()
        } else {
            self.expression_statement()
        }
    }

    fn let_statement(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        self.expect(&TokenKind::Let)?;
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Equal)?;
        let value = self.expression()?;
        self.match_token(&TokenKind::Semicolon);

        let span = start_span.merge(&self.previous_span());
        Ok(Stmt::new(StmtKind::Let { name, value }, span))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        self.expect(&TokenKind::Return)?;
        let value = self.expression()?;
        self.match_token(&TokenKind::Semicolon);

        let span = start_span.merge(&self.previous_span());
        Ok(Stmt::new(StmtKind::Return(value), span))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        let span = expr.span;
        self.match_token(&TokenKind::Semicolon);
        Ok(Stmt::new(StmtKind::Expression(expr), span))
    }

    /// Parse `{ statements }`.
    pub(crate) fn block(&mut self) -> ParseResult<Block> {
        let start_span = self.current_span();
        self.expect(&TokenKind::LeftBrace)?;

        let mut statements = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(ParserError::unexpected_eof(self.current_span()));
            }
            statements.push(self.statement()?);
        }
        self.expect(&TokenKind::RightBrace)?;

        let span = start_span.merge(&self.previous_span());
        Ok(Block::new(statements, span))
    }
}
