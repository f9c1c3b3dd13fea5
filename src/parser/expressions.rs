//! Expression parsing using Pratt precedence.

use std::rc::Rc;

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::{Token, TokenKind};
use crate::span::Span;

use super::core::{ParseResult, Parser};
use super::precedence::{get_precedence, Precedence};

impl Parser {
    pub(crate) fn expression(&mut self) -> ParseResult<Expr> {
        self.parse_precedence(Precedence::Or)
    }

    pub(crate) fn parse_precedence(&mut self, min_precedence: Precedence) -> ParseResult<Expr> {
        let mut left = self.parse_prefix()?;

        while !self.is_at_end() {
            let precedence = get_precedence(&self.peek().kind);
            if precedence == Precedence::None || precedence < min_precedence {
                break;
            }

            left = self.parse_infix(left, precedence)?;
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        if self.is_at_end() {
            return Err(ParserError::unexpected_eof(self.current_span()));
        }

        let token = self.advance();
        let start_span = token.span;

        match &token.kind {
            TokenKind::Number(n) => Ok(Expr::new(ExprKind::Number(*n), start_span)),
            TokenKind::StringLiteral(s) => {
                Ok(Expr::new(ExprKind::StringLiteral(s.clone()), start_span))
            }
            TokenKind::BoolLiteral(b) => Ok(Expr::new(ExprKind::Boolean(*b), start_span)),
            TokenKind::Null => Ok(Expr::new(ExprKind::Null, start_span)),

            TokenKind::Identifier(name) => {
                Ok(Expr::new(ExprKind::Identifier(name.clone()), start_span))
            }

            // Grouping yields the inner expression; rendering re-parenthesizes
            TokenKind::LeftParen => {
                let expr = self.expression()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(expr)
            }

            TokenKind::LeftBracket => self.parse_array(start_span),
            TokenKind::LeftBrace => self.parse_hash(start_span),

            TokenKind::Minus => self.parse_unary(PrefixOp::Negate, start_span),
            TokenKind::Bang => self.parse_unary(PrefixOp::Not, start_span),

            TokenKind::If => self.parse_if(start_span),
            TokenKind::Fn => self.parse_function(start_span),

            _ => Err(ParserError::no_prefix_rule(
                format!("{}", token.kind),
                token.span,
            )),
        }
    }

    fn parse_infix(&mut self, left: Expr, precedence: Precedence) -> ParseResult<Expr> {
        let token = self.advance();

        match &token.kind {
            TokenKind::LeftParen => self.finish_call(left, token.span),
            TokenKind::LeftBracket => {
                let index = self.expression()?;
                self.expect(&TokenKind::RightBracket)?;
                let span = token.span.merge(&left.span).merge(&self.previous_span());
                Ok(Expr::new(
                    ExprKind::Index {
                        left: Box::new(left),
                        index: Box::new(index),
                    },
                    span,
                ))
            }
            TokenKind::And | TokenKind::Or => {
                let operator = if token.kind == TokenKind::And {
                    LogicalOp::And
                } else {
                    LogicalOp::Or
                };
                let right = self.parse_precedence(precedence.next())?;
                let span = token.span.merge(&left.span).merge(&right.span);
                Ok(Expr::new(
                    ExprKind::Logical {
                        left: Box::new(left),
                        operator,
                        right: Box::new(right),
                    },
                    span,
                ))
            }
            _ => {
                let operator = infix_operator(&token)?;
                let right = self.parse_precedence(precedence.next())?;
                let span = token.span.merge(&left.span).merge(&right.span);
                Ok(Expr::new(
                    ExprKind::Infix {
                        left: Box::new(left),
                        operator,
                        right: Box::new(right),
                    },
                    span,
                ))
            }
        }
    }

    fn parse_unary(&mut self, operator: PrefixOp, start_span: Span) -> ParseResult<Expr> {
        let operand = self.parse_precedence(Precedence::Unary)?;
        let span = start_span.merge(&operand.span);
        Ok(Expr::new(
            ExprKind::Prefix {
                operator,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_if(&mut self, start_span: Span) -> ParseResult<Expr> {
        let condition = self.expression()?;
        let consequence = self.block()?;

        let alternative = if self.match_token(&TokenKind::Else) {
            Some(self.block()?)
        } else {
            None
        };

        let span = start_span.merge(&self.previous_span());
        Ok(Expr::new(
            ExprKind::If {
                condition: Box::new(condition),
                consequence,
                alternative,
            },
            span,
        ))
    }

    fn parse_function(&mut self, start_span: Span) -> ParseResult<Expr> {
        self.expect(&TokenKind::LeftParen)?;

        let mut parameters = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                parameters.push(self.expect_identifier()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;

        let body = self.block()?;
        let span = start_span.merge(&self.previous_span());
        Ok(Expr::new(
            ExprKind::Function(Rc::new(FunctionLiteral { parameters, body })),
            span,
        ))
    }

    fn finish_call(&mut self, callee: Expr, paren_span: Span) -> ParseResult<Expr> {
        let arguments = self.parse_list(&TokenKind::RightParen)?;
        let span = paren_span.merge(&callee.span).merge(&self.previous_span());
        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                arguments,
            },
            span,
        ))
    }

    fn parse_array(&mut self, start_span: Span) -> ParseResult<Expr> {
        let elements = self.parse_list(&TokenKind::RightBracket)?;
        let span = start_span.merge(&self.previous_span());
        Ok(Expr::new(ExprKind::Array(elements), span))
    }

    fn parse_hash(&mut self, start_span: Span) -> ParseResult<Expr> {
        let mut pairs = Vec::new();
        if !self.check(&TokenKind::RightBrace) {
            loop {
                let key = self.expression()?;
                self.expect(&TokenKind::Colon)?;
                let value = self.expression()?;
                pairs.push((key, value));

                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
                if self.check(&TokenKind::RightBrace) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightBrace)?;
        let span = start_span.merge(&self.previous_span());
        Ok(Expr::new(ExprKind::Hash(pairs), span))
    }

    /// Parse comma-separated expressions up to and including `terminator`.
    /// A trailing comma is allowed.
    fn parse_list(&mut self, terminator: &TokenKind) -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();
        if !self.check(terminator) {
            loop {
                items.push(self.expression()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
                if self.check(terminator) {
                    break;
                }
            }
        }
        self.expect(terminator)?;
        Ok(items)
    }
}

fn infix_operator(token: &Token) -> ParseResult<InfixOp> {
    let operator = match token.kind {
        TokenKind::Plus => InfixOp::Add,
        TokenKind::Minus => InfixOp::Subtract,
        TokenKind::Star => InfixOp::Multiply,
        TokenKind::Slash => InfixOp::Divide,
        TokenKind::Less => InfixOp::Less,
        TokenKind::LessEqual => InfixOp::LessEqual,
        TokenKind::Greater => InfixOp::Greater,
        TokenKind::GreaterEqual => InfixOp::GreaterEqual,
        TokenKind::EqualEqual => InfixOp::Equal,
        TokenKind::BangEqual => InfixOp::NotEqual,
        _ => {
            return Err(ParserError::unexpected_token(
                "operator",
                format!("{}", token.kind),
                token.span,
            ))
        }
    };
    Ok(operator)
}
