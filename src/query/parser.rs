//! Recursive descent parser for boolean expressions

use crate::error::{DuodexError, Result};
use crate::query::ast::QueryNode;
use crate::query::lexer::{Lexer, Token};

/// Parser consuming a token stream into a [`QueryNode`] tree.
pub struct QueryParser {
    lexer: Lexer,
    current: Token,
}

impl QueryParser {
    pub fn new(input: &str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self { lexer, current }
    }

    /// Parse the whole input, rejecting trailing tokens.
    pub fn parse(mut self) -> Result<QueryNode> {
        let node = self.parse_expr()?;
        if self.current != Token::Eof {
            return Err(DuodexError::QueryParse(format!(
                "trailing tokens near {:?}",
                self.current
            )));
        }
        Ok(node)
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn parse_expr(&mut self) -> Result<QueryNode> {
        let mut left = self.parse_and_expr()?;
        while self.current == Token::Or {
            self.advance();
            let right = self.parse_and_expr()?;
            left = QueryNode::or(left, right);
        }
        Ok(left)
    }

    fn parse_and_expr(&mut self) -> Result<QueryNode> {
        let mut left = self.parse_unary()?;
        while self.current == Token::And {
            self.advance();
            let right = self.parse_unary()?;
            left = QueryNode::and(left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<QueryNode> {
        if self.current == Token::Not {
            self.advance();
            return Ok(QueryNode::not(self.parse_unary()?));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<QueryNode> {
        match std::mem::replace(&mut self.current, Token::Eof) {
            Token::Term(word) => {
                self.advance();
                Ok(QueryNode::Term(word))
            }
            Token::LeftParen => {
                self.advance();
                let node = self.parse_expr()?;
                if self.current != Token::RightParen {
                    return Err(DuodexError::QueryParse(format!(
                        "expected ')', found {:?}",
                        self.current
                    )));
                }
                self.advance();
                Ok(node)
            }
            other => Err(DuodexError::QueryParse(format!(
                "expected term or '(', found {:?}",
                other
            ))),
        }
    }
}

/// Parse a query string into its AST.
pub fn parse_query(input: &str) -> Result<QueryNode> {
    QueryParser::new(input).parse()
}
