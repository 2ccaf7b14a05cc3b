use std::rc::Rc;

use thiserror::Error;

use crate::ast::{Identifier, LetStatement, Program, ReturnStatement, Statement};
use crate::expression_parsing::{self, Precedence};
use crate::lexer::{Lexer, TokenKind};
use crate::reader::Reader;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expect next token to be {expected}, got {got} instead")]
    UnexpectedToken { expected: TokenKind, got: TokenKind },
    #[error("expect next token to be IDENTIFIER, got {got} instead")]
    ExpectedIdentifier { got: TokenKind },
    #[error("no prefix parse handler for {0} found")]
    NoPrefixParse(TokenKind),
    #[error("could not parse {0} as integer")]
    InvalidInteger(Rc<str>),
    #[error("illegal token {0}")]
    IllegalToken(Rc<str>),
}

/// Single-pass Pratt parser. The first grammar violation aborts the whole
/// `parse_program` call; no partial AST is handed out.
pub struct Parser<'a> {
    pub(crate) reader: Reader<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            reader: Reader::new(lexer),
        }
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while !self.reader.current_is(&TokenKind::Eof) {
            statements.push(self.parse_statement()?);
            self.reader.advance();
        }
        Ok(Program { statements })
    }

    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.reader.current().kind {
            TokenKind::Let => Ok(Statement::Let(self.parse_let_statement()?)),
            TokenKind::Return => Ok(Statement::Return(self.parse_return_statement()?)),
            _ => Ok(Statement::Expression(self.parse_expression_statement()?)),
        }
    }

    fn parse_let_statement(&mut self) -> Result<LetStatement, ParseError> {
        let name = self.expect_peek_identifier()?;
        self.reader.expect_peek(TokenKind::Assign)?;
        self.reader.advance();
        let value = expression_parsing::parse_expression(self, Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(LetStatement { name, value })
    }

    fn parse_return_statement(&mut self) -> Result<ReturnStatement, ParseError> {
        self.reader.advance();
        let value = expression_parsing::parse_expression(self, Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(ReturnStatement { value })
    }

    fn parse_expression_statement(&mut self) -> Result<crate::ast::Expression, ParseError> {
        let expression = expression_parsing::parse_expression(self, Precedence::Lowest)?;
        self.skip_optional_semicolon();
        Ok(expression)
    }

    fn skip_optional_semicolon(&mut self) {
        if self.reader.peek_is(&TokenKind::SemiColon) {
            self.reader.advance();
        }
    }

    fn expect_peek_identifier(&mut self) -> Result<Identifier, ParseError> {
        let name = match &self.reader.peek().kind {
            TokenKind::Ident(name) => name.clone(),
            other => {
                return Err(ParseError::ExpectedIdentifier { got: other.clone() });
            }
        };
        self.reader.advance();
        Ok(Identifier { name })
    }
}
