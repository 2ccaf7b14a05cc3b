use crate::ast::{
    BlockStatement, Expression, HashLiteral, Identifier, InfixOperator, PrefixOperator,
};
use crate::lexer::TokenKind;
use crate::parser::{ParseError, Parser};

#[derive(PartialOrd, PartialEq, Debug, Clone, Copy)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

impl Precedence {
    fn of(kind: &TokenKind) -> Precedence {
        match kind {
            TokenKind::Equal | TokenKind::NotEqual => Precedence::Equals,
            TokenKind::LessThan | TokenKind::GreaterThan => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            TokenKind::LBracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

fn infix_operator(kind: &TokenKind) -> Option<InfixOperator> {
    match kind {
        TokenKind::Plus => Some(InfixOperator::Plus),
        TokenKind::Minus => Some(InfixOperator::Minus),
        TokenKind::Asterisk => Some(InfixOperator::Multiply),
        TokenKind::Slash => Some(InfixOperator::Divide),
        TokenKind::LessThan => Some(InfixOperator::LessThan),
        TokenKind::GreaterThan => Some(InfixOperator::GreaterThan),
        TokenKind::Equal => Some(InfixOperator::Equal),
        TokenKind::NotEqual => Some(InfixOperator::NotEqual),
        _ => None,
    }
}

fn has_infix_handler(kind: &TokenKind) -> bool {
    infix_operator(kind).is_some()
        || matches!(kind, TokenKind::LParen | TokenKind::LBracket)
}

pub(crate) fn parse_expression(
    parser: &mut Parser,
    min_precedence: Precedence,
) -> Result<Expression, ParseError> {
    let mut left = prefix_parsing(parser)?;

    while !parser.reader.peek_is(&TokenKind::SemiColon)
        && min_precedence < Precedence::of(&parser.reader.peek().kind)
    {
        if !has_infix_handler(&parser.reader.peek().kind) {
            break;
        }
        parser.reader.advance();
        left = infix_parsing(parser, left)?;
    }

    Ok(left)
}

fn prefix_parsing(parser: &mut Parser) -> Result<Expression, ParseError> {
    match &parser.reader.current().kind {
        TokenKind::Ident(name) => Ok(Expression::Identifier(Identifier { name: name.clone() })),
        TokenKind::Int(literal) => literal
            .parse()
            .map(Expression::IntegerLiteral)
            .map_err(|_| ParseError::InvalidInteger(literal.clone())),
        TokenKind::True => Ok(Expression::BooleanLiteral(true)),
        TokenKind::False => Ok(Expression::BooleanLiteral(false)),
        TokenKind::String(value) => Ok(Expression::StringLiteral(value.clone())),
        TokenKind::Bang => parse_prefix_operation(parser, PrefixOperator::Bang),
        TokenKind::Minus => parse_prefix_operation(parser, PrefixOperator::Minus),
        TokenKind::LParen => parse_grouped_expression(parser),
        TokenKind::LBracket => {
            let elements = parse_expression_list(parser, TokenKind::RBracket)?;
            Ok(Expression::ArrayLiteral(elements))
        }
        TokenKind::LBrace => parse_hash_literal(parser),
        TokenKind::If => parse_if_expression(parser),
        TokenKind::Function => {
            let (parameters, body) = parse_function_parts(parser)?;
            Ok(Expression::FunctionLiteral { parameters, body })
        }
        TokenKind::Macro => {
            let (parameters, body) = parse_function_parts(parser)?;
            Ok(Expression::MacroLiteral { parameters, body })
        }
        TokenKind::Illegal(text) => Err(ParseError::IllegalToken(text.clone())),
        other => Err(ParseError::NoPrefixParse(other.clone())),
    }
}

// `current` is the operator token when this is called.
fn infix_parsing(parser: &mut Parser, left: Expression) -> Result<Expression, ParseError> {
    match &parser.reader.current().kind {
        TokenKind::LParen => parse_call_expression(parser, left),
        TokenKind::LBracket => parse_index_expression(parser, left),
        kind => {
            let operator = infix_operator(kind)
                .expect("infix dispatch only runs for tokens with a handler");
            let precedence = Precedence::of(kind);
            parser.reader.advance();
            let right = parse_expression(parser, precedence)?;
            Ok(Expression::Infix(operator, Box::new(left), Box::new(right)))
        }
    }
}

fn parse_call_expression(parser: &mut Parser, left: Expression) -> Result<Expression, ParseError> {
    let arguments = parse_expression_list(parser, TokenKind::RParen)?;
    Ok(Expression::Call {
        function: Box::new(left),
        arguments,
    })
}

fn parse_index_expression(parser: &mut Parser, left: Expression) -> Result<Expression, ParseError> {
    parser.reader.advance();
    let index = parse_expression(parser, Precedence::Lowest)?;
    parser.reader.expect_peek(TokenKind::RBracket)?;
    Ok(Expression::Index {
        left: Box::new(left),
        index: Box::new(index),
    })
}

fn parse_prefix_operation(
    parser: &mut Parser,
    operator: PrefixOperator,
) -> Result<Expression, ParseError> {
    parser.reader.advance();
    let right = parse_expression(parser, Precedence::Prefix)?;
    Ok(Expression::Prefix(operator, Box::new(right)))
}

fn parse_grouped_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.reader.advance();
    let expression = parse_expression(parser, Precedence::Lowest)?;
    parser.reader.expect_peek(TokenKind::RParen)?;
    Ok(expression)
}

fn parse_expression_list(
    parser: &mut Parser,
    terminator: TokenKind,
) -> Result<Vec<Expression>, ParseError> {
    let mut items = Vec::new();

    if parser.reader.peek_is(&terminator) {
        parser.reader.advance();
        return Ok(items);
    }

    parser.reader.advance();
    items.push(parse_expression(parser, Precedence::Lowest)?);

    while parser.reader.peek_is(&TokenKind::Comma) {
        parser.reader.advance();
        parser.reader.advance();
        items.push(parse_expression(parser, Precedence::Lowest)?);
    }

    parser.reader.expect_peek(terminator)?;
    Ok(items)
}

fn parse_hash_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let mut pairs = Vec::new();

    while !parser.reader.peek_is(&TokenKind::RBrace) {
        parser.reader.advance();
        let key = parse_expression(parser, Precedence::Lowest)?;
        parser.reader.expect_peek(TokenKind::Colon)?;
        parser.reader.advance();
        let value = parse_expression(parser, Precedence::Lowest)?;
        pairs.push((key, value));

        if !parser.reader.peek_is(&TokenKind::RBrace) {
            parser.reader.expect_peek(TokenKind::Comma)?;
        }
    }

    parser.reader.expect_peek(TokenKind::RBrace)?;
    Ok(Expression::HashLiteral(HashLiteral { pairs }))
}

fn parse_if_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.reader.expect_peek(TokenKind::LParen)?;
    parser.reader.advance();
    let condition = parse_expression(parser, Precedence::Lowest)?;
    parser.reader.expect_peek(TokenKind::RParen)?;
    parser.reader.expect_peek(TokenKind::LBrace)?;
    let consequence = parse_block_statement(parser)?;

    let mut alternative = None;
    if parser.reader.peek_is(&TokenKind::Else) {
        parser.reader.advance();
        parser.reader.expect_peek(TokenKind::LBrace)?;
        alternative = Some(parse_block_statement(parser)?);
    }

    Ok(Expression::If {
        condition: Box::new(condition),
        consequence,
        alternative,
    })
}

// Shared by `fn` and `macro`; their grammar is identical past the keyword.
fn parse_function_parts(
    parser: &mut Parser,
) -> Result<(Vec<Identifier>, BlockStatement), ParseError> {
    parser.reader.expect_peek(TokenKind::LParen)?;
    let parameters = parse_parameters(parser)?;
    parser.reader.expect_peek(TokenKind::LBrace)?;
    let body = parse_block_statement(parser)?;
    Ok((parameters, body))
}

fn parse_parameters(parser: &mut Parser) -> Result<Vec<Identifier>, ParseError> {
    let mut parameters = Vec::new();

    if parser.reader.peek_is(&TokenKind::RParen) {
        parser.reader.advance();
        return Ok(parameters);
    }

    parser.reader.advance();
    parameters.push(current_identifier(parser)?);

    while parser.reader.peek_is(&TokenKind::Comma) {
        parser.reader.advance();
        parser.reader.advance();
        parameters.push(current_identifier(parser)?);
    }

    parser.reader.expect_peek(TokenKind::RParen)?;
    Ok(parameters)
}

fn current_identifier(parser: &mut Parser) -> Result<Identifier, ParseError> {
    match &parser.reader.current().kind {
        TokenKind::Ident(name) => Ok(Identifier { name: name.clone() }),
        other => Err(ParseError::ExpectedIdentifier { got: other.clone() }),
    }
}

pub(crate) fn parse_block_statement(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    let mut statements = Vec::new();

    parser.reader.advance();
    while !parser.reader.current_is(&TokenKind::RBrace)
        && !parser.reader.current_is(&TokenKind::Eof)
    {
        statements.push(parser.parse_statement()?);
        parser.reader.advance();
    }

    Ok(BlockStatement { statements })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_ladder_is_ascending() {
        let ladder = [
            Precedence::Lowest,
            Precedence::Equals,
            Precedence::LessGreater,
            Precedence::Sum,
            Precedence::Product,
            Precedence::Prefix,
            Precedence::Call,
            Precedence::Index,
        ];

        for pair in ladder.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn token_precedences() {
        assert_eq!(Precedence::of(&TokenKind::Equal), Precedence::Equals);
        assert_eq!(Precedence::of(&TokenKind::LessThan), Precedence::LessGreater);
        assert_eq!(Precedence::of(&TokenKind::Plus), Precedence::Sum);
        assert_eq!(Precedence::of(&TokenKind::Slash), Precedence::Product);
        assert_eq!(Precedence::of(&TokenKind::LParen), Precedence::Call);
        assert_eq!(Precedence::of(&TokenKind::LBracket), Precedence::Index);
        assert_eq!(Precedence::of(&TokenKind::SemiColon), Precedence::Lowest);
    }
}
