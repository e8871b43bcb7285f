//! Parser for mini token streams.
//!
//! Builds [`Value`] trees directly from the spanned tokens the lexer
//! produces, using chumsky combinators. Precedence, lowest to highest:
//! comparisons, `+ -`, `* /`, unary `- !`, calls, atoms.
//!
//! The parser reports the first error it hits; there is no recovery and no
//! partial tree, matching the all-or-nothing engine contract.

use crate::ast::{Node, Value};
use chumsky::input::MappedInput;
use chumsky::prelude::*;

use super::lexer::{Span, Spanned, Token};

/// Parser input type - a slice of spanned tokens mapped into chumsky format.
/// Created by calling `tokens.split_token_span(eoi_span)` on a token slice.
pub type ParserInput<'tokens, 'src> =
    MappedInput<'tokens, Token<'src>, Span, &'tokens [Spanned<Token<'src>>]>;

/// Wrap left and right operands in a BinaryExpression node.
fn binary(left: Value, (operator, right): (&'static str, Value)) -> Value {
    Value::Node(
        Node::new("BinaryExpression")
            .field("operator", operator)
            .field("left", left)
            .field("right", right),
    )
}

/// Parse an expression.
fn expr<'tokens, 'src: 'tokens>() -> impl Parser<
    'tokens,
    ParserInput<'tokens, 'src>,
    Value,
    extra::Err<Rich<'tokens, Token<'src>, Span>>,
> + Clone {
    recursive(|expr| {
        let atom = choice((
            select! {
                Token::Int(n) => Value::Node(Node::new("NumberLiteral").field("value", n)),
                Token::Float(x) => Value::Node(Node::new("NumberLiteral").field("value", x)),
                Token::Str(s) => Value::Node(Node::new("StringLiteral").field("value", s)),
                Token::True => Value::Node(Node::new("BooleanLiteral").field("value", true)),
                Token::False => Value::Node(Node::new("BooleanLiteral").field("value", false)),
                Token::Null => Value::Node(Node::new("NullLiteral")),
                Token::Ident(name) => Value::Node(Node::new("Identifier").field("name", name)),
            },
            // Parenthesized expression
            expr.clone()
                .delimited_by(just(Token::LParen), just(Token::RParen)),
        ))
        .labelled("expression");

        // Call expressions: callee(arg, ...), left-associative for chains
        // like f(1)(2).
        let call = atom.foldl(
            expr.clone()
                .separated_by(just(Token::Comma))
                .allow_trailing()
                .collect::<Vec<_>>()
                .delimited_by(just(Token::LParen), just(Token::RParen))
                .repeated(),
            |callee, arguments| {
                Value::Node(
                    Node::new("CallExpression")
                        .field("callee", callee)
                        .field("arguments", Value::Array(arguments)),
                )
            },
        );

        // Unary operators
        let unary = choice((just(Token::Minus).to("-"), just(Token::Bang).to("!")))
            .repeated()
            .foldr(call, |operator, operand| {
                Value::Node(
                    Node::new("UnaryExpression")
                        .field("operator", operator)
                        .field("operand", operand),
                )
            });

        let product_op = choice((just(Token::Star).to("*"), just(Token::Slash).to("/")));
        let product = unary
            .clone()
            .foldl(product_op.then(unary).repeated(), binary);

        let sum_op = choice((just(Token::Plus).to("+"), just(Token::Minus).to("-")));
        let sum = product.clone().foldl(sum_op.then(product).repeated(), binary);

        let comparison_op = choice((
            just(Token::Eq).to("=="),
            just(Token::Ne).to("!="),
            just(Token::Le).to("<="),
            just(Token::Ge).to(">="),
            just(Token::Lt).to("<"),
            just(Token::Gt).to(">"),
        ));
        sum.clone()
            .foldl(comparison_op.then(sum).repeated(), binary)
            .boxed()
    })
}

/// Parse a statement: a let declaration or an expression statement.
fn stmt<'tokens, 'src: 'tokens>() -> impl Parser<
    'tokens,
    ParserInput<'tokens, 'src>,
    Value,
    extra::Err<Rich<'tokens, Token<'src>, Span>>,
> + Clone {
    let let_decl = just(Token::Let)
        .ignore_then(select! { Token::Ident(name) => name.to_string() })
        .then_ignore(just(Token::Assign))
        .then(expr())
        .then_ignore(just(Token::Semicolon))
        .labelled("let declaration")
        .map(|(name, init)| {
            Value::Node(
                Node::new("LetDeclaration")
                    .field("name", name)
                    .field("init", init),
            )
        });

    let expr_stmt = expr()
        .then_ignore(just(Token::Semicolon))
        .labelled("expression statement")
        .map(|expression| {
            Value::Node(Node::new("ExpressionStatement").field("expression", expression))
        });

    choice((let_decl, expr_stmt))
}

/// Parse a complete program: zero or more statements up to end of input.
pub fn program<'tokens, 'src: 'tokens>() -> impl Parser<
    'tokens,
    ParserInput<'tokens, 'src>,
    Value,
    extra::Err<Rich<'tokens, Token<'src>, Span>>,
> + Clone {
    stmt()
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|body| Value::Node(Node::new("Program").field("body", Value::Array(body))))
}
