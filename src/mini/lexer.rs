//! Lexer for mini source code.
//!
//! Tokenizes mini source into spanned tokens: keywords, identifiers,
//! number and string literals, operators, and punctuation. Whitespace and
//! `//` line comments are skipped between tokens.
//!
//! # Example
//!
//! ```rust
//! use ast2json::mini::lexer::{lexer, Token};
//! use chumsky::prelude::*;
//!
//! let tokens = lexer().parse("let x = 1;").into_result().unwrap();
//! assert_eq!(tokens[0].0, Token::Let);
//! ```

use chumsky::prelude::*;

/// Span type for tokens.
pub type Span = SimpleSpan<usize>;

/// A token with its span.
pub type Spanned<T> = (T, Span);

/// A token in mini.
#[derive(Clone, Debug, PartialEq)]
pub enum Token<'src> {
    // Keywords
    Let,
    True,
    False,
    Null,

    // Literals and identifiers
    Ident(&'src str),
    Int(i64),
    Float(f64),
    Str(String),

    // Operators
    Eq,     // ==
    Ne,     // !=
    Le,     // <=
    Ge,     // >=
    Lt,     // <
    Gt,     // >
    Assign, // =
    Plus,   // +
    Minus,  // -
    Star,   // *
    Slash,  // /
    Bang,   // !

    // Punctuation
    LParen,    // (
    RParen,    // )
    Comma,     // ,
    Semicolon, // ;
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Let => write!(f, "let"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Null => write!(f, "null"),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Int(n) => write!(f, "{}", n),
            Token::Float(x) => write!(f, "{}", x),
            Token::Str(s) => write!(f, "\"{}\"", s),
            Token::Eq => write!(f, "=="),
            Token::Ne => write!(f, "!="),
            Token::Le => write!(f, "<="),
            Token::Ge => write!(f, ">="),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::Assign => write!(f, "="),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Bang => write!(f, "!"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
        }
    }
}

/// Create the lexer parser.
pub fn lexer<'src>(
) -> impl Parser<'src, &'src str, Vec<Spanned<Token<'src>>>, extra::Err<Rich<'src, char, Span>>> {
    // Number literals. A trailing fraction makes the token a float; plain
    // digit runs that overflow i64 fall back to the nearest double. Literals
    // beyond double range are a lex error, not an infinity.
    let number = text::int(10)
        .then(just('.').then(text::digits(10)).or_not())
        .to_slice()
        .validate(|s: &str, e, emitter| {
            if !s.contains('.') {
                if let Ok(n) = s.parse::<i64>() {
                    return Token::Int(n);
                }
            }
            let x: f64 = s.parse().unwrap();
            if x.is_finite() {
                Token::Float(x)
            } else {
                emitter.emit(Rich::custom(e.span(), "number literal out of range"));
                Token::Float(0.0)
            }
        });

    // String literals with escape sequences.
    let escape = just('\\').ignore_then(choice((
        just('\\').to('\\'),
        just('"').to('"'),
        just('n').to('\n'),
        just('r').to('\r'),
        just('t').to('\t'),
        just('0').to('\0'),
    )));
    let string_lit = none_of("\\\"")
        .or(escape)
        .repeated()
        .collect::<String>()
        .delimited_by(just('"'), just('"'))
        .map(Token::Str);

    // Multi-character operators (must come before single char versions)
    let multi_char_ops = choice((
        just("==").to(Token::Eq),
        just("!=").to(Token::Ne),
        just("<=").to(Token::Le),
        just(">=").to(Token::Ge),
    ));

    let single_char_ops = choice((
        just('<').to(Token::Lt),
        just('>').to(Token::Gt),
        just('=').to(Token::Assign),
        just('+').to(Token::Plus),
        just('-').to(Token::Minus),
        just('*').to(Token::Star),
        just('/').to(Token::Slash),
        just('!').to(Token::Bang),
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just(',').to(Token::Comma),
        just(';').to(Token::Semicolon),
    ));

    let keyword = choice((
        text::keyword("let").to(Token::Let),
        text::keyword("true").to(Token::True),
        text::keyword("false").to(Token::False),
        text::keyword("null").to(Token::Null),
    ));

    let ident = text::ident().map(Token::Ident);

    let token = choice((number, string_lit, multi_char_ops, single_char_ops, keyword, ident));

    // Whitespace and // line comments are insignificant between tokens.
    // The leading skip matters for inputs with no tokens at all, where the
    // per-token padding never runs.
    let comment = just("//").then(none_of('\n').repeated()).ignored();
    let noise = choice((one_of(" \t\r\n").ignored(), comment)).repeated();

    noise.clone().ignore_then(
        token
            .map_with(|tok, e| (tok, e.span()))
            .padded_by(noise)
            .repeated()
            .collect(),
    )
}
