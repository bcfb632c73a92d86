use crate::{
    ast::Expr,
    lexer::{self, extract, SUGGESTED_TOKENS_CAPACITY},
    token::{Span, Spanned, Token},
};

type Result<T, E = Spanned<Error>> = std::result::Result<T, E>;

/// Maximum number of `ap` markers on any path from the root of an expression
/// to a leaf. Parsing, rendering and evaluation all recurse once per marker.
pub const MAX_DEPTH: usize = 512;

/// Parses a single expression. All tokens of `src` must be consumed.
pub fn parse(src: &str) -> Result<Expr> {
    let mut tokens = Vec::with_capacity(SUGGESTED_TOKENS_CAPACITY);
    parse_with(src, &mut tokens)
}

/// Like [`parse`], but lexes into the provided (empty) buffer so that callers
/// translating many lines may reuse it.
pub fn parse_with(src: &str, tokens: &mut Vec<Token>) -> Result<Expr> {
    assert!(tokens.is_empty(), "must pass clean tokens buffer");
    lexer::lex(src, tokens);

    let p = Parser::new(src, tokens);
    let (expr, cursor) = p.parse_expr(0, 0)?;
    if let Some(first) = tokens.get(cursor) {
        let last = tokens[tokens.len() - 1];
        let error = Error::Trailing {
            count: tokens.len() - cursor,
        };
        return Err(first.span().to(last.span()).wrap(error));
    }

    log::trace!(target: "parse", "parsed {} tokens", tokens.len());
    Ok(expr)
}

/// Recursive descent parser.
///
/// Parsing functions take the cursor (an index into `tokens`) at which they
/// start and return, alongside the parsed node, the cursor just past the last
/// token they consumed. The parser itself is never mutated.
struct Parser<'src, 'tok> {
    src: &'src str,
    tokens: &'tok [Token],
}

impl Parser<'_, '_> {
    fn parse_expr(&self, cursor: usize, depth: usize) -> Result<(Expr, usize)> {
        let rest = &self.tokens[cursor..];
        let Some(&first) = rest.first() else {
            return Err(self.eof_span().wrap(Error::UnexpectedEnd));
        };

        let run = rest.iter().take_while(|t| t.is_ap()).count();
        if run == rest.len() {
            let span = first.span().to(rest[run - 1].span());
            return Err(span.wrap(Error::IncompleteApplication));
        }
        if run == 0 {
            return Ok((self.parse_leaf(first), cursor + 1));
        }
        if depth + run > MAX_DEPTH {
            let span = first.span().to(rest[run - 1].span());
            return Err(span.wrap(Error::TooDeep { limit: MAX_DEPTH }));
        }

        let nest = |position| {
            move |inner: Spanned<Error>| {
                if let Error::TooDeep { .. } = inner.inner {
                    return inner;
                }
                let span = first.span().to(inner.span);
                span.wrap(Error::Nested {
                    position,
                    inner: Box::new(inner),
                })
            }
        };

        let (op, mut cursor) = self
            .parse_expr(cursor + run, depth + run)
            .map_err(nest(Position::Operator))?;

        let mut args = Vec::with_capacity(run);
        for index in 0..run {
            let (arg, next) = self
                .parse_expr(cursor, depth + run)
                .map_err(nest(Position::Argument(index)))?;
            args.push(arg);
            cursor = next;
        }

        Ok((Expr::curried(op, args), cursor))
    }

    fn parse_leaf(&self, token: Token) -> Expr {
        if let Some(index) = extract::variable(token, self.src) {
            return Expr::Variable(index);
        }
        if let Ok(number) = extract::int(token, self.src) {
            return Expr::Number(number);
        }
        Expr::function(extract::text(token, self.src))
    }
}

impl Parser<'_, '_> {
    fn new<'src, 'tok>(src: &'src str, tokens: &'tok [Token]) -> Parser<'src, 'tok> {
        Parser { src, tokens }
    }

    /// Empty span at the end of the source.
    fn eof_span(&self) -> Span {
        Span::new_of_length(self.src.len(), 0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A run of `ap` markers reaches the end of the input.
    IncompleteApplication,
    /// An operand was expected, but the input is exhausted.
    UnexpectedEnd,
    /// A sub-expression of an application failed to parse.
    Nested {
        position: Position,
        inner: Box<Spanned<Error>>,
    },
    /// A complete expression was parsed, but tokens remain.
    Trailing { count: usize },
    /// Applications nest deeper than [`MAX_DEPTH`].
    TooDeep { limit: usize },
}

impl Error {
    /// Returns the innermost error, skipping every [`Error::Nested`] layer.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Nested { inner, .. } => inner.inner.root_cause(),
            other => other,
        }
    }
}

/// Where, within an application, a nested error occurred.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Position {
    Operator,
    /// Zero-based.
    Argument(usize),
}
