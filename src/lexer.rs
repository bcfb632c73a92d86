use std::{iter::Peekable, num::ParseIntError, str::Split};

use crate::token::{Span, Token, TokenKind, AP};

pub const SUGGESTED_TOKENS_CAPACITY: usize = 256;

/// Lexes the provided line, producing the tokens into the provided buffer.
pub fn lex(src: &str, tokens: &mut Vec<Token>) {
    Lexer::new(src, tokens).lex();
}

/// A convenience function that allocates a new buffer per lexed input and
/// returns it.
pub fn lex_in_new(src: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(SUGGESTED_TOKENS_CAPACITY);
    lex(src, &mut tokens);
    tokens
}

/// Splits a line on runs of spaces.
///
/// A run of spaces is a single separator, so empty words only survive at the
/// edges of the line: a leading run yields a leading empty word and a
/// trailing run yields a trailing one. Those are kept as ordinary words.
struct Lexer<'src, 'tok> {
    pieces: Peekable<Split<'src, char>>,
    cursor: usize,
    tokens: &'tok mut Vec<Token>,
}

impl Lexer<'_, '_> {
    fn lex(mut self) {
        assert_eq!(self.tokens.len(), 0, "must pass clean tokens buffer");
        let mut is_first = true;
        while let Some(piece) = self.pieces.next() {
            let is_edge = is_first || self.pieces.peek().is_none();
            is_first = false;
            if !piece.is_empty() || is_edge {
                self.produce(piece);
            }
            // Skip the piece and the space that ended it.
            self.cursor += piece.len() + 1;
        }
    }

    fn produce(&mut self, piece: &str) {
        let kind = if piece == AP {
            TokenKind::Ap
        } else {
            TokenKind::Word
        };
        let len = u32::try_from(piece.len()).expect("word longer than 4 GiB");
        let span = Span::new_of_length(self.cursor, len);
        self.tokens.push(Token::new(kind, span));
    }
}

impl Lexer<'_, '_> {
    fn new<'src, 'tok>(src: &'src str, tokens: &'tok mut Vec<Token>) -> Lexer<'src, 'tok> {
        Lexer {
            pieces: src.split(' ').peekable(),
            cursor: 0,
            tokens,
        }
    }
}

pub mod extract {
    use super::*;

    pub fn text(token: Token, src: &str) -> &str {
        token.span().substr(src)
    }

    pub fn int(token: Token, src: &str) -> Result<i64, ParseIntError> {
        text(token, src).parse()
    }

    /// Extracts the index of a `x<N>` variable. Fails if the word doesn't
    /// start with `x` or if `N` isn't a non-negative 64-bit integer.
    pub fn variable(token: Token, src: &str) -> Option<u64> {
        text(token, src).strip_prefix('x')?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tests_with_span() {
        use TokenKind::*;
        let cases = cases!(match .. {
            "1" => [(Word, 0..1)],
            "ap ap add 1 2" => [
                (Ap, 0..2),
                (Ap, 3..5),
                (Word, 6..9),
                (Word, 10..11),
                (Word, 12..13),
            ],
            "ap   inc    x0" => [(Ap, 0..2), (Word, 5..8), (Word, 12..14)],
            " 1" => [(Word, 0..0), (Word, 1..2)],
            "   1" => [(Word, 0..0), (Word, 3..4)],
            "1 " => [(Word, 0..1), (Word, 2..2)],
            "  ap  " => [(Word, 0..0), (Ap, 2..4), (Word, 6..6)],
            "" => [(Word, 0..0)],
            " " => [(Word, 0..0), (Word, 1..1)],
            "apap ap: :ap" => [(Word, 0..4), (Word, 5..8), (Word, 9..12)],
        });

        for (input, tokens) in cases {
            let lexed = lex_in_new(input);
            assert_eq!(lexed, tokens.as_slice(), "input: {input:?}");
        }
    }

    #[test]
    fn test_collapsed_line_is_fixed_point() {
        let line = "ap ap cons x0 ap ap :1029 nil 7";
        let words = |src: &str| -> Vec<String> {
            lex_in_new(src)
                .into_iter()
                .map(|t| extract::text(t, src).to_owned())
                .collect()
        };
        let once = words(line);
        let rejoined = once.join(" ");
        assert_eq!(rejoined, line);
        assert_eq!(words(&rejoined), once);
        assert_eq!(words("ap  ap cons   x0 ap ap :1029 nil     7"), once);
    }

    #[test]
    fn test_extract() {
        let src = "x12 -5 x -x1 x-1 xy 99999999999999999999";
        let t = lex_in_new(src);
        assert_eq!(extract::variable(t[0], src), Some(12));
        assert_eq!(extract::int(t[1], src), Ok(-5));
        assert_eq!(extract::variable(t[2], src), None);
        assert_eq!(extract::variable(t[3], src), None);
        assert_eq!(extract::variable(t[4], src), None);
        assert_eq!(extract::variable(t[5], src), None);
        assert!(extract::int(t[6], src).is_err());
    }

    macro_rules! cases {
        (match .. {
            $($str:expr => [$(($kind:expr, $range:expr)),* $(,)?]),* $(,)?
        }) => {{
            &[$((
                $str,
                vec![
                    $(Token::new($kind, Span::new_of_bounds($range.start..$range.end))),*
                ],
            )),*]
        }};
    }
    use cases;
}
