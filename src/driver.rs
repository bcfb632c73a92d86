//! Translates whole programs, one `name = expression` binding per line.
//!
//! The first error aborts the translation: nothing is written for the line
//! which failed, and no later line is read.

use std::io::{self, BufRead, Write};

use crate::{
    ast::Expr,
    codegen, lexer, parser,
    token::{Spanned, Token},
    util::fmt::tree,
};

type Result<T, E = Error> = std::result::Result<T, E>;

pub const ASSIGNMENT_SEPARATOR: &str = " = ";
pub const DEFAULT_PRELUDE: &str = "./prelude.scm";
pub const RESULT_NAME: &str = "result";
/// Printed after the result definition.
pub const TRAILER: &str = "(printout (result))";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Emit {
    /// Scheme source for the lazy runtime.
    #[default]
    Scheme,
    /// Parsed expression tree of every binding.
    Tree,
    /// Token stream of every binding.
    Tokens,
}

#[derive(Clone, Debug)]
pub struct Options {
    /// File loaded by the emitted program, if any.
    pub prelude: Option<String>,
    /// Expression bound to `result`. When absent, a final input line without
    /// a separator is used instead.
    pub result: Option<String>,
    pub emit: Emit,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            prelude: Some(DEFAULT_PRELUDE.to_owned()),
            result: None,
            emit: Emit::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Binding<'src> {
    pub name: &'src str,
    pub expr: &'src str,
}

/// Splits `<name> = <expression>`.
pub fn parse_binding(line: &str, line_no: usize) -> Result<Binding<'_>> {
    let separators = line.matches(ASSIGNMENT_SEPARATOR).count();
    match line.split_once(ASSIGNMENT_SEPARATOR) {
        Some((name, expr)) if separators == 1 => Ok(Binding { name, expr }),
        _ => Err(Error::MalformedAssignment {
            line: line_no,
            separators,
        }),
    }
}

/// Where a translated expression comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// One-based input line.
    Line(usize),
    /// The result expression given in [`Options::result`].
    Result,
}

/// Translates every line of `input` into `out`.
pub fn translate<R, W>(input: R, out: W, options: &Options) -> Result<W>
where
    R: BufRead,
    W: Write,
{
    let mut t = Translator::new(out, options);
    t.begin()?;

    let mut bare_result = None;
    let mut lines = input.lines().enumerate().peekable();
    while let Some((index, line)) = lines.next() {
        let line = line?;
        let line_no = index + 1;
        let is_last = lines.peek().is_none();
        match parse_binding(&line, line_no) {
            Ok(Binding { name, expr }) => t.define(Location::Line(line_no), name, expr)?,
            Err(Error::MalformedAssignment { separators: 0, .. })
                if is_last && options.result.is_none() && !line.is_empty() =>
            {
                bare_result = Some((Location::Line(line_no), line.clone()));
            }
            Err(error) => return Err(error),
        }
    }

    let result = match (&options.result, &bare_result) {
        (Some(expr), _) => Some((Location::Result, expr.as_str())),
        (None, Some((location, expr))) => Some((*location, expr.as_str())),
        (None, None) => None,
    };
    t.finish(result)
}

/// Convenience wrapper over [`translate`] for in-memory programs.
pub fn translate_str(input: &str, options: &Options) -> Result<String> {
    let out = translate(input.as_bytes(), Vec::with_capacity(input.len() * 4), options)?;
    Ok(String::from_utf8(out).expect("output is built from UTF-8 text"))
}

pub struct Translator<'o, W> {
    out: W,
    options: &'o Options,
    tokens: Vec<Token>,
    definitions: usize,
}

impl<W: Write> Translator<'_, W> {
    pub fn new(out: W, options: &Options) -> Translator<'_, W> {
        Translator {
            out,
            options,
            tokens: Vec::with_capacity(lexer::SUGGESTED_TOKENS_CAPACITY),
            definitions: 0,
        }
    }

    /// Writes the program header.
    pub fn begin(&mut self) -> Result<()> {
        if let (Emit::Scheme, Some(prelude)) = (self.options.emit, &self.options.prelude) {
            writeln!(self.out, "(load \"{prelude}\")")?;
        }
        Ok(())
    }

    /// Translates the binding `name = src`.
    pub fn define(&mut self, location: Location, name: &str, src: &str) -> Result<()> {
        match self.options.emit {
            Emit::Scheme => {
                let expr = self.parse(location, src)?;
                writeln!(self.out, "{}", codegen::render_definition(name, &expr))?;
            }
            Emit::Tree => {
                let expr = self.parse(location, src)?;
                writeln!(self.out, "{}", codegen::binding_name(name))?;
                tree::print_expr(&mut self.out, 1, &expr)?;
            }
            Emit::Tokens => {
                let tokens = lexer::lex_in_new(src);
                writeln!(self.out, "{}: {tokens:?}", codegen::binding_name(name))?;
            }
        }
        self.definitions += 1;
        log::debug!(target: "translate", "{location}: defined {name}");
        Ok(())
    }

    /// Writes the result definition, if any, and returns the output.
    pub fn finish(mut self, result: Option<(Location, &str)>) -> Result<W> {
        if let Some((location, src)) = result {
            self.define(location, RESULT_NAME, src)?;
            if self.options.emit == Emit::Scheme {
                writeln!(self.out, "{TRAILER}")?;
            }
        }
        self.out.flush()?;
        log::info!(target: "translate", "translated {} definition(s)", self.definitions);
        Ok(self.out)
    }

    fn parse(&mut self, location: Location, src: &str) -> Result<Expr> {
        self.tokens.clear();
        parser::parse_with(src, &mut self.tokens).map_err(|error| Error::Parse { location, error })
    }
}

#[derive(Debug)]
pub enum Error {
    /// The line doesn't contain exactly one [`ASSIGNMENT_SEPARATOR`].
    MalformedAssignment { line: usize, separators: usize },
    Parse {
        location: Location,
        error: Spanned<parser::Error>,
    },
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn scheme(result: Option<&str>) -> Options {
        Options {
            result: result.map(str::to_owned),
            ..Options::default()
        }
    }

    #[test]
    fn test_parse_binding() {
        assert_eq!(
            parse_binding(":1029 = ap ap cons 7 nil", 1).unwrap(),
            Binding {
                name: ":1029",
                expr: "ap ap cons 7 nil"
            }
        );
        assert!(matches!(
            parse_binding("ap inc 1", 2),
            Err(Error::MalformedAssignment {
                line: 2,
                separators: 0
            })
        ));
        assert!(matches!(
            parse_binding("a = b = c", 3),
            Err(Error::MalformedAssignment {
                line: 3,
                separators: 2
            })
        ));
        assert!(matches!(
            parse_binding("a=b", 4),
            Err(Error::MalformedAssignment { separators: 0, .. })
        ));
    }

    #[test]
    fn test_translate_program() {
        let input = indoc! {"
            :1 = ap ap cons 7 nil
            galaxy = :1
        "};
        let expected = indoc! {r#"
            (load "./prelude.scm")
            (define (def1) (delay (force ((force (delay (force ((force (mycons)) 7)))) (nil)))))
            (define (galaxy) (def1))
            (define (result) (delay (force ((force (mycar)) (galaxy)))))
            (printout (result))
        "#};
        let actual = translate_str(input, &scheme(Some("ap car galaxy"))).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_bare_final_line_is_result() {
        let input = "inc1 = ap inc 1\nap neg inc1";
        let expected = indoc! {r#"
            (load "./prelude.scm")
            (define (inc1) (delay (force ((force (inc)) 1))))
            (define (result) (delay (force ((force (neg)) (inc1)))))
            (printout (result))
        "#};
        assert_eq!(translate_str(input, &scheme(None)).unwrap(), expected);
    }

    #[test]
    fn test_without_result() {
        let options = Options {
            prelude: None,
            ..Options::default()
        };
        let actual = translate_str("one = 1\n", &options).unwrap();
        assert_eq!(actual, "(define (one) 1)\n");
    }

    #[test]
    fn test_custom_prelude() {
        let options = Options {
            prelude: Some("lib/lazy.scm".to_owned()),
            ..Options::default()
        };
        let actual = translate_str("", &options).unwrap();
        assert_eq!(actual, "(load \"lib/lazy.scm\")\n");
    }

    #[test]
    fn test_bare_line_with_result_argument_is_malformed() {
        let error = translate_str("a = 1\nap inc a", &scheme(Some("a"))).unwrap_err();
        assert!(matches!(
            error,
            Error::MalformedAssignment {
                line: 2,
                separators: 0
            }
        ));
    }

    #[test]
    fn test_bare_line_in_the_middle_is_malformed() {
        let error = translate_str("ap inc 1\na = 1", &scheme(None)).unwrap_err();
        assert!(matches!(error, Error::MalformedAssignment { line: 1, .. }));
    }

    #[test]
    fn test_empty_final_line_is_malformed() {
        let options = Options {
            prelude: None,
            ..Options::default()
        };
        let error = translate_str("a = 1\n\n", &options).unwrap_err();
        assert!(matches!(
            error,
            Error::MalformedAssignment {
                line: 2,
                separators: 0
            }
        ));
    }

    #[test]
    fn test_too_deep_line_is_an_error() {
        let src = format!("deep = {}0", "ap neg ".repeat(parser::MAX_DEPTH + 1));
        let error = translate_str(&src, &scheme(None)).unwrap_err();
        assert!(matches!(
            error,
            Error::Parse {
                location: Location::Line(1),
                error: Spanned {
                    inner: parser::Error::TooDeep { .. },
                    ..
                },
            }
        ));
    }

    #[test]
    fn test_parse_error_aborts() {
        let input = "a = 1\nb = ap inc\nc = 3";
        let error = translate_str(input, &scheme(None)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "line 2: 0..6: in argument 1: 6..6: unexpected end of input"
        );
    }

    #[test]
    fn test_result_parse_error() {
        let error = translate_str("a = 1", &scheme(Some("1 2"))).unwrap_err();
        assert_eq!(
            error.to_string(),
            "result expression: 2..3: 1 trailing token(s)"
        );
    }

    #[test]
    fn test_nothing_written_after_error() {
        let mut out = Vec::new();
        let options = scheme(None);
        let failed = translate("a = 1\nb = ap\nc = 2\n".as_bytes(), &mut out, &options).is_err();
        assert!(failed);
        let written = String::from_utf8(out).unwrap();
        assert_eq!(written, "(load \"./prelude.scm\")\n(define (a) 1)\n");
    }

    #[test]
    fn test_emit_tree() {
        let options = Options {
            emit: Emit::Tree,
            ..scheme(Some("x0"))
        };
        let expected = indoc! {"
            def7
              ap
                function inc
                number 1
            result
              variable x0
        "};
        assert_eq!(translate_str(":7 = ap inc 1", &options).unwrap(), expected);
    }

    #[test]
    fn test_emit_tokens() {
        let options = Options {
            emit: Emit::Tokens,
            ..scheme(None)
        };
        let actual = translate_str("f = ap inc  1", &options).unwrap();
        assert_eq!(
            actual,
            "f: [Token(Ap, 0..2), Token(Word, 3..6), Token(Word, 8..9)]\n"
        );
    }

    #[test]
    fn test_sample_program() {
        let input = include_str!("../programs/pwr2.txt");
        let expected = include_str!("../programs/pwr2.scm");
        let actual = translate_str(input, &scheme(Some("ap pwr2 x0"))).unwrap();
        assert_eq!(actual, expected);
    }
}
