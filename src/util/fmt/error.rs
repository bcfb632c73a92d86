use std::fmt;

use crate::{driver, eval, parser, token::Spanned};

impl<T: fmt::Display> fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Spanned { span, inner } = self;
        if f.alternate() {
            write!(f, "{span}: {inner:#}")
        } else {
            write!(f, "{inner}")
        }
    }
}

impl<T: std::error::Error> std::error::Error for Spanned<T> {}

impl fmt::Display for parser::Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use parser::Error::*;
        match self {
            IncompleteApplication => write!(f, "incomplete application"),
            UnexpectedEnd => write!(f, "unexpected end of input"),
            Nested { position, inner } => {
                if f.alternate() {
                    write!(f, "in {position}: {inner:#}")
                } else {
                    write!(f, "in {position}: {inner}")
                }
            }
            Trailing { count } => write!(f, "{count} trailing token(s)"),
            TooDeep { limit } => write!(f, "applications nest deeper than {limit} levels"),
        }
    }
}

impl std::error::Error for parser::Error {}

impl fmt::Display for parser::Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            parser::Position::Operator => write!(f, "operator"),
            parser::Position::Argument(index) => write!(f, "argument {}", index + 1),
        }
    }
}

impl fmt::Display for eval::Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use eval::Error::*;
        match self {
            Arity { name, max, actual } => write!(
                f,
                "builtin {name} takes at most {max} arguments, but got {actual}"
            ),
            Overflow { lhs, rhs } => write!(f, "integer overflow adding {lhs} and {rhs}"),
        }
    }
}

impl std::error::Error for eval::Error {}

impl fmt::Display for driver::Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use driver::Error::*;
        match self {
            MalformedAssignment { line, separators } => write!(
                f,
                "line {line}: expected exactly one `{}`, but found {separators}",
                driver::ASSIGNMENT_SEPARATOR
            ),
            Parse { location, error } => write!(f, "{location}: {error:#}"),
            Io(error) => write!(f, "io error: {error}"),
        }
    }
}

impl fmt::Display for driver::Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            driver::Location::Line(line) => write!(f, "line {line}"),
            driver::Location::Result => write!(f, "result expression"),
        }
    }
}

// Causes are already part of the message.
impl std::error::Error for driver::Error {}
