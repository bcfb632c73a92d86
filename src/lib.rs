/// The lexer splits a source line into a sequence of tokens.
pub mod lexer;

/// The parser takes a sequence of tokens, mapping it into a curried
/// expression tree.
pub mod parser;

/// The evaluator pre-reduces calls to builtins.
pub mod eval;

/// The code generator renders expressions as lazily evaluated Scheme.
pub mod codegen;

/// The driver translates whole programs, line by line.
pub mod driver;

pub mod ast;
pub mod builtins;
pub mod token;

pub mod util {
    pub mod fmt;
    #[cfg(test)]
    pub(crate) mod test_utils;
}
