//! Renders expressions to Scheme, with explicit `delay`/`force` thunks.
//!
//! Curried applications (parser output) are fully call-by-need: the operator
//! is forced, applied to the (unforced) argument, and the result is forced
//! when the surrounding thunk is. Uncurried applications (evaluator output)
//! only force the operator.

use std::{
    borrow::Cow,
    fmt::{self, Write},
    format_args as f,
};

use crate::ast::{self, Expr};

const DEFAULT_CODE_CAPACITY: usize = 1024;

/// Prelude names of the list primitives.
const SPECIAL_FUNCTIONS: &[(&str, &str)] =
    &[("cons", "mycons"), ("car", "mycar"), ("cdr", "mycdr")];

pub fn render(expr: &Expr) -> String {
    let mut g = Generator::with_capacity(DEFAULT_CODE_CAPACITY);
    g.gen_expr(expr);
    g.finish()
}

/// `(define (<name>) <expr>)`.
pub fn render_definition(name: &str, expr: &Expr) -> String {
    let mut g = Generator::with_capacity(DEFAULT_CODE_CAPACITY);
    g.gen_definition(name, expr);
    g.finish()
}

/// Returns the emitted name of a binding: `:<name>` becomes `def<name>`, any
/// other name is kept.
pub fn binding_name(name: &str) -> Cow<'_, str> {
    match ast::definition_name(name) {
        Some(name) => Cow::Owned(name),
        None => Cow::Borrowed(name),
    }
}

pub struct Generator {
    code: String,
}

impl Generator {
    pub fn with_capacity(capacity: usize) -> Generator {
        Generator {
            code: String::with_capacity(capacity),
        }
    }

    pub fn finish(self) -> String {
        self.code
    }

    pub fn gen_definition(&mut self, name: &str, expr: &Expr) {
        self.emit(f!("(define ({}) ", binding_name(name)));
        self.gen_expr(expr);
        self.emit(f!(")"));
    }

    pub fn gen_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Number(n) => self.emit(f!("{n}")),
            Expr::Variable(index) => self.emit(f!("x{index}")),
            Expr::Function(name) => self.gen_function(name),
            Expr::Apply { op, args } => {
                self.emit(f!("(delay ((force "));
                self.gen_expr(op);
                self.emit(f!(") "));
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.emit(f!(" "));
                    }
                    self.gen_expr(arg);
                }
                self.emit(f!("))"));
            }
            Expr::SingleApply { op, arg } => {
                self.emit(f!("(delay (force ((force "));
                self.gen_expr(op);
                self.emit(f!(") "));
                self.gen_expr(arg);
                self.emit(f!(")))"));
            }
        }
    }

    fn gen_function(&mut self, name: &str) {
        if let Some((_, special)) = SPECIAL_FUNCTIONS.iter().find(|(n, _)| *n == name) {
            self.emit(f!("({special})"));
        } else if let Some(definition) = ast::definition_name(name) {
            self.emit(f!("({definition})"));
        } else {
            self.emit(f!("({name})"));
        }
    }
}

// Utility functions.
impl Generator {
    fn emit(&mut self, f: fmt::Arguments<'_>) {
        self.code
            .write_fmt(f)
            .expect("code emit should be infallible");
    }
}
