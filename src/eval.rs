use crate::{ast::Expr, builtins::Builtins};

type Result<T, E = Error> = std::result::Result<T, E>;

/// Partial evaluator.
///
/// Only calls to builtins are reduced; everything else is rebuilt as is, with
/// its sub-expressions evaluated. Curried applications are first uncurried,
/// so the result never contains [`Expr::SingleApply`] nodes.
pub struct Evaluator<'b> {
    builtins: &'b Builtins,
}

impl Evaluator<'_> {
    pub fn new(builtins: &Builtins) -> Evaluator<'_> {
        Evaluator { builtins }
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<Expr> {
        match expr {
            Expr::Number(_) | Expr::Variable(_) | Expr::Function(_) => Ok(expr.clone()),
            Expr::Apply { op, args } => self.evaluate_call(op, args),
            Expr::SingleApply { .. } => {
                let (op, args) = uncurry(expr);
                self.evaluate_call(op, args)
            }
        }
    }

    fn evaluate_call<'e>(
        &self,
        op: &Expr,
        args: impl IntoIterator<Item = &'e Expr>,
    ) -> Result<Expr> {
        let op = self.evaluate(op)?;
        let args = args
            .into_iter()
            .map(|arg| self.evaluate(arg))
            .collect::<Result<Vec<_>>>()?;

        let builtin = op.as_function().and_then(|name| self.builtins.get(name));
        let Some(builtin) = builtin else {
            return Ok(Expr::apply(op, args));
        };
        log::trace!(
            target: "eval",
            "calling builtin {} with {} argument(s)",
            builtin.name,
            args.len()
        );
        (builtin.reduce)(args)
    }
}

/// Splits a chain of curried applications into its innermost operator and the
/// arguments, in application order: `(f a) b` becomes `f [a, b]`.
pub fn uncurry(expr: &Expr) -> (&Expr, Vec<&Expr>) {
    let mut args = Vec::new();
    let mut current = expr;
    while let Expr::SingleApply { op, arg } = current {
        args.push(&**arg);
        current = op;
    }
    args.reverse();
    (current, args)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A builtin was called with more arguments than it accepts.
    Arity {
        name: &'static str,
        max: usize,
        actual: usize,
    },
    /// Integer addition overflowed 64 bits.
    Overflow { lhs: i64, rhs: i64 },
}
