// expr ::= ap^n expr expr{n}    (n >= 1)
//        | x<N>                 variable
//        | integer              number
//        | word                 function
//
// `ap ap f a b` reads as `(f a) b`: the number of leading `ap` markers is the
// number of arguments which follow the operator.

/// A node of the expression tree.
///
/// The two application shapes are never mixed by a single producer: the
/// parser only builds curried [`Expr::SingleApply`] chains, the evaluator only
/// builds uncurried [`Expr::Apply`] calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Number(i64),
    /// `x<N>`. Purely symbolic, never resolved.
    Variable(u64),
    /// Opaque name. Names starting with `:` refer to top-level definitions.
    Function(Box<str>),
    Apply {
        op: Box<Expr>,
        args: Vec<Expr>,
    },
    SingleApply {
        op: Box<Expr>,
        arg: Box<Expr>,
    },
}

impl Expr {
    pub fn function(name: impl Into<Box<str>>) -> Expr {
        Expr::Function(name.into())
    }

    pub fn apply(op: Expr, args: Vec<Expr>) -> Expr {
        Expr::Apply {
            op: Box::new(op),
            args,
        }
    }

    pub fn single_apply(op: Expr, arg: Expr) -> Expr {
        Expr::SingleApply {
            op: Box::new(op),
            arg: Box::new(arg),
        }
    }

    /// Folds `args` over `op` left-associatively, so that `f [a, b]` becomes
    /// `(f a) b`.
    pub fn curried(op: Expr, args: impl IntoIterator<Item = Expr>) -> Expr {
        args.into_iter().fold(op, Expr::single_apply)
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Expr::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&str> {
        match self {
            Expr::Function(name) => Some(name),
            _ => None,
        }
    }
}

/// Top-level definitions are referenced as `:<name>` and emitted as
/// `def<name>`.
pub const DEFINITION_PREFIX: char = ':';

/// Returns the emitted name of a top-level definition, or `None` if `name`
/// doesn't refer to one.
pub fn definition_name(name: &str) -> Option<String> {
    name.strip_prefix(DEFINITION_PREFIX)
        .map(|rest| format!("def{rest}"))
}
