use crate::{ast::Expr, eval::Error};

/// Reduces a call to a builtin. The arguments are already evaluated.
///
/// A builtin which can't reduce its arguments returns the call unreduced
/// (see [`partial`]) rather than failing.
pub type Reduce = fn(Vec<Expr>) -> Result<Expr, Error>;

pub struct Builtin {
    pub name: &'static str,
    /// Maximum number of arguments the builtin accepts.
    pub arity: usize,
    pub reduce: Reduce,
}

pub static STANDARD: phf::Map<&'static str, Builtin> = phf::phf_map! {
    "add" => Builtin { name: "add", arity: ADD_ARITY, reduce: add },
};

/// Read-only view over a table of builtins.
///
/// The table is fixed when the handle is created. Evaluators borrow a handle
/// instead of reaching for the static table directly.
#[derive(Copy, Clone)]
pub struct Builtins {
    table: &'static phf::Map<&'static str, Builtin>,
}

impl Builtins {
    pub fn standard() -> Builtins {
        Builtins { table: &STANDARD }
    }

    pub fn get(&self, name: &str) -> Option<&'static Builtin> {
        self.table.get(name)
    }
}

/// Rebuilds the (unreduced) call of the builtin `name`.
pub fn partial(name: &str, args: Vec<Expr>) -> Expr {
    Expr::apply(Expr::function(name), args)
}

fn check_arity(name: &'static str, max: usize, args: &[Expr]) -> Result<(), Error> {
    if args.len() > max {
        return Err(Error::Arity {
            name,
            max,
            actual: args.len(),
        });
    }
    Ok(())
}

const ADD_ARITY: usize = 2;

/// `add a b`. Numbers are added with overflow checking; any other pair of
/// arguments (or fewer than two) is left as a partial application.
fn add(args: Vec<Expr>) -> Result<Expr, Error> {
    check_arity("add", ADD_ARITY, &args)?;
    let (Some(lhs), Some(rhs)) = (
        args.first().and_then(Expr::as_number),
        args.get(1).and_then(Expr::as_number),
    ) else {
        return Ok(partial("add", args));
    };
    lhs.checked_add(rhs)
        .map(Expr::Number)
        .ok_or(Error::Overflow { lhs, rhs })
}
