use std::io::Write;

use crate::ast::Expr;

const INDENT_WIDTH: usize = 2;

fn sp(w: &mut impl Write, i: usize) -> std::io::Result<()> {
    write!(w, "{:width$}", "", width = i * INDENT_WIDTH)
}

pub fn print_expr_string(expr: &Expr) -> String {
    let mut buf = Vec::with_capacity(1024);
    print_expr(&mut buf, 0, expr).unwrap();
    String::from_utf8(buf).unwrap()
}

pub fn print_expr(w: &mut impl Write, i: usize, expr: &Expr) -> std::io::Result<()> {
    sp(w, i)?;
    match expr {
        Expr::Number(n) => writeln!(w, "number {n}"),
        Expr::Variable(index) => writeln!(w, "variable x{index}"),
        Expr::Function(name) => writeln!(w, "function {name}"),
        Expr::Apply { op, args } => {
            writeln!(w, "apply")?;
            print_expr(w, i + 1, op)?;
            if !args.is_empty() {
                sp(w, i + 1)?;
                writeln!(w, "arguments")?;
                for arg in args {
                    print_expr(w, i + 2, arg)?;
                }
            }
            Ok(())
        }
        Expr::SingleApply { op, arg } => {
            writeln!(w, "ap")?;
            print_expr(w, i + 1, op)?;
            print_expr(w, i + 1, arg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_print_apply() {
        let expr = Expr::apply(
            Expr::function("add"),
            vec![Expr::Number(1), Expr::Variable(0)],
        );
        let expected = indoc! {"
            apply
              function add
              arguments
                number 1
                variable x0
        "};
        assert_eq!(print_expr_string(&expr), expected);
    }

    #[test]
    fn test_print_apply_without_args() {
        let expr = Expr::apply(Expr::function("nil"), vec![]);
        let expected = indoc! {"
            apply
              function nil
        "};
        assert_eq!(print_expr_string(&expr), expected);
    }
}
