use crate::{builtins::Builtins, eval::Evaluator, parser, util::fmt::tree};

/// Each variant contains the input.
pub enum Test {
    Parser(&'static str),
    Evaluator(&'static str),
}

pub enum Assertion {
    TreeOk(&'static str),
    ExpectedErrors(&'static [&'static str]),
}

#[track_caller]
pub fn run_pipeline(test: Test) -> (String, Vec<String>) {
    match test {
        Test::Parser(input) => match parser::parse(input) {
            Ok(expr) => (tree::print_expr_string(&expr), vec![]),
            Err(error) => (String::new(), vec![format!("{error:#}")]),
        },
        Test::Evaluator(input) => {
            let expr = match parser::parse(input) {
                Ok(expr) => expr,
                Err(error) => return (String::new(), vec![format!("{error:#}")]),
            };
            let builtins = Builtins::standard();
            match Evaluator::new(&builtins).evaluate(&expr) {
                Ok(expr) => (tree::print_expr_string(&expr), vec![]),
                Err(error) => (String::new(), vec![format!("{error:#}")]),
            }
        }
    }
}

#[track_caller]
pub fn run_assertion(
    assertion: Assertion,
    formatted_actual_tree: &str,
    formatted_actual_errors: &[String],
) {
    match assertion {
        Assertion::TreeOk(expected_tree) => {
            let expected_errors: &[&str] = &[];
            ::pretty_assertions::assert_eq!(formatted_actual_errors, expected_errors);
            ::pretty_assertions::assert_eq!(formatted_actual_tree.trim(), expected_tree.trim());
        }
        Assertion::ExpectedErrors(expected_errors) => {
            ::pretty_assertions::assert_eq!(formatted_actual_errors, expected_errors)
        }
    }
}

macro_rules! tree_tests {
    (
        use $test_kind:ident;

        $(
            fn $test_name:ident() {
                let expr = $source:expr;
                $($assertions_tt:tt)*
            }
        )*
    ) => {
        $(
            #[test]
            fn $test_name() {
                let test: crate::util::test_utils::Test =
                    tree_tests!(@@get_test($test_kind), $source);
                let (formatted_actual_tree, formatted_actual_errors) =
                    crate::util::test_utils::run_pipeline(test);
                let ctx = (&formatted_actual_tree, &formatted_actual_errors);
                tree_tests!(@@expand_assertions, ctx, [$($assertions_tt)*]);
            }
        )*
    };

    (@@expand_assertions, $ctx:expr, []) => {};
    (@@expand_assertions, $ctx:expr, [
        let $assertion:ident = $assertion_expected:expr;
        $($rest_assertions_tt:tt)*
    ]) => {
        crate::util::test_utils::run_assertion(
            tree_tests!(@@assertion, $assertion, $assertion_expected),
            $ctx.0,
            $ctx.1,
        );
        tree_tests!(@@expand_assertions, $ctx, [$($rest_assertions_tt)*]);
    };

    (@@assertion, tree_ok, $expected:expr) => {
        crate::util::test_utils::Assertion::TreeOk(::indoc::indoc! { $expected })
    };
    (@@assertion, expected_errors, $expected:expr) => {
        crate::util::test_utils::Assertion::ExpectedErrors($expected)
    };

    (@@get_test(parser), $source:expr) => {
        crate::util::test_utils::Test::Parser($source)
    };
    (@@get_test(evaluator), $source:expr) => {
        crate::util::test_utils::Test::Evaluator($source)
    };
}
pub(crate) use tree_tests;
