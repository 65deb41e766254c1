//! Expression parsing
//!
//! Raw input is validated first (emptiness, length cap, character set),
//! then handed to the pest grammar. Operator precedence and
//! associativity are resolved by a Pratt parser over the flat token
//! sequence the `expr` rule produces.

use crate::ast::{BinOp, Expr, UnaryOp};
use pest::error::{ErrorVariant, InputLocation};
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;
use pest_derive::Parser;
use reckon_core::CalcError;
use std::sync::LazyLock;

/// Hard cap on expression length, in characters
pub const MAX_EXPRESSION_LENGTH: usize = 1000;

#[derive(Parser)]
#[grammar = "grammar.pest"] // relative to project `src`
struct ExpressionParser;

static PRATT_PARSER: LazyLock<PrattParser<Rule>> = LazyLock::new(|| {
    use Assoc::*;
    use Rule::*;

    // Weakest binding first. Exponentiation binds tighter than unary
    // minus, so -2^2 is -(2^2).
    PrattParser::new()
        .op(Op::infix(add, Left) | Op::infix(subtract, Left))
        .op(Op::infix(multiply, Left) | Op::infix(divide, Left) | Op::infix(remainder, Left))
        .op(Op::prefix(neg) | Op::prefix(pos))
        .op(Op::infix(pow, Right))
});

/// Validate raw input and parse it into an expression tree
pub fn parse_expression(input: &str) -> Result<Expr, CalcError> {
    check_input(input)?;
    parse_checked(input)
}

/// Reject input before parsing: empty, over-long, or outside the
/// accepted character set
pub(crate) fn check_input(input: &str) -> Result<(), CalcError> {
    if input.trim().is_empty() {
        return Err(CalcError::empty_expression());
    }

    let length = input.chars().count();
    if length > MAX_EXPRESSION_LENGTH {
        return Err(CalcError::too_long(length, MAX_EXPRESSION_LENGTH));
    }

    for (position, ch) in input.chars().enumerate() {
        if !is_allowed_char(ch) {
            return Err(CalcError::invalid_char(ch, position));
        }
    }

    Ok(())
}

fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(ch, '+' | '-' | '*' | '/' | '^' | '%' | '(' | ')' | '.' | ',' | ' ')
}

/// Parse input that already passed `check_input`
pub(crate) fn parse_checked(input: &str) -> Result<Expr, CalcError> {
    let mut pairs = ExpressionParser::parse(Rule::calculation, input).map_err(syntax_error)?;
    match pairs.next() {
        Some(expr) if expr.as_rule() == Rule::expr => build_expr(expr.into_inner()),
        _ => Err(CalcError::syntax("expected an expression")),
    }
}

fn build_expr(pairs: Pairs<Rule>) -> Result<Expr, CalcError> {
    PRATT_PARSER
        .map_primary(|primary| match primary.as_rule() {
            Rule::quantity => build_quantity(primary),
            Rule::ident => Ok(Expr::Identifier(primary.as_str().to_string())),
            Rule::call => build_call(primary),
            Rule::expr => build_expr(primary.into_inner()),
            rule => Err(CalcError::syntax(format!("unexpected token: {:?}", rule))),
        })
        .map_prefix(|op, operand| {
            let operand = Box::new(operand?);
            match op.as_rule() {
                Rule::neg => Ok(Expr::UnaryOp(UnaryOp::Neg, operand)),
                Rule::pos => Ok(Expr::UnaryOp(UnaryOp::Pos, operand)),
                rule => Err(CalcError::syntax(format!("unexpected prefix: {:?}", rule))),
            }
        })
        .map_infix(|lhs, op, rhs| {
            let op = match op.as_rule() {
                Rule::add => BinOp::Add,
                Rule::subtract => BinOp::Sub,
                Rule::multiply => BinOp::Mul,
                Rule::divide => BinOp::Div,
                Rule::remainder => BinOp::Rem,
                Rule::pow => BinOp::Pow,
                rule => return Err(CalcError::syntax(format!("unexpected operator: {:?}", rule))),
            };
            Ok(Expr::BinaryOp(Box::new(lhs?), op, Box::new(rhs?)))
        })
        .parse(pairs)
}

fn build_quantity(pair: Pair<Rule>) -> Result<Expr, CalcError> {
    let mut inner = pair.into_inner();
    let number = match inner.next() {
        Some(number) => build_number(&number)?,
        None => return Err(CalcError::syntax("malformed numeric literal")),
    };

    // "5 km" is implicit multiplication, bound as a single operand so
    // that 5 km ^ 2 squares the whole quantity
    match inner.next() {
        Some(unit) => Ok(Expr::BinaryOp(
            Box::new(number),
            BinOp::Mul,
            Box::new(Expr::Identifier(unit.as_str().to_string())),
        )),
        None => Ok(number),
    }
}

fn build_number(pair: &Pair<Rule>) -> Result<Expr, CalcError> {
    let literal = pair.as_str();
    literal
        .parse::<f64>()
        .map(Expr::Number)
        .map_err(|_| CalcError::syntax(format!("invalid number: {}", literal)))
}

fn build_call(pair: Pair<Rule>) -> Result<Expr, CalcError> {
    let mut inner = pair.into_inner();
    let name = match inner.next() {
        Some(ident) => ident.as_str().to_string(),
        None => return Err(CalcError::syntax("malformed function call")),
    };
    let args = inner
        .map(|arg| build_expr(arg.into_inner()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Expr::FunctionCall(name, args))
}

/// Convert a pest error into a positioned syntax error
fn syntax_error(err: pest::error::Error<Rule>) -> CalcError {
    // Input is ASCII by the time pest sees it, so byte offsets are
    // character positions
    let position = match err.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };

    let mut calc_err =
        CalcError::syntax(format!("unexpected input at position {}", position)).at_position(position);

    if let ErrorVariant::ParsingError { positives, .. } = &err.variant {
        if let Some(expected) = describe_expected(positives) {
            calc_err = calc_err.expecting(expected);
        }
    }

    calc_err
}

fn describe_expected(positives: &[Rule]) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for rule in positives {
        let name = match rule {
            Rule::number | Rule::quantity => "a number",
            Rule::ident | Rule::call => "an identifier",
            Rule::expr => "an expression",
            Rule::add
            | Rule::subtract
            | Rule::multiply
            | Rule::divide
            | Rule::remainder
            | Rule::pow => "an operator",
            Rule::EOI => "end of expression",
            _ => continue,
        };
        if !parts.contains(&name) {
            parts.push(name);
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" or "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_core::ErrorKind;

    fn num(value: f64) -> Expr {
        Expr::Number(value)
    }

    fn ident(name: &str) -> Expr {
        Expr::Identifier(name.to_string())
    }

    fn bin(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        Expr::BinaryOp(Box::new(lhs), op, Box::new(rhs))
    }

    fn neg(expr: Expr) -> Expr {
        Expr::UnaryOp(UnaryOp::Neg, Box::new(expr))
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(parse_expression("5").unwrap(), num(5.0));
        assert_eq!(parse_expression("0.5").unwrap(), num(0.5));
        assert_eq!(parse_expression(".5").unwrap(), num(0.5));
        assert_eq!(parse_expression("5.").unwrap(), num(5.0));
        assert_eq!(parse_expression("1.5e3").unwrap(), num(1500.0));
        assert_eq!(parse_expression("2E-4").unwrap(), num(0.0002));
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse_expression("2+3*4").unwrap(),
            bin(num(2.0), BinOp::Add, bin(num(3.0), BinOp::Mul, num(4.0)))
        );
    }

    #[test]
    fn test_additive_is_left_associative() {
        assert_eq!(
            parse_expression("10-3-2").unwrap(),
            bin(bin(num(10.0), BinOp::Sub, num(3.0)), BinOp::Sub, num(2.0))
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        let expected = bin(num(2.0), BinOp::Pow, bin(num(3.0), BinOp::Pow, num(2.0)));
        assert_eq!(parse_expression("2^3^2").unwrap(), expected);
        assert_eq!(parse_expression("2**3**2").unwrap(), expected);
    }

    #[test]
    fn test_double_star_is_single_operator() {
        // must not lex as 2 * (*3)
        assert_eq!(
            parse_expression("2**3").unwrap(),
            bin(num(2.0), BinOp::Pow, num(3.0))
        );
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        assert_eq!(
            parse_expression("-2^2").unwrap(),
            neg(bin(num(2.0), BinOp::Pow, num(2.0)))
        );
    }

    #[test]
    fn test_unary_minus_in_exponent() {
        assert_eq!(
            parse_expression("2^-1").unwrap(),
            bin(num(2.0), BinOp::Pow, neg(num(1.0)))
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(
            parse_expression("(2+3)*4").unwrap(),
            bin(bin(num(2.0), BinOp::Add, num(3.0)), BinOp::Mul, num(4.0))
        );
    }

    #[test]
    fn test_remainder_operator() {
        assert_eq!(
            parse_expression("7%3").unwrap(),
            bin(num(7.0), BinOp::Rem, num(3.0))
        );
    }

    #[test]
    fn test_function_call() {
        assert_eq!(
            parse_expression("sin(30)").unwrap(),
            Expr::FunctionCall("sin".to_string(), vec![num(30.0)])
        );
        assert_eq!(
            parse_expression("pow(2, 10)").unwrap(),
            Expr::FunctionCall("pow".to_string(), vec![num(2.0), num(10.0)])
        );
        assert_eq!(
            parse_expression("mean(1, 2, 3, 4)").unwrap(),
            Expr::FunctionCall(
                "mean".to_string(),
                vec![num(1.0), num(2.0), num(3.0), num(4.0)]
            )
        );
    }

    #[test]
    fn test_nested_function_call() {
        assert_eq!(
            parse_expression("sqrt(pow(3, 2))").unwrap(),
            Expr::FunctionCall(
                "sqrt".to_string(),
                vec![Expr::FunctionCall("pow".to_string(), vec![num(3.0), num(2.0)])]
            )
        );
    }

    #[test]
    fn test_identifier() {
        assert_eq!(parse_expression("pi").unwrap(), ident("pi"));
        assert_eq!(parse_expression("km").unwrap(), ident("km"));
    }

    #[test]
    fn test_quantity_juxtaposition() {
        let expected = bin(num(5.0), BinOp::Mul, ident("km"));
        assert_eq!(parse_expression("5 km").unwrap(), expected);
        assert_eq!(parse_expression("5km").unwrap(), expected);
    }

    #[test]
    fn test_quantity_binds_as_one_operand() {
        // the quantity literal is squared, not just the unit
        assert_eq!(
            parse_expression("5 km ^ 2").unwrap(),
            bin(bin(num(5.0), BinOp::Mul, ident("km")), BinOp::Pow, num(2.0))
        );
    }

    #[test]
    fn test_empty_expression() {
        for input in ["", "   "] {
            let err = parse_expression(input).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Syntax);
            assert!(err.message.contains("empty"));
        }
    }

    #[test]
    fn test_length_cap() {
        let ok = format!("11{}", "+1".repeat(499));
        assert_eq!(ok.len(), 1000);
        assert!(parse_expression(&ok).is_ok());

        let over = format!("111{}", "+1".repeat(499));
        assert_eq!(over.len(), 1001);
        let err = parse_expression(&over).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert!(err.message.contains("1001 > 1000"));
    }

    #[test]
    fn test_invalid_character_reports_position() {
        let err = parse_expression("2 # 3").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        let ctx = err.context.unwrap();
        assert_eq!(ctx.position, Some(2));
        assert_eq!(ctx.found, Some("#".to_string()));
    }

    #[test]
    fn test_invalid_character_position_counts_chars() {
        let err = parse_expression("2é").unwrap_err();
        assert_eq!(err.context.unwrap().position, Some(1));
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let err = parse_expression("2 + * 3").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.context.unwrap().position, Some(4));

        let err = parse_expression("2+").unwrap_err();
        assert_eq!(err.context.unwrap().position, Some(2));

        let err = parse_expression(")").unwrap_err();
        assert_eq!(err.context.unwrap().position, Some(0));
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        assert!(parse_expression("(2+3").is_err());
        assert!(parse_expression("2+3)").is_err());
    }

    #[test]
    fn test_adjacent_numbers_rejected() {
        assert!(parse_expression("2 3").is_err());
    }

    #[test]
    fn test_stacked_unary_signs() {
        assert_eq!(parse_expression("--2").unwrap(), neg(neg(num(2.0))));
        assert_eq!(
            parse_expression("2--3").unwrap(),
            bin(num(2.0), BinOp::Sub, neg(num(3.0)))
        );
    }
}
