//! FILENAME: core/formula/src/validator.rs
//! PURPOSE: Authoring-time checks for personalized formulas.
//! CONTEXT: A formula is only meaningful relative to a child count `k`
//! (items in a unit, units in a class). Checks run in a fixed order so the
//! reported error is deterministic; the first failure wins.
//!
//! CHECK ORDER:
//! 1. Character set: digits . + - * / ( ) whitespace and N<digits>
//! 2. Operator adjacency: consecutive, trailing, leading (+ * /)
//! 3. Parenthesis balance
//! 4. Reference completeness: every N<i> in 1..=k, every 1..=k used
//! 5. Literal division by zero
//! 6. Grammar (the evaluator's own parser)

use std::collections::BTreeSet;

use crate::ast::Expression;
use crate::error::FormulaError;
use crate::lexer::Lexer;
use crate::parser::parse;
use crate::token::Token;

/// Validates `expression` against a child count `k`.
pub fn validate(expression: &str, child_count: usize) -> Result<(), FormulaError> {
    validate_and_parse(expression, child_count).map(|_| ())
}

/// Runs every check and hands back the parsed tree on success.
pub(crate) fn validate_and_parse(
    expression: &str,
    child_count: usize,
) -> Result<Expression, FormulaError> {
    if expression.trim().is_empty() {
        return Err(FormulaError::EmptyExpression);
    }

    check_characters(expression)?;

    let tokens = Lexer::new(expression).tokenize();
    check_operators(&tokens)?;
    check_parentheses(expression)?;
    check_references(expression, child_count)?;
    check_literal_division(&tokens)?;

    parse(expression).map_err(|e| FormulaError::Syntax(e.message))
}

/// Distinct reference indices used by `expression`, ascending.
/// Scans the raw text, so it also works on formulas that fail other checks.
pub fn references(expression: &str) -> BTreeSet<usize> {
    let mut found = BTreeSet::new();
    let mut chars = expression.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != 'N' {
            continue;
        }
        let mut digits = String::new();
        while let Some(&d) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            digits.push(d);
            chars.next();
        }
        if !digits.is_empty() {
            found.insert(digits.parse::<usize>().unwrap_or(usize::MAX));
        }
    }

    found
}

fn check_characters(expression: &str) -> Result<(), FormulaError> {
    let mut chars = expression.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            'N' => {
                if !chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                    return Err(FormulaError::InvalidCharacters('N'));
                }
                while chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                    chars.next();
                }
            }
            '.' | '+' | '-' | '*' | '/' | '(' | ')' => {}
            c if c.is_ascii_digit() || c.is_whitespace() => {}
            other => return Err(FormulaError::InvalidCharacters(other)),
        }
    }

    Ok(())
}

/// Operator adjacency, with whitespace already gone (the lexer drops it).
fn check_operators(tokens: &[Token]) -> Result<(), FormulaError> {
    let significant: Vec<&Token> = tokens.iter().filter(|t| **t != Token::EOF).collect();

    if significant
        .windows(2)
        .any(|pair| pair[0].is_operator() && pair[1].is_operator())
    {
        return Err(FormulaError::ConsecutiveOperators);
    }

    if significant.last().is_some_and(|t| t.is_operator()) {
        return Err(FormulaError::TrailingOperator);
    }

    // A leading '-' is a negative literal.
    if matches!(
        significant.first(),
        Some(Token::Plus | Token::Asterisk | Token::Slash)
    ) {
        return Err(FormulaError::LeadingOperator);
    }

    Ok(())
}

fn check_parentheses(expression: &str) -> Result<(), FormulaError> {
    let mut depth: i64 = 0;

    for ch in expression.chars() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(FormulaError::UnbalancedParentheses);
                }
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(FormulaError::UnbalancedParentheses);
    }

    Ok(())
}

fn check_references(expression: &str, child_count: usize) -> Result<(), FormulaError> {
    let used = references(expression);

    if let Some(&index) = used.iter().find(|&&i| i < 1 || i > child_count) {
        return Err(FormulaError::ReferenceOutOfRange(index));
    }

    let missing: Vec<usize> = (1..=child_count).filter(|i| !used.contains(i)).collect();
    if !missing.is_empty() {
        return Err(FormulaError::MissingReference(missing));
    }

    Ok(())
}

/// Rejects `/` directly followed by a literal whose value is zero (`/0`, `/ 0.0`).
/// `/0.5` is fine; a reference that evaluates to zero is caught at run time.
fn check_literal_division(tokens: &[Token]) -> Result<(), FormulaError> {
    let divides_by_zero = tokens
        .windows(2)
        .any(|pair| matches!(pair, [Token::Slash, Token::Number(n)] if *n == 0.0));

    if divides_by_zero {
        return Err(FormulaError::ExplicitDivisionByZero);
    }

    Ok(())
}
