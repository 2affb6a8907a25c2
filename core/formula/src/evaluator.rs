//! FILENAME: core/formula/src/evaluator.rs
//! PURPOSE: Evaluates AST expressions against positional bindings.
//! CONTEXT: After a formula is parsed into an AST, this module traverses
//! the tree and computes the final result. Each `N<i>` reference reads
//! `bindings[i - 1]` as if the value had been written in place as a literal.
//!
//! All arithmetic is plain f64. Nothing is rounded here; rounding happens
//! only when statistics are reported. Every intermediate value must be
//! finite: an overflowing literal or product is an error, not inf or NaN.

use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::error::FormulaError;

/// Walks an expression tree with a fixed set of bindings.
pub struct Evaluator<'a> {
    bindings: &'a [f64],
}

impl<'a> Evaluator<'a> {
    pub fn new(bindings: &'a [f64]) -> Self {
        Evaluator { bindings }
    }

    /// Evaluates an AST expression and returns the result.
    pub fn evaluate(&self, expr: &Expression) -> Result<f64, FormulaError> {
        let value = match expr {
            Expression::Literal(n) => *n,
            Expression::Reference(index) => self.eval_reference(*index)?,
            Expression::BinaryOp { left, op, right } => self.eval_binary_op(left, op, right)?,
            Expression::UnaryOp { op, operand } => self.eval_unary_op(op, operand)?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(FormulaError::NonFiniteResult)
        }
    }

    fn eval_reference(&self, index: usize) -> Result<f64, FormulaError> {
        index
            .checked_sub(1)
            .and_then(|i| self.bindings.get(i))
            .copied()
            .ok_or(FormulaError::ReferenceOutOfRange(index))
    }

    fn eval_binary_op(
        &self,
        left: &Expression,
        op: &BinaryOperator,
        right: &Expression,
    ) -> Result<f64, FormulaError> {
        let l = self.evaluate(left)?;
        let r = self.evaluate(right)?;

        match op {
            BinaryOperator::Add => Ok(l + r),
            BinaryOperator::Subtract => Ok(l - r),
            BinaryOperator::Multiply => Ok(l * r),
            BinaryOperator::Divide => {
                if r == 0.0 {
                    Err(FormulaError::RuntimeDivisionByZero)
                } else {
                    Ok(l / r)
                }
            }
        }
    }

    fn eval_unary_op(
        &self,
        op: &UnaryOperator,
        operand: &Expression,
    ) -> Result<f64, FormulaError> {
        let value = self.evaluate(operand)?;
        match op {
            UnaryOperator::Negate => Ok(-value),
        }
    }
}
