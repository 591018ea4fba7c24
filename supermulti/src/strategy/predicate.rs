//! Declarative signal predicates
//!
//! A predicate is a conjunction of comparisons between columns. A
//! [`PredicateSet`] is itself a conjunction of predicates: it is unset while
//! any referenced value is missing and otherwise true only if every member is.

use crate::data::Candle;
use crate::strategy::{Column, IndicatorFrame, SignalColumn};
use serde::Serialize;
use std::fmt;

/// Side of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    /// Column value on the evaluated candle
    Column(Column),
    /// Column value on the preceding candle
    Previous(Column),
    /// Column value multiplied by a constant
    Scaled(Column, f64),
    Const(f64),
}

impl Operand {
    pub fn resolve(&self, candles: &[Candle], frame: &IndicatorFrame, index: usize) -> Option<f64> {
        match *self {
            Operand::Column(column) => column.value_at(candles, frame, index),
            Operand::Previous(column) => column.value_at(candles, frame, index.checked_sub(1)?),
            Operand::Scaled(column, factor) => {
                column.value_at(candles, frame, index).map(|v| v * factor)
            }
            Operand::Const(value) => Some(value),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Column(column) => write!(f, "{}", column),
            Operand::Previous(column) => write!(f, "{}[-1]", column),
            Operand::Scaled(column, factor) => write!(f, "{} * {}", factor, column),
            Operand::Const(value) => write!(f, "{}", value),
        }
    }
}

/// Strict ordering between two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Above,
    Below,
}

/// `left <cmp> right`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Condition {
    pub left: Operand,
    pub cmp: Comparison,
    pub right: Operand,
}

impl Condition {
    pub fn above(left: Operand, right: Operand) -> Self {
        Self {
            left,
            cmp: Comparison::Above,
            right,
        }
    }

    pub fn below(left: Operand, right: Operand) -> Self {
        Self {
            left,
            cmp: Comparison::Below,
            right,
        }
    }

    pub fn evaluate(&self, candles: &[Candle], frame: &IndicatorFrame, index: usize) -> Option<bool> {
        let left = self.left.resolve(candles, frame, index)?;
        let right = self.right.resolve(candles, frame, index)?;
        Some(match self.cmp {
            Comparison::Above => left > right,
            Comparison::Below => left < right,
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.cmp {
            Comparison::Above => ">",
            Comparison::Below => "<",
        };
        write!(f, "{} {} {}", self.left, op, self.right)
    }
}

/// Named group of conditions that must all hold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Predicate {
    pub label: &'static str,
    pub conditions: Vec<Condition>,
}

impl Predicate {
    pub fn new(label: &'static str, conditions: Vec<Condition>) -> Self {
        Self { label, conditions }
    }

    pub fn single(label: &'static str, condition: Condition) -> Self {
        Self::new(label, vec![condition])
    }

    pub fn evaluate(&self, candles: &[Candle], frame: &IndicatorFrame, index: usize) -> Option<bool> {
        conjunction(self.conditions.iter().map(|c| c.evaluate(candles, frame, index)))
    }
}

/// Conjunction of predicates producing one signal column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredicateSet {
    pub name: &'static str,
    pub predicates: Vec<Predicate>,
}

impl PredicateSet {
    pub fn new(name: &'static str, predicates: Vec<Predicate>) -> Self {
        Self { name, predicates }
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn evaluate(&self, candles: &[Candle], frame: &IndicatorFrame, index: usize) -> Option<bool> {
        conjunction(self.predicates.iter().map(|p| p.evaluate(candles, frame, index)))
    }

    /// Outcome of each member predicate for one candle
    pub fn evaluate_each(
        &self,
        candles: &[Candle],
        frame: &IndicatorFrame,
        index: usize,
    ) -> Vec<(&'static str, Option<bool>)> {
        self.predicates
            .iter()
            .map(|p| (p.label, p.evaluate(candles, frame, index)))
            .collect()
    }

    pub fn evaluate_series(&self, candles: &[Candle], frame: &IndicatorFrame) -> SignalColumn {
        (0..candles.len())
            .map(|i| self.evaluate(candles, frame, i))
            .collect()
    }
}

/// `None` if any input is missing, otherwise the AND of all inputs
fn conjunction(values: impl Iterator<Item = Option<bool>>) -> Option<bool> {
    let mut all = true;
    for value in values {
        all &= value?;
    }
    Some(all)
}
