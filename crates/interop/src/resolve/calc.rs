//! `calc()`, `min()`, `max()` and `clamp()`.
//!
//! Expressions arrive as flat token lists (`[10, "+", "50%"]`) and are
//! evaluated with a shunting-yard pass. Every operand in one expression must
//! share a mode: plain numbers (px or unitless) or percentages.

use ncss::{Descriptor, LengthUnit, Value, format_number, units};
use smallvec::SmallVec;

use super::{Resolver, round};
use crate::error::ResolveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcMode {
    Number,
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalcResult {
    pub mode: CalcMode,
    pub raw: f64,
}

impl CalcResult {
    /// A number, or a `"<n>%"` string in percentage mode.
    pub fn value(&self) -> Value {
        match self.mode {
            CalcMode::Number => Value::Number(self.raw),
            CalcMode::Percentage => Value::String(format!("{}%", format_number(self.raw))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Open,
}

impl Op {
    fn parse(token: &str) -> Option<Op> {
        match token {
            "+" => Some(Op::Add),
            "-" => Some(Op::Sub),
            "*" => Some(Op::Mul),
            "/" => Some(Op::Div),
            _ => None,
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
            Op::Open => 0,
        }
    }
}

/// Operand and operator stacks of one expression.
#[derive(Default)]
struct Machine {
    mode: Option<CalcMode>,
    values: SmallVec<[f64; 8]>,
    ops: SmallVec<[Op; 8]>,
}

impl Machine {
    /// Pushes an operand; `false` on a mode mismatch.
    fn operand(&mut self, mode: CalcMode, value: f64) -> bool {
        if *self.mode.get_or_insert(mode) != mode {
            return false;
        }
        self.values.push(value);
        true
    }

    /// Pops one operator and applies it; `false` on stack underflow.
    fn apply(&mut self) -> bool {
        let (Some(op), Some(b), Some(a)) = (self.ops.pop(), self.values.pop(), self.values.pop())
        else {
            return false;
        };
        self.values.push(match op {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div => a / b,
            Op::Open => return false,
        });
        true
    }

    fn operator(&mut self, op: Op) -> bool {
        while self
            .ops
            .last()
            .is_some_and(|top| *top != Op::Open && top.precedence() >= op.precedence())
        {
            if !self.apply() {
                return false;
            }
        }
        self.ops.push(op);
        true
    }

    fn close(&mut self) -> bool {
        while self.ops.last().is_some_and(|top| *top != Op::Open) {
            if !self.apply() {
                return false;
            }
        }
        self.ops.pop() == Some(Op::Open)
    }

    fn finish(mut self) -> Option<CalcResult> {
        while !self.ops.is_empty() {
            if !self.apply() {
                return None;
            }
        }
        let mode = self.mode?;
        if self.values.len() != 1 {
            return None;
        }
        let raw = round(self.values[0]);
        raw.is_finite().then_some(CalcResult { mode, raw })
    }
}

/// Reads a literal operand: `"50%"`, `"10px"` or `"10"`.
fn literal(token: &str) -> Option<(CalcMode, f64)> {
    match ncss::Length::parse(token).ok()? {
        length if length.unit == LengthUnit::Percent => Some((CalcMode::Percentage, length.value)),
        length if matches!(length.unit, LengthUnit::Px | LengthUnit::Unitless) => {
            Some((CalcMode::Number, length.value))
        }
        _ => None,
    }
}

impl Resolver<'_> {
    /// Evaluates a token list. `None` for anything malformed.
    pub(crate) fn calc(
        &mut self,
        tokens: &[Descriptor],
    ) -> Result<Option<CalcResult>, ResolveError> {
        let mut machine = Machine::default();

        for token in tokens {
            let ok = match token {
                Descriptor::Number(n) => machine.operand(CalcMode::Number, *n),
                Descriptor::Bool(_) => false,
                Descriptor::String(s) => match s.as_str() {
                    "(" => {
                        machine.ops.push(Op::Open);
                        true
                    }
                    ")" => machine.close(),
                    other => match (Op::parse(other), literal(other)) {
                        (Some(op), _) => machine.operator(op),
                        (None, Some((mode, value))) => machine.operand(mode, value),
                        (None, None) => false,
                    },
                },
                Descriptor::Function(_) | Descriptor::Array(_) => match self.value(token, false)? {
                    Some(Value::Number(n)) => machine.operand(CalcMode::Number, n),
                    Some(Value::String(s)) => match units::parse_percentage(&s) {
                        Ok(p) => machine.operand(CalcMode::Percentage, p),
                        Err(_) => false,
                    },
                    _ => false,
                },
            };
            if !ok {
                return Ok(None);
            }
        }

        Ok(machine.finish())
    }

    /// A single calc argument: a token list, or one token on its own.
    fn calc_arg(&mut self, arg: Option<&Descriptor>) -> Result<Option<CalcResult>, ResolveError> {
        match arg {
            None => Ok(None),
            Some(Descriptor::Array(tokens)) => self.calc(tokens),
            Some(token) => self.calc(std::slice::from_ref(token)),
        }
    }

    /// `min()`/`max()`: operands in the first result's mode are kept,
    /// the rest ignored.
    pub(crate) fn extremum(
        &mut self,
        args: &[Descriptor],
        pick: fn(f64, f64) -> f64,
    ) -> Result<Option<Value>, ResolveError> {
        let mut mode = None;
        let mut best: Option<f64> = None;

        for arg in args {
            let Some(result) = self.calc_arg(Some(arg))? else {
                continue;
            };
            if *mode.get_or_insert(result.mode) == result.mode {
                best = Some(best.map_or(result.raw, |b| pick(b, result.raw)));
            }
        }

        Ok(mode
            .zip(best)
            .map(|(mode, raw)| CalcResult { mode, raw }.value()))
    }

    /// `clamp(min, value, max)`; every part must resolve in the same mode.
    pub(crate) fn clamp(&mut self, args: &[Descriptor]) -> Result<Option<Value>, ResolveError> {
        let min = self.calc_arg(args.first())?;
        let val = self.calc_arg(args.get(1))?;
        let max = self.calc_arg(args.get(2))?;

        let (Some(min), Some(val), Some(max)) = (min, val, max) else {
            return Ok(None);
        };
        if min.mode != val.mode || max.mode != val.mode {
            return Ok(None);
        }

        let raw = min.raw.max(val.raw.min(max.raw));
        Ok(Some(CalcResult { mode: val.mode, raw }.value()))
    }
}
