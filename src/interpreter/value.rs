use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;

use crate::{ast::types::TypeBinding, lexer::tokens::Operator};

/// `None` when the operation has no result for its operands (division by zero).
pub type BinaryImpl = fn(&Value, &Value) -> Option<Value>;
pub type UnaryImpl = fn(&Value) -> Option<Value>;

lazy_static! {
    /// Concrete operations behind every transition of the type-binding graph.
    pub static ref BINARY_IMPLEMENTATIONS: HashMap<(TypeBinding, Operator), BinaryImpl> = {
        let mut map: HashMap<(TypeBinding, Operator), BinaryImpl> = HashMap::new();

        map.insert((TypeBinding::Integer, Operator::Addition), |l, r| integers(l, r, |a, b| Some(Value::Int(a.wrapping_add(b)))));
        map.insert((TypeBinding::Integer, Operator::Subtraction), |l, r| integers(l, r, |a, b| Some(Value::Int(a.wrapping_sub(b)))));
        map.insert((TypeBinding::Integer, Operator::Multiplication), |l, r| integers(l, r, |a, b| Some(Value::Int(a.wrapping_mul(b)))));
        map.insert((TypeBinding::Integer, Operator::Division), |l, r| integers(l, r, |a, b| (b != 0).then(|| Value::Int(a.wrapping_div(b)))));
        map.insert((TypeBinding::Integer, Operator::Less), |l, r| integers(l, r, |a, b| Some(Value::Bool(a < b))));
        map.insert((TypeBinding::Integer, Operator::Equality), |l, r| integers(l, r, |a, b| Some(Value::Bool(a == b))));

        map.insert((TypeBinding::String, Operator::Addition), |l, r| match (l, r) {
            (Value::Str(a), Value::Str(b)) => Some(Value::Str(format!("{}{}", a, b))),
            _ => None,
        });
        map.insert((TypeBinding::String, Operator::Equality), |l, r| match (l, r) {
            (Value::Str(a), Value::Str(b)) => Some(Value::Bool(a == b)),
            _ => None,
        });

        map.insert((TypeBinding::Boolean, Operator::And), |l, r| match (l, r) {
            (Value::Bool(a), Value::Bool(b)) => Some(Value::Bool(*a && *b)),
            _ => None,
        });
        map.insert((TypeBinding::Boolean, Operator::Equality), |l, r| match (l, r) {
            (Value::Bool(a), Value::Bool(b)) => Some(Value::Bool(a == b)),
            _ => None,
        });

        map
    };

    pub static ref UNARY_IMPLEMENTATIONS: HashMap<(TypeBinding, Operator), UnaryImpl> = {
        let mut map: HashMap<(TypeBinding, Operator), UnaryImpl> = HashMap::new();

        map.insert((TypeBinding::Boolean, Operator::Not), |operand| match operand {
            Value::Bool(value) => Some(Value::Bool(!value)),
            _ => None,
        });

        map
    };
}

fn integers(left: &Value, right: &Value, operation: fn(i64, i64) -> Option<Value>) -> Option<Value> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => operation(*a, *b),
        _ => None,
    }
}

/// A run-time value. The variant always agrees with the binding of the
/// expression or variable it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl Value {
    /// Value of a declared variable without an initializer.
    pub fn zero(binding: TypeBinding) -> Value {
        match binding {
            TypeBinding::Integer => Value::Int(0),
            TypeBinding::String => Value::Str(String::new()),
            TypeBinding::Boolean => Value::Bool(false),
        }
    }

    pub fn binding(&self) -> TypeBinding {
        match self {
            Value::Int(_) => TypeBinding::Integer,
            Value::Str(_) => TypeBinding::String,
            Value::Bool(_) => TypeBinding::Boolean,
        }
    }

    /// Converts text to a value of `binding`: integers in decimal, booleans
    /// as exactly `true` or `false`, strings verbatim.
    pub fn parse(binding: TypeBinding, text: &str) -> Option<Value> {
        match binding {
            TypeBinding::Integer => text.parse::<i64>().ok().map(Value::Int),
            TypeBinding::String => Some(Value::Str(String::from(text))),
            TypeBinding::Boolean => match text {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Str(value) => write!(f, "{}", value),
            Value::Bool(value) => write!(f, "{}", value),
        }
    }
}
