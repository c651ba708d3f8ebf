use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;

use crate::lexer::tokens::{Operator, TokenKind};

lazy_static! {
    /// Operator transitions of every binding: the single source of truth for
    /// what an operator accepts and what it produces.
    static ref TRANSITIONS: HashMap<TypeBinding, HashMap<Operator, TypeBinding>> = {
        let mut map = HashMap::new();

        map.insert(TypeBinding::Boolean, HashMap::from([
            (Operator::Equality, TypeBinding::Boolean),
            (Operator::Not, TypeBinding::Boolean),
            (Operator::And, TypeBinding::Boolean),
        ]));

        map.insert(TypeBinding::String, HashMap::from([
            (Operator::Addition, TypeBinding::String),
            (Operator::Equality, TypeBinding::Boolean),
        ]));

        map.insert(TypeBinding::Integer, HashMap::from([
            (Operator::Addition, TypeBinding::Integer),
            (Operator::Subtraction, TypeBinding::Integer),
            (Operator::Multiplication, TypeBinding::Integer),
            (Operator::Division, TypeBinding::Integer),
            (Operator::Less, TypeBinding::Boolean),
            (Operator::Equality, TypeBinding::Boolean),
        ]));

        map
    };
}

/// One of the three primitive types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeBinding {
    Integer,
    String,
    Boolean,
}

impl TypeBinding {
    pub const ALL: [TypeBinding; 3] = [TypeBinding::Integer, TypeBinding::String, TypeBinding::Boolean];

    pub fn name(&self) -> &'static str {
        match self {
            TypeBinding::Integer => "int",
            TypeBinding::String => "string",
            TypeBinding::Boolean => "bool",
        }
    }

    /// Binding named by a type keyword token (`int`, `string`, `bool`).
    pub fn from_type_kind(kind: TokenKind) -> Option<TypeBinding> {
        match kind {
            TokenKind::IntType => Some(TypeBinding::Integer),
            TokenKind::StringType => Some(TypeBinding::String),
            TokenKind::BoolType => Some(TypeBinding::Boolean),
            _ => None,
        }
    }

    /// Binding of a literal token category.
    pub fn from_literal_kind(kind: TokenKind) -> Option<TypeBinding> {
        match kind {
            TokenKind::IntegerLiteral => Some(TypeBinding::Integer),
            TokenKind::StringLiteral => Some(TypeBinding::String),
            TokenKind::BooleanLiteral => Some(TypeBinding::Boolean),
            _ => None,
        }
    }

    /// Result type of applying `operator` to operands of this binding, if supported.
    pub fn operate(&self, operator: Operator) -> Option<TypeBinding> {
        TRANSITIONS.get(self).and_then(|transitions| transitions.get(&operator)).copied()
    }

    /// Every operator this binding supports, with its result type.
    pub fn transitions(&self) -> Vec<(Operator, TypeBinding)> {
        TRANSITIONS
            .get(self)
            .map(|transitions| transitions.iter().map(|(operator, result)| (*operator, *result)).collect())
            .unwrap_or_default()
    }
}

impl Display for TypeBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::TypeBinding;
    use crate::lexer::tokens::{Operator, TokenKind};

    #[test]
    fn test_integer_transitions() {
        assert_eq!(TypeBinding::Integer.operate(Operator::Addition), Some(TypeBinding::Integer));
        assert_eq!(TypeBinding::Integer.operate(Operator::Less), Some(TypeBinding::Boolean));
        assert_eq!(TypeBinding::Integer.operate(Operator::Equality), Some(TypeBinding::Boolean));
        assert_eq!(TypeBinding::Integer.operate(Operator::And), None);
        assert_eq!(TypeBinding::Integer.operate(Operator::Not), None);
    }

    #[test]
    fn test_string_transitions() {
        assert_eq!(TypeBinding::String.operate(Operator::Addition), Some(TypeBinding::String));
        assert_eq!(TypeBinding::String.operate(Operator::Equality), Some(TypeBinding::Boolean));
        assert_eq!(TypeBinding::String.operate(Operator::Less), None);
        assert_eq!(TypeBinding::String.operate(Operator::Subtraction), None);
    }

    #[test]
    fn test_boolean_transitions() {
        assert_eq!(TypeBinding::Boolean.operate(Operator::Not), Some(TypeBinding::Boolean));
        assert_eq!(TypeBinding::Boolean.operate(Operator::And), Some(TypeBinding::Boolean));
        assert_eq!(TypeBinding::Boolean.operate(Operator::Addition), None);
        assert_eq!(TypeBinding::Boolean.transitions().len(), 3);
    }

    #[test]
    fn test_binding_lookup_from_tokens() {
        assert_eq!(TypeBinding::from_type_kind(TokenKind::IntType), Some(TypeBinding::Integer));
        assert_eq!(TypeBinding::from_type_kind(TokenKind::Identifier), None);
        assert_eq!(TypeBinding::from_literal_kind(TokenKind::BooleanLiteral), Some(TypeBinding::Boolean));
        assert_eq!(TypeBinding::from_literal_kind(TokenKind::Identifier), None);
        assert_eq!(TypeBinding::String.to_string(), "string");
    }
}
