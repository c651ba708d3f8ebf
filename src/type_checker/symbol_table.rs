use std::collections::HashMap;

use thiserror::Error;

use crate::ast::types::TypeBinding;

/// Why an identifier cannot be used as an assignment target.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolError {
    #[error("identifier is already declared")]
    AlreadyDeclared,
    #[error("identifier is not declared")]
    Undeclared,
    #[error("identifier is locked by a for loop")]
    Locked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEntry<V> {
    pub binding: TypeBinding,
    pub value: V,
}

/// Declared identifiers with their binding and current value, plus the stack
/// of loop variables that may not be assigned right now.
///
/// The analyzer stores `()` as the value; the interpreter stores run-time
/// values. Each stage owns its own table.
#[derive(Debug)]
pub struct SymbolTable<V> {
    symbols: HashMap<String, SymbolEntry<V>>,
    locks: Vec<String>,
}

impl<V> Default for SymbolTable<V> {
    fn default() -> Self {
        SymbolTable {
            symbols: HashMap::new(),
            locks: vec![],
        }
    }
}

impl<V> SymbolTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: &str, binding: TypeBinding, value: V) -> Result<(), SymbolError> {
        if self.is_declared(name) {
            return Err(SymbolError::AlreadyDeclared);
        }

        self.symbols.insert(String::from(name), SymbolEntry { binding, value });
        Ok(())
    }

    /// Checks that `name` may be assigned: declared and not locked.
    pub fn validate(&self, name: &str) -> Result<TypeBinding, SymbolError> {
        let binding = self.binding_of(name).ok_or(SymbolError::Undeclared)?;
        if self.is_locked(name) {
            return Err(SymbolError::Locked);
        }
        Ok(binding)
    }

    pub fn assign(&mut self, name: &str, value: V) -> Result<(), SymbolError> {
        self.validate(name)?;
        if let Some(entry) = self.symbols.get_mut(name) {
            entry.value = value;
        }
        Ok(())
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn is_locked(&self, name: &str) -> bool {
        self.locks.iter().any(|locked| locked == name)
    }

    pub fn lock(&mut self, name: &str) {
        self.locks.push(String::from(name));
    }

    /// Whether some loop variable is locked, i.e. a loop body is running.
    pub fn in_loop(&self) -> bool {
        !self.locks.is_empty()
    }

    /// Releases the most recent lock.
    pub fn unlock(&mut self) -> Option<String> {
        self.locks.pop()
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.symbols.get(name).map(|entry| &entry.value)
    }

    pub fn binding_of(&self, name: &str) -> Option<TypeBinding> {
        self.symbols.get(name).map(|entry| entry.binding)
    }

    /// Stores `value` even while `name` is locked. Used by a loop to step its own variable.
    pub fn set_locked(&mut self, name: &str, value: V) -> Result<(), SymbolError> {
        let entry = self.symbols.get_mut(name).ok_or(SymbolError::Undeclared)?;
        entry.value = value;
        Ok(())
    }
}
