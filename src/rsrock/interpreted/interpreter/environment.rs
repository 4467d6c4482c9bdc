use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use crate::rsrock::interpreted::interpreter::rock_value::RockValue;

type Scope = HashMap<String, RockValue>;

/// The global scope plus one scope per function call in flight. Lookups see the innermost scope
/// and the global one; scopes of callers are invisible.
#[derive(Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    pub fn new() -> Self { Environment { scopes: vec![HashMap::new()] } }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop_scope(&mut self) {
        assert!(self.scopes.len() > 1, "Cannot pop the global scope");
        self.scopes.pop();
    }

    pub fn get(&self, key: &str) -> Option<&RockValue> {
        self.current().get(key).or_else(|| self.global().get(key))
    }

    /// Writes an existing variable of the current scope, then of the global scope. Unknown
    /// variables are created in the current scope.
    pub fn assign(&mut self, key: &str, value: RockValue) {
        let index =
            if self.current().contains_key(key) || !self.global().contains_key(key) {
                self.scopes.len() - 1
            } else {
                0
            };
        self.scopes[index].insert(key.to_owned(), value);
    }

    pub fn define_local(&mut self, key: &str, value: RockValue) {
        let last = self.scopes.len() - 1;
        self.scopes[last].insert(key.to_owned(), value);
    }

    fn current(&self) -> &Scope {
        self.scopes.last().expect("Environment without a global scope")
    }

    fn global(&self) -> &Scope { &self.scopes[0] }
}

impl Default for Environment {
    fn default() -> Self { Environment::new() }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let short = |scope: &Scope| -> String {
            let mut entries = scope
                .iter()
                .map(|(k, v)| format!("{} -> {}", k, v.stringify()))
                .collect::<Vec<_>>();
            entries.sort();
            entries.join(",")
        };
        write!(f, "{}", self.scopes.iter().map(short).collect::<Vec<_>>().join(";;"))
    }
}
