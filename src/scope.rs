use beef::lean::Cow;

use crate::value::Value;

/// A single scope: an ordered list of bindings plus a link to the scope it
/// chains to for lookup.
#[derive(Debug, Default)]
struct Scope<'a> {
  vars: Vec<(Cow<'a, str>, Value<'a>)>,
  parent: Option<usize>,
}

/// The stack of live scopes. Index 0 is the global scope and is never
/// popped; a scope is opened on function-call entry and torn down on
/// return.
#[derive(Debug)]
pub struct ScopeStack<'a> {
  scopes: Vec<Scope<'a>>,
  current: usize,
}

impl<'a> ScopeStack<'a> {
  pub fn new() -> Self {
    ScopeStack {
      scopes: vec![Scope::default()],
      current: 0,
    }
  }

  /// Look `name` up in the current scope, then walk the parent chain
  /// outwards. First match wins.
  pub fn lookup(&self, name: &str) -> Option<&Value<'a>> {
    let mut index = Some(self.current);
    while let Some(i) = index {
      let scope = &self.scopes[i];
      if let Some((_, value)) = scope.vars.iter().find(|(n, _)| n.as_ref() == name) {
        return Some(value);
      }
      index = scope.parent;
    }
    None
  }

  /// Bind `name` in the current scope, replacing an existing binding in
  /// place. Never writes through to an outer scope: assigning to a name
  /// bound outside shadows it.
  pub fn define(&mut self, name: &Cow<'a, str>, value: Value<'a>) {
    let scope = &mut self.scopes[self.current];
    match scope.vars.iter_mut().find(|entry| entry.0.as_ref() == name.as_ref()) {
      Some(entry) => entry.1 = value,
      None => scope.vars.push((name.clone(), value)),
    }
  }

  /// Open a new scope chained to the current one.
  pub fn push(&mut self) {
    self.scopes.push(Scope {
      vars: Vec::new(),
      parent: Some(self.current),
    });
    self.current = self.scopes.len() - 1;
  }

  /// Tear down the current scope and make its parent current again.
  pub fn pop(&mut self) {
    if self.scopes.len() > 1 {
      if let Some(scope) = self.scopes.pop() {
        self.current = scope.parent.unwrap_or(0);
      }
    }
  }
}

impl<'a> Default for ScopeStack<'a> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn num(value: f64) -> Value<'static> {
    Value::Number(value)
  }

  fn get(scopes: &ScopeStack<'_>, name: &str) -> Option<f64> {
    match scopes.lookup(name) {
      Some(Value::Number(n)) => Some(*n),
      _ => None,
    }
  }

  #[test]
  fn define_then_lookup() {
    let mut scopes = ScopeStack::new();
    scopes.define(&Cow::borrowed("x"), num(1.0));
    assert_eq!(get(&scopes, "x"), Some(1.0));
    assert_eq!(get(&scopes, "y"), None);
  }

  #[test]
  fn define_replaces_in_place() {
    let mut scopes = ScopeStack::new();
    scopes.define(&Cow::borrowed("x"), num(1.0));
    scopes.define(&Cow::borrowed("x"), num(2.0));
    assert_eq!(get(&scopes, "x"), Some(2.0));
  }

  #[test]
  fn lookup_walks_the_parent_chain() {
    let mut scopes = ScopeStack::new();
    scopes.define(&Cow::borrowed("x"), num(1.0));
    scopes.push();
    assert_eq!(get(&scopes, "x"), Some(1.0));
  }

  #[test]
  fn define_shadows_instead_of_writing_through() {
    let mut scopes = ScopeStack::new();
    scopes.define(&Cow::borrowed("x"), num(1.0));
    scopes.push();
    scopes.define(&Cow::borrowed("x"), num(2.0));
    assert_eq!(get(&scopes, "x"), Some(2.0));
    scopes.pop();
    assert_eq!(get(&scopes, "x"), Some(1.0));
  }

  #[test]
  fn bindings_die_with_their_scope() {
    let mut scopes = ScopeStack::new();
    scopes.push();
    scopes.define(&Cow::borrowed("local"), num(1.0));
    scopes.pop();
    assert_eq!(get(&scopes, "local"), None);
  }

  #[test]
  fn the_global_scope_is_never_popped() {
    let mut scopes = ScopeStack::new();
    scopes.define(&Cow::borrowed("x"), num(1.0));
    scopes.pop();
    assert_eq!(get(&scopes, "x"), Some(1.0));
  }
}
