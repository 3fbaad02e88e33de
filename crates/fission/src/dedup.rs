use indexmap::IndexMap;

use crate::flatten::AtomicDeclaration;

/// Collapses repeated and overridden declarations, last writer winning.
///
/// Two declarations collide when they target the same property under the
/// same parent chain, regardless of value; the survivor also moves to the
/// back of the ordering so later styles win positionally as well. Verbatim
/// `@` entries keep their first slot instead, preserving "emitted once"
/// semantics for definitions and standalone at-rules.
pub(crate) fn deduplicate(declarations: Vec<AtomicDeclaration>) -> Vec<AtomicDeclaration> {
  let mut deduplicated: IndexMap<String, AtomicDeclaration> =
    IndexMap::with_capacity(declarations.len());
  for declaration in declarations {
    let key = override_key(&declaration);
    if declaration.group == "@" {
      deduplicated.insert(key, declaration);
    } else {
      deduplicated.shift_remove(&key);
      deduplicated.insert(key, declaration);
    }
  }
  deduplicated.into_values().collect()
}

/// The value-independent prefix of a declaration's code: everything up to and
/// including the property colon, with the closing braces stripped. Verbatim
/// blocks carry no trailing length and collide only on identical content.
fn override_key(declaration: &AtomicDeclaration) -> String {
  match declaration.value_length {
    Some(value_length) if declaration.group != "@" => {
      declaration.code[..declaration.code.len() - 1 - value_length].to_owned()
    }
    _ => declaration.hash.clone(),
  }
}
