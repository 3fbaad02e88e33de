/// Encodes one declaration and its parent chain into canonical rule text.
///
/// Parents nest left to right: `["@media x", "&:hover"]` with `color: blue`
/// becomes `@media x{&:hover{color:blue}}`. At-rule names concatenate their
/// value directly (block values arrive already braced); ordinary names join
/// with a colon.
///
/// Also returns the trailing length, the byte count of the value text plus
/// the closing braces. The deduplicator strips the trailing length to recover
/// the value-independent override key, so the two must stay in lockstep.
pub(crate) fn encode(parents: &[&str], name: &str, value: &str) -> (String, usize) {
  let closing = parents.len();
  let mut code = String::with_capacity(
    parents.iter().map(|parent| parent.len() + 1).sum::<usize>()
      + name.len()
      + value.len()
      + closing
      + 1,
  );
  for (index, parent) in parents.iter().enumerate() {
    if index > 0 {
      code.push('{');
    }
    code.push_str(parent);
  }
  if closing > 0 {
    code.push('{');
  }
  code.push_str(name);
  if !name.starts_with('@') {
    code.push(':');
  }
  code.push_str(value);
  for _ in 0..closing {
    code.push('}');
  }
  (code, value.len() + closing)
}
