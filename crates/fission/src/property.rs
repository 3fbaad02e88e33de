use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Normalized names are memoized process-wide; property names come from a
/// small fixed vocabulary, so the map stays tiny.
static NORMALIZED: Lazy<RwLock<HashMap<String, String>>> =
  Lazy::new(|| RwLock::new(HashMap::new()));

/// Custom properties (`--brand-color`) pass through untouched.
fn is_custom_property(name: &str) -> bool {
  name.as_bytes().get(1) == Some(&b'-')
}

/// Converts a camelCase property name to its hyphenated CSS form.
///
/// `msOverflowStyle` becomes `-ms-overflow-style`: the `ms` vendor prefix is
/// the one prefix spelled without a leading dash in camelCase. Names already
/// in CSS form come back unchanged.
pub(crate) fn normalize_property_name(name: &str) -> String {
  if is_custom_property(name) {
    return name.to_owned();
  }
  if let Some(cached) = NORMALIZED.read().get(name) {
    return cached.clone();
  }
  let normalized = hyphenate(name);
  NORMALIZED
    .write()
    .insert(name.to_owned(), normalized.clone());
  normalized
}

fn hyphenate(name: &str) -> String {
  let mut out = String::with_capacity(name.len() + 4);
  if name.starts_with("ms") {
    out.push('-');
  }
  for ch in name.chars() {
    if ch.is_ascii_uppercase() {
      out.push('-');
      out.push(ch.to_ascii_lowercase());
    } else {
      out.push(ch);
    }
  }
  out
}

/// Override group for a normalized property name.
///
/// Vendor-prefixed names skip the empty leading segments so `-webkit-transform`
/// and `transform` land in different groups only by their real first word.
pub(crate) fn property_group(name: &str) -> String {
  let index = if name.starts_with('-') { 2 } else { 0 };
  name.split('-').nth(index).unwrap_or_default().to_owned()
}
