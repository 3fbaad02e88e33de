use indexmap::IndexMap;

use crate::definition::Definition;

/// An ordered style mapping, the object form style producers return.
///
/// Keys are property names (camelCase or kebab-case), nested selectors
/// (`"&:hover"`), or at-rules (`"@media (min-width: 100px)"`). Iteration
/// order is insertion order, which drives cascade order downstream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Css {
  entries: IndexMap<String, CssValue>,
}

impl Css {
  pub fn new() -> Self {
    Css::default()
  }

  /// Inserts an entry. Re-inserting a key replaces its value but keeps the
  /// original position, matching object-literal semantics.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CssValue>) {
    self.entries.insert(key.into(), value.into());
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &CssValue)> {
    self.entries.iter().map(|(key, value)| (key.as_str(), value))
  }
}

impl<K: Into<String>, V: Into<CssValue>> FromIterator<(K, V)> for Css {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut css = Css::new();
    for (key, value) in iter {
      css.insert(key, value);
    }
    css
  }
}

impl<K: Into<String>, V: Into<CssValue>, const N: usize> From<[(K, V); N]> for Css {
  fn from(entries: [(K, V); N]) -> Self {
    entries.into_iter().collect()
  }
}

/// A single value inside a style mapping.
///
/// Terminal values ([`Text`](CssValue::Text), finite
/// [`Number`](CssValue::Number), [`Token`](CssValue::Token)) become atomic
/// declarations. [`Map`](CssValue::Map) and [`Seq`](CssValue::Seq) nest.
/// [`Bool`](CssValue::Bool), [`Null`](CssValue::Null) and non-finite numbers
/// are inert and produce no styles wherever they appear.
#[derive(Clone, Debug, PartialEq)]
pub enum CssValue {
  Text(String),
  Number(f64),
  /// Reference to a minted definition; serializes as the definition's name.
  Token(Definition),
  Map(Css),
  Seq(Vec<CssValue>),
  Bool(bool),
  Null,
}

impl CssValue {
  /// Short human name for error messages.
  pub(crate) fn shape(&self) -> &'static str {
    match self {
      CssValue::Text(_) => "string",
      CssValue::Number(_) => "number",
      CssValue::Token(_) => "token",
      CssValue::Map(_) => "mapping",
      CssValue::Seq(_) => "sequence",
      CssValue::Bool(_) => "boolean",
      CssValue::Null => "null",
    }
  }
}

impl From<&str> for CssValue {
  fn from(value: &str) -> Self {
    CssValue::Text(value.to_owned())
  }
}

impl From<String> for CssValue {
  fn from(value: String) -> Self {
    CssValue::Text(value)
  }
}

impl From<f64> for CssValue {
  fn from(value: f64) -> Self {
    CssValue::Number(value)
  }
}

macro_rules! impl_from_number {
  ($($ty:ty),+) => {$(
    impl From<$ty> for CssValue {
      fn from(value: $ty) -> Self {
        CssValue::Number(value as f64)
      }
    }
  )+};
}

impl_from_number!(f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<bool> for CssValue {
  fn from(value: bool) -> Self {
    CssValue::Bool(value)
  }
}

impl From<Css> for CssValue {
  fn from(value: Css) -> Self {
    CssValue::Map(value)
  }
}

impl From<Vec<CssValue>> for CssValue {
  fn from(value: Vec<CssValue>) -> Self {
    CssValue::Seq(value)
  }
}

impl From<Vec<Css>> for CssValue {
  fn from(value: Vec<Css>) -> Self {
    CssValue::Seq(value.into_iter().map(CssValue::Map).collect())
  }
}

impl From<Definition> for CssValue {
  fn from(value: Definition) -> Self {
    CssValue::Token(value)
  }
}

impl From<&Definition> for CssValue {
  fn from(value: &Definition) -> Self {
    CssValue::Token(value.clone())
  }
}

impl<T: Into<CssValue>> From<Option<T>> for CssValue {
  fn from(value: Option<T>) -> Self {
    value.map_or(CssValue::Null, Into::into)
  }
}

impl From<serde_json::Value> for CssValue {
  fn from(value: serde_json::Value) -> Self {
    match value {
      serde_json::Value::Null => CssValue::Null,
      serde_json::Value::Bool(flag) => CssValue::Bool(flag),
      serde_json::Value::Number(number) => {
        number.as_f64().map_or(CssValue::Null, CssValue::Number)
      }
      serde_json::Value::String(text) => CssValue::Text(text),
      serde_json::Value::Array(items) => {
        CssValue::Seq(items.into_iter().map(CssValue::from).collect())
      }
      serde_json::Value::Object(entries) => CssValue::Map(
        entries
          .into_iter()
          .map(|(key, item)| (key, CssValue::from(item)))
          .collect(),
      ),
    }
  }
}

/// Builds a [`Css`] mapping with object-literal syntax.
///
/// Keys are bare identifiers or string literals; values are expressions,
/// nested `{ .. }` mappings, or `[ .. ]` sequences.
///
/// ```
/// use fission::css;
///
/// let styles = css! {
///   color: "red",
///   fontSize: 12,
///   "&:hover": { color: "blue" },
/// };
/// assert_eq!(styles.len(), 3);
/// ```
#[macro_export]
macro_rules! css {
  () => { $crate::Css::new() };
  ($($entries:tt)+) => {{
    let mut css = $crate::Css::new();
    $crate::__css_entries!(css; $($entries)+);
    css
  }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __css_entries {
  ($css:ident;) => {};
  ($css:ident; $key:tt : { $($nested:tt)* } $(, $($rest:tt)*)?) => {
    $css.insert($crate::__css_key!($key), $crate::css! { $($nested)* });
    $crate::__css_entries!($css; $($($rest)*)?);
  };
  ($css:ident; $key:tt : [ $($items:tt)* ] $(, $($rest:tt)*)?) => {
    $css.insert($crate::__css_key!($key), $crate::__css_items!([] $($items)*));
    $crate::__css_entries!($css; $($($rest)*)?);
  };
  ($css:ident; $key:tt : $value:expr $(, $($rest:tt)*)?) => {
    $css.insert($crate::__css_key!($key), $value);
    $crate::__css_entries!($css; $($($rest)*)?);
  };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __css_key {
  ($key:literal) => { $key };
  ($key:ident) => { stringify!($key) };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __css_items {
  ([$($acc:expr,)*]) => { $crate::CssValue::Seq(vec![$($acc,)*]) };
  ([$($acc:expr,)*] { $($nested:tt)* } $(, $($rest:tt)*)?) => {
    $crate::__css_items!([$($acc,)* $crate::CssValue::from($crate::css! { $($nested)* }),] $($($rest)*)?)
  };
  ([$($acc:expr,)*] $item:expr $(, $($rest:tt)*)?) => {
    $crate::__css_items!([$($acc,)* $crate::CssValue::from($item),] $($($rest)*)?)
  };
}
