//! Shared model pieces.

use serde::{Deserialize, Deserializer};

/// Language used when the datastore is written to.
pub const DEFAULT_LANG: &str = "en";

/// One language entry of a localized name.
pub trait LangText {
    fn lang_code(&self) -> &str;
    fn text(&self) -> &str;
}

/// Pick the entry for `lang` out of a localized name, or `""` if absent.
pub fn name_by_lang<'a, E: LangText>(names: &'a [E], lang: &str) -> &'a str {
    names
        .iter()
        .find(|entry| entry.lang_code() == lang)
        .map(LangText::text)
        .unwrap_or("")
}

/// Deserialize a field whose JSON value may be `null`, taking the type's
/// default in that case.
///
/// Pair with `#[serde(default)]` so a missing field behaves the same.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Implements `LangText` for a `{ <text field>, lang_code }` struct.
macro_rules! lang_text {
    ($ty:ty, $field:ident) => {
        impl $crate::models::common::LangText for $ty {
            fn lang_code(&self) -> &str {
                &self.lang_code
            }

            fn text(&self) -> &str {
                &self.$field
            }
        }
    };
}

pub(crate) use lang_text;
