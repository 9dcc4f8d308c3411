//! Document instances, their identities, change tracking and embedded
//! collections.

mod accessor;
mod change_tracker;
#[allow(clippy::module_inception)]
mod document;
mod document_id;
mod embedded;
mod snowflake;

pub use change_tracker::*;
pub use document::*;
pub use document_id::*;
pub use embedded::*;
pub use snowflake::*;

/// Strips the quotes `stringify!` leaves around string-literal keys.
pub fn normalize_key(key: &str) -> String {
    key.trim_matches('"').to_string()
}

/// Builds an attribute list for [crate::schema::SchemaRegistry::new_document_with]
/// and friends.
///
/// # Examples
///
/// ```rust,ignore
/// let attributes = attrs! {
///     name: "name",
///     "address": "street",
///     visits: 3,
/// };
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::vec::Vec::<(::std::string::String, $crate::common::Value)>::new()
    };

    ($($key:tt : $value:expr),+ $(,)?) => {
        {
            let mut attributes: ::std::vec::Vec<(::std::string::String, $crate::common::Value)> =
                ::std::vec::Vec::new();
            $(
                attributes.push((
                    $crate::document::normalize_key(stringify!($key)),
                    $crate::common::Value::from($value),
                ));
            )+
            attributes
        }
    };
}
