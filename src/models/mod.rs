//! Record types of the admin console's list screens.
//!
//! Each record implements [`Queryable`](crate::Queryable), declares the
//! fields free-text search looks at, and comes with the filter keys its
//! list screen offers.
//!
//! | Record         | Searchable               | Filters             |
//! |----------------|--------------------------|---------------------|
//! | [`Document`]   | title, author, summary   | [`DocumentFilter`]  |
//! | [`Version`]    | title, body              | [`VersionFilter`]   |
//! | [`Media`]      | file_name, caption       | [`MediaFilter`]     |
//! | [`Tag`]        | name                     | none                |
//! | [`Language`]   | code, name               | none                |
//! | [`Subscriber`] | email, name              | [`SubscriberFilter`]|
//!
//! ## Example
//!
//! ```rust,ignore
//! use pagequery::models::{Document, DocumentFilter};
//! use pagequery::{InMemorySource, QueryController};
//!
//! let source = InMemorySource::with_items(Document::SEARCHABLE_FIELDS, documents);
//! let controller = QueryController::builder(source).build()?;
//! controller.set_filter(DocumentFilter::Category, "sermon");
//! ```

/// Declares a filter key enum whose variants match the named record
/// fields, serialized under the same names.
macro_rules! filter_keys {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $field:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $field)]
                $variant,
            )+
        }

        impl $crate::types::FilterKey for $name {
            fn field(&self) -> &'static str {
                match self {
                    $( $name::$variant => $field, )+
                }
            }

            fn all() -> &'static [Self] {
                &[$( $name::$variant ),+]
            }
        }
    };
}

pub(crate) use filter_keys;

mod document;
mod media;
mod subscriber;
mod taxonomy;
mod version;

pub use document::{Document, DocumentFilter};
pub use media::{Media, MediaFilter, MediaKind};
pub use subscriber::{Subscriber, SubscriberFilter};
pub use taxonomy::{Language, Tag};
pub use version::{Version, VersionFilter};
