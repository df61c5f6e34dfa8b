// Closed enumerations accepted by the Finna API, and the error type

use std::fmt;
use std::str::FromStr;

/// Declares a closed enumeration whose members map one-to-one onto fixed
/// wire tags. Parsing is exact: the API treats `Title` and `title` as
/// different things.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $param:literal {
            $($(#[$vmeta:meta])* $variant:ident => $tag:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Parameter name reported when a value is rejected.
            pub const PARAMETER: &'static str = $param;

            /// The exact tag sent on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = FinnaError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok($name::$variant),)+
                    _ => Err(FinnaError::InvalidArgument {
                        parameter: $param,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = FinnaError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

wire_enum! {
    /// Search scope selector (the `type` parameter of `/search`).
    SearchType, "search_type" {
        AllFields => "AllFields",
        Title => "Title",
        TitleStart => "TitleStart",
        TitleExact => "TitleExact",
        Author => "Author",
        Subject => "Subject",
        Description => "description",
        Geographic => "geographic",
        Classification => "Classification",
        Identifier => "Identifier",
        Series => "Series",
        Toc => "toc",
        Publisher => "publisher",
        PublicationPlace => "PublicationPlace",
        Year => "year",
        Holdings => "Holdings",
    }
}

impl Default for SearchType {
    fn default() -> Self {
        SearchType::AllFields
    }
}

wire_enum! {
    /// Server-side result ordering (the `sort` parameter).
    SortMethod, "sort" {
        RelevanceIdAsc => "relevance,id asc",
        MainDateStrDesc => "main_date_str desc",
        MainDateStrAsc => "main_date_str asc",
        Callnumber => "callnumber",
        Author => "author",
        Title => "title",
        LastIndexedDescIdAsc => "last_indexed desc,id asc",
    }
}

wire_enum! {
    /// Response localization (the `lng` parameter).
    Language, "lng" {
        Fi => "fi",
        Sv => "sv",
        EnGb => "en-gb",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FinnaError {
    #[error("{parameter} must be a valid value, got '{value}'")]
    InvalidArgument {
        parameter: &'static str,
        value: String,
    },

    #[error("{message}, record_id: '{record_id}'")]
    RecordNotFound { message: String, record_id: String },

    #[error("HTTP error {status} for url: {url}")]
    Http { status: u16, url: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Response for record '{record_id}' contained no records")]
    EmptyRecords { record_id: String },
}

impl FinnaError {
    /// True for errors raised before any request was sent.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, FinnaError::InvalidArgument { .. })
    }
}

pub type FinnaResult<T> = std::result::Result<T, FinnaError>;
