//! Macro for enums that travel as fixed strings
//!
//! Several backend values are closed sets of strings (OTP reasons, social
//! providers, editor tabs). This macro gives such an enum a single string
//! table used for `Display`, case-insensitive `FromStr`, and serde.
//!
//! # Example
//!
//! ```rust
//! use talentfolio_domain::impl_wire_str_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Theme {
//!     Light,
//!     Dark,
//! }
//!
//! impl_wire_str_conversions!(Theme {
//!     Light => "light",
//!     Dark => "dark",
//! });
//!
//! assert_eq!(Theme::Dark.as_str(), "dark");
//! assert_eq!("LIGHT".parse::<Theme>(), Ok(Theme::Light));
//! ```

/// Implements `as_str`, `Display`, `FromStr`, `Serialize` and `Deserialize`
/// for a fieldless enum from one variant-to-string table.
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their lowercase wire
///   strings
///
/// Parsing ignores case, so the table strings must be lowercase.
#[macro_export]
macro_rules! impl_wire_str_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this value.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}
