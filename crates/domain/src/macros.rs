//! Macro for implementing Display and FromStr for wire enums
//!
//! Upstream enums travel as fixed strings (`"BLOCK"`, `"TLS 1.2"`, ...) and
//! Terraform users type them in whatever case they like. The macro gives an
//! enum a canonical `Display` and a case-insensitive `FromStr` from a single
//! mapping.
//!
//! # Example
//!
//! ```rust
//! use incapsula_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Action {
//!     Block,
//!     Captcha,
//! }
//!
//! impl_wire_enum_conversions!(Action {
//!     Block => "BLOCK",
//!     Captcha => "CAPTCHA",
//! });
//!
//! assert_eq!("block".parse::<Action>(), Ok(Action::Block));
//! assert_eq!(Action::Captcha.to_string(), "CAPTCHA");
//! ```

/// Implements Display and FromStr traits for wire enums
///
/// This macro generates:
/// - Display trait: writes the mapped wire string verbatim
/// - FromStr trait: parses the wire string ignoring ASCII case
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their wire strings
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = std::string::String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return std::result::Result::Ok(Self::$variant);
                    }
                )+
                std::result::Result::Err(std::format!(
                    "Invalid {}: {}",
                    std::stringify!($enum_name),
                    s
                ))
            }
        }
    };
}
