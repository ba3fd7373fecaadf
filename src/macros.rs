//! Macros for string-backed enums

/// Generate `Display`, `FromStr` and an `as_str` accessor for a fieldless enum
/// whose variants map one-to-one onto wire strings.
///
/// The error constructor receives the rejected input.
///
/// # Usage
///
/// ```rust,ignore
/// enum_display_fromstr!(
///     ThreadStatus,
///     ParleyError::invalid_status,
///     {
///         Open => "open",
///         NotActionable => "not_actionable",
///     }
/// );
/// ```
#[macro_export]
macro_rules! enum_display_fromstr {
    (
        $enum_name:ident,
        $error_ctor:path,
        { $($variant:ident => $str:literal),+ $(,)? }
    ) => {
        impl $enum_name {
            /// Wire representation of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::ParleyError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok($enum_name::$variant),)+
                    _ => Err($error_ctor(s.to_string())),
                }
            }
        }
    };
}
