// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Bail out of a line classifier with a formatted `LineFault`.
#[macro_export]
macro_rules! fault {
    ($($arg:tt)*) => {
        return ::std::result::Result::Err($crate::events::classify::LineFault(format!($($arg)*)))
    };
}
