//! The regex engine, chosen by feature: `regex` by default, `regex-lite` with
//! the `lite` feature for smaller builds.

#[cfg(feature = "lite")]
pub(crate) use regex_lite::Regex;
#[cfg(all(feature = "regex", not(feature = "lite")))]
pub(crate) use regex::Regex;

#[cfg(not(any(feature = "regex", feature = "lite")))]
compile_error!("bibdedup requires the \"regex\" or \"lite\" feature to be enabled");
