//! TLD enumeration: resolves `word.domain` for every candidate word and filters out
//! wildcard DNS answers.

pub mod args;
pub mod dnslib;
pub mod engine;
pub mod error;
pub mod plugin;
pub mod structs;
pub mod tld;
pub mod utils;
pub mod wildcard;

pub use {
    error::{Error, LookupError, Result, WildcardError},
    plugin::Plugin,
    structs::{GlobalOptions, LookupResult, TldOptions},
    tld::Tld,
};
