use {
    hickory_resolver::ResolveError,
    std::{collections::BTreeSet, io},
    thiserror::Error,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("please provide a valid domain")]
    EmptyDomain,

    #[error("timeout has to be greater than zero")]
    InvalidTimeout,

    #[error("threads has to be greater than zero")]
    InvalidThreads,

    #[error("invalid resolver {0}, expected host or host:port")]
    InvalidResolver(String),

    #[error("unable to build the DNS resolver: {0}")]
    Resolver(String),

    #[error(transparent)]
    Wildcard(#[from] WildcardError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Raised when every name under the target domain resolves to the same IP set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "the DNS Server returned the same IP for every domain. IP address(es) returned: {}",
    join_ips(.wildcard_ips)
)]
pub struct WildcardError {
    pub wildcard_ips: BTreeSet<String>,
}

fn join_ips(ips: &BTreeSet<String>) -> String {
    ips.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

/// Failure of a single lookup. The lookup core treats all of them as "not found".
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("lookup timed out")]
    Timeout,

    #[error("no records found")]
    NoRecords,

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
