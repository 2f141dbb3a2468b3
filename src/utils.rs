use {
    crate::{dnslib::DnsLookup, error::Result},
    futures::stream::{self, StreamExt},
    hickory_resolver::config::{LookupIpStrategy, ResolverOpts},
    rand::{distr::Alphanumeric, rng, Rng},
    std::{collections::BTreeSet, time::Duration},
    tokio::{
        fs::File,
        io::{self, AsyncReadExt},
    },
    tracing::{debug, info},
};

pub const WILDCARD_PROBES: usize = 3;
pub const PATTERN_PLACEHOLDER: &str = "{WORD}";

/// Reads the non-empty lines of `path`, or of stdin when `path` is `-`.
pub async fn read_lines(path: &str) -> Result<Vec<String>> {
    let mut buffer = String::new();
    if path == "-" {
        io::stdin().read_to_string(&mut buffer).await?;
    } else {
        File::open(path).await?.read_to_string(&mut buffer).await?;
    }

    Ok(buffer
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Every word is tried as is, plus once per pattern holding the placeholder.
pub fn expand_patterns(word: &str, patterns: &[String]) -> Vec<String> {
    let mut words = Vec::with_capacity(patterns.len() + 1);
    words.push(word.to_owned());
    words.extend(
        patterns
            .iter()
            .filter(|pattern| pattern.contains(PATTERN_PLACEHOLDER))
            .map(|pattern| pattern.replace(PATTERN_PLACEHOLDER, word)),
    );
    words
}

pub fn random_label() -> String {
    rng()
        .sample_iter(Alphanumeric)
        .take(15)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// Resolves a few names that should not exist under `target`. Anything they
/// resolve to is wildcard noise.
pub async fn detect_wildcards(target: &str, lookup: &dyn DnsLookup) -> BTreeSet<String> {
    info!(domain = %target, "Running wildcards detection");

    let probes: Vec<String> = (0..WILDCARD_PROBES)
        .map(|_| format!("{}.{target}", random_label()))
        .collect();

    let wildcard_ips: BTreeSet<String> = stream::iter(probes)
        .map(|host| async move {
            lookup.lookup_host(&host).await.unwrap_or_else(|e| {
                debug!(host = %host, error = %e, "Wildcard probe did not resolve");
                Vec::new()
            })
        })
        .buffer_unordered(WILDCARD_PROBES)
        .map(stream::iter)
        .flatten()
        .collect()
        .await;

    if wildcard_ips.is_empty() {
        info!(domain = %target, "No wildcards detected");
    } else {
        info!(domain = %target, ips = ?wildcard_ips, "Wildcards detected");
    }
    wildcard_ips
}

/// Formats like Go's `time.Duration`: `1h0m0s`, `1m30s`, `1.5s`, `500ms`, `250µs`.
pub fn format_duration(duration: Duration) -> String {
    fn with_fraction(whole: u128, fraction: u128, digits: usize, unit: &str) -> String {
        let fraction = format!("{fraction:0digits$}");
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            format!("{whole}{unit}")
        } else {
            format!("{whole}.{fraction}{unit}")
        }
    }

    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_owned();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return with_fraction(nanos / 1_000, nanos % 1_000, 3, "µs");
    }
    if nanos < 1_000_000_000 {
        return with_fraction(nanos / 1_000_000, nanos % 1_000_000, 6, "ms");
    }

    let secs = duration.as_secs();
    let seconds = with_fraction(
        u128::from(secs % 60),
        u128::from(duration.subsec_nanos()),
        9,
        "s",
    );
    match (secs / 3600, (secs % 3600) / 60) {
        (0, 0) => seconds,
        (0, minutes) => format!("{minutes}m{seconds}"),
        (hours, minutes) => format!("{hours}h{minutes}m{seconds}"),
    }
}

pub fn return_resolver_opts(timeout: Duration) -> ResolverOpts {
    let mut options = ResolverOpts::default();
    options.timeout = timeout;
    options.attempts = 0;
    options.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    options.num_concurrent_reqs = 1;
    options
}
