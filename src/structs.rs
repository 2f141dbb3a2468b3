use {
    crate::error::{Error, Result},
    std::{fmt, time::Duration},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Options of the TLD enumeration mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TldOptions {
    pub domain: String,
    pub show_ips: bool,
    pub show_cname: bool,
    pub wildcard_forced: bool,
    /// Custom DNS server, `host` or `host:port`. Empty means the system resolver.
    pub resolver: String,
    pub timeout: Duration,
}

impl Default for TldOptions {
    fn default() -> Self {
        Self {
            domain: String::new(),
            show_ips: false,
            show_cname: false,
            wildcard_forced: false,
            resolver: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TldOptions {
    pub fn validate(&mut self) -> Result<()> {
        self.domain = self.domain.trim().trim_end_matches('.').to_owned();
        if self.domain.is_empty() {
            return Err(Error::EmptyDomain);
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidTimeout);
        }
        self.resolver = self.resolver.trim().to_owned();
        Ok(())
    }
}

/// Options owned by the engine driving a plugin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalOptions {
    pub threads: usize,
    pub delay: Duration,
    /// Wordlist path, `-` reads stdin.
    pub wordlist: String,
    pub pattern_file: String,
    pub patterns: Vec<String>,
    pub verbose: bool,
    pub quiet: bool,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            threads: 10,
            delay: Duration::ZERO,
            wordlist: "-".to_owned(),
            pattern_file: String::new(),
            patterns: Vec::new(),
            verbose: false,
            quiet: false,
        }
    }
}

impl GlobalOptions {
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(Error::InvalidThreads);
        }
        Ok(())
    }
}

/// Outcome of one lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupResult {
    pub full_name: String,
    pub found: bool,
    pub show_ips: bool,
    pub show_cname: bool,
    pub ips: Vec<String>,
    pub cname: String,
}

impl LookupResult {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.found { "Found" } else { "Missed" };
        if self.show_ips && self.found {
            writeln!(f, "{status}: {} [{}]", self.full_name, self.ips.join(","))
        } else if self.show_cname && self.found && !self.cname.is_empty() {
            writeln!(f, "{status}: {} [{}]", self.full_name, self.cname)
        } else {
            writeln!(f, "{status}: {}", self.full_name)
        }
    }
}
