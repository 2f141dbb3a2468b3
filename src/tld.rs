use {
    crate::{
        dnslib::{DnsLookup, HickoryLookup},
        error::Result,
        plugin::Plugin,
        structs::{GlobalOptions, LookupResult, TldOptions},
        utils::{detect_wildcards, format_duration},
        wildcard::WildcardGuard,
    },
    async_trait::async_trait,
    std::sync::Arc,
    tokio::sync::mpsc,
    tokio_util::sync::CancellationToken,
    tracing::{debug, warn},
};

/// TLD enumeration: resolves `word.domain` for every word it is handed.
pub struct Tld {
    lookup: Arc<dyn DnsLookup>,
    global: GlobalOptions,
    options: TldOptions,
    guard: WildcardGuard,
}

impl Tld {
    pub async fn new(global: GlobalOptions, mut options: TldOptions) -> Result<Self> {
        options.validate()?;
        let lookup = HickoryLookup::new(&options).await?;
        Self::with_lookup(global, options, Arc::new(lookup))
    }

    pub fn with_lookup(
        global: GlobalOptions,
        mut options: TldOptions,
        lookup: Arc<dyn DnsLookup>,
    ) -> Result<Self> {
        options.validate()?;
        global.validate()?;
        Ok(Self {
            lookup,
            global,
            options,
            guard: WildcardGuard::new(),
        })
    }

    pub fn options(&self) -> &TldOptions {
        &self.options
    }

    pub fn guard(&self) -> &WildcardGuard {
        &self.guard
    }

    pub fn full_name(&self, word: &str) -> String {
        format!("{}.{}", word.trim_end_matches('.'), self.options.domain)
    }

    fn result(&self, full_name: String, found: bool) -> LookupResult {
        LookupResult {
            full_name,
            found,
            show_ips: self.options.show_ips,
            show_cname: self.options.show_cname,
            ..Default::default()
        }
    }
}

#[async_trait]
impl Plugin for Tld {
    type Output = LookupResult;

    fn name(&self) -> &'static str {
        "TLD enumeration"
    }

    fn requests_per_run(&self) -> usize {
        1
    }

    async fn pre_run(&self, token: &CancellationToken) -> Result<()> {
        let wildcard_ips = tokio::select! {
            biased;
            _ = token.cancelled() => return Ok(()),
            ips = detect_wildcards(&self.options.domain, self.lookup.as_ref()) => ips,
        };
        self.guard.activate(wildcard_ips);

        if let Some(err) = self.guard.error() {
            if !self.options.wildcard_forced {
                return Err(err.into());
            }
            warn!(
                ips = ?err.wildcard_ips,
                "Wildcard DNS detected, results pointing to these IPs will be skipped"
            );
        }
        Ok(())
    }

    async fn run(
        &self,
        token: &CancellationToken,
        word: &str,
        results: &mpsc::Sender<LookupResult>,
    ) -> Result<()> {
        let full_name = self.full_name(word);

        let lookup = tokio::select! {
            biased;
            _ = token.cancelled() => return Ok(()),
            lookup = self.lookup.lookup_host(&full_name) => lookup,
        };

        let result = match lookup {
            Ok(ips) => {
                if self.guard.is_poisoned(ips.as_slice()) {
                    match self.guard.error() {
                        Some(err) if !self.options.wildcard_forced => return Err(err.into()),
                        _ => {
                            debug!(name = %full_name, "Skipping wildcard response");
                            return Ok(());
                        }
                    }
                }

                let mut result = self.result(full_name, true);
                if self.options.show_ips {
                    result.ips = ips;
                } else if self.options.show_cname {
                    let cname = tokio::select! {
                        biased;
                        _ = token.cancelled() => return Ok(()),
                        cname = self.lookup.lookup_cname(&result.full_name) => cname,
                    };
                    match cname {
                        Ok(cname) => result.cname = cname,
                        Err(e) => debug!(name = %result.full_name, error = %e, "CNAME lookup failed"),
                    }
                }
                result
            }
            Err(e) => {
                debug!(name = %full_name, error = %e, "Lookup failed");
                if !self.global.verbose {
                    return Ok(());
                }
                self.result(full_name, false)
            }
        };

        if results.send(result).await.is_err() {
            debug!(word = %word, "Result channel closed, dropping result");
        }
        Ok(())
    }

    fn config_summary(&self) -> String {
        let o = &self.options;
        let g = &self.global;
        let mut rows: Vec<(&str, String)> = vec![
            ("Domain:", o.domain.clone()),
            ("Threads:", g.threads.to_string()),
        ];

        if !g.delay.is_zero() {
            rows.push(("Delay:", format_duration(g.delay)));
        }
        if !o.resolver.is_empty() {
            rows.push(("Resolver:", o.resolver.clone()));
        }
        if o.show_cname {
            rows.push(("Show CNAME:", "true".to_owned()));
        }
        if o.show_ips {
            rows.push(("Show IPs:", "true".to_owned()));
        }
        if o.wildcard_forced {
            rows.push(("Wildcard forced:", "true".to_owned()));
        }
        rows.push(("Timeout:", format_duration(o.timeout)));

        let wordlist = if g.wordlist == "-" {
            "stdin (pipe)".to_owned()
        } else {
            g.wordlist.clone()
        };
        rows.push(("Wordlist:", wordlist));

        if !g.pattern_file.is_empty() {
            rows.push((
                "Patterns:",
                format!("{} ({} entries)", g.pattern_file, g.patterns.len()),
            ));
        }
        if g.verbose {
            rows.push(("Verbose:", "true".to_owned()));
        }

        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 3;
        let summary: String = rows
            .iter()
            .map(|(label, value)| format!("[+] {label:<width$}{value}\n"))
            .collect();
        summary.trim().to_owned()
    }
}
