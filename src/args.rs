use {
    crate::structs::{GlobalOptions, TldOptions},
    clap::Parser,
    std::time::Duration,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, help = "The target top level domain.")]
    pub domain: String,

    #[arg(short = 'i', long, help = "Show IP addresses.")]
    pub show_ips: bool,

    #[arg(
        short = 'c',
        long,
        conflicts_with = "show_ips",
        help = "Show CNAME records (cannot be used with '-i' option)."
    )]
    pub show_cname: bool,

    #[arg(long, help = "Force continued operation when wildcard found.")]
    pub wildcard: bool,

    #[arg(
        long,
        default_value_t = 1000,
        help = "Resolver timeout in milliseconds. Default: 1000"
    )]
    pub timeout: u64,

    #[arg(
        short,
        long,
        default_value = "",
        hide_default_value = true,
        help = "Use custom DNS server (format server.com or server.com:port)."
    )]
    pub resolver: String,

    #[arg(
        short,
        long,
        default_value_t = 10,
        help = "Number of concurrent lookups. Default: 10"
    )]
    pub threads: usize,

    #[arg(
        long,
        default_value_t = 0,
        help = "Time each worker waits between lookups, in milliseconds. Default: 0"
    )]
    pub delay: u64,

    #[arg(
        short,
        long,
        default_value = "-",
        help = "Path to the wordlist. Use - to read from stdin. Default: -"
    )]
    pub wordlist: String,

    #[arg(
        short,
        long,
        help = "File with patterns, {WORD} is replaced by every word."
    )]
    pub pattern: Option<String>,

    #[arg(short, long, help = "Verbose output, also prints missed names.")]
    pub verbose: bool,

    #[arg(short, long, help = "Quiet mode, no banner or config summary.")]
    pub quiet: bool,
}

impl Args {
    pub fn tld_options(&self) -> TldOptions {
        TldOptions {
            domain: self.domain.clone(),
            show_ips: self.show_ips,
            show_cname: self.show_cname,
            wildcard_forced: self.wildcard,
            resolver: self.resolver.clone(),
            timeout: Duration::from_millis(self.timeout),
        }
    }

    /// Patterns are read separately, they live in a file.
    pub fn global_options(&self, patterns: Vec<String>) -> GlobalOptions {
        GlobalOptions {
            threads: self.threads,
            delay: Duration::from_millis(self.delay),
            wordlist: self.wordlist.clone(),
            pattern_file: self.pattern.clone().unwrap_or_default(),
            patterns,
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["rutld", "-d", "example.com"]).unwrap();
        let options = args.tld_options();
        assert_eq!(options.domain, "example.com");
        assert_eq!(options.timeout, Duration::from_secs(1));
        assert!(options.resolver.is_empty());

        let global = args.global_options(Vec::new());
        assert_eq!(global, GlobalOptions::default());
    }

    #[test]
    fn domain_is_required() {
        assert!(Args::try_parse_from(["rutld"]).is_err());
    }

    #[test]
    fn show_ips_and_cname_conflict() {
        assert!(Args::try_parse_from(["rutld", "-d", "example.com", "-i", "-c"]).is_err());
    }

    #[test]
    fn flags_map_to_options() {
        let args = Args::try_parse_from([
            "rutld",
            "-d",
            "example.com",
            "-c",
            "--wildcard",
            "--timeout",
            "250",
            "-r",
            "9.9.9.9:53",
            "-t",
            "40",
            "--delay",
            "100",
            "-w",
            "words.txt",
            "-p",
            "patterns.txt",
            "-v",
        ])
        .unwrap();

        let options = args.tld_options();
        assert!(options.show_cname);
        assert!(options.wildcard_forced);
        assert_eq!(options.timeout, Duration::from_millis(250));
        assert_eq!(options.resolver, "9.9.9.9:53");

        let global = args.global_options(vec!["{WORD}-dev".to_owned()]);
        assert_eq!(global.threads, 40);
        assert_eq!(global.delay, Duration::from_millis(100));
        assert_eq!(global.wordlist, "words.txt");
        assert_eq!(global.pattern_file, "patterns.txt");
        assert_eq!(global.patterns.len(), 1);
        assert!(global.verbose);
    }
}
