use {
    crate::{
        error::{Error, LookupError, Result},
        structs::TldOptions,
        utils::return_resolver_opts,
    },
    async_trait::async_trait,
    hickory_resolver::{
        config::{NameServerConfig, ResolverConfig, ResolverOpts},
        name_server::TokioConnectionProvider,
        proto::{rr::RecordType, xfer::Protocol},
        TokioResolver,
    },
    std::{
        net::{IpAddr, SocketAddr},
        time::Duration,
    },
    tokio::{
        net::lookup_host,
        time::{sleep, timeout},
    },
    tracing::debug,
};

pub const DEFAULT_DNS_PORT: u16 = 53;
/// Pause taken before every CNAME query to go easy on the upstream server.
pub const CNAME_THROTTLE: Duration = Duration::from_secs(1);

/// The two lookups the TLD mode needs. Implemented over hickory for real runs and
/// by in-memory tables in tests.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    async fn lookup_host(&self, name: &str) -> std::result::Result<Vec<String>, LookupError>;

    async fn lookup_cname(&self, name: &str) -> std::result::Result<String, LookupError>;
}

/// Normalizes a resolver override to `host:port`, defaulting the port to 53.
pub fn resolver_address(server: &str) -> Result<String> {
    let server = server.trim();
    if server.is_empty() {
        return Err(Error::InvalidResolver(server.to_owned()));
    }

    if let Ok(ip) = server.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_DNS_PORT).to_string());
    }

    match server.rsplit_once(':') {
        Some((host, port)) => {
            if host.is_empty() || port.parse::<u16>().is_err() {
                return Err(Error::InvalidResolver(server.to_owned()));
            }
            Ok(server.to_owned())
        }
        None => Ok(format!("{server}:{DEFAULT_DNS_PORT}")),
    }
}

pub fn return_tokio_resolver(server: Option<SocketAddr>, options: ResolverOpts) -> TokioResolver {
    let mut builder = match server {
        Some(socket_addr) => {
            let mut config = ResolverConfig::new();
            config.add_name_server(NameServerConfig::new(socket_addr, Protocol::Udp));
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
        }
        None => match TokioResolver::builder_tokio() {
            Ok(builder) => builder,
            Err(e) => {
                debug!(error = %e, "Unable to read the system DNS configuration, using defaults");
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                )
            }
        },
    };
    *builder.options_mut() = options;
    builder.build()
}

#[derive(Clone)]
pub struct HickoryLookup {
    resolver: TokioResolver,
    timeout: Duration,
}

impl HickoryLookup {
    /// Builds the resolver. A host-name override is looked up once, here.
    pub async fn new(options: &TldOptions) -> Result<Self> {
        let server = if options.resolver.is_empty() {
            None
        } else {
            let address = resolver_address(&options.resolver)?;
            let socket_addr = lookup_host(address.as_str())
                .await
                .map_err(|e| Error::Resolver(format!("{address}: {e}")))?
                .next()
                .ok_or_else(|| Error::InvalidResolver(address.clone()))?;
            debug!(resolver = %socket_addr, "Using custom DNS server");
            Some(socket_addr)
        };

        Ok(Self {
            resolver: return_tokio_resolver(server, return_resolver_opts(options.timeout)),
            timeout: options.timeout,
        })
    }
}

fn fully_qualified(name: &str) -> String {
    name.trim_end_matches('.').to_owned() + "."
}

#[async_trait]
impl DnsLookup for HickoryLookup {
    async fn lookup_host(&self, name: &str) -> std::result::Result<Vec<String>, LookupError> {
        let lookup = timeout(self.timeout, self.resolver.lookup_ip(fully_qualified(name)))
            .await
            .map_err(|_| LookupError::Timeout)??;

        let ips: Vec<String> = lookup.iter().map(|ip| ip.to_string()).collect();
        if ips.is_empty() {
            return Err(LookupError::NoRecords);
        }
        Ok(ips)
    }

    async fn lookup_cname(&self, name: &str) -> std::result::Result<String, LookupError> {
        sleep(CNAME_THROTTLE).await;

        let lookup = timeout(
            self.timeout,
            self.resolver.lookup(fully_qualified(name), RecordType::CNAME),
        )
        .await
        .map_err(|_| LookupError::Timeout)??;

        lookup
            .iter()
            .find_map(|record| record.as_cname())
            .map(|cname| cname.to_string())
            .ok_or(LookupError::NoRecords)
    }
}
