use {
    crate::error::WildcardError,
    arc_swap::ArcSwapOption,
    std::{collections::BTreeSet, sync::Arc},
};

/// Zone-wide wildcard condition: the IPs a nonexistent name resolved to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WildcardState {
    pub wildcard_ips: BTreeSet<String>,
}

/// Set-once, read-many wildcard snapshot shared by every concurrent lookup.
#[derive(Debug, Default)]
pub struct WildcardGuard {
    state: ArcSwapOption<WildcardState>,
}

impl WildcardGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates the guard with `ips`. Only the first activation with a non-empty set
    /// wins; returns whether this call was it.
    pub fn activate(&self, ips: BTreeSet<String>) -> bool {
        if ips.is_empty() {
            return false;
        }

        let snapshot = Arc::new(WildcardState { wildcard_ips: ips });
        let previous = self.state.rcu(|current| match current {
            Some(state) => Some(Arc::clone(state)),
            None => Some(Arc::clone(&snapshot)),
        });
        previous.is_none()
    }

    pub fn is_wildcard(&self) -> bool {
        self.state.load().is_some()
    }

    /// True iff the guard is active and `ips` shares an address with the wildcard set.
    pub fn is_poisoned<S: AsRef<str>>(&self, ips: &[S]) -> bool {
        match self.state.load().as_deref() {
            Some(state) => ips
                .iter()
                .any(|ip| state.wildcard_ips.contains(ip.as_ref())),
            None => false,
        }
    }

    pub fn error(&self) -> Option<WildcardError> {
        self.state.load().as_deref().map(|state| WildcardError {
            wildcard_ips: state.wildcard_ips.clone(),
        })
    }
}
