//! Reconciliation of a local list with the server's copy.

/// Strategy for folding a server response into local list state.
///
/// Stores call this after every successful fetch or mutation of a remote
/// list resource.
pub trait Reconcile<T> {
    /// Bring `local` in line with the list the server returned.
    fn reconcile_from(&self, local: &mut Vec<T>, server: Vec<T>);
}

/// Replace the local list with the server's list, unmodified.
///
/// The local view can never drift from the server after a mutation, at the
/// cost of a round trip per single-item change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceWholesale;

impl<T> Reconcile<T> for ReplaceWholesale {
    fn reconcile_from(&self, local: &mut Vec<T>, server: Vec<T>) {
        *local = server;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_wholesale_drops_local_only_entries() {
        let mut local = vec!["a", "b", "stale"];
        ReplaceWholesale.reconcile_from(&mut local, vec!["b", "c"]);
        assert_eq!(local, vec!["b", "c"]);
    }

    #[test]
    fn test_replace_wholesale_with_empty_server_list() {
        let mut local = vec![1, 2, 3];
        ReplaceWholesale.reconcile_from(&mut local, Vec::new());
        assert!(local.is_empty());
    }
}
