//! Ground-truth pattern injection.
//!
//! Forces configured itemsets to co-occur in enough transactions to hit
//! their target support, with per-item omission noise. Patterns are applied
//! in input order: earlier patterns claim hosts first, and a later pattern
//! that cannot find enough unclaimed hosts fails hard with
//! [`Error::InjectionConflict`] instead of silently missing its target.

use crate::config::PatternSpec;
use crate::dataset::Transaction;
use crate::{Error, Result};
use rand::Rng;

/// Tracks which transaction indices are already claimed as hosts.
///
/// One registry spans all patterns of a run, so host sets stay disjoint
/// across patterns while item sets remain free to overlap.
#[derive(Debug, Clone)]
pub struct HostClaims {
    claimed: Vec<bool>,
    free: usize,
}

impl HostClaims {
    /// Registry over `num_transactions` unclaimed indices.
    pub fn new(num_transactions: usize) -> Self {
        Self {
            claimed: vec![false; num_transactions],
            free: num_transactions,
        }
    }

    /// Number of indices still unclaimed.
    pub fn free_count(&self) -> usize {
        self.free
    }

    fn free_indices(&self) -> Vec<usize> {
        self.claimed
            .iter()
            .enumerate()
            .filter(|(_, &claimed)| !claimed)
            .map(|(idx, _)| idx)
            .collect()
    }

    fn claim(&mut self, index: usize) {
        debug_assert!(!self.claimed[index]);
        self.claimed[index] = true;
        self.free -= 1;
    }
}

/// Inject one pattern in place and return the host indices it claimed, in
/// ascending order, for ground-truth bookkeeping.
///
/// Each pattern item lands in each host with probability
/// `1 - noise_ratio` (idempotent set union; items already present are left
/// untouched). Host transactions may grow beyond their sampled length;
/// injection takes precedence over the length invariant.
///
/// # Errors
///
/// [`Error::Config`] if the host count rounds to zero or exceeds the dataset
/// (normally caught at config validation); [`Error::InjectionConflict`] if
/// fewer unclaimed transactions remain than the pattern needs.
pub fn inject<R: Rng + ?Sized>(
    transactions: &mut [Transaction],
    pattern: &PatternSpec,
    claims: &mut HostClaims,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let n = transactions.len();
    let k = pattern.host_count(n);
    if k == 0 {
        return Err(Error::config(format!(
            "pattern '{}' target_support {} rounds to zero hosts over {} transactions",
            pattern.id, pattern.target_support, n
        )));
    }
    if k > n {
        return Err(Error::config(format!(
            "pattern '{}' needs {} hosts but the dataset has {} transactions",
            pattern.id, k, n
        )));
    }

    let free = claims.free_indices();
    if free.len() < k {
        return Err(Error::injection_conflict(format!(
            "pattern '{}' needs {} hosts but only {} of {} transactions are unclaimed",
            pattern.id,
            k,
            free.len(),
            n
        )));
    }

    let picks = rand::seq::index::sample(rng, free.len(), k);
    let mut hosts: Vec<usize> = picks.iter().map(|i| free[i]).collect();
    hosts.sort_unstable();

    for &host in &hosts {
        claims.claim(host);
        for &item in &pattern.items {
            if rng.gen_bool(1.0 - pattern.noise_ratio) {
                transactions[host].insert(item);
            }
        }
    }

    log::debug!(
        "injected pattern '{}' into {} hosts ({} unclaimed remain)",
        pattern.id,
        hosts.len(),
        claims.free_count()
    );
    Ok(hosts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pattern(id: &str, items: Vec<u32>, support: f64, noise: f64) -> PatternSpec {
        PatternSpec {
            id: id.into(),
            items,
            target_support: support,
            noise_ratio: noise,
        }
    }

    fn blank_transactions(n: usize) -> Vec<Transaction> {
        (0..n).map(|i| Transaction::from_items([i as u32 % 7])).collect()
    }

    #[test]
    fn test_noiseless_injection_hits_every_host() {
        let mut txns = blank_transactions(100);
        let mut claims = HostClaims::new(100);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let spec = pattern("p0", vec![10, 11, 12], 0.25, 0.0);

        let hosts = inject(&mut txns, &spec, &mut claims, &mut rng).unwrap();
        assert_eq!(hosts.len(), 25);
        for &host in &hosts {
            assert!(txns[host].contains_all(&[10, 11, 12]));
        }
        assert_eq!(claims.free_count(), 75);
    }

    #[test]
    fn test_hosts_are_distinct_and_sorted() {
        let mut txns = blank_transactions(50);
        let mut claims = HostClaims::new(50);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let spec = pattern("p0", vec![1, 2], 0.5, 0.0);

        let hosts = inject(&mut txns, &spec, &mut claims, &mut rng).unwrap();
        for pair in hosts.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_injection_is_idempotent_union() {
        let mut txns = vec![Transaction::from_items([1, 2, 3]); 10];
        let mut claims = HostClaims::new(10);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let spec = pattern("p0", vec![2, 3, 4], 1.0, 0.0);

        inject(&mut txns, &spec, &mut claims, &mut rng).unwrap();
        for txn in &txns {
            let items: Vec<u32> = txn.iter().collect();
            assert_eq!(items, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_later_pattern_avoids_claimed_hosts() {
        let mut txns = blank_transactions(100);
        let mut claims = HostClaims::new(100);
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let first = inject(
            &mut txns,
            &pattern("a", vec![1, 2], 0.6, 0.0),
            &mut claims,
            &mut rng,
        )
        .unwrap();
        let second = inject(
            &mut txns,
            &pattern("b", vec![3, 4], 0.4, 0.0),
            &mut claims,
            &mut rng,
        )
        .unwrap();

        assert_eq!(first.len(), 60);
        assert_eq!(second.len(), 40);
        assert!(first.iter().all(|h| !second.contains(h)));
        assert_eq!(claims.free_count(), 0);
    }

    #[test]
    fn test_exhausted_pool_is_a_conflict() {
        let mut txns = blank_transactions(100);
        let mut claims = HostClaims::new(100);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        inject(
            &mut txns,
            &pattern("a", vec![1, 2], 0.9, 0.0),
            &mut claims,
            &mut rng,
        )
        .unwrap();
        let err = inject(
            &mut txns,
            &pattern("b", vec![3, 4], 0.2, 0.0),
            &mut claims,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InjectionConflict(_)));
    }

    #[test]
    fn test_noise_omits_items_per_host() {
        let mut txns: Vec<Transaction> =
            (0..2000).map(|_| Transaction::from_items([99])).collect();
        let mut claims = HostClaims::new(2000);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let spec = pattern("p0", vec![0, 1, 2], 1.0, 0.3);

        let hosts = inject(&mut txns, &spec, &mut claims, &mut rng).unwrap();
        let intact = hosts
            .iter()
            .filter(|&&h| txns[h].contains_all(&[0, 1, 2]))
            .count();
        let fraction = intact as f64 / hosts.len() as f64;
        let expected = 0.7f64.powi(3);
        // 2000 hosts keep the binomial fraction well inside this band.
        assert!(
            (fraction - expected).abs() < 0.05,
            "intact fraction {fraction}, expected ~{expected}"
        );
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let run = |seed: u64| {
            let mut txns = blank_transactions(200);
            let mut claims = HostClaims::new(200);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            inject(
                &mut txns,
                &pattern("p0", vec![5, 6], 0.3, 0.2),
                &mut claims,
                &mut rng,
            )
            .unwrap()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }
}
