//! Truncation selection.
//!
//! After mutants are appended, the population holds `P + k` members. The
//! `k` worst are removed; survivors keep their relative order.

use super::types::Member;

/// Indices of the `k` highest (worst) fitness values.
///
/// Ties are broken toward later indices, so an appended mutant is dropped
/// before an equally bad existing member. The result is sorted ascending.
pub fn worst_indices(fitness: &[u32], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_unstable_by(|&a, &b| fitness[b].cmp(&fitness[a]).then(b.cmp(&a)));
    order.truncate(k);
    order.sort_unstable();
    order
}

/// Removes the `k` worst members in place.
pub fn truncate(population: &mut Vec<Member>, k: usize) {
    let fitness: Vec<u32> = population.iter().map(|m| m.fitness).collect();
    let mut doomed = vec![false; population.len()];
    for i in worst_indices(&fitness, k) {
        doomed[i] = true;
    }
    let mut slot = 0;
    population.retain(|_| {
        let keep = !doomed[slot];
        slot += 1;
        keep
    });
}
