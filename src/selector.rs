use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};
use tracing::{debug, instrument};

use crate::{theme::QuotaTable, types::model::route::Place};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Never pick the same place twice across category passes
    pub dedup_across_categories: bool,
}

/// Places are the same when name and position both match; same-named
/// places elsewhere stay distinct.
fn identity(place: &Place) -> (&str, u64, u64) {
    (
        place.name.as_str(),
        place.latitude.to_bits(),
        place.longitude.to_bits(),
    )
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy {
            dedup_across_categories: true,
        }
    }
}

/// Draws up to the quota of each category, in table order. Categories match
/// case-insensitively and the draw within a category is random.
#[instrument(skip(candidates, rng), fields(candidates = candidates.len()))]
pub fn select<R: Rng + ?Sized>(
    candidates: &[Place],
    quotas: QuotaTable,
    policy: SelectionPolicy,
    rng: &mut R,
) -> Vec<Place> {
    let mut taken: HashSet<(&str, u64, u64)> = HashSet::new();
    let mut selected = Vec::new();
    for &(category, quota) in quotas {
        let mut matching: Vec<&Place> = candidates
            .iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .filter(|p| !policy.dedup_across_categories || !taken.contains(&identity(p)))
            .collect();
        matching.shuffle(rng);
        let mut drawn = 0;
        for place in matching {
            if drawn == quota {
                break;
            }
            if policy.dedup_across_categories && !taken.insert(identity(place)) {
                continue;
            }
            selected.push(place.clone());
            drawn += 1;
        }
        debug!(category, quota, drawn, "category drawn");
    }
    selected
}
