//! Group processing: extraction, resolution and scoring for each group.
//!
//! Groups are independent, so they are processed in parallel. Within a
//! group, the place lookups fan out in parallel as well and are joined
//! before scoring.

use indicatif::ProgressBar;
use log::debug;
use rayon::prelude::*;

use crate::extraction::{PlaceExtractor, PlaceSet};
use crate::models::GroupResult;
use crate::resolver::CountryResolver;
use crate::scoring::{TieBreak, aggregate};
use crate::source::AddressGroup;

/// Everything needed to turn address groups into group results.
#[derive(Debug, Clone)]
pub struct Pipeline {
    extractor: PlaceExtractor,
    resolver: CountryResolver,
    tie_break: TieBreak,
}

impl Pipeline {
    pub fn new(extractor: PlaceExtractor, resolver: CountryResolver, tie_break: TieBreak) -> Self {
        Self {
            extractor,
            resolver,
            tie_break,
        }
    }

    pub fn extractor(&self) -> &PlaceExtractor {
        &self.extractor
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Process one group. Never fails: addresses without places and places
    /// without countries simply contribute nothing.
    pub fn process_group(&self, group: &AddressGroup) -> GroupResult {
        let mut places = PlaceSet::new();
        for address in &group.addresses {
            places.extend(self.extractor.extract(address));
        }

        let place_countries = self.resolver.resolve_all(&places);
        let aggregation = aggregate(&place_countries, self.tie_break);
        debug!(
            "group {}: {} places, scores {:?}, countries {:?}",
            group.id,
            places.len(),
            aggregation.scores,
            aggregation.countries
        );

        GroupResult {
            group_id: group.id.clone(),
            addresses: group.addresses.clone(),
            places: places.into_vec(),
            country_map: aggregation.place_to_country,
            countries: aggregation.countries,
            lookup_errors: place_countries.errors().to_vec(),
        }
    }

    /// Process all groups in parallel.
    ///
    /// `on_complete` is called from worker threads as each group finishes,
    /// in completion order. The returned results are in input order.
    pub fn process<F>(
        &self,
        groups: &[AddressGroup],
        progress_bar: &ProgressBar,
        on_complete: F,
    ) -> Vec<GroupResult>
    where
        F: Fn(&GroupResult) + Sync,
    {
        groups
            .par_iter()
            .map(|group| {
                let result = self.process_group(group);
                on_complete(&result);
                progress_bar.inc(1);
                result
            })
            .collect()
    }
}
