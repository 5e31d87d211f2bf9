use std::collections::HashMap;

use log::debug;

use crate::geometry::Region;
use crate::registry::{RegistryError, Repository};

/// Regions of all visits, keyed by instrument name and visit id.
///
/// Exposure-based datasets have no region of their own; they borrow the
/// region of the visit the exposure belongs to. The table is loaded with a
/// single repository query the first time it is needed and never changes
/// afterwards.
#[derive(Debug, Default)]
pub struct VisitRegionCache {
    regions: Option<HashMap<(String, i64), Region>>,
}

impl VisitRegionCache {
    /// Empty, not yet loaded cache
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the visit records have been loaded
    pub fn is_loaded(&self) -> bool {
        self.regions.is_some()
    }

    /// Region of a visit, loading all visit records on first use
    pub fn lookup<R: Repository + ?Sized>(
        &mut self,
        repository: &R,
        instrument: &str,
        visit: i64,
    ) -> Result<Option<Region>, RegistryError> {
        if self.regions.is_none() {
            self.regions = Some(Self::load(repository)?);
        }
        let key = (instrument.to_string(), visit);
        Ok(self
            .regions
            .as_ref()
            .and_then(|regions| regions.get(&key))
            .cloned())
    }

    fn load<R: Repository + ?Sized>(
        repository: &R,
    ) -> Result<HashMap<(String, i64), Region>, RegistryError> {
        let regions: HashMap<_, _> = repository
            .query_visits()?
            .into_iter()
            .filter_map(|visit| {
                let region = visit.region?;
                Some(((visit.instrument, visit.id), region))
            })
            .collect();
        debug!("Loaded regions of {} visits", regions.len());
        Ok(regions)
    }
}
