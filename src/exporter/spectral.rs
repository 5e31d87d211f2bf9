use std::collections::BTreeMap;

use log::warn;

use crate::schema::columns;

use super::row::Row;

/// Fill `em_min`, `em_max` and `em_filter_name` for a data ID with a band.
///
/// The filter label (`physical_filter`) is looked up first, then the band
/// name. Ranges are in meters.
pub fn spectral_to_columns(
    spectral_ranges: &BTreeMap<String, (f64, f64)>,
    band: &str,
    filter: Option<&str>,
    row: &mut Row,
) {
    let range = filter
        .and_then(|label| spectral_ranges.get(label))
        .or_else(|| spectral_ranges.get(band));

    match range {
        Some(&(em_min, em_max)) => {
            row.set(columns::EM_MIN, em_min);
            row.set(columns::EM_MAX, em_max);
        }
        None => match filter {
            Some(label) => warn!(
                "Spectral range not defined for filter {:?} or band {:?}",
                label, band
            ),
            None => warn!("Spectral range not defined for band {:?}", band),
        },
    }

    row.set(columns::EM_FILTER_NAME, band);
}
