//! Left join of macro observations onto enriched price rows.
//!
//! Every price row is kept. Recognized macro fields carry the latest
//! non-missing observation dated on or before the row (no backward fill);
//! extra macro columns only attach on an exact date match.

use crate::domain::engine::EnrichedRow;
use crate::domain::error::StocksvizError;
use crate::domain::macro_data::{MacroField, MacroRecord, MacroValues};
use crate::domain::table::PreparedRow;
use std::collections::BTreeMap;

/// `None` stands for an absent input and is an error; an empty slice is not.
pub fn merge(
    enriched: Option<&[EnrichedRow]>,
    macro_rows: Option<&[MacroRecord]>,
) -> Result<Vec<PreparedRow>, StocksvizError> {
    let enriched = enriched.ok_or_else(|| StocksvizError::DataUnavailable {
        what: "price series is absent".into(),
    })?;
    let macro_rows = macro_rows.ok_or_else(|| StocksvizError::DataUnavailable {
        what: "macro series is absent".into(),
    })?;

    let mut observations: Vec<&MacroRecord> = macro_rows.iter().collect();
    // stable: among equal dates the later source row is applied last and wins
    observations.sort_by_key(|m| m.date);

    let mut rows: Vec<&EnrichedRow> = enriched.iter().collect();
    rows.sort_by_key(|r| r.price.date);

    let mut latest = MacroValues::default();
    let mut next = 0;
    let mut merged = Vec::with_capacity(rows.len());

    for row in rows {
        let date = row.price.date;
        let mut extra = BTreeMap::new();

        while next < observations.len() && observations[next].date <= date {
            let obs = observations[next];
            for field in MacroField::ALL {
                if let Some(v) = obs.values.get(field) {
                    latest.set(field, Some(v));
                }
            }
            if obs.date == date {
                extra.extend(obs.extra.iter().map(|(k, v)| (k.clone(), *v)));
            }
            next += 1;
        }

        // an exact match may have been consumed by an earlier row with the same date
        if extra.is_empty() {
            for obs in observations[..next].iter().rev().take_while(|o| o.date == date) {
                for (k, v) in &obs.extra {
                    extra.entry(k.clone()).or_insert(*v);
                }
            }
        }

        merged.push(PreparedRow {
            enriched: row.clone(),
            macro_values: latest,
            macro_extra: extra,
        });
    }

    Ok(merged)
}
