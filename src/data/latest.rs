//! Latest price per asset
//!
//! Equivalent to `ROW_NUMBER() OVER (PARTITION BY asset ORDER BY timestamp DESC) = 1`.
//! Timestamps are compared as strings, so producers must write a sortable
//! format (see [`crate::core::TIMESTAMP_FORMAT`]). When two records of an
//! asset share the greatest timestamp, which price wins is unspecified.

use std::collections::HashMap;

use crate::core::{PriceRecord, PriceSnapshot};

/// One price per asset: the one carrying the maximum timestamp.
pub fn latest<'a, I>(records: I) -> PriceSnapshot
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    let mut newest: HashMap<&str, &PriceRecord> = HashMap::new();

    for record in records {
        newest
            .entry(record.asset.as_str())
            .and_modify(|current| {
                if record.timestamp > current.timestamp {
                    *current = record;
                }
            })
            .or_insert(record);
    }

    newest
        .into_iter()
        .map(|(asset, record)| (asset, record.price))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_records(rng: &mut StdRng, n: usize, asset: &str) -> Vec<PriceRecord> {
        let base = Utc.with_ymd_and_hms(2023, 9, 1, 12, 0, 0).unwrap();
        (0..n)
            .map(|_| {
                let time = base - Duration::minutes(rng.gen_range(0..1440));
                PriceRecord::at(time, asset, rng.gen_range(1..200) as f64)
            })
            .collect()
    }

    #[test]
    fn test_latest_for_single_asset() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let records = random_records(&mut rng, 10, "BRN");
            let max_ts = records.iter().map(|r| r.timestamp.clone()).max().unwrap();

            let snapshot = latest(&records);
            let price = snapshot.get("BRN").unwrap();
            assert_eq!(snapshot.len(), 1);
            // equal timestamps may pick either record
            assert!(records
                .iter()
                .any(|r| r.timestamp == max_ts && r.price == price));
        }
    }

    #[test]
    fn test_one_entry_per_asset() {
        let mut rng = StdRng::seed_from_u64(42);
        let assets: Vec<String> = (0..25)
            .map(|_| (0..8).map(|_| rng.gen_range(b'a'..=b'z') as char).collect())
            .collect();

        let mut records = Vec::new();
        for asset in &assets {
            let n = rng.gen_range(1..6);
            records.extend(random_records(&mut rng, n, asset));
        }

        let snapshot = latest(&records);
        let mut distinct = assets.clone();
        distinct.sort();
        distinct.dedup();

        assert_eq!(snapshot.len(), distinct.len());
        for asset in &distinct {
            assert!(snapshot.contains(asset));
        }
    }

    #[test]
    fn test_order_of_input_is_irrelevant() {
        let records = vec![
            PriceRecord::new("2023-09-01 10:00:00", "HH", 9.0),
            PriceRecord::new("2023-09-01 12:00:00", "HH", 9.5),
            PriceRecord::new("2023-09-01 11:00:00", "HH", 8.0),
            PriceRecord::new("2023-09-01 09:00:00", "BRN", 101.0),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        assert_eq!(latest(&records), latest(&reversed));
        assert_eq!(latest(&records).get("HH"), Some(9.5));
        assert_eq!(latest(&records).get("BRN"), Some(101.0));
    }

    #[test]
    fn test_empty_history() {
        assert!(latest(&Vec::new()).is_empty());
    }
}
