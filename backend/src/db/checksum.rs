//! Content checksum used to deduplicate stored datasets.

use sha2::{Digest, Sha256};

use crate::models::Dataset;

const FIELD_SEP: &[u8] = &[0x1f];

/// SHA-256 over every row field, in row order, as a hex string.
pub fn dataset_checksum(dataset: &Dataset) -> String {
    let mut hasher = Sha256::new();
    for row in dataset.rows() {
        for text in [
            &row.location_site,
            &row.location_district,
            &row.location_region,
            &row.sensor_id,
            &row.pollutant_id,
            &row.pollutant_units,
        ] {
            hasher.update(text.as_bytes());
            hasher.update(FIELD_SEP);
        }
        hasher.update(row.value.to_bits().to_le_bytes());
        hasher.update(row.time_from.timestamp_micros().to_le_bytes());
        hasher.update(row.time_to.timestamp_micros().to_le_bytes());
        for coord in [row.latitude, row.longitude] {
            match coord {
                Some(v) => hasher.update(v.to_bits().to_le_bytes()),
                None => hasher.update(FIELD_SEP),
            }
        }
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dataset, row};

    #[test]
    fn test_checksum_consistency() {
        let a = dataset(vec![row("a", "no2", 1.0, "2023-01-01")]);
        let b = dataset(vec![row("a", "no2", 1.0, "2023-01-01")]);
        assert_eq!(dataset_checksum(&a), dataset_checksum(&b));
        assert_eq!(dataset_checksum(&a).len(), 64);
    }

    #[test]
    fn test_different_content_different_checksum() {
        let a = dataset(vec![row("a", "no2", 1.0, "2023-01-01")]);
        let b = dataset(vec![row("a", "no2", 1.5, "2023-01-01")]);
        assert_ne!(dataset_checksum(&a), dataset_checksum(&b));
    }

    #[test]
    fn test_field_boundaries_matter() {
        let mut shifted = row("ab", "no2", 1.0, "2023-01-01");
        shifted.location_district = "c".into();
        let mut original = row("a", "no2", 1.0, "2023-01-01");
        original.location_district = "bc".into();
        assert_ne!(
            dataset_checksum(&dataset(vec![shifted])),
            dataset_checksum(&dataset(vec![original]))
        );
    }
}
