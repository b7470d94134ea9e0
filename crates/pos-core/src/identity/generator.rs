use chrono::Utc;
use rand::Rng;

/// `"{common_id}-{unix millis}-{3 random digits}"`.
///
/// Not checked against the registry and not collision-free: two calls in the
/// same millisecond can draw the same suffix. Saving runs validation, which
/// catches the duplicate.
pub fn generate_unique_id(common_id: &str) -> String {
    generate_unique_id_at(common_id, Utc::now().timestamp_millis(), &mut rand::thread_rng())
}

pub fn generate_unique_id_at<R: Rng>(common_id: &str, millis: i64, rng: &mut R) -> String {
    let suffix: u16 = rng.gen_range(0..1000);
    format!("{common_id}-{millis}-{suffix:03}")
}

/// Next sequential Unique ID for `common_id`, e.g. `CAM-1001-0004` after
/// `CAM-1001-0003`. Ids whose last segment is not a number are ignored.
pub fn generate_incremental_unique_id<I, S>(common_id: &str, existing_ids: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let prefix = format!("{common_id}-");
    let max = existing_ids
        .into_iter()
        .filter_map(|id| {
            let id = id.as_ref();
            let rest = id.strip_prefix(&prefix)?;
            rest.rsplit('-').next()?.parse::<u64>().ok()
        })
        .max()
        .unwrap_or(0);
    format!("{common_id}-{:04}", max + 1)
}

pub fn format_common_id(id: &str) -> String {
    id.trim().to_uppercase()
}

pub fn format_unique_id(id: &str) -> String {
    id.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_incremental_takes_max_plus_one() {
        let next = generate_incremental_unique_id("CAM-1001", ["CAM-1001-0001", "CAM-1001-0003"]);
        assert_eq!(next, "CAM-1001-0004");
    }

    #[test]
    fn test_incremental_starts_at_one() {
        let none: [&str; 0] = [];
        assert_eq!(generate_incremental_unique_id("LAP-7", none), "LAP-7-0001");
    }

    #[test]
    fn test_incremental_skips_foreign_and_non_numeric_ids() {
        let ids = vec![
            "CAM-1001-0002".to_string(),
            "CAM-1001-SPARE".to_string(),
            "CAM-2002-0099".to_string(),
            "CAM-10010-0050".to_string(),
        ];
        assert_eq!(generate_incremental_unique_id("CAM-1001", &ids), "CAM-1001-0003");
    }

    #[test]
    fn test_incremental_grows_past_four_digits() {
        assert_eq!(
            generate_incremental_unique_id("CAM", ["CAM-9999"]),
            "CAM-10000"
        );
    }

    #[test]
    fn test_timestamped_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_unique_id_at("CAM-1001", 1_736_899_200_000, &mut rng);

        let parts: Vec<&str> = id.rsplitn(3, '-').collect();
        assert_eq!(parts[2], "CAM-1001");
        assert_eq!(parts[1], "1736899200000");
        assert_eq!(parts[0].len(), 3);
        assert!(parts[0].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_format_normalizes() {
        assert_eq!(format_common_id("  cam-1001 "), "CAM-1001");
        assert_eq!(format_unique_id("cam-1001-0001"), "CAM-1001-0001");
    }
}
