//! Static brand affinity table: brands grouped into collaborative clusters
//! for cross-brand suggestions.

const YOUTH_CASUAL: &[&str] = &["Bewakoof", "The Souled Store", "Flying Machine"];
const PROFESSIONAL: &[&str] = &["Louis Philippe", "Van Heusen", "Allen Solly"];
const PREMIUM: &[&str] = &["Pantaloons", "Forever 21", "Allen Solly"];
const DEFAULT_CLUSTER: &[&str] = &["Bewakoof", "Van Heusen", "Allen Solly"];

const CLUSTERS: &[(&str, &[&str])] = &[
    ("Bewakoof", YOUTH_CASUAL),
    ("The Souled Store", YOUTH_CASUAL),
    ("Flying Machine", YOUTH_CASUAL),
    ("Louis Philippe", PROFESSIONAL),
    ("Van Heusen", PROFESSIONAL),
    ("Allen Solly", PROFESSIONAL),
    ("Pantaloons", PREMIUM),
    ("Forever 21", PREMIUM),
];

/// Cluster containing `brand`. Matched by exact name, then by first word,
/// falling back to the default cluster for unknown brands.
pub fn collaborative_brands(brand: &str) -> &'static [&'static str] {
    let trimmed = brand.trim();
    lookup(trimmed)
        .or_else(|| trimmed.split_whitespace().next().and_then(lookup))
        .unwrap_or(DEFAULT_CLUSTER)
}

fn lookup(name: &str) -> Option<&'static [&'static str]> {
    CLUSTERS
        .iter()
        .find(|(brand, _)| brand.eq_ignore_ascii_case(name))
        .map(|(_, cluster)| *cluster)
}

#[cfg(test)]
mod tests {
    use super::collaborative_brands;

    #[test]
    fn known_brands_map_to_their_cluster() {
        assert!(collaborative_brands("Louis Philippe").contains(&"Van Heusen"));
        assert!(collaborative_brands("Bewakoof").contains(&"The Souled Store"));
        assert!(collaborative_brands("Forever 21").contains(&"Pantaloons"));
    }

    #[test]
    fn first_word_match_recovers_sub_brands() {
        // "Pantaloons Women" is unknown as-is; the first word resolves it.
        assert!(collaborative_brands("Pantaloons Women").contains(&"Forever 21"));
    }

    #[test]
    fn unknown_brand_falls_back_to_default_cluster() {
        let cluster = collaborative_brands("Zudio");
        assert!(cluster.contains(&"Van Heusen"));
        assert!(cluster.contains(&"Bewakoof"));
    }
}
