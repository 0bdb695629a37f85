//! Name-based shopper segmentation and the image-path catalog filter it
//! drives. Both are best-effort heuristics: a product without the expected
//! path fragment is excluded even when it would otherwise fit.

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Male,
    Female,
    Unknown,
}

const FEMALE_NAMES: &[&str] =
    &["priya", "priyanka", "sneha", "kavya", "ananya", "meera", "divya", "neha", "shreya"];
const MALE_NAMES: &[&str] =
    &["aarav", "rohan", "rahul", "arjun", "vikram", "aditya", "siddharth", "karan"];

/// Case-insensitive substring match of the shopper's name against two fixed
/// first-name lists.
pub fn infer_segment(name: &str) -> Segment {
    let name = name.to_lowercase();
    if FEMALE_NAMES.iter().any(|candidate| name.contains(candidate)) {
        Segment::Female
    } else if MALE_NAMES.iter().any(|candidate| name.contains(candidate)) {
        Segment::Male
    } else {
        Segment::Unknown
    }
}

pub fn matches_segment(product: &Product, segment: Segment) -> bool {
    let image = product.image_url.as_deref().unwrap_or("");
    match segment {
        Segment::Unknown => true,
        Segment::Male => image.contains("/men/"),
        Segment::Female => image.contains("/women/"),
    }
}

/// All products for `Unknown`; otherwise only products whose image path
/// carries the segment fragment.
pub fn filter_by_segment(products: &[Product], segment: Segment) -> Vec<Product> {
    products.iter().filter(|product| matches_segment(product, segment)).cloned().collect()
}
