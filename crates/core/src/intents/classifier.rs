//! Closed keyword classifier for shopper utterances. An ordered list of
//! (keywords, intent) predicates; the first hit wins, everything else is
//! `General`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    FormalWear,
    CasualWear,
    EthnicWear,
    ShowMore,
    Cart,
    Help,
    General,
}

impl Intent {
    pub fn is_wear_type(&self) -> bool {
        matches!(self, Self::FormalWear | Self::CasualWear | Self::EthnicWear)
    }
}

const RULES: &[(&[&str], Intent)] = &[
    (&["formal", "office", "work"], Intent::FormalWear),
    (&["casual", "weekend"], Intent::CasualWear),
    (&["ethnic", "traditional", "indian"], Intent::EthnicWear),
    (&["more", "other", "different"], Intent::ShowMore),
    (&["cart", "checkout"], Intent::Cart),
    (&["help", "what can"], Intent::Help),
];

pub fn classify(text: &str) -> Intent {
    let text = text.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::General)
}

#[cfg(test)]
mod tests {
    use super::{classify, Intent};

    #[test]
    fn keywords_route_to_their_intent() {
        assert_eq!(classify("Show me formal wear"), Intent::FormalWear);
        assert_eq!(classify("something for the OFFICE"), Intent::FormalWear);
        assert_eq!(classify("casual outfits please"), Intent::CasualWear);
        assert_eq!(classify("traditional looks"), Intent::EthnicWear);
        assert_eq!(classify("show me other options"), Intent::ShowMore);
        assert_eq!(classify("take me to my cart"), Intent::Cart);
        assert_eq!(classify("what can you do"), Intent::Help);
        assert_eq!(classify("hello there"), Intent::General);
    }

    #[test]
    fn earlier_rules_win_on_overlap() {
        // "work" beats "more" because wear-type rules come first.
        assert_eq!(classify("more options for work"), Intent::FormalWear);
    }
}
