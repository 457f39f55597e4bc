use serde::{Deserialize, Serialize};

/// Risk category derived from a total survey score.
///
/// | score   | tier         |
/// |---------|--------------|
/// | 0–19    | LowRisk      |
/// | 20–39   | ModerateRisk |
/// | 40–59   | HighRisk     |
/// | 60+     | VeryHighRisk |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    LowRisk,
    ModerateRisk,
    HighRisk,
    VeryHighRisk,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [
        RiskTier::LowRisk,
        RiskTier::ModerateRisk,
        RiskTier::HighRisk,
        RiskTier::VeryHighRisk,
    ];

    pub fn from_score(score: u32) -> Self {
        match score {
            0..=19 => RiskTier::LowRisk,
            20..=39 => RiskTier::ModerateRisk,
            40..=59 => RiskTier::HighRisk,
            _ => RiskTier::VeryHighRisk,
        }
    }

    /// Inclusive score range of the tier. The top tier has no upper bound.
    pub fn bounds(&self) -> (u32, Option<u32>) {
        match self {
            RiskTier::LowRisk => (0, Some(19)),
            RiskTier::ModerateRisk => (20, Some(39)),
            RiskTier::HighRisk => (40, Some(59)),
            RiskTier::VeryHighRisk => (60, None),
        }
    }
}

/// Guidance shown for a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierContent {
    pub tier: RiskTier,
    pub label: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TierCatalog {
    pub tiers: Vec<TierContent>,
}

impl TierCatalog {
    pub fn content(&self, tier: RiskTier) -> Option<&TierContent> {
        self.tiers.iter().find(|content| content.tier == tier)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::TIERS;

    #[test]
    fn test_from_score() {
        assert_eq!(RiskTier::from_score(0), RiskTier::LowRisk);
        assert_eq!(RiskTier::from_score(19), RiskTier::LowRisk);
        assert_eq!(RiskTier::from_score(20), RiskTier::ModerateRisk);
        assert_eq!(RiskTier::from_score(39), RiskTier::ModerateRisk);
        assert_eq!(RiskTier::from_score(40), RiskTier::HighRisk);
        assert_eq!(RiskTier::from_score(59), RiskTier::HighRisk);
        assert_eq!(RiskTier::from_score(60), RiskTier::VeryHighRisk);
        assert_eq!(RiskTier::from_score(80), RiskTier::VeryHighRisk);
        assert_eq!(RiskTier::from_score(u32::MAX), RiskTier::VeryHighRisk);
    }

    #[test]
    fn test_bounds_agree_with_from_score() {
        for tier in RiskTier::ALL {
            let (low, high) = tier.bounds();
            assert_eq!(RiskTier::from_score(low), tier);
            if let Some(high) = high {
                assert_eq!(RiskTier::from_score(high), tier);
                assert_ne!(RiskTier::from_score(high + 1), tier);
            }
        }
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(RiskTier::LowRisk < RiskTier::ModerateRisk);
        assert!(RiskTier::ModerateRisk < RiskTier::HighRisk);
        assert!(RiskTier::HighRisk < RiskTier::VeryHighRisk);
    }

    #[test]
    fn test_catalog_covers_every_tier_once() {
        assert_eq!(TIERS.tiers.len(), 4);
        for tier in RiskTier::ALL {
            let content = TIERS.content(tier).unwrap();
            assert!(!content.recommendations.is_empty());
            assert_eq!(
                TIERS.tiers.iter().filter(|c| c.tier == tier).count(),
                1
            );
        }
    }

    #[test]
    fn test_content() {
        let low = TIERS.content(RiskTier::LowRisk).unwrap();
        assert_eq!(low.label, "Low Risk");
        assert_eq!(low.icon, "🟢");
        assert_eq!(low.title, "Great habits!");
        assert_eq!(low.recommendations.len(), 5);
        assert!(low.footer.is_some());

        let moderate = TIERS.content(RiskTier::ModerateRisk).unwrap();
        assert_eq!(moderate.label, "Moderate Risk");
        assert_eq!(moderate.recommendations.len(), 7);
        assert!(moderate.footer.is_none());

        let high = TIERS.content(RiskTier::HighRisk).unwrap();
        assert_eq!(high.icon, "🟠");
        assert_eq!(high.recommendations.len(), 7);

        let very_high = TIERS.content(RiskTier::VeryHighRisk).unwrap();
        assert_eq!(very_high.label, "Very High Risk");
        assert_eq!(
            very_high.recommendations.first().map(String::as_str),
            Some("Consult a dermatologist immediately for a full-body skin examination")
        );
        assert_eq!(
            very_high.footer.as_deref(),
            Some("Early detection can save lives—don't delay.")
        );
    }
}
