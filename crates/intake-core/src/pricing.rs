//! Tier pricing for both wizard modes.

use crate::wizard::{Tier, WizardMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierOffer {
    pub tier: Tier,
    pub price: &'static str,
    pub features: &'static [&'static str],
}

const AUDIT_OFFERS: [TierOffer; 4] = [
    TierOffer {
        tier: Tier::Starter,
        price: "$199",
        features: &["One-time audit report", "10 fixes prioritized", "Quick wins list"],
    },
    TierOffer {
        tier: Tier::Growth,
        price: "$499",
        features: &["Full audit + roadmap", "Rank-tracking setup", "On-page fixes"],
    },
    TierOffer {
        tier: Tier::Pro,
        price: "$999",
        features: &[
            "Everything in Growth",
            "Technical crawl & schema",
            "Content plan (3 mo)",
        ],
    },
    TierOffer {
        tier: Tier::Enterprise,
        price: "Custom",
        features: &["Multi-location", "Dedicated strategist", "Custom integrations"],
    },
];

const SUBSCRIPTION_OFFERS: [TierOffer; 4] = [
    TierOffer {
        tier: Tier::Starter,
        price: "$299/mo",
        features: &["Implement audit fixes", "Basic monthly report", "Rank monitoring"],
    },
    TierOffer {
        tier: Tier::Growth,
        price: "$799/mo",
        features: &[
            "Content optimization",
            "Competitor tracking",
            "Monthly strategy call",
        ],
    },
    TierOffer {
        tier: Tier::Pro,
        price: "$1,499/mo",
        features: &[
            "Technical monitoring",
            "Content production",
            "Bi-weekly strategy calls",
        ],
    },
    TierOffer {
        tier: Tier::Enterprise,
        price: "$3,000+/mo",
        features: &[
            "Dedicated strategist",
            "PR + backlink campaigns",
            "Weekly reporting",
        ],
    },
];

pub fn offers(mode: WizardMode) -> &'static [TierOffer] {
    match mode {
        WizardMode::Audit => &AUDIT_OFFERS,
        WizardMode::Subscription => &SUBSCRIPTION_OFFERS,
    }
}

pub fn offer(tier: Tier, mode: WizardMode) -> &'static TierOffer {
    // Both tables list every tier in `Tier::ALL` order.
    &offers(mode)[tier as usize]
}

pub fn plan_label(mode: WizardMode) -> &'static str {
    match mode {
        WizardMode::Audit => "One-time Audit",
        WizardMode::Subscription => "Subscription Plan",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_depends_on_mode() {
        assert_eq!(offer(Tier::Pro, WizardMode::Audit).price, "$999");
        assert_eq!(offer(Tier::Pro, WizardMode::Subscription).price, "$1,499/mo");
        assert_eq!(offer(Tier::Enterprise, WizardMode::Audit).price, "Custom");
    }

    #[test]
    fn test_offer_tables_follow_tier_order() {
        for mode in [WizardMode::Audit, WizardMode::Subscription] {
            for tier in Tier::ALL {
                assert_eq!(offer(tier, mode).tier, tier);
            }
        }
    }

    #[test]
    fn test_plan_label() {
        assert_eq!(plan_label(WizardMode::Audit), "One-time Audit");
        assert_eq!(plan_label(WizardMode::Subscription), "Subscription Plan");
    }
}
