//! Retention recommendations keyed only by risk tier.

use crate::risk::RiskTier;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Action {
    pub title: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FollowUp {
    pub when: &'static str,
    pub steps: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RetentionPlaybook {
    pub tier: RiskTier,
    pub headline: &'static str,
    pub actions: &'static [Action],
    pub follow_up: &'static [FollowUp],
}

/// Shared by every tier.
pub const BEST_PRACTICES: &[Action] = &[
    Action { title: "Early warning system", detail: "Monitor usage patterns and engagement metrics" },
    Action { title: "Personalization", detail: "Tailor communications to customer needs" },
    Action { title: "Value demonstration", detail: "Regularly show ROI of your service" },
    Action { title: "Multi-channel engagement", detail: "Combine email, phone, and in-app messaging" },
    Action { title: "Continuous improvement", detail: "Gather feedback and iterate on retention strategies" },
];

static HIGH: RetentionPlaybook = RetentionPlaybook {
    tier: RiskTier::High,
    headline: "High Risk Customer - Immediate Action Required",
    actions: &[
        Action { title: "Personalized outreach", detail: "Account manager contact within 24 hours" },
        Action { title: "Special offer", detail: "20% discount for 6 months with 1-year contract" },
        Action { title: "Service review", detail: "Identify and resolve any service issues" },
        Action { title: "Loyalty bonus", detail: "$50 account credit for continued business" },
        Action { title: "Priority support", detail: "Assign dedicated support representative" },
    ],
    follow_up: &[
        FollowUp { when: "Day 1", steps: &["Outreach call", "Special offer email"] },
        FollowUp { when: "Day 3", steps: &["Follow-up call", "Customer satisfaction survey"] },
        FollowUp { when: "Day 7", steps: &["Contract review meeting", "Service optimization"] },
        FollowUp { when: "Day 14", steps: &["Retention offer decision", "Loyalty program enrollment"] },
    ],
};

static MEDIUM: RetentionPlaybook = RetentionPlaybook {
    tier: RiskTier::Medium,
    headline: "Medium Risk Customer - Proactive Measures",
    actions: &[
        Action { title: "Engagement campaign", detail: "Add to email nurture sequence" },
        Action { title: "Value-added offer", detail: "Free premium feature for 3 months" },
        Action { title: "Satisfaction survey", detail: "Identify potential issues" },
        Action { title: "Contract incentive", detail: "10% discount for upgrading to annual contract" },
        Action { title: "Usage tips", detail: "Help customer get more value from service" },
    ],
    follow_up: &[
        FollowUp { when: "Week 1", steps: &["Send educational content about underused features"] },
        FollowUp { when: "Week 2", steps: &["Offer free consultation with product expert"] },
        FollowUp { when: "Week 3", steps: &["Send personalized usage report with recommendations"] },
        FollowUp { when: "Week 4", steps: &["Make retention offer based on engagement"] },
    ],
};

static LOW: RetentionPlaybook = RetentionPlaybook {
    tier: RiskTier::Low,
    headline: "Low Risk Customer - Maintain Engagement",
    actions: &[
        Action { title: "Regular check-ins", detail: "Quarterly business reviews" },
        Action { title: "Loyalty rewards", detail: "Recognize continued business" },
        Action { title: "Referral program", detail: "Encourage customer referrals" },
        Action { title: "Product education", detail: "Advanced feature webinars" },
        Action { title: "Community building", detail: "Invite to customer advisory board" },
    ],
    follow_up: &[FollowUp {
        when: "Growth opportunities",
        steps: &[
            "Upselling additional products/services",
            "Cross-selling complementary solutions",
            "Referrals to similar businesses",
            "Case study development",
        ],
    }],
};

pub fn playbook(tier: RiskTier) -> &'static RetentionPlaybook {
    match tier {
        RiskTier::High => &HIGH,
        RiskTier::Medium => &MEDIUM,
        RiskTier::Low => &LOW,
    }
}
