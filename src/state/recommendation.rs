//! Rule table that turns the three wizard answers into a recommendation

/// Result shown on the wizard's results screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub headline: String,
    pub highlights: Vec<String>,
    pub next_step: String,
}

/// Fixed copy around the computed recommendation
pub const RESULTS_INTRO: &str =
    "Based on your responses, here's why Rabuste Coffee is an excellent fit:";
pub const RESULTS_CLOSING: &str = "Complete our franchise application below, and our development team will contact you within 2 business days to discuss your opportunity in detail.";

const DEFAULT_NEXT_STEP: &str =
    "We'll schedule a discovery call to discuss your specific situation and goals.";

/// What one answer dimension adds to the recommendation
struct Contribution {
    headline: Option<&'static str>,
    highlight: &'static str,
    next_step: Option<&'static str>,
}

fn experience(token: Option<&str>) -> Contribution {
    let (headline, highlight) = match token {
        Some("extensive") => (
            "Excellent! Your extensive experience makes you an ideal franchise candidate.",
            "Your F&B background aligns perfectly with our business model",
        ),
        Some("some") => (
            "Great! Your industry experience combined with our support creates a winning combination.",
            "Your existing knowledge will accelerate your success",
        ),
        _ => (
            "Perfect! Many of our most successful franchisees started with fresh perspectives.",
            "Our comprehensive training program sets you up for success",
        ),
    };
    Contribution {
        headline: Some(headline),
        highlight,
        next_step: None,
    }
}

fn investment(token: Option<&str>) -> Contribution {
    let (highlight, next_step) = match token {
        Some("75-100k") => (
            "Your investment range opens opportunities in emerging markets",
            "We'll focus on locations with strong growth potential and lower entry costs.",
        ),
        Some("100-150k") => (
            "Your investment capacity fits our standard franchise model perfectly",
            "We can explore prime locations with established foot traffic.",
        ),
        Some("150k+") => (
            "Your investment capacity opens premium location opportunities",
            "We'll discuss flagship locations and multi-unit development options.",
        ),
        _ => (
            "We'll work together to find the investment level that matches your goals",
            "Our team will present options across different investment ranges.",
        ),
    };
    Contribution {
        headline: None,
        highlight,
        next_step: Some(next_step),
    }
}

fn involvement(token: Option<&str>) -> Contribution {
    let (highlight, next_step) = match token {
        Some("hands-on") => (
            "Your hands-on approach maximizes the community-building aspect of Rabuste Coffee",
            "We'll focus on operational training and community engagement strategies.",
        ),
        Some("semi-passive") => (
            "Our management support systems accommodate your preferred level of involvement",
            "We'll discuss hybrid management models and oversight systems.",
        ),
        _ => (
            "Our turnkey operations and management partnerships support passive ownership",
            "We'll explore management partnership options and ROI projections.",
        ),
    };
    Contribution {
        headline: None,
        highlight,
        next_step: Some(next_step),
    }
}

/// Derive a recommendation from (experience, investment, involvement).
///
/// Unknown or missing tokens fall back to each dimension's default entry.
/// The first dimension that offers a next step keeps the slot.
pub fn recommend(
    experience_token: Option<&str>,
    investment_token: Option<&str>,
    involvement_token: Option<&str>,
) -> Recommendation {
    let contributions = [
        experience(experience_token),
        investment(investment_token),
        involvement(involvement_token),
    ];

    let mut headline = None;
    let mut next_step = None;
    let mut highlights = Vec::with_capacity(contributions.len());

    for contribution in contributions {
        headline = headline.or(contribution.headline);
        next_step = next_step.or(contribution.next_step);
        highlights.push(contribution.highlight.to_string());
    }

    Recommendation {
        headline: headline.unwrap_or_default().to_string(),
        highlights,
        next_step: next_step.unwrap_or(DEFAULT_NEXT_STEP).to_string(),
    }
}
