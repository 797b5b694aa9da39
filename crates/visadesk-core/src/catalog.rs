#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub name: &'static str,
    pub code: &'static str,
    pub glyph: &'static str,
}

impl Country {
    pub fn label(&self) -> String {
        format!("{} {}", self.glyph, self.name)
    }
}

pub static COUNTRIES: [Country; 15] = [
    Country {
        name: "United States",
        code: "US",
        glyph: "🇺🇸",
    },
    Country {
        name: "United Kingdom",
        code: "GB",
        glyph: "🇬🇧",
    },
    Country {
        name: "Germany",
        code: "DE",
        glyph: "🇩🇪",
    },
    Country {
        name: "France",
        code: "FR",
        glyph: "🇫🇷",
    },
    Country {
        name: "Canada",
        code: "CA",
        glyph: "🇨🇦",
    },
    Country {
        name: "Australia",
        code: "AU",
        glyph: "🇦🇺",
    },
    Country {
        name: "India",
        code: "IN",
        glyph: "🇮🇳",
    },
    Country {
        name: "Bangladesh",
        code: "BD",
        glyph: "🇧🇩",
    },
    Country {
        name: "United Arab Emirates",
        code: "AE",
        glyph: "🇦🇪",
    },
    Country {
        name: "Saudi Arabia",
        code: "SA",
        glyph: "🇸🇦",
    },
    Country {
        name: "Schengen Area",
        code: "EU",
        glyph: "🇪🇺",
    },
    Country {
        name: "Italy",
        code: "IT",
        glyph: "🇮🇹",
    },
    Country {
        name: "Spain",
        code: "ES",
        glyph: "🇪🇸",
    },
    Country {
        name: "Japan",
        code: "JP",
        glyph: "🇯🇵",
    },
    Country {
        name: "China",
        code: "CN",
        glyph: "🇨🇳",
    },
];

pub fn country_by_code(code: &str) -> Option<&'static Country> {
    let code = code.trim();
    COUNTRIES
        .iter()
        .find(|country| country.code.eq_ignore_ascii_case(code))
}

pub fn country_by_name(name: &str) -> Option<&'static Country> {
    let name = name.trim();
    COUNTRIES
        .iter()
        .find(|country| country.name.eq_ignore_ascii_case(name))
}

/// Accepts either an ISO code or a display name.
pub fn find_country(query: &str) -> Option<&'static Country> {
    country_by_code(query).or_else(|| country_by_name(query))
}

fn catalog_index(country: &Country) -> usize {
    COUNTRIES
        .iter()
        .position(|candidate| candidate.code == country.code)
        .unwrap_or(0)
}

pub fn next_country(country: &Country) -> &'static Country {
    &COUNTRIES[(catalog_index(country) + 1) % COUNTRIES.len()]
}

pub fn prev_country(country: &Country) -> &'static Country {
    let idx = catalog_index(country);
    if idx == 0 {
        &COUNTRIES[COUNTRIES.len() - 1]
    } else {
        &COUNTRIES[idx - 1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanTier {
    Basic,
    Standard,
    Express,
    Custom,
}

impl PlanTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Standard => "STANDARD",
            Self::Express => "EXPRESS",
            Self::Custom => "CUSTOM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPlan {
    pub tier: PlanTier,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

impl PricingPlan {
    pub fn price_label(&self) -> String {
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) => format!("${min} - ${max}"),
            (Some(min), None) => format!("${min}+"),
            _ => "Custom quote".to_string(),
        }
    }
}

pub static PRICING_PLANS: [PricingPlan; 4] = [
    PricingPlan {
        tier: PlanTier::Basic,
        min_price: Some(1450),
        max_price: Some(2100),
        description: "Scheduling assistance for a single consulate.",
        features: &[
            "Single country route",
            "Email status alerts",
            "1 month support",
        ],
    },
    PricingPlan {
        tier: PlanTier::Standard,
        min_price: Some(2200),
        max_price: Some(5000),
        description: "For agencies handling several routes.",
        features: &[
            "Multi-consulate routes",
            "SMS and chat notifications",
            "Custom dashboard integration",
            "3 months support",
        ],
    },
    PricingPlan {
        tier: PlanTier::Express,
        min_price: Some(5100),
        max_price: Some(17000),
        description: "Full service for high-volume operators.",
        features: &[
            "Global route coverage",
            "Dedicated account manager",
            "Priority support",
            "Full API access",
        ],
    },
    PricingPlan {
        tier: PlanTier::Custom,
        min_price: None,
        max_price: None,
        description: "Tailored engagements scoped with our team.",
        features: &["Bespoke integration", "On-site onboarding"],
    },
];

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn lookup_accepts_codes_and_names_case_insensitively() {
        assert_eq!(country_by_code("de").map(|c| c.name), Some("Germany"));
        assert_eq!(
            country_by_name("united arab emirates").map(|c| c.code),
            Some("AE")
        );
        assert_eq!(find_country(" jp ").map(|c| c.name), Some("Japan"));
        assert_eq!(find_country("Atlantis"), None);
    }

    #[test]
    fn stepping_wraps_around_the_catalog() {
        let first = &COUNTRIES[0];
        let last = &COUNTRIES[COUNTRIES.len() - 1];
        assert_eq!(prev_country(first), last);
        assert_eq!(next_country(last), first);
        assert_eq!(next_country(first).code, "GB");
    }

    #[test]
    fn custom_plan_has_no_price_bounds() {
        let custom = PRICING_PLANS
            .iter()
            .find(|plan| plan.tier == PlanTier::Custom)
            .expect("custom plan");
        assert_eq!(custom.price_label(), "Custom quote");
        assert_eq!(PRICING_PLANS[0].price_label(), "$1450 - $2100");
    }
}
