//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [zip] Section Defaults
// ============================================================================

pub mod zip {
    use std::path::PathBuf;

    pub fn source() -> PathBuf {
        "scottish-power-collection/fragments".into()
    }

    pub fn output() -> PathBuf {
        "fragment-zips".into()
    }

    pub fn fragments() -> Vec<String> {
        [
            "sp-awards",
            "sp-footer",
            "sp-half-price-weekends",
            "sp-header",
            "sp-hero",
            "sp-product-cards",
            "sp-service-blocks",
            "sp-support-sections",
            "sp-testimonials",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}

// ============================================================================
// [fix] Section Defaults
// ============================================================================

pub mod fix {
    pub fn pattern() -> String {
        "scottish-power-collection/fragments/*/index.html".into()
    }

    pub fn variables() -> Vec<String> {
        [
            "displayStyle",
            "footerStyle",
            "showPersonalBusiness",
            "sectionLayout",
            "layoutStyle",
            "heroLayout",
            "cardStyle",
            "showTrustpilotBranding",
            "autoRotate",
            "showRatings",
            "showSocialLinks",
            "showNewsletter",
            "stickyHeader",
            "headerLayout",
            "showImages",
            "enableWebchat",
            "showBadge",
            "showBenefits",
            "columnCount",
            "enableAutoRotate",
            "showNavigation",
            "showDescriptions",
            "backgroundOverlay",
            "quoteFormStyle",
            "enableQuoteForm",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}
