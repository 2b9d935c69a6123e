//! Campaign brief normalization.
//!
//! Raw form input arrives as a loose name -> value map. Everything is
//! optional; blank values are dropped here so later stages never see them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBrief {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, alias = "offer", skip_serializing_if = "Option::is_none")]
    pub offer_or_sale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_guidelines: Option<String>,
}

impl CampaignBrief {
    /// Build a brief from a field map. Unknown keys are ignored, and a
    /// non-blank `offerOrSale` takes precedence over the `offer` alias.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let canonical_offer = fields.get("offerOrSale").and_then(|v| non_blank(v));
        let mut brief = CampaignBrief::default();
        for (name, value) in fields {
            if name == "offer" && canonical_offer.is_some() {
                continue;
            }
            let Some(slot) = brief.slot_mut(name) else {
                debug!("Ignoring unknown brief field: {}", name);
                continue;
            };
            if let Some(value) = non_blank(value) {
                *slot = Some(value);
            }
        }
        brief
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        let slot = match name {
            "campaignType" => &mut self.campaign_type,
            "targetAudience" => &mut self.target_audience,
            "offerOrSale" | "offer" => &mut self.offer_or_sale,
            "product" => &mut self.product,
            "brandName" => &mut self.brand_name,
            "industry" => &mut self.industry,
            "goal" => &mut self.goal,
            "brandGuidelines" => &mut self.brand_guidelines,
            _ => return None,
        };
        Some(slot)
    }

    /// Drop blank values and trim the rest. Useful when a brief was
    /// deserialized directly instead of built from fields.
    pub fn normalized(self) -> Self {
        let clean = |v: Option<String>| v.as_deref().and_then(non_blank);
        Self {
            campaign_type: clean(self.campaign_type),
            target_audience: clean(self.target_audience),
            offer_or_sale: clean(self.offer_or_sale),
            product: clean(self.product),
            brand_name: clean(self.brand_name),
            industry: clean(self.industry),
            goal: clean(self.goal),
            brand_guidelines: clean(self.brand_guidelines),
        }
    }

    /// Present fields as (prompt label, value), in prompt order. Each value
    /// is collapsed onto a single line.
    pub fn labeled_fields(&self) -> Vec<(&'static str, String)> {
        [
            ("Brand", &self.brand_name),
            ("Industry", &self.industry),
            ("Campaign Type", &self.campaign_type),
            ("Target Audience", &self.target_audience),
            ("Offer or Sale", &self.offer_or_sale),
            ("Product", &self.product),
            ("Goal", &self.goal),
            ("Brand Guidelines", &self.brand_guidelines),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().and_then(non_blank).map(|v| (label, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.labeled_fields().is_empty()
    }
}

/// Trim, fold runs of whitespace (newlines included) into one space, and
/// drop the value if nothing is left.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Output schema selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMode {
    pub ab_test: bool,
}

impl GenerationMode {
    pub fn standard() -> Self {
        Self { ab_test: false }
    }

    pub fn ab_test() -> Self {
        Self { ab_test: true }
    }
}

/// A normalized brief plus the mode it should be generated in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub brief: CampaignBrief,
    pub mode: GenerationMode,
}

pub fn build_request(fields: &HashMap<String, String>, ab_test: bool) -> GenerationRequest {
    GenerationRequest {
        brief: CampaignBrief::from_fields(fields),
        mode: GenerationMode { ab_test },
    }
}
