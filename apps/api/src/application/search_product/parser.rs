//! Turns raw search datasets into a [`ProductInfo`].
//!
//! The provider's ordering is trusted: the first surviving item becomes the
//! product and nothing is re-ranked.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::product::catalog::{is_blocked_url, is_trusted_retailer};
use crate::domain::product::entity::{Insights, ProductInfo, SearchResultItem};
use crate::domain::product::insights::classify_insights;

fn to_item(value: &Value) -> Option<SearchResultItem> {
    match SearchResultItem::deserialize(value) {
        Ok(item) => Some(item.normalized()),
        Err(e) => {
            debug!(error = %e, "Skipping malformed search item");
            None
        }
    }
}

/// Generic web search output: one dataset entry per results page, each
/// carrying an `organicResults` array.
pub fn parse_web_search(pages: &[Value]) -> ProductInfo {
    let items = pages
        .iter()
        .filter_map(|page| page.get("organicResults").and_then(Value::as_array))
        .flatten()
        .filter_map(to_item)
        .collect();
    select(items)
}

/// Product actor output: one flat item per scraped product page.
pub fn parse_product_items(items: &[Value]) -> ProductInfo {
    select(items.iter().filter_map(to_item).collect())
}

/// Drops blocked and URL-less items, flags trusted retailers, then picks the
/// first survivor and aggregates tags across all survivors.
pub fn select(items: Vec<SearchResultItem>) -> ProductInfo {
    let total = items.len();
    let survivors: Vec<SearchResultItem> = items
        .into_iter()
        .filter(|item| !item.url.is_empty() && !is_blocked_url(&item.url))
        .map(|mut item| {
            item.trusted_source = is_trusted_retailer(&item.url);
            item
        })
        .collect();
    debug!(total, kept = survivors.len(), "Filtered search items");

    let mut insights = Insights::default();
    for item in &survivors {
        if item.has_structured_tags() {
            item.skin_types.iter().for_each(|t| insights.add_skin_type(t));
            item.benefits.iter().for_each(|t| insights.add_benefit(t));
        } else {
            insights.merge(&classify_insights(&item.summary_text()));
        }
    }

    ProductInfo {
        product: survivors.into_iter().next(),
        insights,
    }
}
