use crate::domain::values::tool::Tool;
use serde::{Deserialize, Serialize};

/// Fallback listing price when a domain's potential value can't be parsed.
pub const DEFAULT_LISTING_PRICE: f64 = 500.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_name: String,
    pub description: String,
    pub category: String,
    pub estimated_acquisition_cost: f64,
    pub suggested_sale_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiredDomain {
    pub domain_name: String,
    /// Free-form range such as "$500 - $2,000".
    pub potential_value: String,
    pub reasoning: String,
    pub category: String,
    pub acquisition_cost: f64,
}

impl ExpiredDomain {
    /// Lower bound of `potential_value`, used as the default listing price.
    pub fn suggested_listing_price(&self) -> f64 {
        let digits: String = self
            .potential_value
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-')
            .collect();
        match digits.split('-').next().map(str::trim).map(str::parse::<u64>) {
            Some(Ok(v)) if v > 0 => v as f64,
            _ => DEFAULT_LISTING_PRICE,
        }
    }
}

/// An AI-suggested acquisition candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Opportunity {
    Product(Product),
    Domain(ExpiredDomain),
}

impl Opportunity {
    pub fn name(&self) -> &str {
        match self {
            Opportunity::Product(p) => &p.product_name,
            Opportunity::Domain(d) => &d.domain_name,
        }
    }

    pub fn category(&self) -> &str {
        match self {
            Opportunity::Product(p) => &p.category,
            Opportunity::Domain(d) => &d.category,
        }
    }

    pub fn acquisition_cost(&self) -> f64 {
        match self {
            Opportunity::Product(p) => p.estimated_acquisition_cost,
            Opportunity::Domain(d) => d.acquisition_cost,
        }
    }

    pub fn tool(&self) -> Tool {
        match self {
            Opportunity::Product(_) => Tool::Products,
            Opportunity::Domain(_) => Tool::Domains,
        }
    }

    /// Whether the item can go through a full buy and sell cycle: a finite,
    /// non-negative cost and, for products, a positive sale price.
    pub fn is_tradable(&self) -> bool {
        let cost = self.acquisition_cost();
        let cost_ok = cost.is_finite() && cost >= 0.0;
        match self {
            Opportunity::Product(p) => {
                cost_ok && p.suggested_sale_price.is_finite() && p.suggested_sale_price > 0.0
            }
            Opportunity::Domain(_) => cost_ok,
        }
    }

    /// Ledger description for the purchase of this item.
    pub fn purchase_description(&self) -> String {
        match self {
            Opportunity::Product(p) => format!("Purchase: {}", p.product_name),
            Opportunity::Domain(d) => format!("Register: {}", d.domain_name),
        }
    }
}

impl From<Product> for Opportunity {
    fn from(p: Product) -> Self {
        Opportunity::Product(p)
    }
}

impl From<ExpiredDomain> for Opportunity {
    fn from(d: ExpiredDomain) -> Self {
        Opportunity::Domain(d)
    }
}
