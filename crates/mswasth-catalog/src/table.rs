//! Partner → product → premium plan lookup table

use crate::error::CatalogError;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One valid premium under a (partner, product) pair
///
/// Serialized with the column names of the source sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumPlan {
    /// Premium amount
    #[serde(rename = "Premium")]
    pub premium: f64,
    /// Tenure derived from the premium
    #[serde(rename = "Tenure")]
    pub tenure: u32,
    /// Agent assigned to the premium
    #[serde(rename = "CSE Name")]
    pub agent: String,
}

impl PremiumPlan {
    /// Create new plan
    #[inline]
    pub fn new(premium: f64, tenure: u32, agent: impl Into<String>) -> Self {
        Self {
            premium,
            tenure,
            agent: agent.into(),
        }
    }

    /// Numeric equality against a premium value
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn matches(&self, premium: f64) -> bool {
        self.premium == premium
    }
}

type Products = IndexMap<String, Vec<PremiumPlan>>;

/// Static lookup table; partner and product order is preserved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupTable {
    partners: IndexMap<String, Products>,
}

static BUILTIN: Lazy<LookupTable> = Lazy::new(|| {
    fn plans(agent: &str, rows: &[(f64, u32)]) -> Vec<PremiumPlan> {
        rows.iter()
            .map(|(premium, tenure)| PremiumPlan::new(*premium, *tenure, agent))
            .collect()
    }

    LookupTable::builder()
        .product("BANGIYA", "Combo", plans("Jahed", &[(490.0, 1), (690.0, 1), (980.0, 2), (990.0, 1)]))
        .product(
            "BANGIYA",
            "Telemedicine",
            plans("Jahed", &[(360.0, 1), (700.0, 2), (1000.0, 3), (2000.0, 6), (3000.0, 9)]),
        )
        .product("PBGB", "Combo", plans("Aditya", &[(490.0, 1), (690.0, 1)]))
        .product("PBGB", "Telemedicine", plans("Aditya", &[(365.0, 1)]))
        .product("UBKGB", "Combo", plans("Abhijit", &[(490.0, 1), (690.0, 1)]))
        .product("UBKGB", "Telemedicine", plans("Abhijit", &[(365.0, 1)]))
        .product("KCCB", "Combo", plans("Aditya", &[(700.0, 1), (1050.0, 1)]))
        .product("KCCB", "Telemedicine", plans("Aditya", &[(399.0, 1)]))
        .product("Assam Vikas Gramin Bank", "Telemedicine", plans("Abhishek", &[(365.0, 1)]))
        .product("DCCB", "Telemedicine", plans("Abhishek", &[(365.0, 1)]))
        .product("UBGB", "Telemedicine", plans("Nazreen", &[(365.0, 1)]))
        .build()
});

impl LookupTable {
    /// The table shipped with the portal
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Start building a table
    #[inline]
    #[must_use]
    pub fn builder() -> LookupTableBuilder {
        LookupTableBuilder::default()
    }

    /// Partners in table order
    pub fn partners(&self) -> impl Iterator<Item = &str> {
        self.partners.keys().map(String::as_str)
    }

    /// Whether the partner has any entries
    #[inline]
    #[must_use]
    pub fn has_partner(&self, partner: &str) -> bool {
        self.partners.contains_key(partner)
    }

    /// Products offered by a partner; empty for unknown partners
    #[must_use]
    pub fn products(&self, partner: &str) -> Vec<String> {
        self.partners
            .get(partner)
            .map(|products| products.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Premium plans for a (partner, product) pair; empty when absent
    #[must_use]
    pub fn plans(&self, partner: &str, product: &str) -> &[PremiumPlan] {
        self.partners
            .get(partner)
            .and_then(|products| products.get(product))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Plan whose premium numerically equals `premium`
    #[must_use]
    pub fn find_plan(&self, partner: &str, product: &str, premium: f64) -> Option<&PremiumPlan> {
        self.plans(partner, product).iter().find(|p| p.matches(premium))
    }

    /// Whether the (partner, product, premium) triple is a valid combination
    #[inline]
    #[must_use]
    pub fn contains(&self, partner: &str, product: &str, premium: f64) -> bool {
        self.find_plan(partner, product, premium).is_some()
    }

    /// Every (partner, product, plan) triple in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &PremiumPlan)> {
        self.partners.iter().flat_map(|(partner, products)| {
            products.iter().flat_map(move |(product, plans)| {
                plans
                    .iter()
                    .map(move |plan| (partner.as_str(), product.as_str(), plan))
            })
        })
    }

    /// Total number of plans
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the table holds no plans
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a JSON table
    ///
    /// # Errors
    /// Returns [`CatalogError::Parse`] or [`CatalogError::Invalid`].
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let table: Self = serde_json::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    /// Parse a YAML table
    ///
    /// # Errors
    /// Returns [`CatalogError::Parse`] or [`CatalogError::Invalid`].
    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        let table: Self = serde_yaml::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a `.json`, `.yaml` or `.yml` file
    ///
    /// # Errors
    /// Returns an IO, format, parse or validation error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let text =
            std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;

        let table = match extension.as_str() {
            "json" => Self::from_json_str(&text)?,
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
        };
        tracing::info!(path = %path.display(), plans = table.len(), "loaded lookup table");
        Ok(table)
    }

    /// Reject tables whose premium → (tenure, agent) derivation would be ambiguous
    ///
    /// # Errors
    /// Returns [`CatalogError::Invalid`] naming the offending entry.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (partner, products) in &self.partners {
            if partner.trim().is_empty() {
                return Err(CatalogError::Invalid("empty partner name".to_string()));
            }
            for (product, plans) in products {
                if product.trim().is_empty() {
                    return Err(CatalogError::Invalid(format!(
                        "empty product name under partner '{partner}'"
                    )));
                }
                for (i, plan) in plans.iter().enumerate() {
                    if !plan.premium.is_finite() {
                        return Err(CatalogError::Invalid(format!(
                            "non-finite premium under {partner}/{product}"
                        )));
                    }
                    if plans[..i].iter().any(|p| p.matches(plan.premium)) {
                        return Err(CatalogError::Invalid(format!(
                            "duplicate premium {} under {partner}/{product}",
                            plan.premium
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Builder for [`LookupTable`]
#[derive(Debug, Default)]
pub struct LookupTableBuilder {
    partners: IndexMap<String, Products>,
}

impl LookupTableBuilder {
    /// Add (or extend) a product under a partner
    #[must_use]
    pub fn product(
        mut self,
        partner: impl Into<String>,
        product: impl Into<String>,
        plans: Vec<PremiumPlan>,
    ) -> Self {
        self.partners
            .entry(partner.into())
            .or_default()
            .entry(product.into())
            .or_default()
            .extend(plans);
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> LookupTable {
        LookupTable {
            partners: self.partners,
        }
    }
}
