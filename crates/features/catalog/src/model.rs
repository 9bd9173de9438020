//! Catalog records as stored in `catalog.json`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{AsRefStr, Display, EnumString};

/// Wire view of one brand: model → variant → transmission → price (INR).
pub type BrandCatalog = BTreeMap<String, BTreeMap<String, BTreeMap<String, u64>>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    pub brands: Vec<Brand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Brand {
    pub name: String,
    pub models: Vec<Model>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Model {
    pub name: String,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Variant {
    pub name: String,
    pub prices: Vec<Price>,
}

/// Ex-showroom price of a variant for one transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Price {
    pub transmission: Transmission,
    pub price: u64,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum Transmission {
    Manual,
    Automatic,
    #[serde(rename = "AMT")]
    #[strum(serialize = "AMT")]
    Amt,
    /// Dual-clutch automatic (Tata naming)
    #[serde(rename = "DCA")]
    #[strum(serialize = "DCA")]
    Dca,
    #[serde(rename = "CVT")]
    #[strum(serialize = "CVT")]
    Cvt,
    #[serde(rename = "DCT")]
    #[strum(serialize = "DCT")]
    Dct,
    /// Clutchless manual
    #[serde(rename = "iMT")]
    #[strum(serialize = "iMT")]
    Imt,
    #[serde(rename = "IVT")]
    #[strum(serialize = "IVT")]
    Ivt,
    Electric,
}

impl Brand {
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Nested map view served by `GET /api/car-data/{brand}`.
    #[must_use]
    pub fn to_catalog(&self) -> BrandCatalog {
        self.models
            .iter()
            .map(|model| {
                let variants = model
                    .variants
                    .iter()
                    .map(|variant| {
                        let prices = variant
                            .prices
                            .iter()
                            .map(|p| (p.transmission.to_string(), p.price))
                            .collect();
                        (variant.name.clone(), prices)
                    })
                    .collect();
                (model.name.clone(), variants)
            })
            .collect()
    }
}
