use crate::error::{CatalogError, CatalogErrorExt};
use crate::model::{Brand, BrandCatalog, CatalogDocument, Variant};
use cargroup_kernel::domain::constants::{BRAND_COUNT, MAX_PRICE_INR, MIN_PRICE_INR};
use fxhash::FxHashSet;
use std::path::Path;
use tracing::{debug, info};

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

/// Read-only vehicle catalog, validated once at load.
///
/// Brand order follows the source document and never changes afterwards.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    brands: Vec<Brand>,
}

impl CatalogStore {
    /// Loads the catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    /// Loads an operator-supplied catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).context(format!("Reading {}", path.display()))?;
        let store = Self::from_json_str(&raw)?;
        info!(path = %path.display(), brands = store.brands.len(), "Catalog override loaded");
        Ok(store)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        validate(&document)?;
        debug!(brands = document.brands.len(), "Catalog validated");
        Ok(Self { brands: document.brands })
    }

    /// Brand names in catalog order.
    #[must_use]
    pub fn list_brands(&self) -> Vec<&str> {
        self.brands.iter().map(|b| b.name.as_str()).collect()
    }

    #[must_use]
    pub fn brand(&self, name: &str) -> Option<&Brand> {
        self.brands.iter().find(|b| b.name == name)
    }

    /// Nested catalog of `name`; empty for an unknown brand.
    #[must_use]
    pub fn brand_catalog(&self, name: &str) -> BrandCatalog {
        self.brand(name).map(Brand::to_catalog).unwrap_or_default()
    }
}

fn invalid(message: String, context: &str) -> CatalogError {
    CatalogError::Invalid { message: message.into(), context: Some(context.to_owned().into()) }
}

fn check_name<'a>(
    seen: &mut FxHashSet<&'a str>,
    name: &'a str,
    kind: &str,
    parent: &str,
) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(invalid(format!("empty {kind} name"), parent));
    }
    if !seen.insert(name) {
        return Err(invalid(format!("duplicate {kind} '{name}'"), parent));
    }
    Ok(())
}

fn validate(document: &CatalogDocument) -> Result<(), CatalogError> {
    if document.brands.len() != BRAND_COUNT {
        return Err(invalid(
            format!("expected {BRAND_COUNT} brands, found {}", document.brands.len()),
            "catalog",
        ));
    }

    let mut brand_names = FxHashSet::default();
    for brand in &document.brands {
        check_name(&mut brand_names, &brand.name, "brand", "catalog")?;
        if brand.models.is_empty() {
            return Err(invalid("brand has no models".to_owned(), &brand.name));
        }

        let mut model_names = FxHashSet::default();
        for model in &brand.models {
            check_name(&mut model_names, &model.name, "model", &brand.name)?;

            let parent = format!("{} {}", brand.name, model.name);
            if model.variants.is_empty() {
                return Err(invalid("model has no variants".to_owned(), &parent));
            }

            let mut variant_names = FxHashSet::default();
            for variant in &model.variants {
                check_name(&mut variant_names, &variant.name, "variant", &parent)?;
                validate_prices(variant, &parent)?;
            }
        }
    }

    Ok(())
}

fn validate_prices(variant: &Variant, parent: &str) -> Result<(), CatalogError> {
    let context = format!("{parent} {}", variant.name);
    if variant.prices.is_empty() {
        return Err(invalid("variant has no prices".to_owned(), &context));
    }

    let mut transmissions = FxHashSet::default();
    for price in &variant.prices {
        if !transmissions.insert(price.transmission) {
            return Err(invalid(format!("duplicate transmission {}", price.transmission), &context));
        }
        if !(MIN_PRICE_INR..=MAX_PRICE_INR).contains(&price.price) {
            return Err(invalid(
                format!(
                    "price {} for {} outside [{MIN_PRICE_INR}, {MAX_PRICE_INR}]",
                    price.price, price.transmission
                ),
                &context,
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transmission;

    #[test]
    fn embedded_catalog_is_valid() {
        let store = CatalogStore::embedded().unwrap();
        assert_eq!(
            store.list_brands(),
            ["Tata", "Mahindra", "Kia", "Hyundai", "Honda", "Maruti", "Volkswagen", "Toyota"]
        );
    }

    #[test]
    fn nexon_offers_manual_amt_and_dca() {
        let store = CatalogStore::embedded().unwrap();
        let nexon = store.brand("Tata").and_then(|b| b.model("Nexon")).unwrap();
        let transmissions: Vec<Transmission> =
            nexon.variants.iter().flat_map(|v| &v.prices).map(|p| p.transmission).collect();

        for expected in [Transmission::Manual, Transmission::Amt, Transmission::Dca] {
            assert!(transmissions.contains(&expected), "Nexon is missing {expected}");
        }
    }

    #[test]
    fn every_price_is_within_bounds() {
        let store = CatalogStore::embedded().unwrap();
        for name in store.list_brands() {
            for models in store.brand_catalog(name).values() {
                for prices in models.values() {
                    assert!(prices.values().all(|p| (MIN_PRICE_INR..=MAX_PRICE_INR).contains(p)));
                }
            }
        }
    }

    #[test]
    fn unknown_brand_yields_empty_catalog() {
        let store = CatalogStore::embedded().unwrap();
        assert!(store.brand("InvalidBrand").is_none());
        assert!(store.brand_catalog("InvalidBrand").is_empty());
    }

    #[test]
    fn brand_lookup_is_case_sensitive() {
        let store = CatalogStore::embedded().unwrap();
        assert!(store.brand("tata").is_none());
    }
}
