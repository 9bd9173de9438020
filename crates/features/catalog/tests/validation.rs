use cargroup_catalog::model::CatalogDocument;
use cargroup_catalog::{CatalogError, CatalogStore};
use serde_json::{Value, json};
use std::io::Write;

const BRANDS: [&str; 8] =
    ["Tata", "Mahindra", "Kia", "Hyundai", "Honda", "Maruti", "Volkswagen", "Toyota"];

fn minimal_document() -> Value {
    let brands: Vec<Value> = BRANDS
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "models": [{
                    "name": "Base",
                    "variants": [{ "name": "Std", "prices": [{ "transmission": "Manual", "price": 700_000 }] }]
                }]
            })
        })
        .collect();
    json!({ "brands": brands })
}

fn load(document: &Value) -> Result<CatalogStore, CatalogError> {
    CatalogStore::from_json_str(&document.to_string())
}

fn assert_invalid(document: &Value, needle: &str) {
    match load(document) {
        Err(CatalogError::Invalid { message, .. }) => {
            assert!(message.contains(needle), "expected '{needle}' in '{message}'");
        },
        other => panic!("expected invalid catalog, got {other:?}"),
    }
}

#[test]
fn minimal_document_loads() {
    let store = load(&minimal_document()).unwrap();
    assert_eq!(store.list_brands(), BRANDS);
}

#[test]
fn price_below_floor_is_rejected() {
    let mut doc = minimal_document();
    doc["brands"][2]["models"][0]["variants"][0]["prices"][0]["price"] = json!(49_999);
    assert_invalid(&doc, "outside");
}

#[test]
fn price_above_ceiling_is_rejected() {
    let mut doc = minimal_document();
    doc["brands"][0]["models"][0]["variants"][0]["prices"][0]["price"] = json!(10_000_001);
    assert_invalid(&doc, "outside");
}

#[test]
fn duplicate_model_is_rejected() {
    let mut doc = minimal_document();
    let model = doc["brands"][0]["models"][0].clone();
    doc["brands"][0]["models"].as_array_mut().unwrap().push(model);
    assert_invalid(&doc, "duplicate model 'Base'");
}

#[test]
fn duplicate_transmission_is_rejected() {
    let mut doc = minimal_document();
    doc["brands"][1]["models"][0]["variants"][0]["prices"] = json!([
        { "transmission": "AMT", "price": 700_000 },
        { "transmission": "AMT", "price": 750_000 }
    ]);
    assert_invalid(&doc, "duplicate transmission AMT");
}

#[test]
fn variant_without_prices_is_rejected() {
    let mut doc = minimal_document();
    doc["brands"][3]["models"][0]["variants"][0]["prices"] = json!([]);
    assert_invalid(&doc, "no prices");
}

#[test]
fn brand_without_models_is_rejected() {
    let mut doc = minimal_document();
    doc["brands"][5]["models"] = json!([]);
    assert_invalid(&doc, "brand has no models");
}

#[test]
fn model_without_variants_is_rejected() {
    let mut doc = minimal_document();
    doc["brands"][6]["models"][0]["variants"] = json!([]);
    assert_invalid(&doc, "model has no variants");
}

#[test]
fn empty_names_are_rejected() {
    let mut doc = minimal_document();
    doc["brands"][4]["models"][0]["variants"][0]["name"] = json!("  ");
    assert_invalid(&doc, "empty variant name");
}

#[test]
fn brand_count_must_be_eight() {
    let mut doc = minimal_document();
    doc["brands"].as_array_mut().unwrap().pop();
    assert_invalid(&doc, "expected 8 brands");
}

#[test]
fn unknown_transmission_fails_to_parse() {
    let mut doc = minimal_document();
    doc["brands"][0]["models"][0]["variants"][0]["prices"][0]["transmission"] = json!("Sequential");
    assert!(matches!(load(&doc), Err(CatalogError::Parse { .. })));
}

#[test]
fn document_round_trips_through_typed_records() {
    let doc: CatalogDocument = serde_json::from_value(minimal_document()).unwrap();
    let store = CatalogStore::from_document(doc).unwrap();
    assert_eq!(store.brand_catalog("Toyota")["Base"]["Std"]["Manual"], 700_000);
}

#[test]
fn override_file_is_loaded_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(minimal_document().to_string().as_bytes()).unwrap();

    let store = CatalogStore::from_path(file.path()).unwrap();
    assert_eq!(store.list_brands().len(), 8);
}

#[test]
fn missing_override_file_is_an_io_error() {
    let err = CatalogStore::from_path("/nonexistent/catalog.json").unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.context_note().is_some_and(|c| c.contains("/nonexistent/catalog.json")));
}
