//! Fixed reference values: the region list and group bounds.

/// Every Indian state and union territory a group can be formed in.
///
/// Order is stable and drives seeding and `list_all` ordering.
pub const REGIONS: [&str; 36] = [
    // States
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    // Union territories
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Lakshadweep",
    "Puducherry",
];

/// Number of brands the catalog must carry.
pub const BRAND_COUNT: usize = 8;

/// Capacity of every purchase group.
pub const MAX_MEMBERS: u32 = 50;

/// Inclusive bounds for the initial membership assigned by seeding.
pub const SEED_MIN_MEMBERS: u32 = 15;
pub const SEED_MAX_MEMBERS: u32 = 48;

/// Inclusive catalog price bounds, in rupees.
pub const MIN_PRICE_INR: u64 = 50_000;
pub const MAX_PRICE_INR: u64 = 10_000_000;

// OpenAPI tags
pub const SYSTEM_TAG: &str = "System";
pub const CATALOG_TAG: &str = "Catalog";
pub const GROUPS_TAG: &str = "Groups";

#[must_use]
pub fn is_region(name: &str) -> bool {
    REGIONS.contains(&name)
}
