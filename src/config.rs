//! Application-level configuration constants.

/// Source of the group configuration table, fetched once at startup.
pub const DATA_URL: &str =
    "https://raw.githubusercontent.com/liuyang042/topt-dye-water-ratio-calculator/main/data.json";

// UI strings
pub const QUANTITY_PLACEHOLDER: &str = "enter a whole number";
pub const FETCH_FAILURE_MESSAGE: &str =
    "Failed to load the group configuration. Check the network or the repository data file.";
