use crate::customers::Customer;
use crate::error::DemoError;
use serde::Deserialize;
use std::path::PathBuf;

/// Every constant the lessons use, in one place.
///
/// The binaries run with [`DemoConfig::default`]. A TOML document may
/// override any subset of fields; missing ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Relative path the scoped-resource lesson opens.
    pub input_path: PathBuf,
    /// Rows loaded into the in-memory customer table.
    pub customers: Vec<Customer>,
    /// Id used by the fallback and presence-branch lookups.
    pub lookup_id: u32,
    /// Ids resolved by the flatten-and-collect lookup.
    pub batch_ids: Vec<u32>,
    pub iterate_seed: u64,
    pub iterate_limit: usize,
    /// Upper bound (inclusive) for the doubling sequence.
    pub doubling_bound: u64,
    pub sentence: String,
    pub stop_word: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("test.txt"),
            customers: vec![Customer::new(2, "Brand")],
            lookup_id: 1,
            batch_ids: vec![1, 4, 5],
            iterate_seed: 0,
            iterate_limit: 10,
            doubling_bound: 10,
            sentence: "this is a list of strings".to_string(),
            stop_word: "of".to_string(),
        }
    }
}

impl DemoConfig {
    /// Overlays a TOML document on the defaults.
    ///
    /// Library API for callers that want different constants. The bundled
    /// binaries never read a file or environment variable and always run
    /// with [`DemoConfig::default`], so only tests and embedding code call this.
    pub fn from_toml_str(content: &str) -> Result<Self, DemoError> {
        Ok(toml::from_str(content)?)
    }
}
