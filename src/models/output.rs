use serde::Serialize;

use super::GroupResult;
use crate::scoring::TieBreak;

pub const OUTPUT_FORMAT_VERSION: &str = "1.0.0";

#[derive(Serialize, Debug)]
pub struct Output {
    pub headers: Vec<Header>,
    pub groups: Vec<GroupResult>,
}

#[derive(Serialize, Debug)]
pub struct Header {
    pub start_timestamp: String,
    pub end_timestamp: String,
    pub duration: f64,
    pub tagger: String,
    pub tie_break: TieBreak,
    pub extra_data: ExtraData,
    pub errors: Vec<String>,
    pub output_format_version: String,
}

#[derive(Serialize, Debug, Default, PartialEq, Eq)]
pub struct ExtraData {
    pub groups_count: usize,
    pub addresses_count: usize,
    pub places_count: usize,
    pub unresolved_places_count: usize,
    pub system_environment: SystemEnvironment,
}

impl ExtraData {
    /// Tally counts over finished groups.
    pub fn from_groups(groups: &[GroupResult], system_environment: SystemEnvironment) -> Self {
        Self {
            groups_count: groups.len(),
            addresses_count: groups.iter().map(|g| g.addresses.len()).sum(),
            places_count: groups.iter().map(|g| g.places.len()).sum(),
            unresolved_places_count: groups.iter().map(|g| g.unresolved_places().count()).sum(),
            system_environment,
        }
    }
}

#[derive(Serialize, Debug, Default, PartialEq, Eq)]
pub struct SystemEnvironment {
    pub operating_system: Option<String>,
    pub cpu_architecture: String,
    pub platform: String,
    pub rust_version: String,
}
