pub mod cli;
pub mod extraction;
pub mod models;
pub mod pipeline;
pub mod resolver;
pub mod scoring;
pub mod source;

pub use extraction::{PlaceExtractor, PlaceSet, PlaceTagger, extract_places, normalize};
pub use models::{ExtraData, GroupResult, Header, Output, SystemEnvironment};
pub use pipeline::Pipeline;
pub use resolver::{CountryLookup, CountryResolver};
pub use scoring::{TieBreak, aggregate};
pub use source::{AddressGroup, AddressRow, group_addresses};
