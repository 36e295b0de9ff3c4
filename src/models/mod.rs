mod group;
mod output;

pub use group::GroupResult;
pub use output::{ExtraData, Header, OUTPUT_FORMAT_VERSION, Output, SystemEnvironment};
