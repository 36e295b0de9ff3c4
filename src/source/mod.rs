//! Address input: reading `(group id, address)` rows and grouping them.

use std::collections::HashMap;

mod reader;

pub use reader::{AddressReader, DEFAULT_ADDRESS_COLUMN, DEFAULT_GROUP_COLUMN, ReaderOptions};

/// One input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRow {
    pub group_id: String,
    pub address: String,
}

impl AddressRow {
    pub fn new(group_id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            address: address.into(),
        }
    }
}

/// Addresses sharing one group id, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressGroup {
    pub id: String,
    pub addresses: Vec<String>,
}

/// Partition rows by group id.
///
/// Groups appear in the order their id was first seen; addresses keep their
/// input order within a group.
pub fn group_addresses(rows: impl IntoIterator<Item = AddressRow>) -> Vec<AddressGroup> {
    let mut groups: Vec<AddressGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        match index.get(&row.group_id) {
            Some(&i) => groups[i].addresses.push(row.address),
            None => {
                index.insert(row.group_id.clone(), groups.len());
                groups.push(AddressGroup {
                    id: row.group_id,
                    addresses: vec![row.address],
                });
            }
        }
    }

    groups
}
