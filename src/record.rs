//! Synthesize the fake documents sent to the container.
//!
//! One [`Record`] is generated per write, with randomized values and a random
//! UUID v4 identifier used as the partition key. No seeding, no
//! reproducibility guarantee.
use azure_data_cosmos::CosmosEntity;
use fake::faker::address::en::*;
use fake::faker::internet::en::*;
use fake::faker::name::en::*;
use fake::Fake;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lower bound of the generated age, inclusive.
pub const AGE_MIN: u8 = 18;
/// Upper bound of the generated age, inclusive.
pub const AGE_MAX: u8 = 65;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub email: String,
    pub address: Address,
}

impl Record {
    /// Generate one record with fresh random values.
    ///
    /// # Example
    /// ```rust
    /// use cosmoseed::record::{Record, AGE_MAX, AGE_MIN};
    ///
    /// let record = Record::generate();
    /// assert!(AGE_MIN <= record.age && record.age <= AGE_MAX);
    /// assert!(!record.id.is_empty());
    /// ```
    pub fn generate() -> Self {
        Record {
            id: Uuid::new_v4().to_string(),
            name: Name().fake(),
            age: (AGE_MIN..=AGE_MAX).fake(),
            email: FreeEmail().fake(),
            address: Address {
                street: format!(
                    "{} {}",
                    BuildingNumber().fake::<String>(),
                    StreetName().fake::<String>()
                ),
                city: CityName().fake(),
                state: StateName().fake(),
                zip: ZipCode().fake(),
            },
        }
    }
}

impl CosmosEntity for Record {
    type Entity = String;

    fn partition_key(&self) -> Self::Entity {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generate_keeps_the_age_in_bounds() {
        for _ in 0..1000 {
            let record = Record::generate();
            assert!(
                AGE_MIN <= record.age && record.age <= AGE_MAX,
                "The age {} is out of bounds.",
                record.age
            );
        }
    }
    #[test]
    fn generate_returns_distinct_identifiers() {
        let ids: HashSet<String> = (0..100).map(|_| Record::generate().id).collect();
        assert_eq!(100, ids.len());
    }
    #[test]
    fn the_partition_key_is_the_identifier() {
        let record = Record::generate();
        assert_eq!(record.id, record.partition_key());
    }
    #[test]
    fn the_record_serializes_with_a_nested_address() {
        let record = Record::generate();
        let value = serde_json::to_value(&record).unwrap();

        assert!(value.get("id").unwrap().is_string());
        assert!(value.get("name").unwrap().is_string());
        assert!(value.get("age").unwrap().is_u64());
        assert!(value.get("email").unwrap().is_string());
        let address = value.get("address").unwrap();
        for field in ["street", "city", "state", "zip"] {
            assert!(address.get(field).unwrap().is_string());
        }
    }
}
