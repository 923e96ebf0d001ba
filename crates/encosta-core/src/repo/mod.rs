//! Typed repositories over the record store.
//!
//! Each repository owns (de)serialization and validation for one collection
//! and runs every mutation as a full read-modify-write of that collection,
//! serialized behind an in-process mutex.

mod reports;
mod users;

pub use reports::ReportRepository;
pub use users::UserRepository;

use crate::store::{CollectionKey, StoreError};

/// Decode a collection blob, treating an absent blob as empty.
///
/// Decode failures surface as [`StoreError::Decode`]; a corrupt collection
/// is never read as an empty one.
pub(crate) fn decode_collection<T: serde::de::DeserializeOwned>(
    key: CollectionKey,
    bytes: Option<Vec<u8>>,
) -> Result<Vec<T>, StoreError> {
    match bytes {
        None => Ok(Vec::new()),
        Some(bytes) => {
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode { key, source })
        }
    }
}

/// Encode a collection as a pretty-printed JSON array.
pub(crate) fn encode_collection<T: serde::Serialize>(
    key: CollectionKey,
    records: &[T],
) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(records).map_err(|source| StoreError::Encode { key, source })
}

#[cfg(test)]
mod tests {
    use super::{decode_collection, encode_collection};
    use crate::store::{CollectionKey, StoreError};

    #[test]
    fn absent_blob_decodes_to_empty() {
        let records: Vec<String> =
            decode_collection(CollectionKey::Reports, None).expect("decode");
        assert!(records.is_empty());
    }

    #[test]
    fn corrupt_blob_is_an_error_not_empty() {
        let result: Result<Vec<String>, _> =
            decode_collection(CollectionKey::Reports, Some(b"{oops".to_vec()));
        assert!(matches!(
            result,
            Err(StoreError::Decode {
                key: CollectionKey::Reports,
                ..
            })
        ));
    }

    #[test]
    fn encode_decode_round_trips() {
        let records = vec!["a".to_string(), "b".to_string()];
        let bytes = encode_collection(CollectionKey::Users, &records).expect("encode");
        let reparsed: Vec<String> =
            decode_collection(CollectionKey::Users, Some(bytes)).expect("decode");
        assert_eq!(reparsed, records);
    }
}
