pub mod bvalue;
pub mod convert;
pub mod decode;
pub mod encode;
pub mod error;

pub use bvalue::{BValue, EntryKey};   // re-export
pub use convert::json_to_bvalue;   // re-export
pub use decode::decode_bencode;   // re-export
pub use encode::{bvalue_to_json, bvalue_to_json_with_limit, encode_bvalue, DEFAULT_JSON_DEPTH};   // re-export
pub use error::BencodeError;   // re-export
