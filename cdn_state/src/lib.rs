//! Tag-driven marshalling between CDN configuration records and the grouped
//! maps held by a declarative state store.
//!
//! Records describe themselves through the [`Record`](trait@Record) trait, normally derived
//! with `#[derive(Record)]` from the companion `cdn_state_macros` crate.
//! [`extract()`] renders a record as `{group: {block: Set([content])}}`;
//! [`ingest()`] populates a record from such a map, rebuilding weighted lists
//! in weight order.
//!
//! ```
//! use cdn_state::{Map, Record, extract, ingest};
//!
//! #[derive(Debug, Default, PartialEq, Record)]
//! struct Header {
//!     #[record(key = "name")]
//!     name: String,
//! }
//!
//! #[derive(Debug, Default, PartialEq, Record)]
//! struct Config {
//!     #[record(group = "delivery", block = "static_header", weighted)]
//!     headers: Vec<Header>,
//! }
//!
//! let config = Config {
//!     headers: vec![Header { name: "a".into() }, Header { name: "b".into() }],
//! };
//! let map: Map = extract(&config);
//! let mut restored = Config::default();
//! ingest(&mut restored, &map)?;
//! assert_eq!(restored, config);
//! # Ok::<(), cdn_state::MarshalError>(())
//! ```

pub use cdn_state_macros::Record;

mod coerce;
mod descriptor;
mod error;
mod extract;
mod ingest;
pub mod model;
mod options;
pub mod schema;
mod tree;
mod value;

pub use coerce::{CoerceError, Scalar, ScalarKind};
pub use descriptor::{
    FieldDescriptor, FieldMut, FieldSlot, FieldTags, FieldValue, ListOrder, ListSlot, Populate,
    Record, RecordSlot,
};
pub use error::{MarshalError, OptionsError};
pub use extract::extract;
pub use ingest::ingest;
pub use options::{DEFAULT_WEIGHT_KEY, ENV_PREFIX, MarshalOptions, Marshaller};
pub use tree::{Field, Parent, Parents};
pub use value::{Map, Value};
