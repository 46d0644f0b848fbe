//! DOB typesystem: null- and change-tracked member containers.
//!
//! Every member of an object generated from a type definition is held in a
//! container that knows whether it is null and whether it has been changed
//! since its owner last reset it. Change flags drive partial updates: only
//! changed members need to be sent, and a received delta is applied by
//! merging its changed members into a local object.
//!
//! # Quick Start
//!
//! ```rust
//! use dob_typesystem::container::{ContainerBase, Int32Container, SequenceContainer};
//! use dob_typesystem::ContainerError;
//!
//! let mut speed = Int32Container::new();
//! assert!(speed.is_null());
//! assert_eq!(speed.val(), Err(ContainerError::NullValue));
//!
//! speed.set_val(12);
//! assert_eq!(speed.val(), Ok(&12));
//! assert!(speed.is_changed());
//!
//! // After a successful transmission the owner resets the flag.
//! speed.set_changed(false);
//!
//! let mut names = SequenceContainer::<String>::new();
//! names.push("alpha".to_string());
//! names.insert(0, "bravo".to_string()).unwrap();
//! assert_eq!(names.len(), 2);
//! ```
//!
//! # Modules
//!
//! - [`container`]: Value, array, sequence, dictionary and object containers
//! - [`delta`]: Object-level change queries and merging
//! - [`model`]: Identifiers and member type descriptors
//! - [`error`]: Error types
//!
//! # Threading
//!
//! Containers hold no locks. Mutation requires `&mut`, so an object is
//! modified from one place at a time; sharing across threads is up to the
//! owner.
//!
//! # Features
//!
//! - `tracing`: emit diagnostic events for rejected copies and merges.

pub mod container;
pub mod delta;
pub mod error;
pub mod model;

// Re-export commonly used types at crate root
pub use container::{
    container_equals, value_equals, ArrayContainer, ContainerBase, DictionaryContainer, Object,
    ObjectContainer, SequenceContainer, ValueContainer,
};
pub use error::{ContainerError, ErrorCode, IdError};
pub use model::{
    generate_64, ChannelId, CollectionType, DictionaryKey, EntityId, HandlerId, InstanceId,
    MemberType, MemberValue, TypeId,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
