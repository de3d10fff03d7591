#[macro_use]
extern crate derive_builder;

use derive_builder::UninitializedFieldError;
use thiserror::Error;

pub mod geometry;
pub mod library;
pub mod net;
pub mod placement;
pub mod sheet;
pub mod standard_library;
pub mod symbol;
pub mod topology;
pub mod validate;

pub use geometry::{Orientation, Point};
pub use library::SymbolLibrary;
pub use net::{Element, LabelKind, LabelShape, PowerRail};
pub use placement::{Placement, PlacementBuilder};
pub use sheet::{TitleBlock, TitleBlockBuilder};
pub use topology::{Route, Topology, TopologyBuilder, TopologyStats};
pub use validate::{validate_elements, DanglingNet};

#[derive(Error, Debug)]
pub enum SchematicError {
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),
    #[error("Unknown pin {pin} on symbol {symbol}")]
    UnknownPin { symbol: String, pin: String },
    #[error("Unsupported orientation {rotation} on {reference}")]
    UnsupportedOrientation {
        reference: String,
        rotation: Orientation,
    },
    #[error("Name already exists: {0}")]
    NameAlreadyExists(String),
    #[error("Name not found: {0}")]
    NameNotFound(String),
    #[error("Invalid symbol {0}: {1}")]
    InvalidSymbol(String, String),
    #[error("Uninitialized field: {0}")]
    UninitializedField(String),
}

impl From<UninitializedFieldError> for SchematicError {
    fn from(e: UninitializedFieldError) -> Self {
        Self::UninitializedField(e.field_name().to_string())
    }
}
