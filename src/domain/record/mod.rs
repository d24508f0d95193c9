//! Record domain - the multi-value field being rendered and its display context

mod entity;

pub use entity::{
    validate_positions, Item, Position, Record, RecordContext, RecordType, DEFAULT_VIEW_MODE,
};
