//! Catalog domain layer: model, reader, writer, ordering.

pub mod ast;
pub mod reader;
pub mod sort;
pub mod writer;
pub mod xml_helper;

pub use ast::{
    Catalog, CatalogStats, Context, Location, Message, MessageKey, MessageStatus, PluralForms,
    StructuralWarning, Translation,
};
pub use reader::{parse, ParseOutcome};
pub use writer::serialize;
