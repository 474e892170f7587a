//! Data models for the visitor log

pub mod visitor;

// Re-export commonly used types
pub use visitor::{
    FieldUpdate, NewVisitor, ValidatedVisitor, Visitor, VisitorField, VisitorSummary,
};
