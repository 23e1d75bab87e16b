//! Error types for the menu model.
//!
//! Uses `thiserror` for library errors; every documented failure of the
//! tree, codec and persistence layers is a variant here.

use thiserror::Error;

/// Result type alias for menu operations
pub type MenuResult<T> = Result<T, MenuError>;

/// Main error type for menu operations
#[derive(Error, Debug)]
pub enum MenuError {
    /// Empty or whitespace-only name on construction or rename
    #[error("invalid name for menu component")]
    InvalidName,

    /// Removal or swap requested on a component without a parent
    #[error("component '{name}' has no parent")]
    NoParent { name: String },

    /// A composite was asked to remove or swap a component it does not contain
    #[error("'{child}' is not a child of menu '{menu}'")]
    NotAChild { menu: String, child: String },

    /// Copy or attach requested with an owner of the wrong kind
    #[error("invalid owner for '{name}': need a {expected}")]
    InvalidOwnerType { name: String, expected: &'static str },

    /// Unrecognized viewer type while reading an argument
    #[error("unknown viewer type '{value}' at argument {argument}")]
    UnknownViewer { argument: String, value: String },

    /// Required attribute missing or structure unusable while reading XML
    #[error("malformed XML at '{name}': {message}")]
    MalformedXml { name: String, message: String },

    /// Reparenting a component under itself or one of its descendants
    #[error("cannot move '{name}' under its own descendant")]
    WouldCycle { name: String },

    /// XML syntax error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
