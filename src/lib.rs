//! rappmenu - menu-design document model with XML persistence
//!
//! Models the hierarchical menu definition of a driven application as a
//! composite tree of components (menus, functions, PDF leaves, graphic
//! menus) and persists it as an XML document. Editors mutate the tree
//! through [`MenuTree`]'s operations, which maintain its structural
//! invariants; [`Document`] handles durable save and load.

pub mod argument;
pub mod component;
pub mod document;
pub mod error;
pub mod tree;
pub mod xml;

// Re-exports for convenience
pub use argument::{Argument, Viewer, VALUE_SET_SEPARATOR};
pub use component::{
    ComponentId, ComponentKind, GraphicMenuProps, IMAGE_SIDE_RANGE, MINIMUM_COLUMNS_RANGE,
};
pub use document::Document;
pub use error::{MenuError, MenuResult};
pub use tree::{MenuTree, PATH_DELIMITER};
