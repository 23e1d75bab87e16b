//! Bidirectional XML codec for menu trees.
//!
//! The writer emits the canonical shape: one element per component,
//! attributes for scalar flags and values, child elements for structured
//! data. Attributes that are empty, false or at their default are
//! omitted; boolean attributes are written only when true, as the
//! upper-case literal `TRUE`.
//!
//! The reader is tolerant: tag and attribute names match
//! case-insensitively, unknown attributes and elements are skipped, and
//! missing optional data leaves fields at their defaults. Malformed
//! structure (a missing mandatory `Name`, an unknown viewer type) is a
//! hard error naming the offending node.

mod reader;
mod writer;

pub use reader::tree_from_str;
pub use writer::tree_to_string;

/// Top-level document tag wrapping the root menu subtree
pub const DOCUMENT_TAG: &str = "Menue";

/// Root menu name used when a document does not carry one
pub const DEFAULT_ROOT_NAME: &str = "Applications";

pub(crate) const TAG_MENU: &str = "Menu";
pub(crate) const TAG_FUNCTION: &str = "Function";
pub(crate) const TAG_PDF: &str = "PDF";
pub(crate) const TAG_GRAPHIC_MENU: &str = "GraphicMenu";
pub(crate) const TAG_ARGUMENT: &str = "Argument";
pub(crate) const TAG_VIEWER: &str = "Viewer";
pub(crate) const TAG_DATA: &str = "Data";
pub(crate) const TAG_DESCRIPTION: &str = "Description";
pub(crate) const TAG_TEXT: &str = "Text";
pub(crate) const TAG_VALUE: &str = "Value";

pub(crate) const ATTR_NAME: &str = "Name";
pub(crate) const ATTR_TYPE: &str = "Type";
pub(crate) const ATTR_LANGUAGE: &str = "Language";
pub(crate) const ATTR_REQUIRED: &str = "Required";
pub(crate) const ATTR_READ_ONLY: &str = "ReadOnly";
pub(crate) const ATTR_DEPENDS: &str = "DependsFrom";
pub(crate) const ATTR_VALUE: &str = "Value";
pub(crate) const ATTR_MULTISELECT: &str = "AllowMultiSelect";
pub(crate) const ATTR_IMAGE_WIDTH: &str = "ImageWidth";
pub(crate) const ATTR_IMAGE_HEIGHT: &str = "ImageHeight";
pub(crate) const ATTR_MIN_COLUMNS: &str = "MinNumberColumns";

pub(crate) const TRUE_LITERAL: &str = "TRUE";
pub(crate) const DESCRIPTION_LANGUAGE: &str = "ES";
