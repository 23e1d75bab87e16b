//! Component taxonomy and handles.
//!
//! Defines the closed set of node kinds in the menu tree, the stable
//! handle type used to address nodes in the [`MenuTree`](crate::MenuTree)
//! arena, and the scalar payload carried by graphic menus.

use std::ops::RangeInclusive;

use crate::error::{MenuError, MenuResult};

/// Stable handle to a node in a [`MenuTree`](crate::MenuTree).
///
/// Handles are never reused; a handle whose node has been removed is
/// stale, and passing it to tree accessors panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub(crate) usize);

/// Kind of menu component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// The top of a menu tree; a composite that cannot be reparented
    RootMenu,
    /// Ordinary composite holding an ordered list of children
    Menu,
    /// Leaf invoking a function, with an ordered list of arguments
    Function,
    /// Leaf pointing at a PDF document; the name is the file path
    PdfFile,
    /// Leaf describing a menu rendered as a grid of images
    GraphicMenu,
}

impl ComponentKind {
    /// Whether components of this kind own an ordered child list.
    pub fn is_composite(self) -> bool {
        matches!(self, ComponentKind::RootMenu | ComponentKind::Menu)
    }
}

/// Valid range for a graphic menu's image width and height, in pixels.
///
/// Enforced by editors, not by the model.
pub const IMAGE_SIDE_RANGE: RangeInclusive<u16> = 16..=250;

/// Valid range for a graphic menu's minimum number of columns.
///
/// Enforced by editors, not by the model.
pub const MINIMUM_COLUMNS_RANGE: RangeInclusive<u16> = 1..=10;

/// Scalar attributes of a graphic menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicMenuProps {
    /// Image width in pixels, expected within [`IMAGE_SIDE_RANGE`]
    pub image_width: u16,
    /// Image height in pixels, expected within [`IMAGE_SIDE_RANGE`]
    pub image_height: u16,
    /// Minimum number of columns, expected within [`MINIMUM_COLUMNS_RANGE`]
    pub minimum_columns: u16,
}

impl Default for GraphicMenuProps {
    fn default() -> Self {
        Self {
            image_width: *IMAGE_SIDE_RANGE.start(),
            image_height: *IMAGE_SIDE_RANGE.start(),
            minimum_columns: *MINIMUM_COLUMNS_RANGE.start(),
        }
    }
}

/// Trim a component or argument name, rejecting empty results.
pub(crate) fn normalize_name(name: &str) -> MenuResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(MenuError::InvalidName);
    }
    Ok(trimmed.to_string())
}
