//! The menu component tree.
//!
//! [`MenuTree`] is an arena of nodes addressed by stable [`ComponentId`]
//! handles. Nodes keep a parent back-reference and a lazily memoized
//! handle to their root menu; parent links and child lists are only ever
//! mutated through the operations here, which keep them consistent:
//! every non-root node appears exactly once in its parent's child list,
//! and following parent links always terminates at a root menu.
//!
//! The tree is single-threaded; the root memo uses a plain [`Cell`].

use std::cell::Cell;

use crate::argument::Argument;
use crate::component::{normalize_name, ComponentId, ComponentKind, GraphicMenuProps};
use crate::error::{MenuError, MenuResult};

/// Delimiter between ancestor names in [`MenuTree::path_as_string`]
pub const PATH_DELIMITER: &str = ": ";

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<ComponentId>,
    root_cache: Cell<Option<ComponentId>>,
    payload: Payload,
}

#[derive(Debug, Clone)]
enum Payload {
    RootMenu { children: Vec<ComponentId> },
    Menu { children: Vec<ComponentId> },
    Function { arguments: Vec<Argument> },
    PdfFile,
    GraphicMenu(GraphicMenuProps),
}

impl Payload {
    fn kind(&self) -> ComponentKind {
        match self {
            Payload::RootMenu { .. } => ComponentKind::RootMenu,
            Payload::Menu { .. } => ComponentKind::Menu,
            Payload::Function { .. } => ComponentKind::Function,
            Payload::PdfFile => ComponentKind::PdfFile,
            Payload::GraphicMenu(_) => ComponentKind::GraphicMenu,
        }
    }

    fn children(&self) -> &[ComponentId] {
        match self {
            Payload::RootMenu { children } | Payload::Menu { children } => children,
            _ => &[],
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<ComponentId>> {
        match self {
            Payload::RootMenu { children } | Payload::Menu { children } => Some(children),
            _ => None,
        }
    }
}

/// Arena holding one or more menu trees.
///
/// A tree always has at least one root menu (created by [`MenuTree::new`]);
/// additional free-standing roots can be added with
/// [`MenuTree::new_root_menu`], which is how subtrees are staged before
/// being moved between documents.
#[derive(Debug, Clone)]
pub struct MenuTree {
    nodes: Vec<Option<Node>>,
    root: ComponentId,
}

impl MenuTree {
    /// Create a tree with a single empty root menu.
    pub fn new(root_name: &str) -> MenuResult<Self> {
        let mut tree = Self {
            nodes: Vec::new(),
            root: ComponentId(0),
        };
        tree.root = tree.alloc(Node {
            name: normalize_name(root_name)?,
            parent: None,
            root_cache: Cell::new(None),
            payload: Payload::RootMenu {
                children: Vec::new(),
            },
        });
        Ok(tree)
    }

    /// The primary root menu of this tree.
    pub fn root_id(&self) -> ComponentId {
        self.root
    }

    /// Create an additional free-standing root menu in this arena.
    pub fn new_root_menu(&mut self, name: &str) -> MenuResult<ComponentId> {
        let name = normalize_name(name)?;
        Ok(self.alloc(Node {
            name,
            parent: None,
            root_cache: Cell::new(None),
            payload: Payload::RootMenu {
                children: Vec::new(),
            },
        }))
    }

    /// Whether `id` still addresses a live node.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.get(id.0).is_some_and(Option::is_some)
    }

    /// Handles of every live node, in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| ComponentId(i))
    }

    pub fn kind(&self, id: ComponentId) -> ComponentKind {
        self.node(id).payload.kind()
    }

    pub fn name(&self, id: ComponentId) -> &str {
        &self.node(id).name
    }

    /// Rename a component. The value is trimmed; empty or whitespace-only
    /// names are rejected and leave the component unchanged.
    pub fn set_name(&mut self, id: ComponentId, name: &str) -> MenuResult<()> {
        self.node_mut(id).name = normalize_name(name)?;
        Ok(())
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.node(id).parent
    }

    /// The ordered children of a composite; empty for leaves.
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.node(id).payload.children()
    }

    // ------------------------------------------------------------------
    // Construction: every constructor attaches the new node to a parent
    // composite in one step.
    // ------------------------------------------------------------------

    /// Append a new submenu under `parent`.
    pub fn add_menu(&mut self, parent: ComponentId, name: &str) -> MenuResult<ComponentId> {
        self.attach_new(parent, name, Payload::Menu {
            children: Vec::new(),
        })
    }

    /// Append a new function under `parent`.
    pub fn add_function(&mut self, parent: ComponentId, name: &str) -> MenuResult<ComponentId> {
        self.attach_new(parent, name, Payload::Function {
            arguments: Vec::new(),
        })
    }

    /// Append a new PDF leaf under `parent`; the name is the file path.
    pub fn add_pdf_file(&mut self, parent: ComponentId, file_name: &str) -> MenuResult<ComponentId> {
        self.attach_new(parent, file_name, Payload::PdfFile)
    }

    /// Append a new graphic menu under `parent`, with default measures.
    pub fn add_graphic_menu(&mut self, parent: ComponentId, name: &str) -> MenuResult<ComponentId> {
        self.attach_new(parent, name, Payload::GraphicMenu(GraphicMenuProps::default()))
    }

    fn attach_new(
        &mut self,
        parent: ComponentId,
        name: &str,
        payload: Payload,
    ) -> MenuResult<ComponentId> {
        let name = normalize_name(name)?;
        self.require_composite(parent, &name)?;

        let id = self.alloc(Node {
            name,
            parent: Some(parent),
            root_cache: Cell::new(None),
            payload,
        });

        if let Some(children) = self.node_mut(parent).payload.children_mut() {
            children.push(id);
        }
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Structural mutation
    // ------------------------------------------------------------------

    /// Move a component under a new parent composite.
    ///
    /// The root memo of the moved node and of every descendant is
    /// invalidated, since the identity of "the root" may change. Moving a
    /// node to the parent it already has is a no-op beyond that
    /// invalidation. Root menus cannot be reparented, and a move under
    /// the node itself or one of its descendants is rejected.
    pub fn set_parent(&mut self, id: ComponentId, new_parent: ComponentId) -> MenuResult<()> {
        if self.kind(id) == ComponentKind::RootMenu {
            return Err(MenuError::InvalidOwnerType {
                name: self.name(id).to_string(),
                expected: "non-root component to move",
            });
        }
        self.require_composite(new_parent, self.name(id))?;
        if new_parent == id || self.is_descendant_of(new_parent, id) {
            return Err(MenuError::WouldCycle {
                name: self.name(id).to_string(),
            });
        }

        self.invalidate_root_cache(id);

        let old_parent = self.node(id).parent;
        if old_parent == Some(new_parent) {
            return Ok(());
        }

        if let Some(old) = old_parent {
            self.detach(old, id);
        }
        self.node_mut(id).parent = Some(new_parent);
        if let Some(children) = self.node_mut(new_parent).payload.children_mut() {
            children.push(id);
        }
        Ok(())
    }

    /// Remove a component (and its whole subtree) via its parent.
    pub fn remove(&mut self, id: ComponentId) -> MenuResult<()> {
        let parent = self.node(id).parent.ok_or_else(|| MenuError::NoParent {
            name: self.name(id).to_string(),
        })?;
        self.remove_child(parent, id)
    }

    /// Remove `child` from the composite `menu`, dropping its subtree.
    ///
    /// Removal is by identity; names need not be unique. Asking a menu to
    /// remove a component it does not contain is an error.
    pub fn remove_child(&mut self, menu: ComponentId, child: ComponentId) -> MenuResult<()> {
        self.require_containment(menu, child)?;
        self.detach(menu, child);
        self.free_subtree(child);
        Ok(())
    }

    /// Exchange a component with its left neighbor via its parent.
    pub fn swap_previous(&mut self, id: ComponentId) -> MenuResult<()> {
        let parent = self.node(id).parent.ok_or_else(|| MenuError::NoParent {
            name: self.name(id).to_string(),
        })?;
        self.swap_child_previous(parent, id)
    }

    /// Exchange a component with its right neighbor via its parent.
    pub fn swap_next(&mut self, id: ComponentId) -> MenuResult<()> {
        let parent = self.node(id).parent.ok_or_else(|| MenuError::NoParent {
            name: self.name(id).to_string(),
        })?;
        self.swap_child_next(parent, id)
    }

    /// Exchange `child` with its left neighbor in `menu`. Swapping the
    /// first child is a no-op, not an error.
    pub fn swap_child_previous(&mut self, menu: ComponentId, child: ComponentId) -> MenuResult<()> {
        let index = self.child_index(menu, child)?;
        if index > 0 {
            if let Some(children) = self.node_mut(menu).payload.children_mut() {
                children.swap(index - 1, index);
            }
        }
        Ok(())
    }

    /// Exchange `child` with its right neighbor in `menu`. Swapping the
    /// last child is a no-op, not an error.
    pub fn swap_child_next(&mut self, menu: ComponentId, child: ComponentId) -> MenuResult<()> {
        let index = self.child_index(menu, child)?;
        let count = self.children(menu).len();
        if index + 1 < count {
            if let Some(children) = self.node_mut(menu).payload.children_mut() {
                children.swap(index, index + 1);
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    /// The ancestors of `id`, outermost first, excluding the root menu
    /// and the component itself.
    pub fn path(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut path = Vec::new();
        let mut current = self.node(id).parent;
        while let Some(ancestor) = current {
            if self.kind(ancestor) != ComponentKind::RootMenu {
                path.insert(0, ancestor);
            }
            current = self.node(ancestor).parent;
        }
        path
    }

    /// The ancestor names joined by [`PATH_DELIMITER`], with no trailing
    /// delimiter. Empty for components sitting directly under the root.
    pub fn path_as_string(&self, id: ComponentId) -> String {
        let names: Vec<&str> = self.path(id).into_iter().map(|a| self.name(a)).collect();
        names.join(PATH_DELIMITER)
    }

    /// The root menu this component pertains to.
    ///
    /// Resolved lazily by walking ancestors and memoized per node; the
    /// memo is refreshed only after a reparent, never by reads.
    pub fn root_of(&self, id: ComponentId) -> ComponentId {
        if let Some(cached) = self.node(id).root_cache.get() {
            return cached;
        }

        let mut current = id;
        while self.kind(current) != ComponentKind::RootMenu {
            match self.node(current).parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        self.node(id).root_cache.set(Some(current));
        current
    }

    /// Case-insensitive substring search over the component's visible
    /// text: its name, and for functions also the names and descriptions
    /// of its arguments.
    pub fn look_in_contents_for(&self, id: ComponentId, text: &str) -> bool {
        let needle = text.trim().to_lowercase();
        if self.name(id).to_lowercase().contains(&needle) {
            return true;
        }
        match &self.node(id).payload {
            Payload::Function { arguments } => {
                arguments.iter().any(|arg| arg.matches_text(text))
            }
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Copy
    // ------------------------------------------------------------------

    /// Deep-copy a component under a new owner composite.
    ///
    /// Every scalar field is copied and children are copied recursively;
    /// the copy shares no mutable state with the original. The owner must
    /// be a composite, root menus cannot be copied, and the owner must
    /// not sit inside the copied subtree itself: such a copy would have
    /// to contain itself.
    pub fn copy(&mut self, id: ComponentId, new_owner: ComponentId) -> MenuResult<ComponentId> {
        if self.kind(id) == ComponentKind::RootMenu {
            return Err(MenuError::InvalidOwnerType {
                name: self.name(id).to_string(),
                expected: "non-root component to copy",
            });
        }
        self.require_composite(new_owner, self.name(id))?;
        if new_owner == id || self.is_descendant_of(new_owner, id) {
            return Err(MenuError::WouldCycle {
                name: self.name(id).to_string(),
            });
        }

        let name = self.name(id).to_string();
        let payload = self.node(id).payload.clone();
        let copy_id = match payload {
            Payload::Menu { children } => {
                let copy_id = self.add_menu(new_owner, &name)?;
                for child in children {
                    self.copy(child, copy_id)?;
                }
                copy_id
            }
            Payload::Function { arguments } => {
                let copy_id = self.add_function(new_owner, &name)?;
                if let Some(dest) = self.arguments_mut(copy_id) {
                    *dest = arguments;
                }
                copy_id
            }
            Payload::PdfFile => self.add_pdf_file(new_owner, &name)?,
            Payload::GraphicMenu(props) => {
                let copy_id = self.add_graphic_menu(new_owner, &name)?;
                if let Some(dest) = self.graphic_menu_mut(copy_id) {
                    *dest = props;
                }
                copy_id
            }
            Payload::RootMenu { .. } => unreachable!("root menus rejected above"),
        };
        Ok(copy_id)
    }

    // ------------------------------------------------------------------
    // Variant payload access
    // ------------------------------------------------------------------

    /// The ordered arguments of a function, or `None` for other kinds.
    pub fn arguments(&self, id: ComponentId) -> Option<&[Argument]> {
        match &self.node(id).payload {
            Payload::Function { arguments } => Some(arguments),
            _ => None,
        }
    }

    /// Mutable access to a function's argument list.
    pub fn arguments_mut(&mut self, id: ComponentId) -> Option<&mut Vec<Argument>> {
        match &mut self.node_mut(id).payload {
            Payload::Function { arguments } => Some(arguments),
            _ => None,
        }
    }

    /// The scalar attributes of a graphic menu, or `None` for other kinds.
    pub fn graphic_menu(&self, id: ComponentId) -> Option<&GraphicMenuProps> {
        match &self.node(id).payload {
            Payload::GraphicMenu(props) => Some(props),
            _ => None,
        }
    }

    /// Mutable access to a graphic menu's scalar attributes.
    pub fn graphic_menu_mut(&mut self, id: ComponentId) -> Option<&mut GraphicMenuProps> {
        match &mut self.node_mut(id).payload {
            Payload::GraphicMenu(props) => Some(props),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn alloc(&mut self, node: Node) -> ComponentId {
        let id = ComponentId(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    fn node(&self, id: ComponentId) -> &Node {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .unwrap_or_else(|| panic!("stale component handle {:?}", id))
    }

    fn node_mut(&mut self, id: ComponentId) -> &mut Node {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .unwrap_or_else(|| panic!("stale component handle {:?}", id))
    }

    fn require_composite(&self, id: ComponentId, for_name: &str) -> MenuResult<()> {
        if self.kind(id).is_composite() {
            Ok(())
        } else {
            Err(MenuError::InvalidOwnerType {
                name: for_name.to_string(),
                expected: "menu",
            })
        }
    }

    fn require_containment(&self, menu: ComponentId, child: ComponentId) -> MenuResult<()> {
        if self.node(child).parent == Some(menu) {
            Ok(())
        } else {
            Err(MenuError::NotAChild {
                menu: self.name(menu).to_string(),
                child: self.name(child).to_string(),
            })
        }
    }

    fn child_index(&self, menu: ComponentId, child: ComponentId) -> MenuResult<usize> {
        self.require_containment(menu, child)?;
        // Containment was just checked, so the position exists.
        Ok(self
            .children(menu)
            .iter()
            .position(|&c| c == child)
            .unwrap_or_default())
    }

    fn detach(&mut self, parent: ComponentId, child: ComponentId) {
        if let Some(children) = self.node_mut(parent).payload.children_mut() {
            children.retain(|&c| c != child);
        }
    }

    fn free_subtree(&mut self, id: ComponentId) {
        for child in self.children(id).to_vec() {
            self.free_subtree(child);
        }
        self.nodes[id.0] = None;
    }

    fn invalidate_root_cache(&self, id: ComponentId) {
        self.node(id).root_cache.set(None);
        for &child in self.children(id) {
            self.invalidate_root_cache(child);
        }
    }

    fn is_descendant_of(&self, id: ComponentId, ancestor: ComponentId) -> bool {
        let mut current = self.node(id).parent;
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.node(p).parent;
        }
        false
    }
}
