//! Reconstruction of a menu tree from XML.
//!
//! Parsing happens in two steps: the quick-xml event stream is first
//! folded into a small element tree, which the component readers then
//! walk with case-insensitive name lookups.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, trace};

use crate::argument::{Argument, Viewer};
use crate::component::ComponentId;
use crate::error::{MenuError, MenuResult};
use crate::tree::MenuTree;

use super::{
    ATTR_DEPENDS, ATTR_IMAGE_HEIGHT, ATTR_IMAGE_WIDTH, ATTR_MIN_COLUMNS, ATTR_MULTISELECT,
    ATTR_NAME, ATTR_READ_ONLY, ATTR_REQUIRED, ATTR_TYPE, ATTR_VALUE, DEFAULT_ROOT_NAME,
    DOCUMENT_TAG, TAG_ARGUMENT, TAG_DATA, TAG_DESCRIPTION, TAG_FUNCTION, TAG_GRAPHIC_MENU,
    TAG_MENU, TAG_PDF, TAG_TEXT, TAG_VALUE, TAG_VIEWER,
};

/// Parse a complete XML document into a menu tree.
///
/// The top-level element must be the document tag; its `Name` attribute,
/// when present and non-blank, becomes the root menu's name.
pub fn tree_from_str(xml: &str) -> MenuResult<MenuTree> {
    let root_element = parse_element_tree(xml)?;
    if !root_element.is_named(DOCUMENT_TAG) {
        return Err(MenuError::MalformedXml {
            name: root_element.name.clone(),
            message: format!("expected document tag '{DOCUMENT_TAG}'"),
        });
    }

    let root_name = root_element
        .attribute(ATTR_NAME)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_ROOT_NAME);

    let mut tree = MenuTree::new(root_name)?;
    let root = tree.root_id();
    for child in &root_element.children {
        read_component(&mut tree, root, child)?;
    }
    Ok(tree)
}

fn read_component(tree: &mut MenuTree, parent: ComponentId, el: &XmlElement) -> MenuResult<()> {
    if el.is_named(TAG_MENU) {
        let menu = tree.add_menu(parent, el.required_name()?)?;
        for child in &el.children {
            read_component(tree, menu, child)?;
        }
    } else if el.is_named(TAG_FUNCTION) {
        let function = tree.add_function(parent, el.required_name()?)?;
        for child in &el.children {
            if child.is_named(TAG_ARGUMENT) {
                let argument = read_argument(child)?;
                if let Some(arguments) = tree.arguments_mut(function) {
                    arguments.push(argument);
                }
            } else {
                debug!(tag = child.name.as_str(), "skipping unknown function child");
            }
        }
    } else if el.is_named(TAG_PDF) {
        tree.add_pdf_file(parent, el.required_name()?)?;
    } else if el.is_named(TAG_GRAPHIC_MENU) {
        let graphic = tree.add_graphic_menu(parent, el.required_name()?)?;
        if let Some(props) = tree.graphic_menu_mut(graphic) {
            if let Some(width) = el.attribute(ATTR_IMAGE_WIDTH) {
                props.image_width = parse_measure(el, ATTR_IMAGE_WIDTH, width)?;
            }
            if let Some(height) = el.attribute(ATTR_IMAGE_HEIGHT) {
                props.image_height = parse_measure(el, ATTR_IMAGE_HEIGHT, height)?;
            }
            if let Some(columns) = el.attribute(ATTR_MIN_COLUMNS) {
                props.minimum_columns = parse_measure(el, ATTR_MIN_COLUMNS, columns)?;
            }
        }
    } else {
        debug!(tag = el.name.as_str(), "skipping unknown component tag");
    }
    Ok(())
}

fn read_argument(el: &XmlElement) -> MenuResult<Argument> {
    let name = el.required_name()?;
    trace!(name, "reading argument");

    let mut argument = Argument::new(name)?;
    if let Some(depends) = el.attribute(ATTR_DEPENDS) {
        argument.set_depends_from(depends);
    }
    if let Some(value) = el.attribute(ATTR_VALUE) {
        argument.set_value(value);
    }
    if let Some(required) = el.attribute(ATTR_REQUIRED) {
        argument.set_required(parse_bool(required));
    }
    if let Some(read_only) = el.attribute(ATTR_READ_ONLY) {
        argument.set_read_only(parse_bool(read_only));
    }
    if let Some(multiselect) = el.attribute(ATTR_MULTISELECT) {
        argument.set_allow_multiselect(parse_bool(multiselect));
    }

    for child in &el.children {
        if child.is_named(TAG_VIEWER) {
            if let Some(viewer_id) = child.attribute(ATTR_TYPE) {
                let viewer = Viewer::parse(viewer_id).ok_or_else(|| MenuError::UnknownViewer {
                    argument: argument.name().to_string(),
                    value: viewer_id.to_string(),
                })?;
                argument.set_viewer(viewer);
            }
            if let Some(data) = child.child_named(TAG_DATA) {
                argument.set_value_set(data.text.split(','));
            }
        } else if child.is_named(TAG_DESCRIPTION) {
            if let Some(text) = child.child_named(TAG_TEXT) {
                argument.set_description(&text.text);
            }
        } else if child.is_named(TAG_VALUE) {
            argument.set_value(&child.text);
        }
    }

    Ok(argument)
}

fn parse_bool(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

fn parse_measure(el: &XmlElement, attr: &str, value: &str) -> MenuResult<u16> {
    value.trim().parse().map_err(|_| MenuError::MalformedXml {
        name: el.attribute(ATTR_NAME).unwrap_or(&el.name).to_string(),
        message: format!("invalid {attr} value '{value}'"),
    })
}

// ----------------------------------------------------------------------
// Minimal element tree over the quick-xml event stream
// ----------------------------------------------------------------------

#[derive(Debug, Default)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    fn is_named(&self, tag: &str) -> bool {
        self.name.eq_ignore_ascii_case(tag)
    }

    /// Case-insensitive attribute lookup.
    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    fn child_named(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is_named(tag))
    }

    fn required_name(&self) -> MenuResult<&str> {
        self.attribute(ATTR_NAME).ok_or_else(|| MenuError::MalformedXml {
            name: self.name.clone(),
            message: format!("missing {ATTR_NAME} attribute"),
        })
    }
}

fn parse_element_tree(xml: &str) -> MenuResult<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(element_from(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from(e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Ok(Event::Text(ref t)) => {
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(&t.unescape()?);
                }
            }
            Ok(Event::End(_)) => {
                // quick-xml guarantees the end tag matches the start tag.
                if let Some(element) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(e.into()),
        }
        buf.clear();
    }

    Err(MenuError::MalformedXml {
        name: DOCUMENT_TAG.to_string(),
        message: "no root element".to_string(),
    })
}

fn element_from(start: &BytesStart<'_>) -> MenuResult<XmlElement> {
    let mut element = XmlElement {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        ..XmlElement::default()
    };
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        element.attributes.push((
            String::from_utf8_lossy(attribute.key.as_ref()).into_owned(),
            attribute.unescape_value()?.into_owned(),
        ));
    }
    Ok(element)
}
