//! Serialization of a menu tree to XML.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::trace;

use crate::argument::Argument;
use crate::component::{ComponentId, ComponentKind, GraphicMenuProps};
use crate::error::MenuResult;
use crate::tree::MenuTree;

use super::{
    ATTR_DEPENDS, ATTR_IMAGE_HEIGHT, ATTR_IMAGE_WIDTH, ATTR_LANGUAGE, ATTR_MIN_COLUMNS,
    ATTR_MULTISELECT, ATTR_NAME, ATTR_READ_ONLY, ATTR_REQUIRED, ATTR_TYPE, ATTR_VALUE,
    DESCRIPTION_LANGUAGE, DOCUMENT_TAG, TAG_ARGUMENT, TAG_DATA, TAG_DESCRIPTION, TAG_FUNCTION,
    TAG_GRAPHIC_MENU, TAG_MENU, TAG_PDF, TAG_TEXT, TAG_VALUE, TAG_VIEWER, TRUE_LITERAL,
};

type XmlWriter = Writer<Vec<u8>>;

/// Serialize the subtree under `root` as a complete XML document.
///
/// The document tag wraps the root menu's children and carries the root
/// menu's name.
pub fn tree_to_string(tree: &MenuTree, root: ComponentId) -> MenuResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut start = BytesStart::new(DOCUMENT_TAG);
    start.push_attribute((ATTR_NAME, tree.name(root)));
    writer.write_event(Event::Start(start))?;

    for &child in tree.children(root) {
        write_component(&mut writer, tree, child)?;
    }

    writer.write_event(Event::End(BytesEnd::new(DOCUMENT_TAG)))?;

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_component(writer: &mut XmlWriter, tree: &MenuTree, id: ComponentId) -> MenuResult<()> {
    match tree.kind(id) {
        ComponentKind::RootMenu | ComponentKind::Menu => {
            let mut start = BytesStart::new(TAG_MENU);
            start.push_attribute((ATTR_NAME, tree.name(id)));
            writer.write_event(Event::Start(start))?;
            for &child in tree.children(id) {
                write_component(writer, tree, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(TAG_MENU)))?;
        }
        ComponentKind::Function => {
            trace!(name = tree.name(id), "writing function");
            let mut start = BytesStart::new(TAG_FUNCTION);
            start.push_attribute((ATTR_NAME, tree.name(id)));
            let arguments = tree.arguments(id).unwrap_or_default();
            if arguments.is_empty() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
                for argument in arguments {
                    write_argument(writer, argument)?;
                }
                writer.write_event(Event::End(BytesEnd::new(TAG_FUNCTION)))?;
            }
        }
        ComponentKind::PdfFile => {
            let mut start = BytesStart::new(TAG_PDF);
            start.push_attribute((ATTR_NAME, tree.name(id)));
            writer.write_event(Event::Empty(start))?;
        }
        ComponentKind::GraphicMenu => {
            let mut start = BytesStart::new(TAG_GRAPHIC_MENU);
            start.push_attribute((ATTR_NAME, tree.name(id)));
            if let Some(props) = tree.graphic_menu(id) {
                let defaults = GraphicMenuProps::default();
                if props.image_width != defaults.image_width {
                    start.push_attribute((ATTR_IMAGE_WIDTH, props.image_width.to_string().as_str()));
                }
                if props.image_height != defaults.image_height {
                    start.push_attribute((
                        ATTR_IMAGE_HEIGHT,
                        props.image_height.to_string().as_str(),
                    ));
                }
                if props.minimum_columns != defaults.minimum_columns {
                    start.push_attribute((
                        ATTR_MIN_COLUMNS,
                        props.minimum_columns.to_string().as_str(),
                    ));
                }
            }
            writer.write_event(Event::Empty(start))?;
        }
    }
    Ok(())
}

fn write_argument(writer: &mut XmlWriter, argument: &Argument) -> MenuResult<()> {
    trace!(name = argument.name(), "writing argument");

    let mut start = BytesStart::new(TAG_ARGUMENT);
    start.push_attribute((ATTR_NAME, argument.name()));
    if !argument.depends_from().is_empty() {
        start.push_attribute((ATTR_DEPENDS, argument.depends_from()));
    }
    if !argument.value().is_empty() {
        start.push_attribute((ATTR_VALUE, argument.value()));
    }
    if argument.is_required() {
        start.push_attribute((ATTR_REQUIRED, TRUE_LITERAL));
    }
    if argument.is_read_only() {
        start.push_attribute((ATTR_READ_ONLY, TRUE_LITERAL));
    }
    if argument.allow_multiselect() {
        start.push_attribute((ATTR_MULTISELECT, TRUE_LITERAL));
    }
    writer.write_event(Event::Start(start))?;

    let mut viewer = BytesStart::new(TAG_VIEWER);
    viewer.push_attribute((ATTR_TYPE, argument.viewer().as_str()));
    if argument.needs_value_set() && !argument.value_set().is_empty() {
        writer.write_event(Event::Start(viewer))?;
        writer.write_event(Event::Start(BytesStart::new(TAG_DATA)))?;
        writer.write_event(Event::Text(BytesText::new(&argument.value_set_as_string())))?;
        writer.write_event(Event::End(BytesEnd::new(TAG_DATA)))?;
        writer.write_event(Event::End(BytesEnd::new(TAG_VIEWER)))?;
    } else {
        writer.write_event(Event::Empty(viewer))?;
    }

    if !argument.description().trim().is_empty() {
        writer.write_event(Event::Start(BytesStart::new(TAG_DESCRIPTION)))?;
        let mut text = BytesStart::new(TAG_TEXT);
        text.push_attribute((ATTR_LANGUAGE, DESCRIPTION_LANGUAGE));
        writer.write_event(Event::Start(text))?;
        writer.write_event(Event::Text(BytesText::new(argument.description())))?;
        writer.write_event(Event::End(BytesEnd::new(TAG_TEXT)))?;
        writer.write_event(Event::End(BytesEnd::new(TAG_DESCRIPTION)))?;
    }

    // The value travels both as an attribute and as a trailing element.
    if !argument.value().is_empty() {
        writer.write_event(Event::Start(BytesStart::new(TAG_VALUE)))?;
        writer.write_event(Event::Text(BytesText::new(argument.value())))?;
        writer.write_event(Event::End(BytesEnd::new(TAG_VALUE)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(TAG_ARGUMENT)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::Viewer;

    #[test]
    fn test_boolean_attributes_written_only_when_true() {
        let mut tree = MenuTree::new("Applications").unwrap();
        let fun = tree.add_function(tree.root_id(), "anova").unwrap();
        let mut arg = Argument::new("alpha").unwrap();
        arg.set_required(true);
        tree.arguments_mut(fun).unwrap().push(arg);

        let xml = tree_to_string(&tree, tree.root_id()).unwrap();

        assert!(xml.contains(r#"Required="TRUE""#));
        assert!(!xml.contains("ReadOnly"));
        assert!(!xml.contains("AllowMultiSelect"));
        assert!(!xml.contains("DependsFrom"));
    }

    #[test]
    fn test_value_set_only_for_value_set_viewers() {
        let mut tree = MenuTree::new("Applications").unwrap();
        let fun = tree.add_function(tree.root_id(), "plot").unwrap();

        let mut plain = Argument::new("title").unwrap();
        plain.set_value_set(["a", "b"]);
        let mut chooser = Argument::new("palette").unwrap();
        chooser.set_viewer(Viewer::SimpleValueSet);
        chooser.set_value_set(["red", "green"]);
        let args = tree.arguments_mut(fun).unwrap();
        args.push(plain);
        args.push(chooser);

        let xml = tree_to_string(&tree, tree.root_id()).unwrap();

        assert!(xml.contains("<Data>red,green</Data>"));
        assert!(!xml.contains("a,b"));
    }

    #[test]
    fn test_graphic_menu_omits_default_measures() {
        let mut tree = MenuTree::new("Applications").unwrap();
        let graphic = tree.add_graphic_menu(tree.root_id(), "Plots").unwrap();

        let xml = tree_to_string(&tree, tree.root_id()).unwrap();
        assert!(xml.contains(r#"<GraphicMenu Name="Plots"/>"#));

        tree.graphic_menu_mut(graphic).unwrap().image_width = 100;
        let xml = tree_to_string(&tree, tree.root_id()).unwrap();
        assert!(xml.contains(r#"ImageWidth="100""#));
        assert!(!xml.contains("ImageHeight"));
    }

    #[test]
    fn test_document_tag_carries_root_name() {
        let tree = MenuTree::new("MyApp").unwrap();
        let xml = tree_to_string(&tree, tree.root_id()).unwrap();

        assert!(xml.contains(r#"<Menue Name="MyApp">"#));
        assert!(xml.trim_end().ends_with("</Menue>"));
    }
}
