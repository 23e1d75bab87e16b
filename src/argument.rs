//! Function arguments.
//!
//! An [`Argument`] is an ordered, owned record attached to a function
//! component. It is not a tree node: it cannot be reparented and lives and
//! dies with its owning function. The viewer kind is purely descriptive
//! metadata carried through serialization for the benefit of editors.

use crate::component::normalize_name;
use crate::error::{MenuError, MenuResult};

/// Separator used when rendering a value set as a single string
pub const VALUE_SET_SEPARATOR: char = ',';

/// Presentation kind associated with an argument's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewer {
    /// Free-form text entry
    #[default]
    Plain,
    DataColumns,
    DataValues,
    Map,
    TaxTree,
    /// Single choice from the argument's value set
    SimpleValueSet,
    /// Multiple choices from the argument's value set
    MultiValueSet,
    SimpleColorPicker,
    MultiColorPicker,
}

impl Viewer {
    /// All viewer kinds, in serialization order.
    pub const ALL: [Viewer; 9] = [
        Viewer::Plain,
        Viewer::DataColumns,
        Viewer::DataValues,
        Viewer::Map,
        Viewer::TaxTree,
        Viewer::SimpleValueSet,
        Viewer::MultiValueSet,
        Viewer::SimpleColorPicker,
        Viewer::MultiColorPicker,
    ];

    /// The serialized literal for this viewer kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Viewer::Plain => "Plain",
            Viewer::DataColumns => "DataColumns",
            Viewer::DataValues => "DataValues",
            Viewer::Map => "Map",
            Viewer::TaxTree => "TaxTree",
            Viewer::SimpleValueSet => "SimpleValueSet",
            Viewer::MultiValueSet => "MultiValueSet",
            Viewer::SimpleColorPicker => "SimpleColorPicker",
            Viewer::MultiColorPicker => "MultiColorPicker",
        }
    }

    /// Case-insensitive lookup of a serialized viewer literal.
    pub fn parse(s: &str) -> Option<Viewer> {
        Viewer::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// An argument of a function component
///
/// `depends_from` is a by-name soft reference to a sibling argument; the
/// model stores it trimmed but never checks that the sibling exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    name: String,
    required: bool,
    read_only: bool,
    viewer: Viewer,
    depends_from: String,
    value: String,
    allow_multiselect: bool,
    description: String,
    value_set: Vec<String>,
}

impl Argument {
    /// Create an argument with the given name and all other fields at
    /// their defaults.
    pub fn new(name: &str) -> MenuResult<Self> {
        Ok(Self {
            name: normalize_name(name)?,
            required: false,
            read_only: false,
            viewer: Viewer::default(),
            depends_from: String::new(),
            value: String::new(),
            allow_multiselect: false,
            description: String::new(),
            value_set: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the argument; the value is trimmed, and an empty or
    /// whitespace-only name is rejected.
    pub fn set_name(&mut self, name: &str) -> MenuResult<()> {
        self.name = normalize_name(name)?;
        Ok(())
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn viewer(&self) -> Viewer {
        self.viewer
    }

    pub fn set_viewer(&mut self, viewer: Viewer) {
        self.viewer = viewer;
    }

    /// Name of the sibling argument this one depends on, or empty.
    pub fn depends_from(&self) -> &str {
        &self.depends_from
    }

    pub fn set_depends_from(&mut self, depends_from: &str) {
        self.depends_from = depends_from.trim().to_string();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.trim().to_string();
    }

    pub fn allow_multiselect(&self) -> bool {
        self.allow_multiselect
    }

    pub fn set_allow_multiselect(&mut self, allow: bool) {
        self.allow_multiselect = allow;
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Set the description. The value is stored verbatim, but the XML
    /// reader trims the surrounding whitespace of text nodes, so padding
    /// at the edges of a description does not survive a round trip.
    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    /// The candidate values for value-set viewers, in order.
    pub fn value_set(&self) -> &[String] {
        &self.value_set
    }

    pub fn set_value_set<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_set = values.into_iter().map(Into::into).collect();
    }

    /// Join the value set with [`VALUE_SET_SEPARATOR`], no trailing
    /// separator.
    pub fn value_set_as_string(&self) -> String {
        self.value_set.join(&VALUE_SET_SEPARATOR.to_string())
    }

    /// Whether the current viewer kind makes the value set meaningful.
    pub fn needs_value_set(&self) -> bool {
        matches!(self.viewer, Viewer::SimpleValueSet | Viewer::MultiValueSet)
    }

    /// Case-insensitive search over the argument's visible text.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_argument_defaults() {
        let arg = Argument::new("cols").unwrap();

        assert_eq!(arg.name(), "cols");
        assert!(!arg.is_required());
        assert!(!arg.is_read_only());
        assert_eq!(arg.viewer(), Viewer::Plain);
        assert_eq!(arg.depends_from(), "");
        assert_eq!(arg.value(), "");
        assert!(!arg.allow_multiselect());
        assert_eq!(arg.description(), "");
        assert!(arg.value_set().is_empty());
    }

    #[test]
    fn test_argument_name_invariant() {
        assert!(matches!(Argument::new(""), Err(MenuError::InvalidName)));
        assert!(matches!(Argument::new("   "), Err(MenuError::InvalidName)));

        let mut arg = Argument::new("  alpha  ").unwrap();
        assert_eq!(arg.name(), "alpha");

        assert!(matches!(arg.set_name(" "), Err(MenuError::InvalidName)));
        assert_eq!(arg.name(), "alpha");

        arg.set_name("  beta  ").unwrap();
        assert_eq!(arg.name(), "beta");
    }

    #[test]
    fn test_setters_trim() {
        let mut arg = Argument::new("x").unwrap();
        arg.set_value("  9  ");
        arg.set_depends_from("  other ");

        assert_eq!(arg.value(), "9");
        assert_eq!(arg.depends_from(), "other");
    }

    #[test]
    fn test_needs_value_set() {
        let mut arg = Argument::new("x").unwrap();

        for viewer in Viewer::ALL {
            arg.set_viewer(viewer);
            let expected =
                matches!(viewer, Viewer::SimpleValueSet | Viewer::MultiValueSet);
            assert_eq!(arg.needs_value_set(), expected, "viewer {viewer:?}");
        }
    }

    #[test]
    fn test_value_set_as_string() {
        let mut arg = Argument::new("x").unwrap();
        assert_eq!(arg.value_set_as_string(), "");

        arg.set_value_set(["red"]);
        assert_eq!(arg.value_set_as_string(), "red");

        arg.set_value_set(["red", "green", "blue"]);
        assert_eq!(arg.value_set_as_string(), "red,green,blue");
    }

    #[test]
    fn test_viewer_parse_case_insensitive() {
        assert_eq!(Viewer::parse("Map"), Some(Viewer::Map));
        assert_eq!(Viewer::parse("taxtree"), Some(Viewer::TaxTree));
        assert_eq!(Viewer::parse(" MULTIVALUESET "), Some(Viewer::MultiValueSet));
        assert_eq!(Viewer::parse("Gauge"), None);
    }

    #[test]
    fn test_viewer_round_trip_literals() {
        for viewer in Viewer::ALL {
            assert_eq!(Viewer::parse(viewer.as_str()), Some(viewer));
        }
    }

    #[test]
    fn test_matches_text_searches_description() {
        let mut arg = Argument::new("alpha").unwrap();
        arg.set_description("Significance level");

        assert!(arg.matches_text("ALPHA"));
        assert!(arg.matches_text("significance"));
        assert!(arg.matches_text("  level  "));
        assert!(!arg.matches_text("beta"));
    }
}
