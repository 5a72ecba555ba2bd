//! QSS knowledge base
//!
//! Static tables of properties, widgets, sub-controls and pseudo-states.
//! The validator and completion-style consumers read the same tables.

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Value type a property expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Color,
    /// Length with a unit, or `0`
    Measurement,
    /// Plain numeral or boolean
    Number,
    /// Free-form text or keyword; not checked
    String,
    Url,
    /// Composite shorthand such as `1px solid red`
    Border,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Measurement => "measurement",
            Self::Number => "number",
            Self::String => "string",
            Self::Url => "url",
            Self::Border => "border",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix of dynamic `Q_PROPERTY` assignments
const DYNAMIC_PROPERTY_PREFIX: &str = "qproperty-";

/// Largest edit distance still offered as a suggestion
const MAX_SUGGESTION_DISTANCE: usize = 2;

static PROPERTY_TYPES: LazyLock<FxHashMap<&'static str, PropertyType>> = LazyLock::new(|| {
    use PropertyType as T;

    let mut m = FxHashMap::default();

    // === Colors ===
    m.insert("accent-color", T::Color);
    m.insert("alternate-background-color", T::Color);
    m.insert("background-color", T::Color);
    m.insert("border-color", T::Color);
    m.insert("border-top-color", T::Color);
    m.insert("border-right-color", T::Color);
    m.insert("border-bottom-color", T::Color);
    m.insert("border-left-color", T::Color);
    m.insert("color", T::Color);
    m.insert("gridline-color", T::Color);
    m.insert("outline-color", T::Color);
    m.insert("placeholder-text-color", T::Color);
    m.insert("selection-background-color", T::Color);
    m.insert("selection-color", T::Color);

    // === Box model ===
    m.insert("margin", T::Measurement);
    m.insert("margin-top", T::Measurement);
    m.insert("margin-right", T::Measurement);
    m.insert("margin-bottom", T::Measurement);
    m.insert("margin-left", T::Measurement);
    m.insert("padding", T::Measurement);
    m.insert("padding-top", T::Measurement);
    m.insert("padding-right", T::Measurement);
    m.insert("padding-bottom", T::Measurement);
    m.insert("padding-left", T::Measurement);
    m.insert("spacing", T::Measurement);

    // === Geometry ===
    m.insert("width", T::Measurement);
    m.insert("height", T::Measurement);
    m.insert("min-width", T::Measurement);
    m.insert("min-height", T::Measurement);
    m.insert("max-width", T::Measurement);
    m.insert("max-height", T::Measurement);
    m.insert("top", T::Measurement);
    m.insert("right", T::Measurement);
    m.insert("bottom", T::Measurement);
    m.insert("left", T::Measurement);
    m.insert("icon-size", T::Measurement);
    m.insert("position", T::String);

    // === Borders ===
    m.insert("border", T::Border);
    m.insert("border-top", T::Border);
    m.insert("border-right", T::Border);
    m.insert("border-bottom", T::Border);
    m.insert("border-left", T::Border);
    m.insert("border-width", T::Measurement);
    m.insert("border-top-width", T::Measurement);
    m.insert("border-right-width", T::Measurement);
    m.insert("border-bottom-width", T::Measurement);
    m.insert("border-left-width", T::Measurement);
    m.insert("border-radius", T::Measurement);
    m.insert("border-top-left-radius", T::Measurement);
    m.insert("border-top-right-radius", T::Measurement);
    m.insert("border-bottom-left-radius", T::Measurement);
    m.insert("border-bottom-right-radius", T::Measurement);
    m.insert("border-style", T::String);
    m.insert("border-top-style", T::String);
    m.insert("border-right-style", T::String);
    m.insert("border-bottom-style", T::String);
    m.insert("border-left-style", T::String);
    m.insert("border-image", T::Url);

    // === Outline ===
    m.insert("outline", T::Border);
    m.insert("outline-offset", T::Measurement);
    m.insert("outline-radius", T::Measurement);
    m.insert("outline-top-left-radius", T::Measurement);
    m.insert("outline-top-right-radius", T::Measurement);
    m.insert("outline-bottom-left-radius", T::Measurement);
    m.insert("outline-bottom-right-radius", T::Measurement);
    m.insert("outline-style", T::String);

    // === Background ===
    m.insert("background", T::Border);
    m.insert("background-image", T::Border);
    m.insert("background-attachment", T::String);
    m.insert("background-clip", T::String);
    m.insert("background-origin", T::String);
    m.insert("background-position", T::String);
    m.insert("background-repeat", T::String);

    // === Images ===
    m.insert("image", T::Url);
    m.insert("icon", T::Url);
    m.insert("image-position", T::String);

    // === Text ===
    m.insert("font", T::String);
    m.insert("font-family", T::String);
    m.insert("font-size", T::Measurement);
    m.insert("font-style", T::String);
    m.insert("font-weight", T::String);
    m.insert("letter-spacing", T::Measurement);
    m.insert("text-align", T::String);
    m.insert("text-decoration", T::String);

    // === Sub-control placement ===
    m.insert("subcontrol-origin", T::String);
    m.insert("subcontrol-position", T::String);

    // === Widget-specific ===
    m.insert("opacity", T::Number);
    m.insert("button-layout", T::Number);
    m.insert("dialogbuttonbox-buttons-have-icons", T::Number);
    m.insert("lineedit-password-character", T::Number);
    m.insert("lineedit-password-mask-delay", T::Number);
    m.insert("messagebox-text-interaction-flags", T::Number);
    m.insert("paint-alternating-row-colors-for-empty-area", T::Number);
    m.insert("show-decoration-selected", T::Number);
    m.insert("titlebar-show-tooltips-on-buttons", T::Number);
    m.insert("widget-animation-duration", T::Number);

    m
});

static PROPERTY_NAMES: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut names: Vec<&'static str> = PROPERTY_TYPES.keys().copied().collect();
    names.sort_unstable();
    names
});

/// Properties taking one to four values (top, right, bottom, left)
const SHORTHANDS: &[&str] = &[
    "margin",
    "padding",
    "border-width",
    "border-radius",
    "border-color",
    "border-style",
    "outline-radius",
];

const WIDGETS: &[&str] = &[
    "QAbstractButton",
    "QAbstractItemView",
    "QAbstractScrollArea",
    "QCheckBox",
    "QColumnView",
    "QComboBox",
    "QCommandLinkButton",
    "QDateEdit",
    "QDateTimeEdit",
    "QDial",
    "QDialog",
    "QDialogButtonBox",
    "QDockWidget",
    "QDoubleSpinBox",
    "QFontComboBox",
    "QFrame",
    "QGroupBox",
    "QHeaderView",
    "QLCDNumber",
    "QLabel",
    "QLineEdit",
    "QListView",
    "QListWidget",
    "QMainWindow",
    "QMenu",
    "QMenuBar",
    "QMessageBox",
    "QProgressBar",
    "QPushButton",
    "QRadioButton",
    "QScrollArea",
    "QScrollBar",
    "QSizeGrip",
    "QSlider",
    "QSpinBox",
    "QSplitter",
    "QStackedWidget",
    "QStatusBar",
    "QTabBar",
    "QTabWidget",
    "QTableView",
    "QTableWidget",
    "QTextEdit",
    "QTimeEdit",
    "QToolBar",
    "QToolBox",
    "QToolButton",
    "QToolTip",
    "QTreeView",
    "QTreeWidget",
    "QWidget",
];

/// Lowercased widget name → canonical spelling
static WIDGET_INDEX: LazyLock<FxHashMap<String, &'static str>> = LazyLock::new(|| {
    WIDGETS
        .iter()
        .map(|&name| (name.to_ascii_lowercase(), name))
        .collect()
});

static WIDGET_SUB_CONTROLS: LazyLock<FxHashMap<&'static str, &'static [&'static str]>> = LazyLock::new(|| {
    let mut m: FxHashMap<&'static str, &'static [&'static str]> = FxHashMap::default();

    // === Buttons ===
    m.insert("QCheckBox", &["indicator"]);
    m.insert("QRadioButton", &["indicator"]);
    m.insert("QPushButton", &["menu-indicator"]);
    m.insert(
        "QToolButton",
        &["menu-indicator", "menu-button", "menu-arrow", "up-arrow", "down-arrow", "left-arrow", "right-arrow"],
    );

    // === Inputs ===
    m.insert("QComboBox", &["drop-down", "down-arrow"]);
    m.insert("QSpinBox", &["up-button", "up-arrow", "down-button", "down-arrow"]);
    m.insert("QDoubleSpinBox", &["up-button", "up-arrow", "down-button", "down-arrow"]);
    m.insert("QDateEdit", &["up-button", "up-arrow", "down-button", "down-arrow"]);
    m.insert("QDateTimeEdit", &["up-button", "up-arrow", "down-button", "down-arrow"]);
    m.insert("QTimeEdit", &["up-button", "up-arrow", "down-button", "down-arrow"]);
    m.insert("QSlider", &["groove", "handle", "add-page", "sub-page"]);
    m.insert("QProgressBar", &["chunk"]);

    // === Containers ===
    m.insert("QAbstractScrollArea", &["corner"]);
    m.insert("QDockWidget", &["title", "close-button", "float-button"]);
    m.insert("QGroupBox", &["title", "indicator"]);
    m.insert("QMainWindow", &["separator"]);
    m.insert("QSplitter", &["handle"]);
    m.insert("QTabWidget", &["pane", "tab-bar", "left-corner", "right-corner"]);
    m.insert("QTabBar", &["tab", "close-button", "tear", "scroller"]);
    m.insert("QToolBox", &["tab"]);
    m.insert(
        "QScrollBar",
        &[
            "handle",
            "add-line",
            "sub-line",
            "add-page",
            "sub-page",
            "up-arrow",
            "down-arrow",
            "left-arrow",
            "right-arrow",
        ],
    );

    // === Menus and bars ===
    m.insert(
        "QMenu",
        &["item", "indicator", "separator", "right-arrow", "left-arrow", "scroller", "tearoff"],
    );
    m.insert("QMenuBar", &["item"]);
    m.insert("QStatusBar", &["item"]);
    m.insert("QToolBar", &["separator", "handle"]);

    // === Item views ===
    m.insert("QAbstractItemView", &["item", "indicator"]);
    m.insert("QColumnView", &["item", "left-arrow", "right-arrow"]);
    m.insert("QHeaderView", &["section", "up-arrow", "down-arrow"]);
    m.insert("QListView", &["item", "indicator"]);
    m.insert("QListWidget", &["item", "indicator"]);
    m.insert("QTableView", &["item", "indicator"]);
    m.insert("QTableWidget", &["item", "indicator"]);
    m.insert("QTreeView", &["branch", "item", "indicator"]);
    m.insert("QTreeWidget", &["branch", "item", "indicator"]);

    m
});

/// Sub-controls assumed plausible on widgets the tables do not know
const COMMON_SUB_CONTROLS: &[&str] = &[
    "item",
    "indicator",
    "handle",
    "separator",
    "title",
    "up-arrow",
    "down-arrow",
    "left-arrow",
    "right-arrow",
    "drop-down",
    "tab",
    "branch",
    "chunk",
    "groove",
    "up-button",
    "down-button",
    "add-line",
    "sub-line",
];

const PSEUDO_STATES: &[&str] = &[
    "active",
    "adjoins-item",
    "alternate",
    "bottom",
    "checked",
    "closable",
    "closed",
    "default",
    "disabled",
    "edit-focus",
    "editable",
    "enabled",
    "exclusive",
    "first",
    "flat",
    "floatable",
    "focus",
    "has-children",
    "has-siblings",
    "horizontal",
    "hover",
    "indeterminate",
    "last",
    "left",
    "maximized",
    "middle",
    "minimized",
    "movable",
    "next-selected",
    "no-frame",
    "non-exclusive",
    "off",
    "on",
    "only-one",
    "open",
    "pressed",
    "previous-selected",
    "read-only",
    "right",
    "selected",
    "top",
    "unchecked",
    "vertical",
    "window",
];

const UNITS: &[&str] = &["px", "pt", "em", "ex", "%"];

const COLOR_FUNCTIONS: &[&str] = &["rgb", "rgba", "hsv", "hsva", "hsl", "hsla"];

const GRADIENT_FUNCTIONS: &[&str] = &["qlineargradient", "qradialgradient", "qconicalgradient"];

const BORDER_STYLES: &[&str] = &[
    "dashed",
    "dot-dash",
    "dot-dot-dash",
    "dotted",
    "double",
    "groove",
    "inset",
    "none",
    "outset",
    "ridge",
    "solid",
];

/// Type of a known property; names must already be lowercase
///
/// Dynamic `qproperty-*` names are known but untyped, so they yield `None`.
pub fn property_type(name: &str) -> Option<PropertyType> {
    PROPERTY_TYPES.get(name).copied()
}

pub fn is_known_property(name: &str) -> bool {
    PROPERTY_TYPES.contains_key(name) || is_dynamic_property(name)
}

fn is_dynamic_property(name: &str) -> bool {
    name.len() > DYNAMIC_PROPERTY_PREFIX.len() && name.starts_with(DYNAMIC_PROPERTY_PREFIX)
}

/// Every typed property, sorted
pub fn properties() -> &'static [&'static str] {
    PROPERTY_NAMES.as_slice()
}

/// Properties starting with `prefix`, sorted
pub fn complete_properties(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.to_ascii_lowercase();
    properties()
        .iter()
        .copied()
        .filter(|name| name.starts_with(&prefix))
        .collect()
}

/// Nearest known property by edit distance, if close enough to suggest
pub fn closest_property(name: &str) -> Option<&'static str> {
    let name = name.to_ascii_lowercase();
    let mut best: Option<(usize, &'static str)> = None;
    for &candidate in properties() {
        let distance = edit_distance(&name, candidate);
        if distance <= MAX_SUGGESTION_DISTANCE && best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// Canonical spelling of a widget, matched case-insensitively
pub fn canonical_widget(name: &str) -> Option<&'static str> {
    WIDGET_INDEX.get(&name.to_ascii_lowercase()).copied()
}

pub fn widgets() -> &'static [&'static str] {
    WIDGETS
}

/// Sub-controls of a known widget, without the `::`
///
/// `None` means the widget is unknown; a known widget without sub-controls
/// yields an empty slice.
pub fn sub_controls(widget: &str) -> Option<&'static [&'static str]> {
    let canonical = canonical_widget(widget)?;
    Some(WIDGET_SUB_CONTROLS.get(canonical).copied().unwrap_or(&[]))
}

pub fn common_sub_controls() -> &'static [&'static str] {
    COMMON_SUB_CONTROLS
}

/// Whether `name` (without the colon) is a pseudo-state
pub fn is_pseudo_state(name: &str) -> bool {
    PSEUDO_STATES.contains(&name.to_ascii_lowercase().as_str())
}

pub fn pseudo_states() -> &'static [&'static str] {
    PSEUDO_STATES
}

pub fn units() -> &'static [&'static str] {
    UNITS
}

pub fn color_functions() -> &'static [&'static str] {
    COLOR_FUNCTIONS
}

pub fn gradient_functions() -> &'static [&'static str] {
    GRADIENT_FUNCTIONS
}

pub fn border_styles() -> &'static [&'static str] {
    BORDER_STYLES
}

/// Whether the property takes one to four box-side values
pub fn is_shorthand(property: &str) -> bool {
    SHORTHANDS.contains(&property)
}

/// Levenshtein distance over characters
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
