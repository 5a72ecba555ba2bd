//! Pins the type of every property in the knowledge base

use qsskit_lint::knowledge::{is_known_property, properties, property_type};
use qsskit_lint::PropertyType::{self, Border, Color, Measurement, Number, String as Text, Url};

const EXPECTED: &[(&str, PropertyType)] = &[
    ("accent-color", Color),
    ("alternate-background-color", Color),
    ("background", Border),
    ("background-attachment", Text),
    ("background-clip", Text),
    ("background-color", Color),
    ("background-image", Border),
    ("background-origin", Text),
    ("background-position", Text),
    ("background-repeat", Text),
    ("border", Border),
    ("border-bottom", Border),
    ("border-bottom-color", Color),
    ("border-bottom-left-radius", Measurement),
    ("border-bottom-right-radius", Measurement),
    ("border-bottom-style", Text),
    ("border-bottom-width", Measurement),
    ("border-color", Color),
    ("border-image", Url),
    ("border-left", Border),
    ("border-left-color", Color),
    ("border-left-style", Text),
    ("border-left-width", Measurement),
    ("border-radius", Measurement),
    ("border-right", Border),
    ("border-right-color", Color),
    ("border-right-style", Text),
    ("border-right-width", Measurement),
    ("border-style", Text),
    ("border-top", Border),
    ("border-top-color", Color),
    ("border-top-left-radius", Measurement),
    ("border-top-right-radius", Measurement),
    ("border-top-style", Text),
    ("border-top-width", Measurement),
    ("border-width", Measurement),
    ("bottom", Measurement),
    ("button-layout", Number),
    ("color", Color),
    ("dialogbuttonbox-buttons-have-icons", Number),
    ("font", Text),
    ("font-family", Text),
    ("font-size", Measurement),
    ("font-style", Text),
    ("font-weight", Text),
    ("gridline-color", Color),
    ("height", Measurement),
    ("icon", Url),
    ("icon-size", Measurement),
    ("image", Url),
    ("image-position", Text),
    ("left", Measurement),
    ("letter-spacing", Measurement),
    ("lineedit-password-character", Number),
    ("lineedit-password-mask-delay", Number),
    ("margin", Measurement),
    ("margin-bottom", Measurement),
    ("margin-left", Measurement),
    ("margin-right", Measurement),
    ("margin-top", Measurement),
    ("max-height", Measurement),
    ("max-width", Measurement),
    ("messagebox-text-interaction-flags", Number),
    ("min-height", Measurement),
    ("min-width", Measurement),
    ("opacity", Number),
    ("outline", Border),
    ("outline-bottom-left-radius", Measurement),
    ("outline-bottom-right-radius", Measurement),
    ("outline-color", Color),
    ("outline-offset", Measurement),
    ("outline-radius", Measurement),
    ("outline-style", Text),
    ("outline-top-left-radius", Measurement),
    ("outline-top-right-radius", Measurement),
    ("padding", Measurement),
    ("padding-bottom", Measurement),
    ("padding-left", Measurement),
    ("padding-right", Measurement),
    ("padding-top", Measurement),
    ("paint-alternating-row-colors-for-empty-area", Number),
    ("placeholder-text-color", Color),
    ("position", Text),
    ("right", Measurement),
    ("selection-background-color", Color),
    ("selection-color", Color),
    ("show-decoration-selected", Number),
    ("spacing", Measurement),
    ("subcontrol-origin", Text),
    ("subcontrol-position", Text),
    ("text-align", Text),
    ("text-decoration", Text),
    ("titlebar-show-tooltips-on-buttons", Number),
    ("top", Measurement),
    ("widget-animation-duration", Number),
    ("width", Measurement),
];

#[test]
fn test_every_property_has_its_type() {
    for &(name, expected) in EXPECTED {
        assert_eq!(property_type(name), Some(expected), "{}", name);
        assert!(is_known_property(name), "{}", name);
    }
}

#[test]
fn test_table_size() {
    assert_eq!(EXPECTED.len(), 96);
    assert_eq!(properties().len(), EXPECTED.len());
}

#[test]
fn test_no_untested_property() {
    for name in properties() {
        assert!(EXPECTED.iter().any(|(n, _)| n == name), "{} is not pinned", name);
    }
}

#[test]
fn test_background_is_composite() {
    assert_eq!(property_type("background"), Some(Border));
    assert_eq!(property_type("background-image"), Some(Border));
    assert_eq!(property_type("background-color"), Some(Color));
}
