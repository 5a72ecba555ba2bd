//! CSS named colors
//!
//! The 148 CSS color keywords plus `transparent`. Lookup is case-insensitive.

use rustc_hash::FxHashMap;
use std::sync::LazyLock;

use crate::color::{Color, Notation};

/// Map of color keywords to their `0xRRGGBB` values
static NAMED_COLORS: LazyLock<FxHashMap<&'static str, u32>> = LazyLock::new(|| {
    let mut m = FxHashMap::default();

    // === Reds ===
    m.insert("indianred", 0xCD5C5C);
    m.insert("lightcoral", 0xF08080);
    m.insert("salmon", 0xFA8072);
    m.insert("darksalmon", 0xE9967A);
    m.insert("lightsalmon", 0xFFA07A);
    m.insert("crimson", 0xDC143C);
    m.insert("red", 0xFF0000);
    m.insert("firebrick", 0xB22222);
    m.insert("darkred", 0x8B0000);

    // === Pinks ===
    m.insert("pink", 0xFFC0CB);
    m.insert("lightpink", 0xFFB6C1);
    m.insert("hotpink", 0xFF69B4);
    m.insert("deeppink", 0xFF1493);
    m.insert("mediumvioletred", 0xC71585);
    m.insert("palevioletred", 0xDB7093);

    // === Oranges ===
    m.insert("coral", 0xFF7F50);
    m.insert("tomato", 0xFF6347);
    m.insert("orangered", 0xFF4500);
    m.insert("darkorange", 0xFF8C00);
    m.insert("orange", 0xFFA500);

    // === Yellows ===
    m.insert("gold", 0xFFD700);
    m.insert("yellow", 0xFFFF00);
    m.insert("lightyellow", 0xFFFFE0);
    m.insert("lemonchiffon", 0xFFFACD);
    m.insert("lightgoldenrodyellow", 0xFAFAD2);
    m.insert("papayawhip", 0xFFEFD5);
    m.insert("moccasin", 0xFFE4B5);
    m.insert("peachpuff", 0xFFDAB9);
    m.insert("palegoldenrod", 0xEEE8AA);
    m.insert("khaki", 0xF0E68C);
    m.insert("darkkhaki", 0xBDB76B);

    // === Purples ===
    m.insert("lavender", 0xE6E6FA);
    m.insert("thistle", 0xD8BFD8);
    m.insert("plum", 0xDDA0DD);
    m.insert("violet", 0xEE82EE);
    m.insert("orchid", 0xDA70D6);
    m.insert("fuchsia", 0xFF00FF);
    m.insert("magenta", 0xFF00FF);
    m.insert("mediumorchid", 0xBA55D3);
    m.insert("mediumpurple", 0x9370DB);
    m.insert("rebeccapurple", 0x663399);
    m.insert("blueviolet", 0x8A2BE2);
    m.insert("darkviolet", 0x9400D3);
    m.insert("darkorchid", 0x9932CC);
    m.insert("darkmagenta", 0x8B008B);
    m.insert("purple", 0x800080);
    m.insert("indigo", 0x4B0082);
    m.insert("slateblue", 0x6A5ACD);
    m.insert("darkslateblue", 0x483D8B);
    m.insert("mediumslateblue", 0x7B68EE);

    // === Greens ===
    m.insert("greenyellow", 0xADFF2F);
    m.insert("chartreuse", 0x7FFF00);
    m.insert("lawngreen", 0x7CFC00);
    m.insert("lime", 0x00FF00);
    m.insert("limegreen", 0x32CD32);
    m.insert("palegreen", 0x98FB98);
    m.insert("lightgreen", 0x90EE90);
    m.insert("mediumspringgreen", 0x00FA9A);
    m.insert("springgreen", 0x00FF7F);
    m.insert("mediumseagreen", 0x3CB371);
    m.insert("seagreen", 0x2E8B57);
    m.insert("forestgreen", 0x228B22);
    m.insert("green", 0x008000);
    m.insert("darkgreen", 0x006400);
    m.insert("yellowgreen", 0x9ACD32);
    m.insert("olivedrab", 0x6B8E23);
    m.insert("olive", 0x808000);
    m.insert("darkolivegreen", 0x556B2F);
    m.insert("mediumaquamarine", 0x66CDAA);
    m.insert("darkseagreen", 0x8FBC8F);
    m.insert("lightseagreen", 0x20B2AA);
    m.insert("darkcyan", 0x008B8B);
    m.insert("teal", 0x008080);

    // === Blues and cyans ===
    m.insert("aqua", 0x00FFFF);
    m.insert("cyan", 0x00FFFF);
    m.insert("lightcyan", 0xE0FFFF);
    m.insert("paleturquoise", 0xAFEEEE);
    m.insert("aquamarine", 0x7FFFD4);
    m.insert("turquoise", 0x40E0D0);
    m.insert("mediumturquoise", 0x48D1CC);
    m.insert("darkturquoise", 0x00CED1);
    m.insert("cadetblue", 0x5F9EA0);
    m.insert("steelblue", 0x4682B4);
    m.insert("lightsteelblue", 0xB0C4DE);
    m.insert("powderblue", 0xB0E0E6);
    m.insert("lightblue", 0xADD8E6);
    m.insert("skyblue", 0x87CEEB);
    m.insert("lightskyblue", 0x87CEFA);
    m.insert("deepskyblue", 0x00BFFF);
    m.insert("dodgerblue", 0x1E90FF);
    m.insert("cornflowerblue", 0x6495ED);
    m.insert("royalblue", 0x4169E1);
    m.insert("blue", 0x0000FF);
    m.insert("mediumblue", 0x0000CD);
    m.insert("darkblue", 0x00008B);
    m.insert("navy", 0x000080);
    m.insert("midnightblue", 0x191970);

    // === Browns ===
    m.insert("cornsilk", 0xFFF8DC);
    m.insert("blanchedalmond", 0xFFEBCD);
    m.insert("bisque", 0xFFE4C4);
    m.insert("navajowhite", 0xFFDEAD);
    m.insert("wheat", 0xF5DEB3);
    m.insert("burlywood", 0xDEB887);
    m.insert("tan", 0xD2B48C);
    m.insert("rosybrown", 0xBC8F8F);
    m.insert("sandybrown", 0xF4A460);
    m.insert("goldenrod", 0xDAA520);
    m.insert("darkgoldenrod", 0xB8860B);
    m.insert("peru", 0xCD853F);
    m.insert("chocolate", 0xD2691E);
    m.insert("saddlebrown", 0x8B4513);
    m.insert("sienna", 0xA0522D);
    m.insert("brown", 0xA52A2A);
    m.insert("maroon", 0x800000);

    // === Whites ===
    m.insert("white", 0xFFFFFF);
    m.insert("snow", 0xFFFAFA);
    m.insert("honeydew", 0xF0FFF0);
    m.insert("mintcream", 0xF5FFFA);
    m.insert("azure", 0xF0FFFF);
    m.insert("aliceblue", 0xF0F8FF);
    m.insert("ghostwhite", 0xF8F8FF);
    m.insert("whitesmoke", 0xF5F5F5);
    m.insert("seashell", 0xFFF5EE);
    m.insert("beige", 0xF5F5DC);
    m.insert("oldlace", 0xFDF5E6);
    m.insert("floralwhite", 0xFFFAF0);
    m.insert("ivory", 0xFFFFF0);
    m.insert("antiquewhite", 0xFAEBD7);
    m.insert("linen", 0xFAF0E6);
    m.insert("lavenderblush", 0xFFF0F5);
    m.insert("mistyrose", 0xFFE4E1);

    // === Grays ===
    m.insert("gainsboro", 0xDCDCDC);
    m.insert("lightgray", 0xD3D3D3);
    m.insert("lightgrey", 0xD3D3D3);
    m.insert("silver", 0xC0C0C0);
    m.insert("darkgray", 0xA9A9A9);
    m.insert("darkgrey", 0xA9A9A9);
    m.insert("gray", 0x808080);
    m.insert("grey", 0x808080);
    m.insert("dimgray", 0x696969);
    m.insert("dimgrey", 0x696969);
    m.insert("lightslategray", 0x778899);
    m.insert("lightslategrey", 0x778899);
    m.insert("slategray", 0x708090);
    m.insert("slategrey", 0x708090);
    m.insert("darkslategray", 0x2F4F4F);
    m.insert("darkslategrey", 0x2F4F4F);
    m.insert("black", 0x000000);

    m
});

/// Resolve a color keyword
pub fn named_color(name: &str) -> Option<Color> {
    let lower = name.to_ascii_lowercase();
    if lower == "transparent" {
        return Some(Color::TRANSPARENT);
    }
    NAMED_COLORS.get(lower.as_str()).map(|&rgb| {
        let [_, red, green, blue] = rgb.to_be_bytes();
        Color::rgb(red, green, blue).with_notation(Notation::Hex6)
    })
}

/// Check whether `name` is a color keyword (`transparent` included)
pub fn is_named_color(name: &str) -> bool {
    name.eq_ignore_ascii_case("transparent") || NAMED_COLORS.contains_key(name.to_ascii_lowercase().as_str())
}

/// All color keywords except `transparent`, sorted
pub fn color_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = NAMED_COLORS.keys().copied().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert_eq!(color_names().len(), 148);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(named_color("red"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(named_color("RebeccaPurple"), Some(Color::rgb(0x66, 0x33, 0x99)));
        assert_eq!(named_color("grey"), named_color("gray"));
        assert_eq!(named_color("notacolor"), None);
    }

    #[test]
    fn test_transparent() {
        let color = named_color("Transparent").unwrap();
        assert_eq!(color.alpha, 0);
        assert!(is_named_color("transparent"));
    }

    #[test]
    fn test_is_named_color() {
        assert!(is_named_color("AliceBlue"));
        assert!(is_named_color("darkslategrey"));
        assert!(!is_named_color("palette"));
        assert!(!is_named_color(""));
    }
}
