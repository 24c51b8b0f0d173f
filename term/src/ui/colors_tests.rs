use super::*;

#[test]
fn test_theme_from_string() {
    assert_eq!(Theme::from_string("Emerald"), Theme::Emerald);
    assert_eq!(Theme::from_string("Red"), Theme::Red);
    assert_eq!(Theme::from_string("nope"), Theme::Blue);
    assert_eq!(Theme::Indigo.to_string(), "Indigo");
}

#[test]
fn test_basic_palette_without_true_color() {
    let colors = Colors::new(Theme::Red.to_palette(false), false);
    assert_eq!(colors.buffer_bg, Color::Black);
    assert_eq!(colors.border_color, Color::LightRed);

    let colors = Colors::new(Theme::Red.to_palette(true), true);
    assert_eq!(colors.border_color, tailwind::RED.c400);
}

#[test]
fn test_parse_color() {
    assert_eq!(parse_color("red"), Some(Color::Red));
    assert_eq!(parse_color("#00ff00"), Some(Color::Rgb(0, 255, 0)));
    assert_eq!(parse_color(""), None);
    assert_eq!(parse_color("not-a-color"), None);
}

#[test]
fn test_text_style_later_layers_win() {
    let layers = vec![
        StyleLayer::color("black"),
        StyleLayer {
            bold: Some(true),
            ..StyleLayer::default()
        },
        StyleLayer::color("green"),
    ];

    let style = text_style(&layers);

    assert_eq!(style.fg, Some(Color::Green));
    assert!(style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn test_border_color() {
    let layers = vec![
        StyleLayer {
            border_color: Some("black".to_string()),
            ..StyleLayer::default()
        },
        StyleLayer::color("white"),
    ];

    assert_eq!(border_color(&layers), Some(Color::Black));
    assert_eq!(border_color(&[]), None);
}

#[test]
fn test_theme_next_wraps() {
    assert_eq!(Theme::Blue.next(), Theme::Emerald);
    assert_eq!(Theme::Red.next(), Theme::Blue);
}
