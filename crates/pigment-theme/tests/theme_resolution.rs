//! End-to-end theme resolution from YAML text.

use pigment_config::{ConfigError, Scalar, parse_file};
use pigment_theme::{ThemeConfig, TokenValue, Variant};
use pretty_assertions::assert_eq;

const THEME: &str = r#"
theme:
  zIndex:
    '0': 0
    '10': 10
    '20': 20
    '30': 30
    '40': 40
    '50': 50
    '25': 25
    '50': 75
    '100': 100
    auto: auto
  maxWidth:
    '1/4': 25%
    '1/2': 50%
    '3/4': 75%
  extend:
    fontFamily:
      sans: [Inter var, system-ui, sans-serif]
variants:
  backgroundColor: [responsive, hover, focus]
  textColor: [responsive, hover, focus, group-hover]
plugins: [forms, line-clamp]
"#;

fn resolve(text: &str) -> Result<pigment_theme::FinalTheme, Vec<ConfigError>> {
    let root = parse_file(text, "theme.yaml").map_err(|e| vec![e])?;
    ThemeConfig::from_config_value(&root)
        .map_err(|e| vec![e])?
        .resolve()
}

#[test]
fn test_sample_theme() {
    let theme = resolve(THEME).unwrap();

    let z_index = &theme.category("zIndex").unwrap().tokens;
    let keys: Vec<&str> = z_index.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["0", "10", "20", "30", "40", "50", "25", "100", "auto"]);
    assert_eq!(z_index["50"], TokenValue::from(75));

    assert_eq!(theme.token("maxWidth", "3/4"), Some(&TokenValue::from("75%")));
    assert_eq!(
        theme.token("fontFamily", "sans").and_then(TokenValue::as_list),
        Some(
            &[
                Scalar::String("Inter var".into()),
                Scalar::String("system-ui".into()),
                Scalar::String("sans-serif".into()),
            ][..]
        )
    );

    assert_eq!(theme.variants("zIndex"), Some(&[Variant::Responsive][..]));
    assert_eq!(
        theme.variants("textColor"),
        Some(&[Variant::Responsive, Variant::Hover, Variant::Focus, Variant::GroupHover][..])
    );
    assert_eq!(theme.plugins(), &["forms".to_string(), "line-clamp".to_string()]);
}

#[test]
fn test_sample_theme_json_is_stable() {
    let first = resolve(THEME).unwrap().to_json().unwrap();
    let second = resolve(THEME).unwrap().to_json().unwrap();
    assert_eq!(first, second);
    assert!(first.contains("\"group-hover\""));
}

#[test]
fn test_unknown_variant_points_at_source() {
    let errors = resolve("variants:\n  backgroundColor: [hover, bogus]\n").unwrap_err();

    match errors.as_slice() {
        [ConfigError::UnknownVariant {
            category,
            variant,
            index,
            location,
        }] => {
            assert_eq!(category, "backgroundColor");
            assert_eq!(variant, "bogus");
            assert_eq!(*index, 1);
            let location = location.as_ref().unwrap();
            assert_eq!(location.file.as_deref(), Some("theme.yaml"));
            assert_eq!(location.col, 28);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(errors[0].is_fatal());
}

#[test]
fn test_malformed_category_from_text() {
    let errors = resolve("theme:\n  spacing: 4px\n").unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [ConfigError::MalformedCategory { category, .. }] if category == "spacing"
    ));
}

#[test]
fn test_all_theme_errors_point_at_source() {
    let errors = resolve(
        r#"
theme:
  spacing: 4px
variants:
  opacity: [bogus]
  textColor: [nope]
"#,
    )
    .unwrap_err();

    let found: Vec<(&str, usize, usize)> = errors
        .iter()
        .map(|e| {
            let location = e.location().unwrap();
            (e.code(), location.line, location.col)
        })
        .collect();
    assert_eq!(found, vec![("P-2-1", 3, 12), ("P-2-2", 5, 13), ("P-2-2", 6, 15)]);
}
