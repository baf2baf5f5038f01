use contrib_graph::Error;
use contrib_graph::color_utils::{DARK_PALETTE, LIGHT_PALETTE, Palette, parse_hex};
use contrib_graph::config::{Config, Theme, resolve_token};
use contrib_graph::render::{RenderConfig, TooltipStyle};
use std::path::PathBuf;

fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn test_defaults_validate() {
    let config = Config::default();
    assert_eq!(config.login, "octocat");
    assert_eq!(config.output, PathBuf::from("assets/contributions.svg"));
    assert_eq!(config.token_var, "GITHUB_TOKEN");

    let settings = config.validate().unwrap();
    assert_eq!(settings.palette.colors(), LIGHT_PALETTE);
    assert_eq!(settings.scale.thresholds(), &[2, 5, 9]);
    assert_eq!(settings.render.columns, 53);
}

#[test]
fn test_partial_file_overrides_defaults() {
    let (_dir, path) = write_config(
        r#"
login = "someone"
output = "out/graph.svg"
theme = "dark"

[render]
columns = 52
tooltip_style = "date_prefixed"
show_legend = false
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.login, "someone");
    assert_eq!(config.output, PathBuf::from("out/graph.svg"));
    assert_eq!(config.theme, Theme::Dark);
    assert_eq!(config.endpoint, "https://api.github.com/graphql");
    assert_eq!(config.render.columns, 52);
    assert_eq!(config.render.cell_size, 10);
    assert_eq!(config.render.tooltip_style, TooltipStyle::DatePrefixed);
    assert!(!config.render.show_legend);

    let settings = config.validate().unwrap();
    assert_eq!(settings.palette.colors(), DARK_PALETTE);
    // Labels switch to a light gray over the dark empty-cell color
    assert_eq!(settings.render.text_color, "#8b949e");
}

#[test]
fn test_explicit_palette_needs_matching_thresholds() {
    let (_dir, path) = write_config(
        r##"
palette = ["#eeeeee", "#c6e48b", "#7bc96f", "#196127"]
"##,
    );
    let config = Config::load_from(&path).unwrap();
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

    let (_dir, path) = write_config(
        r##"
palette = ["#eeeeee", "#c6e48b", "#7bc96f", "#196127"]

[render]
thresholds = [3, 6]
"##,
    );
    let settings = Config::load_from(&path).unwrap().validate().unwrap();
    assert_eq!(settings.palette.len(), 4);
    assert_eq!(settings.scale.level(7), 3);
}

#[test]
fn test_invalid_values_are_rejected() {
    let bad_color = Config {
        palette: Some(vec!["green".to_string()]),
        render: RenderConfig {
            thresholds: vec![],
            ..Default::default()
        },
        ..Config::default()
    };
    assert!(bad_color.validate().is_err());

    let empty = Config {
        palette: Some(vec![]),
        ..Config::default()
    };
    assert!(empty.validate().is_err());

    let mut zero_columns = Config::default();
    zero_columns.render.columns = 0;
    assert!(zero_columns.validate().is_err());

    let mut no_login = Config::default();
    no_login.login = "  ".to_string();
    assert!(no_login.validate().is_err());

    let mut bad_background = Config::default();
    bad_background.render.background = Some("url(#x)".to_string());
    assert!(bad_background.validate().is_err());
}

#[test]
fn test_unparsable_file_is_an_error() {
    let (_dir, path) = write_config("login = [");
    assert!(matches!(
        Config::load_from(&path),
        Err(Error::InvalidConfig(_))
    ));
    assert!(Config::load_from(&path.with_file_name("missing.toml")).is_err());
}

#[test]
fn test_missing_token() {
    assert!(matches!(
        resolve_token("GITHUB_TOKEN", None),
        Err(Error::MissingToken { ref var }) if var == "GITHUB_TOKEN"
    ));
    assert!(resolve_token("GITHUB_TOKEN", Some("   ".to_string())).is_err());
    assert_eq!(
        resolve_token("GITHUB_TOKEN", Some("abc".to_string())).unwrap(),
        "abc"
    );
    // Secrets read from files usually carry a trailing newline
    assert_eq!(
        resolve_token("GITHUB_TOKEN", Some("abc\n".to_string())).unwrap(),
        "abc"
    );

    let config = Config {
        token_var: "CONTRIB_GRAPH_TEST_TOKEN_THAT_IS_NEVER_SET".to_string(),
        ..Config::default()
    };
    assert!(matches!(config.token(), Err(Error::MissingToken { .. })));
}

#[test]
fn test_hex_parsing() {
    assert_eq!(parse_hex("#fff"), Some((1.0, 1.0, 1.0)));
    assert_eq!(parse_hex("#000000"), Some((0.0, 0.0, 0.0)));
    assert!(parse_hex("ffffff").is_none());
    assert!(parse_hex("#ggg").is_none());
    assert!(parse_hex("#12345").is_none());
    assert!(Palette::new(["#fff", "#000"]).is_ok());
}

#[test]
fn test_oversized_geometry_is_rejected() {
    let (_dir, path) = write_config(
        r#"
[render]
columns = 400000000
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

    for (field, value) in [("cell_size", 4_000_000_000u32), ("gap", 1001), ("padding", 5000)] {
        let mut config = Config::default();
        match field {
            "cell_size" => config.render.cell_size = value,
            "gap" => config.render.gap = value,
            _ => config.render.padding = value,
        }
        assert!(config.validate().is_err(), "{} = {} was accepted", field, value);
    }

    let mut at_limit = Config::default();
    at_limit.render.columns = 1000;
    at_limit.render.gap = 1000;
    assert!(at_limit.validate().is_ok());
}

#[test]
fn test_extreme_geometry_saturates_instead_of_overflowing() {
    let config = RenderConfig {
        columns: 400_000_000,
        cell_size: u32::MAX,
        gap: u32::MAX,
        padding: u32::MAX,
        ..RenderConfig::default()
    };
    assert_eq!(config.width(), u32::MAX);
    assert_eq!(config.height(), u32::MAX);
    assert_eq!(config.cell_origin(5, 6), (u32::MAX, u32::MAX));
}
