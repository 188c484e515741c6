use cachectl::{Cacheability, DirectiveKind, TimeUnit};
use cachectl_configuration::{ConfigError, PolicyEntry, PolicyFile, Preset};
use pretty_assertions::assert_eq;

const POLICIES: &str = r#"
policies:
  assets: static-assets
  account: private-user
  feed:
    cacheability: public
    sMaxAge:
      amount: 5
      unit: minutes
      enabled: true
    staleWhileRevalidate:
      amount: 30
      unit: seconds
      enabled: true
  logout:
    noStore: true
    cacheability: public
"#;

#[test]
fn test_policy_file_deserialize() {
    let file = PolicyFile::from_yaml(POLICIES).expect("failed to deserialize");

    assert_eq!(file.policies["assets"], PolicyEntry::Preset(Preset::StaticAssets));
    assert_eq!(file.policies["account"], PolicyEntry::Preset(Preset::PrivateUser));

    match &file.policies["feed"] {
        PolicyEntry::Config(config) => {
            assert_eq!(config.cacheability, Cacheability::Public);
            assert_eq!(config.s_max_age.unit, TimeUnit::Minutes);
            assert!(!config.max_age.enabled);
        }
        other => panic!("expected explicit config, got {other:?}"),
    }
}

#[test]
fn test_render_keeps_document_order() {
    let file = PolicyFile::from_yaml(POLICIES).expect("failed to deserialize");
    let rendered: Vec<_> = file.render().into_iter().collect();
    assert_eq!(
        rendered,
        vec![
            ("assets".to_string(), "public, immutable, max-age=31536000".to_string()),
            ("account".to_string(), "private, no-cache".to_string()),
            (
                "feed".to_string(),
                "public, s-maxage=300, stale-while-revalidate=30".to_string()
            ),
            ("logout".to_string(), "no-store".to_string()),
        ]
    );
}

#[test]
fn test_rendered_headers_validate() {
    let file = PolicyFile::from_yaml(POLICIES).expect("failed to deserialize");
    for (name, header) in file.render() {
        let parsed = cachectl::parse(&header).unwrap_or_else(|e| panic!("{name}: {e}"));
        if name == "feed" {
            assert_eq!(parsed.seconds(DirectiveKind::SMaxAge), Some(300));
        }
    }
}

#[test]
fn test_lookup_by_name() {
    let file = PolicyFile::from_yaml(POLICIES).expect("failed to deserialize");
    assert_eq!(file.header("logout").as_deref(), Some("no-store"));
    assert_eq!(file.header("missing"), None);
}

#[test]
fn test_unknown_preset_rejected() {
    let yaml = "policies:\n  assets: forever\n";
    assert!(matches!(
        PolicyFile::from_yaml(yaml),
        Err(ConfigError::UnknownPreset(name)) if name == "forever"
    ));
}

#[test]
fn test_misspelled_policy_field_rejected() {
    let yaml = "policies:\n  logout:\n    noStroe: true\n";
    assert!(matches!(
        PolicyFile::from_yaml(yaml),
        Err(ConfigError::Yaml(_))
    ));
}

#[test]
fn test_empty_document() {
    let file = PolicyFile::from_yaml("policies: {}\n").expect("failed to deserialize");
    assert!(file.render().is_empty());
}
