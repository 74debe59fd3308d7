use super::*;
use crate::format::format_unit;

const COMPONENT: &str = r#"import { If, Else } from "jsx-conditionals";

export default <div>
  <If condition={user.admin}>
    <Panel />
  </If>
  <Else>guest</Else>
</div>;
"#;

#[test]
fn test_source_adapter_rewrites_text() {
    let (out, stats) = run_adapter(&SourceAdapter, COMPONENT, "app.jsx").unwrap();
    assert!(out.contains("{user.admin ? <Panel /> : \"guest\"}"));
    assert!(!out.contains("jsx-conditionals"));
    assert_eq!(stats.chains, 1);
    assert_eq!(stats.branches, 1);
    assert_eq!(stats.imports_removed, 1);
}

#[test]
fn test_adapters_agree() {
    let from_source = run_adapter(&SourceAdapter, COMPONENT, "app.jsx").unwrap().0;

    let json = JsonAdapter::default();
    let unit = SourceAdapter.lower(COMPONENT, "app.jsx").unwrap();
    let tree = json.raise(&unit).unwrap();
    let (transformed_tree, _) = run_adapter(&json, &tree, "app.json").unwrap();
    let from_json = format_unit(&json.lower(&transformed_tree, "app.json").unwrap());

    assert_eq!(from_source, from_json);
}

#[test]
fn test_compact_json_is_one_line() {
    let unit = SourceAdapter.lower("a;", "a.jsx").unwrap();
    let compact = JsonAdapter { pretty: false }.raise(&unit).unwrap();
    assert!(!compact.contains('\n'));
    assert!(compact.contains("\"name\":\"a.jsx\""));
}

#[test]
fn test_transform_error_names_file() {
    let diags = run_adapter(&SourceAdapter, "<div><Else /></div>;", "bad.jsx").unwrap_err();
    assert_eq!(diags.len(), 1);
    assert!(diags[0].notes.iter().any(|n| n.contains("bad.jsx")));
}

#[test]
fn test_parse_error_passes_through() {
    let diags = run_adapter(&SourceAdapter, "<div>;", "bad.jsx").unwrap_err();
    assert!(!diags.is_empty());
}

#[test]
fn test_create_adapter() {
    assert_eq!(create_adapter("jsx").map(|a| a.name()), Some("jsx"));
    assert_eq!(create_adapter("json").map(|a| a.name()), Some("json"));
    assert!(create_adapter("vue").is_none());
    let picked = adapter_for_path(std::path::Path::new("tree.json"));
    assert_eq!(picked.name(), "json");
    let fallback = adapter_for_path(std::path::Path::new("README"));
    assert_eq!(fallback.name(), "jsx");
}
