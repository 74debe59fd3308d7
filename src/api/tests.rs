use crate::*;

const NAV: &str = r#"import { If, Else } from "jsx-conditionals";

export default <nav>
  <If condition={session}>
    <Logout />
  </If>
  <Else>
    <Login />
  </Else>
</nav>;
"#;

#[test]
fn test_transform_source() {
    let output = transform_source(NAV, "nav.jsx").unwrap();
    assert_eq!(
        output.code,
        "export default <nav>\n  {session ? <Logout /> : <Login />}\n  \n</nav>;\n"
    );
    assert_eq!(output.stats.chains, 1);
    assert_eq!(output.stats.branches, 1);
    assert_eq!(output.stats.imports_removed, 1);
}

#[test]
fn test_source_map_points_at_branches() {
    let output = transform_source(NAV, "nav.jsx").unwrap();
    let map: SourceMap = serde_json::from_str(output.source_map.as_deref().unwrap()).unwrap();
    assert_eq!(map.version, 1);
    assert_eq!(map.source, "nav.jsx");
    assert_eq!(map.mappings.len(), 1);

    let mapping = &map.mappings[0];
    assert_eq!(mapping.kind, format::MappingKind::Conditional);
    assert_eq!(mapping.branch, ast::BranchKind::If);
    assert_eq!(
        &output.code[mapping.generated.clone()],
        "session ? <Logout /> : <Login />"
    );
    assert!(mapping.original.slice(NAV).unwrap().starts_with("<If condition={session}>"));
}

#[test]
fn test_source_maps_can_be_disabled() {
    let options = TransformOptions { source_maps: false };
    let output = transform_source_with_options(NAV, "nav.jsx", &options).unwrap();
    assert!(output.source_map.is_none());
}

#[test]
fn test_transform_error_carries_file_and_node() {
    let diags = transform_source("<p>\n  <Else>lonely</Else>\n</p>;", "p.jsx").unwrap_err();
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].message,
        "<Else> has no matching <If> or <ElseIf>. Only whitespace is allowed between them."
    );
    assert_eq!(
        diags[0].notes,
        vec!["in file p.jsx", "at node <Else>lonely</Else>"]
    );
}

#[test]
fn test_parse_error_is_returned() {
    let diags = check_source("<p>", "p.jsx").unwrap_err();
    assert!(!diags.is_empty());
}

#[test]
fn test_check_source_counts() {
    let stats = check_source(
        "<a><If condition={x}>1</If><ElseIf condition={y}>2</ElseIf></a>;",
        "a.jsx",
    )
    .unwrap();
    assert_eq!(stats.chains, 1);
    assert_eq!(stats.branches, 1);
}

fn chain(links: usize) -> String {
    let branches: String = (1..links)
        .map(|i| format!("<ElseIf condition={{c{i}}}>{i}</ElseIf>"))
        .collect();
    format!("<><If condition={{c0}}>0</If>{}</>;\n", branches)
}

#[test]
fn test_transformed_chain_checks_clean() {
    let output = transform_source(&chain(120), "chain.jsx").unwrap();
    let stats = check_source(&output.code, "chain.jsx").unwrap();
    assert_eq!(stats, transform::TransformStats::default());
}

#[test]
fn test_overlong_chain_is_a_diagnostic() {
    let diags = transform_source(&chain(300), "chain.jsx").unwrap_err();
    assert_eq!(diags[0].message, "nesting depth exceeded (maximum 256 levels)");
    assert_eq!(
        diags[0].help.as_deref(),
        Some("extract deeply nested markup into separate components")
    );
    assert!(check_source(&chain(300), "chain.jsx").is_err());
}

#[test]
fn test_transform_file_takes_json_trees() {
    let dir = tempfile::tempdir().unwrap();
    let unit = parse_source_silent(NAV, "nav.jsx").unwrap();
    let tree = adapter::HostAdapter::raise(&adapter::JsonAdapter::default(), &unit).unwrap();
    let path = dir.path().join("nav.json");
    std::fs::write(&path, tree).unwrap();

    let outcome = transform_file(&path, dir.path().join("out.json"), &TransformOptions::default());
    let output = outcome.result.unwrap();
    assert!(output.source_map.is_none());
    assert_eq!(output.stats.chains, 1);
    let unit: ast::SourceUnit = serde_json::from_str(&output.code).unwrap();
    assert!(ast::navigate::branch_elements(&unit).is_empty());
    assert_eq!(
        format::format_unit(&unit),
        "export default <nav>\n  {session ? <Logout /> : <Login />}\n  \n</nav>;\n"
    );
}

#[test]
fn test_check_with_adapter_reads_json() {
    let unit = parse_source_silent("<p><Else>x</Else></p>;", "p.jsx").unwrap();
    let tree = adapter::HostAdapter::raise(&adapter::JsonAdapter::default(), &unit).unwrap();
    let diags = check_with_adapter(&adapter::JsonAdapter::default(), &tree, "p.json").unwrap_err();
    assert_eq!(diags[0].notes[0], "in file p.json");
}

#[test]
fn test_transform_project_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let project = project::Project::with_defaults("app", dir.path());
    std::fs::create_dir_all(project.source_dir.join("pages")).unwrap();
    std::fs::write(project.source_dir.join("nav.jsx"), NAV).unwrap();
    std::fs::write(
        project.source_dir.join("pages").join("bad.jsx"),
        "<p><ElseIf condition={x} /></p>;",
    )
    .unwrap();

    let outcomes = transform_project(&project, &TransformOptions::for_project(&project));
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].result.is_ok());
    assert!(outcomes[1].result.is_err());

    for outcome in &outcomes {
        write_outcome(outcome).unwrap();
    }
    let written = std::fs::read_to_string(project.out_dir.join("nav.jsx")).unwrap();
    assert!(written.contains("session ? <Logout /> : <Login />"));
    assert!(project.out_dir.join("nav.jsx.map").exists());
    assert!(!project.out_dir.join("pages").join("bad.jsx").exists());
}

#[test]
fn test_map_path_for() {
    assert_eq!(
        map_path_for(std::path::Path::new("dist/a.jsx")),
        std::path::PathBuf::from("dist/a.jsx.map")
    );
}
