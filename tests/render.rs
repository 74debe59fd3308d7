use jsx_conditionals::parse_source_silent;
use jsx_conditionals::runtime::{Environment, RenderMode, Renderer, Value};
use jsx_conditionals::transform::transform_unit;

const NOT_RENDERED: &str = "THIS TEXT SHOULD NOT BE RENDERED!";

/// Transform `source`, render it, and fail if `notRendered()` was called.
fn render(source: &str) -> String {
    let unit = parse_source_silent(source, "test.jsx")
        .unwrap_or_else(|diags| panic!("parse errors: {:?}", diags));
    let (unit, _) = transform_unit(unit).unwrap_or_else(|e| panic!("{}", e));

    let mut env = Environment::new();
    env.bind("val", 3.0)
        .function("notRendered", |_| Value::from(NOT_RENDERED));
    let mut renderer = Renderer::new(env, RenderMode::Transformed);
    let html = renderer.render_unit(&unit).unwrap().render();
    assert!(
        renderer.calls().is_empty(),
        "unselected branch evaluated: {:?}",
        renderer.calls()
    );
    assert!(!html.contains(NOT_RENDERED));
    html
}

#[test]
fn test_positive_if() {
    assert_eq!(render("<If condition={true}>Condition is true</If>;"), "Condition is true");
}

#[test]
fn test_positive_if_inside_fragment() {
    assert_eq!(
        render("<><If condition={true}>Condition is true</If></>;"),
        "Condition is true"
    );
}

#[test]
fn test_positive_if_inside_div() {
    assert_eq!(
        render("<div><If condition={true}>Condition is true</If></div>;"),
        "<div>Condition is true</div>"
    );
}

#[test]
fn test_evaluated_conditions() {
    assert_eq!(
        render("<If condition={val === 3}>Condition is true</If>;"),
        "Condition is true"
    );
    assert_eq!(
        render("<div><If condition={val >= 10}>{notRendered()}</If></div>;"),
        "<div></div>"
    );
}

#[test]
fn test_negative_if() {
    assert_eq!(
        render("<div><If condition={false}>{notRendered()}</If></div>;"),
        "<div></div>"
    );
    assert_eq!(render("<><If condition={false}>{notRendered()}</If></>;"), "");
}

#[test]
fn test_simple_if_else() {
    let source = r#"
<div>
    <If condition={false}>{notRendered()}</If>
    <Else>Condition is false</Else>
</div>;
"#;
    assert_eq!(render(source), "<div>Condition is false</div>");
}

#[test]
fn test_nested_if() {
    let source = r#"
<If condition={true}>
    <If condition={true}>Both conditions are true</If>
</If>;
"#;
    assert_eq!(render(source), "Both conditions are true");
}

#[test]
fn test_nested_if_else() {
    let source = r#"
<If condition={true}>
    <If condition={false}>{notRendered()}</If>
    <Else><div>1st condition is true but 2nd condition is false</div></Else>
</If>;
"#;
    assert_eq!(
        render(source),
        "<div>1st condition is true but 2nd condition is false</div>"
    );
}

#[test]
fn test_whitespace_between_if_and_else() {
    let source = r#"
<>
    <If condition={false}>{notRendered()}</If>


    <Else>Condition was false</Else>
</>;
"#;
    assert_eq!(render(source), "Condition was false");
}

#[test]
fn test_else_with_multiple_children() {
    let source = r#"
<>
    <If condition={false}>{notRendered()}</If>
    <Else>
        <div>Child 1</div>
        <div>Child 2</div>
    </Else>
</>;
"#;
    assert_eq!(render(source), "<div>Child 1</div><div>Child 2</div>");
}

#[test]
fn test_else_if_ladder() {
    let source = r#"
<p>
  <If condition={val === 1}>{notRendered()}</If>
  <ElseIf condition={val === 2}>{notRendered()}</ElseIf>
  <ElseIf condition={val === 3}>three</ElseIf>
  <Else>{notRendered()}</Else>
</p>;
"#;
    assert_eq!(render(source), "<p>three</p>");
}

#[test]
fn test_fallback_renders_every_else() {
    let source = "<div><If condition={true}>yes</If><Else>no</Else></div>;";
    let unit = parse_source_silent(source, "test.jsx").unwrap();
    let mut renderer = Renderer::new(Environment::new(), RenderMode::Fallback);
    let html = renderer.render_unit(&unit).unwrap().render();
    assert_eq!(html, "<div>yesno</div>");
    assert_eq!(renderer.warnings().len(), 2);
}
