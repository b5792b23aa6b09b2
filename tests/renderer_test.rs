use gootstrap::context::RenderContext;
use gootstrap::error::Error;
use gootstrap::renderer::{PlaceholderRenderer, TemplateRenderer};

fn context(pairs: &[(&str, &str)]) -> RenderContext {
    pairs.iter().copied().collect()
}

#[test]
fn test_placeholder_renderer() {
    let renderer = PlaceholderRenderer::new();
    let context = context(&[("Project", "demo"), ("DockerImg", "hub/demo")]);

    let result = renderer.render("a.txt", "hello {{.Project}}", &context).unwrap();
    assert_eq!(result, "hello demo");

    let result = renderer
        .render("Makefile", "img = {{ .DockerImg }}:$(version)\nrun {{.Project}}", &context)
        .unwrap();
    assert_eq!(result, "img = hub/demo:$(version)\nrun demo");
}

#[test]
fn test_unknown_placeholder_is_an_error() {
    let renderer = PlaceholderRenderer::new();
    let err = renderer
        .render("a.txt", "{{.Project}} {{.Missing}}", &context(&[("Project", "x")]))
        .unwrap_err();

    match err {
        Error::UnknownPlaceholder { name, template } => {
            assert_eq!(name, "Missing");
            assert_eq!(template, "a.txt");
        }
        other => panic!("Expected UnknownPlaceholder, got {other:?}"),
    }
}

#[test]
fn test_other_brace_syntax_is_left_verbatim() {
    let renderer = PlaceholderRenderer::new();
    let template = "{{ if .Project }}{% block %}{{Project}}{{ end }}";

    let result = renderer.render("a.txt", template, &RenderContext::new()).unwrap();
    assert_eq!(result, template);
}

#[test]
fn test_template_without_placeholders_is_unchanged() {
    let renderer = PlaceholderRenderer::new();
    let template = "grep -E '^[a-zA-Z_-]+:.*?## .*$$' $(MAKEFILE_LIST)\n";

    let result = renderer.render("Makefile", template, &RenderContext::new()).unwrap();
    assert_eq!(result, template);
}

#[test]
fn test_malformed_placeholder_is_an_error() {
    let renderer = PlaceholderRenderer::new();
    let context = context(&[("Project", "demo")]);

    for (template, marker) in [
        ("img={{.Docker.Img}} n={{.Project}}", "{{.Docker.Img}}"),
        ("n={{- .Project -}}", "{{- .Project -}}"),
        ("dot={{.}}", "{{.}}"),
        ("open={{.Project", "{{.Project"),
    ] {
        match renderer.render("Makefile", template, &context) {
            Err(Error::UnknownPlaceholder { name, template }) => {
                assert_eq!(name, marker);
                assert_eq!(template, "Makefile");
            }
            other => panic!("Expected UnknownPlaceholder for {template:?}, got {other:?}"),
        }
    }
}
