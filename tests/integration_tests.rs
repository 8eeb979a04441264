//! End-to-end template rendering through the public facade.

use pretty_assertions::assert_eq;
use stencil::prelude::*;

fn engine() -> TemplateEngine {
    TemplateEngine::new(
        default_registry(),
        &default_imports(),
        &default_static_imports(),
    )
    .unwrap()
}

fn render(source: &str, bindings: &mut Bindings) -> String {
    let engine = engine();
    let template = engine.compile(source).unwrap();
    engine.render(&template, bindings).unwrap()
}

#[test]
fn literal_text_renders_unchanged() {
    let mut bindings = Bindings::new();
    assert_eq!(render("Hello world", &mut bindings), "Hello world");
    assert_eq!(render("", &mut bindings), "");
}

#[test]
fn escaped_delimiters_render_literally() {
    let mut bindings = Bindings::new();
    assert_eq!(render(r"a \{ not an expr } b", &mut bindings), "a { not an expr } b");
    assert_eq!(render(r"price \$5", &mut bindings), "price $5");
}

#[test]
fn binding_lookup_in_a_region() {
    let mut bindings = Bindings::new().with("greeting", "world");
    assert_eq!(render("Hello {$greeting}", &mut bindings), "Hello world");
}

#[test]
fn inline_reference_outside_a_region() {
    let mut bindings = Bindings::new().with("greeting", "world");
    assert_eq!(render("Hello $greeting!", &mut bindings), "Hello world!");
}

#[test]
fn string_method_call_on_a_binding() {
    let mut bindings = Bindings::new().with("greeting", "world");
    assert_eq!(render("{$greeting.length()}", &mut bindings), "5");
    assert_eq!(render("{$greeting.toUpperCase()}", &mut bindings), "WORLD");
    assert_eq!(
        render("{$greeting.substring(1,3)}", &mut bindings),
        "or"
    );
}

#[test]
fn integral_arithmetic_stays_integral() {
    let mut bindings = Bindings::new().with("one", 1i64).with("two", 2i64);
    assert_eq!(render("{$one+$two}", &mut bindings), "3");
}

#[test]
fn math_min_picks_the_matching_overload() {
    let mut bindings = Bindings::new();
    assert_eq!(render("{$Math::min(5,5)}", &mut bindings), "5");
    assert_eq!(render("{$Math::min(5,5.2)}", &mut bindings), "5.0");
    assert_eq!(render("{$Math::min(-5.2,5.1)}", &mut bindings), "-5.2");
}

#[test]
fn static_import_allows_bare_calls() {
    let mut bindings = Bindings::new();
    assert_eq!(render("{$min(7,3)}", &mut bindings), "3");
    assert_eq!(render("{$round(2.7)}", &mut bindings), "3");
}

#[test]
fn bad_reference_echoes_only_its_own_expression() {
    let mut bindings = Bindings::new().with("greeting", "world");
    assert_eq!(
        render("{$greeting} {$missing} {$greeting}", &mut bindings),
        "world {$missing} world"
    );
    assert_eq!(
        render("{$Math::noSuchMethod(1)}", &mut bindings),
        "{$Math::noSuchMethod(1)}"
    );
    assert_eq!(
        render("Hello {$greeting.noSuchMethod()}", &mut bindings),
        "Hello {$greeting.noSuchMethod()}"
    );
}

#[test]
fn compiled_segments_are_inspectable() {
    let engine = engine();
    let template = engine.compile("Hello {$who}").unwrap();
    let segments: &[stencil::Segment] = template.segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0], stencil::Segment::Literal("Hello ".to_string()));
    match &segments[1] {
        stencil::Segment::Expr { raw, node } => {
            assert_eq!(raw, "{$who}");
            assert_eq!(node.terms.len(), 1);
        }
        other => panic!("expected an expression segment, got {other:?}"),
    }
}

#[test]
fn assignment_is_invisible_but_binds() {
    let mut bindings = Bindings::new();
    assert_eq!(
        render("Hello {$msg=\"world\"}{$msg}", &mut bindings),
        "Hello world"
    );
    assert_eq!(bindings.get("msg"), Some(&Value::from("world")));
}

#[test]
fn type_hints_coerce_bindings() {
    let mut bindings = Bindings::new().with("x", 5.9);
    assert_eq!(render("{$(i)x}", &mut bindings), "5");
    assert_eq!(render("{$(f)x}", &mut bindings), "5.9");
}

#[test]
fn fold_is_left_to_right_without_precedence() {
    let mut bindings = Bindings::new();
    assert_eq!(render("{2+3*4}", &mut bindings), "20");
    assert_eq!(render("{10-2-3}", &mut bindings), "5");
}

#[test]
fn mixed_kind_expression_promotes_to_double() {
    let mut bindings = Bindings::new().with("n", 3i64);
    assert_eq!(render("{$n+0.5}", &mut bindings), "3.5");
    assert_eq!(render("{$n*2.0}", &mut bindings), "6.0");
}

#[test]
fn string_expression_concatenates() {
    let mut bindings = Bindings::new().with("who", "world").with("n", 2i64);
    assert_eq!(render("{\"hi \"+$who+\"!\"}", &mut bindings), "hi world!");
    assert_eq!(render("{\"n=\"+$n}", &mut bindings), "n=2");
}

#[test]
fn comparisons_and_boolean_logic() {
    let mut bindings = Bindings::new().with("a", 1i64).with("b", 2.0);
    assert_eq!(render("{$a<$b}", &mut bindings), "true");
    assert_eq!(render("{$a>=$b}", &mut bindings), "false");
    assert_eq!(render("{true&&false||true}", &mut bindings), "true");
}

#[test]
fn chained_calls_evaluate_left_to_right() {
    let mut bindings = Bindings::new().with("s", "  Hello  ");
    assert_eq!(render("{$s.trim().length()}", &mut bindings), "5");
    assert_eq!(
        render("{$s.trim().toLowerCase().replace(\"l\",\"L\")}", &mut bindings),
        "heLLo"
    );
}

#[test]
fn compile_once_render_many() {
    let engine = engine();
    let template = engine.compile("Hello {$who}").unwrap();
    for who in ["a", "b", "c"] {
        let mut bindings = Bindings::new().with("who", who);
        assert_eq!(
            engine.render(&template, &mut bindings).unwrap(),
            format!("Hello {who}")
        );
    }
}

#[test]
fn unterminated_region_fails_compilation() {
    let engine = engine();
    assert!(matches!(
        engine.compile("Hello {$one+"),
        Err(ParseError::UnterminatedExpression { .. })
    ));
}

#[test]
fn division_by_zero_aborts_the_render() {
    let engine = engine();
    let template = engine.compile("ok {1/0} never").unwrap();
    assert_eq!(
        engine.render(&template, &mut Bindings::new()).unwrap_err(),
        RenderError::DivisionByZero
    );
}

#[test]
fn native_failure_is_fatal_with_the_call_name() {
    let engine = engine();
    let template = engine.compile("{$s.substring(99)}").unwrap();
    let mut bindings = Bindings::new().with("s", "short");
    match engine.render(&template, &mut bindings).unwrap_err() {
        RenderError::NativeCall { name, .. } => assert_eq!(name, "substring"),
        other => panic!("expected a native-call failure, got {other}"),
    }
}
