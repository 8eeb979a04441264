//! Command-line renderer: `stencil <template-file> [name=value ...]`.
//!
//! Reads a template file, compiles it against the stock modules, renders it
//! with bindings taken from `name=value` arguments, and prints the result.
//! Values that parse as integers, floats, or booleans are bound with that
//! kind; everything else is bound as a string. With no arguments, runs a
//! built-in smoke-test table and exits non-zero if any row fails. Set
//! `RUST_LOG=stencil=debug` to watch compilation and fallback decisions.

use std::process::ExitCode;

use stencil::prelude::*;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        return self_test();
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read '{path}': {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut bindings = Bindings::new();
    for arg in args {
        let Some((name, raw)) = arg.split_once('=') else {
            eprintln!("error: binding '{arg}' is not name=value");
            return ExitCode::from(2);
        };
        bindings.set(name, parse_binding(raw));
    }

    match run(&source, &mut bindings) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(source: &str, bindings: &mut Bindings) -> Result<String, Box<dyn std::error::Error>> {
    let engine = TemplateEngine::new(
        default_registry(),
        &default_imports(),
        &default_static_imports(),
    )?;
    let template = engine.compile(source)?;
    Ok(engine.render(&template, bindings)?)
}

/// Render a fixed table of templates and compare against known-good output.
fn self_test() -> ExitCode {
    let cases: &[(&str, &str)] = &[
        ("Hello world", "Hello world"),
        (r"escaped \{ and \$", "escaped { and $"),
        ("Hello {$greeting}", "Hello world"),
        ("Hello $greeting!", "Hello world!"),
        ("{$greeting.length()}", "5"),
        ("{$one+$two}", "3"),
        ("{$one+0.5}", "1.5"),
        ("{$Math::min(5,5.2)}", "5.0"),
        ("{$Math::min(-5.2,5.1)}", "-5.2"),
        ("{$Math::noSuchMethod(1)}", "{$Math::noSuchMethod(1)}"),
        ("{$missing} stays", "{$missing} stays"),
        ("Hello {$msg=\"world\"}{$msg}", "Hello world"),
        ("{2+3*4}", "20"),
    ];

    let engine = match TemplateEngine::new(
        default_registry(),
        &default_imports(),
        &default_static_imports(),
    ) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("self-test setup failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut failures = 0u32;
    for (source, expected) in cases {
        let mut bindings = Bindings::new()
            .with("greeting", "world")
            .with("one", 1i64)
            .with("two", 2i64);
        let got = engine
            .compile(source)
            .map_err(|e| e.to_string())
            .and_then(|t| engine.render(&t, &mut bindings).map_err(|e| e.to_string()));
        match got {
            Ok(got) if got == *expected => println!("ok   {source}"),
            Ok(got) => {
                failures += 1;
                println!("FAIL {source}: expected '{expected}', got '{got}'");
            }
            Err(err) => {
                failures += 1;
                println!("FAIL {source}: {err}");
            }
        }
    }

    if failures == 0 {
        println!("all {} cases passed", cases.len());
        ExitCode::SUCCESS
    } else {
        println!("{failures} case(s) failed");
        ExitCode::FAILURE
    }
}

/// Bind the most specific kind the raw text parses as.
fn parse_binding(raw: &str) -> Value {
    if let Ok(v) = raw.parse::<i64>() {
        return Value::Long(v);
    }
    if let Ok(v) = raw.parse::<f64>() {
        return Value::Double(v);
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Str(raw.to_string()),
    }
}
