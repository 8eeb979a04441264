//! Tree-walking evaluation of compiled templates.
//!
//! Rendering walks segments in order: literals are appended verbatim,
//! expression nodes are evaluated against the bindings. An expression is a
//! flat term list evaluated as a strict left-to-right fold - there is no
//! operator precedence, by design.
//!
//! A [`BadReference`] raised while evaluating a segment is caught at the
//! segment boundary: the original source text of just that expression is
//! substituted and rendering continues. Every other evaluation fault aborts
//! the whole render call.

use stencil_core::{BadReference, Bindings, RenderError, Value, ValueKind};
use stencil_parser::{Coercion, ExprNode, MethodCall, RefTarget, RefTerm, Segment, Term, TermCode};
use stencil_registry::{HostRegistry, TypeTag};

use crate::overload::{format_arg_kinds, resolve_overload};
use crate::template::CompiledTemplate;

/// A render-time fault: recoverable per expression, or fatal to the render.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EvalFault {
    Bad(BadReference),
    Fatal(RenderError),
}

impl From<BadReference> for EvalFault {
    fn from(bad: BadReference) -> Self {
        EvalFault::Bad(bad)
    }
}

impl From<RenderError> for EvalFault {
    fn from(err: RenderError) -> Self {
        EvalFault::Fatal(err)
    }
}

/// Render a compiled template against a bindings map.
pub(crate) fn render(
    registry: &HostRegistry,
    template: &CompiledTemplate,
    bindings: &mut Bindings,
) -> Result<String, RenderError> {
    let mut out = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Expr { node, raw } => {
                let mut evaluator = Evaluator { registry, bindings };
                match evaluator.eval_node(node) {
                    Ok(value) => {
                        // A segment that is a single top-level assignment
                        // renders nothing; the written binding is its output.
                        let assignment_only =
                            node.terms.len() == 1 && node.terms[0].is_assignment;
                        if !assignment_only {
                            out.push_str(&value.to_string());
                        }
                    }
                    Err(EvalFault::Bad(bad)) => {
                        tracing::debug!(error = %bad, expr = raw.as_str(), "bad reference, echoing expression source");
                        out.push_str(raw);
                    }
                    Err(EvalFault::Fatal(err)) => return Err(err),
                }
            }
        }
    }
    Ok(out)
}

/// Evaluates expression nodes against one bindings map.
struct Evaluator<'a> {
    registry: &'a HostRegistry,
    bindings: &'a mut Bindings,
}

/// Binary operators the fold recognizes.
const BINARY_OPS: &[&str] = &[
    "+", "-", "*", "/", "%", "==", "!=", "<=", ">=", "<", ">", "&&", "||", "&", "|",
];

impl Evaluator<'_> {
    /// Evaluate a whole expression node with a left-to-right fold.
    fn eval_node(&mut self, node: &ExprNode) -> Result<Value, EvalFault> {
        let mut acc: Option<Value> = None;
        let mut pending: Option<String> = None;
        let mut negate = false;
        let mut not = false;

        for term in &node.terms {
            if let TermCode::Ops(run) = &term.code {
                if acc.is_none() || pending.is_some() {
                    // Unary position: only sign and logical-not apply.
                    apply_unary_run(run, node.kind, &mut negate, &mut not)?;
                } else {
                    let (binary, unary_rest) = split_operator_run(run, node.kind)?;
                    pending = Some(binary);
                    apply_unary_run(&unary_rest, node.kind, &mut negate, &mut not)?;
                }
                continue;
            }

            let mut value = self.eval_term(term)?;
            if let Some(coercion) = term.coerce {
                value = apply_coercion(value, coercion)?;
            }
            if negate {
                value = negate_value(value)?;
                negate = false;
            }
            if not {
                value = not_value(value)?;
                not = false;
            }

            acc = Some(match acc.take() {
                None => value,
                Some(lhs) => match pending.take() {
                    Some(op) => apply_binop(&op, lhs, value, node.kind)?,
                    // Adjacent values: only legal as string concatenation.
                    None if node.kind == ValueKind::Str => {
                        Value::Str(format!("{lhs}{value}"))
                    }
                    None => return Err(RenderError::MissingOperator.into()),
                },
            });
        }

        if let Some(op) = pending {
            return Err(RenderError::UnsupportedOperator {
                op,
                kind: node.kind,
            }
            .into());
        }
        if negate || not {
            // A trailing unary operator has no value to apply to.
            return Err(RenderError::UnsupportedOperator {
                op: if negate { "-" } else { "!" }.to_string(),
                kind: node.kind,
            }
            .into());
        }
        // An empty expression renders as the empty string.
        Ok(acc.unwrap_or_else(|| Value::Str(String::new())))
    }

    fn eval_term(&mut self, term: &Term) -> Result<Value, EvalFault> {
        match &term.code {
            TermCode::Long(v) => Ok(Value::Long(*v)),
            TermCode::Double(v) => Ok(Value::Double(*v)),
            TermCode::Str(s) => Ok(Value::Str(s.clone())),
            TermCode::Bool(b) => Ok(Value::Bool(*b)),
            TermCode::Group(inner) => self.eval_node(inner),
            TermCode::Assign { name, rhs } => {
                let value = self.eval_node(rhs)?;
                self.bindings.set(name.clone(), value.clone());
                Ok(value)
            }
            TermCode::Ref(ref_term) => self.eval_ref(ref_term),
            TermCode::Ops(_) => Err(RenderError::MissingOperator.into()),
        }
    }

    fn eval_ref(&mut self, ref_term: &RefTerm) -> Result<Value, EvalFault> {
        let mut value = match &ref_term.target {
            RefTarget::Binding { name } => self
                .bindings
                .get(name)
                .cloned()
                .ok_or_else(|| BadReference::MissingBinding { name: name.clone() })?,
            RefTarget::Static {
                ident,
                type_name,
                method,
                args,
            } => {
                let type_name = type_name.as_deref().unwrap_or(ident);
                let argv = self.eval_args(args)?;
                self.call_static(type_name, method, argv)?
            }
            RefTarget::Free {
                name,
                type_name,
                args,
            } => {
                let type_name = type_name.as_deref().unwrap_or(name);
                let argv = self.eval_args(args)?;
                self.call_static(type_name, name, argv)?
            }
        };

        for call in &ref_term.calls {
            value = self.call_method(value, call)?;
        }
        Ok(value)
    }

    fn eval_args(&mut self, args: &[ExprNode]) -> Result<Vec<Value>, EvalFault> {
        args.iter().map(|arg| self.eval_node(arg)).collect()
    }

    fn call_static(
        &mut self,
        type_name: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, EvalFault> {
        let entries = self.registry.statics(type_name, method);
        let candidate = resolve_overload(method, entries, &args)?;
        entries[candidate.index]
            .func
            .call(&candidate.args)
            .map_err(|source| {
                EvalFault::Fatal(RenderError::NativeCall {
                    name: method.to_string(),
                    source,
                })
            })
    }

    fn call_method(&mut self, receiver: Value, call: &MethodCall) -> Result<Value, EvalFault> {
        let args = self.eval_args(&call.args)?;
        let Some(tag) = TypeTag::of(&receiver) else {
            // Opaque receivers have no registered methods.
            return Err(BadReference::NoMatchingOverload {
                name: call.name.clone(),
                args: format_arg_kinds(&args),
            }
            .into());
        };
        let entries = self.registry.methods(tag, &call.name);
        let candidate = resolve_overload(&call.name, entries, &args)?;
        let mut full_args = Vec::with_capacity(candidate.args.len() + 1);
        full_args.push(receiver);
        full_args.extend(candidate.args);
        entries[candidate.index]
            .func
            .call(&full_args)
            .map_err(|source| {
                EvalFault::Fatal(RenderError::NativeCall {
                    name: call.name.clone(),
                    source,
                })
            })
    }
}

/// Apply the render-time coercion attached to a term.
fn apply_coercion(value: Value, coercion: Coercion) -> Result<Value, EvalFault> {
    match coercion {
        Coercion::Long => value
            .long_value()
            .map(Value::Long)
            .ok_or_else(|| coerce_error(&value, "long")),
        Coercion::Double => value
            .double_value()
            .map(Value::Double)
            .ok_or_else(|| coerce_error(&value, "double")),
        Coercion::Bool => match value {
            Value::Bool(_) => Ok(value),
            _ => Err(coerce_error(&value, "boolean")),
        },
    }
}

fn coerce_error(value: &Value, target: &'static str) -> EvalFault {
    EvalFault::Fatal(RenderError::Coerce {
        kind: value.kind(),
        target,
    })
}

/// Fold a run of operator characters found in unary position into the
/// sign/not flags.
fn apply_unary_run(
    run: &str,
    kind: ValueKind,
    negate: &mut bool,
    not: &mut bool,
) -> Result<(), EvalFault> {
    for c in run.chars() {
        match c {
            '-' => *negate = !*negate,
            '+' => {}
            '!' => *not = !*not,
            _ => {
                return Err(RenderError::UnsupportedOperator {
                    op: run.to_string(),
                    kind,
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Split an operator run in binary position into its binary operator and
/// any trailing unary characters (`"+-"` is add-then-negate).
fn split_operator_run(run: &str, kind: ValueKind) -> Result<(String, String), EvalFault> {
    if BINARY_OPS.contains(&run) {
        return Ok((run.to_string(), String::new()));
    }
    for split in (1..run.len()).rev() {
        let (binary, rest) = run.split_at(split);
        if BINARY_OPS.contains(&binary) && rest.chars().all(|c| matches!(c, '-' | '+' | '!')) {
            return Ok((binary.to_string(), rest.to_string()));
        }
    }
    Err(RenderError::UnsupportedOperator {
        op: run.to_string(),
        kind,
    }
    .into())
}

fn negate_value(value: Value) -> Result<Value, EvalFault> {
    match value {
        Value::Long(v) => Ok(Value::Long(v.wrapping_neg())),
        Value::Double(v) => Ok(Value::Double(-v)),
        other => Err(RenderError::UnsupportedOperator {
            op: "-".to_string(),
            kind: other.kind(),
        }
        .into()),
    }
}

fn not_value(value: Value) -> Result<Value, EvalFault> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        other => Err(RenderError::UnsupportedOperator {
            op: "!".to_string(),
            kind: other.kind(),
        }
        .into()),
    }
}

/// Apply one binary operator inside the fold.
fn apply_binop(op: &str, lhs: Value, rhs: Value, kind: ValueKind) -> Result<Value, EvalFault> {
    match op {
        "&&" | "&" | "||" | "|" => match (lhs, rhs) {
            (Value::Bool(a), Value::Bool(b)) => {
                let result = if op.starts_with('&') { a && b } else { a || b };
                Ok(Value::Bool(result))
            }
            (other, _) => Err(unsupported(op, other.kind())),
        },
        "==" => Ok(Value::Bool(values_equal(&lhs, &rhs))),
        "!=" => Ok(Value::Bool(!values_equal(&lhs, &rhs))),
        "<" | ">" | "<=" | ">=" => compare(op, lhs, rhs),
        "+" if kind == ValueKind::Str => Ok(Value::Str(format!("{lhs}{rhs}"))),
        "+" | "-" | "*" | "/" | "%" => arithmetic(op, lhs, rhs, kind),
        _ => Err(unsupported(op, kind)),
    }
}

fn unsupported(op: &str, kind: ValueKind) -> EvalFault {
    EvalFault::Fatal(RenderError::UnsupportedOperator {
        op: op.to_string(),
        kind,
    })
}

fn values_equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Long(a), Value::Long(b)) => a == b,
        // Only mixed-kind numeric comparison happens in double space.
        _ if lhs.is_numeric() && rhs.is_numeric() => lhs.double_value() == rhs.double_value(),
        _ => lhs == rhs,
    }
}

fn compare(op: &str, lhs: Value, rhs: Value) -> Result<Value, EvalFault> {
    let outcome = if lhs.is_numeric() && rhs.is_numeric() {
        let (Some(a), Some(b)) = (lhs.double_value(), rhs.double_value()) else {
            return Err(unsupported(op, lhs.kind()));
        };
        match op {
            "<" => a < b,
            ">" => a > b,
            "<=" => a <= b,
            _ => a >= b,
        }
    } else if let (Value::Str(a), Value::Str(b)) = (&lhs, &rhs) {
        match op {
            "<" => a < b,
            ">" => a > b,
            "<=" => a <= b,
            _ => a >= b,
        }
    } else {
        return Err(unsupported(op, lhs.kind()));
    };
    Ok(Value::Bool(outcome))
}

fn arithmetic(op: &str, lhs: Value, rhs: Value, kind: ValueKind) -> Result<Value, EvalFault> {
    // Dynamic string concatenation when the static kind could not see the
    // string (e.g. two Bind terms).
    if op == "+" && (matches!(lhs, Value::Str(_)) || matches!(rhs, Value::Str(_))) {
        return Ok(Value::Str(format!("{lhs}{rhs}")));
    }

    match (&lhs, &rhs) {
        (Value::Long(a), Value::Long(b)) => {
            if *b == 0 && matches!(op, "/" | "%") {
                return Err(RenderError::DivisionByZero.into());
            }
            let result = match op {
                "+" => a.wrapping_add(*b),
                "-" => a.wrapping_sub(*b),
                "*" => a.wrapping_mul(*b),
                "/" => a.wrapping_div(*b),
                _ => a.wrapping_rem(*b),
            };
            Ok(Value::Long(result))
        }
        _ if lhs.is_numeric() && rhs.is_numeric() => {
            let (Some(a), Some(b)) = (lhs.double_value(), rhs.double_value()) else {
                return Err(unsupported(op, kind));
            };
            let result = match op {
                "+" => a + b,
                "-" => a - b,
                "*" => a * b,
                "/" => a / b,
                _ => a % b,
            };
            Ok(Value::Double(result))
        }
        _ => Err(unsupported(op, lhs.kind())),
    }
}
