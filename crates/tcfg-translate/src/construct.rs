//! Constructor fallback
//!
//! Last-resort conversion through the constructors registered on an object
//! type. Construction failures never surface: they are logged and the
//! fallback reports no result.

use tcfg_value::{parse_scalar, Constructor, ObjectType, Value, ValueType};

use crate::context::TranslationContext;

/// Build an instance of `target` from `source` and the call arguments
///
/// - A source already of the target's representation is returned as is.
/// - Without call arguments a single-parameter constructor is chosen by the
///   source's representation type, then its scalar counterpart, then (for
///   text) the first scalar parameter whose kind parses the text.
/// - With call arguments a constructor must accept the signature
///   `(source, arg1, arg2, ..)`; absent arguments match anything except a
///   bare scalar. Each argument goes to its own parameter.
#[must_use]
pub fn construct(source: Option<&Value>, target: &ValueType, ctx: &TranslationContext<'_>) -> Option<Value> {
    let source = source?;
    if source.value_type() == *target {
        return Some(source.clone());
    }
    let object_type = target.as_object()?;
    match ctx.args() {
        None => construct_single(source, object_type),
        Some(args) => construct_multi(source, args, object_type),
    }
}

fn construct_single(source: &Value, object_type: &ObjectType) -> Option<Value> {
    let unary = || object_type.constructors().iter().filter(|c| c.arity() == 1);
    let source_type = source.value_type();

    if let Some(ctor) = unary().find(|c| c.params()[0] == source_type) {
        return invoke(ctor, &[Some(source.clone())], object_type);
    }

    if let Some(scalar) = source_type.as_scalar() {
        let counterpart = ValueType::Scalar(scalar.counterpart());
        if let Some(ctor) = unary().find(|c| c.params()[0] == counterpart) {
            return invoke(ctor, &[Some(source.clone())], object_type);
        }
    }

    let text = source.as_text()?;
    unary().find_map(|ctor| {
        let kind = ctor.params()[0].as_scalar()?.kind;
        let parsed = parse_scalar(text, kind)?;
        Some((ctor, parsed))
    })
    .and_then(|(ctor, parsed)| invoke(ctor, &[Some(parsed)], object_type))
}

fn construct_multi(source: &Value, args: &[Option<Value>], object_type: &ObjectType) -> Option<Value> {
    let signature: Vec<Option<ValueType>> = std::iter::once(Some(source.value_type()))
        .chain(args.iter().map(|arg| arg.as_ref().map(Value::value_type)))
        .collect();

    let ctor = object_type.constructors().iter().find(|ctor| {
        ctor.arity() == signature.len()
            && ctor
                .params()
                .iter()
                .zip(&signature)
                .all(|(param, arg)| param.accepts(arg.as_ref()))
    })?;

    let mut values = Vec::with_capacity(signature.len());
    values.push(Some(source.clone()));
    values.extend(args.iter().cloned());
    invoke(ctor, &values, object_type)
}

fn invoke(ctor: &Constructor, args: &[Option<Value>], object_type: &ObjectType) -> Option<Value> {
    match ctor.invoke(args) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(target_type = object_type.name(), error = %err, "constructor failed");
            None
        }
    }
}
