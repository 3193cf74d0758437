//! Coercion of loosely typed descriptor values into engine enums.

mod enums;

use serde_json::Value as JsonValue;
use tracing::warn;

pub use enums::*;

/// Read an enum from a raw descriptor value.
///
/// Accepted forms, in order: a number (or numeric string) that is a valid
/// member, a dotted reference such as `Difficulty.Hard` (the part after the
/// last dot is looked up by name), a plain member name. Anything else,
/// including null and empty strings, yields `fallback`.
pub fn parse_enum<E: EnumTable>(raw: Option<&JsonValue>, fallback: E) -> E {
    let text = match raw {
        None | Some(JsonValue::Null) => return fallback,
        Some(JsonValue::Number(n)) => {
            return n
                .as_f64()
                .and_then(member_from_number)
                .unwrap_or_else(|| unrecognized(&n.to_string(), fallback));
        }
        Some(JsonValue::String(s)) => s.trim(),
        Some(other) => return unrecognized(&other.to_string(), fallback),
    };
    if text.is_empty() {
        return fallback;
    }

    if let Some(member) = text.parse::<f64>().ok().and_then(member_from_number) {
        return member;
    }

    let key = match text.rsplit_once('.') {
        Some((_, name)) => name,
        None => text,
    };
    key.parse::<E>()
        .unwrap_or_else(|_| unrecognized(text, fallback))
}

/// Like [`parse_enum`], but an integral number (or numeric string) is kept as
/// is even when the table has no such member. Symbolic forms still resolve
/// through the table.
pub fn parse_enum_code<E: EnumTable>(raw: Option<&JsonValue>, fallback: E) -> i64 {
    let number = match raw {
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() && n.fract() == 0.0 => n as i64,
        _ => parse_enum(raw, fallback).value(),
    }
}

fn member_from_number<E: EnumTable>(n: f64) -> Option<E> {
    if n.fract() != 0.0 || !n.is_finite() {
        return None;
    }
    E::from_value(n as i64)
}

fn unrecognized<E: EnumTable>(raw: &str, fallback: E) -> E {
    warn!(
        "Unrecognized {} value {:?}, using {}",
        short_type_name::<E>(),
        raw,
        fallback.value()
    );
    fallback
}

fn short_type_name<E>() -> &'static str {
    let full = std::any::type_name::<E>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Map a descriptor `JDVersion` to the release year the engine expects.
///
/// Version code 5 is the 2014 release; a missing version means 2018.
pub fn assure_jd_version(version: Option<i64>) -> i64 {
    match version {
        Some(5) => 2014,
        Some(v) => v,
        None => 2018,
    }
}
