//! Output backends for code generation.
//!
//! Each backend maps flag types onto one OpenFeature SDK and supplies the
//! templates for its accessor files. All backends implement the
//! [`Backend`](crate::traits::Backend) trait for uniform access via the
//! registry.

use ofgen_manifest::{Value, exact_i64};

use crate::case;
use crate::ir::{Flag, FlagType};
use crate::traits::LiteralError;

// Go
#[cfg(feature = "backend-go")]
pub mod go;

#[cfg(feature = "backend-go")]
pub use go::GoBackend;

// C#
#[cfg(feature = "backend-csharp")]
pub mod csharp;

#[cfg(feature = "backend-csharp")]
pub use csharp::CSharpBackend;

// Java
#[cfg(feature = "backend-java")]
pub mod java;

#[cfg(feature = "backend-java")]
pub use java::JavaBackend;

// Python
#[cfg(feature = "backend-python")]
pub mod python;

#[cfg(feature = "backend-python")]
pub use python::PythonBackend;

// Node.js (server SDK)
#[cfg(feature = "backend-nodejs")]
pub mod nodejs;

#[cfg(feature = "backend-nodejs")]
pub use nodejs::NodeJsBackend;

// React (web SDK hooks)
#[cfg(feature = "backend-react")]
pub mod react;

#[cfg(feature = "backend-react")]
pub use react::ReactBackend;

// NestJS (decorators over the Node.js client)
#[cfg(feature = "backend-nestjs")]
pub mod nestjs;

#[cfg(feature = "backend-nestjs")]
pub use nestjs::NestJsBackend;

/// Spelling of boolean literals in a target language.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BoolLiterals {
    pub truthy: &'static str,
    pub falsy: &'static str,
}

pub(crate) const LOWERCASE_BOOLS: BoolLiterals = BoolLiterals {
    truthy: "true",
    falsy: "false",
};

/// Width of the integer type a target's SDK uses for integer flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntWidth {
    I32,
    I64,
}

impl IntWidth {
    fn contains(self, value: i64) -> bool {
        match self {
            IntWidth::I32 => i32::try_from(value).is_ok(),
            IntWidth::I64 => true,
        }
    }

    fn name(self) -> &'static str {
        match self {
            IntWidth::I32 => "32-bit",
            IntWidth::I64 => "64-bit",
        }
    }
}

/// How a target spells the literals that differ between languages.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LiteralStyle {
    pub bools: BoolLiterals,
    pub int_width: IntWidth,
}

pub(crate) const C_STYLE: LiteralStyle = LiteralStyle {
    bools: LOWERCASE_BOOLS,
    int_width: IntWidth::I64,
};

/// For SDKs whose integer evaluation takes a 32-bit `int` (Java, .NET).
pub(crate) const I32_STYLE: LiteralStyle = LiteralStyle {
    bools: LOWERCASE_BOOLS,
    int_width: IntWidth::I32,
};

/// Default-value literal shared by every current target.
///
/// Strings are double-quoted with JSON escaping, integers pass through, and
/// floats always carry a decimal point or exponent. A whole-number float is
/// accepted for an integer flag and an integer for a float flag, since JSON
/// does not distinguish them. Integers outside the target's integer width
/// are rejected.
pub(crate) fn default_literal(
    target: &'static str,
    flag: &Flag,
    style: LiteralStyle,
) -> Result<String, LiteralError> {
    let mismatch = || LiteralError::Mismatch {
        key: flag.key.clone(),
        flag_type: flag.flag_type,
        found: flag.default_value.kind(),
    };
    let integer = |value: i64| {
        if style.int_width.contains(value) {
            Ok(value.to_string())
        } else {
            Err(LiteralError::OutOfRange {
                target,
                key: flag.key.clone(),
                value: value.to_string(),
                width: style.int_width.name(),
            })
        }
    };
    match (flag.flag_type, &flag.default_value) {
        (FlagType::Bool, Value::Bool(b)) => {
            let bools = style.bools;
            Ok(if *b { bools.truthy } else { bools.falsy }.to_string())
        }
        (FlagType::String, Value::String(s)) => Ok(case::quote(s)),
        (FlagType::Int, Value::Int(i)) => integer(*i),
        (FlagType::Int, Value::Float(f)) => match exact_i64(*f) {
            Some(i) => integer(i),
            None => Err(mismatch()),
        },
        (FlagType::Float, Value::Int(i)) => Ok(format!("{i}.0")),
        (FlagType::Float, Value::Float(f)) if f.is_finite() => Ok(format!("{f:?}")),
        (FlagType::Object | FlagType::Unknown, _) => Err(LiteralError::Unsupported {
            target,
            key: flag.key.clone(),
            flag_type: flag.flag_type,
        }),
        _ => Err(mismatch()),
    }
}

/// Runtime tokens shared by the TypeScript targets.
#[cfg(any(feature = "backend-nodejs", feature = "backend-react"))]
pub(crate) fn typescript_runtime_type(flag_type: FlagType) -> Option<&'static str> {
    match flag_type {
        FlagType::Bool => Some("Boolean"),
        FlagType::String => Some("String"),
        FlagType::Int | FlagType::Float => Some("Number"),
        FlagType::Object | FlagType::Unknown => None,
    }
}

/// Native types shared by the TypeScript targets.
#[cfg(any(feature = "backend-nodejs", feature = "backend-react"))]
pub(crate) fn typescript_native_type(flag_type: FlagType) -> Option<&'static str> {
    match flag_type {
        FlagType::Bool => Some("boolean"),
        FlagType::String => Some("string"),
        FlagType::Int | FlagType::Float => Some("number"),
        FlagType::Object | FlagType::Unknown => None,
    }
}
