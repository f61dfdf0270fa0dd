//! The canonical datashape notation: minimal, re-parseable, byte-stable.

use core::fmt::Write as _;

use ndshape_types::{Encoding, Field, Type, TypeKind, Value};

use crate::error::FmtError;
use crate::sink::Sink;

/// Keyword spelling of a leaf tag. The table covers every tag; compound
/// tags have no keyword and asking for one is an internal error.
fn keyword(kind: &TypeKind<'_>) -> Result<&'static str, FmtError> {
    use TypeKind::*;

    match kind {
        Void => Ok("void"),
        AnyKind => Ok("Any"),
        ScalarKind => Ok("ScalarKind"),
        Bool => Ok("bool"),
        SignedKind => Ok("SignedKind"),
        Int8 => Ok("int8"),
        Int16 => Ok("int16"),
        Int32 => Ok("int32"),
        Int64 => Ok("int64"),
        UnsignedKind => Ok("UnsignedKind"),
        Uint8 => Ok("uint8"),
        Uint16 => Ok("uint16"),
        Uint32 => Ok("uint32"),
        Uint64 => Ok("uint64"),
        FloatKind => Ok("FloatKind"),
        Float16 => Ok("float16"),
        Float32 => Ok("float32"),
        Float64 => Ok("float64"),
        ComplexKind => Ok("ComplexKind"),
        Complex32 => Ok("complex32"),
        Complex64 => Ok("complex64"),
        Complex128 => Ok("complex128"),
        FixedStringKind => Ok("FixedStringKind"),
        FixedBytesKind => Ok("FixedBytesKind"),
        String => Ok("string"),

        Module { .. } | Function { .. } | FixedDim { .. } | VarDim { .. }
        | SymbolicDim { .. } | EllipsisDim { .. } | Tuple { .. } | Record { .. }
        | Ref(_) | Constr { .. } | Nominal { .. } | Categorical(_)
        | FixedString { .. } | FixedBytes { .. } | Bytes { .. } | Char(_)
        | Typevar(_) => Err(FmtError::Internal("tag has no keyword")),
    }
}

fn tuple_fields(
    buf: &mut Sink,
    types: &[&Type<'_>],
    d: Option<usize>,
) -> Result<(), FmtError> {
    for (i, ty) in types.iter().enumerate() {
        if i >= 1 {
            buf.write_str(", ")?;
        }
        datashape(buf, ty, d)?;
    }
    Ok(())
}

fn record_fields(
    buf: &mut Sink,
    fields: &[Field<'_>],
    d: Option<usize>,
) -> Result<(), FmtError> {
    for (i, field) in fields.iter().enumerate() {
        if i >= 1 {
            match d {
                Some(d) => {
                    buf.write_str(",\n")?;
                    buf.indent(d)?;
                }
                None => buf.write_str(", ")?,
            }
        }
        write!(buf, "{} : ", field.name)?;
        datashape(buf, field.ty, d)?;
    }
    Ok(())
}

fn variadic_flag(buf: &mut Sink, variadic: bool) -> Result<(), FmtError> {
    if variadic {
        buf.write_str("...")?;
    }
    Ok(())
}

fn comma_variadic_flag(
    buf: &mut Sink,
    variadic: bool,
    d: Option<usize>,
) -> Result<(), FmtError> {
    if variadic {
        match d {
            Some(d) => {
                buf.write_str(",\n")?;
                buf.indent(d)?;
                buf.write_str("...")?;
            }
            None => buf.write_str(", ...")?,
        }
    }
    Ok(())
}

fn categorical_values(buf: &mut Sink, values: &[Value<'_>]) -> Result<(), FmtError> {
    for (i, value) in values.iter().enumerate() {
        if i >= 1 {
            buf.write_str(", ")?;
        }
        write!(buf, "{value}")?;
    }
    Ok(())
}

/// Renders `t` in the canonical notation. `d` is the record pretty-printing
/// depth: `None` keeps everything flat, `Some(n)` re-indents record fields
/// by two per nesting level starting at `n`.
pub(crate) fn datashape(
    buf: &mut Sink,
    t: &Type<'_>,
    d: Option<usize>,
) -> Result<(), FmtError> {
    // Marker order is fixed: option before endianness.
    if t.is_optional() {
        buf.write_str("?")?;
    }
    if t.endian_is_set() {
        buf.write_str(if t.is_little_endian() { "<" } else { ">" })?;
    }

    match *t.kind() {
        TypeKind::Module { name, ty } => {
            write!(buf, "{name}:: ")?;
            datashape(buf, ty, d)
        }

        TypeKind::Function { pos, kwds, ret } => {
            let TypeKind::Tuple {
                variadic: pos_variadic,
                types: pos_types,
                ..
            } = *pos.kind()
            else {
                return Err(FmtError::Internal("function pos is not a tuple"));
            };
            let TypeKind::Record {
                variadic: kwds_variadic,
                fields: kwd_fields,
                ..
            } = *kwds.kind()
            else {
                return Err(FmtError::Internal("function kwds is not a record"));
            };

            buf.write_str("(")?;

            if !pos_types.is_empty() {
                tuple_fields(buf, pos_types, d)?;
                comma_variadic_flag(buf, pos_variadic, None)?;
            } else {
                variadic_flag(buf, pos_variadic)?;
            }

            if !kwd_fields.is_empty() {
                // Separate the sections only if the positional one printed
                // anything (fields or a bare "...").
                if pos_variadic || !pos_types.is_empty() {
                    buf.write_str(", ")?;
                }
                record_fields(buf, kwd_fields, None)?;
                comma_variadic_flag(buf, kwds_variadic, None)?;
            } else {
                variadic_flag(buf, kwds_variadic)?;
            }

            buf.write_str(") -> ")?;
            datashape(buf, ret, d)
        }

        TypeKind::FixedDim { shape, elem, .. } => {
            write!(buf, "{shape} * ")?;
            datashape(buf, elem, d)
        }

        TypeKind::VarDim { elem, .. } => {
            buf.write_str("var * ")?;
            datashape(buf, elem, d)
        }

        TypeKind::SymbolicDim { name, elem } => {
            write!(buf, "{name} * ")?;
            datashape(buf, elem, d)
        }

        TypeKind::EllipsisDim { name, elem } => {
            write!(buf, "{}... * ", name.unwrap_or(""))?;
            datashape(buf, elem, d)
        }

        TypeKind::Tuple {
            variadic, types, ..
        } => {
            buf.write_str("(")?;
            if !types.is_empty() {
                tuple_fields(buf, types, d)?;
                comma_variadic_flag(buf, variadic, None)?;
            } else {
                variadic_flag(buf, variadic)?;
            }
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Record {
            variadic, fields, ..
        } => {
            buf.write_str("{")?;

            let inner = d.map(|d| d + 2);
            if let Some(inner) = inner {
                buf.write_str("\n")?;
                buf.indent(inner)?;
            }

            if !fields.is_empty() {
                record_fields(buf, fields, inner)?;
                comma_variadic_flag(buf, variadic, inner)?;
            } else {
                variadic_flag(buf, variadic)?;
            }

            if let Some(d) = d {
                buf.write_str("\n")?;
                buf.indent(d)?;
            }
            buf.write_str("}")?;
            Ok(())
        }

        TypeKind::Ref(ty) => {
            buf.write_str("ref(")?;
            datashape(buf, ty, d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Constr { name, ty } => {
            write!(buf, "{name}(")?;
            datashape(buf, ty, d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Nominal { name, .. } => {
            buf.write_str(name)?;
            Ok(())
        }

        TypeKind::Categorical(values) => {
            buf.write_str("categorical(")?;
            categorical_values(buf, values)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::FixedString { size, encoding } => {
            if encoding == Encoding::DEFAULT {
                write!(buf, "fixed_string({size})")?;
            } else {
                write!(buf, "fixed_string({size}, '{}')", encoding.as_str())?;
            }
            Ok(())
        }

        TypeKind::FixedBytes { size, align } => {
            if align == 1 {
                write!(buf, "fixed_bytes(size={size})")?;
            } else {
                write!(buf, "fixed_bytes(size={size}, align={align})")?;
            }
            Ok(())
        }

        TypeKind::Bytes { target_align } => {
            if target_align == 1 {
                buf.write_str("bytes()")?;
            } else {
                write!(buf, "bytes(align={target_align})")?;
            }
            Ok(())
        }

        TypeKind::Char(encoding) => {
            write!(buf, "char('{}')", encoding.as_str())?;
            Ok(())
        }

        TypeKind::Typevar(name) => {
            buf.write_str(name)?;
            Ok(())
        }

        ref leaf => {
            buf.write_str(keyword(leaf)?)?;
            Ok(())
        }
    }
}
