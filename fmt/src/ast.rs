//! The debug form: a fully parenthesized constructor tree with every piece
//! of metadata spelled out, for structural inspection and golden tests.

use core::fmt::Write as _;

use ndshape_types::{Access, Field, FieldLayout, Type, TypeFlags, TypeKind, Value};

use crate::error::FmtError;
use crate::sink::Sink;

/// Constructor-form name of a tag. Covers every tag.
fn type_name(kind: &TypeKind<'_>) -> &'static str {
    use TypeKind::*;

    match kind {
        Module { .. } => "Module",
        Function { .. } => "Function",
        FixedDim { .. } => "FixedDim",
        VarDim { .. } => "VarDim",
        SymbolicDim { .. } => "SymbolicDim",
        EllipsisDim { .. } => "EllipsisDim",
        Tuple { .. } => "Tuple",
        Record { .. } => "Record",
        Ref(_) => "Ref",
        Constr { .. } => "Constr",
        Nominal { .. } => "Nominal",
        Categorical(_) => "Categorical",
        FixedString { .. } => "FixedString",
        FixedBytes { .. } => "FixedBytes",
        Bytes { .. } => "Bytes",
        Char(_) => "Char",
        String => "String",
        Typevar(_) => "Typevar",
        Void => "Void",
        AnyKind => "Any",
        ScalarKind => "ScalarKind",
        Bool => "Bool",
        SignedKind => "SignedKind",
        Int8 => "Int8",
        Int16 => "Int16",
        Int32 => "Int32",
        Int64 => "Int64",
        UnsignedKind => "UnsignedKind",
        Uint8 => "Uint8",
        Uint16 => "Uint16",
        Uint32 => "Uint32",
        Uint64 => "Uint64",
        FloatKind => "FloatKind",
        Float16 => "Float16",
        Float32 => "Float32",
        Float64 => "Float64",
        ComplexKind => "ComplexKind",
        Complex32 => "Complex32",
        Complex64 => "Complex64",
        Complex128 => "Complex128",
        FixedStringKind => "FixedStringKind",
        FixedBytesKind => "FixedBytesKind",
    }
}

const FLAG_NAMES: [(TypeFlags, &str); 5] = [
    (TypeFlags::OPTION, "OPTION"),
    (TypeFlags::SUBTREE_OPTION, "SUBTREE_OPTION"),
    (TypeFlags::LITTLE_ENDIAN, "LITTLE_ENDIAN"),
    (TypeFlags::BIG_ENDIAN, "BIG_ENDIAN"),
    (TypeFlags::ELLIPSIS, "ELLIPSIS"),
];

fn flag_list(buf: &mut Sink, t: &Type<'_>) -> Result<(), FmtError> {
    let mut first = true;
    for (flag, name) in FLAG_NAMES {
        if t.flags().contains(flag) {
            if !first {
                buf.write_str(", ")?;
            }
            buf.write_str(name)?;
            first = false;
        }
    }
    Ok(())
}

fn common_attributes(buf: &mut Sink, t: &Type<'_>, d: usize) -> Result<(), FmtError> {
    buf.indent(d)?;
    match t.access() {
        Access::Abstract => {
            write!(buf, "access=Abstract, ndim={}, ", t.ndim())?;
        }
        Access::Concrete { datasize, align } => {
            write!(
                buf,
                "access=Concrete, ndim={}, datasize={datasize}, align={align}, ",
                t.ndim()
            )?;
        }
    }
    buf.write_str("flags=[")?;
    flag_list(buf, t)?;
    buf.write_str("]")?;
    Ok(())
}

fn common_attributes_ln(buf: &mut Sink, t: &Type<'_>, d: usize) -> Result<(), FmtError> {
    common_attributes(buf, t, d)?;
    buf.write_str("\n")?;
    Ok(())
}

fn tuple_fields(
    buf: &mut Sink,
    types: &[&Type<'_>],
    layout: Option<&[FieldLayout]>,
    d: usize,
) -> Result<(), FmtError> {
    for (i, ty) in types.iter().enumerate() {
        if i >= 1 {
            buf.write_str(",\n")?;
        }

        buf.indent(d)?;
        buf.write_str("TupleField(\n")?;

        buf.indent(d + 2)?;
        buf.write_str("type=")?;
        // Children continue after "type=", 5 columns past the field indent.
        datashape(buf, ty, d + 5 + 2, true)?;
        writeln!(buf, "{}", if layout.is_some() { "," } else { "" })?;

        if let Some(lay) = layout {
            buf.indent(d + 2)?;
            writeln!(
                buf,
                "offset={}, align={}, pad={}",
                lay[i].offset, lay[i].align, lay[i].pad
            )?;
        }

        buf.indent(d)?;
        buf.write_str(")")?;
    }
    Ok(())
}

fn record_fields(
    buf: &mut Sink,
    fields: &[Field<'_>],
    layout: Option<&[FieldLayout]>,
    d: usize,
) -> Result<(), FmtError> {
    for (i, field) in fields.iter().enumerate() {
        if i >= 1 {
            buf.write_str(",\n")?;
        }

        buf.indent(d)?;
        buf.write_str("RecordField(\n")?;

        buf.indent(d + 2)?;
        writeln!(buf, "name='{}',", field.name)?;

        buf.indent(d + 2)?;
        buf.write_str("type=")?;
        datashape(buf, field.ty, d + 5 + 2, true)?;
        writeln!(buf, "{}", if layout.is_some() { "," } else { "" })?;

        if let Some(lay) = layout {
            buf.indent(d + 2)?;
            writeln!(
                buf,
                "offset={}, align={}, pad={}",
                lay[i].offset, lay[i].align, lay[i].pad
            )?;
        }

        buf.indent(d)?;
        buf.write_str(")")?;
    }
    Ok(())
}

fn variadic_flag(buf: &mut Sink, variadic: bool, d: usize) -> Result<(), FmtError> {
    if variadic {
        buf.indent(d)?;
        buf.write_str("variadic=true,\n")?;
    }
    Ok(())
}

fn comma_variadic_flag(buf: &mut Sink, variadic: bool, d: usize) -> Result<(), FmtError> {
    if variadic {
        buf.write_str(",\n")?;
        buf.indent(d)?;
        buf.write_str("variadic=true")?;
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

fn head(buf: &mut Sink, d: usize, cont: bool) -> Result<(), FmtError> {
    buf.indent(if cont { 0 } else { d })?;
    Ok(())
}

/// Renders `t` in the debug form at indentation `d`. `cont` marks a
/// continuation on the current line (after `type=`, `pos=`, ...), which
/// suppresses the leading indent.
pub(crate) fn datashape(
    buf: &mut Sink,
    t: &Type<'_>,
    d: usize,
    cont: bool,
) -> Result<(), FmtError> {
    match *t.kind() {
        TypeKind::FixedDim {
            shape,
            layout,
            elem,
        } => {
            head(buf, d, cont)?;
            buf.write_str("FixedDim(\n")?;

            datashape(buf, elem, d + 2, false)?;
            buf.write_str(",\n")?;

            buf.indent(d + 2)?;
            write!(buf, "shape={shape}")?;
            match layout {
                Some(l) => writeln!(buf, ", itemsize={}, step={},", l.itemsize, l.step)?,
                None => buf.write_str(",\n")?,
            }

            common_attributes_ln(buf, t, d + 2)?;
            buf.indent(d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::SymbolicDim { name, elem } => {
            if t.is_concrete() {
                return Err(FmtError::Internal("symbolic dimension must be abstract"));
            }

            head(buf, d, cont)?;
            buf.write_str("SymbolicDim(\n")?;

            datashape(buf, elem, d + 2, false)?;
            buf.write_str(",\n")?;

            buf.indent(d + 2)?;
            writeln!(buf, "name='{name}',")?;

            common_attributes_ln(buf, t, d + 2)?;
            buf.indent(d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::VarDim { layout, elem } => {
            head(buf, d, cont)?;
            buf.write_str("VarDim(\n")?;

            datashape(buf, elem, d + 2, false)?;
            buf.write_str(",\n")?;

            if let Some(l) = layout {
                buf.indent(d + 2)?;
                buf.write_str("offsets=[")?;
                for (i, offset) in l.offsets.iter().enumerate() {
                    write!(buf, "{offset}{}", if i == l.offsets.len() - 1 { "" } else { ", " })?;
                }
                buf.write_str("],\n")?;

                buf.indent(d + 2)?;
                buf.write_str("slices=[")?;
                for (i, s) in l.slices.iter().enumerate() {
                    write!(
                        buf,
                        "{}:{}:{}{}",
                        s.start,
                        s.stop,
                        s.step,
                        if i == l.slices.len() - 1 { "" } else { ", " }
                    )?;
                }
                buf.write_str("],\n")?;

                buf.indent(d + 2)?;
                writeln!(buf, "itemsize={},", l.itemsize)?;
            }

            common_attributes_ln(buf, t, d + 2)?;
            buf.indent(d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::EllipsisDim { elem, .. } => {
            if t.is_concrete() {
                return Err(FmtError::Internal("ellipsis dimension must be abstract"));
            }
            if t.is_optional() {
                return Err(FmtError::Internal("ellipsis dimension cannot be optional"));
            }

            head(buf, d, cont)?;
            buf.write_str("EllipsisDim(\n")?;

            datashape(buf, elem, d + 2, false)?;
            buf.write_str("\n")?;

            common_attributes_ln(buf, t, d + 2)?;
            buf.indent(d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Nominal { name, .. } => {
            if t.is_abstract() {
                return Err(FmtError::Internal("nominal type must be concrete"));
            }

            head(buf, d, cont)?;
            buf.write_str("Nominal(\n")?;

            buf.indent(d + 2)?;
            writeln!(buf, "name='{name}',")?;

            common_attributes_ln(buf, t, d + 2)?;
            buf.indent(d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Module { name, ty } => {
            head(buf, d, cont)?;
            buf.write_str("Module(\n")?;

            buf.indent(d + 2)?;
            writeln!(buf, "name='{name}',")?;

            buf.indent(d + 2)?;
            buf.write_str("type=")?;
            datashape(buf, ty, d + 5 + 2, true)?;
            buf.write_str("\n")?;

            common_attributes_ln(buf, t, d + 2)?;
            buf.indent(d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Constr { name, ty } => {
            head(buf, d, cont)?;
            buf.write_str("Constr(\n")?;

            buf.indent(d + 2)?;
            writeln!(buf, "name='{name}',")?;

            buf.indent(d + 2)?;
            buf.write_str("type=")?;
            datashape(buf, ty, d + 5 + 2, true)?;
            buf.write_str("\n")?;

            common_attributes_ln(buf, t, d + 2)?;
            buf.indent(d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Tuple {
            variadic,
            types,
            layout,
        } => {
            head(buf, d, cont)?;
            buf.write_str("Tuple(\n")?;

            if !types.is_empty() {
                tuple_fields(buf, types, layout, d + 2)?;
                comma_variadic_flag(buf, variadic, d + 2)?;
                buf.write_str(",\n")?;
            } else {
                variadic_flag(buf, variadic, d + 2)?;
            }

            common_attributes_ln(buf, t, d + 2)?;
            buf.indent(d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Record {
            variadic,
            fields,
            layout,
        } => {
            head(buf, d, cont)?;
            buf.write_str("Record(\n")?;

            if !fields.is_empty() {
                record_fields(buf, fields, layout, d + 2)?;
                comma_variadic_flag(buf, variadic, d + 2)?;
                buf.write_str(",\n")?;
            } else {
                variadic_flag(buf, variadic, d + 2)?;
            }

            common_attributes_ln(buf, t, d + 2)?;
            buf.indent(d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Function { pos, kwds, ret } => {
            if t.is_concrete() {
                return Err(FmtError::Internal("function type must be abstract"));
            }

            head(buf, d, cont)?;
            buf.write_str("Function(\n")?;

            buf.indent(d + 2)?;
            buf.write_str("pos=")?;
            datashape(buf, pos, d + 4 + 2, true)?;
            buf.write_str(",\n")?;

            buf.indent(d + 2)?;
            buf.write_str("kwds=")?;
            datashape(buf, kwds, d + 5 + 2, true)?;
            buf.write_str(",\n")?;

            buf.indent(d + 2)?;
            buf.write_str("ret=")?;
            datashape(buf, ret, d + 4 + 2, true)?;
            buf.write_str(",\n")?;

            common_attributes_ln(buf, t, d + 2)?;
            buf.indent(d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Typevar(name) => {
            if t.is_concrete() {
                return Err(FmtError::Internal("type variable must be abstract"));
            }

            head(buf, d, cont)?;
            buf.write_str("Typevar(")?;
            write!(buf, "name='{name}', ")?;
            common_attributes(buf, t, 0)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Char(encoding) => {
            if t.is_abstract() {
                return Err(FmtError::Internal("char type must be concrete"));
            }

            head(buf, d, cont)?;
            writeln!(buf, "Char('{}',", encoding.as_str())?;

            common_attributes_ln(buf, t, d + 2)?;
            buf.indent(d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Bytes { target_align } => {
            if t.is_abstract() {
                return Err(FmtError::Internal("bytes type must be concrete"));
            }

            head(buf, d, cont)?;
            writeln!(buf, "Bytes(target_align={target_align},")?;

            common_attributes_ln(buf, t, d + 2)?;
            buf.indent(d)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Categorical(values) => {
            if t.is_abstract() {
                return Err(FmtError::Internal("categorical type must be concrete"));
            }

            head(buf, d, cont)?;
            buf.write_str("Categorical(")?;
            categorical_values(buf, values)?;
            common_attributes_ln(buf, t, d + 2)?;
            buf.write_str(")")?;
            Ok(())
        }

        TypeKind::Ref(ty) => {
            head(buf, d, cont)?;
            buf.write_str("Ref(\n")?;

            datashape(buf, ty, d + 2, false)?;
            buf.write_str(",\n")?;

            common_attributes_ln(buf, t, d + 2)?;
            buf.indent(d)?;
            buf.write_str(")")?;
            Ok(())
        }

        ref leaf => {
            // Resolved scalars must be concrete; kind wildcards may not be.
            let resolved = matches!(
                leaf,
                TypeKind::Bool
                    | TypeKind::Int8
                    | TypeKind::Int16
                    | TypeKind::Int32
                    | TypeKind::Int64
                    | TypeKind::Uint8
                    | TypeKind::Uint16
                    | TypeKind::Uint32
                    | TypeKind::Uint64
                    | TypeKind::Float16
                    | TypeKind::Float32
                    | TypeKind::Float64
                    | TypeKind::Complex32
                    | TypeKind::Complex64
                    | TypeKind::Complex128
                    | TypeKind::String
                    | TypeKind::FixedString { .. }
                    | TypeKind::FixedBytes { .. }
            );
            if resolved && t.is_abstract() {
                return Err(FmtError::Internal("resolved scalar must be concrete"));
            }

            head(buf, d, cont)?;
            write!(buf, "{}(", type_name(leaf))?;
            common_attributes(buf, t, 0)?;
            buf.write_str(")")?;
            Ok(())
        }
    }
}
