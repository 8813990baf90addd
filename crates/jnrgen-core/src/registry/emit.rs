//! Java source rendering.
//!
//! Each generated unit is rendered against a `String` through `fmt::Write`,
//! so the same code backs file emission, dry runs, and tests. The emitted
//! shapes target the hand-written JNR-FFI runtime: structs extend
//! `WgpuJavaStruct`, string pointers convert through `RustCString`, and
//! pointer-to-struct fields go through `DynamicStructRef`.

use super::naming;
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;

/// Imports written at the top of every generated struct unit.
const STRUCT_IMPORTS: &[&str] = &[
    "com.noahcharlton.wgpuj.WgpuJava",
    "com.noahcharlton.wgpuj.util.CStrPointer",
    "com.noahcharlton.wgpuj.util.RustCString",
    "com.noahcharlton.wgpuj.util.WgpuJavaStruct",
    "jnr.ffi.Runtime",
    "jnr.ffi.Struct",
];

const GENERATED_BANNER: &str = "// Generated by jnrgen. Do not edit.";

/// Target-language representation of one resolved struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldRepr {
    /// `const char*` / `char*` — null-terminated string at the boundary
    CString,
    /// Pointer to a declared type; pointee layout resolves lazily at runtime
    StructRef(String),
    /// Pointer to an unknown type, exposed as an opaque pointer
    RawPointer,
    /// `uintptr_t` / `uint64_t` / `unsigned long long`
    Unsigned64,
    /// `int64_t`
    Signed64,
    /// `uint32_t`
    Unsigned32,
    /// `int32_t`
    Signed32,
    /// `uint8_t`
    Unsigned8,
    /// `bool`
    Boolean,
    /// `float`
    Float,
    /// `double`
    Double,
    /// A registered enum type
    Enum(String),
    /// A registered struct or mock struct, embedded by value
    Inline(String),
}

impl FieldRepr {
    /// The Java type of the backing field declaration
    fn field_type(&self) -> String {
        match self {
            FieldRepr::CString => "@CStrPointer Struct.Pointer".to_string(),
            FieldRepr::StructRef(target) => format!("DynamicStructRef<{}>", target),
            FieldRepr::RawPointer => "Struct.Pointer".to_string(),
            FieldRepr::Unsigned64 => "Struct.Unsigned64".to_string(),
            FieldRepr::Signed64 => "Struct.Signed64".to_string(),
            FieldRepr::Unsigned32 => "Struct.Unsigned32".to_string(),
            FieldRepr::Signed32 => "Struct.Signed32".to_string(),
            FieldRepr::Unsigned8 => "Struct.Unsigned8".to_string(),
            FieldRepr::Boolean => "Struct.Boolean".to_string(),
            FieldRepr::Float => "Struct.Float".to_string(),
            FieldRepr::Double => "Struct.Double".to_string(),
            FieldRepr::Enum(target) => format!("Struct.Enum<{}>", target),
            FieldRepr::Inline(target) => target.clone(),
        }
    }

    /// The initializer that allocates the field's backing representation
    fn create_expr(&self) -> String {
        match self {
            FieldRepr::CString | FieldRepr::RawPointer => "new Struct.Pointer()".to_string(),
            FieldRepr::StructRef(target) => format!("new DynamicStructRef<>({}.class)", target),
            FieldRepr::Enum(target) => format!("new Struct.Enum<>({}.class)", target),
            FieldRepr::Inline(target) => format!("inner({}.createHeap())", target),
            scalar => format!("new {}()", scalar.field_type()),
        }
    }

    /// The type accessors expose to Java callers
    fn getter_type(&self) -> String {
        match self {
            FieldRepr::CString => "java.lang.String".to_string(),
            FieldRepr::StructRef(target) => format!("DynamicStructRef<{}>", target),
            FieldRepr::RawPointer => "jnr.ffi.Pointer".to_string(),
            FieldRepr::Unsigned64 | FieldRepr::Signed64 | FieldRepr::Unsigned32 => {
                "long".to_string()
            }
            FieldRepr::Signed32 => "int".to_string(),
            FieldRepr::Unsigned8 => "short".to_string(),
            FieldRepr::Boolean => "boolean".to_string(),
            FieldRepr::Float => "float".to_string(),
            FieldRepr::Double => "double".to_string(),
            FieldRepr::Enum(target) => target.clone(),
            FieldRepr::Inline(target) => target.clone(),
        }
    }

    /// The setter parameter type; `None` for fields with no setter
    /// (inline-owned nested structs, mutable only through their own code)
    fn setter_type(&self) -> Option<String> {
        match self {
            FieldRepr::Inline(_) => None,
            FieldRepr::StructRef(target) => Some(format!("{}...", target)),
            other => Some(other.getter_type()),
        }
    }

    /// Whether reads must go through the JNR `.get()` accessor
    fn reads_through_get(&self) -> bool {
        self.field_type().starts_with("Struct.")
    }
}

/// One struct field ready for emission.
#[derive(Debug, Clone)]
pub(crate) struct JavaField {
    /// Emitted field name (camel-cased, or verbatim for synthetic fields)
    pub(crate) name: String,
    /// Resolved representation
    pub(crate) repr: FieldRepr,
    /// False for internal-use padding, which gets no accessors
    pub(crate) accessors: bool,
}

/// One enum member ready for emission.
#[derive(Debug, Clone)]
pub(crate) struct JavaEnumMember {
    pub(crate) name: String,
    pub(crate) comment: String,
}

/// One constant ready for emission.
#[derive(Debug, Clone)]
pub(crate) struct JavaConstant {
    pub(crate) name: String,
    pub(crate) java_type: &'static str,
    pub(crate) initializer: String,
    pub(crate) comment: String,
}

/// Renders one struct unit.
pub(crate) fn struct_unit(package: &str, class: &str, fields: &[JavaField]) -> String {
    let mut out = String::new();
    write_struct(&mut out, package, class, fields).expect("String write cannot fail");
    out
}

fn write_struct(
    w: &mut impl FmtWrite,
    package: &str,
    class: &str,
    fields: &[JavaField],
) -> std::fmt::Result {
    writeln!(w, "{}", GENERATED_BANNER)?;
    writeln!(w, "package {};", package)?;
    writeln!(w)?;

    for import in STRUCT_IMPORTS {
        writeln!(w, "import {};", import)?;
    }
    writeln!(w)?;

    writeln!(w, "public class {} extends WgpuJavaStruct {{", class)?;
    writeln!(w)?;

    for field in fields {
        writeln!(
            w,
            "    private final {} {} = {};",
            field.repr.field_type(),
            field.name,
            field.repr.create_expr()
        )?;
    }
    writeln!(w)?;

    write_constructors(w, class)?;

    for field in fields {
        if !field.accessors {
            continue;
        }

        write_getter(w, field)?;
        write_setter(w, field)?;
    }

    writeln!(w, "}}")
}

fn write_constructors(w: &mut impl FmtWrite, class: &str) -> std::fmt::Result {
    writeln!(w, "    private {}(){{}}", class)?;
    writeln!(w)?;

    writeln!(w, "    @Deprecated")?;
    writeln!(w, "    public {}(Runtime runtime){{", class)?;
    writeln!(w, "        super(runtime);")?;
    writeln!(w, "    }}")?;
    writeln!(w)?;

    writeln!(w, "    /**")?;
    writeln!(w, "     * Allocates this struct on the managed heap.")?;
    writeln!(
        w,
        "     * Heap structs cannot be handed to native code; they exist to be"
    )?;
    writeln!(
        w,
        "     * embedded inside another struct's directly-addressed memory."
    )?;
    writeln!(w, "     */")?;
    writeln!(w, "    public static {} createHeap(){{", class)?;
    writeln!(w, "        return new {}();", class)?;
    writeln!(w, "    }}")?;
    writeln!(w)?;

    writeln!(w, "    /**")?;
    writeln!(
        w,
        "     * Allocates this struct in direct native memory, the form required"
    )?;
    writeln!(w, "     * before passing it to native code.")?;
    writeln!(w, "     *")?;
    writeln!(w, "     * @see WgpuJavaStruct#useDirectMemory")?;
    writeln!(w, "     */")?;
    writeln!(w, "    public static {} createDirect(){{", class)?;
    writeln!(w, "        var struct = new {}();", class)?;
    writeln!(w, "        struct.useDirectMemory();")?;
    writeln!(w, "        return struct;")?;
    writeln!(w, "    }}")?;
    writeln!(w)?;

    Ok(())
}

fn write_getter(w: &mut impl FmtWrite, field: &JavaField) -> std::fmt::Result {
    let suffix = naming::accessor_suffix(&field.name);

    if field.repr == FieldRepr::CString {
        writeln!(w, "    public java.lang.String get{}(){{", suffix)?;
        writeln!(
            w,
            "        return RustCString.fromPointer({}.get());",
            field.name
        )?;
        writeln!(w, "    }}")?;
        writeln!(w)?;
        return Ok(());
    }

    writeln!(
        w,
        "    public {} get{}(){{",
        field.repr.getter_type(),
        suffix
    )?;
    if field.repr.reads_through_get() {
        writeln!(w, "        return {}.get();", field.name)?;
    } else {
        writeln!(w, "        return {};", field.name)?;
    }
    writeln!(w, "    }}")?;
    writeln!(w)?;

    Ok(())
}

fn write_setter(w: &mut impl FmtWrite, field: &JavaField) -> std::fmt::Result {
    let Some(setter_type) = field.repr.setter_type() else {
        return Ok(());
    };
    let suffix = naming::accessor_suffix(&field.name);

    if field.repr == FieldRepr::CString {
        writeln!(w, "    public void set{}(java.lang.String x){{", suffix)?;
        writeln!(
            w,
            "        this.{}.set(RustCString.toPointer(x));",
            field.name
        )?;
        writeln!(w, "    }}")?;
        writeln!(w)?;
        return Ok(());
    }

    if matches!(field.repr, FieldRepr::StructRef(_)) {
        // N structs pack back-to-back into one buffer; zero writes null
        writeln!(w, "    public void set{}({} x){{", suffix, setter_type)?;
        writeln!(w, "        if(x.length == 0 || x[0] == null){{")?;
        writeln!(
            w,
            "            this.{}.set(WgpuJava.createNullPointer());",
            field.name
        )?;
        writeln!(w, "        }} else {{")?;
        writeln!(w, "            this.{}.set(x);", field.name)?;
        writeln!(w, "        }}")?;
        writeln!(w, "    }}")?;
        writeln!(w)?;
        return Ok(());
    }

    writeln!(w, "    public void set{}({} x){{", suffix, setter_type)?;
    writeln!(w, "        this.{}.set(x);", field.name)?;
    writeln!(w, "    }}")?;
    writeln!(w)?;

    Ok(())
}

/// Renders one enum unit.
pub(crate) fn enum_unit(package: &str, class: &str, members: &[JavaEnumMember]) -> String {
    let mut out = String::new();
    write_enum(&mut out, package, class, members).expect("String write cannot fail");
    out
}

fn write_enum(
    w: &mut impl FmtWrite,
    package: &str,
    class: &str,
    members: &[JavaEnumMember],
) -> std::fmt::Result {
    writeln!(w, "{}", GENERATED_BANNER)?;
    writeln!(w, "package {};", package)?;
    writeln!(w)?;
    writeln!(w, "public enum {} {{", class)?;

    for member in members {
        if !member.comment.is_empty() {
            writeln!(w, "    {}", member.comment.replace('\n', "\n    "))?;
        }
        writeln!(w, "    {},", member.name)?;
    }

    writeln!(w, "}}")
}

/// Renders the single aggregated constants unit: globals first, then one
/// nested class per owner in deterministic order.
pub(crate) fn constants_unit(
    package: &str,
    class: &str,
    groups: &BTreeMap<String, Vec<JavaConstant>>,
) -> String {
    let mut out = String::new();
    write_constants(&mut out, package, class, groups).expect("String write cannot fail");
    out
}

fn write_constants(
    w: &mut impl FmtWrite,
    package: &str,
    class: &str,
    groups: &BTreeMap<String, Vec<JavaConstant>>,
) -> std::fmt::Result {
    writeln!(w, "{}", GENERATED_BANNER)?;
    writeln!(w, "package {};", package)?;
    writeln!(w)?;
    writeln!(w, "public final class {} {{", class)?;
    writeln!(w)?;
    writeln!(w, "    private {}(){{}}", class)?;
    writeln!(w)?;

    if let Some(globals) = groups.get("") {
        for constant in globals {
            write_constant(w, constant, "    ")?;
        }
        writeln!(w)?;
    }

    for (owner, constants) in groups.iter().filter(|(owner, _)| !owner.is_empty()) {
        writeln!(w, "    public static final class {} {{", owner)?;
        for constant in constants {
            write_constant(w, constant, "        ")?;
        }
        writeln!(w, "    }}")?;
        writeln!(w)?;
    }

    writeln!(w, "}}")
}

fn write_constant(
    w: &mut impl FmtWrite,
    constant: &JavaConstant,
    indent: &str,
) -> std::fmt::Result {
    if !constant.comment.is_empty() {
        writeln!(
            w,
            "{}{}",
            indent,
            constant
                .comment
                .replace('\n', &format!("\n{}", indent))
        )?;
    }

    writeln!(
        w,
        "{}public static final {} {} = {};",
        indent, constant.java_type, constant.name, constant.initializer
    )
}
