//! Symbol table and two-pass emission driver.
//!
//! The [`Registry`] is the pipeline's heart. It runs in two phases over the
//! parsed declarations:
//!
//! 1. **Registration** ([`Registry::register_all`]): every declaration's
//!    exported name enters the symbol table, aliases enter the alias table,
//!    and constants are width-checked and grouped by owner. Nothing is
//!    emitted. Because this pass completes before any field type is
//!    resolved, forward references across the header are safe regardless of
//!    textual order.
//! 2. **Emission** ([`Registry::emit_all`] / [`Registry::render_units`]):
//!    each struct field's C type is resolved to a Java representation
//!    against the now-complete symbol table, and one unit is written per
//!    non-excluded enum and struct, plus a single aggregated constants unit.
//!
//! Between the phases, the injected [`HookSet`](crate::hooks::HookSet)
//! seeds mock structs and patches known-defective layouts.
//!
//! Failures in one declaration are logged and skipped; only I/O setup and
//! constants no 64-bit type can hold abort the run.

mod emit;
mod naming;

pub use naming::NamingConfig;

use crate::error::{Error, Result};
use crate::hooks::HookSet;
use crate::model::{ConstantDecl, Declaration, EnumDecl, StructDecl, StructField};
use emit::{FieldRepr, JavaConstant, JavaEnumMember, JavaField};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

/// Transitive alias chains longer than this are treated as cycles.
const MAX_ALIAS_DEPTH: usize = 32;

/// Full configuration for one generator run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Naming policy
    pub naming: NamingConfig,
    /// Exported type names that register for resolution but never emit files
    pub excluded_types: HashSet<String>,
    /// Java package written at the top of every generated unit
    pub java_package: String,
    /// Class name of the aggregated constants unit
    pub constants_class: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            naming: NamingConfig::default(),
            excluded_types: HashSet::new(),
            java_package: "com.noahcharlton.wgpuj.jni".to_string(),
            constants_class: "WgpuConstants".to_string(),
        }
    }
}

/// One rendered output unit: a filename and its full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// File name relative to the output directory
    pub filename: String,
    /// Complete Java source text
    pub contents: String,
}

/// The rendered units of a run plus the count of declarations that failed.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Successfully rendered units, constants unit last
    pub units: Vec<GeneratedUnit>,
    /// Declarations skipped because rendering failed
    pub skipped: usize,
}

/// Counters describing one completed run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    /// Declarations that entered the pipeline
    pub declarations: usize,
    /// Names registered in the symbol table
    pub registered: usize,
    /// Constants collected into the aggregated unit
    pub constants: usize,
    /// Files written to the output directory
    pub files_written: usize,
    /// Declarations skipped after a logged failure
    pub skipped: usize,
}

/// Symbol table plus code-emission driver.
pub struct Registry {
    config: GeneratorConfig,
    declarations: Vec<Declaration>,
    /// C name → declaration index, for enum/struct/mock resolution
    types: HashMap<String, usize>,
    /// alias C name → original C type text, chased transitively
    aliases: HashMap<String, String>,
    /// owner prefix → constants, in deterministic owner order;
    /// the empty owner holds globals
    constants: BTreeMap<String, Vec<JavaConstant>>,
    skipped_registrations: usize,
}

impl Registry {
    /// Creates a registry over the parsed declarations
    pub fn new(config: GeneratorConfig, declarations: Vec<Declaration>) -> Self {
        Self {
            config,
            declarations,
            types: HashMap::new(),
            aliases: HashMap::new(),
            constants: BTreeMap::new(),
            skipped_registrations: 0,
        }
    }

    /// Pass 1: registers every declaration's exported name.
    ///
    /// Recoverable failures are logged and skip the one declaration; a
    /// constant exceeding 64 bits aborts the run.
    pub fn register_all(&mut self) -> Result<()> {
        for index in 0..self.declarations.len() {
            if let Err(err) = self.register_one(index) {
                if !err.is_recoverable() {
                    return Err(err);
                }

                warn!("failed to register {}: {}", self.declarations[index], err);
                self.skipped_registrations += 1;
            }
        }

        debug!(
            "registered {} types, {} aliases",
            self.types.len(),
            self.aliases.len()
        );
        Ok(())
    }

    fn register_one(&mut self, index: usize) -> Result<()> {
        match &self.declarations[index] {
            Declaration::Constant(constant) => {
                let constant = constant.clone();
                self.register_constant(&constant)
            }
            Declaration::Enum(e) => {
                self.types.insert(e.c_name.clone(), index);
                Ok(())
            }
            Declaration::Struct(s) => {
                self.types.insert(s.c_name.clone(), index);
                Ok(())
            }
            Declaration::TypeAlias(alias) => {
                self.aliases
                    .insert(alias.alias.clone(), alias.original.clone());
                Ok(())
            }
            Declaration::MockStruct(mock) => {
                self.types.insert(mock.c_name.clone(), index);
                Ok(())
            }
        }
    }

    fn register_constant(&mut self, constant: &ConstantDecl) -> Result<()> {
        let (java_type, initializer) = constant_rendering(constant)?;
        let (owner, local) = naming::constant_owner(&self.config.naming, &constant.c_name);

        self.constants.entry(owner).or_default().push(JavaConstant {
            name: local,
            java_type,
            initializer,
            comment: constant.comment.clone(),
        });
        Ok(())
    }

    /// Runs the patch step between the two passes: seeds the hook set's mock
    /// structs into the symbol table, then applies each named patch to its
    /// struct. Patch failures are declaration-local.
    pub fn apply_hooks(&mut self, hooks: &HookSet) -> Result<()> {
        for mock in hooks.mocks() {
            let index = self.declarations.len();
            self.types.insert(mock.c_name.clone(), index);
            self.declarations.push(Declaration::MockStruct(mock.clone()));
        }

        for (target, patch) in hooks.patches() {
            let Some(index) = self.find_struct_index(target) else {
                warn!("patch target '{}' not found in this header", target);
                continue;
            };

            if let Err(err) = patch(&mut self.declarations[index]) {
                if !err.is_recoverable() {
                    return Err(err);
                }

                warn!("failed to patch {}: {}", self.declarations[index], err);
                self.skipped_registrations += 1;
            }
        }

        Ok(())
    }

    fn find_struct_index(&self, export_name: &str) -> Option<usize> {
        self.declarations.iter().position(|decl| {
            matches!(decl, Declaration::Struct(s)
                if naming::export_type_name(&self.config.naming, &s.c_name) == export_name)
        })
    }

    /// Pass 2, in memory: renders every unit, constants last.
    ///
    /// Declarations whose resolution fails are logged and skipped.
    pub fn render_units(&self) -> RenderOutcome {
        let mut units = Vec::new();
        let mut skipped = 0;

        for declaration in &self.declarations {
            match self.render_declaration(declaration) {
                Ok(Some(unit)) => units.push(unit),
                Ok(None) => {}
                Err(err) => {
                    warn!("failed to generate {}: {}", declaration, err);
                    skipped += 1;
                }
            }
        }

        units.push(self.render_constants());

        RenderOutcome { units, skipped }
    }

    /// Pass 2, on disk: renders and writes every unit into `out_dir`.
    ///
    /// Each file handle is acquired immediately before one unit's write and
    /// released after it, on every path. Write failures are logged and
    /// skipped like any other declaration-local error.
    pub fn emit_all(&self, out_dir: &Path) -> Result<RunStats> {
        let outcome = self.render_units();
        let mut written = 0;
        let mut skipped = outcome.skipped;

        for unit in &outcome.units {
            let path = out_dir.join(&unit.filename);

            match std::fs::write(&path, &unit.contents) {
                Ok(()) => {
                    debug!("wrote {}", path.display());
                    written += 1;
                }
                Err(source) => {
                    let err = Error::file_write(&path, source);
                    warn!("failed to save {}: {}", unit.filename, err);
                    skipped += 1;
                }
            }
        }

        Ok(RunStats {
            declarations: self.declarations.len(),
            registered: self.types.len(),
            constants: self.constants.values().map(Vec::len).sum(),
            files_written: written,
            skipped: skipped + self.skipped_registrations,
        })
    }

    fn render_declaration(&self, declaration: &Declaration) -> Result<Option<GeneratedUnit>> {
        match declaration {
            Declaration::Enum(e) => self.render_enum(e),
            Declaration::Struct(s) => self.render_struct(s),
            // constants aggregate into one shared unit; aliases and mocks
            // contribute symbol-table entries only
            Declaration::Constant(_)
            | Declaration::TypeAlias(_)
            | Declaration::MockStruct(_) => Ok(None),
        }
    }

    fn render_enum(&self, decl: &EnumDecl) -> Result<Option<GeneratedUnit>> {
        let class = naming::enum_export_name(&self.config.naming, &decl.c_name);
        if self.config.excluded_types.contains(&class) {
            debug!("skipping excluded type {}", class);
            return Ok(None);
        }

        let members: Vec<JavaEnumMember> = decl
            .fields
            .iter()
            .map(|field| JavaEnumMember {
                name: naming::enum_member_name(&self.config.naming, &decl.c_name, &field.c_name),
                comment: field.comment.clone(),
            })
            .collect();

        Ok(Some(GeneratedUnit {
            filename: format!("{}.java", class),
            contents: emit::enum_unit(&self.config.java_package, &class, &members),
        }))
    }

    fn render_struct(&self, decl: &StructDecl) -> Result<Option<GeneratedUnit>> {
        let class = naming::export_type_name(&self.config.naming, &decl.c_name);
        if self.config.excluded_types.contains(&class) {
            debug!("skipping excluded type {}", class);
            return Ok(None);
        }

        let mut fields = Vec::with_capacity(decl.fields.len());
        for field in &decl.fields {
            fields.push(self.resolve_field(field)?);
        }

        Ok(Some(GeneratedUnit {
            filename: format!("{}.java", class),
            contents: emit::struct_unit(&self.config.java_package, &class, &fields),
        }))
    }

    fn render_constants(&self) -> GeneratedUnit {
        GeneratedUnit {
            filename: format!("{}.java", self.config.constants_class),
            contents: emit::constants_unit(
                &self.config.java_package,
                &self.config.constants_class,
                &self.constants,
            ),
        }
    }

    fn resolve_field(&self, field: &StructField) -> Result<JavaField> {
        let is_pointer = field.c_name.starts_with('*');
        let raw_name = field.c_name.trim_start_matches('*');
        let name = if field.case_convert {
            naming::camel_case(raw_name)
        } else {
            raw_name.to_string()
        };

        Ok(JavaField {
            name,
            repr: self.resolve_type(&field.c_type, is_pointer)?,
            accessors: !field.is_padding(),
        })
    }

    /// Resolves a field's C type by precedence, first match wins: string
    /// pointer, pointer to declared/unknown type, fixed-width scalar,
    /// registered enum, registered (mock) struct, alias substitution.
    fn resolve_type(&self, c_type: &str, is_pointer: bool) -> Result<FieldRepr> {
        let mut ty = c_type.to_string();

        for _ in 0..MAX_ALIAS_DEPTH {
            if ty == "const char" || (ty == "char" && is_pointer) {
                return Ok(FieldRepr::CString);
            }

            if is_pointer {
                return Ok(match self.types.get(&ty) {
                    Some(&index) => FieldRepr::StructRef(self.export_name_of(index)?),
                    None => FieldRepr::RawPointer,
                });
            }

            match ty.as_str() {
                "uintptr_t" | "uint64_t" | "unsigned long long" => {
                    return Ok(FieldRepr::Unsigned64)
                }
                "int64_t" => return Ok(FieldRepr::Signed64),
                "uint32_t" => return Ok(FieldRepr::Unsigned32),
                "int32_t" => return Ok(FieldRepr::Signed32),
                "uint8_t" => return Ok(FieldRepr::Unsigned8),
                "bool" => return Ok(FieldRepr::Boolean),
                "float" => return Ok(FieldRepr::Float),
                "double" => return Ok(FieldRepr::Double),
                _ => {}
            }

            if let Some(&index) = self.types.get(&ty) {
                return match &self.declarations[index] {
                    Declaration::Enum(_) => Ok(FieldRepr::Enum(self.export_name_of(index)?)),
                    Declaration::Struct(_) | Declaration::MockStruct(_) => {
                        Ok(FieldRepr::Inline(self.export_name_of(index)?))
                    }
                    other => Err(Error::internal(format!(
                        "{} registered as a field type",
                        other
                    ))),
                };
            }

            if let Some(original) = self.aliases.get(&ty) {
                ty = original.clone();
                continue;
            }

            return Err(Error::unknown_type(c_type));
        }

        Err(Error::unknown_type(format!("{} (alias cycle)", c_type)))
    }

    fn export_name_of(&self, index: usize) -> Result<String> {
        match &self.declarations[index] {
            Declaration::Enum(e) => Ok(naming::enum_export_name(&self.config.naming, &e.c_name)),
            Declaration::Struct(s) => Ok(naming::export_type_name(&self.config.naming, &s.c_name)),
            Declaration::MockStruct(mock) => Ok(mock.export_name.clone()),
            other => Err(Error::internal(format!("{} has no exported type name", other))),
        }
    }
}

/// Runs the complete pipeline against a header file on disk.
///
/// This is a convenience function: it reads the header, parses it, runs both
/// registry passes with the given hooks, and writes every generated unit
/// into a freshly recreated `<out_root>/jnr-gen/` directory.
pub fn generate_bindings(
    header: &Path,
    out_root: &Path,
    config: GeneratorConfig,
    hooks: &HookSet,
) -> Result<RunStats> {
    let text = std::fs::read_to_string(header).map_err(|e| Error::file_read(header, e))?;
    let declarations = crate::parser::parse_header(&text);

    let mut registry = Registry::new(config, declarations);
    registry.register_all()?;
    registry.apply_hooks(hooks)?;

    let out_dir = out_root.join("jnr-gen");
    if out_dir.exists() {
        std::fs::remove_dir_all(&out_dir).map_err(|e| Error::directory_remove(&out_dir, e))?;
    }
    std::fs::create_dir_all(&out_dir).map_err(|e| Error::directory_create(&out_dir, e))?;

    registry.emit_all(&out_dir)
}

/// Derives a constant's Java type and initializer expression.
///
/// An `ULL` suffix selects unsigned 64-bit handling: the literal is parsed
/// unsigned-safe and rendered through `Long.parseUnsignedLong`, so values
/// with the top bit set survive. Anything else takes the minimal signed
/// width that holds it; past 64 bits there is nothing to pick, which is
/// fatal to the run.
fn constant_rendering(constant: &ConstantDecl) -> Result<(&'static str, String)> {
    use crate::model::parse_c_integer;

    if constant.value.contains("ULL") {
        let digits = constant.value.replace("ULL", "");
        let value = parse_c_integer(&digits)
            .ok_or_else(|| Error::invalid_literal(&constant.c_name, &constant.value))?;

        if value < 0 || value > u64::MAX as i128 {
            return Err(Error::constant_overflow(&constant.c_name, &constant.value));
        }

        return Ok((
            "long",
            format!("Long.parseUnsignedLong(\"{}\")", value as u64),
        ));
    }

    let value = parse_c_integer(&constant.value)
        .ok_or_else(|| Error::invalid_literal(&constant.c_name, &constant.value))?;

    if i32::try_from(value).is_ok() {
        Ok(("int", constant.value.clone()))
    } else if i64::try_from(value).is_ok() {
        Ok(("long", format!("{}L", constant.value)))
    } else {
        Err(Error::constant_overflow(&constant.c_name, &constant.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookSet;
    use crate::parser::parse_header;
    use pretty_assertions::assert_eq;

    fn registered(header: &str) -> Registry {
        registered_with(GeneratorConfig::default(), header)
    }

    fn registered_with(config: GeneratorConfig, header: &str) -> Registry {
        let mut registry = Registry::new(config, parse_header(header));
        registry.register_all().expect("registration failed");
        registry
    }

    fn unit_named<'a>(outcome: &'a RenderOutcome, filename: &str) -> &'a GeneratedUnit {
        outcome
            .units
            .iter()
            .find(|unit| unit.filename == filename)
            .unwrap_or_else(|| panic!("no unit named {}", filename))
    }

    #[test]
    fn test_forward_reference_resolves_after_registration() {
        // the referencing struct is declared textually before the referenced one
        let header = "typedef struct WGPUPass {\n  WGPUColor *attachments;\n} WGPUPass;\n\
                      typedef struct WGPUColor {\n  double r;\n} WGPUColor;";
        let registry = registered(header);
        let outcome = registry.render_units();

        assert_eq!(outcome.skipped, 0);
        let pass = unit_named(&outcome, "WgpuPass.java");
        assert!(pass
            .contents
            .contains("DynamicStructRef<WgpuColor> attachments"));
    }

    #[test]
    fn test_alias_chases_to_string_pointer() {
        let header = "typedef const char *WGPULabel;\n\
                      typedef struct WGPUThing {\n  WGPULabel label;\n} WGPUThing;";
        let registry = registered(header);
        let outcome = registry.render_units();

        let thing = unit_named(&outcome, "WgpuThing.java");
        assert!(thing
            .contents
            .contains("return RustCString.fromPointer(label.get());"));
        assert!(thing
            .contents
            .contains("this.label.set(RustCString.toPointer(x));"));
    }

    #[test]
    fn test_alias_chases_transitively_to_scalar() {
        let header = "typedef uint64_t WGPUId;\ntypedef WGPUId WGPUDeviceId;\n\
                      typedef struct WGPUHandle {\n  WGPUDeviceId device;\n} WGPUHandle;";
        let registry = registered(header);
        let outcome = registry.render_units();

        let handle = unit_named(&outcome, "WgpuHandle.java");
        assert!(handle.contents.contains("Struct.Unsigned64 device"));
    }

    #[test]
    fn test_pointer_to_unknown_type_is_opaque() {
        let header = "typedef struct WGPUOpaque {\n  SomeVendorBlob *handle;\n} WGPUOpaque;";
        let registry = registered(header);
        let outcome = registry.render_units();

        let opaque = unit_named(&outcome, "WgpuOpaque.java");
        assert!(opaque.contents.contains("Struct.Pointer handle"));
        assert!(opaque.contents.contains("public jnr.ffi.Pointer getHandle(){"));
    }

    #[test]
    fn test_unknown_field_type_skips_only_that_struct() {
        let header = "typedef struct WGPUBad {\n  mystery_t value;\n} WGPUBad;\n\
                      typedef struct WGPUGood {\n  uint32_t value;\n} WGPUGood;";
        let registry = registered(header);
        let outcome = registry.render_units();

        assert_eq!(outcome.skipped, 1);
        assert!(outcome
            .units
            .iter()
            .all(|unit| unit.filename != "WgpuBad.java"));
        unit_named(&outcome, "WgpuGood.java");
    }

    #[test]
    fn test_nested_struct_is_inline_owned() {
        let header = "typedef struct WGPUExtent3d {\n  uint32_t width;\n} WGPUExtent3d;\n\
                      typedef struct WGPUTextureDescriptor {\n  WGPUExtent3d size;\n} WGPUTextureDescriptor;";
        let registry = registered(header);
        let outcome = registry.render_units();

        let descriptor = unit_named(&outcome, "WgpuTextureDescriptor.java");
        assert!(descriptor
            .contents
            .contains("private final WgpuExtent3d size = inner(WgpuExtent3d.createHeap());"));
        assert!(descriptor.contents.contains("public WgpuExtent3d getSize(){"));
        assert!(!descriptor.contents.contains("setSize"));
    }

    #[test]
    fn test_enum_field_resolves_to_enum_accessor() {
        let header = "typedef enum {\n  WGPUAddressMode_Repeat,\n} WGPUAddressMode;\n\
                      typedef struct WGPUSamplerDescriptor {\n  WGPUAddressMode address_mode;\n} WGPUSamplerDescriptor;";
        let registry = registered(header);
        let outcome = registry.render_units();

        let sampler = unit_named(&outcome, "WgpuSamplerDescriptor.java");
        assert!(sampler.contents.contains(
            "private final Struct.Enum<WgpuAddressMode> addressMode = new Struct.Enum<>(WgpuAddressMode.class);"
        ));
        assert!(sampler
            .contents
            .contains("public WgpuAddressMode getAddressMode(){"));
        assert!(sampler
            .contents
            .contains("public void setAddressMode(WgpuAddressMode x){"));
    }

    #[test]
    fn test_excluded_type_registers_but_never_emits() {
        let mut config = GeneratorConfig::default();
        config.excluded_types.insert("WgpuSecret".to_string());

        let header = "typedef struct WGPUSecret {\n  uint32_t token;\n} WGPUSecret;\n\
                      typedef struct WGPUHolder {\n  WGPUSecret *secret;\n} WGPUHolder;";
        let registry = registered_with(config, header);
        let outcome = registry.render_units();

        assert!(outcome
            .units
            .iter()
            .all(|unit| unit.filename != "WgpuSecret.java"));
        // resolution against the excluded name still works
        let holder = unit_named(&outcome, "WgpuHolder.java");
        assert!(holder.contents.contains("DynamicStructRef<WgpuSecret>"));
    }

    #[test]
    fn test_mock_struct_seeds_resolution() {
        let header =
            "typedef struct WGPUBindGroupEntry {\n  WGPUBindingResource resource;\n} WGPUBindGroupEntry;";
        let mut registry = registered(header);
        registry.apply_hooks(&HookSet::standard()).unwrap();
        let outcome = registry.render_units();

        let entry = unit_named(&outcome, "WgpuBindGroupEntry.java");
        assert!(entry.contents.contains(
            "private final WgpuBindingResource resource = inner(WgpuBindingResource.createHeap());"
        ));
        // the mock itself emits no file
        assert!(outcome
            .units
            .iter()
            .all(|unit| unit.filename != "WgpuBindingResource.java"));
    }

    #[test]
    fn test_standard_hooks_insert_padding_without_accessors() {
        let header = "typedef struct WGPUBindGroupEntry {\n  uint32_t binding;\n  uint64_t offset;\n} WGPUBindGroupEntry;";
        let mut registry = registered(header);
        registry.apply_hooks(&HookSet::standard()).unwrap();
        let outcome = registry.render_units();

        let entry = unit_named(&outcome, "WgpuBindGroupEntry.java");
        let binding_at = entry.contents.find("binding =").unwrap();
        let padding_at = entry.contents.find("_NO_USE_padding_0").unwrap();
        let offset_at = entry.contents.find("offset =").unwrap();
        assert!(binding_at < padding_at && padding_at < offset_at);
        assert!(!entry.contents.contains("get_NO_USE"));
        assert!(!entry.contents.contains("set_NO_USE"));
    }

    #[test]
    fn test_constants_grouped_and_width_detected() {
        let header = "#define WGPUMAX_BIND_GROUPS 4\n\
                      #define WGPU_WHOLE_SIZE 18446744073709551615ULL\n\
                      #define WGPUBufferUsage_MAP_READ 1\n\
                      #define WGPUBufferUsage_MAP_WRITE 2\n";
        let registry = registered(header);
        let outcome = registry.render_units();

        let constants = unit_named(&outcome, "WgpuConstants.java");
        assert!(constants
            .contents
            .contains("public static final int MAX_BIND_GROUPS = 4;"));
        assert!(constants.contents.contains(
            "public static final long WHOLE_SIZE = Long.parseUnsignedLong(\"18446744073709551615\");"
        ));
        assert!(constants
            .contents
            .contains("public static final class WgpuBufferUsage {"));
        assert!(constants
            .contents
            .contains("        public static final int MAP_READ = 1;"));
        assert!(constants
            .contents
            .contains("        public static final int MAP_WRITE = 2;"));
    }

    #[test]
    fn test_unsigned_suffix_hex_parses_without_overflow() {
        let header = "#define WGPU_ALL_BITS 0xFFFFFFFFFFFFFFFFULL\n";
        let registry = registered(header);
        let outcome = registry.render_units();

        let constants = unit_named(&outcome, "WgpuConstants.java");
        assert!(constants
            .contents
            .contains("Long.parseUnsignedLong(\"18446744073709551615\")"));
    }

    #[test]
    fn test_64_bit_signed_constant_gets_long_suffix() {
        let header = "#define WGPUBIG_VALUE 8589934592\n";
        let registry = registered(header);
        let outcome = registry.render_units();

        let constants = unit_named(&outcome, "WgpuConstants.java");
        assert!(constants
            .contents
            .contains("public static final long BIG_VALUE = 8589934592L;"));
    }

    #[test]
    fn test_constant_past_64_bits_is_run_fatal() {
        let header = "#define WGPUTOO_BIG 0x1FFFFFFFFFFFFFFFFULL\n";
        let mut registry = Registry::new(GeneratorConfig::default(), parse_header(header));

        let err = registry.register_all().unwrap_err();
        assert!(matches!(err, Error::ConstantOverflow { .. }));
    }

    #[test]
    fn test_unparseable_constant_is_skipped_not_fatal() {
        let header = "#define WGPUWEIRD UINT64_MAX\n#define WGPUOK_VALUE 1\n";
        let mut registry = Registry::new(GeneratorConfig::default(), parse_header(header));
        registry.register_all().expect("run should survive");

        let outcome = registry.render_units();
        let constants = unit_named(&outcome, "WgpuConstants.java");
        assert!(constants.contents.contains("OK_VALUE"));
        assert!(!constants.contents.contains("WEIRD"));
    }

    #[test]
    fn test_accessor_names_from_snake_case() {
        let header = "typedef struct WGPULimits {\n  uint32_t some_field;\n} WGPULimits;";
        let registry = registered(header);
        let outcome = registry.render_units();

        let limits = unit_named(&outcome, "WgpuLimits.java");
        assert!(limits.contents.contains("public long getSomeField(){"));
        assert!(limits.contents.contains("public void setSomeField(long x){"));
    }

    #[test]
    fn test_two_runs_are_byte_identical() {
        let header = "#define WGPUMAX_ANISOTROPY 16\n\
                      typedef enum {\n  WGPUPowerPreference_LowPower = 1,\n  WGPUPowerPreference_HighPerformance = 2,\n} WGPUPowerPreference;\n\
                      typedef struct WGPUAdapterOptions {\n  WGPUPowerPreference power_preference;\n  bool compatible;\n} WGPUAdapterOptions;";

        let run = |_: usize| {
            let mut registry = Registry::new(GeneratorConfig::default(), parse_header(header));
            registry.register_all().unwrap();
            registry.apply_hooks(&HookSet::standard()).unwrap();
            registry.render_units().units
        };

        assert_eq!(run(0), run(1));
    }

    #[test]
    fn test_generate_bindings_recreates_output_tree() {
        let temp = tempfile::tempdir().unwrap();
        let header_path = temp.path().join("wgpu.h");
        std::fs::write(
            &header_path,
            "typedef struct WGPUColor {\n  double r;\n} WGPUColor;\n",
        )
        .unwrap();

        let stale_dir = temp.path().join("jnr-gen");
        std::fs::create_dir_all(&stale_dir).unwrap();
        std::fs::write(stale_dir.join("Stale.java"), "old").unwrap();

        let stats = generate_bindings(
            &header_path,
            temp.path(),
            GeneratorConfig::default(),
            &HookSet::empty(),
        )
        .unwrap();

        assert_eq!(stats.files_written, 2);
        assert!(stale_dir.join("WgpuColor.java").exists());
        assert!(!stale_dir.join("Stale.java").exists());
    }

    #[test]
    fn test_generate_bindings_missing_header_is_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let err = generate_bindings(
            &temp.path().join("nope.h"),
            temp.path(),
            GeneratorConfig::default(),
            &HookSet::empty(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::FileRead { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_emit_all_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let header = "typedef struct WGPUColor {\n  double r;\n} WGPUColor;\n#define WGPUMAX_BIND_GROUPS 4\n";
        let registry = registered(header);

        let stats = registry.emit_all(dir.path()).unwrap();

        assert_eq!(stats.files_written, 2);
        assert_eq!(stats.constants, 1);
        assert!(dir.path().join("WgpuColor.java").exists());
        assert!(dir.path().join("WgpuConstants.java").exists());
    }
}
