//! Patch registry: corrective mutations for specific declarations.
//!
//! Some information is lost between the native library and the parsed
//! header — alignment padding the C compiler inserts silently, and types
//! (unions) the parser cannot represent. The [`HookSet`] compensates: it is
//! an explicit, injected configuration structure mapping declared type names
//! to transformation closures, applied between registration and emission.
//! Tests swap in their own set; production runs use [`HookSet::standard`].

use crate::error::{Error, Result};
use crate::model::{Declaration, MockStructDecl, StructDecl, StructField, NO_USE_PREFIX};

/// A corrective mutation applied to one declaration between the passes.
pub type PatchFn = Box<dyn Fn(&mut Declaration) -> Result<()> + Send + Sync>;

/// Mock-struct registrations plus an ordered name → patch table.
#[derive(Default)]
pub struct HookSet {
    mocks: Vec<MockStructDecl>,
    patches: Vec<(String, PatchFn)>,
}

impl HookSet {
    /// Creates an empty hook set
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in set for the wgpu-native header:
    ///
    /// - `WGPUBindingResource` is union-typed in C, which the parser drops;
    ///   a mock struct seeds the symbol table so fields of that type still
    ///   resolve as opaque inline structs.
    /// - `WGPUBindGroupEntry` and `WGPUBindGroupLayoutEntry` carry alignment
    ///   padding the compiler inferred; explicit padding fields restore the
    ///   native layout.
    pub fn standard() -> Self {
        let mut hooks = Self::empty();
        hooks.register_mock("WGPUBindingResource", "WgpuBindingResource");
        hooks.add_patch(
            "WgpuBindGroupEntry",
            insert_padding(1, "uint32_t", "padding_0"),
        );
        hooks.add_patch(
            "WgpuBindGroupLayoutEntry",
            append_padding("uint32_t", "padding_1"),
        );
        hooks
    }

    /// Registers a synthetic struct under `c_name`, resolving to
    /// `export_name`
    pub fn register_mock(&mut self, c_name: impl Into<String>, export_name: impl Into<String>) {
        self.mocks.push(MockStructDecl {
            c_name: c_name.into(),
            export_name: export_name.into(),
        });
    }

    /// Adds a patch keyed by the target's exported struct name
    pub fn add_patch(&mut self, target: impl Into<String>, patch: PatchFn) {
        self.patches.push((target.into(), patch));
    }

    pub(crate) fn mocks(&self) -> &[MockStructDecl] {
        &self.mocks
    }

    pub(crate) fn patches(&self) -> &[(String, PatchFn)] {
        &self.patches
    }
}

/// Builds a patch inserting a padding field at a fixed index.
pub fn insert_padding(index: usize, c_type: &str, suffix: &str) -> PatchFn {
    let field = padding_field(c_type, suffix);

    Box::new(move |declaration| {
        let decl = expect_struct(declaration)?;

        if index > decl.fields.len() {
            return Err(Error::patch(
                &decl.c_name,
                format!(
                    "padding index {} out of range for {} fields",
                    index,
                    decl.fields.len()
                ),
            ));
        }

        decl.fields.insert(index, field.clone());
        Ok(())
    })
}

/// Builds a patch appending a trailing padding field.
pub fn append_padding(c_type: &str, suffix: &str) -> PatchFn {
    let field = padding_field(c_type, suffix);

    Box::new(move |declaration| {
        let decl = expect_struct(declaration)?;
        decl.fields.push(field.clone());
        Ok(())
    })
}

fn padding_field(c_type: &str, suffix: &str) -> StructField {
    StructField::raw(c_type, format!("{}{}", NO_USE_PREFIX, suffix))
}

fn expect_struct(declaration: &mut Declaration) -> Result<&mut StructDecl> {
    match declaration {
        Declaration::Struct(decl) => Ok(decl),
        other => Err(Error::patch(other.to_string(), "expected a struct")),
    }
}
