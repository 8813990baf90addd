//! Exported-name derivation.
//!
//! All naming policy lives here: camel-casing of C field names, the
//! library-prefix rewrite for exported type names, enum member re-casing,
//! and the owner-prefix split that groups constants.

use std::collections::HashMap;

/// Naming policy for exported identifiers.
///
/// The defaults match the `wgpu-native` header as produced by cbindgen; every
/// heuristic the generator applies to names is a field here so tests (and
/// future headers with different conventions) can swap it out.
#[derive(Debug, Clone)]
pub struct NamingConfig {
    /// The library prefix as it appears in C names (`WGPU`)
    pub library_prefix_upper: String,
    /// The prefix's exported mixed-case form (`Wgpu`)
    pub library_prefix_mixed: String,
    /// Suffix cbindgen appends to enum type names but not to their members.
    ///
    /// `None` disables the strip entirely for headers that do not use the
    /// convention.
    pub enum_tag_suffix: Option<String>,
    /// Final corrective renames applied to exported identifiers
    pub export_renames: HashMap<String, String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            library_prefix_upper: "WGPU".to_string(),
            library_prefix_mixed: "Wgpu".to_string(),
            enum_tag_suffix: Some("Tag".to_string()),
            export_renames: HashMap::new(),
        }
    }
}

/// Converts a `snake_case` C field name to Java camel case: each character
/// after an underscore is upper-cased, underscores are dropped, everything
/// else is lower-cased.
pub(crate) fn camel_case(name: &str) -> String {
    let mut output = String::with_capacity(name.len());
    let mut was_underscore = false;

    for c in name.chars() {
        if c == '_' {
            was_underscore = true;
        } else if was_underscore {
            was_underscore = false;
            output.extend(c.to_uppercase());
        } else {
            output.extend(c.to_lowercase());
        }
    }

    output
}

/// Upper-cases the first character of a camel-cased field name, producing
/// the suffix shared by its `get`/`set` accessors.
pub(crate) fn accessor_suffix(java_name: &str) -> String {
    let mut chars = java_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Exported type name for a struct: library prefix rewritten to its
/// mixed-case form, then the rename table applied.
pub(crate) fn export_type_name(config: &NamingConfig, c_name: &str) -> String {
    let name = c_name.replace(&config.library_prefix_upper, &config.library_prefix_mixed);
    apply_rename(config, name)
}

/// Exported type name for an enum: underscores stripped first, then the
/// struct rules.
pub(crate) fn enum_export_name(config: &NamingConfig, c_name: &str) -> String {
    export_type_name(config, &c_name.replace('_', ""))
}

/// Exported name for one enum member.
///
/// The member's C name carries the enum's own name as a prefix (with the
/// tag suffix removed, compensating for cbindgen appending it to the type
/// but not the members). The prefix and underscores are stripped, the
/// remainder re-segmented at lower→upper transitions into `_`-joined
/// all-caps words, and the rename table applied.
pub(crate) fn enum_member_name(config: &NamingConfig, enum_c_name: &str, member: &str) -> String {
    let type_name = enum_c_name.replace('_', "");
    let header = match &config.enum_tag_suffix {
        Some(suffix) => type_name.replace(suffix.as_str(), ""),
        None => type_name,
    };

    let stripped = member.replace(&header, "").replace('_', "");

    let mut output = String::with_capacity(stripped.len() + 4);
    for c in stripped.chars() {
        if c.is_uppercase() && !output.is_empty() {
            output.push('_');
        }
        output.extend(c.to_uppercase());
    }

    apply_rename(config, output)
}

/// Splits a constant's C name into its owner group and local name.
///
/// The owner is the portion before the first underscore; an all-upper-case
/// prefix means the constant is global (owner `""`), with the library prefix
/// trimmed from the local name. Otherwise the prefix, case-normalized, is
/// the owner and the remainder the local name.
pub(crate) fn constant_owner(config: &NamingConfig, c_name: &str) -> (String, String) {
    let (prefix, rest) = match c_name.split_once('_') {
        Some((prefix, rest)) => (prefix, Some(rest)),
        None => (c_name, None),
    };

    let all_upper = !prefix.chars().any(|c| c.is_lowercase());

    match rest {
        Some(rest) if !all_upper => {
            let owner = prefix.replace(&config.library_prefix_upper, &config.library_prefix_mixed);
            (owner, rest.to_string())
        }
        _ => {
            let local = c_name
                .strip_prefix(&config.library_prefix_upper)
                .unwrap_or(c_name)
                .trim_start_matches('_');
            (String::new(), local.to_string())
        }
    }
}

fn apply_rename(config: &NamingConfig, name: String) -> String {
    config.export_renames.get(&name).cloned().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("some_field"), "someField");
        assert_eq!(camel_case("sample_count"), "sampleCount");
        assert_eq!(camel_case("r"), "r");
        assert_eq!(camel_case("todo_list_entry"), "todoListEntry");
    }

    #[test]
    fn test_accessor_suffix() {
        assert_eq!(accessor_suffix("someField"), "SomeField");
        assert_eq!(accessor_suffix("r"), "R");
    }

    #[test]
    fn test_export_type_names() {
        let config = NamingConfig::default();
        assert_eq!(export_type_name(&config, "WGPUColor"), "WgpuColor");
        assert_eq!(
            enum_export_name(&config, "WGPU_Power_Preference"),
            "WgpuPowerPreference"
        );
    }

    #[test]
    fn test_export_rename_applied() {
        let mut config = NamingConfig::default();
        config
            .export_renames
            .insert("WgpuCLimits".to_string(), "WgpuLimits".to_string());
        assert_eq!(export_type_name(&config, "WGPUCLimits"), "WgpuLimits");
    }

    #[test]
    fn test_enum_member_name_strips_prefix_and_tag() {
        let config = NamingConfig::default();
        assert_eq!(
            enum_member_name(&config, "WGPUFooTag", "WGPUFoo_BarBaz"),
            "BAR_BAZ"
        );
        assert_eq!(
            enum_member_name(&config, "WGPUAdapterType", "WGPUAdapterType_DiscreteGpu"),
            "DISCRETE_GPU"
        );
    }

    #[test]
    fn test_enum_member_name_without_tag_heuristic() {
        let config = NamingConfig {
            enum_tag_suffix: None,
            ..NamingConfig::default()
        };
        // with the heuristic off, the "Tag"-less prefix no longer matches
        assert_eq!(
            enum_member_name(&config, "WGPUFooTag", "WGPUFoo_BarBaz"),
            "W_G_P_U_FOO_BAR_BAZ"
        );
    }

    #[test]
    fn test_constant_owner_split() {
        let config = NamingConfig::default();
        assert_eq!(
            constant_owner(&config, "WGPUBufferUsage_MAP_READ"),
            ("WgpuBufferUsage".to_string(), "MAP_READ".to_string())
        );
        assert_eq!(
            constant_owner(&config, "WGPUMAX_BIND_GROUPS"),
            (String::new(), "MAX_BIND_GROUPS".to_string())
        );
        assert_eq!(
            constant_owner(&config, "WGPU_WHOLE_SIZE"),
            (String::new(), "WHOLE_SIZE".to_string())
        );
    }
}
