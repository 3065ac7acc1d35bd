use std::collections::HashSet;
use std::path::Path;

/// Number of ranked attributes in each group (practice types, settings)
const ATTRIBUTES_PER_GROUP: usize = 4;

fn main() {
    let layout_path = Path::new("schemas/roster_layout.json");
    validate_layout_file(layout_path);
    set_build_dependencies();
}

fn validate_layout_file(layout_path: &Path) {
    // Ensure the default layout exists at build time
    assert!(
        layout_path.exists(),
        "\n\nLAYOUT BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the roster layout file before building.\n",
        layout_path.display()
    );

    let layout_contents = std::fs::read_to_string(layout_path).unwrap_or_else(|e| {
        panic!(
            "\n\nLAYOUT BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            layout_path.display()
        );
    });

    let layout: serde_json::Value = serde_json::from_str(&layout_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nLAYOUT BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            layout_path.display()
        );
    });

    validate_layout_structure(&layout);
}

fn validate_layout_structure(layout: &serde_json::Value) {
    assert!(
        layout.is_object(),
        "\n\nLAYOUT BUILD ERROR: Root must be a JSON object\n\
         Got: {layout}\n"
    );

    let seeker_fields = validate_section(
        layout,
        "seeker",
        &[
            "last_name",
            "first_name",
            "gender",
            "language",
            "home",
            "comments",
            "pre_match",
        ],
        &["practice_ranks", "setting_ranks"],
    );
    let host_fields = validate_section(
        layout,
        "host",
        &[
            "last_name",
            "first_name",
            "practice_types",
            "location",
            "practice_region",
            "gender_preference",
            "language",
            "preferred_day",
            "secondary_day",
            "comments",
            "pre_match",
        ],
        &[],
    );

    println!(
        "cargo:warning=Validated roster layout: {seeker_fields} student fields, {host_fields} preceptor fields"
    );
}

/// Validate one layout section and return the number of positional fields it maps.
fn validate_section(
    layout: &serde_json::Value,
    section: &str,
    scalar_keys: &[&str],
    group_keys: &[&str],
) -> usize {
    let object = layout.get(section).unwrap_or_else(|| {
        panic!("\n\nLAYOUT BUILD ERROR: Missing '{section}' section\n");
    });

    let mut seen: HashSet<u64> = HashSet::new();

    for key in scalar_keys {
        let index = object
            .get(*key)
            .and_then(serde_json::Value::as_u64)
            .unwrap_or_else(|| {
                panic!(
                    "\n\nLAYOUT BUILD ERROR: '{section}.{key}' must be a non-negative integer\n"
                );
            });
        assert!(
            seen.insert(index),
            "\n\nLAYOUT BUILD ERROR: '{section}.{key}' reuses field position {index}\n"
        );
    }

    for key in group_keys {
        let indexes = object
            .get(*key)
            .and_then(serde_json::Value::as_array)
            .unwrap_or_else(|| {
                panic!("\n\nLAYOUT BUILD ERROR: '{section}.{key}' must be an array\n");
            });
        assert!(
            indexes.len() == ATTRIBUTES_PER_GROUP,
            "\n\nLAYOUT BUILD ERROR: '{section}.{key}' must list {ATTRIBUTES_PER_GROUP} positions, found {}\n",
            indexes.len()
        );
        for value in indexes {
            let index = value.as_u64().unwrap_or_else(|| {
                panic!("\n\nLAYOUT BUILD ERROR: '{section}.{key}' holds a non-integer position\n");
            });
            assert!(
                seen.insert(index),
                "\n\nLAYOUT BUILD ERROR: '{section}.{key}' reuses field position {index}\n"
            );
        }
    }

    seen.len()
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the layout changes
    println!("cargo:rerun-if-changed=schemas/roster_layout.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
