//! Validates the shipped WGSL and cross-checks the uniform block layout
//! against the CPU-side struct the render loop uploads.

use fractune::shader::SHADER_SOURCE;
use fractune::GeneratorUniforms;

fn validated_module() -> naga::Module {
    let module = naga::front::wgsl::parse_str(SHADER_SOURCE)
        .unwrap_or_else(|e| panic!("WGSL parse error: {:?}", e));

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .unwrap_or_else(|e| panic!("WGSL validation error: {:?}", e));

    module
}

#[test]
fn shader_parses_and_validates() {
    let module = validated_module();

    let entry_points: Vec<&str> = module
        .entry_points
        .iter()
        .map(|ep| ep.name.as_str())
        .collect();
    assert!(entry_points.contains(&"vs_main"));
    assert!(entry_points.contains(&"fs_main"));
}

#[test]
fn uniform_block_layout_matches_cpu_struct() {
    let module = validated_module();

    let (_, params) = module
        .types
        .iter()
        .find(|(_, ty)| ty.name.as_deref() == Some("Params"))
        .expect("shader is missing the Params uniform struct");

    let naga::TypeInner::Struct { members, span } = &params.inner else {
        panic!("Params is not a struct");
    };

    assert_eq!(*span as usize, std::mem::size_of::<GeneratorUniforms>());

    let offsets: Vec<(&str, u32)> = members
        .iter()
        .map(|m| (m.name.as_deref().unwrap_or(""), m.offset))
        .collect();
    assert_eq!(
        offsets,
        vec![
            ("fractal_bounds", 0),
            ("easings", 16),
            ("local_position", 32),
            ("intervals", 48),
            ("resolution", 64),
            ("time", 72),
        ]
    );
}
