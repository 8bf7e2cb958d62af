use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LayoutError::out_of_range(3, 2)
            .to_string()
            .contains("index 3 out of range for 2 children")
    );
    assert!(
        LayoutError::UnknownRect(RectId(7))
            .to_string()
            .contains("unknown rect #7")
    );
    assert!(
        LayoutError::DuplicateGroup(RectId(1))
            .to_string()
            .contains("already has a layout group")
    );
    assert!(
        LayoutError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LayoutError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_become_serde_errors() {
    let err: LayoutError = serde_json::from_str::<u32>("not json").unwrap_err().into();
    assert!(matches!(err, LayoutError::Serde(_)));
}
