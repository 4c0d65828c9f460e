use vigil_config::json_schema;

#[test]
fn schema_describes_inspection_toggles() {
    let schema = json_schema();
    let json = serde_json::to_value(&schema).unwrap();

    assert_eq!(json["title"], "vigil.toml");
    let properties = &json["properties"];
    assert!(properties.get("logging").is_some());
    assert!(properties.get("analysis").is_some());
    assert!(properties.get("inspections").is_some());

    let text = serde_json::to_string(&schema).unwrap();
    assert!(text.contains("redundant_method_override"));
    assert!(text.contains("usage_search_timeout_ms"));
}
