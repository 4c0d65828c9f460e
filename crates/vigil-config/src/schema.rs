use schemars::schema::RootSchema;

use crate::VigilConfig;

/// JSON schema for `vigil.toml`, for editor completion and validation.
pub fn json_schema() -> RootSchema {
    let mut schema = schemars::schema_for!(VigilConfig);
    if let Some(metadata) = schema.schema.metadata.as_mut() {
        metadata.title = Some("vigil.toml".to_owned());
    }
    schema
}
