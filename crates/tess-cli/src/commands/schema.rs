use schemars::schema_for;
use tess_core::report::AggregationReport;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `tess schema`. Always JSON; `--format raw` prints it on one line.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_for!(AggregationReport);
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Json | OutputFormat::Table => OutputFormat::Json,
    };
    output(&schema, format)
}

#[cfg(test)]
mod tests {
    use schemars::schema_for;
    use tess_core::report::AggregationReport;

    #[test]
    fn report_schema_names_top_level_fields() {
        let schema = serde_json::to_value(schema_for!(AggregationReport)).expect("schema serializes");
        let properties = schema["properties"]
            .as_object()
            .expect("report schema has properties");

        for field in ["tenant_key", "principal", "run_date", "per_kind", "integrity"] {
            assert!(properties.contains_key(field), "missing {field}");
        }
    }
}
