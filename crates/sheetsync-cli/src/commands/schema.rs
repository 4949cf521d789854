use sheetsync_schema::{SchemaError, SchemaRegistry};

use crate::cli::{GlobalFlags, SchemaArgs};
use crate::output::output;

/// Handle `sheetsync schema [<name>]`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    match &args.name {
        Some(name) => {
            let schema = registry
                .get(name)
                .ok_or_else(|| SchemaError::NotFound(name.clone()))?;
            output(schema, flags.format)
        }
        None => output(&registry.list(), flags.format),
    }
}
