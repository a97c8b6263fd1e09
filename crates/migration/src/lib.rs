pub mod cli;
mod sink;
mod source;


pub use sink::write_atomically;
pub use source::*;

use cli::Cli;
use juniscan_schema::normalize;
use tracing::info;


pub async fn run(args: &Cli) -> anyhow::Result<()> {
    let metadata = load_metadata(args).await?;

    info!(
        modules = metadata.modules.len(),
        functions = metadata.num_calls(),
        types = metadata.types.len(),
        "loaded runtime metadata"
    );

    if let Some(path) = &args.dump_metadata {
        write_atomically(path, metadata.to_json()?.as_bytes())?;
        info!(path = %path.display(), "metadata dumped");
    }

    let schema = normalize(&metadata)?;

    info!(
        modules = schema.modules.len(),
        functions = schema.functions.len(),
        parameters = schema.parameters.len(),
        "generated tables"
    );

    write_atomically(&args.output, schema.to_sql().as_bytes())?;
    info!(path = %args.output.display(), "SQL file generated");
    Ok(())
}
