use clap::Parser;
use std::path::PathBuf;
use url::Url;


#[derive(Parser, Debug)]
#[command(version, about = "Generates the module/function lookup migration of a Substrate runtime", long_about = None)]
pub struct Cli {
    /// Node to fetch the runtime metadata from
    #[arg(long, value_name = "URL", default_value = "wss://gdev.coinduf.eu")]
    pub rpc_url: Url,

    /// Block hash to fetch the metadata at, defaults to the best block
    #[arg(long, value_name = "HASH", conflicts_with = "metadata_file")]
    pub at: Option<String>,

    /// Read a pre-fetched metadata snapshot instead of querying the node
    /// (`.json` descriptor dump, or SCALE bytes as binary or 0x-hex)
    #[arg(long, value_name = "FILE")]
    pub metadata_file: Option<PathBuf>,

    /// Where to write the generated SQL
    #[arg(short, long, value_name = "FILE", default_value = "V2__populate_modules_and_functions.sql")]
    pub output: PathBuf,

    /// Also write the decoded metadata as JSON, usable later with --metadata-file
    #[arg(long, value_name = "FILE")]
    pub dump_metadata: Option<PathBuf>,

    /// Whether the logs should be structured in JSON format
    #[arg(long)]
    pub json_log: bool,
}
