use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

/// Inspect table URL state: run rows through it or turn it into a backend query.
#[derive(Parser)]
#[command(name = "runway-table", version)]
pub struct Args {
    /// Table configuration (JSON). Defaults apply when omitted.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// URL key prefix; overrides the configuration file.
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Log debug output to stderr (repeat for trace output).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter, sort and paginate rows as the table would, printing CSV.
    View {
        /// Rows as a JSON array of objects with an `id` field.
        #[arg(long, value_name = "PATH")]
        data: PathBuf,

        /// Column definitions as a JSON array.
        #[arg(long, value_name = "PATH")]
        columns: PathBuf,

        /// URL query string holding the table state.
        #[arg(long, default_value = "")]
        query: String,

        /// Print every matching row instead of the current page.
        #[arg(long)]
        all: bool,
    },

    /// Print the backend request for the table state in a URL query string.
    BackendQuery {
        /// URL query string holding the table state.
        #[arg(long, default_value = "")]
        query: String,

        /// Endpoint path to prefix the query with.
        #[arg(long)]
        path: Option<String>,
    },

    /// Print the state a URL query string describes, as JSON.
    Inspect {
        /// URL query string holding the table state.
        query: String,
    },

    /// Encode column filters (JSON array of `{id, value}`) as a `colfilter` value.
    EncodeFilters {
        /// Filters as JSON.
        filters: String,
    },

    /// Decode a `colfilter` value to JSON.
    DecodeFilters {
        /// Encoded value, as found in the URL.
        value: String,
    },
}
