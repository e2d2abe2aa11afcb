use attest_check::SearchScope;
use clap::{Args, Subcommand, ValueEnum};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch /admin/instances and validate every record
    Instances(InstancesArgs),
    /// Check processed-item counts per connector
    Connectors(ConnectorsArgs),
    /// Send a chat message and optionally check which sources it used
    Chat(ChatArgs),
}

#[derive(Debug, Args)]
pub struct InstancesArgs {
    /// Validate the raw body without coercing numeric strings or 0/1 booleans
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct ConnectorsArgs {
    /// Expected count as CONNECTOR_ID=COUNT (repeatable); defaults to config
    #[arg(long = "expect", value_name = "ID=COUNT", value_parser = parse_expectation)]
    pub expect: Vec<(String, i64)>,
}

#[derive(Debug, Args)]
pub struct ChatArgs {
    /// Message to send
    #[arg(long)]
    pub query: String,

    /// Model name (defaults to chat.model from config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Continue an existing session
    #[arg(long)]
    pub session_id: Option<i64>,

    /// Do not request answerLog (retrieval chunks will be absent)
    #[arg(long)]
    pub no_answer_log: bool,

    /// Require the answer to use this data source
    #[arg(long)]
    pub source: Option<String>,

    /// External id that must appear among the source's items (repeatable)
    #[arg(long = "external-id", value_name = "ID", requires = "source")]
    pub external_ids: Vec<String>,

    /// Require every --external-id instead of at least one
    #[arg(long, requires = "source")]
    pub match_all: bool,

    /// Where to look for the source
    #[arg(long, value_enum, default_value = "both")]
    pub scope: ScopeArg,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ScopeArg {
    Citations,
    Chunks,
    Both,
}

impl From<ScopeArg> for SearchScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Citations => Self::Citations,
            ScopeArg::Chunks => Self::Chunks,
            ScopeArg::Both => Self::Both,
        }
    }
}

fn parse_expectation(raw: &str) -> Result<(String, i64), String> {
    let (connector_id, count) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=COUNT, got '{raw}'"))?;
    let connector_id = connector_id.trim();
    if connector_id.is_empty() {
        return Err(format!("connector id is empty in '{raw}'"));
    }
    let count = count
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid count in '{raw}': {e}"))?;
    Ok((connector_id.to_string(), count))
}
