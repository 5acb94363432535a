//! CLI command definitions

use clap::{Parser, ValueEnum};
use poll_domain::{DomainError, PollRule, Proposition, Term};
use serde_json::Value;
use std::path::PathBuf;
use std::str::FromStr;

/// Output format for poll results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report with every respondent
    Text,
    /// Result and tally on one line
    Brief,
    /// JSON output
    Json,
}

impl From<OutputFormat> for poll_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => poll_domain::OutputFormat::Text,
            OutputFormat::Brief => poll_domain::OutputFormat::Brief,
            OutputFormat::Json => poll_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for group-poll
#[derive(Parser, Debug)]
#[command(name = "group-poll")]
#[command(author, version, about = "Group polling - ask a group whether it believes a proposition")]
#[command(long_about = r#"
group-poll puts a proposition to the members of a group and decides the
outcome with one of the prebuilt strategies:

  all         every participant must believe it (default)
  any         at least one participant must believe it
  none        no participant may believe it
  contest:N   collect believers, then name up to N winners

Participants are simulated locally. Each one believes a fixed set of facts
and answers "yes" to a proposition exactly when it is one of them.

Configuration files are loaded from (in priority order):
1. POLL_* environment variables
2. --config <path>      Explicit config file
3. ./poll.toml          Project-level config
4. ~/.config/group-poll/config.toml   Global config

Example:
  group-poll -p alice=raining -p bob=raining raining
  group-poll -r any -p "alice=likes(tea)" -p bob "likes({})" tea
  group-poll -r contest:1 --prize '"gold"' -p alice=fast -p bob=fast fast
"#)]
pub struct Cli {
    /// Statement to poll; `{}` placeholders are filled from ARGS in order
    pub proposition: Option<String>,

    /// Positional arguments substituted into the statement
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Strategy that decides the poll (all, any, none, contest, contest:N)
    #[arg(short, long, value_name = "RULE")]
    pub rule: Option<PollRule>,

    /// Conclude negatively after this many milliseconds
    #[arg(short, long, value_name = "MS", conflicts_with = "unbounded")]
    pub timeout_ms: Option<u64>,

    /// Wait for a decision without any timeout
    #[arg(long)]
    pub unbounded: bool,

    /// With `any`: conclude negatively once every participant has said no
    #[arg(long)]
    pub conclude_when_exhausted: bool,

    /// Group to poll
    #[arg(short, long, value_name = "NAME")]
    pub group: Option<String>,

    /// Credential for a restricted group
    #[arg(long, value_name = "SECRET")]
    pub credential: Option<String>,

    /// Local participant as `name=fact1;fact2` (can be specified multiple times)
    #[arg(short, long, value_name = "SPEC")]
    pub participant: Vec<ParticipantSpec>,

    /// Prize item for a contest, as JSON (can be specified multiple times)
    #[arg(long, value_name = "JSON", value_parser = parse_prize)]
    pub prize: Vec<Value>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress live poll events
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory for log files (overrides `[logging] dir`)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Positional arguments as terms
    pub fn terms(&self) -> Vec<Term> {
        self.args.iter().map(|a| parse_term(a)).collect()
    }

    /// The proposition to poll, if one was given
    pub fn to_proposition(&self) -> Option<Result<Proposition, DomainError>> {
        let statement = self.proposition.as_deref()?;
        Some(if self.args.is_empty() {
            Proposition::new(statement)
        } else {
            Proposition::format(statement, self.terms())
        })
    }
}

/// A participant given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantSpec {
    pub name: String,
    pub facts: Vec<String>,
}

impl FromStr for ParticipantSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, facts) = match s.split_once('=') {
            Some((name, facts)) => (name.trim(), facts),
            None => (s.trim(), ""),
        };
        if name.is_empty() {
            return Err(format!("Participant '{}' has an empty name", s));
        }
        Ok(Self {
            name: name.to_string(),
            facts: facts
                .split(';')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from)
                .collect(),
        })
    }
}

/// Interpret a command-line argument as a term
///
/// Integers and booleans are recognised, double-quoted text becomes a
/// string literal and anything else is an atom.
pub fn parse_term(arg: &str) -> Term {
    if let Ok(n) = arg.parse::<i64>() {
        return Term::Integer(n);
    }
    match arg {
        "true" => Term::Bool(true),
        "false" => Term::Bool(false),
        quoted if quoted.len() >= 2 && quoted.starts_with('"') && quoted.ends_with('"') => {
            Term::text(&quoted[1..quoted.len() - 1])
        }
        atom => Term::atom(atom),
    }
}

/// Prize items are JSON; anything that does not parse is kept as a string
fn parse_prize(s: &str) -> Result<Value, String> {
    Ok(serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_string())))
}
