use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "td-cli")]
#[command(about = "Tango dialog script player")]
pub(crate) struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub(crate) verbose: u8,
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    /// Interactive conversation on stdin/stdout.
    Chat(ChatArgs),
    /// Run the given turns in order and print one reply per turn.
    Ask(AskArgs),
    /// Print the command tree and variables of a script.
    Describe(DescribeArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ScriptArgs {
    /// Script file, or a directory holding dialog.txt.
    #[arg(long = "script", default_value = "dialog.txt")]
    pub(crate) script: String,
    #[arg(long = "seed")]
    pub(crate) seed: Option<u64>,
}

#[derive(Debug, Args)]
pub(crate) struct ChatArgs {
    #[command(flatten)]
    pub(crate) source: ScriptArgs,
    /// Lowercase every line before matching.
    #[arg(long = "lowercase")]
    pub(crate) lowercase: bool,
}

#[derive(Debug, Args)]
pub(crate) struct AskArgs {
    #[command(flatten)]
    pub(crate) source: ScriptArgs,
    #[arg(long = "lowercase")]
    pub(crate) lowercase: bool,
    #[arg(long = "text", required = true)]
    pub(crate) texts: Vec<String>,
}

#[derive(Debug, Args)]
pub(crate) struct DescribeArgs {
    #[command(flatten)]
    pub(crate) source: ScriptArgs,
    #[arg(long = "json")]
    pub(crate) json: bool,
}
