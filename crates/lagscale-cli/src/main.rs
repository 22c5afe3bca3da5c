use clap::{Parser, Subcommand};

mod commands;
mod trigger;

#[derive(Parser)]
#[command(
    name = "lagscale",
    about = "lagscale — metric-source adapters for event-driven autoscaling",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a scaler from a trigger file and poll it once against a
    /// fixture snapshot.
    Check {
        /// Trigger definition (TOML)
        #[arg(short, long)]
        trigger: String,
        /// Upstream snapshot (JSON); empty snapshot if omitted
        #[arg(short, long)]
        fixture: Option<String>,
        /// Poll deadline in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
    /// Print the external metric a trigger would register.
    Spec {
        /// Trigger definition (TOML)
        #[arg(short, long)]
        trigger: String,
    },
    /// Run the lag calculator on one synthetic partition.
    ///
    /// Useful for checking wraparound arithmetic by hand: pass a
    /// checkpoint sequence ahead of --last and watch the clamp.
    Lag {
        /// Beginning sequence number of the retained window
        #[arg(long)]
        beginning: i64,
        /// Last enqueued sequence number
        #[arg(long)]
        last: i64,
        /// Last enqueued offset ("-1" marks a never-written partition)
        #[arg(long, default_value = "0")]
        offset: String,
        /// Checkpoint sequence number; no checkpoint if omitted
        #[arg(long)]
        checkpoint_seq: Option<i64>,
        /// Checkpoint offset; empty marks an uncommitted record
        #[arg(long)]
        checkpoint_offset: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lagscale=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            trigger,
            fixture,
            timeout_secs,
        } => commands::check::check(&trigger, fixture.as_deref(), timeout_secs).await,
        Commands::Spec { trigger } => commands::spec::spec(&trigger),
        Commands::Lag {
            beginning,
            last,
            offset,
            checkpoint_seq,
            checkpoint_offset,
        } => commands::lag::lag(beginning, last, &offset, checkpoint_seq, checkpoint_offset),
    }
}
