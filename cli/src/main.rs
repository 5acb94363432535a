//! CLI entrypoint for group-poll
//!
//! This is the main binary that wires together all layers using
//! dependency injection: an in-process group bus, simulated participants
//! backed by in-memory knowledge bases, and one poll decided by the
//! configured strategy.

use anyhow::{Context, Result, bail};
use clap::Parser;
use poll_application::{
    BeliefResponder, BeliefSocialisation, CompositeExperimentLogger, Contest, ExperimentLogger,
    GroupListener, GroupPort,
};
use poll_domain::{ExperimentOutcome, OutputFormat, ParticipantId, PollRule, Scope};
use poll_infrastructure::{
    AccessPolicy, ConfigLoader, FileConfig, FileParticipantConfig, InMemoryKnowledgeBase,
    InProcessGroupBus, JsonlExperimentLogger, TokioTimeoutScheduler,
};
use poll_presentation::{
    Audience, Cli, ConsoleEventReporter, ConsoleFormatter, OutputFormatter, PollReport,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, prelude::*};

const LOG_FILE: &str = "group-poll.log";

/// How long to wait for a contest announcement after the outcome arrives
const ANNOUNCEMENT_GRACE: Duration = Duration::from_millis(500);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        for line in ConfigLoader::describe_sources() {
            println!("{}", line);
        }
        return Ok(());
    }

    // Load configuration, then let the command line override it
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    apply_overrides(&mut config, &cli);

    let _guard = init_logging(cli.verbose, config.logging.dir.as_deref())?;
    info!("Starting group-poll");

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            error!("{}", issue);
        }
        bail!("Invalid configuration ({} issue(s))", issues.len());
    }

    let Some(proposition) = cli.to_proposition() else {
        bail!("A proposition is required. Use --help for usage.");
    };
    let proposition = proposition?;

    let params = config.poll.to_poll_params()?;
    let group = config.group.group_id()?;
    let credential = config.group.credential()?;
    let format = config.output.format.unwrap_or_default();
    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let runtime = Handle::current();
    let bus = Arc::new(InProcessGroupBus::new(runtime.clone()));
    let scheduler = Arc::new(TokioTimeoutScheduler::new(runtime));
    let port: Arc<dyn GroupPort> = bus.clone();

    let policy = if config.group.restricted {
        AccessPolicy::restricted(credential.clone())
    } else {
        AccessPolicy::Open
    };
    bus.create_group(group.clone(), policy);

    let mut names: HashMap<ParticipantId, String> = HashMap::new();
    let mut responders = Vec::with_capacity(config.participants.len());
    for participant in &config.participants {
        let knowledge = Arc::new(InMemoryKnowledgeBase::with_facts(participant.facts.iter()));
        let socialisation =
            BeliefSocialisation::new(ParticipantId::random(), port.clone(), scheduler.clone());
        let responder = BeliefResponder::new(socialisation, knowledge)
            .join(&group, credential.as_ref())
            .with_context(|| format!("Participant '{}' could not join", participant.name))?;
        names.insert(responder.id(), participant.name.clone());
        responders.push(responder);
    }
    if responders.is_empty() {
        warn!("No participants configured; the poll can only time out");
    }

    let (audience, mut announcements) = Audience::new();
    port.register(&group, Arc::new(audience), credential.as_ref())?;

    let mut logger = CompositeExperimentLogger::default();
    if let Some(path) = config.logging.experiment_log_path() {
        match JsonlExperimentLogger::open(&path) {
            Ok(jsonl) => {
                info!(path = %jsonl.path().display(), "Writing experiment log");
                logger.push(Arc::new(jsonl));
            }
            Err(e) => warn!("Could not open experiment log {}: {}", path.display(), e),
        }
    }
    if !cli.quiet && format != OutputFormat::Json {
        logger.push(Arc::new(ConsoleEventReporter::new(names.clone())));
    }
    let logger: Arc<dyn ExperimentLogger> = Arc::new(logger);

    let mut poller =
        BeliefSocialisation::new(ParticipantId::random(), port.clone(), scheduler.clone())
            .with_logger(logger);
    if let Some(credential) = &credential {
        poller = poller.with_credential(credential.clone());
    }

    let (tx, mut rx) = oneshot::channel::<ExperimentOutcome>();
    let mut builder = params.configure(
        poller
            .poll(group.clone(), Scope::All)
            .proposition(proposition.clone()),
    );
    if let PollRule::Contest { winners } = params.rule
        && !cli.prize.is_empty()
    {
        builder = builder.evaluator(Contest::any(winners).with_prize(cli.prize.clone()));
    }
    let experiment = builder
        .on_outcome(move |outcome| {
            let _ = tx.send(outcome.clone());
        })
        .execute()?;

    let outcome = tokio::select! {
        outcome = &mut rx => outcome,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; cancelling poll");
            experiment.cancel();
            rx.await
        }
    }
    .context("Poll ended without an outcome")?;

    let mut report = PollReport::new(&proposition, &group, params.rule, &outcome, &names);
    if matches!(params.rule, PollRule::Contest { .. })
        && let Ok(Some(announcement)) =
            tokio::time::timeout(ANNOUNCEMENT_GRACE, announcements.recv()).await
    {
        report = report.with_announcement(&announcement, &names);
    }

    print!("{}", ConsoleFormatter.render(&report, format));
    if format == OutputFormat::Json {
        println!();
    }

    for responder in &responders {
        responder.leave(&group);
    }
    scheduler.shutdown();

    Ok(())
}

/// Command-line flags take precedence over every configuration source
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(group) = &cli.group {
        config.group.name = group.clone();
    }
    if let Some(credential) = &cli.credential {
        config.group.credential = Some(credential.clone());
    }
    if !cli.participant.is_empty() {
        config.participants = cli
            .participant
            .iter()
            .map(|p| FileParticipantConfig::new(p.name.clone(), p.facts.iter().cloned()))
            .collect();
    }
    if let Some(format) = cli.output {
        config.output.format = Some(format.into());
    }
    if cli.no_color {
        config.output.color = false;
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.dir = Some(dir.clone());
    }
    if let Some(rule) = cli.rule {
        config.poll.rule = rule.key();
    }
    if cli.unbounded {
        config.poll.unbounded = true;
    } else if let Some(ms) = cli.timeout_ms {
        config.poll.timeout_ms = ms;
        config.poll.unbounded = false;
    }
    if cli.conclude_when_exhausted {
        config.poll.conclude_when_exhausted = true;
    }
}

/// Stderr logging by verbosity, plus a plain-text log file when `dir` is set
fn init_logging(verbose: u8, dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    let (file_layer, guard) = match dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
