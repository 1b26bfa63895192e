//! TrialSense CLI
//!
//! Usage:
//!   trialsense --text "Isn't it true..." --role attorney --phase direct
//!   trialsense --interactive                 # live session (A:/W:/J: prefixes)
//!   trialsense --file session.json           # batch a recorded session
//!   trialsense --text "..." --json           # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};

use trialsense::core::Pipeline;
use trialsense::types::{
    ActionPriority, CredibilitySignal, Finding, MomentumTrend, PriorStatement, SpeakerRole,
    StrategyConfig, TestimonyEvent, TrialAction, TrialPhase, TrialState,
};
use trialsense::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "trialsense",
    version = VERSION,
    about = "TrialSense - real-time trial testimony analysis",
    long_about = "TrialSense folds testimony events into a running trial state,\n\
                  detects contradictions and objectionable questions, and derives\n\
                  prioritized tactical suggestions.\n\n\
                  Modes:\n  \
                  --interactive  Live session; prefix lines with A:, W: or J:\n  \
                  --file         Batch-process a recorded session JSON\n\n\
                  Interactive markers (after the prefix):\n  \
                  +   helpful testimony     -   harmful testimony\n  \
                  /phase cross              switch phase"
)]
struct Args {
    /// Text of a single event to evaluate
    #[arg(short, long)]
    text: Option<String>,

    /// Speaker role for --text (attorney|witness|judge)
    #[arg(long, default_value = "witness")]
    role: String,

    /// Phase for --text and the interactive starting phase
    #[arg(long, default_value = "direct")]
    phase: String,

    /// Speaker name for --text
    #[arg(long, default_value = "Witness")]
    speaker: String,

    /// Interactive session mode - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Batch mode - process a session file
    #[arg(short, long)]
    file: Option<String>,

    /// Findings file (JSON array) for contradiction detection
    #[arg(long)]
    findings: Option<String>,

    /// Prior statements file (JSON array)
    #[arg(long)]
    priors: Option<String>,

    /// Session identifier
    #[arg(long, default_value = "session-1")]
    session: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show score breakdown after each event
    #[arg(long)]
    verbose: bool,
}

/// Batch session file shape
#[derive(serde::Deserialize)]
struct SessionFile {
    #[serde(default)]
    events: Vec<TestimonyEvent>,
    #[serde(default)]
    findings: Vec<Finding>,
    #[serde(default)]
    prior_statements: Vec<PriorStatement>,
}

fn main() {
    let args = Args::parse();

    let result = if let Some(ref path) = args.file {
        run_batch(path, &args)
    } else if args.interactive {
        run_interactive(&args)
    } else if args.text.is_some() {
        run_single(&args)
    } else {
        run_interactive(&args)
    };

    if let Err(e) = result {
        eprintln!("trialsense: {}", e);
        std::process::exit(1);
    }
}

/// Evaluate one event and exit
fn run_single(args: &Args) -> Result<(), String> {
    let text = args.text.as_deref().unwrap_or_default();
    let event = TestimonyEvent::new(
        parse_phase(&args.phase)?,
        parse_role(&args.role)?,
        args.speaker.clone(),
        text,
    );

    let pipeline = Pipeline::new();
    let state = TrialState::new(&args.session);
    let findings = load_findings(args)?;
    let priors = load_priors(args)?;
    let result = pipeline.process(&state, &event, &findings, &priors, &StrategyConfig::default());

    if args.json {
        let json = serde_json::to_string_pretty(&result.state)
            .map_err(|e| format!("serialize failed: {}", e))?;
        println!("{}", json);
    } else {
        print_event_result(&result.state, &result.actions, &result.diff.summary, args);
    }
    Ok(())
}

/// Live session: one line per utterance
fn run_interactive(args: &Args) -> Result<(), String> {
    let pipeline = Pipeline::new();
    let findings = load_findings(args)?;
    let priors = load_priors(args)?;
    let config = StrategyConfig::default();

    let mut state = TrialState::new(&args.session);
    let mut phase = parse_phase(&args.phase)?;

    print_header(args);
    println!("Prefix lines with A: (attorney), W: (witness) or J: (judge).");
    println!("Add + or - after the prefix for helpful/harmful testimony.");
    println!("Commands: /phase <name>, quit");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", format_prompt(&state, phase, args.no_color));
        stdout.flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Events: {}", state.events_processed);
            break;
        }
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("/phase ") {
            phase = parse_phase(rest.trim())?;
            println!("phase set to {}", phase);
            continue;
        }

        let Some((role, signal, text)) = parse_line(line) else {
            println!("  ? prefix with A:, W: or J: (e.g., 'W:- I never got it')");
            continue;
        };

        let speaker = match role {
            SpeakerRole::Attorney => "Counsel".to_string(),
            SpeakerRole::Witness => state
                .current_witness
                .clone()
                .unwrap_or_else(|| "Witness".to_string()),
            SpeakerRole::Judge => "The Court".to_string(),
        };
        let mut event = TestimonyEvent::new(phase, role, speaker, text);
        event.credibility = signal;

        let result = pipeline.process(&state, &event, &findings, &priors, &config);
        state = result.state.clone();

        if args.json {
            let json = serde_json::to_string(&result.diff)
                .map_err(|e| format!("serialize failed: {}", e))?;
            println!("{}", json);
        } else {
            print_event_result(&state, &result.actions, &result.diff.summary, args);
        }
    }
    Ok(())
}

/// Batch-process a recorded session
fn run_batch(path: &str, args: &Args) -> Result<(), String> {
    let raw = std::fs::read_to_string(path).map_err(|e| format!("read {}: {}", path, e))?;
    let session: SessionFile =
        serde_json::from_str(&raw).map_err(|e| format!("parse {}: {}", path, e))?;

    let pipeline = Pipeline::new();
    let config = StrategyConfig::default();
    let state = TrialState::new(&args.session);

    let (final_state, results) = pipeline.process_batch(
        state,
        &session.events,
        &session.findings,
        &session.prior_statements,
        &config,
    );

    if args.json {
        let json = serde_json::to_string_pretty(&final_state)
            .map_err(|e| format!("serialize failed: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    print_header(args);
    for (i, result) in results.iter().enumerate() {
        if !result.diff.is_empty() || !result.actions.is_empty() {
            println!("event {}: {}", i + 1, result.diff.summary);
            for action in &result.actions {
                print_action(action, args.no_color);
            }
        }
    }
    println!();
    print_event_result(&final_state, &[], "session complete", args);
    Ok(())
}

fn parse_line(line: &str) -> Option<(SpeakerRole, Option<CredibilitySignal>, &str)> {
    let (prefix, rest) = line.split_once(':')?;
    let prefix = prefix.trim();
    let role = match prefix.to_uppercase().as_str() {
        "A" => SpeakerRole::Attorney,
        "W" => SpeakerRole::Witness,
        "J" => SpeakerRole::Judge,
        _ => return None,
    };

    let rest = rest.trim_start();
    let (signal, text) = match rest.as_bytes().first() {
        Some(b'+') => (Some(CredibilitySignal::Helpful), rest[1..].trim_start()),
        Some(b'-') => (Some(CredibilitySignal::Harmful), rest[1..].trim_start()),
        _ => (None, rest),
    };
    Some((role, signal, text))
}

fn parse_phase(s: &str) -> Result<TrialPhase, String> {
    match s.to_lowercase().as_str() {
        "opening" => Ok(TrialPhase::Opening),
        "direct" => Ok(TrialPhase::Direct),
        "cross" => Ok(TrialPhase::Cross),
        "redirect" => Ok(TrialPhase::Redirect),
        "closing" => Ok(TrialPhase::Closing),
        other => Err(format!("unknown phase '{}'", other)),
    }
}

fn parse_role(s: &str) -> Result<SpeakerRole, String> {
    match s.to_lowercase().as_str() {
        "attorney" => Ok(SpeakerRole::Attorney),
        "witness" => Ok(SpeakerRole::Witness),
        "judge" => Ok(SpeakerRole::Judge),
        other => Err(format!("unknown role '{}'", other)),
    }
}

fn load_findings(args: &Args) -> Result<Vec<Finding>, String> {
    match &args.findings {
        Some(path) => {
            let raw =
                std::fs::read_to_string(path).map_err(|e| format!("read {}: {}", path, e))?;
            serde_json::from_str(&raw).map_err(|e| format!("parse {}: {}", path, e))
        }
        None => Ok(Vec::new()),
    }
}

fn load_priors(args: &Args) -> Result<Vec<PriorStatement>, String> {
    match &args.priors {
        Some(path) => {
            let raw =
                std::fs::read_to_string(path).map_err(|e| format!("read {}: {}", path, e))?;
            serde_json::from_str(&raw).map_err(|e| format!("parse {}: {}", path, e))
        }
        None => Ok(Vec::new()),
    }
}

fn print_header(args: &Args) {
    if args.no_color {
        println!("========================================");
        println!("  TrialSense v{}", VERSION);
        println!("========================================");
    } else {
        println!("{}", "========================================".bold());
        println!("{}", format!("  TrialSense v{}", VERSION).bold());
        println!("{}", "========================================".bold());
    }
    println!();
}

fn format_prompt(state: &TrialState, phase: TrialPhase, no_color: bool) -> String {
    let trend = state.momentum_trend;
    if no_color {
        format!(
            "[{} | momentum={} {}] > ",
            phase,
            state.momentum_score,
            trend.arrow()
        )
    } else {
        format!(
            "{}[{} | momentum={} {}]{} > ",
            trend.color_code(),
            phase,
            state.momentum_score,
            trend.arrow(),
            MomentumTrend::color_reset()
        )
    }
}

fn print_event_result(state: &TrialState, actions: &[TrialAction], summary: &str, args: &Args) {
    let trend = state.momentum_trend;
    if args.no_color {
        println!(
            "momentum={} {} | phase={} | events={} | {}",
            state.momentum_score,
            trend,
            state.current_phase,
            state.events_processed,
            summary
        );
    } else {
        println!(
            "{}momentum={} {} | phase={} | events={}{} | {}",
            trend.color_code(),
            state.momentum_score,
            trend.arrow(),
            state.current_phase,
            state.events_processed,
            MomentumTrend::color_reset(),
            summary
        );
    }

    for action in actions {
        print_action(action, args.no_color);
    }

    if args.verbose {
        for score in state.scores.values() {
            println!(
                "  {} = {:.1} ({:.0}% confidence) - {}",
                score.name,
                score.value,
                score.confidence * 100.0,
                score.interpretation
            );
        }
    }
}

fn print_action(action: &TrialAction, no_color: bool) {
    if no_color {
        println!(
            "  [{}] {} → {} | {}",
            action.priority, action.kind, action.target, action.suggested_phrasing
        );
    } else {
        println!(
            "  {}[{}] {} → {}{} | {}",
            action.priority.color_code(),
            action.priority,
            action.kind,
            action.target,
            ActionPriority::color_reset(),
            action.suggested_phrasing
        );
    }
}
