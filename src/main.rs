use aircon_vm::demos::{DEMOS, Demo, DemoError};
use aircon_vm::{AirConditionerVm, VmEvent, config, logging};
use clap::Parser;
use log::{error, info};
use std::fs;
use std::process::ExitCode;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about = "Run air-conditioner control programs against a simulated room", long_about = None)]
struct Args {
    /// Assembly program to run. Runs the built-in demos when omitted.
    program: Option<String>,

    /// Maximum number of steps before the run is aborted.
    #[arg(long, default_value_t = config::DEFAULT_MAX_STEPS)]
    max_steps: u64,

    /// Sensor override applied before the program starts (e.g. TEMP=28). Repeatable.
    #[arg(long = "sensor", value_name = "NAME=VALUE", value_parser = parse_sensor_override)]
    sensors: Vec<(String, i64)>,

    /// Run a single built-in demo by name.
    #[arg(long, conflicts_with = "program")]
    demo: Option<String>,

    /// List the built-in demos and exit.
    #[arg(long)]
    list_demos: bool,

    /// Debug filter to specify log topics (e.g., "vm,env,instructions")
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_sensor_override(s: &str) -> Result<(String, i64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid value for {}: {}", name, e))?;
    Ok((name.trim().to_string(), value))
}

/// Print whatever the program queued: PRINT snapshots and the halt banner
fn present_events(vm: &mut AirConditionerVm) {
    for event in vm.drain_events() {
        match event {
            VmEvent::Print(snapshot) => println!("{}", snapshot),
            VmEvent::Halted { .. } => println!("*** Air Conditioner Program Halted ***"),
        }
    }
}

fn run_file(args: &Args, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(path)?;
    let mut vm = AirConditionerVm::new();
    for (name, value) in &args.sensors {
        vm.set_sensor(name, *value)?;
    }
    vm.load(&source)?;
    info!("Loaded program from: {}", path);

    let result = vm.run(Some(args.max_steps));
    present_events(&mut vm);
    result?;

    let snapshot = vm.snapshot();
    println!("\n=== Final State ===");
    println!("Steps executed: {}", snapshot.steps);
    println!("Ticks elapsed: {}", snapshot.ticks);
    Ok(())
}

fn run_demos(demos: &[&Demo], max_steps: u64) -> Result<(), DemoError> {
    let mut vm = AirConditionerVm::new();
    for (i, demo) in demos.iter().enumerate() {
        println!("\n=== Demo {}: {} ===\n", i + 1, demo.title);
        let result = demo.run(&mut vm, Some(max_steps));
        present_events(&mut vm);
        result?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = logging::parse_level(&args.log_level);
    if let Err(e) = logging::init_logger(level, args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    if args.list_demos {
        for demo in DEMOS.iter() {
            println!("{:<12} {}", demo.name, demo.title);
        }
        return ExitCode::SUCCESS;
    }

    let outcome: Result<(), Box<dyn std::error::Error>> = match (&args.program, &args.demo) {
        (Some(path), _) => run_file(&args, path),
        (None, Some(name)) => Demo::find(name)
            .and_then(|demo| run_demos(&[demo], args.max_steps))
            .map_err(Into::into),
        (None, None) => run_demos(&DEMOS.iter().collect::<Vec<_>>(), args.max_steps)
            .map_err(Into::into),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
