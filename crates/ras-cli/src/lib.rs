//! RAS Edit command line
//!
//! Argument parsing and subcommand dispatch for the `ras-edit` binary.
//! Commands write their results to a caller-supplied writer; logging goes
//! through `tracing`.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod logging;

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use ras_edit::{
    check_peak, project_dir, same_directory, scan_plans, scan_titles, set_current_plan,
    ConfigEditor, DirectoryScanner, EditorConfig, PatchSet, Replacement, ScenarioRunner,
    ScenarioTemplate,
};
use ras_model::{keys, FileRole, Hydrograph, RasExtension};
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Build the command tree
#[must_use]
pub fn cli() -> Command {
    Command::new("ras-edit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate hydrographs and derive HEC-RAS plan/flow files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Editor configuration (TOML)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit log events as JSON"),
        )
        .subcommand(
            Command::new("hydrograph")
                .about("Print a ramp-to-peak hydrograph block")
                .arg(peak_arg().action(ArgAction::Set))
                .arg(
                    Arg::new("ramp")
                        .long("ramp")
                        .value_parser(value_parser!(usize))
                        .help("Ramp steps (default from configuration)"),
                )
                .arg(
                    Arg::new("steady")
                        .long("steady")
                        .value_parser(value_parser!(usize))
                        .help("Steady steps (default from configuration)"),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Derive flow and plan files for each peak and register them")
                .arg(path_arg("project", "Project file (.prj)"))
                .arg(path_arg("flow-file", "Unsteady flow file to copy (.uNN)"))
                .arg(path_arg("plan-file", "Plan file to copy (.pNN)"))
                .arg(peak_arg())
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Title for the new files (derived from the old titles by default)"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("patch")
                .about("Write a patched copy of a plan or flow file")
                .arg(path_arg("file", "File to copy"))
                .arg(
                    Arg::new("set")
                        .long("set")
                        .required(true)
                        .action(ArgAction::Append)
                        .value_parser(parse_assignment)
                        .value_name("KEY=VALUE")
                        .help("Replace the value of every line carrying KEY"),
                )
                .arg(
                    Arg::new("role")
                        .long("role")
                        .value_parser(parse_role)
                        .help("Expected role: p, u, f or g (default: from the extension)"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("set-plan")
                .about("Make an existing plan the project's current plan")
                .arg(path_arg("project", "Project file (.prj)"))
                .arg(
                    Arg::new("plan")
                        .long("plan")
                        .required(true)
                        .value_parser(value_parser!(RasExtension))
                        .help("Plan extension, e.g. p03"),
                ),
        )
        .subcommand(
            Command::new("titles")
                .about("List the titles of plan, flow and geometry files")
                .arg(path_arg("dir", "Project directory"))
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("plans")
                .about("List plan files with their flow and geometry references")
                .arg(path_arg("dir", "Project directory"))
                .arg(json_arg()),
        )
}

fn path_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn peak_arg() -> Arg {
    Arg::new("peak")
        .long("peak")
        .required(true)
        .action(ArgAction::Append)
        .value_parser(value_parser!(f64))
        .help("Peak flow")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn parse_assignment(text: &str) -> Result<(String, String), String> {
    match text.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{text}'")),
    }
}

fn parse_role(text: &str) -> Result<FileRole, String> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(prefix), None) => FileRole::from_prefix(prefix).map_err(|e| e.to_string()),
        _ => Err(format!("expected one of p, u, f, g, got '{text}'")),
    }
}

/// Load the configuration named by `--config`, or the defaults
///
/// # Errors
/// Returns error if the file cannot be loaded
pub fn load_config(matches: &ArgMatches) -> Result<EditorConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => Ok(EditorConfig::default()),
    }
}

/// Run the selected subcommand
///
/// Returns `false` when the command completed but some of its items failed.
///
/// # Errors
/// Returns error if the command could not be carried out
pub fn execute(matches: &ArgMatches, out: &mut dyn Write) -> Result<bool> {
    let config = load_config(matches)?;

    match matches.subcommand() {
        Some(("hydrograph", args)) => hydrograph(&config, args, out).map(|()| true),
        Some(("generate", args)) => generate(config, args, out),
        Some(("patch", args)) => patch(config, args, out).map(|()| true),
        Some(("set-plan", args)) => set_plan(&config, args, out).map(|()| true),
        Some(("titles", args)) => titles(args, out).map(|()| true),
        Some(("plans", args)) => plans(args, out).map(|()| true),
        Some((other, _)) => bail!("unknown command '{other}'"),
        None => bail!("no command given"),
    }
}

fn required_path<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a Path> {
    args.get_one::<PathBuf>(name)
        .map(PathBuf::as_path)
        .with_context(|| format!("missing --{name}"))
}

fn hydrograph(config: &EditorConfig, args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let peak = check_peak(*args.get_one::<f64>("peak").context("missing --peak")?)?;
    let ramp = args
        .get_one::<usize>("ramp")
        .copied()
        .unwrap_or(config.hydrograph.ramp_steps);
    let steady = args
        .get_one::<usize>("steady")
        .copied()
        .unwrap_or(config.hydrograph.steady_steps);

    let hydrograph = Hydrograph::ramp_to_peak(peak, ramp, steady);
    writeln!(out, "{} {} ", keys::FLOW_HYDROGRAPH, hydrograph.len())?;
    for row in hydrograph.to_rows(config.hydrograph.values_per_row) {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

fn generate(config: EditorConfig, args: &ArgMatches, out: &mut dyn Write) -> Result<bool> {
    let project = required_path(args, "project")?;
    let flow_file = required_path(args, "flow-file")?;
    let plan_file = required_path(args, "plan-file")?;
    let peaks: Vec<f64> = args
        .get_many::<f64>("peak")
        .context("missing --peak")?
        .copied()
        .collect();

    let dir = project_dir(plan_file)?;
    for other in [flow_file, project] {
        if !same_directory(&project_dir(other)?, &dir) {
            bail!(
                "{} and {} must be in the same project directory",
                other.display(),
                plan_file.display()
            );
        }
    }
    let editor = ConfigEditor::for_directory(config, dir);

    let mut template = ScenarioTemplate::new(project, flow_file, plan_file);
    if let Some(title) = args.get_one::<String>("title") {
        template = template.with_title(title);
    }

    let items = ScenarioRunner::new(&editor, template).run_batch(&peaks);
    let failed = items.iter().filter(|item| item.result.is_err()).count();

    if args.get_flag("json") {
        let report: Vec<_> = items
            .iter()
            .map(|item| match &item.result {
                Ok(outcome) => json!({ "peak": item.peak, "ok": true, "outcome": outcome }),
                Err(e) => json!({ "peak": item.peak, "ok": false, "error": e.to_string() }),
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        for item in &items {
            match &item.result {
                Ok(outcome) => writeln!(
                    out,
                    "peak {}: flow {} -> {}, plan {} -> {}",
                    item.peak,
                    outcome.flow.extension,
                    outcome.flow.path.display(),
                    outcome.plan.extension,
                    outcome.plan.path.display()
                )?,
                Err(e) => writeln!(out, "peak {}: FAILED: {}", item.peak, e)?,
            }
        }
        writeln!(out, "{} scenario(s), {} failed", items.len(), failed)?;
    }

    Ok(failed == 0)
}

fn patch(config: EditorConfig, args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let file = required_path(args, "file")?;
    let role = match args.get_one::<FileRole>("role") {
        Some(role) => *role,
        None => RasExtension::from_path(file)
            .with_context(|| format!("Cannot tell the role of {}", file.display()))?
            .role(),
    };

    let mut patches = PatchSet::for_config(&config);
    for (key, value) in args
        .get_many::<(String, String)>("set")
        .context("missing --set")?
    {
        patches.insert(key, Replacement::Fixed(value.clone()));
    }

    let editor = ConfigEditor::for_directory(config, project_dir(file)?);
    let derived = editor
        .derive(file, role, &patches)
        .with_context(|| format!("Failed to patch {}", file.display()))?;

    if args.get_flag("json") {
        writeln!(out, "{}", serde_json::to_string_pretty(&derived)?)?;
    } else {
        writeln!(out, "{}", derived.path.display())?;
        for key in &derived.report.skipped {
            writeln!(out, "  skipped: '{key}' not found")?;
        }
    }
    Ok(())
}

fn set_plan(config: &EditorConfig, args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let project = required_path(args, "project")?;
    let plan = *args.get_one::<RasExtension>("plan").context("missing --plan")?;

    let scanner = DirectoryScanner::for_file(project)?;
    let written = set_current_plan(project, plan, &scanner, &config.numbering)
        .with_context(|| format!("Failed to set current plan of {}", project.display()))?;

    if written.changed {
        writeln!(out, "Current plan set to {}", written.plan)?;
        writeln!(out, "Close and reopen the project in HEC-RAS for the change to take effect.")?;
    } else {
        writeln!(out, "Current plan left unchanged")?;
    }
    Ok(())
}

fn titles(args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let dir = required_path(args, "dir")?;
    let entries =
        scan_titles(dir).with_context(|| format!("Failed to scan {}", dir.display()))?;

    if args.get_flag("json") {
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else {
        for entry in &entries {
            writeln!(out, "{}: {}", entry.file_name, entry.title.as_deref().unwrap_or("-"))?;
        }
    }
    Ok(())
}

fn plans(args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let dir = required_path(args, "dir")?;
    let entries = scan_plans(dir).with_context(|| format!("Failed to scan {}", dir.display()))?;

    if args.get_flag("json") {
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else {
        for entry in &entries {
            let record = &entry.record;
            writeln!(
                out,
                "{}: {} [{}] flow={} geom={}",
                entry.file_name,
                record.plan_title.as_deref().unwrap_or("-"),
                record.short_identifier.as_deref().unwrap_or("-"),
                record.flow_file.map_or_else(|| "-".to_string(), |e| e.to_string()),
                record.geom_file.map_or_else(|| "-".to_string(), |e| e.to_string()),
            )?;
        }
    }
    Ok(())
}
