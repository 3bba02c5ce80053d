use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use nukewrap::tcl::{parse_cli, NodeClasses, RandomIds, Script};
use nukewrap::{exit_code, InlineScript, LaunchCfg};

#[derive(Parser)]
#[command(name = "nukecli")]
#[command(about = "Build and run Nuke scripts from command-line node strings")]
#[command(
    after_help = "Example:\n  nukecli --plugins classes.txt -read file in.%04d.exr -grade blackpoint .015 \
                  -write file out.%04d.exr -execute 1-10"
)]
struct Cmd {
    /// Node class list, one name per line
    #[arg(long, env = "NUKECLI_PLUGINS")]
    plugins: Option<PathBuf>,

    /// Directory of plugin files whose names are node classes (repeatable)
    #[arg(long = "plugin-dir")]
    plugin_dirs: Vec<PathBuf>,

    /// Print the TCL without launching Nuke
    #[arg(long)]
    dry_run: bool,

    /// Print the script as JSON instead of the banner
    #[arg(long)]
    json: bool,

    /// Node and command words; everything from the first word on
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    words: Vec<String>,
}

fn main() -> ExitCode {
    nukewrap::logging::init();
    let cmd = Cmd::parse();
    match run(cmd) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("nukecli: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cmd: Cmd) -> Result<ExitCode> {
    let classes = load_classes(&cmd)?;
    tracing::info!(classes = classes.len(), words = cmd.words.len(), "building script");
    let script = parse_cli(&cmd.words, &classes, &mut RandomIds::from_entropy())?;
    let tcl = script.tcl();
    print_script(&script, &tcl, cmd.json)?;
    if cmd.dry_run {
        return Ok(ExitCode::SUCCESS);
    }

    let file = InlineScript::create(OsStr::new(&tcl), "nukecli-", ".tcl")
        .context("writing TCL script")?;
    let args = vec![file.path().as_os_str().to_os_string()];
    let status = nukewrap::launch(&LaunchCfg::from_env(), &args);
    file.close();
    Ok(ExitCode::from(exit_code(status?)))
}

fn load_classes(cmd: &Cmd) -> Result<NodeClasses> {
    let mut classes = match &cmd.plugins {
        Some(path) => NodeClasses::from_list_file(path)
            .with_context(|| format!("reading class list {}", path.display()))?,
        None => NodeClasses::default(),
    };
    for dir in &cmd.plugin_dirs {
        let added = classes
            .add_plugin_dir(dir)
            .with_context(|| format!("scanning plugin dir {}", dir.display()))?;
        tracing::debug!(dir = %dir.display(), added, "plugin dir");
    }
    if classes.is_empty() {
        bail!("no node classes known; pass --plugins FILE or --plugin-dir DIR");
    }
    Ok(classes)
}

fn print_script(script: &Script, tcl: &str, json: bool) -> Result<()> {
    if json {
        let mut doc = serde_json::to_value(script)?;
        doc["tcl"] = serde_json::Value::from(tcl);
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        let rule = "=".repeat(15);
        println!("\n{rule} TCL COMMAND STRING {rule}");
        println!("{tcl}");
        println!("{}\n", "=".repeat(50));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;

    #[test]
    fn cli_definition_is_valid() {
        Cmd::command().debug_assert();
    }

    #[test]
    fn words_follow_double_dash() {
        let cmd = Cmd::try_parse_from([
            "nukecli",
            "--plugin-dir",
            "/p",
            "--dry-run",
            "--",
            "-grade",
            "blackpoint",
            ".015",
        ])
        .unwrap();
        assert!(cmd.dry_run);
        assert_eq!(cmd.plugin_dirs, [PathBuf::from("/p")]);
        assert_eq!(cmd.words, ["-grade", "blackpoint", ".015"]);
    }

    #[test]
    fn words_may_follow_options_directly() {
        let cmd = Cmd::try_parse_from([
            "nukecli",
            "--plugins",
            "classes.txt",
            "-grade",
            "blackpoint",
            ".015",
            "-hueshift",
            "-write",
            "file",
            "out.%04d.exr",
            "-execute",
            "1-10",
        ])
        .unwrap();
        assert_eq!(cmd.plugins, Some(PathBuf::from("classes.txt")));
        assert!(!cmd.dry_run);
        assert_eq!(
            cmd.words,
            [
                "-grade",
                "blackpoint",
                ".015",
                "-hueshift",
                "-write",
                "file",
                "out.%04d.exr",
                "-execute",
                "1-10"
            ]
        );
    }

    #[test]
    fn options_after_words_are_words() {
        let cmd = Cmd::try_parse_from(["nukecli", "-write", "--dry-run"]).unwrap();
        assert!(!cmd.dry_run);
        assert_eq!(cmd.words, ["-write", "--dry-run"]);
    }

    #[test]
    fn classes_come_from_list_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("classes.txt");
        fs::write(&list, "Grade\nWrite\n").unwrap();
        let plugins = dir.path().join("plugins");
        fs::create_dir(&plugins).unwrap();
        fs::write(plugins.join("Denoise.gizmo"), "").unwrap();

        let cmd = Cmd {
            plugins: Some(list),
            plugin_dirs: vec![plugins],
            dry_run: true,
            json: false,
            words: vec![],
        };
        let classes = load_classes(&cmd).unwrap();
        assert_eq!(classes.names(), ["Grade", "Write", "Denoise"]);
    }

    #[test]
    fn no_classes_is_an_error() {
        let cmd = Cmd {
            plugins: None,
            plugin_dirs: vec![],
            dry_run: true,
            json: false,
            words: vec!["-grade".to_string()],
        };
        assert!(load_classes(&cmd).is_err());
    }
}
