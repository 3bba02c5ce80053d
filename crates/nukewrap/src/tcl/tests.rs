use super::*;
use std::fs;

fn classes() -> NodeClasses {
    NodeClasses::new([
        "Grade",
        "Grade2",
        "Merge",
        "Merge2",
        "Write",
        "Read",
        "Camera",
        "Camera2",
        "Card",
        "Card2",
        "Scene",
        "ScanlineRender",
        "Shuffle",
        "ShuffleCopy",
        "exrReader",
        "exrWriter",
    ])
}

fn words(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn build(line: &str) -> Result<Script, TclError> {
    parse_cli(&words(line), &classes(), &mut SequentialIds::default())
}

#[test]
fn format_plugins_are_excluded() {
    let c = classes();
    assert!(!c.names().iter().any(|n| n.ends_with("Reader")));
    assert!(matches!(
        c.resolve("exrReader"),
        Err(TclError::UnknownClass { .. })
    ));
    // A bare suffix is not a format plugin.
    assert_eq!(NodeClasses::new(["Writer"]).len(), 1);
}

#[test]
fn resolve_prefers_exact_then_highest_version() {
    let c = classes();
    assert_eq!(c.resolve("Grade").unwrap(), "Grade2");
    assert_eq!(c.resolve("Write").unwrap(), "Write");
    assert_eq!(c.resolve("grade").unwrap(), "Grade2");
    assert_eq!(c.resolve("scanlinerender").unwrap(), "ScanlineRender");
}

#[test]
fn resolve_unique_prefix_and_errors() {
    let c = classes();
    assert_eq!(c.resolve("scanl").unwrap(), "ScanlineRender");
    // "Shuffle" matches exactly, so the longer ShuffleCopy is not a conflict.
    assert_eq!(c.resolve("shuffle").unwrap(), "Shuffle");
    match c.resolve("ca") {
        Err(TclError::AmbiguousClass { matches, .. }) => {
            assert_eq!(matches, ["Camera", "Camera2", "Card", "Card2"]);
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }
    assert!(matches!(
        c.resolve("blur"),
        Err(TclError::UnknownClass { .. })
    ));
}

#[test]
fn list_file_skips_comments_and_blanks() {
    let c = NodeClasses::from_list("# classes\nGrade\n\n  Blur  \nGrade\n");
    assert_eq!(c.names(), ["Grade", "Blur"]);
}

#[test]
fn plugin_dir_contributes_stems() {
    let dir = tempfile::tempdir().unwrap();
    for f in ["Blur.so", "Denoise.gizmo", "readme.txt", "movReader.so"] {
        fs::write(dir.path().join(f), "").unwrap();
    }
    let mut c = NodeClasses::default();
    assert_eq!(c.add_plugin_dir(dir.path()).unwrap(), 2);
    assert_eq!(c.names(), ["Blur", "Denoise"]);
}

#[test]
fn split_and_tokenize_keep_brace_groups() {
    let lines = split_commands(&words(
        "-grade blackpoint {.015 .016 .109 .1} -camera matrix {{.1 .2} {1 2}}",
    ));
    assert_eq!(
        lines,
        [
            "grade blackpoint {.015 .016 .109 .1}",
            "camera matrix {{.1 .2} {1 2}}"
        ]
    );
    assert_eq!(
        tokenize(&lines[0]),
        ["grade", "blackpoint", "{.015 .016 .109 .1}"]
    );
    assert_eq!(tokenize(&lines[1]), ["camera", "matrix", "{{.1 .2} {1 2}}"]);
}

#[test]
fn node_set_push_and_execute() {
    let script = build(
        "-grade blackpoint .015 -set mygrade -push mygrade -write file /out/a.%04d.exr -execute 1-10",
    )
    .unwrap();
    assert_eq!(
        script.commands,
        [
            "Grade2 {blackpoint .015}",
            "set N1 [stack 0]",
            "push $N1",
            "Write {file /out/a.%04d.exr}",
            "set N2 [stack 0]",
        ]
    );
    assert_eq!(script.executes, ["execute $N2 1-10"]);
    assert_eq!(
        script.tcl(),
        "Grade2 {blackpoint .015};set N1 [stack 0];push $N1;\
         Write {file /out/a.%04d.exr};set N2 [stack 0];execute $N2 1-10;"
    );
}

#[test]
fn execute_without_range_uses_first_last_knobs() {
    let script = build("-write file out.exr first 1 last 10 -execute").unwrap();
    assert_eq!(
        script.executes,
        ["execute $N1 [value $N1.first]-[value $N1.last]"]
    );
}

#[test]
fn executes_run_after_the_graph_in_order() {
    let script = build("-write -execute 1-2 -merge inputs 2 -write -execute 3-4").unwrap();
    assert_eq!(script.executes, ["execute $N1 1-2", "execute $N2 3-4"]);
    assert_eq!(script.commands.last().unwrap(), "set N2 [stack 0]");
    assert!(script.tcl().ends_with("execute $N1 1-2;execute $N2 3-4;"));
}

#[test]
fn push_zero_and_unknown_variable() {
    let script = build("-camera -set cam -push 0 -push cam -scanlinerender inputs 3").unwrap();
    assert_eq!(
        script.commands,
        [
            "Camera2 {}",
            "set N1 [stack 0]",
            "push 0",
            "push $N1",
            "ScanlineRender {inputs 3}"
        ]
    );
    assert_eq!(
        build("-push nothing").unwrap_err(),
        TclError::UnknownVariable {
            name: "nothing".to_string()
        }
    );
}

#[test]
fn save_checks_the_target() {
    let dir = tempfile::tempdir().unwrap();
    let fresh = dir.path().join("fresh.nk");
    let taken = dir.path().join("taken.nk");
    fs::write(&taken, "").unwrap();
    let d = dir.path().display();

    let s = build(&format!("-grade -save {}", fresh.display())).unwrap();
    assert_eq!(s.commands[1], format!("script_save {{{}}}", fresh.display()));
    assert!(s.warnings.is_empty());

    let s = build(&format!("-grade -save {d}")).unwrap();
    assert_eq!(s.commands.len(), 1);
    assert_eq!(s.warnings.len(), 1);

    let s = build(&format!("-grade -save {}", taken.display())).unwrap();
    assert_eq!(s.commands.len(), 1);
    assert_eq!(s.warnings.len(), 2);

    let s = build(&format!("-grade -save {} please", taken.display())).unwrap();
    assert_eq!(s.commands.len(), 1);
    assert!(s.warnings[1].starts_with("invalid 'save' syntax"));

    let s = build(&format!("-grade -save {} force", taken.display())).unwrap();
    assert_eq!(s.commands[1], format!("script_save {{{}}}", taken.display()));
    assert_eq!(s.warnings.last().unwrap(), "Forcing script save.");

    assert_eq!(build("-save").unwrap_err(), TclError::MissingSavePath);
}

#[test]
fn random_ids_are_prefixed_and_vary() {
    let mut ids = RandomIds::seeded(7);
    let a = ids.next_id("g");
    let b = ids.next_id("g");
    assert!(a.starts_with('N') && a[1..].chars().all(|c| c.is_ascii_digit()));
    assert_ne!(a, b);
}

#[test]
fn script_serializes_to_json() {
    let script = build("-grade").unwrap();
    let v = serde_json::to_value(&script).unwrap();
    assert_eq!(v["commands"][0], "Grade2 {}");
    assert!(v["executes"].as_array().unwrap().is_empty());
}
