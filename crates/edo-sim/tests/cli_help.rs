use std::process::Command;

#[test]
fn help_lists_subcommands() {
    let output = Command::new(env!("CARGO_BIN_EXE_edo-sim"))
        .arg("--help")
        .output()
        .expect("spawn edo-sim");
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for sub in ["generate", "clean", "model", "run"] {
        assert!(help.contains(sub), "help is missing {sub}");
    }
}
