use std::process::Command;
use tempfile::TempDir;

const FEED: &str = r#"<entries>
  <entry type="method" name="jQuery" return="jQuery"><desc>Constructor.</desc></entry>
  <entry type="method" name="hide" return="jQuery">
    <signature><added>1.0</added></signature>
    <desc>Hide the matched elements.</desc>
  </entry>
  <entry type="method" name="finish" return="jQuery">
    <signature><added>1.9</added></signature>
    <desc>Stop animations.</desc>
  </entry>
</entries>"#;

fn stubgen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stubgen"))
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("api.xml"), FEED).unwrap();
    std::fs::write(dir.path().join("header.js"), "// header\n").unwrap();
    dir
}

#[test]
fn generates_from_local_feed() {
    let dir = workspace();
    let output = dir.path().join("jquery.js");

    let status = stubgen()
        .current_dir(dir.path())
        .args(["--input", "api.xml", "--header", "header.js", "-o", "jquery.js"])
        .status()
        .unwrap();
    assert!(status.success());

    let generated = std::fs::read_to_string(output).unwrap();
    assert!(generated.starts_with("// header\n/**\n * Hide the matched elements."));
    assert!(generated.contains("jQuery.prototype.hide = function() { return new jQuery(); };"));
    assert!(generated.contains("jQuery.prototype.finish"));
    assert!(!generated.contains("jQuery.prototype.jQuery"));
}

#[test]
fn picks_up_stubgen_toml() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("stubgen.toml"),
        "target_version = \"1.8\"\nheader = \"header.js\"\noutput = \"old.js\"\n",
    )
    .unwrap();

    let status = stubgen()
        .current_dir(dir.path())
        .args(["--input", "api.xml"])
        .status()
        .unwrap();
    assert!(status.success());

    let generated = std::fs::read_to_string(dir.path().join("old.js")).unwrap();
    assert!(generated.contains("jQuery.prototype.hide"));
    assert!(!generated.contains("jQuery.prototype.finish"));
}

#[test]
fn fails_with_stage_in_log() {
    let dir = workspace();
    std::fs::write(dir.path().join("api.xml"), "<entries><entry></entries>").unwrap();

    let output = stubgen()
        .current_dir(dir.path())
        .args(["--input", "api.xml", "--header", "header.js", "-o", "out.js"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("stage=parse"), "stderr: {stderr}");
    assert!(!dir.path().join("out.js").exists());
}
