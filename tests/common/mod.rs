use assert_cmd::Command;

#[allow(dead_code)]
pub fn mdjournal_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mdjournal").unwrap();
    cmd.env_remove("MDJOURNAL_ROOT");
    cmd.env_remove("MDJOURNAL_LOG");
    cmd
}

#[allow(dead_code)]
pub fn mdbatch_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mdbatch").unwrap();
    cmd.env_remove("MDJOURNAL_LOG");
    cmd
}
