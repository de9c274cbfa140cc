use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub const WORKSPACE_EXPORT: &str = r#"
[account]
id = 1
email = "alice@example.com"

[[workspaces]]
id = 125712
name = "Acme Labs"

[[workspaces]]
id = 200
name = "Side Project"

[[members]]
id = 1
user_name = "alice"

[[members]]
id = 2
user_name = "bob"

[[activities]]
id = 10
name = "Design"

[[activities]]
id = 11
name = "Testing"

[[entries]]
workspace_id = 125712
member_id = 1
activity_id = 10
work = 2.0
work_performed_on = "2014-07-01"

[[entries]]
workspace_id = 125712
member_id = 1
activity_id = 11
work = 1.5
work_performed_on = "2014-07-03"

[[entries]]
workspace_id = 125712
member_id = 2
activity_id = 10
work = 4.0
work_performed_on = "2014-07-02"

[[entries]]
workspace_id = 125712
member_id = 1
activity_id = 10
work = 0.0
work_performed_on = "2014-07-04"
"#;

pub fn tsreport_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tsreport").unwrap();
    cmd.env_remove("TSREPORT_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write tsreport.toml and a workspace export into `dir`
#[allow(dead_code)]
pub fn write_fixture(dir: &Path, email: &str, export: &str) {
    fs::write(
        dir.join("tsreport.toml"),
        format!("email = \"{}\"\nsource = \"workspace.toml\"\n", email),
    )
    .unwrap();
    fs::write(dir.join("workspace.toml"), export).unwrap();
}
