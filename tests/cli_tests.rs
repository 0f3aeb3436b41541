use snapbox::cmd::{cargo_bin, Command};

#[test]
fn cli_tests() {
    let t = trycmd::TestCases::new();
    t.case("tests/cmd/*.toml");
}

#[test]
fn debug_config_json() {
    Command::new(cargo_bin!("siteconf"))
        .args(["debug", "config", "--format", "json"])
        .current_dir("tests/cmd/minimal.in")
        .assert()
        .success()
        .stdout_eq(snapbox::str![[r#"
{
  "author": "A. Writer",
  "site_name": "Plain Site",
  "site_url": "",
  "content_path": "content",
  "output_path": "output",
  "delete_output_directory": false,
  "timezone": "UTC",
  "default_language": "en",
  "pagination_size": 10,
  "relative_urls_enabled": false,
  "theme_reference": "themes/plain"
}

"#]])
        .stderr_eq("");
}

#[test]
fn check_rejects_nested_extra() {
    Command::new(cargo_bin!("siteconf"))
        .args(["check", "-c", "_site.yml"])
        .current_dir("tests/cmd/nested_extra.in")
        .assert()
        .code(78)
        .stdout_eq("")
        .stderr_eq(snapbox::str![[r#"
[..]Invalid settings in _site.yml: Invalid value for `site_metadata_extras.menu`: must be a string, number or boolean

"#]]);
}
