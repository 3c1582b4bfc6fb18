//! Integration tests for the `speedctl` binary.
//!
//! These cover argument parsing, help output, completions, config handling
//! and error exit codes, plus rendering against a simulated router.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use speedctl_api::codec::decode_request;

// ── Helpers ─────────────────────────────────────────────────────────

/// A `speedctl` command with env isolation.
///
/// Clears every `SPEEDCTL_*` variable and points config lookup at a fresh
/// temp dir so tests never touch the user's real configuration.
fn speedctl_cmd(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("speedctl");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("SPEEDCTL_PROFILE")
        .env_remove("SPEEDCTL_HOST")
        .env_remove("SPEEDCTL_OUTPUT")
        .env_remove("SPEEDCTL_TIMEOUT")
        .env_remove("SPEEDCTL_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = speedctl_cmd(&home).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    speedctl_cmd(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("Speedport")
            .and(predicate::str::contains("wifi"))
            .and(predicate::str::contains("clients"))
            .and(predicate::str::contains("ip"))
            .and(predicate::str::contains("log")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    speedctl_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("speedctl"));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    speedctl_cmd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("speedctl"));
}

// ── Argument validation ─────────────────────────────────────────────

#[test]
fn test_clients_requires_interface_number() {
    let home = TempDir::new().unwrap();
    speedctl_cmd(&home)
        .args(["clients", "two"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_include_and_exclude_conflict() {
    let home = TempDir::new().unwrap();
    speedctl_cmd(&home)
        .args(["log", "--include", "w", "--exclude", "dh"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_unknown_log_category_is_usage_error() {
    let home = TempDir::new().unwrap();
    speedctl_cmd(&home)
        .args(["log", "--exclude", "dh,nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_log_categories_lists_keys() {
    let home = TempDir::new().unwrap();
    speedctl_cmd(&home)
        .args(["--color", "never", "log", "--categories"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("wui")
                .and(predicate::str::contains("dynamic-dns"))
                .and(predicate::str::contains("unclassified")),
        );
}

#[test]
fn test_invalid_output_format() {
    let home = TempDir::new().unwrap();
    let output = speedctl_cmd(&home)
        .args(["--output", "xml", "wifi"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("possible values"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_without_file_uses_defaults() {
    let home = TempDir::new().unwrap();
    speedctl_cmd(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]").and(predicate::str::contains("timeout = 30")));
}

#[test]
fn test_config_set_then_show() {
    let home = TempDir::new().unwrap();
    speedctl_cmd(&home)
        .args(["config", "set", "host", "10.1.2.3"])
        .assert()
        .success();

    speedctl_cmd(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("host = \"10.1.2.3\""));
}

#[test]
fn test_config_set_unknown_key() {
    let home = TempDir::new().unwrap();
    speedctl_cmd(&home)
        .args(["config", "set", "site", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn test_unknown_profile_is_not_found() {
    let home = TempDir::new().unwrap();
    speedctl_cmd(&home)
        .args(["--profile", "office", "wifi"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("office"));
}

// ── Router errors ───────────────────────────────────────────────────

#[test]
fn test_unreachable_router_is_connection_error() {
    let home = TempDir::new().unwrap();
    speedctl_cmd(&home)
        .args(["--host", "127.0.0.1", "--timeout", "3", "ip"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Could not connect"));
}

#[test]
fn test_watch_on_other_commands_prints_notice() {
    let home = TempDir::new().unwrap();
    speedctl_cmd(&home)
        .args(["--host", "127.0.0.1", "--timeout", "3", "--watch", "ip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--watch only applies to `clients`"));
}

// ── Simulated router ────────────────────────────────────────────────

/// Device parameter table. A requested path ending in `.` returns every
/// entry under it; any other path returns its value or an empty one.
struct FakeRouter(Vec<(&'static str, Option<&'static str>)>);

impl FakeRouter {
    fn home() -> Self {
        Self(vec![
            ("Device.WiFi.SSID.1.Status", Some("Up")),
            ("Device.WiFi.SSID.1.SSID", Some("home")),
            ("Device.WiFi.SSID.1.BSSID", Some("AA:BB:CC:00:11:22")),
            ("Device.WiFi.Radio.1.SupportedFrequencyBands", Some("2.4GHz")),
            ("Device.WiFi.Radio.1.Channel", Some("Auto")),
            ("Device.WiFi.Radio.1.TransmitPower", Some("-1")),
            ("Device.WiFi.Radio.1.MaxBitRate", Some("600")),
            ("Device.WiFi.AccessPoint.1.Security.ModeEnabled", Some("WPA2-Personal")),
            ("Device.WiFi.SSID.2.Status", Some("Down")),
            ("Device.WiFi.SSID.2.SSID", Some("guest")),
            ("Device.WiFi.AccessPoint.1.AssociatedDevice.1.MACAddress", Some("AA:AA:AA:AA:AA:01")),
            ("Device.WiFi.AccessPoint.1.AssociatedDevice.1.SignalStrength", Some("-55")),
            ("Device.WiFi.AccessPoint.1.AssociatedDevice.2.MACAddress", Some("aa:aa:aa:aa:aa:02")),
            ("Device.WiFi.AccessPoint.1.AssociatedDevice.2.SignalStrength", Some("-80")),
            ("Device.WiFi.AccessPoint.1.AssociatedDevice.3.MACAddress", Some("aa:aa:aa:aa:aa:03")),
            ("Device.WiFi.AccessPoint.1.AssociatedDevice.3.SignalStrength", Some("-60")),
            ("Device.Hosts.Host.1.PhysAddress", Some("aa:aa:aa:aa:aa:02")),
            ("Device.Hosts.Host.1.IPAddress", Some("192.168.2.21")),
            ("Device.Hosts.Host.1.HostName", Some("tablet")),
            ("Device.Hosts.Host.1.Active", Some("true")),
            ("Device.Hosts.Host.2.PhysAddress", Some("aa:aa:aa:aa:aa:01")),
            ("Device.Hosts.Host.2.IPAddress", Some("192.168.2.20")),
            ("Device.Hosts.Host.2.HostName", Some("laptop")),
            ("Device.Hosts.Host.2.Active", Some("true")),
            ("Device.Hosts.Host.3.PhysAddress", Some("aa:aa:aa:aa:aa:03")),
            ("Device.Hosts.Host.3.HostName", Some("old-phone")),
            ("Device.Hosts.Host.3.Active", Some("false")),
            ("Device.IP.Interface.2.Alias", Some("BOND")),
            ("Device.IP.Interface.2.IPv4Address.1.IPAddress", Some("203.0.113.7")),
            ("Device.IP.Interface.3.Alias", Some("LTE")),
            (
                "Device.DeviceInfo.X_T-ONLINE-DE_DeviceLog",
                Some(
                    "19.10.2026 08:15:42   W005) wlan auth failed\n\
                     19.10.2026 08:10:01   VPN010 tunnel up\n\
                     19.10.2026 08:05:00   DH001) lease renewed\n",
                ),
            ),
        ])
    }

    fn lookup(&self, requested: &str) -> Vec<(String, Option<&'static str>)> {
        if requested.ends_with('.') {
            return self
                .0
                .iter()
                .filter(|(name, _)| name.starts_with(requested))
                .map(|(name, value)| ((*name).to_owned(), *value))
                .collect();
        }
        let value = self
            .0
            .iter()
            .find(|(name, _)| *name == requested)
            .and_then(|(_, v)| *v);
        vec![(requested.to_owned(), value)]
    }
}

impl Respond for FakeRouter {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body = String::from_utf8_lossy(&request.body);
        let structs: String = decode_request(&body)
            .unwrap()
            .iter()
            .flat_map(|p| self.lookup(p.as_str()))
            .map(|(name, value)| {
                format!(
                    "<ParameterValueStruct><Name>{name}</Name><Value>{}</Value></ParameterValueStruct>",
                    value.unwrap_or_default()
                )
            })
            .collect();

        ResponseTemplate::new(200).set_body_string(format!(
            "<?xml version=\"1.0\"?>\
             <SOAP-ENV:Envelope xmlns:SOAP-ENV=\"http://schemas.xmlsoap.org/soap/envelope/\">\
             <SOAP-ENV:Body><u:GetParameterValuesResponse xmlns:u=\"urn:dslforum-org:cwmp-1-0\">\
             <ParameterList>{structs}</ParameterList>\
             </u:GetParameterValuesResponse></SOAP-ENV:Body></SOAP-ENV:Envelope>"
        ))
    }
}

async fn start_router() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(FakeRouter::home())
        .mount(&server)
        .await;
    server
}

/// A `speedctl` command pointed at `server`, colorless unless overridden.
fn router_cmd(home: &TempDir, server: &MockServer, args: &[&str]) -> assert_cmd::Command {
    let endpoint = format!("{}/", server.uri());
    let mut cmd = speedctl_cmd(home);
    cmd.args(["--host", endpoint.as_str(), "--password", "secret", "--timeout", "5"]);
    if !args.contains(&"--color") {
        cmd.args(["--color", "never"]);
    }
    cmd.args(args);
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wifi_table_shows_radio_values_as_reported() {
    let server = start_router().await;
    let home = TempDir::new().unwrap();
    router_cmd(&home, &server, &["wifi"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("home")
                .and(predicate::str::contains("guest"))
                .and(predicate::str::contains("Auto"))
                .and(predicate::str::contains("-1"))
                .and(predicate::str::contains("Max Mbit/s"))
                .and(predicate::str::contains("DOWN")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wifi_plain_lists_every_slot() {
    let server = start_router().await;
    let home = TempDir::new().unwrap();
    router_cmd(&home, &server, &["-o", "plain", "wifi"])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("1\tup\thome\n2\tdown\tguest\n")
                .and(predicate::str::contains("7\tdown\tNA")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clients_table_lists_only_active_clients() {
    let server = start_router().await;
    let home = TempDir::new().unwrap();
    router_cmd(&home, &server, &["clients", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("laptop")
                .and(predicate::str::contains("tablet"))
                .and(predicate::str::contains("192.168.2.21"))
                .and(predicate::str::contains("Power:      -1 %"))
                .and(predicate::str::contains("old-phone").not()),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clients_weak_signal_is_highlighted() {
    let server = start_router().await;
    let home = TempDir::new().unwrap();
    router_cmd(&home, &server, &["--color", "always", "clients", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\u{1b}[91m-80")
                .and(predicate::str::contains("\u{1b}[91m-55").not()),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clients_json_keeps_inactive_clients() {
    let server = start_router().await;
    let home = TempDir::new().unwrap();
    router_cmd(&home, &server, &["-o", "json", "clients", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("old-phone")
                .and(predicate::str::contains("\"active\": false"))
                .and(predicate::str::contains("\"channel\": \"Auto\"")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clients_of_down_interface_is_usage_error() {
    let server = start_router().await;
    let home = TempDir::new().unwrap();
    router_cmd(&home, &server, &["clients", "2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("interface 2 is not up"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clients_of_unknown_interface_is_not_found() {
    let server = start_router().await;
    let home = TempDir::new().unwrap();
    router_cmd(&home, &server, &["clients", "9"]).assert().code(4);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ip_marks_public_address() {
    let server = start_router().await;
    let home = TempDir::new().unwrap();
    router_cmd(&home, &server, &["ip"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("203.0.113.7")
                .and(predicate::str::contains("address websites will see"))
                .and(predicate::str::contains("LTE")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_log_include_filters_newest_first() {
    let server = start_router().await;
    let home = TempDir::new().unwrap();
    router_cmd(&home, &server, &["-o", "plain", "log", "--include", "w,dh"])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("19.10.2026 08:05:00   DH001)")
                .and(predicate::str::contains("W005) wlan auth failed"))
                .and(predicate::str::contains("VPN010").not()),
        );
}
