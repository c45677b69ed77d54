use dynatrace_hwc_extension::domain::ports::ConfigProvider;
use dynatrace_hwc_extension::{
    ExtensionError, HttpInstaller, LocalStager, Result, Supplier, SupplyOutcome,
};
use httpmock::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::{SimpleFileOptions, ZipWriter};

const INSTALLER_PATH: &str = "/api/v1/deployment/installer/agent/windows/paas/latest";

struct StaticConfig {
    vcap_services: String,
    buildpack_dir: PathBuf,
}

impl ConfigProvider for StaticConfig {
    fn vcap_services(&self) -> Option<String> {
        Some(self.vcap_services.clone())
    }

    fn buildpack_dir(&self) -> Result<PathBuf> {
        Ok(self.buildpack_dir.clone())
    }

    fn debug_enabled(&self) -> bool {
        false
    }
}

struct Staging {
    root: TempDir,
}

impl Staging {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        for dir in ["app", "deps", "buildpack"] {
            std::fs::create_dir_all(root.path().join(dir)).unwrap();
        }
        std::fs::write(
            root.path().join("buildpack").join("buildpack.toml"),
            "[buildpack]\nid = \"dynatrace-hwc-extension\"\nname = \"Dynatrace HWC Extension\"\nversion = \"1.0.0\"\n",
        )
        .unwrap();
        Self { root }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    fn supplier(&self, vcap_services: serde_json::Value) -> Supplier<StaticConfig, LocalStager, HttpInstaller> {
        let config = StaticConfig {
            vcap_services: vcap_services.to_string(),
            buildpack_dir: self.path("buildpack"),
        };
        let stager = LocalStager::new(
            self.path("app"),
            self.path("cache"),
            self.path("deps"),
            "0".to_string(),
        );
        Supplier::new(config, stager, HttpInstaller::new().unwrap())
    }
}

fn agent_archive() -> Vec<u8> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let manifest = serde_json::json!({
        "tenantUUID": "abc",
        "tenantToken": "tok",
        "communicationEndpoints": ["https://a", "https://b"]
    });

    zip.start_file("manifest.json", SimpleFileOptions::default()).unwrap();
    zip.write_all(manifest.to_string().as_bytes()).unwrap();
    for lib in ["agent/lib/oneagentloader.dll", "agent/lib64/oneagentloader.dll"] {
        zip.start_file(lib, SimpleFileOptions::default()).unwrap();
        zip.write_all(b"loader").unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn dynatrace_binding(credentials: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "user-provided": [
            {"name": "mysql", "credentials": {"uri": "mysql://db"}},
            {"name": "dynatrace-service", "credentials": credentials}
        ]
    })
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[tokio::test]
async fn test_supply_installs_agent_from_api_url() {
    let staging = Staging::new();
    std::fs::write(staging.path("buildpack/Procfile"), "web: .cloudfoundry\\hwc.exe").unwrap();

    let server = MockServer::start();
    let download_mock = server.mock(|when, then| {
        when.method(GET)
            .path(INSTALLER_PATH)
            .query_param("Api-Token", "P1")
            .query_param("networkzone", "zoneA");
        then.status(200)
            .header("Content-Type", "application/zip")
            .body(agent_archive());
    });

    let supplier = staging.supplier(dynatrace_binding(serde_json::json!({
        "environmentid": "E1",
        "paastoken": "P1",
        "apiurl": server.url("/api"),
        "networkzone": "zoneA"
    })));

    let outcome = supplier.run().await.unwrap();

    download_mock.assert();
    let agent_dir = staging.path("deps/0/dynatrace");
    assert_eq!(outcome, SupplyOutcome::Installed { agent_dir: agent_dir.clone() });

    assert!(staging.path("cache").is_dir());
    assert!(staging.path("deps/0/downloads/DynatraceAgent.zip").is_file());
    assert!(agent_dir.join("agent/lib64/oneagentloader.dll").is_file());
    assert_eq!(
        read(&agent_dir.join("agent/conf/standalone.conf")),
        "tenant abc\ntenanttoken tok\nserver https://a;https://b"
    );

    let script = read(&staging.path("deps/0/profile.d/dynatrace.bat"));
    assert!(script.starts_with("set COR_ENABLE_PROFILING=1\n"));
    assert!(script.contains("set DT_BLOCKLIST=powershell*\n"));
    assert!(script.contains(r"set COR_PROFILER_PATH_32=%DEPS_DIR%\0\dynatrace\agent\lib\oneagentloader.dll"));

    assert_eq!(read(&staging.path("app/Procfile")), "web: .cloudfoundry\\hwc.exe");
}

#[tokio::test]
async fn test_supply_uses_custom_agent_url() {
    let staging = Staging::new();
    let server = MockServer::start();
    let custom_mock = server.mock(|when, then| {
        when.method(GET).path("/mirror/agent.zip").query_param("Api-Token", "P1");
        then.status(200).body(agent_archive());
    });
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(INSTALLER_PATH);
        then.status(200).body(agent_archive());
    });

    let supplier = staging.supplier(dynatrace_binding(serde_json::json!({
        "environmentid": "E1",
        "paastoken": "P1",
        "apiurl": server.url("/api"),
        "customoneagenturl": server.url("/mirror/agent.zip")
    })));

    supplier.run().await.unwrap();

    custom_mock.assert();
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_supply_keeps_app_procfile() {
    let staging = Staging::new();
    std::fs::write(staging.path("app/Procfile"), "web: app.exe").unwrap();
    std::fs::write(staging.path("buildpack/Procfile"), "web: hwc.exe").unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(INSTALLER_PATH);
        then.status(200).body(agent_archive());
    });

    let supplier = staging.supplier(dynatrace_binding(serde_json::json!({
        "environmentid": "E1",
        "paastoken": "P1",
        "apiurl": server.url("/api")
    })));

    supplier.run().await.unwrap();

    assert_eq!(read(&staging.path("app/Procfile")), "web: app.exe");
}

#[tokio::test]
async fn test_supply_aborts_on_server_error() {
    let staging = Staging::new();
    let server = MockServer::start();
    let download_mock = server.mock(|when, then| {
        when.method(GET).path(INSTALLER_PATH);
        then.status(500);
    });

    let supplier = staging.supplier(dynatrace_binding(serde_json::json!({
        "environmentid": "E1",
        "paastoken": "P1",
        "apiurl": server.url("/api")
    })));

    let err = supplier.run().await.unwrap_err();

    download_mock.assert();
    assert!(matches!(err, ExtensionError::DownloadStatusError { .. }));
    assert!(err.to_string().contains("500"));
    assert_eq!(err.step(), "download agent");
    assert!(!staging.path("deps/0/dynatrace/manifest.json").exists());
    assert!(!staging.path("deps/0/profile.d").exists());
}

#[tokio::test]
async fn test_supply_aborts_on_corrupt_archive() {
    let staging = Staging::new();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(INSTALLER_PATH);
        then.status(200).body("<html>maintenance</html>");
    });

    let supplier = staging.supplier(dynatrace_binding(serde_json::json!({
        "environmentid": "E1",
        "paastoken": "P1",
        "apiurl": server.url("/api")
    })));

    let err = supplier.run().await.unwrap_err();

    assert!(matches!(err, ExtensionError::ExtractError(_)));
    assert!(!staging.path("deps/0/dynatrace/agent/conf/standalone.conf").exists());
}

#[tokio::test]
async fn test_supply_without_dynatrace_binding_is_a_no_op() {
    let staging = Staging::new();

    let supplier = staging.supplier(serde_json::json!({
        "user-provided": [{"name": "mysql", "credentials": {"uri": "mysql://db"}}]
    }));

    let outcome = supplier.run().await.unwrap();

    assert_eq!(outcome, SupplyOutcome::NotBound);
    assert!(!staging.path("deps/0").exists());
    assert!(!staging.path("app/Procfile").exists());
}
