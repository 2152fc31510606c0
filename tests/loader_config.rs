// tests/loader_config.rs
use std::{env, fs, path::PathBuf};

use biosimilar_monitor::config::{
    MonitorConfig, ENV_CONFIG_PATH, ENV_DATA_PATH, ENV_DATA_URL, ENV_DEFAULT_WINDOW,
};
use biosimilar_monitor::loader::{load_news, providers::file::JsonFileLoader};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn clear_env() {
    for k in [ENV_CONFIG_PATH, ENV_DATA_PATH, ENV_DATA_URL, ENV_DEFAULT_WINDOW] {
        env::remove_var(k);
    }
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // Isolate CWD so the repo's own config/ is not picked up.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    clear_env();

    // 1) Nothing on disk → built-in defaults
    let cfg = MonitorConfig::load_default().unwrap();
    assert_eq!(cfg, MonitorConfig::default());

    // 2) Fallback config/monitor.toml
    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(
        tmp.path().join("config/monitor.toml"),
        "[dashboard]\ndefault_window_days = 60\n",
    )
    .unwrap();
    assert_eq!(MonitorConfig::load_default().unwrap().dashboard.default_window_days, 60);

    // 3) Env path wins
    let p_env = tmp.path().join("other.toml");
    fs::write(&p_env, "[data]\npath = \"elsewhere.json\"\n").unwrap();
    env::set_var(ENV_CONFIG_PATH, p_env.display().to_string());
    let cfg = MonitorConfig::load_default().unwrap();
    assert_eq!(cfg.data.path.to_str(), Some("elsewhere.json"));
    assert_eq!(cfg.dashboard.default_window_days, 30);

    // 4) Env path pointing nowhere is an error
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml").display().to_string());
    assert!(MonitorConfig::load_default().is_err());

    clear_env();
    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn env_overrides_apply_on_top_of_file() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("monitor.toml");
    fs::write(&p, "[data]\npath = \"a.json\"\n").unwrap();

    clear_env();
    env::set_var(ENV_CONFIG_PATH, p.display().to_string());
    env::set_var(ENV_DATA_PATH, "b.json");
    env::set_var(ENV_DATA_URL, "https://feeds.example.com/news.json");
    env::set_var(ENV_DEFAULT_WINDOW, "7");
    let cfg = MonitorConfig::load_default().unwrap();
    assert_eq!(cfg.data.path.to_str(), Some("b.json"));
    assert_eq!(cfg.data.url.as_deref(), Some("https://feeds.example.com/news.json"));
    assert_eq!(cfg.dashboard.default_window_days, 7);

    // Not an offered window → ignored
    env::set_var(ENV_DEFAULT_WINDOW, "45");
    assert_eq!(MonitorConfig::load_default().unwrap().dashboard.default_window_days, 30);

    clear_env();
}

// Serial as well: the config test above moves the process CWD.
#[serial_test::serial]
#[tokio::test]
async fn file_loader_reads_fixture_newest_first() {
    let loader = JsonFileLoader::new(fixture("news.json"));
    let items = load_news(&loader).await.expect("fixture loads");
    assert_eq!(items.len(), 5);
    assert_eq!(items[0].id, "sandoz-2024-06-12-denosumab");
    assert_eq!(items[4].id, "sandoz-2024-04-02-results");
}

#[serial_test::serial]
#[tokio::test]
async fn file_loader_reports_bad_json() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("broken.json");
    fs::write(&p, "{ not json").unwrap();
    let err = load_news(&JsonFileLoader::new(&p)).await.unwrap_err();
    assert!(format!("{err:#}").contains("parsing news collection"));
}
