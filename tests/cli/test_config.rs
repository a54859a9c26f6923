//! Tests for show-config

use crate::common::{campaign_corpus, create_test_services};
use lorekeeper::cli::commands::config::{execute, ConfigArgs};
use lorekeeper::cli::OutputFormat;
use lorekeeper::core::xdg::XdgDirs;
use serial_test::serial;
use std::env;
use tempfile::TempDir;

#[test]
#[serial]
fn test_show_config_formats() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());
    let config_dir = TempDir::new().unwrap();
    env::set_var("LOREKEEPER_CONFIG_DIR", config_dir.path());

    let xdg = XdgDirs::new();
    assert!(!xdg.config_file().exists());
    for format in [OutputFormat::Human, OutputFormat::Json] {
        let result = execute(ConfigArgs {}, &services, &xdg, format);
        assert!(result.is_ok(), "show-config failed: {:?}", result.err());
    }

    env::remove_var("LOREKEEPER_CONFIG_DIR");
}
