use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use clap::Parser;
use namedupe::cli::Cli;
use namedupe::config::{Config, ConfigError, Overrides, RunConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
root = "/srv/music"
delete_extensions = [".wav"]
ignore_patterns = ["@eaDir", "\\.sync"]
force = true
pretend = true
"#;
    fs::write(&config_path, toml_content).unwrap();

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.root, Some(PathBuf::from("/srv/music")));
    assert_eq!(config.delete_extensions, vec![".wav"]);
    assert_eq!(config.ignore_patterns, vec!["@eaDir", "\\.sync"]);
    assert!(config.force);
    assert!(config.pretend);
    assert!(!config.quiet);
}

#[test]
fn test_config_missing_file_uses_defaults() {
    let temp_dir = tempdir().unwrap();
    let nonexistent = temp_dir.path().join("nonexistent.toml");

    let config = Config::load(Some(&nonexistent), &Overrides::default()).unwrap();
    assert_eq!(config.delete_extensions, Config::default().delete_extensions);
    assert_eq!(config.ignore_patterns, Config::default().ignore_patterns);
}

#[test]
fn test_config_invalid_toml_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "force = [not valid").unwrap();

    let result = Config::load(Some(&config_path), &Overrides::default());
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
fn test_config_wrong_type_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "force = \"sometimes\"").unwrap();

    let result = Config::load(Some(&config_path), &Overrides::default());
    assert!(result.is_err());
}

#[test]
fn test_cli_overrides_beat_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "root = \"/from/file\"\ndelete_extensions = [\".wav\"]\nignore_patterns = [\"x\"]\n",
    )
    .unwrap();

    let overrides = Overrides {
        root: Some(PathBuf::from("/from/cli")),
        delete_extensions: Some(vec![".mp3".to_string()]),
        pretend: Some(true),
        ..Overrides::default()
    };
    let config = Config::load(Some(&config_path), &overrides).unwrap();

    assert_eq!(config.root, Some(PathBuf::from("/from/cli")));
    assert_eq!(config.delete_extensions, vec![".mp3"]);
    assert_eq!(config.ignore_patterns, vec!["x"]);
    assert!(config.pretend);
}

#[test]
fn test_cli_can_switch_off_file_flags() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "force = true\npretend = true\ntrash = true\n").unwrap();

    let cli = Cli::try_parse_from(["namedupe", "--no-force", "--no-trash"]).unwrap();
    let config = Config::load(Some(&config_path), &cli.overrides()).unwrap();

    assert!(!config.force);
    assert!(!config.trash);
    assert!(config.pretend);
}

#[test]
fn test_unset_overrides_leave_file_values() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "force = true\nquiet = true\n").unwrap();

    let config = Config::load(Some(&config_path), &Overrides::default()).unwrap();

    assert!(config.force);
    assert!(config.quiet);
}

#[test]
fn test_loaded_config_validates_into_run_config() {
    let music = tempdir().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "root = {:?}\ndelete_extensions = [\"mp3\", \".m4p\"]\ntrash = true\n",
            music.path().to_str().unwrap()
        ),
    )
    .unwrap();

    let config = Config::load(Some(&config_path), &Overrides::default()).unwrap();
    let run = RunConfig::from_config(&config).unwrap();

    assert_eq!(run.root, music.path());
    assert_eq!(
        run.delete_extensions.iter().cloned().collect::<Vec<_>>(),
        vec![".m4p".to_string(), ".mp3".to_string()]
    );
    assert_eq!(run.delete_method, namedupe::actions::DeleteMethod::Trash);
}

#[test]
fn test_invalid_root_message() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("nope");

    let config = Config {
        root: Some(missing.clone()),
        ..Config::default()
    };
    let err = RunConfig::from_config(&config).unwrap_err();

    assert_eq!(
        err.to_string(),
        format!("{} is not a directory", missing.display())
    );
}
