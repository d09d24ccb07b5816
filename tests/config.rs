// ABOUTME: Integration tests for configuration parsing and validation.
// ABOUTME: Tests YAML parsing, secret env indirection, and defaults.

use nimbus::config::*;
use nimbus::error::Error;
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let yaml = r#"
access_key_id: AKIDEXAMPLE
secret_access_key: verysecret
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.region, "us-east-1");
        assert!(!config.cache);
        assert_eq!(config.operation_timeout, Duration::from_secs(30));
        assert_eq!(config.removal.max_passes, 3);
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
access_key_id: AKIDEXAMPLE
secret_access_key:
  env: NIMBUS_SECRET
  default: fallback

region: eu-west-1
cache: true
operation_timeout: 45s

removal:
  max_passes: 5
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.region, "eu-west-1");
        assert!(config.cache);
        assert_eq!(config.operation_timeout, Duration::from_secs(45));
        assert_eq!(config.removal.max_passes, 5);
    }

    #[test]
    fn missing_credentials_returns_error() {
        let yaml = "region: us-east-1\n";
        assert!(Config::from_yaml(yaml).is_err());
    }
}

mod secrets {
    use super::*;

    #[test]
    fn literal_resolves_to_itself() {
        let value = SecretValue::Literal("abc".to_string());
        assert_eq!(value.resolve().unwrap(), "abc");
    }

    #[test]
    fn env_reference_resolves_from_environment() {
        let yaml = r#"
access_key_id:
  env: NIMBUS_TEST_ACCESS_KEY
secret_access_key: shh
"#;
        temp_env::with_var("NIMBUS_TEST_ACCESS_KEY", Some("from-env"), || {
            let config = Config::from_yaml(yaml).unwrap();
            let credentials = config.credentials().unwrap();
            assert_eq!(credentials.access_key_id, "from-env");
            assert_eq!(credentials.secret_access_key, "shh");
        });
    }

    #[test]
    fn env_reference_falls_back_to_default() {
        let value = SecretValue::FromEnv {
            var: "NIMBUS_TEST_UNSET_WITH_DEFAULT".to_string(),
            default: Some("fallback".to_string()),
        };
        temp_env::with_var_unset("NIMBUS_TEST_UNSET_WITH_DEFAULT", || {
            assert_eq!(value.resolve().unwrap(), "fallback");
        });
    }

    #[test]
    fn unset_env_without_default_is_an_error() {
        let value = SecretValue::FromEnv {
            var: "NIMBUS_TEST_UNSET".to_string(),
            default: None,
        };
        temp_env::with_var_unset("NIMBUS_TEST_UNSET", || {
            assert!(matches!(value.resolve(), Err(Error::MissingEnvVar(_))));
        });
    }
}

mod discovery {
    use super::*;

    const MINIMAL: &str = "access_key_id: a\nsecret_access_key: b\n";

    #[test]
    fn discover_finds_nimbus_yml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), MINIMAL).unwrap();
        assert!(Config::discover(dir.path()).is_ok());
    }

    #[test]
    fn discover_finds_dotdir_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".nimbus")).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME_DIR), MINIMAL).unwrap();
        assert!(Config::discover(dir.path()).is_ok());
    }

    #[test]
    fn discover_without_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::discover(dir.path()),
            Err(Error::ConfigNotFound(_))
        ));
    }
}

mod template {
    use super::*;

    #[test]
    fn template_references_conventional_env_vars() {
        let config = Config::template();
        assert_eq!(
            config.access_key_id,
            SecretValue::FromEnv {
                var: "AWS_ACCESS_KEY_ID".to_string(),
                default: None,
            }
        );
    }
}
