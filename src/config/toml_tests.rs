//! Tests for TOML configuration parsing.

use std::io::Write;

use tempfile::NamedTempFile;

use super::ConfigError;
use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.api.host.is_none());
        assert!(config.api.app_token.is_none());
        assert!(config.transport.timeout.is_none());
        assert!(config.webhook.secret_key.is_none());
    }

    #[test]
    fn parse_api_section() {
        let toml = r#"
            [api]
            host = "api.sandbox.example"
            app_token = "sbx:token"
            secret_key = "secret"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let api = &config.api;

        assert_eq!(api.host.as_deref(), Some("api.sandbox.example"));
        assert_eq!(api.app_token.as_deref(), Some("sbx:token"));
        assert_eq!(api.secret_key.as_deref(), Some("secret"));
    }

    #[test]
    fn parse_transport_section() {
        let toml = r"
            [transport]
            timeout = 10
            connect_timeout = 5
            tcp_keepalive = 60
            use_env_proxy = false
        ";

        let config = TomlConfig::parse(toml).unwrap();
        let transport = &config.transport;

        assert_eq!(transport.timeout, Some(10));
        assert_eq!(transport.connect_timeout, Some(5));
        assert_eq!(transport.tcp_keepalive, Some(60));
        assert_eq!(transport.use_env_proxy, Some(false));
    }

    #[test]
    fn parse_webhook_section() {
        let toml = r#"
            [webhook]
            secret_key = "whsec"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(config.webhook.secret_key.as_deref(), Some("whsec"));
    }
}

mod rejection {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[retry]\nmax_attempts = 3\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = TomlConfig::parse("[api]\ntoken = \"x\"\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse("[transport]\ntimeout = \"30s\"\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn invalid_syntax_is_rejected() {
        let result = TomlConfig::parse("[api\nhost = ");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nhost = \"api.sandbox.example\"").unwrap();

        let config = TomlConfig::load(file.path()).unwrap();
        assert_eq!(config.api.host.as_deref(), Some("api.sandbox.example"));
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = TomlConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::FileRead { path: ref p, .. }) if *p == path));
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert!(config.api.app_token.is_none());
        assert!(config.api.secret_key.is_none());
        assert!(config.webhook.secret_key.is_none());
    }

    #[test]
    fn template_mentions_every_section_and_env_var() {
        let template = default_config_template();

        for needle in [
            "[api]",
            "[transport]",
            "[webhook]",
            "SUMSUB_APP_TOKEN",
            "SUMSUB_SECRET_KEY",
            "SUMSUB_WEBHOOK_SECRET",
        ] {
            assert!(template.contains(needle), "template lacks {needle}");
        }
    }
}
