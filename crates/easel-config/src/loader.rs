use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes the result. The platform URL is normalized before
    /// validation so later `Url::join` calls keep its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded = crate::env::expand_env(&raw)
            .map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let mut config: Self =
            toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.platform.normalize();
        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if any section fails its checks
    pub fn validate(&self) -> anyhow::Result<()> {
        self.platform
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid config: {e}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), contents).unwrap();
        file
    }

    #[test]
    fn loads_a_complete_file() {
        let file = write_config(
            r#"
            [platform]
            base_url = "https://api.example.com"
            api_key = "sk-test-123"
            timeout_secs = 10
            "#,
        );

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.platform.base_url.as_str(), "https://api.example.com/");
        assert_eq!(
            config.platform.credential().unwrap().expose_secret(),
            "sk-test-123"
        );
        assert_eq!(config.platform.timeout_secs, 10);
    }

    #[test]
    fn expands_the_api_key_placeholder() {
        let file = write_config(
            r#"
            [platform]
            base_url = "https://api.example.com"
            api_key = "{{ env.EASEL_API_KEY | default("") }}"
            "#,
        );

        temp_env::with_var_unset("EASEL_API_KEY", || {
            let config = Config::load(file.path()).unwrap();
            assert!(config.platform.credential().is_none());
        });

        temp_env::with_var("EASEL_API_KEY", Some("sk-from-env"), || {
            let config = Config::load(file.path()).unwrap();
            assert_eq!(
                config.platform.credential().unwrap().expose_secret(),
                "sk-from-env"
            );
        });
    }

    #[test]
    fn base_url_gains_a_trailing_slash() {
        let file = write_config(
            r#"
            [platform]
            base_url = "https://api.example.com/tenant-a"
            "#,
        );

        let config = Config::load(file.path()).unwrap();

        assert_eq!(
            config.platform.base_url.as_str(),
            "https://api.example.com/tenant-a/"
        );
    }

    #[test]
    fn unknown_sections_are_rejected() {
        let file = write_config(
            r#"
            [platform]
            base_url = "https://api.example.com"

            [canvas]
            theme = "dark"
            "#,
        );

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn invalid_sections_fail_validation() {
        let file = write_config(
            r#"
            [platform]
            base_url = "https://api.example.com"
            timeout_secs = 0
            "#,
        );

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Config::load(Path::new("/nonexistent/easel.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/easel.toml"));
    }
}
