use crate::config::AuthorConfig;

pub const DEFAULT_AUTHOR_NAME: &str = "Scaffolder";
pub const DEFAULT_AUTHOR_EMAIL: &str = "scaffolder@backstage.io";

/// Identity used as both author and committer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorInfo {
    pub name: String,
    pub email: String,
}

impl AuthorInfo {
    /// Per field: explicit value, then configured default, then built-in default.
    pub fn resolve(
        name: Option<&str>,
        email: Option<&str>,
        defaults: Option<&AuthorConfig>,
    ) -> Self {
        let name = non_empty(name)
            .or_else(|| non_empty(defaults.and_then(|defaults| defaults.name.as_deref())))
            .unwrap_or(DEFAULT_AUTHOR_NAME);
        let email = non_empty(email)
            .or_else(|| non_empty(defaults.and_then(|defaults| defaults.email.as_deref())))
            .unwrap_or(DEFAULT_AUTHOR_EMAIL);

        AuthorInfo {
            name: name.to_owned(),
            email: email.to_owned(),
        }
    }
}

// git refuses signatures with an empty name or email
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

impl Default for AuthorInfo {
    fn default() -> Self {
        AuthorInfo {
            name: DEFAULT_AUTHOR_NAME.to_owned(),
            email: DEFAULT_AUTHOR_EMAIL.to_owned(),
        }
    }
}

impl From<AuthorConfig> for AuthorInfo {
    fn from(value: AuthorConfig) -> Self {
        AuthorInfo::resolve(None, None, Some(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fall_back_to_builtin_defaults() {
        assert_eq!(AuthorInfo::resolve(None, None, None), AuthorInfo::default());
    }

    #[test]
    fn should_prefer_explicit_values_per_field() {
        let defaults = AuthorConfig {
            name: Some("Config Name".to_owned()),
            email: Some("config@example.com".to_owned()),
        };

        let author = AuthorInfo::resolve(Some("Jane"), None, Some(&defaults));

        assert_eq!(author.name, "Jane");
        assert_eq!(author.email, "config@example.com");
    }

    #[test]
    fn should_skip_empty_values() {
        let defaults = AuthorConfig {
            name: Some("Bot".to_owned()),
            email: Some(String::new()),
        };

        let author = AuthorInfo::resolve(Some(""), Some(""), Some(&defaults));

        assert_eq!(author.name, "Bot");
        assert_eq!(author.email, DEFAULT_AUTHOR_EMAIL);
    }

    #[test]
    fn should_fill_missing_config_fields_with_builtin_defaults() {
        let author: AuthorInfo = AuthorConfig {
            name: Some("Config Name".to_owned()),
            email: None,
        }
        .into();

        assert_eq!(author.name, "Config Name");
        assert_eq!(author.email, DEFAULT_AUTHOR_EMAIL);
    }
}
