use tracing::trace;

/// Reads an environment variable, upper-casing the name first.
///
/// When the upper-cased name is not set, dashes are replaced with
/// underscores and the lookup is retried, so `my-var` finds `MY_VAR`.
/// The live environment is read on every call.
pub fn sysenv(name: &str) -> Option<String> {
    let key = name.to_uppercase();
    lookup(&key).or_else(|| {
        let no_dash = key.replace('-', "_");
        if no_dash == key {
            return None;
        }
        trace!(name, key = %no_dash, "retrying environment lookup without dashes");
        lookup(&no_dash)
    })
}

fn lookup(key: &str) -> Option<String> {
    if key.is_empty() || key.contains(['=', '\0']) {
        return None;
    }
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_and_underscore_are_equivalent() {
        std::env::set_var("RELAY_SYSENV_DASH_TEST", "42");

        assert_eq!(sysenv("relay-sysenv-dash-test").as_deref(), Some("42"));
        assert_eq!(sysenv("RELAY_SYSENV_DASH_TEST").as_deref(), Some("42"));
        assert_eq!(
            sysenv("relay-sysenv-dash-test"),
            sysenv("relay_sysenv_dash_test")
        );
    }

    #[test]
    fn test_exact_name_wins() {
        std::env::set_var("RELAY-SYSENV-EXACT-TEST", "dashed");
        std::env::set_var("RELAY_SYSENV_EXACT_TEST", "underscored");

        assert_eq!(sysenv("relay-sysenv-exact-test").as_deref(), Some("dashed"));
    }

    #[test]
    fn test_missing_variable() {
        assert_eq!(sysenv("relay-sysenv-never-set"), None);
        assert_eq!(sysenv(""), None);
        assert_eq!(sysenv("bad=name"), None);
    }

    #[test]
    fn test_reads_live_environment() {
        assert_eq!(sysenv("relay_sysenv_live_test"), None);
        std::env::set_var("RELAY_SYSENV_LIVE_TEST", "now");
        assert_eq!(sysenv("relay_sysenv_live_test").as_deref(), Some("now"));
        std::env::remove_var("RELAY_SYSENV_LIVE_TEST");
        assert_eq!(sysenv("relay_sysenv_live_test"), None);
    }
}
