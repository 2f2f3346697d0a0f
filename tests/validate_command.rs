#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for profile loading, validation, and the `check`
//! command's probing.

mod common;

use std::sync::Arc;

use shellboot::commands::check::probe_all;
use shellboot::config::{Config, ProfileSource, resolve_path};
use shellboot::error::ConfigError;
use shellboot::timing::Category;

use common::{IntegrationTestContext, ScriptedExecutor};

#[test]
fn profile_file_loads_with_custom_thresholds() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.write_profile(
        r#"
verbose = true
overall = "Startup"

[thresholds]
overflow = "critical"
bounds = [{ up_to_ms = 5, category = "fastest" }, { up_to_ms = 50, category = "slow" }]
"#,
    );

    let config = Config::from_file(&path).unwrap();

    assert!(config.verbose);
    assert_eq!(config.overall, "Startup");
    assert_eq!(config.source, ProfileSource::File(path));
    assert_eq!(config.thresholds.categorize(30.0), Category::Slow);
    assert_eq!(config.thresholds.categorize(51.0), Category::Critical);
}

#[test]
fn descending_thresholds_are_rejected() {
    let ctx = IntegrationTestContext::new();
    let path = ctx.write_profile(
        r#"
[thresholds]
bounds = [
    { up_to_ms = 50, category = "fast" },
    { up_to_ms = 5, category = "slow" },
]
"#,
    );
    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("not greater than the previous bound"));
}

#[test]
fn explicit_missing_profile_is_not_found() {
    let ctx = IntegrationTestContext::new();
    let missing = ctx.home_path().join("nope.toml");
    let err = Config::load(Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn user_profile_is_optional() {
    let ctx = IntegrationTestContext::new();
    let user = ctx.home_path().join(".config/shellboot/profile.toml");
    assert_eq!(resolve_path(None, None, Some(user)).unwrap(), None);
}

#[test]
fn questionable_profile_produces_warnings() {
    let ctx = IntegrationTestContext::new();
    ctx.write_profile(
        r#"
[[stages]]
name = "Overall"
steps = [{ kind = "run", label = "blank", program = "" }]

[[stages]]
name = "Prompt"

[[stages.steps]]
kind = "modules"
label = "engine"
stop_on_first_success = true
candidates = [{ name = "starship" }]

[[stages]]
name = "Prompt"
steps = [{ kind = "modules", label = "icons", candidates = [] }]
"#,
    );

    let warnings = ctx.load_config().validate();
    let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();

    assert_eq!(warnings.len(), 5, "{messages:?}");
    assert!(messages.iter().any(|m| m.contains("overall section")));
    assert!(messages.iter().any(|m| m.contains("duplicate stage name")));
    assert!(messages.iter().any(|m| m.contains("empty program")));
    assert!(messages.iter().any(|m| m.contains("single candidate")));
    assert!(messages.iter().any(|m| m.contains("no candidates")));
}

#[test]
fn check_probes_every_candidate_in_order() {
    let ctx = IntegrationTestContext::new();
    ctx.write_profile(
        r#"
[[stages]]
name = "Modules"

[[stages.steps]]
kind = "modules"
label = "tools"
candidates = [{ name = "fzf" }, { name = "z", probe = "zoxide" }]

[[stages]]
name = "Prompt"

[[stages.steps]]
kind = "modules"
label = "engine"
stop_on_first_success = true
candidates = [{ name = "oh-my-posh" }, { name = "starship" }]
"#,
    );
    let exec = Arc::new(ScriptedExecutor::new(&ctx.clock).on_path(&["zoxide", "starship"]));
    let bctx = ctx.bootstrap_context(exec.clone(), true);

    let results = probe_all(&bctx, &ctx.load_config());

    let summary: Vec<(&str, bool)> = results
        .iter()
        .map(|r| (r.name.as_str(), *r.available.as_ref().unwrap()))
        .collect();
    assert_eq!(
        summary,
        [
            ("fzf", false),
            ("z", true),
            ("oh-my-posh", false),
            ("starship", true)
        ]
    );
    assert!(exec.calls().is_empty(), "probing must not activate anything");
}
