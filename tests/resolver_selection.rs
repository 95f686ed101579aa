mod common;

use common::{FakeApi, build, seed_standard};
use paperup::api::{HttpReleaseApi, ReleaseApi};
use paperup::error::UpdateError;
use paperup::resolver::Resolver;

#[test]
fn skips_versions_without_stable_builds() {
    let api = FakeApi::new();
    seed_standard(&api);
    let resolver = Resolver::new(api);

    assert_eq!(resolver.latest_stable_version().unwrap(), "1.20");

    let release = resolver.resolve_latest().unwrap();
    assert_eq!(release.version, "1.20");
    assert_eq!(release.build.build, 6);
    assert_eq!(release.identifier(), "paper-1.20-6.jar");
}

#[test]
fn prefers_highest_version_with_a_stable_build() {
    let api = FakeApi::new();
    api.with(|state| {
        state.versions = vec!["1.19".to_string(), "1.20".to_string(), "1.21".to_string()];
        state.builds.insert(
            "1.19".to_string(),
            vec![build(9, "default", "paper-1.19-9.jar")],
        );
        state.builds.insert(
            "1.20".to_string(),
            vec![build(2, "default", "paper-1.20-2.jar")],
        );
        state.builds.insert(
            "1.21".to_string(),
            vec![build(1, "experimental", "paper-1.21-1.jar")],
        );
    });
    let resolver = Resolver::new(api);

    // 1.19 also qualifies but must never win over 1.20.
    assert_eq!(resolver.latest_stable_version().unwrap(), "1.20");
}

#[test]
fn no_stable_build_anywhere_is_an_error() {
    let api = FakeApi::new();
    api.with(|state| {
        state.versions = vec!["1.20".to_string(), "1.21".to_string()];
        state.builds.insert(
            "1.20".to_string(),
            vec![build(1, "experimental", "paper-1.20-1.jar")],
        );
        state.builds.insert(
            "1.21".to_string(),
            vec![build(1, "experimental", "paper-1.21-1.jar")],
        );
    });
    let resolver = Resolver::new(api);

    assert!(matches!(
        resolver.latest_stable_version(),
        Err(UpdateError::NoStableBuildFound)
    ));
}

#[test]
fn empty_version_list_is_an_error() {
    let resolver = Resolver::new(FakeApi::new());
    assert!(matches!(
        resolver.latest_stable_version(),
        Err(UpdateError::NoStableBuildFound)
    ));
}

#[test]
fn latest_build_ignores_channel() {
    let api = FakeApi::new();
    api.with(|state| {
        state.versions = vec!["1.21".to_string()];
        state.builds.insert(
            "1.21".to_string(),
            vec![
                build(3, "default", "paper-1.21-3.jar"),
                build(4, "experimental", "paper-1.21-4.jar"),
            ],
        );
    });
    let resolver = Resolver::new(api);

    // "Latest build" answers what is newest, not what is stable.
    let latest = resolver.latest_build("1.21").unwrap();
    assert_eq!(latest.build, 4);
    assert_eq!(latest.channel, "experimental");
}

#[test]
fn version_without_builds_is_an_error() {
    let api = FakeApi::new();
    api.with(|state| {
        state.versions = vec!["1.21".to_string()];
        state.builds.insert("1.21".to_string(), vec![]);
    });
    let resolver = Resolver::new(api);

    assert!(matches!(
        resolver.latest_build("1.21"),
        Err(UpdateError::NoBuilds { .. })
    ));
}

#[test]
fn transport_failure_propagates_unclassified() {
    let api = FakeApi::new();
    api.with(|state| {
        state.versions = vec!["1.20".to_string()];
        state.fail_fetch = true;
    });
    let resolver = Resolver::new(api);

    assert!(matches!(
        resolver.latest_stable_version(),
        Err(UpdateError::Transport(_))
    ));
}

#[test]
fn http_download_url_composition() {
    let api = HttpReleaseApi::new("https://api.example.test/v2/", "paper").unwrap();
    let b = build(6, "default", "paper-1.20-6.jar");

    assert_eq!(
        api.download_url("1.20", &b),
        "https://api.example.test/v2/projects/paper/versions/1.20/builds/6/downloads/paper-1.20-6.jar"
    );
}
