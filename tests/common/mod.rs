use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use paperup::api::{Application, BuildList, BuildRecord, Downloads, ProjectInfo, ReleaseApi};
use paperup::config::AppConfig;
use paperup::error::UpdateError;

/// Scripted release API. Tests mutate the shared state between calls to
/// model upstream changes; single-threaded use only.
#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Rc<RefCell<FakeState>>,
}

#[derive(Default)]
pub struct FakeState {
    pub versions: Vec<String>,
    pub builds: HashMap<String, Vec<BuildRecord>>,
    pub payload: Vec<u8>,
    pub fail_fetch: bool,
    pub fail_downloads: bool,
    pub download_calls: u32,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.inner.borrow_mut());
    }

    pub fn download_calls(&self) -> u32 {
        self.inner.borrow().download_calls
    }
}

impl ReleaseApi for FakeApi {
    fn project(&self) -> Result<ProjectInfo, UpdateError> {
        let state = self.inner.borrow();
        if state.fail_fetch {
            return Err(UpdateError::Transport("scripted fetch failure".to_string()));
        }
        Ok(ProjectInfo {
            versions: state.versions.clone(),
        })
    }

    fn builds(&self, version: &str) -> Result<BuildList, UpdateError> {
        let state = self.inner.borrow();
        if state.fail_fetch {
            return Err(UpdateError::Transport("scripted fetch failure".to_string()));
        }
        Ok(BuildList {
            builds: state.builds.get(version).cloned().unwrap_or_default(),
        })
    }

    fn download_url(&self, version: &str, build: &BuildRecord) -> String {
        format!("fake://{}/{}/{}", version, build.build, build.artifact_name())
    }

    fn download(&self, _url: &str, dest: &Path) -> Result<(), UpdateError> {
        let mut state = self.inner.borrow_mut();
        state.download_calls += 1;
        if state.fail_downloads {
            return Err(UpdateError::Transport(
                "scripted download failure".to_string(),
            ));
        }
        std::fs::write(dest, &state.payload).map_err(|source| UpdateError::Io {
            context: format!("write {}", dest.display()),
            source,
        })
    }
}

pub fn build(number: u32, channel: &str, artifact: &str) -> BuildRecord {
    BuildRecord {
        build: number,
        channel: channel.to_string(),
        downloads: Downloads {
            application: Application {
                name: artifact.to_string(),
            },
        },
    }
}

/// Config rooted in a temp directory so no test touches the real cwd.
pub fn test_config(root: &Path) -> AppConfig {
    AppConfig {
        base_url: "https://api.example.test/v2".to_string(),
        project: "paper".to_string(),
        artifact_path: root.join("paper.jar"),
        logs_dir: root.join("logs"),
    }
}

/// Two versions: 1.21 has only an experimental build, 1.20 has two
/// default-channel builds. The stable pick is 1.20 build 6.
pub fn seed_standard(api: &FakeApi) {
    api.with(|state| {
        state.versions = vec!["1.20".to_string(), "1.21".to_string()];
        state.builds.insert(
            "1.21".to_string(),
            vec![build(1, "experimental", "paper-1.21-1.jar")],
        );
        state.builds.insert(
            "1.20".to_string(),
            vec![
                build(5, "default", "paper-1.20-5.jar"),
                build(6, "default", "paper-1.20-6.jar"),
            ],
        );
        state.payload = b"jar bytes".to_vec();
    });
}
