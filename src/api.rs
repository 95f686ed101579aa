//! Thin client for the papermc.io downloads REST API.
//!
//! The client only fetches and decodes; it never retries and never
//! partially populates a result. Retry policy belongs to the workflow.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::UpdateError;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Channel tag the API puts on stable builds. Anything else is a
/// pre-release or experimental build.
pub const STABLE_CHANNEL: &str = "default";

#[derive(Clone, Debug, Deserialize)]
pub struct ProjectInfo {
    /// Ascending by release date; "latest" is the last element.
    pub versions: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BuildList {
    /// Ascending by build number.
    pub builds: Vec<BuildRecord>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct BuildRecord {
    pub build: u32,
    #[serde(default)]
    pub channel: String,
    pub downloads: Downloads,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Downloads {
    pub application: Application,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Application {
    pub name: String,
}

impl BuildRecord {
    pub fn artifact_name(&self) -> &str {
        &self.downloads.application.name
    }

    pub fn is_stable(&self) -> bool {
        self.channel == STABLE_CHANNEL
    }
}

/// Boundary to the versions/builds API. The resolver and workflow talk to
/// this trait so tests can script responses instead of the network.
pub trait ReleaseApi {
    fn project(&self) -> Result<ProjectInfo, UpdateError>;

    fn builds(&self, version: &str) -> Result<BuildList, UpdateError>;

    /// Concrete artifact URL for `build` of `version`.
    fn download_url(&self, version: &str, build: &BuildRecord) -> String;

    /// Streams `url` into `dest`. Must leave `dest` untouched on failure.
    fn download(&self, url: &str, dest: &Path) -> Result<(), UpdateError>;
}

#[derive(Clone)]
pub struct HttpReleaseApi {
    client: reqwest::blocking::Client,
    base_url: String,
    project: String,
}

impl HttpReleaseApi {
    pub fn new(base_url: &str, project: &str) -> Result<Self, UpdateError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("paperup")
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            project: project.to_string(),
        })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, UpdateError> {
        let resp = self.client.get(url).send()?;
        if resp.status() != reqwest::StatusCode::OK {
            return Err(UpdateError::UnexpectedStatus {
                status: resp.status(),
                url: url.to_string(),
            });
        }
        Ok(resp)
    }

    fn project_url(&self) -> String {
        format!("{}/projects/{}/", self.base_url, self.project)
    }

    fn builds_url(&self, version: &str) -> String {
        format!(
            "{}/projects/{}/versions/{}/builds/",
            self.base_url, self.project, version
        )
    }
}

impl ReleaseApi for HttpReleaseApi {
    fn project(&self) -> Result<ProjectInfo, UpdateError> {
        Ok(self.get(&self.project_url())?.json()?)
    }

    fn builds(&self, version: &str) -> Result<BuildList, UpdateError> {
        Ok(self.get(&self.builds_url(version))?.json()?)
    }

    fn download_url(&self, version: &str, build: &BuildRecord) -> String {
        format!(
            "{}/projects/{}/versions/{}/builds/{}/downloads/{}",
            self.base_url,
            self.project,
            version,
            build.build,
            build.artifact_name()
        )
    }

    fn download(&self, url: &str, dest: &Path) -> Result<(), UpdateError> {
        let mut resp = self.get(url)?;

        // Stream into a sibling temp file and rename into place so a
        // failed transfer never leaves a truncated artifact at `dest`.
        let tmp = dest.with_extension(format!("part.{}", std::process::id()));
        let result = (|| -> Result<(), UpdateError> {
            let mut out = fs::File::create(&tmp).map_err(|source| UpdateError::Io {
                context: format!("create {}", tmp.display()),
                source,
            })?;
            io::copy(&mut resp, &mut out).map_err(|source| UpdateError::Io {
                context: format!("write {}", tmp.display()),
                source,
            })?;
            fs::rename(&tmp, dest).map_err(|source| UpdateError::Io {
                context: format!("rename {} -> {}", tmp.display(), dest.display()),
                source,
            })?;
            Ok(())
        })();

        if result.is_err() {
            fs::remove_file(&tmp).ok();
        }
        result
    }
}
